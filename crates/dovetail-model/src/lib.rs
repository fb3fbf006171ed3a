// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Dovetail Model
//!
//! **The data model for the Dovetail hospital/student stable matching solver.**
//!
//! This crate defines everything the matcher and the verifier exchange:
//! preference data, validated instances and matchings, plus the text formats
//! they are read from and written to.
//!
//! ## Architecture
//!
//! * **`index`**: Strongly-typed zero-based indices (`HospitalIndex`, `StudentIndex`) and `Side`.
//! * **`preference`**: `PreferenceProfile`, the raw lists of one side, and per-list validation.
//! * **`rank`**: `RankTable`, the inverse of a profile for constant-time preference queries.
//! * **`instance`**: `Instance`, the validated pair of profiles with cached rank tables, and `InputError`.
//! * **`matching`**: `Matching`, an ordered list of pairs that can also hold malformed external data.
//! * **`loading`**: Loaders for preference files and matching files.
//! * **`generate`**: Seeded random instances.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: A `HospitalIndex` cannot be passed where a `StudentIndex` is expected.
//! 2.  **Memory Layout**: Lists and rank tables are flattened `n * n` vectors.
//! 3.  **Fail-Fast**: An `Instance` only exists if both profiles are complete permutations, so
//!     algorithms working on it never meet an invalid list.

pub mod generate;
pub mod index;
pub mod instance;
pub mod loading;
pub mod matching;
pub mod preference;
pub mod rank;
