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

//! Dovetail verify: independent checks for hospital/student matchings
//!
//! Accepts any candidate matching, not only the matcher's, and reports what
//! is wrong with it instead of failing. Malformed preference data, missing or
//! repeated agents and blocking pairs all end up as `report::Violation`s in a
//! `report::ViolationReport`; an empty report means valid and stable.
//!
//! This crate does not depend on the matcher.
//!
//! Module map
//! - `verifier`: `check` for raw profiles, `check_instance` for validated ones.
//! - `report`: findings and the one-line verdict.
//! - `enumerate`: brute-force enumeration of all stable matchings.

pub mod enumerate;
pub mod report;
pub mod verifier;
