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

//! Dovetail engine: hospital-proposing Gale–Shapley matching
//!
//! Computes the hospital-optimal stable matching of a complete, strict
//! instance. The proposal loop runs over reusable buffers owned by the
//! solver; monitors observe every proposal without affecting the result.
//!
//! Core flow
//! - Build a `dovetail_model::instance::Instance` (or load one).
//! - Run `gale_shapley::GaleShapleySolver::solve`, or
//!   `solve_with_monitor` to attach a monitor.
//! - Inspect the `result::MatchOutcome`: termination, matching, statistics.
//!
//! For raw profiles, `gale_shapley::solve` validates and solves in one call.
//!
//! Guarantees
//! - At most `n * n` proposals.
//! - The result is a bijection, stable, and hospital-optimal.
//! - The result does not depend on the order free hospitals are served in.
//!
//! Module map
//! - `gale_shapley`: the solver and the proposal session.
//! - `monitor`: proposal monitors (no-op, log, composite).
//! - `result`: outcomes with termination reasons.
//! - `stats`: lightweight counters/timing.

pub mod gale_shapley;
pub mod monitor;
pub mod result;
pub mod stats;
