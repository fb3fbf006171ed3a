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

//! Random instance generation.
//!
//! Every list is an independent, uniformly random permutation drawn from a
//! seeded `ChaCha8Rng`, so a given `(seed, n)` always yields the same
//! instance on every platform. Used for benchmarks, property tests and the
//! `generate` command.

use crate::{
    instance::{InputError, Instance},
    preference::PreferenceProfile,
};
use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use std::io::Write;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// A seeded generator of uniformly random complete instances.
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    rng: ChaCha8Rng,
}

impl Default for InstanceGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl InstanceGenerator {
    /// Creates a generator with the given seed.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draws the raw lists of one side.
    pub fn random_lists(&mut self, n: usize) -> Vec<Vec<usize>> {
        (0..n)
            .map(|_| {
                let mut list: Vec<usize> = (1..=n).collect();
                list.shuffle(&mut self.rng);
                list
            })
            .collect()
    }

    /// Draws a complete instance of size `n`.
    pub fn generate(&mut self, n: usize) -> Instance {
        let hospitals = PreferenceProfile::hospitals(self.random_lists(n));
        let students = PreferenceProfile::students(self.random_lists(n));

        // Shuffled ranges are permutations by construction.
        match Instance::new(&hospitals, &students) {
            Ok(instance) => instance,
            Err(e) => unreachable!("generated lists are always permutations: {e}"),
        }
    }

    /// Draws an instance and lets `f` corrupt the lists before validation.
    ///
    /// Handy for producing malformed inputs in tests.
    pub fn generate_with<F>(&mut self, n: usize, f: F) -> Result<Instance, InputError>
    where
        F: FnOnce(&mut Vec<Vec<usize>>, &mut Vec<Vec<usize>>),
    {
        let mut hospitals = self.random_lists(n);
        let mut students = self.random_lists(n);
        f(&mut hospitals, &mut students);
        Instance::from_lists(hospitals, students)
    }
}

/// Writes `instance` in the preference file format.
///
/// # Errors
///
/// Propagates any I/O error from `writer`.
pub fn write_instance<W: Write>(instance: &Instance, mut writer: W) -> std::io::Result<()> {
    write!(writer, "{}", instance)?;
    writer.flush()
}
