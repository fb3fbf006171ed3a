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

//! Inverse preference lookup.
//!
//! A `RankTable` answers "where does `other` appear in `agent`'s list" in
//! constant time. It is the inverse of a validated profile, stored as one flat
//! `n * n` vector in row-major order (`agent * n + other`).

use crate::preference::PreferenceProfile;

#[inline(always)]
fn flatten_index(n: usize, agent: usize, other: usize) -> usize {
    agent * n + other
}

/// Rank of every opposite-side agent in every list of one side.
///
/// Rank `0` is the most preferred entry.
#[derive(Clone, PartialEq, Eq)]
pub struct RankTable {
    n: usize,
    ranks: Vec<usize>, // len = n * n
}

impl RankTable {
    /// Builds the inverse of `profile` for an instance of size `n`.
    ///
    /// The profile must already be known to hold `n` permutations of
    /// `1..=n`; this is only checked in debug builds.
    pub fn from_profile(profile: &PreferenceProfile, n: usize) -> Self {
        debug_assert_eq!(
            profile.num_agents(),
            n,
            "called `RankTable::from_profile` with a profile of {} agents for n = {}",
            profile.num_agents(),
            n
        );
        debug_assert!(
            profile.first_malformed(n).is_none(),
            "called `RankTable::from_profile` with a malformed profile"
        );

        let mut ranks = vec![usize::MAX; n * n];
        for (agent, list) in profile.lists().iter().enumerate() {
            for (rank, &other) in list.iter().enumerate() {
                ranks[flatten_index(n, agent, other - 1)] = rank;
            }
        }

        Self { n, ranks }
    }

    /// Returns the instance size.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the rank of `other` in the list of `agent` (both zero-based).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn rank(&self, agent: usize, other: usize) -> usize {
        assert!(
            agent < self.n && other < self.n,
            "called `RankTable::rank` with index out of bounds: n is {} but the indices are ({}, {})",
            self.n,
            agent,
            other
        );

        self.ranks[flatten_index(self.n, agent, other)]
    }

    /// Returns `true` if `agent` strictly prefers `a` over `b`.
    #[inline]
    pub fn prefers(&self, agent: usize, a: usize, b: usize) -> bool {
        self.rank(agent, a) < self.rank(agent, b)
    }
}

impl std::fmt::Debug for RankTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankTable")
            .field("n", &self.n)
            .field("ranks", &self.ranks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_index() {
        assert_eq!(flatten_index(3, 0, 0), 0);
        assert_eq!(flatten_index(3, 1, 2), 5);
        assert_eq!(flatten_index(3, 2, 1), 7);
    }

    #[test]
    fn test_ranks_invert_lists() {
        let p = PreferenceProfile::students(vec![vec![3, 1, 2], vec![1, 2, 3], vec![2, 3, 1]]);
        let t = RankTable::from_profile(&p, 3);

        // Agent 0 ranks 3 first, 1 second, 2 last.
        assert_eq!(t.rank(0, 2), 0);
        assert_eq!(t.rank(0, 0), 1);
        assert_eq!(t.rank(0, 1), 2);

        assert_eq!(t.rank(2, 1), 0);
        assert_eq!(t.rank(2, 0), 2);
    }

    #[test]
    fn test_prefers() {
        let p = PreferenceProfile::students(vec![vec![2, 1], vec![1, 2]]);
        let t = RankTable::from_profile(&p, 2);
        assert!(t.prefers(0, 1, 0));
        assert!(!t.prefers(0, 0, 1));
        assert!(!t.prefers(1, 0, 0));
    }

    #[test]
    fn test_empty_table() {
        let p = PreferenceProfile::students(Vec::new());
        let t = RankTable::from_profile(&p, 0);
        assert_eq!(t.n(), 0);
    }

    #[test]
    #[should_panic(expected = "called `RankTable::rank` with index out of bounds")]
    fn test_rank_out_of_bounds_panics() {
        let p = PreferenceProfile::students(vec![vec![1]]);
        let t = RankTable::from_profile(&p, 1);
        let _ = t.rank(0, 1);
    }
}
