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

//! Raw preference profiles.
//!
//! A `PreferenceProfile` stores the lists of one side exactly as they were
//! supplied, using one-based agent identifiers. Nothing is validated on
//! construction: the verifier has to be able to describe a malformed profile
//! agent by agent, while the matcher rejects it outright when an `Instance` is
//! built. Both go through the checks in this module.

use crate::index::Side;

/// The reason a single preference list is not a permutation of `1..=n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// The list does not contain exactly `n` entries.
    #[error("expected {expected} entries, found {found}")]
    WrongLength {
        /// The instance size `n`.
        expected: usize,
        /// The number of entries in the list.
        found: usize,
    },
    /// An entry lies outside `1..=n`.
    #[error("entry {value} is outside 1..={n}")]
    OutOfRange {
        /// The offending entry.
        value: usize,
        /// The instance size `n`.
        n: usize,
    },
    /// An entry appears more than once.
    #[error("entry {value} appears more than once")]
    Duplicate {
        /// The repeated entry.
        value: usize,
    },
}

/// The preference lists of every agent on one side of the market.
///
/// `lists[i]` is the list of the agent with identifier `i + 1`; each list
/// names agents of the opposite side by their one-based identifier, most
/// preferred first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreferenceProfile {
    side: Side,
    lists: Vec<Vec<usize>>,
}

impl PreferenceProfile {
    /// Creates a profile for `side` from raw one-based lists.
    #[inline]
    pub fn new(side: Side, lists: Vec<Vec<usize>>) -> Self {
        Self { side, lists }
    }

    /// Creates a hospital profile.
    #[inline]
    pub fn hospitals(lists: Vec<Vec<usize>>) -> Self {
        Self::new(Side::Hospital, lists)
    }

    /// Creates a student profile.
    #[inline]
    pub fn students(lists: Vec<Vec<usize>>) -> Self {
        Self::new(Side::Student, lists)
    }

    /// Returns the side whose preferences this profile holds.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Returns the number of agents that have a list.
    #[inline]
    pub fn num_agents(&self) -> usize {
        self.lists.len()
    }

    /// Returns `true` if the profile holds no lists.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Returns the list of the agent at zero-based position `agent`.
    ///
    /// # Panics
    ///
    /// Panics if `agent` is out of bounds.
    #[inline]
    pub fn list(&self, agent: usize) -> &[usize] {
        assert!(
            agent < self.num_agents(),
            "called `PreferenceProfile::list` with agent out of bounds: the len is {} but the index is {}",
            self.num_agents(),
            agent
        );

        &self.lists[agent]
    }

    /// Returns all lists.
    #[inline]
    pub fn lists(&self) -> &[Vec<usize>] {
        &self.lists
    }

    /// Checks that the list of agent `agent` is a permutation of `1..=n`.
    ///
    /// # Panics
    ///
    /// Panics if `agent` is out of bounds.
    pub fn validate_agent(&self, agent: usize, n: usize) -> Result<(), ProfileError> {
        let mut seen = vec![false; n];
        check_permutation(self.list(agent), n, &mut seen)
    }

    /// Returns every agent (zero-based) whose list is not a permutation of
    /// `1..=n`, together with the first problem found in that list.
    pub fn malformed_agents(&self, n: usize) -> Vec<(usize, ProfileError)> {
        let mut seen = vec![false; n];
        self.lists
            .iter()
            .enumerate()
            .filter_map(|(agent, list)| {
                check_permutation(list, n, &mut seen)
                    .err()
                    .map(|e| (agent, e))
            })
            .collect()
    }

    /// Returns the first malformed agent, if any.
    pub fn first_malformed(&self, n: usize) -> Option<(usize, ProfileError)> {
        let mut seen = vec![false; n];
        self.lists
            .iter()
            .enumerate()
            .find_map(|(agent, list)| {
                check_permutation(list, n, &mut seen)
                    .err()
                    .map(|e| (agent, e))
            })
    }
}

impl std::fmt::Display for PreferenceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for list in &self.lists {
            let mut first = true;
            for id in list {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{}", id)?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// `seen` must have length `n`; it is cleared before returning.
fn check_permutation(list: &[usize], n: usize, seen: &mut [bool]) -> Result<(), ProfileError> {
    debug_assert_eq!(seen.len(), n);

    if list.len() != n {
        return Err(ProfileError::WrongLength {
            expected: n,
            found: list.len(),
        });
    }

    let mut result = Ok(());
    for &value in list {
        if value == 0 || value > n {
            result = Err(ProfileError::OutOfRange { value, n });
            break;
        }
        if seen[value - 1] {
            result = Err(ProfileError::Duplicate { value });
            break;
        }
        seen[value - 1] = true;
    }

    seen.iter_mut().for_each(|s| *s = false);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profile_has_no_malformed_agents() {
        let p = PreferenceProfile::hospitals(vec![vec![1, 2, 3], vec![3, 1, 2], vec![2, 3, 1]]);
        assert!(p.malformed_agents(3).is_empty());
        assert!(p.first_malformed(3).is_none());
        assert_eq!(p.num_agents(), 3);
        assert_eq!(p.side(), Side::Hospital);
    }

    #[test]
    fn test_duplicate_entry_is_reported() {
        let p = PreferenceProfile::students(vec![vec![1, 1], vec![2, 1]]);
        assert_eq!(
            p.malformed_agents(2),
            vec![(0, ProfileError::Duplicate { value: 1 })]
        );
    }

    #[test]
    fn test_out_of_range_and_wrong_length() {
        let p = PreferenceProfile::students(vec![vec![0, 1], vec![3, 1], vec![1]]);
        assert_eq!(
            p.malformed_agents(2),
            vec![
                (0, ProfileError::OutOfRange { value: 0, n: 2 }),
                (1, ProfileError::OutOfRange { value: 3, n: 2 }),
                (
                    2,
                    ProfileError::WrongLength {
                        expected: 2,
                        found: 1
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_scratch_is_reset_between_lists() {
        // A stale `seen` flag would turn the second list into a false duplicate.
        let p = PreferenceProfile::hospitals(vec![vec![2, 1], vec![1, 2]]);
        assert!(p.malformed_agents(2).is_empty());
    }

    #[test]
    fn test_validate_agent() {
        let p = PreferenceProfile::hospitals(vec![vec![1, 2], vec![2, 2]]);
        assert!(p.validate_agent(0, 2).is_ok());
        assert_eq!(
            p.validate_agent(1, 2),
            Err(ProfileError::Duplicate { value: 2 })
        );
    }

    #[test]
    fn test_display_renders_lines() {
        let p = PreferenceProfile::hospitals(vec![vec![2, 1], vec![1, 2]]);
        assert_eq!(p.to_string(), "2 1\n1 2\n");
    }

    #[test]
    #[should_panic(expected = "called `PreferenceProfile::list` with agent out of bounds")]
    fn test_list_out_of_bounds_panics() {
        let p = PreferenceProfile::hospitals(vec![vec![1]]);
        let _ = p.list(1);
    }
}
