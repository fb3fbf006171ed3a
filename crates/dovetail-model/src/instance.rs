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

//! Validated problem instances.
//!
//! An `Instance` is the pair of preference profiles after they have been
//! checked to hold exactly `n` permutations of `1..=n` on each side, together
//! with the rank tables derived from them. Construction is the single
//! fail-fast gate in front of the matcher: once an `Instance` exists, every
//! list is complete and every rank lookup is defined.

use crate::{
    index::{HospitalIndex, Side, StudentIndex},
    preference::{PreferenceProfile, ProfileError},
    rank::RankTable,
};

/// The error returned when preference data does not describe a valid instance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The two sides have a different number of agents.
    #[error("{hospitals} hospitals but {students} students")]
    SizeMismatch {
        /// Number of hospital lists.
        hospitals: usize,
        /// Number of student lists.
        students: usize,
    },
    /// A preference list is not a permutation of `1..=n`.
    #[error("{side} {agent} has a malformed preference list: {reason}")]
    MalformedProfile {
        /// The side of the offending agent.
        side: Side,
        /// One-based identifier of the offending agent.
        agent: usize,
        /// What is wrong with the list.
        reason: ProfileError,
    },
}

/// A validated, immutable problem instance.
///
/// Lists are stored flattened and typed:
/// - `hospital_lists[h * n + k]` is the `k`-th choice of hospital `h`.
/// - `student_lists[s * n + k]` is the `k`-th choice of student `s`.
#[derive(Clone, PartialEq, Eq)]
pub struct Instance {
    n: usize,
    hospital_lists: Vec<StudentIndex>, // len = n * n
    student_lists: Vec<HospitalIndex>, // len = n * n
    hospital_ranks: RankTable,
    student_ranks: RankTable,
}

impl Instance {
    /// Validates both profiles and derives their rank tables.
    ///
    /// `n` is the number of hospital lists. The student profile must have the
    /// same number of lists, and every list on both sides must be a
    /// permutation of `1..=n`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::SizeMismatch` if the sides differ in size, and
    /// `InputError::MalformedProfile` for the first malformed list found,
    /// hospitals before students.
    pub fn new(
        hospitals: &PreferenceProfile,
        students: &PreferenceProfile,
    ) -> Result<Self, InputError> {
        let n = hospitals.num_agents();
        if students.num_agents() != n {
            return Err(InputError::SizeMismatch {
                hospitals: n,
                students: students.num_agents(),
            });
        }

        for (profile, side) in [(hospitals, Side::Hospital), (students, Side::Student)] {
            if let Some((agent, reason)) = profile.first_malformed(n) {
                return Err(InputError::MalformedProfile {
                    side,
                    agent: agent + 1,
                    reason,
                });
            }
        }

        let hospital_lists = hospitals
            .lists()
            .iter()
            .flatten()
            .map(|&id| StudentIndex::new(id - 1))
            .collect();
        let student_lists = students
            .lists()
            .iter()
            .flatten()
            .map(|&id| HospitalIndex::new(id - 1))
            .collect();

        Ok(Self {
            n,
            hospital_lists,
            student_lists,
            hospital_ranks: RankTable::from_profile(hospitals, n),
            student_ranks: RankTable::from_profile(students, n),
        })
    }

    /// Builds an instance directly from raw one-based lists.
    ///
    /// # Errors
    ///
    /// See `Instance::new`.
    #[inline]
    pub fn from_lists(
        hospital_lists: Vec<Vec<usize>>,
        student_lists: Vec<Vec<usize>>,
    ) -> Result<Self, InputError> {
        Self::new(
            &PreferenceProfile::hospitals(hospital_lists),
            &PreferenceProfile::students(student_lists),
        )
    }

    /// Returns the number of agents on each side.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns `true` for the empty instance (`n = 0`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Returns the full list of hospital `h`, most preferred first.
    ///
    /// # Panics
    ///
    /// Panics if `h` is out of bounds.
    #[inline]
    pub fn hospital_list(&self, h: HospitalIndex) -> &[StudentIndex] {
        assert!(
            h.is_within(self.n),
            "called `Instance::hospital_list` with hospital index out of bounds: the len is {} but the index is {}",
            self.n,
            h.get()
        );

        let start = h.get() * self.n;
        &self.hospital_lists[start..start + self.n]
    }

    /// Returns the full list of student `s`, most preferred first.
    ///
    /// # Panics
    ///
    /// Panics if `s` is out of bounds.
    #[inline]
    pub fn student_list(&self, s: StudentIndex) -> &[HospitalIndex] {
        assert!(
            s.is_within(self.n),
            "called `Instance::student_list` with student index out of bounds: the len is {} but the index is {}",
            self.n,
            s.get()
        );

        let start = s.get() * self.n;
        &self.student_lists[start..start + self.n]
    }

    /// Returns the `k`-th choice of hospital `h`, or `None` past the end of its list.
    #[inline]
    pub fn hospital_choice(&self, h: HospitalIndex, k: usize) -> Option<StudentIndex> {
        self.hospital_list(h).get(k).copied()
    }

    /// Returns the rank of student `s` in the list of hospital `h`.
    #[inline]
    pub fn hospital_rank(&self, h: HospitalIndex, s: StudentIndex) -> usize {
        self.hospital_ranks.rank(h.get(), s.get())
    }

    /// Returns the rank of hospital `h` in the list of student `s`.
    #[inline]
    pub fn student_rank(&self, s: StudentIndex, h: HospitalIndex) -> usize {
        self.student_ranks.rank(s.get(), h.get())
    }

    /// Returns `true` if hospital `h` strictly prefers `a` over `b`.
    #[inline]
    pub fn hospital_prefers(&self, h: HospitalIndex, a: StudentIndex, b: StudentIndex) -> bool {
        self.hospital_ranks.prefers(h.get(), a.get(), b.get())
    }

    /// Returns `true` if student `s` strictly prefers `a` over `b`.
    #[inline]
    pub fn student_prefers(&self, s: StudentIndex, a: HospitalIndex, b: HospitalIndex) -> bool {
        self.student_ranks.prefers(s.get(), a.get(), b.get())
    }

    /// Returns the hospital-side rank table.
    #[inline]
    pub fn hospital_ranks(&self) -> &RankTable {
        &self.hospital_ranks
    }

    /// Returns the student-side rank table.
    #[inline]
    pub fn student_ranks(&self) -> &RankTable {
        &self.student_ranks
    }

    /// Iterates over all hospital indices in ascending order.
    #[inline]
    pub fn hospitals(&self) -> impl DoubleEndedIterator<Item = HospitalIndex> + ExactSizeIterator {
        (0..self.n).map(HospitalIndex::new)
    }

    /// Iterates over all student indices in ascending order.
    #[inline]
    pub fn students(&self) -> impl DoubleEndedIterator<Item = StudentIndex> + ExactSizeIterator {
        (0..self.n).map(StudentIndex::new)
    }

    /// Reconstructs the one-based hospital profile.
    pub fn hospital_profile(&self) -> PreferenceProfile {
        PreferenceProfile::hospitals(
            self.hospitals()
                .map(|h| self.hospital_list(h).iter().map(|s| s.agent_id()).collect())
                .collect(),
        )
    }

    /// Reconstructs the one-based student profile.
    pub fn student_profile(&self) -> PreferenceProfile {
        PreferenceProfile::students(
            self.students()
                .map(|s| self.student_list(s).iter().map(|h| h.agent_id()).collect())
                .collect(),
        )
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("n", &self.n)
            .field("hospital_lists", &self.hospital_lists)
            .field("student_lists", &self.student_lists)
            .finish()
    }
}

impl std::fmt::Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.n)?;
        write!(f, "{}", self.hospital_profile())?;
        write!(f, "{}", self.student_profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(i: usize) -> HospitalIndex {
        HospitalIndex::new(i)
    }

    fn s(i: usize) -> StudentIndex {
        StudentIndex::new(i)
    }

    #[test]
    fn test_valid_instance_accessors() {
        let inst =
            Instance::from_lists(vec![vec![2, 1], vec![1, 2]], vec![vec![1, 2], vec![2, 1]])
                .expect("valid instance");

        assert_eq!(inst.n(), 2);
        assert_eq!(inst.hospital_list(h(0)), &[s(1), s(0)]);
        assert_eq!(inst.student_list(s(1)), &[h(1), h(0)]);
        assert_eq!(inst.hospital_choice(h(0), 0), Some(s(1)));
        assert_eq!(inst.hospital_choice(h(0), 2), None);

        assert_eq!(inst.hospital_rank(h(0), s(1)), 0);
        assert_eq!(inst.student_rank(s(0), h(1)), 1);
        assert!(inst.hospital_prefers(h(0), s(1), s(0)));
        assert!(inst.student_prefers(s(1), h(1), h(0)));
    }

    #[test]
    fn test_size_mismatch() {
        let err = Instance::from_lists(vec![vec![1]], vec![vec![1], vec![1]]).unwrap_err();
        assert_eq!(
            err,
            InputError::SizeMismatch {
                hospitals: 1,
                students: 2
            }
        );
    }

    #[test]
    fn test_duplicate_entry_is_malformed_profile() {
        let err = Instance::from_lists(vec![vec![1, 1], vec![1, 2]], vec![vec![1, 2], vec![1, 2]])
            .unwrap_err();
        assert_eq!(
            err,
            InputError::MalformedProfile {
                side: Side::Hospital,
                agent: 1,
                reason: ProfileError::Duplicate { value: 1 },
            }
        );
    }

    #[test]
    fn test_student_errors_are_reported_with_their_side() {
        let err = Instance::from_lists(vec![vec![1, 2], vec![1, 2]], vec![vec![1, 2], vec![3, 1]])
            .unwrap_err();
        assert!(matches!(
            err,
            InputError::MalformedProfile {
                side: Side::Student,
                agent: 2,
                reason: ProfileError::OutOfRange { value: 3, n: 2 },
            }
        ));
    }

    #[test]
    fn test_empty_instance_is_valid() {
        let inst = Instance::from_lists(Vec::new(), Vec::new()).expect("empty instance");
        assert!(inst.is_empty());
        assert_eq!(inst.hospitals().count(), 0);
    }

    #[test]
    fn test_profiles_round_trip_through_display() {
        let inst =
            Instance::from_lists(vec![vec![2, 1], vec![1, 2]], vec![vec![1, 2], vec![2, 1]])
                .unwrap();
        assert_eq!(inst.to_string(), "2\n2 1\n1 2\n1 2\n2 1\n");
    }

    #[test]
    fn test_error_messages() {
        let err = InputError::MalformedProfile {
            side: Side::Student,
            agent: 4,
            reason: ProfileError::Duplicate { value: 2 },
        };
        assert_eq!(
            err.to_string(),
            "student 4 has a malformed preference list: entry 2 appears more than once"
        );
    }
}
