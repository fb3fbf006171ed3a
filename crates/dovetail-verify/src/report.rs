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

//! Verifier findings.
//!
//! A `Violation` is a single structured finding about a candidate matching or
//! the preference data it is checked against. Findings are data, not errors:
//! the verifier always returns a `ViolationReport`, and an empty report means
//! the matching is valid and stable.
//!
//! `Display` on the report renders a one-line verdict:
//! - `VALID STABLE` for an empty report,
//! - `INVALID: ...` when there are structural findings,
//! - `UNSTABLE: ...` when the only findings are blocking pairs.

use dovetail_model::{
    index::{HospitalIndex, Side, StudentIndex},
    instance::InputError,
    preference::ProfileError,
};

/// A single finding of the verifier.
///
/// Agent identifiers are one-based, as in the input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A profile does not have one list per agent.
    SizeMismatch {
        /// The side whose profile has the wrong size.
        side: Side,
        /// The instance size `n` (number of hospital lists).
        expected: usize,
        /// The number of lists found.
        found: usize,
    },
    /// The preference list of an agent is not a permutation of `1..=n`.
    MalformedProfile {
        /// The side of the offending agent.
        side: Side,
        /// One-based identifier of the offending agent.
        agent: usize,
        /// What is wrong with the list.
        reason: ProfileError,
    },
    /// The matching names an agent outside `1..=n`.
    UnknownAgent {
        /// The side the identifier was read for.
        side: Side,
        /// The out-of-range one-based identifier.
        id: usize,
    },
    /// An agent does not appear in the matching.
    UnmatchedAgent {
        /// The side of the missing agent.
        side: Side,
        /// One-based identifier of the missing agent.
        id: usize,
    },
    /// An agent appears in more than one pair.
    DuplicateAssignment {
        /// The side of the repeated agent.
        side: Side,
        /// One-based identifier of the repeated agent.
        id: usize,
    },
    /// A hospital and a student that prefer each other over their partners.
    BlockingPair {
        /// The hospital of the pair.
        hospital: HospitalIndex,
        /// The student of the pair.
        student: StudentIndex,
    },
}

impl Violation {
    /// Returns `true` for findings that make the matching invalid, as
    /// opposed to merely unstable.
    #[inline]
    pub fn is_structural(&self) -> bool {
        !matches!(self, Violation::BlockingPair { .. })
    }
}

impl From<InputError> for Violation {
    fn from(e: InputError) -> Self {
        match e {
            InputError::SizeMismatch {
                hospitals,
                students,
            } => Violation::SizeMismatch {
                side: Side::Student,
                expected: hospitals,
                found: students,
            },
            InputError::MalformedProfile {
                side,
                agent,
                reason,
            } => Violation::MalformedProfile {
                side,
                agent,
                reason,
            },
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::SizeMismatch {
                side,
                expected,
                found,
            } => write!(f, "expected {} {} lists, found {}", expected, side, found),
            Violation::MalformedProfile {
                side,
                agent,
                reason,
            } => write!(f, "{} {} has a malformed preference list: {}", side, agent, reason),
            Violation::UnknownAgent { side, id } => {
                write!(f, "{} {} is not part of the instance", side, id)
            }
            Violation::UnmatchedAgent { side, id } => write!(f, "{} {} is unmatched", side, id),
            Violation::DuplicateAssignment { side, id } => {
                write!(f, "{} {} is matched more than once", side, id)
            }
            Violation::BlockingPair { hospital, student } => write!(
                f,
                "Blocking pair found - Hospital {} and Student {}",
                hospital.agent_id(),
                student.agent_id()
            ),
        }
    }
}

/// The findings of one verifier run, in the order they were made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationReport {
    violations: Vec<Violation>,
}

impl ViolationReport {
    /// Creates an empty report.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finding.
    #[inline]
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns the number of findings.
    #[inline]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns `true` if the matching is valid and stable.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns `true` if there are no structural findings.
    ///
    /// A valid report may still contain blocking pairs.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.violations.iter().any(Violation::is_structural)
    }

    /// Returns `true` if the matching is valid and has no blocking pair.
    #[inline]
    pub fn is_stable(&self) -> bool {
        self.is_empty()
    }

    /// Returns all findings in the order they were made.
    #[inline]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns an iterator over the findings.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Returns `true` if the report contains `violation`.
    #[inline]
    pub fn contains(&self, violation: &Violation) -> bool {
        self.violations.contains(violation)
    }

    /// Returns the blocking pairs in the order they were reported.
    pub fn blocking_pairs(&self) -> impl Iterator<Item = (HospitalIndex, StudentIndex)> + '_ {
        self.violations.iter().filter_map(|v| match *v {
            Violation::BlockingPair { hospital, student } => Some((hospital, student)),
            _ => None,
        })
    }
}

impl std::fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "VALID STABLE");
        }

        if !self.is_valid() {
            write!(f, "INVALID: ")?;
            for (i, v) in self.iter().filter(|v| v.is_structural()).enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{}", v)?;
            }
            return Ok(());
        }

        write!(f, "UNSTABLE: ")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ViolationReport {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl IntoIterator for ViolationReport {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl Extend<Violation> for ViolationReport {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.violations.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocking(h: usize, s: usize) -> Violation {
        Violation::BlockingPair {
            hospital: HospitalIndex::new(h),
            student: StudentIndex::new(s),
        }
    }

    #[test]
    fn test_empty_report_is_valid_and_stable() {
        let report = ViolationReport::new();
        assert!(report.is_empty());
        assert!(report.is_valid());
        assert!(report.is_stable());
        assert_eq!(report.to_string(), "VALID STABLE");
    }

    #[test]
    fn test_blocking_pair_verdict() {
        let mut report = ViolationReport::new();
        report.push(blocking(0, 0));

        assert!(report.is_valid());
        assert!(!report.is_stable());
        assert_eq!(
            report.to_string(),
            "UNSTABLE: Blocking pair found - Hospital 1 and Student 1"
        );
        assert_eq!(
            report.blocking_pairs().collect::<Vec<_>>(),
            vec![(HospitalIndex::new(0), StudentIndex::new(0))]
        );
    }

    #[test]
    fn test_structural_findings_take_precedence() {
        let mut report = ViolationReport::new();
        report.push(Violation::DuplicateAssignment {
            side: Side::Student,
            id: 2,
        });
        report.push(Violation::UnmatchedAgent {
            side: Side::Student,
            id: 1,
        });

        assert!(!report.is_valid());
        assert_eq!(report.len(), 2);
        assert_eq!(
            report.to_string(),
            "INVALID: student 2 is matched more than once; student 1 is unmatched"
        );
    }

    #[test]
    fn test_violation_display() {
        assert_eq!(
            Violation::SizeMismatch {
                side: Side::Student,
                expected: 2,
                found: 3
            }
            .to_string(),
            "expected 2 student lists, found 3"
        );
        assert_eq!(
            Violation::MalformedProfile {
                side: Side::Hospital,
                agent: 1,
                reason: ProfileError::Duplicate { value: 1 },
            }
            .to_string(),
            "hospital 1 has a malformed preference list: entry 1 appears more than once"
        );
        assert_eq!(
            Violation::UnknownAgent {
                side: Side::Hospital,
                id: 7
            }
            .to_string(),
            "hospital 7 is not part of the instance"
        );
    }

    #[test]
    fn test_from_input_error() {
        let v = Violation::from(InputError::SizeMismatch {
            hospitals: 2,
            students: 1,
        });
        assert_eq!(
            v,
            Violation::SizeMismatch {
                side: Side::Student,
                expected: 2,
                found: 1
            }
        );
        assert!(v.is_structural());
        assert!(!blocking(0, 1).is_structural());
    }
}
