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

use crate::stats::MatchStatistics;
use dovetail_model::{index::HospitalIndex, matching::Matching};

/// Why the proposal loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTermination {
    /// Every hospital holds a student; the matching is stable.
    Stable,
    /// The hospital ran out of students to propose to while still free.
    ///
    /// Impossible for a validated `Instance`, where every list is complete.
    Exhausted(HospitalIndex),
}

impl std::fmt::Display for MatchTermination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchTermination::Stable => write!(f, "Stable"),
            MatchTermination::Exhausted(h) => write!(f, "Exhausted: {} has no one left", h),
        }
    }
}

/// Result of the solver after termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    matching: Matching,
    termination: MatchTermination,
    statistics: MatchStatistics,
}

impl MatchOutcome {
    #[inline]
    pub fn stable(matching: Matching, statistics: MatchStatistics) -> Self {
        Self {
            matching,
            termination: MatchTermination::Stable,
            statistics,
        }
    }

    /// `partial` holds the engagements in place when the search stopped.
    #[inline]
    pub fn exhausted(
        hospital: HospitalIndex,
        partial: Matching,
        statistics: MatchStatistics,
    ) -> Self {
        Self {
            matching: partial,
            termination: MatchTermination::Exhausted(hospital),
            statistics,
        }
    }

    /// Returns the matching; partial unless `is_stable`.
    #[inline]
    pub fn matching(&self) -> &Matching {
        &self.matching
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination(&self) -> MatchTermination {
        self.termination
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &MatchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn is_stable(&self) -> bool {
        matches!(self.termination, MatchTermination::Stable)
    }

    /// Consumes the outcome, returning the matching only if it is complete.
    #[inline]
    pub fn into_matching(self) -> Option<Matching> {
        match self.termination {
            MatchTermination::Stable => Some(self.matching),
            MatchTermination::Exhausted(_) => None,
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MatchOutcome(termination: {}, pairs: {}, proposals: {})",
            self.termination,
            self.matching.len(),
            self.statistics.proposals
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dovetail_model::index::StudentIndex;

    #[test]
    fn test_stable_outcome_yields_matching() {
        let m = Matching::from_students(vec![StudentIndex::new(0)]);
        let outcome = MatchOutcome::stable(m.clone(), MatchStatistics::default());
        assert!(outcome.is_stable());
        assert_eq!(outcome.termination(), MatchTermination::Stable);
        assert_eq!(outcome.into_matching(), Some(m));
    }

    #[test]
    fn test_exhausted_outcome_has_no_matching() {
        let outcome = MatchOutcome::exhausted(
            HospitalIndex::new(1),
            Matching::new(),
            MatchStatistics::default(),
        );
        assert!(!outcome.is_stable());
        assert_eq!(
            outcome.termination(),
            MatchTermination::Exhausted(HospitalIndex::new(1))
        );
        assert!(outcome.into_matching().is_none());
    }

    #[test]
    fn test_display() {
        let outcome = MatchOutcome::stable(Matching::new(), MatchStatistics::default());
        assert_eq!(
            outcome.to_string(),
            "MatchOutcome(termination: Stable, pairs: 0, proposals: 0)"
        );
        assert_eq!(
            MatchTermination::Exhausted(HospitalIndex::new(0)).to_string(),
            "Exhausted: Hospital(1) has no one left"
        );
    }
}
