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
use dovetail_model::{
    index::{HospitalIndex, StudentIndex},
    instance::Instance,
};

/// How a student answered a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalResponse {
    /// The student held no offer and accepted.
    Accepted,
    /// The student accepted and released the hospital it held before.
    AcceptedDisplacing(HospitalIndex),
    /// The student kept the offer it already held.
    Rejected,
}

impl ProposalResponse {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, ProposalResponse::Rejected)
    }
}

impl std::fmt::Display for ProposalResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProposalResponse::Accepted => write!(f, "Accepted"),
            ProposalResponse::AcceptedDisplacing(h) => write!(f, "Accepted (displacing {})", h),
            ProposalResponse::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Trait for observing the proposal loop of the solver.
pub trait ProposalMonitor {
    /// Called once before the first proposal.
    fn on_enter_search(&mut self, instance: &Instance);

    /// Called after `student` has answered a proposal from `hospital`.
    fn on_proposal(
        &mut self,
        hospital: HospitalIndex,
        student: StudentIndex,
        response: ProposalResponse,
        stats: &MatchStatistics,
    );

    /// Called when the loop has stopped.
    fn on_exit_search(&mut self, stats: &MatchStatistics);

    /// Returns the name of the monitor.
    fn name(&self) -> &str;
}

impl<M> ProposalMonitor for &mut M
where
    M: ProposalMonitor + ?Sized,
{
    #[inline]
    fn on_enter_search(&mut self, instance: &Instance) {
        (**self).on_enter_search(instance);
    }

    #[inline]
    fn on_proposal(
        &mut self,
        hospital: HospitalIndex,
        student: StudentIndex,
        response: ProposalResponse,
        stats: &MatchStatistics,
    ) {
        (**self).on_proposal(hospital, student, response, stats);
    }

    #[inline]
    fn on_exit_search(&mut self, stats: &MatchStatistics) {
        (**self).on_exit_search(stats);
    }

    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl std::fmt::Debug for dyn ProposalMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProposalMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn ProposalMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProposalMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_accepted() {
        assert!(ProposalResponse::Accepted.is_accepted());
        assert!(ProposalResponse::AcceptedDisplacing(HospitalIndex::new(0)).is_accepted());
        assert!(!ProposalResponse::Rejected.is_accepted());
    }

    #[test]
    fn test_response_display() {
        assert_eq!(
            ProposalResponse::AcceptedDisplacing(HospitalIndex::new(2)).to_string(),
            "Accepted (displacing Hospital(3))"
        );
        assert_eq!(ProposalResponse::Rejected.to_string(), "Rejected");
    }
}
