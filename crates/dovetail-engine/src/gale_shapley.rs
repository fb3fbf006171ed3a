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

//! Hospital-proposing deferred acceptance.
//!
//! Each free hospital proposes to the best student it has not proposed to
//! yet. A student holds on to the best offer seen so far and releases the
//! previous one when a better hospital arrives. Proposals are never repeated,
//! so the loop ends after at most `n * n` proposals with every hospital
//! engaged, and the engagements form the hospital-optimal stable matching.
//!
//! `GaleShapleySolver` owns the per-run buffers so repeated solves reuse their
//! allocations. A search session borrows them for the duration of one run and
//! resets them on entry.
//!
//! The order in which free hospitals are served does not affect the result;
//! `ProcessingOrder` picks between serving the most recently freed hospital
//! first (the default) and strict arrival order.

use crate::{
    monitor::{
        no_op::NoOperationMonitor,
        proposal_monitor::{ProposalMonitor, ProposalResponse},
    },
    result::MatchOutcome,
    stats::MatchStatistics,
};
use dovetail_model::{
    index::{HospitalIndex, StudentIndex},
    instance::{InputError, Instance},
    matching::Matching,
    preference::PreferenceProfile,
};
use fixedbitset::FixedBitSet;
use std::collections::VecDeque;

/// Which free hospital proposes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingOrder {
    /// The most recently freed hospital proposes next. Initially hospitals
    /// are served in ascending order.
    #[default]
    Stack,
    /// Free hospitals are served in the order they became free.
    Queue,
}

/// Hospital-optimal stable matching by repeated proposals.
#[derive(Debug, Clone, Default)]
pub struct GaleShapleySolver {
    order: ProcessingOrder,
    /// Per hospital: position in its list of the next student to propose to.
    next_choice: Vec<usize>,
    /// Per hospital: the student currently holding its offer.
    partner: Vec<Option<StudentIndex>>,
    /// Per student: the hospital whose offer it holds.
    held_by: Vec<Option<HospitalIndex>>,
    /// Hospitals holding an engagement.
    engaged: FixedBitSet,
    free: VecDeque<HospitalIndex>,
}

impl GaleShapleySolver {
    /// Creates a new solver with empty buffers.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new solver with buffers sized for instances of `n` agents per side.
    ///
    /// Solving a larger instance still works; the buffers grow on entry.
    #[inline]
    pub fn preallocated(n: usize) -> Self {
        Self {
            order: ProcessingOrder::default(),
            next_choice: Vec::with_capacity(n),
            partner: Vec::with_capacity(n),
            held_by: Vec::with_capacity(n),
            engaged: FixedBitSet::with_capacity(n),
            free: VecDeque::with_capacity(n),
        }
    }

    /// Sets the order in which free hospitals are served.
    #[inline]
    pub fn with_order(mut self, order: ProcessingOrder) -> Self {
        self.order = order;
        self
    }

    /// Returns the configured processing order.
    #[inline]
    pub fn order(&self) -> ProcessingOrder {
        self.order
    }

    /// Solves `instance` without monitoring.
    #[inline]
    pub fn solve(&mut self, instance: &Instance) -> MatchOutcome {
        self.solve_with_monitor(instance, NoOperationMonitor::new())
    }

    /// Solves `instance`, reporting every proposal to `monitor`.
    pub fn solve_with_monitor<M>(&mut self, instance: &Instance, mut monitor: M) -> MatchOutcome
    where
        M: ProposalMonitor,
    {
        ProposalSession::new(self, instance, &mut monitor).run()
    }

    fn reset(&mut self, n: usize) {
        self.next_choice.clear();
        self.next_choice.resize(n, 0);
        self.partner.clear();
        self.partner.resize(n, None);
        self.held_by.clear();
        self.held_by.resize(n, None);
        self.engaged.clear();
        self.engaged.grow(n);
        self.free.clear();
        self.free.extend((0..n).map(HospitalIndex::new));
    }

    #[inline]
    fn pop_free(&mut self) -> Option<HospitalIndex> {
        self.free.pop_front()
    }

    #[inline]
    fn push_free(&mut self, hospital: HospitalIndex) {
        match self.order {
            ProcessingOrder::Stack => self.free.push_front(hospital),
            ProcessingOrder::Queue => self.free.push_back(hospital),
        }
    }

    #[inline]
    fn engage(&mut self, hospital: HospitalIndex, student: StudentIndex) {
        self.partner[hospital.get()] = Some(student);
        self.held_by[student.get()] = Some(hospital);
        self.engaged.insert(hospital.get());
    }

    #[inline]
    fn release(&mut self, hospital: HospitalIndex) {
        self.partner[hospital.get()] = None;
        self.engaged.set(hospital.get(), false);
        self.push_free(hospital);
    }

    /// Collects the current engagements, ordered by hospital.
    fn current_matching(&self) -> Matching {
        self.partner
            .iter()
            .enumerate()
            .filter_map(|(h, s)| s.map(|s| (HospitalIndex::new(h), s)))
            .collect()
    }
}

/// Computes the hospital-optimal stable matching for two raw profiles.
///
/// # Errors
///
/// Returns an `InputError` if the profiles do not form a valid instance;
/// no matching is produced in that case.
pub fn solve(
    hospitals: &PreferenceProfile,
    students: &PreferenceProfile,
) -> Result<Matching, InputError> {
    let instance = Instance::new(hospitals, students)?;
    let outcome = GaleShapleySolver::preallocated(instance.n()).solve(&instance);

    debug_assert!(
        outcome.is_stable(),
        "called `solve` on a validated instance but the search ended with {}",
        outcome.termination()
    );

    Ok(outcome.matching().clone())
}

/// A single run of the proposal loop.
struct ProposalSession<'a, M> {
    solver: &'a mut GaleShapleySolver,
    instance: &'a Instance,
    monitor: &'a mut M,
    stats: MatchStatistics,
    start_time: std::time::Instant,
}

impl<'a, M> ProposalSession<'a, M>
where
    M: ProposalMonitor,
{
    #[inline]
    fn new(solver: &'a mut GaleShapleySolver, instance: &'a Instance, monitor: &'a mut M) -> Self {
        solver.reset(instance.n());
        Self {
            solver,
            instance,
            monitor,
            stats: MatchStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> MatchOutcome {
        self.monitor.on_enter_search(self.instance);

        while let Some(hospital) = self.solver.pop_free() {
            let cursor = self.solver.next_choice[hospital.get()];
            let Some(student) = self.instance.hospital_choice(hospital, cursor) else {
                return self.finish_exhausted(hospital);
            };
            self.solver.next_choice[hospital.get()] = cursor + 1;

            let response = self.propose(hospital, student);
            self.monitor.on_proposal(hospital, student, response, &self.stats);
        }

        self.finish_stable()
    }

    /// `student` answers the proposal of `hospital`.
    #[inline]
    fn propose(&mut self, hospital: HospitalIndex, student: StudentIndex) -> ProposalResponse {
        self.stats.on_proposal();

        match self.solver.held_by[student.get()] {
            None => {
                self.solver.engage(hospital, student);
                self.stats.on_engagement();
                ProposalResponse::Accepted
            }
            Some(current) if self.instance.student_prefers(student, hospital, current) => {
                self.solver.release(current);
                self.solver.engage(hospital, student);
                self.stats.on_engagement();
                self.stats.on_displacement();
                ProposalResponse::AcceptedDisplacing(current)
            }
            Some(_) => {
                self.solver.push_free(hospital);
                self.stats.on_rejection();
                ProposalResponse::Rejected
            }
        }
    }

    fn finish_stable(mut self) -> MatchOutcome {
        debug_assert_eq!(
            self.solver.engaged.count_ones(..),
            self.instance.n(),
            "proposal loop ended with a free hospital"
        );

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        MatchOutcome::stable(self.solver.current_matching(), self.stats)
    }

    fn finish_exhausted(mut self, hospital: HospitalIndex) -> MatchOutcome {
        tracing::warn!(%hospital, "hospital exhausted its preference list");

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        MatchOutcome::exhausted(hospital, self.solver.current_matching(), self.stats)
    }
}
