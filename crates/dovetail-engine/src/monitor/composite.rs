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

//! Fan-out monitor.
//!
//! `CompositeMonitor` forwards every event to its children in insertion
//! order, so logging and custom observers can be combined without touching
//! the solver.

use crate::{
    monitor::proposal_monitor::{ProposalMonitor, ProposalResponse},
    stats::MatchStatistics,
};
use dovetail_model::{
    index::{HospitalIndex, StudentIndex},
    instance::Instance,
};

/// A monitor that aggregates multiple monitors and forwards events to all of them.
#[derive(Default)]
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn ProposalMonitor + 'a>>,
}

impl<'a> CompositeMonitor<'a> {
    /// Creates a new empty `CompositeMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Adds a new monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: ProposalMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn ProposalMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of child monitors.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if there are no child monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a> FromIterator<Box<dyn ProposalMonitor + 'a>> for CompositeMonitor<'a> {
    #[inline(always)]
    fn from_iter<I: IntoIterator<Item = Box<dyn ProposalMonitor + 'a>>>(iter: I) -> Self {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.monitors.iter().map(|m| m.name()))
            .finish()
    }
}

impl ProposalMonitor for CompositeMonitor<'_> {
    fn on_enter_search(&mut self, instance: &Instance) {
        for m in self.monitors.iter_mut() {
            m.on_enter_search(instance);
        }
    }

    fn on_proposal(
        &mut self,
        hospital: HospitalIndex,
        student: StudentIndex,
        response: ProposalResponse,
        stats: &MatchStatistics,
    ) {
        for m in self.monitors.iter_mut() {
            m.on_proposal(hospital, student, response, stats);
        }
    }

    fn on_exit_search(&mut self, stats: &MatchStatistics) {
        for m in self.monitors.iter_mut() {
            m.on_exit_search(stats);
        }
    }

    fn name(&self) -> &str {
        "CompositeMonitor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    struct Recording {
        name: &'static str,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl ProposalMonitor for Recording {
        fn on_enter_search(&mut self, _instance: &Instance) {
            self.events.borrow_mut().push(format!("{}:enter", self.name));
        }

        fn on_proposal(
            &mut self,
            hospital: HospitalIndex,
            student: StudentIndex,
            response: ProposalResponse,
            _stats: &MatchStatistics,
        ) {
            self.events.borrow_mut().push(format!(
                "{}:{}->{}:{}",
                self.name, hospital, student, response
            ));
        }

        fn on_exit_search(&mut self, _stats: &MatchStatistics) {
            self.events.borrow_mut().push(format!("{}:exit", self.name));
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    #[test]
    fn test_fans_out_in_insertion_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(Recording {
            name: "a",
            events: Rc::clone(&events),
        });
        composite.add_monitor_boxed(Box::new(Recording {
            name: "b",
            events: Rc::clone(&events),
        }));
        assert_eq!(composite.len(), 2);

        let inst = Instance::from_lists(vec![vec![1]], vec![vec![1]]).unwrap();
        let stats = MatchStatistics::default();
        composite.on_enter_search(&inst);
        composite.on_proposal(
            HospitalIndex::new(0),
            StudentIndex::new(0),
            ProposalResponse::Accepted,
            &stats,
        );
        composite.on_exit_search(&stats);

        assert_eq!(
            *events.borrow(),
            vec![
                "a:enter",
                "b:enter",
                "a:Hospital(1)->Student(1):Accepted",
                "b:Hospital(1)->Student(1):Accepted",
                "a:exit",
                "b:exit",
            ]
        );
    }

    #[test]
    fn test_empty_and_debug() {
        let composite = CompositeMonitor::new();
        assert!(composite.is_empty());
        assert_eq!(format!("{:?}", composite), "[]");
    }
}
