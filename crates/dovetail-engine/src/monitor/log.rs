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

use crate::{
    monitor::proposal_monitor::{ProposalMonitor, ProposalResponse},
    stats::MatchStatistics,
};
use dovetail_model::{
    index::{HospitalIndex, StudentIndex},
    instance::Instance,
};
use std::time::{Duration, Instant};

/// A monitor that reports the run through `tracing`.
///
/// Entry and exit are logged at `debug`, every proposal at `trace`, and a
/// progress line at `info` at most once per `log_interval`. The clock is only
/// read when `proposals & clock_check_mask == 0`.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    n: usize,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            n: 0,
        }
    }

    #[inline(always)]
    fn log_progress(&mut self, stats: &MatchStatistics) {
        let now = Instant::now();
        tracing::info!(
            elapsed = ?now.duration_since(self.start_time),
            proposals = stats.proposals,
            rejections = stats.rejections,
            bound = (self.n as u64).saturating_mul(self.n as u64),
            "matching in progress"
        );
        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl ProposalMonitor for LogMonitor {
    fn on_enter_search(&mut self, instance: &Instance) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.n = instance.n();
        tracing::debug!(n = instance.n(), "starting hospital-proposing deferred acceptance");
    }

    fn on_proposal(
        &mut self,
        hospital: HospitalIndex,
        student: StudentIndex,
        response: ProposalResponse,
        stats: &MatchStatistics,
    ) {
        tracing::trace!(%hospital, %student, %response, "proposal");

        if (stats.proposals & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_progress(stats);
        }
    }

    fn on_exit_search(&mut self, stats: &MatchStatistics) {
        tracing::debug!(
            proposals = stats.proposals,
            rejections = stats.rejections,
            displacements = stats.displacements,
            elapsed = ?stats.time_total,
            "matching finished"
        );
    }

    fn name(&self) -> &str {
        "LogMonitor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let m = LogMonitor::new(Duration::from_secs(2), 255);
        assert_eq!(
            m.to_string(),
            "LogMonitor(log_interval: 2s, clock_check_mask: 255)"
        );
    }

    #[test]
    fn test_records_instance_size() {
        let inst = Instance::from_lists(vec![vec![1]], vec![vec![1]]).unwrap();
        let mut m = LogMonitor::default();
        m.on_enter_search(&inst);
        assert_eq!(m.n, 1);
        assert_eq!(m.name(), "LogMonitor");
    }
}
