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

use std::time::Duration;

/// Statistics collected during a run of the Gale–Shapley solver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStatistics {
    /// Total proposals made by hospitals.
    pub proposals: u64,
    /// Proposals a student turned down because it held a better offer.
    pub rejections: u64,
    /// Proposals a student accepted, whether or not it held an offer before.
    pub engagements: u64,
    /// Accepted proposals that freed the hospital previously held.
    pub displacements: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl MatchStatistics {
    #[inline]
    pub fn on_proposal(&mut self) {
        self.proposals = self.proposals.saturating_add(1);
    }

    #[inline]
    pub fn on_rejection(&mut self) {
        self.rejections = self.rejections.saturating_add(1);
    }

    #[inline]
    pub fn on_engagement(&mut self) {
        self.engagements = self.engagements.saturating_add(1);
    }

    #[inline]
    pub fn on_displacement(&mut self) {
        self.displacements = self.displacements.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for MatchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dovetail Matcher Statistics:")?;
        writeln!(f, "  Proposals:            {}", self.proposals)?;
        writeln!(f, "  Rejections:           {}", self.rejections)?;
        writeln!(f, "  Engagements:          {}", self.engagements)?;
        writeln!(f, "  Displacements:        {}", self.displacements)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let mut stats = MatchStatistics::default();
        stats.on_proposal();
        stats.on_proposal();
        stats.on_rejection();
        stats.on_engagement();
        stats.on_displacement();

        assert_eq!(stats.proposals, 2);
        assert_eq!(stats.rejections, 1);
        assert_eq!(stats.engagements, 1);
        assert_eq!(stats.displacements, 1);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = MatchStatistics {
            proposals: u64::MAX,
            ..Default::default()
        };
        stats.on_proposal();
        assert_eq!(stats.proposals, u64::MAX);
    }

    #[test]
    fn test_display_contains_fields() {
        let stats = MatchStatistics {
            proposals: 7,
            rejections: 3,
            engagements: 4,
            displacements: 1,
            time_total: Duration::ZERO,
        };
        let rendered = stats.to_string();
        assert!(rendered.contains("Dovetail Matcher Statistics:"));
        assert!(rendered.contains("Proposals:            7"));
        assert!(rendered.contains("Rejections:           3"));
        assert!(rendered.contains("Displacements:        1"));
    }
}
