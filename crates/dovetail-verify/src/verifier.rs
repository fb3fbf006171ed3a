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

//! Validity and stability checks.
//!
//! The verifier runs three passes over the raw data:
//! 1. Profile validity: one permutation of `1..=n` per agent on both sides,
//!    where `n` is the number of hospital lists.
//! 2. Completeness: every hospital and every student appears in exactly one
//!    pair, and no pair names an agent outside `1..=n`.
//! 3. Stability: no hospital and student prefer each other over their
//!    partners.
//!
//! Blocking pairs are only meaningful for a bijection over validated lists, so
//! the third pass runs only when the first two found nothing. Every blocking
//! pair is reported, ordered by hospital and then student.

use crate::report::{Violation, ViolationReport};
use dovetail_model::{
    index::{HospitalIndex, Side, StudentIndex},
    instance::Instance,
    matching::Matching,
    preference::PreferenceProfile,
};
use fixedbitset::FixedBitSet;

/// Checks `matching` against two raw, possibly malformed profiles.
pub fn check(
    hospitals: &PreferenceProfile,
    students: &PreferenceProfile,
    matching: &Matching,
) -> ViolationReport {
    let n = hospitals.num_agents();
    let mut report = ViolationReport::new();

    check_profiles(hospitals, students, n, &mut report);
    check_completeness(matching, n, &mut report);

    if !report.is_empty() {
        tracing::debug!(findings = report.len(), "structural findings; stability not checked");
        return report;
    }

    match Instance::new(hospitals, students) {
        Ok(instance) => check_stability(&instance, matching, &mut report),
        Err(e) => report.push(Violation::from(e)),
    }

    report
}

/// Checks `matching` against an already validated instance.
///
/// Profile validity holds by construction, so only completeness and
/// stability are checked.
pub fn check_instance(instance: &Instance, matching: &Matching) -> ViolationReport {
    let mut report = ViolationReport::new();

    check_completeness(matching, instance.n(), &mut report);
    if report.is_empty() {
        check_stability(instance, matching, &mut report);
    } else {
        tracing::debug!(findings = report.len(), "structural findings; stability not checked");
    }

    report
}

fn check_profiles(
    hospitals: &PreferenceProfile,
    students: &PreferenceProfile,
    n: usize,
    report: &mut ViolationReport,
) {
    if students.num_agents() != n {
        report.push(Violation::SizeMismatch {
            side: Side::Student,
            expected: n,
            found: students.num_agents(),
        });
    }

    for profile in [hospitals, students] {
        for (agent, reason) in profile.malformed_agents(n) {
            tracing::trace!(side = %profile.side(), agent = agent + 1, %reason, "malformed list");
            report.push(Violation::MalformedProfile {
                side: profile.side(),
                agent: agent + 1,
                reason,
            });
        }
    }
}

fn check_completeness(matching: &Matching, n: usize, report: &mut ViolationReport) {
    let mut hospitals = SeenTwice::new(n);
    let mut students = SeenTwice::new(n);

    for &(h, s) in matching {
        if h.is_within(n) {
            hospitals.insert(h.get());
        } else {
            report.push(Violation::UnknownAgent {
                side: Side::Hospital,
                id: h.agent_id(),
            });
        }

        if s.is_within(n) {
            students.insert(s.get());
        } else {
            report.push(Violation::UnknownAgent {
                side: Side::Student,
                id: s.agent_id(),
            });
        }
    }

    hospitals.report(Side::Hospital, report);
    students.report(Side::Student, report);
}

fn check_stability(instance: &Instance, matching: &Matching, report: &mut ViolationReport) {
    let n = instance.n();
    let Some(partner) = matching.to_student_vec(n) else {
        // Callers only get here for a bijection.
        return;
    };
    let partner_of = invert(&partner);

    let mut pairs: Vec<_> = blocking_pairs(instance, &partner, &partner_of).collect();
    pairs.sort_unstable();

    for (hospital, student) in pairs {
        tracing::debug!(%hospital, %student, "blocking pair");
        report.push(Violation::BlockingPair { hospital, student });
    }
}

/// Returns the hospital of every student, given the student of every hospital.
pub(crate) fn invert(partner: &[StudentIndex]) -> Vec<HospitalIndex> {
    let mut partner_of = vec![HospitalIndex::new(0); partner.len()];
    for (h, s) in partner.iter().enumerate() {
        partner_of[s.get()] = HospitalIndex::new(h);
    }
    partner_of
}

/// Yields every blocking pair of a perfect matching, grouped by hospital.
///
/// `partner[h]` is the student of hospital `h` and `partner_of[s]` the
/// hospital of student `s`. For each hospital only the students it ranks
/// above its partner are inspected.
pub(crate) fn blocking_pairs<'a>(
    instance: &'a Instance,
    partner: &'a [StudentIndex],
    partner_of: &'a [HospitalIndex],
) -> impl Iterator<Item = (HospitalIndex, StudentIndex)> + 'a {
    instance.hospitals().flat_map(move |h| {
        let held = partner[h.get()];
        let better = &instance.hospital_list(h)[..instance.hospital_rank(h, held)];
        better
            .iter()
            .copied()
            .filter(move |&s| instance.student_prefers(s, h, partner_of[s.get()]))
            .map(move |s| (h, s))
    })
}

/// Occurrence tracking for the ids of one side: seen at least once, and
/// seen more than once.
struct SeenTwice {
    once: FixedBitSet,
    twice: FixedBitSet,
}

impl SeenTwice {
    fn new(n: usize) -> Self {
        Self {
            once: FixedBitSet::with_capacity(n),
            twice: FixedBitSet::with_capacity(n),
        }
    }

    #[inline]
    fn insert(&mut self, index: usize) {
        if self.once.put(index) {
            self.twice.insert(index);
        }
    }

    fn report(&self, side: Side, report: &mut ViolationReport) {
        for index in 0..self.once.len() {
            let id = index + 1;
            if !self.once.contains(index) {
                report.push(Violation::UnmatchedAgent { side, id });
            } else if self.twice.contains(index) {
                report.push(Violation::DuplicateAssignment { side, id });
            }
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use dovetail_model::generate::InstanceGenerator;
    use quickcheck::{Arbitrary, Gen, quickcheck};

    /// A random instance with a random perfect matching.
    #[derive(Clone, Debug)]
    struct ArbitraryCase {
        seed: u64,
        n: usize,
        assignment: Vec<usize>,
    }

    impl Arbitrary for ArbitraryCase {
        fn arbitrary(g: &mut Gen) -> Self {
            let n = 1 + usize::arbitrary(g) % 12;
            let mut assignment: Vec<usize> = (0..n).collect();
            for i in (1..n).rev() {
                let j = usize::arbitrary(g) % (i + 1);
                assignment.swap(i, j);
            }
            Self {
                seed: u64::arbitrary(g),
                n,
                assignment,
            }
        }
    }

    /// Checks every pair directly against the lists, without rank tables.
    fn naive_blocking_pairs(instance: &Instance, partner: &[usize]) -> Vec<(usize, usize)> {
        let n = instance.n();
        let position = |list: &[usize], x: usize| list.iter().position(|&y| y == x);
        let hospital_lists = instance.hospital_profile();
        let student_lists = instance.student_profile();

        let mut pairs = Vec::new();
        for h in 0..n {
            for s in 0..n {
                let hl = hospital_lists.list(h);
                let sl = student_lists.list(s);
                let current_hospital = partner.iter().position(|&x| x == s);
                let (Some(cur_h), Some(a), Some(b), Some(c), Some(d)) = (
                    current_hospital,
                    position(hl, s + 1),
                    position(hl, partner[h] + 1),
                    position(sl, h + 1),
                    current_hospital.and_then(|ch| position(sl, ch + 1)),
                ) else {
                    continue;
                };
                if cur_h != h && a < b && c < d {
                    pairs.push((h, s));
                }
            }
        }
        pairs
    }

    quickcheck! {
        fn prop_matches_naive_check(case: ArbitraryCase) -> bool {
            let instance = InstanceGenerator::new(case.seed).generate(case.n);
            let m = Matching::from_students(
                case.assignment.iter().map(|&s| StudentIndex::new(s)).collect(),
            );
            let found: Vec<(usize, usize)> = check_instance(&instance, &m)
                .blocking_pairs()
                .map(|(h, s)| (h.get(), s.get()))
                .collect();
            found == naive_blocking_pairs(&instance, &case.assignment)
        }

        fn prop_random_bijection_is_valid(case: ArbitraryCase) -> bool {
            let instance = InstanceGenerator::new(case.seed).generate(case.n);
            let m = Matching::from_students(
                case.assignment.iter().map(|&s| StudentIndex::new(s)).collect(),
            );
            check_instance(&instance, &m).is_valid()
        }
    }
}
