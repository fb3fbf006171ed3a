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

//! Exhaustive enumeration of stable matchings.
//!
//! Walks all `n!` perfect matchings with Heap's algorithm and keeps the ones
//! without a blocking pair. Only usable for very small instances; it exists
//! to cross-check the matcher, e.g. that its result is hospital-optimal.

use crate::verifier::{blocking_pairs, invert};
use dovetail_model::{index::StudentIndex, instance::Instance, matching::Matching};

/// Largest instance size accepted by `stable_matchings`.
pub const MAX_ENUMERATION_SIZE: usize = 9;

/// Returns every stable matching of `instance`, sorted by their pairs.
///
/// The result is never empty: every instance has at least one stable
/// matching, and the empty instance has exactly the empty one.
///
/// # Panics
///
/// Panics if `instance.n()` exceeds `MAX_ENUMERATION_SIZE`.
pub fn stable_matchings(instance: &Instance) -> Vec<Matching> {
    let n = instance.n();
    assert!(
        n <= MAX_ENUMERATION_SIZE,
        "called `stable_matchings` with an instance too large to enumerate: the limit is {} but n is {}",
        MAX_ENUMERATION_SIZE,
        n
    );

    let mut partner: Vec<StudentIndex> = instance.students().collect();
    let mut found = Vec::new();
    let mut visit = |partner: &[StudentIndex]| {
        let partner_of = invert(partner);
        if blocking_pairs(instance, partner, &partner_of).next().is_none() {
            found.push(Matching::from_students(partner.to_vec()));
        }
    };

    // Iterative Heap's algorithm; `counters[i]` drives the swaps at level `i`.
    visit(&partner);
    let mut counters = vec![0usize; n];
    let mut i = 1;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                partner.swap(0, i);
            } else {
                partner.swap(counters[i], i);
            }
            visit(&partner);
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }

    found.sort_unstable_by(|a, b| a.pairs().cmp(b.pairs()));
    tracing::debug!(n, stable = found.len(), "enumerated stable matchings");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::check_instance;
    use dovetail_model::generate::InstanceGenerator;

    fn instance(hospitals: Vec<Vec<usize>>, students: Vec<Vec<usize>>) -> Instance {
        Instance::from_lists(hospitals, students).expect("valid instance")
    }

    #[test]
    fn test_unique_stable_matching() {
        let inst = instance(vec![vec![1, 2], vec![2, 1]], vec![vec![1, 2], vec![2, 1]]);
        let all = stable_matchings(&inst);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].to_string(), "1 1\n2 2\n");
    }

    #[test]
    fn test_opposed_preferences_have_two() {
        // Hospitals get their first choices in one matching, students in the other.
        let inst = instance(vec![vec![1, 2], vec![2, 1]], vec![vec![2, 1], vec![1, 2]]);
        let all = stable_matchings(&inst);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].to_string(), "1 1\n2 2\n");
        assert_eq!(all[1].to_string(), "1 2\n2 1\n");
    }

    #[test]
    fn test_empty_instance_has_the_empty_matching() {
        let all = stable_matchings(&instance(Vec::new(), Vec::new()));
        assert_eq!(all, vec![Matching::new()]);
    }

    #[test]
    fn test_results_are_stable_bijections() {
        let mut generator = InstanceGenerator::new(17);
        for n in 1..=6 {
            let inst = generator.generate(n);
            let all = stable_matchings(&inst);
            assert!(!all.is_empty());
            for m in &all {
                assert!(m.is_bijection(n));
                assert!(check_instance(&inst, m).is_empty());
            }
        }
    }

    #[test]
    #[should_panic(expected = "too large to enumerate")]
    fn test_rejects_large_instances() {
        let inst = InstanceGenerator::default().generate(MAX_ENUMERATION_SIZE + 1);
        stable_matchings(&inst);
    }
}
