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

//! Hospital-to-student pairings.
//!
//! A `Matching` is kept as a plain list of pairs rather than a map so that it
//! can hold whatever an external source supplied: a hospital listed twice, a
//! student used twice, or an identifier beyond `n`. Whether it is actually a
//! bijection is a question for `is_bijection` or the verifier.

use crate::index::{HospitalIndex, StudentIndex};
use std::io::Write;

/// An ordered collection of `(hospital, student)` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Matching {
    pairs: Vec<(HospitalIndex, StudentIndex)>,
}

impl Matching {
    /// Creates an empty matching.
    #[inline]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Creates a matching from arbitrary pairs, kept in the given order.
    #[inline]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (HospitalIndex, StudentIndex)>,
    {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }

    /// Creates a matching from one-based identifier pairs.
    ///
    /// Returns `None` if any identifier is `0`.
    pub fn from_agent_ids<I>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        pairs
            .into_iter()
            .map(|(h, s)| {
                Some((
                    HospitalIndex::from_agent_id(h)?,
                    StudentIndex::from_agent_id(s)?,
                ))
            })
            .collect::<Option<Vec<_>>>()
            .map(|pairs| Self { pairs })
    }

    /// Creates a matching where hospital `i` is paired with `students[i]`.
    #[inline]
    pub fn from_students(students: Vec<StudentIndex>) -> Self {
        Self {
            pairs: students
                .into_iter()
                .enumerate()
                .map(|(h, s)| (HospitalIndex::new(h), s))
                .collect(),
        }
    }

    /// Appends a pair.
    #[inline]
    pub fn push(&mut self, hospital: HospitalIndex, student: StudentIndex) {
        self.pairs.push((hospital, student));
    }

    /// Returns the number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns all pairs in insertion order.
    #[inline]
    pub fn pairs(&self) -> &[(HospitalIndex, StudentIndex)] {
        &self.pairs
    }

    /// Iterates over all pairs in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, (HospitalIndex, StudentIndex)> {
        self.pairs.iter()
    }

    /// Returns the student of the first pair that names `hospital`.
    #[inline]
    pub fn student_for(&self, hospital: HospitalIndex) -> Option<StudentIndex> {
        self.pairs
            .iter()
            .find(|(h, _)| *h == hospital)
            .map(|&(_, s)| s)
    }

    /// Returns the hospital of the first pair that names `student`.
    #[inline]
    pub fn hospital_for(&self, student: StudentIndex) -> Option<HospitalIndex> {
        self.pairs
            .iter()
            .find(|(_, s)| *s == student)
            .map(|&(h, _)| h)
    }

    /// Returns `true` if this matching pairs every hospital `1..=n` with
    /// exactly one student `1..=n` and no student twice.
    pub fn is_bijection(&self, n: usize) -> bool {
        if self.pairs.len() != n {
            return false;
        }

        let mut hospital_seen = vec![false; n];
        let mut student_seen = vec![false; n];
        for (h, s) in &self.pairs {
            if !h.is_within(n) || !s.is_within(n) {
                return false;
            }
            if std::mem::replace(&mut hospital_seen[h.get()], true)
                || std::mem::replace(&mut student_seen[s.get()], true)
            {
                return false;
            }
        }
        true
    }

    /// Returns a copy with the pairs sorted by hospital, then student.
    pub fn sorted_by_hospital(&self) -> Self {
        let mut pairs = self.pairs.clone();
        pairs.sort_unstable();
        Self { pairs }
    }

    /// Returns, for a bijection over `1..=n`, the student of each hospital
    /// indexed by hospital. Returns `None` if this is not a bijection.
    pub fn to_student_vec(&self, n: usize) -> Option<Vec<StudentIndex>> {
        if !self.is_bijection(n) {
            return None;
        }

        let mut students = vec![StudentIndex::new(0); n];
        for &(h, s) in &self.pairs {
            students[h.get()] = s;
        }
        Some(students)
    }

    /// Writes the matching as `"<hospital> <student>"` lines sorted by hospital.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()
    }
}

impl std::fmt::Display for Matching {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (h, s) in self.sorted_by_hospital().iter() {
            writeln!(f, "{} {}", h.agent_id(), s.agent_id())?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Matching {
    type Item = &'a (HospitalIndex, StudentIndex);
    type IntoIter = std::slice::Iter<'a, (HospitalIndex, StudentIndex)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl FromIterator<(HospitalIndex, StudentIndex)> for Matching {
    fn from_iter<I: IntoIterator<Item = (HospitalIndex, StudentIndex)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
