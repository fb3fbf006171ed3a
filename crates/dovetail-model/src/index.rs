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

//! # Strongly Typed Agent Indices
//!
//! Hospitals and students share the integer range `1..=n`, which makes raw
//! integers an easy source of swapped-argument bugs. `TypedIndex<T>` wraps a
//! zero-based `usize` and carries a phantom tag so that a `HospitalIndex` can
//! never be used where a `StudentIndex` is expected.
//!
//! Internally every structure is indexed from zero. The one-based identifiers
//! that appear in input and output files are only produced and consumed at the
//! edges through `TypedIndex::from_agent_id` and `TypedIndex::agent_id`.
//!
//! ```rust
//! use dovetail_model::index::{HospitalIndex, StudentIndex};
//!
//! let h = HospitalIndex::from_agent_id(3).unwrap();
//! assert_eq!(h.get(), 2);
//! assert_eq!(h.agent_id(), 3);
//! assert_eq!(format!("{}", h), "Hospital(3)");
//! assert!(StudentIndex::from_agent_id(0).is_none());
//! ```

/// A trait to tag typed indices with the side they belong to.
pub trait TypedIndexTag: Clone {
    /// The side of the market this index addresses.
    const SIDE: Side;
}

/// One side of the two-sided market.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Side {
    /// The proposing side.
    Hospital,
    /// The receiving side.
    Student,
}

impl Side {
    /// Returns the opposite side.
    #[inline]
    pub const fn other(self) -> Side {
        match self {
            Side::Hospital => Side::Student,
            Side::Student => Side::Hospital,
        }
    }

    /// Returns a lowercase name, used in messages.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Hospital => "hospital",
            Side::Student => "student",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zero-based index into one side of the market.
///
/// The tag `T` fixes which side the index belongs to. The wrapper is
/// `#[repr(transparent)]` over `usize` and compiles down to a plain integer.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new index from a zero-based position.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Creates an index from a one-based agent identifier.
    ///
    /// Returns `None` for `0`, which is not a valid identifier.
    #[inline(always)]
    pub const fn from_agent_id(id: usize) -> Option<Self> {
        match id.checked_sub(1) {
            Some(index) => Some(Self::new(index)),
            None => None,
        }
    }

    /// Returns the underlying zero-based index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns the one-based agent identifier.
    #[inline(always)]
    pub const fn agent_id(&self) -> usize {
        self.index + 1
    }

    /// Returns `true` if this index addresses an agent of an instance of size `n`.
    #[inline(always)]
    pub const fn is_within(&self, n: usize) -> bool {
        self.index < n
    }
}

impl<T> TypedIndex<T>
where
    T: TypedIndexTag,
{
    /// Returns the side this index belongs to.
    #[inline(always)]
    pub const fn side(&self) -> Side {
        T::SIDE
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}Index({})", tag_name(T::SIDE), self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tag_name(T::SIDE), self.agent_id())
    }
}

#[inline]
const fn tag_name(side: Side) -> &'static str {
    match side {
        Side::Hospital => "Hospital",
        Side::Student => "Student",
    }
}

impl<T> From<usize> for TypedIndex<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

/// A tag type for hospital indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct HospitalIndexTag;

impl TypedIndexTag for HospitalIndexTag {
    const SIDE: Side = Side::Hospital;
}

/// A typed index for hospitals.
pub type HospitalIndex = TypedIndex<HospitalIndexTag>;

/// A tag type for student indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StudentIndexTag;

impl TypedIndexTag for StudentIndexTag {
    const SIDE: Side = Side::Student;
}

/// A typed index for students.
pub type StudentIndex = TypedIndex<StudentIndexTag>;
