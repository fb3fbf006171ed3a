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

//! Text loaders for preference files and matching files.
//!
//! A preference file holds the instance size `n` on its first line, then `n`
//! hospital lists and `n` student lists, one per line, as whitespace-separated
//! one-based identifiers. The agent a list belongs to is given by its line
//! order. A matching file holds one `"<hospital> <student>"` pair per line.
//!
//! Blank lines are skipped and `#` starts a comment that runs to the end of
//! the line, so hand-written fixtures can be annotated. Every error carries
//! the one-based line number it refers to.
//!
//! `InstanceLoader` can stop after tokenizing (`profiles_from_*`), which hands
//! back possibly malformed profiles for the verifier to describe, or go on to
//! build a validated `Instance` (`from_*`), which is what the matcher needs.

use crate::{
    index::{HospitalIndex, StudentIndex},
    instance::{InputError, Instance},
    matching::Matching,
    preference::PreferenceProfile,
};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// Upper bound on the list slots reserved before any list has been read.
const MAX_PREALLOCATED_LISTS: usize = 4096;

/// Details about a token that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: could not parse token '{token}' as type {type_name}")]
pub struct ParseTokenError {
    /// The one-based line number.
    pub line: usize,
    /// The token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into.
    pub type_name: &'static str,
}

/// The error type for loading preference and matching files.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input contains no size line at all.
    #[error("input is empty")]
    Empty,
    /// The input ended before all preference lists were read.
    #[error("expected {expected} preference lines, but got {found}")]
    UnexpectedEof {
        /// Number of list lines the size line announced.
        expected: usize,
        /// Number of list lines actually present.
        found: usize,
    },
    /// A token could not be parsed into the expected numeric type.
    #[error("parse error: {0}")]
    Parse(#[from] ParseTokenError),
    /// The size line holds a negative number.
    #[error("line {line}: n must be non-negative, got {value}")]
    NegativeSize {
        /// The one-based line number.
        line: usize,
        /// The value that was read.
        value: i64,
    },
    /// The size line holds more than one token.
    #[error("line {line}: expected a single integer n")]
    MalformedSize {
        /// The one-based line number.
        line: usize,
    },
    /// Non-empty lines follow the last preference list.
    #[error("line {line}: unexpected data after the last preference list")]
    TrailingData {
        /// The one-based line number of the first extra line.
        line: usize,
    },
    /// A matching line does not hold exactly two positive identifiers.
    #[error("line {line}: invalid matching line '{content}'")]
    MalformedPair {
        /// The one-based line number.
        line: usize,
        /// The offending line without its comment.
        content: String,
    },
    /// The preference lists do not form a valid instance.
    #[error("invalid input format: {0}")]
    Input(#[from] InputError),
}

/// Both profiles of a preference file, exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProfiles {
    /// The size announced on the first line.
    pub n: usize,
    /// The hospital lists.
    pub hospitals: PreferenceProfile,
    /// The student lists.
    pub students: PreferenceProfile,
}

impl RawProfiles {
    /// Validates the profiles into an `Instance`.
    ///
    /// # Errors
    ///
    /// See `Instance::new`.
    #[inline]
    pub fn into_instance(self) -> Result<Instance, InputError> {
        Instance::new(&self.hospitals, &self.students)
    }
}

/// A configurable loader for preference files.
///
/// # Configuration
/// * `allow_trailing_lines`: if true, non-empty lines after the last student
///   list are ignored instead of rejected. Defaults to false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstanceLoader {
    allow_trailing_lines: bool,
}

impl InstanceLoader {
    /// Creates a new `InstanceLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether extra lines after the student lists are tolerated.
    #[inline]
    pub fn allow_trailing_lines(mut self, yes: bool) -> Self {
        self.allow_trailing_lines = yes;
        self
    }

    /// Reads both profiles without checking that the lists are permutations.
    ///
    /// Only the file structure is enforced: a non-negative size line followed
    /// by `2 * n` lines of unsigned integers.
    pub fn profiles_from_bufread<R: BufRead>(&self, rdr: R) -> Result<RawProfiles, LoaderError> {
        let mut lines = Lines::new(rdr);

        let (size_line, size_content) = lines.next_line()?.ok_or(LoaderError::Empty)?;
        let n = parse_size(size_line, &size_content)?;
        let expected = n.saturating_mul(2);

        let mut read_side = |count: usize, lists: &mut Vec<Vec<usize>>| -> Result<(), LoaderError> {
            for _ in 0..count {
                let Some((line, content)) = lines.next_line()? else {
                    return Err(LoaderError::UnexpectedEof {
                        expected,
                        found: lists.len(),
                    });
                };
                lists.push(parse_tokens(line, &content)?);
            }
            Ok(())
        };

        // The size line is untrusted; grow with the lines actually read.
        let mut all = Vec::with_capacity(expected.min(MAX_PREALLOCATED_LISTS));
        read_side(n, &mut all)?;
        read_side(n, &mut all)?;
        let students = all.split_off(n);
        let hospitals = all;

        if !self.allow_trailing_lines
            && let Some((line, _)) = lines.next_line()?
        {
            return Err(LoaderError::TrailingData { line });
        }

        tracing::debug!(n, "read preference profiles");

        Ok(RawProfiles {
            n,
            hospitals: PreferenceProfile::hospitals(hospitals),
            students: PreferenceProfile::students(students),
        })
    }

    /// Reads raw profiles from a file path.
    #[inline]
    pub fn profiles_from_path<P: AsRef<Path>>(&self, path: P) -> Result<RawProfiles, LoaderError> {
        let file = File::open(path)?;
        self.profiles_from_bufread(BufReader::new(file))
    }

    /// Reads raw profiles from a string slice.
    #[inline]
    pub fn profiles_from_str(&self, s: &str) -> Result<RawProfiles, LoaderError> {
        self.profiles_from_bufread(s.as_bytes())
    }

    /// Loads a validated instance from a type implementing `BufRead`.
    #[inline]
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Instance, LoaderError> {
        Ok(self.profiles_from_bufread(rdr)?.into_instance()?)
    }

    /// Loads a validated instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Instance, LoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a validated instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance, LoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a validated instance from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Instance, LoaderError> {
        self.from_bufread(s.as_bytes())
    }
}

/// A loader for matching files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchingLoader;

impl MatchingLoader {
    /// Creates a new `MatchingLoader`.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Loads a matching from a type implementing `BufRead`.
    ///
    /// Pairs are kept in file order, including repeated hospitals or students.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Matching, LoaderError> {
        let mut lines = Lines::new(rdr);
        let mut matching = Matching::new();

        while let Some((line, content)) = lines.next_line()? {
            let malformed = || LoaderError::MalformedPair {
                line,
                content: content.clone(),
            };

            let ids = parse_tokens(line, &content)?;
            let &[h, s] = ids.as_slice() else {
                return Err(malformed());
            };
            let (Some(h), Some(s)) = (
                HospitalIndex::from_agent_id(h),
                StudentIndex::from_agent_id(s),
            ) else {
                return Err(malformed());
            };
            matching.push(h, s);
        }

        tracing::debug!(pairs = matching.len(), "read matching");
        Ok(matching)
    }

    /// Loads a matching from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Matching, LoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a matching from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Matching, LoaderError> {
        self.from_bufread(s.as_bytes())
    }
}

/// Yields non-empty, comment-stripped lines with their one-based number.
struct Lines<R> {
    rdr: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            line: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<(usize, String)>, LoaderError> {
        loop {
            self.buf.clear();
            if self.rdr.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let content = match self.buf.find('#') {
                Some(pos) => &self.buf[..pos],
                None => self.buf.as_str(),
            }
            .trim();

            if !content.is_empty() {
                return Ok(Some((self.line, content.to_owned())));
            }
        }
    }
}

fn parse_token<T: FromStr>(line: usize, token: &str) -> Result<T, ParseTokenError> {
    token.parse::<T>().map_err(|_| ParseTokenError {
        line,
        token: token.to_owned(),
        type_name: std::any::type_name::<T>(),
    })
}

fn parse_tokens(line: usize, content: &str) -> Result<Vec<usize>, LoaderError> {
    content
        .split_whitespace()
        .map(|t| parse_token::<usize>(line, t).map_err(LoaderError::from))
        .collect()
}

fn parse_size(line: usize, content: &str) -> Result<usize, LoaderError> {
    let mut tokens = content.split_whitespace();
    let (Some(token), None) = (tokens.next(), tokens.next()) else {
        return Err(LoaderError::MalformedSize { line });
    };

    let value: i64 = parse_token(line, token)?;
    usize::try_from(value).map_err(|_| LoaderError::NegativeSize { line, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{index::Side, preference::ProfileError};
    use std::io::Write;

    const SMALL_INSTANCE: &str = r#"
        3           # n
        1 2 3       # hospital 1
        2 1 3       # hospital 2
        1 3 2       # hospital 3

        3 2 1       # student 1
        1 2 3       # student 2
        2 3 1       # student 3
    "#;

    #[test]
    fn test_loads_instance() {
        let inst = InstanceLoader::new()
            .from_str(SMALL_INSTANCE)
            .expect("Failed to load");

        assert_eq!(inst.n(), 3);
        assert_eq!(
            inst.hospital_choice(HospitalIndex::new(1), 0),
            Some(StudentIndex::new(1))
        );
        assert_eq!(
            inst.student_list(StudentIndex::new(0))[0],
            HospitalIndex::new(2)
        );
    }

    #[test]
    fn test_zero_size_instance() {
        let inst = InstanceLoader::new().from_str("0\n").unwrap();
        assert!(inst.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let res = InstanceLoader::new().from_str("  \n# nothing\n");
        assert!(matches!(res, Err(LoaderError::Empty)));
    }

    #[test]
    fn test_negative_size() {
        let res = InstanceLoader::new().from_str("-2\n");
        assert!(matches!(
            res,
            Err(LoaderError::NegativeSize { line: 1, value: -2 })
        ));
    }

    #[test]
    fn test_missing_lines() {
        let res = InstanceLoader::new().from_str("2\n1 2\n2 1\n1 2\n");
        assert!(matches!(
            res,
            Err(LoaderError::UnexpectedEof {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_huge_size_without_lists() {
        let res = InstanceLoader::new().from_str("100000000000000\n1\n");
        assert!(matches!(
            res,
            Err(LoaderError::UnexpectedEof {
                expected: 200000000000000,
                found: 1
            })
        ));

        let largest = i64::MAX as usize;
        let res = InstanceLoader::new().profiles_from_str(&format!("{}\n1 2\n", largest));
        assert!(matches!(
            res,
            Err(LoaderError::UnexpectedEof { expected, found: 1 })
                if expected == largest.saturating_mul(2)
        ));
    }

    #[test]
    fn test_trailing_lines() {
        let data = "1\n1\n1\n1 1\n";
        let res = InstanceLoader::new().from_str(data);
        assert!(matches!(res, Err(LoaderError::TrailingData { line: 4 })));

        let inst = InstanceLoader::new()
            .allow_trailing_lines(true)
            .from_str(data)
            .unwrap();
        assert_eq!(inst.n(), 1);
    }

    #[test]
    fn test_parse_error_structure() {
        let res = InstanceLoader::new().from_str("2\n1 x\n");
        match res {
            Err(LoaderError::Parse(e)) => {
                assert_eq!(e.token, "x");
                assert_eq!(e.line, 2);
                assert!(e.type_name.contains("usize"));
            }
            other => panic!("Expected Parse error with context, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_entry_becomes_input_error() {
        let res = InstanceLoader::new().from_str("2\n1 1\n1 2\n1 2\n1 2\n");
        match res {
            Err(LoaderError::Input(InputError::MalformedProfile {
                side,
                agent,
                reason,
            })) => {
                assert_eq!(side, Side::Hospital);
                assert_eq!(agent, 1);
                assert_eq!(reason, ProfileError::Duplicate { value: 1 });
            }
            other => panic!("Expected MalformedProfile, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_profiles_keep_malformed_lists() {
        let raw = InstanceLoader::new()
            .profiles_from_str("2\n1 1\n1 2\n1\n2 1\n")
            .unwrap();
        assert_eq!(raw.n, 2);
        assert_eq!(raw.hospitals.list(0), &[1, 1]);
        assert_eq!(raw.students.list(0), &[1]);
        assert!(raw.into_instance().is_err());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SMALL_INSTANCE).unwrap();
        let inst = InstanceLoader::new().from_path(file.path()).unwrap();
        assert_eq!(inst.n(), 3);
    }

    #[test]
    fn test_matching_loader_keeps_duplicates() {
        let m = MatchingLoader::new().from_str("1 2\n\n2 2 # dup\n").unwrap();
        assert_eq!(
            m.pairs(),
            &[
                (HospitalIndex::new(0), StudentIndex::new(1)),
                (HospitalIndex::new(1), StudentIndex::new(1)),
            ]
        );
    }

    #[test]
    fn test_matching_loader_rejects_bad_lines() {
        let res = MatchingLoader::new().from_str("1 2 3\n");
        assert!(matches!(res, Err(LoaderError::MalformedPair { line: 1, .. })));

        let res = MatchingLoader::new().from_str("1 1\n0 2\n");
        assert!(matches!(res, Err(LoaderError::MalformedPair { line: 2, .. })));

        let res = MatchingLoader::new().from_str("1 a\n");
        assert!(matches!(res, Err(LoaderError::Parse(_))));
    }
}
