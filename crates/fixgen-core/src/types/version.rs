//! Dotted version numbers for ordering comparisons.
//!
//! Records keep their version text untouched; it is parsed into a `Version`
//! only when a dependency bound has to be checked. Parsed versions are ordered
//! segment by segment, with missing trailing segments treated as zero, and
//! always displayed exactly as they were written.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// Dotted numeric version (`1.0`, `2.0.1`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    raw: String,
    segments: Vec<u64>,
}

/// Comparison operator of a dependency constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Exact,     // ==1.0
    NotEq,     // !=1.0
    Greater,   // >1.0
    GreaterEq, // >=1.0
    Less,      // <2.0
    LessEq,    // <=2.0
}

/// Version parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version format: '{input}'")]
    InvalidFormat { input: String },

    #[error("Invalid number in version '{input}': {component}")]
    InvalidNumber { input: String, component: String },
}

impl Version {
    /// The version exactly as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric segments of the version
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// Segments with trailing zeros removed, so `1.0` and `1` compare equal
    fn significant(&self) -> &[u64] {
        let len = self
            .segments
            .iter()
            .rposition(|s| *s != 0)
            .map_or(0, |i| i + 1);
        &self.segments[..len]
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(VersionError::InvalidFormat {
                input: s.to_string(),
            });
        }

        let segments = input
            .split('.')
            .map(|part| {
                part.parse::<u64>().map_err(|_| VersionError::InvalidNumber {
                    input: input.to_string(),
                    component: part.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Version {
            raw: input.to_string(),
            segments,
        })
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.raw
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).copied().unwrap_or(0);
            let b = other.segments.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl Op {
    /// Operators in the order they must be tried when parsing, longest first
    pub(crate) const PARSE_ORDER: [(&'static str, Op); 7] = [
        ("==", Op::Exact),
        ("!=", Op::NotEq),
        (">=", Op::GreaterEq),
        ("<=", Op::LessEq),
        (">", Op::Greater),
        ("<", Op::Less),
        ("=", Op::Exact),
    ];

    /// Evaluate `candidate <op> bound`
    pub fn compare(&self, candidate: &Version, bound: &Version) -> bool {
        match self {
            Op::Exact => candidate == bound,
            Op::NotEq => candidate != bound,
            Op::Greater => candidate > bound,
            Op::GreaterEq => candidate >= bound,
            Op::Less => candidate < bound,
            Op::LessEq => candidate <= bound,
        }
    }

    /// Operator symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Op::Exact => "==",
            Op::NotEq => "!=",
            Op::Greater => ">",
            Op::GreaterEq => ">=",
            Op::Less => "<",
            Op::LessEq => "<=",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
