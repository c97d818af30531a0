//! Dependency constraint types.
//!
//! Records carry their `depends` entries as plain strings. A `Dependency` is
//! a view over one entry: the leading package name, and whatever follows it
//! (`<2.0`, `>=3.8,<4`, `1.21.*`). The trailing text is only interpreted as a
//! single `<op> <version>` bound when a comparison is actually needed.

use super::{Op, Version};
use crate::error::{FixResult, FixtureError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependency on another package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dependency {
    raw: String,
    pub name: String,
    /// Text after the name, if any
    pub spec: Option<String>,
}

/// Version bound attached to a dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub op: Op,
    pub version: Version,
}

impl Dependency {
    /// Split a dependency string such as `"bar <2.0"` into name and spec
    ///
    /// Only the name is checked here; the input is kept verbatim.
    pub fn parse(input: &str) -> FixResult<Self> {
        let text = input.trim();
        let split = text
            .find(|c: char| !is_name_char(c))
            .unwrap_or(text.len());
        let (name, rest) = text.split_at(split);

        if !is_valid_name(name) {
            return Err(FixtureError::InvalidDependency {
                input: input.to_string(),
            });
        }

        let rest = rest.trim();
        Ok(Self {
            raw: input.to_string(),
            name: name.to_string(),
            spec: (!rest.is_empty()).then(|| rest.to_string()),
        })
    }

    /// The dependency exactly as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check whether this dependency places no bound on the version
    pub fn is_unconstrained(&self) -> bool {
        self.spec.is_none()
    }

    /// Interpret the spec as a single `<op> <version>` bound
    pub fn constraint(&self) -> FixResult<Option<Constraint>> {
        let Some(spec) = &self.spec else {
            return Ok(None);
        };

        let (op, version) = Op::PARSE_ORDER
            .iter()
            .find_map(|(symbol, op)| spec.strip_prefix(symbol).map(|v| (*op, v)))
            .ok_or_else(|| FixtureError::InvalidDependency {
                input: self.raw.clone(),
            })?;

        Ok(Some(Constraint {
            op,
            version: version.trim().parse()?,
        }))
    }

    /// Check whether `version` of `self.name` satisfies this dependency
    ///
    /// Returns `None` when either side cannot be compared.
    pub fn matches(&self, version: &str) -> Option<bool> {
        match self.constraint() {
            Ok(None) => Some(true),
            Ok(Some(constraint)) => {
                let version: Version = version.parse().ok()?;
                Some(constraint.op.compare(&version, &constraint.version))
            }
            Err(_) => None,
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Check if this is a valid package name
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char) && !name.starts_with(['-', '.'])
}

impl TryFrom<String> for Dependency {
    type Error = FixtureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Dependency::parse(&value)
    }
}

impl From<Dependency> for String {
    fn from(dependency: Dependency) -> Self {
        dependency.raw
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
