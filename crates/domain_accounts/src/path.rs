//! Dotted account paths
//!
//! An account id such as `1.1.2.1` is a non-empty sequence of positive
//! integer segments. Ordering is segment-wise numeric, so `1.2 < 1.10`, and
//! every path sorts immediately before its own descendants.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::AccountError;

/// Position of an account in the chart
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DottedPath(Vec<u32>);

impl DottedPath {
    /// Builds a path from raw segments
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidPath` if `segments` is empty or contains a zero.
    pub fn from_segments(segments: Vec<u32>) -> Result<Self, AccountError> {
        if segments.is_empty() {
            return Err(AccountError::InvalidPath {
                path: String::new(),
                reason: "path has no segments".to_string(),
            });
        }
        if segments.iter().any(|s| *s == 0) {
            return Err(AccountError::InvalidPath {
                path: join(&segments),
                reason: "segments must be positive".to_string(),
            });
        }
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[u32] {
        &self.0
    }

    /// Number of segments (`1` for a root group)
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn first_segment(&self) -> u32 {
        self.0[0]
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// The path with its last segment removed, or `None` for a root
    pub fn parent(&self) -> Option<DottedPath> {
        if self.is_root() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// True iff `self` is a strict prefix of `other`
    pub fn is_ancestor_of(&self, other: &DottedPath) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// True iff `self` is `other` or one of its descendants
    pub fn is_within(&self, scope: &DottedPath) -> bool {
        self == scope || scope.is_ancestor_of(self)
    }

    /// Extends the path with one more segment
    pub fn child(&self, segment: u32) -> Result<DottedPath, AccountError> {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self::from_segments(segments)
    }
}

fn join(segments: &[u32]) -> String {
    segments
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.0))
    }
}

impl FromStr for DottedPath {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AccountError::InvalidPath {
                path: s.to_string(),
                reason: "empty path".to_string(),
            });
        }
        let segments = trimmed
            .split('.')
            .map(|part| {
                part.parse::<u32>().map_err(|e| AccountError::InvalidPath {
                    path: s.to_string(),
                    reason: format!("segment '{part}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_segments(segments).map_err(|e| match e {
            AccountError::InvalidPath { reason, .. } => AccountError::InvalidPath {
                path: s.to_string(),
                reason,
            },
            other => other,
        })
    }
}

impl TryFrom<&str> for DottedPath {
    type Error = AccountError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for DottedPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DottedPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn path_strategy() -> impl Strategy<Value = DottedPath> {
        prop::collection::vec(1u32..20, 1..5)
            .prop_map(|segments| DottedPath::from_segments(segments).unwrap())
    }

    proptest! {
        #[test]
        fn display_then_parse_is_identity(path in path_strategy()) {
            prop_assert_eq!(path.to_string().parse::<DottedPath>().unwrap(), path);
        }

        #[test]
        fn parent_is_ancestor(path in path_strategy()) {
            if let Some(parent) = path.parent() {
                prop_assert!(parent.is_ancestor_of(&path));
                prop_assert!(parent < path);
            }
        }
    }
}
