//! Schema version stamped on every annotation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::AnnotationError;

/// A `major.minor.patch` version of the annotation schema.
///
/// Annotations stamped with a different version than the running one are
/// considered stale and get rewritten on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SchemaVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AnnotationError::InvalidVersion(s.to_string());
        let mut parts = s.trim().split('.');
        let mut next = || -> Result<u32, AnnotationError> {
            parts
                .next()
                .ok_or_else(invalid)?
                .parse::<u32>()
                .map_err(|_| invalid())
        };
        let version = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl TryFrom<String> for SchemaVersion {
    type Error = AnnotationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SchemaVersion> for String {
    fn from(version: SchemaVersion) -> Self {
        version.to_string()
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        assert_eq!("0.1.0".parse::<SchemaVersion>().unwrap(), SchemaVersion::new(0, 1, 0));
        assert_eq!("12.3.45".parse::<SchemaVersion>().unwrap(), SchemaVersion::new(12, 3, 45));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "1", "1.2", "1.2.3.4", "a.b.c", "1.-2.3"] {
            assert!(bad.parse::<SchemaVersion>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_ordering() {
        assert!(SchemaVersion::new(0, 2, 0) > SchemaVersion::new(0, 1, 9));
        assert!(SchemaVersion::new(1, 0, 0) > SchemaVersion::new(0, 9, 9));
    }

    #[test]
    fn test_serializes_as_string() {
        let version = SchemaVersion::new(0, 1, 0);
        assert_eq!(serde_json::to_string(&version).unwrap(), "\"0.1.0\"");
        let back: SchemaVersion = serde_json::from_str("\"0.1.0\"").unwrap();
        assert_eq!(back, version);
    }
}
