//! Document format versions.
//!
//! A case's `meta.version` records which release of the document layout it
//! was written for. Only `major.minor` take part in compatibility checks;
//! the optional third part (`1.2.x`, `0.13.4`) is kept verbatim.

use crate::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Document layout version understood by this crate.
pub const DOCUMENT_VERSION: &str = "0.13.4";

/// A `major.minor[.other]` version.
///
/// # Examples
///
/// ```rust
/// use serde_foam::Version;
///
/// let version: Version = "1.2.x".parse().unwrap();
/// assert_eq!((version.major, version.minor), (1, 2));
/// assert_eq!(version.other.as_deref(), Some("x"));
/// assert_eq!(version.micro(), None);
/// assert_eq!(version.to_string(), "1.2.x");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub other: Option<String>,
}

impl Version {
    /// The version of [`DOCUMENT_VERSION`].
    pub fn current() -> Self {
        Version {
            major: 0,
            minor: 13,
            other: Some("4".to_string()),
        }
    }

    /// Leading numeric part of `other`, if any.
    pub fn micro(&self) -> Option<u32> {
        self.other
            .as_deref()
            .and_then(|other| other.split('.').next())
            .and_then(|part| part.parse().ok())
    }

    /// Orders two versions by `major.minor` only.
    ///
    /// ```rust
    /// use serde_foam::Version;
    /// use std::cmp::Ordering;
    ///
    /// let a: Version = "0.13.1".parse().unwrap();
    /// let b: Version = "0.13.x".parse().unwrap();
    /// assert_eq!(a.compare_release(&b), Ordering::Equal);
    /// ```
    pub fn compare_release(&self, other: &Version) -> Ordering {
        (self.major, self.minor).cmp(&(other.major, other.minor))
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersion(s.to_string());
        let mut parts = s.splitn(3, '.');
        let major = parts.next().ok_or_else(invalid)?;
        let minor = parts.next().ok_or_else(invalid)?;
        Ok(Version {
            major: major.trim().parse().map_err(|_| invalid())?,
            minor: minor.trim().parse().map_err(|_| invalid())?,
            other: parts.next().map(str::to_string),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(other) = &self.other {
            write!(f, ".{}", other)?;
        }
        Ok(())
    }
}
