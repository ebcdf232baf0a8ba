use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Field order matters: the derived `Ord` compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// The version used when no matching tag exists
    pub const ZERO: Version = Version::new(0, 0, 0);

    /// Create a new version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse version from a string (e.g., "1.2.3" or "v1.2.3" -> Version(1,2,3))
    ///
    /// At most one leading `v`/`V` is stripped. The rest must be exactly three
    /// dot-separated runs of ASCII digits.
    pub fn parse(text: &str) -> Result<Self> {
        let clean = text
            .strip_prefix('v')
            .or_else(|| text.strip_prefix('V'))
            .unwrap_or(text);

        let parts: Vec<&str> = clean.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::version(format!(
                "'{}' - expected X.Y.Z",
                text
            )));
        }

        let major = parse_field(parts[0], "major", text)?;
        let minor = parse_field(parts[1], "minor", text)?;
        let patch = parse_field(parts[2], "patch", text)?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Bump version according to the increment
    ///
    /// Fails with `InvalidVersion` when the bumped field would overflow.
    pub fn bump(&self, increment: Increment) -> Result<Self> {
        let overflow = || {
            ReleaseError::version(format!("'{}' - cannot bump {} any further", self, increment))
        };
        match increment {
            Increment::Major => {
                let major = self.major.checked_add(1).ok_or_else(overflow)?;
                Ok(Version::new(major, 0, 0))
            }
            Increment::Minor => {
                let minor = self.minor.checked_add(1).ok_or_else(overflow)?;
                Ok(Version::new(self.major, minor, 0))
            }
            Increment::Patch => {
                let patch = self.patch.checked_add(1).ok_or_else(overflow)?;
                Ok(Version::new(self.major, self.minor, patch))
            }
        }
    }

    /// Convert into the `semver` crate representation used for range matching
    pub fn to_semver(self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch)
    }
}

fn parse_field(field: &str, name: &str, original: &str) -> Result<u64> {
    // u64::from_str accepts a leading '+', digits only here
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReleaseError::version(format!(
            "'{}' - {} component '{}' is not a number",
            original, name, field
        )));
    }
    field.parse::<u64>().map_err(|_| {
        ReleaseError::version(format!(
            "'{}' - {} component '{}' is out of range",
            original, name, field
        ))
    })
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which semantic-version field to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Increment {
    Major,
    Minor,
    Patch,
}

impl Increment {
    /// Parse an increment keyword. Matching is exact and case-sensitive.
    pub fn parse(text: &str) -> Result<Self> {
        match text {
            "major" => Ok(Increment::Major),
            "minor" => Ok(Increment::Minor),
            "patch" => Ok(Increment::Patch),
            other => Err(ReleaseError::InvalidIncrement(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Increment::Major => "major",
            Increment::Minor => "minor",
            Increment::Patch => "patch",
        }
    }
}

impl FromStr for Increment {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Increment::parse(s)
    }
}

impl fmt::Display for Increment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
