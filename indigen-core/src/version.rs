use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// Library version label emitted as `TI_VERSION`.
///
/// Accepts `X.Y.Z` with an optional `-suffix` (e.g. `0.9.2-rc1`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
    pre: Option<String>,
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Attach a pre-release suffix.
    pub fn with_pre(mut self, pre: impl Into<String>) -> Self {
        self.pre = Some(pre.into());
        self
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (core, pre) = match s.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (s, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(format!("invalid version '{}', expected 'X.Y.Z'", s));
        }

        let number = |part: &str, what: &str| {
            part.parse::<u32>()
                .map_err(|_| format!("invalid {} component in version '{}'", what, s))
        };

        let pre = match pre {
            Some(p) if p.is_empty() || !p.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') => {
                return Err(format!("invalid pre-release suffix in version '{}'", s));
            }
            Some(p) => Some(p.to_string()),
            None => None,
        };

        Ok(Self {
            major: number(parts[0], "major")?,
            minor: number(parts[1], "minor")?,
            patch: number(parts[2], "patch")?,
            pre,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let v: Version = "0.9.2".parse().unwrap();
        assert_eq!(v, Version::new(0, 9, 2));
        assert_eq!(v.to_string(), "0.9.2");
    }

    #[test]
    fn test_parse_pre_release() {
        let v: Version = "1.0.0-rc1".parse().unwrap();
        assert_eq!(v, Version::new(1, 0, 0).with_pre("rc1"));
        assert_eq!(v.to_string(), "1.0.0-rc1");
    }

    #[test]
    fn test_parse_invalid() {
        assert!("1.0".parse::<Version>().is_err());
        assert!("1.x.0".parse::<Version>().is_err());
        assert!("1.0.0-".parse::<Version>().is_err());
        assert!("1.0.0-\"".parse::<Version>().is_err());
    }

    #[test]
    fn test_serde_round_trip_through_string() {
        let v: Version = serde_json::from_str("\"0.9.2\"").unwrap();
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"0.9.2\"");
        assert!(serde_json::from_str::<Version>("\"nope\"").is_err());
    }
}
