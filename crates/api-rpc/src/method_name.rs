//! Method Names
//!
//! `<system>/<method>.v<version>`, e.g. `account/login.v1`.

use crate::error::RegistryError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodName {
    pub system: String,
    pub method: String,
    pub version: u32,
}

impl MethodName {
    pub fn new(system: impl Into<String>, method: impl Into<String>, version: u32) -> Self {
        Self {
            system: system.into(),
            method: method.into(),
            version,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        let invalid = |reason: &str| RegistryError::InvalidName {
            name: raw.to_string(),
            reason: reason.to_string(),
        };

        let (system, rest) = raw
            .split_once('/')
            .ok_or_else(|| invalid("missing '/' between system and method"))?;
        let (method, version) = rest
            .rsplit_once(".v")
            .ok_or_else(|| invalid("missing '.v<version>' suffix"))?;

        if !is_segment(system) {
            return Err(invalid("system must be non-empty [A-Za-z0-9_-]"));
        }
        if !is_segment(method) {
            return Err(invalid("method must be non-empty [A-Za-z0-9_-]"));
        }
        if version.is_empty() || !version.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("version must be a number"));
        }
        let version = version
            .parse::<u32>()
            .map_err(|_| invalid("version out of range"))?;

        Ok(Self::new(system, method, version))
    }
}

fn is_segment(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl FromStr for MethodName {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}.v{}", self.system, self.method, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let name = MethodName::parse("account/login.v2").unwrap();
        assert_eq!(name, MethodName::new("account", "login", 2));
        assert_eq!(name.to_string(), "account/login.v2");
    }

    #[test]
    fn test_parse_missing_system() {
        let err = MethodName::parse("login.v1").unwrap_err();
        assert!(err.to_string().contains("'/'"));
    }

    #[test]
    fn test_parse_missing_version() {
        assert!(MethodName::parse("account/login").is_err());
        assert!(MethodName::parse("account/login.v").is_err());
        assert!(MethodName::parse("account/login.vx").is_err());
    }

    #[test]
    fn test_parse_invalid_chars() {
        assert!(MethodName::parse("acc ount/login.v1").is_err());
        assert!(MethodName::parse("account/lo.gin.v1").is_err());
        assert!(MethodName::parse("/login.v1").is_err());
    }
}
