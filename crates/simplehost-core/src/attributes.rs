//! Closed attribute sets for hosting instances.
//!
//! Each attribute is an enum whose `Display`/`FromStr`/serde forms all use
//! the exact strings the remote API speaks, so a value that parses is by
//! construction a value the API accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An attribute value outside its closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} '{value}', expected one of: {expected}")]
pub struct InvalidAttribute {
    /// Which attribute failed to parse.
    pub field: &'static str,
    /// The offending value.
    pub value: String,
    /// The accepted set, for the error message.
    pub expected: &'static str,
}

impl InvalidAttribute {
    fn new(field: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            field,
            value: value.to_string(),
            expected,
        }
    }
}

/// The plan tier of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceSize {
    /// The `s+` tier.
    #[serde(rename = "s+")]
    SPlus,
    #[serde(rename = "m")]
    Medium,
    #[serde(rename = "l")]
    Large,
    #[serde(rename = "xxl")]
    ExtraLarge,
}

impl InstanceSize {
    /// Every valid size, in ascending order.
    pub const ALL: [Self; 4] = [Self::SPlus, Self::Medium, Self::Large, Self::ExtraLarge];

    /// The wire string for this size.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SPlus => "s+",
            Self::Medium => "m",
            Self::Large => "l",
            Self::ExtraLarge => "xxl",
        }
    }
}

impl fmt::Display for InstanceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceSize {
    type Err = InvalidAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s+" => Ok(Self::SPlus),
            "m" => Ok(Self::Medium),
            "l" => Ok(Self::Large),
            "xxl" => Ok(Self::ExtraLarge),
            other => Err(InvalidAttribute::new("size", other, "s+, m, l, xxl")),
        }
    }
}

/// The database engine provisioned alongside an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    Mysql,
    Pgsql,
}

impl DatabaseEngine {
    pub const ALL: [Self; 2] = [Self::Mysql, Self::Pgsql];

    /// The wire string for this engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Pgsql => "pgsql",
        }
    }
}

impl fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseEngine {
    type Err = InvalidAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mysql" => Ok(Self::Mysql),
            "pgsql" => Ok(Self::Pgsql),
            other => Err(InvalidAttribute::new("database_engine", other, "mysql, pgsql")),
        }
    }
}

/// The runtime language of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Php,
    Python,
    Nodejs,
    Ruby,
}

impl Language {
    pub const ALL: [Self; 4] = [Self::Php, Self::Python, Self::Nodejs, Self::Ruby];

    /// The wire string for this language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Php => "php",
            Self::Python => "python",
            Self::Nodejs => "nodejs",
            Self::Ruby => "ruby",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = InvalidAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "php" => Ok(Self::Php),
            "python" => Ok(Self::Python),
            "nodejs" => Ok(Self::Nodejs),
            "ruby" => Ok(Self::Ruby),
            other => Err(InvalidAttribute::new(
                "language",
                other,
                "php, python, nodejs, ruby",
            )),
        }
    }
}

/// The datacenter region an instance is provisioned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    FR,
    LU,
}

impl Location {
    pub const ALL: [Self; 2] = [Self::FR, Self::LU];

    /// The wire string for this region.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FR => "FR",
            Self::LU => "LU",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = InvalidAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FR" => Ok(Self::FR),
            "LU" => Ok(Self::LU),
            other => Err(InvalidAttribute::new("location", other, "FR, LU")),
        }
    }
}
