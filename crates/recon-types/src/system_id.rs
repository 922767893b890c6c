//! IS-IS system identifiers and routing levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseError;

/// IS-IS system identifier (6 octets, dotted-hex notation).
///
/// Rendered as three groups of four lowercase hex digits, e.g.
/// `1921.6800.1001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SystemId(pub [u8; 6]);

impl SystemId {
    /// Parse from dotted-hex notation (e.g. "1921.6800.1001").
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidSystemId(s.to_string()));
        }
        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            if part.len() != 4 {
                return Err(ParseError::InvalidSystemId(s.to_string()));
            }
            let group = u16::from_str_radix(part, 16)
                .map_err(|_| ParseError::InvalidSystemId(s.to_string()))?;
            bytes[i * 2] = (group >> 8) as u8;
            bytes[i * 2 + 1] = (group & 0xff) as u8;
        }
        Ok(Self(bytes))
    }

    /// Extract the system ID from an LSP ID.
    ///
    /// LSP IDs have the form `<system-id>.<pseudonode>-<fragment>`, e.g.
    /// `1921.6800.1001.00-00`. The trailing pseudonode/fragment octets are
    /// not part of the system identity.
    pub fn from_lsp_id(lsp_id: &str) -> Result<Self, ParseError> {
        let (sys, tail) = lsp_id
            .rsplit_once('.')
            .ok_or_else(|| ParseError::InvalidLspId(lsp_id.to_string()))?;
        // Tail must look like "NN-NN" (pseudonode-fragment)
        let valid_tail = tail.len() == 5
            && tail.as_bytes()[2] == b'-'
            && tail
                .chars()
                .enumerate()
                .all(|(i, c)| i == 2 || c.is_ascii_hexdigit());
        if !valid_tail {
            return Err(ParseError::InvalidLspId(lsp_id.to_string()));
        }
        Self::parse(sys).map_err(|_| ParseError::InvalidLspId(lsp_id.to_string()))
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}{:02x}.{:02x}{:02x}.{:02x}{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for SystemId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SystemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SystemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// IS-IS routing level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IsisLevel {
    /// Level 1 (intra-area).
    #[serde(rename = "1")]
    L1,
    /// Level 2 (inter-area backbone).
    #[serde(rename = "2")]
    L2,
}

impl IsisLevel {
    /// Parse from the numeric level key used in link-state documents.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        match s {
            "1" => Ok(Self::L1),
            "2" => Ok(Self::L2),
            other => Err(ParseError::InvalidLevel(other.to_string())),
        }
    }

    /// Numeric level value.
    pub fn as_num(&self) -> u8 {
        match self {
            Self::L1 => 1,
            Self::L2 => 2,
        }
    }
}

impl fmt::Display for IsisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.as_num())
    }
}
