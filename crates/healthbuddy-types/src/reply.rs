//! Reply resolution result types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which path produced a bot reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// The remote text-generation service answered.
    Remote,
    /// The local keyword matcher answered (remote unavailable).
    Local,
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplySource::Remote => write!(f, "remote"),
            ReplySource::Local => write!(f, "local"),
        }
    }
}

impl FromStr for ReplySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(ReplySource::Remote),
            "local" => Ok(ReplySource::Local),
            other => Err(format!("invalid reply source: '{other}'")),
        }
    }
}

/// A fully resolved, localized bot reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReply {
    pub text: String,
    pub source: ReplySource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_source_roundtrip() {
        for source in [ReplySource::Remote, ReplySource::Local] {
            let s = source.to_string();
            let parsed: ReplySource = s.parse().unwrap();
            assert_eq!(source, parsed);
        }
    }

    #[test]
    fn test_reply_source_serde() {
        let json = serde_json::to_string(&ReplySource::Local).unwrap();
        assert_eq!(json, "\"local\"");
    }
}
