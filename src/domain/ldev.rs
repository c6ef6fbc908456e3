//! LDEV Identifiers
//!
//! An LDEV is addressed by a control-unit/index pair, written `CU:IDX`
//! with both segments as zero-padded uppercase hex (e.g. `15:6C`).
//! This module provides the identifier type and the range expansion used
//! to turn a declared block span into its member identifiers.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// LDEV Identifier
// =============================================================================

/// A control-unit/index pair addressing one LDEV on the array
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LdevId {
    /// Control unit, the grouping prefix shared by a contiguous range
    pub cu: u8,
    /// Index within the control unit
    pub index: u8,
}

impl LdevId {
    pub fn new(cu: u8, index: u8) -> Self {
        Self { cu, index }
    }

    /// Parse the packed 4-hex-digit form emitted by the inquiry tool
    /// (e.g. `"156C"` -> `15:6C`).
    pub fn from_packed(token: &str) -> Result<Self> {
        if token.len() != 4 || !token.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidLdevId(token.to_string()));
        }
        let cu = u8::from_str_radix(&token[..2], 16)
            .map_err(|_| Error::InvalidLdevId(token.to_string()))?;
        let index = u8::from_str_radix(&token[2..], 16)
            .map_err(|_| Error::InvalidLdevId(token.to_string()))?;
        Ok(Self { cu, index })
    }
}

impl fmt::Display for LdevId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}:{:02X}", self.cu, self.index)
    }
}

impl FromStr for LdevId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(':');
        let (cu, index) = match (parts.next(), parts.next(), parts.next()) {
            (Some(cu), Some(index), None) => (cu, index),
            _ => return Err(Error::InvalidLdevId(s.to_string())),
        };
        let parse_segment = |seg: &str| -> Result<u8> {
            if seg.is_empty() || seg.len() > 2 {
                return Err(Error::InvalidLdevId(s.to_string()));
            }
            u8::from_str_radix(seg, 16).map_err(|_| Error::InvalidLdevId(s.to_string()))
        };
        Ok(Self {
            cu: parse_segment(cu)?,
            index: parse_segment(index)?,
        })
    }
}

impl TryFrom<String> for LdevId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<LdevId> for String {
    fn from(id: LdevId) -> String {
        id.to_string()
    }
}

// =============================================================================
// Range Expansion
// =============================================================================

/// Expand a `begin..end` identifier pair into the ordered, inclusive
/// sequence of member identifiers.
///
/// Both endpoints must share the same control unit and `end` must not
/// precede `begin`.
pub fn expand_range(begin: &str, end: &str) -> Result<Vec<LdevId>> {
    let first: LdevId = begin.parse()?;
    let last: LdevId = end.parse()?;

    if first.cu != last.cu {
        return Err(Error::InvalidRange {
            begin: begin.to_string(),
            end: end.to_string(),
            reason: "control units differ".into(),
        });
    }
    if last.index < first.index {
        return Err(Error::InvalidRange {
            begin: begin.to_string(),
            end: end.to_string(),
            reason: "end index precedes begin index".into(),
        });
    }

    Ok((first.index..=last.index)
        .map(|index| LdevId::new(first.cu, index))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_display_zero_padded_uppercase() {
        assert_eq!(LdevId::new(0x15, 0x6c).to_string(), "15:6C");
        assert_eq!(LdevId::new(0x01, 0x0a).to_string(), "01:0A");
    }

    #[test]
    fn test_parse_roundtrip() {
        let id: LdevId = "15:6F".parse().unwrap();
        assert_eq!(id, LdevId::new(0x15, 0x6f));
        // Lowercase and unpadded inputs normalize to canonical form
        let id: LdevId = "15:6".parse().unwrap();
        assert_eq!(id.to_string(), "15:06");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_matches!("15".parse::<LdevId>(), Err(Error::InvalidLdevId(_)));
        assert_matches!("15:6F:00".parse::<LdevId>(), Err(Error::InvalidLdevId(_)));
        assert_matches!("15:GG".parse::<LdevId>(), Err(Error::InvalidLdevId(_)));
        assert_matches!("150:6F".parse::<LdevId>(), Err(Error::InvalidLdevId(_)));
        assert_matches!(":6F".parse::<LdevId>(), Err(Error::InvalidLdevId(_)));
    }

    #[test]
    fn test_from_packed() {
        assert_eq!(LdevId::from_packed("156C").unwrap().to_string(), "15:6C");
        assert_matches!(LdevId::from_packed("15:6C"), Err(Error::InvalidLdevId(_)));
        assert_matches!(LdevId::from_packed("15"), Err(Error::InvalidLdevId(_)));
    }

    #[test]
    fn test_expand_range_sixteen_ids() {
        let ids = expand_range("15:60", "15:6F").unwrap();
        assert_eq!(ids.len(), 16);
        assert_eq!(ids[0].to_string(), "15:60");
        assert_eq!(ids[15].to_string(), "15:6F");
        // Strictly ascending
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_expand_range_single_ldev() {
        let ids = expand_range("00:0A", "00:0A").unwrap();
        assert_eq!(ids, vec![LdevId::new(0x00, 0x0a)]);
    }

    #[test]
    fn test_expand_range_rejects_cu_mismatch() {
        assert_matches!(
            expand_range("15:60", "16:6F"),
            Err(Error::InvalidRange { reason, .. }) if reason.contains("control units")
        );
    }

    #[test]
    fn test_expand_range_rejects_inverted() {
        assert_matches!(
            expand_range("15:6F", "15:60"),
            Err(Error::InvalidRange { reason, .. }) if reason.contains("precedes")
        );
    }
}
