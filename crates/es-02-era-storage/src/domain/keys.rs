//! Key layout
//!
//! Every era number is encoded big-endian so that lexicographic key order
//! equals numeric era order.

use shared_types::{AccountId, EraIndex};

const SEPARATOR: u8 = b':';

/// Key namespaces of the era store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Era metadata: `era:{era}` -> EraRow
    Era,
    /// Validator rows: `val:{era}:{validator}` -> ValidatorRow
    Validator,
    /// Voter rows: `vot:{era}:{validator}:{n}` -> VoterRow
    Voter,
    /// Store metadata: `meta:{name}`
    Meta,
    /// History gaps: `gap:{from}` -> EraGap
    Gap,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Era => b"era:",
            KeyPrefix::Validator => b"val:",
            KeyPrefix::Voter => b"vot:",
            KeyPrefix::Meta => b"meta:",
            KeyPrefix::Gap => b"gap:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    pub fn era_key(era: EraIndex) -> Vec<u8> {
        KeyPrefix::Era.key(&era.to_be_bytes())
    }

    /// Prefix shared by every validator row of `era`.
    pub fn validator_prefix(era: EraIndex) -> Vec<u8> {
        let mut key = KeyPrefix::Validator.key(&era.to_be_bytes());
        key.push(SEPARATOR);
        key
    }

    pub fn validator_key(era: EraIndex, validator: &AccountId) -> Vec<u8> {
        let mut key = Self::validator_prefix(era);
        key.extend_from_slice(validator.as_str().as_bytes());
        key
    }

    /// Prefix shared by every voter row of `era`.
    pub fn voter_prefix(era: EraIndex) -> Vec<u8> {
        let mut key = KeyPrefix::Voter.key(&era.to_be_bytes());
        key.push(SEPARATOR);
        key
    }

    pub fn voter_key(era: EraIndex, validator: &AccountId, n: u32) -> Vec<u8> {
        let mut key = Self::voter_prefix(era);
        key.extend_from_slice(validator.as_str().as_bytes());
        key.push(SEPARATOR);
        key.extend_from_slice(&n.to_be_bytes());
        key
    }

    pub fn last_era_key() -> Vec<u8> {
        KeyPrefix::Meta.key(b"last_era")
    }

    pub fn gap_key(from: EraIndex) -> Vec<u8> {
        KeyPrefix::Gap.key(&from.to_be_bytes())
    }

    /// Recover the era number from an `era:` key.
    pub fn parse_era_key(key: &[u8]) -> Option<EraIndex> {
        let suffix = key.strip_prefix(KeyPrefix::Era.as_bytes())?;
        decode_era(suffix)
    }
}

/// Decode a big-endian era number.
pub fn decode_era(bytes: &[u8]) -> Option<EraIndex> {
    let raw: [u8; 4] = bytes.try_into().ok()?;
    Some(EraIndex::from_be_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_keys_sort_numerically() {
        let mut keys = vec![
            KeyPrefix::era_key(256),
            KeyPrefix::era_key(9),
            KeyPrefix::era_key(10),
        ];
        keys.sort();
        let eras: Vec<_> = keys
            .iter()
            .filter_map(|k| KeyPrefix::parse_era_key(k))
            .collect();
        assert_eq!(eras, vec![9, 10, 256]);
    }

    #[test]
    fn test_validator_key_under_era_prefix() {
        let v = AccountId::from("Validator1");
        assert!(KeyPrefix::validator_key(7, &v).starts_with(&KeyPrefix::validator_prefix(7)));
        assert!(!KeyPrefix::validator_key(7, &v).starts_with(&KeyPrefix::validator_prefix(8)));
    }

    #[test]
    fn test_voter_keys_ordered_by_position() {
        let v = AccountId::from("V");
        assert!(KeyPrefix::voter_key(1, &v, 2) < KeyPrefix::voter_key(1, &v, 10));
    }

    #[test]
    fn test_parse_rejects_foreign_keys() {
        assert_eq!(KeyPrefix::parse_era_key(&KeyPrefix::gap_key(3)), None);
        assert_eq!(KeyPrefix::parse_era_key(b"era:xy"), None);
    }
}
