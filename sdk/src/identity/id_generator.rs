//! # Artifact Id Generation
//!
//! Mosaic and namespace ids are content addressed: a pure function of who
//! created them and what they are called. No counters, no randomness, so
//! any client can compute an id before the ledger ever sees it.
//!
//! ```text
//! mosaic id    = u64_le(SHA3-256(nonce_le32 ‖ owner_address)[..8]) & !(1 << 63)
//! namespace id = u64_le(SHA3-256(parent_le64 ‖ utf8(name))[..8])    |  (1 << 63)
//! ```
//!
//! The top bit is the only thing that tells the two id spaces apart.
//! Consumers branch on it, so it is forced, never left to chance.

use crate::config::NAMESPACE_FLAG;
use crate::crypto::sha3_256_multi;
use crate::models::{MosaicId, MosaicNonce, NamespaceId, UnresolvedMosaicId};
use crate::network::Address;
use thiserror::Error;

/// Errors raised by namespace path parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// A part of a dotted namespace name is empty or has a bad character.
    #[error("invalid namespace name {0}")]
    InvalidNamespaceName(String),
}

/// Mosaic id for `owner`'s mosaic with `nonce`.
pub fn generate_mosaic_id(owner: &Address, nonce: MosaicNonce) -> MosaicId {
    let hash = sha3_256_multi(&[&nonce.value().to_le_bytes()[..], &owner.as_bytes()[..]]);
    MosaicId(first_u64(hash.as_bytes()) & !NAMESPACE_FLAG)
}

/// Namespace id for `name` under `parent_id` (zero for a root namespace).
pub fn generate_namespace_id(name: &str, parent_id: NamespaceId) -> NamespaceId {
    let hash = sha3_256_multi(&[&parent_id.value().to_le_bytes()[..], name.as_bytes()]);
    NamespaceId(first_u64(hash.as_bytes()) | NAMESPACE_FLAG)
}

/// `true` if `name` is a legal single namespace part: a lowercase letter or
/// digit, followed by lowercase letters, digits, `_` or `-`.
pub fn is_valid_namespace_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_alphanumeric(first) && chars.all(|c| is_alphanumeric(c) || c == '_' || c == '-')
}

/// Ids of every level of a dotted name, root first.
pub fn generate_namespace_path(fully_qualified_name: &str) -> Result<Vec<NamespaceId>, IdError> {
    let mut path = Vec::new();
    let mut parent_id = NamespaceId(0);
    for name in fully_qualified_name.split('.') {
        if !is_valid_namespace_name(name) {
            return Err(IdError::InvalidNamespaceName(fully_qualified_name.to_string()));
        }

        parent_id = generate_namespace_id(name, parent_id);
        path.push(parent_id);
    }
    Ok(path)
}

/// The mosaic alias id a dotted name resolves to: its leaf namespace id.
pub fn generate_mosaic_alias_id(fully_qualified_name: &str) -> Result<UnresolvedMosaicId, IdError> {
    let path = generate_namespace_path(fully_qualified_name)?;
    path.last()
        .map(|id| UnresolvedMosaicId::from(*id))
        .ok_or_else(|| IdError::InvalidNamespaceName(fully_qualified_name.to_string()))
}

fn is_alphanumeric(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

fn first_u64(bytes: &[u8; 32]) -> u64 {
    let mut head = [0u8; 8];
    head.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn address(encoded: &str) -> Address {
        encoded.parse().unwrap()
    }

    #[test]
    fn mosaic_id_known_vector() {
        let owner = address("TATNE7Q5BITMUTRRN6IB4I7FLSDRDWZA37JGO5Q");
        assert_eq!(generate_mosaic_id(&owner, MosaicNonce(812_613_930)), MosaicId(0x570F_B3ED_9379_624C));
    }

    #[test]
    fn mosaic_id_for_sdk_signer() {
        let owner = address("TD4WXUXYAPPB5Y42VT6FHISG6T32I2IBUXIKKPQ");
        assert_eq!(generate_mosaic_id(&owner, MosaicNonce(123)), MosaicId(0x1A21_F143_2396_216F));
    }

    #[test]
    fn namespace_id_known_vectors() {
        let symbol = generate_namespace_id("symbol", NamespaceId(0));
        assert_eq!(symbol, NamespaceId(0xA95F_1F8A_9615_9516));
        assert_eq!(generate_namespace_id("xym", symbol), NamespaceId(0xE74B_99BA_41F4_AFEE));
    }

    #[test]
    fn namespace_path_folds_parents() {
        let path = generate_namespace_path("foo.bar.baz").unwrap();
        assert_eq!(
            path,
            vec![
                NamespaceId(0x82A9_D1AC_587E_C054),
                NamespaceId(0xEC67_3E10_5521_B12F),
                NamespaceId(0xD747_F3A2_987A_9B64),
            ]
        );

        let foo = generate_namespace_id("foo", NamespaceId(0));
        let bar = generate_namespace_id("bar", foo);
        assert_eq!(path, vec![foo, bar, generate_namespace_id("baz", bar)]);
    }

    #[test]
    fn mosaic_alias_is_leaf_of_path() {
        assert_eq!(
            generate_mosaic_alias_id("roger.charlie").unwrap(),
            UnresolvedMosaicId(0xC246_A260_EF35_79FB)
        );
        assert_eq!(
            generate_mosaic_alias_id("symbol.xym").unwrap(),
            UnresolvedMosaicId(0xE74B_99BA_41F4_AFEE)
        );
    }

    #[test]
    fn namespace_name_rules() {
        for valid in ["a", "0", "symbol", "a-b_c", "xym9", "0abc"] {
            assert!(is_valid_namespace_name(valid), "{valid}");
        }
        for invalid in ["", "-a", "_a", "Abc", "a.b", "a b", "a!", "ñ"] {
            assert!(!is_valid_namespace_name(invalid), "{invalid}");
        }
    }

    #[test]
    fn malformed_paths_name_the_full_input() {
        for fqn in ["", ".foo", "foo.", "foo..bar", "foo.Bar", "foo.-bar"] {
            assert_eq!(
                generate_namespace_path(fqn).unwrap_err(),
                IdError::InvalidNamespaceName(fqn.to_string())
            );
        }
        assert_eq!(
            generate_mosaic_alias_id("a..b").unwrap_err().to_string(),
            "invalid namespace name a..b"
        );
    }

    proptest! {
        #[test]
        fn mosaic_ids_never_have_top_bit(bytes in any::<[u8; 24]>(), nonce in any::<u32>()) {
            let id = generate_mosaic_id(&Address::new(bytes), MosaicNonce(nonce));
            prop_assert_eq!(id.value() & NAMESPACE_FLAG, 0);
        }

        #[test]
        fn namespace_ids_always_have_top_bit(name in "[a-z0-9][a-z0-9_-]{0,63}", parent in any::<u64>()) {
            let id = generate_namespace_id(&name, NamespaceId(parent));
            prop_assert_eq!(id.value() & NAMESPACE_FLAG, NAMESPACE_FLAG);
        }

        #[test]
        fn generated_names_are_valid(name in "[a-z0-9][a-z0-9_-]{0,63}") {
            prop_assert!(is_valid_namespace_name(&name));
        }

        #[test]
        fn names_with_uppercase_are_invalid(prefix in "[a-z]{0,8}", upper in "[A-Z]", suffix in "[a-z]{0,8}") {
            let name = format!("{prefix}{upper}{suffix}");
            prop_assert!(!is_valid_namespace_name(&name));
        }
    }
}
