//! # Addresses
//!
//! An address is 24 bytes: the network identifier byte, the RIPEMD-160 of
//! the SHA3-256 of the account public key, and a 3-byte checksum. It is
//! shown to humans as 39 characters of unpadded RFC 4648 base32:
//!
//! ```text
//! public_key (32 bytes)
//!     -> SHA3-256 -> RIPEMD-160               (20 bytes)
//!     -> identifier ‖ ripemd                  (21 bytes)
//!     -> ‖ SHA3-256(identifier ‖ ripemd)[..3] (24 bytes)
//!     -> base32, no padding                   (39 chars)
//! ```
//!
//! 24 bytes is 192 bits, which is not a multiple of 5, so the final base32
//! character only carries 2 bits of data. Decoding appends one `A` (zero)
//! to get a 40 character, 25 byte block and drops the extra byte.

use crate::codec::{Codec, CodecError, PublicKey, UnresolvedAddress};
use crate::config::{ADDRESS_CHECKSUM_SIZE, ADDRESS_ENCODED_SIZE, ADDRESS_SIZE};
use crate::crypto::{ripemd160, sha3_256};
use ::bytes::{Buf, BufMut};
use data_encoding::{BASE32, BASE32_NOPAD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Encoded form must be exactly 39 characters.
    #[error("invalid address length {0}: expected 39 characters")]
    InvalidLength(usize),

    /// Not valid base32.
    #[error("invalid address encoding: {0}")]
    InvalidEncoding(String),

    /// Decoded form must be exactly 24 bytes.
    #[error("invalid address size {0}: expected 24 bytes")]
    InvalidSize(usize),
}

/// A decoded account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// Decoded byte length.
    pub const SIZE: usize = ADDRESS_SIZE;

    /// Encoded character length.
    pub const ENCODED_SIZE: usize = ADDRESS_ENCODED_SIZE;

    /// Wrap raw address bytes. No checksum validation happens here.
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copy from a slice of exactly 24 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        <[u8; ADDRESS_SIZE]>::try_from(bytes)
            .map(Self)
            .map_err(|_| AddressError::InvalidSize(bytes.len()))
    }

    /// Derive the address of `public_key` on the network with `identifier`.
    pub fn from_public_key(identifier: u8, public_key: &PublicKey) -> Self {
        let public_key_hash = sha3_256(public_key.as_bytes());
        let ripemd_hash = ripemd160(public_key_hash.as_bytes());

        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[0] = identifier;
        bytes[1..21].copy_from_slice(&ripemd_hash);

        let checksum = sha3_256(&bytes[..21]);
        bytes[21..].copy_from_slice(&checksum.as_bytes()[..ADDRESS_CHECKSUM_SIZE]);
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Network identifier byte.
    pub fn identifier(&self) -> u8 {
        self.0[0]
    }

    /// `true` if the trailing checksum matches the rest of the address.
    pub fn has_valid_checksum(&self) -> bool {
        let split = ADDRESS_SIZE - ADDRESS_CHECKSUM_SIZE;
        let checksum = sha3_256(&self.0[..split]);
        checksum.as_bytes()[..ADDRESS_CHECKSUM_SIZE] == self.0[split..]
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ADDRESS_ENCODED_SIZE {
            return Err(AddressError::InvalidLength(s.len()));
        }

        let padded = format!("{s}A");
        let decoded = BASE32
            .decode(padded.as_bytes())
            .map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;
        Self::from_slice(&decoded[..ADDRESS_SIZE.min(decoded.len())])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&BASE32_NOPAD.encode(&self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl From<Address> for UnresolvedAddress {
    fn from(address: Address) -> Self {
        UnresolvedAddress::new(address.0)
    }
}

impl From<UnresolvedAddress> for Address {
    fn from(address: UnresolvedAddress) -> Self {
        Address(*address.as_bytes())
    }
}

impl Codec for Address {
    fn size(&self) -> usize {
        ADDRESS_SIZE
    }

    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        writer.put_slice(&self.0);
        Ok(())
    }

    fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
        UnresolvedAddress::read(reader).map(Address::from)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
