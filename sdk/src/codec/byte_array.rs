//! Fixed-size byte values.
//!
//! Every fixed-length binary value on the wire (hashes, keys, signatures,
//! unresolved addresses) is a distinct newtype over `[u8; N]`, so you cannot
//! hand a `Hash256` to something that wants a `PublicKey` even though both
//! are 32 bytes. They print as upper-case hex and parse from hex in either
//! case.

use super::{ensure_remaining, Codec, CodecError};
use ::bytes::{Buf, BufMut};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Decodes a hex string into exactly `N` bytes.
pub(crate) fn decode_hex_exact<const N: usize>(
    what: &'static str,
    s: &str,
) -> Result<[u8; N], CodecError> {
    let bytes = hex::decode(s).map_err(|e| CodecError::InvalidHex(format!("{s}: {e}")))?;
    to_array(what, &bytes)
}

/// Copies a slice into an `N`-byte array, rejecting any other length.
pub(crate) fn to_array<const N: usize>(what: &'static str, bytes: &[u8]) -> Result<[u8; N], CodecError> {
    <[u8; N]>::try_from(bytes).map_err(|_| CodecError::SizeMismatch {
        what,
        expected: N,
        actual: bytes.len(),
    })
}

macro_rules! byte_array {
    ($(#[$meta:meta])* $name:ident, $size:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; $size]);

        impl $name {
            /// Byte length.
            pub const SIZE: usize = $size;

            /// Wraps raw bytes.
            pub const fn new(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }

            /// All-zero value.
            pub const fn zero() -> Self {
                Self([0u8; $size])
            }

            /// Borrow the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }

            /// Copy from a slice of exactly `SIZE` bytes.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
                to_array(stringify!($name), bytes).map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl From<[u8; $size]> for $name {
            fn from(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = CodecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                decode_hex_exact(stringify!($name), s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode_upper(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }

        impl Codec for $name {
            fn size(&self) -> usize {
                $size
            }

            fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
                writer.put_slice(&self.0);
                Ok(())
            }

            fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
                ensure_remaining(reader, $size)?;
                let mut bytes = [0u8; $size];
                reader.copy_to_slice(&mut bytes);
                Ok(Self(bytes))
            }
        }
    };
}

byte_array!(
    /// A SHA3-256 digest: transaction hashes, Merkle roots, secrets.
    Hash256,
    32
);

byte_array!(
    /// An Ed25519 public key as it appears on the wire.
    PublicKey,
    32
);

byte_array!(
    /// A voting (finalization) public key.
    VotingPublicKey,
    32
);

byte_array!(
    /// An Ed25519 signature.
    Signature,
    64
);

byte_array!(
    /// An address or an alias-encoded namespace, as carried in a transaction
    /// body before the ledger resolves it.
    UnresolvedAddress,
    24
);
