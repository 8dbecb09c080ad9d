//! # Protocol Configuration & Constants
//!
//! Every magic number the codec depends on lives here. If you're hardcoding
//! a header offset somewhere else, you're doing it wrong and you owe the team
//! coffee.
//!
//! These values are fixed by the ledger's wire format. They are not tunables:
//! change one and every hash this crate produces stops matching every other
//! implementation on the planet.

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 private key length in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// SHA3-256 digest length.
pub const HASH_SIZE: usize = 32;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Decoded address length: network byte + RIPEMD-160 + 3-byte checksum.
pub const ADDRESS_SIZE: usize = 24;

/// Base32 encoded address length (no padding).
pub const ADDRESS_ENCODED_SIZE: usize = 39;

/// Trailing checksum bytes carried in every address.
pub const ADDRESS_CHECKSUM_SIZE: usize = 3;

// ---------------------------------------------------------------------------
// Transaction Layout
// ---------------------------------------------------------------------------

/// Bytes preceding the signed portion of a top-level transaction:
/// size, reserved, signature, signer public key, reserved.
pub const TRANSACTION_HEADER_SIZE: usize = 4 + 4 + SIGNATURE_SIZE + PUBLIC_KEY_SIZE + 4;

/// Bytes of an aggregate covered by its signature: version/network/type,
/// max fee, deadline and the inner transactions hash.
pub const AGGREGATE_HASHED_SIZE: usize = 4 + 8 + 8 + HASH_SIZE;

/// Full fixed header of a top-level transaction, fee and deadline included.
pub const TRANSACTION_FULL_HEADER_SIZE: usize = TRANSACTION_HEADER_SIZE + 4 + 8 + 8;

/// Fixed header of an embedded transaction.
pub const EMBEDDED_TRANSACTION_HEADER_SIZE: usize = 4 + 4 + PUBLIC_KEY_SIZE + 4 + 4;

/// Embedded transactions inside an aggregate are padded to this boundary.
pub const EMBEDDED_TRANSACTION_ALIGNMENT: usize = 8;

/// Serialized size of an attached cosignature.
pub const COSIGNATURE_SIZE: usize = 8 + PUBLIC_KEY_SIZE + SIGNATURE_SIZE;

/// Serialized size of a detached cosignature (cosignature + parent hash).
pub const DETACHED_COSIGNATURE_SIZE: usize = COSIGNATURE_SIZE + HASH_SIZE;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// Mainnet identifier byte. Addresses start with `N`.
pub const MAINNET_IDENTIFIER: u8 = 0x68;

/// Testnet identifier byte. Addresses start with `T`.
pub const TESTNET_IDENTIFIER: u8 = 0x98;

/// Mainnet generation hash seed.
pub const MAINNET_GENERATION_HASH_SEED: [u8; HASH_SIZE] = [
    0x57, 0xF7, 0xDA, 0x20, 0x50, 0x08, 0x02, 0x6C, 0x77, 0x6C, 0xB6, 0xAE, 0xD8, 0x43, 0x39, 0x3F,
    0x04, 0xCD, 0x45, 0x8E, 0x0A, 0xA2, 0xD9, 0xF1, 0xD5, 0xF3, 0x1A, 0x40, 0x20, 0x72, 0xB2, 0xD6,
];

/// Testnet generation hash seed.
pub const TESTNET_GENERATION_HASH_SEED: [u8; HASH_SIZE] = [
    0x49, 0xD6, 0xE1, 0xCE, 0x27, 0x6A, 0x85, 0xB7, 0x0E, 0xAF, 0xE5, 0x23, 0x49, 0xAA, 0xCC, 0xA3,
    0x89, 0x30, 0x2E, 0x7A, 0x97, 0x54, 0xBC, 0xF1, 0x22, 0x1E, 0x79, 0x49, 0x4F, 0xC6, 0x65, 0xA4,
];

/// Mainnet nemesis time, unix seconds (2021-03-16T00:06:25Z).
pub const MAINNET_EPOCH_SECONDS: i64 = 1_615_853_185;

/// Testnet nemesis time, unix seconds (2022-10-31T21:07:47Z).
pub const TESTNET_EPOCH_SECONDS: i64 = 1_667_250_467;

/// BIP-44 coin type registered for mainnet. Every other network uses 1.
pub const MAINNET_BIP32_COIN_TYPE: u32 = 4343;

// ---------------------------------------------------------------------------
// Artifact Ids
// ---------------------------------------------------------------------------

/// Top bit of a 64-bit artifact id. Set for namespaces, clear for mosaics.
pub const NAMESPACE_FLAG: u64 = 1 << 63;
