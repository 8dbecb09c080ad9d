//! # Key Management
//!
//! Ed25519 key pairs for signing transactions and cosignatures.
//!
//! The ledger uses plain RFC 8032 Ed25519 (SHA-512 inside), which is exactly
//! what `ed25519-dalek` implements, so there is no custom curve arithmetic
//! anywhere in this crate. Keep it that way.
//!
//! ## Security considerations
//!
//! - Private keys are zeroized on drop (thanks, ed25519-dalek).
//! - We use OS-level RNG (`OsRng`) for key generation.
//! - Key bytes are never logged. If you add logging to this module,
//!   you will be asked to leave.

use crate::codec::byte_array::decode_hex_exact;
use crate::codec::{PublicKey, Signature};
use crate::config::PRIVATE_KEY_SIZE;
use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier as _, VerifyingKey,
};
use rand::rngs::OsRng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during key operations.
///
/// These are intentionally vague about *why* something failed. Leaking
/// details about key material through error messages is a classic footgun.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid private key: expected 32 bytes of hex")]
    InvalidPrivateKey,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// Raw 32-byte Ed25519 secret.
///
/// Deliberately not `Copy`, not `Serialize`, and its `Debug` output never
/// shows the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey([u8; PRIVATE_KEY_SIZE]);

impl PrivateKey {
    /// Wrap raw secret bytes.
    pub fn new(bytes: [u8; PRIVATE_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Fresh key from the OS cryptographic RNG.
    pub fn random() -> Self {
        Self(SigningKey::generate(&mut OsRng).to_bytes())
    }

    /// Raw secret bytes. Handle with extreme care.
    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        &self.0
    }
}

impl FromStr for PrivateKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex_exact::<PRIVATE_KEY_SIZE>("PrivateKey", s)
            .map(Self)
            .map_err(|_| KeyError::InvalidPrivateKey)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// An Ed25519 key pair.
///
/// # Examples
///
/// ```
/// use symbol_sdk::crypto::KeyPair;
///
/// let key_pair = KeyPair::generate();
/// let signature = key_pair.sign(b"announce me");
/// assert!(key_pair.verifier().verify(b"announce me", &signature));
/// ```
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Build a key pair from its private key. The public key is re-derived.
    pub fn new(private_key: &PrivateKey) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(private_key.as_bytes()),
        }
    }

    /// Generate a fresh key pair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Reconstruct a key pair from a hex-encoded private key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        Ok(Self::new(&hex_str.parse()?))
    }

    /// The public key in wire form.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::new(self.signing_key.verifying_key().to_bytes())
    }

    /// The private key. Don't log it. Don't send it anywhere.
    pub fn private_key(&self) -> PrivateKey {
        PrivateKey(self.signing_key.to_bytes())
    }

    /// Sign `message`. Ed25519 is deterministic, so the same (key, message)
    /// pair always produces the same signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::new(self.signing_key.sign(message).to_bytes())
    }

    /// A verifier for this key pair's public key.
    pub fn verifier(&self) -> Verifier {
        Verifier {
            verifying_key: self.signing_key.verifying_key(),
        }
    }
}

impl Clone for KeyPair {
    /// Cloning a key pair is allowed but should make you uncomfortable.
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(pub={})", self.public_key())
    }
}

// ---------------------------------------------------------------------------
// Verifier
// ---------------------------------------------------------------------------

/// Checks signatures against one public key.
#[derive(Clone, Debug)]
pub struct Verifier {
    verifying_key: VerifyingKey,
}

impl Verifier {
    /// Build a verifier. Fails only if `public_key` is not a curve point.
    pub fn new(public_key: &PublicKey) -> Result<Self, KeyError> {
        let verifying_key =
            VerifyingKey::from_bytes(public_key.as_bytes()).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { verifying_key })
    }

    /// `true` if `signature` is valid for `message`.
    ///
    /// A bad signature is a normal outcome, not an error.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let signature = DalekSignature::from_bytes(signature.as_bytes());
        self.verifying_key.verify(message, &signature).is_ok()
    }
}
