//! # Transaction Facade
//!
//! The one place that knows how a serialized transaction becomes a hash and
//! a signature.
//!
//! ## Signing payload
//!
//! Everything before the version byte (size, reserved, signature, signer,
//! reserved) is excluded. What remains is the *data buffer*:
//!
//! ```text
//! ordinary:   bytes[108..]
//! aggregate:  bytes[108..160]   version, network, type, fee, deadline,
//!                               transactions_hash
//! ```
//!
//! Aggregates stop after `transactions_hash`. The inner transactions are
//! bound through that Merkle root, so they never enter the outer signature
//! directly. Get this wrong and nothing you sign will verify anywhere else.
//!
//! ```text
//! signature = Ed25519(generation_hash_seed ‖ data buffer)
//! hash      = SHA3-256(signature ‖ signer_public_key ‖ generation_hash_seed ‖ data buffer)
//! cosign    = Ed25519(hash)
//! ```
//!
//! ## Design Decisions
//!
//! - The facade never mutates what it is given. Signing returns a
//!   [`Signature`]; attaching it is
//!   [`TransactionFactory::attach_signature`]'s job.
//! - A bad signature is `Ok(false)`. Errors are reserved for inputs that
//!   can't be checked at all (a public key that is not a curve point).

pub mod account;

pub use account::{SymbolAccount, SymbolPublicAccount};

use crate::codec::{Codec, CodecError, Hash256, PublicKey, Signature};
use crate::config::{
    AGGREGATE_HASHED_SIZE, COSIGNATURE_SIZE, DETACHED_COSIGNATURE_SIZE, MAINNET_BIP32_COIN_TYPE,
    MAINNET_IDENTIFIER, TRANSACTION_HEADER_SIZE,
};
use crate::crypto::{sha3_256, sha3_256_multi, KeyError, KeyPair, MerkleHashBuilder, Verifier};
use crate::models::{Amount, Cosignature, DetachedCosignature, EmbeddedTransaction, Timestamp, Transaction};
use crate::network::{Network, NetworkError, NetworkTimestamp};
use crate::transaction::{Descriptor, FactoryError, TransactionFactory};
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised by the facade.
#[derive(Debug, Error)]
pub enum FacadeError {
    #[error(transparent)]
    Factory(#[from] FactoryError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The computed fee does not fit in 64 bits.
    #[error("fee overflow: size {size} with multiplier {multiplier}")]
    FeeOverflow { size: usize, multiplier: u64 },
}

/// A cosignature, either for the aggregate's own list or to travel alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CosignatureKind {
    Attached(Cosignature),
    /// Carries the hash of the aggregate it signs.
    Detached(DetachedCosignature),
}

impl CosignatureKind {
    /// The attachable part, without any parent hash.
    pub fn cosignature(&self) -> Cosignature {
        match self {
            CosignatureKind::Attached(cosignature) => *cosignature,
            CosignatureKind::Detached(detached) => detached.cosignature(),
        }
    }

    pub fn size(&self) -> usize {
        match self {
            CosignatureKind::Attached(_) => COSIGNATURE_SIZE,
            CosignatureKind::Detached(_) => DETACHED_COSIGNATURE_SIZE,
        }
    }
}

/// Hashing, signing and verification bound to one network.
#[derive(Debug, Clone)]
pub struct SymbolFacade {
    network: Network,
    transaction_factory: TransactionFactory,
}

impl SymbolFacade {
    pub fn new(network: Network) -> Result<Self, FacadeError> {
        let transaction_factory = TransactionFactory::new(network.clone())?;
        Ok(Self {
            network,
            transaction_factory,
        })
    }

    /// Facade for a preset network (`mainnet` or `testnet`).
    pub fn from_network_name(name: &str) -> Result<Self, FacadeError> {
        Self::new(Network::find_by_name(name)?)
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn transaction_factory(&self) -> &TransactionFactory {
        &self.transaction_factory
    }

    /// Current time on this network's clock.
    pub fn now(&self) -> Result<NetworkTimestamp, FacadeError> {
        Ok(self.network.from_datetime(Utc::now())?)
    }

    /// BIP32 derivation path for `account_id`.
    pub fn bip32_path(&self, account_id: u32) -> [u32; 5] {
        let coin_type = if self.network.identifier() == MAINNET_IDENTIFIER {
            MAINNET_BIP32_COIN_TYPE
        } else {
            1
        };
        [44, coin_type, account_id, 0, 0]
    }

    pub fn create_public_account(&self, public_key: PublicKey) -> SymbolPublicAccount {
        SymbolPublicAccount::new(&self.network, public_key)
    }

    pub fn create_account(&self, key_pair: KeyPair) -> SymbolAccount<'_> {
        SymbolAccount::new(self, key_pair)
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    /// Builds a top-level transaction from `descriptor` with its signer,
    /// deadline and fee filled in.
    ///
    /// The fee covers the transaction plus room for `cosignature_count`
    /// cosignatures, less any the descriptor already carries:
    /// `fee = (size + reserved * 104) * fee_multiplier`.
    pub fn create_transaction_from_descriptor(
        &self,
        descriptor: &Descriptor,
        signer_public_key: &PublicKey,
        fee_multiplier: u64,
        deadline_seconds: u64,
        cosignature_count: usize,
    ) -> Result<Transaction, FacadeError> {
        let deadline = self.now()?.add_seconds(deadline_seconds);
        let descriptor = descriptor
            .clone()
            .with("signer_public_key", *signer_public_key)
            .with("deadline", Timestamp(deadline.timestamp()));
        let mut transaction = self.transaction_factory.create(&descriptor, true)?;

        let present = transaction.body.aggregate().map_or(0, |aggregate| aggregate.cosignatures.len());
        let reserved = cosignature_count.saturating_sub(present);
        let size = transaction.size() + reserved * COSIGNATURE_SIZE;
        let fee = u64::try_from(size)
            .ok()
            .and_then(|size| size.checked_mul(fee_multiplier))
            .ok_or(FacadeError::FeeOverflow {
                size,
                multiplier: fee_multiplier,
            })?;
        transaction.fee = Amount(fee);

        debug!(size, reserved, fee, "created transaction from descriptor");
        Ok(transaction)
    }

    /// Builds an inner transaction from `descriptor` with its signer filled in.
    pub fn create_embedded_transaction_from_descriptor(
        &self,
        descriptor: &Descriptor,
        signer_public_key: &PublicKey,
    ) -> Result<EmbeddedTransaction, FacadeError> {
        let descriptor = descriptor.clone().with("signer_public_key", *signer_public_key);
        Ok(self.transaction_factory.create_embedded(&descriptor, true)?)
    }

    // -----------------------------------------------------------------------
    // Hashing and signing
    // -----------------------------------------------------------------------

    /// The bytes a signer signs: generation hash seed, then the data buffer.
    pub fn extract_signing_payload(&self, transaction: &Transaction) -> Result<Vec<u8>, FacadeError> {
        let bytes = transaction.to_bytes()?;
        let data = data_buffer(transaction, &bytes)?;

        let mut payload = Vec::with_capacity(Hash256::SIZE + data.len());
        payload.extend_from_slice(self.network.generation_hash_seed().as_bytes());
        payload.extend_from_slice(data);
        Ok(payload)
    }

    /// The transaction's identity on this network.
    pub fn hash_transaction(&self, transaction: &Transaction) -> Result<Hash256, FacadeError> {
        let bytes = transaction.to_bytes()?;
        let data = data_buffer(transaction, &bytes)?;
        let hash = sha3_256_multi(&[
            &transaction.signature.as_bytes()[..],
            &transaction.signer_public_key.as_bytes()[..],
            &self.network.generation_hash_seed().as_bytes()[..],
            data,
        ]);
        trace!(%hash, "hashed transaction");
        Ok(hash)
    }

    pub fn sign_transaction(&self, key_pair: &KeyPair, transaction: &Transaction) -> Result<Signature, FacadeError> {
        let payload = self.extract_signing_payload(transaction)?;
        let signature = key_pair.sign(&payload);
        debug!(signer = %key_pair.public_key(), "signed transaction");
        Ok(signature)
    }

    /// `Ok(true)` if `signature` is the declared signer's signature over the
    /// transaction.
    pub fn verify_transaction(&self, transaction: &Transaction, signature: &Signature) -> Result<bool, FacadeError> {
        let verifier = Verifier::new(&transaction.signer_public_key)?;
        let payload = self.extract_signing_payload(transaction)?;
        let verified = verifier.verify(&payload, signature);
        debug!(signer = %transaction.signer_public_key, verified, "verified transaction");
        Ok(verified)
    }

    /// Cosigns an aggregate that already carries its signer's signature.
    pub fn cosign_transaction(
        &self,
        key_pair: &KeyPair,
        transaction: &Transaction,
        detached: bool,
    ) -> Result<CosignatureKind, FacadeError> {
        let transaction_hash = self.hash_transaction(transaction)?;
        Ok(Self::cosign_transaction_hash(key_pair, &transaction_hash, detached))
    }

    /// Cosigns an aggregate known only by its hash.
    pub fn cosign_transaction_hash(key_pair: &KeyPair, transaction_hash: &Hash256, detached: bool) -> CosignatureKind {
        let cosignature = Cosignature {
            version: 0,
            signer_public_key: key_pair.public_key(),
            signature: key_pair.sign(transaction_hash.as_bytes()),
        };
        debug!(cosigner = %cosignature.signer_public_key, parent = %transaction_hash, detached, "cosigned transaction");

        if detached {
            CosignatureKind::Detached(DetachedCosignature {
                version: cosignature.version,
                signer_public_key: cosignature.signer_public_key,
                signature: cosignature.signature,
                parent_hash: *transaction_hash,
            })
        } else {
            CosignatureKind::Attached(cosignature)
        }
    }

    /// Merkle root over the SHA3-256 of each serialized inner transaction,
    /// in order. Matches `transactions_hash` of an intact aggregate.
    pub fn hash_embedded_transactions(transactions: &[EmbeddedTransaction]) -> Result<Hash256, FacadeError> {
        let mut builder = MerkleHashBuilder::new();
        for transaction in transactions {
            builder.update(sha3_256(&transaction.to_bytes()?));
        }
        Ok(builder.final_hash())
    }
}

/// The signed and hashed part of a serialized transaction.
fn data_buffer<'a>(transaction: &Transaction, bytes: &'a [u8]) -> Result<&'a [u8], CodecError> {
    let end = if transaction.is_aggregate() {
        TRANSACTION_HEADER_SIZE + AGGREGATE_HASHED_SIZE
    } else {
        bytes.len()
    };
    bytes.get(TRANSACTION_HEADER_SIZE..end).ok_or(CodecError::UnexpectedEof {
        needed: end,
        remaining: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NetworkType, TransactionBody, TransferBody, UnresolvedMosaic};

    const PRIVATE_KEY: &str = "EDB671EB741BD676969D8A035271D1EE5E75DF33278083D877F23615EB839FEC";

    fn facade() -> SymbolFacade {
        SymbolFacade::from_network_name("testnet").unwrap()
    }

    fn transfer(signer_public_key: PublicKey) -> Transaction {
        Transaction {
            signature: Signature::zero(),
            signer_public_key,
            version: 1,
            network: NetworkType::Testnet,
            fee: Amount(1_000_000),
            deadline: Timestamp(41_998_024_783),
            body: TransactionBody::Transfer(TransferBody {
                recipient_address: "98F8F4AADD4BF6269C1CFD4654335D88AD3B44D3E74EC7C8".parse().unwrap(),
                mosaics: vec![UnresolvedMosaic::new(0x2CF4_03E8_5507_F39Eu64, 1_000_000u64)],
                message: Vec::new(),
            }),
        }
    }

    #[test]
    fn signs_and_hashes_known_transfer() {
        let facade = facade();
        let key_pair = KeyPair::from_hex(PRIVATE_KEY).unwrap();
        let mut transaction = transfer(key_pair.public_key());

        let signature = facade.sign_transaction(&key_pair, &transaction).unwrap();
        assert_eq!(
            signature.to_string(),
            "24A3788AFD0223083D47ED14F17A2499A7939CD62C4B3288C40CF2736B13F404\
             8486680DD574C9F7DB56F453464058CB22349ACBFAECAE16A31EF0725FFF6104"
        );

        transaction.signature = signature;
        assert_eq!(
            facade.hash_transaction(&transaction).unwrap().to_string(),
            "86E006F0D400A781A15D0293DFC15897078351A2F7731D49A865A63C2010DE44"
        );
    }

    #[test]
    fn signing_payload_is_seed_then_body() {
        let facade = facade();
        let transaction = transfer(KeyPair::from_hex(PRIVATE_KEY).unwrap().public_key());
        let payload = facade.extract_signing_payload(&transaction).unwrap();
        let bytes = transaction.to_bytes().unwrap();

        assert_eq!(&payload[..32], facade.network().generation_hash_seed().as_bytes());
        assert_eq!(&payload[32..], &bytes[TRANSACTION_HEADER_SIZE..]);
    }

    #[test]
    fn verification_is_boolean() {
        let facade = facade();
        let key_pair = KeyPair::from_hex(PRIVATE_KEY).unwrap();
        let transaction = transfer(key_pair.public_key());
        let signature = facade.sign_transaction(&key_pair, &transaction).unwrap();

        assert!(facade.verify_transaction(&transaction, &signature).unwrap());
        assert!(!facade.verify_transaction(&transaction, &Signature::new([7; 64])).unwrap());

        let other = transfer(KeyPair::generate().public_key());
        assert!(!facade.verify_transaction(&other, &signature).unwrap());
    }

    #[test]
    fn signatures_are_network_bound() {
        let key_pair = KeyPair::from_hex(PRIVATE_KEY).unwrap();
        let transaction = transfer(key_pair.public_key());
        let testnet = facade().sign_transaction(&key_pair, &transaction).unwrap();
        let mainnet = SymbolFacade::from_network_name("mainnet")
            .unwrap()
            .sign_transaction(&key_pair, &transaction)
            .unwrap();
        assert_ne!(testnet, mainnet);
    }

    #[test]
    fn cosignatures_sign_the_hash() {
        let key_pair = KeyPair::generate();
        let hash = Hash256::new([0x21; 32]);

        let attached = SymbolFacade::cosign_transaction_hash(&key_pair, &hash, false);
        let detached = SymbolFacade::cosign_transaction_hash(&key_pair, &hash, true);
        assert_eq!(attached.size(), 104);
        assert_eq!(detached.size(), 136);
        assert_eq!(attached.cosignature(), detached.cosignature());

        let CosignatureKind::Detached(detached) = detached else {
            panic!("expected detached");
        };
        assert_eq!(detached.parent_hash, hash);
        assert_eq!(detached.version, 0);
        assert!(key_pair.verifier().verify(hash.as_bytes(), &detached.signature));
    }

    #[test]
    fn bip32_paths() {
        assert_eq!(facade().bip32_path(2), [44, 1, 2, 0, 0]);
        assert_eq!(SymbolFacade::from_network_name("mainnet").unwrap().bip32_path(0), [44, 4343, 0, 0, 0]);
    }

    #[test]
    fn unknown_network_name() {
        assert!(matches!(
            SymbolFacade::from_network_name("moonnet"),
            Err(FacadeError::Network(NetworkError::UnknownName(_)))
        ));
    }

    #[test]
    fn fee_reserves_cosignature_space() {
        let facade = facade();
        let key_pair = KeyPair::from_hex(PRIVATE_KEY).unwrap();
        let descriptor = Descriptor::map()
            .with("type", "transfer_transaction_v1")
            .with("recipient_address", "TCHBDENCLKEBILBPWP3JPB2XNY64OE7PYHHE32I");

        let plain = facade
            .create_transaction_from_descriptor(&descriptor, &key_pair.public_key(), 100, 3600, 0)
            .unwrap();
        assert_eq!(plain.fee, Amount(plain.size() as u64 * 100));

        let reserved = facade
            .create_transaction_from_descriptor(&descriptor, &key_pair.public_key(), 100, 3600, 2)
            .unwrap();
        assert_eq!(reserved.fee, Amount((reserved.size() as u64 + 2 * 104) * 100));
        assert_eq!(reserved.signer_public_key, key_pair.public_key());
        assert!(reserved.deadline.value() > 3_600_000);
    }

    #[test]
    fn embedded_descriptor_gets_signer() {
        let facade = facade();
        let key_pair = KeyPair::generate();
        let descriptor = Descriptor::map()
            .with("type", "transfer_transaction_v1")
            .with("recipient_address", "TCHBDENCLKEBILBPWP3JPB2XNY64OE7PYHHE32I");

        let embedded = facade
            .create_embedded_transaction_from_descriptor(&descriptor, &key_pair.public_key())
            .unwrap();
        assert_eq!(embedded.signer_public_key, key_pair.public_key());
        assert_eq!(embedded.network, NetworkType::Testnet);
        assert_eq!(
            SymbolFacade::hash_embedded_transactions(std::slice::from_ref(&embedded)).unwrap(),
            sha3_256(&embedded.to_bytes().unwrap())
        );
    }

    #[test]
    fn fee_overflow_is_an_error() {
        let facade = facade();
        let descriptor = Descriptor::map().with("type", "transfer_transaction_v1");
        let err = facade
            .create_transaction_from_descriptor(&descriptor, &PublicKey::zero(), u64::MAX, 60, 0)
            .unwrap_err();
        assert!(matches!(err, FacadeError::FeeOverflow { .. }));
    }
}
