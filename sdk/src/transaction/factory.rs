//! Network-bound transaction factory.
//!
//! [`TransactionFactory`] wraps a [`RuleBasedTransactionFactory`] with the
//! conventions of one network:
//!
//! - `network` defaults to the factory's network type.
//! - Addresses may be given as base32 text, hex or raw bytes.
//! - Mosaic definitions get their `id` from the signer's address and the
//!   nonce; namespace registrations from the name and parent. Whatever the
//!   descriptor said for `id` is overwritten.
//! - Aggregates get their `transactions_hash` computed when the descriptor
//!   leaves it out.

use super::descriptor::Descriptor;
use super::rules::{FactoryError, RuleBasedTransactionFactory, RuleFn, TypeConverter};
use crate::codec::{Codec, Hash256, Signature, UnresolvedAddress};
use crate::identity::{generate_mosaic_id, generate_namespace_id};
use crate::models::{
    structs, EmbeddedTransaction, FieldSchema, NamespaceId, NamespaceRegistrationType, NetworkType,
    Record, Transaction, TransactionBody, TransactionKind, TransactionType, TypeKind, TypeRef,
    TypedValue, EMBEDDED_TRANSACTION_HEADER_FIELDS, TRANSACTION_HEADER_FIELDS, TRANSACTION_KINDS,
};
use crate::network::{Address, Network};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Key naming the transaction kind in a descriptor.
pub const TYPE_KEY: &str = "type";

/// JSON body accepted by a node's transaction announce endpoint.
#[derive(Debug, Serialize)]
struct PayloadEnvelope {
    payload: String,
}

/// Builds transactions for one network.
#[derive(Debug, Clone)]
pub struct TransactionFactory {
    network: Network,
    network_type: NetworkType,
    rules: RuleBasedTransactionFactory,
}

impl TransactionFactory {
    /// A factory for `network`. Fails if the network identifier is not a
    /// known [`NetworkType`].
    pub fn new(network: Network) -> Result<Self, FactoryError> {
        Self::with_overrides(network, Vec::new())
    }

    /// Like [`new`](Self::new), with per-type rules that take precedence over
    /// everything else.
    pub fn with_overrides(network: Network, overrides: Vec<(String, RuleFn)>) -> Result<Self, FactoryError> {
        let network_type = NetworkType::try_from(network.identifier())
            .map_err(|_| FactoryError::UnsupportedNetwork(network.identifier()))?;

        let converter: TypeConverter = Arc::new(convert_sdk_value);
        let mut rules = overrides
            .into_iter()
            .fold(RuleBasedTransactionFactory::new().with_type_converter(converter), |rules, (name, rule)| {
                rules.with_override(name, rule)
            });

        rules.autodetect();
        rules.add_pod_parser("UnresolvedAddress", Arc::new(parse_address));
        rules.add_pod_parser("Address", Arc::new(parse_address));
        rules.add_pod_parser("EmbeddedTransaction", Arc::new(parse_embedded));
        for element in array_elements() {
            rules.add_array_parser(element);
        }

        for kind in TRANSACTION_KINDS {
            rules.validate(kind.body_fields())?;
        }
        rules.validate(TRANSACTION_HEADER_FIELDS)?;

        debug!(network = network.name(), "transaction factory ready");
        Ok(Self {
            network,
            network_type,
            rules,
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The underlying rule table.
    pub fn rules(&self) -> &RuleBasedTransactionFactory {
        &self.rules
    }

    /// Builds a top-level transaction.
    pub fn create(&self, descriptor: &Descriptor, autosort: bool) -> Result<Transaction, FactoryError> {
        let (kind, record) = self.build_record(descriptor, TRANSACTION_HEADER_FIELDS, autosort)?;
        let mut transaction = Transaction::from_record(kind, record)?;

        let signer_address = self.network.public_key_to_address(&transaction.signer_public_key);
        autogenerate_ids(&mut transaction.body, &signer_address);
        if descriptor.get("transactions_hash").is_none() {
            fill_transactions_hash(&mut transaction.body);
        }

        debug!(kind = kind.name, size = transaction.size(), "created transaction");
        Ok(transaction)
    }

    /// Builds an inner transaction for an aggregate.
    pub fn create_embedded(&self, descriptor: &Descriptor, autosort: bool) -> Result<EmbeddedTransaction, FactoryError> {
        let (kind, record) = self.build_record(descriptor, EMBEDDED_TRANSACTION_HEADER_FIELDS, autosort)?;
        if !kind.embeddable {
            return Err(FactoryError::NotEmbeddable(kind.name));
        }
        let mut transaction = EmbeddedTransaction::from_record(kind, record)?;

        let signer_address = self.network.public_key_to_address(&transaction.signer_public_key);
        autogenerate_ids(&mut transaction.body, &signer_address);

        debug!(kind = kind.name, size = transaction.size(), "created embedded transaction");
        Ok(transaction)
    }

    /// Sets `signature` on `transaction` and returns the JSON announce body,
    /// `{"payload":"<upper hex>"}`.
    pub fn attach_signature(transaction: &mut Transaction, signature: Signature) -> Result<String, FactoryError> {
        transaction.signature = signature;
        let payload = hex::encode_upper(transaction.to_bytes()?);
        Ok(serde_json::to_string(&PayloadEnvelope { payload })?)
    }

    /// Descriptor name of a `(type, version)` pair.
    pub fn lookup_transaction_name(transaction_type: TransactionType, version: u8) -> Option<&'static str> {
        TransactionKind::find(transaction_type, version).map(|kind| kind.name)
    }

    fn build_record(
        &self,
        descriptor: &Descriptor,
        header: &[FieldSchema],
        autosort: bool,
    ) -> Result<(&'static TransactionKind, Record), FactoryError> {
        let entries = descriptor.as_map().ok_or(FactoryError::InvalidShape {
            type_name: "transaction".to_string(),
            actual: descriptor.kind(),
        })?;
        let type_name = entries
            .get(TYPE_KEY)
            .ok_or(FactoryError::MissingTransactionType)?
            .as_text()
            .ok_or(FactoryError::MissingTransactionType)?;
        let kind = TransactionKind::by_name(type_name)
            .ok_or_else(|| FactoryError::UnknownTransactionType(type_name.to_string()))?;

        let mut entries: BTreeMap<String, Descriptor> = entries.clone();
        entries.remove(TYPE_KEY);
        entries
            .entry("network".to_string())
            .or_insert_with(|| Descriptor::from(self.network_type));

        let fields: Vec<FieldSchema> = header.iter().chain(kind.body_fields()).copied().collect();
        let record = self.rules.build_struct(kind.name, &fields, &entries, autosort)?;
        Ok((kind, record))
    }
}

/// Every array element type used by a schema.
fn array_elements() -> Vec<&'static str> {
    let struct_fields = structs::STRUCT_SCHEMAS.iter().flat_map(|schema| -> &'static [FieldSchema] {
        match schema.kind {
            TypeKind::Struct(fields) => fields,
            _ => &[],
        }
    });

    let mut elements: Vec<&'static str> = TRANSACTION_KINDS
        .iter()
        .flat_map(|kind| kind.body_fields())
        .chain(struct_fields)
        .filter_map(|field| match field.ty {
            TypeRef::Array { element, .. } => Some(element),
            _ => None,
        })
        .collect();
    elements.sort_unstable();
    elements.dedup();
    elements
}

/// Raw addresses are handed to byte rules as bytes.
fn convert_sdk_value(raw: &Descriptor) -> Option<Descriptor> {
    match raw {
        Descriptor::Address(address) => Some(Descriptor::Bytes(address.as_bytes().to_vec())),
        _ => None,
    }
}

/// Base32 text (39 chars), hex text (48 chars) or 24 raw bytes.
fn parse_address(raw: &Descriptor) -> Result<TypedValue, FactoryError> {
    let bytes = match raw {
        Descriptor::Text(text) if text.len() == Address::ENCODED_SIZE => text.parse::<Address>()?.as_bytes().to_vec(),
        Descriptor::Text(text) => text
            .parse::<UnresolvedAddress>()
            .map_err(|e| FactoryError::InvalidHex {
                type_name: "UnresolvedAddress".to_string(),
                reason: e.to_string(),
            })?
            .as_bytes()
            .to_vec(),
        Descriptor::Bytes(bytes) => Address::from_slice(bytes)?.as_bytes().to_vec(),
        Descriptor::Address(address) => address.as_bytes().to_vec(),
        other => {
            return Err(FactoryError::InvalidShape {
                type_name: "UnresolvedAddress".to_string(),
                actual: other.kind(),
            })
        }
    };
    Ok(TypedValue::Bytes(bytes))
}

fn parse_embedded(raw: &Descriptor) -> Result<TypedValue, FactoryError> {
    match raw {
        Descriptor::Embedded(transaction) => Ok(TypedValue::Embedded(transaction.clone())),
        other => Err(FactoryError::InvalidShape {
            type_name: "EmbeddedTransaction".to_string(),
            actual: other.kind(),
        }),
    }
}

/// Derives the ids of artifacts a transaction creates.
fn autogenerate_ids(body: &mut TransactionBody, signer_address: &Address) {
    match body {
        TransactionBody::MosaicDefinition(definition) => {
            definition.id = generate_mosaic_id(signer_address, definition.nonce);
            debug!(mosaic_id = %definition.id, nonce = definition.nonce.value(), "generated mosaic id");
        }
        TransactionBody::NamespaceRegistration(registration) => {
            let parent_id = match registration.registration_type {
                NamespaceRegistrationType::Root => NamespaceId(0),
                NamespaceRegistrationType::Child => registration.parent_id,
            };
            let name = String::from_utf8_lossy(&registration.name);
            registration.id = generate_namespace_id(&name, parent_id);
            debug!(namespace_id = %registration.id, %name, "generated namespace id");
        }
        _ => {}
    }
}

/// Computes the Merkle commitment of an aggregate's inner transactions.
///
/// Inner transactions that cannot be serialized (an unsorted array built
/// with `autosort` off) leave the hash zeroed; writing the aggregate then
/// reports the real problem.
fn fill_transactions_hash(body: &mut TransactionBody) {
    let Some(aggregate) = body.aggregate_mut() else {
        return;
    };
    match aggregate.compute_transactions_hash() {
        Ok(hash) => aggregate.transactions_hash = hash,
        Err(e) => {
            warn!(error = %e, "leaving aggregate transactions hash unset");
            aggregate.transactions_hash = Hash256::zero();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::PublicKey;
    use crate::models::{Amount, MosaicFlags, MosaicId, MosaicNonce, UnresolvedMosaic, UnresolvedMosaicId};
    use proptest::prelude::*;

    const SIGNER: &str = "87DA603E7BE5656C45692D5FC7F6D0EF8F24BB7A5C10ED5FDA8C5CFBC49FCBC8";
    const RECIPIENT: &str = "TCHBDENCLKEBILBPWP3JPB2XNY64OE7PYHHE32I";

    fn factory() -> TransactionFactory {
        TransactionFactory::new(Network::testnet()).unwrap()
    }

    fn transfer(mosaics: Vec<UnresolvedMosaic>) -> Descriptor {
        Descriptor::map()
            .with("type", "transfer_transaction_v1")
            .with("signer_public_key", SIGNER)
            .with("fee", 1_000_000u64)
            .with("deadline", 41_998_024_783u64)
            .with("recipient_address", RECIPIENT)
            .with("mosaics", Descriptor::list(mosaics))
    }

    #[test]
    fn creates_transfer_with_network_default() {
        let transaction = factory().create(&transfer(vec![]), true).unwrap();
        assert_eq!(transaction.transaction_type(), TransactionType::Transfer);
        assert_eq!(transaction.version, 1);
        assert_eq!(transaction.network, NetworkType::Testnet);
        assert_eq!(transaction.fee, Amount(1_000_000));
        assert_eq!(transaction.signer_public_key, SIGNER.parse::<PublicKey>().unwrap());
        assert_eq!(transaction.signature, Signature::zero());

        let TransactionBody::Transfer(body) = &transaction.body else {
            panic!("expected transfer");
        };
        assert_eq!(Address::from(body.recipient_address).to_string(), RECIPIENT);
    }

    #[test]
    fn accepts_short_type_names() {
        let descriptor = transfer(vec![]).with("type", "transfer");
        assert_eq!(factory().create(&descriptor, true).unwrap().version, 1);
    }

    #[test]
    fn unknown_type_is_named() {
        let descriptor = transfer(vec![]).with("type", "transfer_transaction_v9");
        assert_eq!(
            factory().create(&descriptor, true).unwrap_err().to_string(),
            "unknown transaction type transfer_transaction_v9"
        );
        assert!(matches!(
            factory().create(&Descriptor::map(), true),
            Err(FactoryError::MissingTransactionType)
        ));
    }

    #[test]
    fn unsorted_mosaics_fail_at_write_without_autosort() {
        let mosaics = vec![UnresolvedMosaic::new(3u64, 1u64), UnresolvedMosaic::new(1u64, 1u64)];
        let factory = factory();

        let sorted = factory.create(&transfer(mosaics.clone()), true).unwrap();
        assert!(sorted.to_bytes().is_ok());

        let unsorted = factory.create(&transfer(mosaics), false).unwrap();
        let TransactionBody::Transfer(body) = &unsorted.body else {
            panic!("expected transfer");
        };
        assert_eq!(body.mosaics[0].mosaic_id, UnresolvedMosaicId(3));
        assert!(matches!(unsorted.to_bytes(), Err(crate::codec::CodecError::UnsortedArray { .. })));
    }

    #[test]
    fn mosaic_definition_id_is_generated() {
        let descriptor = Descriptor::map()
            .with("type", "mosaic_definition_transaction_v1")
            .with("signer_public_key", SIGNER)
            .with("id", 1234u64)
            .with("nonce", 123u32)
            .with("flags", "transferable restrictable")
            .with("divisibility", 2u8);

        let transaction = factory().create(&descriptor, true).unwrap();
        let TransactionBody::MosaicDefinition(body) = &transaction.body else {
            panic!("expected mosaic definition");
        };
        assert_eq!(body.nonce, MosaicNonce(123));
        assert_eq!(body.flags, MosaicFlags::TRANSFERABLE | MosaicFlags::RESTRICTABLE);
        assert_eq!(body.id, MosaicId(0x1A21_F143_2396_216F));
    }

    #[test]
    fn namespace_ids_are_generated() {
        let root = Descriptor::map()
            .with("type", "namespace_registration_transaction_v1")
            .with("signer_public_key", SIGNER)
            .with("registration_type", "root")
            .with("duration", 86_400u64)
            .with("parent_id", 99u64)
            .with("name", "roger");
        let child = Descriptor::map()
            .with("type", "namespace_registration_transaction_v1")
            .with("signer_public_key", SIGNER)
            .with("registration_type", "child")
            .with("parent_id", 0xA14E_4B59_33EA_8393u64)
            .with("name", "charlie");

        let factory = factory();
        for (descriptor, expected) in [(root, 0xA14E_4B59_33EA_8393u64), (child, 0xC246_A260_EF35_79FBu64)] {
            let transaction = factory.create_embedded(&descriptor, true).unwrap();
            let TransactionBody::NamespaceRegistration(body) = &transaction.body else {
                panic!("expected namespace registration");
            };
            assert_eq!(body.id, NamespaceId(expected));
        }
    }

    #[test]
    fn creates_mosaic_and_namespace_scoped_transactions() {
        let factory = factory();
        let base = |name: &str| Descriptor::map().with("type", name).with("signer_public_key", SIGNER);

        let metadata = factory
            .create(
                &base("mosaic_metadata_transaction_v1")
                    .with("target_address", RECIPIENT)
                    .with("scoped_metadata_key", 0xC0FFEEu64)
                    .with("target_mosaic_id", 0x2CF4_03E8_5507_F39Eu64)
                    .with("value_size_delta", -2i16)
                    .with("value", "abc"),
                true,
            )
            .unwrap();
        let TransactionBody::MosaicMetadata(body) = &metadata.body else {
            panic!("expected mosaic metadata");
        };
        assert_eq!(body.target_mosaic_id, UnresolvedMosaicId(0x2CF4_03E8_5507_F39E));
        assert_eq!(body.value_size_delta, -2);
        assert_eq!(body.value, b"abc");

        let metadata = factory
            .create_embedded(
                &base("namespace_metadata_transaction_v1")
                    .with("target_address", RECIPIENT)
                    .with("target_namespace_id", 0xA95F_1F8A_9615_9516u64)
                    .with("value", "x"),
                true,
            )
            .unwrap();
        let TransactionBody::NamespaceMetadata(body) = &metadata.body else {
            panic!("expected namespace metadata");
        };
        assert_eq!(body.target_namespace_id, NamespaceId(0xA95F_1F8A_9615_9516));

        let revocation = factory
            .create(
                &base("mosaic_supply_revocation_transaction_v1")
                    .with("source_address", RECIPIENT)
                    .with("mosaic", UnresolvedMosaic::new(0x1234u64, 5u64)),
                true,
            )
            .unwrap();
        assert_eq!(revocation.transaction_type(), TransactionType::MosaicSupplyRevocation);
        assert_eq!(revocation.size(), 128 + 40);

        let restriction = factory
            .create(
                &base("mosaic_address_restriction_transaction_v1")
                    .with("mosaic_id", 0x1234u64)
                    .with("restriction_key", 7u64)
                    .with("previous_restriction_value", 1u64)
                    .with("new_restriction_value", 2u64)
                    .with("target_address", RECIPIENT),
                true,
            )
            .unwrap();
        let TransactionBody::MosaicAddressRestriction(body) = &restriction.body else {
            panic!("expected mosaic address restriction");
        };
        assert_eq!(body.new_restriction_value, 2);
        assert_eq!(Address::from(body.target_address).to_string(), RECIPIENT);
        assert_eq!(restriction.size(), 128 + 56);
    }

    #[test]
    fn every_kind_round_trips_through_bytes() {
        let factory = factory();
        for kind in TRANSACTION_KINDS {
            let descriptor = Descriptor::map().with("type", kind.name).with("signer_public_key", SIGNER);

            let transaction = factory.create(&descriptor, true).unwrap();
            assert_eq!(transaction.kind().map(|k| k.name), Some(kind.name));
            let bytes = transaction.to_bytes().unwrap();
            assert_eq!(bytes.len(), transaction.size(), "{}", kind.name);
            assert_eq!(Transaction::from_bytes(&bytes).unwrap(), transaction, "{}", kind.name);

            if !kind.embeddable {
                continue;
            }
            let embedded = factory.create_embedded(&descriptor, true).unwrap();
            let bytes = embedded.to_bytes().unwrap();
            assert_eq!(bytes.len(), embedded.size(), "{}", kind.name);
            assert_eq!(EmbeddedTransaction::from_bytes(&bytes).unwrap(), embedded, "{}", kind.name);
        }
    }

    #[test]
    fn aggregates_cannot_be_embedded() {
        let descriptor = Descriptor::map().with("type", "aggregate_complete_transaction_v2");
        assert!(matches!(
            factory().create_embedded(&descriptor, true),
            Err(FactoryError::NotEmbeddable("aggregate_complete_transaction_v2"))
        ));
    }

    #[test]
    fn aggregate_transactions_hash_is_filled() {
        let factory = factory();
        let inner = factory.create_embedded(&transfer(vec![]).with("type", "transfer"), true);
        assert!(inner.is_err(), "embedded transfers have no fee or deadline");

        let inner_descriptor = Descriptor::map()
            .with("type", "transfer_transaction_v1")
            .with("signer_public_key", SIGNER)
            .with("recipient_address", RECIPIENT)
            .with("message", "inner");
        let inner = factory.create_embedded(&inner_descriptor, true).unwrap();

        let aggregate = factory
            .create(
                &Descriptor::map()
                    .with("type", "aggregate_complete_transaction_v2")
                    .with("signer_public_key", SIGNER)
                    .with("transactions", Descriptor::list([inner.clone()])),
                true,
            )
            .unwrap();
        let body = aggregate.body.aggregate().unwrap();
        assert_eq!(body.transactions, vec![inner]);
        assert_eq!(body.transactions_hash, body.compute_transactions_hash().unwrap());
        assert_ne!(body.transactions_hash, Hash256::zero());
    }

    #[test]
    fn attach_signature_returns_json_envelope() {
        let mut transaction = factory().create(&transfer(vec![]), true).unwrap();
        let signature = Signature::new([0x11; 64]);
        let json = TransactionFactory::attach_signature(&mut transaction, signature).unwrap();

        assert_eq!(transaction.signature, signature);
        let expected = hex::encode_upper(transaction.to_bytes().unwrap());
        assert_eq!(json, format!("{{\"payload\":\"{expected}\"}}"));
    }

    #[test]
    fn lookup_names() {
        assert_eq!(
            TransactionFactory::lookup_transaction_name(TransactionType::Transfer, 1),
            Some("transfer_transaction_v1")
        );
        assert_eq!(
            TransactionFactory::lookup_transaction_name(TransactionType::AggregateBonded, 2),
            Some("aggregate_bonded_transaction_v2")
        );
        assert_eq!(TransactionFactory::lookup_transaction_name(TransactionType::Transfer, 9), None);
    }

    #[test]
    fn overrides_inject_sentinels() {
        let sentinel: RuleFn = Arc::new(|_| Ok(TypedValue::Integer(777)));
        let factory =
            TransactionFactory::with_overrides(Network::testnet(), vec![("Amount".to_string(), sentinel)]).unwrap();
        assert_eq!(factory.create(&transfer(vec![]), true).unwrap().fee, Amount(777));
    }

    #[test]
    fn rejects_unknown_networks() {
        let network = Network::new("devnet", 0x90, Hash256::zero(), Network::testnet().epoch());
        assert!(matches!(
            TransactionFactory::new(network),
            Err(FactoryError::UnsupportedNetwork(0x90))
        ));
    }

    proptest! {
        #[test]
        fn autosort_is_order_independent(ids in proptest::collection::btree_set(any::<u64>(), 0..8)) {
            let mosaics: Vec<UnresolvedMosaic> = ids.iter().map(|id| UnresolvedMosaic::new(*id, 1u64)).collect();
            let mut reversed = mosaics.clone();
            reversed.reverse();

            let factory = factory();
            let forward = factory.create(&transfer(mosaics), true).unwrap().to_bytes().unwrap();
            let backward = factory.create(&transfer(reversed), true).unwrap().to_bytes().unwrap();
            prop_assert_eq!(forward, backward);
        }
    }
}
