//! # Networks
//!
//! A [`Network`] is the small bundle of constants every hash, signature and
//! address depends on: a name, the identifier byte, the generation hash seed
//! and the epoch. It is a plain value, built once and passed explicitly to
//! whatever needs it. There is no ambient "current network".
//!
//! Two presets ship with the crate. Anything else (a private network, a
//! local test chain) can be described in JSON and loaded through
//! [`NetworkConfig`]:
//!
//! ```json
//! {
//!   "name": "devnet",
//!   "identifier": 144,
//!   "generation_hash_seed": "0000000000000000000000000000000000000000000000000000000000000000",
//!   "epoch": "2024-01-01T00:00:00Z"
//! }
//! ```

pub mod address;
pub mod timestamp;

pub use address::{Address, AddressError};
pub use timestamp::NetworkTimestamp;

use crate::codec::{Hash256, PublicKey};
use crate::config::{
    MAINNET_EPOCH_SECONDS, MAINNET_GENERATION_HASH_SEED, MAINNET_IDENTIFIER,
    TESTNET_EPOCH_SECONDS, TESTNET_GENERATION_HASH_SEED, TESTNET_IDENTIFIER,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by network lookups and time conversions.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// No preset with this name.
    #[error("no network found with name '{0}'")]
    UnknownName(String),

    /// No preset with this identifier byte.
    #[error("no network found with identifier {0}")]
    UnknownIdentifier(u8),

    /// The datetime precedes the network epoch.
    #[error("timestamp {0} is before the network epoch")]
    BeforeEpoch(DateTime<Utc>),

    /// A network description could not be parsed.
    #[error("invalid network config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Per-network constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    name: String,
    identifier: u8,
    generation_hash_seed: Hash256,
    epoch: DateTime<Utc>,
}

impl Network {
    /// Describe a network.
    pub fn new(
        name: impl Into<String>,
        identifier: u8,
        generation_hash_seed: Hash256,
        epoch: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            identifier,
            generation_hash_seed,
            epoch,
        }
    }

    /// The public main network.
    pub fn mainnet() -> Self {
        Self::new(
            "mainnet",
            MAINNET_IDENTIFIER,
            Hash256::new(MAINNET_GENERATION_HASH_SEED),
            epoch_from_unix_seconds(MAINNET_EPOCH_SECONDS),
        )
    }

    /// The public test network.
    pub fn testnet() -> Self {
        Self::new(
            "testnet",
            TESTNET_IDENTIFIER,
            Hash256::new(TESTNET_GENERATION_HASH_SEED),
            epoch_from_unix_seconds(TESTNET_EPOCH_SECONDS),
        )
    }

    /// Every preset, mainnet first.
    pub fn presets() -> Vec<Network> {
        vec![Self::mainnet(), Self::testnet()]
    }

    /// Preset lookup by name.
    pub fn find_by_name(name: &str) -> Result<Network, NetworkError> {
        Self::presets()
            .into_iter()
            .find(|network| network.name == name)
            .ok_or_else(|| NetworkError::UnknownName(name.to_string()))
    }

    /// Preset lookup by identifier byte.
    pub fn find_by_identifier(identifier: u8) -> Result<Network, NetworkError> {
        Self::presets()
            .into_iter()
            .find(|network| network.identifier == identifier)
            .ok_or(NetworkError::UnknownIdentifier(identifier))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> u8 {
        self.identifier
    }

    pub fn generation_hash_seed(&self) -> &Hash256 {
        &self.generation_hash_seed
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// Address of `public_key` on this network.
    pub fn public_key_to_address(&self, public_key: &PublicKey) -> Address {
        Address::from_public_key(self.identifier, public_key)
    }

    /// `true` if `address` belongs to this network and its checksum holds.
    pub fn is_valid_address(&self, address: &Address) -> bool {
        address.identifier() == self.identifier && address.has_valid_checksum()
    }

    /// Like [`is_valid_address`](Self::is_valid_address), from the encoded form.
    pub fn is_valid_address_string(&self, encoded: &str) -> bool {
        encoded
            .parse::<Address>()
            .map(|address| self.is_valid_address(&address))
            .unwrap_or(false)
    }

    /// Wall-clock time of a network timestamp. Saturates at the largest
    /// representable datetime.
    pub fn to_datetime(&self, timestamp: NetworkTimestamp) -> DateTime<Utc> {
        let millis = i64::try_from(timestamp.timestamp()).unwrap_or(i64::MAX);
        self.epoch
            .checked_add_signed(Duration::milliseconds(millis))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Network timestamp of a wall-clock time.
    pub fn from_datetime(&self, datetime: DateTime<Utc>) -> Result<NetworkTimestamp, NetworkError> {
        let elapsed = (datetime - self.epoch).num_milliseconds();
        u64::try_from(elapsed)
            .map(NetworkTimestamp::new)
            .map_err(|_| NetworkError::BeforeEpoch(datetime))
    }
}

fn epoch_from_unix_seconds(seconds: i64) -> DateTime<Utc> {
    DateTime::<Utc>::default() + Duration::seconds(seconds)
}

// ---------------------------------------------------------------------------
// NetworkConfig
// ---------------------------------------------------------------------------

/// Serializable description of a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub identifier: u8,
    pub generation_hash_seed: Hash256,
    pub epoch: DateTime<Utc>,
}

impl NetworkConfig {
    /// Parse a JSON description.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String, NetworkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<NetworkConfig> for Network {
    fn from(config: NetworkConfig) -> Self {
        Network::new(config.name, config.identifier, config.generation_hash_seed, config.epoch)
    }
}

impl From<&Network> for NetworkConfig {
    fn from(network: &Network) -> Self {
        NetworkConfig {
            name: network.name.clone(),
            identifier: network.identifier,
            generation_hash_seed: network.generation_hash_seed,
            epoch: network.epoch,
        }
    }
}
