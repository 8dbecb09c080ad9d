//! Accounts bound to a facade.

use super::{CosignatureKind, FacadeError, SymbolFacade};
use crate::codec::{Hash256, PublicKey, Signature};
use crate::crypto::KeyPair;
use crate::models::Transaction;
use crate::network::{Address, Network};

/// A public key together with its address on one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolPublicAccount {
    pub public_key: PublicKey,
    pub address: Address,
}

impl SymbolPublicAccount {
    pub fn new(network: &Network, public_key: PublicKey) -> Self {
        Self {
            public_key,
            address: network.public_key_to_address(&public_key),
        }
    }
}

/// An account that can sign, borrowing the facade it signs for.
#[derive(Debug)]
pub struct SymbolAccount<'a> {
    facade: &'a SymbolFacade,
    public_account: SymbolPublicAccount,
    key_pair: KeyPair,
}

impl<'a> SymbolAccount<'a> {
    pub fn new(facade: &'a SymbolFacade, key_pair: KeyPair) -> Self {
        let public_account = SymbolPublicAccount::new(facade.network(), key_pair.public_key());
        Self {
            facade,
            public_account,
            key_pair,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_account.public_key
    }

    pub fn address(&self) -> Address {
        self.public_account.address
    }

    pub fn public_account(&self) -> &SymbolPublicAccount {
        &self.public_account
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    pub fn sign_transaction(&self, transaction: &Transaction) -> Result<Signature, FacadeError> {
        self.facade.sign_transaction(&self.key_pair, transaction)
    }

    pub fn cosign_transaction(&self, transaction: &Transaction, detached: bool) -> Result<CosignatureKind, FacadeError> {
        self.facade.cosign_transaction(&self.key_pair, transaction, detached)
    }

    pub fn cosign_transaction_hash(&self, transaction_hash: &Hash256, detached: bool) -> CosignatureKind {
        SymbolFacade::cosign_transaction_hash(&self.key_pair, transaction_hash, detached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_address_follows_network() {
        let facade = SymbolFacade::new(Network::testnet()).unwrap();
        let key_pair =
            KeyPair::from_hex("EDB671EB741BD676969D8A035271D1EE5E75DF33278083D877F23615EB839FEC").unwrap();
        let account = facade.create_account(key_pair.clone());

        assert_eq!(account.public_key(), key_pair.public_key());
        assert_eq!(account.address(), Network::testnet().public_key_to_address(&key_pair.public_key()));
        assert_eq!(account.address().identifier(), 0x98);
        assert_eq!(facade.create_public_account(key_pair.public_key()), *account.public_account());
    }

    #[test]
    fn account_cosignature_matches_facade() {
        let facade = SymbolFacade::new(Network::testnet()).unwrap();
        let account = facade.create_account(KeyPair::generate());
        let hash = Hash256::new([3; 32]);

        let from_account = account.cosign_transaction_hash(&hash, false);
        let from_facade = SymbolFacade::cosign_transaction_hash(account.key_pair(), &hash, false);
        assert_eq!(from_account, from_facade);
    }
}
