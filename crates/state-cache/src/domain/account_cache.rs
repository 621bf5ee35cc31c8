//! # Account Cache
//!
//! Engine instantiation for account records: key = hex(address), element =
//! canonical account RLP or a cached negative. Serialization happens at
//! this boundary; the engine below only sees opaque elements.

use super::{
    Account, AccountElement, Address, CacheConfig, CacheError, CacheKey, CacheStats,
    CheckpointCache,
};

/// Decoded result of an account lookup that hit the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountEntry {
    /// The account exists in the trie with this record.
    Exists(Account),
    /// Cached negative: the account is known to not exist in the trie.
    Missing,
}

impl AccountEntry {
    /// The account record, if the entry is not a negative.
    pub fn account(&self) -> Option<&Account> {
        match self {
            Self::Exists(account) => Some(account),
            Self::Missing => None,
        }
    }
}

/// Checkpointable cache of account records, keyed by address.
#[derive(Debug)]
pub struct AccountCache {
    inner: CheckpointCache<AccountElement>,
}

impl AccountCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            inner: CheckpointCache::new(config),
        }
    }

    /// Look up an account.
    ///
    /// `Ok(None)` means "not cached": the caller falls back to the trie.
    /// `Ok(Some(AccountEntry::Missing))` is a cached negative and needs no
    /// trie round-trip. Malformed stored bytes surface as
    /// `MalformedElement` rather than being silently dropped.
    pub fn get(&mut self, address: &Address) -> Result<Option<AccountEntry>, CacheError> {
        match self.inner.get(&account_key(address)) {
            None => Ok(None),
            Some(element) => match &element.encoded {
                None => Ok(Some(AccountEntry::Missing)),
                Some(bytes) => Ok(Some(AccountEntry::Exists(Account::from_rlp(bytes)?))),
            },
        }
    }

    /// Cache an account record, or a negative if `account` is `None`.
    pub fn put(&mut self, address: &Address, account: Option<&Account>) {
        let element = match account {
            Some(account) => AccountElement::from_account(account),
            None => AccountElement { encoded: None },
        };
        self.inner.put(account_key(address), element);
    }

    /// Mark an account as known to not exist.
    pub fn del(&mut self, address: &Address) {
        self.inner.del(account_key(address));
    }

    pub fn checkpoint(&mut self) {
        self.inner.checkpoint();
    }

    pub fn commit(&mut self) -> Result<(), CacheError> {
        self.inner.commit()
    }

    pub fn revert(&mut self) -> Result<(), CacheError> {
        self.inner.revert()
    }

    /// Net changes since the last flush, for the State Manager to persist
    /// into the trie (a negative element means "delete from the trie").
    pub fn flush(&mut self) -> Result<Vec<(Address, AccountElement)>, CacheError> {
        self.inner
            .flush()
            .into_iter()
            .map(|(key, element)| Ok((address_from_key(&key)?, element)))
            .collect()
    }

    pub fn checkpoint_depth(&self) -> usize {
        self.inner.checkpoint_depth()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.stats()
    }
}

fn account_key(address: &Address) -> CacheKey {
    hex::encode(address)
}

fn address_from_key(key: &str) -> Result<Address, CacheError> {
    let bytes = hex::decode(key).map_err(|_| CacheError::InvalidKey {
        expected: super::ADDRESS_LEN,
        actual: key.len() / 2,
    })?;
    super::address_from_slice(&bytes)
}
