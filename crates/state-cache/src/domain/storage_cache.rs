//! # Storage Cache
//!
//! Engine instantiation for contract-storage slots: key = hex(address) ++
//! hex(slot), element = raw slot bytes or a cached negative. The flat key
//! layout makes every address-scoped operation a prefix scan, which is what
//! `clear_contract_storage` relies on.

use super::{
    Address, CacheConfig, CacheError, CacheKey, CacheStats, CheckpointCache, StorageElement,
    StorageKey,
};

/// Hex length of the address prefix inside a composite storage key.
const ADDRESS_PREFIX_LEN: usize = 2 * super::ADDRESS_LEN;

/// Checkpointable cache of contract-storage slots, keyed by
/// (address, slot).
#[derive(Debug)]
pub struct StorageCache {
    inner: CheckpointCache<StorageElement>,
}

impl StorageCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            inner: CheckpointCache::new(config),
        }
    }

    /// Look up a slot. `None` means "not cached"; an element with
    /// `encoded: None` is a cached negative ("slot known empty").
    pub fn get(&mut self, address: &Address, slot: &StorageKey) -> Option<&StorageElement> {
        self.inner.get(&storage_key(address, slot))
    }

    /// Cache a slot value, or a negative if `value` is `None`.
    pub fn put(&mut self, address: &Address, slot: &StorageKey, value: Option<Vec<u8>>) {
        self.inner
            .put(storage_key(address, slot), StorageElement { encoded: value });
    }

    /// Mark a slot as known-empty.
    pub fn del(&mut self, address: &Address, slot: &StorageKey) {
        self.inner.del(storage_key(address, slot));
    }

    /// Invalidate every cached slot under `address`.
    ///
    /// Each removal goes through `del`, so the wipe is captured in the open
    /// diff layer and a later `revert` restores exactly the affected slots.
    pub fn clear_contract_storage(&mut self, address: &Address) {
        let prefix = hex::encode(address);
        let affected: Vec<CacheKey> = self
            .inner
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(&prefix))
            .collect();
        for key in affected {
            self.inner.del(key);
        }
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

    /// Net changes since the last flush, keyed back to (address, slot)
    /// pairs for trie persistence.
    pub fn flush(&mut self) -> Result<Vec<((Address, StorageKey), StorageElement)>, CacheError> {
        self.inner
            .flush()
            .into_iter()
            .map(|(key, element)| Ok((split_key(&key)?, element)))
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

fn storage_key(address: &Address, slot: &StorageKey) -> CacheKey {
    let mut key = String::with_capacity(ADDRESS_PREFIX_LEN + 2 * super::STORAGE_KEY_LEN);
    key.push_str(&hex::encode(address));
    key.push_str(&hex::encode(slot));
    key
}

fn split_key(key: &str) -> Result<(Address, StorageKey), CacheError> {
    if key.len() != ADDRESS_PREFIX_LEN + 2 * super::STORAGE_KEY_LEN {
        return Err(CacheError::InvalidKey {
            expected: super::ADDRESS_LEN + super::STORAGE_KEY_LEN,
            actual: key.len() / 2,
        });
    }
    let decode = |part: &str, expected: usize| {
        hex::decode(part).map_err(|_| CacheError::InvalidKey {
            expected,
            actual: part.len() / 2,
        })
    };
    let address_bytes = decode(&key[..ADDRESS_PREFIX_LEN], super::ADDRESS_LEN)?;
    let slot_bytes = decode(&key[ADDRESS_PREFIX_LEN..], super::STORAGE_KEY_LEN)?;
    Ok((
        super::address_from_slice(&address_bytes)?,
        super::storage_key_from_slice(&slot_bytes)?,
    ))
}
