//! # Core Checkpoint Cache Properties
//!
//! Exercises the account and storage caches through their public API the
//! way the State Manager does, one property per test:
//!
//! 1. Checkpoint/revert round-trip restores exact pre-images
//! 2. Commit preserves the backend and consolidates undo history
//! 3. Diff capture is first-mutation-only
//! 4. Flush is idempotent
//! 5. Commit/revert at depth 0 fail without side effects
//! 6. Cached negatives are distinct from "never written"
//! 7. Contract-storage clear is address-scoped and revertible

#[cfg(test)]
mod tests {
    use state_cache::{
        Account, AccountCache, AccountEntry, CacheConfig, CacheError, StorageCache,
    };

    fn account_cache() -> AccountCache {
        AccountCache::new(&CacheConfig::ordered())
    }

    fn storage_cache() -> StorageCache {
        StorageCache::new(&CacheConfig::ordered())
    }

    // =========================================================================
    // PROPERTY 1: CHECKPOINT/REVERT ROUND-TRIP
    // =========================================================================

    #[test]
    fn test_revert_restores_touched_keys_only() {
        let mut cache = account_cache();
        let a = [0xAA; 20];
        let b = [0xBB; 20];
        let untouched = [0xCC; 20];
        let v1 = Account::new(100);

        cache.put(&a, Some(&v1));
        cache.put(&untouched, Some(&Account::new(7)));

        cache.checkpoint();
        cache.put(&a, Some(&Account::new(200)));
        cache.del(&b); // B absent before the checkpoint
        cache.revert().unwrap();

        assert_eq!(
            cache.get(&a).unwrap(),
            Some(AccountEntry::Exists(v1)),
            "A must be back at its pre-checkpoint value"
        );
        assert_eq!(cache.get(&b).unwrap(), None, "no residual trace of B");
        assert_eq!(
            cache.get(&untouched).unwrap(),
            Some(AccountEntry::Exists(Account::new(7)))
        );
    }

    // =========================================================================
    // PROPERTY 2: COMMIT PRESERVES BACKEND, CONSOLIDATES DIFFS
    // =========================================================================

    #[test]
    fn test_commit_keeps_outer_pre_image_alive() {
        let mut cache = account_cache();
        let a = [0x01; 20];
        let v1 = Account::new(1);

        cache.put(&a, Some(&v1));
        cache.checkpoint();
        cache.put(&a, Some(&Account::new(2)));
        cache.checkpoint();
        cache.put(&a, Some(&Account::new(3)));

        cache.commit().unwrap();
        assert_eq!(
            cache.get(&a).unwrap(),
            Some(AccountEntry::Exists(Account::new(3))),
            "commit must not touch the live value"
        );

        // Reverting the (originally outer) checkpoint lands before both
        cache.revert().unwrap();
        assert_eq!(cache.get(&a).unwrap(), Some(AccountEntry::Exists(v1)));
    }

    // =========================================================================
    // PROPERTY 3: FIRST-MUTATION-ONLY DIFF CAPTURE
    // =========================================================================

    #[test]
    fn test_second_write_does_not_overwrite_pre_image() {
        let mut cache = account_cache();
        let a = [0x02; 20];
        let v1 = Account::new(1);

        cache.put(&a, Some(&v1));
        cache.checkpoint();
        cache.put(&a, Some(&Account::new(2)));
        cache.put(&a, Some(&Account::new(3)));
        cache.revert().unwrap();

        // v1, never v2
        assert_eq!(cache.get(&a).unwrap(), Some(AccountEntry::Exists(v1)));
    }

    // =========================================================================
    // PROPERTY 4: FLUSH IDEMPOTENCE
    // =========================================================================

    #[test]
    fn test_flush_twice_second_is_empty() {
        let mut cache = account_cache();
        cache.put(&[0x03; 20], Some(&Account::new(10)));
        cache.put(&[0x04; 20], None);

        let first = cache.flush().unwrap();
        assert_eq!(first.len(), 2);

        let second = cache.flush().unwrap();
        assert!(second.is_empty());
    }

    // =========================================================================
    // PROPERTY 5: DEPTH INVARIANT
    // =========================================================================

    #[test]
    fn test_commit_revert_at_depth_zero_fail_cleanly() {
        let mut cache = account_cache();
        let a = [0x05; 20];
        cache.put(&a, Some(&Account::new(1)));
        let stats_before = cache.stats();

        assert_eq!(cache.commit(), Err(CacheError::NoOpenCheckpoint));
        assert_eq!(cache.revert(), Err(CacheError::NoOpenCheckpoint));

        assert_eq!(cache.checkpoint_depth(), 0);
        assert_eq!(cache.stats(), stats_before, "failed ops must not count");
        assert_eq!(
            cache.get(&a).unwrap(),
            Some(AccountEntry::Exists(Account::new(1)))
        );
    }

    // =========================================================================
    // PROPERTY 6: NEGATIVE CACHING DISTINCTION
    // =========================================================================

    #[test]
    fn test_cached_negative_vs_never_written() {
        let mut cache = account_cache();
        let known_missing = [0x06; 20];
        let never_written = [0x07; 20];

        cache.put(&known_missing, None);

        assert_eq!(
            cache.get(&known_missing).unwrap(),
            Some(AccountEntry::Missing),
            "negative entry must be observable"
        );
        assert_eq!(cache.get(&never_written).unwrap(), None);
    }

    // =========================================================================
    // PROPERTY 7: ADDRESS-SCOPED STORAGE CLEAR
    // =========================================================================

    #[test]
    fn test_clear_contract_storage_all_and_only_then_revert() {
        let mut cache = storage_cache();
        let victim = [0xAA; 20];
        let bystander = [0xAB; 20]; // shares no 20-byte prefix despite similar bytes

        cache.put(&victim, &[0x01; 32], Some(vec![0x11]));
        cache.put(&victim, &[0x02; 32], Some(vec![0x22]));
        cache.put(&bystander, &[0x01; 32], Some(vec![0x33]));

        cache.checkpoint();
        cache.clear_contract_storage(&victim);

        assert!(cache.get(&victim, &[0x01; 32]).unwrap().encoded.is_none());
        assert!(cache.get(&victim, &[0x02; 32]).unwrap().encoded.is_none());
        assert_eq!(
            cache.get(&bystander, &[0x01; 32]).unwrap().encoded,
            Some(vec![0x33]),
            "bystander contract must be untouched"
        );

        cache.revert().unwrap();
        assert_eq!(
            cache.get(&victim, &[0x01; 32]).unwrap().encoded,
            Some(vec![0x11])
        );
        assert_eq!(
            cache.get(&victim, &[0x02; 32]).unwrap().encoded,
            Some(vec![0x22])
        );
    }

    // =========================================================================
    // FLUSH → TRIE APPLICATION
    // =========================================================================

    #[test]
    fn test_flush_output_applies_to_a_mock_trie() {
        use std::collections::HashMap;

        let mut cache = account_cache();
        let mut trie: HashMap<[u8; 20], Vec<u8>> = HashMap::new();
        trie.insert([0x0A; 20], Account::new(1).to_rlp());
        trie.insert([0x0B; 20], Account::new(2).to_rlp());

        // VM deletes 0x0A and credits 0x0B
        cache.del(&[0x0A; 20]);
        cache.put(&[0x0B; 20], Some(&Account::new(500)));

        for (address, element) in cache.flush().unwrap() {
            match element.encoded {
                Some(bytes) => {
                    trie.insert(address, bytes);
                }
                None => {
                    trie.remove(&address);
                }
            }
        }

        assert!(!trie.contains_key(&[0x0A; 20]));
        assert_eq!(
            Account::from_rlp(&trie[&[0x0B; 20]]).unwrap(),
            Account::new(500)
        );
    }
}
