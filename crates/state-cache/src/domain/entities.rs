//! # Domain Entities for the State Cache
//!
//! Core data structures shared by the cache engine and its two
//! instantiations (accounts, contract storage).
//!
//! ## Type Decisions
//!
//! - `balance: u128` - Sufficient for 340 undecillion base units while
//!   avoiding a big-integer dependency for a component that never does
//!   arithmetic on balances.
//! - Cache keys are canonical lowercase hex strings. An account key is 40
//!   chars (address), a storage key is 104 chars (address ++ slot), so
//!   address-scoped operations reduce to prefix scans.
//! - A cached *negative* ("known to not exist in the trie") is an element
//!   whose `encoded` is `None`. It is distinct from a key that is absent
//!   from the backend entirely ("not yet loaded").

use super::{rlp, CacheError};
use serde::{Deserialize, Serialize};

pub type Hash = [u8; 32];
pub type Address = [u8; 20];
pub type StorageKey = [u8; 32];

/// Canonical map key used by the cache engine: lowercase hex.
pub type CacheKey = String;

pub const ADDRESS_LEN: usize = 20;
pub const STORAGE_KEY_LEN: usize = 32;

/// Code hash of an account with no code (externally owned account).
pub const EMPTY_CODE_HASH: Hash = [0u8; 32];

/// Keccak256 hash of an empty RLP-encoded trie.
/// This is the canonical empty trie root per Ethereum specification.
pub const EMPTY_TRIE_ROOT: Hash = [
    0x56, 0xe8, 0x1f, 0x17, 0x1b, 0xcc, 0x55, 0xa6, 0xff, 0x83, 0x45, 0xe6, 0x92, 0xc0, 0xf8, 0x6e,
    0x5b, 0x48, 0xe0, 0x1b, 0x99, 0x6c, 0xad, 0xc0, 0x01, 0x62, 0x2f, 0xb5, 0xe3, 0x63, 0xb4, 0x21,
];

/// Validate an address taken from untrusted bytes.
///
/// Rejected before any cache mutation, so a failed call leaves the cache
/// untouched.
pub fn address_from_slice(bytes: &[u8]) -> Result<Address, CacheError> {
    bytes.try_into().map_err(|_| CacheError::InvalidKey {
        expected: ADDRESS_LEN,
        actual: bytes.len(),
    })
}

/// Validate a storage slot identifier taken from untrusted bytes.
pub fn storage_key_from_slice(bytes: &[u8]) -> Result<StorageKey, CacheError> {
    bytes.try_into().map_err(|_| CacheError::InvalidKey {
        expected: STORAGE_KEY_LEN,
        actual: bytes.len(),
    })
}

/// Account record as cached between the VM and the state trie.
///
/// ## Serialization
///
/// RLP-encoded as `[nonce, balance, storage_root, code_hash]`, matching
/// Ethereum's account encoding. This is the canonical byte form stored in
/// the cache backend and handed to the trie on flush.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Transaction nonce. Increments by exactly 1 per processed transaction.
    pub nonce: u64,
    /// Account balance in base units.
    pub balance: u128,
    /// Root hash of the account's storage trie.
    pub storage_root: Hash,
    /// Hash of contract code. `EMPTY_CODE_HASH` for non-contract accounts.
    pub code_hash: Hash,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            nonce: 0,
            balance: 0,
            storage_root: EMPTY_TRIE_ROOT,
            code_hash: EMPTY_CODE_HASH,
        }
    }
}

impl Account {
    /// Create a new account with the specified balance.
    pub fn new(balance: u128) -> Self {
        Self {
            balance,
            ..Default::default()
        }
    }

    /// Builder method to set nonce.
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// True if this account carries contract code.
    pub fn is_contract(&self) -> bool {
        self.code_hash != EMPTY_CODE_HASH
    }

    /// RLP-encode this account for caching and trie persistence.
    ///
    /// Encoding order: `[nonce, balance, storage_root, code_hash]`.
    pub fn to_rlp(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(128);
        rlp::encode_uint(&mut payload, self.nonce as u128);
        rlp::encode_uint(&mut payload, self.balance);
        rlp::encode_bytes(&mut payload, &self.storage_root);
        rlp::encode_bytes(&mut payload, &self.code_hash);
        rlp::wrap_list(payload)
    }

    /// Decode an account from its canonical RLP form.
    ///
    /// The backend stores opaque bytes, so decoding is defensive: any
    /// structural violation surfaces as `MalformedElement`.
    pub fn from_rlp(data: &[u8]) -> Result<Self, CacheError> {
        let items = rlp::decode_list(data)?;
        if items.len() != 4 {
            return Err(CacheError::MalformedElement(format!(
                "account record has {} fields, expected 4",
                items.len()
            )));
        }

        let nonce = u64::try_from(rlp::decode_uint(items[0])?)
            .map_err(|_| CacheError::MalformedElement("nonce exceeds u64".into()))?;
        let balance = rlp::decode_uint(items[1])?;
        let storage_root: Hash = items[2]
            .try_into()
            .map_err(|_| CacheError::MalformedElement("storage root is not 32 bytes".into()))?;
        let code_hash: Hash = items[3]
            .try_into()
            .map_err(|_| CacheError::MalformedElement("code hash is not 32 bytes".into()))?;

        Ok(Self {
            nonce,
            balance,
            storage_root,
            code_hash,
        })
    }
}

/// Payload type stored by the cache engine.
///
/// `negative()` produces the "known to not exist" marker so the generic
/// engine can implement `del` without knowing the element shape.
pub trait Element: Clone + Send + 'static {
    fn negative() -> Self;
    fn is_negative(&self) -> bool;
}

/// Cached account payload: canonical RLP bytes, or a cached negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountElement {
    pub encoded: Option<Vec<u8>>,
}

impl AccountElement {
    pub fn from_account(account: &Account) -> Self {
        Self {
            encoded: Some(account.to_rlp()),
        }
    }
}

impl Element for AccountElement {
    fn negative() -> Self {
        Self { encoded: None }
    }

    fn is_negative(&self) -> bool {
        self.encoded.is_none()
    }
}

/// Cached storage-slot payload: raw slot bytes, or a cached negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageElement {
    pub encoded: Option<Vec<u8>>,
}

impl Element for StorageElement {
    fn negative() -> Self {
        Self { encoded: None }
    }

    fn is_negative(&self) -> bool {
        self.encoded.is_none()
    }
}

/// Backend variant selected at engine construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendKind {
    /// Bounded store; inserting beyond capacity evicts the
    /// least-recently-used entry.
    Lru { capacity: usize },
    /// Unbounded store; preserves insertion order.
    Ordered,
}

/// Configuration for one cache engine instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    pub kind: BackendKind,
}

impl CacheConfig {
    pub fn lru(capacity: usize) -> Self {
        Self {
            kind: BackendKind::Lru { capacity },
        }
    }

    pub fn ordered() -> Self {
        Self {
            kind: BackendKind::Ordered,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::lru(100_000)
    }
}
