pub mod account_cache;
pub mod cache;
pub mod diff;
pub mod entities;
pub mod errors;
pub mod rlp;
pub mod storage_cache;

pub use account_cache::*;
pub use cache::*;
pub use diff::*;
pub use entities::*;
pub use errors::*;
pub use storage_cache::*;
