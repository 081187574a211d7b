//! Session-scoped wallet cache
//!
//! SQLite-backed cache keyed to the anchor address of the current
//! investigative session. Changing the anchor clears all wallet records;
//! there is no time- or size-based eviction.

mod sqlite;

pub use sqlite::{CacheConfig, CacheStats, SessionCache};
