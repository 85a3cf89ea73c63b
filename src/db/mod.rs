pub mod log;
pub mod migrate;
pub mod pool;
pub mod repo;
pub mod stats;
pub mod store;

pub use repo::{Repository, SeedContext};
pub use store::{MemoryStore, RecordStore, SqliteStore, StoreKey};
