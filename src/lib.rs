// Redis Map Library
//
// A string-to-string map stored in a Redis namespace, plus an in-memory
// implementation of the same contract.

pub mod config;
pub mod error;
pub mod key;
pub mod logging;
pub mod map;
pub mod pool;
pub mod text;

pub use config::MapConfig;
pub use error::MapError;
pub use key::KeyPrefix;
pub use map::{KeyValueMap, MemoryMap, RedisMap};
pub use text::AsText;
