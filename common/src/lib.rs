pub mod config;
pub mod defaults;
pub mod driver;
pub mod logger;
pub mod profile;
pub mod session_rng;
pub mod snake;
pub mod stats;
pub mod validation;

pub use config::{StorageError, Validate};
pub use profile::{Profile, ProfileStore};
pub use session_rng::{RandomSource, SessionRng};
pub use stats::LifetimeStats;
