pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod scheduler;
pub mod seed;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{SchedulerError, StoreError};
pub use models::{Card, Deck, Grade, ReviewRecord, ReviewSession, ReviewStats, Timestamp};
pub use scheduler::ReviewScheduler;
pub use store::{CardStore, MemoryStore};
