pub mod card;
pub mod deck;
pub mod grade;
pub mod leitner;
pub mod review_record;
pub mod review_session;
pub mod stats;

pub use card::{Card, DAY_MS, MASTERED_BOX, Timestamp};
pub use deck::Deck;
pub use grade::Grade;
pub use review_record::ReviewRecord;
pub use review_session::ReviewSession;
pub use stats::ReviewStats;
