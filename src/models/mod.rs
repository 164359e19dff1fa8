pub mod log;
pub mod profile;

pub use log::DailyLog;
pub use profile::{UserProfile, DAYS_OF_WEEK, PROFILE_SCHEMA_VERSION};
