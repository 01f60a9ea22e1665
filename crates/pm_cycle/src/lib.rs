pub mod error;
pub mod logging;
pub mod manager;
pub mod schedule;

pub use error::{CycleError, Stage};
pub use logging::{init_logging, Logger};
pub use manager::{CycleManager, CycleReport, Delivery, ARTICLE_EXCERPT_CHARS};
pub use schedule::{run_scheduled, HumanDuration, Schedule};
