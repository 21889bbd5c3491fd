pub mod config;
pub mod error;
pub mod logging;

pub use config::{HeraldConfig, LoggingConfig, NotifierConfig};
pub use error::{HeraldError, HeraldResult};
pub use logging::init_logging;
