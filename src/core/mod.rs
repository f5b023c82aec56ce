pub mod config;
pub mod driver;

pub use config::{BrowserConfig, Config, SessionConfig};
pub use driver::Driver;
