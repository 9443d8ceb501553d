// Core client library for the Learnora dashboard: wire types, REST transport,
// configuration, and the request/event plumbing the terminal UI is built on.

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod types;

pub use api::{HttpApi, LearnoraApi};
pub use config::ClientConfig;
pub use dispatcher::Dispatcher;
pub use error::ApiError;
pub use events::{ApiEvent, ApiRequest, DashboardSnapshot};

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
