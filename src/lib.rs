pub mod cache;
pub mod config;
pub mod ding;
pub mod error;
pub mod users;

pub use ding::{AccessToken, DingClient, SyncReport, TodoRequest};
pub use error::{DingError, DingResult};
