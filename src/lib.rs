//! News API: REST backend for topics, articles, comments and users on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{Settings, VotePolicy};
pub use error::{AppError, ConfigError};
pub use routes::{api_routes, app, common_routes};
pub use service::{ArticleService, CommentService};
pub use state::AppState;
pub use store::{PgStore, Store};
#[cfg(any(test, feature = "test-support"))]
pub use store::MemoryStore;
