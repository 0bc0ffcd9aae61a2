//! HTTP handlers: translate requests into service calls, wrap results under their resource key.

pub mod articles;
pub mod comments;
pub mod endpoints;
pub mod topics;
pub mod users;
