pub mod analytics;
pub mod auth;
pub mod constants;
pub mod membership;
pub mod tracing;
