#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod scheduler;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::app::AppConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::CurrentUser;
pub use middleware::request_trace::RequestTrace;
pub use scheduler::{PhaseJob, PhaseKind, PhaseQueue, PhaseRunner};
pub use services::game_flow::GameFlowService;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    meme_clash_test_support::logging::init();
}
