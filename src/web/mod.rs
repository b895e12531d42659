//! HTTP surface: router, shared state, page rendering and handlers.

/// Handler error to response mapping
pub mod error;
/// Route handlers
pub mod handlers;
/// Route table
pub mod router;
/// Shared handler state
pub mod state;
/// HTML page registry
pub mod views;

pub use error::WebError;
pub use router::build_router;
pub use state::AppState;
pub use views::Views;
