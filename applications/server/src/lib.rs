//! Duet Server Library
//!
//! HTTP front end for Duet: chat arbitration, direct audio commands and the
//! static track files, plus the console session used by `duet-server chat`.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod router;
pub mod session;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{AssistantMode, ServerConfig};
pub use console::ConsoleChannelFactory;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use session::{ChatSession, TurnOutcome};
pub use state::AppState;
