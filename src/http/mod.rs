//! HTTP listener.
//!
//! The server binds first and only then announces itself, so a port that is
//! already taken surfaces as a `ServerError::Bind` before any "Listening"
//! notice. In-flight requests are drained on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{bind, serve, start_server, ServerError};
pub use shutdown::shutdown_signal;
