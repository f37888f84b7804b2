//! HTTP transport to the feedback platform.
//!
//! [`HttpTransport`] implements the application's `FeedbackTransport` port
//! with reqwest. Non-2xx responses become `TransportFailure` with a message
//! chosen by [`failure_message`].

mod failure;
mod transport;

pub use failure::failure_message;
pub use transport::{API_KEY_HEADER, HttpTransport, TransportSetupError};
