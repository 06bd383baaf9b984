//! Tracing subscriber setup shared by the service-status binaries.

mod subscriber;

pub use subscriber::{LogFormat, init};
