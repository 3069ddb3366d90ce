//! Live connection handles

mod handle;

pub use handle::ConnectionHandle;
