//! Event routing

mod relay;

pub use relay::{Disposition, RelayRouter};
