//! # relay-gateway
//!
//! The relay core: live connection handles, the presence registry, the
//! event protocol spoken over the WebSocket, the router that ties them
//! to the message store, and the axum WebSocket transport.

pub mod connection;
pub mod events;
pub mod presence;
pub mod router;
pub mod server;

pub use connection::ConnectionHandle;
pub use events::{ClientEvent, ErrorPayload, ServerEvent};
pub use presence::PresenceRegistry;
pub use router::{Disposition, RelayRouter};
pub use server::{ws_handler, GatewayState};
