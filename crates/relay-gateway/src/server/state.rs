//! Gateway state
//!
//! Shared dependencies for the WebSocket transport.

use std::sync::Arc;

use relay_common::SessionStore;

use crate::router::RelayRouter;

/// State handed to the WebSocket handler
#[derive(Clone)]
pub struct GatewayState {
    router: Arc<RelayRouter>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(router: Arc<RelayRouter>) -> Self {
        Self { router }
    }

    /// Get the relay router
    pub fn router(&self) -> &Arc<RelayRouter> {
        &self.router
    }

    /// Get the session store
    pub fn sessions(&self) -> &SessionStore {
        self.router.ctx().sessions()
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("router", &self.router)
            .finish()
    }
}
