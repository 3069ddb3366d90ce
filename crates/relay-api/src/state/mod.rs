//! Application state
//!
//! Shared state for the Axum application: the service context, the relay
//! router, and configuration.

use std::sync::Arc;

use axum::extract::FromRef;
use relay_common::{AppConfig, SessionStore};
use relay_gateway::{GatewayState, PresenceRegistry, RelayRouter};
use relay_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// The relay router (owns the presence registry)
    router: Arc<RelayRouter>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: Arc<ServiceContext>,
        router: Arc<RelayRouter>,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context,
            router,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the relay router
    pub fn router(&self) -> &Arc<RelayRouter> {
        &self.router
    }

    /// Get the presence registry
    pub fn registry(&self) -> &PresenceRegistry {
        self.router.registry()
    }

    /// Get the session store
    pub fn sessions(&self) -> &SessionStore {
        self.service_context.sessions()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl FromRef<AppState> for GatewayState {
    fn from_ref(state: &AppState) -> Self {
        GatewayState::new(state.router.clone())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("router", &self.router)
            .field("config", &"AppConfig")
            .finish()
    }
}
