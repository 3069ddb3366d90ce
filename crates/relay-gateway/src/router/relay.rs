//! Relay router
//!
//! Dispatches typed client events against the presence registry and the
//! message service. Action errors are scoped to the originating
//! connection: they come back as an `error` event and never disturb
//! other connections or the relay itself.

use std::sync::Arc;

use parking_lot::Mutex;
use relay_core::{DomainError, Snowflake};
use relay_service::{MessageService, ServiceContext, ServiceError};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::connection::ConnectionHandle;
use crate::events::{ClientEvent, ServerEvent};
use crate::presence::PresenceRegistry;

/// What the transport should do after dispatching an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Keep the connection open
    Continue,
    /// Tear the connection down (logout)
    Close,
}

/// Routes client events between connections, presence, and storage
pub struct RelayRouter {
    registry: Arc<PresenceRegistry>,
    ctx: Arc<ServiceContext>,
    /// Serializes presence mutations with their broadcasts: snapshots
    /// reach every connection's queue in mutation order, so no viewer
    /// sees a departed user reappear.
    presence_lock: Mutex<()>,
}

impl RelayRouter {
    /// Create a new router
    pub fn new(registry: Arc<PresenceRegistry>, ctx: Arc<ServiceContext>) -> Self {
        Self {
            registry,
            ctx,
            presence_lock: Mutex::new(()),
        }
    }

    /// Get the presence registry
    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    /// Get the service context
    pub fn ctx(&self) -> &Arc<ServiceContext> {
        &self.ctx
    }

    /// Bring a freshly authenticated connection online
    ///
    /// Registers the handle, gives the new connection its view of the
    /// active set, then refreshes everyone else's view.
    #[instrument(skip_all, fields(connection_id = %handle.id(), user_id = %handle.user_id()))]
    pub fn connect(&self, handle: Arc<ConnectionHandle>) {
        let _guard = self.presence_lock.lock();
        self.registry.register(handle.clone());
        info!("Connection online");

        handle.push(ServerEvent::ActiveUsers(
            self.registry.active_users(handle.user_id()),
        ));
        self.broadcast_presence(Some(handle.id()));
    }

    /// Dispatch one client event
    #[instrument(skip_all, fields(connection_id = %handle.id(), user_id = %handle.user_id()))]
    pub async fn dispatch(&self, handle: &Arc<ConnectionHandle>, event: ClientEvent) -> Disposition {
        match event {
            ClientEvent::Login(payload) => {
                self.handle_login(handle, payload.user_id);
                Disposition::Continue
            }
            ClientEvent::Logout => {
                info!("Logout requested");
                self.disconnect(handle.id());
                Disposition::Close
            }
            ClientEvent::SendMessage(payload) => {
                if let Err(err) = self
                    .handle_send(handle, payload.sender_id, payload.receiver_id, payload.content)
                    .await
                {
                    Self::push_error(handle, &err);
                }
                Disposition::Continue
            }
            ClientEvent::History(payload) => {
                if let Err(err) = self.handle_history(handle, payload.peer_id).await {
                    Self::push_error(handle, &err);
                }
                Disposition::Continue
            }
        }
    }

    /// Tear down a connection that is gone
    ///
    /// The presence broadcast only happens when the owner actually went
    /// inactive; closing one of several tabs changes nothing for others.
    #[instrument(skip(self), fields(connection_id = %connection_id))]
    pub fn disconnect(&self, connection_id: Uuid) {
        let _guard = self.presence_lock.lock();
        if self.registry.unregister(connection_id) {
            debug!("Owner went inactive");
            self.broadcast_presence(None);
        }
    }

    /// Legacy resync hint: the handshake already authenticated the
    /// connection, so the claimed identity must match it.
    fn handle_login(&self, handle: &Arc<ConnectionHandle>, claimed: Snowflake) {
        if claimed == handle.user_id() {
            // Under the presence lock so the resync cannot land after a
            // newer snapshot
            let _guard = self.presence_lock.lock();
            handle.push(ServerEvent::ActiveUsers(
                self.registry.active_users(handle.user_id()),
            ));
        } else {
            Self::push_error(
                handle,
                &ServiceError::from(DomainError::SenderMismatch {
                    claimed,
                    authenticated: handle.user_id(),
                }),
            );
        }
    }

    async fn handle_send(
        &self,
        handle: &Arc<ConnectionHandle>,
        sender_id: Snowflake,
        receiver_id: Snowflake,
        content: String,
    ) -> Result<(), ServiceError> {
        if sender_id != handle.user_id() {
            return Err(DomainError::SenderMismatch {
                claimed: sender_id,
                authenticated: handle.user_id(),
            }
            .into());
        }

        let service = MessageService::new(&self.ctx);
        let message = service.send(sender_id, receiver_id, content).await?;

        // Durable now; fan out to the receiver's handles and the
        // sender's other handles. Best-effort, never blocking.
        for peer in self.registry.connections_of(receiver_id) {
            peer.push(ServerEvent::Message(message.clone()));
        }
        for sibling in self.registry.connections_of(sender_id) {
            if sibling.id() != handle.id() {
                sibling.push(ServerEvent::Message(message.clone()));
            }
        }

        debug!(message_id = %message.id, receiver_id = %receiver_id, "Message relayed");
        Ok(())
    }

    async fn handle_history(
        &self,
        handle: &Arc<ConnectionHandle>,
        peer_id: Snowflake,
    ) -> Result<(), ServiceError> {
        let service = MessageService::new(&self.ctx);
        let messages = service.history(handle.user_id(), peer_id).await?;
        handle.push(ServerEvent::History(messages));
        Ok(())
    }

    /// Push a fresh active-user snapshot to every live connection,
    /// excluding each viewer from its own list
    fn broadcast_presence(&self, skip: Option<Uuid>) {
        for connection in self.registry.all_connections() {
            if Some(connection.id()) == skip {
                continue;
            }
            connection.push(ServerEvent::ActiveUsers(
                self.registry.active_users(connection.user_id()),
            ));
        }
    }

    fn push_error(handle: &Arc<ConnectionHandle>, err: &ServiceError) {
        debug!(code = err.error_code(), error = %err, "Action failed");
        handle.push(ServerEvent::error(err.error_code(), err.to_string()));
    }
}

impl std::fmt::Debug for RelayRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayRouter")
            .field("registry", &self.registry)
            .finish()
    }
}
