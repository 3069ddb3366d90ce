//! WebSocket handler
//!
//! The session cookie is verified before the upgrade; a connection that
//! reaches `handle_socket` is authenticated for its whole lifetime.

use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use futures_util::{SinkExt, StreamExt};
use relay_common::SESSION_COOKIE;
use relay_core::Snowflake;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::connection::ConnectionHandle;
use crate::events::{ClientEvent, ServerEvent};
use crate::router::Disposition;
use crate::server::GatewayState;

/// Per-connection outgoing buffer. Fan-out uses `try_send`, so this is
/// the slack a slow client gets before pushes are dropped.
const EVENT_BUFFER_SIZE: usize = 64;

/// WebSocket entry point
///
/// Rejects the handshake with 401 when the session cookie is missing,
/// unknown, or expired. There is no anonymous fallback.
pub async fn ws_handler(
    State(state): State<GatewayState>,
    jar: CookieJar,
    ws: WebSocketUpgrade,
) -> Response {
    let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        tracing::debug!("WebSocket handshake without session cookie");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    match state.sessions().verify(&token) {
        Ok(user_id) => ws.on_upgrade(move |socket| handle_socket(state, socket, user_id)),
        Err(err) => {
            tracing::debug!(error = %err, "WebSocket handshake with bad session");
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
}

/// Drive one upgraded, authenticated connection
async fn handle_socket(
    state: GatewayState,
    socket: axum::extract::ws::WebSocket,
    user_id: Snowflake,
) {
    let (tx, mut rx) = mpsc::channel::<ServerEvent>(EVENT_BUFFER_SIZE);
    let handle = ConnectionHandle::new(user_id, tx);
    let connection_id = handle.id();

    tracing::info!(
        connection_id = %connection_id,
        user_id = %user_id,
        "WebSocket connection established"
    );

    state.router().connect(handle.clone());

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Send task: serialize router pushes onto the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize outgoing event");
                }
            }
        }
        let _ = ws_sink.close().await;
    });

    // Receive task: parse frames and dispatch them through the router
    let router = state.router().clone();
    let recv_handle = handle.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::debug!(
                                connection_id = %recv_handle.id(),
                                error = %e,
                                "Unparseable frame"
                            );
                            recv_handle.push(ServerEvent::error(
                                "VALIDATION_ERROR",
                                "malformed event frame",
                            ));
                            continue;
                        }
                    };

                    if router.dispatch(&recv_handle, event).await == Disposition::Close {
                        return;
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(
                        connection_id = %recv_handle.id(),
                        "Client closed connection"
                    );
                    return;
                }
                // Pong replies are handled by axum
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Binary(_)) => {}
                Err(e) => {
                    tracing::debug!(
                        connection_id = %recv_handle.id(),
                        error = %e,
                        "WebSocket error"
                    );
                    return;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    }

    cleanup_connection(&state, &handle);
}

/// Unregister the handle and broadcast presence when the owner vanished
fn cleanup_connection(state: &GatewayState, handle: &Arc<ConnectionHandle>) {
    tracing::info!(
        connection_id = %handle.id(),
        user_id = %handle.user_id(),
        "WebSocket connection closed"
    );
    state.router().disconnect(handle.id());
}
