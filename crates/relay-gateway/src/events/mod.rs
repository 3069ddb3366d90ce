//! Wire protocol
//!
//! JSON text frames shaped `{"event": <name>, "data": <payload>}`.
//! Adjacent tagging lets serde do the event dispatch; handlers only ever
//! see an already-typed payload.

use relay_core::Snowflake;
use relay_service::MessageResponse;
use serde::{Deserialize, Serialize};

/// Events the client sends to the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Presence resync hint. Identity comes from the session cookie at
    /// handshake; this only re-requests the active-user snapshot.
    Login(LoginPayload),

    /// Relay-initiated teardown of this connection
    Logout,

    /// Send one message to a peer
    SendMessage(SendMessagePayload),

    /// Request the full conversation with a peer
    History(HistoryPayload),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub user_id: Snowflake,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPayload {
    pub peer_id: Snowflake,
}

/// Events the relay pushes to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// A message delivered live (sent to the receiver's handles and the
    /// sender's other handles)
    Message(MessageResponse),

    /// Full replacement of the active-user set, excluding the viewer
    ActiveUsers(Vec<Snowflake>),

    /// Conversation history, oldest first
    History(Vec<MessageResponse>),

    /// An action failed; scoped to the connection that caused it
    Error(ErrorPayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}

impl ServerEvent {
    /// Build an error event from a code and message
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error(ErrorPayload {
            code: code.into(),
            message: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_login_shape() {
        let json = r#"{"event":"login","data":{"userId":"42"}}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            ClientEvent::Login(LoginPayload {
                user_id: Snowflake::new(42)
            })
        );
    }

    #[test]
    fn test_client_event_logout_has_no_data() {
        let json = r#"{"event":"logout"}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, ClientEvent::Logout);
    }

    #[test]
    fn test_client_event_send_message_shape() {
        let json = r#"{"event":"sendMessage","data":{"senderId":"1","receiverId":"2","content":"hi"}}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        let ClientEvent::SendMessage(payload) = event else {
            panic!("wrong variant");
        };
        assert_eq!(payload.sender_id, Snowflake::new(1));
        assert_eq!(payload.receiver_id, Snowflake::new(2));
        assert_eq!(payload.content, "hi");
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let json = r#"{"event":"selfDestruct","data":{}}"#;
        assert!(serde_json::from_str::<ClientEvent>(json).is_err());
    }

    #[test]
    fn test_server_event_active_users_shape() {
        let event = ServerEvent::ActiveUsers(vec![Snowflake::new(1), Snowflake::new(2)]);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "activeUsers");
        assert_eq!(json["data"][0], "1");
        assert_eq!(json["data"][1], "2");
    }

    #[test]
    fn test_server_event_error_shape() {
        let event = ServerEvent::error("NOT_FOUND", "no such peer");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "error");
        assert_eq!(json["data"]["code"], "NOT_FOUND");
        assert_eq!(json["data"]["message"], "no such peer");
    }
}
