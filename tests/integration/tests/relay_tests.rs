//! Relay Integration Tests
//!
//! End-to-end WebSocket flows: handshake authentication, presence
//! broadcasts, live delivery, and history over the socket.
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test relay_tests

use integration_tests::{check_test_env, fixtures::*, session_token, TestServer, WsClient};
use relay_gateway::{events, ClientEvent, ServerEvent};

/// Register and log a fresh user in, returning (token, user_id)
async fn register_and_login(server: &TestServer) -> (String, String) {
    let register_req = RegisterRequest::unique();
    server.post("/api/register", &register_req).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/login", &login_req).await.unwrap();
    let token = session_token(&response).unwrap();
    let auth: AuthResponse = response.json().await.unwrap();
    (token, auth.user_id)
}

/// Receive events until the next activeUsers snapshot
async fn next_active_users(ws: &mut WsClient) -> Vec<String> {
    loop {
        if let ServerEvent::ActiveUsers(ids) = ws.recv().await.unwrap() {
            return ids.iter().map(ToString::to_string).collect();
        }
    }
}

/// Receive events until the next message push
async fn next_message(ws: &mut WsClient) -> ServerEvent {
    loop {
        let event = ws.recv().await.unwrap();
        if matches!(event, ServerEvent::Message(_)) {
            return event;
        }
    }
}

#[tokio::test]
async fn test_ws_rejects_missing_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let result = server.connect_ws("bogus-token").await;
    assert!(result.is_err(), "handshake should be rejected");
}

#[tokio::test]
async fn test_presence_and_delivery_flow() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token_a, user_a) = register_and_login(&server).await;
    let (token_b, user_b) = register_and_login(&server).await;

    // A connects alone
    let mut ws_a = server.connect_ws(&token_a).await.unwrap();
    assert!(next_active_users(&mut ws_a).await.is_empty());

    // B connects; both sides see each other
    let mut ws_b = server.connect_ws(&token_b).await.unwrap();
    assert_eq!(next_active_users(&mut ws_b).await, vec![user_a.clone()]);
    assert_eq!(next_active_users(&mut ws_a).await, vec![user_b.clone()]);

    // A sends to B
    ws_a.send(&ClientEvent::SendMessage(events::SendMessagePayload {
        sender_id: user_a.parse().unwrap(),
        receiver_id: user_b.parse().unwrap(),
        content: "hi".to_string(),
    }))
    .await
    .unwrap();

    let ServerEvent::Message(msg) = next_message(&mut ws_b).await else {
        unreachable!();
    };
    assert_eq!(msg.content, "hi");
    assert_eq!(msg.sender_id.to_string(), user_a);

    // B disconnects; A's view empties out
    ws_b.close().await.unwrap();
    assert!(next_active_users(&mut ws_a).await.is_empty());

    // History over the socket returns the conversation
    ws_a.send(&ClientEvent::History(events::HistoryPayload {
        peer_id: user_b.parse().unwrap(),
    }))
    .await
    .unwrap();

    loop {
        if let ServerEvent::History(messages) = ws_a.recv().await.unwrap() {
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].content, "hi");
            break;
        }
    }
}

#[tokio::test]
async fn test_history_is_shared_and_ordered_both_ways() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token_a, user_a) = register_and_login(&server).await;
    let (token_b, user_b) = register_and_login(&server).await;

    let mut ws_a = server.connect_ws(&token_a).await.unwrap();
    let mut ws_b = server.connect_ws(&token_b).await.unwrap();
    next_active_users(&mut ws_a).await;
    next_active_users(&mut ws_b).await;

    ws_a.send(&ClientEvent::SendMessage(events::SendMessagePayload {
        sender_id: user_a.parse().unwrap(),
        receiver_id: user_b.parse().unwrap(),
        content: "first".to_string(),
    }))
    .await
    .unwrap();
    next_message(&mut ws_b).await;

    ws_b.send(&ClientEvent::SendMessage(events::SendMessagePayload {
        sender_id: user_b.parse().unwrap(),
        receiver_id: user_a.parse().unwrap(),
        content: "second".to_string(),
    }))
    .await
    .unwrap();
    next_message(&mut ws_a).await;

    // Both participants fetch the same conversation, oldest first
    for (token, peer) in [(&token_a, &user_b), (&token_b, &user_a)] {
        let response = server
            .get_auth(&format!("/api/messages/{peer}"), token)
            .await
            .unwrap();
        let messages: Vec<MessageResponse> = response.json().await.unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["first", "second"]);
    }
}

#[tokio::test]
async fn test_spoofed_sender_gets_error_event() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token_a, _user_a) = register_and_login(&server).await;
    let (_token_b, user_b) = register_and_login(&server).await;

    let mut ws_a = server.connect_ws(&token_a).await.unwrap();
    next_active_users(&mut ws_a).await;

    // Claim to be B while authenticated as A
    ws_a.send(&ClientEvent::SendMessage(events::SendMessagePayload {
        sender_id: user_b.parse().unwrap(),
        receiver_id: user_b.parse().unwrap(),
        content: "forged".to_string(),
    }))
    .await
    .unwrap();

    loop {
        if let ServerEvent::Error(payload) = ws_a.recv().await.unwrap() {
            assert_eq!(payload.code, "AUTHORIZATION_ERROR");
            break;
        }
    }
}

#[tokio::test]
async fn test_malformed_frame_gets_error_event() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token_a, _user_a) = register_and_login(&server).await;

    let mut ws_a = server.connect_ws(&token_a).await.unwrap();
    next_active_users(&mut ws_a).await;

    ws_a.send_raw("this is not json").await.unwrap();

    loop {
        if let ServerEvent::Error(payload) = ws_a.recv().await.unwrap() {
            assert_eq!(payload.code, "VALIDATION_ERROR");
            break;
        }
    }
}
