//! App view-model tests
//!
//! These drive a real `App` against an httpmock backend and observe the
//! send/poll cycle the way the event loop does.

use crate::client::{ChatError, ChatReply};
use crate::config::Config;
use crate::connectivity::ConnectivityState;
use crate::store::{MessageKind, Sender};
use crate::tui::App;
use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::json;
use std::time::Duration;

fn app_for(server: &MockServer) -> App {
    App::new(Config {
        base_url: server.base_url(),
        request_timeout_secs: 2,
    })
}

/// App pointed at a port nothing listens on
fn unreachable_app() -> App {
    App::new(Config {
        base_url: "http://127.0.0.1:9".to_string(),
        request_timeout_secs: 1,
    })
}

fn poll_chat_to_resolution(app: &mut App) {
    for _ in 0..400 {
        if app.poll_chat_response() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("chat request did not resolve in time");
}

fn poll_recheck_to_resolution(app: &mut App) {
    for _ in 0..400 {
        if app.poll_recheck() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("health check did not resolve in time");
}

#[test]
fn test_new_app_seeds_greeting() {
    let app = unreachable_app();

    assert_eq!(app.store.len(), 1);
    let greeting = &app.store.all()[0];
    assert_eq!(greeting.sender, Sender::Assistant);
    assert!(!greeting.is_error());
    assert_eq!(app.connectivity.state(), ConnectivityState::Checking);
    assert!(!app.is_pending());
}

#[test]
fn test_send_appends_user_message_before_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat");
        then.status(200).json_body(json!({"response": "Hello!"}));
    });

    let mut app = app_for(&server);
    app.input = "  what laptops do you have?  ".to_string();
    app.send_message();

    // The user message lands immediately and exactly once, trimmed;
    // the reply is not applied until the next poll.
    assert_eq!(app.store.len(), 2);
    let user_msg = &app.store.all()[1];
    assert_eq!(user_msg.sender, Sender::User);
    assert_eq!(user_msg.text, "what laptops do you have?");
    assert!(app.input.is_empty());
    assert!(app.is_pending());

    poll_chat_to_resolution(&mut app);
}

#[test]
fn test_send_rejected_when_input_blank() {
    let mut app = unreachable_app();

    app.input = "   \t ".to_string();
    app.send_message();

    assert_eq!(app.store.len(), 1);
    assert!(!app.is_pending());
}

#[test]
fn test_send_rejected_while_pending() {
    let mut app = unreachable_app();

    // Simulate an in-flight request that resolves with a failure later
    app.chat_handle = Some(std::thread::spawn(
        || -> Result<ChatReply, ChatError> {
            std::thread::sleep(Duration::from_millis(100));
            Err(ChatError::Network("injected".to_string()))
        },
    ));

    app.input = "second message".to_string();
    app.send_message();

    // Rejected outright: no store mutation, input untouched
    assert_eq!(app.store.len(), 1);
    assert_eq!(app.input, "second message");

    // The original request still resolves and cleans up the pending flag
    poll_chat_to_resolution(&mut app);
    assert!(!app.is_pending());
    assert!(app.store.all().last().unwrap().is_error());
    assert_eq!(app.connectivity.state(), ConnectivityState::Offline);
}

#[test]
fn test_send_rejected_when_offline() {
    let mut app = unreachable_app();
    app.connectivity.mark_offline();

    app.input = "hello?".to_string();
    app.send_message();

    assert_eq!(app.store.len(), 1);
    assert!(!app.is_pending());
    assert_eq!(app.input, "hello?");
}

#[test]
fn test_successful_roundtrip_appends_one_assistant_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/chat")
            .json_body(json!({"message": "find me a laptop"}));
        then.status(200).json_body(json!({
            "response": "Try https://shop.test/laptops",
            "products_found": 4,
            "classification_result": "electronics"
        }));
    });

    let mut app = app_for(&server);
    app.input = "find me a laptop".to_string();
    app.send_message();
    poll_chat_to_resolution(&mut app);

    assert_eq!(app.store.len(), 3); // greeting, user, assistant
    let reply = app.store.all().last().unwrap();
    assert_eq!(reply.sender, Sender::Assistant);
    assert_eq!(reply.kind, MessageKind::Normal);
    assert_eq!(reply.text, "Try https://shop.test/laptops");

    let metadata = reply.metadata.as_ref().expect("metadata expected");
    assert_eq!(metadata.products_found, Some(4));
    assert_eq!(metadata.classification, Some(json!("electronics")));

    assert!(!app.is_pending());
}

#[test]
fn test_http_failure_appends_error_and_goes_offline() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat");
        then.status(500);
    });

    let mut app = app_for(&server);
    app.input = "hello".to_string();
    app.send_message();
    poll_chat_to_resolution(&mut app);

    assert_eq!(app.store.len(), 3); // greeting, user, error notice
    let notice = app.store.all().last().unwrap();
    assert!(notice.is_error());
    assert!(notice.text.contains("HTTP 500"), "got: {}", notice.text);

    assert_eq!(app.connectivity.state(), ConnectivityState::Offline);
    assert!(!app.is_pending());
}

#[test]
fn test_network_failure_appends_error_and_goes_offline() {
    let mut app = unreachable_app();

    app.input = "anyone there?".to_string();
    app.send_message();
    poll_chat_to_resolution(&mut app);

    let notice = app.store.all().last().unwrap();
    assert!(notice.is_error());
    assert!(notice.text.starts_with("Request failed:"));
    assert_eq!(app.connectivity.state(), ConnectivityState::Offline);
    assert!(!app.is_pending());
}

#[test]
fn test_user_message_never_rolled_back_on_failure() {
    let mut app = unreachable_app();

    app.input = "keep me".to_string();
    app.send_message();
    poll_chat_to_resolution(&mut app);

    let texts: Vec<&str> = app.store.all().iter().map(|m| m.text.as_str()).collect();
    assert!(texts.contains(&"keep me"));
}

#[test]
fn test_recheck_success_goes_online() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(200).body("ok");
    });

    let mut app = app_for(&server);
    app.trigger_recheck();
    assert_eq!(app.connectivity.state(), ConnectivityState::Checking);
    assert!(app.health_handle.is_some());

    poll_recheck_to_resolution(&mut app);
    assert_eq!(app.connectivity.state(), ConnectivityState::Online);

    // Repetition is idempotent
    app.trigger_recheck();
    poll_recheck_to_resolution(&mut app);
    assert_eq!(app.connectivity.state(), ConnectivityState::Online);
}

#[test]
fn test_recheck_failure_goes_offline() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(503);
    });

    let mut app = app_for(&server);
    app.trigger_recheck();
    poll_recheck_to_resolution(&mut app);

    assert_eq!(app.connectivity.state(), ConnectivityState::Offline);
}

#[test]
fn test_trigger_recheck_is_noop_while_running() {
    let mut app = unreachable_app();

    app.trigger_recheck();
    let first = app.health_handle.as_ref().map(|(token, _)| *token);
    app.trigger_recheck();
    let second = app.health_handle.as_ref().map(|(token, _)| *token);

    // The second trigger must not replace the in-flight check
    assert_eq!(first, second);
    poll_recheck_to_resolution(&mut app);
}

#[test]
fn test_input_editing() {
    let mut app = unreachable_app();

    for c in "hey".chars() {
        app.push_char(c);
    }
    assert_eq!(app.input, "hey");

    app.backspace();
    assert_eq!(app.input, "he");
}

#[test]
fn test_input_ignored_when_offline() {
    let mut app = unreachable_app();
    app.connectivity.mark_offline();

    app.push_char('x');
    app.backspace();
    assert!(app.input.is_empty());
    assert!(!app.input_enabled());
}

#[test]
fn test_input_ignored_while_pending() {
    let mut app = unreachable_app();
    app.chat_handle = Some(std::thread::spawn(
        || -> Result<ChatReply, ChatError> {
            std::thread::sleep(Duration::from_millis(50));
            Err(ChatError::Network("injected".to_string()))
        },
    ));

    app.push_char('x');
    assert!(app.input.is_empty());

    poll_chat_to_resolution(&mut app);
}

#[test]
fn test_scroll_bounds() {
    let mut app = unreachable_app();
    for i in 0..4 {
        app.store.append(crate::store::Message::user(format!("m{}", i)));
    }
    // 5 messages including the greeting: offset is capped at len - 1
    for _ in 0..20 {
        app.scroll_up();
    }
    assert_eq!(app.scroll_offset, 4);

    for _ in 0..20 {
        app.scroll_down();
    }
    assert_eq!(app.scroll_offset, 0);
}

#[test]
fn test_append_repins_scroll_to_newest() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat");
        then.status(200).json_body(json!({"response": "done"}));
    });

    let mut app = app_for(&server);
    app.store.append(crate::store::Message::user("old"));
    app.scroll_up();
    assert!(app.scroll_offset > 0);

    app.input = "newest".to_string();
    app.send_message();
    assert_eq!(app.scroll_offset, 0);

    app.scroll_up();
    poll_chat_to_resolution(&mut app);
    assert_eq!(app.scroll_offset, 0);
}
