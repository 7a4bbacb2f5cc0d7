//! Integration tests for the session controller and runtime.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - What the view was told to render
//! - Which frames reached the transport
//! - Session state after the flow

#![allow(clippy::disallowed_types, reason = "Shared log between test driver and assertions")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, TimeZone, Utc};
use huddle_app::{
    AppAction, AppEvent, ClientConfig, Driver, Intent, Render, Runtime, SessionController,
};
use huddle_core::{ConnectionState, Direction, Environment, RegistrationError};
use huddle_proto::{Inbound, User, decode};

#[derive(Debug, Clone)]
struct FixedEnv;

impl Environment for FixedEnv {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }
}

fn alice() -> User {
    User::new(1, "alice")
}

fn controller() -> SessionController<FixedEnv> {
    SessionController::new(FixedEnv, ClientConfig::default())
}

/// Register alice and report the transport open.
fn open_controller() -> SessionController<FixedEnv> {
    let mut controller = controller();
    let _ = controller.handle(Intent::Login { nickname: "alice".into() }.into());
    let _ = controller.handle(AppEvent::Registered(Ok(alice())));
    let _ = controller.handle(AppEvent::TransportOpened);
    controller
}

fn roster_labels(actions: &[AppAction]) -> Vec<String> {
    actions
        .iter()
        .find_map(|action| match action {
            AppAction::Render(Render::Roster(view)) => Some(view.labels()),
            _ => None,
        })
        .expect("roster render")
}

#[test]
fn empty_nickname_issues_no_request() {
    let mut controller = controller();
    let actions = controller.handle(Intent::Login { nickname: String::new() }.into());

    assert_eq!(actions, vec![AppAction::Render(Render::LoginHint(
        "Nickname cannot be empty".into()
    ))]);
    assert!(controller.session().is_none());
}

#[test]
fn registration_renders_local_user() {
    let mut controller = controller();
    let _ = controller.handle(Intent::Login { nickname: "alice".into() }.into());
    let actions = controller.handle(AppEvent::Registered(Ok(alice())));

    assert_eq!(roster_labels(&actions), vec!["You (alice)"]);
    assert!(actions.contains(&AppAction::Dial { address: "ws://localhost:3000".into() }));
}

#[test]
fn snapshot_puts_local_user_first() {
    let mut controller = open_controller();
    let actions = controller.handle(AppEvent::FrameReceived {
        raw: r#"[{"id":2,"name":"bob"}]"#.into(),
    });

    assert_eq!(roster_labels(&actions), vec!["You (alice)", "bob"]);
}

#[test]
fn snapshot_containing_local_user_lists_it_once() {
    let mut controller = open_controller();
    let actions = controller.handle(AppEvent::FrameReceived {
        raw: r#"[{"id":2,"name":"bob"},{"id":1,"name":"alice"}]"#.into(),
    });

    assert_eq!(roster_labels(&actions), vec!["You (alice)", "bob"]);
}

#[test]
fn empty_snapshot_shows_nobody_online() {
    let mut controller = open_controller();
    let actions = controller.handle(AppEvent::FrameReceived { raw: "[]".into() });

    assert_eq!(roster_labels(&actions), vec!["No one else online"]);
}

#[test]
fn send_while_connecting_is_dropped() {
    let mut controller = controller();
    let _ = controller.handle(Intent::Login { nickname: "alice".into() }.into());
    let _ = controller.handle(AppEvent::Registered(Ok(alice())));

    let state = controller.session().map(huddle_app::Session::connection_state);
    assert_eq!(state, Some(ConnectionState::Connecting));
    let actions = controller.handle(Intent::Send { text: "hello".into() }.into());

    assert!(actions.is_empty());
}

#[test]
fn truncated_frame_leaves_session_untouched() {
    let mut controller = open_controller();
    let actions = controller.handle(AppEvent::FrameReceived { raw: "{".into() });

    assert!(actions.is_empty());
    let session = controller.session().expect("session");
    assert_eq!(session.connection_state(), ConnectionState::Open);
    assert!(session.transcript().is_empty());
}

#[test]
fn messages_from_others_are_appended() {
    let mut controller = open_controller();
    let actions = controller.handle(AppEvent::FrameReceived {
        raw: r#"{"type":"send","message":"hey","user":{"id":2,"name":"bob"}}"#.into(),
    });

    let [AppAction::Render(Render::Message { message, direction })] = actions.as_slice() else {
        panic!("expected one message render, got {actions:?}");
    };
    assert_eq!(*direction, Direction::Other);
    assert_eq!(message.header(controller.current_user()), "bob");

    let transcript = controller.session().expect("session").transcript();
    assert_eq!(transcript.len(), 1);
}

#[test]
fn peer_close_of_open_connection_is_errored() {
    let mut controller = open_controller();
    let actions = controller.handle(AppEvent::TransportClosed);

    assert_eq!(actions, vec![AppAction::Render(Render::Status(ConnectionState::Errored))]);
}

#[test]
fn unload_sends_exit_then_closes() {
    let mut controller = open_controller();
    let actions = controller.handle(Intent::Unload.into());

    let [AppAction::SendText(farewell), AppAction::CloseTransport, AppAction::Quit] =
        actions.as_slice()
    else {
        panic!("unexpected unload actions: {actions:?}");
    };
    let value: serde_json::Value = serde_json::from_str(farewell).unwrap();
    assert_eq!(value["type"], "exit");
    assert_eq!(value["user"]["name"], "alice");
}

#[test]
fn unload_while_connecting_skips_exit_notice() {
    let mut controller = controller();
    let _ = controller.handle(Intent::Login { nickname: "alice".into() }.into());
    let _ = controller.handle(AppEvent::Registered(Ok(alice())));

    let actions = controller.handle(Intent::Unload.into());
    assert_eq!(actions, vec![AppAction::CloseTransport, AppAction::Quit]);
}

/// Error type for the scripted driver.
#[derive(Debug, Clone)]
struct ScriptError(String);

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScriptError: {}", self.0)
    }
}

impl std::error::Error for ScriptError {}

/// Everything the runtime asked the driver to do.
#[derive(Debug, Default)]
struct Log {
    renders: Vec<Render>,
    registered: Vec<String>,
    dialed: Vec<String>,
    sent: Vec<String>,
    closed: usize,
    stopped: bool,
}

/// Driver that replays a fixed event script.
struct ScriptedDriver {
    events: VecDeque<AppEvent>,
    registration: Result<User, RegistrationError>,
    dial_fails: bool,
    log: Arc<Mutex<Log>>,
}

impl ScriptedDriver {
    fn new(events: impl IntoIterator<Item = AppEvent>) -> (Self, Arc<Mutex<Log>>) {
        let log = Arc::new(Mutex::new(Log::default()));
        let driver = Self {
            events: events.into_iter().collect(),
            registration: Ok(alice()),
            dial_fails: false,
            log: Arc::clone(&log),
        };
        (driver, log)
    }
}

impl Driver for ScriptedDriver {
    type Error = ScriptError;

    async fn next_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        Ok(self.events.pop_front())
    }

    async fn register(&mut self, nickname: &str) -> Result<User, RegistrationError> {
        self.log.lock().unwrap().registered.push(nickname.to_owned());
        self.registration.clone()
    }

    async fn dial(&mut self, address: &str) -> Result<(), Self::Error> {
        self.log.lock().unwrap().dialed.push(address.to_owned());
        if self.dial_fails { Err(ScriptError("connection refused".into())) } else { Ok(()) }
    }

    async fn send_text(&mut self, text: String) -> Result<(), Self::Error> {
        self.log.lock().unwrap().sent.push(text);
        Ok(())
    }

    async fn close(&mut self) {
        self.log.lock().unwrap().closed += 1;
    }

    fn render(&mut self, render: &Render) -> Result<(), Self::Error> {
        self.log.lock().unwrap().renders.push(render.clone());
        Ok(())
    }

    fn stop(&mut self) {
        self.log.lock().unwrap().stopped = true;
    }
}

#[tokio::test]
async fn runtime_drives_full_session() {
    let (driver, log) = ScriptedDriver::new([
        Intent::Login { nickname: " alice ".into() }.into(),
        AppEvent::FrameReceived { raw: r#"[{"id":1,"name":"alice"},{"id":2,"name":"bob"}]"#.into() },
        Intent::Send { text: "hello".into() }.into(),
        AppEvent::FrameReceived {
            raw: r#"{"type":"send","message":"hello","user":{"id":1,"name":"alice"}}"#.into(),
        },
    ]);

    Runtime::new(driver, FixedEnv, ClientConfig::default()).run().await.unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.registered, vec!["alice"]);
    assert_eq!(log.dialed, vec!["ws://localhost:3000"]);
    assert_eq!(log.closed, 1);
    assert!(log.stopped);

    // One chat frame, then the exit notice issued by the implicit unload.
    assert_eq!(log.sent.len(), 2);
    assert!(matches!(decode(&log.sent[0]), Inbound::ChatMessage(chat) if chat.message == "hello"));
    assert!(log.sent[1].contains(r#""type":"exit""#));

    assert!(log.renders.iter().any(|r| matches!(r, Render::Message {
        direction: Direction::Own,
        ..
    })));
    assert_eq!(log.renders.last(), Some(&Render::Status(ConnectionState::Closed)));
}

#[tokio::test]
async fn runtime_reports_dial_failure() {
    let (mut driver, log) = ScriptedDriver::new([
        Intent::Login { nickname: "alice".into() }.into(),
        Intent::Send { text: "lost".into() }.into(),
    ]);
    driver.dial_fails = true;

    Runtime::new(driver, FixedEnv, ClientConfig::default()).run().await.unwrap();

    let log = log.lock().unwrap();
    assert!(log.renders.contains(&Render::Status(ConnectionState::Errored)));
    assert!(log.sent.is_empty());
}

#[tokio::test]
async fn runtime_surfaces_registration_rejection() {
    let (mut driver, log) =
        ScriptedDriver::new([Intent::Login { nickname: "alice".into() }.into()]);
    driver.registration = Err(RegistrationError::Rejected { message: None });

    Runtime::new(driver, FixedEnv, ClientConfig::default()).run().await.unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.renders, vec![Render::LoginHint("Registration failed".into())]);
    assert!(log.dialed.is_empty());
    assert_eq!(log.closed, 0);
}
