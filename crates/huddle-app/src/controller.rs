//! Session controller.
//!
//! This module defines the [`SessionController`] state machine, which drives
//! registration, connection, chat and exit for one user completely decoupled
//! from I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Validates the nickname and requests registration.
//! - Creates the [`Session`] on success and starts connecting.
//! - Gates outgoing messages on the connection state.
//! - Dispatches inbound frames to the roster or the transcript.
//! - Sends the exit notice exactly once on unload.

use huddle_core::{Environment, Message, RegistrationError};
use huddle_proto::{Command, Inbound, User, encode};

use crate::{AppAction, AppEvent, ClientConfig, Intent, Render, Session};

/// Session controller.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct SessionController<E: Environment> {
    /// Clock for receipt timestamps.
    env: E,
    /// Endpoints.
    config: ClientConfig,
    /// A registration request is in flight.
    registering: bool,
    /// Current session. `None` until registration succeeds.
    session: Option<Session>,
    /// The view has unloaded. No new session or exit notice after this.
    unloaded: bool,
}

impl<E: Environment> SessionController<E> {
    /// Create a controller with no session.
    pub fn new(env: E, config: ClientConfig) -> Self {
        Self { env, config, registering: false, session: None, unloaded: false }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Intent(Intent::Login { nickname }) => self.register(&nickname),
            AppEvent::Intent(Intent::Send { text }) => self.send_message(&text),
            AppEvent::Intent(Intent::Unload) => self.handle_unload(),
            AppEvent::Registered(result) => self.handle_registered(result),
            AppEvent::TransportOpened => self.handle_opened(),
            AppEvent::TransportFailed { reason } => self.handle_failed(&reason),
            AppEvent::FrameReceived { raw } => self.handle_inbound(&raw),
            AppEvent::TransportClosed => self.handle_closed(),
        }
    }

    /// Request registration of `nickname`.
    ///
    /// Empty nicknames are rejected locally with a hint and no request.
    pub fn register(&mut self, nickname: &str) -> Vec<AppAction> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            let hint = RegistrationError::Validation.user_message().to_owned();
            return vec![AppAction::Render(Render::LoginHint(hint))];
        }

        if self.registering || self.session.is_some() || self.unloaded {
            tracing::debug!(nickname, "login ignored, session already started or unloaded");
            return vec![];
        }

        self.registering = true;
        vec![AppAction::Register { nickname: nickname.to_owned() }]
    }

    /// Send a chat message.
    ///
    /// Silently does nothing for empty text, without a session, or when the
    /// connection is not open (the message is dropped and logged).
    pub fn send_message(&mut self, text: &str) -> Vec<AppAction> {
        let text = text.trim();
        if text.is_empty() {
            return vec![];
        }
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("send ignored, no session");
            return vec![];
        };

        let command = Command::Send { text: text.to_owned(), user: session.user.clone() };
        let frame = match encode(&command) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Failed to encode message: {e}");
                return vec![];
            },
        };

        match session.connection.send(frame) {
            Ok(actions) => actions.into_iter().map(AppAction::from).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "dropping outgoing message");
                vec![]
            },
        }
    }

    /// Handle one inbound text frame.
    pub fn handle_inbound(&mut self, raw: &str) -> Vec<AppAction> {
        let now = self.env.now();
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("frame ignored, no session");
            return vec![];
        };

        match session.connection.receive(raw) {
            Inbound::RosterSnapshot(users) => {
                let view = session.roster.apply(users, Some(&session.user), now);
                vec![AppAction::Render(Render::Roster(view.clone()))]
            },
            Inbound::ChatMessage(chat) => {
                let message = Message::from_chat(chat, now);
                let direction = message.direction(Some(&session.user));
                session.transcript.append(message.clone());
                vec![AppAction::Render(Render::Message { message, direction })]
            },
            Inbound::Malformed(_) => vec![],
        }
    }

    /// Tear the session down.
    ///
    /// The first call closes the connection with a best-effort exit notice.
    /// Every call ends with [`AppAction::Quit`].
    pub fn handle_unload(&mut self) -> Vec<AppAction> {
        let mut actions = Vec::new();
        let first = !std::mem::replace(&mut self.unloaded, true);

        if first && let Some(session) = self.session.as_mut() {
            let farewell = match encode(&Command::Exit { user: session.user.clone() }) {
                Ok(frame) => Some(frame),
                Err(e) => {
                    tracing::warn!("Failed to encode exit notice: {e}");
                    None
                },
            };
            actions.extend(session.connection.close(farewell).into_iter().map(AppAction::from));
            tracing::info!(user = %session.user.name, "session unloaded");
        }

        actions.push(AppAction::Quit);
        actions
    }

    fn handle_registered(&mut self, result: Result<User, RegistrationError>) -> Vec<AppAction> {
        if !std::mem::replace(&mut self.registering, false) {
            tracing::warn!("registration result ignored, none in flight");
            return vec![];
        }

        let user = match result {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "registration failed");
                return vec![AppAction::Render(Render::LoginHint(e.user_message().to_owned()))];
            },
        };

        if self.session.is_some() || self.unloaded {
            tracing::warn!(user = %user.name, "registration result ignored");
            return vec![];
        }

        tracing::info!(id = %user.id, name = %user.name, "registered");

        let mut session = Session::new(user.clone());
        let now = self.env.now();
        // The local user is online by definition until the first snapshot.
        let view = session.roster.apply(vec![user.clone()], Some(&user), now).clone();

        let mut actions = vec![
            AppAction::Render(Render::ChatOpened { user }),
            AppAction::Render(Render::Roster(view)),
        ];

        match session.connection.connect(self.config.server_addr.clone()) {
            Ok(connect) => {
                actions.extend(connect.into_iter().map(AppAction::from));
                actions.push(AppAction::Render(Render::Status(session.connection.state())));
            },
            Err(e) => tracing::error!("Failed to start connection: {e}"),
        }

        self.session = Some(session);
        actions
    }

    fn handle_opened(&mut self) -> Vec<AppAction> {
        let Some(session) = self.session.as_mut() else {
            return vec![];
        };

        if let Err(e) = session.connection.handle_open() {
            tracing::warn!(error = %e, "unexpected transport open");
            return vec![];
        }
        vec![AppAction::Render(Render::Status(session.connection.state()))]
    }

    fn handle_failed(&mut self, reason: &str) -> Vec<AppAction> {
        let Some(session) = self.session.as_mut() else {
            return vec![];
        };

        session.connection.handle_error(reason);
        vec![AppAction::Render(Render::Status(session.connection.state()))]
    }

    fn handle_closed(&mut self) -> Vec<AppAction> {
        let Some(session) = self.session.as_mut() else {
            return vec![];
        };

        session.connection.handle_closed();
        vec![AppAction::Render(Render::Status(session.connection.state()))]
    }

    /// Current session. `None` until registration succeeds.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The registered local user. `None` until registration succeeds.
    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(Session::user)
    }

    /// True once the view has unloaded.
    pub fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    /// True while a registration request is in flight.
    pub fn is_registering(&self) -> bool {
        self.registering
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
