//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`SessionController`]: session state machine
//! - [`Driver`]: Platform-specific I/O
//!
//! Side effects that complete with a result (registration, dial, send,
//! close) are executed inline and their outcome is fed straight back into the
//! controller as an [`AppEvent`], so the controller never observes I/O
//! directly.

use huddle_core::Environment;

use crate::{AppAction, AppEvent, ClientConfig, Driver, Intent, SessionController};

/// Generic runtime that orchestrates the controller and driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment providing the clock
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    controller: SessionController<E>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    /// Create a new runtime with the given driver and environment.
    pub fn new(driver: D, env: E, config: ClientConfig) -> Self {
        Self { driver, controller: SessionController::new(env, config) }
    }

    /// Run the main event loop until the controller asks to quit.
    ///
    /// End of input is treated as [`Intent::Unload`], so the exit notice is
    /// sent however the loop ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        loop {
            let event = match self.driver.next_event().await? {
                Some(event) => event,
                None => {
                    tracing::debug!("input exhausted, unloading");
                    AppEvent::Intent(Intent::Unload)
                },
            };

            if self.dispatch(event).await? {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Feed one event to the controller and execute the resulting actions.
    ///
    /// Returns `true` if the application should quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to render.
    pub async fn dispatch(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        let actions = self.controller.handle(event);
        self.process_actions(actions).await
    }

    /// Execute actions, feeding side-effect outcomes back to the controller.
    ///
    /// Returns `true` if should quit. Actions produced after `Quit` are still
    /// drained so the final state gets rendered.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;
        let mut quit = false;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                let Some(event) = self.execute(action, &mut quit).await? else {
                    continue;
                };
                pending_actions.extend(self.controller.handle(event));
            }
        }
        Ok(quit)
    }

    /// Execute one action and return the event describing its outcome.
    async fn execute(
        &mut self,
        action: AppAction,
        quit: &mut bool,
    ) -> Result<Option<AppEvent>, D::Error> {
        let event = match action {
            AppAction::Render(render) => {
                self.driver.render(&render)?;
                None
            },
            AppAction::Quit => {
                *quit = true;
                None
            },
            AppAction::Register { nickname } => {
                let result = self.driver.register(&nickname).await;
                Some(AppEvent::Registered(result))
            },
            AppAction::Dial { address } => match self.driver.dial(&address).await {
                Ok(()) => Some(AppEvent::TransportOpened),
                Err(e) => {
                    tracing::warn!(%address, "dial failed: {e}");
                    Some(AppEvent::TransportFailed { reason: e.to_string() })
                },
            },
            AppAction::SendText(text) => match self.driver.send_text(text).await {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!("send failed: {e}");
                    Some(AppEvent::TransportFailed { reason: e.to_string() })
                },
            },
            AppAction::CloseTransport => {
                self.driver.close().await;
                Some(AppEvent::TransportClosed)
            },
        };
        Ok(event)
    }

    /// Get a reference to the controller
    pub fn controller(&self) -> &SessionController<E> {
        &self.controller
    }

    /// Get a reference to the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
