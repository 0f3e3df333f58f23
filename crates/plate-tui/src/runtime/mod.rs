//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Controller operations run as tokio tasks and never talk to the UI
//! - Their state changes reach the runtime through watch forwarders
//! - Navigation requests arrive through `InboxNavigator`
//! - The runtime drains the inbox each loop iteration

mod inbox;

use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{InboxNavigator, UiEventReceiver, UiEventSender};
use plate_core::account::AccountService;
use plate_core::navigation::Navigator;
use plate_core::profile::ProfileController;
use plate_core::session::SessionContext;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll duration when nothing is happening.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal, the application state and the profile controller.
/// The terminal is restored on drop.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    controller: Arc<ProfileController>,
    navigator: Arc<InboxNavigator>,
    /// Inbox sender - forwarders and the navigator send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates the runtime and enters the alternate screen.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(account: Arc<dyn AccountService>, session: SessionContext) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let navigator = Arc::new(InboxNavigator::new(inbox_tx.clone()));
        let state = AppState::new(session.snapshot());
        let controller = Arc::new(ProfileController::new(
            account,
            session,
            Arc::clone(&navigator) as Arc<dyn Navigator>,
        ));

        Ok(Self {
            terminal,
            state,
            controller,
            navigator,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the state asks to quit.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal input fails.
    pub fn run(&mut self) -> Result<()> {
        inbox::forward_watch(
            self.controller.subscribe(),
            self.inbox_tx.clone(),
            UiEvent::ProfileChanged,
        );
        inbox::forward_watch(
            self.controller.session().subscribe(),
            self.inbox_tx.clone(),
            UiEvent::AuthChanged,
        );

        let effects = update::on_start(&self.state);
        self.execute_effects(effects);

        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                let effects = update::update(&mut self.state, event);
                dirty = true;
                self.execute_effects(effects);
            }

            if dirty && !self.state.should_quit {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from the inbox and the terminal.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Don't block on the terminal when inbox events are waiting to render.
        let poll_duration = if events.is_empty() {
            TICK_INTERVAL.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= TICK_INTERVAL {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::LoadProfile => {
                let controller = Arc::clone(&self.controller);
                tokio::spawn(async move { controller.load_profile().await });
            }
            UiEffect::Logout => {
                let controller = Arc::clone(&self.controller);
                tokio::spawn(async move { controller.logout().await });
            }
            UiEffect::NavigateBack => {
                self.navigator.back();
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        if let Err(err) = terminal::restore_terminal() {
            tracing::warn!("Failed to restore terminal: {err:#}");
        }
    }
}
