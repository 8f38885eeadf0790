//! Session runtime driving a [`BrowserState`].
//!
//! Commands returned by transitions are executed as spawned tokio tasks.
//! Each task only performs I/O and sends its completion back over an
//! unbounded channel; the session applies completions as ordinary events.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::infrastructure::CollectionSource;

use super::detail::{DetailOrdering, DetailResolver};
use super::state::{BrowserState, Command, Event};
use super::store::RecordStore;

/// Owns the browser state and executes the I/O it requests.
pub struct Session {
    state: BrowserState,
    source: Arc<dyn CollectionSource>,
    resolver: DetailResolver,
    sender: mpsc::UnboundedSender<Event>,
    receiver: mpsc::UnboundedReceiver<Event>,
    in_flight: usize,
}

impl Session {
    #[must_use]
    pub fn new(source: Arc<dyn CollectionSource>, ordering: DetailOrdering) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            state: BrowserState::with_ordering(ordering),
            resolver: DetailResolver::new(Arc::clone(&source)),
            source,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Applies an event and starts the command it produced, if any.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, event: Event) {
        if let Some(command) = self.state.handle(event) {
            self.execute(command);
        }
    }

    fn execute(&mut self, command: Command) {
        let sender = self.sender.clone();
        self.in_flight += 1;

        match command {
            Command::FetchTasks => {
                let source = Arc::clone(&self.source);
                tokio::spawn(async move {
                    let result = RecordStore::load(source.as_ref()).await;
                    deliver(&sender, Event::LoadCompleted(result));
                });
            }
            Command::FetchUser(ticket) => {
                let resolver = self.resolver.clone();
                tokio::spawn(async move {
                    let result = resolver.resolve(&ticket.request).await;
                    deliver(&sender, Event::DetailCompleted { ticket, result });
                });
            }
        }
    }

    /// Waits for the next I/O completion and applies it.
    ///
    /// Returns `false` immediately if nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }

        match self.receiver.recv().await {
            Some(event) => {
                self.in_flight -= 1;
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Applies completions until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    #[must_use]
    pub const fn state(&self) -> &BrowserState {
        &self.state
    }

    /// Number of started commands whose completion has not been applied.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }
}

fn deliver(sender: &mpsc::UnboundedSender<Event>, event: Event) {
    if sender.send(event).is_err() {
        tracing::debug!("Session closed before a completion was delivered");
    }
}

// =============================================================================
// Tests
// =============================================================================
