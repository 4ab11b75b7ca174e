//! Async driver for the fetch lifecycle.
//!
//! # Design
//! `Fetcher` wires a `FetchController` to a `Transport` on the tokio runtime.
//! Activation publishes `Loading` before returning, then spawns one task
//! that executes the request and settles the ticket. A newer activation
//! aborts the previous task; when the abort lands too late (the response is
//! already being settled), the controller's generation check drops it.
//!
//! A transport that panics settles its ticket with a network error, so no
//! failure leaves the state stuck in `Loading`.
//!
//! The controller sits behind a `std::sync::Mutex` that is never held across
//! an await. Every state change is published on a `watch` channel while the
//! lock is held, so observers see changes in the order they happened.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use product_core::{FetchController, FetchError, FetchState, HttpResponse, Ticket};
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::transport::Transport;

struct Shared<T> {
    controller: Mutex<FetchController<T>>,
    state: watch::Sender<FetchState<T>>,
}

impl<T: DeserializeOwned + Clone> Shared<T> {
    fn controller(&self) -> MutexGuard<'_, FetchController<T>> {
        self.controller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the controller and publish the resulting state.
    fn update<R>(&self, f: impl FnOnce(&mut FetchController<T>) -> R) -> R {
        let mut controller = self.controller();
        let result = f(&mut controller);
        self.state.send_replace(controller.state().clone());
        result
    }

    fn settle(&self, ticket: &Ticket, outcome: Result<HttpResponse, FetchError>) {
        let mut controller = self.controller();
        if controller.settle(ticket, outcome) {
            self.state.send_replace(controller.state().clone());
        }
    }
}

/// Fetches one resource at a time and exposes its lifecycle state.
///
/// Must be driven from within a tokio runtime.
pub struct Fetcher<T, X> {
    transport: Arc<X>,
    shared: Arc<Shared<T>>,
    in_flight: Option<JoinHandle<()>>,
}

impl<T, X> Fetcher<T, X>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    X: Transport,
{
    pub fn new(transport: X) -> Self {
        Self::with_shared_transport(Arc::new(transport))
    }

    pub fn with_shared_transport(transport: Arc<X>) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        Self {
            transport,
            shared: Arc::new(Shared {
                controller: Mutex::new(FetchController::new()),
                state,
            }),
            in_flight: None,
        }
    }

    /// Start retrieving `locator`, superseding any outstanding retrieval.
    ///
    /// The state is `Loading` by the time this returns.
    pub fn activate(&mut self, locator: &str) {
        let ticket = self.shared.update(|c| c.activate(locator));
        self.spawn(ticket);
    }

    /// Activate only when `locator` differs from the current one.
    pub fn set_locator(&mut self, locator: &str) -> bool {
        match self.shared.update(|c| c.set_locator(locator)) {
            Some(ticket) => {
                self.spawn(ticket);
                true
            }
            None => false,
        }
    }

    /// Re-run the retrieval for the current locator.
    pub fn refresh(&mut self) -> bool {
        match self.shared.update(|c| c.refresh()) {
            Some(ticket) => {
                self.spawn(ticket);
                true
            }
            None => false,
        }
    }

    /// Abort any outstanding retrieval and return to `Idle`.
    pub fn deactivate(&mut self) {
        self.abort_in_flight();
        self.shared.update(|c| c.deactivate());
    }

    pub fn locator(&self) -> Option<String> {
        self.shared.controller().locator().map(str::to_string)
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> FetchState<T> {
        self.shared.state.borrow().clone()
    }

    /// A receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.shared.state.subscribe()
    }

    /// Wait until the current retrieval has settled and return the state.
    ///
    /// Returns immediately when nothing is loading.
    pub async fn settled(&self) -> FetchState<T> {
        let mut rx = self.subscribe();
        let result = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        result
    }

    fn spawn(&mut self, ticket: Ticket) {
        self.abort_in_flight();
        info!(
            locator = ticket.locator(),
            generation = ticket.generation(),
            "fetching"
        );
        let shared = Arc::clone(&self.shared);
        let transport = Arc::clone(&self.transport);
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = AssertUnwindSafe(transport.execute(ticket.request().clone()))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    warn!(locator = ticket.locator(), "transport panicked");
                    Err(FetchError::network("transport task panicked"))
                });
            shared.settle(&ticket, outcome);
        }));
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!("aborting superseded fetch");
                handle.abort();
            }
        }
    }
}

impl<T, X> Drop for Fetcher<T, X> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
