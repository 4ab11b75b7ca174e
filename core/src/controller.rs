//! Generation-guarded fetch lifecycle controller.
//!
//! # Design
//! `FetchController` is sans-IO like the rest of the core: activating it
//! hands out a `Ticket` holding the request to execute, and the host later
//! reports the outcome through `settle`. Every activation bumps a generation
//! counter and the ticket remembers the generation it was issued under, so an
//! outcome that arrives after a newer activation (or after `deactivate`) is
//! dropped instead of overwriting the current state. This makes the state
//! reflect only the most recently requested locator regardless of the order
//! in which responses come back.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::{build_get, parse_json};
use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::state::FetchState;

/// A single issued retrieval: the request to execute plus the generation it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    locator: String,
    request: HttpRequest,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

/// Tracks one logically current retrieval and its lifecycle state.
#[derive(Debug)]
pub struct FetchController<T> {
    locator: Option<String>,
    generation: u64,
    state: FetchState<T>,
}

impl<T> Default for FetchController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchController<T> {
    pub fn new() -> Self {
        Self {
            locator: None,
            generation: 0,
            state: FetchState::Idle,
        }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn locator(&self) -> Option<&str> {
        self.locator.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Begin a retrieval of `locator`, superseding any outstanding one.
    ///
    /// The state moves to `Loading` immediately and prior data or error is
    /// discarded.
    pub fn activate(&mut self, locator: &str) -> Ticket {
        self.generation += 1;
        self.locator = Some(locator.to_string());
        self.state = FetchState::Loading;
        debug!(locator, generation = self.generation, "fetch activated");
        Ticket {
            generation: self.generation,
            locator: locator.to_string(),
            request: build_get(locator),
        }
    }

    /// Activate only if `locator` differs from the current one.
    pub fn set_locator(&mut self, locator: &str) -> Option<Ticket> {
        if self.locator.as_deref() == Some(locator) {
            return None;
        }
        Some(self.activate(locator))
    }

    /// Re-run the retrieval for the current locator, if there is one.
    pub fn refresh(&mut self) -> Option<Ticket> {
        let locator = self.locator.clone()?;
        Some(self.activate(&locator))
    }

    /// Drop the current locator and any outstanding retrieval.
    pub fn deactivate(&mut self) {
        self.generation += 1;
        self.locator = None;
        self.state = FetchState::Idle;
    }

    /// Whether `ticket` still belongs to the current generation.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation && self.state.is_loading()
    }
}

impl<T: DeserializeOwned> FetchController<T> {
    /// Apply the outcome of executing `ticket`'s request.
    ///
    /// Returns `false` and leaves the state untouched when the ticket has
    /// been superseded.
    pub fn settle(&mut self, ticket: &Ticket, outcome: Result<HttpResponse, FetchError>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                locator = ticket.locator.as_str(),
                generation = ticket.generation,
                current = self.generation,
                "discarding stale fetch result"
            );
            return false;
        }
        self.state = outcome.and_then(parse_json::<T>).into();
        debug!(
            locator = ticket.locator.as_str(),
            generation = ticket.generation,
            status = ?self.state.status(),
            "fetch settled"
        );
        true
    }
}
