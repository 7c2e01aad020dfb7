//! Session store
//!
//! Holds the current session, the number of logins in flight and the latest
//! login token under a single lock. A login commits only while its token is
//! still the latest; starting another login or logging out bumps the token.

use crate::session::{LoginMethod, Session};
use crate::{Error, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Observable session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session
    LoggedOut,
    /// At least one login is running
    LoggingIn,
    /// A session is established
    LoggedIn(LoginMethod),
}

#[derive(Debug, Default)]
struct Inner {
    session: Option<Arc<Session>>,
    in_flight: usize,
    latest_token: u64,
}

/// Single source of truth for the current session
#[derive(Debug)]
pub struct SessionStore {
    inner: RwLock<Inner>,
    updates: watch::Sender<Option<Arc<Session>>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Arc<Self> {
        let (updates, _) = watch::channel(None);
        Arc::new(Self {
            inner: RwLock::new(Inner::default()),
            updates,
        })
    }

    /// Read-only handle
    pub fn reader(self: &Arc<Self>) -> SessionReader {
        SessionReader {
            store: Arc::clone(self),
        }
    }

    /// Start a login attempt, superseding any attempt already running
    ///
    /// Callers take the ticket before validating input, so an attempt that is
    /// rejected outright still invalidates older ones.
    pub(crate) fn begin_login(self: &Arc<Self>) -> LoginTicket {
        let mut inner = self.inner.write();
        inner.latest_token += 1;
        inner.in_flight += 1;
        debug!(
            "Login attempt {} started ({} in flight)",
            inner.latest_token, inner.in_flight
        );
        LoginTicket {
            store: Arc::clone(self),
            token: inner.latest_token,
        }
    }

    /// Replace the session if `ticket` is still the latest attempt
    pub(crate) fn commit(&self, ticket: &LoginTicket, session: Session) -> Result<Arc<Session>> {
        let mut inner = self.inner.write();
        if inner.latest_token != ticket.token {
            debug!(
                "Login attempt {} superseded by {}",
                ticket.token, inner.latest_token
            );
            return Err(Error::LoginSuperseded);
        }

        let session = Arc::new(session);
        inner.session = Some(Arc::clone(&session));
        self.updates.send_replace(Some(Arc::clone(&session)));
        Ok(session)
    }

    /// Drop the session and invalidate every login in flight
    pub(crate) fn clear(&self) {
        let mut inner = self.inner.write();
        inner.latest_token += 1;
        inner.session = None;
        self.updates.send_replace(None);
    }

    fn release(&self) {
        let mut inner = self.inner.write();
        inner.in_flight = inner.in_flight.saturating_sub(1);
    }

    fn current(&self) -> Option<Arc<Session>> {
        self.inner.read().session.clone()
    }

    fn state(&self) -> SessionState {
        let inner = self.inner.read();
        if inner.in_flight > 0 {
            return SessionState::LoggingIn;
        }
        match &inner.session {
            Some(session) => SessionState::LoggedIn(session.method()),
            None => SessionState::LoggedOut,
        }
    }
}

/// In-flight login slot, released on drop
///
/// Dropping a login future mid-way releases its slot too, so an abandoned
/// login never leaves the store stuck in [`SessionState::LoggingIn`].
#[derive(Debug)]
pub(crate) struct LoginTicket {
    store: Arc<SessionStore>,
    token: u64,
}

impl LoginTicket {
    pub(crate) fn token(&self) -> u64 {
        self.token
    }
}

impl Drop for LoginTicket {
    fn drop(&mut self) {
        self.store.release();
    }
}

/// Read-only view of the session store
#[derive(Debug, Clone)]
pub struct SessionReader {
    store: Arc<SessionStore>,
}

impl SessionReader {
    /// Current session, if any
    pub fn current(&self) -> Option<Arc<Session>> {
        self.store.current()
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.store.state()
    }

    /// Check if a session is established
    pub fn is_logged_in(&self) -> bool {
        self.current().is_some()
    }

    /// Subscribe to session replacements
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Session>>> {
        self.store.updates.subscribe()
    }
}
