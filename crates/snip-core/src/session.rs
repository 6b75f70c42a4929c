//! Session and authentication state.
//!
//! The sync engine only ever reads this state; sign-in and sign-out are
//! driven by the application shell.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{load_record, save_record, Storage};

const SESSION_RECORD: &str = "session";

/// The authenticated user, as reported by the remote authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SessionData {
    access_token: Option<String>,
    user: Option<AuthUser>,
}

impl fmt::Debug for SessionData {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionData")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

/// Shared handle to the current session.
///
/// Cheap to clone; all clones observe the same sign-in state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Rc<RefCell<SessionData>>,
}

impl Session {
    /// Start signed out
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a persisted session, or start signed out
    pub fn restore(storage: &dyn Storage) -> Result<Self> {
        let data = load_record::<SessionData>(storage, SESSION_RECORD)?.unwrap_or_default();
        Ok(Self {
            inner: Rc::new(RefCell::new(data)),
        })
    }

    /// Authenticated means both a token and a user identity are present
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let data = self.inner.borrow();
        data.access_token.is_some() && data.user.is_some()
    }

    #[must_use]
    pub fn current_user_id(&self) -> Option<i64> {
        self.inner.borrow().user.as_ref().map(|user| user.id)
    }

    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.inner.borrow().user.clone()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.inner.borrow().access_token.clone()
    }

    pub fn sign_in(&self, access_token: impl Into<String>, user: AuthUser) {
        let mut data = self.inner.borrow_mut();
        data.access_token = Some(access_token.into());
        data.user = Some(user);
    }

    pub fn sign_out(&self) {
        let mut data = self.inner.borrow_mut();
        data.access_token = None;
        data.user = None;
    }

    /// Persist the current session to its storage record
    pub fn persist(&self, storage: &dyn Storage) -> Result<()> {
        save_record(storage, SESSION_RECORD, &*self.inner.borrow())
    }
}
