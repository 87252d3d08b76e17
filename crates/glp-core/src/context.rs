//! Application context.
//!
//! `AppContext` is handed to every screen that needs the backend, the clock,
//! or the signed-in user. It replaces an ambient global: the current-user
//! holder has exactly one writer (the context's `sign_in` / `sign_out`) and
//! any number of readers (`current_user` snapshots or `watch` receivers).

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use glp_contracts::{
    error::{GlpError, GlpResult},
    user::User,
};

use crate::traits::{Backend, Clock};

/// Shared handles for the screens of one running client.
pub struct AppContext {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
    current_user: watch::Sender<Option<User>>,
}

impl AppContext {
    pub fn new(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>) -> Self {
        let (current_user, _) = watch::channel(None);
        Self { backend, clock, current_user }
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Snapshot of the signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.current_user.borrow().clone()
    }

    /// The signed-in user, or a state error for screens that need one.
    pub fn require_user(&self) -> GlpResult<User> {
        self.current_user().ok_or_else(|| GlpError::StateMachineError {
            reason: "no user is signed in".to_string(),
        })
    }

    /// Observe sign-in and sign-out.
    pub fn subscribe_user(&self) -> watch::Receiver<Option<User>> {
        self.current_user.subscribe()
    }

    /// Install `user` as the current user.
    pub fn sign_in(&self, user: User) {
        info!(user_id = %user.id, "user signed in");
        self.current_user.send_replace(Some(user));
    }

    /// Clear the current user (logout).
    pub fn sign_out(&self) {
        if let Some(previous) = self.current_user.send_replace(None) {
            info!(user_id = %previous.id, "user signed out");
        }
    }
}
