//! Authentication state shared by every request made through one client.
//!
//! Two states only. A 401 on any response moves `Authenticated` to
//! `Anonymous` and wipes the stored tokens; nothing is retried or replayed.

use crate::adapters::token_store::MemoryTokenStore;
use crate::domain::model::User;
use crate::domain::ports::{TokenPair, TokenStore};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Anonymous,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq)]
enum AuthState {
    Anonymous,
    Authenticated {
        tokens: TokenPair,
        user: Option<User>,
    },
}

struct SessionInner {
    state: RwLock<AuthState>,
    store: Box<dyn TokenStore>,
    status_tx: watch::Sender<AuthStatus>,
}

/// Cheap to clone; all clones observe the same state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Restores a previous session from `store` if it holds a token pair.
    pub fn restore<S: TokenStore + 'static>(store: S) -> Result<Self> {
        let state = match store.load()? {
            Some(tokens) => {
                tracing::debug!("🔑 Restored stored token pair issued at {}", tokens.issued_at);
                AuthState::Authenticated { tokens, user: None }
            }
            None => AuthState::Anonymous,
        };
        let status = status_of(&state);
        let (status_tx, _) = watch::channel(status);

        Ok(Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(state),
                store: Box::new(store),
                status_tx,
            }),
        })
    }

    pub fn anonymous() -> Self {
        let (status_tx, _) = watch::channel(AuthStatus::Anonymous);
        Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(AuthState::Anonymous),
                store: Box::new(MemoryTokenStore::new()),
                status_tx,
            }),
        }
    }

    pub async fn status(&self) -> AuthStatus {
        status_of(&*self.inner.state.read().await)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.status().await == AuthStatus::Authenticated
    }

    pub async fn access_token(&self) -> Option<String> {
        match &*self.inner.state.read().await {
            AuthState::Authenticated { tokens, .. } => Some(tokens.access.clone()),
            AuthState::Anonymous => None,
        }
    }

    pub async fn refresh_token(&self) -> Option<String> {
        match &*self.inner.state.read().await {
            AuthState::Authenticated { tokens, .. } => Some(tokens.refresh.clone()),
            AuthState::Anonymous => None,
        }
    }

    pub async fn user(&self) -> Option<User> {
        match &*self.inner.state.read().await {
            AuthState::Authenticated { user, .. } => user.clone(),
            AuthState::Anonymous => None,
        }
    }

    /// Enters `Authenticated` after a successful login.
    pub async fn begin(&self, tokens: TokenPair, user: Option<User>) -> Result<()> {
        self.inner.store.save(&tokens)?;
        *self.inner.state.write().await = AuthState::Authenticated { tokens, user };
        self.inner.status_tx.send_replace(AuthStatus::Authenticated);
        tracing::info!("🔓 Session started");
        Ok(())
    }

    /// Swaps in a refreshed access token. Ignored when anonymous.
    pub async fn update_access(&self, access: String) -> Result<()> {
        let mut state = self.inner.state.write().await;
        if let AuthState::Authenticated { tokens, .. } = &mut *state {
            tokens.access = access;
            self.inner.store.save(tokens)?;
        }
        Ok(())
    }

    pub async fn set_user(&self, new_user: User) {
        if let AuthState::Authenticated { user, .. } = &mut *self.inner.state.write().await {
            *user = Some(new_user);
        }
    }

    /// Leaves `Authenticated`. Returns `true` only when a transition happened,
    /// so repeated 401s on an already ended session are no-ops.
    pub async fn end(&self) -> Result<bool> {
        let mut state = self.inner.state.write().await;
        if *state == AuthState::Anonymous {
            return Ok(false);
        }
        *state = AuthState::Anonymous;
        drop(state);

        self.inner.status_tx.send_replace(AuthStatus::Anonymous);
        self.inner.store.clear()?;
        tracing::info!("🔒 Session ended");
        Ok(true)
    }

    /// Watch channel that flips to `Anonymous` when the session ends.
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.inner.status_tx.subscribe()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("status", &*self.inner.status_tx.borrow())
            .finish()
    }
}

fn status_of(state: &AuthState) -> AuthStatus {
    match state {
        AuthState::Anonymous => AuthStatus::Anonymous,
        AuthState::Authenticated { .. } => AuthStatus::Authenticated,
    }
}
