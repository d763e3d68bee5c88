use std::sync::Arc;
use std::sync::RwLock;

use auth::Role;
use tokio::sync::Mutex;

use crate::errors::SessionError;
use crate::models::AuthState;
use crate::models::AuthUser;
use crate::models::ProfileChanges;
use crate::models::SignUpDetails;
use crate::ports::IdentityApi;
use crate::ports::TokenStore;
use crate::storage;
use crate::storage::AUTH_TOKEN_KEY;

/// Confirmation surfaced to the user after sign-out.
pub const SIGN_OUT_CONFIRMATION: &str = "You have been signed out";

const MIN_PASSWORD_LENGTH: usize = 6;

/// Single source of truth for the client's auth state.
///
/// Explicitly constructed and injected; lifecycle is init → bootstrap →
/// mutate (sign-in/up/out, profile update) → drop. State transitions happen
/// in short lock-held sections with no await inside, so each transition is
/// atomic. Auth-mutating operations are serialized by a single-flight
/// guard: a second sign-in/sign-up while one is in flight fails fast
/// instead of racing.
pub struct SessionStore<A, S>
where
    A: IdentityApi,
    S: TokenStore,
{
    api: Arc<A>,
    storage: Arc<S>,
    state: RwLock<AuthState>,
    auth_mutation: Mutex<()>,
}

impl<A, S> SessionStore<A, S>
where
    A: IdentityApi,
    S: TokenStore,
{
    /// Create a store in the pre-bootstrap initial state.
    pub fn new(api: Arc<A>, storage: Arc<S>) -> Self {
        Self {
            api,
            storage,
            state: RwLock::new(AuthState::initial()),
            auth_mutation: Mutex::new(()),
        }
    }

    /// Snapshot of the current auth state.
    pub fn state(&self) -> AuthState {
        self.state
            .read()
            .map(|state| state.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn replace(&self, next: AuthState) {
        if let Ok(mut state) = self.state.write() {
            *state = next;
        }
    }

    fn mutate(&self, f: impl FnOnce(&mut AuthState)) {
        if let Ok(mut state) = self.state.write() {
            f(&mut state);
        }
    }

    /// Reconcile the persisted token with a server-verified identity.
    ///
    /// Runs the bootstrap state machine exactly once per store lifetime;
    /// later calls are no-ops returning the current state. Every failure
    /// path degrades silently to the unauthenticated terminal state — the
    /// user just sees the login view.
    pub async fn bootstrap(&self) -> AuthState {
        let _guard = self.auth_mutation.lock().await;

        if self.state().initialized {
            return self.state();
        }

        storage::migrate_legacy_keys(self.storage.as_ref());

        let Some(token) = self.storage.get(AUTH_TOKEN_KEY) else {
            self.replace(AuthState::unauthenticated());
            return self.state();
        };

        self.mutate(|state| state.loading = true);

        match self.api.fetch_current_user(&token).await {
            Ok(user) => {
                tracing::debug!(role = %user.role, "Session restored from persisted token");
                self.replace(AuthState::authenticated(user));
            }
            Err(e) => {
                tracing::debug!(error = %e, "Persisted token rejected; discarding");
                self.storage.remove(AUTH_TOKEN_KEY);
                self.replace(AuthState::unauthenticated());
            }
        }

        self.state()
    }

    /// Sign in with credentials, optionally asserting an expected role.
    ///
    /// # Errors
    /// * `OperationInFlight` - Another sign-in/sign-up has not resolved yet
    /// * `InvalidCredentials` / `RoleMismatch` / `Validation` - Rejected by
    ///   the server
    /// * `Network` / `Server` - Transport or server failure
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        expected_role: Option<Role>,
    ) -> Result<AuthUser, SessionError> {
        let _guard = self
            .auth_mutation
            .try_lock()
            .map_err(|_| SessionError::OperationInFlight)?;

        self.mutate(|state| state.loading = true);

        let token_result = self.api.login(email, password, expected_role).await;
        self.establish_session(token_result).await
    }

    /// Register a new account and sign it in.
    ///
    /// The password length is checked locally first; a short password never
    /// reaches the network.
    ///
    /// # Errors
    /// * `Validation` - Password too short (local) or rejected fields
    ///   (server)
    /// * `OperationInFlight` - Another sign-in/sign-up has not resolved yet
    /// * `Network` / `Server` - Transport or server failure
    pub async fn sign_up(&self, details: SignUpDetails) -> Result<AuthUser, SessionError> {
        if details.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(SessionError::Validation(
                "Password must be at least 6 characters long".to_string(),
            ));
        }

        let _guard = self
            .auth_mutation
            .try_lock()
            .map_err(|_| SessionError::OperationInFlight)?;

        self.mutate(|state| state.loading = true);

        let token_result = self.api.register(&details).await;
        self.establish_session(token_result).await
    }

    /// Discard the session and return to the unauthenticated terminal
    /// state. Cannot fail; waits for any in-flight auth mutation so the
    /// final state is deterministic.
    pub async fn sign_out(&self) -> &'static str {
        let _guard = self.auth_mutation.lock().await;

        self.storage.remove(AUTH_TOKEN_KEY);
        self.replace(AuthState::unauthenticated());
        tracing::info!("Signed out");

        SIGN_OUT_CONFIRMATION
    }

    /// Update the mutable profile fields of the signed-in user.
    ///
    /// The server response is merged into the auth state without altering
    /// `id` or `role`. Auth-mutating like sign-in, so it holds the
    /// single-flight guard; a concurrent sign-out queues behind it and the
    /// merge is dropped if the session is gone by then.
    ///
    /// # Errors
    /// * `OperationInFlight` - Another auth mutation has not resolved yet
    /// * `NotAuthenticated` - No signed-in user
    /// * `SessionExpired` / `Validation` / `Network` / `Server` - Rejected
    ///   by the server or transport failure
    pub async fn update_profile(
        &self,
        changes: ProfileChanges,
    ) -> Result<AuthUser, SessionError> {
        let _guard = self
            .auth_mutation
            .try_lock()
            .map_err(|_| SessionError::OperationInFlight)?;

        let Some(current) = self.state().user else {
            tracing::warn!("update_profile called without an authenticated user");
            return Err(SessionError::NotAuthenticated);
        };

        let token = self
            .storage
            .get(AUTH_TOKEN_KEY)
            .ok_or(SessionError::NotAuthenticated)?;

        let fetched = self.api.update_profile(&token, &changes).await?;

        let merged = AuthUser {
            id: current.id,
            role: current.role,
            ..fetched
        };

        self.mutate(|state| {
            // Merge only into a live session; a sign-out between the start
            // of this call and now must stay won
            if state.user.is_some() {
                state.user = Some(merged.clone());
            }
        });

        Ok(merged)
    }

    /// Persist the freshly issued token and load the identity behind it.
    async fn establish_session(
        &self,
        token_result: Result<String, SessionError>,
    ) -> Result<AuthUser, SessionError> {
        let token = match token_result {
            Ok(token) => token,
            Err(e) => {
                self.mutate(|state| state.loading = false);
                return Err(e);
            }
        };

        self.storage.set(AUTH_TOKEN_KEY, &token);

        match self.api.fetch_current_user(&token).await {
            Ok(user) => {
                self.replace(AuthState::authenticated(user.clone()));
                Ok(user)
            }
            Err(e) => {
                // Token issued but identity fetch failed: a half-open
                // session must not survive
                self.storage.remove(AUTH_TOKEN_KEY);
                self.mutate(|state| {
                    state.user = None;
                    state.loading = false;
                });
                Err(e)
            }
        }
    }
}
