//! Session store - authentication state for the life of the client
//!
//! State machine: `Booting → {Authenticated, Anonymous}`, returning to
//! `Anonymous` on logout or when the gateway reports a 401.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use minutes_domain::{Credentials, Result, SignupForm, User};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::navigation::Route;
use crate::ports::{MeetingsApi, Navigator, UnauthorizedSignal};

/// Snapshot of the authentication state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<User>,
    pub boot_completed: bool,
}

impl Session {
    pub fn state(&self) -> SessionState {
        match (&self.identity, self.boot_completed) {
            (Some(user), _) => SessionState::Authenticated(user.clone()),
            (None, false) => SessionState::Booting,
            (None, true) => SessionState::Anonymous,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Booting,
    Authenticated(User),
    Anonymous,
}

/// Process-wide authentication state
///
/// Owns the API handle it authenticates against and subscribes to that
/// gateway's unauthorized signal when constructed.
pub struct SessionStore {
    api: Arc<dyn MeetingsApi>,
    navigator: Arc<dyn Navigator>,
    session: watch::Sender<Session>,
    boot_started: AtomicBool,
}

impl SessionStore {
    /// Create the store and register it as the gateway's unauthorized
    /// handler, replacing any handler registered before.
    pub fn attach<G>(gateway: Arc<G>, navigator: Arc<dyn Navigator>) -> Arc<Self>
    where
        G: MeetingsApi + UnauthorizedSignal + 'static,
    {
        let signal: Arc<dyn UnauthorizedSignal> = gateway.clone();
        Self::new(gateway, signal.as_ref(), navigator)
    }

    /// Create the store against an API handle and a separate signal source.
    pub fn new(
        api: Arc<dyn MeetingsApi>,
        signal: &dyn UnauthorizedSignal,
        navigator: Arc<dyn Navigator>,
    ) -> Arc<Self> {
        let (session, _) = watch::channel(Session::default());
        let store =
            Arc::new(Self { api, navigator, session, boot_started: AtomicBool::new(false) });

        let weak = Arc::downgrade(&store);
        signal.set_unauthorized_handler(Arc::new(move || {
            if let Some(store) = weak.upgrade() {
                store.handle_unauthorized();
            }
        }));

        store
    }

    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        self.session.borrow().state()
    }

    pub fn identity(&self) -> Option<User> {
        self.session.borrow().identity.clone()
    }

    pub fn is_booted(&self) -> bool {
        self.session.borrow().boot_completed
    }

    /// Receiver that observes every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    /// Resolve the existing session, if any. Runs once; later calls return
    /// immediately.
    ///
    /// Any probe failure leaves the store `Anonymous`. `boot_completed` is
    /// set on every exit path, including cancellation.
    #[instrument(skip(self))]
    pub async fn boot(&self) {
        if self.boot_started.swap(true, Ordering::SeqCst) {
            debug!("boot already performed");
            return;
        }
        let _completion = BootCompletion(&self.session);

        let identity = match self.api.me().await {
            Ok(identity) => identity,
            Err(err) => {
                debug!(error = %err, "identity probe failed");
                None
            }
        };

        info!(authenticated = identity.is_some(), "session boot resolved");
        self.session.send_modify(|session| session.identity = identity);
    }

    /// Authenticate with email and password. Errors are returned untouched.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        let user = self.api.login(credentials).await?;
        self.adopt(user.clone());
        Ok(user)
    }

    /// Create an account and adopt its identity. Errors are returned
    /// untouched.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn signup(&self, form: &SignupForm) -> Result<User> {
        let user = self.api.signup(form).await?;
        self.adopt(user.clone());
        Ok(user)
    }

    /// End the session.
    ///
    /// Local identity is cleared once the server call has settled, whether
    /// it succeeded or not; the call's error, if any, is still returned.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let outcome = self.api.logout().await;
        if let Err(err) = &outcome {
            warn!(error = %err, "logout call failed; clearing local session anyway");
        }
        self.clear_identity();
        info!("session ended");
        outcome
    }

    fn adopt(&self, user: User) {
        info!(user_id = user.id, "session authenticated");
        self.session.send_modify(|session| session.identity = Some(user));
    }

    fn clear_identity(&self) {
        self.session.send_modify(|session| session.identity = None);
    }

    /// Gateway reported a 401: drop the identity and send the user to the
    /// login view. Navigation is suppressed while the boot probe is running
    /// so a visitor without a session is not redirected by the probe itself.
    fn handle_unauthorized(&self) {
        let booted = self.is_booted();
        warn!(booted, "request rejected as unauthorized; clearing session");
        self.clear_identity();

        if booted && self.navigator.current_route() != Route::Login {
            self.navigator.navigate(Route::Login);
        }
    }
}

struct BootCompletion<'a>(&'a watch::Sender<Session>);

impl Drop for BootCompletion<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|session| session.boot_completed = true);
    }
}
