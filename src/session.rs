#![cfg(feature = "web")]
use crate::controller::Controller;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::selection::Selection;
use log::info;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, SystemTime};
use uuid::Uuid;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "avocado_session";

/// One browser session and the controller it owns
struct Session {
    controller: Arc<Mutex<Controller>>,
    expires_at: SystemTime,
}

/// Per-session controllers over one shared dataset
///
/// Every session gets its own selection and charts. A session's controller
/// sits behind its own mutex, so events of one session are handled one at a
/// time while other sessions proceed independently. The dataset itself is
/// shared read-only.
pub struct SessionStore {
    dataset: Dataset,
    initial: Selection,
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(dataset: Dataset, initial: Selection, ttl: Duration) -> Self {
        SessionStore {
            dataset,
            initial,
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Controller for a live session id, refreshing its expiry
    pub fn get(&self, session_id: &str) -> Option<Arc<Mutex<Controller>>> {
        let now = SystemTime::now();
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        match sessions.get_mut(session_id) {
            Some(session) if session.expires_at > now => {
                session.expires_at = now + self.ttl;
                Some(Arc::clone(&session.controller))
            }
            _ => None,
        }
    }

    /// Create a session at the initial selection
    ///
    /// Expired sessions are dropped first.
    ///
    /// # Returns
    /// * `Result<(String, Arc<Mutex<Controller>>)>` - New session id and its controller
    pub fn create(&self) -> Result<(String, Arc<Mutex<Controller>>)> {
        let controller = Arc::new(Mutex::new(Controller::new(
            self.dataset.clone(),
            self.initial.clone(),
        )?));
        let session_id = Uuid::new_v4().to_string();
        let now = SystemTime::now();

        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at > now);
        let purged = before - sessions.len();

        sessions.insert(
            session_id.clone(),
            Session {
                controller: Arc::clone(&controller),
                expires_at: now + self.ttl,
            },
        );
        info!(
            "Created session {} ({} active, {} expired purged)",
            session_id,
            sessions.len(),
            purged
        );

        Ok((session_id, controller))
    }

    /// Existing controller for `session_id`, or a fresh session
    ///
    /// The returned flag is true when a new session was created and the
    /// caller must hand its id back to the client.
    pub fn get_or_create(&self, session_id: Option<&str>) -> Result<(String, Arc<Mutex<Controller>>, bool)> {
        if let Some(id) = session_id {
            if let Some(controller) = self.get(id) {
                return Ok((id.to_string(), controller, false));
            }
        }
        let (id, controller) = self.create()?;
        Ok((id, controller, true))
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
