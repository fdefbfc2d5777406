//! Login session store
//!
//! Sessions are opaque tokens kept in memory; restarting the server logs
//! everyone out.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::RngCore;
use tokio::sync::RwLock;
use tracing::debug;

/// Session timeout (8 hours of inactivity)
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(8 * 60 * 60);

/// Random bytes per session token
const TOKEN_BYTES: usize = 32;

/// Fresh token from the thread-local CSPRNG, hex-encoded
fn new_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[derive(Debug, Clone)]
struct Session {
    username: String,
    last_activity: Instant,
}

impl Session {
    fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            last_activity: Instant::now(),
        }
    }

    fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() > timeout
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// In-memory session manager
#[derive(Debug)]
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Session>>,
    timeout: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_timeout(SESSION_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            timeout,
        }
    }

    /// Create a session for `username` and return its token
    pub async fn create(&self, username: &str) -> String {
        let token = new_token();

        let mut sessions = self.sessions.write().await;

        // Clean up expired sessions while we're here
        sessions.retain(|_, s| !s.is_expired(self.timeout));

        sessions.insert(token.clone(), Session::new(username));
        debug!(active = sessions.len(), "Session created");
        token
    }

    /// Username for a live session, refreshing its activity time
    pub async fn validate(&self, token: &str) -> Option<String> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(token) {
            Some(session) if session.is_expired(self.timeout) => {
                sessions.remove(token);
                None
            }
            Some(session) => {
                session.touch();
                Some(session.username.clone())
            }
            None => None,
        }
    }

    /// Drop a session
    pub async fn remove(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token).is_some()
    }

    /// Number of stored sessions, expired ones included
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
