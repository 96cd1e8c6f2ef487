use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session token (random UUID)
pub type SessionToken = String;

/// Session data stored after a successful password match
#[derive(Clone, Debug)]
pub struct AdminSession {
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// In-memory session store
///
/// Sessions expire after 24 hours, enforced on lookup
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, AdminSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new session and return the token
    pub async fn create_session(&self) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        let session = AdminSession {
            created_at: chrono::Utc::now(),
        };
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);
        token
    }

    /// Get session by token
    pub async fn get_session(&self, token: &str) -> Option<AdminSession> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(token)?;

        // Check if session is expired (24 hours)
        let now = chrono::Utc::now();
        let elapsed = now.signed_duration_since(session.created_at);
        if elapsed.num_hours() >= 24 {
            return None;
        }

        Some(session.clone())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
