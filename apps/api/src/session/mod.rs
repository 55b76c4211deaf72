//! Per-session application state: one optional credential and at most one kit.
//!
//! A session is shared as `Arc<Mutex<Session>>`. Handlers hold the lock for the
//! whole action, so a session never has two generations in flight and the
//! kit has exactly one writer at a time.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::kit::models::InterviewKit;
use crate::llm_client::Credential;

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    credential: Option<Credential>,
    kit: Option<InterviewKit>,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

/// How often idle sessions are swept.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// What the front end needs to enable or disable actions.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub session_id: Uuid,
    pub has_credential: bool,
    pub can_generate: bool,
    pub has_kit: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(credential: Option<Credential>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            credential: credential.filter(|c| !c.is_blank()),
            kit: None,
            created_at: now,
            last_active: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    /// Marks the session as in use; idle eviction is measured from here.
    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    pub fn kit(&self) -> Option<&InterviewKit> {
        self.kit.as_ref()
    }

    /// Mutable access for in-place single-question replacement.
    pub fn kit_mut(&mut self) -> Option<&mut InterviewKit> {
        self.kit.as_mut()
    }

    /// Replaces the whole kit, returning the previous one.
    pub fn replace_kit(&mut self, kit: InterviewKit) -> Option<InterviewKit> {
        self.kit.replace(kit)
    }

    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = Some(credential).filter(|c| !c.is_blank());
    }

    /// Session credential, else the server-wide default.
    pub fn effective_credential(&self, default: Option<&Credential>) -> Option<Credential> {
        self.credential
            .as_ref()
            .or(default)
            .filter(|c| !c.is_blank())
            .cloned()
    }

    pub fn status(&self, default: Option<&Credential>) -> SessionStatus {
        SessionStatus {
            session_id: self.id,
            has_credential: self.credential.is_some(),
            can_generate: self.effective_credential(default).is_some(),
            has_kit: self.kit.is_some(),
            created_at: self.created_at,
        }
    }
}

/// In-memory session registry. Nothing is persisted.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>>,
}

impl SessionStore {
    pub async fn create(&self, credential: Option<Credential>) -> Arc<Mutex<Session>> {
        let session = Session::new(credential);
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        handle
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drops the session, its credential and its kit. Returns false if unknown.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Removes sessions idle for longer than `max_idle_minutes`.
    /// A session with an action in flight is never removed.
    pub async fn cleanup_inactive_sessions(&self, max_idle_minutes: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::minutes(max_idle_minutes);
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.last_active() >= cutoff,
            Err(_) => true,
        });
        before - sessions.len()
    }

    /// Sweeps idle sessions in the background for the life of the process.
    pub fn spawn_idle_cleanup(&self, max_idle_minutes: i64) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                let removed = store.cleanup_inactive_sessions(max_idle_minutes).await;
                if removed > 0 {
                    info!("Evicted {removed} idle sessions ({} active)", store.len().await);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::models::{GeneratedKit, Level};

    fn kit(role: &str) -> InterviewKit {
        InterviewKit::assemble(
            role.to_string(),
            Level::Junior,
            String::new(),
            GeneratedKit {
                technical_questions: vec![],
                behavioral_questions: vec![],
                evaluation_rubric: vec![],
                interview_tips: vec![],
            },
            Utc::now(),
        )
    }

    fn key(k: &str) -> Credential {
        Credential::new(k.to_string())
    }

    #[test]
    fn test_session_credential_overrides_default() {
        let session = Session::new(Some(key("session-key")));
        let default = key("server-key");
        assert_eq!(
            session.effective_credential(Some(&default)),
            Some(key("session-key"))
        );
    }

    #[test]
    fn test_default_credential_used_when_session_has_none() {
        let session = Session::new(None);
        let default = key("server-key");
        assert_eq!(
            session.effective_credential(Some(&default)),
            Some(key("server-key"))
        );
        assert!(session.status(Some(&default)).can_generate);
        assert!(!session.status(Some(&default)).has_credential);
    }

    #[test]
    fn test_no_credential_disables_generation() {
        let session = Session::new(Some(key("  ")));
        assert!(!session.status(None).can_generate);
        assert!(session.effective_credential(None).is_none());
    }

    #[test]
    fn test_replace_kit_is_wholesale() {
        let mut session = Session::new(None);
        assert!(session.replace_kit(kit("First Role")).is_none());
        let previous = session.replace_kit(kit("Second Role")).unwrap();
        assert_eq!(previous.role, "First Role");
        assert_eq!(session.kit().unwrap().role, "Second Role");
    }

    #[tokio::test]
    async fn test_store_create_and_get() {
        let store = SessionStore::default();
        let handle = store.create(None).await;
        let id = handle.lock().await.id();

        let fetched = store.get(id).await.unwrap();
        assert!(Arc::ptr_eq(&handle, &fetched));
        assert!(store.get(Uuid::new_v4()).await.is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_remove() {
        let store = SessionStore::default();
        let id = store.create(Some(key("sk-a"))).await.lock().await.id();

        assert!(store.remove(id).await);
        assert!(store.get(id).await.is_none());
        assert!(!store.remove(id).await);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_cleanup_evicts_only_idle_sessions() {
        let store = SessionStore::default();
        let idle = store.create(None).await;
        let fresh = store.create(None).await;
        let busy = store.create(None).await;
        idle.lock().await.last_active = Utc::now() - chrono::Duration::minutes(90);
        busy.lock().await.last_active = Utc::now() - chrono::Duration::minutes(90);

        let busy_guard = busy.lock().await;
        assert_eq!(store.cleanup_inactive_sessions(60).await, 1);
        drop(busy_guard);

        let idle_id = idle.lock().await.id();
        assert!(store.get(idle_id).await.is_none());
        assert!(store.get(fresh.lock().await.id()).await.is_some());
        assert!(store.get(busy.lock().await.id()).await.is_some());
    }

    #[test]
    fn test_touch_moves_last_active_forward() {
        let mut session = Session::new(None);
        session.last_active = Utc::now() - chrono::Duration::minutes(5);
        let stale = session.last_active();
        session.touch();
        assert!(session.last_active() > stale);
        assert!(session.created_at <= session.last_active());
    }
}
