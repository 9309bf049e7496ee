//! Per-request session handling.
//!
//! The GraphQL handler restores a `RequestSession` from the session cookie,
//! resolvers record sign-in/sign-out on it, and the handler commits the
//! recorded change to the session store and the cookie jar afterwards.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{SessionData, SessionStore};

/// Change recorded by a resolver during one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    SignedIn(Uuid),
    SignedOut,
}

#[derive(Debug, Default)]
struct SessionState {
    session_id: Option<String>,
    user_id: Option<Uuid>,
    change: Option<SessionChange>,
}

/// Session view handed to resolvers through the GraphQL request data.
#[derive(Debug, Default)]
pub struct RequestSession {
    state: Mutex<SessionState>,
}

impl RequestSession {
    /// No cookie, or a cookie whose session has expired
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session restored from the store
    pub fn restored(session_id: String, user_id: Uuid) -> Self {
        Self {
            state: Mutex::new(SessionState {
                session_id: Some(session_id),
                user_id: Some(user_id),
                change: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn session_id(&self) -> Option<String> {
        self.lock().session_id.clone()
    }

    /// User signed in for the rest of this request, if any
    pub fn user_id(&self) -> Option<Uuid> {
        self.lock().user_id
    }

    pub fn sign_in(&self, user_id: Uuid) {
        let mut state = self.lock();
        state.user_id = Some(user_id);
        state.change = Some(SessionChange::SignedIn(user_id));
    }

    pub fn sign_out(&self) {
        let mut state = self.lock();
        state.user_id = None;
        state.change = Some(SessionChange::SignedOut);
    }

    pub fn take_change(&self) -> Option<SessionChange> {
        self.lock().change.take()
    }
}

/// Cookie attributes for the session cookie.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub ttl_seconds: u64,
    pub secure: bool,
}

impl CookieSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.session_cookie_name.clone(),
            ttl_seconds: config.session_ttl_seconds,
            secure: config.production,
        }
    }

    fn session_cookie(&self, session_id: String) -> Cookie<'static> {
        let max_age = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);
        Cookie::build((self.name.clone(), session_id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::seconds(max_age))
            .build()
    }

    fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.name.clone(), "")).path("/").build()
    }
}

/// Restore the session named by the request cookie.
///
/// A store failure is logged and treated as signed out so queries that do
/// not need a session still run.
pub async fn load_session(
    store: &dyn SessionStore,
    settings: &CookieSettings,
    jar: &CookieJar,
) -> RequestSession {
    let Some(session_id) = jar.get(&settings.name).map(|c| c.value().to_owned()) else {
        return RequestSession::anonymous();
    };

    match store.load(&session_id).await {
        Ok(Some(data)) => RequestSession::restored(session_id, data.user_id),
        Ok(None) => {
            tracing::debug!("Session cookie refers to an unknown session");
            RequestSession::anonymous()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load session, continuing signed out");
            RequestSession::anonymous()
        }
    }
}

/// Apply the change recorded during the request.
pub async fn commit_session(
    store: &dyn SessionStore,
    settings: &CookieSettings,
    session: &RequestSession,
    jar: CookieJar,
) -> AppResult<CookieJar> {
    let previous = session.session_id();

    match session.take_change() {
        Some(SessionChange::SignedIn(user_id)) => {
            // Fresh id on every sign-in
            if let Some(old) = previous {
                store.destroy(&old).await?;
            }
            let session_id = Uuid::new_v4().simple().to_string();
            store.save(&session_id, &SessionData::new(user_id)).await?;
            tracing::debug!(user_id = %user_id, "Session established");
            Ok(jar.add(settings.session_cookie(session_id)))
        }
        Some(SessionChange::SignedOut) => {
            if let Some(old) = previous {
                store.destroy(&old).await?;
            }
            Ok(jar.remove(settings.removal_cookie()))
        }
        None => Ok(jar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        sessions: Mutex<HashMap<String, SessionData>>,
    }

    impl MemoryStore {
        fn len(&self) -> usize {
            self.sessions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SessionStore for MemoryStore {
        async fn load(&self, session_id: &str) -> AppResult<Option<SessionData>> {
            Ok(self.sessions.lock().unwrap().get(session_id).cloned())
        }

        async fn save(&self, session_id: &str, data: &SessionData) -> AppResult<()> {
            self.sessions
                .lock()
                .unwrap()
                .insert(session_id.to_string(), data.clone());
            Ok(())
        }

        async fn destroy(&self, session_id: &str) -> AppResult<()> {
            self.sessions.lock().unwrap().remove(session_id);
            Ok(())
        }
    }

    /// Store whose writes always fail, like Redis going away mid-request
    struct UnavailableStore;

    #[async_trait]
    impl SessionStore for UnavailableStore {
        async fn load(&self, _session_id: &str) -> AppResult<Option<SessionData>> {
            Ok(None)
        }

        async fn save(&self, _session_id: &str, _data: &SessionData) -> AppResult<()> {
            Err(AppError::Cache(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "connection refused",
            ))))
        }

        async fn destroy(&self, _session_id: &str) -> AppResult<()> {
            Ok(())
        }
    }

    fn settings() -> CookieSettings {
        CookieSettings {
            name: "qid".to_string(),
            ttl_seconds: 3600,
            secure: false,
        }
    }

    #[tokio::test]
    async fn test_no_cookie_is_anonymous() {
        let store = MemoryStore::default();
        let session = load_session(&store, &settings(), &CookieJar::new()).await;
        assert!(session.user_id().is_none());
    }

    #[tokio::test]
    async fn test_sign_in_sets_cookie_and_persists() {
        let store = MemoryStore::default();
        let user_id = Uuid::new_v4();
        let session = RequestSession::anonymous();
        session.sign_in(user_id);

        let jar = commit_session(&store, &settings(), &session, CookieJar::new())
            .await
            .unwrap();

        let cookie = jar.get("qid").unwrap();
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(store.len(), 1);

        let restored = load_session(&store, &settings(), &jar).await;
        assert_eq!(restored.user_id(), Some(user_id));
    }

    #[tokio::test]
    async fn test_sign_in_rotates_existing_session() {
        let store = MemoryStore::default();
        let user_id = Uuid::new_v4();
        store
            .save("old", &SessionData::new(Uuid::new_v4()))
            .await
            .unwrap();

        let session = RequestSession::restored("old".to_string(), user_id);
        session.sign_in(user_id);
        let jar = commit_session(&store, &settings(), &session, CookieJar::new())
            .await
            .unwrap();

        assert!(store.load("old").await.unwrap().is_none());
        assert_ne!(jar.get("qid").unwrap().value(), "old");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_destroys_session() {
        let store = MemoryStore::default();
        store
            .save("abc", &SessionData::new(Uuid::new_v4()))
            .await
            .unwrap();
        let jar = CookieJar::new().add(Cookie::new("qid", "abc"));

        let session = load_session(&store, &settings(), &jar).await;
        assert!(session.user_id().is_some());
        session.sign_out();
        assert!(session.user_id().is_none());

        let jar = commit_session(&store, &settings(), &session, jar)
            .await
            .unwrap();
        assert_eq!(store.len(), 0);
        assert!(jar.get("qid").is_none());
    }

    #[tokio::test]
    async fn test_no_change_leaves_jar_alone() {
        let store = MemoryStore::default();
        let session = RequestSession::restored("abc".to_string(), Uuid::new_v4());
        let jar = CookieJar::new().add(Cookie::new("qid", "abc"));

        let jar = commit_session(&store, &settings(), &session, jar)
            .await
            .unwrap();
        assert_eq!(jar.get("qid").unwrap().value(), "abc");
    }

    #[tokio::test]
    async fn test_failed_sign_in_commit_is_cache_error() {
        let session = RequestSession::anonymous();
        session.sign_in(Uuid::new_v4());

        let result = commit_session(&UnavailableStore, &settings(), &session, CookieJar::new()).await;

        let Err(err) = result else {
            panic!("commit must fail when the store is down");
        };
        assert_eq!(err.code(), "CACHE_ERROR");
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[tokio::test]
    async fn test_unknown_session_is_anonymous() {
        let store = MemoryStore::default();
        let jar = CookieJar::new().add(Cookie::new("qid", "missing"));
        let session = load_session(&store, &settings(), &jar).await;
        assert!(session.user_id().is_none());
        assert!(session.session_id().is_none());
    }
}
