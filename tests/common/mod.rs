//! In-memory stand-ins for Postgres and Redis, wired the same way the
//! GraphQL handler wires the real ones.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_graphql::Request;
use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use sea_orm::DbErr;
use serde_json::Value;
use uuid::Uuid;

use postit::api::session::{commit_session, load_session, CookieSettings};
use postit::api::{build_schema, AppSchema};
use postit::domain::{Argon2Hashing, Post, User};
use postit::errors::AppResult;
use postit::infra::{
    PostRepository, SessionData, SessionStore, StoreError, UnitOfWork, UserRepository,
};
use postit::services::{Authenticator, PostManager, Services};

#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<Vec<User>>,
    fail_writes: AtomicBool,
}

impl MemoryUsers {
    pub fn all(&self) -> Vec<User> {
        self.rows.lock().unwrap().clone()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, username: String, password_hash: String) -> Result<User, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database(DbErr::Custom("disk full".to_string())));
        }

        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.username == username) {
            return Err(StoreError::UniqueViolation("users_username_key".to_string()));
        }

        let user = User::new(Uuid::new_v4(), username, password_hash);
        rows.push(user.clone());
        Ok(user)
    }
}

#[derive(Default)]
pub struct MemoryPosts {
    rows: Mutex<Vec<Post>>,
    next_id: Mutex<i32>,
}

#[async_trait]
impl PostRepository for MemoryPosts {
    async fn list(&self) -> AppResult<Vec<Post>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Post>> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, title: String) -> AppResult<Post> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let now = Utc::now();
        let post = Post {
            id: *next_id,
            title,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update_title(&self, id: i32, title: String) -> AppResult<Option<Post>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|p| p.id == id).map(|post| {
            post.title = title;
            post.updated_at = Utc::now();
            post.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok((before - rows.len()) as u64)
    }
}

pub struct MemoryUnitOfWork {
    users: Arc<MemoryUsers>,
    posts: Arc<MemoryPosts>,
}

impl UnitOfWork for MemoryUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn posts(&self) -> Arc<dyn PostRepository> {
        self.posts.clone()
    }
}

#[derive(Default)]
pub struct MemorySessions {
    sessions: Mutex<HashMap<String, SessionData>>,
}

impl MemorySessions {
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
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

/// Schema plus in-memory backends; each `execute` is one HTTP request.
pub struct TestApp {
    pub schema: AppSchema,
    pub users: Arc<MemoryUsers>,
    pub posts: Arc<MemoryPosts>,
    pub sessions: Arc<MemorySessions>,
    pub cookies: CookieSettings,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            schema: build_schema(),
            users: Arc::new(MemoryUsers::default()),
            posts: Arc::new(MemoryPosts::default()),
            sessions: Arc::new(MemorySessions::default()),
            cookies: CookieSettings {
                name: "qid".to_string(),
                ttl_seconds: 3600,
                secure: false,
            },
        }
    }

    fn services(&self) -> Services {
        let uow = Arc::new(MemoryUnitOfWork {
            users: self.users.clone(),
            posts: self.posts.clone(),
        });
        Services::new(
            Arc::new(Authenticator::new(uow.clone(), Arc::new(Argon2Hashing))),
            Arc::new(PostManager::new(uow)),
        )
    }

    /// Run a query with the given cookies; returns the updated cookies and
    /// the serialized GraphQL response.
    pub async fn execute_with(&self, jar: CookieJar, query: &str) -> (CookieJar, Value) {
        let session = Arc::new(load_session(self.sessions.as_ref(), &self.cookies, &jar).await);
        let request = Request::new(query).data(self.services()).data(session.clone());

        let response = self.schema.execute(request).await;
        let jar = commit_session(self.sessions.as_ref(), &self.cookies, &session, jar)
            .await
            .unwrap();

        (jar, serde_json::to_value(&response).unwrap())
    }

    /// Run a query without cookies
    pub async fn execute(&self, query: &str) -> Value {
        self.execute_with(CookieJar::new(), query).await.1
    }
}

pub fn register_mutation(username: &str, password: &str) -> String {
    format!(
        r#"mutation {{ register(username: "{username}", password: "{password}") {{
            errors {{ field message }}
            user {{ id username }}
        }} }}"#
    )
}

pub fn login_mutation(username: &str, password: &str) -> String {
    format!(
        r#"mutation {{ login(username: "{username}", password: "{password}") {{
            errors {{ field message }}
            user {{ id username }}
        }} }}"#
    )
}

pub fn session_cookie(jar: &CookieJar) -> Option<Cookie<'static>> {
    jar.get("qid").cloned()
}
