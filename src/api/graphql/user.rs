//! Account resolvers: `me`, `register`, `login`, `logout`.

use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::{services, session};
use crate::domain::{User, UserResponse};
use crate::services::{AuthService, ServiceContainer};

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// The signed-in user, or null without a session
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let Some(user_id) = session(ctx)?.user_id() else {
            return Ok(None);
        };

        services(ctx)?
            .auth()
            .current_user(user_id)
            .await
            .map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Create an account and sign in as it
    async fn register(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<UserResponse> {
        let response = services(ctx)?
            .auth()
            .register(username, password)
            .await
            .map_err(|e| e.extend())?;

        sign_in_on_success(ctx, &response)?;
        Ok(response)
    }

    /// Check credentials and sign in
    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<UserResponse> {
        let response = services(ctx)?
            .auth()
            .login(username, password)
            .await
            .map_err(|e| e.extend())?;

        sign_in_on_success(ctx, &response)?;
        Ok(response)
    }

    /// End the current session. Always true, signed in or not.
    async fn logout(&self, ctx: &Context<'_>) -> Result<bool> {
        session(ctx)?.sign_out();
        Ok(true)
    }
}

fn sign_in_on_success(ctx: &Context<'_>, response: &UserResponse) -> Result<()> {
    if let Some(user) = response.authenticated_user() {
        session(ctx)?.sign_in(user.id);
    }
    Ok(())
}
