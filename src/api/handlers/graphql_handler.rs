//! GraphQL endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::api::session::{commit_session, load_session};
use crate::api::AppState;
use crate::config::GRAPHQL_PATH;
use crate::errors::AppResult;
use crate::services::Services;

/// Execute one GraphQL request.
///
/// The session is restored from the cookie before execution and any
/// sign-in/sign-out recorded by a resolver is written back afterwards.
pub async fn graphql(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<async_graphql::Request>,
) -> AppResult<(CookieJar, Json<async_graphql::Response>)> {
    let session = Arc::new(load_session(state.sessions.as_ref(), &state.cookies, &jar).await);
    let services = Services::from_connection(state.database.get_connection(), state.hasher.clone());

    let request = request.data(services).data(session.clone());
    let response = state.schema.execute(request).await;

    if response.is_err() {
        tracing::debug!(errors = response.errors.len(), "GraphQL request finished with errors");
    }

    let jar = commit_session(state.sessions.as_ref(), &state.cookies, &session, jar).await?;
    Ok((jar, Json(response)))
}

/// GraphiQL explorer; not served in production.
pub async fn graphiql(State(state): State<AppState>) -> Response {
    if !state.graphiql {
        return StatusCode::NOT_FOUND.into_response();
    }

    Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint(GRAPHQL_PATH)
            .finish(),
    )
    .into_response()
}
