//! HTTP surface: the intake form and its submit endpoint.

pub mod flash;
pub mod pages;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use log::error;

use crate::db::Database;
use crate::error::SubmissionError;
use crate::notifier::Notifier;
use crate::submission::{handle_submission, SubmissionForm};
use crate::tracking::Clock;

use flash::Flash;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub clock: Arc<dyn Clock>,
    pub notifier: Arc<dyn Notifier>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/submit", post(submit))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Any failure that should reach the user as a 500.
#[derive(Debug)]
pub struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!("Request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, ServerError> {
    let preview = state.db.preview_tracking_code(state.clock.now()).await?;
    let flash = Flash::from_jar(&jar);
    let page = Html(pages::form_page(&preview, flash.as_ref()).into_string());

    if flash.is_some() {
        Ok((jar.remove(Flash::removal()), page).into_response())
    } else {
        Ok(page.into_response())
    }
}

async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SubmissionForm>,
) -> Result<Response, ServerError> {
    let flash = match handle_submission(
        &state.db,
        state.clock.as_ref(),
        state.notifier.as_ref(),
        form,
    )
    .await
    {
        Ok(outcome) => Flash::success(outcome.message()),
        Err(SubmissionError::Validation(message)) => Flash::error(message),
        Err(err @ SubmissionError::Storage(_)) => return Err(err.into()),
    };

    Ok((jar.add(flash.cookie()), Redirect::to("/")).into_response())
}

async fn healthz() -> &'static str {
    "ok"
}
