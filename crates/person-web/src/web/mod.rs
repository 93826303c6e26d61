//! HTTP surface: routes form submissions and query parameters to
//! [`PersonService`](crate::backend::service::PersonService) calls and picks
//! the page to render.

pub mod form;
pub mod views;

use crate::backend::model::PersonForm;
use crate::backend::state::AppState;
use crate::error::ServiceError;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use form::{FormError, IdParam, RawPersonForm};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

pub type SharedState = Arc<AppState>;

/// Failures that end a request with an error page.
#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    FormBody(#[from] FormRejection),

    #[error(transparent)]
    Query(#[from] QueryRejection),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, title, message) = match self {
            WebError::Service(err @ ServiceError::NotFound(_)) => {
                warn!(%err, "update rejected");
                (StatusCode::NOT_FOUND, "Not found", err.to_string())
            }
            WebError::Service(err @ ServiceError::Store(_)) => {
                error!(%err, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error", err.to_string())
            }
            WebError::Form(err) => (StatusCode::BAD_REQUEST, "Bad request", err.to_string()),
            WebError::FormBody(rejection) => {
                (StatusCode::BAD_REQUEST, "Bad request", rejection.body_text())
            }
            WebError::Query(rejection) => {
                (StatusCode::BAD_REQUEST, "Bad request", rejection.body_text())
            }
        };
        (status, Html(views::error_page(title, &message))).into_response()
    }
}

type WebResult<T> = Result<T, WebError>;

/// Snapshots the table to disk on a blocking thread.
///
/// The change is already applied in memory and visible to later requests,
/// so a failed write is logged and the request still succeeds.
async fn persist(state: &SharedState) {
    let state = state.clone();
    match tokio::task::spawn_blocking(move || state.persist()).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!(%err, "state file not updated, change kept in memory"),
        Err(err) => warn!(%err, "persist task did not complete"),
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/Home", get(home))
        .route("/test", get(seed_test))
        .route("/save", get(save_form).post(save))
        .route("/select", get(select_form).post(select))
        .route("/view", get(view))
        .route("/info/:id", get(info))
        .route("/delete", get(delete_form).post(delete))
        .route("/part_delete", get(part_delete))
        .route("/selectAll", get(select_all))
        .route("/update", get(update_form).post(update))
        .with_state(state)
}

async fn home() -> Html<String> {
    Html(views::home())
}

async fn seed_test(State(state): State<SharedState>) -> WebResult<Redirect> {
    state.service.seed_test()?;
    persist(&state).await;
    Ok(Redirect::to("/"))
}

async fn save_form() -> Html<String> {
    Html(views::input_form())
}

async fn save(
    State(state): State<SharedState>,
    payload: Result<Form<RawPersonForm>, FormRejection>,
) -> WebResult<Redirect> {
    let Form(raw) = payload?;
    debug!(?raw, "save submitted");
    state.service.create(PersonForm::try_from(raw)?)?;
    persist(&state).await;
    Ok(Redirect::to("/"))
}

async fn select_form() -> Html<String> {
    Html(views::select_form())
}

fn render_record(state: &AppState, id: &str) -> WebResult<Html<String>> {
    let person = state.service.fetch(id)?;
    Ok(Html(views::record(id, person.as_ref())))
}

async fn select(
    State(state): State<SharedState>,
    payload: Result<Form<IdParam>, FormRejection>,
) -> WebResult<Html<String>> {
    let Form(param) = payload?;
    render_record(&state, &param.id)
}

async fn view(
    State(state): State<SharedState>,
    query: Result<Query<IdParam>, QueryRejection>,
) -> WebResult<Html<String>> {
    let Query(param) = query?;
    render_record(&state, &param.id)
}

async fn info(State(state): State<SharedState>, Path(id): Path<String>) -> WebResult<Html<String>> {
    render_record(&state, &id)
}

async fn delete_form() -> Html<String> {
    Html(views::delete_form())
}

async fn delete(
    State(state): State<SharedState>,
    payload: Result<Form<IdParam>, FormRejection>,
) -> WebResult<Html<String>> {
    let Form(param) = payload?;
    let deleted = state.service.remove(&param.id)?;
    if deleted {
        persist(&state).await;
    }
    Ok(Html(views::delete_result(&param.id, deleted)))
}

async fn part_delete(
    State(state): State<SharedState>,
    query: Result<Query<IdParam>, QueryRejection>,
) -> WebResult<Html<String>> {
    let Query(param) = query?;
    if state.service.remove(&param.id)? {
        persist(&state).await;
    }
    let persons = state.service.list_all()?;
    Ok(Html(views::list(&persons, Some(param.id.as_str()))))
}

async fn select_all(State(state): State<SharedState>) -> WebResult<Html<String>> {
    let persons = state.service.list_all()?;
    Ok(Html(views::list(&persons, None)))
}

async fn update_form(
    State(state): State<SharedState>,
    query: Result<Query<IdParam>, QueryRejection>,
) -> WebResult<Html<String>> {
    let Query(param) = query?;
    let person = state.service.fetch(&param.id)?;
    Ok(Html(views::update_form(&param.id, person.as_ref())))
}

async fn update(
    State(state): State<SharedState>,
    payload: Result<Form<RawPersonForm>, FormRejection>,
) -> WebResult<Redirect> {
    let Form(raw) = payload?;
    debug!(?raw, "update submitted");
    let form = PersonForm::try_from(raw)?;
    let target = format!("/view?id={}", views::query_value(&form.id));
    state.service.modify(form)?;
    persist(&state).await;
    Ok(Redirect::to(&target))
}
