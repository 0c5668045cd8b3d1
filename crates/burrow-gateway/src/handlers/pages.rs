use askama::Template;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use burrow_core::ShortenParams;
use tracing::{info, trace};

use super::{ensure_human, parse_id};
use crate::error::{AppError, Result};
use crate::model::NewLinkForm;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    captcha_site_key: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "created.html")]
struct CreatedTemplate {
    short_url: String,
    target_url: String,
    admin_password: String,
}

#[derive(Template)]
#[template(path = "result.html")]
struct ResultTemplate {
    short_url: String,
}

pub async fn index_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let page = IndexTemplate {
        captcha_site_key: state.captcha_site_key(),
    };
    Ok(Html(page.render()?))
}

/// Handles the index form. The admin password is shown on this page and
/// nowhere else.
pub async fn new_link_form_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<NewLinkForm>,
) -> Result<Html<String>> {
    ensure_human(&state, form.captcha_response.as_deref(), &headers).await?;

    let created = state
        .shortener()
        .shorten(ShortenParams {
            target_url: form.url.clone(),
        })
        .await?;
    info!(id = %created.id, "link created via form");

    let page = CreatedTemplate {
        short_url: state.short_url(&created.id, &headers),
        target_url: form.url,
        admin_password: created.admin_password.into_inner(),
    };
    Ok(Html(page.render()?))
}

pub async fn result_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>> {
    let id = parse_id(id)?;
    let record = state.shortener().resolve(&id).await?;

    let page = ResultTemplate {
        short_url: state.short_url(&record.id, &headers),
    };
    Ok(Html(page.render()?))
}

pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let id = parse_id(id)?;
    let record = state.shortener().resolve(&id).await?;

    let location =
        HeaderValue::from_bytes(record.target_url.as_bytes()).map_err(|_| AppError::InvalidRedirect)?;
    trace!(id = %id, "redirecting");

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}
