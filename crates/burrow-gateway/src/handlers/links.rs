use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use burrow_core::{AdminPassword, ShortenParams};
use tracing::info;

use super::{ensure_human, parse_id};
use crate::error::Result;
use crate::extract::ApiJson;
use crate::model::{
    AdminRequest, CreateLinkRequest, CreateLinkResponse, GetLinkResponse, LinkDetailsResponse,
};
use crate::state::AppState;

pub async fn create_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>)> {
    ensure_human(&state, request.captcha_response.as_deref(), &headers).await?;

    let created = state
        .shortener()
        .shorten(ShortenParams {
            target_url: request.url,
        })
        .await?;
    info!(id = %created.id, "link created via api");

    let short_url = state.short_url(&created.id, &headers);
    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            id: created.id,
            short_url,
            admin_password: created.admin_password.into_inner(),
        }),
    ))
}

pub async fn get_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GetLinkResponse>> {
    let id = parse_id(id)?;
    let record = state.shortener().resolve(&id).await?;

    Ok(Json(GetLinkResponse {
        id: record.id,
        url: record.target_url,
    }))
}

pub async fn inspect_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<AdminRequest>,
) -> Result<Json<LinkDetailsResponse>> {
    let id = parse_id(id)?;
    let password = AdminPassword::new(request.admin_password);
    let record = state.shortener().inspect(&id, &password).await?;

    let short_url = state.short_url(&record.id, &headers);
    Ok(Json(LinkDetailsResponse::new(record, short_url)))
}

pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AdminRequest>,
) -> Result<StatusCode> {
    let id = parse_id(id)?;
    let password = AdminPassword::new(request.admin_password);
    state.shortener().delete(&id, &password).await?;

    Ok(StatusCode::NO_CONTENT)
}
