use axum::{extract::{Path, State}, http::StatusCode, Json};
use service::video::Video;

use crate::errors::JsonApiError;
use crate::extract::{parse_video_id, RequestArgs};
use crate::routes::ServerState;

#[utoipa::path(
    get, path = "/video/{id}", tag = "video",
    params(("id" = i64, Path, description = "Video ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::VideoDoc),
        (status = 404, description = "video does not exist", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Video>, JsonApiError> {
    let id = parse_video_id(&id)?;
    Ok(Json(state.videos.get(id).await?))
}

#[utoipa::path(
    put, path = "/video/{id}", tag = "video",
    params(("id" = i64, Path, description = "Video ID")),
    request_body = crate::openapi::CreateVideoDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::VideoDoc),
        (status = 400, description = "Missing or invalid argument"),
        (status = 409, description = "video already exists", body = crate::openapi::MessageDoc)
    )
)]
pub async fn put(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    RequestArgs(args): RequestArgs,
) -> Result<(StatusCode, Json<Video>), JsonApiError> {
    let id = parse_video_id(&id)?;
    let video = state.videos.create(id, &args).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

#[utoipa::path(
    patch, path = "/video/{id}", tag = "video",
    params(("id" = i64, Path, description = "Video ID")),
    request_body = crate::openapi::UpdateVideoDoc,
    responses(
        (status = 201, description = "Updated", body = crate::openapi::VideoDoc),
        (status = 400, description = "Invalid argument"),
        (status = 404, description = "video does not exist", body = crate::openapi::MessageDoc)
    )
)]
pub async fn patch(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    RequestArgs(args): RequestArgs,
) -> Result<(StatusCode, Json<Video>), JsonApiError> {
    let id = parse_video_id(&id)?;
    let video = state.videos.update(id, &args).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

#[utoipa::path(
    delete, path = "/video/{id}", tag = "video",
    params(("id" = i64, Path, description = "Video ID")),
    responses((status = 204, description = "Accepted; the record is kept"))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_video_id(&id)?;
    state.videos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
