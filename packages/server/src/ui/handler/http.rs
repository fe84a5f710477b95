//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use pixelroom_shared::protocol::{
    ChatMessageInfo, CreateRoomRequest, ErrorKind, PixelInfo, PlacePixelRequest,
    PostMessageRequest, RoomDetail, RoomInfo, RoomSummaryInfo, SnapshotInfo,
};
use serde::Deserialize;

use crate::{
    domain::{ClientId, Color, MessageContent},
    ui::{error::ApiError, state::AppState},
};

use super::parse_room_id;

/// Number of messages returned when `limit` is omitted
const DEFAULT_MESSAGE_LIMIT: usize = 50;

fn bad_request(rejection: impl std::fmt::Display) -> ApiError {
    ApiError::new(ErrorKind::InvalidRequest, rejection.to_string())
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms, most recent first
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryInfo>> {
    let rooms = state.usecases.get_rooms.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.into_iter().map(RoomSummaryInfo::from).collect())
}

/// Create a room
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateRoomRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RoomInfo>), ApiError> {
    let Json(request) = payload.map_err(bad_request)?;

    let room = state
        .usecases
        .create_room
        .execute(
            request.name,
            request.description,
            request.width,
            request.height,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(room.into())))
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetail>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    let detail = state.usecases.get_room_detail.execute(&room_id).await?;

    Ok(Json(RoomDetail {
        room: detail.room.into(),
        participants: detail.participants.into_iter().map(Into::into).collect(),
    }))
}

/// Get the full canvas of a room
pub async fn get_snapshot(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<SnapshotInfo>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    let snapshot = state.usecases.get_snapshot.execute(&room_id).await?;

    Ok(Json(snapshot.into()))
}

/// Place a pixel
pub async fn place_pixel(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    payload: Result<Json<PlacePixelRequest>, JsonRejection>,
) -> Result<Json<PixelInfo>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    let Json(request) = payload.map_err(bad_request)?;

    // Convert String -> Domain Models
    let color = Color::try_from(request.color)?;
    let author = ClientId::try_from(request.author_id)?;

    let write = state
        .usecases
        .place_pixel
        .execute(&room_id, request.x, request.y, color, author)
        .await?;

    Ok(Json(write.into()))
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<usize>,
}

/// Get recent messages, oldest first
pub async fn get_recent_messages(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    query: Result<Query<MessagesQuery>, QueryRejection>,
) -> Result<Json<Vec<ChatMessageInfo>>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    let Query(query) = query.map_err(bad_request)?;
    let limit = query.limit.unwrap_or(DEFAULT_MESSAGE_LIMIT);

    let messages = state
        .usecases
        .get_recent_messages
        .execute(&room_id, limit)
        .await?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

/// Post a chat message
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    payload: Result<Json<PostMessageRequest>, JsonRejection>,
) -> Result<Json<ChatMessageInfo>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    let Json(request) = payload.map_err(bad_request)?;

    let sender = ClientId::try_from(request.sender)?;
    let content = MessageContent::try_from(request.text)?;

    let message = state
        .usecases
        .post_message
        .execute(&room_id, sender, content)
        .await?;

    Ok(Json(message.into()))
}
