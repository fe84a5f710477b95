//! Mapping of use case errors to HTTP responses and `error` events.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pixelroom_shared::protocol::{ErrorBody, ErrorInfo, ErrorKind};

use crate::{
    domain::DomainError,
    usecase::{ConnectError, CreateRoomError, PlacePixelError, PostMessageError, RoomQueryError},
};

/// An error reported to an HTTP or WebSocket caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: status_of(kind),
            kind,
            message: message.into(),
        }
    }

    pub fn unknown_room(room_id: &str) -> Self {
        Self::new(ErrorKind::UnknownRoom, format!("Room '{room_id}' not found"))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `error` event payload, optionally tagged with the targeted cell
    pub fn into_error_info(self, cell: Option<(i64, i64)>) -> ErrorInfo {
        ErrorInfo {
            kind: self.kind,
            message: self.message,
            x: cell.map(|(x, _)| x),
            y: cell.map(|(_, y)| y),
        }
    }
}

fn status_of(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::UnknownRoom => StatusCode::NOT_FOUND,
        ErrorKind::OutOfBounds
        | ErrorKind::InvalidDimensions
        | ErrorKind::InvalidColor
        | ErrorKind::InvalidRoomName
        | ErrorKind::InvalidMessage => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::InvalidClientId | ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorKind::DuplicateClientId => StatusCode::CONFLICT,
        ErrorKind::RoomFull | ErrorKind::SubscriberOverloaded => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let kind = match &error {
            DomainError::InvalidRoomId(_) => ErrorKind::UnknownRoom,
            DomainError::InvalidClientId(_) => ErrorKind::InvalidClientId,
            DomainError::InvalidRoomName(_) | DomainError::InvalidDescription(_) => {
                ErrorKind::InvalidRoomName
            }
            DomainError::InvalidDimensions { .. } => ErrorKind::InvalidDimensions,
            DomainError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            DomainError::InvalidColor(_) => ErrorKind::InvalidColor,
            DomainError::InvalidMessage(_) => ErrorKind::InvalidMessage,
            DomainError::DuplicateParticipant(_) => ErrorKind::DuplicateClientId,
            DomainError::RoomFull(_) => ErrorKind::RoomFull,
        };
        Self::new(kind, error.to_string())
    }
}

impl From<CreateRoomError> for ApiError {
    fn from(error: CreateRoomError) -> Self {
        let kind = match &error {
            CreateRoomError::InvalidRoomName(_) | CreateRoomError::InvalidDescription(_) => {
                ErrorKind::InvalidRoomName
            }
            CreateRoomError::InvalidDimensions(_) => ErrorKind::InvalidDimensions,
            CreateRoomError::StoreFailed(_) => ErrorKind::Internal,
        };
        Self::new(kind, error.to_string())
    }
}

impl From<RoomQueryError> for ApiError {
    fn from(error: RoomQueryError) -> Self {
        match error {
            RoomQueryError::UnknownRoom(id) => Self::unknown_room(&id),
        }
    }
}

impl From<PlacePixelError> for ApiError {
    fn from(error: PlacePixelError) -> Self {
        match error {
            PlacePixelError::UnknownRoom(id) => Self::unknown_room(&id),
            PlacePixelError::OutOfBounds(message) => Self::new(ErrorKind::OutOfBounds, message),
        }
    }
}

impl From<PostMessageError> for ApiError {
    fn from(error: PostMessageError) -> Self {
        match error {
            PostMessageError::UnknownRoom(id) => Self::unknown_room(&id),
        }
    }
}

impl From<ConnectError> for ApiError {
    fn from(error: ConnectError) -> Self {
        let kind = match &error {
            ConnectError::UnknownRoom(_) => ErrorKind::UnknownRoom,
            ConnectError::DuplicateClientId(_) => ErrorKind::DuplicateClientId,
            ConnectError::RoomFull(_) => ErrorKind::RoomFull,
        };
        Self::new(kind, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_errors_map_to_status_codes() {
        // テスト項目: 接続エラーが 404 / 409 / 503 に対応付けられる
        // given (前提条件):
        let unknown = ConnectError::UnknownRoom("r1".to_string());
        let duplicate = ConnectError::DuplicateClientId("alice".to_string());
        let full = ConnectError::RoomFull(2);

        // when (操作) / then (期待する結果):
        assert_eq!(ApiError::from(unknown).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(duplicate).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(full).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_invalid_client_id_is_bad_request() {
        // テスト項目: 不正な client_id は 400 になる
        // given (前提条件):
        let error = DomainError::InvalidClientId("bad id".to_string());

        // when (操作):
        let api_error = ApiError::from(error);

        // then (期待する結果):
        assert_eq!(api_error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api_error.kind(), ErrorKind::InvalidClientId);
    }

    #[test]
    fn test_error_info_carries_cell() {
        // テスト項目: error イベントに失敗したセルの座標が含まれる
        // given (前提条件):
        let error = ApiError::from(PlacePixelError::OutOfBounds("outside".to_string()));

        // when (操作):
        let info = error.into_error_info(Some((-1, 0)));

        // then (期待する結果):
        assert_eq!(info.kind, ErrorKind::OutOfBounds);
        assert_eq!((info.x, info.y), (Some(-1), Some(0)));
    }
}
