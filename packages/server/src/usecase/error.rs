//! UseCase 層のエラー定義
//!
//! ユースケースごとに 1 つのエラー型を持ちます。
//! UI 層はこれらを HTTP ステータスコードや `error` イベントに変換します。

use thiserror::Error;

use crate::domain::{DomainError, RepositoryError};

/// ルーム作成時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error("{0}")]
    InvalidRoomName(String),

    #[error("{0}")]
    InvalidDescription(String),

    #[error("{0}")]
    InvalidDimensions(String),

    #[error("Failed to store room: {0}")]
    StoreFailed(String),
}

/// ルームの参照系ユースケースのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomQueryError {
    #[error("Room '{0}' not found")]
    UnknownRoom(String),
}

/// ピクセル書き込み時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacePixelError {
    #[error("Room '{0}' not found")]
    UnknownRoom(String),

    #[error("{0}")]
    OutOfBounds(String),
}

/// メッセージ投稿時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostMessageError {
    #[error("Room '{0}' not found")]
    UnknownRoom(String),
}

/// 参加者接続時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("Room '{0}' not found")]
    UnknownRoom(String),

    #[error("Client ID '{0}' is already connected to this room")]
    DuplicateClientId(String),

    #[error("Room is full (capacity {0})")]
    RoomFull(usize),
}

/// 参加者切断時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("Room '{0}' not found")]
    UnknownRoom(String),

    #[error("Client '{0}' is not connected")]
    NotConnected(String),
}

impl From<RepositoryError> for RoomQueryError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(id) | RepositoryError::DuplicateRoom(id) => {
                RoomQueryError::UnknownRoom(id)
            }
            RepositoryError::Domain(e) => RoomQueryError::UnknownRoom(e.to_string()),
        }
    }
}

impl From<RepositoryError> for PlacePixelError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Domain(e @ DomainError::OutOfBounds { .. }) => {
                PlacePixelError::OutOfBounds(e.to_string())
            }
            RepositoryError::RoomNotFound(id) | RepositoryError::DuplicateRoom(id) => {
                PlacePixelError::UnknownRoom(id)
            }
            RepositoryError::Domain(e) => PlacePixelError::OutOfBounds(e.to_string()),
        }
    }
}

impl From<RepositoryError> for PostMessageError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(id) | RepositoryError::DuplicateRoom(id) => {
                PostMessageError::UnknownRoom(id)
            }
            RepositoryError::Domain(e) => PostMessageError::UnknownRoom(e.to_string()),
        }
    }
}

impl From<RepositoryError> for ConnectError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Domain(DomainError::DuplicateParticipant(id)) => {
                ConnectError::DuplicateClientId(id)
            }
            RepositoryError::Domain(DomainError::RoomFull(capacity)) => {
                ConnectError::RoomFull(capacity)
            }
            RepositoryError::RoomNotFound(id) | RepositoryError::DuplicateRoom(id) => {
                ConnectError::UnknownRoom(id)
            }
            RepositoryError::Domain(e) => ConnectError::UnknownRoom(e.to_string()),
        }
    }
}

impl From<RepositoryError> for DisconnectError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(id) | RepositoryError::DuplicateRoom(id) => {
                DisconnectError::UnknownRoom(id)
            }
            RepositoryError::Domain(e) => DisconnectError::UnknownRoom(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_error_from_repository_error() {
        // テスト項目: リポジトリのエラーが接続エラーに対応付けられる
        // given (前提条件):
        let duplicate = RepositoryError::Domain(DomainError::DuplicateParticipant("alice".into()));
        let full = RepositoryError::Domain(DomainError::RoomFull(2));
        let missing = RepositoryError::RoomNotFound("r1".into());

        // when (操作) / then (期待する結果):
        assert_eq!(
            ConnectError::from(duplicate),
            ConnectError::DuplicateClientId("alice".into())
        );
        assert_eq!(ConnectError::from(full), ConnectError::RoomFull(2));
        assert_eq!(
            ConnectError::from(missing),
            ConnectError::UnknownRoom("r1".into())
        );
    }

    #[test]
    fn test_place_pixel_error_keeps_out_of_bounds_message() {
        // テスト項目: 範囲外エラーはメッセージを保ったまま変換される
        // given (前提条件):
        let error = RepositoryError::Domain(DomainError::OutOfBounds {
            x: -1,
            y: 0,
            width: 10,
            height: 10,
        });

        // when (操作):
        let converted = PlacePixelError::from(error);

        // then (期待する結果):
        assert_eq!(
            converted,
            PlacePixelError::OutOfBounds("Pixel (-1, 0) is outside the 10x10 canvas".into())
        );
    }
}
