//! HTTP API client for room listing and creation.

use pixelroom_shared::protocol::{CreateRoomRequest, ErrorBody, RoomInfo, RoomSummaryInfo};
use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Client for the server's `/api` routes
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomSummaryInfo>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/rooms", self.base_url))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create_room(&self, request: &CreateRoomRequest) -> Result<RoomInfo, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/rooms", self.base_url))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    /// WebSocket URL of a room, with the scheme switched from http(s) to ws(s)
    pub fn websocket_url(&self, room_id: &str, client_id: &str) -> String {
        let base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.base_url.clone()
        };
        format!("{}/ws/{}?client_id={}", base, room_id, client_id)
    }
}

/// Decode a success body, or turn the server's error body into `ClientError::Api`
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await?;
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => Err(ClientError::Api {
            kind: body.error,
            message: body.message,
        }),
        Err(_) => Err(ClientError::ConnectionError(format!(
            "HTTP {}: {}",
            status.as_u16(),
            text
        ))),
    }
}
