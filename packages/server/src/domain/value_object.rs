//! Value objects.
//!
//! Every value object validates on construction; holding one means the
//! invariant already holds.

use std::fmt;

use uuid::Uuid;

use super::error::DomainError;

const MAX_ID_LENGTH: usize = 64;
const MAX_CLIENT_ID_LENGTH: usize = 32;
const MAX_ROOM_NAME_LENGTH: usize = 64;
const MAX_DESCRIPTION_LENGTH: usize = 280;
const MAX_MESSAGE_LENGTH: usize = 500;

/// Room identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() || value.len() > MAX_ID_LENGTH {
            return Err(DomainError::InvalidRoomId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Uuid> for RoomId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client (participant / author) identifier
///
/// 1 to 32 characters of ASCII letters, digits, `_` or `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let valid = !value.is_empty()
            && value.len() <= MAX_CLIENT_ID_LENGTH
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(DomainError::InvalidClientId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Chat message identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Room display name (trimmed, 1 to 64 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRoomName("name is empty".to_string()));
        }
        if trimmed.chars().count() > MAX_ROOM_NAME_LENGTH {
            return Err(DomainError::InvalidRoomName(format!(
                "name is longer than {} characters",
                MAX_ROOM_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Room description (trimmed, up to 280 characters, may be empty)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomDescription(String);

impl RoomDescription {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(DomainError::InvalidDescription(format!(
                "description is longer than {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Allowed range for canvas width and height (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionLimits {
    pub min: u32,
    pub max: u32,
}

impl Default for DimensionLimits {
    fn default() -> Self {
        Self { min: 10, max: 1000 }
    }
}

/// Canvas dimensions, fixed when the room is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    width: u32,
    height: u32,
}

impl CanvasSize {
    /// Validate raw dimensions. Values that do not fit in `u32` are rejected
    /// like any other out-of-range value.
    pub fn new(width: i64, height: i64, limits: DimensionLimits) -> Result<Self, DomainError> {
        let range = limits.min.max(1)..=limits.max;
        let fits = |value: i64| u32::try_from(value).ok().filter(|v| range.contains(v));
        match (fits(width), fits(height)) {
            (Some(width), Some(height)) => Ok(Self { width, height }),
            _ => Err(DomainError::InvalidDimensions {
                width,
                height,
                min: limits.min,
                max: limits.max,
            }),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resolve raw coordinates to an in-bounds position.
    pub fn position(&self, x: i64, y: i64) -> Result<PixelPosition, DomainError> {
        let in_bounds =
            (0..i64::from(self.width)).contains(&x) && (0..i64::from(self.height)).contains(&y);
        if !in_bounds {
            return Err(DomainError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        // both coordinates are below a u32 bound here
        Ok(PixelPosition {
            x: x as u32,
            y: y as u32,
        })
    }
}

/// In-bounds cell coordinate. Only obtainable through [`CanvasSize::position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelPosition {
    x: u32,
    y: u32,
}

impl PixelPosition {
    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }
}

/// `#rrggbb` color, normalized to lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let valid = value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(DomainError::InvalidColor(value));
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Color {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Chat message text (trimmed, 1 to 500 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidMessage("message is empty".to_string()));
        }
        if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(DomainError::InvalidMessage(format!(
                "message is longer than {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix timestamp (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: i64, height: i64) -> CanvasSize {
        CanvasSize::new(width, height, DimensionLimits::default()).unwrap()
    }

    #[test]
    fn test_canvas_size_rejects_zero_width() {
        // テスト項目: 幅 0 のキャンバスは InvalidDimensions になる
        // given (前提条件):
        let limits = DimensionLimits::default();

        // when (操作):
        let result = CanvasSize::new(0, 100, limits);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(DomainError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn test_canvas_size_accepts_range_edges() {
        // テスト項目: 範囲の両端（10, 1000）は受け入れられ、その外側は拒否される
        // given (前提条件):
        let limits = DimensionLimits::default();

        // when (操作):
        let min = CanvasSize::new(10, 10, limits);
        let max = CanvasSize::new(1000, 1000, limits);
        let below = CanvasSize::new(9, 100, limits);
        let above = CanvasSize::new(100, 1001, limits);

        // then (期待する結果):
        assert!(min.is_ok());
        assert!(max.is_ok());
        assert!(below.is_err());
        assert!(above.is_err());
    }

    #[test]
    fn test_canvas_size_rejects_values_outside_u32() {
        // テスト項目: 負の値や u32 に収まらない値も InvalidDimensions になる
        // given (前提条件):
        let limits = DimensionLimits::default();

        // when (操作):
        let negative = CanvasSize::new(-5, 100, limits);
        let huge = CanvasSize::new(100, 5_000_000_000, limits);

        // then (期待する結果):
        assert!(matches!(
            negative,
            Err(DomainError::InvalidDimensions { width: -5, .. })
        ));
        assert!(matches!(
            huge,
            Err(DomainError::InvalidDimensions {
                height: 5_000_000_000,
                ..
            })
        ));
    }

    #[test]
    fn test_position_rejects_out_of_bounds() {
        // テスト項目: (-1, 0) と (width, 0) は OutOfBounds になる
        // given (前提条件):
        let size = size(100, 50);

        // when (操作):
        let negative = size.position(-1, 0);
        let at_width = size.position(100, 0);
        let at_height = size.position(0, 50);

        // then (期待する結果):
        assert!(matches!(negative, Err(DomainError::OutOfBounds { x: -1, .. })));
        assert!(matches!(at_width, Err(DomainError::OutOfBounds { x: 100, .. })));
        assert!(matches!(at_height, Err(DomainError::OutOfBounds { y: 50, .. })));
    }

    #[test]
    fn test_position_accepts_last_cell() {
        // テスト項目: 右下の最後のセルは範囲内
        // given (前提条件):
        let size = size(100, 50);

        // when (操作):
        let position = size.position(99, 49).unwrap();

        // then (期待する結果):
        assert_eq!((position.x(), position.y()), (99, 49));
    }

    #[test]
    fn test_color_is_normalized_to_lowercase() {
        // テスト項目: 色は小文字に正規化される
        // given (前提条件):
        let raw = "#FF00aA".to_string();

        // when (操作):
        let color = Color::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(color.as_str(), "#ff00aa");
    }

    #[test]
    fn test_color_rejects_malformed_values() {
        // テスト項目: #RRGGBB 以外の形式は拒否される
        for raw in ["red", "#fff", "#gg0000", "ff0000", "#ff00001", ""] {
            assert!(
                Color::new(raw.to_string()).is_err(),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_client_id_validation() {
        // テスト項目: client_id は英数字・_・- のみ許可される
        assert!(ClientId::new("alice_01-x".to_string()).is_ok());
        assert!(ClientId::new(String::new()).is_err());
        assert!(ClientId::new("has space".to_string()).is_err());
        assert!(ClientId::new("a".repeat(33)).is_err());
    }

    #[test]
    fn test_room_name_is_trimmed_and_required() {
        // テスト項目: ルーム名はトリムされ、空文字は拒否される
        assert_eq!(
            RoomName::new("  Sunset  ".to_string()).unwrap().as_str(),
            "Sunset"
        );
        assert!(RoomName::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_message_content_rejects_blank_and_long_text() {
        // テスト項目: 空白のみ・長すぎるメッセージは拒否される
        assert!(MessageContent::new(" \n ".to_string()).is_err());
        assert!(MessageContent::new("x".repeat(501)).is_err());
        assert_eq!(
            MessageContent::new(" hi ".to_string()).unwrap().as_str(),
            "hi"
        );
    }
}
