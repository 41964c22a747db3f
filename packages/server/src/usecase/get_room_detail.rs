//! UseCase: Room 詳細取得

use std::sync::Arc;

use crate::domain::{RoomName, RoomRegistry, RoomSnapshot};

use super::error::GetRoomDetailError;

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Room を名前で取得する（作成はしない）
    ///
    /// Room 名として不正な文字列も `RoomNotFound` として扱う。
    pub async fn execute(&self, room_name: String) -> Result<RoomSnapshot, GetRoomDetailError> {
        let name = RoomName::new(room_name.clone())
            .map_err(|_| GetRoomDetailError::RoomNotFound(room_name.clone()))?;
        let room = self
            .registry
            .lookup(&name)
            .await
            .map_err(|_| GetRoomDetailError::RoomNotFound(room_name))?;
        Ok(room.snapshot().await)
    }
}
