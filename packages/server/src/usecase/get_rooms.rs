//! UseCase: Room 一覧取得

use std::sync::Arc;

use crate::domain::{RoomRegistry, RoomSnapshot};

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 全ての Room のスナップショット（名前順）
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        let rooms = self.registry.rooms().await;
        let mut snapshots = Vec::with_capacity(rooms.len());
        for room in rooms {
            snapshots.push(room.snapshot().await);
        }
        snapshots
    }
}
