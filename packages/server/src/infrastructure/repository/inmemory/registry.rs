//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をプロセス内のディレクトリとして使用します。
//!
//! ## ロック
//!
//! Room の「存在確認と作成」は 1 つのロックの中で行うため、
//! 同じ名前の Room が同時に 2 つ作られることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    config::RoomConfig,
    domain::{RelayError, Room, RoomName, RoomRegistry},
};

/// インメモリ Room Registry 実装
pub struct InMemoryRoomRegistry {
    rooms: Mutex<HashMap<RoomName, Arc<Room>>>,
    /// 新しく作成する Room の設定
    room_config: RoomConfig,
}

impl InMemoryRoomRegistry {
    /// 空の InMemoryRoomRegistry を作成
    pub fn new(room_config: RoomConfig) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            room_config,
        }
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn find_or_create(&self, name: &RoomName) -> Arc<Room> {
        let mut rooms = self.rooms.lock().await;
        if let Some(room) = rooms.get(name) {
            return room.clone();
        }

        let room = Room::new(name.clone(), self.room_config.queue_capacity);
        rooms.insert(name.clone(), room.clone());
        tracing::info!("Room '{}' created ({} rooms)", name, rooms.len());
        room
    }

    async fn lookup(&self, name: &RoomName) -> Result<Arc<Room>, RelayError> {
        self.rooms
            .lock()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| RelayError::NotFound(format!("room '{}'", name)))
    }

    async fn rooms(&self) -> Vec<Arc<Room>> {
        let mut rooms: Vec<Arc<Room>> = self.rooms.lock().await.values().cloned().collect();
        rooms.sort_by(|a, b| a.name().cmp(b.name()));
        rooms
    }

    async fn reclaim_if_empty(&self, room: &Room) -> bool {
        let name = room.name();
        let mut rooms = self.rooms.lock().await;
        let registered = rooms
            .get(name)
            .is_some_and(|current| std::ptr::eq(Arc::as_ptr(current), room));
        if !registered {
            return false;
        }
        if !room.close_if_empty().await {
            return false;
        }
        rooms.remove(name);
        tracing::info!("Room '{}' reclaimed ({} rooms)", name, rooms.len());
        true
    }
}
