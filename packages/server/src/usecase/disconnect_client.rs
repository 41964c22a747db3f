//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - Room からの退出、Transport のクローズ、空 Room の回収
//!
//! ### なぜこのテストが必要か
//! - 切断したクライアントに配信し続けないことを保証
//! - 保持ポリシーに従って空の Room が残る・消えることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：最後のメンバーの切断（Retain / Reclaim）
//! - エッジケース：他のメンバーが残っている場合、二重の切断、回収済みの古い Room

use std::sync::Arc;

use crate::{
    config::RoomRetention,
    domain::{Client, Room, RoomRegistry},
};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// Registry（Room ディレクトリの抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// 空になった Room の扱い
    retention: RoomRetention,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, retention: RoomRetention) -> Self {
        Self {
            registry,
            retention,
        }
    }

    /// クライアントを切断する
    ///
    /// # Returns
    ///
    /// Room が Registry から回収された場合は `true`
    pub async fn execute(&self, room: &Room, client: &Client) -> bool {
        client.exit().await;

        match self.retention {
            RoomRetention::Retain => false,
            RoomRetention::Reclaim => self.registry.reclaim_if_empty(room).await,
        }
    }
}
