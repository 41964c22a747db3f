//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - Room の取得・作成とクライアントの参加
//!
//! ### なぜこのテストが必要か
//! - 同じ Room 名に接続したクライアント同士が同じ Room に入ることを保証
//! - ニックネームが重複した接続を既存メンバーに影響させずに拒否する
//! - 回収済みの Room に参加してしまう競合を防ぐ
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しい Room への接続、既存の Room への接続
//! - 異常系：ニックネームの重複
//! - エッジケース：回収と同時に接続した場合の再試行

use std::sync::Arc;

use crate::domain::{Client, JoinOutcome, RelayError, Room, RoomName, RoomRegistry};

use super::error::ConnectError;

/// 回収済みの Room に当たったときの最大試行回数
const MAX_JOIN_ATTEMPTS: usize = 3;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Registry（Room ディレクトリの抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// クライアントを Room に参加させる
    ///
    /// # Arguments
    ///
    /// * `room_name` - 参加する Room 名（存在しなければ作成される）
    /// * `client` - ハンドシェイク済みのクライアント
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<Room>)` - 参加した Room
    /// * `Err(ConnectError)` - 参加失敗（クライアントの状態は変更されない）
    pub async fn execute(
        &self,
        room_name: &RoomName,
        client: &Arc<Client>,
    ) -> Result<Arc<Room>, ConnectError> {
        let mut attempt = 1;
        loop {
            let room = self.registry.find_or_create(room_name).await;
            match room.join(client).await {
                Ok(JoinOutcome::Joined | JoinOutcome::AlreadyMember) => return Ok(room),
                Ok(JoinOutcome::NicknameTaken) => {
                    return Err(ConnectError::NicknameTaken {
                        nickname: client.nickname().to_string(),
                        room: room_name.to_string(),
                    });
                }
                Err(RelayError::RoomClosed(_)) if attempt < MAX_JOIN_ATTEMPTS => {
                    // 回収と競合した。Registry から新しい Room を取り直す
                    tracing::debug!(
                        "Room '{}' was reclaimed while '{}' was joining, retrying",
                        room_name,
                        client.nickname()
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
