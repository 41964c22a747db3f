//! UseCase: メッセージ中継処理（読み込みループ）
//!
//! クライアントから受信したテキストを、参加中の Room のキューに積み続けます。
//! 配信は Room のブロードキャストタスクが行います。

use crate::domain::{Client, RelayError, Room, RoomMessage};

/// メッセージ中継のユースケース
#[derive(Default)]
pub struct RelayMessagesUseCase;

impl RelayMessagesUseCase {
    pub fn new() -> Self {
        Self
    }

    /// 読み込みに失敗するまでメッセージを中継する
    ///
    /// # Returns
    ///
    /// ループを終了させたエラー（切断、プロトコル違反、Room の終了）
    pub async fn execute(&self, room: &Room, client: &Client) -> RelayError {
        loop {
            let text = match client.read().await {
                Ok(text) => text,
                Err(e) => return e,
            };
            tracing::debug!(
                "Received message from '{}' in room '{}' ({} bytes)",
                client.nickname(),
                room.name(),
                text.len()
            );

            if let Err(e) = room.enqueue(RoomMessage::from_client(client, text)).await {
                return e;
            }
        }
    }
}
