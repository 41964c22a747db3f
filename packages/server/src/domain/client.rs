//! Client エンティティ
//!
//! 接続中の参加者 1 人分のセッションです。Transport、ニックネーム、
//! 現在参加している Room への弱参照を保持します。
//!
//! ## 状態遷移
//!
//! ```text
//! Connecting --join--> Active --read error / exit--> Closing --leave + close--> Closed
//! ```
//!
//! `Closed` から他の状態に戻ることはありません。

use std::sync::{Arc, Weak};

use tokio::sync::Mutex;

use super::{
    ClientId, Frame, Nickname, RelayError, Timestamp, Transport,
    room::{Room, points_to},
};

/// クライアントのライフサイクル状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Connecting,
    Active,
    Closing,
    Closed,
}

/// 状態と Room への参照は必ず同じロックの下で更新する
struct Binding {
    state: ClientState,
    room: Option<Weak<Room>>,
}

/// 接続中の参加者
pub struct Client {
    id: ClientId,
    nickname: Nickname,
    connected_at: Timestamp,
    transport: Arc<dyn Transport>,
    binding: Mutex<Binding>,
}

impl Client {
    /// ハンドシェイク完了後のクライアントを作成（状態は `Connecting`）
    pub fn new(nickname: Nickname, transport: Arc<dyn Transport>) -> Arc<Self> {
        Arc::new(Self {
            id: ClientId::generate(),
            nickname,
            connected_at: Timestamp::now(),
            transport,
            binding: Mutex::new(Binding {
                state: ClientState::Connecting,
                room: None,
            }),
        })
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn nickname(&self) -> &Nickname {
        &self.nickname
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    pub async fn state(&self) -> ClientState {
        self.binding.lock().await.state
    }

    /// 現在参加している Room（参加していない、もしくは Room が破棄済みなら `None`）
    pub async fn room(&self) -> Option<Arc<Room>> {
        self.binding
            .lock()
            .await
            .room
            .as_ref()
            .and_then(Weak::upgrade)
    }

    /// 次のテキストメッセージを受信する
    ///
    /// 終了処理を始めたクライアントのフレームは、読み込み待ちの間に届いたものも含めて返さない。
    ///
    /// # Errors
    ///
    /// * `RelayError::ConnectionError` - Transport の読み込み失敗、切断、終了済みのクライアント
    /// * `RelayError::ProtocolError` - テキスト以外のフレームを受信
    pub async fn read(&self) -> Result<String, RelayError> {
        self.ensure_open().await?;
        let frame = self.transport.read_message().await;
        self.ensure_open().await?;

        match frame {
            Ok(Frame::Text(text)) => Ok(text),
            Ok(Frame::Binary(bytes)) => Err(RelayError::ProtocolError(format!(
                "unexpected binary frame ({} bytes) from '{}'",
                bytes.len(),
                self.nickname
            ))),
            Err(e) => Err(RelayError::ConnectionError(e.to_string())),
        }
    }

    /// テキストメッセージを送信する
    pub async fn write(&self, message: &str) -> Result<(), RelayError> {
        if self.state().await == ClientState::Closed {
            return Err(RelayError::ConnectionError(format!(
                "client '{}' is closed",
                self.nickname
            )));
        }
        self.transport
            .write_message(message)
            .await
            .map_err(|e| RelayError::ConnectionError(e.to_string()))
    }

    /// Room から退出し、Transport を閉じる
    ///
    /// 何度呼んでも安全です。Transport を閉じるのは最初の呼び出しだけです。
    pub async fn exit(&self) {
        let room = {
            let mut binding = self.binding.lock().await;
            if matches!(binding.state, ClientState::Closing | ClientState::Closed) {
                return;
            }
            binding.state = ClientState::Closing;
            binding.room.take()
        };

        if let Some(room) = room.as_ref().and_then(Weak::upgrade) {
            room.leave(self).await;
        }
        self.transport.close().await;

        self.binding.lock().await.state = ClientState::Closed;
        tracing::debug!("Client '{}' ({}) closed", self.nickname, self.id);
    }

    async fn ensure_open(&self) -> Result<(), RelayError> {
        match self.state().await {
            ClientState::Closing | ClientState::Closed => Err(RelayError::ConnectionError(
                format!("client '{}' is closing or closed", self.nickname),
            )),
            ClientState::Connecting | ClientState::Active => Ok(()),
        }
    }

    /// `room` に参加可能であることを確認する
    ///
    /// 終了処理中のクライアントや、別の Room に参加中のクライアントは参加できない。
    pub(super) async fn check_joinable(&self, room: &Room) -> Result<(), RelayError> {
        let binding = self.binding.lock().await;
        Self::check_binding(&binding, &self.nickname, room)
    }

    /// `room` を現在の Room として記録し、`Active` に遷移する
    pub(super) async fn attach(&self, room: &Arc<Room>) -> Result<(), RelayError> {
        let mut binding = self.binding.lock().await;
        Self::check_binding(&binding, &self.nickname, room)?;
        binding.room = Some(Arc::downgrade(room));
        binding.state = ClientState::Active;
        Ok(())
    }

    /// 現在の Room が `room` であれば参照を外す
    pub(super) async fn detach(&self, room: &Room) {
        let mut binding = self.binding.lock().await;
        if binding.room.as_ref().is_some_and(|r| points_to(r, room)) {
            binding.room = None;
        }
    }

    fn check_binding(binding: &Binding, nickname: &Nickname, room: &Room) -> Result<(), RelayError> {
        if matches!(binding.state, ClientState::Closing | ClientState::Closed) {
            return Err(RelayError::InvalidArgument(format!(
                "client '{}' is closing or closed",
                nickname
            )));
        }
        let bound_elsewhere = binding
            .room
            .as_ref()
            .is_some_and(|r| r.strong_count() > 0 && !points_to(r, room));
        if bound_elsewhere {
            return Err(RelayError::InvalidArgument(format!(
                "client '{}' is already a member of another room",
                nickname
            )));
        }
        Ok(())
    }
}
