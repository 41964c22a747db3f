//! Room エンティティとブロードキャストタスク
//!
//! Room はメンバー一覧と受信キューを持ち、Room ごとに専用のブロードキャストタスクを
//! 1 つ起動します。タスクはキューからメッセージを 1 件ずつ取り出し、
//! その時点のメンバーのスナップショットに対して順番に書き込みます。
//!
//! ## 順序保証
//!
//! 同じ Room に enqueue されたメッセージは、取り出し時点のメンバー全員に
//! enqueue した順で届きます。Room をまたいだ順序は保証しません。
//!
//! ## ロック
//!
//! メンバー一覧のロックはスナップショットを取る間だけ保持し、
//! ネットワークへの書き込み中は保持しません。

use std::{
    collections::HashMap,
    sync::{Arc, Weak},
};

use tokio::sync::{Mutex, mpsc};

use super::{Client, ClientId, Nickname, RelayError, RoomName, Timestamp};

/// Room に投稿されたメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMessage {
    /// 送信者（送信者自身には配信しない）。`None` なら全員に配信する
    pub sender: Option<ClientId>,
    pub text: String,
}

impl RoomMessage {
    pub fn new(sender: Option<ClientId>, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    pub fn from_client(client: &Client, text: impl Into<String>) -> Self {
        Self::new(Some(client.id()), text)
    }
}

/// `join` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// メンバーに追加された
    Joined,
    /// 同じクライアントが既にメンバーだった（何もしない）
    AlreadyMember,
    /// 別のクライアントが同じニックネームで参加している（何もしない）
    NicknameTaken,
}

/// 診断用のメンバー情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub nickname: Nickname,
    pub connected_at: Timestamp,
}

/// 診断用の Room のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub name: RoomName,
    pub created_at: Timestamp,
    /// ニックネーム順
    pub members: Vec<MemberInfo>,
}

#[derive(Default)]
struct Membership {
    clients: HashMap<Nickname, Arc<Client>>,
    /// Registry から回収済み。以降の join は受け付けない
    closed: bool,
}

impl Membership {
    /// `client` 本人のエントリであれば削除する
    fn remove_client(&mut self, client: &Client) -> bool {
        let owned = self
            .clients
            .get(client.nickname())
            .is_some_and(|member| member.id() == client.id());
        if owned {
            self.clients.remove(client.nickname());
        }
        owned
    }

    fn recipients(&self, sender: Option<ClientId>) -> Vec<Arc<Client>> {
        self.clients
            .values()
            .filter(|client| Some(client.id()) != sender)
            .cloned()
            .collect()
    }
}

/// 名前付きのブロードキャストグループ
pub struct Room {
    name: RoomName,
    created_at: Timestamp,
    membership: Arc<Mutex<Membership>>,
    inbound: mpsc::Sender<RoomMessage>,
}

impl Room {
    /// Room を作成し、ブロードキャストタスクを起動する
    ///
    /// Tokio ランタイム上で呼び出す必要があります。
    ///
    /// # Arguments
    ///
    /// * `name` - Room 名
    /// * `queue_capacity` - 受信キューの容量（0 は 1 として扱う）
    pub fn new(name: RoomName, queue_capacity: usize) -> Arc<Self> {
        let (inbound, receiver) = mpsc::channel(queue_capacity.max(1));
        let membership = Arc::new(Mutex::new(Membership::default()));

        tokio::spawn(broadcast_loop(name.clone(), membership.clone(), receiver));

        Arc::new(Self {
            name,
            created_at: Timestamp::now(),
            membership,
            inbound,
        })
    }

    pub fn name(&self) -> &RoomName {
        &self.name
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// クライアントを Room に参加させる
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 参加結果（重複参加はエラーではなく何もしない）
    /// * `Err(RelayError::InvalidArgument)` - 終了処理中、または別の Room に参加中のクライアント
    /// * `Err(RelayError::RoomClosed)` - Registry から回収済みの Room
    pub async fn join(self: &Arc<Self>, client: &Arc<Client>) -> Result<JoinOutcome, RelayError> {
        let mut membership = self.membership.lock().await;
        if membership.closed {
            return Err(RelayError::RoomClosed(self.name.to_string()));
        }

        let outcome = match membership.clients.get(client.nickname()) {
            Some(member) if member.id() == client.id() => {
                client.attach(self).await?;
                JoinOutcome::AlreadyMember
            }
            Some(_) => {
                client.check_joinable(self).await?;
                JoinOutcome::NicknameTaken
            }
            None => {
                client.attach(self).await?;
                membership
                    .clients
                    .insert(client.nickname().clone(), client.clone());
                JoinOutcome::Joined
            }
        };

        match outcome {
            JoinOutcome::Joined => tracing::info!(
                "Client '{}' joined room '{}' ({} members)",
                client.nickname(),
                self.name,
                membership.clients.len()
            ),
            JoinOutcome::AlreadyMember => tracing::debug!(
                "Client '{}' is already a member of room '{}'",
                client.nickname(),
                self.name
            ),
            JoinOutcome::NicknameTaken => tracing::warn!(
                "Nickname '{}' is already taken in room '{}'",
                client.nickname(),
                self.name
            ),
        }

        Ok(outcome)
    }

    /// クライアントを Room から退出させる
    ///
    /// メンバーでなければ何もしない。削除した場合は `true` を返す。
    pub async fn leave(&self, client: &Client) -> bool {
        let removed = self.membership.lock().await.remove_client(client);
        if removed {
            client.detach(self).await;
            tracing::info!("Client '{}' left room '{}'", client.nickname(), self.name);
        }
        removed
    }

    /// メッセージを受信キューに追加する
    ///
    /// キューが満杯の間は待機します（バックプレッシャー）。
    pub async fn enqueue(&self, message: RoomMessage) -> Result<(), RelayError> {
        self.inbound
            .send(message)
            .await
            .map_err(|_| RelayError::RoomClosed(self.name.to_string()))
    }

    pub async fn contains(&self, nickname: &Nickname) -> bool {
        self.membership.lock().await.clients.contains_key(nickname)
    }

    pub async fn member_count(&self) -> usize {
        self.membership.lock().await.clients.len()
    }

    /// メンバー一覧（ニックネーム順）
    pub async fn members(&self) -> Vec<MemberInfo> {
        let mut members: Vec<MemberInfo> = self
            .membership
            .lock()
            .await
            .clients
            .values()
            .map(|client| MemberInfo {
                nickname: client.nickname().clone(),
                connected_at: client.connected_at(),
            })
            .collect();
        members.sort_by(|a, b| a.nickname.cmp(&b.nickname));
        members
    }

    pub async fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            name: self.name.clone(),
            created_at: self.created_at,
            members: self.members().await,
        }
    }

    /// メンバーがいなければ Room を閉じる
    ///
    /// Registry のロックを保持した状態で呼ぶこと。閉じた後の join は `RoomClosed` になる。
    pub(crate) async fn close_if_empty(&self) -> bool {
        let mut membership = self.membership.lock().await;
        if membership.clients.is_empty() {
            membership.closed = true;
        }
        membership.closed
    }
}

/// `weak` が `room` を指しているか
pub(super) fn points_to(weak: &Weak<Room>, room: &Room) -> bool {
    std::ptr::eq(weak.as_ptr(), room)
}

/// Room ごとのブロードキャストループ
///
/// Room が破棄され、キューが空になるまで動き続ける。
async fn broadcast_loop(
    room_name: RoomName,
    membership: Arc<Mutex<Membership>>,
    mut inbound: mpsc::Receiver<RoomMessage>,
) {
    tracing::debug!("Broadcast task for room '{}' started", room_name);

    while let Some(message) = inbound.recv().await {
        let recipients = membership.lock().await.recipients(message.sender);
        tracing::debug!(
            "Broadcasting message to {} member(s) of room '{}'",
            recipients.len(),
            room_name
        );

        for client in recipients {
            if let Err(e) = client.write(&message.text).await {
                tracing::warn!(
                    "Failed to deliver message to '{}' in room '{}': {}. Removing member.",
                    client.nickname(),
                    room_name,
                    e
                );
                membership.lock().await.remove_client(&client);
                client.exit().await;
            }
        }
    }

    tracing::debug!("Broadcast task for room '{}' stopped", room_name);
}
