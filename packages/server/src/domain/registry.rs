//! RoomRegistry trait 定義
//!
//! Room 名から Room を引くプロセス全体のディレクトリです。
//! 呼び出し側が内部のコレクションを直接触ることはありません。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;

use super::{RelayError, Room, RoomName};

/// Room Registry trait
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Room を取得し、存在しなければ作成する
    ///
    /// 同じ名前で同時に呼ばれても作成される Room は 1 つだけで、
    /// 全ての呼び出し元が同じインスタンスを受け取る。
    async fn find_or_create(&self, name: &RoomName) -> Arc<Room>;

    /// Room を取得する（作成はしない）
    ///
    /// 存在しなければ `RelayError::NotFound`
    async fn lookup(&self, name: &RoomName) -> Result<Arc<Room>, RelayError>;

    /// 全ての Room のスナップショット（名前順）
    async fn rooms(&self) -> Vec<Arc<Room>>;

    /// `room` が登録中のインスタンスで、メンバーがいなければ Registry から取り除く
    ///
    /// 同じ名前で作り直された別の Room は取り除かない。取り除いた場合は `true`
    async fn reclaim_if_empty(&self, room: &Room) -> bool;
}
