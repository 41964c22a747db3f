//! Transport trait 定義
//!
//! クライアントとの双方向テキスト通信路の抽象化です。
//! ドメイン層はこの trait にのみ依存し、WebSocket などの具体的な実装は
//! Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use thiserror::Error;

/// Transport から読み出したフレーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

/// Transport レベルのエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// 相手側、もしくは自分自身が接続を閉じた
    #[error("connection closed")]
    Closed,

    /// 送受信の失敗
    #[error("transport failure: {0}")]
    Io(String),
}

/// 双方向テキスト通信路
///
/// `read_message` と `write_message` は別々のタスクから同時に呼ばれます。
/// 実装は読み込み待ちの間も書き込みを受け付けなければなりません。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// 次のフレームが届くまで待つ
    async fn read_message(&self) -> Result<Frame, TransportError>;

    /// テキストメッセージを 1 件送る
    async fn write_message(&self, text: &str) -> Result<(), TransportError>;

    /// 通信路を閉じる
    async fn close(&self);
}
