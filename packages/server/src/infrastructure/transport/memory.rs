//! チャンネルを使ったインメモリ Transport 実装
//!
//! ネットワークを使わずに Client / Room を動かすためのテストダブルです。
//! `InMemoryTransport::pair()` は Transport 本体と、相手側を操作する
//! `TransportPeer` を返します。
//!
//! ```ignore
//! let (transport, mut peer) = InMemoryTransport::pair();
//! let client = Client::new(nickname, transport);
//!
//! peer.send_text("hello");            // client.read() が "hello" を返す
//! let written = peer.recv().await;    // client.write() された内容
//! peer.fail_writes();                 // 以降の write を失敗させる
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc, watch};

use crate::domain::{Frame, Transport, TransportError};

/// インメモリ Transport
pub struct InMemoryTransport {
    inbound: Mutex<mpsc::UnboundedReceiver<Frame>>,
    outbound: mpsc::UnboundedSender<String>,
    closed: watch::Sender<bool>,
    fail_writes: AtomicBool,
    close_count: AtomicUsize,
}

/// InMemoryTransport の相手側
pub struct TransportPeer {
    to_client: Option<mpsc::UnboundedSender<Frame>>,
    from_client: mpsc::UnboundedReceiver<String>,
    transport: Arc<InMemoryTransport>,
}

impl InMemoryTransport {
    /// Transport と、その相手側のペアを作成
    pub fn pair() -> (Arc<Self>, TransportPeer) {
        let (to_client, inbound) = mpsc::unbounded_channel();
        let (outbound, from_client) = mpsc::unbounded_channel();
        let (closed, _) = watch::channel(false);

        let transport = Arc::new(Self {
            inbound: Mutex::new(inbound),
            outbound,
            closed,
            fail_writes: AtomicBool::new(false),
            close_count: AtomicUsize::new(0),
        });
        let peer = TransportPeer {
            to_client: Some(to_client),
            from_client,
            transport: transport.clone(),
        };
        (transport, peer)
    }

    fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn read_message(&self) -> Result<Frame, TransportError> {
        let mut closed = self.closed.subscribe();
        if *closed.borrow_and_update() {
            return Err(TransportError::Closed);
        }

        let mut inbound = self.inbound.lock().await;
        tokio::select! {
            frame = inbound.recv() => frame.ok_or(TransportError::Closed),
            // false -> true の一度しか変化しない
            _ = closed.changed() => Err(TransportError::Closed),
        }
    }

    async fn write_message(&self, text: &str) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TransportError::Io("simulated write failure".to_string()));
        }
        self.outbound
            .send(text.to_string())
            .map_err(|_| TransportError::Closed)
    }

    async fn close(&self) {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        self.closed.send_replace(true);
    }
}

impl TransportPeer {
    /// クライアントにテキストフレームを送る
    pub fn send_text(&self, text: impl Into<String>) {
        self.send(Frame::Text(text.into()));
    }

    /// クライアントにバイナリフレームを送る
    pub fn send_binary(&self, bytes: Vec<u8>) {
        self.send(Frame::Binary(bytes));
    }

    fn send(&self, frame: Frame) {
        if let Some(sender) = &self.to_client {
            // 受信側が先に破棄されている場合は捨てる
            let _ = sender.send(frame);
        }
    }

    /// 相手側から接続を切る（以降の read は `Closed`）
    pub fn hang_up(&mut self) {
        self.to_client = None;
    }

    /// クライアントに書き込まれた次のメッセージを待つ
    pub async fn recv(&mut self) -> Option<String> {
        self.from_client.recv().await
    }

    /// 既に書き込まれたメッセージがあれば取り出す
    pub fn try_recv(&mut self) -> Option<String> {
        self.from_client.try_recv().ok()
    }

    /// 以降の書き込みを失敗させる
    pub fn fail_writes(&self) {
        self.transport.fail_writes.store(true, Ordering::SeqCst);
    }

    /// `close()` が呼ばれた回数
    pub fn close_count(&self) -> usize {
        self.transport.close_count.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_frames_flow_both_ways() {
        // テスト項目: 相手側から送ったフレームが読め、書き込んだ内容が相手側に届く
        // given (前提条件):
        let (transport, mut peer) = InMemoryTransport::pair();

        // when (操作):
        peer.send_text("hello");
        peer.send_binary(vec![1, 2, 3]);
        transport.write_message("world").await.unwrap();

        // then (期待する結果):
        assert_eq!(
            transport.read_message().await,
            Ok(Frame::Text("hello".to_string()))
        );
        assert_eq!(
            transport.read_message().await,
            Ok(Frame::Binary(vec![1, 2, 3]))
        );
        assert_eq!(peer.recv().await, Some("world".to_string()));
    }

    #[tokio::test]
    async fn test_close_wakes_pending_read() {
        // テスト項目: 読み込み待ちの間に close されると read は Closed を返す
        // given (前提条件):
        let (transport, peer) = InMemoryTransport::pair();
        let reader = {
            let transport = transport.clone();
            tokio::spawn(async move { transport.read_message().await })
        };
        tokio::task::yield_now().await;

        // when (操作):
        transport.close().await;

        // then (期待する結果):
        assert_eq!(reader.await.unwrap(), Err(TransportError::Closed));
        assert_eq!(peer.close_count(), 1);
        assert!(peer.is_closed());
        assert_eq!(
            transport.write_message("late").await,
            Err(TransportError::Closed)
        );
    }

    #[tokio::test]
    async fn test_hang_up_ends_reads() {
        // テスト項目: 相手側が切断すると read は Closed を返す
        // given (前提条件):
        let (transport, mut peer) = InMemoryTransport::pair();

        // when (操作):
        peer.hang_up();

        // then (期待する結果):
        assert_eq!(transport.read_message().await, Err(TransportError::Closed));
    }

    #[tokio::test]
    async fn test_fail_writes() {
        // テスト項目: fail_writes の後の書き込みは Io エラーになる
        // given (前提条件):
        let (transport, peer) = InMemoryTransport::pair();

        // when (操作):
        peer.fail_writes();

        // then (期待する結果):
        assert!(matches!(
            transport.write_message("x").await,
            Err(TransportError::Io(_))
        ));
    }
}
