//! WebSocket を使った Transport 実装
//!
//! ## 責務
//!
//! - axum の `WebSocket` を送信側（sink）と受信側（stream）に分割して保持
//! - フレームの種類をドメインの `Frame` に変換
//!
//! ## 設計ノート
//!
//! sink と stream は別々のロックで保護します。
//! 読み込み待ちのタスクがいても、ブロードキャストタスクは書き込みできます。

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::Mutex;

use crate::domain::{Frame, Transport, TransportError};

/// WebSocket を使った Transport 実装
pub struct WebSocketTransport {
    sink: Mutex<SplitSink<WebSocket, Message>>,
    stream: Mutex<SplitStream<WebSocket>>,
}

impl WebSocketTransport {
    pub fn new(socket: WebSocket) -> Self {
        let (sink, stream) = socket.split();
        Self {
            sink: Mutex::new(sink),
            stream: Mutex::new(stream),
        }
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn read_message(&self) -> Result<Frame, TransportError> {
        let mut stream = self.stream.lock().await;
        loop {
            let msg = match stream.next().await {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => return Err(TransportError::Io(e.to_string())),
                None => return Err(TransportError::Closed),
            };

            match msg {
                Message::Text(text) => return Ok(Frame::Text(text.as_str().to_owned())),
                Message::Binary(bytes) => return Ok(Frame::Binary(bytes.to_vec())),
                Message::Ping(_) | Message::Pong(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::trace!("Received ping/pong");
                }
                Message::Close(_) => return Err(TransportError::Closed),
            }
        }
    }

    async fn write_message(&self, text: &str) -> Result<(), TransportError> {
        self.sink
            .lock()
            .await
            .send(Message::Text(text.to_owned().into()))
            .await
            .map_err(|e| TransportError::Io(e.to_string()))
    }

    async fn close(&self) {
        if let Err(e) = self.sink.lock().await.close().await {
            tracing::debug!("WebSocket close failed: {}", e);
        }
    }
}
