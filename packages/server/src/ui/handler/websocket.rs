//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::WebSocket},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    domain::{Client, RelayError, RoomName, Transport},
    infrastructure::transport::WebSocketTransport,
    ui::state::AppState,
};

use super::handshake::read_nickname;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> RoomName (Domain Model)
    let room_name = match RoomName::try_from(room.clone()) {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!("Invalid room name '{}': {}", room, e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room_name)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_name: RoomName) {
    let transport: Arc<dyn Transport> = Arc::new(WebSocketTransport::new(socket));

    // 1. Handshake: the first frame is the nickname
    let nickname = match read_nickname(transport.as_ref(), state.handshake_timeout).await {
        Ok(nickname) => nickname,
        Err(e) => {
            tracing::warn!("Handshake failed for room '{}': {}", room_name, e);
            transport.close().await;
            return;
        }
    };

    // 2. Join the room (created on first use)
    let client = Client::new(nickname, transport);
    let room = match state
        .connect_client_usecase
        .execute(&room_name, &client)
        .await
    {
        Ok(room) => room,
        Err(e) => {
            tracing::warn!(
                "Rejecting client '{}' for room '{}': {}",
                client.nickname(),
                room_name,
                e
            );
            if let Err(write_err) = client.write(&format!("error: {}", e)).await {
                tracing::debug!("Failed to send rejection to '{}': {}", client.nickname(), write_err);
            }
            client.exit().await;
            return;
        }
    };
    tracing::info!(
        "Client '{}' connected to room '{}'",
        client.nickname(),
        room.name()
    );

    // 3. Relay messages until the connection ends
    match state.relay_messages_usecase.execute(&room, &client).await {
        RelayError::ConnectionError(reason) => {
            tracing::info!("Client '{}' disconnected: {}", client.nickname(), reason);
        }
        other => {
            tracing::warn!(
                "Closing session of '{}' in room '{}': {}",
                client.nickname(),
                room.name(),
                other
            );
        }
    }

    // 4. Leave the room and close the transport
    if state
        .disconnect_client_usecase
        .execute(&room, &client)
        .await
    {
        tracing::info!("Room '{}' is empty and was reclaimed", room.name());
    }
}
