//! Nickname handshake.
//!
//! The first frame a client sends after the upgrade is its nickname.

use std::time::Duration;

use crate::domain::{Frame, Nickname, RelayError, Transport};

/// Read the nickname frame
///
/// # Errors
///
/// * `RelayError::ProtocolError` - timeout, or a non-text frame
/// * `RelayError::ConnectionError` - the transport failed or closed
/// * `RelayError::InvalidArgument` - the nickname failed validation
pub async fn read_nickname(
    transport: &dyn Transport,
    timeout: Duration,
) -> Result<Nickname, RelayError> {
    let frame = tokio::time::timeout(timeout, transport.read_message())
        .await
        .map_err(|_| {
            RelayError::ProtocolError(format!("no nickname received within {:?}", timeout))
        })?
        .map_err(|e| RelayError::ConnectionError(e.to_string()))?;

    match frame {
        Frame::Text(text) => {
            Nickname::new(text).map_err(|e| RelayError::InvalidArgument(e.to_string()))
        }
        Frame::Binary(_) => Err(RelayError::ProtocolError(
            "nickname must be sent as a text frame".to_string(),
        )),
    }
}
