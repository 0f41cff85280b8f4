use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Bound on the whole connect-and-write transaction. An unreachable host
/// must produce a failure, never an indefinitely blocked caller.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum SendError {
    #[error("Command is not ASCII: {0:?}")]
    Encoding(String),
    #[error("Connection to {0} failed: {1}")]
    Connection(String, std::io::Error),
    #[error("Send to {0} timed out after {1:?}")]
    Timeout(String, Duration),
    #[error("Write to {0} failed: {1}")]
    Write(String, std::io::Error),
}

/// Delivers one command line per connection: connect, write, close. Holds no
/// connection state, so a single instance serves every switch.
#[derive(Debug, Clone, Copy)]
pub struct CommandSender {
    timeout: Duration,
}

impl Default for CommandSender {
    fn default() -> Self {
        CommandSender {
            timeout: DEFAULT_SEND_TIMEOUT,
        }
    }
}

impl CommandSender {
    pub fn new(timeout: Duration) -> Self {
        CommandSender { timeout }
    }

    /// Opens a TCP session to `host:port`, writes `command` followed by a
    /// single CR+LF and closes the session. The protocol is write-only; no
    /// response is read. The socket is released on every exit path,
    /// including timeout and error.
    pub async fn send(&self, host: &str, port: u16, command: &str) -> Result<(), SendError> {
        if !command.is_ascii() {
            return Err(SendError::Encoding(command.to_string()));
        }
        let addr = format!("{host}:{port}");
        let mut stream = timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| SendError::Timeout(addr.clone(), self.timeout))?
            .map_err(|e| SendError::Connection(addr.clone(), e))?;

        let mut payload = Vec::with_capacity(command.len() + 2);
        payload.extend_from_slice(command.as_bytes());
        payload.extend_from_slice(b"\r\n");
        timeout(self.timeout, async {
            stream.write_all(&payload).await?;
            stream.shutdown().await
        })
        .await
        .map_err(|_| SendError::Timeout(addr.clone(), self.timeout))?
        .map_err(|e| SendError::Write(addr.clone(), e))?;

        debug!("Sent {} bytes to {}", payload.len(), addr);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helper::SimpleTcpListener;
    use std::time::Instant;

    #[tokio::test]
    async fn sends_the_command_with_a_single_crlf_terminator() {
        let listener = SimpleTcpListener::bind().await;
        let port = listener.port();
        let server = tokio::spawn(async move { listener.capture().await.unwrap() });

        let sender = CommandSender::default();
        sender.send("127.0.0.1", port, "CMD2").await.unwrap();

        assert_eq!(server.await.unwrap(), b"CMD2\r\n");
    }

    #[tokio::test]
    async fn rejects_non_ascii_commands_before_connecting() {
        let sender = CommandSender::default();
        let err = sender.send("127.0.0.1", 1, "CMDé").await.unwrap_err();
        assert!(matches!(err, SendError::Encoding(_)));
    }

    #[tokio::test]
    async fn reports_a_refused_connection() {
        let listener = SimpleTcpListener::bind().await;
        let port = listener.port();
        drop(listener);

        let sender = CommandSender::default();
        let err = sender.send("127.0.0.1", port, "CMD1").await.unwrap_err();
        assert!(matches!(err, SendError::Connection(..)));
    }

    #[tokio::test]
    async fn gives_up_within_the_configured_timeout() {
        // TEST-NET-1 never answers; depending on routing the connect either
        // times out or is rejected outright, but it must not block past the
        // bound.
        let sender = CommandSender::new(Duration::from_millis(250));
        let start = Instant::now();
        let result = sender.send("192.0.2.1", 50505, "CMD1").await;

        assert!(result.is_err());
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn timeout_errors_name_the_endpoint() {
        let err = SendError::Timeout("10.0.0.5:50505".to_string(), Duration::from_millis(250));
        assert!(err.to_string().contains("10.0.0.5:50505"));
    }
}
