//! TCP connect implementation of the connector capability.
//!
//! Performs standard TCP connect probes using the operating system's
//! socket API. Hostnames are resolved through the OS resolver.

use crate::error::ConnectError;
use crate::scanner::traits::{Connection, Connector};
use crate::types::Port;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Real TCP client.
///
/// Without a timeout, a connect attempt lasts as long as the platform lets
/// it, which can be minutes against hosts that silently drop packets.
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    timeout: Option<Duration>,
}

impl TcpConnector {
    /// Create a connector that relies on the OS connect timeout.
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Bound every connect attempt by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// An open TCP stream returned by [`TcpConnector`].
pub struct TcpConnection {
    stream: TcpStream,
}

#[async_trait]
impl Connection for TcpConnection {
    async fn close(self: Box<Self>) {
        let mut stream = self.stream;
        // Shutdown errors only mean the peer went away first.
        let _ = stream.shutdown().await;
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn dial(&self, host: &str, port: Port) -> Result<Box<dyn Connection>, ConnectError> {
        let connect = TcpStream::connect((host, port.as_u16()));

        let stream = match self.timeout {
            Some(limit) => match timeout(limit, connect).await {
                Ok(result) => result,
                Err(_) => return Err(ConnectError::Timeout),
            },
            None => connect.await,
        }
        .map_err(ConnectError::from_io)?;

        Ok(Box::new(TcpConnection { stream }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_dial_open_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port());

        let connector = TcpConnector::new().with_timeout(Duration::from_secs(2));
        let conn = connector.dial("127.0.0.1", port).await.unwrap();
        conn.close().await;
    }

    #[tokio::test]
    async fn test_dial_closed_port() {
        // Bind then drop to get a port nobody is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port());
        drop(listener);

        let connector = TcpConnector::new().with_timeout(Duration::from_secs(2));
        assert!(connector.dial("127.0.0.1", port).await.is_err());
    }

    #[test]
    fn test_default_has_no_timeout() {
        assert_eq!(TcpConnector::new().timeout(), None);
        let connector = TcpConnector::new().with_timeout(Duration::from_millis(250));
        assert_eq!(connector.timeout(), Some(Duration::from_millis(250)));
    }
}
