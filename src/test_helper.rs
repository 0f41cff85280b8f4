use std::io;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

pub struct SimpleTcpListener {
    listener: TcpListener,
}

impl SimpleTcpListener {
    pub async fn bind() -> SimpleTcpListener {
        SimpleTcpListener {
            listener: TcpListener::bind("127.0.0.1:0").await.unwrap(),
        }
    }

    pub fn port(&self) -> u16 {
        self.listener.local_addr().unwrap().port()
    }

    /// Accepts one connection and returns everything the peer wrote before
    /// closing it.
    pub async fn capture(&self) -> io::Result<Vec<u8>> {
        let (mut socket, _addr) = self.listener.accept().await?;
        let mut buf = Vec::new();
        socket.read_to_end(&mut buf).await?;
        Ok(buf)
    }
}
