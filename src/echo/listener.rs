//! TCP listener that serves exactly one connection.

use bytes::Bytes;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use super::handler::echo_once;

/// Outcome of one echo session
#[derive(Debug)]
pub struct SessionReport {
    /// Address of the client that connected
    pub peer: SocketAddr,
    /// Bytes echoed back, `None` if the peer sent nothing
    pub echoed: Option<Bytes>,
}

/// A bound listener waiting for its single client.
pub struct EchoListener {
    listener: TcpListener,
    chunk_size: usize,
}

impl EchoListener {
    /// Bind the listening socket. Must be called from within a tokio runtime.
    pub fn bind(addr: SocketAddr, chunk_size: usize) -> io::Result<Self> {
        let std_listener = create_listener(addr)?;
        let listener = TcpListener::from_std(std_listener)?;

        Ok(Self {
            listener,
            chunk_size,
        })
    }

    /// The address actually bound (useful when binding port 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept one client, echo its first message and close everything.
    pub async fn serve_once(self) -> io::Result<SessionReport> {
        let Self {
            listener,
            chunk_size,
        } = self;

        let (mut stream, peer) = listener.accept().await?;
        // One client only: stop listening before talking to it.
        drop(listener);
        info!(peer = %peer, "Connection accepted");

        let echoed = echo_once(&mut stream, chunk_size).await?;
        info!(peer = %peer, "Connection closed");

        Ok(SessionReport { peer, echoed })
    }
}

/// Create a non-blocking TCP listener with a backlog of one.
fn create_listener(addr: SocketAddr) -> io::Result<std::net::TcpListener> {
    let socket = socket2::Socket::new(
        match addr {
            SocketAddr::V4(_) => socket2::Domain::IPV4,
            SocketAddr::V6(_) => socket2::Domain::IPV6,
        },
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1)?;

    Ok(socket.into())
}
