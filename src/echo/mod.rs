//! Single-shot echo listener.
//!
//! Binds one TCP socket, accepts exactly one connection and echoes the
//! first chunk it receives:
//! - Client sends: up to `chunk_size` bytes of anything
//! - Server echoes: the same bytes, then closes the connection
//!
//! ## Lifecycle
//!
//! ```text
//! bind -> accept -> read (<= chunk_size) -> write -> close
//!                        \-> 0 bytes (peer closed) -> close
//! ```
//!
//! The listening socket is released as soon as the connection is accepted,
//! so a second client is refused rather than queued. There is no framing and
//! no second round: whatever the first read returns is the whole exchange.

pub mod handler;
pub mod listener;

pub use listener::EchoListener;

use crate::config::EchoSettings;
use std::io;
use tracing::info;

/// Run the echo exercise to completion on a current-thread runtime.
pub fn run(settings: &EchoSettings) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()?;

    runtime.block_on(async {
        let listener = EchoListener::bind(settings.listen, settings.chunk_size)?;
        info!(address = %listener.local_addr()?, "Listening");
        let report = listener.serve_once().await?;

        match report.echoed {
            Some(ref data) => info!(peer = %report.peer, bytes = data.len(), "Session finished"),
            None => info!(peer = %report.peer, "Session finished without data"),
        }
        Ok::<_, io::Error>(())
    })
}
