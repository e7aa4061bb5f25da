use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::{LEN_TYPE_SIZE, LenType, Serialize};

/// The writing end of a fitting connection.
///
/// Every `send` writes exactly one frame and flushes it.
pub struct OnoSender<W>
where
    W: AsyncWrite + Unpin,
{
    tx: W,
    buf: Vec<u8>,
}

impl<W: AsyncWrite + Unpin> OnoSender<W> {
    pub(super) fn new(tx: W) -> Self {
        Self {
            tx,
            buf: Vec::new(),
        }
    }

    /// Frames `msg` behind its big-endian length and writes it out.
    ///
    /// The length is only known once `msg` is serialized, so room for it is reserved at
    /// the front of the scratch buffer and filled in afterwards. A tail borrowed from
    /// `msg`, like an error's text, is written as is without copying it.
    ///
    /// # Errors
    /// Any `io::Error` from serializing `msg` or from the underlying writer.
    pub async fn send<'a, T: Serialize<'a>>(&mut self, msg: &'a T) -> io::Result<()> {
        let Self { buf, tx } = self;

        buf.clear();
        buf.resize(LEN_TYPE_SIZE, 0);

        let tail = msg.serialize(buf)?;
        let body_len = buf.len() - LEN_TYPE_SIZE + tail.map_or(0, <[u8]>::len);
        buf[..LEN_TYPE_SIZE].copy_from_slice(&(body_len as LenType).to_be_bytes());

        tx.write_all(buf).await?;
        if let Some(tail) = tail {
            tx.write_all(tail).await?;
        }

        tx.flush().await
    }

    /// Closes the writing half, the peer's next receive reports a clean disconnect.
    pub async fn shutdown(&mut self) -> io::Result<()> {
        self.tx.shutdown().await
    }
}
