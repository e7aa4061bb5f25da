use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{Deserialize, LEN_TYPE_SIZE, LenType};

/// The receiving end of a fitting connection.
pub struct OnoReceiver<R: AsyncRead + Unpin> {
    rx: R,
}

impl<R: AsyncRead + Unpin> OnoReceiver<R> {
    /// Creates a new `OnoReceiver` instance.
    ///
    /// # Arguments
    /// * `rx` - The underlying reader.
    pub(super) fn new(rx: R) -> Self {
        Self { rx }
    }

    /// Waits to receive a new message from the inner receiver.
    ///
    /// The whole frame is consumed before deserializing, so a frame that fails to
    /// deserialize leaves the stream aligned at the next frame boundary.
    ///
    /// # Arguments
    /// * `buf` - The buffer to use for deserialization, the returned
    ///           `T`'s lifetimes will be tied to this buffer.
    ///
    /// # Returns
    /// A result object that returns `T` on success or `io::Error` on failure.
    ///
    /// # Errors
    /// * `io::ErrorKind::UnexpectedEof` if the peer closed the stream between frames.
    /// * `io::ErrorKind::ConnectionAborted` if the peer closed it in the middle of a frame.
    /// * `io::ErrorKind::InvalidData` if the frame can't be deserialized.
    pub async fn recv_into<'buf, T>(&mut self, buf: &'buf mut Vec<u8>) -> io::Result<T>
    where
        T: Deserialize<'buf>,
    {
        let mut size_buf = [0; LEN_TYPE_SIZE];
        let mut read = 0;
        while read < LEN_TYPE_SIZE {
            match self.rx.read(&mut size_buf[read..]).await? {
                0 if read == 0 => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "The peer closed the connection",
                    ));
                }
                0 => return Err(truncated("length header", LEN_TYPE_SIZE)),
                n => read += n,
            }
        }
        let len = LenType::from_be_bytes(size_buf) as usize;

        buf.clear();
        buf.resize(len, 0);
        self.rx.read_exact(buf).await.map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => truncated("frame", len),
            _ => e,
        })?;

        T::deserialize(buf)
    }
}

fn truncated(what: &str, len: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::ConnectionAborted,
        format!("The peer closed the connection in the middle of a {what} of {len} bytes"),
    )
}
