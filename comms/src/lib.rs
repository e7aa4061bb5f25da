//! Framing and messages spoken between fitting clients and the worker.
//!
//! Each frame is a big-endian `u64` body length followed by the body, see `msg::Msg`
//! for what a body holds.

mod deserialize;
pub mod msg;
mod receiver;
mod sender;
mod serialize;
pub mod specs;

use tokio::io::{AsyncRead, AsyncWrite};

pub use deserialize::Deserialize;
pub use receiver::OnoReceiver;
pub use sender::OnoSender;
pub use serialize::Serialize;

type LenType = u64;
const LEN_TYPE_SIZE: usize = size_of::<LenType>();

/// Wraps the two halves of a connection into a framed receiver and sender.
///
/// # Arguments
/// * `rx` - The reading half, usually a socket's.
/// * `tx` - The writing half.
pub fn channel<R, W>(rx: R, tx: W) -> (OnoReceiver<R>, OnoSender<W>)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    (OnoReceiver::new(rx), OnoSender::new(tx))
}
