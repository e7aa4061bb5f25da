use std::io;

use comms::{
    OnoReceiver, OnoSender,
    msg::Msg,
    specs::fit::{FitRequest, FitResponse},
};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::{
        TcpStream, ToSocketAddrs,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};

use crate::error::{Result, WorkerErr};

/// Requesting side of the fitting protocol.
///
/// Contract:
/// - send a request as `Msg::Request`
/// - receive either `Msg::Response` with the same request id or `Msg::Err`
pub struct FitClient<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    rx: OnoReceiver<R>,
    tx: OnoSender<W>,
    rx_buf: Vec<u8>,
}

impl FitClient<OwnedReadHalf, OwnedWriteHalf> {
    /// Connects to a worker listening at `addr`.
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let (rx, tx) = stream.into_split();
        let (rx, tx) = comms::channel(rx, tx);
        Ok(Self::new(rx, tx))
    }
}

impl<R, W> FitClient<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(rx: OnoReceiver<R>, tx: OnoSender<W>) -> Self {
        Self {
            rx,
            tx,
            rx_buf: Vec::new(),
        }
    }

    /// Sends `request` and waits for its answer.
    ///
    /// # Errors
    /// `WorkerErr::Remote` if the worker answered with an error, `WorkerErr::UnexpectedMessage`
    /// if it answered something else than the response to this request and `WorkerErr::Io`
    /// on transport failures.
    pub async fn fit(&mut self, request: FitRequest) -> Result<FitResponse> {
        let request_id = request.request_id.clone();
        self.tx.send(&Msg::Request(request)).await?;

        match self.rx.recv_into(&mut self.rx_buf).await? {
            Msg::Response(res) if res.request_id == request_id => Ok(res),
            Msg::Response(_) => Err(WorkerErr::UnexpectedMessage {
                got: "response to another request",
            }),
            Msg::Err(detail) => Err(WorkerErr::Remote(detail.into_owned())),
            other => Err(WorkerErr::UnexpectedMessage { got: other.kind() }),
        }
    }

    /// Closes the sending half, letting the worker know no more requests will come.
    pub async fn close(mut self) -> io::Result<()> {
        self.tx.shutdown().await
    }
}
