use std::io;

use comms::{
    OnoReceiver, OnoSender,
    msg::Msg,
    specs::fit::{FitRequest, FitResponse},
};
use log::{debug, info, warn};
use machine_learning::fit_temperature_model;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::{Result, WorkerErr};

/// Serves fitting requests over a single connection.
///
/// Strict request/reply: a frame is read, handled and answered before the next one is
/// read. Every frame gets exactly one answer, a `Response` or an `Err`.
#[derive(Debug, Default)]
pub struct Worker {
    served: usize,
    failed: usize,
}

impl Worker {
    /// Creates a new `Worker`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the amount of requests answered with a model or a null model.
    pub fn served(&self) -> usize {
        self.served
    }

    /// Returns the amount of frames answered with an error.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Runs the request/reply loop until the peer closes the connection.
    ///
    /// # Args
    /// * `rx` - Receiving end of the client channel.
    /// * `tx` - Sending end of the client channel.
    ///
    /// # Returns
    /// Returns `Ok(())` once the peer disconnects.
    ///
    /// # Errors
    /// Returns `WorkerErr::Io` on transport failures, including a peer that hangs up in
    /// the middle of a frame. Malformed requests and fitting failures are answered with
    /// an `Err` message and don't stop the loop.
    pub async fn run<R, W>(&mut self, mut rx: OnoReceiver<R>, mut tx: OnoSender<W>) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut rx_buf = Vec::new();

        loop {
            let outcome = match rx.recv_into::<Msg>(&mut rx_buf).await {
                Ok(Msg::Request(req)) => handle_request(req),
                Ok(other) => Err(WorkerErr::UnexpectedMessage { got: other.kind() }),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    info!(
                        served = self.served,
                        failed = self.failed;
                        "peer disconnected between frames"
                    );
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    Err(WorkerErr::MalformedRequest(e))
                }
                Err(e) => return Err(e.into()),
            };

            let reply = match outcome {
                Ok(res) => {
                    self.served += 1;
                    Msg::Response(res)
                }
                Err(e) => {
                    self.failed += 1;
                    warn!("failed to handle frame: {e}");
                    Msg::Err(e.to_string().into())
                }
            };

            tx.send(&reply).await?;
        }
    }
}

fn handle_request(req: FitRequest) -> Result<FitResponse> {
    let FitRequest {
        request_id,
        samples,
    } = req;

    debug!(request_id:% = request_id, samples = samples.len(); "received fit request");

    let model = fit_temperature_model(&samples)?;
    if model.is_none() {
        debug!(request_id:% = request_id; "not enough data, answering a null model");
    }

    Ok(FitResponse { request_id, model })
}
