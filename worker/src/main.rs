use std::io;

use log::info;
use tokio::signal;

use worker::{FitServer, WorkerConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    env_logger::init();

    let config = WorkerConfig::from_env();
    let server = FitServer::bind(&config).await?;

    tokio::select! {
        ret = server.serve() => ret?,
        _ = signal::ctrl_c() => {
            info!("received SIGINT, shutting down");
        }
    }

    Ok(())
}
