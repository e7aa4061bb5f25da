pub mod config;
pub mod error;
pub mod net;
pub mod server;
pub mod worker;

pub use config::WorkerConfig;
pub use error::WorkerErr;
pub use net::FitClient;
pub use server::FitServer;
pub use worker::Worker;
