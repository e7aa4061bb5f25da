mod client;

pub use client::FitClient;
