//! RandToken Worker Service Entry Point
//!
//! Loads configuration, verifies the secure random source and starts the
//! HTTP server. A failed random source check exits with an error before any
//! request is accepted.

use randtoken_worker::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
