//! Hosting server binary.
//!
//! Runs the HTTP server for hosting live Set rooms.
//! Supports WebSocket connections for real-time play.

use setroom::*;

#[tokio::main]
async fn main() {
    log();
    kys();
    hosting::Server::run().await.unwrap();
}
