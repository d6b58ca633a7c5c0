//! Thin entrypoint for the migration CLI.

use std::process;

#[tokio::main]
async fn main() {
    process::exit(rehome_cli::run().await);
}
