//! Kodegen Bundler Manifest - stages viewer builds and packages installers.
//!
//! Exit code 0 means every requested action completed; any failure prints a
//! diagnostic naming the offending path or command and exits 1.

use kodegen_bundler_manifest::cli::{self, OutputManager};
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            let output = OutputManager::new(false, false);
            output.error(&e.to_string());
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
