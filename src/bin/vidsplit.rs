//! vidsplit CLI - split large files into chunks and filter annotations
//!
//! # Examples
//!
//! ```bash
//! # Split every video under a directory into 8 MiB chunks
//! vidsplit split-files /data/videos --chunk-size 8388608 --output /data/chunks
//!
//! # Publish person annotations above 0.9 confidence
//! vidsplit filter-annotations annotations.jsonl --topic alerts --entity person --min-confidence 0.9
//!
//! # Show configuration
//! vidsplit show-config
//! ```

use clap::Parser;
use vidsplit::cli::{init_tracing, run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
