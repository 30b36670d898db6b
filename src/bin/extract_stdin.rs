//! Reads a dictionary page from stdin and prints the extracted entry as JSON.
//!
//! Usage: `extract_stdin <word> < page.html`

use rs_wordcache::{extract_bytes, Options};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let Some(word) = std::env::args().nth(1) else {
        eprintln!("Usage: extract_stdin <word> < page.html");
        std::process::exit(2);
    };

    // Read HTML from stdin
    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    match extract_bytes(&html, None, &word, &Options::default()) {
        Ok(entry) => match serde_json::to_string_pretty(&entry) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
