//! Command-line front end for the word cache.
//!
//! ```text
//! wordcache [--store DIR] lookup <word>
//! wordcache [--store DIR] list
//! wordcache [--store DIR] delete <word>
//! wordcache [--store DIR] clear
//! wordcache [--store DIR] export [--out FILE|-] [word...]
//! wordcache [--store DIR] settings [--auto-save BOOL] [--max-cache-age DAYS] [--theme ID]
//! wordcache [--store DIR] usage
//! ```
//!
//! The store directory defaults to `$WORDCACHE_DIR`, then `./wordcache`.

use std::path::PathBuf;

use rs_wordcache::cache::JsonFileStore;
use rs_wordcache::export::{export, export_filename, export_selected};
use rs_wordcache::lookup::{HttpFetcher, Lookup};
use rs_wordcache::{SettingsPatch, WordCache, WordEntry};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const USAGE: &str = "Usage: wordcache [--store DIR] <lookup|list|delete|clear|export|settings|usage> [args]";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(std::env::args().skip(1).collect()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(mut args: Vec<String>) -> CliResult<()> {
    let mut store_dir = std::env::var("WORDCACHE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("wordcache"));
    if args.first().map(String::as_str) == Some("--store") {
        if args.len() < 2 {
            return Err("Missing value for --store".into());
        }
        store_dir = PathBuf::from(args.remove(1));
        args.remove(0);
    }

    let Some(command) = args.first().cloned() else {
        return Err(USAGE.into());
    };
    let rest = &args[1..];

    let cache = WordCache::new(JsonFileStore::open(&store_dir).await?);

    match command.as_str() {
        "lookup" => {
            let word = rest.join(" ");
            let lookup = Lookup::new(HttpFetcher::new(), cache);
            let outcome = lookup.lookup(&word).await?;
            if outcome.cached {
                eprintln!("(cached)");
            }
            println!("{}", serde_json::to_string_pretty(&outcome.entry)?);
        }
        "list" => {
            for entry in cache.get_all().await? {
                print_summary(&entry);
            }
        }
        "delete" => {
            let word = rest.first().ok_or("Missing word to delete")?;
            cache.delete(word).await?;
        }
        "clear" => cache.clear_all().await?,
        "export" => export_command(&cache, rest).await?,
        "settings" => {
            let patch = parse_settings(rest)?;
            let settings = if patch.is_empty() {
                cache.get_settings().await?
            } else {
                cache.save_settings(patch).await?
            };
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        "usage" => {
            let usage = cache.usage().await?;
            match usage.quota {
                Some(quota) => println!("{} / {} bytes", usage.bytes_in_use, quota),
                None => println!("{} bytes (no quota)", usage.bytes_in_use),
            }
        }
        "-h" | "--help" => println!("{USAGE}"),
        other => return Err(format!("Unknown command: {other}\n{USAGE}").into()),
    }
    Ok(())
}

fn print_summary(entry: &WordEntry) {
    let first = entry
        .definitions
        .first()
        .map(|def| format!("{}: {}", def.part_of_speech, def.meaning))
        .unwrap_or_default();
    println!(
        "{}\t{}\t{}",
        entry.word,
        entry.timestamp.format("%Y-%m-%d"),
        first
    );
}

async fn export_command(cache: &WordCache<JsonFileStore>, args: &[String]) -> CliResult<()> {
    let mut out: Option<String> = None;
    let mut words = Vec::new();
    let mut args = args.iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "-o" | "--out" => out = Some(args.next().ok_or("Missing output path")?.clone()),
            word => words.push(word),
        }
    }

    let entries = cache.get_all().await?;
    let doc = if words.is_empty() {
        export(&entries)
    } else {
        export_selected(&entries, words.iter().copied())
    };

    let path = out.unwrap_or_else(|| export_filename(chrono::Local::now().date_naive()));
    if path == "-" {
        print!("{doc}");
    } else {
        tokio::fs::write(&path, doc).await?;
        eprintln!("Exported to {path}");
    }
    Ok(())
}

fn parse_settings(args: &[String]) -> CliResult<SettingsPatch> {
    let mut patch = SettingsPatch::default();
    let mut args = args.iter();
    while let Some(a) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("Missing value for {a}"));
        match a.as_str() {
            "--auto-save" => {
                patch.auto_save = Some(match value()?.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => return Err(format!("Not a boolean: {other}").into()),
                });
            }
            "--max-cache-age" => patch.max_cache_age = Some(value()?.parse()?),
            "--theme" => patch.theme = Some(value()?.clone()),
            other => return Err(format!("Unknown setting: {other}").into()),
        }
    }
    Ok(patch)
}
