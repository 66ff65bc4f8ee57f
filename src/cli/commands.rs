//! CLI command implementations.

use std::path::Path;

use crate::config::CuratorConfig;
use crate::engine::GenerationEngine;
use crate::format::{CsvExporter, SnapshotWriter};
use crate::illustrate::{HttpFetcher, ImagePipeline, UrlListFinder};
use crate::provider::{FixedSource, GeminiSource};
use crate::store::{SharedStore, VocabularyStore};
use crate::types::{CuratorResult, GenerationReport};

use super::repl;
use super::repl_commands::ReplState;

/// Build a generation engine: fixed words when given, Gemini otherwise.
pub fn build_engine(
    config: &CuratorConfig,
    words: Option<&[String]>,
) -> CuratorResult<GenerationEngine> {
    match words {
        Some(words) => Ok(GenerationEngine::new(Box::new(FixedSource::new(words)))),
        None => Ok(GenerationEngine::new(Box::new(GeminiSource::new(
            &config.generation,
        )?))),
    }
}

/// Generate a word list, apply deletions, and persist it.
pub fn cmd_generate(
    config: &CuratorConfig,
    topic: &str,
    count: Option<usize>,
    words: Option<&[String]>,
    delete_ids: &[u64],
    csv: bool,
    json: bool,
) -> CuratorResult<()> {
    let (store, report, missing) = prepare_store(config, topic, count, words, delete_ids)?;

    let snapshot = SnapshotWriter::from_config(&config.output).write_snapshot(&store)?;
    let csv_path = if csv {
        Some(CsvExporter::from_config(&config.output).export(&store, None)?)
    } else {
        None
    };

    if json {
        let info = serde_json::json!({
            "topic": store.topic(),
            "requested": report.requested,
            "received": report.received,
            "partial": report.is_partial(),
            "active": store.active_words(),
            "deleted": store.deleted_log(),
            "missing_ids": missing,
            "snapshot": snapshot.display().to_string(),
            "csv": csv_path.as_ref().map(|p| p.display().to_string()),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        print_partial(&report);
        for id in &missing {
            eprintln!("No word with id {}", id);
        }
        println!("{}", store.active_words().join(", "));
        println!("Snapshot: {}", snapshot.display());
        if let Some(path) = csv_path {
            println!("CSV: {}", path.display());
        }
    }
    Ok(())
}

/// Generate a store and apply deletions; returns the ids that were not found.
fn prepare_store(
    config: &CuratorConfig,
    topic: &str,
    count: Option<usize>,
    words: Option<&[String]>,
    delete_ids: &[u64],
) -> CuratorResult<(VocabularyStore, GenerationReport, Vec<u64>)> {
    let engine = build_engine(config, words)?;
    let count = count.unwrap_or(config.generation.default_count);
    let (mut store, report) = engine.generate_store(topic, count)?;

    let missing: Vec<u64> = delete_ids
        .iter()
        .copied()
        .filter(|&id| !store.delete_by_id(id))
        .collect();
    Ok((store, report, missing))
}

/// Build an image pipeline that reads URLs from a word-to-URL list file.
pub fn build_image_pipeline(config: &CuratorConfig, urls: &Path) -> CuratorResult<ImagePipeline> {
    let finder = UrlListFinder::load(urls)?;
    let fetcher = HttpFetcher::new()?;
    Ok(ImagePipeline::new(
        Box::new(finder),
        Box::new(fetcher),
        config.images.clone(),
    ))
}

/// Generate a word list, apply deletions, and download images for the
/// active words.
pub fn cmd_images(
    config: &CuratorConfig,
    topic: &str,
    count: Option<usize>,
    words: Option<&[String]>,
    delete_ids: &[u64],
    urls: &Path,
    json: bool,
) -> CuratorResult<()> {
    let pipeline = build_image_pipeline(config, urls)?;
    let (store, report, missing) = prepare_store(config, topic, count, words, delete_ids)?;
    let manifest = pipeline.run(&store)?;

    if json {
        let info = serde_json::json!({
            "topic": store.topic(),
            "dir": manifest.dir.display().to_string(),
            "illustrated": manifest.illustrated(),
            "missing_ids": missing,
            "images": manifest.images,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        print_partial(&report);
        for id in &missing {
            eprintln!("No word with id {}", id);
        }
        for (word, paths) in &manifest.images {
            match paths.first() {
                Some(path) => println!("{}: {}", word, path.display()),
                None => println!("{}: (none)", word),
            }
        }
        println!(
            "Images for {}/{} words in {}",
            manifest.illustrated(),
            manifest.images.len(),
            manifest.dir.display()
        );
    }
    Ok(())
}

/// Open an interactive curation session for `topic`.
pub fn cmd_session(
    config: &CuratorConfig,
    topic: &str,
    count: Option<usize>,
    words: Option<&[String]>,
) -> CuratorResult<()> {
    let engine = build_engine(config, words)?;
    let count = count.unwrap_or(config.generation.default_count);
    let store = SharedStore::new(VocabularyStore::new());

    match engine.generate_shared(&store, topic, count) {
        Ok(report) => print_partial(&report),
        Err(e) => eprintln!("  Generation failed: {e}. Use /regenerate to retry."),
    }

    let mut state = ReplState::new(store, engine, config, topic, count);
    repl::run(&mut state)
}

/// Print or initialise the configuration file.
pub fn cmd_config(config: &CuratorConfig, init: Option<&Path>) -> CuratorResult<()> {
    match init {
        Some(path) => {
            if path.exists() {
                eprintln!("Config already exists: {}", path.display());
                return Ok(());
            }
            CuratorConfig::default().save(path)?;
            println!("Wrote default config to {}", path.display());
        }
        None => print!("{}", config.to_toml()?),
    }
    Ok(())
}

fn print_partial(report: &GenerationReport) {
    if report.is_partial() {
        eprintln!(
            "Warning: requested {} words, received {}",
            report.requested, report.received
        );
    }
}
