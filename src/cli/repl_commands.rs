//! Slash command dispatch for the curation session.

use std::path::PathBuf;

use crate::cli::repl_complete::{suggest_command, COMMANDS};
use crate::cli::commands::build_image_pipeline;
use crate::config::CuratorConfig;
use crate::engine::GenerationEngine;
use crate::format::{CsvExporter, SnapshotWriter};
use crate::store::SharedStore;
use crate::types::{CuratorResult, WordEntry};

/// Session state.
pub struct ReplState {
    /// The store being curated.
    pub store: SharedStore,
    engine: GenerationEngine,
    snapshots: SnapshotWriter,
    exporter: CsvExporter,
    config: CuratorConfig,
    /// Topic used by `/regenerate`.
    pub topic: String,
    /// Word count used by `/regenerate` when none is given.
    pub count: usize,
}

impl ReplState {
    pub fn new(
        store: SharedStore,
        engine: GenerationEngine,
        config: &CuratorConfig,
        topic: &str,
        count: usize,
    ) -> Self {
        Self {
            store,
            engine,
            snapshots: SnapshotWriter::from_config(&config.output),
            exporter: CsvExporter::from_config(&config.output),
            config: config.clone(),
            topic: topic.to_string(),
            count,
        }
    }
}

/// Execute a slash command. Returns `true` if the session should end.
pub fn execute(input: &str, state: &mut ReplState) -> CuratorResult<bool> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(false);
    }

    let input = input.strip_prefix('/').unwrap_or(input);
    if input.is_empty() {
        cmd_help();
        return Ok(false);
    }

    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    match cmd {
        "exit" | "quit" => return Ok(true),
        "help" | "h" | "?" => cmd_help(),
        "clear" | "cls" => eprint!("\x1b[2J\x1b[H"),
        "list" | "ls" => cmd_list(state, false),
        "all" => cmd_list(state, true),
        "delete" | "del" => cmd_delete(args, state),
        "cross" => cmd_cross(args, state),
        "restore" => cmd_restore(args, state),
        "select" => cmd_select(args, state),
        "regenerate" | "regen" => cmd_regenerate(args, state)?,
        "topic" => cmd_topic(args, state)?,
        "snapshot" | "save" => cmd_snapshot(args, state)?,
        "export" => cmd_export(args, state)?,
        "images" => cmd_images(args, state)?,
        "stats" => cmd_stats(state),
        "log" => cmd_log(state),
        _ => {
            if let Some(suggestion) = suggest_command(cmd) {
                eprintln!("  Unknown command '/{cmd}'. Did you mean {suggestion}?");
            } else {
                eprintln!("  Unknown command '/{cmd}'. Type /help for commands.");
            }
        }
    }

    Ok(false)
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<20} {desc}");
    }
    eprintln!();
    eprintln!("  Tip: Tab completes commands and, after /cross or /select, words.");
    eprintln!();
}

fn print_entry(entry: &WordEntry) {
    if entry.active {
        eprintln!("  {:>4}  {}", entry.id, entry.word);
    } else {
        eprintln!("  {:>4}  \x1b[9m\x1b[90m{}\x1b[0m", entry.id, entry.word);
    }
}

fn cmd_list(state: &ReplState, all: bool) {
    state.store.with(|store| {
        if !store.is_generated() {
            eprintln!("  No words yet. Use /regenerate or /topic <name>.");
            return;
        }
        eprintln!("  Topic: {}", store.topic());
        if all {
            store.list_all().iter().for_each(print_entry);
        } else {
            store.list_active().into_iter().for_each(print_entry);
        }
    });
}

fn cmd_delete(args: &str, state: &mut ReplState) {
    if args.is_empty() {
        eprintln!("  Usage: /delete <id|word> [id ...]");
        return;
    }
    let ids: Option<Vec<u64>> = args.split_whitespace().map(|t| t.parse().ok()).collect();
    state.store.with(|store| match ids {
        Some(ids) => {
            for id in ids {
                if store.delete_by_id(id) {
                    eprintln!("  Deleted [{}]", id);
                } else {
                    eprintln!("  No word with id {}", id);
                }
            }
        }
        None => report(store.delete_by_word(args), "Deleted", args),
    });
}

fn cmd_cross(args: &str, state: &mut ReplState) {
    if args.is_empty() {
        eprintln!("  Usage: /cross <word>");
        return;
    }
    state
        .store
        .with(|store| report(store.cross_word(args), "Crossed out", args));
}

fn cmd_restore(args: &str, state: &mut ReplState) {
    if args.is_empty() {
        eprintln!("  Usage: /restore <id|word>");
        return;
    }
    state.store.with(|store| {
        let found = match args.parse::<u64>() {
            Ok(id) => store.restore_by_id(id),
            Err(_) => store.restore_by_word(args),
        };
        report(found, "Restored", args);
    });
}

fn cmd_select(args: &str, state: &mut ReplState) {
    if args.is_empty() {
        eprintln!("  Usage: /select <word>");
        return;
    }
    state
        .store
        .with(|store| report(store.select_word(args), "Selected", args));
}

fn report(found: bool, action: &str, target: &str) {
    if found {
        eprintln!("  {} {}", action, target);
    } else {
        eprintln!("  No word matching {:?}", target);
    }
}

fn cmd_regenerate(args: &str, state: &mut ReplState) -> CuratorResult<()> {
    let count = if args.is_empty() {
        state.count
    } else {
        match args.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("  Usage: /regenerate [count]");
                return Ok(());
            }
        }
    };
    // The count only sticks once a generation with it succeeds.
    let report = state
        .engine
        .generate_shared(&state.store, &state.topic, count)?;
    state.count = count;
    eprintln!(
        "  Generated {} words for '{}' ({})",
        report.received,
        state.topic,
        state.engine.source_name()
    );
    if report.is_partial() {
        eprintln!("  Warning: requested {}, received {}", report.requested, report.received);
    }
    Ok(())
}

fn cmd_topic(args: &str, state: &mut ReplState) -> CuratorResult<()> {
    let mut tokens: Vec<&str> = args.split_whitespace().collect();
    let count = tokens.last().and_then(|t| t.parse::<usize>().ok());
    if count.is_some() {
        tokens.pop();
    }
    if tokens.is_empty() {
        eprintln!("  Usage: /topic <name> [count]");
        return Ok(());
    }
    let previous = std::mem::replace(&mut state.topic, tokens.join(" "));
    let count_arg = count.map(|c| c.to_string()).unwrap_or_default();
    if let Err(e) = cmd_regenerate(&count_arg, state) {
        state.topic = previous;
        return Err(e);
    }
    Ok(())
}

fn cmd_snapshot(args: &str, state: &mut ReplState) -> CuratorResult<()> {
    let store = state.store.snapshot();
    if args.is_empty() {
        let path = state.snapshots.write_snapshot(&store)?;
        eprintln!("  Snapshot saved to {}", path.display());
    } else {
        let path = PathBuf::from(args);
        state.snapshots.write_to_file(&store, &path)?;
        eprintln!("  Snapshot saved to {}", path.display());
    }
    Ok(())
}

fn cmd_export(args: &str, state: &mut ReplState) -> CuratorResult<()> {
    let store = state.store.snapshot();
    let filename = (!args.is_empty()).then(|| PathBuf::from(args));
    let path = state.exporter.export(&store, filename.as_deref())?;
    eprintln!("  Exported to {}", path.display());
    Ok(())
}

fn cmd_images(args: &str, state: &mut ReplState) -> CuratorResult<()> {
    if args.is_empty() {
        eprintln!("  Usage: /images <url-list.json>");
        return Ok(());
    }
    let store = state.store.snapshot();
    if !store.is_generated() {
        eprintln!("  No words yet. Use /regenerate or /topic <name>.");
        return Ok(());
    }
    let pipeline = build_image_pipeline(&state.config, &PathBuf::from(args))?;
    let manifest = pipeline.run(&store)?;
    eprintln!(
        "  Images for {}/{} words saved to {}",
        manifest.illustrated(),
        manifest.images.len(),
        manifest.dir.display()
    );
    Ok(())
}

fn cmd_stats(state: &ReplState) {
    let counts = state.store.with(|s| s.counts());
    eprintln!("  Topic:    {}", state.topic);
    eprintln!("  Total:    {}", counts.total);
    eprintln!("  Active:   {}", counts.active);
    eprintln!("  Deleted:  {} (log entries)", counts.deleted);
}

fn cmd_log(state: &ReplState) {
    state.store.with(|store| {
        if store.deleted_log().is_empty() {
            eprintln!("  Nothing deleted yet.");
        }
        for (i, word) in store.deleted_log().iter().enumerate() {
            eprintln!("  {:>4}  {}", i + 1, word);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FixedSource;
    use crate::store::VocabularyStore;

    fn state(dir: &std::path::Path) -> ReplState {
        let mut config = CuratorConfig::default();
        config.output.dir = dir.to_path_buf();
        let engine = GenerationEngine::new(Box::new(FixedSource::new([
            "respawn", "hitbox", "latency",
        ])));
        let store = SharedStore::new(VocabularyStore::new());
        ReplState::new(store, engine, &config, "Gaming", 3)
    }

    #[test]
    fn test_session_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(dir.path());

        assert!(!execute("/regenerate", &mut st).unwrap());
        assert!(!execute("/delete 1", &mut st).unwrap());
        assert!(!execute("/cross Latency", &mut st).unwrap());
        assert!(!execute("/select latency", &mut st).unwrap());

        let store = st.store.snapshot();
        assert_eq!(store.active_words(), vec!["respawn", "latency"]);
        assert_eq!(store.deleted_log(), &["hitbox", "latency"]);

        let out = dir.path().join("out.csv");
        execute(&format!("/export {}", out.display()), &mut st).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().nth(1), Some("Gaming,respawn, latency"));

        assert!(execute("/exit", &mut st).unwrap());
    }

    #[test]
    fn test_topic_with_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(dir.path());
        execute("/topic Board Games 2", &mut st).unwrap();
        assert_eq!(st.topic, "Board Games");
        assert_eq!(st.count, 2);
        assert_eq!(st.store.with(|s| s.len()), 2);
    }

    #[test]
    fn test_rejected_count_is_not_kept() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(dir.path());
        assert!(execute("/regenerate 0", &mut st).is_err());
        assert_eq!(st.count, 3);
        execute("/regenerate", &mut st).unwrap();
        assert_eq!(st.store.with(|s| s.len()), 3);

        assert!(execute("/topic Sailing 0", &mut st).is_err());
        assert_eq!(st.topic, "Gaming");
        assert_eq!(st.count, 3);
        execute("/regenerate 2", &mut st).unwrap();
        assert_eq!(st.count, 2);
    }

    #[test]
    fn test_images_from_url_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(dir.path());
        st.config.images.dir = dir.path().join("images");
        execute("/regenerate", &mut st).unwrap();

        // Nothing listed, so no download is attempted.
        let list = dir.path().join("urls.json");
        std::fs::write(&list, "{}").unwrap();
        execute(&format!("/images {}", list.display()), &mut st).unwrap();

        let runs: Vec<_> = std::fs::read_dir(dir.path().join("images"))
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(runs.len(), 1);
        let manifest = std::fs::read_to_string(runs[0].join("image_data.json")).unwrap();
        let v: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(v["respawn"], serde_json::json!([]));
        assert_eq!(v.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_images_missing_list_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(dir.path());
        execute("/regenerate", &mut st).unwrap();
        let err = execute("/images /nonexistent/urls.json", &mut st).unwrap_err();
        assert!(err.is_persistence_failure());
    }

    #[test]
    fn test_snapshot_before_generation_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(dir.path());
        assert!(execute("/snapshot", &mut st).is_err());
    }
}
