//! Interactive curation session.
//!
//! Launched by `lexi session <topic>`. Type `/help` for available commands,
//! Tab for completion.

use crate::cli::repl_commands::{self, ReplState};
use crate::cli::repl_complete;
use crate::types::CuratorResult;
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};

/// History file location.
fn history_path() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".lexi_history")
}

/// Print the welcome banner.
fn print_banner(topic: &str) {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mlexi v{}\x1b[0m \x1b[90mcurating '{}'\x1b[0m",
        env!("CARGO_PKG_VERSION"),
        topic
    );
    eprintln!();
    eprintln!(
        "    \x1b[36m/list\x1b[0m shows the kept words, \x1b[90mTab\x1b[0m completes, \x1b[90m/exit\x1b[0m quits."
    );
    eprintln!();
}

/// Run the session loop until `/exit` or end of input.
pub fn run(state: &mut ReplState) -> CuratorResult<()> {
    print_banner(&state.topic);

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let helper = repl_complete::LexiHelper::new(state.store.clone());
    let mut rl: Editor<repl_complete::LexiHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config).map_err(readline_error)?;
    rl.set_helper(Some(helper));
    repl_complete::bind_keys(&mut rl);

    let hist_path = history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let prompt = " \x1b[36mlexi>\x1b[0m ";

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match repl_commands::execute(line, state) {
                    Ok(true) => {
                        eprintln!("  Goodbye!");
                        break;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        eprintln!("  Error: {e}");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(&hist_path);

    Ok(())
}

fn readline_error(e: ReadlineError) -> crate::types::CuratorError {
    match e {
        ReadlineError::Io(io) => io.into(),
        other => crate::types::CuratorError::Config(format!("terminal: {}", other)),
    }
}
