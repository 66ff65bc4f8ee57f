//! Tab completion for the curation session.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Event, EventContext, EventHandler, Helper, KeyEvent, RepeatCount,
};

use crate::store::SharedStore;

/// All available session slash commands.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/list", "Show active words"),
    ("/all", "Show every word, deleted ones struck through"),
    ("/delete", "Delete by id (one or more) or by word"),
    ("/cross", "Cross a word out"),
    ("/restore", "Restore by id or word"),
    ("/select", "Put a crossed-out word back"),
    ("/regenerate", "Generate a fresh list for the topic"),
    ("/topic", "Switch topic and generate"),
    ("/snapshot", "Write a JSON snapshot"),
    ("/export", "Write the active words as CSV"),
    ("/images", "Download images listed in a word-to-URL JSON file"),
    ("/stats", "Word counts"),
    ("/log", "Show the deletion log"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "End the session"),
];

/// Commands whose argument is a word from the store.
const WORD_COMMANDS: &[&str] = &["/cross", "/select", "/restore", "/delete"];

/// Session helper providing tab completion.
pub struct LexiHelper {
    store: SharedStore,
}

impl LexiHelper {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Words in the store starting with `prefix`, ignoring case.
    fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        self.store.with(|s| {
            s.list_all()
                .iter()
                .filter(|e| e.word.to_lowercase().starts_with(&prefix))
                .map(|e| e.word.clone())
                .collect()
        })
    }
}

impl Completer for LexiHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        // Complete command names
        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<18} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        let parts: Vec<&str> = input.splitn(2, ' ').collect();
        let cmd = parts[0];
        let args = if parts.len() > 1 { parts[1] } else { "" };

        if WORD_COMMANDS.contains(&cmd) {
            let prefix_start = input.len() - args.len();
            let matches: Vec<Pair> = self
                .words_with_prefix(args.trim())
                .into_iter()
                .map(|w| Pair {
                    display: w.clone(),
                    replacement: w,
                })
                .collect();
            return Ok((prefix_start, matches));
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for LexiHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for LexiHelper {}
impl Validator for LexiHelper {}
impl Helper for LexiHelper {}

/// Tab accepts hint if present, else triggers completion.
pub struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// Bind custom key sequences.
pub fn bind_keys(rl: &mut rustyline::Editor<LexiHelper, rustyline::history::DefaultHistory>) {
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );
}

/// Find the closest matching command (Levenshtein distance up to 3).
pub fn suggest_command(input: &str) -> Option<&'static str> {
    let input_lower = input.to_lowercase();
    let mut best: Option<(&'static str, usize)> = None;

    for &(cmd, _) in COMMANDS {
        let dist = levenshtein(&input_lower, &cmd[1..]);
        if dist <= 3 && best.map_or(true, |(_, d)| dist < d) {
            best = Some((cmd, dist));
        }
    }

    best.map(|(cmd, _)| cmd)
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::VocabularyStore;

    #[test]
    fn test_suggest_command() {
        assert_eq!(suggest_command("lst"), Some("/list"));
        assert_eq!(suggest_command("restor"), Some("/restore"));
        assert_eq!(suggest_command("zzzzzzzzzz"), None);
    }

    #[test]
    fn test_word_prefix_ignores_case() {
        let store = SharedStore::new(VocabularyStore::from_words(
            "t",
            ["Respawn", "render", "hitbox"],
        ));
        let helper = LexiHelper::new(store);
        assert_eq!(helper.words_with_prefix("re"), vec!["Respawn", "render"]);
    }
}
