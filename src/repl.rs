//! Interactive prompt on top of [`Interpreter`].

use crate::interpreter::Interpreter;
use crate::item::ItemType;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

const PROMPT: &str = "> ";

/// Tab completion and inline hints driven by the interpreter's autocomplete trees.
pub struct ConsoleHelper {
    console: Rc<RefCell<Interpreter>>,
}

impl ConsoleHelper {
    pub fn new(console: Rc<RefCell<Interpreter>>) -> Self {
        Self { console }
    }

    /// Whole-line replacements for `line[..pos]`.
    fn candidates(&self, line: &str, pos: usize) -> Vec<Pair> {
        let completion = self.console.borrow().complete(&line[..pos]);
        match completion.suggestions.len() {
            0 | 1 if completion.line == line[..pos] => Vec::new(),
            0 | 1 => vec![Pair {
                display: completion.line.clone(),
                replacement: completion.line,
            }],
            _ => {
                let head = &completion.line[..completion.start];
                completion
                    .suggestions
                    .iter()
                    .map(|s| Pair {
                        display: s.clone(),
                        replacement: format!("{}{}", head, s),
                    })
                    .collect()
            }
        }
    }

    /// Rest of the only possible completion, shown after the cursor.
    fn hint_for(&self, line: &str, pos: usize) -> Option<String> {
        if pos < line.len() || line.trim().is_empty() {
            return None;
        }
        let completion = self.console.borrow().complete(line);
        if completion.suggestions.len() != 1 {
            return None;
        }
        completion
            .line
            .strip_prefix(line)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }
}

impl Completer for ConsoleHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((0, self.candidates(line, pos)))
    }
}

impl Hinter for ConsoleHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        self.hint_for(line, pos)
    }
}

impl Highlighter for ConsoleHelper {}

impl Validator for ConsoleHelper {}

impl Helper for ConsoleHelper {}

/// Writes the items logged since index `from` and returns the new end.
///
/// Echoed command lines are skipped. If the log was cleared, printing
/// restarts from its beginning.
pub fn print_items(console: &Interpreter, from: usize, out: &mut impl Write) -> io::Result<usize> {
    let items = console.items();
    let from = if from > items.len() { 0 } else { from };
    for item in &items[from..] {
        if matches!(item.kind(), ItemType::Command | ItemType::None) {
            continue;
        }
        writeln!(out, "{}", item.get().trim_end())?;
    }
    Ok(items.len())
}

/// Reads lines until `exit`, end of input or Ctrl-C.
pub fn run(console: Rc<RefCell<Interpreter>>) -> rustyline::Result<()> {
    let mut editor: Editor<ConsoleHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(ConsoleHelper::new(Rc::clone(&console))));

    let mut shown = console.borrow().items().len();
    let mut stdout = io::stdout();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }
                let mut console = console.borrow_mut();
                console.run_command(&line);
                shown = print_items(&console, shown, &mut stdout)?;
                if console.should_exit() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                tracing::warn!(error = %err, "readline failed");
                return Err(err);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> ConsoleHelper {
        let console = Interpreter::default();
        ConsoleHelper::new(Rc::new(RefCell::new(console)))
    }

    #[test]
    fn test_unique_candidate_replaces_line() {
        let helper = helper();
        let pairs = helper.candidates("cle", 3);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].replacement, "clear");
    }

    #[test]
    fn test_several_candidates_listed() {
        let helper = helper();
        let pairs = helper.candidates("help h", 6);
        let replacements: Vec<&str> = pairs.iter().map(|p| p.replacement.as_str()).collect();
        assert_eq!(replacements, vec!["help history"]);

        let pairs = helper.candidates("e", 1);
        let shown: Vec<&str> = pairs.iter().map(|p| p.display.as_str()).collect();
        assert_eq!(shown, vec!["echo", "exit"]);
    }

    #[test]
    fn test_nothing_to_complete() {
        let helper = helper();
        assert!(helper.candidates("zzz", 3).is_empty());
        assert!(helper.candidates("", 0).is_empty());
    }

    #[test]
    fn test_hint_shows_rest_of_word() {
        let helper = helper();
        assert_eq!(helper.hint_for("his", 3), Some("tory".to_string()));
        assert_eq!(helper.hint_for("e", 1), None);
        assert_eq!(helper.hint_for("exit", 4), None);
        assert_eq!(helper.hint_for("his", 1), None);
    }

    #[test]
    fn test_print_items_skips_commands() {
        let mut console = Interpreter::default();
        console.run_command("echo one");
        console.run_command("nope");

        let mut out = Vec::new();
        let end = print_items(&console, 0, &mut out).unwrap();
        assert_eq!(end, console.items().len());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\tone\n"));
        assert!(text.contains("[ERROR]: Command doesn't exist"));
        assert!(!text.contains("> echo"));

        let mut out = Vec::new();
        assert_eq!(print_items(&console, end, &mut out).unwrap(), end);
        assert!(out.is_empty());
    }
}
