//! An embeddable console: named, typed commands run from text lines.
//!
//! Commands declare typed arguments (strings, booleans, chars, integers,
//! floats and nested vectors of those). An input line names a command and
//! supplies its arguments; they are parsed, checked and handed to the
//! command's callback. Variables get `set`/`get` commands for free, names
//! are indexed for prefix completion, and scripts replay lines in bulk.
//!
//! The main entry point is [`Interpreter`]. [`repl`] wraps it in an
//! interactive prompt.

mod autocomplete;
mod builtin;
mod command;
mod env;
mod error;
mod history;
mod interpreter;
mod item;
mod lexer;
mod parser;
pub mod repl;
pub mod reserved;
mod script;

pub use autocomplete::AutoComplete;
pub use command::{Arg, Callback, Command};
pub use env::Environment;
pub use error::{ConsoleError, ParseError};
pub use history::CommandHistory;
/// The command registry. See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Completion, Interpreter};
pub use item::{Item, ItemLog, ItemType};
pub use lexer::{InputBuffer, TokenRange};
pub use parser::{ArgType, ArgValue, Value, parse_str};
pub use script::Script;
