//! Error types for argument parsing and command registration.
//!
//! - [`ParseError`] - an argument could not be read from the command line
//! - [`ConsoleError`] - a command, variable or script could not be registered or loaded

use std::io;
use std::path::PathBuf;

/// An argument failed to parse.
///
/// Carries a message and the literal text that caused it, so it can be shown
/// to the user as is: `Too many chars were given: 'ab'`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}: '{arg}'")]
pub struct ParseError {
    message: String,
    arg: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>, arg: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            arg: arg.into(),
        }
    }

    /// What went wrong.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The offending text.
    pub fn arg(&self) -> &str {
        &self.arg
    }
}

/// Registration and script loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// A command with this name is already registered.
    #[error("command already exists: {0}")]
    CommandExists(String),

    /// A variable with this name is already registered.
    #[error("variable already exists: {0}")]
    VariableExists(String),

    /// A script with this name is already registered.
    #[error("script '{0}' already registered")]
    ScriptExists(String),

    /// The name was empty or only whitespace.
    #[error("empty name given")]
    EmptyName,

    /// The name contained more than one word.
    #[error("whitespace separated names are forbidden: '{0}'")]
    WhitespaceInName(String),

    /// A script has no path to load from.
    #[error("script has no path to load from")]
    NoScriptPath,

    /// A script file could not be read.
    #[error("failed to load script: '{}'", path.display())]
    ScriptLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
