//! Named sequences of command lines.

use crate::error::ConsoleError;
use std::fs;
use std::path::{Path, PathBuf};

/// A batch of command lines, either given directly or read from a text file.
///
/// File backed scripts are read on [`load`](Self::load); lines are taken as
/// they are, one command per line.
#[derive(Debug, Clone, Default)]
pub struct Script {
    path: Option<PathBuf>,
    lines: Vec<String>,
    from_memory: bool,
    loaded: bool,
}

impl Script {
    /// A script holding `lines`. It has no file, so reloading keeps the lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: None,
            lines: lines.into_iter().map(Into::into).collect(),
            from_memory: true,
            loaded: true,
        }
    }

    /// A script read from `path` the first time it is needed.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            lines: Vec::new(),
            from_memory: false,
            loaded: false,
        }
    }

    /// A script read from `path` right away.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConsoleError> {
        let mut script = Self::from_path(path);
        script.load()?;
        Ok(script)
    }

    /// Reads the file, replacing any lines held so far.
    pub fn load(&mut self) -> Result<(), ConsoleError> {
        let Some(path) = &self.path else {
            return Err(ConsoleError::NoScriptPath);
        };
        let text = fs::read_to_string(path).map_err(|source| ConsoleError::ScriptLoad {
            path: path.clone(),
            source,
        })?;
        self.lines = text.lines().map(str::to_string).collect();
        self.loaded = true;
        Ok(())
    }

    /// Drops the current lines and reads the file again. No-op for in-memory scripts.
    pub fn reload(&mut self) -> Result<(), ConsoleError> {
        if self.from_memory {
            return Ok(());
        }
        self.unload();
        self.load()
    }

    pub fn unload(&mut self) {
        self.lines.clear();
        self.loaded = false;
    }

    /// Points the script at another file. Takes effect on the next load.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
        self.from_memory = false;
        self.loaded = false;
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True once lines are held, even if there are none.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
