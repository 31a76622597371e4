use crate::command::{Arg, Command};
use crate::env::Environment;
use crate::item::ItemType;
use crate::parser::{ArgValue, Value};
use anyhow::{Context, Result};

/// Built-in commands known to the console at compile time.
///
/// Each builtin declares its arguments, gets rebuilt from the parsed values
/// and then runs against the shared [`Environment`].
pub(crate) trait BuiltinCommand: Sized + 'static {
    /// Canonical name of the command, e.g. "echo" or "clear".
    fn name() -> &'static str;

    fn description() -> &'static str;

    fn args() -> Vec<Arg> {
        Vec::new()
    }

    /// Builds the command from values parsed according to [`args`](Self::args).
    fn from_values(values: Vec<Value>) -> Option<Self>;

    fn execute(self, env: &mut Environment) -> Result<()>;
}

/// Wraps a builtin into a registrable [`Command`].
pub(crate) fn command<T: BuiltinCommand>() -> Command {
    Command::new(T::name(), T::description(), T::args(), |values, env| {
        let cmd = T::from_values(values).context("unexpected argument types")?;
        cmd.execute(env)
    })
}

/// Every builtin, in registration order.
pub(crate) fn all() -> Vec<Command> {
    vec![
        command::<Echo>(),
        command::<Clear>(),
        command::<History>(),
        command::<Filter>(),
        command::<Exit>(),
    ]
}

fn single<T: ArgValue>(values: Vec<Value>) -> Option<T> {
    values.into_iter().next().and_then(T::from_value)
}

/// Print the given text.
pub struct Echo {
    pub text: String,
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn description() -> &'static str {
        "Print the given text, quote it to keep spaces"
    }

    fn args() -> Vec<Arg> {
        vec![Arg::of::<String>("text")]
    }

    fn from_values(values: Vec<Value>) -> Option<Self> {
        single(values).map(|text| Echo { text })
    }

    fn execute(self, env: &mut Environment) -> Result<()> {
        env.print(self.text);
        Ok(())
    }
}

/// Drop every item from the console log.
pub struct Clear;

impl BuiltinCommand for Clear {
    fn name() -> &'static str {
        "clear"
    }

    fn description() -> &'static str {
        "Clear the console log"
    }

    fn from_values(_values: Vec<Value>) -> Option<Self> {
        Some(Clear)
    }

    fn execute(self, env: &mut Environment) -> Result<()> {
        env.log.clear();
        Ok(())
    }
}

/// Show the executed command lines, oldest first.
pub struct History;

impl BuiltinCommand for History {
    fn name() -> &'static str {
        "history"
    }

    fn description() -> &'static str {
        "Show previously executed commands"
    }

    fn from_values(_values: Vec<Value>) -> Option<Self> {
        Some(History)
    }

    fn execute(self, env: &mut Environment) -> Result<()> {
        let lines: Vec<String> = env.history.iter().map(str::to_string).collect();
        for (i, line) in lines.into_iter().enumerate() {
            env.print(format!("{:>4}  {}", i + 1, line));
        }
        Ok(())
    }
}

/// Repeat the log items matching a pattern.
pub struct Filter {
    pub pattern: String,
}

impl BuiltinCommand for Filter {
    fn name() -> &'static str {
        "filter"
    }

    fn description() -> &'static str {
        "Show log items matching a case insensitive regular expression"
    }

    fn args() -> Vec<Arg> {
        vec![Arg::of::<String>("pattern")]
    }

    fn from_values(values: Vec<Value>) -> Option<Self> {
        single(values).map(|pattern| Filter { pattern })
    }

    fn execute(self, env: &mut Environment) -> Result<()> {
        let matches: Vec<String> = env
            .log
            .filter(&self.pattern)
            .with_context(|| format!("invalid pattern '{}'", self.pattern))?
            .into_iter()
            .filter(|item| item.kind() != ItemType::Command)
            .map(|item| item.get())
            .collect();

        for line in matches {
            env.log.push(ItemType::Info, line);
        }
        Ok(())
    }
}

/// Ask the interactive loop to stop.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn description() -> &'static str {
        "Leave the console"
    }

    fn from_values(_values: Vec<Value>) -> Option<Self> {
        Some(Exit)
    }

    fn execute(self, env: &mut Environment) -> Result<()> {
        env.should_exit = true;
        Ok(())
    }
}
