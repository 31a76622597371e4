use crate::autocomplete::AutoComplete;
use crate::builtin;
use crate::command::{Arg, Command};
use crate::env::Environment;
use crate::error::{ConsoleError, ParseError};
use crate::history::{CommandHistory, DEFAULT_CAPACITY};
use crate::item::{Item, ItemType};
use crate::lexer::InputBuffer;
use crate::parser::{ArgValue, Value};
use crate::script::Script;
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::rc::Rc;

const HELP: &str = "help";
const SET: &str = "set";
const GET: &str = "get";
const RUN: &str = "run";

const ERROR_NO_VAR: &str = "No variable provided";
const ERROR_NOT_FOUND: &str = "Command doesn't exist and/or variable is not registered";

const HELP_USAGE: [&str; 4] = [
    "help [command_name:String] (Optional)\n\t\t- Display command(s) information\n",
    "set [variable_name:String] [data]\n\t\t- Assign data to given variable\n",
    "get [variable_name:String]\n\t\t- Display data of given variable\n",
    "run [script_name:String]\n\t\t- Run given script\n",
];

/// The `set` and `get` commands bound to one variable.
struct Variable {
    set: Command,
    get: Command,
}

/// Result of [`Interpreter::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The input line with its last word completed.
    pub line: String,
    /// Byte offset in `line` where the completed word starts.
    pub start: usize,
    /// Every candidate for the last word.
    pub suggestions: Vec<String>,
}

/// A console that runs typed commands from text lines.
///
/// Commands and variables are registered by name; each input line names one of
/// them and supplies its arguments. Output and errors go to the item log
/// instead of failing the call.
///
/// Example
/// ```
/// use console_commands::{Arg, Interpreter, Value};
///
/// let mut console = Interpreter::default();
/// console
///     .register_command(
///         "add",
///         "Add two numbers",
///         vec![Arg::of::<i32>("a"), Arg::of::<i32>("b")],
///         |values, env| {
///             let sum: i32 = values
///                 .into_iter()
///                 .filter_map(|v| if let Value::I32(n) = v { Some(n) } else { None })
///                 .sum();
///             env.print(sum.to_string());
///             Ok(())
///         },
///     )
///     .unwrap();
///
/// console.run_command("add 2 3");
/// assert_eq!(console.items().last().unwrap().data(), "5");
/// ```
pub struct Interpreter {
    env: Environment,
    commands: BTreeMap<String, Command>,
    variables: BTreeMap<String, Variable>,
    scripts: BTreeMap<String, Script>,
    cmd_tree: AutoComplete,
    var_tree: AutoComplete,
    /// Scripts currently being run, innermost last.
    running: Vec<String>,
}

impl Interpreter {
    /// Creates an interpreter that only knows `help`, `set`, `get` and `run`.
    pub fn new() -> Self {
        Self::with_history_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_history_capacity(capacity: usize) -> Self {
        let cmd_tree: AutoComplete = [HELP, SET, GET, RUN].into_iter().collect();
        Self {
            env: Environment::new(capacity),
            commands: BTreeMap::new(),
            variables: BTreeMap::new(),
            scripts: BTreeMap::new(),
            cmd_tree,
            var_tree: AutoComplete::new(),
            running: Vec::new(),
        }
    }

    /// Adds the builtin commands (`echo`, `clear`, `history`, `filter`, `exit`).
    pub fn with_builtins(mut self) -> Self {
        for command in builtin::all() {
            self.insert_command(command);
        }
        self
    }

    /// Registers a command under `name`.
    pub fn register_command<F>(
        &mut self,
        name: &str,
        description: &str,
        args: Vec<Arg>,
        callback: F,
    ) -> Result<(), ConsoleError>
    where
        F: FnMut(Vec<Value>, &mut Environment) -> Result<()> + 'static,
    {
        self.add_command(Command::new(name, description, args, callback))
    }

    /// Registers an already built command.
    pub fn add_command(&mut self, command: Command) -> Result<(), ConsoleError> {
        let name = command.name();
        check_name(name)?;
        if self.commands.contains_key(name) || [HELP, SET, GET, RUN].contains(&name) {
            return Err(ConsoleError::CommandExists(name.to_string()));
        }
        self.insert_command(command);
        Ok(())
    }

    fn insert_command(&mut self, command: Command) {
        let name = command.name().to_string();
        tracing::debug!(command = %name, args = command.argument_count(), "registered command");
        self.cmd_tree.insert(&name);
        // Lets `help <name>` complete.
        self.var_tree.insert(&name);
        self.commands.insert(name, command);
    }

    /// Registers `set <name> <value>` and `get <name>` for a shared value.
    ///
    /// The value is parsed as `T`, so `Rc<RefCell<Vec<i32>>>` takes `[1 2 3]`.
    pub fn register_variable<T>(&mut self, name: &str, var: Rc<RefCell<T>>) -> Result<(), ConsoleError>
    where
        T: ArgValue + 'static,
    {
        let target = Rc::clone(&var);
        let set = Command::new(name, "", vec![Arg::of::<T>(name)], move |values, _env| {
            let value = values
                .into_iter()
                .next()
                .and_then(T::from_value)
                .context("unexpected argument type")?;
            *target.borrow_mut() = value;
            Ok(())
        });
        let get = Command::new(name, "", Vec::new(), move |_, env| {
            env.print(var.borrow().to_value().to_string());
            Ok(())
        });
        self.insert_variable(name, Variable { set, get })
    }

    /// Registers a variable with a custom setter over any argument list.
    ///
    /// `get` prints the value through its `Display` impl.
    pub fn register_variable_with<T, F>(
        &mut self,
        name: &str,
        var: Rc<RefCell<T>>,
        args: Vec<Arg>,
        mut setter: F,
    ) -> Result<(), ConsoleError>
    where
        T: Display + 'static,
        F: FnMut(&mut T, Vec<Value>) -> Result<()> + 'static,
    {
        let target = Rc::clone(&var);
        let set = Command::new(name, "", args, move |values, _env| {
            setter(&mut *target.borrow_mut(), values)
        });
        let get = Command::new(name, "", Vec::new(), move |_, env| {
            env.print(var.borrow().to_string());
            Ok(())
        });
        self.insert_variable(name, Variable { set, get })
    }

    fn insert_variable(&mut self, name: &str, variable: Variable) -> Result<(), ConsoleError> {
        check_name(name)?;
        if self.variables.contains_key(name) {
            return Err(ConsoleError::VariableExists(name.to_string()));
        }
        tracing::debug!(variable = %name, "registered variable");
        self.var_tree.insert(name);
        self.variables.insert(name.to_string(), variable);
        Ok(())
    }

    pub fn register_script(&mut self, name: &str, script: Script) -> Result<(), ConsoleError> {
        check_name(name)?;
        if self.scripts.contains_key(name) {
            return Err(ConsoleError::ScriptExists(name.to_string()));
        }
        tracing::debug!(script = %name, "registered script");
        self.var_tree.insert(name);
        self.scripts.insert(name.to_string(), script);
        Ok(())
    }

    /// Returns true if a command was removed.
    pub fn unregister_command(&mut self, name: &str) -> bool {
        if self.commands.remove(name).is_none() {
            return false;
        }
        self.cmd_tree.remove(name);
        self.var_tree.remove(name);
        true
    }

    pub fn unregister_variable(&mut self, name: &str) -> bool {
        if self.variables.remove(name).is_none() {
            return false;
        }
        self.var_tree.remove(name);
        true
    }

    pub fn unregister_script(&mut self, name: &str) -> bool {
        if self.scripts.remove(name).is_none() {
            return false;
        }
        self.var_tree.remove(name);
        true
    }

    /// Runs one input line.
    ///
    /// Failures are reported as error items prefixed with the command name;
    /// nothing is returned to the caller.
    pub fn run_command(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.env.log.push(ItemType::Command, line);
        self.env.history.push_back(line);

        let input = InputBuffer::new(line);
        let mut cursor = 0;
        let range = input.next_poi(&mut cursor);
        let name = input.slice(range);
        tracing::trace!(command = %name, "dispatching");

        match name.as_str() {
            HELP => {
                let target = input.next_poi(&mut cursor);
                if target.is_end(&input) {
                    self.help();
                    return;
                }
                let target = input.slice(target);
                let extra = input.next_poi(&mut cursor);
                match self.commands.get(&target) {
                    Some(_) if !extra.is_end(&input) => self.env.error(format!(
                        "help {}: Too many arguments were given: '{}'",
                        target,
                        input.substr(extra.start, input.len()).trim_end()
                    )),
                    Some(command) => {
                        let text = command.help();
                        self.env.print(text);
                    }
                    None => self.env.error(ERROR_NOT_FOUND),
                }
            }
            SET | GET => {
                let var_range = input.next_poi(&mut cursor);
                if var_range.is_end(&input) {
                    self.env.error(ERROR_NO_VAR);
                    return;
                }
                let var_name = input.slice(var_range);
                let Some(variable) = self.variables.get_mut(&var_name) else {
                    self.env.error(ERROR_NOT_FOUND);
                    return;
                };
                let command = if name == SET {
                    &mut variable.set
                } else {
                    &mut variable.get
                };
                let rest = input.substr(var_range.end, input.len());
                if let Err(e) = command.call(&rest, &mut self.env) {
                    self.env.error(format!("{} {}: {}", name, var_name, e));
                }
            }
            RUN => {
                let rest = input.substr(range.end, input.len());
                match script_name(&rest) {
                    Ok(script) => self.run_script(&script),
                    Err(e) => self.env.error(format!("{}: {}", RUN, e)),
                }
            }
            _ => {
                let Some(command) = self.commands.get_mut(&name) else {
                    self.env.error(ERROR_NOT_FOUND);
                    return;
                };
                let rest = input.substr(range.end, input.len());
                if let Err(e) = command.call(&rest, &mut self.env) {
                    self.env.error(format!("{}: {}", name, e));
                }
            }
        }
    }

    /// Logs usage of `help`, `set`, `get` and `run`, then every command's help in name order.
    fn help(&mut self) {
        for usage in HELP_USAGE {
            self.env.print(usage);
        }
        let texts: Vec<String> = self.commands.values().map(Command::help).collect();
        for text in texts {
            self.env.print(text);
        }
    }

    /// Runs every line of the named script, loading it first if needed.
    ///
    /// A script that is already running, directly or through another script,
    /// is not started again.
    pub fn run_script(&mut self, name: &str) {
        let Some(script) = self.scripts.get_mut(name) else {
            self.env.error(format!("Script \"{}\" not found", name));
            return;
        };
        if self.running.iter().any(|running| running == name) {
            tracing::warn!(script = %name, "script calls itself");
            self.env.error(format!("Script \"{}\" is already running", name));
            return;
        }
        tracing::info!(script = %name, "running script");
        self.env.info(format!("Running \"{}\"", name));

        if !script.is_loaded() {
            if let Err(e) = script.load() {
                self.env.error(e.to_string());
            }
        }
        let lines = script.lines().to_vec();
        self.running.push(name.to_string());
        for line in lines {
            self.run_command(&line);
        }
        self.running.pop();
    }

    /// Completes the last word of `line`.
    ///
    /// A lone word is looked up among commands, any later word among
    /// variables, scripts and command names. A unique candidate replaces the
    /// word, otherwise it is extended as far as all candidates agree.
    ///
    /// Surrounding whitespace is trimmed first, so a trailing space still
    /// completes the word before it rather than starting a new one.
    pub fn complete(&self, line: &str) -> Completion {
        let trimmed = line.trim();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8());

        let (head, word, tree) = match start {
            Some(start) => (&trimmed[..start], &trimmed[start..], &self.var_tree),
            None => ("", trimmed, &self.cmd_tree),
        };
        if word.is_empty() {
            return Completion {
                line: line.to_string(),
                start: line.len(),
                suggestions: Vec::new(),
            };
        }

        let (partial, suggestions) = tree.complete(word);
        let word = match suggestions.as_slice() {
            [only] => only.clone(),
            _ => partial,
        };
        Completion {
            line: format!("{}{}", head, word),
            start: head.len(),
            suggestions,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn items(&self) -> &[Item] {
        self.env.log.items()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.env.history
    }

    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    pub fn cmd_autocomplete(&self) -> &AutoComplete {
        &self.cmd_tree
    }

    pub fn var_autocomplete(&self) -> &AutoComplete {
        &self.var_tree
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Registered command names in order.
    pub fn command_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.keys().map(String::as_str)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn script(&self, name: &str) -> Option<&Script> {
        self.scripts.get(name)
    }

    pub fn script_mut(&mut self, name: &str) -> Option<&mut Script> {
        self.scripts.get_mut(name)
    }
}

impl Default for Interpreter {
    /// An interpreter with the builtin commands installed.
    fn default() -> Self {
        Self::new().with_builtins()
    }
}

/// Reads the single `[script_name:String]` argument of `run`.
fn script_name(line: &str) -> Result<String, ParseError> {
    let mut input = InputBuffer::new(line);
    let mut cursor = 0;
    let value = Arg::of::<String>("script_name").parse(&mut input, &mut cursor)?;
    let rest = input.next_poi(&mut cursor);
    if !rest.is_end(&input) {
        return Err(ParseError::new(
            "Too many arguments were given",
            input.substr(rest.start, input.len()).trim_end(),
        ));
    }
    Ok(String::from_value(value).unwrap_or_default())
}

fn check_name(name: &str) -> Result<(), ConsoleError> {
    if name.trim().is_empty() {
        return Err(ConsoleError::EmptyName);
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ConsoleError::WhitespaceInName(name.to_string()));
    }
    Ok(())
}
