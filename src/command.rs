use crate::env::Environment;
use crate::error::ParseError;
use crate::lexer::InputBuffer;
use crate::parser::{ArgType, ArgValue, Value};
use anyhow::Result;
use std::fmt;

/// Function run with the parsed arguments of a command, in declaration order.
pub type Callback = Box<dyn FnMut(Vec<Value>, &mut Environment) -> Result<()>>;

/// A named, typed argument declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    name: String,
    ty: ArgType,
}

impl Arg {
    pub fn new(name: impl Into<String>, ty: ArgType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Declares an argument typed after a Rust type: `Arg::of::<Vec<f32>>("weights")`.
    pub fn of<T: ArgValue>(name: impl Into<String>) -> Self {
        Self::new(name, T::arg_type())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ArgType {
        &self.ty
    }

    /// Usage fragment shown in help text: ` [name:Type]`.
    pub fn info(&self) -> String {
        format!(" [{}:{}]", self.name, self.ty)
    }

    /// Parses this argument from `input` at `cursor`.
    ///
    /// Fails when nothing is left, except for vectors which then come out empty.
    pub fn parse(&self, input: &mut InputBuffer, cursor: &mut usize) -> Result<Value, ParseError> {
        if !matches!(self.ty, ArgType::Vector(_)) {
            let mut peek = *cursor;
            if input.next_poi(&mut peek).is_end(input) {
                return Err(ParseError::new(
                    "Not enough arguments were given",
                    input.to_string().trim(),
                ));
            }
        }
        self.ty.parse(input, cursor)
    }
}

/// A registered command: a name, a help text, its arguments and what to run.
pub struct Command {
    name: String,
    description: String,
    args: Vec<Arg>,
    callback: Callback,
}

impl Command {
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        args: Vec<Arg>,
        callback: F,
    ) -> Self
    where
        F: FnMut(Vec<Value>, &mut Environment) -> Result<()> + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            args,
            callback: Box::new(callback),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn argument_count(&self) -> usize {
        self.args.len()
    }

    /// Parses every declared argument from `line` and runs the callback.
    ///
    /// `line` holds only the arguments, not the command name. Any text left
    /// after the last argument is an error.
    pub fn call(&mut self, line: &str, env: &mut Environment) -> Result<()> {
        let mut input = InputBuffer::new(line);
        let mut cursor = 0;

        let mut values = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            values.push(arg.parse(&mut input, &mut cursor)?);
        }

        let rest = input.next_poi(&mut cursor);
        if !rest.is_end(&input) {
            return Err(ParseError::new(
                "Too many arguments were given",
                input.substr(rest.start, input.len()).trim_end(),
            )
            .into());
        }

        tracing::trace!(command = %self.name, args = values.len(), "calling");
        (self.callback)(values, env)
    }

    /// `name [arg:Type]...`, then the description on its own indented line.
    pub fn help(&self) -> String {
        let usage: String = self.args.iter().map(Arg::info).collect();
        format!("{}{}\n\t\t- {}\n\n", self.name, usage, self.description)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}
