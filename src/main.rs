use anyhow::{Result, anyhow};
use argh::FromArgs;
use console_commands::{Arg, Interpreter, Script, Value, repl};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use tracing_subscriber::filter::LevelFilter;

#[derive(FromArgs)]
/// Interactive console with typed commands, variables and scripts.
struct Options {
    #[argh(option, short = 's')]
    /// script file to run before the prompt; may be repeated.
    script: Vec<String>,

    #[argh(option, default = "100")]
    /// number of executed lines kept in history.
    history: usize,

    #[argh(option, default = "String::from(\"warn\")")]
    /// log level written to stderr: off, error, warn, info, debug or trace.
    log_level: String,

    #[argh(option, short = 'c')]
    /// command line to run instead of starting the prompt; may be repeated.
    command: Vec<String>,
}

fn main() -> Result<()> {
    let options: Options = argh::from_env();

    let level = options
        .log_level
        .parse::<LevelFilter>()
        .map_err(|_| anyhow!("invalid log level: {}", options.log_level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut console = Interpreter::with_history_capacity(options.history).with_builtins();
    register_demo(&mut console)?;

    for (i, path) in options.script.iter().enumerate() {
        let name = format!("startup{}", i + 1);
        console.register_script(&name, Script::from_path(path))?;
        console.run_script(&name);
    }

    if !options.command.is_empty() {
        for line in &options.command {
            console.run_command(line);
        }
        repl::print_items(&console, 0, &mut io::stdout())?;
        return Ok(());
    }

    repl::print_items(&console, 0, &mut io::stdout())?;
    repl::run(Rc::new(RefCell::new(console)))?;
    Ok(())
}

/// A few commands and variables to play with.
fn register_demo(console: &mut Interpreter) -> Result<()> {
    console.register_command(
        "add",
        "Add two integers",
        vec![Arg::of::<i64>("a"), Arg::of::<i64>("b")],
        |values, env| {
            let [Value::I64(a), Value::I64(b)] = values.as_slice() else {
                anyhow::bail!("expected two integers");
            };
            let sum = a.checked_add(*b).ok_or_else(|| anyhow!("sum overflows"))?;
            env.print(sum.to_string());
            Ok(())
        },
    )?;

    console.register_command(
        "sum",
        "Add up a list of numbers",
        vec![Arg::of::<Vec<f64>>("values")],
        |values, env| {
            let total: f64 = values
                .into_iter()
                .flat_map(|v| match v {
                    Value::Vector(items) => items,
                    _ => Vec::new(),
                })
                .filter_map(|v| if let Value::F64(n) = v { Some(n) } else { None })
                .sum();
            env.print(total.to_string());
            Ok(())
        },
    )?;

    console.register_variable("background_color", Rc::new(RefCell::new(vec![0i32, 0, 0, 255])))?;
    console.register_variable("player_name", Rc::new(RefCell::new(String::from("player"))))?;
    console.register_variable("volume", Rc::new(RefCell::new(0.5f32)))?;
    console.register_variable("god_mode", Rc::new(RefCell::new(false)))?;
    Ok(())
}
