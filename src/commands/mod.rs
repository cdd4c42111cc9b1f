//! Command implementations for templatify.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command builds a [`TemplateRegistry`] first, which
//! is where definition errors surface.

use crate::cli::{CheckArgs, Command, RenderArgs, ShowArgs};
use templatify::{Arguments, Result, TemplateRegistry, Value};

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Check(args) => cmd_check(args),
        Command::Show(args) => cmd_show(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_check(args: CheckArgs) -> Result<()> {
    let registry = TemplateRegistry::load(&args.file)?;
    for function in registry.iter() {
        println!("{}", function);
    }
    println!(
        "{}: {} template function{} OK",
        args.file.display(),
        registry.len(),
        if registry.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

fn cmd_show(args: ShowArgs) -> Result<()> {
    let registry = TemplateRegistry::load(&args.file)?;
    let function = registry.require(&args.function)?;

    println!("{}", function);
    let variables: Vec<&str> = function
        .template()
        .free_variables()
        .iter()
        .map(String::as_str)
        .collect();
    println!("variables: {}", variables.join(", "));
    println!();
    println!("{}", function.doc());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let registry = TemplateRegistry::load(&args.file)?;
    let output = registry.call(&args.function, build_arguments(&args.values, &args.keywords))?;
    println!("{}", output);
    Ok(())
}

/// Convert raw command-line values into call arguments.
fn build_arguments(values: &[String], keywords: &[(String, String)]) -> Arguments {
    let mut args = values
        .iter()
        .fold(Arguments::new(), |args, raw| args.arg(parse_value(raw)));
    for (name, raw) in keywords {
        args = args.kwarg(name.clone(), parse_value(raw));
    }
    args
}

/// JSON when it parses, otherwise the raw string.
fn parse_value(raw: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::from_serialize(&json),
        Err(_) => Value::from(raw),
    }
}
