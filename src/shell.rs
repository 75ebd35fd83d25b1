//! Interactive shell shared by the `filmkassen` and `mitsmk` binaries.
//!
//! Each line is split with shlex and parsed by the app's clap subcommands.
//! A binary started with trailing arguments runs that one command instead.

use anyhow::Result;
use async_trait::async_trait;
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli_style;

pub enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

#[async_trait]
pub trait ShellApp: Send {
    type Cli: Parser + Send;

    fn name(&self) -> &'static str;

    /// Current route, shown in the prompt.
    fn location(&self) -> String;

    async fn execute(&mut self, cli: Self::Cli) -> CommandExecutionResult;

    /// Runs after every command, e.g. to react to session events.
    async fn after_command(&mut self) {}
}

/// Installs the fmt subscriber. `LOG_LEVEL` overrides the WARN default.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init();
}

pub fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// Parses one shell line. `Ok(None)` for a blank line.
pub fn parse_line<C: Parser>(line: &str) -> Result<Option<C>, clap::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let args =
        shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());
    C::try_parse_from(std::iter::once("").chain(args.iter().map(String::as_str))).map(Some)
}

/// Shows a spinner on stderr while `fut` runs. Hidden when stderr is not a
/// terminal.
pub async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.yellow} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let output = fut.await;
    spinner.finish_and_clear();
    output
}

async fn execute_line<A: ShellApp>(app: &mut A, line: &str) -> CommandExecutionResult {
    let result = match parse_line::<A::Cli>(line) {
        Ok(None) => return CommandExecutionResult::Ok,
        Ok(Some(cli)) => app.execute(cli).await,
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            CommandExecutionResult::Ok
        }
    };
    app.after_command().await;
    result
}

/// Runs a single command given on the binary's command line.
pub async fn run_once<A: ShellApp>(app: &mut A, args: &[String]) -> Result<()> {
    let line = shlex::try_join(args.iter().map(String::as_str))?;
    match execute_line(app, &line).await {
        CommandExecutionResult::Error(err) => anyhow::bail!(err),
        CommandExecutionResult::Ok | CommandExecutionResult::Exit => Ok(()),
    }
}

pub async fn run_interactive<A: ShellApp>(app: &mut A, welcome: &[(&str, String)]) -> Result<()> {
    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();
    let mut rl = Editor::<CommandHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(CommandHelper::new::<A::Cli>()));

    cli_style::print_welcome(app.name(), welcome);

    loop {
        let prompt = cli_style::get_prompt(app.name(), &app.location());
        let readline = tokio::task::block_in_place(|| rl.readline(&prompt));

        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_line(app, &line).await {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => {
                        cli_style::print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }
    cli_style::print_goodbye();
    Ok(())
}

#[derive(rustyline_derive::Hinter)]
struct CommandHelper {
    commands_names: Vec<String>,
}

impl CommandHelper {
    fn new<C: CommandFactory>() -> Self {
        let mut commands_names: Vec<String> = C::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();
        commands_names.push("help".to_string());
        CommandHelper { commands_names }
    }

    fn candidates(&self, line: &str) -> Vec<String> {
        if line.contains(' ') {
            return Vec::new();
        }
        self.commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect()
    }
}

impl Completer for CommandHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        Ok((0, self.candidates(line)))
    }
}

impl Highlighter for CommandHelper {}
impl Validator for CommandHelper {}
impl Helper for CommandHelper {}
