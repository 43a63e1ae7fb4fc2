use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
};

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliMode, CommandError, LoopControl};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::errors::CliError;

/// Environment variable that switches the shell to reading commands from stdin.
pub const SCRIPT_ENV: &str = "SUBCYCLE_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = match std::env::var_os(SCRIPT_ENV) {
        Some(_) => CliMode::Script,
        None => CliMode::Interactive,
    };

    let mut context = ShellContext::new(mode)?;
    tracing::info!(?mode, "shell started");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::from_context(context)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output::info("Subcycle shell. Type `help` for commands.");

    while context.running {
        let line = match editor.readline(&context.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                output::info("Type `exit` or press Ctrl-D to leave.");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        editor.add_history_entry(line).ok();
        if step(context, line)? == LoopControl::Exit {
            break;
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for (index, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        tracing::debug!(line = index + 1, "script line");
        if !context.running || step(context, &line)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Runs one line, reporting command failures without leaving the loop.
fn step(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    match handle_line(context, line) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.to_string());
            return Ok(LoopControl::Continue);
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    // `#` starts a comment line in scripts.
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());

    let control = context.dispatch(&raw.to_lowercase(), raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Completion and usage hints for the command word.
struct CommandHelper {
    /// `(name, usage)` pairs sorted by name.
    commands: Vec<(&'static str, &'static str)>,
}

impl CommandHelper {
    fn from_context(context: &ShellContext) -> Self {
        let mut commands: Vec<_> = context
            .registry
            .list()
            .into_iter()
            .map(|entry| (entry.name, entry.usage))
            .collect();
        commands.sort_by_key(|(name, _)| *name);
        Self { commands }
    }

    fn usage_of(&self, name: &str) -> Option<&'static str> {
        self.commands
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, usage)| *usage)
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let trimmed = prefix.trim_start();
        // Arguments are free-form; only the command word completes.
        if trimmed.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let needle = trimmed.to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|(name, _)| name.starts_with(&needle))
            .map(|(name, usage)| Pair {
                display: (*usage).to_string(),
                replacement: (*name).to_string(),
            })
            .collect();
        Ok((prefix.len() - trimmed.len(), candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    /// After `name ` shows the expected arguments from the command's usage.
    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos != line.len() {
            return None;
        }
        let (name, rest) = line.trim_start().split_once(' ')?;
        if !rest.is_empty() {
            return None;
        }
        let usage = self.usage_of(name)?;
        let arguments = usage.split_once(' ')?.1;
        Some(arguments.to_string())
    }
}

impl Highlighter for CommandHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    shell_words::split(input).map_err(|err| ParseError(err.to_string()))
}

#[derive(Debug)]
pub(crate) struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not parse command line: {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use tempfile::tempdir;

    #[test]
    fn splits_quoted_arguments() {
        let tokens = parse_command_line(r#"load "my snapshots/subs.json""#).unwrap();
        assert_eq!(tokens, vec!["load", "my snapshots/subs.json"]);
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        let err = parse_command_line("load \"broken").unwrap_err();
        assert!(err.to_string().starts_with("Could not parse"));
    }

    #[test]
    fn comments_and_exit_control_the_loop() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut context = ShellContext::with_config_manager(CliMode::Script, manager).unwrap();

        assert_eq!(
            handle_line(&mut context, "# load later").unwrap(),
            LoopControl::Continue
        );
        assert!(context.last_command.is_none());
        assert_eq!(handle_line(&mut context, "EXIT").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }

    #[test]
    fn hints_show_arguments_of_known_commands() {
        let helper = CommandHelper {
            commands: vec![("payments", "payments <id> <start> <end>"), ("list", "list")],
        };
        assert_eq!(helper.usage_of("PAYMENTS"), Some("payments <id> <start> <end>"));
        assert_eq!(helper.usage_of("nope"), None);
    }
}
