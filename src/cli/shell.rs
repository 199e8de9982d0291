use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::{
    core::{CliError, LoopControl},
    output,
    shell_context::{CliMode, ShellContext},
};

/// Set to run commands from stdin without prompts or colour.
pub const SCRIPT_ENV: &str = "MERCHANT_CORE_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, "shell started");

    match mode {
        CliMode::Interactive => {
            let mut source = EditorSource::new(&context)?;
            output::info("Type `help` to list commands.");
            drive(&mut context, &mut source)
        }
        CliMode::Script => drive(&mut context, &mut ScriptSource::new(io::stdin().lock())),
    }
}

enum Input {
    Line(String),
    Interrupted,
    Closed,
}

trait LineSource {
    fn next_line(&mut self, prompt: &str) -> Result<Input, CliError>;

    fn remember(&mut self, _line: &str) {}
}

/// Feeds lines to the context until the source closes or a command exits.
fn drive(context: &mut ShellContext, source: &mut dyn LineSource) -> Result<(), CliError> {
    while context.running {
        let line = match source.next_line(&context.prompt())? {
            Input::Line(line) => line,
            Input::Interrupted if context.confirm_exit()? => break,
            Input::Interrupted => continue,
            Input::Closed => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        source.remember(line);

        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

struct EditorSource {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl EditorSource {
    fn new(context: &ShellContext) -> Result<Self, CliError> {
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper::from_context(context)));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn next_line(&mut self, prompt: &str) -> Result<Input, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                Ok(Input::Closed)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn remember(&mut self, line: &str) {
        self.editor.add_history_entry(line).ok();
    }
}

struct ScriptSource<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> ScriptSource<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> LineSource for ScriptSource<R> {
    fn next_line(&mut self, _prompt: &str) -> Result<Input, CliError> {
        match self.lines.next() {
            Some(line) => Ok(Input::Line(line?)),
            None => Ok(Input::Closed),
        }
    }
}

/// Completes command words and hints at the remaining arguments.
struct CommandHelper {
    commands: Vec<(&'static str, &'static str)>,
}

impl CommandHelper {
    fn from_context(context: &ShellContext) -> Self {
        let mut commands: Vec<_> = context
            .registry
            .entries()
            .iter()
            .map(|entry| (entry.name, entry.usage))
            .collect();
        commands.sort_by_key(|(name, _)| *name);
        Self { commands }
    }

    fn candidates(&self, needle: &str) -> Vec<Pair> {
        let needle = needle.to_ascii_lowercase();
        self.commands
            .iter()
            .filter(|(name, _)| name.starts_with(&needle))
            .map(|(name, _)| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect()
    }

    /// The argument part of a command's usage, once its name is fully typed.
    fn usage_hint(&self, line: &str) -> Option<String> {
        let typed = line.trim_start();
        let (word, rest) = typed.split_once(' ').unwrap_or((typed, ""));
        if !rest.is_empty() {
            return None;
        }
        let (name, usage) = self
            .commands
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))?;
        let args = usage[name.len()..].trim_start();
        if args.is_empty() {
            return None;
        }
        let gap = if typed.ends_with(' ') { "" } else { " " };
        Some(format!("{}{}", gap, args))
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    /// Completes the command word only; arguments are free text.
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix.len() - prefix.trim_start().len();
        if prefix[start..].contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        Ok((start, self.candidates(&prefix[start..])))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.usage_hint(line)
    }
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::cli::{payment::FixedScanner, shell_context::test_support::script_context};

    fn helper() -> CommandHelper {
        CommandHelper {
            commands: vec![
                ("charge", "charge <amount>"),
                ("seed", "seed"),
                ("sign-in", "sign-in"),
                ("sign-out", "sign-out"),
                ("summary", "summary"),
            ],
        }
    }

    #[test]
    fn completion_offers_matching_command_words() {
        let names: Vec<_> = helper()
            .candidates("SI")
            .into_iter()
            .map(|pair| pair.replacement)
            .collect();
        assert_eq!(names, ["sign-in", "sign-out"]);
    }

    #[test]
    fn hint_shows_missing_arguments() {
        let helper = helper();
        assert_eq!(helper.usage_hint("charge").as_deref(), Some(" <amount>"));
        assert_eq!(helper.usage_hint("charge ").as_deref(), Some("<amount>"));
        assert_eq!(helper.usage_hint("charge 12"), None);
        assert_eq!(helper.usage_hint("seed"), None);
        assert_eq!(helper.usage_hint("cha"), None);
    }

    #[test]
    fn script_source_runs_lines_until_exit() {
        let mut context = script_context(Box::new(FixedScanner::new("John Smith")));
        let script = "sign-in\n\n   \ncharge 45.99\nbogus\nexit\nseed\n";
        drive(&mut context, &mut ScriptSource::new(Cursor::new(script))).unwrap();

        assert!(!context.running);
        assert!(context.manager.is_signed_in());
        assert_eq!(context.manager.transactions().len(), 1);
    }

    #[test]
    fn script_source_stops_at_end_of_input() {
        let mut context = script_context(Box::new(FixedScanner::new("John Smith")));
        drive(&mut context, &mut ScriptSource::new(Cursor::new("sign-in"))).unwrap();
        assert!(context.running);
        assert!(context.manager.is_signed_in());
    }
}
