use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::{
    cli::{
        commands,
        core::{CliError, CommandError},
        output::{self, OutputPreferences},
        payment::{FaceScanner, FixedScanner, RosterScanner},
        registry::CommandRegistry,
    },
    config::ConfigManager,
    core::AccountManager,
};

/// Recognize every scan as this customer instead of cycling the demo roster.
pub const SCAN_NAME_ENV: &str = "MERCHANT_CORE_SCAN_NAME";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: AccountManager,
    pub scanner: Box<dyn FaceScanner>,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config = ConfigManager::from_env()?.load()?;
        output::set_preferences(OutputPreferences {
            plain: !config.ui_color_enabled || mode == CliMode::Script,
            currency_symbol: output::currency_symbol(&config.currency),
        });
        let manager = AccountManager::open(&config)?;
        Ok(Self::with_manager(mode, manager, scanner_from_env()))
    }

    pub fn with_manager(
        mode: CliMode,
        manager: AccountManager,
        scanner: Box<dyn FaceScanner>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            manager,
            scanner,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        let marker = if self.manager.is_signed_in() { "" } else { " (signed out)" };
        format!("merchant [{}{}]> ", self.manager.profile().name, marker)
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    /// Asks for a yes/no answer. Script mode always answers yes.
    pub(crate) fn confirm(&self, question: &str) -> Result<bool, CommandError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(true)
            .interact()?)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        self.confirm("Exit shell?").map_err(CliError::from)
    }
}

fn scanner_from_env() -> Box<dyn FaceScanner> {
    match std::env::var(SCAN_NAME_ENV) {
        Ok(name) if !name.trim().is_empty() => Box::new(FixedScanner::new(name.trim())),
        _ => Box::new(RosterScanner::demo()),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::script_context;
    use super::*;

    #[test]
    fn prompt_reflects_profile_and_session() {
        let mut context = script_context(Box::new(RosterScanner::demo()));
        assert_eq!(context.prompt(), "merchant [User (signed out)]> ");
        context.manager.update_name("Aisha");
        context.manager.sign_in();
        assert_eq!(context.prompt(), "merchant [Aisha]> ");
    }

    #[test]
    fn script_mode_confirms_without_prompting() {
        let context = script_context(Box::new(RosterScanner::demo()));
        assert!(context.confirm("Proceed?").unwrap());
        assert!(!context.can_prompt());
    }
}
