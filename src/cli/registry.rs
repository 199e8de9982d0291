use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Session state a command needs before its handler may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Anyone,
    SignedIn,
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub access: Access,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            access: Access::Anyone,
            handler,
        }
    }

    /// Marks the command as available only while the merchant is signed in.
    pub fn signed_in(mut self) -> Self {
        self.access = Access::SignedIn;
        self
    }

    pub fn requires_sign_in(&self) -> bool {
        self.access == Access::SignedIn
    }
}

/// Outcome of looking a command up for the current session.
pub enum Resolved<'a> {
    Run(CommandHandler),
    SignInRequired(&'a CommandEntry),
    Unknown,
}

/// Command table kept in registration order. Later entries with an existing
/// name replace the earlier one in place.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter_mut().find(|existing| existing.name == entry.name) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Finds `name` and checks its access rule against the session.
    pub fn resolve(&self, name: &str, signed_in: bool) -> Resolved<'_> {
        match self.get(name) {
            Some(entry) if entry.requires_sign_in() && !signed_in => {
                Resolved::SignInRequired(entry)
            }
            Some(entry) => Resolved::Run(entry.handler),
            None => Resolved::Unknown,
        }
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("summary", "Figures", "summary", noop));
        registry.register(
            CommandEntry::new("charge", "Take a payment", "charge <amount>", noop).signed_in(),
        );
        registry
    }

    #[test]
    fn gated_commands_resolve_only_when_signed_in() {
        let registry = registry();
        assert!(matches!(
            registry.resolve("charge", false),
            Resolved::SignInRequired(entry) if entry.name == "charge"
        ));
        assert!(matches!(registry.resolve("charge", true), Resolved::Run(_)));
        assert!(matches!(registry.resolve("summary", false), Resolved::Run(_)));
        assert!(matches!(registry.resolve("refund", true), Resolved::Unknown));
    }

    #[test]
    fn re_registering_keeps_position_and_replaces_entry() {
        let mut registry = registry();
        registry.register(CommandEntry::new("summary", "Dashboard", "summary", noop).signed_in());
        assert_eq!(registry.names().collect::<Vec<_>>(), ["summary", "charge"]);
        assert!(registry.entries()[0].requires_sign_in());
        assert_eq!(registry.entries()[0].description, "Dashboard");
    }
}
