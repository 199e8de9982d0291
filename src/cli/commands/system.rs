use crate::cli::{
    core::{CommandError, CommandResult},
    output,
    registry::CommandEntry,
    shell_context::ShellContext,
};
use crate::storage::records::PROFILE_SCHEMA_VERSION;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.registry.get(&name.to_lowercase()) {
            Some(entry) => {
                output::section(entry.name);
                let access = if entry.requires_sign_in() {
                    "Signed-in merchants"
                } else {
                    "Anyone"
                };
                output::two_column(&[
                    ("Description", entry.description.to_string()),
                    ("Usage", entry.usage.to_string()),
                    ("Available to", access.to_string()),
                ]);
            }
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    output::section("Commands");
    let rows: Vec<(&str, String)> = context
        .registry
        .entries()
        .iter()
        .map(|entry| {
            let marker = if entry.requires_sign_in() { " *" } else { "" };
            (entry.usage, format!("{}{}", entry.description, marker))
        })
        .collect();
    output::two_column(&rows);
    output::info("* requires sign-in");
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Merchant Core {}", meta.version));
    output::two_column(&[
        ("Profile schema", format!("v{}", PROFILE_SCHEMA_VERSION)),
        ("Build hash", format!("{} ({})", meta.git_hash, meta.git_status)),
        ("Built at", meta.timestamp.to_string()),
        ("Target", meta.target.to_string()),
        ("Profile", meta.profile.to_string()),
        ("Rustc", meta.rustc.to_string()),
    ]);
    #[cfg(feature = "ffi")]
    output::info(format!("FFI version {}", crate::ffi::FFI_VERSION));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
