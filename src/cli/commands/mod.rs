pub mod payments;
pub mod profile;
pub mod system;

use crate::cli::{core::CommandError, registry::CommandRegistry};

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(profile::definitions())
        .chain(payments::definitions())
    {
        registry.register(entry);
    }
}

/// Joins every argument into one value, e.g. an unquoted multi-word name.
pub(crate) fn joined_arg(args: &[&str], usage: &str) -> Result<String, CommandError> {
    if args.is_empty() {
        return Err(usage_error(usage));
    }
    Ok(args.join(" "))
}

pub(crate) fn single_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, CommandError> {
    match args {
        [value] => Ok(*value),
        _ => Err(usage_error(usage)),
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage))
}
