use crate::cli::{
    commands::{joined_arg, usage_error},
    core::CommandResult,
    output,
    registry::CommandEntry,
    shell_context::ShellContext,
    validation::{validate_business_name, validate_email, validate_name},
};
use crate::domain::Profile;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("profile", "Show the merchant profile", "profile", cmd_profile),
        CommandEntry::new("set-name", "Change the merchant name", "set-name <name>", cmd_set_name),
        CommandEntry::new(
            "set-phone",
            "Change the contact phone number",
            "set-phone <number>",
            cmd_set_phone,
        ),
        CommandEntry::new(
            "set-business",
            "Change the business name",
            "set-business <name>",
            cmd_set_business,
        ),
        CommandEntry::new(
            "set-email",
            "Change the contact email",
            "set-email <email>",
            cmd_set_email,
        ),
        CommandEntry::new(
            "identify",
            "Apply the name and IC number from an identity card",
            "identify <name> <ic-number>",
            cmd_identify,
        ),
        CommandEntry::new("sign-in", "Sign the merchant in", "sign-in", cmd_sign_in),
        CommandEntry::new("sign-out", "Sign the merchant out", "sign-out", cmd_sign_out),
    ]
}

fn cmd_profile(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let profile = context.manager.profile();
    output::section("Profile");
    output::two_column(&[
        ("Name", profile.name.clone()),
        ("IC number", Profile::display_or_unset(&profile.ic_number).to_string()),
        ("Phone", Profile::display_or_unset(&profile.phone_number).to_string()),
        ("Business", Profile::display_or_unset(&profile.business_name).to_string()),
        ("Email", Profile::display_or_unset(&profile.email).to_string()),
        ("Session", context.manager.session().to_string()),
    ]);
    Ok(())
}

fn cmd_set_name(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = validate_name(&joined_arg(args, "set-name <name>")?)?;
    context.manager.update_name(name);
    output::success("Name updated.");
    Ok(())
}

fn cmd_set_phone(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let phone = joined_arg(args, "set-phone <number>")?;
    context.manager.update_phone(phone.trim());
    output::success("Phone number updated.");
    Ok(())
}

fn cmd_set_business(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let business = validate_business_name(&joined_arg(args, "set-business <name>")?)?;
    context.manager.update_business_name(business);
    output::success("Business name updated.");
    Ok(())
}

fn cmd_set_email(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let email = validate_email(&joined_arg(args, "set-email <email>")?)?;
    context.manager.update_email(email);
    output::success("Email updated.");
    Ok(())
}

fn cmd_identify(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, ic_number] = args else {
        return Err(usage_error("identify <name> <ic-number>"));
    };
    let name = validate_name(name)?;
    context.manager.update_from_identity(name, ic_number.trim());
    output::success("Identity applied to profile.");
    Ok(())
}

fn cmd_sign_in(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.manager.is_signed_in() {
        output::info("Already signed in.");
        return Ok(());
    }
    context.manager.sign_in();
    output::success(format!("Welcome, {}.", context.manager.profile().name));
    Ok(())
}

fn cmd_sign_out(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.manager.sign_out();
    output::success("Signed out.");
    Ok(())
}
