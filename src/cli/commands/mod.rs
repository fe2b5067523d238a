pub mod logging;
pub mod screens;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_FILE: &str = "session-file";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("authdesk")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the authentication API")
                .env("AUTHDESK_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long("session-file")
                .help("Where the session token is stored")
                .env("AUTHDESK_SESSION_FILE")
                .global(true),
        );

    let command = screens::with_subcommands(command);
    logging::with_args(command)
}
