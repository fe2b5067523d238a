//! One subcommand per screen. Values are optional at this layer so the
//! screens report missing fields with their own messages.

use clap::{Arg, ArgAction, Command};

pub const ARG_USERNAME: &str = "username";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_NEW_PASSWORD: &str = "new-password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_OTP: &str = "otp";
pub const ARG_RESEND: &str = "resend";
pub const ARG_SEND_OTP: &str = "send-otp";
pub const ARG_PATH: &str = "path";

fn username() -> Arg {
    Arg::new(ARG_USERNAME)
        .short('u')
        .long("username")
        .help("Account username")
        .env("AUTHDESK_USERNAME")
}

fn email() -> Arg {
    Arg::new(ARG_EMAIL)
        .short('e')
        .long("email")
        .help("Account email address")
        .env("AUTHDESK_EMAIL")
}

fn secret(id: &'static str, help: &'static str, env: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .help(help)
        .env(env)
        .hide_env_values(true)
}

fn password() -> Arg {
    secret(ARG_PASSWORD, "Account password", "AUTHDESK_PASSWORD")
}

fn new_password() -> Arg {
    secret(ARG_NEW_PASSWORD, "New password", "AUTHDESK_NEW_PASSWORD")
}

fn confirm_password() -> Arg {
    secret(
        ARG_CONFIRM_PASSWORD,
        "Repeat the password",
        "AUTHDESK_CONFIRM_PASSWORD",
    )
}

fn otp() -> Arg {
    secret(ARG_OTP, "One-time password received by email", "AUTHDESK_OTP")
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session token")
                .arg(username())
                .arg(password()),
        )
        .subcommand(
            Command::new("register")
                .about("Create a new account")
                .arg(username())
                .arg(email())
                .arg(password())
                .arg(confirm_password()),
        )
        .subcommand(
            Command::new("forgot-password")
                .about("Request a one-time password by email")
                .arg(email()),
        )
        .subcommand(
            Command::new("reset-password")
                .about("Set a new password with a one-time password")
                .arg(email())
                .arg(otp())
                .arg(new_password())
                .arg(confirm_password())
                .arg(
                    Arg::new(ARG_RESEND)
                        .long("resend")
                        .help("Go back and request a new one-time password")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("change-password")
                .about("Change the password of the signed-in account")
                .arg(email())
                .arg(otp())
                .arg(new_password())
                .arg(confirm_password())
                .arg(
                    Arg::new(ARG_SEND_OTP)
                        .long("send-otp")
                        .help("Only send a one-time password to the email")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("dashboard").about("Show the signed-in account"))
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(
            Command::new("open")
                .about("Show which screen a path leads to")
                .arg(Arg::new(ARG_PATH).help("Path such as /reset-password?email=a%40b.io").required(true)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> Command {
        with_subcommands(Command::new("test"))
    }

    #[test]
    fn test_login_args() {
        temp_env::with_vars(
            [
                ("AUTHDESK_USERNAME", None::<&str>),
                ("AUTHDESK_PASSWORD", Some("s3cret")),
            ],
            || {
                let matches = command().get_matches_from(vec!["test", "login", "-u", "alice"]);
                let Some(("login", sub)) = matches.subcommand() else {
                    panic!("expected login");
                };
                assert_eq!(sub.get_one::<String>(ARG_USERNAME).cloned(), Some("alice".to_string()));
                assert_eq!(sub.get_one::<String>(ARG_PASSWORD).cloned(), Some("s3cret".to_string()));
            },
        );
    }

    #[test]
    fn test_change_password_send_otp() {
        temp_env::with_vars([("AUTHDESK_EMAIL", None::<&str>)], || {
            let matches = command().get_matches_from(vec![
                "test",
                "change-password",
                "--send-otp",
                "--email",
                "alice@example.com",
            ]);
            let Some(("change-password", sub)) = matches.subcommand() else {
                panic!("expected change-password");
            };
            assert!(sub.get_flag(ARG_SEND_OTP));
            assert_eq!(
                sub.get_one::<String>(ARG_EMAIL).cloned(),
                Some("alice@example.com".to_string())
            );
        });
    }

    #[test]
    fn test_open_requires_path() {
        assert!(command().try_get_matches_from(vec!["test", "open"]).is_err());
    }
}
