use crate::{
    cli::{
        actions::{auth, Action},
        commands::{
            screens::{
                ARG_CONFIRM_PASSWORD, ARG_EMAIL, ARG_NEW_PASSWORD, ARG_OTP, ARG_PASSWORD,
                ARG_PATH, ARG_RESEND, ARG_SEND_OTP, ARG_USERNAME,
            },
            ARG_API_URL, ARG_SESSION_FILE,
        },
        globals::GlobalArgs,
    },
    routes::{
        change_password::ChangePasswordInput, forgot_password::ForgotPasswordInput,
        login::LoginInput, register::RegisterInput, reset_password::ResetPasswordInput,
    },
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::path::PathBuf;

fn string(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

fn secret(matches: &ArgMatches, id: &str) -> SecretString {
    SecretString::from(string(matches, id))
}

#[must_use]
pub fn globals(matches: &ArgMatches) -> GlobalArgs {
    GlobalArgs::new(
        matches.get_one::<String>(ARG_API_URL).cloned(),
        matches.get_one::<String>(ARG_SESSION_FILE).map(PathBuf::from),
    )
}

/// # Errors
/// Returns an error if no known subcommand was given.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let (name, sub_m) = matches.subcommand().context("missing subcommand")?;

    let action = match name {
        "login" => Action::Login(LoginInput {
            username: string(sub_m, ARG_USERNAME),
            password: secret(sub_m, ARG_PASSWORD),
        }),
        "register" => Action::Register(RegisterInput {
            username: string(sub_m, ARG_USERNAME),
            email: string(sub_m, ARG_EMAIL),
            password: secret(sub_m, ARG_PASSWORD),
            confirm_password: secret(sub_m, ARG_CONFIRM_PASSWORD),
        }),
        "forgot-password" => Action::ForgotPassword(ForgotPasswordInput {
            email: string(sub_m, ARG_EMAIL),
        }),
        "reset-password" => Action::ResetPassword(auth::ResetPasswordArgs {
            email: sub_m.get_one::<String>(ARG_EMAIL).cloned(),
            input: ResetPasswordInput {
                otp: secret(sub_m, ARG_OTP),
                new_password: secret(sub_m, ARG_NEW_PASSWORD),
                confirm_password: secret(sub_m, ARG_CONFIRM_PASSWORD),
            },
            resend: sub_m.get_flag(ARG_RESEND),
        }),
        "change-password" => Action::ChangePassword(auth::ChangePasswordArgs {
            email: sub_m.get_one::<String>(ARG_EMAIL).cloned(),
            input: ChangePasswordInput {
                email: String::new(),
                otp: secret(sub_m, ARG_OTP),
                new_password: secret(sub_m, ARG_NEW_PASSWORD),
                confirm_password: secret(sub_m, ARG_CONFIRM_PASSWORD),
            },
            send_otp: sub_m.get_flag(ARG_SEND_OTP),
        }),
        "dashboard" => Action::Dashboard,
        "logout" => Action::Logout,
        "open" => Action::Open {
            path: sub_m
                .get_one::<String>(ARG_PATH)
                .cloned()
                .context("missing required argument: <path>")?,
        },
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };

    Ok(action)
}
