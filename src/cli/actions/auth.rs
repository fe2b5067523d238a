use crate::{
    cli::{actions::render, globals::GlobalArgs},
    routes::{
        change_password::{ChangePasswordInput, ChangePasswordScreen},
        forgot_password::{ForgotPasswordInput, ForgotPasswordScreen},
        login::{LoginInput, LoginScreen},
        register::{RegisterInput, RegisterScreen},
        reset_password::{ResetPasswordInput, ResetPasswordScreen},
        Mounted,
    },
};
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub struct ResetPasswordArgs {
    pub email: Option<String>,
    pub input: ResetPasswordInput,
    pub resend: bool,
}

#[derive(Debug)]
pub struct ChangePasswordArgs {
    /// Falls back to the email in the session token.
    pub email: Option<String>,
    pub input: ChangePasswordInput,
    pub send_otp: bool,
}

/// # Errors
/// Returns an error if the login is rejected or the input is invalid.
pub async fn login(globals: &GlobalArgs, input: LoginInput) -> Result<()> {
    let mut screen = LoginScreen::new(globals.api_client()?);
    render::submission(screen.submit(&input).await?)
}

/// # Errors
/// Returns an error if registration is rejected or the input is invalid.
pub async fn register(globals: &GlobalArgs, input: RegisterInput) -> Result<()> {
    let mut screen = RegisterScreen::new(globals.api_client()?);
    render::submission(screen.submit(&input).await?)
}

/// # Errors
/// Returns an error if the OTP cannot be sent or the email is invalid.
pub async fn forgot_password(globals: &GlobalArgs, input: ForgotPasswordInput) -> Result<()> {
    let mut screen = ForgotPasswordScreen::new(globals.api_client()?);
    render::submission(screen.submit(&input).await?)
}

/// # Errors
/// Returns an error if no email was given, the reset is rejected or the input
/// is invalid.
pub async fn reset_password(globals: &GlobalArgs, args: ResetPasswordArgs) -> Result<()> {
    let mut screen = match ResetPasswordScreen::mount(globals.api_client()?, args.email) {
        Mounted::Ready(screen) => screen,
        Mounted::Redirect { route, alert } => return render::redirect(&route, alert.as_ref()),
    };

    if args.resend {
        let route = screen.resend()?;
        render::navigation(&route);
        return Ok(());
    }

    render::submission(screen.submit(&args.input).await?)
}

/// # Errors
/// Returns an error if the OTP cannot be sent, the change is rejected or the
/// input is invalid.
pub async fn change_password(globals: &GlobalArgs, args: ChangePasswordArgs) -> Result<()> {
    let mut screen = ChangePasswordScreen::new(globals.api_client()?);
    let email = args
        .email
        .unwrap_or_else(|| screen.values().email.clone());
    debug!("change password for {email}");

    if args.send_otp {
        return render::alert(&screen.send_otp(&email).await);
    }

    let input = ChangePasswordInput {
        email,
        ..args.input
    };
    render::submission(screen.submit(input).await?)
}
