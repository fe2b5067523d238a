use crate::cli::{
    actions::{auth, session, Action},
    globals::GlobalArgs,
};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Login(input) => auth::login(globals, input).await,
        Action::Register(input) => auth::register(globals, input).await,
        Action::ForgotPassword(input) => auth::forgot_password(globals, input).await,
        Action::ResetPassword(args) => auth::reset_password(globals, args).await,
        Action::ChangePassword(args) => auth::change_password(globals, args).await,
        Action::Dashboard => session::dashboard(globals).await,
        Action::Logout => session::logout(globals),
        Action::Open { path } => session::open(&path),
    }
}
