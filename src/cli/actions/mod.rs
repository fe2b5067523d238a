pub mod auth;
pub mod render;
pub mod session;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

use crate::{
    cli::globals::GlobalArgs,
    routes::{forgot_password::ForgotPasswordInput, login::LoginInput, register::RegisterInput},
};

#[derive(Debug)]
pub enum Action {
    Login(LoginInput),
    Register(RegisterInput),
    ForgotPassword(ForgotPasswordInput),
    ResetPassword(auth::ResetPasswordArgs),
    ChangePassword(auth::ChangePasswordArgs),
    Dashboard,
    Logout,
    Open { path: String },
}

impl Action {
    // Convenience wrapper so call sites can do `action.execute(&globals).await`.
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
