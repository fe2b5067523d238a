//! Terminal rendering of screen outcomes. Results go to stdout; failures are
//! returned as errors so the binary prints them once.

use crate::{
    components::{Alert, AlertKind},
    routes::{dashboard::DashboardView, Route, Submission},
};
use anyhow::{anyhow, Error, Result};

/// Prints a non-destructive alert, or turns a destructive one into an error.
///
/// # Errors
/// Returns the alert text when it is destructive.
pub fn alert(alert: &Alert) -> Result<()> {
    match alert.kind {
        AlertKind::Default => {
            println!("{alert}");
            Ok(())
        }
        AlertKind::Destructive => Err(anyhow!("{alert}")),
    }
}

pub fn navigation(route: &Route) {
    println!("-> {} ({})", route.title(), route);
}

/// # Errors
/// Returns an error for invalid input and failed submissions.
pub fn submission(outcome: Submission) -> Result<()> {
    match outcome {
        Submission::Invalid(errors) => Err(Error::new(errors).context("invalid input")),
        Submission::Failed(failure) => alert(&failure),
        Submission::Completed(success) => alert(&success),
        Submission::Navigated { route, alert: note } => {
            if let Some(note) = note {
                alert(&note)?;
            }
            navigation(&route);
            Ok(())
        }
    }
}

/// Prints a redirect; a destructive alert makes it an error.
///
/// # Errors
/// Returns the alert text and destination when the redirect carries an error.
pub fn redirect(route: &Route, note: Option<&Alert>) -> Result<()> {
    if let Some(note) = note {
        alert(note).map_err(|err| err.context(format!("redirected to {route}")))?;
    }
    navigation(route);
    Ok(())
}

pub fn dashboard(view: &DashboardView) {
    println!("[{}] {}", view.initials, view.username);
    if let Some(email) = &view.email {
        println!("email:  {email}");
    }
    println!("avatar: {}", view.avatar_color);
    println!("source: {:?}", view.source);
}
