//! Submission lifecycle shared by every form screen.
//!
//! ```text
//! Idle --Submit--> Submitting --Failed/Reset--> Idle
//!   \                  |
//!    \--Navigate--> NavigatedAway(route) <--Navigate--/
//! ```
//!
//! `NavigatedAway` is terminal: the screen has been left and accepts nothing
//! more.

use crate::routes::Route;
use thiserror::Error;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    NavigatedAway(Route),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// Valid input was accepted and a request is about to be sent.
    Submit,
    /// The request failed; the form stays editable.
    Failed,
    /// Back to an editable form, e.g. after a success that stays on the page.
    Reset,
    Navigate(Route),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the form was left for {0}")]
    Finished(Route),
    #[error("cannot apply {event:?} while {state:?}")]
    Invalid { state: FormState, event: FormEvent },
}

impl FormState {
    /// Applies `event` and returns the next state.
    ///
    /// # Errors
    /// Rejects a second `Submit` while one is in flight, any event after the
    /// form navigated away, and `Failed` without a pending submission.
    pub fn transition(self, event: FormEvent) -> Result<Self, FormError> {
        match (self, event) {
            (Self::NavigatedAway(route), _) => Err(FormError::Finished(route)),
            (Self::Idle, FormEvent::Submit) => Ok(Self::Submitting),
            (Self::Submitting, FormEvent::Submit) => Err(FormError::InFlight),
            (Self::Submitting, FormEvent::Failed) | (_, FormEvent::Reset) => Ok(Self::Idle),
            (_, FormEvent::Navigate(route)) => Ok(Self::NavigatedAway(route)),
            (state @ Self::Idle, event @ FormEvent::Failed) => {
                Err(FormError::Invalid { state, event })
            }
        }
    }

    /// In-place [`transition`](Self::transition); the state is unchanged on error.
    ///
    /// # Errors
    /// Same as [`transition`](Self::transition).
    pub fn apply(&mut self, event: FormEvent) -> Result<(), FormError> {
        *self = self.clone().transition(event)?;
        Ok(())
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Destination once the form has been left.
    #[must_use]
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::NavigatedAway(route) => Some(route),
            _ => None,
        }
    }
}
