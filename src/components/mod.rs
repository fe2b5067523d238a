//! Building blocks shared by the screens: alerts, avatar helpers, the form
//! state machine and the user menu.

pub mod alert;
pub mod avatar;
pub mod form;
pub mod user_menu;

pub use alert::{Alert, AlertKind};
pub use form::{FormError, FormEvent, FormState};
pub use user_menu::UserMenu;
