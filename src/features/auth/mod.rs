//! Auth feature module covering login, registration, OTP delivery, password
//! reset and the local session. It keeps authentication logic out of the
//! screens and must never log passwords, OTPs or token material.
//!
//! Flow Overview: Login posts credentials and stores the returned bearer token
//! with the username. Registration and password reset post their payloads and
//! ignore the success body. Forgot password sends an OTP and hands the email to
//! the reset screen through the route.

pub mod client;
pub mod state;
pub mod token;
pub mod types;
pub mod validation;
