//! Capability traits for the two blocking dialogs the portfolio flows
//! depend on. Production implementations live in the presentation
//! layer (a native or UI dialog); tests use scripted fakes returning
//! deterministic answers.

/// A synchronous yes/no question. `true` proceeds.
pub trait ConfirmationPort {
    fn confirm(&self, message: &str) -> bool;
}

/// A blocking acknowledgement shown to the user.
pub trait NotificationPort {
    fn notify(&self, message: &str);
}
