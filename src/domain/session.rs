use std::fmt;

/// Sign-in state of the merchant. Never persisted; every launch starts signed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    SignedOut,
    SignedIn,
}

impl SessionState {
    pub fn sign_in(self) -> Self {
        SessionState::SignedIn
    }

    pub fn sign_out(self) -> Self {
        SessionState::SignedOut
    }

    pub fn is_signed_in(self) -> bool {
        matches!(self, SessionState::SignedIn)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::SignedOut => "Signed out",
            SessionState::SignedIn => "Signed in",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_ignore_current_state() {
        let state = SessionState::default();
        assert!(!state.is_signed_in());
        assert!(state.sign_in().is_signed_in());
        assert!(state.sign_in().sign_in().is_signed_in());
        assert!(!state.sign_in().sign_out().is_signed_in());
        assert!(!state.sign_out().is_signed_in());
    }
}
