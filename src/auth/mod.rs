//! Login and registration forms.

mod form;

pub use form::{AuthField, AuthForm, AuthRequest, FormState, REQUIRED_FIELDS_MESSAGE};

use crate::api::AuthEndpoint;

/// Which flavor of auth form an instance is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Register => "Create account",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Self::Login => "Log in",
            Self::Register => "Register",
        }
    }

    pub fn endpoint(self) -> AuthEndpoint {
        match self {
            Self::Login => AuthEndpoint::Login,
            Self::Register => AuthEndpoint::Register,
        }
    }
}
