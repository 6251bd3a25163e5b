use dioxus::prelude::*;
use shared_types::{Role, User};

/// Who is signed in. Filled by the route guard from the session cookie and
/// by the login form; cleared on logout or an expired session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<User>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_user: Signal::new(None),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.current_user.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user.read().as_ref().map(|u| u.role)
    }

    /// Name for greetings; empty while the session is loading.
    pub fn display_name(&self) -> String {
        self.current_user
            .read()
            .as_ref()
            .map(|u| u.name.clone())
            .unwrap_or_default()
    }

    pub fn set_user(&mut self, user: User) {
        tracing::debug!(user = %user.id, role = %user.role, "Session user set");
        self.current_user.set(Some(user));
    }

    pub fn clear_auth(&mut self) {
        self.current_user.set(None);
    }
}

pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Role of the signed-in user. Pages render inside the guard, so a missing
/// session only shows up for a frame during logout.
pub fn use_role() -> Role {
    use_auth().role().unwrap_or(Role::Resident)
}
