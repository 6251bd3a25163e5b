pub mod cookies;
pub mod extractors;
pub mod jwt;
pub mod middleware;

use shared_types::{AppError, LoginRequest, Role, User};

use crate::db::Store;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

/// Demo password for each role's seed account.
pub fn mock_password(role: Role) -> &'static str {
    match role {
        Role::Admin => "admin123",
        Role::Secretary => "secretary123",
        Role::Treasurer => "treasurer123",
        Role::Security => "security123",
        Role::Resident => "resident123",
    }
}

/// Check a login against the role's seed account.
///
/// Both the password and the email must match the account seeded for the
/// selected role; the email comparison ignores case and surrounding spaces.
pub fn authenticate(store: &Store, req: &LoginRequest) -> Result<User, AppError> {
    if req.password != mock_password(req.role) {
        tracing::warn!(role = req.role.as_str(), "Login rejected: wrong password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }
    store
        .users
        .iter()
        .find(|u| u.role == req.role && u.email.eq_ignore_ascii_case(req.email.trim()))
        .cloned()
        .ok_or_else(|| {
            tracing::warn!(role = req.role.as_str(), "Login rejected: unknown account");
            AppError::unauthorized(INVALID_CREDENTIALS)
        })
}

/// Sign a session token for a freshly authenticated user.
pub fn issue_session(user: &User) -> Result<String, AppError> {
    jwt::create_session_token(user).map_err(|e| {
        tracing::error!(error = %e, user = %user.id, "Failed to sign session token");
        AppError::internal("Failed to create session")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared_types::{AppErrorKind, ALL_ROLES};

    fn store() -> Store {
        Store::seeded(NaiveDate::from_ymd_opt(2024, 8, 10).unwrap())
    }

    fn login(email: &str, password: &str, role: Role) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    #[test]
    fn every_seed_account_logs_in_with_its_role() {
        let store = store();
        for role in ALL_ROLES {
            let email = store.users.iter().find(|u| u.role == *role).unwrap().email.clone();
            let user = authenticate(&store, &login(&email, mock_password(*role), *role)).unwrap();
            assert_eq!(user.role, *role);
        }
    }

    #[test]
    fn wrong_password_rejected() {
        let err = authenticate(&store(), &login("admin@auraliva.com", "resident123", Role::Admin)).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
        assert_eq!(err.message, INVALID_CREDENTIALS);
    }

    #[test]
    fn email_of_another_role_rejected() {
        let err = authenticate(&store(), &login("admin@auraliva.com", "resident123", Role::Resident)).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
    }

    #[test]
    fn email_match_ignores_case() {
        let user = authenticate(&store(), &login(" John.Doe@AuraLiva.com ", "resident123", Role::Resident)).unwrap();
        assert_eq!(user.id, "user-5");
    }
}
