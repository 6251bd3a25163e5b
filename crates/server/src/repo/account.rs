use shared_types::{AppError, ChangePasswordRequest, MessageResponse, UpdateProfileRequest, User};

use super::{find, find_mut};
use crate::db::SharedStore;
use crate::error_convert::ValidateRequest;

/// Fetch a user by id.
pub async fn find_user(store: &SharedStore, id: &str) -> Result<User, AppError> {
    let store = store.read().await;
    find(&store.users, id).cloned()
}

/// Merge profile edits into the user record. Omitted optional fields keep
/// their current value.
pub async fn update_profile(
    store: &SharedStore,
    user_id: &str,
    req: UpdateProfileRequest,
) -> Result<User, AppError> {
    req.validate_request()?;
    if req.name.trim().is_empty() {
        return Err(AppError::field("name", "Name is required"));
    }
    let mut store = store.write().await;
    let user = find_mut(&mut store.users, user_id)?;
    user.name = req.name.trim().to_string();
    if let Some(contact) = req.contact {
        user.contact = Some(contact.trim().to_string()).filter(|c| !c.is_empty());
    }
    if let Some(avatar) = req.avatar.filter(|a| !a.trim().is_empty()) {
        user.avatar = avatar;
    }
    tracing::info!(user = %user.id, "Profile updated");
    Ok(user.clone())
}

/// Check a password change. Credentials are fixed, so nothing is stored.
pub fn change_password(req: &ChangePasswordRequest) -> Result<MessageResponse, AppError> {
    req.check()?;
    Ok(MessageResponse::new("Password changed successfully!"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::test_support::store;
    use shared_types::AppErrorKind;

    #[tokio::test]
    async fn profile_update_merges_fields() {
        let store = store();
        let user = update_profile(
            &store,
            "user-5",
            UpdateProfileRequest {
                name: "Johnathan Doe".into(),
                contact: None,
                avatar: Some("https://i.pravatar.cc/150?u=john".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(user.name, "Johnathan Doe");
        assert_eq!(user.contact.as_deref(), Some("9876543214"));
        assert_eq!(user.avatar, "https://i.pravatar.cc/150?u=john");
    }

    #[tokio::test]
    async fn blank_name_leaves_user_untouched() {
        let store = store();
        let err = update_profile(
            &store,
            "user-5",
            UpdateProfileRequest {
                name: "  ".into(),
                contact: Some("1".into()),
                avatar: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(find_user(&store, "user-5").await.unwrap().name, "John Doe");
    }

    #[test]
    fn mismatched_passwords_rejected() {
        let err = change_password(&ChangePasswordRequest {
            current_password: "resident123".into(),
            new_password: "abcdef".into(),
            confirm_password: "abcdeg".into(),
        })
        .unwrap_err();
        assert_eq!(err.message, "New passwords do not match.");
    }
}
