use crate::{Role, User};

#[test]
fn test_new_user_defaults_to_user_role() {
    let user = User::new(
        "auth0|abc123".to_string(),
        "someone@example.com".to_string(),
        Some("Someone".to_string()),
    );

    assert_eq!(user.role, Role::User);
    assert_eq!(user.external_id, "auth0|abc123");
    assert_eq!(user.created_at, user.updated_at);
}

#[test]
fn test_new_user_generates_unique_ids() {
    let a = User::new("auth0|a".to_string(), "a@example.com".to_string(), None);
    let b = User::new("auth0|b".to_string(), "b@example.com".to_string(), None);

    assert_ne!(a.id, b.id);
}
