use crate::Role;

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Admin.as_str(), "admin");
}

#[test]
fn test_role_from_str() {
    assert_eq!(Role::from_str("user").unwrap(), Role::User);
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert!(Role::from_str("superuser").is_err());
}

#[test]
fn test_role_default_is_user() {
    assert_eq!(Role::default(), Role::User);
    assert!(!Role::default().is_admin());
}

#[test]
fn test_role_serde_snake_case() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
}
