//! End-to-end tests for the credential/session state machine.

use gatekey::store::UserField;

use super::helpers::{auth_with_user, test_auth};

#[test]
fn register_then_login_matrix() {
    let auth = auth_with_user("a@b.com", "pw1");

    assert!(auth.valid_login("a@b.com", "pw1").unwrap());
    assert!(!auth.valid_login("a@b.com", "wrong").unwrap());
    assert!(!auth.valid_login("unknown@x.com", "pw1").unwrap());
}

#[test]
fn registration_is_exactly_once_per_email() {
    let auth = test_auth();

    auth.register_user("a@b.com", "pw1").unwrap();
    let err = auth.register_user("a@b.com", "pw2").unwrap_err();
    assert!(err.is_conflict());

    // The original credential still works; the second attempt changed nothing.
    assert!(auth.valid_login("a@b.com", "pw1").unwrap());
    assert!(!auth.valid_login("a@b.com", "pw2").unwrap());
}

#[test]
fn full_session_lifecycle() {
    let auth = auth_with_user("a@b.com", "pw1");

    assert!(auth.valid_login("a@b.com", "pw1").unwrap());
    let session_id = auth.create_session("a@b.com").unwrap().unwrap();

    let user = auth.user_from_session_id(&session_id).unwrap().unwrap();
    assert_eq!(user.email, "a@b.com");

    auth.destroy_session(&user.id).unwrap();
    assert!(auth.user_from_session_id(&session_id).unwrap().is_none());

    // Teardown is idempotent.
    auth.destroy_session(&user.id).unwrap();
}

#[test]
fn session_creation_does_not_check_credentials() {
    // Session issuance and credential verification are deliberately decoupled;
    // composing them is the caller's responsibility.
    let auth = auth_with_user("a@b.com", "pw1");
    assert!(auth.create_session("a@b.com").unwrap().is_some());
}

#[test]
fn reset_flow_end_to_end() {
    let auth = auth_with_user("a@b.com", "pw1");

    let token = auth.reset_password_token("a@b.com").unwrap();
    auth.update_password(&token, "pw2").unwrap();

    // New password in force, old one rejected.
    assert!(auth.valid_login("a@b.com", "pw2").unwrap());
    assert!(!auth.valid_login("a@b.com", "pw1").unwrap());

    // Token was consumed with the update.
    let err = auth.update_password(&token, "pw3").unwrap_err();
    assert!(err.is_not_found());
    assert!(auth.valid_login("a@b.com", "pw2").unwrap());

    // The record no longer carries a pending token.
    let user = auth
        .store()
        .find_user_by(&[(UserField::Email, "a@b.com")])
        .unwrap();
    assert!(user.reset_token.is_none());
}

#[test]
fn reset_token_replaced_by_reissue() {
    let auth = auth_with_user("a@b.com", "pw1");

    let first = auth.reset_password_token("a@b.com").unwrap();
    let second = auth.reset_password_token("a@b.com").unwrap();
    assert_ne!(first, second);

    // Only the latest token is live.
    assert!(auth.update_password(&first, "pw2").is_err());
    auth.update_password(&second, "pw2").unwrap();
}

#[test]
fn unknown_email_and_wrong_password_look_identical() {
    let auth = auth_with_user("a@b.com", "pw1");

    // Both failures come back as the same Ok(false); nothing in the result
    // shape reveals whether the account exists.
    let unknown = auth.valid_login("ghost@x.com", "pw1").unwrap();
    let wrong = auth.valid_login("a@b.com", "not-it").unwrap();
    assert_eq!(unknown, wrong);
}

#[test]
fn sessions_are_per_user() {
    let auth = test_auth();
    auth.register_user("one@x.com", "pw1").unwrap();
    auth.register_user("two@x.com", "pw2").unwrap();

    let s1 = auth.create_session("one@x.com").unwrap().unwrap();
    let s2 = auth.create_session("two@x.com").unwrap().unwrap();
    assert_ne!(s1, s2);

    let u1 = auth.user_from_session_id(&s1).unwrap().unwrap();
    let u2 = auth.user_from_session_id(&s2).unwrap().unwrap();
    assert_eq!(u1.email, "one@x.com");
    assert_eq!(u2.email, "two@x.com");

    // Destroying one user's session leaves the other untouched.
    auth.destroy_session(&u1.id).unwrap();
    assert!(auth.user_from_session_id(&s1).unwrap().is_none());
    assert!(auth.user_from_session_id(&s2).unwrap().is_some());
}
