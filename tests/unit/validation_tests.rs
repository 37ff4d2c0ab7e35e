use credgate_backend_lib::validation::{
    detect_injection, validate_password, validate_username, ValidationError,
};
use serde_json::json;

#[test]
fn test_username_bounds() {
    assert_eq!(validate_username(&json!("ab")), Err(ValidationError::UsernameLength));
    assert!(validate_username(&json!("abc")).is_ok());
    assert!(validate_username(&json!("x".repeat(50))).is_ok());
    assert_eq!(
        validate_username(&json!("x".repeat(51))),
        Err(ValidationError::UsernameLength)
    );
}

#[test]
fn test_username_character_class() {
    for ok in ["alice", "ALICE_01", "a-b_c", "123"] {
        assert!(validate_username(&json!(ok)).is_ok(), "{ok}");
    }
    for bad in ["alice!", "al ice", "al.ice", "al@ice", "álice"] {
        assert_eq!(
            validate_username(&json!(bad)),
            Err(ValidationError::UsernameCharacters),
            "{bad}"
        );
    }
}

#[test]
fn test_password_rules() {
    assert!(validate_password(&json!("Passw0rd")).is_ok());
    assert_eq!(validate_password(&json!("Pa0")), Err(ValidationError::PasswordLength));
    assert_eq!(
        validate_password(&json!("passw0rd")),
        Err(ValidationError::PasswordComplexity)
    );
    assert_eq!(validate_password(&json!(null)), Err(ValidationError::PasswordType));
}

#[test]
fn test_injection_heuristic_over_blocks_punctuation() {
    // Legitimate passwords with these characters are rejected too.
    assert!(detect_injection("My#Passw0rd"));
    assert!(detect_injection("it's-Me1"));
    assert!(detect_injection("1 OR 1=1; DROP TABLE users"));
    assert!(detect_injection("delete"));
    assert!(!detect_injection("Deleted1"));
}
