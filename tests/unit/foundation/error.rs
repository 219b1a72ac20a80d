use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AppError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(AppError::decode("x").to_string().contains("decode error:"));
    assert!(AppError::encode("x").to_string().contains("encode error:"));
    assert!(AppError::storage("x").to_string().contains("storage error:"));
    assert!(
        AppError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn unsupported_type_displays_user_message_only() {
    let err = AppError::unsupported_type();
    assert_eq!(err.to_string(), UNSUPPORTED_UPLOAD_MESSAGE);
    assert!(err.is_user_facing());
    assert!(!AppError::decode("x").is_user_facing());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AppError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert() {
    let err: AppError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, AppError::Serde(_)));
}
