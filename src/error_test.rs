use super::*;

#[test]
fn http_error_message_includes_status() {
    let err = AdminError::Http { status: 404 };
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}

#[test]
fn network_errors_are_classified() {
    assert!(AdminError::Http { status: 500 }.is_network());
    assert!(AdminError::Transport("offline".into()).is_network());
    assert!(AdminError::Decode("eof".into()).is_network());
    assert!(!AdminError::Storage("quota".into()).is_network());
    assert!(!AdminError::MissingElement("#chart".into()).is_network());
}

#[test]
fn serde_errors_convert_to_decode() {
    let err: AdminError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
    assert!(matches!(err, AdminError::Decode(_)));
}
