use super::*;

#[test]
fn destination_defaults_to_post_auth_path() {
    let config = ClientConfig::default();
    assert_eq!(destination(None, &config), "/role-select");
}

#[test]
fn destination_honors_safe_next_only() {
    let config = ClientConfig::default();
    assert_eq!(destination(Some("/worker"), &config), "/worker");
    assert_eq!(destination(Some("//evil.example"), &config), "/role-select");
    assert_eq!(destination(Some("https://evil.example"), &config), "/role-select");
}

#[test]
fn resend_label_shows_remaining_seconds() {
    assert_eq!(resend_label(42), "Resend OTP in 42s");
    assert_eq!(resend_label(0), "Resend OTP");
}

#[test]
fn sent_message_masks_the_number() {
    let phone = PhoneNumber::parse("9876543210").unwrap();
    let message = sent_message(&phone);
    assert!(message.starts_with("OTP sent to "));
    assert!(!message.contains("9876543210"));
}

#[test]
fn phone_progress_counts_digits() {
    assert_eq!(phone_progress("98765"), "5/10 digits");
}

#[test]
fn verification_notice_requires_an_applied_outcome() {
    assert_eq!(verification_notice(None), None);
    assert_eq!(verification_notice(Some(Ok(()))), Some(Notice::info("Login successful")));
    assert_eq!(
        verification_notice(Some(Err(AuthError::Timeout))).map(|n| n.kind),
        Some(NoticeKind::Error)
    );
    assert_eq!(verification_notice(Some(Err(AuthError::Cancelled))), None);
}
