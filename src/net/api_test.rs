use super::*;

#[test]
fn endpoints_join_base_url() {
    let gateway = HttpAuthGateway::new("https://api.example.com/v1/");
    assert_eq!(gateway.register_endpoint(), "https://api.example.com/v1/users/register");
    assert_eq!(gateway.verify_endpoint(), "https://api.example.com/v1/users/verify-otp");
    assert_eq!(gateway.resend_endpoint(), "https://api.example.com/v1/users/resend-otp");
    assert_eq!(gateway.user_endpoint("u123"), "https://api.example.com/v1/users/u123");
}

#[test]
fn request_failed_message_formats_status() {
    assert_eq!(request_failed_message("verify code", 502), "verify code failed: 502");
}

#[cfg(not(feature = "csr"))]
#[test]
fn native_gateway_reports_network_error() {
    let gateway = HttpAuthGateway::new("/api");
    let err = futures::executor::block_on(gateway.resend_otp(&ResendOtpRequest { phone: "9876543210".to_owned() }))
        .unwrap_err();
    assert!(matches!(err, AuthError::Network(_)));
}
