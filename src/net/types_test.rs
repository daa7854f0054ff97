use super::*;

#[test]
fn register_request_serializes_expected_fields() {
    let body = RegisterRequest {
        phone: "9876543210".to_owned(),
        name: "User".to_owned(),
        latitude: 12.5,
        longitude: 0.0,
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "phone": "9876543210", "name": "User", "latitude": 12.5, "longitude": 0.0 })
    );
}

#[test]
fn send_response_missing_success_reads_false() {
    let resp: SendOtpResponse = serde_json::from_str(r#"{"message":"Too many requests"}"#).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.message.as_deref(), Some("Too many requests"));
}

#[test]
fn verify_response_reads_mongo_style_id() {
    let resp: VerifyOtpResponse = serde_json::from_str(
        r#"{"success":true,"user":{"_id":"u1","phone":"9876543210","name":"Asha"}}"#,
    )
    .unwrap();
    let user = resp.user.unwrap();
    assert_eq!(user.id(), Some("u1"));
    assert_eq!(user.name(), Some("Asha"));
}

#[test]
fn verify_response_prefers_id_over_object_id() {
    let user: RemoteUser = serde_json::from_str(r#"{"id":"a","_id":"b"}"#).unwrap();
    assert_eq!(user.id(), Some("a"));
    let user: RemoteUser = serde_json::from_str(r#"{"id":"","_id":"b"}"#).unwrap();
    assert_eq!(user.id(), Some("b"));
}

#[test]
fn numeric_ids_are_stringified() {
    let user: RemoteUser = serde_json::from_str(r#"{"id":42}"#).unwrap();
    assert_eq!(user.id(), Some("42"));
    assert!(serde_json::from_str::<RemoteUser>(r#"{"id":1.5}"#).is_err());
}

#[test]
fn token_prefers_user_token_then_top_level() {
    let resp: VerifyOtpResponse =
        serde_json::from_str(r#"{"success":true,"user":{"token":"inner"},"token":"outer"}"#).unwrap();
    assert_eq!(resp.token(), Some("inner"));

    let resp: VerifyOtpResponse = serde_json::from_str(r#"{"success":true,"user":{},"token":"outer"}"#).unwrap();
    assert_eq!(resp.token(), Some("outer"));

    let resp: VerifyOtpResponse = serde_json::from_str(r#"{"success":true,"token":""}"#).unwrap();
    assert_eq!(resp.token(), None);
}

#[test]
fn remote_user_reads_camel_case_flags() {
    let user: RemoteUser = serde_json::from_str(r#"{"isVerified":true,"role":"worker"}"#).unwrap();
    assert_eq!(user.is_verified, Some(true));
    assert_eq!(user.role.as_deref(), Some("worker"));
    assert_eq!(user.id(), None);
}
