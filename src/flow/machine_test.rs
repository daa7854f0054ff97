use super::*;

const COOLDOWN: u32 = 60;

fn flow_in_otp() -> OtpAuthFlow {
    let mut flow = OtpAuthFlow::new(COOLDOWN);
    flow.set_phone_input("9876543210");
    flow.begin_send().unwrap();
    flow.finish_send(Ok(())).unwrap();
    flow
}

fn type_code(flow: &mut OtpAuthFlow, code: &str) {
    for (i, c) in code.chars().enumerate() {
        flow.input_cell(i, &c.to_string());
    }
}

fn run_out_cooldown(flow: &mut OtpAuthFlow) {
    let epoch = flow.countdown_epoch();
    while flow.tick(epoch) {}
}

// =============================================================
// Phone
// =============================================================

#[test]
fn new_flow_starts_in_phone() {
    let flow = OtpAuthFlow::new(COOLDOWN);
    assert_eq!(flow.phase(), Phase::Phone);
    assert_eq!(flow.phone(), "");
    assert!(!flow.can_send());
}

#[test]
fn resume_prefills_stored_phone() {
    let flow = OtpAuthFlow::resume(COOLDOWN, Some("98765 43210"));
    assert_eq!(flow.phone(), "9876543210");
    assert!(flow.can_send());
}

#[test]
fn send_enabled_iff_ten_digits() {
    let mut flow = OtpAuthFlow::new(COOLDOWN);
    for (raw, enabled) in [("987654321", false), ("9876543210", true), ("98765432109", true), ("98-76", false)] {
        flow.set_phone_input(raw);
        assert!(flow.phone().len() <= 10);
        assert_eq!(flow.can_send(), enabled, "input {raw:?}");
    }
}

#[test]
fn voice_transcript_fills_phone() {
    let mut flow = OtpAuthFlow::new(COOLDOWN);
    flow.apply_phone_transcript("nine eight seven six five four three two one oh");
    assert_eq!(flow.phone(), "9876543210");
}

#[test]
fn begin_send_with_short_phone_is_validation_error() {
    let mut flow = OtpAuthFlow::new(COOLDOWN);
    flow.set_phone_input("12345");
    assert!(matches!(flow.begin_send(), Err(AuthError::Validation(_))));
    assert!(!flow.is_sending());
}

#[test]
fn duplicate_send_is_rejected_while_outstanding() {
    let mut flow = OtpAuthFlow::new(COOLDOWN);
    flow.set_phone_input("9876543210");
    flow.begin_send().unwrap();
    assert_eq!(flow.begin_send(), Err(AuthError::InFlight));
    assert!(!flow.can_send());
}

#[test]
fn phone_is_locked_while_sending() {
    let mut flow = OtpAuthFlow::new(COOLDOWN);
    flow.set_phone_input("9876543210");
    flow.begin_send().unwrap();
    flow.set_phone_input("1111111111");
    assert_eq!(flow.phone(), "9876543210");
}

#[test]
fn successful_send_enters_otp_with_full_cooldown() {
    let flow = flow_in_otp();
    assert_eq!(flow.phase(), Phase::Otp);
    assert_eq!(flow.cooldown_remaining(), 60);
    assert_eq!(flow.countdown_epoch(), 1);
    assert!(!flow.can_resend());
    assert!(!flow.is_sending());
}

#[test]
fn failed_send_stays_in_phone() {
    let mut flow = OtpAuthFlow::new(COOLDOWN);
    flow.set_phone_input("9876543210");
    flow.begin_send().unwrap();
    let err = flow.finish_send(Err(AuthError::ServerRejected("User blocked".to_owned())));
    assert_eq!(err, Err(AuthError::ServerRejected("User blocked".to_owned())));
    assert_eq!(flow.phase(), Phase::Phone);
    assert_eq!(flow.phone(), "9876543210");
    assert!(flow.can_send());
}

// =============================================================
// Otp
// =============================================================

#[test]
fn verify_enabled_iff_all_cells_filled() {
    let mut flow = flow_in_otp();
    for (i, c) in "48291".chars().enumerate() {
        flow.input_cell(i, &c.to_string());
        assert!(!flow.can_verify());
    }
    flow.input_cell(5, "3");
    assert!(flow.can_verify());
}

#[test]
fn begin_verify_with_partial_code_is_noop() {
    let mut flow = flow_in_otp();
    type_code(&mut flow, "4829");
    let before = flow.clone();
    assert!(matches!(flow.begin_verify(), Err(AuthError::Validation(_))));
    assert_eq!(flow, before);
}

#[test]
fn verify_guard_blocks_second_attempt() {
    let mut flow = flow_in_otp();
    type_code(&mut flow, "482913");
    let attempt = flow.begin_verify().unwrap();
    assert_eq!(attempt.code, "482913");
    assert_eq!(attempt.phone.as_str(), "9876543210");
    assert!(flow.is_verifying());
    assert_eq!(flow.begin_verify(), Err(AuthError::InFlight));
    assert!(!flow.can_verify());
}

#[test]
fn cells_are_locked_while_verifying() {
    let mut flow = flow_in_otp();
    type_code(&mut flow, "482913");
    flow.begin_verify().unwrap();
    assert_eq!(flow.input_cell(0, ""), None);
    assert_eq!(flow.cells().code().as_deref(), Some("482913"));
    assert!(!flow.back());
}

#[test]
fn failed_verify_keeps_phase_and_digits() {
    let mut flow = flow_in_otp();
    type_code(&mut flow, "482913");
    flow.begin_verify().unwrap();
    let result = flow.finish_verify(Err(AuthError::ServerRejected("Invalid OTP".to_owned())));
    assert!(result.is_err());
    assert_eq!(flow.phase(), Phase::Otp);
    assert!(!flow.is_verifying());
    assert_eq!(flow.cells().code().as_deref(), Some("482913"));
}

#[test]
fn network_failure_also_clears_verifying() {
    let mut flow = flow_in_otp();
    type_code(&mut flow, "482913");
    flow.begin_verify().unwrap();
    let _ = flow.finish_verify(Err(AuthError::Timeout));
    assert!(!flow.is_verifying());
    assert!(flow.can_verify());
}

#[test]
fn successful_verify_is_terminal() {
    let mut flow = flow_in_otp();
    type_code(&mut flow, "482913");
    flow.begin_verify().unwrap();
    flow.finish_verify(Ok(())).unwrap();
    assert_eq!(flow.phase(), Phase::Success);
    assert!(flow.is_complete());
    assert!(!flow.back());
    assert!(flow.begin_resend().is_err());
    assert!(flow.begin_send().is_err());
    assert!(!flow.tick(flow.countdown_epoch()));
    assert_eq!(flow.phase(), Phase::Success);
}

#[test]
fn voice_code_triggers_auto_verify_only_on_final_six_digits() {
    let mut flow = flow_in_otp();
    assert!(!flow.apply_code_transcript("four eight two", false));
    assert_eq!(flow.cells().filled(), 3);
    assert!(!flow.apply_code_transcript("four eight two nine one three", false));
    assert!(flow.cells().is_complete());
    assert!(flow.apply_code_transcript("four eight two nine one three", true));
    assert_eq!(flow.cells().code().as_deref(), Some("482913"));
}

#[test]
fn final_voice_result_with_five_digits_does_not_verify() {
    let mut flow = flow_in_otp();
    assert!(!flow.apply_code_transcript("4 8 2 9 1", true));
}

// =============================================================
// Cooldown and resend
// =============================================================

#[test]
fn resend_blocked_until_cooldown_reaches_zero() {
    let mut flow = flow_in_otp();
    let epoch = flow.countdown_epoch();
    for _ in 0..59 {
        assert!(flow.tick(epoch));
        assert!(!flow.can_resend());
    }
    assert!(!flow.tick(epoch));
    assert_eq!(flow.cooldown_remaining(), 0);
    assert!(flow.can_resend());
}

#[test]
fn resend_at_ten_seconds_is_rejected_without_state_change() {
    let mut flow = flow_in_otp();
    let epoch = flow.countdown_epoch();
    for _ in 0..10 {
        flow.tick(epoch);
    }
    type_code(&mut flow, "12");
    let before = flow.clone();
    assert_eq!(flow.begin_resend(), Err(AuthError::CooldownActive { remaining: 50 }));
    assert_eq!(flow, before);
}

#[test]
fn resend_clears_cells_and_restarts_countdown() {
    let mut flow = flow_in_otp();
    run_out_cooldown(&mut flow);
    type_code(&mut flow, "123");
    let old_epoch = flow.countdown_epoch();

    let phone = flow.begin_resend().unwrap();
    assert_eq!(phone.as_str(), "9876543210");
    assert_eq!(flow.phase(), Phase::Otp);
    assert_eq!(flow.cells().filled(), 0);
    assert_eq!(flow.cooldown_remaining(), 60);
    assert!(!flow.can_resend());
    assert_eq!(flow.countdown_epoch(), old_epoch + 1);
}

#[test]
fn stale_ticker_is_ignored() {
    let mut flow = flow_in_otp();
    run_out_cooldown(&mut flow);
    let stale = flow.countdown_epoch();
    flow.begin_resend().unwrap();
    assert!(!flow.tick(stale));
    assert_eq!(flow.cooldown_remaining(), 60);
}

// =============================================================
// Back
// =============================================================

#[test]
fn back_returns_to_phone_keeping_number() {
    let mut flow = flow_in_otp();
    type_code(&mut flow, "482");
    let epoch = flow.countdown_epoch();
    assert!(flow.back());
    assert_eq!(flow.phase(), Phase::Phone);
    assert_eq!(flow.phone(), "9876543210");
    assert_eq!(flow.cells().filled(), 0);
    assert_eq!(flow.cooldown_remaining(), 0);
    assert!(!flow.tick(epoch));
    assert!(flow.can_send());
}

#[test]
fn back_from_phone_is_noop() {
    let mut flow = OtpAuthFlow::new(COOLDOWN);
    assert!(!flow.back());
    assert_eq!(flow.phase(), Phase::Phone);
}
