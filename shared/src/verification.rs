use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleForm;

/// Wrong entries allowed before the session resets and a fresh code must
/// be requested (see DESIGN.md).
pub const MAX_CODE_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    Email,
    Sms,
}

impl ContactMethod {
    pub fn label(&self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Sms => "text message",
        }
    }
}

/// Where the one-time code was sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub method: ContactMethod,
    pub value: String,
}

/// Everything the signup form held when the code was requested, replayed
/// on completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupSnapshot {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub schedule: ScheduleForm,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationPhase {
    Idle,
    AwaitingCode,
    Verified,
    Completed,
}

/// Outcome of a code entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    Accepted,
    Rejected { attempts_left: u32 },
    /// Attempt cap reached; the session dropped back to Idle.
    LockedOut,
}

/// One reminder-signup attempt: the dispatched code, the contact it went
/// to, and the form snapshot to replay on completion. Owned by the flow
/// that created it and reset explicitly, never a page-level singleton.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationSession {
    code: Option<String>,
    contact: Option<ContactInfo>,
    pending_form: Option<SignupSnapshot>,
    verified: bool,
    failed_attempts: u32,
    phase: VerificationPhase,
}

impl Default for VerificationSession {
    fn default() -> Self {
        VerificationSession::new()
    }
}

impl VerificationSession {
    pub fn new() -> VerificationSession {
        VerificationSession {
            code: None,
            contact: None,
            pending_form: None,
            verified: false,
            failed_attempts: 0,
            phase: VerificationPhase::Idle,
        }
    }

    pub fn phase(&self) -> VerificationPhase {
        self.phase
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn contact(&self) -> Option<&ContactInfo> {
        self.contact.as_ref()
    }

    pub fn pending_form(&self) -> Option<&SignupSnapshot> {
        self.pending_form.as_ref()
    }

    /// Enter AwaitingCode. Call only after the code was dispatched
    /// successfully; a failed send leaves the session in Idle.
    pub fn begin(&mut self, contact: ContactInfo, snapshot: SignupSnapshot, code: String) {
        self.code = Some(code);
        self.contact = Some(contact);
        self.pending_form = Some(snapshot);
        self.verified = false;
        self.failed_attempts = 0;
        self.phase = VerificationPhase::AwaitingCode;
    }

    /// Replace the code after a resend. The form snapshot and contact info
    /// are kept; the attempt counter starts over with the new code.
    pub fn resend(&mut self, code: String) {
        if self.phase == VerificationPhase::AwaitingCode {
            self.code = Some(code);
            self.failed_attempts = 0;
        }
    }

    /// Check an entered code against the stored one. Exact string match
    /// only; anything else counts as a failed attempt and leaves
    /// `verified` untouched.
    pub fn submit_code(&mut self, entered: &str) -> CodeCheck {
        let stored = match (&self.phase, &self.code) {
            (VerificationPhase::AwaitingCode, Some(code)) => code.clone(),
            _ => return CodeCheck::Rejected { attempts_left: 0 },
        };

        if entered == stored {
            self.verified = true;
            self.phase = VerificationPhase::Verified;
            return CodeCheck::Accepted;
        }

        self.failed_attempts += 1;
        if self.failed_attempts >= MAX_CODE_ATTEMPTS {
            self.reset();
            CodeCheck::LockedOut
        } else {
            CodeCheck::Rejected {
                attempts_left: MAX_CODE_ATTEMPTS - self.failed_attempts,
            }
        }
    }

    /// Completion succeeded: consume the session. The snapshot and code are
    /// cleared so nothing can be replayed.
    pub fn complete(&mut self) {
        self.code = None;
        self.contact = None;
        self.pending_form = None;
        self.verified = false;
        self.failed_attempts = 0;
        self.phase = VerificationPhase::Completed;
    }

    pub fn reset(&mut self) {
        *self = VerificationSession::new();
    }
}

/// Map a uniform [0, 1) sample to a 6-digit numeric code, preserving
/// leading zeros.
pub fn code_from_entropy(entropy: f64) -> String {
    let scaled = (entropy.clamp(0.0, 1.0) * 1_000_000.0) as u32 % 1_000_000;
    format!("{:06}", scaled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SignupSnapshot {
        SignupSnapshot {
            name: "Pat Jones".to_string(),
            email: "pat@example.com".to_string(),
            phone: "5555550100".to_string(),
            schedule: ScheduleForm::new(),
            start_date: None,
        }
    }

    fn contact() -> ContactInfo {
        ContactInfo {
            method: ContactMethod::Email,
            value: "pat@example.com".to_string(),
        }
    }

    #[test]
    fn test_code_from_entropy_pads_leading_zeros() {
        assert_eq!(code_from_entropy(0.0), "000000");
        assert_eq!(code_from_entropy(0.000042), "000042");
        assert_eq!(code_from_entropy(0.999999), "999999");
        assert_eq!(code_from_entropy(1.0), "000000");
        assert_eq!(code_from_entropy(0.5).len(), 6);
    }

    #[test]
    fn test_wrong_entries_then_correct_code() {
        let mut session = VerificationSession::new();
        session.begin(contact(), snapshot(), "123456".to_string());
        assert_eq!(session.phase(), VerificationPhase::AwaitingCode);

        assert_eq!(
            session.submit_code("000000"),
            CodeCheck::Rejected { attempts_left: 4 }
        );
        assert!(!session.is_verified());
        assert_eq!(
            session.submit_code("123457"),
            CodeCheck::Rejected { attempts_left: 3 }
        );
        assert!(!session.is_verified());

        assert_eq!(session.submit_code("123456"), CodeCheck::Accepted);
        assert!(session.is_verified());
        assert_eq!(session.phase(), VerificationPhase::Verified);
    }

    #[test]
    fn test_exact_string_match_only() {
        let mut session = VerificationSession::new();
        session.begin(contact(), snapshot(), "012345".to_string());
        // Numerically equal but not the same string.
        assert_ne!(session.submit_code("12345"), CodeCheck::Accepted);
        assert_eq!(session.submit_code("012345"), CodeCheck::Accepted);
    }

    #[test]
    fn test_lockout_resets_session() {
        let mut session = VerificationSession::new();
        session.begin(contact(), snapshot(), "123456".to_string());
        for _ in 0..MAX_CODE_ATTEMPTS - 1 {
            assert!(matches!(
                session.submit_code("999999"),
                CodeCheck::Rejected { .. }
            ));
        }
        assert_eq!(session.submit_code("999999"), CodeCheck::LockedOut);
        assert_eq!(session.phase(), VerificationPhase::Idle);
        // The old code is gone; even the right digits no longer work.
        assert_eq!(
            session.submit_code("123456"),
            CodeCheck::Rejected { attempts_left: 0 }
        );
    }

    #[test]
    fn test_resend_replaces_code_and_keeps_snapshot() {
        let mut session = VerificationSession::new();
        session.begin(contact(), snapshot(), "111111".to_string());
        session.submit_code("222222");
        session.resend("333333".to_string());

        assert_ne!(session.submit_code("111111"), CodeCheck::Accepted);
        assert_eq!(session.submit_code("333333"), CodeCheck::Accepted);
        assert_eq!(session.pending_form(), Some(&snapshot()));
        assert_eq!(session.contact(), Some(&contact()));
    }

    #[test]
    fn test_complete_consumes_session() {
        let mut session = VerificationSession::new();
        session.begin(contact(), snapshot(), "123456".to_string());
        session.submit_code("123456");
        session.complete();
        assert_eq!(session.phase(), VerificationPhase::Completed);
        assert_eq!(session.pending_form(), None);
        assert!(!session.is_verified());

        session.reset();
        assert_eq!(session.phase(), VerificationPhase::Idle);
    }

    #[test]
    fn test_code_entry_outside_awaiting_phase_is_rejected() {
        let mut session = VerificationSession::new();
        assert_eq!(
            session.submit_code("123456"),
            CodeCheck::Rejected { attempts_left: 0 }
        );
        assert!(!session.is_verified());
    }
}
