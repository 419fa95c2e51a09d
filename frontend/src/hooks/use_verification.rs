use shared::{
    code_from_entropy, CodeCheck, ContactInfo, ProfileUpsertRequest, ScheduleUpsertRequest,
    SignupSnapshot, VerificationPhase, VerificationSession,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::format_date_for_api;
use crate::services::logging::Logger;
use crate::services::notify::NotificationClient;
use crate::services::storage;

#[derive(Clone, PartialEq)]
pub struct VerificationState {
    pub phase: VerificationPhase,
    /// An external call is in flight; the triggering control stays
    /// disabled until it settles.
    pub busy: bool,
    pub error: Option<String>,
    pub contact: Option<ContactInfo>,
}

#[derive(Clone)]
pub struct VerificationActions {
    /// Generate a code, dispatch it, and enter AwaitingCode on success.
    pub request_code: Callback<(ContactInfo, SignupSnapshot)>,
    /// Re-dispatch a fresh code to the same contact.
    pub resend_code: Callback<()>,
    /// Check an entered code; on success completion runs automatically.
    pub submit_code: Callback<String>,
    /// Re-run completion after a persistence failure left us Verified.
    pub retry_completion: Callback<()>,
    pub reset: Callback<()>,
}

pub struct UseVerificationResult {
    pub state: VerificationState,
    pub actions: VerificationActions,
}

/// Owns one `VerificationSession` and drives its transitions against the
/// notification and persistence APIs. The session is created here and
/// passed down by value, never stored globally, so two flows on one page
/// cannot collide.
#[hook]
pub fn use_verification(api: &ApiClient, notify: &NotificationClient) -> UseVerificationResult {
    let session = use_state(VerificationSession::new);
    let busy = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let request_code = {
        let session = session.clone();
        let busy = busy.clone();
        let error = error.clone();
        let notify = notify.clone();
        Callback::from(move |(contact, snapshot): (ContactInfo, SignupSnapshot)| {
            let session = session.clone();
            let busy = busy.clone();
            let error = error.clone();
            let notify = notify.clone();
            let code = code_from_entropy(js_sys::Math::random());

            busy.set(true);
            error.set(None);
            spawn_local(async move {
                match notify.send_verification_code(&contact, &code).await {
                    Ok(()) => {
                        let mut next = VerificationSession::new();
                        next.begin(contact, snapshot, code);
                        session.set(next);
                    }
                    Err(e) => {
                        Logger::warn_with_component(
                            "verification",
                            &format!("Code dispatch failed: {}", e),
                        );
                        error.set(Some(format!("We couldn't send your code: {}", e)));
                    }
                }
                busy.set(false);
            });
        })
    };

    let resend_code = {
        let session = session.clone();
        let busy = busy.clone();
        let error = error.clone();
        let notify = notify.clone();
        Callback::from(move |_: ()| {
            let contact = match session.contact() {
                Some(contact) => contact.clone(),
                None => return,
            };
            let session = session.clone();
            let busy = busy.clone();
            let error = error.clone();
            let notify = notify.clone();
            let code = code_from_entropy(js_sys::Math::random());

            busy.set(true);
            error.set(None);
            spawn_local(async move {
                match notify.send_verification_code(&contact, &code).await {
                    Ok(()) => {
                        let mut next = (*session).clone();
                        next.resend(code);
                        session.set(next);
                    }
                    Err(e) => {
                        error.set(Some(format!("We couldn't resend your code: {}", e)));
                    }
                }
                busy.set(false);
            });
        })
    };

    let submit_code = {
        let session = session.clone();
        let busy = busy.clone();
        let error = error.clone();
        let api = api.clone();
        let notify = notify.clone();
        Callback::from(move |entered: String| {
            let mut next = (*session).clone();
            match next.submit_code(entered.trim()) {
                CodeCheck::Accepted => {
                    error.set(None);
                    busy.set(true);
                    session.set(next.clone());
                    spawn_completion(
                        api.clone(),
                        notify.clone(),
                        session.clone(),
                        next,
                        busy.clone(),
                        error.clone(),
                    );
                }
                CodeCheck::Rejected { attempts_left } => {
                    session.set(next);
                    if attempts_left == 0 {
                        error.set(Some("Please request a new code first.".to_string()));
                    } else {
                        error.set(Some(format!(
                            "That code doesn't match — {} tries left.",
                            attempts_left
                        )));
                    }
                }
                CodeCheck::LockedOut => {
                    session.set(next);
                    error.set(Some(
                        "Too many incorrect entries. Request a new code to continue."
                            .to_string(),
                    ));
                }
            }
        })
    };

    let retry_completion = {
        let session = session.clone();
        let busy = busy.clone();
        let error = error.clone();
        let api = api.clone();
        let notify = notify.clone();
        Callback::from(move |_: ()| {
            if session.phase() != VerificationPhase::Verified || *busy {
                return;
            }
            busy.set(true);
            error.set(None);
            spawn_completion(
                api.clone(),
                notify.clone(),
                session.clone(),
                (*session).clone(),
                busy.clone(),
                error.clone(),
            );
        })
    };

    let reset = {
        let session = session.clone();
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            session.set(VerificationSession::new());
            busy.set(false);
            error.set(None);
        })
    };

    UseVerificationResult {
        state: VerificationState {
            phase: session.phase(),
            busy: *busy,
            error: (*error).clone(),
            contact: session.contact().cloned(),
        },
        actions: VerificationActions {
            request_code,
            resend_code,
            submit_code,
            retry_completion,
            reset,
        },
    }
}

/// Verified → Completed: upsert the profile, upsert every fully-specified
/// enabled schedule, send a best-effort welcome, then consume the
/// session. Persistence failures leave the session Verified so the user
/// can retry without a new code.
fn spawn_completion(
    api: ApiClient,
    notify: NotificationClient,
    session: UseStateHandle<VerificationSession>,
    verified: VerificationSession,
    busy: UseStateHandle<bool>,
    error: UseStateHandle<Option<String>>,
) {
    spawn_local(async move {
        let snapshot = match verified.pending_form() {
            Some(snapshot) => snapshot.clone(),
            None => {
                session.set(VerificationSession::new());
                busy.set(false);
                return;
            }
        };
        let contact = verified.contact().cloned();

        // Profiles upsert by email; without one there is nothing to key on.
        if snapshot.email.trim().is_empty() {
            error.set(Some(
                "Add your email address on the signup form, then try again.".to_string(),
            ));
            busy.set(false);
            return;
        }

        let profile_request = ProfileUpsertRequest {
            email: snapshot.email.clone(),
            name: snapshot.name.clone(),
            phone: snapshot.phone.clone(),
            street_address: storage::load_address_check().map(|check| check.street),
            reminder_method: contact.as_ref().map(|c| c.method),
        };
        if let Err(e) = api.upsert_profile(profile_request).await {
            error.set(Some(format!("We couldn't save your profile: {}", e)));
            busy.set(false);
            return;
        }

        for selection in snapshot.schedule.enabled_selections() {
            let weekday = match selection.pickup_weekday {
                Some(weekday) => weekday,
                None => continue,
            };
            if !selection.is_active() {
                continue;
            }
            let request = ScheduleUpsertRequest {
                profile_email: snapshot.email.clone(),
                service: selection.kind,
                frequency: selection.frequency,
                quantity: selection.quantity,
                pickup_weekday: weekday,
                start_date: snapshot.start_date.map(format_date_for_api),
            };
            if let Err(e) = api.upsert_service_schedule(request).await {
                error.set(Some(format!(
                    "We couldn't save your {} schedule: {}",
                    selection.kind.label().to_lowercase(),
                    e
                )));
                busy.set(false);
                return;
            }
        }

        if let Some(contact) = &contact {
            if let Err(e) = notify.send_welcome(contact, &snapshot.name).await {
                Logger::warn_with_component(
                    "verification",
                    &format!("Welcome send failed: {}", e),
                );
            }
        }

        let mut done = verified;
        done.complete();
        session.set(done);
        busy.set(false);
    });
}
