use gloo::storage::{SessionStorage, Storage};
use serde::{Deserialize, Serialize};
use shared::{AddressCheck, ProfileUpsertRequest, ScheduleForm, ScheduleUpsertRequest};

/// Short-lived hand-off cells between pages. Checkout navigates the
/// browser away, so anything needed afterwards must be parked here first.
const ADDRESS_CHECK_KEY: &str = "curbside.address_check";
const PENDING_PROFILE_KEY: &str = "curbside.pending_profile";
const PENDING_SCHEDULES_KEY: &str = "curbside.pending_schedules";
const FORM_STATE_KEY: &str = "curbside.form_state";

/// Signup form fields snapshotted before the checkout redirect and
/// restored when the user comes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestorableForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub schedule: ScheduleForm,
    /// YYYY-MM-DD.
    pub start_date: Option<String>,
}

pub fn save_address_check(check: &AddressCheck) {
    let _ = SessionStorage::set(ADDRESS_CHECK_KEY, check);
}

pub fn load_address_check() -> Option<AddressCheck> {
    SessionStorage::get(ADDRESS_CHECK_KEY).ok()
}

pub fn save_pending_profile(profile: &ProfileUpsertRequest) {
    let _ = SessionStorage::set(PENDING_PROFILE_KEY, profile);
}

pub fn load_pending_profile() -> Option<ProfileUpsertRequest> {
    SessionStorage::get(PENDING_PROFILE_KEY).ok()
}

pub fn save_pending_schedules(schedules: &[ScheduleUpsertRequest]) {
    let _ = SessionStorage::set(PENDING_SCHEDULES_KEY, schedules);
}

pub fn load_pending_schedules() -> Option<Vec<ScheduleUpsertRequest>> {
    SessionStorage::get(PENDING_SCHEDULES_KEY).ok()
}

pub fn save_form_state(form: &RestorableForm) {
    let _ = SessionStorage::set(FORM_STATE_KEY, form);
}

pub fn load_form_state() -> Option<RestorableForm> {
    SessionStorage::get(FORM_STATE_KEY).ok()
}

/// Drop everything checkout-related once the signup has been finalized.
pub fn clear_pending_signup() {
    SessionStorage::delete(PENDING_PROFILE_KEY);
    SessionStorage::delete(PENDING_SCHEDULES_KEY);
    SessionStorage::delete(FORM_STATE_KEY);
}
