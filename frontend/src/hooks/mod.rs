pub mod use_schedule_form;
pub mod use_verification;
