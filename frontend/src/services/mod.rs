pub mod api;
pub mod checkout;
pub mod date_utils;
pub mod logging;
pub mod notify;
pub mod reminders;
pub mod storage;
