//! Shared domain types and pure client logic for the curbside pickup
//! signup. Everything here is DOM-free and synchronous so the pricing,
//! calendar, and verification behavior can be tested with plain
//! `cargo test`; the frontend crate only reads and writes these types.

pub mod api_types;
pub mod calendar;
pub mod config;
pub mod model;
pub mod pricing;
pub mod schedule;
pub mod verification;

pub use api_types::{
    AddressCheck, CheckoutApiError, CheckoutItem, CheckoutRequest, CheckoutResponse,
    DueReminder, DueRemindersResponse, NotificationRecipient, NotificationRequest,
    NotificationResponse, NotificationTemplate, Profile, ProfileUpsertRequest,
    ReminderLogRequest, ScheduleUpsertRequest, ServiceSchedule, Subscription,
    SubscriptionInsertRequest,
};
pub use calendar::{
    earliest_start_date, is_disabled, month_grid, month_name, CalendarDay, CalendarDayType,
    CalendarMonth, CalendarSelection, MINIMUM_LEAD_DAYS,
};
pub use config::SignupConfig;
pub use model::{Frequency, ServiceKind, ServiceSelection, Weekday};
pub use pricing::{compute_total, format_amount, LineItem, PricingBreakdown, BASE_FEE};
pub use schedule::{ScheduleForm, ScheduleValidationError, MAX_QUANTITY};
pub use verification::{
    code_from_entropy, CodeCheck, ContactInfo, ContactMethod, SignupSnapshot,
    VerificationPhase, VerificationSession, MAX_CODE_ATTEMPTS,
};
