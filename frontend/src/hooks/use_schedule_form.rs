use shared::{compute_total, Frequency, PricingBreakdown, ScheduleForm, ServiceKind, Weekday};
use yew::prelude::*;

/// Current form data plus the breakdown derived from it. The breakdown is
/// recomputed synchronously on every mutation; there is no debouncing.
#[derive(Clone, PartialEq)]
pub struct ScheduleFormState {
    pub form: ScheduleForm,
    pub pricing: PricingBreakdown,
}

#[derive(Clone)]
pub struct ScheduleFormActions {
    pub toggle_service: Callback<(ServiceKind, bool)>,
    pub change_frequency: Callback<(ServiceKind, Frequency)>,
    pub set_pickup_weekday: Callback<(ServiceKind, Option<Weekday>)>,
    pub increment_quantity: Callback<ServiceKind>,
    pub decrement_quantity: Callback<ServiceKind>,
    /// Wholesale replacement, used when restoring a parked form.
    pub replace: Callback<ScheduleForm>,
}

pub struct UseScheduleFormResult {
    pub state: ScheduleFormState,
    pub actions: ScheduleFormActions,
}

/// Owns the `ScheduleForm` and exposes its transitions as callbacks. All
/// business rules live in `shared::schedule`; this hook only moves state
/// in and out of Yew.
#[hook]
pub fn use_schedule_form() -> UseScheduleFormResult {
    let form = use_state(ScheduleForm::new);

    let toggle_service = {
        let form = form.clone();
        Callback::from(move |(kind, enabled): (ServiceKind, bool)| {
            let mut next = (*form).clone();
            next.toggle_service(kind, enabled);
            form.set(next);
        })
    };

    let change_frequency = {
        let form = form.clone();
        Callback::from(move |(kind, frequency): (ServiceKind, Frequency)| {
            let mut next = (*form).clone();
            next.change_frequency(kind, frequency);
            form.set(next);
        })
    };

    let set_pickup_weekday = {
        let form = form.clone();
        Callback::from(move |(kind, weekday): (ServiceKind, Option<Weekday>)| {
            let mut next = (*form).clone();
            next.set_pickup_weekday(kind, weekday);
            form.set(next);
        })
    };

    let increment_quantity = {
        let form = form.clone();
        Callback::from(move |kind: ServiceKind| {
            let mut next = (*form).clone();
            next.increment_quantity(kind);
            form.set(next);
        })
    };

    let decrement_quantity = {
        let form = form.clone();
        Callback::from(move |kind: ServiceKind| {
            let mut next = (*form).clone();
            next.decrement_quantity(kind);
            form.set(next);
        })
    };

    let replace = {
        let form = form.clone();
        Callback::from(move |next: ScheduleForm| {
            form.set(next);
        })
    };

    let pricing = compute_total(&form.selections());

    UseScheduleFormResult {
        state: ScheduleFormState {
            form: (*form).clone(),
            pricing,
        },
        actions: ScheduleFormActions {
            toggle_service,
            change_frequency,
            set_pickup_weekday,
            increment_quantity,
            decrement_quantity,
            replace,
        },
    }
}
