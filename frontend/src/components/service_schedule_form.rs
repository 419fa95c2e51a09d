use shared::{
    Frequency, ScheduleForm, ScheduleValidationError, ServiceKind, Weekday, MAX_QUANTITY,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ServiceScheduleFormProps {
    pub form: ScheduleForm,
    pub errors: Vec<ScheduleValidationError>,
    /// Disables every field while a submission is in flight.
    pub disabled: bool,

    pub on_toggle: Callback<(ServiceKind, bool)>,
    pub on_frequency_change: Callback<(ServiceKind, Frequency)>,
    pub on_weekday_change: Callback<(ServiceKind, Option<Weekday>)>,
    pub on_increment: Callback<ServiceKind>,
    pub on_decrement: Callback<ServiceKind>,
}

/// One row per service stream: enable checkbox, frequency select, can
/// stepper, and pickup-day select. All state lives in the parent's
/// `ScheduleForm`; this component only renders it and forwards events.
#[function_component(ServiceScheduleForm)]
pub fn service_schedule_form(props: &ServiceScheduleFormProps) -> Html {
    let form_error = props
        .errors
        .iter()
        .find(|error| error.field().is_none())
        .map(|error| error.to_string());

    html! {
        <section class="service-schedule-section">
            <h2>{"Choose your services"}</h2>

            {if let Some(message) = form_error {
                html! { <div class="form-message error">{message}</div> }
            } else { html! {} }}

            {for ServiceKind::all().into_iter().map(|kind| {
                service_row(props, kind)
            })}
        </section>
    }
}

fn service_row(props: &ServiceScheduleFormProps, kind: ServiceKind) -> Html {
    let selection = props.form.get(kind).clone();
    let row_errors: Vec<String> = props
        .errors
        .iter()
        .filter(|error| error.field() == Some(kind))
        .map(|error| error.to_string())
        .collect();

    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_toggle.emit((kind, input.checked()));
        })
    };

    let on_frequency_change = {
        let on_frequency_change = props.on_frequency_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_frequency_change.emit((kind, Frequency::parse(&select.value())));
        })
    };

    let on_weekday_change = {
        let on_weekday_change = props.on_weekday_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_weekday_change.emit((kind, Weekday::parse(&select.value())));
        })
    };

    let on_increment = {
        let on_increment = props.on_increment.clone();
        Callback::from(move |_: MouseEvent| on_increment.emit(kind))
    };

    let on_decrement = {
        let on_decrement = props.on_decrement.clone();
        Callback::from(move |_: MouseEvent| on_decrement.emit(kind))
    };

    let fields_disabled = props.disabled || !selection.enabled;
    let checkbox_id = format!("service-{}", kind.key());

    html! {
        <div class={classes!("service-row", selection.enabled.then_some("active"))}>
            <div class="service-row-header">
                <input
                    type="checkbox"
                    id={checkbox_id.clone()}
                    checked={selection.enabled}
                    onchange={on_toggle}
                    disabled={props.disabled}
                />
                <label for={checkbox_id}>{kind.label()}</label>
            </div>

            <div class="service-row-fields">
                <div class="form-group">
                    <label>{"How often?"}</label>
                    <select onchange={on_frequency_change} disabled={fields_disabled}>
                        {for [
                            Frequency::Weekly,
                            Frequency::Biweekly,
                            Frequency::Monthly,
                            Frequency::None,
                        ].iter().map(|frequency| {
                            html! {
                                <option
                                    value={frequency.key()}
                                    selected={selection.frequency == *frequency}
                                >
                                    {frequency.label()}
                                </option>
                            }
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label>{"How many cans?"}</label>
                    <div class="quantity-stepper">
                        <button
                            type="button"
                            class="stepper-button"
                            onclick={on_decrement}
                            disabled={fields_disabled}
                        >
                            {"−"}
                        </button>
                        <span class="quantity-value">{selection.quantity}</span>
                        <button
                            type="button"
                            class="stepper-button"
                            onclick={on_increment}
                            disabled={fields_disabled || selection.quantity >= MAX_QUANTITY}
                        >
                            {"+"}
                        </button>
                    </div>
                </div>

                <div class="form-group">
                    <label>{"Pickup day"}</label>
                    <select onchange={on_weekday_change} disabled={fields_disabled}>
                        <option value="" selected={selection.pickup_weekday.is_none()}>
                            {"Choose a day"}
                        </option>
                        {for Weekday::all().iter().map(|weekday| {
                            html! {
                                <option
                                    value={weekday.name().to_lowercase()}
                                    selected={selection.pickup_weekday == Some(*weekday)}
                                >
                                    {weekday.name()}
                                </option>
                            }
                        })}
                    </select>
                </div>
            </div>

            {for row_errors.iter().map(|message| {
                html! { <div class="form-message error field-error">{message}</div> }
            })}
        </div>
    }
}
