mod components;
mod hooks;
mod services;

use chrono::{Datelike, Duration, NaiveDate};
use shared::{
    compute_total, AddressCheck, ContactInfo, ProfileUpsertRequest, ScheduleForm,
    ScheduleUpsertRequest, SignupConfig, SignupSnapshot, SubscriptionInsertRequest, Weekday,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlInputElement};
use yew::prelude::*;

use components::address_lookup::AddressLookup;
use components::date_picker::DatePicker;
use components::header::Header;
use components::pricing_summary::PricingSummary;
use components::reminder_modal::ReminderModal;
use components::service_schedule_form::ServiceScheduleForm;
use hooks::use_schedule_form::use_schedule_form;
use hooks::use_verification::use_verification;
use services::api::ApiClient;
use services::checkout::{checkout_items, CheckoutClient};
use services::date_utils::{format_date_for_api, format_date_for_display, today};
use services::logging::Logger;
use services::notify::NotificationClient;
use services::reminders::dispatch_due_reminders;
use services::storage::{self, RestorableForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    AddressCheck,
    Signup,
    CheckoutComplete,
    ReminderDispatch,
}

/// Pick the landing page from the URL and any parked address check.
fn initial_page() -> Page {
    let search = window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    if search.contains("checkout=success") {
        return Page::CheckoutComplete;
    }
    if search.contains("reminders") {
        return Page::ReminderDispatch;
    }
    if storage::load_address_check().is_some() {
        return Page::Signup;
    }
    Page::AddressCheck
}

/// The calendar follows the trash pickup day when set, otherwise the
/// first enabled service that has one.
fn pickup_target(form: &ScheduleForm) -> Option<Weekday> {
    form.trash.pickup_weekday.or_else(|| {
        form.enabled_selections()
            .into_iter()
            .find_map(|selection| selection.pickup_weekday)
    })
}

fn pending_schedules(form: &ScheduleForm, email: &str, start_date: Option<NaiveDate>) -> Vec<ScheduleUpsertRequest> {
    form.enabled_selections()
        .into_iter()
        .filter(|selection| selection.is_active() && selection.pickup_weekday.is_some())
        .map(|selection| ScheduleUpsertRequest {
            profile_email: email.to_string(),
            service: selection.kind,
            frequency: selection.frequency,
            quantity: selection.quantity,
            pickup_weekday: selection.pickup_weekday.unwrap_or(Weekday::Monday),
            start_date: start_date.map(format_date_for_api),
        })
        .collect()
}

#[function_component(App)]
fn app() -> Html {
    let config = SignupConfig::default();
    let api = ApiClient::new(&config);
    let notify = NotificationClient::new(&config);
    let checkout = CheckoutClient::new(&config);

    let page = use_state(initial_page);
    let address = use_state(storage::load_address_check);

    // Signup form state.
    let schedule = use_schedule_form();
    let start_date = use_state(|| Option::<NaiveDate>::None);
    let name = use_state(String::new);
    let email = use_state(String::new);
    let phone = use_state(String::new);

    // Submission state.
    let submitting = use_state(|| false);
    let submit_error = use_state(|| Option::<String>::None);
    let validation_errors = use_state(Vec::new);

    // Reminder signup.
    let verification = use_verification(&api, &notify);
    let reminder_modal_open = use_state(|| false);

    // Restore a form parked before a checkout redirect (e.g. the user
    // cancelled and came back).
    {
        let replace = schedule.actions.replace.clone();
        let name = name.clone();
        let email = email.clone();
        let phone = phone.clone();
        use_effect_with((), move |_| {
            if let Some(saved) = storage::load_form_state() {
                name.set(saved.name);
                email.set(saved.email);
                phone.set(saved.phone);
                replace.emit(saved.schedule);
            }
            || ()
        });
    }

    let on_address_complete = {
        let address = address.clone();
        let page = page.clone();
        Callback::from(move |check: AddressCheck| {
            address.set(Some(check));
            page.set(Page::Signup);
        })
    };

    let on_date_change = {
        let start_date = start_date.clone();
        Callback::from(move |date: Option<NaiveDate>| {
            start_date.set(date);
        })
    };

    let on_name_change = {
        let name = name.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_phone_change = {
        let phone = phone.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            phone.set(input.value());
        })
    };

    // Checkout handoff: validate, park everything checkout needs in
    // session storage, then hand the browser to the payment provider.
    let on_checkout_submit = {
        let form = schedule.state.form.clone();
        let pricing = schedule.state.pricing.clone();
        let start_date = start_date.clone();
        let name = name.clone();
        let email = email.clone();
        let phone = phone.clone();
        let submitting = submitting.clone();
        let submit_error = submit_error.clone();
        let validation_errors = validation_errors.clone();
        let checkout = checkout.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let errors = form.validate_for_submit();
            if !errors.is_empty() {
                validation_errors.set(errors);
                return;
            }
            validation_errors.set(Vec::new());

            let email_value = (*email).trim().to_string();
            if (*name).trim().is_empty() {
                submit_error.set(Some("Please enter your name".to_string()));
                return;
            }
            if !email_value.contains('@') {
                submit_error.set(Some("Please enter a valid email address".to_string()));
                return;
            }
            submit_error.set(None);

            storage::save_form_state(&RestorableForm {
                name: (*name).clone(),
                email: email_value.clone(),
                phone: (*phone).clone(),
                schedule: form.clone(),
                start_date: (*start_date).map(format_date_for_api),
            });
            storage::save_pending_profile(&ProfileUpsertRequest {
                email: email_value.clone(),
                name: (*name).trim().to_string(),
                phone: (*phone).trim().to_string(),
                street_address: storage::load_address_check().map(|check| check.street),
                reminder_method: None,
            });
            storage::save_pending_schedules(&pending_schedules(&form, &email_value, *start_date));

            let items = checkout_items(&pricing);
            let checkout = checkout.clone();
            let submitting = submitting.clone();
            let submit_error = submit_error.clone();
            submitting.set(true);
            spawn_local(async move {
                // Only returns on failure; success navigates away.
                if let Err(message) = checkout.redirect_to_checkout(items, Some(email_value)).await {
                    submit_error.set(Some(message));
                    submitting.set(false);
                }
            });
        })
    };

    let open_reminder_modal = {
        let reminder_modal_open = reminder_modal_open.clone();
        Callback::from(move |_: MouseEvent| {
            reminder_modal_open.set(true);
        })
    };

    let close_reminder_modal = {
        let reminder_modal_open = reminder_modal_open.clone();
        let reset = verification.actions.reset.clone();
        Callback::from(move |_: ()| {
            reminder_modal_open.set(false);
            reset.emit(());
        })
    };

    let on_request_code = {
        let request_code = verification.actions.request_code.clone();
        let form = schedule.state.form.clone();
        let start_date = start_date.clone();
        let name = name.clone();
        let email = email.clone();
        let phone = phone.clone();
        Callback::from(move |contact: ContactInfo| {
            // For email signups the contact address doubles as the profile
            // key when no email was typed into the form.
            let email_value = if (*email).trim().is_empty() {
                match contact.method {
                    shared::ContactMethod::Email => contact.value.clone(),
                    shared::ContactMethod::Sms => String::new(),
                }
            } else {
                (*email).trim().to_string()
            };
            let snapshot = SignupSnapshot {
                name: (*name).clone(),
                email: email_value,
                phone: (*phone).clone(),
                schedule: form.clone(),
                start_date: *start_date,
            };
            request_code.emit((contact, snapshot));
        })
    };

    let serviceable = address.as_ref().map(|check| check.serviceable);

    html! {
        <>
            <Header subtitle={match *page {
                Page::AddressCheck => Some("Let's see if we pick up in your neighborhood".to_string()),
                Page::Signup => Some("Build your pickup schedule".to_string()),
                Page::CheckoutComplete => Some("Finishing your signup".to_string()),
                Page::ReminderDispatch => Some("Reminder dispatch".to_string()),
            }} />

            <main class="main">
                <div class="container">
                    {match *page {
                        Page::AddressCheck => html! {
                            <AddressLookup on_complete={on_address_complete} />
                        },
                        Page::Signup => html! {
                            <>
                                {if serviceable == Some(false) {
                                    html! {
                                        <div class="form-message info out-of-area">
                                            <p>
                                                {"We don't offer pickup at your address yet, but we can \
                                                  text or email you reminders for your municipal pickup day."}
                                            </p>
                                            <button class="btn btn-primary" onclick={open_reminder_modal.clone()}>
                                                {"Sign up for reminders"}
                                            </button>
                                        </div>
                                    }
                                } else { html! {} }}

                                <ServiceScheduleForm
                                    form={schedule.state.form.clone()}
                                    errors={(*validation_errors).clone()}
                                    disabled={*submitting}
                                    on_toggle={schedule.actions.toggle_service.clone()}
                                    on_frequency_change={schedule.actions.change_frequency.clone()}
                                    on_weekday_change={schedule.actions.set_pickup_weekday.clone()}
                                    on_increment={schedule.actions.increment_quantity.clone()}
                                    on_decrement={schedule.actions.decrement_quantity.clone()}
                                />

                                <section class="start-date-section">
                                    <h2>{"When should we start?"}</h2>
                                    <DatePicker
                                        target_weekday={pickup_target(&schedule.state.form)}
                                        on_date_change={on_date_change}
                                        disabled={*submitting}
                                        label={Some("First pickup".to_string())}
                                    />
                                    {if let Some(date) = *start_date {
                                        html! {
                                            <p class="start-date-note">
                                                {format!("First pickup: {}", format_date_for_display(date))}
                                            </p>
                                        }
                                    } else { html! {} }}
                                </section>

                                <PricingSummary pricing={schedule.state.pricing.clone()} />

                                <section class="contact-section">
                                    <h2>{"Your details"}</h2>
                                    {if let Some(message) = (*submit_error).clone() {
                                        html! { <div class="form-message error">{message}</div> }
                                    } else { html! {} }}
                                    <form class="signup-form" onsubmit={on_checkout_submit}>
                                        <div class="form-group">
                                            <label for="name">{"Name"}</label>
                                            <input
                                                type="text"
                                                id="name"
                                                value={(*name).clone()}
                                                onchange={on_name_change}
                                                disabled={*submitting}
                                            />
                                        </div>
                                        <div class="form-group">
                                            <label for="email">{"Email"}</label>
                                            <input
                                                type="email"
                                                id="email"
                                                value={(*email).clone()}
                                                onchange={on_email_change}
                                                disabled={*submitting}
                                            />
                                        </div>
                                        <div class="form-group">
                                            <label for="phone">{"Phone (optional)"}</label>
                                            <input
                                                type="tel"
                                                id="phone"
                                                value={(*phone).clone()}
                                                onchange={on_phone_change}
                                                disabled={*submitting}
                                            />
                                        </div>
                                        <button
                                            type="submit"
                                            class="btn btn-primary checkout-btn"
                                            disabled={*submitting}
                                        >
                                            {if *submitting { "Heading to checkout..." } else { "Continue to checkout" }}
                                        </button>
                                    </form>
                                    <button class="btn btn-link" onclick={open_reminder_modal}>
                                        {"Not ready to subscribe? Get free pickup reminders instead."}
                                    </button>
                                </section>
                            </>
                        },
                        Page::CheckoutComplete => html! {
                            <CheckoutComplete api={api.clone()} />
                        },
                        Page::ReminderDispatch => html! {
                            <ReminderDispatch api={api.clone()} notify={notify.clone()} />
                        },
                    }}
                </div>
            </main>

            <ReminderModal
                is_open={*reminder_modal_open}
                on_close={close_reminder_modal}
                phase={verification.state.phase}
                busy={verification.state.busy}
                error={verification.state.error.clone()}
                contact={verification.state.contact.clone()}
                on_request_code={on_request_code}
                on_submit_code={verification.actions.submit_code.clone()}
                on_resend={verification.actions.resend_code.clone()}
                on_retry_completion={verification.actions.retry_completion.clone()}
            />
        </>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CheckoutCompleteProps {
    api: ApiClient,
}

/// Landing view after the payment provider redirects back: replay the
/// parked profile and schedules into the persistence API, record the
/// subscription, then clear the hand-off cells.
#[function_component(CheckoutComplete)]
fn checkout_complete(props: &CheckoutCompleteProps) -> Html {
    let finalizing = use_state(|| true);
    let error = use_state(|| Option::<String>::None);

    {
        let finalizing = finalizing.clone();
        let error = error.clone();
        let api = props.api.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let profile = storage::load_pending_profile();
                let schedules = storage::load_pending_schedules().unwrap_or_default();

                let profile = match profile {
                    Some(profile) => profile,
                    None => {
                        // Nothing parked; most likely a page refresh after
                        // the signup already finalized.
                        finalizing.set(false);
                        return;
                    }
                };

                let monthly_total = storage::load_form_state()
                    .map(|saved| compute_total(&saved.schedule.selections()).total)
                    .unwrap_or(0.0);
                let email = profile.email.clone();

                if let Err(e) = api.upsert_profile(profile).await {
                    error.set(Some(format!("We couldn't save your profile: {}", e)));
                    finalizing.set(false);
                    return;
                }
                for schedule in schedules {
                    if let Err(e) = api.upsert_service_schedule(schedule).await {
                        error.set(Some(format!("We couldn't save your schedule: {}", e)));
                        finalizing.set(false);
                        return;
                    }
                }
                if let Err(e) = api
                    .insert_service_subscription(SubscriptionInsertRequest {
                        profile_email: email,
                        monthly_total,
                        checkout_reference: None,
                    })
                    .await
                {
                    Logger::warn_with_component(
                        "checkout",
                        &format!("Subscription record failed: {}", e),
                    );
                }

                storage::clear_pending_signup();
                finalizing.set(false);
            });
            || ()
        });
    }

    html! {
        <section class="checkout-complete-section">
            {if *finalizing {
                html! { <p>{"Saving your subscription..."}</p> }
            } else if let Some(message) = (*error).clone() {
                html! {
                    <div class="form-message error">
                        <p>{message}</p>
                        <p>{"Your payment went through — reload this page to retry saving."}</p>
                    </div>
                }
            } else {
                html! {
                    <div class="form-message success">
                        <h2>{"Welcome aboard!"}</h2>
                        <p>{"Your pickup schedule is saved. See you on your first pickup day."}</p>
                    </div>
                }
            }}
        </section>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct ReminderDispatchProps {
    api: ApiClient,
    notify: NotificationClient,
}

/// Operator view: send reminders for every schedule whose pickup lands
/// tomorrow.
#[function_component(ReminderDispatch)]
fn reminder_dispatch(props: &ReminderDispatchProps) -> Html {
    let running = use_state(|| false);
    let result = use_state(|| Option::<String>::None);

    let on_dispatch = {
        let running = running.clone();
        let result = result.clone();
        let api = props.api.clone();
        let notify = props.notify.clone();
        Callback::from(move |_: MouseEvent| {
            let running = running.clone();
            let result = result.clone();
            let api = api.clone();
            let notify = notify.clone();
            let tomorrow = today() + Duration::days(1);
            let weekday = Weekday::from_chrono(tomorrow.weekday());

            running.set(true);
            result.set(None);
            spawn_local(async move {
                match dispatch_due_reminders(&api, &notify, weekday).await {
                    Ok(summary) => {
                        result.set(Some(format!(
                            "Sent {} reminders for {} pickups ({} failed).",
                            summary.sent,
                            weekday.name(),
                            summary.failed
                        )));
                    }
                    Err(e) => {
                        result.set(Some(format!("Dispatch failed: {}", e)));
                    }
                }
                running.set(false);
            });
        })
    };

    html! {
        <section class="reminder-dispatch-section">
            <h2>{"Send tomorrow's pickup reminders"}</h2>
            {if let Some(message) = (*result).clone() {
                html! { <div class="form-message info">{message}</div> }
            } else { html! {} }}
            <button class="btn btn-primary" onclick={on_dispatch} disabled={*running}>
                {if *running { "Sending..." } else { "Dispatch reminders" }}
            </button>
        </section>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
