use shared::{ContactInfo, ContactMethod, VerificationPhase};
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ReminderModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,

    pub phase: VerificationPhase,
    pub busy: bool,
    pub error: Option<String>,
    pub contact: Option<ContactInfo>,

    pub on_request_code: Callback<ContactInfo>,
    pub on_submit_code: Callback<String>,
    pub on_resend: Callback<()>,
    pub on_retry_completion: Callback<()>,
}

/// Two-step reminder signup: contact info in, one-time code back, then
/// the profile and schedules are saved. Which step renders is driven
/// entirely by the verification phase owned by the parent.
#[function_component(ReminderModal)]
pub fn reminder_modal(props: &ReminderModalProps) -> Html {
    let contact_method = use_state(|| ContactMethod::Email);
    let contact_value = use_state(String::new);
    let code_input = use_state(String::new);

    // Fresh fields every time the modal opens.
    {
        let contact_method = contact_method.clone();
        let contact_value = contact_value.clone();
        let code_input = code_input.clone();
        use_effect_with(props.is_open, move |is_open| {
            if *is_open {
                contact_method.set(ContactMethod::Email);
                contact_value.set(String::new());
                code_input.set(String::new());
            }
            || ()
        });
    }

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    let on_method_change = {
        let contact_method = contact_method.clone();
        Callback::from(move |method: ContactMethod| {
            contact_method.set(method);
        })
    };

    let on_contact_change = {
        let contact_value = contact_value.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            contact_value.set(input.value());
        })
    };

    let on_code_change = {
        let code_input = code_input.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            code_input.set(input.value());
        })
    };

    let on_contact_submit = {
        let contact_method = contact_method.clone();
        let contact_value = contact_value.clone();
        let on_request_code = props.on_request_code.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let value = (*contact_value).trim().to_string();
            if value.is_empty() {
                return;
            }
            on_request_code.emit(ContactInfo {
                method: *contact_method,
                value,
            });
        })
    };

    let on_code_submit = {
        let code_input = code_input.clone();
        let on_submit_code = props.on_submit_code.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit_code.emit((*code_input).clone());
        })
    };

    let on_resend_click = {
        let on_resend = props.on_resend.clone();
        Callback::from(move |_: MouseEvent| {
            on_resend.emit(());
        })
    };

    let on_retry_click = {
        let on_retry_completion = props.on_retry_completion.clone();
        Callback::from(move |_: MouseEvent| {
            on_retry_completion.emit(());
        })
    };

    if !props.is_open {
        return html! {};
    }

    let error_block = if let Some(error) = &props.error {
        html! { <div class="reminder-error">{error}</div> }
    } else {
        html! {}
    };

    html! {
        <div class="reminder-modal-backdrop" onclick={on_backdrop_click}>
            <div class="reminder-modal" onclick={on_modal_click}>
                <div class="reminder-modal-content">
                    {match props.phase {
                        VerificationPhase::Idle => html! {
                            <>
                                <h3 class="reminder-title">{"Get pickup reminders"}</h3>
                                <p class="reminder-copy">
                                    {"We'll send you a quick reminder the day before every pickup. \
                                      First, where should your verification code go?"}
                                </p>
                                {error_block}
                                <form class="reminder-form" onsubmit={on_contact_submit}>
                                    <div class="contact-method-choice">
                                        <label>
                                            <input
                                                type="radio"
                                                name="contact-method"
                                                checked={*contact_method == ContactMethod::Email}
                                                onchange={
                                                    let on_method_change = on_method_change.clone();
                                                    Callback::from(move |_: Event| {
                                                        on_method_change.emit(ContactMethod::Email);
                                                    })
                                                }
                                            />
                                            {"Email"}
                                        </label>
                                        <label>
                                            <input
                                                type="radio"
                                                name="contact-method"
                                                checked={*contact_method == ContactMethod::Sms}
                                                onchange={
                                                    let on_method_change = on_method_change.clone();
                                                    Callback::from(move |_: Event| {
                                                        on_method_change.emit(ContactMethod::Sms);
                                                    })
                                                }
                                            />
                                            {"Text message"}
                                        </label>
                                    </div>
                                    <input
                                        type="text"
                                        class="reminder-input"
                                        placeholder={match *contact_method {
                                            ContactMethod::Email => "you@example.com",
                                            ContactMethod::Sms => "555-555-0100",
                                        }}
                                        value={(*contact_value).clone()}
                                        onchange={on_contact_change}
                                        disabled={props.busy}
                                    />
                                    <div class="reminder-buttons">
                                        <button type="submit" class="btn btn-primary" disabled={props.busy}>
                                            {if props.busy { "Sending..." } else { "Send my code" }}
                                        </button>
                                        <button type="button" class="btn btn-secondary" onclick={on_close_click.clone()}>
                                            {"Cancel"}
                                        </button>
                                    </div>
                                </form>
                            </>
                        },
                        VerificationPhase::AwaitingCode => html! {
                            <>
                                <h3 class="reminder-title">{"Enter your code"}</h3>
                                <p class="reminder-copy">
                                    {format!(
                                        "We sent a 6-digit code by {}. Enter it below to finish signing up.",
                                        props.contact.as_ref().map(|c| c.method.label()).unwrap_or("email")
                                    )}
                                </p>
                                {error_block}
                                <form class="reminder-form" onsubmit={on_code_submit}>
                                    <input
                                        type="text"
                                        class="reminder-input code-input"
                                        placeholder="123456"
                                        maxlength="6"
                                        value={(*code_input).clone()}
                                        onchange={on_code_change}
                                        disabled={props.busy}
                                        autofocus=true
                                    />
                                    <div class="reminder-buttons">
                                        <button type="submit" class="btn btn-primary" disabled={props.busy}>
                                            {"Verify"}
                                        </button>
                                        <button
                                            type="button"
                                            class="btn btn-link"
                                            onclick={on_resend_click}
                                            disabled={props.busy}
                                        >
                                            {"Resend code"}
                                        </button>
                                    </div>
                                </form>
                            </>
                        },
                        VerificationPhase::Verified => html! {
                            <>
                                <h3 class="reminder-title">{"Saving your reminders..."}</h3>
                                {if props.busy {
                                    html! {
                                        <div class="reminder-spinner">
                                            <div class="spinner"></div>
                                        </div>
                                    }
                                } else {
                                    html! {
                                        <>
                                            {error_block}
                                            <div class="reminder-buttons">
                                                <button type="button" class="btn btn-primary" onclick={on_retry_click}>
                                                    {"Try again"}
                                                </button>
                                                <button type="button" class="btn btn-secondary" onclick={on_close_click.clone()}>
                                                    {"Cancel"}
                                                </button>
                                            </div>
                                        </>
                                    }
                                }}
                            </>
                        },
                        VerificationPhase::Completed => html! {
                            <>
                                <h3 class="reminder-title">{"You're all set!"}</h3>
                                <p class="reminder-copy">
                                    {"Your reminders are saved. We'll ping you before each pickup day."}
                                </p>
                                <div class="reminder-buttons">
                                    <button type="button" class="btn btn-primary" onclick={on_close_click}>
                                        {"Done"}
                                    </button>
                                </div>
                            </>
                        },
                    }}
                </div>
            </div>
        </div>
    }
}
