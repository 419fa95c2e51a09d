use shared::AddressCheck;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::storage;

/// ZIP codes inside the pickup service area.
const SERVICED_ZIPS: &[&str] = &["80501", "80502", "80503", "80504", "80513"];

#[derive(Properties, PartialEq)]
pub struct AddressLookupProps {
    /// Fired with the stored result; the parent decides which signup flow
    /// to offer from `serviceable`.
    pub on_complete: Callback<AddressCheck>,
}

/// Address gate: checks whether the property is inside the service area
/// and parks the result in session storage for the signup page.
#[function_component(AddressLookup)]
pub fn address_lookup(props: &AddressLookupProps) -> Html {
    let street = use_state(String::new);
    let zip = use_state(String::new);
    let error = use_state(|| Option::<String>::None);

    let on_street_change = {
        let street = street.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            street.set(input.value());
        })
    };

    let on_zip_change = {
        let zip = zip.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            zip.set(input.value());
        })
    };

    let on_submit = {
        let street = street.clone();
        let zip = zip.clone();
        let error = error.clone();
        let on_complete = props.on_complete.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let street_value = (*street).trim().to_string();
            let zip_value = (*zip).trim().to_string();

            if street_value.is_empty() {
                error.set(Some("Please enter your street address".to_string()));
                return;
            }
            if zip_value.len() != 5 || !zip_value.chars().all(|c| c.is_ascii_digit()) {
                error.set(Some("Please enter a 5-digit ZIP code".to_string()));
                return;
            }
            error.set(None);

            let check = AddressCheck {
                street: street_value,
                zip: zip_value.clone(),
                serviceable: SERVICED_ZIPS.contains(&zip_value.as_str()),
            };
            storage::save_address_check(&check);
            on_complete.emit(check);
        })
    };

    html! {
        <section class="address-lookup-section">
            <h2>{"Is pickup available at your address?"}</h2>

            {if let Some(message) = (*error).clone() {
                html! { <div class="form-message error">{message}</div> }
            } else { html! {} }}

            <form class="address-lookup-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="street">{"Street address"}</label>
                    <input
                        type="text"
                        id="street"
                        placeholder="123 Main St"
                        value={(*street).clone()}
                        onchange={on_street_change}
                    />
                </div>

                <div class="form-group">
                    <label for="zip">{"ZIP code"}</label>
                    <input
                        type="text"
                        id="zip"
                        placeholder="80501"
                        maxlength="5"
                        value={(*zip).clone()}
                        onchange={on_zip_change}
                    />
                </div>

                <button type="submit" class="btn btn-primary">
                    {"Check my address"}
                </button>
            </form>
        </section>
    }
}
