use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub subtitle: Option<String>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"Curbside Pickup Signup"}</h1>
                {if let Some(subtitle) = &props.subtitle {
                    html! { <p class="header-subtitle">{subtitle}</p> }
                } else { html! {} }}
            </div>
        </header>
    }
}
