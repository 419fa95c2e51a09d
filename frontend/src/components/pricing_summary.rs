use shared::PricingBreakdown;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PricingSummaryProps {
    pub pricing: PricingBreakdown,
}

/// Itemized monthly cost, re-rendered on every form mutation.
#[function_component(PricingSummary)]
pub fn pricing_summary(props: &PricingSummaryProps) -> Html {
    let pricing = &props.pricing;

    html! {
        <section class="pricing-summary">
            <h2>{"Your monthly total"}</h2>

            {if pricing.has_charges() {
                html! {
                    <ul class="pricing-lines">
                        <li class="pricing-line base-fee">
                            <span>{"Base service fee"}</span>
                            <span>{pricing.formatted_base_fee()}</span>
                        </li>
                        {for pricing.line_items.iter().map(|line| {
                            html! {
                                <li class="pricing-line">
                                    <span>{line.summary()}</span>
                                </li>
                            }
                        })}
                    </ul>
                }
            } else {
                html! { <p class="pricing-empty">{"Pick a service to see pricing."}</p> }
            }}

            <div class="pricing-total">
                <span>{"Total"}</span>
                <span class="total-amount">{pricing.formatted_total()}</span>
            </div>
        </section>
    }
}
