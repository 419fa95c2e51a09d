use chrono::NaiveDate;
use shared::calendar::{month_name, CalendarDayType, CalendarSelection};
use shared::Weekday;
use wasm_bindgen::JsCast;
use web_sys::{window, Element};
use yew::prelude::*;

use crate::services::date_utils::{format_date_for_display, today};

#[derive(Properties, PartialEq)]
pub struct DatePickerProps {
    /// Weekday the service runs on; `None` relaxes the calendar to the
    /// lead-time constraint only.
    pub target_weekday: Option<Weekday>,
    /// Fired with the new selection, including the default computed when
    /// the target weekday changes.
    pub on_date_change: Callback<Option<NaiveDate>>,
    pub disabled: bool,
    pub label: Option<String>,
}

/// Start-date picker constrained to the pickup weekday and the two-week
/// lead time. Only dates that correspond to an actual pickup day can be
/// chosen; month browsing is unrestricted.
#[function_component(DatePicker)]
pub fn date_picker(props: &DatePickerProps) -> Html {
    let show_calendar = use_state(|| false);
    let calendar_ref = use_node_ref();
    let selection = use_state(|| CalendarSelection::new(today(), None));

    // Rescan for the earliest valid date whenever the pickup day changes
    // (and once on mount). The previous selection is discarded; it no
    // longer lands on a pickup day.
    {
        let selection = selection.clone();
        let on_date_change = props.on_date_change.clone();
        use_effect_with(props.target_weekday, move |target| {
            let mut next = (*selection).clone();
            next.retarget(today(), *target);
            on_date_change.emit(next.selected_date);
            selection.set(next);
            || ()
        });
    }

    let toggle_calendar = {
        let show_calendar = show_calendar.clone();
        let selection = selection.clone();
        Callback::from(move |_: MouseEvent| {
            let was_open = *show_calendar;
            if !was_open {
                // Opening snaps the view back to the selection.
                let mut next = (*selection).clone();
                next.show_selection(today());
                selection.set(next);
            }
            show_calendar.set(!was_open);
        })
    };

    // Close when a click lands outside the widget.
    {
        let show_calendar = show_calendar.clone();
        let calendar_ref = calendar_ref.clone();
        use_effect_with(*show_calendar, move |is_open| {
            let listener = is_open.then(|| {
                let show_calendar = show_calendar.clone();
                let calendar_ref = calendar_ref.clone();
                gloo::events::EventListener::new(&window().unwrap(), "click", move |e| {
                    if let Some(target) = e.target() {
                        if let Ok(element) = target.dyn_into::<Element>() {
                            if let Some(calendar_element) = calendar_ref.cast::<Element>() {
                                if !calendar_element.contains(Some(&element)) {
                                    show_calendar.set(false);
                                }
                            }
                        }
                    }
                })
            });
            move || drop(listener)
        });
    }

    let prev_month = {
        let selection = selection.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*selection).clone();
            next.show_prev_month();
            selection.set(next);
        })
    };

    let next_month = {
        let selection = selection.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*selection).clone();
            next.show_next_month();
            selection.set(next);
        })
    };

    let on_day_click = {
        let selection = selection.clone();
        let show_calendar = show_calendar.clone();
        let on_date_change = props.on_date_change.clone();
        Callback::from(move |date: NaiveDate| {
            let mut next = (*selection).clone();
            // Disabled days are filtered by `select`; nothing happens.
            if next.select(date, today()) {
                on_date_change.emit(next.selected_date);
                selection.set(next);
                show_calendar.set(false);
            }
        })
    };

    let display_text = match selection.selected_date {
        Some(date) => format_date_for_display(date),
        None => "Choose a start date".to_string(),
    };

    let grid = selection.grid(today());
    let (visible_year, visible_month) = selection.visible_month;

    html! {
        <div class="date-picker" ref={calendar_ref.clone()}>
            {if let Some(label) = &props.label {
                html! { <label class="date-picker-label">{label}</label> }
            } else { html! {} }}

            <div class="date-picker-input">
                <button
                    type="button"
                    class="date-display-button"
                    onclick={toggle_calendar}
                    disabled={props.disabled}
                >
                    <span class="date-text">{display_text}</span>
                    <span class="calendar-icon">{"📅"}</span>
                </button>

                {if *show_calendar && !props.disabled {
                    html! {
                        <div class="calendar-dropdown">
                            <div class="calendar-header">
                                <button type="button" class="nav-button" onclick={prev_month}>{"‹"}</button>
                                <span class="month-year">{format!("{} {}", month_name(visible_month), visible_year)}</span>
                                <button type="button" class="nav-button" onclick={next_month}>{"›"}</button>
                            </div>

                            <div class="calendar-grid">
                                <div class="weekday-header">
                                    <span>{"Sun"}</span>
                                    <span>{"Mon"}</span>
                                    <span>{"Tue"}</span>
                                    <span>{"Wed"}</span>
                                    <span>{"Thu"}</span>
                                    <span>{"Fri"}</span>
                                    <span>{"Sat"}</span>
                                </div>

                                <div class="calendar-days">
                                    {for grid.days.iter().map(|cell| {
                                        match (cell.day_type, cell.date) {
                                            (CalendarDayType::MonthDay, Some(date)) => {
                                                let on_day_click = on_day_click.clone();
                                                html! {
                                                    <button
                                                        type="button"
                                                        class={classes!(
                                                            "calendar-day",
                                                            cell.disabled.then_some("disabled"),
                                                            (!cell.disabled).then_some("valid"),
                                                            cell.selected.then_some("selected"),
                                                            cell.today.then_some("today")
                                                        )}
                                                        disabled={cell.disabled}
                                                        onclick={Callback::from(move |_: MouseEvent| {
                                                            on_day_click.emit(date);
                                                        })}
                                                    >
                                                        {cell.day}
                                                    </button>
                                                }
                                            }
                                            _ => html! { <div class="calendar-day empty"></div> },
                                        }
                                    })}
                                </div>
                            </div>

                            {if let Some(day) = props.target_weekday {
                                html! {
                                    <div class="calendar-footer">
                                        <span class="calendar-hint">
                                            {format!(
                                                "Pickups happen on {}s, starting at least two weeks out.",
                                                day.name()
                                            )}
                                        </span>
                                    </div>
                                }
                            } else { html! {} }}
                        </div>
                    }
                } else { html! {} }}
            </div>
        </div>
    }
}
