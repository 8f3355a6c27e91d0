use dioxus::prelude::*;
use store::{ListState, OrderBy, SortDirection};

use crate::components::Input;
use crate::Icon;
use crate::icons::{FaArrowDownWideShort, FaArrowUpShortWide, FaMagnifyingGlass};

/// Search box, make dropdown and sort controls bound to a [`ListState`].
/// Every change resets pagination through the `ListState` setters.
#[component]
pub fn FilterBar(
    list: Signal<ListState>,
    makes: Vec<String>,
    matched: usize,
    total: usize,
) -> Element {
    let state = list.read().filter().clone();

    rsx! {
        div {
            class: "filter-bar",
            div {
                class: "filter-search",
                Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                Input {
                    id: "vehicle-search",
                    placeholder: "Search by registration, make, model or VIN",
                    value: state.search_term.clone(),
                    oninput: move |evt: FormEvent| list.write().set_search_term(evt.value()),
                }
            }
            select {
                class: "filter-select",
                value: "{state.selected_make}",
                onchange: move |evt: FormEvent| list.write().set_selected_make(evt.value()),
                option { value: "", "All makes" }
                for make in makes {
                    option {
                        key: "{make}",
                        value: "{make}",
                        selected: make == state.selected_make,
                        "{make}"
                    }
                }
            }
            select {
                class: "filter-select",
                value: "{state.order_by.as_str()}",
                onchange: move |evt: FormEvent| {
                    if let Some(order_by) = OrderBy::parse(&evt.value()) {
                        list.write().set_order_by(order_by);
                    }
                },
                for order_by in OrderBy::ALL {
                    option {
                        key: "{order_by.as_str()}",
                        value: "{order_by.as_str()}",
                        selected: order_by == state.order_by,
                        "{order_by.label()}"
                    }
                }
            }
            button {
                class: "btn btn-outline filter-direction",
                title: "{state.sort_direction.label()}",
                onclick: move |_| {
                    let next = list.read().filter().sort_direction.toggled();
                    list.write().set_sort_direction(next);
                },
                match state.sort_direction {
                    SortDirection::Asc => rsx! {
                        Icon { icon: FaArrowUpShortWide, width: 14, height: 14 }
                    },
                    SortDirection::Desc => rsx! {
                        Icon { icon: FaArrowDownWideShort, width: 14, height: 14 }
                    },
                }
                " {state.sort_direction.label()}"
            }
            span {
                class: "filter-count muted",
                if matched == total {
                    "{total} vehicles"
                } else {
                    "{matched} of {total} vehicles"
                }
            }
        }
    }
}
