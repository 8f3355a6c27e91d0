use std::collections::HashSet;

use dioxus::prelude::*;
use store::models::{format_day_month_year, format_month_day_year, MotTest};
use store::VehicleRecord;

use crate::views::ModalOverlay;
use crate::Icon;
use crate::icons::{FaChevronDown, FaChevronRight, FaTriangleExclamation};

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

/// Read-only specification and MOT history for one vehicle.
#[component]
pub fn VehicleDetailsModal(vehicle: VehicleRecord, on_close: EventHandler<()>) -> Element {
    let mut expanded_test = use_signal(|| Option::<usize>::None);
    let mut expanded_defects = use_signal(HashSet::<(usize, usize)>::new);

    let year = match vehicle.year() {
        0 => "N/A".to_string(),
        y => y.to_string(),
    };
    let vin = or_na(vehicle.vin.as_deref()).to_uppercase();
    let engine_size = vehicle
        .engine_size
        .as_deref()
        .map(|cc| format!("{cc} cc"))
        .unwrap_or_else(|| "N/A".to_string());
    let engine_power = vehicle
        .engine_power
        .as_ref()
        .and_then(|p| p.bhp.as_deref())
        .map(|bhp| format!("{bhp} bhp"))
        .unwrap_or_else(|| "N/A".to_string());

    let facts = [
        ("Registration", or_na(vehicle.registration.as_deref())),
        ("VIN", vin),
        ("Make", or_na(vehicle.make.as_deref())),
        ("Model", or_na(vehicle.model.as_deref())),
        ("Year", year),
        ("Fuel Type", or_na(vehicle.fuel_type.as_deref())),
        ("Colour", or_na(vehicle.primary_colour.as_deref())),
        ("Engine Size", engine_size),
        ("Engine Power", engine_power),
        ("Added", format_day_month_year(vehicle.created_at.as_deref())),
    ];

    let tests: Vec<(usize, MotTest)> = vehicle.mot_tests.iter().cloned().enumerate().collect();

    rsx! {
        ModalOverlay {
            title: "Vehicle Details",
            subtitle: vehicle.title(),
            wide: true,
            on_close: move |_| on_close.call(()),

            dl {
                class: "details-grid",
                for (label, value) in facts {
                    div {
                        key: "{label}",
                        dt { "{label}" }
                        dd { "{value}" }
                    }
                }
            }

            h3 { class: "section-title", "MOT History" }
            if tests.is_empty() {
                p { class: "muted", "No MOT history available." }
            }
            ul {
                class: "mot-list",
                for (index, test) in tests {
                    li {
                        key: "{index}",
                        class: "mot-test",
                        button {
                            class: "mot-test-header",
                            onclick: move |_| {
                                let open = expanded_test() == Some(index);
                                expanded_test.set(if open { None } else { Some(index) });
                            },
                            if expanded_test() == Some(index) {
                                Icon { icon: FaChevronDown, width: 12, height: 12 }
                            } else {
                                Icon { icon: FaChevronRight, width: 12, height: 12 }
                            }
                            span { " {format_month_day_year(test.completed_date.as_deref())}" }
                            span {
                                class: if test.passed() { "mot-result passed" } else { "mot-result failed" },
                                "{or_na(test.test_result.as_deref())}"
                            }
                        }
                        if expanded_test() == Some(index) {
                            dl {
                                class: "details-grid",
                                dt { "Expiry Date" }
                                dd { "{format_month_day_year(test.expiry_date.as_deref())}" }
                                dt { "Odometer" }
                                dd {
                                    "{or_na(test.odometer_value.as_deref())} {test.odometer_unit.as_deref().unwrap_or_default()}"
                                }
                                dt { "Test Number" }
                                dd { "{or_na(test.mot_test_number.as_deref())}" }
                                dt { "Data Source" }
                                dd { "{or_na(test.data_source.as_deref())}" }
                            }
                            if test.defects.is_empty() {
                                p { class: "muted", "No defects recorded." }
                            }
                            ul {
                                class: "defect-list",
                                for (defect_index, defect) in test.defects.iter().cloned().enumerate() {
                                    li {
                                        key: "{defect_index}",
                                        class: if defect.dangerous { "defect dangerous" } else { "defect" },
                                        button {
                                            class: "defect-header",
                                            onclick: move |_| {
                                                let key = (index, defect_index);
                                                let mut open = expanded_defects.write();
                                                if !open.remove(&key) {
                                                    open.insert(key);
                                                }
                                            },
                                            span { class: "defect-type", "{or_na(defect.kind.as_deref())}" }
                                            if defect.dangerous {
                                                span {
                                                    class: "badge badge-danger",
                                                    Icon { icon: FaTriangleExclamation, width: 10, height: 10 }
                                                    " Dangerous"
                                                }
                                            }
                                        }
                                        if expanded_defects.read().contains(&(index, defect_index)) {
                                            p { class: "defect-text", "{or_na(defect.text.as_deref())}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
