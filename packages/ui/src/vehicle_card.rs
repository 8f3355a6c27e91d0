use dioxus::prelude::*;
use store::models::format_day_month_year;
use store::{RemovalAction, VehicleCapabilities, VehicleRecord};

use crate::components::{Button, ButtonVariant};
use crate::confirm_dialog::ConfirmDialog;
use crate::Icon;
use crate::icons::{FaCircleInfo, FaImage, FaNoteSticky, FaRotateLeft, FaTrashCan};

/// Which confirmation the card is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    /// Soft delete, with the "Permanently delete" checkbox.
    Delete { permanent: bool },
    /// Second confirmation before a hard delete.
    Permanent,
    Restore,
}

/// One vehicle in a list. `capabilities` decides which removal actions are
/// offered; every card can open details, notes and images.
#[component]
pub fn VehicleCard(
    vehicle: VehicleRecord,
    capabilities: VehicleCapabilities,
    #[props(default)] busy: bool,
    on_details: EventHandler<VehicleRecord>,
    on_notes: EventHandler<VehicleRecord>,
    on_images: EventHandler<VehicleRecord>,
    on_remove: EventHandler<(String, RemovalAction)>,
) -> Element {
    let mut pending = use_signal(|| Option::<Pending>::None);

    let id = vehicle.id.clone();
    let mut finish = move |action: RemovalAction| {
        pending.set(None);
        on_remove.call((id.clone(), action));
    };

    let registration = vehicle.registration.clone().unwrap_or_else(|| "No registration".to_string());
    let title = vehicle.title();
    let year = match vehicle.year() {
        0 => "N/A".to_string(),
        y => y.to_string(),
    };
    let added = format_day_month_year(vehicle.created_at.as_deref());
    let deleted = vehicle
        .date_deleted
        .as_deref()
        .map(|d| format_day_month_year(Some(d)));
    let has_notes = vehicle.custom_notes.as_deref().is_some_and(|n| !n.trim().is_empty());

    let details_vehicle = vehicle.clone();
    let notes_vehicle = vehicle.clone();
    let images_vehicle = vehicle.clone();

    rsx! {
        li {
            class: if capabilities.restore { "vehicle-card vehicle-card-deleted" } else { "vehicle-card" },
            div {
                class: "vehicle-card-header",
                span { class: "plate", "{registration}" }
                if has_notes {
                    span { class: "badge badge-info", title: "Has notes", "Notes" }
                }
            }
            h3 { class: "vehicle-card-title", "{title}" }
            dl {
                class: "vehicle-card-facts",
                dt { "Year" }
                dd { "{year}" }
                if let Some(fuel) = vehicle.fuel_type.as_deref() {
                    dt { "Fuel" }
                    dd { "{fuel}" }
                }
                if let Some(colour) = vehicle.primary_colour.as_deref() {
                    dt { "Colour" }
                    dd { "{colour}" }
                }
                dt { "Added" }
                dd { "{added}" }
                if let Some(deleted) = deleted {
                    dt { "Deleted" }
                    dd { "{deleted}" }
                }
            }

            div {
                class: "vehicle-card-actions",
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: busy,
                    onclick: move |_| on_details.call(details_vehicle.clone()),
                    Icon { icon: FaCircleInfo, width: 12, height: 12 }
                    " View Details"
                }
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: busy,
                    onclick: move |_| on_notes.call(notes_vehicle.clone()),
                    Icon { icon: FaNoteSticky, width: 12, height: 12 }
                    " Notes"
                }
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: busy,
                    onclick: move |_| on_images.call(images_vehicle.clone()),
                    Icon { icon: FaImage, width: 12, height: 12 }
                    " Images"
                }
                if capabilities.restore {
                    Button {
                        variant: ButtonVariant::Success,
                        disabled: busy,
                        onclick: move |_| pending.set(Some(Pending::Restore)),
                        Icon { icon: FaRotateLeft, width: 12, height: 12 }
                        " Restore"
                    }
                }
                if capabilities.delete {
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: busy,
                        onclick: move |_| pending.set(Some(Pending::Delete { permanent: false })),
                        Icon { icon: FaTrashCan, width: 12, height: 12 }
                        " Delete"
                    }
                } else if capabilities.hard_delete {
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: busy,
                        onclick: move |_| pending.set(Some(Pending::Permanent)),
                        Icon { icon: FaTrashCan, width: 12, height: 12 }
                        " Delete Permanently"
                    }
                }
            }

            match pending() {
                Some(Pending::Delete { permanent }) => rsx! {
                    ConfirmDialog {
                        title: "Delete Vehicle",
                        message: format!("Delete {registration}? It can be restored from Deleted Vehicles."),
                        confirm_label: "Delete",
                        destructive: true,
                        on_cancel: move |_| pending.set(None),
                        on_confirm: move |_| {
                            if permanent {
                                pending.set(Some(Pending::Permanent));
                            } else {
                                finish(RemovalAction::SoftDelete);
                            }
                        },
                        if capabilities.hard_delete {
                            label {
                                class: "checkbox-row",
                                input {
                                    r#type: "checkbox",
                                    checked: permanent,
                                    onchange: move |evt: FormEvent| {
                                        pending.set(Some(Pending::Delete { permanent: evt.checked() }));
                                    },
                                }
                                " Permanently delete"
                            }
                        }
                    }
                },
                Some(Pending::Permanent) => rsx! {
                    ConfirmDialog {
                        title: "Are you sure?",
                        message: format!("{registration} will be permanently deleted. This cannot be undone."),
                        confirm_label: "Delete Permanently",
                        destructive: true,
                        on_cancel: move |_| pending.set(None),
                        on_confirm: move |_| finish(RemovalAction::HardDelete),
                    }
                },
                Some(Pending::Restore) => rsx! {
                    ConfirmDialog {
                        title: "Restore Vehicle",
                        message: format!("Restore {registration} to the vehicle list?"),
                        confirm_label: "Restore",
                        on_cancel: move |_| pending.set(None),
                        on_confirm: move |_| finish(RemovalAction::Restore),
                    }
                },
                None => rsx! {},
            }
        }
    }
}
