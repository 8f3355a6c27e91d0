use dioxus::prelude::*;
use store::{NotesEditor, NotesStep, VehicleRecord};
use tracing::error;

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::components::{use_toast, Button, ButtonVariant, Textarea, ToastOptions};
use crate::confirm_dialog::ConfirmDialog;
use crate::session::use_client;
use crate::views::ModalOverlay;

/// Free-text notes for one vehicle. `on_saved` receives `(vehicle_id, notes)`
/// so the list can update its copy without a refetch.
#[component]
pub fn VehicleNotesModal(
    vehicle: VehicleRecord,
    on_close: EventHandler<()>,
    on_saved: EventHandler<(String, String)>,
) -> Element {
    let client = use_client();
    let toast_api = use_toast();
    let mut activity_log = use_activity_log();
    let mut editor = use_signal({
        let notes = vehicle.custom_notes.clone();
        move || NotesEditor::new(notes.as_deref())
    });
    let mut saving = use_signal(|| false);

    let id = vehicle.id.clone();
    let registration = vehicle.registration_or_default().to_string();
    let handle_save = move |_| {
        let client = client.clone();
        let id = id.clone();
        let registration = registration.clone();
        let notes = editor.read().draft().to_string();
        spawn(async move {
            saving.set(true);
            match client.update_note(&id, &notes).await {
                Ok(()) => {
                    editor.write().mark_saved();
                    on_saved.call((id, notes));
                    toast_api.success("Notes updated successfully!".to_string(), ToastOptions::new());
                    log_activity(&mut activity_log, LogLevel::Success, &format!("Notes saved for {registration}"));
                }
                Err(e) => {
                    error!("update note for {id}: {e}");
                    editor.write().cancel();
                    toast_api.error(e.user_message("Failed to update notes"), ToastOptions::new());
                    log_activity(&mut activity_log, LogLevel::Error, &format!("Notes for {registration}: {e}"));
                }
            }
            saving.set(false);
        });
    };

    let state = editor();
    let changed = state.has_changes();
    let busy = saving();

    rsx! {
        ModalOverlay {
            title: "Vehicle Notes",
            subtitle: format!("{} {}", vehicle.registration_or_default(), vehicle.title()),
            busy,
            on_close: move |_| on_close.call(()),

            Textarea {
                id: "vehicle-notes",
                class: "notes-textarea",
                placeholder: "Add notes about this vehicle...",
                rows: 10,
                value: state.draft().to_string(),
                disabled: busy,
                oninput: move |evt: FormEvent| editor.write().set_draft(evt.value()),
            }
            div {
                class: "notes-meta",
                span { "{state.char_count()} characters" }
                if changed {
                    span { class: "editor-unsaved", "Unsaved changes" }
                }
            }
            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: !changed || busy,
                    onclick: move |_| editor.write().request_reset(),
                    "Reset"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: !changed || busy,
                    onclick: move |_| editor.write().request_save(),
                    if busy { "Saving..." } else { "Save Notes" }
                }
            }

            match state.step() {
                NotesStep::ConfirmSave => rsx! {
                    ConfirmDialog {
                        title: "Save Notes",
                        message: "Save these notes? The previous notes will be replaced.",
                        confirm_label: "Save",
                        busy,
                        on_cancel: move |_| editor.write().cancel(),
                        on_confirm: handle_save,
                    }
                },
                NotesStep::ConfirmReset => rsx! {
                    ConfirmDialog {
                        title: "Reset Notes",
                        message: "Discard your changes and go back to the saved notes?",
                        confirm_label: "Reset",
                        destructive: true,
                        on_cancel: move |_| editor.write().cancel(),
                        on_confirm: move |_| {
                            editor.write().confirm_reset();
                            toast_api.info("Notes reset to saved version".to_string(), ToastOptions::new());
                        },
                    }
                },
                NotesStep::Editing => rsx! {},
            }
        }
    }
}
