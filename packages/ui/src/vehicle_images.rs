use dioxus::prelude::*;
use store::{ImageEvent, ImageModalState, SelectedImage, VehicleRecord};
use tracing::{error, info};

use crate::activity_log::{log_activity, use_activity_log, ActivityLog, LogLevel};
use crate::components::{use_toast, Button, ButtonVariant, ToastOptions, Toasts};
use crate::confirm_dialog::ConfirmDialog;
use crate::session::{use_client, AppClient};
use crate::status::Spinner;
use crate::views::ModalOverlay;
use crate::Icon;
use crate::icons::{FaCamera, FaRotateRight, FaTrashCan, FaUpload};

/// Fetch the current image URL and move the state machine accordingly.
async fn load_image(
    client: AppClient,
    id: String,
    mut state: Signal<ImageModalState>,
    toast_api: Toasts,
) {
    let next = state.peek().clone().transition(ImageEvent::Fetch);
    state.set(next);
    let event = match client.get_image(&id).await {
        Ok(url) => ImageEvent::Loaded(url),
        Err(e) => {
            error!("load image for {id}: {e}");
            toast_api.error(e.user_message("Failed to load image"), ToastOptions::new());
            ImageEvent::LoadFailed
        }
    };
    let next = state.peek().clone().transition(event);
    state.set(next);
}

fn apply(mut state: Signal<ImageModalState>, event: ImageEvent) {
    let next = state.peek().clone().transition(event);
    state.set(next);
}

fn record(mut log: Signal<ActivityLog>, level: LogLevel, message: String) {
    log_activity(&mut log, level, &message);
}

/// View, upload, replace or delete the photo of one vehicle.
#[component]
pub fn VehicleImagesModal(vehicle: VehicleRecord, on_close: EventHandler<()>) -> Element {
    let client = use_client();
    let toast_api = use_toast();
    let activity_log = use_activity_log();
    let state = use_signal(ImageModalState::default);

    // Fetch on open.
    use_hook({
        let client = client.clone();
        let id = vehicle.id.clone();
        move || {
            spawn(load_image(client, id, state, toast_api));
        }
    });

    let upload_client = client.clone();
    let upload_id = vehicle.id.clone();
    let registration = vehicle.registration_or_default().to_string();
    let upload_registration = registration.clone();
    let handle_file = move |evt: FormEvent| {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            return;
        };
        let client = upload_client.clone();
        let id = upload_id.clone();
        let registration = upload_registration.clone();
        spawn(async move {
            let Some(bytes) = engine.read_file(&name).await else {
                toast_api.error("Could not read the selected file".to_string(), ToastOptions::new());
                return;
            };
            let file = SelectedImage::from_file(name, bytes);
            apply(state, ImageEvent::UploadStarted);
            match client.upload_vehicle_image(&id, &file).await {
                Ok(compressed) => {
                    info!(
                        bytes = compressed.bytes.len(),
                        width = compressed.width,
                        height = compressed.height,
                        "uploaded image for {id}"
                    );
                    toast_api.success("Image uploaded successfully".to_string(), ToastOptions::new());
                    record(activity_log, LogLevel::Success, format!("Image uploaded for {registration}"));
                    apply(state, ImageEvent::UploadSucceeded);
                    load_image(client, id, state, toast_api).await;
                }
                Err(e) => {
                    error!("upload image for {id}: {e}");
                    toast_api.error(e.user_message("Failed to upload image"), ToastOptions::new());
                    record(activity_log, LogLevel::Error, format!("Image upload for {registration}: {e}"));
                    apply(state, ImageEvent::UploadFailed);
                }
            }
        });
    };

    let retry_client = client.clone();
    let retry_id = vehicle.id.clone();
    let handle_retry = move |_| {
        if !state.peek().can_retry() {
            return;
        }
        spawn(load_image(retry_client.clone(), retry_id.clone(), state, toast_api));
    };

    let delete_id = vehicle.id.clone();
    let handle_delete = move |_| {
        let client = client.clone();
        let id = delete_id.clone();
        let registration = registration.clone();
        apply(state, ImageEvent::DeleteConfirmed);
        spawn(async move {
            match client.delete_image(&id).await {
                Ok(()) => {
                    toast_api.success("Image deleted successfully".to_string(), ToastOptions::new());
                    record(activity_log, LogLevel::Success, format!("Image deleted for {registration}"));
                    apply(state, ImageEvent::DeleteSucceeded);
                }
                Err(e) => {
                    error!("delete image for {id}: {e}");
                    toast_api.error(e.user_message("Failed to delete image"), ToastOptions::new());
                    record(activity_log, LogLevel::Error, format!("Image delete for {registration}: {e}"));
                    apply(state, ImageEvent::DeleteFailed);
                }
            }
        });
    };

    let current = state();
    let busy = current.is_busy();
    let can_upload = matches!(current, ImageModalState::HasImage { .. } | ImageModalState::NoImage);

    rsx! {
        ModalOverlay {
            title: "Vehicle Images",
            subtitle: format!("{} - {}", vehicle.registration_or_default(), vehicle.title()),
            busy,
            wide: true,
            on_close: move |_| on_close.call(()),

            match &current {
                ImageModalState::Loading => rsx! { Spinner {} },
                ImageModalState::Uploading { .. } => rsx! {
                    Spinner {}
                    p { class: "muted center", "Compressing and uploading..." }
                },
                ImageModalState::Deleting { .. } => rsx! {
                    Spinner {}
                    p { class: "muted center", "Deleting image..." }
                },
                ImageModalState::NoImage => rsx! {
                    div {
                        class: "image-empty",
                        Icon { icon: FaCamera, width: 40, height: 40 }
                        p { "No image for this vehicle yet." }
                    }
                },
                ImageModalState::Idle => rsx! {
                    div {
                        class: "image-empty",
                        p { "The image could not be loaded." }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: handle_retry,
                            Icon { icon: FaRotateRight, width: 12, height: 12 }
                            " Retry"
                        }
                    }
                },
                ImageModalState::HasImage { url } | ImageModalState::ConfirmingDelete { url } => rsx! {
                    div {
                        class: "image-frame",
                        img { src: "{url}", alt: "Vehicle image" }
                    }
                },
            }

            div {
                class: "modal-actions",
                label {
                    class: if can_upload { "btn btn-primary file-button" } else { "btn btn-primary file-button disabled" },
                    Icon { icon: FaUpload, width: 12, height: 12 }
                    if matches!(current, ImageModalState::HasImage { .. }) { " Replace Image" } else { " Upload Image" }
                    input {
                        r#type: "file",
                        accept: "image/jpeg,image/jpg",
                        hidden: true,
                        disabled: !can_upload,
                        onchange: handle_file,
                    }
                }
                if matches!(current, ImageModalState::HasImage { .. }) {
                    Button {
                        variant: ButtonVariant::Destructive,
                        onclick: move |_| apply(state, ImageEvent::DeleteRequested),
                        Icon { icon: FaTrashCan, width: 12, height: 12 }
                        " Delete Image"
                    }
                }
            }
            p { class: "muted", "JPEG only, up to 5MB. Large photos are resized before upload." }

            if matches!(current, ImageModalState::ConfirmingDelete { .. }) {
                ConfirmDialog {
                    title: "Delete Image",
                    message: "Delete this vehicle's image? This cannot be undone.",
                    confirm_label: "Delete",
                    destructive: true,
                    on_cancel: move |_| apply(state, ImageEvent::DeleteCancelled),
                    on_confirm: handle_delete,
                }
            }
        }
    }
}
