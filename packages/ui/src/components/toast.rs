//! Transient notifications in the top-right corner.
//!
//! Wrap the app in [`ToastProvider`] and call [`use_toast`] anywhere below it.
//! Toasts dismiss themselves after [`ToastOptions::duration_ms`] on the web;
//! the close button works everywhere.

use dioxus::prelude::*;

use crate::Icon;
use crate::icons::{FaCircleCheck, FaCircleExclamation, FaCircleInfo, FaXmark};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastOptions {
    pub duration_ms: u32,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self { duration_ms: 4000 }
    }
}

impl ToastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
struct ToastEntry {
    id: u64,
    kind: ToastKind,
    message: String,
}

/// Handle for pushing toasts. `Copy`, so it can be captured freely.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    entries: Signal<Vec<ToastEntry>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn success(&self, message: String, options: ToastOptions) {
        self.push(ToastKind::Success, message, options);
    }

    pub fn error(&self, message: String, options: ToastOptions) {
        self.push(ToastKind::Error, message, options);
    }

    pub fn info(&self, message: String, options: ToastOptions) {
        self.push(ToastKind::Info, message, options);
    }

    pub fn dismiss(&self, id: u64) {
        let mut entries = self.entries;
        entries.write().retain(|t| t.id != id);
    }

    fn push(&self, kind: ToastKind, message: String, options: ToastOptions) {
        let mut next_id = self.next_id;
        let id = *next_id.peek();
        next_id.set(id + 1);

        let mut entries = self.entries;
        entries.write().push(ToastEntry { id, kind, message });

        #[cfg(target_arch = "wasm32")]
        {
            let toasts = *self;
            // Outlives the component that raised it, e.g. a closing modal.
            spawn_forever(async move {
                gloo_timers::future::TimeoutFuture::new(options.duration_ms).await;
                toasts.dismiss(id);
            });
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = options;
    }
}

pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}

#[component]
pub fn ToastProvider(children: Element) -> Element {
    let entries = use_signal(Vec::<ToastEntry>::new);
    let next_id = use_signal(|| 0u64);
    let toasts = use_context_provider(|| Toasts { entries, next_id });

    rsx! {
        {children}
        div {
            class: "toast-stack",
            for toast in entries() {
                div {
                    key: "{toast.id}",
                    class: match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                        ToastKind::Info => "toast toast-info",
                    },
                    match toast.kind {
                        ToastKind::Success => rsx! { Icon { icon: FaCircleCheck, width: 16, height: 16 } },
                        ToastKind::Error => rsx! { Icon { icon: FaCircleExclamation, width: 16, height: 16 } },
                        ToastKind::Info => rsx! { Icon { icon: FaCircleInfo, width: 16, height: 16 } },
                    }
                    span { class: "toast-message", "{toast.message}" }
                    button {
                        class: "toast-close",
                        onclick: move |_| toasts.dismiss(toast.id),
                        Icon { icon: FaXmark, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}
