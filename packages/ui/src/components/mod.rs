//! Small building blocks shared by every view.

mod button;
pub use button::{Button, ButtonVariant};

mod input;
pub use input::{Input, Label, Textarea};

mod toast;
pub use toast::{use_toast, ToastKind, ToastOptions, ToastProvider, Toasts};
