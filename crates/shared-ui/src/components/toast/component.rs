use dioxus::prelude::*;
use dioxus_primitives::toast as prim;
use shared_types::AppError;

pub use dioxus_primitives::toast::{use_toast, ToastOptions, Toasts};

#[component]
pub fn ToastProvider(props: prim::ToastProviderProps) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::ToastProvider { ..props }
    }
}

/// Shorthands for the success/error feedback every form gives.
pub trait ToastExt {
    fn ok(&self, message: impl Into<String>);
    fn fail(&self, message: impl Into<String>);
    /// Show the user-facing message carried by a failed server call.
    fn server_error(&self, error: &impl std::fmt::Display);
}

impl ToastExt for Toasts {
    fn ok(&self, message: impl Into<String>) {
        self.success(message.into(), ToastOptions::new());
    }

    fn fail(&self, message: impl Into<String>) {
        self.error(message.into(), ToastOptions::new());
    }

    fn server_error(&self, error: &impl std::fmt::Display) {
        self.fail(AppError::friendly_message(&error.to_string()));
    }
}
