use crate::routes::Route;
use dioxus::prelude::*;

/// Unknown paths fall through to the login page, which forwards a live
/// session to its home.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    tracing::debug!(path = %route.join("/"), "Unknown route");
    navigator().replace(Route::Login {});
    rsx! {
        div { class: "auth-guard-loading",
            p { "Redirecting..." }
        }
    }
}
