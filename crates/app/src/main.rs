use dioxus::prelude::*;
use shared_types::FeatureFlags;

mod auth;
mod download;
mod form;
mod routes;
use auth::AuthState;
use routes::{BellRefresh, Route};

const MAIN_CSS: Asset = asset!("/assets/main.css");
const PAGES_CSS: Asset = asset!("/assets/pages.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move { Ok(society_router()) });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

/// Dioxus pages plus the `/api` surface over one seeded society store.
/// Request ids wrap everything so REST logs and server-function spans line up.
#[cfg(feature = "server")]
fn society_router() -> axum::Router {
    use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

    server::config::load_feature_flags();
    let flags = server::config::feature_flags();
    if flags.telemetry {
        server::telemetry::init_telemetry();
    }
    server::health::record_start_time();

    let state = server::db::AppState::shared();
    let mut router = dioxus::server::router(App).merge(server::openapi::api_router(state));
    if flags.telemetry {
        router = router.layer(server::telemetry::OtelTraceLayer);
    }
    tracing::info!(?flags, "AuraLiva router assembled");

    router
        .layer(axum::middleware::from_fn(server::auth::middleware::auth_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[component]
fn App() -> Element {
    // Flags gate the XLSX buttons; a failed fetch means none of the extras.
    let flags_resource = use_server_future(|| server::api::get_feature_flags())?;
    let flags: FeatureFlags = flags_resource
        .read()
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .cloned()
        .unwrap_or_default();

    use_context_provider(|| flags);
    use_context_provider(AuthState::new);
    use_context_provider(BellRefresh::new);
    shared_ui::theme::use_theme_provider();

    rsx! {
        document::Title { "AuraLiva" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: PAGES_CSS }
        shared_ui::theme::ThemeSeed {}
        shared_ui::ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "auth-guard-loading",
                        p { "Loading the society dashboard..." }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
