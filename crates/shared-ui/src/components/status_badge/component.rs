use dioxus::prelude::*;
use shared_types::Tone;

/// Pill label coloured by the status' tone.
#[component]
pub fn StatusBadge(tone: Tone, #[props(into)] label: String) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span { class: "status-badge", "data-tone": tone.as_str(), "{label}" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_label_with_tone() {
        let html = dioxus_ssr::render_element(rsx! {
            StatusBadge { tone: Tone::Warning, label: "Pending Approval" }
        });
        assert!(html.contains("data-tone=\"warning\""));
        assert!(html.contains("Pending Approval"));
    }
}
