use dioxus::prelude::*;

/// Horizontal bar filled to `percent` (clamped to 0..=100) with an optional
/// caption. Used for poll results and monthly expense bars.
#[component]
pub fn ProgressBar(
    percent: u32,
    #[props(default)] label: Option<String>,
    #[props(default)] caption: Option<String>,
) -> Element {
    let width = percent.min(100);
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "progress",
            if label.is_some() || caption.is_some() {
                div { class: "progress-labels",
                    span { {label.unwrap_or_default()} }
                    span { class: "progress-caption", {caption.unwrap_or_default()} }
                }
            }
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {width}%;" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_clamped() {
        let html = dioxus_ssr::render_element(rsx! {
            ProgressBar { percent: 140 }
        });
        assert!(html.contains("width: 100%;"));
    }
}
