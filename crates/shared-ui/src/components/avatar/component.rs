use dioxus::prelude::*;

/// Up to two uppercase initials, e.g. "John Doe" -> "JD".
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

/// Round profile picture with an initials fallback when no image is set.
#[component]
pub fn Avatar(
    name: String,
    #[props(default)] src: Option<String>,
    #[props(default = 36)] size: u32,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span {
            class: "avatar",
            style: "width: {size}px; height: {size}px;",
            title: "{name}",
            match src.filter(|s| !s.is_empty()) {
                Some(url) => rsx! { img { src: "{url}", alt: "{name}" } },
                None => rsx! { span { class: "avatar-fallback", {initials(&name)} } },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("John Doe"), "JD");
        assert_eq!(initials("society secretary office"), "SS");
        assert_eq!(initials("Admin"), "A");
        assert_eq!(initials("  "), "");
    }
}
