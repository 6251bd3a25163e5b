mod resident;
mod security;
mod staff;

pub use resident::ResidentHome;
pub use security::SecurityHome;
pub use staff::AdminDashboard;

use shared_types::Tone;

/// Chart colour for a tone, matching the badge palette.
pub(crate) fn tone_color(tone: Tone) -> &'static str {
    match tone {
        Tone::Success => "var(--success)",
        Tone::Warning => "var(--warning)",
        Tone::Error => "var(--danger)",
        Tone::Info => "var(--info)",
        Tone::Neutral => "var(--text-muted)",
    }
}

/// CSS `conic-gradient` stops for a pie of `(count, tone)` slices.
pub(crate) fn pie_gradient(slices: &[(usize, Tone)]) -> String {
    let total: usize = slices.iter().map(|(n, _)| n).sum();
    if total == 0 {
        return "conic-gradient(var(--surface-muted) 0 100%)".to_string();
    }
    let mut start = 0.0_f64;
    let stops: Vec<String> = slices
        .iter()
        .map(|(count, tone)| {
            let end = start + *count as f64 * 100.0 / total as f64;
            let stop = format!("{} {:.1}% {:.1}%", tone_color(*tone), start, end);
            start = end;
            stop
        })
        .collect();
    format!("conic-gradient({})", stops.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pie_splits_by_share() {
        let css = pie_gradient(&[(1, Tone::Error), (3, Tone::Success)]);
        assert_eq!(
            css,
            "conic-gradient(var(--danger) 0.0% 25.0%, var(--success) 25.0% 100.0%)"
        );
    }

    #[test]
    fn empty_pie_is_grey() {
        assert!(pie_gradient(&[(0, Tone::Info)]).contains("--surface-muted"));
    }
}
