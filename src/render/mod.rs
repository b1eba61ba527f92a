//! Renderers: pure string builders from the module model, no I/O.

pub mod html;
pub mod index;

/// Narrow legacy escaping: only angle brackets, only where applied.
/// Full HTML escaping is deliberately not performed.
pub(crate) fn escape_angle(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Hard cutoff at `max` characters with an ellipsis marker when truncated.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let mut out: String = text.chars().take(max).collect();
        out.push_str("...");
        out
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_only_angle_brackets() {
        assert_eq!(
            escape_angle("a <b> & \"c\""),
            "a &lt;b&gt; & \"c\""
        );
    }

    #[test]
    fn truncate_adds_ellipsis_past_limit() {
        assert_eq!(truncate("abcdef", 4), "abcd...");
        assert_eq!(truncate("abcd", 4), "abcd");
        assert_eq!(truncate("", 4), "");
    }
}
