//! Text preparation for speech synthesis.
//!
//! Clients that read replies aloud should voice `sanitize_for_speech(reply)`
//! instead of the reply itself. The reply text shown in the transcript is never
//! modified.

use std::sync::LazyLock;

use regex::Regex;

/// Glyphs the assistant decorates replies with, plus the emoji variation selector.
static DECORATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[🎨⚙💾☁🤖🔧✨👋📍🚀📚🎓📞📧📱👤💼🛠\u{FE0F}]")
        .expect("decoration pattern is valid")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

pub fn sanitize_for_speech(text: &str) -> String {
    let stripped = DECORATION.replace_all(text, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    let spoken = collapsed.trim();
    if spoken.is_empty() {
        text.to_string()
    } else {
        spoken.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_category_emoji() {
        let text = "🎨 Frontend: React\n\n⚙️ Backend: Rust";
        assert_eq!(sanitize_for_speech(text), "Frontend: React Backend: Rust");
    }

    #[test]
    fn test_lone_newline_survives() {
        let text = "Email: a@b.c\nPhone: 123";
        assert_eq!(sanitize_for_speech(text), text);
    }

    #[test]
    fn test_newline_next_to_stripped_emoji_collapses() {
        let text = "📧 Email: a@b.c\n📱 Phone: 123";
        assert_eq!(sanitize_for_speech(text), "Email: a@b.c Phone: 123");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(sanitize_for_speech("Hello there"), "Hello there");
    }

    #[test]
    fn test_emoji_only_falls_back_to_original() {
        assert_eq!(sanitize_for_speech("🚀"), "🚀");
    }
}
