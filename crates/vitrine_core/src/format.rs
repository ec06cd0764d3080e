//! Conversion of message templates into the client-side templating format.
//!
//! Templates follow the `MessageFormat` quoting convention: two single quotes print one, a
//! lone single quote is dropped. Quoted placeholders are *not* protected, so `'{0}'` still
//! becomes `{{param_0}}`. Indexed placeholders (`{0}`, `{ 1 }`) are rewritten into the named
//! form `{{param_0}}`, `{{param_1}}`.
//!
//! The conversion is one-way: converting an already converted template is not a no-op.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static QUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new("'('?)").expect("valid regex"));

// ASCII whitespace and digits only.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(?-u:\s)*([0-9]+)(?-u:\s)*\}").expect("valid regex")
});

/// Converts a raw message template, e.g. `Don''t forget {0}` into `Don't forget {{param_0}}`.
pub fn convert_message(raw: &str) -> String {
    let unquoted = unescape_quotes(raw);
    rewrite_placeholders(&unquoted).into_owned()
}

fn unescape_quotes(raw: &str) -> Cow<'_, str> {
    QUOTE.replace_all(raw, "$1")
}

fn rewrite_placeholders(value: &str) -> Cow<'_, str> {
    PLACEHOLDER.replace_all(value, |caps: &Captures| format!("{{{{param_{}}}}}", &caps[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(convert_message("Sign in"), "Sign in");
        assert_eq!(convert_message(""), "");
        assert_eq!(convert_message(&convert_message("Sign in")), "Sign in");
    }

    #[test]
    fn doubled_quotes_become_single() {
        assert_eq!(convert_message("Don''t {0}"), "Don't {{param_0}}");
    }

    #[test]
    fn lone_quotes_are_stripped() {
        assert_eq!(convert_message("it's"), "its");
        assert_eq!(convert_message("trailing'"), "trailing");
        assert_eq!(convert_message("'''"), "'");
        assert_eq!(convert_message("''''"), "''");
    }

    #[test]
    fn quoted_placeholders_are_still_substituted() {
        assert_eq!(convert_message("'{0}'"), "{{param_0}}");
    }

    #[test]
    fn placeholders_with_whitespace() {
        assert_eq!(
            convert_message("Don''t forget {0} and { 1 }"),
            "Don't forget {{param_0}} and {{param_1}}"
        );
        assert_eq!(convert_message("{  12 }"), "{{param_12}}");
        assert_eq!(convert_message("{\t3\n}"), "{{param_3}}");
    }

    #[test]
    fn repeated_placeholders() {
        assert_eq!(convert_message("{0}{0}"), "{{param_0}}{{param_0}}");
        assert_eq!(
            convert_message("{1} then { 1 } then {0}"),
            "{{param_1}} then {{param_1}} then {{param_0}}"
        );
    }

    #[test]
    fn malformed_placeholders_are_left_alone() {
        assert_eq!(convert_message("{name}"), "{name}");
        assert_eq!(convert_message("{0,number}"), "{0,number}");
        assert_eq!(convert_message("{ }"), "{ }");
        assert_eq!(convert_message("{-1}"), "{-1}");
        assert_eq!(convert_message("{0"), "{0");
    }

    #[test]
    fn nested_braces_rewrite_the_inner_placeholder() {
        assert_eq!(convert_message("{{0}}"), "{{{param_0}}}");
    }

    #[test]
    fn digits_are_kept_verbatim() {
        assert_eq!(convert_message("{007}"), "{{param_007}}");
    }

    #[test]
    fn conversion_is_one_way() {
        let once = convert_message("It''s {0}");
        assert_eq!(once, "It's {{param_0}}");
        assert_eq!(convert_message(&once), "Its {{param_0}}");
    }
}
