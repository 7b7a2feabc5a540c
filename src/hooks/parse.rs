use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_HOOKS: usize = 5;

static NUMBERING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").unwrap());

/// Splits a raw completion into hooks.
///
/// Blank lines are dropped, a `"<n>. "` at the very start of a line is
/// removed, each line is trimmed and the result is capped at [`MAX_HOOKS`].
/// Indented numbering is kept. Nothing else about the model's
/// output is checked.
pub fn parse_hooks(raw: &str) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| NUMBERING_RE.replace(line, "").trim().to_string())
        .take(MAX_HOOKS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_more_than_five(raw in "\\PC*(\n\\PC*){0,12}") {
            let hooks = parse_hooks(&raw);
            prop_assert!(hooks.len() <= MAX_HOOKS);
        }

        #[test]
        fn one_hook_per_non_blank_line(lines in proptest::collection::vec("[a-z]{1,12}", 0..5)) {
            let raw = lines.join("\n\n");
            prop_assert_eq!(parse_hooks(&raw), lines);
        }
    }

    #[test]
    fn strips_numbering_drops_blanks_and_truncates() {
        let raw = "1. Hook A\n2. Hook B\n\n3. Hook C\n4. Hook D\n5. Hook E\n6. Hook F";
        assert_eq!(
            parse_hooks(raw),
            vec!["Hook A", "Hook B", "Hook C", "Hook D", "Hook E"]
        );
    }

    #[test]
    fn fewer_lines_are_not_padded() {
        let raw = "1. Only one\n\n   \n2. And two";
        assert_eq!(parse_hooks(raw), vec!["Only one", "And two"]);
    }

    #[test]
    fn lines_without_numbering_are_kept_verbatim() {
        let raw = "Stop scrolling.\nWhat if 3.5 hours is too much?";
        assert_eq!(
            parse_hooks(raw),
            vec!["Stop scrolling.", "What if 3.5 hours is too much?"]
        );
    }

    #[test]
    fn only_leading_numbering_is_removed() {
        assert_eq!(parse_hooks("12.   I tried 2. things"), vec!["I tried 2. things"]);
        assert_eq!(parse_hooks("- 1. bullet first"), vec!["- 1. bullet first"]);
    }

    #[test]
    fn indented_numbering_is_trimmed_but_kept() {
        assert_eq!(parse_hooks(" 1. A\n\t2. B"), vec!["1. A", "2. B"]);
        assert_eq!(parse_hooks("3.  C  \n  "), vec!["C"]);
    }

    #[test]
    fn handles_crlf_line_endings() {
        assert_eq!(parse_hooks("1. One\r\n2. Two\r\n"), vec!["One", "Two"]);
    }

    #[test]
    fn empty_completion_yields_no_hooks() {
        assert!(parse_hooks("").is_empty());
        assert!(parse_hooks("\n \n\t\n").is_empty());
    }
}
