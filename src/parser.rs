//! Line scanner for the `.strings` text format.
//!
//! The format is line-oriented: an entry is an assignment line
//! `"source" = "translation";`, optionally preceded by a block comment
//! `/* … */` that may span several physical lines. Anything else (blank
//! lines, stray text) is ignored.

use crate::{error::Error, types::LocalizedString};

/// Returns a lazy iterator over the entries of `content`, in file order.
///
/// Each call produces a fresh scan from the top; the iterator is bounded by
/// the line count of the input. A structurally invalid assignment line yields
/// [`Error::MalformedLine`] and parsing should not continue past it.
pub fn entries(content: &str) -> Entries<'_> {
    Entries {
        lines: content.lines(),
        pending_comment: String::new(),
    }
}

/// Iterator state for one scan of a `.strings` document.
///
/// Comment lines are accumulated until the next assignment line consumes
/// them; an accumulated comment with no following assignment is discarded at
/// end of input.
pub struct Entries<'a> {
    lines: std::str::Lines<'a>,
    pending_comment: String,
}

impl Iterator for Entries<'_> {
    type Item = Result<LocalizedString, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let stripped = line.trim();
            if stripped.starts_with('"') && stripped.ends_with(';') {
                let comment = take_comment(&mut self.pending_comment);
                return Some(parse_assignment(line, stripped, comment));
            } else if stripped.starts_with("/*") || stripped.ends_with("*/") {
                // Deliberately permissive: no delimiter balancing. Any line
                // that looks comment-ish is folded into the pending block.
                self.pending_comment.push_str(line);
                self.pending_comment.push('\n');
            }
        }
        None
    }
}

/// Normalizes and consumes the pending comment block: surrounding
/// whitespace and the `/*` `*/` delimiters are stripped; an empty result
/// means "no comment".
fn take_comment(pending_comment: &mut String) -> Option<String> {
    let block = std::mem::take(pending_comment);
    let body = block.trim();
    let body = body.strip_prefix("/*").unwrap_or(body);
    let body = body.strip_suffix("*/").unwrap_or(body);
    let body = body.trim();
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

fn parse_assignment(
    raw_line: &str,
    stripped: &str,
    comment: Option<String>,
) -> Result<LocalizedString, Error> {
    // `stripped` ends with ';', a one-byte char.
    let body = &stripped[..stripped.len() - 1];
    let tokens = split_quoted(body).map_err(|_| Error::MalformedLine(raw_line.to_string()))?;
    match <[String; 3]>::try_from(tokens) {
        Ok([source, eq, translation]) if eq == "=" => {
            LocalizedString::new(source, Some(translation), comment)
        }
        _ => Err(Error::MalformedLine(raw_line.to_string())),
    }
}

/// Splits `input` into whitespace-separated tokens with shell-style quote
/// and escape handling.
///
/// A double-quoted section is part of a single token; within it a backslash
/// escapes only `"` and `\`, and any other backslash pair is kept verbatim.
/// Outside quotes a backslash makes the next character literal. An
/// unterminated quote or a trailing backslash fails with
/// [`Error::MalformedLine`] carrying `input`.
pub fn split_quoted(input: &str) -> Result<Vec<String>, Error> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut has_token = false;
    let mut in_quotes = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => in_quotes = false,
                '\\' => match chars.next() {
                    Some(escaped @ ('"' | '\\')) => current.push(escaped),
                    Some(other) => {
                        current.push('\\');
                        current.push(other);
                    }
                    None => return Err(Error::MalformedLine(input.to_string())),
                },
                _ => current.push(c),
            }
        } else {
            match c {
                '"' => {
                    in_quotes = true;
                    has_token = true;
                }
                '\\' => match chars.next() {
                    Some(escaped) => {
                        current.push(escaped);
                        has_token = true;
                    }
                    None => return Err(Error::MalformedLine(input.to_string())),
                },
                c if c.is_whitespace() => {
                    if has_token {
                        tokens.push(std::mem::take(&mut current));
                        has_token = false;
                    }
                }
                _ => {
                    current.push(c);
                    has_token = true;
                }
            }
        }
    }

    if in_quotes {
        return Err(Error::MalformedLine(input.to_string()));
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn collect(content: &str) -> Vec<LocalizedString> {
        entries(content)
            .collect::<Result<Vec<_>, _>>()
            .expect("content should parse")
    }

    #[test]
    fn test_split_quoted_basic_assignment() {
        let tokens = split_quoted(r#""hello" = "bonjour""#).unwrap();
        assert_eq!(tokens, vec!["hello", "=", "bonjour"]);
    }

    #[test]
    fn test_split_quoted_resolves_escaped_quotes() {
        let tokens = split_quoted(r#""a\"b" = "c\"d""#).unwrap();
        assert_eq!(tokens, vec![r#"a"b"#, "=", r#"c"d"#]);
    }

    #[test]
    fn test_split_quoted_keeps_unknown_escapes_verbatim() {
        let tokens = split_quoted(r#""String\twith \n" = "x""#).unwrap();
        assert_eq!(tokens[0], r"String\twith \n");
    }

    #[test]
    fn test_split_quoted_empty_quoted_token() {
        let tokens = split_quoted(r#""key" = """#).unwrap();
        assert_eq!(tokens, vec!["key", "=", ""]);
    }

    #[test]
    fn test_split_quoted_unbalanced_quote_fails() {
        assert!(matches!(
            split_quoted(r#""unterminated = "x""#),
            Err(Error::MalformedLine(_))
        ));
    }

    #[test]
    fn test_parse_basic_entry_with_comment() {
        let parsed = collect(indoc! {r#"
            /* hello */
            "k" = "v";
        "#});
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].source(), "k");
        assert_eq!(parsed[0].translation(), "v");
        assert_eq!(parsed[0].comment(), Some("hello"));
    }

    #[test]
    fn test_parse_multi_line_comment() {
        let parsed = collect(indoc! {r#"
            /* first line,
               second line */
            "k" = "v";
        "#});
        assert_eq!(
            parsed[0].comment(),
            Some("first line,\n   second line")
        );
    }

    #[test]
    fn test_comment_without_assignment_is_discarded() {
        let parsed = collect(indoc! {r#"
            /* dangling comment */

            stray text
        "#});
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_blank_separator_is_not_captured_in_comment() {
        // The blank line is ignored, not folded into the block; the comment
        // still attaches to the next assignment line.
        let parsed = collect(indoc! {r#"
            /* for k */

            "k" = "v";
            "plain" = "p";
        "#});
        assert_eq!(parsed[0].comment(), Some("for k"));
        assert_eq!(parsed[1].comment(), None);
    }

    #[test]
    fn test_values_containing_equals_and_semicolon() {
        let parsed = collect(indoc! {r#"
            "String with =" = "String with =";
            "String with ;" = "String with ;";
        "#});
        assert_eq!(parsed[0].source(), "String with =");
        assert_eq!(parsed[0].translation(), "String with =");
        assert_eq!(parsed[1].source(), "String with ;");
        assert_eq!(parsed[1].translation(), "String with ;");
    }

    #[test]
    fn test_wrong_token_count_is_fatal() {
        let mut scan = entries(indoc! {r#"
            "A" "B" "C" "D";
        "#});
        match scan.next() {
            Some(Err(Error::MalformedLine(line))) => {
                assert!(line.contains(r#""A" "B" "C" "D";"#))
            }
            other => panic!("expected MalformedLine, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_equals_is_fatal() {
        let mut scan = entries(r#""A" : "B";"#);
        assert!(matches!(
            scan.next(),
            Some(Err(Error::MalformedLine(_)))
        ));
    }

    #[test]
    fn test_empty_source_is_rejected() {
        let mut scan = entries(r#""" = "B";"#);
        assert!(matches!(scan.next(), Some(Err(Error::EmptySource))));
    }

    #[test]
    fn test_blank_lines_and_stray_text_are_ignored() {
        let parsed = collect(indoc! {r#"

            stray text without quotes

            "good" = "yes";

            "another" = "ok";
        "#});
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].source(), "good");
        assert_eq!(parsed[1].source(), "another");
    }

    #[test]
    fn test_scan_is_restartable() {
        let content = r#""k" = "v";"#;
        assert_eq!(entries(content).count(), 1);
        assert_eq!(entries(content).count(), 1);
    }
}
