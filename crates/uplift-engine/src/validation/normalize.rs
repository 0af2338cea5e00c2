//! Text normalization for assertion checks.

use crate::syntax::Dialect;

/// Normalize `text` for comparison. By default comments are stripped and all
/// whitespace removed; with `keep_comments` comments stay and whitespace runs
/// collapse to a single space.
pub fn normalize(text: &str, dialect: Dialect, keep_comments: bool) -> String {
    if keep_comments {
        collapse_whitespace(text)
    } else {
        strip_comments(text, dialect)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove comments, leaving string and character literals intact.
pub fn strip_comments(text: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::CSharp => strip_csharp(text),
        Dialect::VisualBasic => strip_visual_basic(text),
    }
}

fn strip_csharp(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match (c, next) {
            ('/', Some('/')) => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            ('/', Some('*')) => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(chars.len());
                out.push(' ');
            }
            ('@', Some('"')) => {
                out.push_str("@\"");
                i += 2;
                // Verbatim: `""` escapes a quote, backslashes are literal.
                while i < chars.len() {
                    out.push(chars[i]);
                    if chars[i] == '"' {
                        if chars.get(i + 1) == Some(&'"') {
                            out.push('"');
                            i += 2;
                            continue;
                        }
                        i += 1;
                        break;
                    }
                    i += 1;
                }
            }
            ('"', _) | ('\'', _) => {
                out.push(c);
                i += 1;
                while i < chars.len() {
                    out.push(chars[i]);
                    if chars[i] == '\\' {
                        if let Some(&escaped) = chars.get(i + 1) {
                            out.push(escaped);
                        }
                        i += 2;
                        continue;
                    }
                    let done = chars[i] == c || chars[i] == '\n';
                    i += 1;
                    if done {
                        break;
                    }
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

fn strip_visual_basic(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        out.push_str(&strip_visual_basic_line(line));
    }
    out
}

fn strip_visual_basic_line(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let newline = if line.ends_with('\n') { "\n" } else { "" };
    let mut out = String::with_capacity(line.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '"' {
                if chars.get(i + 1) == Some(&'"') {
                    out.push('"');
                    i += 2;
                    continue;
                }
                in_string = false;
            }
            i += 1;
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '\'' => {
                out.push_str(newline);
                return out;
            }
            _ if is_rem_at(&chars, i) => {
                out.push_str(newline);
                return out;
            }
            _ => out.push(c),
        }
        i += 1;
    }
    out
}

/// `REM` as a standalone keyword starting at `i`.
fn is_rem_at(chars: &[char], i: usize) -> bool {
    let starts_token = i == 0 || chars[i - 1].is_whitespace() || chars[i - 1] == ':';
    let word: String = chars.iter().skip(i).take(3).collect();
    let ends_token = chars.get(i + 3).map_or(true, |c| c.is_whitespace());
    starts_token && word.eq_ignore_ascii_case("rem") && ends_token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csharp_comments_stripped_strings_kept() {
        let text = "var a = \"// not a comment\"; // TODO fix\n/* TODO */ b();";
        let stripped = strip_comments(text, Dialect::CSharp);
        assert!(stripped.contains("\"// not a comment\""));
        assert!(!stripped.contains("TODO"));
    }

    #[test]
    fn test_csharp_char_literal_is_not_a_comment() {
        let text = "var q = '\\''; // gone";
        assert_eq!(normalize(text, Dialect::CSharp, false), "varq='\\'';");
    }

    #[test]
    fn test_vb_comments_stripped() {
        let text = "Dim s = \"It's\" ' trailing\nREM whole line\nCall Run() : Rem also\n";
        let stripped = strip_comments(text, Dialect::VisualBasic);
        assert!(stripped.contains("\"It's\""));
        assert!(!stripped.contains("trailing"));
        assert!(!stripped.contains("whole line"));
        assert!(!stripped.contains("also"));
        assert!(stripped.contains("Call Run()"));
    }

    #[test]
    fn test_keep_comments_collapses_whitespace() {
        assert_eq!(
            normalize("a   //  note\n\t b", Dialect::CSharp, true),
            "a // note b"
        );
    }

    #[test]
    fn test_identifier_starting_with_rem_is_kept() {
        let stripped = strip_comments("Remove(x)\n", Dialect::VisualBasic);
        assert_eq!(stripped, "Remove(x)\n");
    }
}
