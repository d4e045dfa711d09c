//! Shell quoting for command lines sent through the execution channel
//!
//! Every string that reaches the remote shell from user input passes through
//! one of these functions. Targets are double-quoted. `!` is left alone there:
//! `sh -c` does no history expansion and keeps a backslash before `!`. Key
//! payloads are single-quoted so nothing inside them is interpreted, after
//! [`escape_separator`] has protected them from tmux's own argument parsing.

/// Wrap `s` in single quotes, closing and reopening around embedded quotes
///
/// `it's` becomes `'it'\''s'`. Inside single quotes the shell treats every
/// byte literally, so this is safe for arbitrary input.
pub fn single_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Wrap `s` in double quotes, escaping the characters the shell still
/// interprets there: `\`, `"`, `$` and `` ` ``
pub fn double_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Escape a trailing `;` so tmux does not take it as a command separator
///
/// tmux turns a final `\;` back into `;`, so `echo hi;` is sent as
/// `echo hi\;` and `a\;` as `a\\;`.
pub fn escape_separator(s: &str) -> String {
    match s.strip_suffix(';') {
        Some(head) => format!("{head}\\;"),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quote_plain() {
        assert_eq!(single_quote("ls -la"), "'ls -la'");
        assert_eq!(single_quote(""), "''");
    }

    #[test]
    fn test_single_quote_embedded_quote() {
        assert_eq!(single_quote("it's"), "'it'\\''s'");
        assert_eq!(single_quote("'"), "''\\'''");
    }

    #[test]
    fn test_single_quote_leaves_metacharacters() {
        assert_eq!(single_quote("$(rm -rf ~); `x`"), "'$(rm -rf ~); `x`'");
    }

    #[test]
    fn test_double_quote_escapes() {
        assert_eq!(double_quote("main:0.1"), "\"main:0.1\"");
        assert_eq!(double_quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(double_quote("$HOME"), "\"\\$HOME\"");
        assert_eq!(double_quote("`id`"), "\"\\`id\\`\"");
        assert_eq!(double_quote("back\\slash"), "\"back\\\\slash\"");
    }

    #[test]
    fn test_double_quote_keeps_bang() {
        assert_eq!(double_quote("a!b"), "\"a!b\"");
        assert_eq!(shell_words::split(&double_quote("a!b")).unwrap(), vec!["a!b"]);
    }

    #[test]
    fn test_escape_separator() {
        assert_eq!(escape_separator("echo hi;"), "echo hi\\;");
        assert_eq!(escape_separator(";"), "\\;");
        assert_eq!(escape_separator("a\\;"), "a\\\\;");
        assert_eq!(escape_separator("a;b"), "a;b");
        assert_eq!(escape_separator(""), "");
    }
}
