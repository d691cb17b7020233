//! Line protocol: command tokenizer and reply formatting
//!
//! Commands are whitespace-separated tokens; a token may be wrapped in double
//! quotes to carry spaces, with `\"` and `\\` escapes inside quotes.

/// Reply to one command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Status line: OK
    Status(String),
    /// Error line: ERR message
    Error(String),
    /// Integer: (integer) 3
    Integer(i64),
    /// Value or nil: "foo" / (nil)
    Value(Option<String>),
    /// Numbered list of values
    List(Vec<String>),
    /// Free-form multi-line text (INFO)
    Text(String),
}

impl Reply {
    /// Render for the terminal
    pub fn render(&self) -> String {
        match self {
            Reply::Status(s) => s.clone(),
            Reply::Error(e) => format!("(error) {}", e),
            Reply::Integer(i) => format!("(integer) {}", i),
            Reply::Value(None) => "(nil)".to_string(),
            Reply::Value(Some(v)) => format!("{:?}", v),
            Reply::List(items) if items.is_empty() => "(empty list)".to_string(),
            Reply::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}) {:?}", i + 1, item))
                .collect::<Vec<_>>()
                .join("\n"),
            Reply::Text(t) => t.trim_end().to_string(),
        }
    }
}

/// Split a command line into tokens
///
/// # Returns
/// * `Ok(None)` for a blank line or a `#` comment
/// * `Err` for an unterminated quote
pub fn tokenize(line: &str) -> Result<Option<Vec<String>>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if c == '"' {
            chars.next();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some(escaped) => token.push(escaped),
                        None => break,
                    },
                    _ => token.push(c),
                }
            }
            if !closed {
                return Err("unterminated quoted string".to_string());
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    Ok(Some(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_plain() {
        let tokens = tokenize("PUT key value").unwrap().unwrap();
        assert_eq!(tokens, vec!["PUT", "key", "value"]);
    }

    #[test]
    fn test_tokenize_quoted() {
        let tokens = tokenize(r#"put "my key" "say \"hi\"""#).unwrap().unwrap();
        assert_eq!(tokens, vec!["put", "my key", "say \"hi\""]);
    }

    #[test]
    fn test_tokenize_blank_and_comment() {
        assert_eq!(tokenize("   ").unwrap(), None);
        assert_eq!(tokenize("# warm up").unwrap(), None);
    }

    #[test]
    fn test_tokenize_unterminated() {
        assert!(tokenize(r#"get "open"#).is_err());
    }

    #[test]
    fn test_render() {
        assert_eq!(Reply::Status("OK".to_string()).render(), "OK");
        assert_eq!(Reply::Integer(3).render(), "(integer) 3");
        assert_eq!(Reply::Value(None).render(), "(nil)");
        assert_eq!(Reply::Value(Some("foo".to_string())).render(), "\"foo\"");
        assert_eq!(Reply::Error("ERR bad".to_string()).render(), "(error) ERR bad");
        assert_eq!(Reply::List(vec![]).render(), "(empty list)");
        assert_eq!(
            Reply::List(vec!["a".to_string(), "b".to_string()]).render(),
            "1) \"a\"\n2) \"b\""
        );
    }
}
