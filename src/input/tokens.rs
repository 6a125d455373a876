use tracing::debug;

/// Most tokens kept from one line. Anything after is dropped.
pub const MAX_TOKENS: usize = 128;

/// Tokens of one line, borrowed from the line buffer.
///
/// The borrow keeps the buffer from being refilled while any token is alive.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenList<'a> {
    tokens: Vec<&'a [u8]>,
}

impl<'a> TokenList<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn command(&self) -> Option<&'a [u8]> {
        self.tokens.first().copied()
    }

    pub fn args(&self) -> &[&'a [u8]] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    pub fn as_slice(&self) -> &[&'a [u8]] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.tokens.iter().copied()
    }
}

fn is_separator(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Splits `line` on runs of spaces and tabs.
///
/// No quoting or escaping. Stops silently after [`MAX_TOKENS`] tokens.
pub fn tokenize(line: &[u8]) -> TokenList<'_> {
    let mut tokens = Vec::new();
    let mut rest = line;

    loop {
        let start = rest.iter().position(|&b| !is_separator(b));
        let Some(start) = start else { break };
        rest = &rest[start..];

        if tokens.len() == MAX_TOKENS {
            debug!(cap = MAX_TOKENS, "token limit reached, ignoring rest of line");
            break;
        }

        let end = rest.iter().position(|&b| is_separator(b)).unwrap_or(rest.len());
        tokens.push(&rest[..end]);
        rest = &rest[end..];
    }

    TokenList { tokens }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_simple_command() {
        let tokens = tokenize(b"ls -l /tmp");
        assert_eq!(tokens.as_slice(), &[&b"ls"[..], &b"-l"[..], &b"/tmp"[..]]);
        assert_eq!(tokens.command(), Some(&b"ls"[..]));
        assert_eq!(tokens.args(), &[&b"-l"[..], &b"/tmp"[..]]);
    }

    #[test]
    fn test_collapses_mixed_whitespace() {
        let tokens = tokenize(b" \t cd \t\t  /var  ");
        assert_eq!(tokens.as_slice(), &[&b"cd"[..], &b"/var"[..]]);
    }

    #[test]
    fn test_blank_lines_have_no_tokens() {
        assert!(tokenize(b"").is_empty());
        assert!(tokenize(b"    ").is_empty());
        assert!(tokenize(b"\t \t").is_empty());
        assert_eq!(tokenize(b"").command(), None);
        assert!(tokenize(b"").args().is_empty());
    }

    #[test]
    fn test_no_quote_handling() {
        let tokens = tokenize(br#"echo "a b""#);
        assert_eq!(tokens.as_slice(), &[&b"echo"[..], &b"\"a"[..], &b"b\""[..]]);
    }

    #[test]
    fn test_tokens_borrow_from_line() {
        let line = b"echo hi".to_vec();
        let tokens = tokenize(&line);
        let start = line.as_ptr() as usize;
        assert_eq!(tokens.as_slice()[1].as_ptr() as usize, start + 5);
    }

    #[test]
    fn test_exactly_max_tokens_then_more() {
        let mut line = vec!["t"; MAX_TOKENS].join(" ");
        line.push_str("   overflow and more");
        let tokens = tokenize(line.as_bytes());
        assert_eq!(tokens.len(), MAX_TOKENS);
        assert!(tokens.iter().all(|t| t == b"t"));
    }

    #[test]
    fn test_exactly_max_tokens_with_trailing_space() {
        let line = format!("{} ", vec!["a"; MAX_TOKENS].join("\t"));
        assert_eq!(tokenize(line.as_bytes()).len(), MAX_TOKENS);
    }

    proptest! {
        #[test]
        fn prop_tokens_are_non_empty_and_separator_free(line in "[ \ta-z/.-]{0,600}") {
            let tokens = tokenize(line.as_bytes());
            prop_assert!(tokens.len() <= MAX_TOKENS);
            for token in tokens.iter() {
                prop_assert!(!token.is_empty());
                prop_assert!(!token.iter().any(|&b| is_separator(b)));
            }
        }

        #[test]
        fn prop_matches_whitespace_split_prefix(line in "[ \ta-z]{0,600}") {
            let expected: Vec<&[u8]> = line
                .split([' ', '\t'])
                .filter(|s| !s.is_empty())
                .take(MAX_TOKENS)
                .map(str::as_bytes)
                .collect();
            let tokens = tokenize(line.as_bytes());
            prop_assert_eq!(tokens.as_slice(), &expected[..]);
        }
    }
}
