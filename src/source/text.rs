//! Plain text range list parser.

/// Newline-delimited range list parser.
pub struct TextParser;

impl TextParser {
    /// Split a body into one token per line.
    ///
    /// Tokens are not validated here; anything that is not a network is
    /// dropped during aggregation. Blank lines are skipped.
    pub fn parse(body: &str) -> Vec<String> {
        body.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let body = "173.245.48.0/20\r\n103.21.244.0/22\n\n  104.16.0.0/13  \n";
        assert_eq!(
            TextParser::parse(body),
            vec!["173.245.48.0/20", "103.21.244.0/22", "104.16.0.0/13"]
        );
    }

    #[test]
    fn test_keeps_unvalidated_tokens() {
        assert_eq!(TextParser::parse("<html>\n"), vec!["<html>"]);
        assert!(TextParser::parse("").is_empty());
    }
}
