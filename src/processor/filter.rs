use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};

/// Characters the regex engine treats as syntax. A delimiter from this set stays
/// escaped inside the body; any other escaped delimiter becomes a literal.
const REGEX_META: &[char] = &[
    '.', '+', '*', '?', '(', ')', '|', '[', ']', '{', '}', '^', '$', '#', '&', '-', '~',
];

const FLAGS: &[char] = &['i', 'm', 's', 'x', 'U', 'u', 'D', 'A', 'S', 'X'];

/// Compile an ignore pattern.
///
/// Delimited patterns (`/body/flags`) are unwrapped and their trailing flags
/// applied; anything else is compiled as a bare regular expression.
pub fn compile_pattern(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    let Some((body, flags)) = split_delimited(pattern) else {
        return Regex::new(pattern);
    };

    let expression = if flags.contains('A') {
        // A trailing newline closes any `#` comment the body ends with in extended mode
        let close = if flags.contains('x') { "\n)" } else { ")" };
        format!("\\A(?:{body}{close}")
    } else {
        body
    };

    RegexBuilder::new(&expression)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .ignore_whitespace(flags.contains('x'))
        .swap_greed(flags.contains('U'))
        .build()
}

/// Split `/body/flags` into its body and flags.
///
/// Any non-alphanumeric, non-backslash, non-whitespace character opens a
/// delimited pattern. Bracket openers close with their partner and may nest
/// (`{a{2}}i`). Returns `None` when the pattern does not start with a
/// delimiter, is never closed, or is followed by anything other than flags.
fn split_delimited(pattern: &str) -> Option<(String, &str)> {
    let mut chars = pattern.char_indices();
    let (_, open) = chars.next()?;
    if open.is_alphanumeric() || open.is_whitespace() || open == '\\' {
        return None;
    }
    let close = closing_delimiter(open);

    let mut body = String::with_capacity(pattern.len());
    let mut depth = 0usize;
    while let Some((index, c)) = chars.next() {
        if c == '\\' {
            let (_, escaped) = chars.next()?;
            if (escaped != open && escaped != close) || REGEX_META.contains(&escaped) {
                body.push('\\');
            }
            body.push(escaped);
        } else if c == close && depth == 0 {
            let flags = &pattern[index + c.len_utf8()..];
            return flags
                .chars()
                .all(|flag| FLAGS.contains(&flag))
                .then_some((body, flags));
        } else {
            if open != close {
                if c == open {
                    depth += 1;
                } else if c == close {
                    depth -= 1;
                }
            }
            body.push(c);
        }
    }

    None
}

fn closing_delimiter(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    }
}

/// Compile every pattern up front, reporting the first one that fails.
pub fn validate_patterns(patterns: &[String]) -> Result<()> {
    for (index, pattern) in patterns.iter().enumerate() {
        compile_pattern(pattern).map_err(|e| {
            Error::Config(format!(
                "Ignore pattern #{} ('{}') is invalid: {}",
                index + 1,
                pattern,
                e
            ))
        })?;
    }

    Ok(())
}

/// Ignore patterns compiled lazily, each at most once.
pub struct PatternSet<'a> {
    patterns: &'a [String],
    compiled: Vec<Option<Regex>>,
}

impl<'a> PatternSet<'a> {
    pub fn new(patterns: &'a [String]) -> Self {
        Self {
            patterns,
            compiled: vec![None; patterns.len()],
        }
    }

    /// Whether `url` matches any pattern. Patterns are tried in list order and
    /// compiled on first use, so a broken pattern only surfaces once a URL
    /// reaches it.
    pub fn is_ignored(&mut self, url: &str) -> Result<bool> {
        for (pattern, slot) in self.patterns.iter().zip(self.compiled.iter_mut()) {
            if slot.is_none() {
                let regex = compile_pattern(pattern).map_err(|e| Error::InvalidPattern {
                    pattern: pattern.clone(),
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
                *slot = Some(regex);
            }

            if slot.as_ref().is_some_and(|regex| regex.is_match(url)) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

/// Test a single URL against `patterns`.
pub fn is_ignored(url: &str, patterns: &[String]) -> Result<bool> {
    PatternSet::new(patterns).is_ignored(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_delimited_pattern() {
        let ignored = patterns(&[r"/ads\//"]);
        assert!(is_ignored("ads/x.png", &ignored).unwrap());
        assert!(is_ignored("https://cdn.example.com/ads/banner.gif", &ignored).unwrap());
        assert!(!is_ignored("real.png", &ignored).unwrap());
        assert!(!is_ignored("ads.png", &ignored).unwrap());
    }

    #[test]
    fn test_bare_pattern() {
        let ignored = patterns(&[r"pixel\.gif$"]);
        assert!(is_ignored("https://t.example.com/pixel.gif", &ignored).unwrap());
        assert!(!is_ignored("https://t.example.com/pixel.gif?x=1", &ignored).unwrap());
    }

    #[test]
    fn test_flags() {
        let regex = compile_pattern("#FeedBurner#i").unwrap();
        assert!(regex.is_match("http://feeds.feedburner.com/~r/x"));

        let regex = compile_pattern("~tracking~").unwrap();
        assert!(!regex.is_match("TRACKING"));

        let anchored = compile_pattern("/ads/A").unwrap();
        assert!(anchored.is_match("ads/1.png"));
        assert!(!anchored.is_match("/static/ads/1.png"));
    }

    #[test]
    fn test_hash_delimiter_keeps_escape() {
        let regex = compile_pattern(r"#a\#b#").unwrap();
        assert!(regex.is_match("a#b"));
    }

    #[test]
    fn test_not_delimited_falls_back_to_bare() {
        // Opening delimiters that are never closed compile as written
        let regex = compile_pattern(r".*\.gif").unwrap();
        assert!(regex.is_match("spacer.gif"));

        let regex = compile_pattern("/unclosed").unwrap();
        assert!(regex.is_match("path/unclosed"));
    }

    #[test]
    fn test_bracket_delimiters() {
        let regex = compile_pattern("[ads]").unwrap();
        assert!(regex.is_match("x/ads/y"));
        assert!(!regex.is_match("a.gif"));

        let regex = compile_pattern("{ADS}i").unwrap();
        assert!(regex.is_match("https://example.com/ads/1.png"));

        let regex = compile_pattern("(pixel|beacon)").unwrap();
        assert!(regex.is_match("beacon.gif"));

        let regex = compile_pattern("<tracker>").unwrap();
        assert!(regex.is_match("tracker.png"));
    }

    #[test]
    fn test_nested_brackets() {
        let regex = compile_pattern("{a{2}}").unwrap();
        assert!(regex.is_match("caab"));
        assert!(!regex.is_match("cab"));

        let regex = compile_pattern(r"(\(x\))").unwrap();
        assert!(regex.is_match("a(x)b"));
    }

    #[test]
    fn test_other_punctuation_delimiters() {
        let regex = compile_pattern("'ads'").unwrap();
        assert!(regex.is_match("x/ads/y"));

        let regex = compile_pattern("+ads+").unwrap();
        assert!(regex.is_match("x/ads/y"));

        let regex = compile_pattern(r"+a\+b+").unwrap();
        assert!(regex.is_match("a+b"));

        let regex = compile_pattern(r":https\://ads:").unwrap();
        assert!(regex.is_match("https://ads.example.com"));

        let regex = compile_pattern("=Ads=i").unwrap();
        assert!(regex.is_match("ads"));
    }

    #[test]
    fn test_invalid_pattern_reported_at_match_time() {
        let ignored = patterns(&["/(unclosed/"]);
        let err = is_ignored("a.png", &ignored).unwrap_err();
        match err {
            Error::InvalidPattern { pattern, url, .. } => {
                assert_eq!(pattern, "/(unclosed/");
                assert_eq!(url, "a.png");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_circuit_skips_later_invalid_pattern() {
        let ignored = patterns(&["ads", "("]);
        assert!(is_ignored("ads/x.png", &ignored).unwrap());
        assert!(is_ignored("real.png", &ignored).is_err());
    }

    #[test]
    fn test_empty_list_ignores_nothing() {
        assert!(!is_ignored("anything.png", &[]).unwrap());
    }

    #[test]
    fn test_validate_patterns() {
        assert!(validate_patterns(&patterns(&["/ads/", "pixel"])).is_ok());

        let err = validate_patterns(&patterns(&["/ads/", "[x"])).unwrap_err();
        assert!(err.to_string().contains("#2"));
    }
}
