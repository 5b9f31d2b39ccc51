//! Classifier: decides which [`LogType`] a file's content belongs to.
//!
//! Rules are tried in order and the first match wins:
//!
//! 1. MySQL slow-query markers (`# Time:`, `# User@Host:`, `# Query_time:`)
//! 2. A JSON access-log object with `timestamp`, `request_method`,
//!    `request_uri` and `status` keys, in that order, on one line
//! 3. A `<metric> <number>` pair on some line, for one of the known system
//!    metrics
//!
//! Classification looks at content only. Filenames never influence it.

use regex::Regex;

use crate::types::LogType;

const MYSQL_MARKERS: &[&str] = &["# Time:", "# User@Host:", "# Query_time:"];

const ACCESS_LOG_PATTERN: &str =
    r#"\{.*"timestamp".*"request_method".*"request_uri".*"status".*\}"#;

/// A known metric name followed by a number, anywhere on a line. Prefixes
/// such as timestamps and trailing units are allowed.
const METRIC_LINE_PATTERN: &str =
    r"\b(?:cpu_usage|memory_usage|disk_usage|network_in|network_out|load_average)[ \t]+-?\d+(?:\.\d+)?";

/// How a single rule inspects the decoded text.
#[derive(Debug, Clone)]
enum Matcher {
    /// Any of the literals appears anywhere.
    AnyLiteral(&'static [&'static str]),
    Pattern(Regex),
}

impl Matcher {
    fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::AnyLiteral(needles) => needles.iter().any(|n| text.contains(n)),
            Matcher::Pattern(re) => re.is_match(text),
        }
    }
}

#[derive(Debug, Clone)]
struct Rule {
    log_type: LogType,
    matcher: Matcher,
}

/// Content-sniffing classifier. Cheap to clone; build once and share.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        // Order matters: first match wins.
        let rules = vec![
            Rule {
                log_type: LogType::Mysql,
                matcher: Matcher::AnyLiteral(MYSQL_MARKERS),
            },
            Rule {
                log_type: LogType::Nginx,
                matcher: Matcher::Pattern(
                    Regex::new(ACCESS_LOG_PATTERN).expect("built-in access log pattern must compile"),
                ),
            },
            Rule {
                log_type: LogType::System,
                matcher: Matcher::Pattern(
                    Regex::new(METRIC_LINE_PATTERN).expect("built-in metric pattern must compile"),
                ),
            },
        ];
        Self { rules }
    }

    /// Classify raw file content. Invalid UTF-8 is replaced, never rejected.
    ///
    /// Returns `None` when no rule matches.
    pub fn classify(&self, content: &[u8]) -> Option<LogType> {
        let text = String::from_utf8_lossy(content);
        self.classify_text(&text)
    }

    /// Classify already-decoded text.
    pub fn classify_text(&self, text: &str) -> Option<LogType> {
        self.rules
            .iter()
            .find(|rule| rule.matcher.is_match(text))
            .map(|rule| rule.log_type)
    }
}
