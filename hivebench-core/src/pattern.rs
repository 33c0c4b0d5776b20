//! Traffic pattern loading
//!
//! A pattern file describes every hive under test and, for each of its bees,
//! the probability that a request is fired at that bee during one cycle:
//!
//! ```text
//! <unit_count>
//! <target_count>
//! <ignored separator>
//! <address>            \
//! <port>                | repeated target_count times
//! <probability> x units |
//! <ignored separator>  /
//! ```
//!
//! Parsing is strict. Every error names the 1-based line it was found on and
//! nothing is loaded unless the whole file is valid.

use crate::error::{ParseError, ParseErrorKind, PatternError};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// One hive under test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    /// Ordinal position of the target in the pattern file
    pub id: usize,
    pub host: String,
    pub port: u16,
    /// Send probability per bee index, always `unit_count` long
    pub probabilities: Vec<f64>,
}

impl Target {
    /// `host:port` form used to build request URLs
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn probability(&self, unit: usize) -> Option<f64> {
        self.probabilities.get(unit).copied()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hive {} ({}:{})", self.id, self.host, self.port)
    }
}

/// Read-only set of targets and their per-bee probabilities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternStore {
    unit_count: usize,
    targets: Vec<Target>,
}

impl PatternStore {
    /// Load a pattern file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PatternError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PatternError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::parse(&content)?;
        debug!(
            "Loaded pattern from {:?}: {} targets x {} units",
            path,
            store.target_count(),
            store.unit_count()
        );
        Ok(store)
    }

    /// Parse pattern text
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut cursor = LineCursor::new(content);

        let unit_count = parse_count(cursor.next_line("unit count")?, "unit count")?;
        let target_count = parse_count(cursor.next_line("target count")?, "target count")?;
        cursor.skip_separator();

        // Header counts are untrusted until every block is read
        let mut targets = Vec::new();
        for id in 0..target_count {
            let (line, host) = cursor.next_line("target address")?;
            if host.is_empty() {
                return Err(ParseError::new(line, ParseErrorKind::EmptyAddress));
            }

            let port = parse_port(cursor.next_line("target port")?)?;

            let mut probabilities = Vec::new();
            for _ in 0..unit_count {
                probabilities.push(parse_probability(cursor.next_line("probability")?)?);
            }
            cursor.skip_separator();

            targets.push(Target {
                id,
                host: host.to_string(),
                port,
                probabilities,
            });
        }

        if let Some((line, content)) = cursor.next_non_blank() {
            return Err(ParseError::new(
                line,
                ParseErrorKind::TrailingContent(content.to_string()),
            ));
        }

        Ok(Self {
            unit_count,
            targets,
        })
    }

    pub fn unit_count(&self) -> usize {
        self.unit_count
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn target(&self, index: usize) -> Option<&Target> {
        self.targets.get(index)
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }
}

impl FromStr for PatternStore {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Line iterator that remembers where it is for error reporting
struct LineCursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    consumed: usize,
}

impl<'a> LineCursor<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().enumerate(),
            consumed: 0,
        }
    }

    /// Next line, trimmed, with its 1-based number
    fn next_line(&mut self, expected: &'static str) -> Result<(usize, &'a str), ParseError> {
        match self.lines.next() {
            Some((index, line)) => {
                self.consumed = index + 1;
                Ok((index + 1, line.trim()))
            }
            None => Err(ParseError::new(
                self.consumed + 1,
                ParseErrorKind::MissingLine { expected },
            )),
        }
    }

    /// Separators are ignored whatever they contain and may be absent at EOF
    fn skip_separator(&mut self) {
        if let Some((index, _)) = self.lines.next() {
            self.consumed = index + 1;
        }
    }

    fn next_non_blank(&mut self) -> Option<(usize, &'a str)> {
        self.lines
            .by_ref()
            .map(|(index, line)| (index + 1, line.trim()))
            .find(|(_, line)| !line.is_empty())
    }
}

fn parse_count((line, value): (usize, &str), field: &'static str) -> Result<usize, ParseError> {
    value.parse::<usize>().map_err(|_| {
        ParseError::new(
            line,
            ParseErrorKind::InvalidCount {
                field,
                value: value.to_string(),
            },
        )
    })
}

fn parse_port((line, value): (usize, &str)) -> Result<u16, ParseError> {
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ParseError::new(
            line,
            ParseErrorKind::InvalidPort(value.to_string()),
        )),
    }
}

fn parse_probability((line, value): (usize, &str)) -> Result<f64, ParseError> {
    let probability = value
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| {
            ParseError::new(line, ParseErrorKind::InvalidProbability(value.to_string()))
        })?;

    if !(0.0..=1.0).contains(&probability) {
        return Err(ParseError::new(
            line,
            ParseErrorKind::ProbabilityOutOfRange(probability),
        ));
    }
    Ok(probability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_HIVES: &str = "\
3
2

10.0.0.1
7677
0.5
1.0
0

10.0.0.2
7679
0.25
0.75
1

";

    #[test]
    fn test_parse_well_formed_pattern() {
        let store = PatternStore::parse(TWO_HIVES).unwrap();

        assert_eq!(store.unit_count(), 3);
        assert_eq!(store.target_count(), 2);

        let first = store.target(0).unwrap();
        assert_eq!(first.id, 0);
        assert_eq!(first.host, "10.0.0.1");
        assert_eq!(first.port, 7677);
        assert_eq!(first.probabilities, vec![0.5, 1.0, 0.0]);
        assert_eq!(first.address(), "10.0.0.1:7677");

        let second = store.target(1).unwrap();
        assert_eq!(second.id, 1);
        assert_eq!(second.probabilities, vec![0.25, 0.75, 1.0]);
        assert!(store.target(2).is_none());
    }

    #[test]
    fn test_single_target_has_exactly_unit_count_probabilities() {
        let store = PatternStore::parse("2\n1\n\n127.0.0.1\n8080\n0.1\n0.9\n\n").unwrap();
        assert_eq!(store.target(0).unwrap().probabilities.len(), 2);
    }

    #[test]
    fn test_final_separator_may_be_missing() {
        let store = PatternStore::parse("1\n1\n\nlocalhost\n8080\n1.0").unwrap();
        assert_eq!(store.target(0).unwrap().probabilities, vec![1.0]);
    }

    #[test]
    fn test_separator_content_is_ignored() {
        let store = PatternStore::parse("1\n1\n----\nlocalhost\n8080\n0.3\n----\n").unwrap();
        assert_eq!(store.target_count(), 1);
    }

    #[test]
    fn test_whitespace_and_crlf_are_tolerated() {
        let store = PatternStore::parse("1\r\n1\r\n\r\n  localhost \r\n 8080\r\n 0.5 \r\n").unwrap();
        let target = store.target(0).unwrap();
        assert_eq!(target.host, "localhost");
        assert_eq!(target.probabilities, vec![0.5]);
    }

    #[test]
    fn test_empty_cluster_is_valid() {
        let store = PatternStore::parse("4\n0\n").unwrap();
        assert_eq!(store.unit_count(), 4);
        assert_eq!(store.target_count(), 0);
    }

    #[test]
    fn test_missing_probability_line() {
        let err = PatternStore::parse("2\n1\n\n127.0.0.1\n8080\n0.1").unwrap_err();
        assert_eq!(err.line, 7);
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingLine {
                expected: "probability"
            }
        );
    }

    #[test]
    fn test_missing_target_block() {
        let err = PatternStore::parse("1\n2\n\n127.0.0.1\n8080\n0.1\n\n").unwrap_err();
        assert_eq!(err.line, 8);
        assert!(matches!(err.kind, ParseErrorKind::MissingLine { .. }));
    }

    #[test]
    fn test_missing_header() {
        let err = PatternStore::parse("").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingLine {
                expected: "unit count"
            }
        );
    }

    #[test]
    fn test_probability_above_one() {
        let err = PatternStore::parse("1\n1\n\n127.0.0.1\n8080\n1.5\n").unwrap_err();
        assert_eq!(err.line, 6);
        assert_eq!(err.kind, ParseErrorKind::ProbabilityOutOfRange(1.5));
    }

    #[test]
    fn test_probability_below_zero() {
        let err = PatternStore::parse("1\n1\n\n127.0.0.1\n8080\n-0.01\n").unwrap_err();
        assert_eq!(err.line, 6);
        assert_eq!(err.kind, ParseErrorKind::ProbabilityOutOfRange(-0.01));
    }

    #[test]
    fn test_non_numeric_probability() {
        for bad in ["often", "NaN", "inf", ""] {
            let input = format!("1\n1\n\n127.0.0.1\n8080\n{}\n", bad);
            let err = PatternStore::parse(&input).unwrap_err();
            assert_eq!(err.line, 6, "input {:?}", bad);
            assert!(matches!(err.kind, ParseErrorKind::InvalidProbability(_)));
        }
    }

    #[test]
    fn test_invalid_counts() {
        let err = PatternStore::parse("two\n1\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(matches!(err.kind, ParseErrorKind::InvalidCount { field: "unit count", .. }));

        let err = PatternStore::parse("2\n-1\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.kind, ParseErrorKind::InvalidCount { field: "target count", .. }));
    }

    #[test]
    fn test_invalid_port_and_address() {
        let err = PatternStore::parse("1\n1\n\n127.0.0.1\n70000\n0.5\n").unwrap_err();
        assert_eq!(err.line, 5);
        assert_eq!(err.kind, ParseErrorKind::InvalidPort("70000".to_string()));

        let err = PatternStore::parse("1\n1\n\n127.0.0.1\n0\n0.5\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidPort("0".to_string()));

        let err = PatternStore::parse("1\n1\n\n   \n8080\n0.5\n").unwrap_err();
        assert_eq!(err.line, 4);
        assert_eq!(err.kind, ParseErrorKind::EmptyAddress);
    }

    #[test]
    fn test_trailing_content_is_rejected() {
        let err = PatternStore::parse("1\n1\n\nlocalhost\n8080\n0.5\n\n\nextra\n").unwrap_err();
        assert_eq!(err.line, 9);
        assert_eq!(err.kind, ParseErrorKind::TrailingContent("extra".to_string()));
    }

    #[test]
    fn test_error_message_names_line() {
        let err = PatternStore::parse("1\n1\n\n127.0.0.1\n8080\n2\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Pattern parse error at line 6: probability 2 is outside [0, 1]"
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_HIVES.as_bytes()).unwrap();

        let store = PatternStore::load(file.path()).unwrap();
        assert_eq!(store.target_count(), 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PatternStore::load(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, PatternError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"1\n1\n\nlocalhost\n").unwrap();

        let err = PatternStore::load(file.path()).unwrap_err();
        match err {
            PatternError::Parse(parse) => assert_eq!(parse.line, 5),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_target_count_is_missing_line() {
        let err = PatternStore::parse("1\n18446744073709551615\n\nh\n1\n0.5\n").unwrap_err();
        assert_eq!(err.line, 7);
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingLine {
                expected: "target address"
            }
        );
    }

    #[test]
    fn test_huge_unit_count_is_missing_line() {
        let err = PatternStore::parse("100000000000\n1\n\nh\n1\n0.5\n").unwrap_err();
        assert_eq!(err.line, 7);
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingLine {
                expected: "probability"
            }
        );
    }

    #[test]
    fn test_probability_lookup() {
        let store = PatternStore::parse(TWO_HIVES).unwrap();
        let target = store.target(1).unwrap();
        assert_eq!(target.probability(1), Some(0.75));
        assert_eq!(target.probability(3), None);
    }
}
