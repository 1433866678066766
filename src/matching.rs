//! Match policy and pattern filtering.
//!
//! Patterns use search semantics: a candidate qualifies when its name, the
//! `/`-separated key relative to the source root, contains a match anywhere
//! (`\.csv$` selects every CSV, `reports/` selects everything under a
//! `reports` folder). Anchor the pattern to require a full match.

use clap::ValueEnum;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::errors::BlueprintError;
use crate::source::Candidate;

/// How `--source-file-name` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchPolicy {
    /// Literal, fully-qualified name.
    #[value(name = "exact_match")]
    Exact,
    /// Regular expression evaluated against every candidate.
    #[value(name = "regex_match")]
    Pattern,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::Exact => "exact_match",
            MatchPolicy::Pattern => "regex_match",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact_match" | "exact" => Ok(MatchPolicy::Exact),
            "regex_match" | "regex" | "pattern" => Ok(MatchPolicy::Pattern),
            _ => Err(format!("invalid match type: '{s}'")),
        }
    }
}

/// Compile a user-supplied pattern.
pub fn compile_pattern(pattern: &str) -> Result<Regex, BlueprintError> {
    Regex::new(pattern).map_err(|source| BlueprintError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Keep candidates whose name contains a match for `pattern`, in input order.
pub fn filter_by_pattern(candidates: Vec<Candidate>, pattern: &Regex) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|c| pattern.is_match(c.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<Candidate> {
        names.iter().map(|n| Candidate::key(*n)).collect()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let re = compile_pattern(r"\.csv$").unwrap();
        assert!(filter_by_pattern(Vec::new(), &re).is_empty());
    }

    #[test]
    fn search_semantics_preserve_order() {
        let re = compile_pattern("report").unwrap();
        let out = filter_by_pattern(keys(&["b/q2_report.csv", "notes.txt", "a/report.csv"]), &re);
        let names: Vec<_> = out.iter().map(Candidate::name).collect();
        assert_eq!(names, ["b/q2_report.csv", "a/report.csv"]);
    }

    #[test]
    fn folder_part_of_the_name_is_searched() {
        let re = compile_pattern("reports/").unwrap();
        let out = filter_by_pattern(keys(&["reports/q1.csv", "misc/reports.txt", "reports/sub/q2.csv"]), &re);
        let names: Vec<_> = out.iter().map(Candidate::name).collect();
        assert_eq!(names, ["reports/q1.csv", "reports/sub/q2.csv"]);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = compile_pattern("(unclosed").unwrap_err();
        assert_eq!(err.kind(), "invalid_pattern");
    }

    #[test]
    fn policy_parses_cli_spellings() {
        assert_eq!("exact_match".parse::<MatchPolicy>(), Ok(MatchPolicy::Exact));
        assert_eq!("REGEX_MATCH".parse::<MatchPolicy>(), Ok(MatchPolicy::Pattern));
        assert!("fuzzy".parse::<MatchPolicy>().is_err());
        assert_eq!(MatchPolicy::Pattern.to_string(), "regex_match");
    }
}
