//! Answer sheet parser.
//!
//! Loads submitted answers from TOML files and `N=r1,r2` command-line
//! arguments, then resolves display ids against a set listing.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::QuizError;
use crate::model::{Answer, EquationId, SetListing};

/// Intermediate TOML structure for parsing answer sheets.
#[derive(Debug, Deserialize)]
struct TomlAnswerSheet {
    #[serde(default)]
    answers: Vec<TomlAnswer>,
}

#[derive(Debug, Deserialize)]
struct TomlAnswer {
    equation: usize,
    #[serde(default)]
    root1: Option<f64>,
    #[serde(default)]
    root2: Option<f64>,
}

/// One submitted answer, addressed by display id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerEntry {
    /// 1-based position of the equation in its set.
    pub equation: usize,
    pub root1: Option<f64>,
    pub root2: Option<f64>,
}

/// Parse a TOML answer sheet file.
pub fn parse_answers(path: &Path) -> Result<Vec<AnswerEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;

    parse_answers_str(&content, path)
}

/// Parse a TOML answer sheet from a string (useful for testing).
pub fn parse_answers_str(content: &str, source_path: &Path) -> Result<Vec<AnswerEntry>> {
    let parsed: TomlAnswerSheet = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(parsed
        .answers
        .into_iter()
        .map(|a| AnswerEntry {
            equation: a.equation,
            root1: a.root1,
            root2: a.root2,
        })
        .collect())
}

/// Parse a `N=r1,r2` argument, e.g. `2=-5,3.5`.
pub fn parse_answer_arg(arg: &str) -> Result<AnswerEntry> {
    let (equation, roots) = arg
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("invalid answer '{arg}': expected N=r1,r2"))?;
    let equation = equation
        .trim()
        .parse::<usize>()
        .map_err(|_| anyhow::anyhow!("invalid equation number in '{arg}'"))?;
    let (root1, root2) = roots
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("invalid answer '{arg}': expected two roots"))?;
    let parse_root = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| anyhow::anyhow!("invalid root '{}' in '{arg}'", s.trim()))
    };

    Ok(AnswerEntry {
        equation,
        root1: Some(parse_root(root1)?),
        root2: Some(parse_root(root2)?),
    })
}

/// A warning produced while resolving answers.
#[derive(Debug, Clone)]
pub struct ResolveWarning {
    /// The display id the warning is about.
    pub equation: usize,
    /// Warning message.
    pub message: String,
}

/// Answers keyed by equation identity, ready for the engine.
#[derive(Debug, Clone, Default)]
pub struct ResolvedAnswers {
    pub answers: HashMap<EquationId, Answer>,
    pub warnings: Vec<ResolveWarning>,
}

/// Map display ids to equation ids.
///
/// Entries with a missing coordinate are skipped with a warning (the
/// equation stays unanswered). A repeated display id keeps the last entry.
/// Unknown display ids and non-finite roots are errors.
pub fn resolve_answers(listing: &SetListing, entries: &[AnswerEntry]) -> Result<ResolvedAnswers> {
    let mut resolved = ResolvedAnswers::default();

    for entry in entries {
        let equation_id = listing.resolve(entry.equation).ok_or_else(|| {
            QuizError::InvalidInput(format!(
                "equation {} is not part of set {} ({} equations)",
                entry.equation, listing.set_id, listing.count
            ))
        })?;

        let (Some(root1), Some(root2)) = (entry.root1, entry.root2) else {
            resolved.warnings.push(ResolveWarning {
                equation: entry.equation,
                message: "answer is missing a root, treated as no answer".into(),
            });
            continue;
        };

        let answer = Answer::new(root1, root2);
        answer.validate(equation_id)?;
        if resolved.answers.insert(equation_id, answer).is_some() {
            resolved.warnings.push(ResolveWarning {
                equation: entry.equation,
                message: "answered more than once, keeping the last answer".into(),
            });
        }
    }

    Ok(resolved)
}
