//! Score aggregation.
//!
//! Turns per-equation verdicts for one set into a [`ScoreSummary`]: item
//! count, percentage correct, and a display row per equation.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Answer, AnsweredEquation, Equation};
use crate::verifier::is_correct;

/// Shown in place of the user's answer when none was recorded.
pub const NO_ANSWER: &str = "No answer";

/// One equation with its (optional) answer and verdict.
#[derive(Debug, Clone, Copy)]
pub struct ScoredEquation<'a> {
    pub equation: &'a Equation,
    pub answer: Option<Answer>,
    pub correct: bool,
}

/// Display row for a single equation in a score summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResult {
    /// 1-based position in the set.
    pub id: usize,
    pub equation: String,
    /// `"r1, r2"` as submitted, or [`NO_ANSWER`].
    pub user_answer: String,
    /// `"r1, r2"` in stored order.
    pub correct_answer: String,
    pub correct: bool,
}

/// Aggregate outcome of scoring one equation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Number of equations in the set, answered or not.
    pub count: usize,
    /// Number of correctly solved equations.
    pub correct: usize,
    /// Percentage correct, in `[0, 100]`.
    pub rate: f64,
    pub result: Vec<ItemResult>,
}

impl ScoreSummary {
    /// Number of equations that received an answer.
    pub fn answered(&self) -> usize {
        self.result
            .iter()
            .filter(|r| r.user_answer != NO_ANSWER)
            .count()
    }
}

fn format_pair(a: f64, b: f64) -> String {
    format!("{a:.2}, {b:.2}")
}

/// Aggregate verdicts, in set order, into a summary.
pub fn aggregate(items: &[ScoredEquation<'_>]) -> Result<ScoreSummary, QuizError> {
    if items.is_empty() {
        return Err(QuizError::EmptySet);
    }

    let result: Vec<ItemResult> = items
        .iter()
        .enumerate()
        .map(|(i, item)| ItemResult {
            id: i + 1,
            equation: item.equation.text.clone(),
            user_answer: item
                .answer
                .map(|a| format_pair(a.root1, a.root2))
                .unwrap_or_else(|| NO_ANSWER.to_string()),
            correct_answer: format_pair(item.equation.root1, item.equation.root2),
            correct: item.correct,
        })
        .collect();

    let count = items.len();
    let correct = items.iter().filter(|item| item.correct).count();
    let rate = 100.0 * correct as f64 / count as f64;

    Ok(ScoreSummary {
        count,
        correct,
        rate,
        result,
    })
}

/// Verify every recorded answer and aggregate the verdicts.
///
/// Unanswered equations are never passed to the verifier and count as not
/// solved. A stored non-finite answer fails with
/// [`QuizError::InvalidAnswer`].
pub fn verify_and_score(answered: &[AnsweredEquation]) -> Result<ScoreSummary, QuizError> {
    let items = answered
        .iter()
        .map(|entry| {
            let correct = match entry.answer {
                Some(answer) => {
                    answer.validate(entry.equation.id)?;
                    is_correct(entry.equation.roots(), answer.values())
                }
                None => false,
            };
            Ok(ScoredEquation {
                equation: &entry.equation,
                answer: entry.answer,
                correct,
            })
        })
        .collect::<Result<Vec<_>, QuizError>>()?;

    aggregate(&items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EquationId;

    fn eq(r1: f64, r2: f64) -> Equation {
        Equation::from_roots(EquationId::new(), r1, r2)
    }

    fn answered(r1: f64, r2: f64, answer: Option<(f64, f64)>) -> AnsweredEquation {
        AnsweredEquation {
            equation: eq(r1, r2),
            answer: answer.map(|(a, b)| Answer::new(a, b)),
        }
    }

    #[test]
    fn three_of_five_is_sixty_percent() {
        let eqs: Vec<Equation> = (0..5).map(|i| eq(i as f64, -1.0)).collect();
        let items: Vec<ScoredEquation> = eqs
            .iter()
            .enumerate()
            .map(|(i, e)| ScoredEquation {
                equation: e,
                answer: Some(Answer::new(0.0, 0.0)),
                correct: i < 3,
            })
            .collect();
        let summary = aggregate(&items).unwrap();
        assert_eq!(summary.count, 5);
        assert_eq!(summary.correct, 3);
        assert!((summary.rate - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_set_is_an_error() {
        assert_eq!(aggregate(&[]), Err(QuizError::EmptySet));
        assert_eq!(verify_and_score(&[]), Err(QuizError::EmptySet));
    }

    #[test]
    fn display_ids_are_positional() {
        let summary = verify_and_score(&[
            answered(1.0, 2.0, None),
            answered(3.0, 4.0, None),
            answered(5.0, 6.0, None),
        ])
        .unwrap();
        let ids: Vec<usize> = summary.result.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn unanswered_items_show_marker_and_count_as_unsolved() {
        let summary = verify_and_score(&[
            answered(3.0, -5.0, Some((-5.0, 3.0))),
            answered(1.0, 1.0, None),
        ])
        .unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.answered(), 1);
        assert!((summary.rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(summary.result[1].user_answer, NO_ANSWER);
        assert!(!summary.result[1].correct);
        assert_eq!(summary.result[1].correct_answer, "1.00, 1.00");
    }

    #[test]
    fn answers_are_formatted_in_stored_order() {
        let summary = verify_and_score(&[answered(3.0, -5.0, Some((-5.0, 3.0)))]).unwrap();
        let row = &summary.result[0];
        assert_eq!(row.equation, "x² + 2.00x - 15.00 = 0");
        assert_eq!(row.user_answer, "-5.00, 3.00");
        assert_eq!(row.correct_answer, "3.00, -5.00");
        assert!(row.correct);
    }

    #[test]
    fn end_to_end_tolerance_examples() {
        let correct = verify_and_score(&[answered(3.0, -5.0, Some((-5.0, 3.0)))]).unwrap();
        assert!((correct.rate - 100.0).abs() < f64::EPSILON);

        let near = verify_and_score(&[answered(3.0, -5.0, Some((-4.995, 3.0)))]).unwrap();
        assert!(near.result[0].correct);

        let off = verify_and_score(&[answered(3.0, -5.0, Some((-4.97, 3.0)))]).unwrap();
        assert!(!off.result[0].correct);
        assert_eq!(off.rate, 0.0);
    }

    #[test]
    fn non_finite_stored_answer_is_rejected() {
        let err = verify_and_score(&[answered(1.0, 2.0, Some((f64::NAN, 2.0)))]).unwrap_err();
        assert!(matches!(err, QuizError::InvalidAnswer { .. }));
    }

    #[test]
    fn summary_serializes_with_expected_fields() {
        let summary = verify_and_score(&[answered(1.0, 2.0, Some((2.0, 1.0)))]).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["rate"], 100.0);
        assert_eq!(json["result"][0]["user_answer"], "2.00, 1.00");
    }
}
