//! Score report type with JSON export and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::SetId;
use crate::statistics::ScoreSummary;

/// A scored equation set, ready to be saved or rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The set that was scored.
    pub set_id: SetId,
    pub summary: ScoreSummary,
}

impl ScoreReport {
    pub fn new(set_id: SetId, summary: ScoreSummary) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            set_id,
            summary,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let s = &self.summary;
        let mut md = String::new();

        md.push_str(&format!(
            "**Score:** {}/{} correct ({:.1}%)\n\n",
            s.correct, s.count, s.rate
        ));
        md.push_str("| # | Equation | Your answer | Correct answer | Result |\n");
        md.push_str("|---|----------|-------------|----------------|--------|\n");
        for r in &s.result {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                r.id,
                r.equation,
                r.user_answer,
                r.correct_answer,
                if r.correct { "correct" } else { "wrong" }
            ));
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::{ItemResult, NO_ANSWER};

    fn make_report() -> ScoreReport {
        ScoreReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            set_id: SetId(Uuid::nil()),
            summary: ScoreSummary {
                count: 2,
                correct: 1,
                rate: 50.0,
                result: vec![
                    ItemResult {
                        id: 1,
                        equation: "x² + 2.00x - 15.00 = 0".into(),
                        user_answer: "-5.00, 3.00".into(),
                        correct_answer: "3.00, -5.00".into(),
                        correct: true,
                    },
                    ItemResult {
                        id: 2,
                        equation: "x² - 4.00 = 0".into(),
                        user_answer: NO_ANSWER.into(),
                        correct_answer: "2.00, -2.00".into(),
                        correct: false,
                    },
                ],
            },
        }
    }

    #[test]
    fn save_json_creates_parent_dirs() {
        let report = make_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: ScoreReport = serde_json::from_str(&content).unwrap();

        assert_eq!(loaded.set_id, report.set_id);
        assert_eq!(loaded.summary, report.summary);
    }

    #[test]
    fn markdown_output() {
        let md = make_report().to_markdown();
        assert!(md.contains("1/2 correct (50.0%)"));
        assert!(md.contains("| 2 | x² - 4.00 = 0 | No answer | 2.00, -2.00 | wrong |"));
    }
}
