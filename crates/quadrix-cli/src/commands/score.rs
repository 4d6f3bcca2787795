//! The `quadrix score` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table};

use quadrix_core::model::SetId;
use quadrix_core::parser::{self, AnswerEntry};
use quadrix_core::report::ScoreReport;
use quadrix_report::html::{generate_html, write_html_report};

pub async fn execute(
    config_path: Option<PathBuf>,
    set: String,
    answers_file: Option<PathBuf>,
    answer_args: Vec<String>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json" | "markdown" | "html"),
        "unknown format: {format} (expected text, json, markdown or html)"
    );

    let (_, engine) = super::open_engine(config_path.as_deref())?;
    let set_id: SetId = super::parse_id("set", &set)?;

    // File entries first so command-line answers override them.
    let mut entries: Vec<AnswerEntry> = match &answers_file {
        Some(path) => parser::parse_answers(path)?,
        None => Vec::new(),
    };
    for arg in &answer_args {
        entries.push(parser::parse_answer_arg(arg)?);
    }

    let listing = engine.list_set(set_id).await?;
    let resolved = parser::resolve_answers(&listing, &entries)?;
    for warning in &resolved.warnings {
        eprintln!("Warning: equation {}: {}", warning.equation, warning.message);
    }

    let summary = engine.submit_and_score(set_id, &resolved.answers).await?;
    let report = ScoreReport::new(set_id, summary);

    match output {
        Some(path) => {
            match format.as_str() {
                "json" => report.save_json(&path)?,
                "html" => write_html_report(&report, &path)?,
                "markdown" => write_text(&path, &report.to_markdown())?,
                _ => write_text(&path, &render_table(&report))?,
            }
            eprintln!("Report written to {}", path.display());
        }
        None => {
            let rendered = match format.as_str() {
                "json" => serde_json::to_string_pretty(&report)?,
                "markdown" => report.to_markdown(),
                "html" => generate_html(&report),
                _ => render_table(&report),
            };
            println!("{rendered}");
        }
    }

    Ok(())
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write report to {}", path.display()))
}

fn render_table(report: &ScoreReport) -> String {
    let s = &report.summary;
    let mut table = Table::new();
    table.set_header(vec!["#", "Equation", "Your answer", "Correct answer", "Result"]);

    for r in &s.result {
        let result = if r.correct {
            Cell::new("correct").fg(Color::Green)
        } else {
            Cell::new("wrong").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(r.id),
            Cell::new(&r.equation),
            Cell::new(&r.user_answer),
            Cell::new(&r.correct_answer),
            result,
        ]);
    }

    format!(
        "{table}\nScore: {}/{} correct ({:.1}%)",
        s.correct, s.count, s.rate
    )
}
