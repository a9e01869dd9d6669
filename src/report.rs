use std::fmt::Write;

use crate::models::EvaluationRecord;
use crate::summary::Summary;
use crate::taxonomy::Dimension;

fn display_name(record: &EvaluationRecord) -> &str {
    let name = record.profile.athlete_name.trim();
    if name.is_empty() {
        "Athlete"
    } else {
        name
    }
}

pub fn build_summary_card(record: &EvaluationRecord, summary: &Summary) -> String {
    let profile = &record.profile;
    let mut output = String::new();

    let _ = writeln!(
        output,
        "# Boot Camp Evaluation: {} ({})",
        display_name(record),
        profile.bootcamp_date
    );
    let _ = writeln!(
        output,
        "{} {}, {} | {}",
        profile.age_group, profile.gender, profile.weight_class, profile.bootcamp_name
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Evaluation Summary");
    let _ = writeln!(output, "- Average Score: {:.1} / 5.0", summary.average);
    let _ = writeln!(output, "- Strongest Area: {}", summary.strongest);
    let _ = writeln!(output, "- Needs Improvement: {}", summary.weakest);
    let _ = writeln!(output, "- Status: {}", summary.status);
    let _ = writeln!(output, "- Risk Count: {}", summary.risk_count);

    let risks = record.risks();
    if !risks.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Identified Risks");
        for risk in &risks {
            let _ = writeln!(output, "- {}", risk);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Dimension Scores");
    let _ = writeln!(output, "| Dimension | Score | Rubric | Note |");
    let _ = writeln!(output, "|-----------|-------|--------|------|");
    for (dimension, score) in &summary.chart_series {
        let rubric = u8::try_from(*score)
            .ok()
            .and_then(|score| dimension.rubric_for(score))
            .unwrap_or("");
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} |",
            dimension,
            score,
            rubric,
            escape_cell(record.note(*dimension))
        );
    }

    let outcomes = &record.outcomes;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Key Outcomes");
    for (title, entries) in [
        ("Top Achievements", &outcomes.achievements),
        ("Improvements", &outcomes.improvements),
        ("Next Actions", &outcomes.next_actions),
    ] {
        let _ = writeln!(output, "### {}", title);
        let filled: Vec<&String> = entries.iter().filter(|e| !e.trim().is_empty()).collect();
        if filled.is_empty() {
            let _ = writeln!(output, "None recorded.");
        } else {
            for (position, entry) in filled.iter().enumerate() {
                let _ = writeln!(output, "{}. {}", position + 1, entry);
            }
        }
    }

    output
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Prints the scoring guide for every dimension.
pub fn build_rubric_guide() -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Scoring Guide");

    for (position, dimension) in Dimension::ALL.iter().enumerate() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## {}. {}", position + 1, dimension);
        let _ = writeln!(output, "Scope: {}", dimension.scope());
        for (level, text) in (1..=5).rev().zip(dimension.rubric()) {
            let _ = writeln!(output, "- {} = {}", level, text);
        }
    }

    output
}
