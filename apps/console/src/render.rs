use std::fmt::Display;

use chrono::{DateTime, Utc};
use shared::{
    protocol::{AiAssessment, UseCase},
    wire::EmbeddedJson,
};

pub const NO_USE_CASE: &str = "No use case selected";
const EMPTY_CELL: &str = "-";

pub fn opt<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

pub fn text(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(EMPTY_CELL)
        .to_string()
}

pub fn score(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

pub fn percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.1}%"))
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

pub fn money(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

pub fn date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|v| v.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

pub fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|v| v.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// Left-aligned columns sized to the widest cell.
pub fn table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) {
    if rows.is_empty() {
        println!("(none)");
        return;
    }
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    print_row(&headers.map(str::to_string), &widths);
    let rule = widths.map(|w| "-".repeat(w));
    print_row(&rule, &widths);
    for row in rows {
        print_row(row, &widths);
    }
}

fn print_row<const N: usize>(cells: &[String; N], widths: &[usize; N]) {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", line.trim_end());
}

pub fn heading(title: &str) {
    println!("{title}");
    println!("{}", "=".repeat(title.chars().count()));
}

pub fn field(label: &str, value: impl Display) {
    println!("{label:<22} {value}");
}

pub fn list(label: &str, items: &[String]) {
    if items.is_empty() {
        field(label, EMPTY_CELL);
        return;
    }
    println!("{label}:");
    for item in items {
        println!("  - {item}");
    }
}

pub fn banner(message: &str) {
    eprintln!("! {message}");
}

pub fn use_case(embedded: &EmbeddedJson<UseCase>) {
    use_case_opt(embedded.as_ref());
}

pub fn use_case_opt(use_case: Option<&UseCase>) {
    match use_case {
        Some(use_case) => {
            field("Use case", &use_case.title);
            if let Some(description) = &use_case.description {
                field("  description", description);
            }
            if let Some(pattern) = use_case.ai_pattern {
                field("  pattern", pattern.label());
            }
            if let Some(value) = &use_case.expected_value {
                field("  expected value", value);
            }
        }
        None => field("Use case", NO_USE_CASE),
    }
}

pub fn assessment(title: &str, assessment: &AiAssessment) {
    heading(title);
    field("Recommendation", text(assessment.recommendation.as_deref()));
    field("Overall score", score(assessment.overall_score));
    field("Summary", text(assessment.summary.as_deref()));
    if !assessment.factors.is_empty() {
        let rows: Vec<[String; 4]> = assessment
            .factors
            .iter()
            .map(|factor| {
                [
                    factor.name.clone(),
                    score(factor.score),
                    score(factor.weight),
                    text(factor.rationale.as_deref()),
                ]
            })
            .collect();
        table(["FACTOR", "SCORE", "WEIGHT", "RATIONALE"], &rows);
    }
    list("Risks", &assessment.risks);
    field("Generated", timestamp(assessment.generated_at));
}
