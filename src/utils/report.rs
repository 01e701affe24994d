use std::fmt::Write;
use crate::models::{AcademicRecord, ResultFlag};
use crate::utils::grades::{aggregate, class_award, percentage_equivalent, performance_label};

// Formats a record as a subject table followed by the SGPA summary.
pub fn render_record(record: &AcademicRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "USN: {}  Name: {}  Semester: {}", record.identifier, record.student_name, record.semester);
    let _ = writeln!(
        out,
        "{:<10} {:<40} {:>4} {:>4} {:>5} {:>6} {:>5} {:>3} {:>7} {}",
        "Code", "Subject", "Int", "Ext", "Total", "%", "Grade", "GP", "Credits", "Result"
    );
    for s in &record.subjects {
        let _ = writeln!(
            out,
            "{:<10} {:<40} {:>4} {:>4} {:>5} {:>6.2} {:>5} {:>3} {:>7} {}",
            s.code,
            truncate(&s.name, 40),
            s.internal_marks,
            s.external_marks,
            s.total_marks,
            s.percentage(),
            s.letter_grade(),
            s.grade_points(),
            s.credits,
            result_text(&s.result),
        );
    }

    let score = aggregate(&record.subjects);
    if score.total_credits == 0 {
        let _ = writeln!(out, "SGPA: 0.00 (no credits assigned, use --credits CODE=N)");
    } else {
        let _ = writeln!(
            out,
            "SGPA: {:.2} ({:.1}%) over {} credits, {}, {}",
            score.sgpa,
            percentage_equivalent(score.sgpa),
            score.total_credits,
            performance_label(score.sgpa),
            class_award(score.sgpa),
        );
    }
    out
}

// One line per record for batch listings.
pub fn render_summary(record: &AcademicRecord) -> String {
    format!(
        "{:<12} {:<30} sem {:>2}  {:>2} subjects  {:>2} passed  {:>2} failed",
        record.identifier,
        truncate(&record.student_name, 30),
        record.semester,
        record.subjects.len(),
        record.passed(),
        record.failed(),
    )
}

fn result_text(flag: &ResultFlag) -> &str {
    match flag {
        ResultFlag::Pass => "Pass",
        ResultFlag::Fail => "Fail",
        ResultFlag::Other(raw) => raw,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max - 1).collect();
        cut.push('~');
        cut
    }
}
