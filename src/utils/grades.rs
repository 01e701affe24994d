use crate::models::{AggregateScore, GradeInfo, SubjectEntry};

// Lower bound (inclusive), letter, points. Checked top-down; anything below the last bracket is F.
const BRACKETS: [(f64, char, u8); 6] = [
    (90.0, 'S', 10),
    (80.0, 'A', 9),
    (70.0, 'B', 8),
    (60.0, 'C', 7),
    (50.0, 'D', 6),
    (40.0, 'E', 5),
];

const FAIL: GradeInfo = GradeInfo { letter: 'F', points: 0 };

// Maps a percentage onto the grade bracket it falls in. Out-of-range input is not rejected.
pub fn score_to_grade(percentage: f64) -> GradeInfo {
    BRACKETS
        .iter()
        .find(|(floor, _, _)| percentage >= *floor)
        .map(|&(_, letter, points)| GradeInfo { letter, points })
        .unwrap_or(FAIL)
}

// Subjects scored out of 200 report totals above 100.
pub fn max_marks(total: u32) -> u32 {
    if total > 100 { 200 } else { 100 }
}

// Credit-weighted grade point average over the subjects that have both credits and marks.
pub fn aggregate(subjects: &[SubjectEntry]) -> AggregateScore {
    let (weighted, total_credits) = subjects
        .iter()
        .filter(|s| s.credits > 0 && s.total_marks > 0)
        .fold((0u64, 0u64), |(weighted, credits), s| {
            let c = u64::from(s.credits);
            (weighted + u64::from(s.grade_points()) * c, credits + c)
        });

    let sgpa = if total_credits > 0 {
        round2(weighted as f64 / total_credits as f64)
    } else {
        0.0
    };

    AggregateScore { sgpa, total_credits }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn performance_label(sgpa: f64) -> &'static str {
    match sgpa {
        s if s >= 9.0 => "Outstanding Performance",
        s if s >= 8.0 => "Excellent Performance",
        s if s >= 7.0 => "Very Good Performance",
        s if s >= 6.0 => "Good Performance",
        s if s >= 5.0 => "Average Performance",
        _ => "Below Average Performance",
    }
}

pub fn class_award(sgpa: f64) -> &'static str {
    match sgpa {
        s if s >= 7.5 => "First Class with Distinction",
        s if s >= 6.0 => "First Class",
        s if s >= 5.0 => "Second Class",
        _ => "Pass Class",
    }
}

pub fn percentage_equivalent(sgpa: f64) -> f64 {
    sgpa * 10.0
}
