use serde::{Deserialize, Serialize};
use crate::utils::grades::{max_marks, score_to_grade};

// Outcome of a single subject as printed on the result page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ResultFlag {
    Pass,
    Fail,
    Other(String),
}

impl ResultFlag {
    // Classifies the raw result cell text ("P", "PASS", "F", "FAIL", anything else).
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "P" | "PASS" => ResultFlag::Pass,
            "F" | "FAIL" => ResultFlag::Fail,
            _ => ResultFlag::Other(raw.trim().to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct GradeInfo {
    pub letter: char,
    pub points: u8,
}

// One subject row of a result page. Grade fields are derived from `total_marks`
// on every call, so they can never go stale.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubjectEntry {
    pub code: String,
    pub name: String,
    pub internal_marks: u32,
    pub external_marks: u32,
    pub total_marks: u32,
    pub result: ResultFlag,
    pub announced_date: String,
    pub credits: u32,
}

impl SubjectEntry {
    pub fn max_marks(&self) -> u32 {
        max_marks(self.total_marks)
    }

    pub fn percentage(&self) -> f64 {
        f64::from(self.total_marks) / f64::from(self.max_marks()) * 100.0
    }

    pub fn grade(&self) -> GradeInfo {
        score_to_grade(self.percentage())
    }

    pub fn letter_grade(&self) -> char {
        self.grade().letter
    }

    pub fn grade_points(&self) -> u8 {
        self.grade().points
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AcademicRecord {
    pub identifier: String,
    pub student_name: String,
    pub semester: u32,
    pub subjects: Vec<SubjectEntry>,
}

impl AcademicRecord {
    /// Assigns a credit weight to the subject with the given code.
    /// Returns `false` when no subject carries that code.
    pub fn set_credits(&mut self, code: &str, credits: u32) -> bool {
        match self.subjects.iter_mut().find(|s| s.code.eq_ignore_ascii_case(code)) {
            Some(subject) => {
                subject.credits = credits;
                true
            }
            None => false,
        }
    }

    pub fn passed(&self) -> usize {
        self.subjects.iter().filter(|s| s.result == ResultFlag::Pass).count()
    }

    pub fn failed(&self) -> usize {
        self.subjects.iter().filter(|s| s.result == ResultFlag::Fail).count()
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct AggregateScore {
    pub sgpa: f64,
    pub total_credits: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    Regular,
    Revaluation,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Cbcs,
    NonCbcs,
    Main,
}

#[derive(Debug, Serialize, Clone, Copy)]
pub struct ExamLink {
    pub url: &'static str,
    pub result_type: ResultType,
    pub scheme: Scheme,
}

#[derive(Debug, Serialize, Clone, Copy)]
pub struct ExamEvent {
    pub id: &'static str,
    pub title: &'static str,
    pub year: &'static str,
    pub session: &'static str,
    pub program: &'static str,
    pub links: &'static [ExamLink],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(code: &str, total: u32) -> SubjectEntry {
        SubjectEntry {
            code: code.to_string(),
            name: "Management".to_string(),
            internal_marks: 0,
            external_marks: 0,
            total_marks: total,
            result: ResultFlag::Pass,
            announced_date: String::new(),
            credits: 0,
        }
    }

    #[test]
    fn result_flag_from_raw() {
        assert_eq!(ResultFlag::from_raw(" P "), ResultFlag::Pass);
        assert_eq!(ResultFlag::from_raw("fail"), ResultFlag::Fail);
        assert_eq!(ResultFlag::from_raw("A"), ResultFlag::Other("A".to_string()));
    }

    #[test]
    fn derived_fields_follow_total() {
        let mut s = subject("18CS51", 78);
        assert_eq!(s.percentage(), 78.0);
        assert_eq!(s.letter_grade(), 'B');
        assert_eq!(s.grade_points(), 8);

        s.total_marks = 180;
        assert_eq!(s.max_marks(), 200);
        assert_eq!(s.percentage(), 90.0);
        assert_eq!(s.letter_grade(), 'S');
    }

    #[test]
    fn set_credits_by_code() {
        let mut record = AcademicRecord {
            identifier: "1AM21CS001".to_string(),
            student_name: "Unknown".to_string(),
            semester: 5,
            subjects: vec![subject("18CS51", 78)],
        };
        assert!(record.set_credits("18cs51", 4));
        assert_eq!(record.subjects[0].credits, 4);
        assert!(!record.set_credits("18CS99", 3));
    }
}
