use std::fmt;
use std::str::FromStr;
use crate::models::{ExamEvent, ExamLink, ResultType, Scheme};
use crate::models::ResultType::{Regular, Revaluation};
use crate::models::Scheme::{Cbcs, Main, NonCbcs};

const fn link(result_type: ResultType, scheme: Scheme, url: &'static str) -> ExamLink {
    ExamLink { url, result_type, scheme }
}

/// Published result pages, newest exam first.
pub static EXAMS: &[ExamEvent] = &[
    ExamEvent {
        id: "makeup-2025",
        title: "Makeup Exam 2025 (UG / PG)",
        year: "2025",
        session: "Makeup",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, Cbcs, "https://results.vtu.ac.in/MakeUpEcbcs25/index.php"),
        ],
    },
    ExamEvent {
        id: "silver-jubilee-july-2025",
        title: "Silver Jubilee July 2025 Examination",
        year: "2025",
        session: "Silver Jubilee",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, Main, "https://results.vtu.ac.in/indexSJSEJJ25.php"),
            link(Regular, Cbcs, "https://results.vtu.ac.in/SplJulcbcs25/index.php"),
            link(Regular, NonCbcs, "https://results.vtu.ac.in/SplJulNoncbcs25/index.php"),
        ],
    },
    ExamEvent {
        id: "june-july-2025",
        title: "June / July 2025 Exam",
        year: "2025",
        session: "June/July",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, Main, "https://results.vtu.ac.in/indexJJ25.php"),
            link(Regular, Cbcs, "https://results.vtu.ac.in/JJEcbcs25/index.php"),
            link(Revaluation, Cbcs, "https://results.vtu.ac.in/JJRVcbcs25/index.php"),
        ],
    },
    ExamEvent {
        id: "summer-2025",
        title: "Summer Semester 2025",
        year: "2025",
        session: "Summer",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, Cbcs, "https://results.vtu.ac.in/SEcbcs25/index.php"),
        ],
    },
    ExamEvent {
        id: "phd-nov-dec-2024",
        title: "Ph.D. / M.S (Research) Nov / Dec 2024",
        year: "2024",
        session: "Dec/Jan",
        program: "Ph.D",
        links: &[
            link(Revaluation, Main, "https://results.vtu.ac.in/NDPhDRV24/index.php"),
        ],
    },
    ExamEvent {
        id: "dec-2024-jan-2025",
        title: "Dec 2024 / Jan 2025 Exam",
        year: "2024",
        session: "Dec/Jan",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, Main, "https://results.vtu.ac.in/indexD4J5.php"),
            link(Regular, Cbcs, "https://results.vtu.ac.in/DJcbcs25/index.php"),
            link(Regular, NonCbcs, "https://results.vtu.ac.in/DJnoncbcs25/index.php"),
            link(Revaluation, Cbcs, "https://results.vtu.ac.in/DJRVcbcs25/index.php"),
            link(Revaluation, NonCbcs, "https://results.vtu.ac.in/DJRVnoncbcs25/index.php"),
        ],
    },
    ExamEvent {
        id: "makeup-2024",
        title: "Makeup Exam June / July 2024",
        year: "2024",
        session: "Makeup",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, Cbcs, "https://results.vtu.ac.in/MakeUpEcbcs24/index.php"),
        ],
    },
    ExamEvent {
        id: "june-july-2024",
        title: "June / July 2024 Exam",
        year: "2024",
        session: "June/July",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, Main, "https://results.vtu.ac.in/indexJJ24.php"),
            link(Regular, Cbcs, "https://results.vtu.ac.in/JJEcbcs24/index.php"),
            link(Regular, NonCbcs, "https://results.vtu.ac.in/JJEnoncbcs24/index.php"),
            link(Revaluation, Cbcs, "https://results.vtu.ac.in/JJRVcbcs24/index.php"),
            link(Revaluation, NonCbcs, "https://results.vtu.ac.in/JJRVnoncbcs24/index.php"),
        ],
    },
    ExamEvent {
        id: "dec-2023-jan-2024",
        title: "Dec 2023 / Jan 2024 Exam",
        year: "2023",
        session: "Dec/Jan",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, Main, "https://results.vtu.ac.in/indexD3J4.php"),
            link(Regular, Cbcs, "https://results.vtu.ac.in/DJcbcs24/index.php"),
            link(Regular, NonCbcs, "https://results.vtu.ac.in/DJnoncbcs24/index.php"),
            link(Revaluation, Cbcs, "https://results.vtu.ac.in/DJRVcbcs24/index.php"),
            link(Revaluation, NonCbcs, "https://results.vtu.ac.in/DJRVnoncbcs24/index.php"),
        ],
    },
    ExamEvent {
        id: "special-jan-2024",
        title: "BE & PG Special Exam Jan 2024",
        year: "2024",
        session: "Special",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, NonCbcs, "https://results.vtu.ac.in/JanSplEnoncbcs24/index.php"),
            link(Revaluation, NonCbcs, "https://results.vtu.ac.in/JanSplRVEnoncbcs24/index.php"),
        ],
    },
    ExamEvent {
        id: "may-june-july-2023",
        title: "May / June / July 2023 Exam",
        year: "2023",
        session: "June/July",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, Main, "https://results.vtu.ac.in/indexjj23.php"),
            link(Regular, Cbcs, "https://results.vtu.ac.in/JJEcbcs23/index.php"),
            link(Regular, NonCbcs, "https://results.vtu.ac.in/JJEnoncbcs23/index.php"),
            link(Revaluation, Cbcs, "https://results.vtu.ac.in/JJRVEcbcs23/index.php"),
            link(Revaluation, NonCbcs, "https://results.vtu.ac.in/JJRVEnoncbcs23/index.php"),
        ],
    },
    ExamEvent {
        id: "jan-feb-2023",
        title: "Jan / Feb 2023 Exam",
        year: "2022",
        session: "Jan/Feb",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, Main, "https://results.vtu.ac.in/indexjf23.php"),
            link(Regular, Cbcs, "https://results.vtu.ac.in/JFEcbcs23/index.php"),
            link(Regular, NonCbcs, "https://results.vtu.ac.in/JFEnoncbcs23/index.php"),
            link(Revaluation, Cbcs, "https://results.vtu.ac.in/JFRVEcbcs23/index.php"),
            link(Revaluation, NonCbcs, "https://results.vtu.ac.in/JFRVEnoncbcs23/index.php"),
        ],
    },
    ExamEvent {
        id: "feb-march-2022",
        title: "Feb / March 2022 Exam",
        year: "2021",
        session: "Feb/March",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, Main, "https://results.vtu.ac.in/index_fm.php"),
            link(Regular, Cbcs, "https://results.vtu.ac.in/FMEcbcs22/index.php"),
            link(Regular, NonCbcs, "https://results.vtu.ac.in/FMEnoncbcs22/index.php"),
            link(Revaluation, Cbcs, "https://results.vtu.ac.in/FMRVEcbcsFinal22/index.php"),
            link(Revaluation, NonCbcs, "https://results.vtu.ac.in/FMRVEnoncbcs22/index.php"),
        ],
    },
    ExamEvent {
        id: "july-aug-2021",
        title: "July / Aug 2021 Exam",
        year: "2021",
        session: "July/Aug",
        program: "B.E/B.Tech",
        links: &[
            link(Regular, Main, "https://results.vtu.ac.in/index_jj.php"),
            link(Regular, Cbcs, "https://results.vtu.ac.in/JAEcbcs/index.php"),
            link(Regular, NonCbcs, "https://results.vtu.ac.in/JAEnoncbcs/index.php"),
            link(Revaluation, Cbcs, "https://results.vtu.ac.in/JARVEcbcsFinal/index.php"),
            link(Revaluation, NonCbcs, "https://results.vtu.ac.in/JARVEnoncbcs/index.php"),
        ],
    },
];

/// Distinct exam years, newest first.
pub fn years() -> Vec<&'static str> {
    let mut years: Vec<&'static str> = EXAMS.iter().map(|e| e.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

pub fn events_for_year(year: &str) -> impl Iterator<Item = &'static ExamEvent> + '_ {
    EXAMS.iter().filter(move |e| e.year == year)
}

pub fn find_event(exam_id: &str) -> Option<&'static ExamEvent> {
    EXAMS.iter().find(|e| e.id == exam_id)
}

/// Resolves the result page URL for a fully selected exam. `None` when any part of the selection has no match.
pub fn resolve_url(year: &str, exam_id: &str, result_type: ResultType, scheme: Scheme) -> Option<&'static str> {
    events_for_year(year)
        .find(|e| e.id == exam_id)?
        .links
        .iter()
        .find(|l| l.result_type == result_type && l.scheme == scheme)
        .map(|l| l.url)
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Regular => "Regular",
            Revaluation => "Revaluation",
        })
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cbcs => "CBCS",
            NonCbcs => "Non-CBCS",
            Main => "Main",
        })
    }
}

impl FromStr for ResultType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(Regular),
            "revaluation" | "rv" => Ok(Revaluation),
            other => Err(format!("unknown result type `{other}` (expected Regular or Revaluation)")),
        }
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "cbcs" => Ok(Cbcs),
            "noncbcs" => Ok(NonCbcs),
            "main" => Ok(Main),
            _ => Err(format!("unknown scheme `{}` (expected CBCS, Non-CBCS or Main)", s.trim())),
        }
    }
}
