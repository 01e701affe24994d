use std::sync::LazyLock;
use regex::Regex;

/// Largest number of identifiers a single batch request may fetch.
pub const MAX_BATCH: usize = 50;

// Shortest alphanumeric head, then the trailing run of digits.
static USN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z0-9]+?)(\d+)$").expect("usn pattern"));

/// The identifiers covered by a start/end pair.
///
/// Numeric ranges are kept lazy so that an oversized request can be measured
/// and rejected without building the whole list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// `prefix` followed by every number in `start..=end`, zero-padded to `width`.
    Range { prefix: String, start: u64, end: u64, width: usize },
    /// The literal start (and end, when different) because no shared numeric range was found.
    Literal(Vec<String>),
}

impl Expansion {
    pub fn len(&self) -> usize {
        match self {
            Expansion::Range { start, end, .. } if end >= start => {
                usize::try_from(end - start).map_or(usize::MAX, |n| n.saturating_add(1))
            }
            Expansion::Range { .. } => 0,
            Expansion::Literal(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Expansion::Literal(_))
    }

    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Expansion::Range { prefix, start, end, width } => (*start..=*end)
                .map(|n| format!("{prefix}{n:0width$}"))
                .collect(),
            Expansion::Literal(ids) => ids.clone(),
        }
    }
}

/// Expands `start_id..=end_id` into the identifiers in between.
///
/// The digit width always comes from the start identifier, even when the end
/// identifier is written with a different number of digits.
pub fn expand(start_id: &str, end_id: &str) -> Expansion {
    let start = start_id.trim().to_uppercase();
    let end = end_id.trim().to_uppercase();

    if let (Some(s), Some(e)) = (USN_RE.captures(&start), USN_RE.captures(&end)) {
        if s[1] == e[1] {
            if let (Ok(first), Ok(last)) = (s[2].parse::<u64>(), e[2].parse::<u64>()) {
                return Expansion::Range {
                    prefix: s[1].to_string(),
                    start: first,
                    end: last,
                    width: s[2].len(),
                };
            }
        }
    }

    let mut ids = vec![start.clone()];
    if start != end {
        ids.push(end);
    }
    Expansion::Literal(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_padded_range() {
        let ids = expand("1AM21CS001", "1AM21CS010").to_vec();
        assert_eq!(ids.len(), 10);
        assert_eq!(ids.first().map(String::as_str), Some("1AM21CS001"));
        assert_eq!(ids[8], "1AM21CS009");
        assert_eq!(ids.last().map(String::as_str), Some("1AM21CS010"));
    }

    #[test]
    fn lowercase_input_is_uppercased() {
        let expansion = expand("1am21cs098", "1AM21CS101");
        assert_eq!(expansion.to_vec(), vec!["1AM21CS098", "1AM21CS099", "1AM21CS100", "1AM21CS101"]);
    }

    #[test]
    fn oversized_range_is_measurable() {
        let expansion = expand("1AM21CS001", "1AM21CS060");
        assert_eq!(expansion.len(), 60);
        assert!(expansion.len() > MAX_BATCH);

        let huge = expand("X0", "X999999999999");
        assert!(huge.len() > MAX_BATCH);
    }

    #[test]
    fn mismatched_prefixes_fall_back_to_literals() {
        let expansion = expand("ABC123", "XYZ999");
        assert!(expansion.is_fallback());
        assert_eq!(expansion.to_vec(), vec!["ABC123", "XYZ999"]);

        assert_eq!(expand("1AM-21", "1AM-21").to_vec(), vec!["1AM-21"]);
    }

    #[test]
    fn width_comes_from_start() {
        let ids = expand("1AM21CS08", "1AM21CS0010").to_vec();
        assert_eq!(ids, vec!["1AM21CS08", "1AM21CS09", "1AM21CS10"]);
    }

    #[test]
    fn reversed_range_is_empty() {
        let expansion = expand("1AM21CS010", "1AM21CS001");
        assert!(expansion.is_empty());
        assert!(expansion.to_vec().is_empty());
    }
}
