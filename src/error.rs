use thiserror::Error;

/// Everything that can go wrong between a result request and an extracted record.
#[derive(Error, Debug)]
pub enum ResultError {
    /// A required request field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The expanded range holds more identifiers than a single batch may fetch.
    #[error("Range too large ({requested} records). Please request max {cap} records at a time.")]
    RangeTooLarge { requested: usize, cap: usize },

    /// The result service could not be reached.
    #[error("Failed to reach the result service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The result service answered with a non-success status.
    #[error("Failed to fetch results: HTTP {0} {1}")]
    Status(u16, String),

    /// The result service answered, but not with anything that holds a result page.
    #[error("No result data found in response: {0}")]
    Malformed(String),

    /// The result page for an identifier came back blank.
    #[error("Empty HTML content received for {0}. Please verify the USN and URL are correct.")]
    EmptyHtml(String),

    /// The result page was fetched but contained no subject rows.
    #[error("No subject data found in the result page: {0}. The page layout may differ from the expected one, check the USN and exam URL.")]
    Parse(String),

    /// No identifier in a batch produced a result page.
    #[error("No valid results found across the whole range")]
    NoResults,
}

impl ResultError {
    // Request-level errors are raised before anything is sent downstream.
    pub fn is_validation(&self) -> bool {
        matches!(self, ResultError::MissingField(_) | ResultError::RangeTooLarge { .. })
    }
}
