pub const DEFAULT_SEVERE_KEYWORDS: [&str; 5] = ["rain", "storm", "snow", "thunder", "hail"];

/// Flags a weather description as severe when it contains any of the
/// configured keywords, ignoring case.
///
/// Matching is on substrings: "thunderstorm" and "rainy" both match.
#[derive(Clone, Debug)]
pub struct SeverityClassifier {
    keywords: Vec<String>,
}

impl SeverityClassifier {
    /// Blank keywords are dropped, otherwise they would match every description.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    pub fn classify(&self, description: &str) -> bool {
        let description = description.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| description.contains(keyword.as_str()))
    }
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SEVERE_KEYWORDS)
    }
}
