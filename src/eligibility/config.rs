//! Eligibility index configuration.

/// Controls how per-slot candidate lists are cut down.
///
/// # Examples
///
/// ```
/// use u_roster::eligibility::EligibilityConfig;
///
/// let config = EligibilityConfig::default().with_top_k(25);
/// assert_eq!(config.top_k, Some(25));
/// assert!(config.include_boosted);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityConfig {
    /// Keep only the best `top_k` entities per slot by adjusted rank.
    ///
    /// `None` keeps every eligible entity.
    pub top_k: Option<usize>,

    /// Re-add boosted entities dropped by the `top_k` cutoff.
    pub include_boosted: bool,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            top_k: Some(50),
            include_boosted: true,
        }
    }
}

impl EligibilityConfig {
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }

    /// Disables the rank cutoff.
    pub fn unlimited(mut self) -> Self {
        self.top_k = None;
        self
    }

    pub fn with_include_boosted(mut self, include: bool) -> Self {
        self.include_boosted = include;
        self
    }
}
