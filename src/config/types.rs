use serde::Deserialize;

/// Desktop browser user agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";

/// Main configuration structure for Onpage-SEO
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

/// HTTP retrieval configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Overall request timeout, covering connect, send and body read (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Connection establishment timeout (milliseconds)
    #[serde(rename = "connect-timeout-ms")]
    pub connect_timeout_ms: u64,

    /// Maximum number of redirects followed before giving up
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 25_000,
            connect_timeout_ms: 10_000,
            max_redirects: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

/// Inclusive range used for length checks
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies within `min..=max`
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Scoring thresholds and tables used by the analyzer
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Acceptable title width in pixels
    #[serde(rename = "title-px")]
    pub title_px: Range,

    /// Acceptable meta description width in pixels
    #[serde(rename = "meta-px")]
    pub meta_px: Range,

    /// Acceptable title length in characters
    #[serde(rename = "title-chars")]
    pub title_chars: Range,

    /// Acceptable meta description length in characters
    #[serde(rename = "meta-chars")]
    pub meta_chars: Range,

    /// Minimum body word count for a content-rich page
    #[serde(rename = "min-words")]
    pub min_words: usize,

    /// Minimum number of internal links
    #[serde(rename = "min-internal-links")]
    pub min_internal_links: usize,

    #[serde(rename = "char-widths")]
    pub char_widths: CharWidths,

    pub readability: ReadabilityConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            title_px: Range::new(200, 600),
            meta_px: Range::new(400, 920),
            title_chars: Range::new(30, 70),
            meta_chars: Range::new(80, 160),
            min_words: 800,
            min_internal_links: 3,
            char_widths: CharWidths::default(),
            readability: ReadabilityConfig::default(),
        }
    }
}

/// Average rendered width per character class, in pixels
///
/// Approximates a SERP snippet font; exact font metrics are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CharWidths {
    /// ASCII `A`-`Z`
    pub uppercase: f64,
    /// ASCII `a`-`z`
    pub lowercase: f64,
    /// ASCII `0`-`9`
    pub digit: f64,
    /// Any Unicode whitespace
    pub whitespace: f64,
    /// Everything else (punctuation, non-ASCII letters, symbols)
    pub other: f64,
}

impl Default for CharWidths {
    fn default() -> Self {
        Self {
            uppercase: 9.5,
            lowercase: 7.5,
            digit: 7.5,
            whitespace: 3.0,
            other: 8.0,
        }
    }
}

/// Flesch reading ease constants and the thresholds the score uses
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReadabilityConfig {
    pub base: f64,

    /// Weight of average words per sentence
    #[serde(rename = "sentence-weight")]
    pub sentence_weight: f64,

    /// Weight of average syllables per word
    #[serde(rename = "syllable-weight")]
    pub syllable_weight: f64,

    /// Reading ease at or above which text counts as easy to read
    #[serde(rename = "easy-threshold")]
    pub easy_threshold: f64,

    /// Longest acceptable average sentence, in words
    #[serde(rename = "max-average-sentence-length")]
    pub max_average_sentence_length: f64,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self {
            base: 206.835,
            sentence_weight: 1.015,
            syllable_weight: 84.6,
            easy_threshold: 50.0,
            max_average_sentence_length: 22.0,
        }
    }
}
