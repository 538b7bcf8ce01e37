//! # sentiment_pro
//!
//! Single-text analysis: sentiment polarity/subjectivity, a word cloud of
//! the non-stopword terms, and an emoji frequency breakdown. Text can be
//! typed, read from a file, or pulled from the `<p>` elements of a web page
//! via [`TextFetcher`].
//!
//! The three analyses are independent pure functions of the same input;
//! [`analyze_text_with`] runs them together and bundles an
//! [`AnalysisReport`].
//!
//! ## Example
//! ```
//! use sentiment_pro::{AnalysisOptions, Resources, SentimentLabel, analyze_text_with};
//!
//! let resources = Resources::english();
//! let report = analyze_text_with("I love this amazing app! 😊", &resources, &AnalysisOptions::default()).unwrap();
//! assert_eq!(report.label, SentimentLabel::Positive);
//! assert_eq!(report.emoji.get("😊"), Some(1));
//! ```

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

pub mod emoji;
pub mod export;
pub mod fetch;
pub mod font;
mod lexicon;
pub mod sentiment;
pub mod stopwords;
pub mod wordcloud;

pub use emoji::{EmojiCounter, EmojiFrequency, EmojiMatch, EmojiRegistry, emojize};
pub use export::{ExportFormat, csv_safe_cell, export_report};
pub use fetch::{FetchError, Fetched, HttpTransport, Page, TextFetcher, Transport, extract_paragraphs};
pub use font::FontFace;
pub use sentiment::{GaugeColor, SentimentLabel, SentimentResult, SentimentScorer, polarity_gauge};
pub use stopwords::StopwordSet;
pub use wordcloud::{PlacedWord, WordCloud, WordCloudGenerator, WordCloudOptions};

/// Placeholder text that counts as "nothing entered".
pub const PLACEHOLDER: &str = "Type Here";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Please enter some text to analyze")]
    InvalidInput,
    #[error("Read {path} failed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Render failed: {0}")]
    Render(String),
    #[error("Font error: {0}")]
    Font(String),
}

/// Process-wide read-only resources, loaded once by the entry point.
#[derive(Debug, Clone)]
pub struct Resources {
    pub stopwords: StopwordSet,
    pub registry: EmojiRegistry,
    /// Face used to draw the word cloud.
    pub font: FontFace,
}

impl Resources {
    pub fn english() -> Self {
        Resources {
            stopwords: StopwordSet::english(),
            registry: EmojiRegistry::unicode(),
            font: FontFace::embedded(),
        }
    }

    /// English stopwords plus an optional user stopword file.
    pub fn load(extra_stopwords: Option<&Path>) -> Result<Self, AnalysisError> {
        Ok(Resources {
            stopwords: StopwordSet::english_with_file(extra_stopwords)?,
            registry: EmojiRegistry::unicode(),
            font: FontFace::embedded(),
        })
    }

    /// Replace the embedded word-cloud font with a `.ttf`/`.otf` file.
    pub fn with_font_file(mut self, path: &Path) -> Result<Self, AnalysisError> {
        self.font = FontFace::from_file(path)?;
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub wordcloud: WordCloudOptions,
    pub emoji_match: EmojiMatch,
    /// Number of emoji listed in summaries.
    pub top_emoji: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            wordcloud: WordCloudOptions::default(),
            emoji_match: EmojiMatch::Char,
            top_emoji: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub sentiment: SentimentResult,
    pub label: SentimentLabel,
    pub emoji: EmojiFrequency,
    /// Term counts after stopword removal, most frequent first.
    pub word_frequencies: Vec<(String, u32)>,
    /// `None` when no term survived stopword removal.
    pub wordcloud: Option<WordCloud>,
    /// ISO 639-3 code of the detected language, if detection was reliable.
    pub language: Option<String>,
    #[serde(skip)]
    pub top_emoji: usize,
}

/// True for empty, whitespace-only or placeholder input.
pub fn is_blank_input(text: &str) -> bool {
    let t = text.trim();
    t.is_empty() || t == PLACEHOLDER
}

///Splits text into lowercase words for frequency counting.
///Hyphens, slashes and punctuation separate words; a trailing `'s` is dropped, emoji and other symbols are removed.
/// # Example
/// ```
/// use sentiment_pro::trim_to_words;
/// let trimmed = trim_to_words("(_Test] {test2!= the cat's");
/// assert_eq!(trimmed, vec!["test", "test2", "the", "cat"]);
/// ```
pub fn trim_to_words(content: &str) -> Vec<String> {
    content
        .to_lowercase()
        .replace('’', "'")
        .replace(&['-', '–', '—', '_', '/', '\\'][..], " ")
        .replace(
            &[
                '(', ')', ',', '\"', '.', ';', ':', '=', '[', ']', '{', '}', '?', '!', '“', '”',
                '‘', '*', '#', '&', '<', '>', '|', '+', '%', '@', '~', '`', '^', '$',
            ][..],
            " ",
        )
        .split_whitespace()
        .filter_map(|raw| {
            let kept: String = raw
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '\'')
                .collect();
            let word = kept.trim_matches('\'');
            let word = word.strip_suffix("'s").unwrap_or(word);
            (!word.is_empty()).then(|| word.to_string())
        })
        .collect()
}

///Counts each word and returns `(word, count)` sorted by count, most frequent first. Equal counts keep first-seen order.
/// # Example
/// ```
/// use sentiment_pro::count_words;
/// let words: Vec<String> = ["one", "two", "two", "three", "three", "three"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let counted = count_words(&words);
/// let expected = vec![("three".to_string(), 3), ("two".to_string(), 2), ("one".to_string(), 1)];
/// assert_eq!(counted, expected);
/// ```
pub fn count_words(words: &[String]) -> Vec<(String, u32)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counted: Vec<(String, u32)> = Vec::new();
    for word in words {
        match index.get(word.as_str()) {
            Some(&i) => counted[i].1 += 1,
            None => {
                index.insert(word.as_str(), counted.len());
                counted.push((word.to_owned(), 1));
            }
        }
    }
    counted.sort_by(|a, b| b.1.cmp(&a.1));
    counted
}

/// Language of the text as an ISO 639-3 code, when detection is reliable.
pub fn detect_language(text: &str) -> Option<String> {
    whatlang::detect(text)
        .filter(|info| info.is_reliable())
        .map(|info| info.lang().code().to_string())
}

/// Run sentiment scoring, word-cloud layout and emoji counting on `text`.
///
/// Blank input (see [`is_blank_input`]) is rejected with
/// [`AnalysisError::InvalidInput`] before anything is computed.
pub fn analyze_text_with(
    text: &str,
    resources: &Resources,
    options: &AnalysisOptions,
) -> Result<AnalysisReport, AnalysisError> {
    if is_blank_input(text) {
        return Err(AnalysisError::InvalidInput);
    }

    let generator = WordCloudGenerator::new(&resources.stopwords, options.wordcloud.clone())
        .with_font(&resources.font);
    let counter = EmojiCounter::new(&resources.registry, options.emoji_match);

    let ((sentiment, language), ((word_frequencies, wordcloud), emoji)) = rayon::join(
        || (sentiment::score(text), detect_language(text)),
        || {
            rayon::join(
                || {
                    let terms = generator.terms(text);
                    let cloud = generator.layout(terms.clone());
                    (terms, cloud)
                },
                || counter.count(text),
            )
        },
    );

    Ok(AnalysisReport {
        label: sentiment.label(),
        sentiment,
        emoji,
        word_frequencies,
        wordcloud: wordcloud?,
        language,
        top_emoji: options.top_emoji,
    })
}

/// Text analysis with built-in English resources and default options.
pub fn analyze_text(text: &str) -> Result<AnalysisReport, AnalysisError> {
    analyze_text_with(text, &Resources::english(), &AnalysisOptions::default())
}

/// Human-readable summary of a report, as printed by the CLI.
pub fn format_summary(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let s = &report.sentiment;
    // writing to a String cannot fail
    let _ = writeln!(out, "Polarity Score: {:.2}", s.polarity);
    let _ = writeln!(out, "Subjectivity Score: {:.2}", s.subjectivity);
    let _ = writeln!(out, "{}", report.label.reaction());
    let _ = writeln!(
        out,
        "Sentiment Polarity Meter: -1 [{}] +1 ({:?})",
        polarity_gauge(s.polarity, 41),
        s.gauge_color()
    );
    if let Some(lang) = &report.language {
        let _ = writeln!(out, "Detected language: {lang}");
        if lang != "eng" {
            out.push_str("Note: sentiment scores use an English lexicon and may be unreliable for this text\n");
        }
    }

    out.push('\n');
    if report.emoji.is_empty() {
        out.push_str("No emojis found in the text\n");
    } else {
        out.push_str("Top Emojis Found:\n");
        for (glyph, count) in report.emoji.top(report.top_emoji) {
            let _ = writeln!(out, "{glyph} - {count} times");
        }
        out.push_str("Emoji Distribution:\n");
        for (glyph, share) in report.emoji.distribution() {
            let _ = writeln!(out, "{glyph} {share:.1}%");
        }
    }

    out.push('\n');
    match &report.wordcloud {
        Some(cloud) => {
            let _ = writeln!(
                out,
                "Word Cloud: {} of {} terms placed on a {}x{} canvas",
                cloud.words.len(),
                report.word_frequencies.len(),
                cloud.width,
                cloud.height
            );
            let top: Vec<String> = report
                .word_frequencies
                .iter()
                .take(10)
                .map(|(w, c)| format!("{w} ({c})"))
                .collect();
            let _ = writeln!(out, "Top terms: {}", top.join(", "));
        }
        None => out.push_str("No word cloud: no terms left after stopword removal\n"),
    }
    out
}
