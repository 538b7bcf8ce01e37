//! Lexicon-based sentiment scoring.
//!
//! Polarity is the mean of the polarities of all sentiment-bearing tokens,
//! subjectivity likewise. Tokens are looked up as written and, failing that,
//! as an `-s`/`-ed`/`-ing` form of a lexicon verb via the English Snowball
//! stemmer.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};
use serde::Serialize;

use crate::lexicon::{ENTRIES, INTENSIFIERS, NEGATIONS, VERBS};

static DEFAULT_SCORER: Lazy<SentimentScorer> = Lazy::new(SentimentScorer::english);

/// Above this polarity a text is positive, below its negation negative.
pub const LABEL_THRESHOLD: f64 = 0.3;

const NEGATION_FACTOR: f64 = -0.5;
const EXCLAMATION_BOOST: f64 = 1.25;
const INFLECTIONS: [&str; 3] = ["s", "ed", "ing"];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SentimentResult {
    /// -1.0 (negative) ..= 1.0 (positive)
    pub polarity: f64,
    /// 0.0 (objective) ..= 1.0 (subjective)
    pub subjectivity: f64,
}

impl SentimentResult {
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_polarity(self.polarity)
    }

    pub fn gauge_color(&self) -> GaugeColor {
        if self.polarity > 0.0 {
            GaugeColor::Green
        } else if self.polarity < 0.0 {
            GaugeColor::Red
        } else {
            GaugeColor::Gray
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < -LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Emoji reaction line shown next to the scores.
    pub fn reaction(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "😊 Positive Sentiment",
            SentimentLabel::Negative => "😞 Negative Sentiment",
            SentimentLabel::Neutral => "😐 Neutral Sentiment",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bar colour of the polarity gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeColor {
    Green,
    Red,
    Gray,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    polarity: f64,
    subjectivity: f64,
}

pub struct SentimentScorer {
    words: HashMap<&'static str, Entry>,
    stems: HashMap<String, Entry>,
    intensifiers: HashMap<&'static str, f64>,
    stemmer: Stemmer,
}

impl fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentScorer")
            .field("words", &self.words.len())
            .field("stems", &self.stems.len())
            .finish()
    }
}

impl SentimentScorer {
    /// Scorer over the built-in English lexicon.
    pub fn english() -> Self {
        let stemmer = Stemmer::create(Algorithm::English);
        let mut words = HashMap::with_capacity(ENTRIES.len());
        let mut stems = HashMap::with_capacity(ENTRIES.len());
        for &(word, polarity, subjectivity) in ENTRIES {
            let entry = Entry {
                polarity,
                subjectivity,
            };
            words.insert(word, entry);
            if VERBS.contains(&word) {
                stems.insert(stemmer.stem(word).into_owned(), entry);
            }
        }
        SentimentScorer {
            words,
            stems,
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            stemmer,
        }
    }

    fn lookup(&self, token: &str) -> Option<Entry> {
        if let Some(e) = self.words.get(token) {
            return Some(*e);
        }
        let inflected = INFLECTIONS.iter().any(|suffix| token.ends_with(suffix));
        if inflected && token.chars().all(char::is_alphabetic) {
            return self.stems.get(&*self.stemmer.stem(token)).copied();
        }
        None
    }

    /// Score a text. Empty or whitespace-only input, and text without any
    /// sentiment-bearing token, score (0.0, 0.0).
    pub fn score(&self, text: &str) -> SentimentResult {
        let mut assessments: Vec<Entry> = Vec::new();

        for (sentence, exclaimed) in sentences(text) {
            let mut intensity: Option<f64> = None;
            let mut negated = false;

            for token in tokens(sentence) {
                if is_negation(&token) {
                    negated = true;
                    continue;
                }
                if let Some(&i) = self.intensifiers.get(token.as_str()) {
                    intensity = Some(i);
                    continue;
                }
                let Some(entry) = self.lookup(&token) else {
                    // intensifiers only bind to the word right after them
                    intensity = None;
                    continue;
                };
                let mut polarity = entry.polarity;
                let mut subjectivity = entry.subjectivity;
                if let Some(i) = intensity.take() {
                    polarity *= i;
                    subjectivity *= i;
                }
                if negated {
                    polarity *= NEGATION_FACTOR;
                    negated = false;
                }
                if exclaimed {
                    polarity *= EXCLAMATION_BOOST;
                }
                assessments.push(Entry {
                    polarity: polarity.clamp(-1.0, 1.0),
                    subjectivity: subjectivity.clamp(0.0, 1.0),
                });
            }
        }

        if assessments.is_empty() {
            return SentimentResult::default();
        }
        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|e| e.polarity).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|e| e.subjectivity).sum::<f64>() / n;
        SentimentResult {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

/// Score with the shared English scorer.
pub fn score(text: &str) -> SentimentResult {
    DEFAULT_SCORER.score(text)
}

/// Text bar over [-1, 1]: `|` marks zero, `#` fills from zero to the polarity.
/// ```
/// use sentiment_pro::polarity_gauge;
/// assert_eq!(polarity_gauge(0.0, 5), "--|--");
/// assert_eq!(polarity_gauge(1.0, 5), "--|##");
/// assert_eq!(polarity_gauge(-0.5, 5), "-#|--");
/// ```
pub fn polarity_gauge(polarity: f64, width: usize) -> String {
    // odd width so zero has its own cell
    let width = width.max(3) | 1;
    let mid = width / 2;
    let pos = ((polarity.clamp(-1.0, 1.0) + 1.0) / 2.0 * (width - 1) as f64).round() as usize;
    let (lo, hi) = (pos.min(mid), pos.max(mid));
    (0..width)
        .map(|i| {
            if i == mid {
                '|'
            } else if (lo..=hi).contains(&i) {
                '#'
            } else {
                '-'
            }
        })
        .collect()
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

/// Split into sentences at runs of `.`, `!` and `?`; the flag marks
/// sentences whose terminator contains `!`.
fn sentences(text: &str) -> Vec<(&str, bool)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let mut end = i + c.len_utf8();
        let mut exclaimed = c == '!';
        while let Some(&(j, next)) = chars.peek() {
            if !matches!(next, '.' | '!' | '?') {
                break;
            }
            exclaimed |= next == '!';
            end = j + next.len_utf8();
            chars.next();
        }
        out.push((&text[start..end], exclaimed));
        start = end;
    }
    if start < text.len() {
        out.push((&text[start..], false));
    }
    out
}

/// Lowercased word, emoticon and symbol tokens of a sentence.
fn tokens(sentence: &str) -> Vec<String> {
    let mut out = Vec::new();
    for raw in sentence.split_whitespace() {
        let lower = raw.to_lowercase().replace('’', "'");
        let bare = lower.trim_end_matches(['.', '!', '?', ',']);
        if bare.len() > 1 && bare.starts_with([':', ';', '<']) {
            // emoticons like ":)" or "<3"
            out.push(bare.to_string());
            continue;
        }
        let mut word = String::new();
        for c in lower.chars() {
            if c.is_alphanumeric() || (c == '\'' && !word.is_empty()) {
                word.push(c);
                continue;
            }
            if !word.is_empty() {
                out.push(std::mem::take(&mut word));
            }
            if !c.is_ascii() && !c.is_whitespace() {
                // emoji and other symbols stand alone
                out.push(c.to_string());
            }
        }
        if !word.is_empty() {
            out.push(word);
        }
    }
    out
}
