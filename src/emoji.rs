//! Emoji frequency counting.
//!
//! Glyphs are checked against an [`EmojiRegistry`] and tallied in the order
//! they are first seen. Matching runs either per `char` (the default, which
//! misses multi-codepoint emoji such as flags or ZWJ families) or per
//! extended grapheme cluster.

use std::collections::{HashMap, HashSet};

use clap::ValueEnum;
use once_cell::sync::Lazy;
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

static UNICODE_REGISTRY: Lazy<EmojiRegistry> = Lazy::new(EmojiRegistry::unicode);

/// Emoji components that are also counted on their own, as in per-char
/// matching of "👍🏽" which yields both 👍 and 🏽.
const COMPONENTS: &[(&str, &str)] = &[
    ("\u{1F3FB}", "light skin tone"),
    ("\u{1F3FC}", "medium-light skin tone"),
    ("\u{1F3FD}", "medium skin tone"),
    ("\u{1F3FE}", "medium-dark skin tone"),
    ("\u{1F3FF}", "dark skin tone"),
    ("\u{1F9B0}", "red hair"),
    ("\u{1F9B1}", "curly hair"),
    ("\u{1F9B2}", "bald"),
    ("\u{1F9B3}", "white hair"),
];

fn component_name(glyph: &str) -> Option<&'static str> {
    COMPONENTS
        .iter()
        .find(|(g, _)| *g == glyph)
        .map(|(_, name)| *name)
}

/// Set of glyphs recognised as emoji.
#[derive(Debug, Clone, Default)]
pub struct EmojiRegistry {
    // None = the full Unicode emoji list
    custom: Option<HashSet<String>>,
}

impl EmojiRegistry {
    /// Every emoji in the Unicode emoji list, including skin-tone and
    /// unqualified variants, plus the standalone skin-tone and hair
    /// components.
    pub fn unicode() -> Self {
        EmojiRegistry { custom: None }
    }

    /// Registry restricted to the given glyphs.
    pub fn from_glyphs<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EmojiRegistry {
            custom: Some(glyphs.into_iter().map(Into::into).collect()),
        }
    }

    pub fn contains(&self, glyph: &str) -> bool {
        match &self.custom {
            Some(set) => set.contains(glyph),
            None => emojis::get(glyph).is_some() || component_name(glyph).is_some(),
        }
    }

    /// CLDR short name, if the glyph is a Unicode emoji.
    pub fn name(&self, glyph: &str) -> Option<&'static str> {
        emojis::get(glyph)
            .map(|e| e.name())
            .or_else(|| component_name(glyph))
    }
}

/// How text is split before registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
pub enum EmojiMatch {
    /// One lookup per `char`.
    #[default]
    Char,
    /// One lookup per extended grapheme cluster; falls back to the
    /// cluster's chars when the whole cluster is unknown.
    Grapheme,
}

/// Glyph -> count, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmojiFrequency {
    entries: Vec<(String, u32)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl EmojiFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, glyph: &str) {
        match self.index.get(glyph) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(glyph.to_string(), self.entries.len());
                self.entries.push((glyph.to_string(), 1));
            }
        }
    }

    pub fn get(&self, glyph: &str) -> Option<u32> {
        self.index.get(glyph).map(|&i| self.entries[i].1)
    }

    /// Number of distinct glyphs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of emoji occurrences.
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(g, c)| (g.as_str(), *c))
    }

    /// The `k` most frequent glyphs; ties keep first-seen order.
    pub fn top(&self, k: usize) -> Vec<(String, u32)> {
        let mut sorted = self.entries.clone();
        // sort_by is stable, so equal counts stay in first-seen order
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(k);
        sorted
    }

    /// Percentage share of each glyph, first-seen order.
    pub fn distribution(&self) -> Vec<(String, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.entries
            .iter()
            .map(|(g, c)| (g.clone(), *c as f64 * 100.0 / total as f64))
            .collect()
    }
}

/// Counts registry glyphs in a text.
#[derive(Debug, Clone, Copy)]
pub struct EmojiCounter<'a> {
    registry: &'a EmojiRegistry,
    mode: EmojiMatch,
}

impl<'a> EmojiCounter<'a> {
    pub fn new(registry: &'a EmojiRegistry, mode: EmojiMatch) -> Self {
        EmojiCounter { registry, mode }
    }

    pub fn count(&self, text: &str) -> EmojiFrequency {
        let mut freq = EmojiFrequency::new();
        match self.mode {
            EmojiMatch::Char => {
                let mut buf = [0u8; 4];
                for c in text.chars() {
                    let glyph = c.encode_utf8(&mut buf);
                    if self.registry.contains(glyph) {
                        freq.add(glyph);
                    }
                }
            }
            EmojiMatch::Grapheme => {
                let mut buf = [0u8; 4];
                for cluster in text.graphemes(true) {
                    if self.registry.contains(cluster) {
                        freq.add(cluster);
                        continue;
                    }
                    for c in cluster.chars() {
                        let glyph = c.encode_utf8(&mut buf);
                        if self.registry.contains(glyph) {
                            freq.add(glyph);
                        }
                    }
                }
            }
        }
        freq
    }
}

/// Count emoji with the Unicode registry, one lookup per `char`.
pub fn count(text: &str) -> EmojiFrequency {
    EmojiCounter::new(&UNICODE_REGISTRY, EmojiMatch::Char).count(text)
}

/// Replace `:shortcode:` tokens (GitHub names, e.g. `:heart:`) with their emoji.
/// Unknown shortcodes are left untouched.
pub fn emojize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replaced = after.find(':').and_then(|end| {
            let code = &after[..end];
            if code.is_empty() || code.contains(char::is_whitespace) {
                return None;
            }
            emojis::get_by_shortcode(code).map(|e| (e.as_str(), end))
        });
        match replaced {
            Some((glyph, end)) => {
                out.push_str(glyph);
                rest = &after[end + 1..];
            }
            None => {
                out.push(':');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
