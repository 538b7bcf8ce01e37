//! Word-cloud layout and rasterisation.
//!
//! Terms are weighted by frequency after stopword removal, sized from real
//! glyph advances of a [`FontFace`], and placed at the free spot nearest the
//! canvas centre. Free space is tracked on a coarse occupancy grid with a
//! summed-area table, so every candidate position is checked in constant
//! time. Outlines are filled onto a `tiny-skia` pixmap.

use std::path::Path;

use log::debug;
use serde::Serialize;
use tiny_skia::{Color, FillRule, Paint, Path as OutlinePath, Pixmap, Transform};

use crate::font::FontFace;
use crate::stopwords::StopwordSet;
use crate::{AnalysisError, count_words, trim_to_words};

const PALETTE: [[u8; 3]; 8] = [
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [49, 104, 142],
    [53, 183, 121],
    [72, 40, 120],
    [38, 130, 142],
];

/// Occupancy grid resolution in pixels.
const CELL: f32 = 4.0;
const SHRINK: f32 = 0.8;
/// Share of the canvas the terms may cover at their initial sizes.
const FILL_BUDGET: f32 = 0.5;

#[derive(Debug, Clone, Serialize)]
pub struct WordCloudOptions {
    pub width: u32,
    pub height: u32,
    pub min_font_size: f32,
    /// Defaults to half the canvas height.
    pub max_font_size: Option<f32>,
    pub max_words: usize,
    pub background: [u8; 3],
    /// Gap kept between placed terms.
    pub margin: f32,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        WordCloudOptions {
            width: 800,
            height: 400,
            min_font_size: 10.0,
            max_font_size: None,
            max_words: 200,
            background: [255, 255, 255],
            margin: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacedWord {
    pub text: String,
    pub count: u32,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [u8; 3],
    /// Glyph outlines in canvas coordinates.
    #[serde(skip)]
    pub outlines: Vec<OutlinePath>,
}

impl PlacedWord {
    pub fn overlaps(&self, other: &PlacedWord) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// A laid-out word cloud; render it with [`WordCloud::render`].
#[derive(Debug, Clone, Serialize)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
    /// Placed terms, largest first. Terms that did not fit are absent.
    pub words: Vec<PlacedWord>,
}

impl WordCloud {
    pub fn word(&self, text: &str) -> Option<&PlacedWord> {
        self.words.iter().find(|w| w.text == text)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn render(&self) -> Result<Pixmap, AnalysisError> {
        let mut pixmap = Pixmap::new(self.width, self.height).ok_or_else(|| {
            AnalysisError::Render(format!(
                "invalid canvas size {}x{}",
                self.width, self.height
            ))
        })?;
        let [r, g, b] = self.background;
        pixmap.fill(Color::from_rgba8(r, g, b, 255));

        let mut paint = Paint::default();
        paint.anti_alias = true;
        for word in &self.words {
            let [r, g, b] = word.color;
            paint.set_color_rgba8(r, g, b, 255);
            for path in &word.outlines {
                pixmap.fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
        Ok(pixmap)
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, AnalysisError> {
        self.render()?
            .encode_png()
            .map_err(|e| AnalysisError::Render(format!("PNG encoding failed: {e}")))
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), AnalysisError> {
        let path = path.as_ref();
        self.render()?
            .save_png(path)
            .map_err(|e| AnalysisError::Render(format!("Write {} failed: {e}", path.display())))
    }
}

/// Free-space bookkeeping at [`CELL`] resolution.
struct Occupancy {
    cols: usize,
    rows: usize,
    taken: Vec<bool>,
    /// Summed-area table, `(rows + 1) x (cols + 1)`.
    sums: Vec<u32>,
    centre: (f32, f32),
    aspect: f32,
}

impl Occupancy {
    fn new(width: u32, height: u32) -> Self {
        let cols = (width as f32 / CELL) as usize;
        let rows = (height as f32 / CELL) as usize;
        Occupancy {
            cols,
            rows,
            taken: vec![false; cols * rows],
            sums: vec![0; (cols + 1) * (rows + 1)],
            centre: (width as f32 / 2.0, height as f32 / 2.0),
            aspect: if height == 0 { 1.0 } else { width as f32 / height as f32 },
        }
    }

    /// Taken cells in columns `c0..c1`, rows `r0..r1`.
    fn used(&self, c0: usize, r0: usize, c1: usize, r1: usize) -> u32 {
        let stride = self.cols + 1;
        let at = |r: usize, c: usize| self.sums[r * stride + c];
        (at(r1, c1) + at(r0, c0)) - (at(r0, c1) + at(r1, c0))
    }

    /// Top-left corner of the free `w x h` box whose centre is nearest the
    /// canvas centre, distances scaled to the canvas aspect ratio.
    fn find(&self, w: f32, h: f32) -> Option<(f32, f32)> {
        let need_c = ((w / CELL).ceil() as usize).max(1);
        let need_r = ((h / CELL).ceil() as usize).max(1);
        if need_c > self.cols || need_r > self.rows {
            return None;
        }
        let (cx, cy) = self.centre;
        let mut best: Option<(f32, usize, usize)> = None;
        for r in 0..=self.rows - need_r {
            for c in 0..=self.cols - need_c {
                if self.used(c, r, c + need_c, r + need_r) != 0 {
                    continue;
                }
                let dx = (c as f32 * CELL + w / 2.0 - cx) / self.aspect;
                let dy = r as f32 * CELL + h / 2.0 - cy;
                let dist = dx * dx + dy * dy;
                if best.is_none_or(|(d, _, _)| dist < d) {
                    best = Some((dist, c, r));
                }
            }
        }
        best.map(|(_, c, r)| (c as f32 * CELL, r as f32 * CELL))
    }

    /// Mark the box grown by `margin` on every side.
    fn fill(&mut self, x: f32, y: f32, w: f32, h: f32, margin: f32) {
        let span = |lo: f32, hi: f32, limit: usize| {
            let start = ((lo - margin) / CELL).floor().max(0.0) as usize;
            let end = (((hi + margin) / CELL).ceil().max(0.0) as usize).min(limit);
            start..end
        };
        for r in span(y, y + h, self.rows) {
            for c in span(x, x + w, self.cols) {
                self.taken[r * self.cols + c] = true;
            }
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let stride = self.cols + 1;
        for r in 0..self.rows {
            let mut row = 0;
            for c in 0..self.cols {
                row += u32::from(self.taken[r * self.cols + c]);
                self.sums[(r + 1) * stride + c + 1] = self.sums[r * stride + c + 1] + row;
            }
        }
    }
}

/// Builds word clouds against a fixed stopword set.
#[derive(Debug, Clone)]
pub struct WordCloudGenerator<'a> {
    stopwords: &'a StopwordSet,
    font: FontFace,
    options: WordCloudOptions,
}

impl<'a> WordCloudGenerator<'a> {
    /// Generator drawing with the embedded font.
    pub fn new(stopwords: &'a StopwordSet, options: WordCloudOptions) -> Self {
        WordCloudGenerator {
            stopwords,
            font: FontFace::embedded(),
            options,
        }
    }

    pub fn with_font(mut self, font: &FontFace) -> Self {
        self.font = font.clone();
        self
    }

    pub fn options(&self) -> &WordCloudOptions {
        &self.options
    }

    /// Term frequencies after stopword removal, most frequent first
    /// (ties in first-seen order).
    pub fn terms(&self, text: &str) -> Vec<(String, u32)> {
        let words: Vec<String> = trim_to_words(text)
            .into_iter()
            .filter(|w| w.chars().count() > 1)
            .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
            .filter(|w| !self.stopwords.contains(w))
            .collect();
        count_words(&words)
    }

    /// Lay out the cloud. `Ok(None)` when no term survives stopword removal.
    pub fn generate(&self, text: &str) -> Result<Option<WordCloud>, AnalysisError> {
        self.layout(self.terms(text))
    }

    /// Lay out already counted terms, most frequent first.
    ///
    /// A term starts at a size proportional to its count, capped so the
    /// terms together cover at most half the canvas and so it is never
    /// larger than its predecessor allows. It shrinks until it fits or hits
    /// the minimum size, in which case it is skipped.
    pub fn layout(&self, mut terms: Vec<(String, u32)>) -> Result<Option<WordCloud>, AnalysisError> {
        if terms.is_empty() {
            debug!("Word cloud: no terms left after stopword removal");
            return Ok(None);
        }
        terms.truncate(self.options.max_words);

        let opts = &self.options;
        let typesetter = self.font.typesetter()?;
        let min_font = opts.min_font_size.max(1.0);
        let mut max_font = opts
            .max_font_size
            .unwrap_or(opts.height as f32 / 2.0)
            .max(min_font);
        let max_count = terms[0].1 as f32;
        let initial = |max_font: f32, count: u32| (max_font * count as f32 / max_count).max(min_font);

        let canvas = opts.width as f32 * opts.height as f32;
        let area: f32 = terms
            .iter()
            .map(|(text, count)| {
                let (w, h) = typesetter.measure(text, initial(max_font, *count));
                w * h
            })
            .sum();
        if area > FILL_BUDGET * canvas {
            max_font = (max_font * (FILL_BUDGET * canvas / area).sqrt()).max(min_font);
        }

        let mut grid = Occupancy::new(opts.width, opts.height);
        let mut words: Vec<PlacedWord> = Vec::with_capacity(terms.len());
        for (rank, (text, count)) in terms.into_iter().enumerate() {
            if !self.font.covers(&text) {
                debug!("Word cloud: {} has no glyph for some of {text:?}", self.font.source());
            }
            let mut size = initial(max_font, count);
            if let Some(prev) = words.last() {
                size = size.min(prev.font_size * count as f32 / prev.count as f32);
            }
            size = size.max(min_font);
            loop {
                let (w, h) = typesetter.measure(&text, size);
                if let Some((x, y)) = grid.find(w, h) {
                    grid.fill(x, y, w, h, opts.margin);
                    words.push(PlacedWord {
                        outlines: typesetter.outline(&text, size, x, y),
                        text,
                        count,
                        font_size: size,
                        x,
                        y,
                        width: w,
                        height: h,
                        color: PALETTE[rank % PALETTE.len()],
                    });
                    break;
                }
                if size <= min_font {
                    debug!("Word cloud: no room for {text:?}, skipped");
                    break;
                }
                size = (size * SHRINK).max(min_font);
            }
        }

        Ok(Some(WordCloud {
            width: opts.width,
            height: opts.height,
            background: opts.background,
            words,
        }))
    }
}

/// Word cloud with default canvas settings and the embedded font.
pub fn generate(text: &str, stopwords: &StopwordSet) -> Result<Option<WordCloud>, AnalysisError> {
    WordCloudGenerator::new(stopwords, WordCloudOptions::default()).generate(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_the() -> StopwordSet {
        StopwordSet::from_words(["the"])
    }

    fn cloud_of(text: &str, stop: &StopwordSet) -> WordCloud {
        generate(text, stop).unwrap().expect("terms left")
    }

    fn assert_inside_and_apart(cloud: &WordCloud) {
        for (i, a) in cloud.words.iter().enumerate() {
            assert!(a.x >= 0.0 && a.y >= 0.0, "{}", a.text);
            assert!(
                a.x + a.width <= cloud.width as f32 && a.y + a.height <= cloud.height as f32,
                "{}",
                a.text
            );
            for b in &cloud.words[i + 1..] {
                assert!(!a.overlaps(b), "{} / {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn stopwords_do_not_weigh_in() {
        let cloud = cloud_of("the the the cat cat dog", &only_the());
        assert!(cloud.word("the").is_none());
        let cat = cloud.word("cat").expect("cat placed");
        let dog = cloud.word("dog").expect("dog placed");
        assert!(cat.font_size > dog.font_size);
        assert_eq!(cat.count, 2);
        assert_eq!(dog.count, 1);
        assert_eq!(cloud.words[0].text, "cat");
    }

    #[test]
    fn stopword_match_ignores_case() {
        let cloud = cloud_of("The THE the Cat", &only_the());
        assert_eq!(cloud.words.len(), 1);
        assert_eq!(cloud.words[0].text, "cat");
    }

    #[test]
    fn only_stopwords_means_no_content() {
        assert!(generate("the The THE", &only_the()).unwrap().is_none());
        assert!(generate("", &only_the()).unwrap().is_none());
        assert!(generate("!!! 42 ?", &only_the()).unwrap().is_none());
    }

    #[test]
    fn font_sizes_respect_floor_and_proportion() {
        let mut text = "alpha ".repeat(40);
        text.push_str("beta");
        let cloud = cloud_of(&text, &StopwordSet::empty());
        let alpha = cloud.word("alpha").unwrap();
        let beta = cloud.word("beta").unwrap();
        assert_eq!(alpha.font_size, 200.0);
        // 200 / 40 = 5 is below the floor
        assert_eq!(beta.font_size, 10.0);
    }

    #[test]
    fn placed_words_stay_inside_and_apart() {
        let text = "rust cargo crate trait borrow lifetime rust cargo rust \
                    iterator closure macro module enum struct rust cargo";
        let cloud = cloud_of(text, &StopwordSet::english());
        assert!(!cloud.is_empty());
        assert_inside_and_apart(&cloud);
    }

    #[test]
    fn hundred_distinct_terms_all_fit_the_default_canvas() {
        let stop = StopwordSet::empty();
        let terms: Vec<(String, u32)> = (0..100).map(|i| (format!("term{i:03}"), 1)).collect();
        let cloud = WordCloudGenerator::new(&stop, WordCloudOptions::default())
            .layout(terms)
            .unwrap()
            .unwrap();
        assert_eq!(cloud.words.len(), 100);
        assert!(cloud.words.iter().all(|w| w.font_size >= 10.0));
        assert_inside_and_apart(&cloud);
    }

    #[test]
    fn skewed_counts_keep_low_frequency_terms() {
        let stop = StopwordSet::empty();
        let terms: Vec<(String, u32)> = (0..100u32)
            .map(|i| (format!("term{i:03}"), (100 / (i + 1)).max(1)))
            .collect();
        let cloud = WordCloudGenerator::new(&stop, WordCloudOptions::default())
            .layout(terms)
            .unwrap()
            .unwrap();
        assert_eq!(cloud.words.len(), 100);
        assert!(cloud.words[0].font_size > cloud.words[99].font_size);
        assert_inside_and_apart(&cloud);
    }

    #[test]
    fn words_that_never_fit_are_skipped() {
        let stop = StopwordSet::empty();
        let opts = WordCloudOptions {
            width: 40,
            height: 20,
            ..Default::default()
        };
        let cloud = WordCloudGenerator::new(&stop, opts)
            .generate("extraordinarily")
            .unwrap()
            .expect("term exists");
        assert!(cloud.is_empty());
    }

    #[test]
    fn max_words_limits_layout() {
        let stop = StopwordSet::empty();
        let opts = WordCloudOptions {
            max_words: 2,
            ..Default::default()
        };
        let cloud = WordCloudGenerator::new(&stop, opts)
            .generate("one one one two two three")
            .unwrap()
            .unwrap();
        let texts: Vec<_> = cloud.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    fn inked(pixmap: &Pixmap) -> usize {
        pixmap
            .pixels()
            .iter()
            .filter(|p| (p.red(), p.green(), p.blue()) != (255, 255, 255))
            .count()
    }

    #[test]
    fn render_draws_on_white_canvas() {
        let cloud = cloud_of("the the the cat cat dog", &only_the());
        let pixmap = cloud.render().unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (800, 400));
        let ink = inked(&pixmap);
        assert!(ink > 0 && ink < pixmap.pixels().len());

        let png = cloud.encode_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn accented_terms_are_drawn_with_their_own_glyphs() {
        let stop = StopwordSet::empty();
        let plain = cloud_of("cafe", &stop);
        let accented = cloud_of("café", &stop);
        let (p, a) = (plain.word("cafe").unwrap(), accented.word("café").unwrap());
        assert_eq!(p.outlines.len(), 4);
        assert_eq!(a.outlines.len(), 4);
        // the acute accent adds ink above the plain e
        let ink_plain = inked(&plain.render().unwrap());
        let ink_accented = inked(&accented.render().unwrap());
        assert!(ink_accented > ink_plain);
    }

    #[test]
    fn custom_font_is_used_for_layout() {
        let stop = StopwordSet::empty();
        let font = FontFace::embedded();
        let generator = WordCloudGenerator::new(&stop, WordCloudOptions::default()).with_font(&font);
        let cloud = generator.generate("straße naïve").unwrap().unwrap();
        assert_eq!(cloud.words.len(), 2);
        assert!(cloud.words.iter().all(|w| !w.outlines.is_empty()));
    }

    #[test]
    fn zero_sized_canvas_fails_to_render() {
        let cloud = WordCloud {
            width: 0,
            height: 10,
            background: [255, 255, 255],
            words: Vec::new(),
        };
        assert!(matches!(cloud.render(), Err(AnalysisError::Render(_))));
    }

    #[test]
    fn occupancy_blocks_margin_around_placed_box() {
        let mut grid = Occupancy::new(40, 40);
        grid.fill(16.0, 16.0, 8.0, 8.0, 2.0);
        assert_eq!(grid.used(0, 0, 10, 10), 16);
        // nearest free 8x8 box to the centre no longer overlaps the block
        let (x, y) = grid.find(8.0, 8.0).unwrap();
        let clear = x + 8.0 <= 14.0 || x >= 26.0 || y + 8.0 <= 14.0 || y >= 26.0;
        assert!(clear, "({x}, {y})");
    }
}
