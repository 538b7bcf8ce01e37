//! Font faces for the word cloud.
//!
//! Glyph outlines come from a TrueType/OpenType face via `ttf-parser` and are
//! turned into `tiny-skia` paths already scaled and positioned on the canvas.
//! DejaVu Sans is embedded as the default face; it covers Latin, Greek and
//! Cyrillic. Scripts outside a face's coverage draw as its `.notdef` glyph,
//! so CJK terms need a user-supplied face ([`FontFace::from_file`]).

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tiny_skia::{Path as OutlinePath, PathBuilder, Transform};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use crate::AnalysisError;

const EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

static EMBEDDED: Lazy<FontFace> = Lazy::new(|| FontFace {
    data: Arc::from(EMBEDDED_FONT),
    source: "DejaVu Sans (embedded)".to_string(),
});

/// Raw font bytes, validated on construction. Cloning is cheap.
#[derive(Clone)]
pub struct FontFace {
    data: Arc<[u8]>,
    source: String,
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("source", &self.source)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Default for FontFace {
    fn default() -> Self {
        Self::embedded()
    }
}

impl FontFace {
    /// The built-in DejaVu Sans face.
    pub fn embedded() -> Self {
        EMBEDDED.clone()
    }

    pub fn from_bytes(data: Vec<u8>, source: impl Into<String>) -> Result<Self, AnalysisError> {
        let source = source.into();
        Face::parse(&data, 0)
            .map_err(|e| AnalysisError::Font(format!("{source} is not a usable font: {e}")))?;
        Ok(FontFace {
            data: Arc::from(data),
            source,
        })
    }

    /// Load a `.ttf`/`.otf` file (first face of a collection).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| AnalysisError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(data, path.display().to_string())
    }

    /// Where the face came from, for diagnostics.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when every non-whitespace char of `text` has a glyph.
    pub fn covers(&self, text: &str) -> bool {
        match Face::parse(&self.data, 0) {
            Ok(face) => text
                .chars()
                .filter(|c| !c.is_whitespace())
                .all(|c| face.glyph_index(c).is_some()),
            Err(_) => false,
        }
    }

    pub(crate) fn typesetter(&self) -> Result<Typesetter<'_>, AnalysisError> {
        let face = Face::parse(&self.data, 0)
            .map_err(|e| AnalysisError::Font(format!("{}: {e}", self.source)))?;
        let units_per_em = f32::from(face.units_per_em());
        if units_per_em <= 0.0 {
            return Err(AnalysisError::Font(format!(
                "{} has invalid units_per_em",
                self.source
            )));
        }
        Ok(Typesetter {
            ascender: f32::from(face.ascender()),
            descender: f32::from(face.descender()),
            units_per_em,
            face,
        })
    }
}

/// Measures and outlines single-line text with one parsed face.
pub(crate) struct Typesetter<'a> {
    face: Face<'a>,
    units_per_em: f32,
    ascender: f32,
    /// Negative below the baseline.
    descender: f32,
}

impl Typesetter<'_> {
    fn glyph(&self, c: char) -> GlyphId {
        self.face.glyph_index(c).unwrap_or(GlyphId(0))
    }

    fn advance(&self, glyph: GlyphId) -> f32 {
        f32::from(self.face.glyph_hor_advance(glyph).unwrap_or(0))
    }

    /// Width from glyph advances, height from ascender to descender.
    pub(crate) fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let scale = size / self.units_per_em;
        let width: f32 = text.chars().map(|c| self.advance(self.glyph(c))).sum();
        (width * scale, (self.ascender - self.descender) * scale)
    }

    /// Glyph paths for `text` with the line box's top-left corner at `(x, y)`.
    pub(crate) fn outline(&self, text: &str, size: f32, x: f32, y: f32) -> Vec<OutlinePath> {
        let scale = size / self.units_per_em;
        let baseline = y + self.ascender * scale;
        let mut pen = x;
        let mut paths = Vec::with_capacity(text.len());
        for c in text.chars() {
            let glyph = self.glyph(c);
            // font units are y-up, the canvas is y-down
            let ts = Transform::from_row(scale, 0.0, 0.0, -scale, pen, baseline);
            if let Some(path) = glyph_path(&self.face, glyph).and_then(|p| p.transform(ts)) {
                paths.push(path);
            }
            pen += self.advance(glyph) * scale;
        }
        paths
    }
}

struct GlyphOutline(PathBuilder);

impl OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

/// Outline in font units; `None` for blank glyphs such as the space.
fn glyph_path(face: &Face<'_>, glyph: GlyphId) -> Option<OutlinePath> {
    let mut builder = GlyphOutline(PathBuilder::new());
    face.outline_glyph(glyph, &mut builder)?;
    builder.0.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_face_covers_accented_and_cyrillic_letters() {
        let font = FontFace::embedded();
        assert!(font.covers("café naïve straße Ærøskøbing"));
        assert!(font.covers("Привет мир"));
        assert!(!font.covers("東京"));
    }

    #[test]
    fn accented_letters_have_their_own_outlines() {
        let font = FontFace::embedded();
        let ts = font.typesetter().unwrap();
        let notdef = glyph_path(&ts.face, GlyphId(0)).map(|p| p.bounds());
        for c in ['é', 'ï', 'ß'] {
            let glyph = ts.glyph(c);
            assert_ne!(glyph, GlyphId(0), "{c}");
            let bounds = glyph_path(&ts.face, glyph).map(|p| p.bounds());
            assert!(bounds.is_some(), "{c}");
            assert_ne!(bounds, notdef, "{c}");
        }
    }

    #[test]
    fn measurement_follows_advances_and_size() {
        let face = FontFace::embedded();
        let ts = face.typesetter().unwrap();
        let (w10, h10) = ts.measure("word", 10.0);
        let (w20, h20) = ts.measure("word", 20.0);
        assert!(w10 > 0.0 && h10 > 10.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-3);
        assert!((h20 - 2.0 * h10).abs() < 1e-3);
        let (longer, _) = ts.measure("wordy", 10.0);
        assert!(longer > w10);
        // proportional, not monospaced
        assert!(ts.measure("iiii", 10.0).0 < ts.measure("mmmm", 10.0).0);
    }

    #[test]
    fn outlines_sit_inside_the_line_box() {
        let face = FontFace::embedded();
        let ts = face.typesetter().unwrap();
        let (w, h) = ts.measure("Ship", 40.0);
        let paths = ts.outline("Ship", 40.0, 100.0, 50.0);
        assert_eq!(paths.len(), 4);
        for p in &paths {
            let b = p.bounds();
            assert!(b.left() >= 100.0 - 1.0 && b.right() <= 100.0 + w + 1.0);
            assert!(b.top() >= 50.0 - 1.0 && b.bottom() <= 50.0 + h + 1.0);
        }
        // a space advances the pen but has no outline
        assert_eq!(ts.outline("a b", 40.0, 0.0, 0.0).len(), 2);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = FontFace::from_bytes(b"not a font".to_vec(), "junk").unwrap_err();
        assert!(matches!(err, AnalysisError::Font(_)));
        assert!(err.to_string().contains("junk"));
    }

    #[test]
    fn missing_font_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FontFace::from_file(dir.path().join("none.ttf")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }
}
