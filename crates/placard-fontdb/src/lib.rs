//! Font loading for placard
//!
//! A generator needs exactly one parsed outline font. [`Font`] validates
//! the bytes once and reads the character map, advances and `kern` pairs
//! into owned lookup tables, so the fit loop never touches the table
//! directory again. The loaded font is immutable and can be shared across
//! threads behind an `Arc`.
//!
//! [`FontDatabase`] is an optional cache for callers that build many
//! generators from the same font files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use read_fonts::{
    tables::{
        cmap::{CmapIterLimits, CmapSubtable},
        kern::SubtableKind,
    },
    FontRef as ReadFontRef, TableProvider,
};

use placard_core::{
    error::{FontLoadError, Result},
    traits::FontRef,
    types::GlyphId,
};

/// A parsed outline font held in memory
///
/// For TTC collections, `face_index` selects the face.
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    metrics: Metrics,
}

impl Font {
    /// Reads and parses a font file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Reads and parses a specific face of a font file
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| FontLoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_data_index(data, face_index)
    }

    /// Parses raw font bytes
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Parses a specific face from raw font bytes
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        // a font without outlines can't draw anything
        if font_ref.glyf().is_err() && font_ref.cff().is_err() && font_ref.cff2().is_err() {
            return Err(FontLoadError::InvalidData.into());
        }

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        let metrics = Metrics::read(&font_ref);

        log::debug!(
            "Loaded font face {} ({} bytes, {} units/em, {} mapped chars, {} kern pairs)",
            face_index,
            data.len(),
            units_per_em,
            metrics.charmap.len(),
            metrics.kern_pairs.len()
        );

        Ok(Font {
            data,
            face_index,
            units_per_em,
            metrics,
        })
    }

    /// Returns the face index for TTC collections (0 for single fonts)
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Finds which glyph draws this character
    pub fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.metrics.charmap.get(&u32::from(ch)).copied()
    }

    /// Horizontal advance in font units
    ///
    /// Glyphs past the last long metric share its advance, as in `hmtx`.
    pub fn advance_width(&self, glyph_id: GlyphId) -> f32 {
        let advances = &self.metrics.advances;
        advances
            .get(glyph_id as usize)
            .or_else(|| advances.last())
            .map_or(0.0, |&advance| f32::from(advance))
    }

    /// Kerning between two glyphs in font units, 0 when the pair isn't listed
    pub fn kerning(&self, left: GlyphId, right: GlyphId) -> f32 {
        self.metrics
            .kern_pairs
            .get(&(left, right))
            .map_or(0.0, |&value| value as f32)
    }

    /// Counts how many different glyphs this font contains
    pub fn glyph_count(&self) -> Option<u32> {
        self.metrics.glyph_count
    }
}

/// Lookup tables copied out of the font at load time
#[derive(Default)]
struct Metrics {
    /// Codepoint -> glyph; the first cmap subtable that maps a codepoint wins
    charmap: HashMap<u32, GlyphId>,
    /// `hmtx` long metric advances
    advances: Vec<u16>,
    /// Horizontal format 0 `kern` pairs, summed across subtables
    kern_pairs: HashMap<(GlyphId, GlyphId), i32>,
    glyph_count: Option<u32>,
}

impl Metrics {
    fn read(font: &ReadFontRef<'_>) -> Self {
        let mut metrics = Metrics {
            glyph_count: font.maxp().ok().map(|maxp| u32::from(maxp.num_glyphs())),
            ..Default::default()
        };

        if let Ok(cmap) = font.cmap() {
            let limits = CmapIterLimits::default_for_font(font);
            for record in cmap.encoding_records() {
                let Ok(subtable) = record.subtable(cmap.offset_data()) else {
                    continue;
                };
                // format 0 has no iterator, it only covers single bytes
                if matches!(subtable, CmapSubtable::Format0(_)) {
                    for codepoint in 0u32..256 {
                        if let Some(gid) = subtable.map_codepoint(codepoint) {
                            metrics.insert_mapping(codepoint, gid.to_u32());
                        }
                    }
                    continue;
                }
                for (codepoint, gid) in subtable.iter_with_limits(limits) {
                    metrics.insert_mapping(codepoint, gid.to_u32());
                }
            }
        }

        if let Ok(hmtx) = font.hmtx() {
            metrics.advances = hmtx.h_metrics().iter().map(|metric| metric.advance()).collect();
        }

        if let Ok(kern) = font.kern() {
            for subtable in kern.subtables().flatten() {
                if !subtable.is_horizontal() || subtable.is_cross_stream() || subtable.is_variable()
                {
                    continue;
                }
                // class based and state machine subtables are not read
                if let Ok(SubtableKind::Format0(pairs)) = subtable.kind() {
                    for pair in pairs.pairs() {
                        *metrics
                            .kern_pairs
                            .entry((pair.left().to_u32(), pair.right().to_u32()))
                            .or_insert(0) += i32::from(pair.value());
                    }
                }
            }
        }

        metrics
    }

    /// Keeps the first mapping seen; glyph 0 is .notdef and never recorded
    fn insert_mapping(&mut self, codepoint: u32, glyph_id: GlyphId) {
        if glyph_id != 0 {
            self.charmap.entry(codepoint).or_insert(glyph_id);
        }
    }
}

impl FontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.glyph_id(ch)
    }

    fn advance_width(&self, glyph_id: GlyphId) -> f32 {
        self.advance_width(glyph_id)
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f32 {
        self.kerning(left, right)
    }

    fn face_index(&self) -> u32 {
        self.face_index
    }

    fn glyph_count(&self) -> Option<u32> {
        self.glyph_count()
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("bytes", &self.data.len())
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

/// Keeps loaded fonts around so the same file is parsed once
///
/// The database is owned by the caller; nothing here is process-global.
pub struct FontDatabase {
    fonts: Vec<Arc<Font>>,
    /// Canonical path -> loaded font
    path_cache: HashMap<PathBuf, Arc<Font>>,
}

impl FontDatabase {
    pub fn new() -> Self {
        Self {
            fonts: Vec::new(),
            path_cache: HashMap::new(),
        }
    }

    /// Loads a font file, or returns the copy loaded earlier from the same path
    pub fn load_font(&mut self, path: impl AsRef<Path>) -> Result<Arc<Font>> {
        let path = path.as_ref();
        let cache_key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some(font) = self.path_cache.get(&cache_key) {
            log::debug!("Font cache hit for {}", cache_key.display());
            return Ok(font.clone());
        }

        let font = Arc::new(Font::from_file(path)?);
        self.path_cache.insert(cache_key, font.clone());
        self.fonts.push(font.clone());
        Ok(font)
    }

    /// Adds a font from memory
    pub fn load_font_data(&mut self, data: Vec<u8>) -> Result<Arc<Font>> {
        let font = Arc::new(Font::from_data(data)?);
        self.fonts.push(font.clone());
        Ok(font)
    }

    pub fn fonts(&self) -> &[Arc<Font>] {
        &self.fonts
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Forgets every loaded font; fonts still held elsewhere stay alive
    pub fn clear(&mut self) {
        self.fonts.clear();
        self.path_cache.clear();
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}
