//
// Copyright 2023-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
#[cfg(feature = "builder")]
use std::ops::RangeInclusive;

use crate::*;

/// First codepoint baked by [`BitmapFont::bake`].
pub const FIRST_BAKED_CHAR: char = ' ';
/// Last codepoint baked by [`BitmapFont::bake`] (end of the Cyrillic block).
pub const LAST_BAKED_CHAR: char = '\u{04FF}';

#[derive(Debug, Clone, Copy)]
/// Metrics and atlas coordinates for a baked glyph.
pub struct Glyph {
    /// Coverage rectangle inside the atlas.
    pub rect: Recti,
    /// Offset of the bitmap's top-left corner from the pen position on the baseline.
    pub offset: Vec2i,
    /// Horizontal pen advance after this glyph.
    pub advance: f32,
}

/// Pre-baked font description, e.g. generated offline by the `font_bake` tool.
pub struct FontSource<'a> {
    /// Pixel height the glyphs were rasterized at.
    pub pixel_height: f32,
    /// Atlas width in pixels.
    pub atlas_width: usize,
    /// Atlas height in pixels.
    pub atlas_height: usize,
    /// Distance between two baselines.
    pub line_height: i32,
    /// Distance from the top of a line to its baseline.
    pub baseline: i32,
    /// Single-channel coverage, `atlas_width * atlas_height` bytes.
    pub atlas: &'a [u8],
    /// Glyph table.
    pub glyphs: &'a [(char, Glyph)],
}

/// Immutable glyph atlas with per-glyph metrics.
///
/// Fonts are shared read-only between widgets (usually behind an `Rc`). Codepoints that were
/// not baked have no entry and measure and render as nothing.
#[derive(Clone)]
pub struct BitmapFont {
    pixel_height: f32,
    atlas_width: usize,
    atlas_height: usize,
    line_height: i32,
    baseline: i32,
    atlas: Vec<u8>,
    glyphs: HashMap<char, Glyph>,
}

impl Debug for BitmapFont {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitmapFont")
            .field("pixel_height", &self.pixel_height)
            .field("atlas_width", &self.atlas_width)
            .field("atlas_height", &self.atlas_height)
            .field("line_height", &self.line_height)
            .field("baseline", &self.baseline)
            .field("glyphs", &self.glyphs.len())
            .finish()
    }
}

impl BitmapFont {
    /// Builds a font from pre-baked parts, validating the atlas size and every glyph rectangle.
    pub fn from_parts(source: &FontSource<'_>) -> GuiResult<Self> {
        if source.atlas_width == 0 || source.atlas_height == 0 {
            return Err(GuiError::InvalidFont("atlas dimensions must be positive".into()));
        }
        let expected = source.atlas_width * source.atlas_height;
        if source.atlas.len() != expected {
            return Err(GuiError::InvalidFont(format!(
                "expected {} coverage bytes, found {}",
                expected,
                source.atlas.len()
            )));
        }
        if source.line_height <= 0 {
            return Err(GuiError::InvalidFont(format!("line height must be positive, got {}", source.line_height)));
        }
        let mut glyphs = HashMap::with_capacity(source.glyphs.len());
        for (ch, glyph) in source.glyphs {
            if !fits_atlas(&glyph.rect, source.atlas_width, source.atlas_height) {
                return Err(GuiError::InvalidFont(format!("glyph {:?} lies outside the atlas", ch)));
            }
            if glyph.advance == 0.0 && (glyph.rect.width == 0 || glyph.rect.height == 0) {
                continue;
            }
            glyphs.insert(*ch, *glyph);
        }
        Ok(Self {
            pixel_height: source.pixel_height,
            atlas_width: source.atlas_width,
            atlas_height: source.atlas_height,
            line_height: source.line_height,
            baseline: source.baseline,
            atlas: source.atlas.to_vec(),
            glyphs,
        })
    }

    #[cfg(feature = "builder")]
    /// Bakes `FIRST_BAKED_CHAR..=LAST_BAKED_CHAR` from TrueType/OpenType bytes.
    pub fn bake(font_bytes: &[u8], pixel_height: f32, atlas_width: usize, atlas_height: usize) -> GuiResult<Self> {
        Self::bake_range(font_bytes, pixel_height, atlas_width, atlas_height, FIRST_BAKED_CHAR..=LAST_BAKED_CHAR)
    }

    #[cfg(feature = "builder")]
    /// Bakes every printable codepoint of `range` that the face maps into a fresh atlas.
    ///
    /// Fails when the font cannot be parsed or the atlas is too small to hold the glyphs.
    pub fn bake_range(font_bytes: &[u8], pixel_height: f32, atlas_width: usize, atlas_height: usize, range: RangeInclusive<char>) -> GuiResult<Self> {
        if !(pixel_height > 0.0) {
            return Err(GuiError::FontBake(format!("pixel height must be positive, got {}", pixel_height)));
        }
        if atlas_width == 0 || atlas_height == 0 || atlas_width > i32::MAX as usize || atlas_height > i32::MAX as usize {
            return Err(GuiError::FontBake(format!("invalid atlas size {}x{}", atlas_width, atlas_height)));
        }
        let face = fontdue::Font::from_bytes(font_bytes, fontdue::FontSettings::default()).map_err(|e| GuiError::FontBake(e.to_string()))?;

        let mut builder = AtlasBuilder::new(atlas_width, atlas_height);
        let mut glyphs = HashMap::new();

        for ch in range {
            if ch.is_control() || face.lookup_glyph_index(ch) == 0 {
                continue;
            }
            let (metrics, bitmap) = face.rasterize(ch, pixel_height);
            if metrics.advance_width == 0.0 && (metrics.width == 0 || metrics.height == 0) {
                continue;
            }
            let glyph = builder.place(&bitmap, metrics.width, metrics.height, vec2(metrics.xmin, metrics.ymin), metrics.advance_width).ok_or_else(|| {
                GuiError::FontBake(format!(
                    "atlas of {}x{} is too small for {}px glyphs (failed at {:?})",
                    atlas_width, atlas_height, pixel_height, ch
                ))
            })?;
            glyphs.insert(ch, glyph);
        }
        let atlas = builder.pixels;

        let line_metrics = face.horizontal_line_metrics(pixel_height);
        let line_height = line_metrics.as_ref().map(|m| m.new_line_size.round() as i32).unwrap_or(pixel_height.ceil() as i32).max(1);
        let baseline = line_metrics.as_ref().map(|m| m.ascent.round() as i32).unwrap_or(line_height);

        log::info!(
            "baked {} glyphs at {}px into a {}x{} atlas (line height {}, baseline {})",
            glyphs.len(),
            pixel_height,
            atlas_width,
            atlas_height,
            line_height,
            baseline
        );

        Ok(Self {
            pixel_height,
            atlas_width,
            atlas_height,
            line_height,
            baseline,
            atlas,
            glyphs,
        })
    }

    /// Pixel height the glyphs were rasterized at.
    pub fn pixel_height(&self) -> f32 { self.pixel_height }

    /// Distance between two consecutive baselines.
    pub fn line_height(&self) -> i32 { self.line_height }

    /// Distance from the top of a line to its baseline.
    pub fn baseline(&self) -> i32 { self.baseline }

    /// Atlas dimensions.
    pub fn atlas_dimension(&self) -> Dimensioni { Dimensioni::new(self.atlas_width as i32, self.atlas_height as i32) }

    /// Raw coverage bytes of the atlas.
    pub fn atlas(&self) -> &[u8] { &self.atlas }

    /// Coverage of an atlas texel, 0 outside the atlas.
    pub fn coverage(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as usize >= self.atlas_width || y as usize >= self.atlas_height {
            return 0;
        }
        self.atlas[x as usize + y as usize * self.atlas_width]
    }

    /// Number of glyphs in the atlas.
    pub fn glyph_count(&self) -> usize { self.glyphs.len() }

    /// Looks up the glyph for `ch`.
    pub fn glyph(&self, ch: char) -> Option<&Glyph> { self.glyphs.get(&ch) }

    /// Pen advance for `ch`; missing glyphs advance by zero.
    pub fn advance(&self, ch: char) -> f32 { self.glyphs.get(&ch).map(|g| g.advance).unwrap_or(0.0) }

    /// Largest advance of any baked glyph.
    pub fn max_advance(&self) -> f32 { self.glyphs.values().map(|g| g.advance).fold(0.0, f32::max) }

    /// Measures `text`: the widest line's pen advance by the number of lines times the line height.
    pub fn measure_text(&self, text: &str) -> Vec2f {
        if text.is_empty() {
            return Vec2f::new(0.0, 0.0);
        }
        let mut width: f32 = 0.0;
        let mut lines = 0;
        for line in text.split('\n') {
            lines += 1;
            width = width.max(self.line_width(line));
        }
        Vec2f::new(width, (lines * self.line_height) as f32)
    }

    /// Width of `text`, the horizontal part of [`BitmapFont::measure_text`].
    pub fn text_width(&self, text: &str) -> f32 { self.measure_text(text).x }

    fn line_width(&self, line: &str) -> f32 { line.chars().map(|ch| self.advance(ch)).sum() }

    #[cfg(feature = "png_export")]
    /// Encodes the coverage atlas as a grayscale PNG.
    pub fn atlas_png_bytes(&self) -> GuiResult<Vec<u8>> {
        crate::surface::encode_png(self.atlas_width as u32, self.atlas_height as u32, png::ColorType::Grayscale, &self.atlas)
    }
}

fn fits_atlas(r: &Recti, width: usize, height: usize) -> bool {
    r.x >= 0 && r.y >= 0 && r.width >= 0 && r.height >= 0 && (r.x + r.width) as usize <= width && (r.y + r.height) as usize <= height
}

#[cfg(feature = "builder")]
/// Single-channel coverage atlas filled glyph by glyph.
struct AtlasBuilder {
    width: usize,
    pixels: Vec<u8>,
    packer: SkylinePacker,
}

#[cfg(feature = "builder")]
impl AtlasBuilder {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            pixels: vec![0u8; width * height],
            packer: SkylinePacker::new(width as i32, height as i32, 1),
        }
    }

    /// Copies a `width`x`height` coverage bitmap into free atlas space. `min` is the bitmap's
    /// bottom-left corner relative to the pen, y up. Empty bitmaps take no space. Returns `None`
    /// when the atlas is full.
    fn place(&mut self, bitmap: &[u8], width: usize, height: usize, min: Vec2i, advance: f32) -> Option<Glyph> {
        let placed = if width > 0 && height > 0 {
            let r = self.packer.pack(width as i32, height as i32)?;
            for y in 0..height {
                let dst = r.x as usize + (r.y as usize + y) * self.width;
                self.pixels[dst..dst + width].copy_from_slice(&bitmap[y * width..(y + 1) * width]);
            }
            r
        } else {
            rect(0, 0, 0, 0)
        };
        Some(Glyph {
            rect: placed,
            offset: vec2(min.x, -(min.y + height as i32)),
            advance,
        })
    }
}
