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
use crate::*;

/// Rasterizes `text` into `surface` with its top-left corner at `(x, y)`.
///
/// The pen starts on the first baseline (`y + font.baseline()`), `'\n'` returns it to `x` one
/// line lower, and each glyph's coverage is blended with [`PixelSurface::blend_pixel`]. The pen
/// keeps its sub-pixel position across the whole string and is only rounded when a glyph is
/// blitted. Codepoints missing from the atlas are skipped without advancing.
pub fn draw_text(surface: &mut PixelSurface, font: &BitmapFont, text: &str, x: f32, y: f32, clr: Color) -> GuiResult<()> {
    draw_text_clipped(surface, font, text, x, y, clr, None)
}

/// Same as [`draw_text`], but only pixels inside `clip` are touched.
pub fn draw_text_clipped(surface: &mut PixelSurface, font: &BitmapFont, text: &str, x: f32, y: f32, clr: Color, clip: Option<Recti>) -> GuiResult<()> {
    if !surface.is_initialized() {
        return Err(GuiError::SurfaceNotInitialized);
    }
    let clip = match clip {
        Some(c) => intersect_rect(&c, &surface.bounds()),
        None => surface.bounds(),
    };
    if clip.width <= 0 || clip.height <= 0 || clr.a == 0 {
        return Ok(());
    }
    let opacity = clr.a as f32 / 255.0;
    let solid = color(clr.r, clr.g, clr.b, 255);

    let mut pen_x = x;
    let mut pen_y = y + font.baseline() as f32;
    for ch in text.chars() {
        if ch == '\n' {
            pen_x = x;
            pen_y += font.line_height() as f32;
            continue;
        }
        let glyph = match font.glyph(ch) {
            Some(glyph) => *glyph,
            None => continue,
        };
        let dst_x = (pen_x + glyph.offset.x as f32).round() as i32;
        let dst_y = (pen_y + glyph.offset.y as f32).round() as i32;
        blit_glyph(surface, font, &glyph, dst_x, dst_y, solid, opacity, &clip)?;
        pen_x += glyph.advance;
    }
    Ok(())
}

fn blit_glyph(surface: &mut PixelSurface, font: &BitmapFont, glyph: &Glyph, dst_x: i32, dst_y: i32, clr: Color, opacity: f32, clip: &Recti) -> GuiResult<()> {
    let target = intersect_rect(&rect(dst_x, dst_y, glyph.rect.width, glyph.rect.height), clip);
    for y in target.y..target.y + target.height {
        for x in target.x..target.x + target.width {
            let coverage = font.coverage(glyph.rect.x + x - dst_x, glyph.rect.y + y - dst_y);
            if coverage == 0 {
                continue;
            }
            surface.blend_pixel(x, y, clr, coverage as f32 / 255.0 * opacity)?;
        }
    }
    Ok(())
}
