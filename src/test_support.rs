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
use std::rc::Rc;

use crate::*;

pub(crate) const GLYPH_ADVANCE: f32 = 8.0;
pub(crate) const LINE_HEIGHT: i32 = 10;
pub(crate) const BASELINE: i32 = 8;

/// Monospaced 8px font: every letter, digit and '.' is a solid 6x8 block, space is blank.
pub(crate) fn test_font() -> BitmapFont {
    let atlas = [0xFFu8; 8 * 8];
    let mut glyphs = Vec::new();
    for ch in ('A'..='Z').chain('a'..='z').chain('0'..='9').chain(std::iter::once('.')) {
        glyphs.push((
            ch,
            Glyph {
                rect: rect(0, 0, 6, 8),
                offset: vec2(1, -BASELINE),
                advance: GLYPH_ADVANCE,
            },
        ));
    }
    glyphs.push((
        ' ',
        Glyph {
            rect: rect(0, 0, 0, 0),
            offset: vec2(0, 0),
            advance: GLYPH_ADVANCE,
        },
    ));
    let source = FontSource {
        pixel_height: 8.0,
        atlas_width: 8,
        atlas_height: 8,
        line_height: LINE_HEIGHT,
        baseline: BASELINE,
        atlas: &atlas,
        glyphs: &glyphs,
    };
    BitmapFont::from_parts(&source).unwrap()
}

pub(crate) fn shared_font() -> Rc<BitmapFont> { Rc::new(test_font()) }
