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
use crate::BitmapFont;

// Cursor positions are byte offsets that always sit on a char boundary.

pub(crate) fn clamp_cursor(buf: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(buf.len());
    while cursor > 0 && !buf.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

pub(crate) fn insert_char(buf: &mut String, cursor: &mut usize, ch: char) {
    let at = clamp_cursor(buf, *cursor);
    buf.insert(at, ch);
    *cursor = at + ch.len_utf8();
}

/// Removes the char before the cursor. Returns `false` at the start of the buffer.
pub(crate) fn delete_prev(buf: &mut String, cursor: &mut usize) -> bool {
    let end = clamp_cursor(buf, *cursor);
    if end == 0 {
        return false;
    }
    let start = move_left(buf, end);
    buf.replace_range(start..end, "");
    *cursor = start;
    true
}

/// Removes the char under the cursor. Returns `false` at the end of the buffer.
pub(crate) fn delete_next(buf: &mut String, cursor: usize) -> bool {
    let start = clamp_cursor(buf, cursor);
    if start >= buf.len() {
        return false;
    }
    let end = move_right(buf, start);
    buf.replace_range(start..end, "");
    true
}

pub(crate) fn move_left(buf: &str, cursor: usize) -> usize {
    buf[..clamp_cursor(buf, cursor)].char_indices().next_back().map(|(idx, _)| idx).unwrap_or(0)
}

pub(crate) fn move_right(buf: &str, cursor: usize) -> usize {
    let cursor = clamp_cursor(buf, cursor);
    buf[cursor..].chars().next().map(|ch| cursor + ch.len_utf8()).unwrap_or(buf.len())
}

/// Truncates `buf` to at most `max_chars` chars; 0 means unlimited.
pub(crate) fn truncate_chars(buf: &mut String, max_chars: usize) {
    if max_chars == 0 {
        return;
    }
    if let Some((idx, _)) = buf.char_indices().nth(max_chars) {
        buf.truncate(idx);
    }
}

/// Cursor position closest to `target_x` pixels from the start of `buf`.
pub(crate) fn cursor_from_x(buf: &str, font: &BitmapFont, target_x: f32) -> usize {
    if target_x <= 0.0 {
        return 0;
    }
    let mut pen = 0.0;
    for (idx, ch) in buf.char_indices() {
        let advance = font.advance(ch);
        if target_x < pen + advance * 0.5 {
            return idx;
        }
        pen += advance;
    }
    buf.len()
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
/// Slice of a string that falls inside a horizontally scrolled window.
pub struct VisibleRange {
    /// First visible byte.
    pub start: usize,
    /// One past the last visible byte.
    pub end: usize,
    /// Where the slice starts relative to the window's left edge (zero or negative).
    pub offset: f32,
}

/// Finds the substring of `buf` to draw when scrolled by `scroll` pixels into a `width`-pixel
/// window.
///
/// The first char whose right edge reaches `scroll` opens the range and the first char whose
/// left edge reaches `scroll + width` closes it. Drawing the slice at `offset` keeps the clipped
/// glyphs at their exact sub-pixel positions.
pub(crate) fn visible_range(buf: &str, font: &BitmapFont, scroll: f32, width: f32) -> VisibleRange {
    if buf.is_empty() || width <= 0.0 {
        return VisibleRange::default();
    }
    let limit = scroll + width;
    let mut pen = 0.0;
    let mut start = None;
    let mut offset = 0.0;
    let mut end = buf.len();
    for (idx, ch) in buf.char_indices() {
        let left = pen;
        pen += font.advance(ch);
        match start {
            None => {
                if pen >= scroll {
                    start = Some(idx);
                    offset = left - scroll;
                }
            }
            Some(_) => {
                if left >= limit {
                    end = idx;
                    break;
                }
            }
        }
    }
    match start {
        Some(start) => VisibleRange { start, end, offset },
        None => VisibleRange {
            start: buf.len(),
            end: buf.len(),
            offset: 0.0,
        },
    }
}
