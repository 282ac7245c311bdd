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

#[derive(Clone, Copy, Debug)]
struct Span {
    left: i32,
    top: i32,
    width: i32,
}

impl Span {
    fn right(&self) -> i32 { self.left + self.width }
}

/// Skyline rectangle packer used to lay glyph bitmaps out inside the font atlas.
///
/// The packer tracks the lowest free row ("skyline") for every horizontal span and places each
/// rectangle where its bottom edge ends up highest, preferring narrower spans on ties.
/// `padding` pixels are kept free around the atlas border and between rectangles.
#[derive(Clone, Debug)]
pub struct SkylinePacker {
    width: i32,
    height: i32,
    padding: i32,
    // sorted by `left`, covering [0, width) without gaps
    spans: Vec<Span>,
}

impl SkylinePacker {
    /// Creates a packer for a `width` × `height` area.
    pub fn new(width: i32, height: i32, padding: i32) -> Self {
        let padding = padding.max(0);
        let inner_width = (width - padding).max(0);
        let inner_height = (height - padding).max(0);
        Self {
            width: inner_width,
            height: inner_height,
            padding,
            spans: vec![Span { left: 0, top: 0, width: inner_width }],
        }
    }

    /// Reserves a `width` × `height` rectangle and returns its position in atlas coordinates.
    ///
    /// Returns `None` when the rectangle is empty or no longer fits.
    pub fn pack(&mut self, width: i32, height: i32) -> Option<Recti> {
        if width <= 0 || height <= 0 {
            return None;
        }
        let (index, placed) = self.find(width + self.padding, height + self.padding)?;
        self.occupy(index, placed);
        self.merge();
        Some(rect(placed.x + self.padding, placed.y + self.padding, width, height))
    }

    // top of the rectangle when its left edge sits on span `index`
    fn fit(&self, index: usize, w: i32, h: i32) -> Option<i32> {
        let left = self.spans[index].left;
        if left + w > self.width {
            return None;
        }
        let mut top = 0;
        let mut remaining = w;
        for span in &self.spans[index..] {
            top = top.max(span.top);
            if top + h > self.height {
                return None;
            }
            if span.width >= remaining {
                return Some(top);
            }
            remaining -= span.width;
        }
        None
    }

    fn find(&self, w: i32, h: i32) -> Option<(usize, Recti)> {
        let mut best: Option<(usize, Recti)> = None;
        let mut best_bottom = i32::MAX;
        let mut best_width = i32::MAX;
        for index in 0..self.spans.len() {
            if let Some(top) = self.fit(index, w, h) {
                let bottom = top + h;
                let span_width = self.spans[index].width;
                if bottom < best_bottom || (bottom == best_bottom && span_width < best_width) {
                    best_bottom = bottom;
                    best_width = span_width;
                    best = Some((index, rect(self.spans[index].left, top, w, h)));
                }
            }
        }
        best
    }

    fn occupy(&mut self, index: usize, placed: Recti) {
        let new_span = Span { left: placed.x, top: placed.y + placed.height, width: placed.width };
        self.spans.insert(index, new_span);
        let right = new_span.right();
        let next = index + 1;
        while next < self.spans.len() {
            let span = self.spans[next];
            if span.left >= right {
                break;
            }
            let overlap = right - span.left;
            if span.width <= overlap {
                self.spans.remove(next);
            } else {
                self.spans[next].left += overlap;
                self.spans[next].width -= overlap;
                break;
            }
        }
    }

    fn merge(&mut self) {
        let mut i = 1;
        while i < self.spans.len() {
            if self.spans[i - 1].top == self.spans[i].top {
                self.spans[i - 1].width += self.spans[i].width;
                self.spans.remove(i);
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlaps(a: &Recti, b: &Recti) -> bool {
        let i = intersect_rect(a, b);
        i.width > 0 && i.height > 0
    }

    #[test]
    fn packs_without_overlap_and_within_bounds() {
        let mut packer = SkylinePacker::new(64, 64, 1);
        let mut placed = Vec::new();
        for (w, h) in [(10, 12), (20, 5), (7, 7), (30, 9), (12, 12), (5, 20)] {
            let r = packer.pack(w, h).unwrap();
            assert_eq!((r.width, r.height), (w, h));
            assert!(r.x >= 1 && r.y >= 1);
            assert!(r.x + r.width <= 64 && r.y + r.height <= 64);
            for other in &placed {
                assert!(!overlaps(&r, other));
            }
            placed.push(r);
        }
    }

    #[test]
    fn rejects_rectangles_that_do_not_fit() {
        let mut packer = SkylinePacker::new(16, 16, 1);
        assert!(packer.pack(20, 4).is_none());
        assert!(packer.pack(0, 4).is_none());
        assert!(packer.pack(14, 14).is_some());
        assert!(packer.pack(4, 4).is_none());
    }

    #[test]
    fn fills_a_row_before_starting_the_next() {
        let mut packer = SkylinePacker::new(33, 100, 1);
        let a = packer.pack(15, 10).unwrap();
        let b = packer.pack(15, 10).unwrap();
        assert_eq!(a.y, b.y);
        let c = packer.pack(15, 10).unwrap();
        assert!(c.y > a.y);
    }
}
