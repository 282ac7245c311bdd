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

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Per-side spacing used for margins and paddings.
pub struct Thickness {
    /// Left side.
    pub left: i32,
    /// Top side.
    pub top: i32,
    /// Right side.
    pub right: i32,
    /// Bottom side.
    pub bottom: i32,
}

impl Thickness {
    /// Creates a thickness from its four sides.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self { Self { left, top, right, bottom } }

    /// Same spacing on every side.
    pub fn uniform(n: i32) -> Self { Self::new(n, n, n, n) }

    /// `left + right`.
    pub fn horizontal(&self) -> i32 { self.left + self.right }

    /// `top + bottom`.
    pub fn vertical(&self) -> i32 { self.top + self.bottom }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Horizontal placement of a widget inside its parent's content box.
pub enum HorizontalAnchor {
    /// Offset from the left edge.
    #[default]
    Left,
    /// Centered, then offset.
    Center,
    /// Offset from the right edge.
    Right,
    /// Fills the parent width minus the margin.
    Stretch,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Vertical placement of a widget inside its parent's content box.
pub enum VerticalAnchor {
    /// Offset from the top edge.
    #[default]
    Top,
    /// Centered, then offset.
    Center,
    /// Offset from the bottom edge.
    Bottom,
    /// Fills the parent height minus the margin.
    Stretch,
}

#[derive(Copy, Clone, Debug)]
/// Layout properties shared by every widget kind.
pub struct Element {
    /// Explicit offset applied after anchoring (mirrored for right/bottom anchors).
    pub offset: Vec2i,
    /// Explicit width, used unless stretched or relative.
    pub width: i32,
    /// Explicit height, used unless stretched or relative.
    pub height: i32,
    /// Space kept around the widget inside its parent.
    pub margin: Thickness,
    /// Space between the widget's edge and its children.
    pub padding: Thickness,
    /// Horizontal anchor.
    pub horizontal_anchor: HorizontalAnchor,
    /// Vertical anchor.
    pub vertical_anchor: VerticalAnchor,
    relative_width: Option<f32>,
    relative_height: Option<f32>,
    /// Hidden widgets are neither rendered nor receive events, and neither do their children.
    pub visible: bool,
    /// Draws the resolved bounds as an outline.
    pub debug: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            offset: vec2(0, 0),
            width: 0,
            height: 0,
            margin: Thickness::default(),
            padding: Thickness::default(),
            horizontal_anchor: HorizontalAnchor::Left,
            vertical_anchor: VerticalAnchor::Top,
            relative_width: None,
            relative_height: None,
            visible: true,
            debug: false,
        }
    }
}

impl Element {
    /// Element with an explicit size.
    pub fn sized(width: i32, height: i32) -> Self { Self { width, height, ..Self::default() } }

    /// Sets the explicit size.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the explicit offset.
    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.offset = vec2(x, y);
        self
    }

    /// Sets the margin.
    pub fn with_margin(mut self, margin: Thickness) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the padding.
    pub fn with_padding(mut self, padding: Thickness) -> Self {
        self.padding = padding;
        self
    }

    /// Sets both anchors.
    pub fn with_anchors(mut self, horizontal: HorizontalAnchor, vertical: VerticalAnchor) -> Self {
        self.horizontal_anchor = horizontal;
        self.vertical_anchor = vertical;
        self
    }

    /// Sets the width as a fraction of the parent's content width; `None` disables it.
    pub fn with_relative_width(mut self, fraction: Option<f32>) -> Self {
        self.set_relative_width(fraction);
        self
    }

    /// Sets the height as a fraction of the parent's content height; `None` disables it.
    pub fn with_relative_height(mut self, fraction: Option<f32>) -> Self {
        self.set_relative_height(fraction);
        self
    }

    /// Relative width fraction, if enabled.
    pub fn relative_width(&self) -> Option<f32> { self.relative_width }

    /// Relative height fraction, if enabled.
    pub fn relative_height(&self) -> Option<f32> { self.relative_height }

    /// Enables (clamped to `[0, 1]`) or disables relative width.
    pub fn set_relative_width(&mut self, fraction: Option<f32>) { self.relative_width = fraction.map(clamp_fraction); }

    /// Enables (clamped to `[0, 1]`) or disables relative height.
    pub fn set_relative_height(&mut self, fraction: Option<f32>) { self.relative_height = fraction.map(clamp_fraction); }
}

fn clamp_fraction(f: f32) -> f32 { if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) } }

#[derive(Copy, Clone, Debug)]
/// Geometry of one widget for the current frame.
pub struct ResolvedRect {
    /// Position relative to the parent's content box.
    pub local: Vec2i,
    /// Border box in surface coordinates.
    pub bounds: Recti,
    /// Content box (bounds minus padding) in surface coordinates.
    pub content: Recti,
}

impl ResolvedRect {
    /// Hit-tests a surface-space point against the bounds.
    pub fn contains(&self, x: i32, y: i32) -> bool { rect_contains(&self.bounds, x, y) }
}

/// Per-frame side table of resolved widget geometry, indexed by widget id.
#[derive(Clone, Debug, Default)]
pub struct LayoutTable {
    viewport: Option<(i32, i32)>,
    rects: Vec<Option<ResolvedRect>>,
}

impl LayoutTable {
    pub(crate) fn with_capacity(viewport: Dimensioni, count: usize) -> Self {
        Self {
            viewport: Some((viewport.width, viewport.height)),
            rects: vec![None; count],
        }
    }

    /// Viewport the table was solved against, `None` for an empty table.
    pub fn viewport(&self) -> Option<Dimensioni> { self.viewport.map(|(w, h)| Dimensioni::new(w, h)) }

    /// Resolved geometry of `id`; `None` for detached or hidden widgets.
    pub fn get(&self, id: WidgetId) -> Option<&ResolvedRect> { self.rects.get(id.index()).and_then(|r| r.as_ref()) }

    pub(crate) fn set(&mut self, id: WidgetId, r: ResolvedRect) {
        if id.index() >= self.rects.len() {
            self.rects.resize(id.index() + 1, None);
        }
        self.rects[id.index()] = Some(r);
    }
}

/// Sizes and places one element inside a parent content box of `parent` size whose top-left
/// corner sits at `origin` in surface coordinates. `intrinsic` replaces the explicit size
/// (used by auto-sized labels).
pub(crate) fn resolve(element: &Element, parent: Dimensioni, origin: Vec2i, intrinsic: Option<Dimensioni>) -> ResolvedRect {
    let margin = element.margin;
    let (explicit_w, explicit_h) = match intrinsic {
        Some(size) => (size.width, size.height),
        None => (element.width, element.height),
    };

    let avail_w = parent.width - margin.horizontal();
    let avail_h = parent.height - margin.vertical();

    let width = if element.horizontal_anchor == HorizontalAnchor::Stretch {
        avail_w
    } else if let Some(fraction) = element.relative_width {
        (avail_w as f32 * fraction).round() as i32
    } else {
        explicit_w
    }
    .max(0);

    let height = if element.vertical_anchor == VerticalAnchor::Stretch {
        avail_h
    } else if let Some(fraction) = element.relative_height {
        (avail_h as f32 * fraction).round() as i32
    } else {
        explicit_h
    }
    .max(0);

    let x = match element.horizontal_anchor {
        HorizontalAnchor::Left | HorizontalAnchor::Stretch => margin.left + element.offset.x,
        HorizontalAnchor::Center => margin.left + (avail_w - width).max(0) / 2 + element.offset.x,
        HorizontalAnchor::Right => parent.width - margin.right - width - element.offset.x,
    };
    let y = match element.vertical_anchor {
        VerticalAnchor::Top | VerticalAnchor::Stretch => margin.top + element.offset.y,
        VerticalAnchor::Center => margin.top + (avail_h - height).max(0) / 2 + element.offset.y,
        VerticalAnchor::Bottom => parent.height - margin.bottom - height - element.offset.y,
    };

    let bounds = rect(origin.x + x, origin.y + y, width, height);
    let padding = element.padding;
    let content = rect(
        bounds.x + padding.left,
        bounds.y + padding.top,
        (width - padding.horizontal()).max(0),
        (height - padding.vertical()).max(0),
    );
    ResolvedRect { local: vec2(x, y), bounds, content }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(w: i32, h: i32) -> Dimensioni { Dimensioni::new(w, h) }

    #[test]
    fn stretch_subtracts_margin() {
        let e = Element::default()
            .with_anchors(HorizontalAnchor::Stretch, VerticalAnchor::Top)
            .with_margin(Thickness::uniform(10));
        let r = resolve(&e, parent(200, 100), vec2(0, 0), None);
        assert_eq!(r.bounds.width, 180);
        assert_eq!(r.local.x, 10);
    }

    #[test]
    fn center_splits_free_space() {
        let e = Element::sized(50, 20).with_anchors(HorizontalAnchor::Center, VerticalAnchor::Center);
        let r = resolve(&e, parent(200, 100), vec2(0, 0), None);
        assert_eq!((r.local.x, r.local.y), (75, 40));
    }

    #[test]
    fn center_never_goes_negative() {
        let e = Element::sized(300, 20).with_anchors(HorizontalAnchor::Center, VerticalAnchor::Top);
        let r = resolve(&e, parent(200, 100), vec2(0, 0), None);
        assert_eq!(r.local.x, 0);
    }

    #[test]
    fn right_and_bottom_mirror_offset() {
        let e = Element::sized(40, 10)
            .with_anchors(HorizontalAnchor::Right, VerticalAnchor::Bottom)
            .with_margin(Thickness::new(0, 0, 5, 6))
            .with_offset(3, 4);
        let r = resolve(&e, parent(200, 100), vec2(10, 20), None);
        assert_eq!((r.local.x, r.local.y), (200 - 5 - 40 - 3, 100 - 6 - 10 - 4));
        assert_eq!((r.bounds.x, r.bounds.y), (10 + 152, 20 + 80));
    }

    #[test]
    fn relative_size_rounds_against_margin_box() {
        let e = Element::default()
            .with_margin(Thickness::new(5, 0, 4, 0))
            .with_relative_width(Some(0.5))
            .with_relative_height(Some(2.0));
        let r = resolve(&e, parent(100, 50), vec2(0, 0), None);
        assert_eq!(r.bounds.width, 46);
        assert_eq!(r.bounds.height, 50);
        assert_eq!(e.relative_height(), Some(1.0));
    }

    #[test]
    fn content_box_excludes_padding() {
        let e = Element::sized(80, 30).with_padding(Thickness::uniform(4));
        let r = resolve(&e, parent(200, 100), vec2(0, 0), None);
        assert_eq!((r.content.x, r.content.y, r.content.width, r.content.height), (4, 4, 72, 22));
    }
}
