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
#![deny(missing_docs)]
//! `surface-ui` is a small retained-mode GUI engine that rasterizes a widget tree into a CPU-side
//! RGBA surface. The finished surface is handed once per frame to a caller-supplied uploader, so
//! the crate stays free of any graphics API.
//!
//! The moving parts, leaf first:
//! * [`PixelSurface`]: the RGBA8 pixel buffer with fill, line and blend primitives.
//! * [`BitmapFont`]: a baked single-channel glyph atlas plus per-glyph metrics.
//! * [`draw_text`]: pen-advancing glyph blitter.
//! * [`EventQueue`]: bounded, drop-oldest input queue shared with the window thread.
//! * [`WidgetTree`]: arena of [`Widget`]s with an adaptive anchor/margin layout solver.
//! * [`GuiService`]: frame lifecycle and the draw calls widgets issue.

mod error;
mod event;
mod font;
mod layout;
mod service;
mod skyline;
mod surface;
mod text;
mod tree;
mod widgets;

#[cfg(test)]
mod test_support;

pub use error::{GuiError, GuiResult};
pub use event::{EventQueue, GuiEvent, Key, MouseButton, MAX_QUEUE_CAPACITY};
pub use font::{BitmapFont, FontSource, Glyph, FIRST_BAKED_CHAR, LAST_BAKED_CHAR};
pub use layout::{Element, HorizontalAnchor, LayoutTable, ResolvedRect, Thickness, VerticalAnchor};
pub use rs_math3d::*;
pub use service::{GuiConfig, GuiService, SurfaceFrame, SurfaceUploader};
pub use skyline::SkylinePacker;
pub use surface::PixelSurface;
pub use text::{draw_text, draw_text_clipped};
pub use tree::{Node, Notification, WidgetId, WidgetTree, MAX_PENDING_NOTIFICATIONS};
pub use widgets::{Button, ButtonState, Label, Panel, TextBox, VisibleRange, Widget, WidgetEvent};

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    /// Opaque black.
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    /// Returns the color as an `[r, g, b, a]` byte quadruple.
    pub fn to_bytes(self) -> [u8; 4] { [self.r, self.g, self.b, self.a] }
}

#[derive(PartialEq, Copy, Clone, Debug)]
#[repr(u32)]
/// Identifiers for each of the built-in style colors.
pub enum ControlColor {
    /// Default text color.
    Text = 0,
    /// Outline/border color.
    Border = 1,
    /// Panel background color.
    PanelBG = 2,
    /// Idle button color.
    Button = 3,
    /// Button color while the pointer hovers it.
    ButtonHover = 4,
    /// Button color while it is held down.
    ButtonPressed = 5,
    /// Textbox background.
    Base = 6,
    /// Textbox background while focused.
    BaseFocus = 7,
    /// Placeholder text shown by empty textboxes.
    Placeholder = 8,
    /// Text cursor.
    Cursor = 9,
    /// Outline drawn around widgets flagged for debugging.
    Debug = 10,
    /// Number of color entries in [`Style::colors`].
    Max = 11,
}

#[derive(Copy, Clone, Debug)]
/// Collection of visual constants that drive widget appearance.
pub struct Style {
    /// Border thickness used by panels, buttons and textboxes.
    pub border_width: i32,
    /// Seconds between two cursor visibility toggles.
    pub cursor_blink_interval: f32,
    /// Distance in pixels kept between a scrolled cursor and the textbox edge.
    pub scroll_margin: f32,
    /// Palette of [`ControlColor`] entries.
    pub colors: [Color; ControlColor::Max as usize],
}

impl Style {
    /// Returns the palette entry for `id`.
    pub fn color(&self, id: ControlColor) -> Color { self.colors[id as usize] }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            border_width: 1,
            cursor_blink_interval: 0.5,
            scroll_margin: 10.0,
            colors: [
                Color { r: 230, g: 230, b: 230, a: 255 },
                Color { r: 25, g: 25, b: 25, a: 255 },
                Color { r: 50, g: 50, b: 50, a: 255 },
                Color { r: 75, g: 75, b: 75, a: 255 },
                Color { r: 95, g: 95, b: 95, a: 255 },
                Color { r: 115, g: 115, b: 115, a: 255 },
                Color { r: 30, g: 30, b: 30, a: 255 },
                Color { r: 40, g: 40, b: 40, a: 255 },
                Color { r: 130, g: 130, b: 130, a: 255 },
                Color { r: 240, g: 240, b: 240, a: 255 },
                Color { r: 255, g: 0, b: 255, a: 255 },
            ],
        }
    }
}

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Returns `true` when `(x, y)` lies inside `r`, treating the right and bottom edges as exclusive.
pub fn rect_contains(r: &Recti, x: i32, y: i32) -> bool { x >= r.x && y >= r.y && x < r.x + r.width && y < r.y + r.height }

/// Intersects two rectangles, returning an empty rectangle when they do not overlap.
pub fn intersect_rect(a: &Recti, b: &Recti) -> Recti {
    let x0 = a.x.max(b.x);
    let y0 = a.y.max(b.y);
    let x1 = a.x.saturating_add(a.width).min(b.x.saturating_add(b.width));
    let y1 = a.y.saturating_add(a.height).min(b.y.saturating_add(b.height));
    if x1 <= x0 || y1 <= y0 {
        return rect(x0, y0, 0, 0);
    }
    rect(x0, y0, x1 - x0, y1 - y0)
}
