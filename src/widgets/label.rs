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

/// Static text. With `auto_size` set the label takes its measured text size (rounded up) and
/// ignores the element's explicit width and height.
pub struct Label {
    text: String,
    font: Rc<BitmapFont>,
    /// Text color; the style's text color when `None`.
    pub color: Option<Color>,
    /// Size the label to its text.
    pub auto_size: bool,
}

impl Label {
    /// Auto-sized label.
    pub fn new(font: Rc<BitmapFont>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font,
            color: None,
            auto_size: true,
        }
    }

    /// Sets the text color.
    pub fn with_color(mut self, clr: Color) -> Self {
        self.color = Some(clr);
        self
    }

    /// Text.
    pub fn text(&self) -> &str { &self.text }

    /// Replaces the text; an auto-sized label picks up the new size on the next layout.
    pub fn set_text(&mut self, text: impl Into<String>) { self.text = text.into(); }

    /// Font used for the text.
    pub fn font(&self) -> &Rc<BitmapFont> { &self.font }

    pub(crate) fn intrinsic_size(&self) -> Option<Dimensioni> {
        if !self.auto_size {
            return None;
        }
        let size = self.font.measure_text(&self.text);
        Some(Dimensioni::new(size.x.ceil() as i32, size.y.ceil() as i32))
    }

    pub(crate) fn render(&self, gui: &mut GuiService, rect: &ResolvedRect) -> GuiResult<()> {
        if self.text.is_empty() {
            return Ok(());
        }
        let clr = self.color.unwrap_or(gui.style().color(ControlColor::Text));
        gui.push_clip_rect(rect.bounds)?;
        let drawn = gui.draw_text(&self.font, &self.text, rect.content.x as f32, rect.content.y as f32, clr);
        gui.pop_clip_rect()?;
        drawn
    }
}
