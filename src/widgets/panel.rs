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

#[derive(Copy, Clone, Debug)]
/// Rectangle with a background fill and an optional border; the usual container for children.
pub struct Panel {
    /// Fill color; the style's panel color when `None`.
    pub background: Option<Color>,
    /// Border color; the style's border color when `None`.
    pub border: Option<Color>,
    /// Border thickness in pixels, 0 for none; the style's border width when `None`.
    pub border_thickness: Option<i32>,
}

impl Panel {
    /// Panel drawn with the style's colors and border width.
    pub fn new() -> Self {
        Self {
            background: None,
            border: None,
            border_thickness: None,
        }
    }

    /// Overrides the background color.
    pub fn with_background(mut self, clr: Color) -> Self {
        self.background = Some(clr);
        self
    }

    /// Overrides the border color and thickness.
    pub fn with_border(mut self, clr: Color, thickness: i32) -> Self {
        self.border = Some(clr);
        self.border_thickness = Some(thickness);
        self
    }

    pub(crate) fn render(&self, gui: &mut GuiService, rect: &ResolvedRect) -> GuiResult<()> {
        let style = *gui.style();
        gui.fill_rect(rect.bounds, self.background.unwrap_or(style.color(ControlColor::PanelBG)))?;
        let thickness = self.border_thickness.unwrap_or(style.border_width);
        if thickness > 0 {
            gui.draw_box(rect.bounds, self.border.unwrap_or(style.color(ControlColor::Border)), thickness)?;
        }
        Ok(())
    }
}

impl Default for Panel {
    fn default() -> Self { Self::new() }
}
