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

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Visual state of a [`Button`], derived from hit-testing each pointer event.
pub enum ButtonState {
    /// Pointer elsewhere.
    #[default]
    Idle,
    /// Pointer over the button.
    Hovered,
    /// Left button went down inside and has not been released yet.
    Pressed,
}

/// Clickable text button.
///
/// A click is reported only when the left button goes down and comes back up inside the bounds;
/// dragging off before releasing cancels it. There is no pointer capture, so the release is
/// hit-tested like any other event.
pub struct Button {
    text: String,
    font: Rc<BitmapFont>,
    hovered: bool,
    pressed: bool,
    /// Text color; the style's text color when `None`.
    pub text_color: Option<Color>,
}

impl Button {
    /// Creates a button with a caption.
    pub fn new(font: Rc<BitmapFont>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font,
            hovered: false,
            pressed: false,
            text_color: None,
        }
    }

    /// Caption.
    pub fn text(&self) -> &str { &self.text }

    /// Replaces the caption.
    pub fn set_text(&mut self, text: impl Into<String>) { self.text = text.into(); }

    /// Font used for the caption.
    pub fn font(&self) -> &Rc<BitmapFont> { &self.font }

    /// Current visual state.
    pub fn state(&self) -> ButtonState {
        if self.pressed {
            ButtonState::Pressed
        } else if self.hovered {
            ButtonState::Hovered
        } else {
            ButtonState::Idle
        }
    }

    pub(crate) fn handle_event(&mut self, rect: &ResolvedRect, event: &GuiEvent, out: &mut Vec<WidgetEvent>) {
        match *event {
            GuiEvent::MouseMove { x, y } => self.hovered = rect.contains(x, y),
            GuiEvent::MouseDown { x, y, button } if button.is_left() => {
                if rect.contains(x, y) {
                    self.pressed = true;
                    self.hovered = true;
                }
            }
            GuiEvent::MouseUp { x, y, button } if button.is_left() => {
                let inside = rect.contains(x, y);
                if self.pressed && inside {
                    out.push(WidgetEvent::Clicked);
                }
                self.pressed = false;
                self.hovered = inside;
            }
            _ => (),
        }
    }

    pub(crate) fn render(&self, gui: &mut GuiService, rect: &ResolvedRect) -> GuiResult<()> {
        let style = *gui.style();
        let fill = match self.state() {
            ButtonState::Idle => ControlColor::Button,
            ButtonState::Hovered => ControlColor::ButtonHover,
            ButtonState::Pressed => ControlColor::ButtonPressed,
        };
        gui.fill_rect(rect.bounds, style.color(fill))?;
        if style.border_width > 0 {
            gui.draw_box(rect.bounds, style.color(ControlColor::Border), style.border_width)?;
        }
        if self.text.is_empty() {
            return Ok(());
        }

        let size = self.font.measure_text(&self.text);
        let content = rect.content;
        let x = content.x as f32 + (content.width as f32 - size.x) * 0.5;
        let y = content.y as f32 + (content.height as f32 - size.y) * 0.5;
        gui.push_clip_rect(content)?;
        let drawn = gui.draw_text(&self.font, &self.text, x.floor(), y.floor(), self.text_color.unwrap_or(style.color(ControlColor::Text)));
        gui.pop_clip_rect()?;
        drawn
    }
}
