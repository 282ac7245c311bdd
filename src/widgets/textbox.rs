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

use super::text_edit::*;
use crate::*;

/// Single-line text editor with a blinking cursor and horizontal scrolling.
///
/// The cursor is a byte offset into [`TextBox::text`] that always sits on a char boundary and
/// within `0..=text.len()`. The scroll offset is kept in `[0, max(0, text_width - visible_width)]`
/// and moves only as far as needed to keep the cursor `Style::scroll_margin` pixels inside the
/// visible window. Only the visible slice of the text is rasterized.
pub struct TextBox {
    text: String,
    font: Rc<BitmapFont>,
    placeholder: String,
    max_length: usize,
    cursor: usize,
    scroll_offset: f32,
    focused: bool,
    cursor_visible: bool,
    blink_elapsed: f32,
    visible_width: f32,
    scroll_margin: f32,
    /// Text color; the style's text color when `None`.
    pub text_color: Option<Color>,
}

impl TextBox {
    /// Empty, unfocused text box without a length limit.
    pub fn new(font: Rc<BitmapFont>) -> Self {
        Self {
            text: String::new(),
            font,
            placeholder: String::new(),
            max_length: 0,
            cursor: 0,
            scroll_offset: 0.0,
            focused: false,
            cursor_visible: true,
            blink_elapsed: 0.0,
            visible_width: 0.0,
            scroll_margin: Style::default().scroll_margin,
            text_color: None,
        }
    }

    /// Sets the initial text (cursor at the end).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self.cursor = self.text.len();
        self
    }

    /// Sets the placeholder shown while the text is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the length limit in chars (0 means unlimited).
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.set_max_length(max_length);
        self
    }

    /// Current text.
    pub fn text(&self) -> &str { &self.text }

    /// Replaces the text, silently truncating it to `max_length` chars.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        truncate_chars(&mut self.text, self.max_length);
        self.cursor = clamp_cursor(&self.text, self.cursor);
        self.update_scroll_offset();
    }

    /// Placeholder text.
    pub fn placeholder(&self) -> &str { &self.placeholder }

    /// Replaces the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) { self.placeholder = placeholder.into(); }

    /// Length limit in chars, 0 when unlimited.
    pub fn max_length(&self) -> usize { self.max_length }

    /// Changes the length limit, truncating the current text if it is longer.
    pub fn set_max_length(&mut self, max_length: usize) {
        self.max_length = max_length;
        let text = std::mem::take(&mut self.text);
        self.set_text(text);
    }

    /// Font used for the text.
    pub fn font(&self) -> &Rc<BitmapFont> { &self.font }

    /// Cursor position as a byte offset into the text.
    pub fn cursor(&self) -> usize { self.cursor }

    /// Moves the cursor, clamping it into the text.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = clamp_cursor(&self.text, cursor);
        self.update_scroll_offset();
        self.reset_blink();
    }

    /// Horizontal scroll in pixels.
    pub fn scroll_offset(&self) -> f32 { self.scroll_offset }

    /// Width of the content box as of the last event or render.
    pub fn visible_width(&self) -> f32 { self.visible_width }

    /// Returns `true` while the box has keyboard focus.
    pub fn has_focus(&self) -> bool { self.focused }

    /// Gives or takes keyboard focus without a click.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        self.reset_blink();
    }

    /// Returns `true` while the blinking cursor is in its visible phase.
    pub fn cursor_visible(&self) -> bool { self.cursor_visible }

    /// Cursor x relative to the left edge of the content box.
    pub fn cursor_x(&self) -> f32 { self.font.text_width(&self.text[..self.cursor]) - self.scroll_offset }

    /// The slice of the displayed string (text, or placeholder when the text is empty) that
    /// falls inside the visible window.
    pub fn visible_range(&self) -> VisibleRange {
        let (shown, scroll) = self.shown();
        visible_range(shown, &self.font, scroll, self.visible_width)
    }

    /// The substring that the next render draws.
    pub fn visible_text(&self) -> &str {
        let range = self.visible_range();
        &self.shown().0[range.start..range.end]
    }

    fn shown(&self) -> (&str, f32) {
        if self.text.is_empty() {
            (&self.placeholder, 0.0)
        } else {
            (&self.text, self.scroll_offset)
        }
    }

    /// Recomputes the scroll offset so the cursor stays inside the visible window.
    pub fn update_scroll_offset(&mut self) {
        let text_width = self.font.text_width(&self.text);
        if self.visible_width <= 0.0 || text_width <= self.visible_width {
            self.scroll_offset = 0.0;
            return;
        }
        let cursor_x = self.font.text_width(&self.text[..self.cursor]);
        let mut offset = self.scroll_offset;
        if cursor_x < offset {
            offset = (cursor_x - self.scroll_margin).max(0.0);
        } else if cursor_x > offset + self.visible_width {
            offset = cursor_x - self.visible_width + self.scroll_margin;
        }
        self.scroll_offset = offset.clamp(0.0, text_width - self.visible_width);
    }

    fn reset_blink(&mut self) {
        self.cursor_visible = true;
        self.blink_elapsed = 0.0;
    }

    fn sync_geometry(&mut self, rect: &ResolvedRect, style: &Style) {
        let width = rect.content.width as f32;
        if width != self.visible_width || style.scroll_margin != self.scroll_margin {
            self.visible_width = width;
            self.scroll_margin = style.scroll_margin;
            self.update_scroll_offset();
        }
    }

    pub(crate) fn handle_event(&mut self, rect: &ResolvedRect, event: &GuiEvent, style: &Style, out: &mut Vec<WidgetEvent>) {
        self.sync_geometry(rect, style);
        match *event {
            GuiEvent::MouseDown { x, y, button } if button.is_left() => {
                if rect.contains(x, y) {
                    if !self.focused {
                        self.focused = true;
                        out.push(WidgetEvent::FocusGained);
                    }
                    let local_x = (x - rect.content.x) as f32 + self.scroll_offset;
                    self.cursor = cursor_from_x(&self.text, &self.font, local_x);
                    self.update_scroll_offset();
                    self.reset_blink();
                } else if self.focused {
                    self.focused = false;
                    out.push(WidgetEvent::FocusLost);
                }
            }
            GuiEvent::KeyDown(key) if self.focused => self.handle_key(key, out),
            GuiEvent::TextInput(ch) if self.focused => self.handle_text_input(ch, out),
            _ => (),
        }
    }

    fn handle_key(&mut self, key: Key, out: &mut Vec<WidgetEvent>) {
        let mut changed = false;
        match key {
            Key::Backspace => changed = delete_prev(&mut self.text, &mut self.cursor),
            Key::Delete => changed = delete_next(&mut self.text, self.cursor),
            Key::Left => self.cursor = move_left(&self.text, self.cursor),
            Key::Right => self.cursor = move_right(&self.text, self.cursor),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.text.len(),
            Key::Enter => {
                out.push(WidgetEvent::EnterPressed);
                return;
            }
            _ => return,
        }
        self.update_scroll_offset();
        self.reset_blink();
        if changed {
            out.push(WidgetEvent::TextChanged);
        }
    }

    fn handle_text_input(&mut self, ch: char, out: &mut Vec<WidgetEvent>) {
        if ch.is_control() && ch != '\n' && ch != '\t' {
            return;
        }
        if self.max_length > 0 && self.text.chars().count() >= self.max_length {
            return;
        }
        insert_char(&mut self.text, &mut self.cursor, ch);
        self.update_scroll_offset();
        self.reset_blink();
        out.push(WidgetEvent::TextChanged);
    }

    fn advance_blink(&mut self, dt: f32, interval: f32) {
        if !self.focused || interval <= 0.0 {
            self.cursor_visible = true;
            return;
        }
        self.blink_elapsed += dt.max(0.0);
        while self.blink_elapsed >= interval {
            self.blink_elapsed -= interval;
            self.cursor_visible = !self.cursor_visible;
        }
    }

    pub(crate) fn render(&mut self, gui: &mut GuiService, rect: &ResolvedRect, dt: f32) -> GuiResult<()> {
        let style = *gui.style();
        self.sync_geometry(rect, &style);
        self.advance_blink(dt, style.cursor_blink_interval);

        let base = if self.focused { ControlColor::BaseFocus } else { ControlColor::Base };
        gui.fill_rect(rect.bounds, style.color(base))?;
        if style.border_width > 0 {
            gui.draw_box(rect.bounds, style.color(ControlColor::Border), style.border_width)?;
        }

        let content = rect.content;
        let line_height = self.font.line_height();
        let y = content.y + (content.height - line_height) / 2;
        let clr = if self.text.is_empty() {
            style.color(ControlColor::Placeholder)
        } else {
            self.text_color.unwrap_or(style.color(ControlColor::Text))
        };
        let range = self.visible_range();

        gui.push_clip_rect(content)?;
        let mut drawn = gui.draw_text(&self.font, &self.shown().0[range.start..range.end], content.x as f32 + range.offset, y as f32, clr);
        if drawn.is_ok() && self.focused && self.cursor_visible {
            // the end-of-text cursor sits one past the last glyph; keep it inside the box
            let x = (content.x + self.cursor_x().round() as i32).min(content.x + content.width - 1).max(content.x);
            drawn = gui.draw_vline(x, y, line_height, 1, style.color(ControlColor::Cursor));
        }
        gui.pop_clip_rect()?;
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // 80px wide box with 4px padding: 72px of visible text
    fn box_rect() -> ResolvedRect {
        ResolvedRect {
            local: vec2(0, 0),
            bounds: rect(0, 0, 80, 20),
            content: rect(4, 4, 72, 12),
        }
    }

    fn send(t: &mut TextBox, event: GuiEvent) -> Vec<WidgetEvent> {
        let mut out = Vec::new();
        t.handle_event(&box_rect(), &event, &Style::default(), &mut out);
        out
    }

    fn focused_box() -> TextBox {
        let mut t = TextBox::new(shared_font());
        send(&mut t, GuiEvent::MouseDown { x: 10, y: 10, button: MouseButton::LEFT });
        t
    }

    fn type_str(t: &mut TextBox, s: &str) {
        for ch in s.chars() {
            send(t, GuiEvent::TextInput(ch));
        }
    }

    #[test]
    fn click_toggles_focus() {
        let mut t = TextBox::new(shared_font());
        assert_eq!(send(&mut t, GuiEvent::MouseDown { x: 10, y: 10, button: MouseButton::LEFT }), vec![WidgetEvent::FocusGained]);
        assert!(t.has_focus());
        assert!(send(&mut t, GuiEvent::MouseDown { x: 12, y: 10, button: MouseButton::LEFT }).is_empty());
        assert_eq!(send(&mut t, GuiEvent::MouseDown { x: 100, y: 10, button: MouseButton::LEFT }), vec![WidgetEvent::FocusLost]);
        assert!(!t.has_focus());
    }

    #[test]
    fn unfocused_box_ignores_typing() {
        let mut t = TextBox::new(shared_font());
        assert!(send(&mut t, GuiEvent::TextInput('a')).is_empty());
        assert_eq!(t.text(), "");
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut t = focused_box();
        type_str(&mut t, "ac");
        send(&mut t, GuiEvent::KeyDown(Key::Left));
        assert_eq!(send(&mut t, GuiEvent::TextInput('b')), vec![WidgetEvent::TextChanged]);
        assert_eq!(t.text(), "abc");
        assert_eq!(t.cursor(), 2);
    }

    #[test]
    fn control_chars_are_rejected_except_newline_and_tab() {
        let mut t = focused_box();
        type_str(&mut t, "a\u{7}\tb");
        assert_eq!(t.text(), "a\tb");
    }

    #[test]
    fn left_and_backspace_stop_at_start() {
        let mut t = focused_box();
        type_str(&mut t, "ab");
        for _ in 0..5 {
            send(&mut t, GuiEvent::KeyDown(Key::Left));
        }
        assert_eq!(t.cursor(), 0);
        assert!(send(&mut t, GuiEvent::KeyDown(Key::Backspace)).is_empty());
        assert_eq!(t.text(), "ab");
    }

    #[test]
    fn home_end_delete_and_enter() {
        let mut t = focused_box();
        type_str(&mut t, "abc");
        send(&mut t, GuiEvent::KeyDown(Key::Home));
        assert_eq!(t.cursor(), 0);
        assert_eq!(send(&mut t, GuiEvent::KeyDown(Key::Delete)), vec![WidgetEvent::TextChanged]);
        assert_eq!(t.text(), "bc");
        send(&mut t, GuiEvent::KeyDown(Key::End));
        assert_eq!(t.cursor(), 2);
        assert!(send(&mut t, GuiEvent::KeyDown(Key::Delete)).is_empty());
        assert_eq!(send(&mut t, GuiEvent::KeyDown(Key::Enter)), vec![WidgetEvent::EnterPressed]);
        assert_eq!(t.text(), "bc");
    }

    #[test]
    fn random_navigation_keeps_cursor_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let keys = [Key::Left, Key::Right, Key::Home, Key::End, Key::Backspace, Key::Delete];
        let mut t = focused_box();
        type_str(&mut t, "hello world");
        for _ in 0..500 {
            if rng.random_range(0..4) == 0 {
                send(&mut t, GuiEvent::TextInput('x'));
            } else {
                send(&mut t, GuiEvent::KeyDown(keys[rng.random_range(0..keys.len())]));
            }
            assert!(t.cursor() <= t.text().len());
            let max_scroll = (t.font().text_width(t.text()) - t.visible_width()).max(0.0);
            assert!(t.scroll_offset() >= 0.0 && t.scroll_offset() <= max_scroll);
        }
    }

    #[test]
    fn max_length_blocks_input_and_truncates() {
        let mut t = focused_box().with_max_length(3);
        type_str(&mut t, "abcdef");
        assert_eq!(t.text(), "abc");
        t.set_text("wxyz");
        assert_eq!(t.text(), "wxy");
        t.set_max_length(2);
        assert_eq!(t.text(), "wx");
        assert_eq!(t.cursor(), 2);
    }

    #[test]
    fn set_cursor_clamps() {
        let mut t = TextBox::new(shared_font()).with_text("abc");
        t.set_cursor(99);
        assert_eq!(t.cursor(), 3);
        t.set_text("a");
        assert_eq!(t.cursor(), 1);
    }

    #[test]
    fn scroll_reaches_text_width_minus_visible_width() {
        let mut t = focused_box();
        type_str(&mut t, &"A".repeat(20));
        send(&mut t, GuiEvent::KeyDown(Key::Home));
        assert_eq!(t.scroll_offset(), 0.0);
        for _ in 0..20 {
            send(&mut t, GuiEvent::KeyDown(Key::Right));
        }
        assert_eq!(t.scroll_offset(), 20.0 * GLYPH_ADVANCE - 72.0);
        assert!((t.cursor_x() - 72.0).abs() < 1e-3);
    }

    #[test]
    fn short_text_never_scrolls() {
        let mut t = focused_box();
        type_str(&mut t, "AAAA");
        assert_eq!(t.scroll_offset(), 0.0);
        assert_eq!(t.visible_text(), "AAAA");
    }

    #[test]
    fn scrolling_left_keeps_margin() {
        let mut t = focused_box();
        type_str(&mut t, &"A".repeat(30));
        for _ in 0..12 {
            send(&mut t, GuiEvent::KeyDown(Key::Left));
        }
        // the window only moves once the cursor leaves it, then keeps it 10px inside
        assert_eq!(t.scroll_offset(), 144.0 - 10.0);
    }

    #[test]
    fn visible_slice_fits_window() {
        let mut rng = StdRng::seed_from_u64(11);
        let font = shared_font();
        let mut t = focused_box();
        type_str(&mut t, &"A".repeat(64));
        for _ in 0..200 {
            t.set_cursor(rng.random_range(0..=64));
            let width = font.text_width(t.visible_text());
            assert!(width <= 72.0 + font.max_advance());
        }
    }

    #[test]
    fn sixty_four_chars_render_a_clipped_slice() {
        let mut gui = GuiService::with_size(100, 30, GuiConfig::default()).unwrap();
        let mut t = focused_box();
        type_str(&mut t, &"A".repeat(64));
        gui.begin_frame().unwrap();
        t.render(&mut gui, &box_rect(), 0.0).unwrap();
        let drawn = t.visible_text();
        assert!(drawn.chars().count() < 64);
        assert_ne!(drawn, "A".repeat(64));
        // last glyph ends at x = 75, the content box at 76; the cursor takes the last column
        let base = gui.style().color(ControlColor::BaseFocus);
        assert_eq!(gui.surface().pixel(74, 8), Some(gui.style().color(ControlColor::Text)));
        assert_eq!(gui.surface().pixel(75, 8), Some(gui.style().color(ControlColor::Cursor)));
        assert_ne!(gui.surface().pixel(81, 8), Some(base));
        assert_eq!(gui.surface().pixel(76, 8), Some(base));
    }

    #[test]
    fn cursor_visible_at_end_of_overflowing_text() {
        let mut gui = GuiService::with_size(100, 30, GuiConfig::default()).unwrap();
        let mut t = focused_box();
        type_str(&mut t, &"A".repeat(64));
        assert_eq!(t.cursor_x(), 72.0);
        gui.begin_frame().unwrap();
        t.render(&mut gui, &box_rect(), 0.0).unwrap();
        let cursor = Some(gui.style().color(ControlColor::Cursor));
        let content = box_rect().content;
        let columns: Vec<i32> = (content.x..content.x + content.width).filter(|&x| gui.surface().pixel(x, 8) == cursor).collect();
        assert_eq!(columns, vec![content.x + content.width - 1]);
    }

    #[test]
    fn placeholder_shows_only_when_empty() {
        let mut t = focused_box();
        t.set_placeholder("Name");
        assert_eq!(t.visible_text(), "Name");
        type_str(&mut t, "A");
        assert_eq!(t.visible_text(), "A");
    }

    #[test]
    fn click_places_cursor_at_nearest_edge() {
        let mut t = TextBox::new(shared_font()).with_text("ABCD");
        // content starts at x = 4; 13px in is past the middle of 'B'
        send(&mut t, GuiEvent::MouseDown { x: 4 + 13, y: 10, button: MouseButton::LEFT });
        assert_eq!(t.cursor(), 2);
        send(&mut t, GuiEvent::MouseDown { x: 4 + 11, y: 10, button: MouseButton::LEFT });
        assert_eq!(t.cursor(), 1);
    }

    #[test]
    fn cursor_blinks_on_accumulated_time() {
        let mut t = focused_box();
        t.advance_blink(0.3, 0.5);
        assert!(t.cursor_visible());
        t.advance_blink(0.3, 0.5);
        assert!(!t.cursor_visible());
        t.advance_blink(0.5, 0.5);
        assert!(t.cursor_visible());
        send(&mut t, GuiEvent::KeyDown(Key::Left));
        t.advance_blink(0.4, 0.5);
        assert!(t.cursor_visible());
    }
}
