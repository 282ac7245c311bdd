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
macro_rules! implement_widget_kind {
    ($variant:ident, $ty:ty, $as_ref:ident, $as_mut:ident) => {
        impl From<$ty> for Widget {
            fn from(w: $ty) -> Self { Widget::$variant(w) }
        }

        impl Widget {
            #[doc = concat!("Borrows the inner [`", stringify!($ty), "`], if this is one.")]
            pub fn $as_ref(&self) -> Option<&$ty> {
                match self {
                    Widget::$variant(w) => Some(w),
                    _ => None,
                }
            }

            #[doc = concat!("Mutably borrows the inner [`", stringify!($ty), "`], if this is one.")]
            pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                match self {
                    Widget::$variant(w) => Some(w),
                    _ => None,
                }
            }
        }
    };
}

mod button;
mod label;
mod panel;
mod text_edit;
mod textbox;

pub use button::{Button, ButtonState};
pub use label::Label;
pub use panel::Panel;
pub use text_edit::VisibleRange;
pub use textbox::TextBox;

use crate::{Dimensioni, Element, GuiEvent, GuiResult, GuiService, ResolvedRect, Style};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Notification a widget raises while handling input.
pub enum WidgetEvent {
    /// A button was pressed and released inside its bounds.
    Clicked,
    /// Enter was pressed in a focused text box.
    EnterPressed,
    /// A text box's contents changed through user input.
    TextChanged,
    /// A text box took keyboard focus.
    FocusGained,
    /// A text box lost keyboard focus.
    FocusLost,
}

/// The closed set of widget kinds a [`crate::WidgetTree`] holds.
pub enum Widget {
    /// Background and border container.
    Panel(Panel),
    /// Clickable button.
    Button(Button),
    /// Static text.
    Label(Label),
    /// Single-line text editor.
    TextBox(TextBox),
}

implement_widget_kind!(Panel, Panel, as_panel, as_panel_mut);
implement_widget_kind!(Button, Button, as_button, as_button_mut);
implement_widget_kind!(Label, Label, as_label, as_label_mut);
implement_widget_kind!(TextBox, TextBox, as_text_box, as_text_box_mut);

impl Widget {
    /// Short name of the widget kind, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Widget::Panel(_) => "panel",
            Widget::Button(_) => "button",
            Widget::Label(_) => "label",
            Widget::TextBox(_) => "textbox",
        }
    }

    /// Content-derived size that replaces the element's explicit size, if any.
    pub(crate) fn intrinsic_size(&self, _element: &Element) -> Option<Dimensioni> {
        match self {
            Widget::Label(l) => l.intrinsic_size(),
            _ => None,
        }
    }

    /// Lets the widget react to `event`. Every visible widget sees every event and hit-tests
    /// against `rect` itself.
    pub(crate) fn handle_event(&mut self, rect: &ResolvedRect, event: &GuiEvent, style: &Style, out: &mut Vec<WidgetEvent>) {
        match self {
            Widget::Panel(_) | Widget::Label(_) => (),
            Widget::Button(b) => b.handle_event(rect, event, out),
            Widget::TextBox(t) => t.handle_event(rect, event, style, out),
        }
    }

    pub(crate) fn render(&mut self, gui: &mut GuiService, rect: &ResolvedRect, dt: f32) -> GuiResult<()> {
        match self {
            Widget::Panel(p) => p.render(gui, rect),
            Widget::Button(b) => b.render(gui, rect),
            Widget::Label(l) => l.render(gui, rect),
            Widget::TextBox(t) => t.render(gui, rect, dt),
        }
    }
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Widget::Panel(p) => f.debug_tuple("Panel").field(p).finish(),
            Widget::Button(b) => f.debug_tuple("Button").field(&b.text()).field(&b.state()).finish(),
            Widget::Label(l) => f.debug_tuple("Label").field(&l.text()).finish(),
            Widget::TextBox(t) => f.debug_tuple("TextBox").field(&t.text()).field(&t.cursor()).finish(),
        }
    }
}
