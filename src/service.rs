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
use std::sync::Arc;

use crate::*;

#[derive(Copy, Clone, Debug)]
/// Settings a [`GuiService`] is created with.
pub struct GuiConfig {
    /// Capacity of the input queue.
    pub queue_capacity: usize,
    /// Color the surface is cleared to at the start of [`GuiService::run_frame`]; `None` keeps
    /// the previous frame's pixels.
    pub clear_color: Option<Color>,
    /// Palette and metrics handed to the widgets.
    pub style: Style,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            clear_color: Some(Color::TRANSPARENT),
            style: Style::default(),
        }
    }
}

/// The finished frame as handed to a [`SurfaceUploader`].
#[derive(Copy, Clone, Debug)]
pub struct SurfaceFrame<'a> {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Tightly packed RGBA8 rows, top row first.
    pub pixels: &'a [u8],
    /// Whether any pixel changed since the previous upload.
    pub dirty: bool,
}

/// Receiver of the finished surface, typically a GPU texture upload.
pub trait SurfaceUploader {
    /// Called from [`GuiService::end_frame`] when the frame issued at least one draw call.
    fn upload(&mut self, frame: &SurfaceFrame<'_>);
}

impl<F: FnMut(&SurfaceFrame<'_>)> SurfaceUploader for F {
    fn upload(&mut self, frame: &SurfaceFrame<'_>) { self(frame) }
}

/// Owns the pixel surface and the input queue, and brackets drawing into frames.
///
/// Draw calls are only accepted between [`begin_frame`] and [`end_frame`]; anything else is an
/// [`GuiError::InvalidOperation`]. Draw calls are clipped to the innermost rectangle pushed with
/// [`push_clip_rect`] (the whole surface when none is pushed).
///
/// [`begin_frame`]: GuiService::begin_frame
/// [`end_frame`]: GuiService::end_frame
/// [`push_clip_rect`]: GuiService::push_clip_rect
pub struct GuiService {
    surface: PixelSurface,
    queue: Arc<EventQueue>,
    config: GuiConfig,
    in_frame: bool,
    drew: bool,
    clip_stack: Vec<Recti>,
    event_buffer: Vec<GuiEvent>,
    frame_count: u64,
}

impl GuiService {
    /// Service with an uninitialized surface; call [`GuiService::resize`] before the first frame.
    pub fn new(config: GuiConfig) -> Self {
        Self {
            surface: PixelSurface::new(),
            queue: Arc::new(EventQueue::new(config.queue_capacity)),
            config,
            in_frame: false,
            drew: false,
            clip_stack: Vec::new(),
            event_buffer: Vec::new(),
            frame_count: 0,
        }
    }

    /// Service with a surface of the given size.
    pub fn with_size(width: i32, height: i32, config: GuiConfig) -> GuiResult<Self> {
        let mut gui = Self::new(config);
        gui.resize(width, height)?;
        Ok(gui)
    }

    /// Resizes the surface. Not allowed while a frame is open.
    pub fn resize(&mut self, width: i32, height: i32) -> GuiResult<()> {
        if self.in_frame {
            log::debug!("resize to {}x{} rejected inside a frame", width, height);
            return Err(GuiError::InvalidOperation("resize called inside a frame"));
        }
        self.surface.resize(width, height)
    }

    /// Surface size; the root widget lays out against it.
    pub fn viewport(&self) -> Dimensioni { self.surface.dimension() }

    /// The pixel surface.
    pub fn surface(&self) -> &PixelSurface { &self.surface }

    /// Handle the window thread pushes input through.
    pub fn event_queue(&self) -> Arc<EventQueue> { self.queue.clone() }

    /// Active style.
    pub fn style(&self) -> &Style { &self.config.style }

    /// Mutable style; changes apply from the next draw call.
    pub fn style_mut(&mut self) -> &mut Style { &mut self.config.style }

    /// Settings the service was created with.
    pub fn config(&self) -> &GuiConfig { &self.config }

    /// Returns `true` between [`GuiService::begin_frame`] and [`GuiService::end_frame`].
    pub fn in_frame(&self) -> bool { self.in_frame }

    /// Number of frames ended so far.
    pub fn frame_count(&self) -> u64 { self.frame_count }

    /// Opens a frame.
    pub fn begin_frame(&mut self) -> GuiResult<()> {
        if self.in_frame {
            log::debug!("begin_frame called twice");
            return Err(GuiError::InvalidOperation("begin_frame called twice"));
        }
        if !self.surface.is_initialized() {
            return Err(GuiError::SurfaceNotInitialized);
        }
        self.in_frame = true;
        self.drew = false;
        self.clip_stack.clear();
        Ok(())
    }

    /// Closes the frame and hands the surface to `uploader` if anything was drawn. Returns
    /// whether an upload happened.
    pub fn end_frame<U: SurfaceUploader + ?Sized>(&mut self, uploader: &mut U) -> GuiResult<bool> {
        if !self.in_frame {
            log::debug!("end_frame called without begin_frame");
            return Err(GuiError::InvalidOperation("end_frame called without begin_frame"));
        }
        self.in_frame = false;
        self.frame_count += 1;
        if !self.clip_stack.is_empty() {
            log::debug!("{} clip rects still pushed at end of frame", self.clip_stack.len());
            self.clip_stack.clear();
        }
        if !self.drew {
            return Ok(false);
        }
        let frame = SurfaceFrame {
            width: self.surface.width(),
            height: self.surface.height(),
            pixels: self.surface.pixels(),
            dirty: self.surface.is_dirty(),
        };
        log::trace!("uploading frame {} ({}x{}, dirty: {})", self.frame_count, frame.width, frame.height, frame.dirty);
        uploader.upload(&frame);
        self.surface.take_dirty();
        Ok(true)
    }

    fn frame_check(&self) -> GuiResult<Recti> {
        if !self.in_frame {
            log::debug!("draw call outside of a frame");
            return Err(GuiError::InvalidOperation("draw call outside begin_frame/end_frame"));
        }
        Ok(self.current_clip())
    }

    // Only calls that may write pixels mark the frame for upload.
    fn draw_call(&mut self) -> GuiResult<Recti> {
        let clip = self.frame_check()?;
        self.drew = true;
        Ok(clip)
    }

    /// Innermost clip rectangle.
    pub fn current_clip(&self) -> Recti { self.clip_stack.last().copied().unwrap_or_else(|| self.surface.bounds()) }

    /// Pushes `r` intersected with the current clip.
    pub fn push_clip_rect(&mut self, r: Recti) -> GuiResult<()> {
        let clip = self.frame_check()?;
        self.clip_stack.push(intersect_rect(&r, &clip));
        Ok(())
    }

    /// Pops the innermost clip rectangle.
    pub fn pop_clip_rect(&mut self) -> GuiResult<()> {
        self.frame_check()?;
        match self.clip_stack.pop() {
            Some(_) => Ok(()),
            None => Err(GuiError::InvalidOperation("pop_clip_rect without matching push")),
        }
    }

    /// Fills the whole surface, ignoring the clip stack.
    pub fn clear(&mut self, clr: Color) -> GuiResult<()> {
        self.draw_call()?;
        self.surface.clear(clr)
    }

    /// Fills `r`.
    pub fn fill_rect(&mut self, r: Recti, clr: Color) -> GuiResult<()> {
        let clip = self.draw_call()?;
        self.surface.fill_rect(intersect_rect(&r, &clip), clr)
    }

    /// Outlines `r` with lines `thickness` pixels wide, drawn inside the rectangle.
    pub fn draw_box(&mut self, r: Recti, clr: Color, thickness: i32) -> GuiResult<()> {
        if thickness <= 0 || r.width <= 0 || r.height <= 0 {
            return self.frame_check().map(|_| ());
        }
        let t = thickness.min(r.width).min(r.height);
        self.fill_rect(rect(r.x, r.y, r.width, t), clr)?;
        self.fill_rect(rect(r.x, r.y.saturating_add(r.height) - t, r.width, t), clr)?;
        self.fill_rect(rect(r.x, r.y + t, t, r.height - t - t), clr)?;
        self.fill_rect(rect(r.x.saturating_add(r.width) - t, r.y + t, t, r.height - t - t), clr)
    }

    /// Horizontal line starting at `(x, y)`.
    pub fn draw_hline(&mut self, x: i32, y: i32, length: i32, thickness: i32, clr: Color) -> GuiResult<()> { self.fill_rect(rect(x, y, length, thickness), clr) }

    /// Vertical line starting at `(x, y)`.
    pub fn draw_vline(&mut self, x: i32, y: i32, length: i32, thickness: i32, clr: Color) -> GuiResult<()> { self.fill_rect(rect(x, y, thickness, length), clr) }

    /// Draws `text` with its top-left corner at `(x, y)`.
    pub fn draw_text(&mut self, font: &BitmapFont, text: &str, x: f32, y: f32, clr: Color) -> GuiResult<()> {
        let clip = self.draw_call()?;
        draw_text_clipped(&mut self.surface, font, text, x, y, clr, Some(clip))
    }

    /// Runs one full frame for `tree`: drains the input queue, lays out, dispatches the events,
    /// lays out again so the frame reflects their effects, then renders and ends the frame.
    /// Returns the layout the frame was rendered with.
    ///
    /// Widget notifications stay queued on `tree`; drain them with
    /// [`WidgetTree::drain_notifications`] after each call.
    pub fn run_frame<U: SurfaceUploader + ?Sized>(&mut self, tree: &mut WidgetTree, dt: f32, uploader: &mut U) -> GuiResult<LayoutTable> {
        self.begin_frame()?;
        let mut events = std::mem::take(&mut self.event_buffer);
        self.queue.drain_into(&mut events);

        let viewport = self.viewport();
        if !events.is_empty() {
            let layout = tree.layout(viewport);
            for event in &events {
                tree.dispatch(&layout, event, &self.config.style);
            }
        }
        self.event_buffer = events;

        let layout = tree.layout(viewport);
        let rendered = match self.config.clear_color {
            Some(clr) => self.clear(clr).and_then(|_| tree.render(self, &layout, dt)),
            None => tree.render(self, &layout, dt),
        };
        self.end_frame(uploader)?;
        rendered.map(|_| layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[derive(Default)]
    struct Recorder {
        uploads: Vec<(i32, i32, bool, Vec<u8>)>,
    }

    impl SurfaceUploader for Recorder {
        fn upload(&mut self, frame: &SurfaceFrame<'_>) { self.uploads.push((frame.width, frame.height, frame.dirty, frame.pixels.to_vec())); }
    }

    fn gui() -> GuiService { GuiService::with_size(32, 32, GuiConfig::default()).unwrap() }

    #[test]
    fn drawing_outside_a_frame_fails() {
        let mut gui = gui();
        assert!(matches!(gui.fill_rect(rect(0, 0, 4, 4), Color::WHITE), Err(GuiError::InvalidOperation(_))));
        gui.begin_frame().unwrap();
        gui.end_frame(&mut Recorder::default()).unwrap();
        assert!(matches!(gui.draw_text(&test_font(), "A", 0.0, 0.0, Color::WHITE), Err(GuiError::InvalidOperation(_))));
    }

    #[test]
    fn frame_protocol_errors() {
        let mut gui = gui();
        assert!(matches!(gui.end_frame(&mut Recorder::default()), Err(GuiError::InvalidOperation(_))));
        gui.begin_frame().unwrap();
        assert!(matches!(gui.begin_frame(), Err(GuiError::InvalidOperation(_))));
        assert!(matches!(gui.resize(8, 8), Err(GuiError::InvalidOperation(_))));
        assert!(matches!(gui.pop_clip_rect(), Err(GuiError::InvalidOperation(_))));
    }

    #[test]
    fn begin_frame_needs_a_surface() {
        let mut gui = GuiService::new(GuiConfig::default());
        assert!(matches!(gui.begin_frame(), Err(GuiError::SurfaceNotInitialized)));
        assert!(matches!(gui.resize(0, 10), Err(GuiError::InvalidSurfaceSize { .. })));
    }

    #[test]
    fn uploads_only_frames_with_draw_calls() {
        let mut gui = gui();
        let mut rec = Recorder::default();
        gui.begin_frame().unwrap();
        assert!(!gui.end_frame(&mut rec).unwrap());
        assert!(rec.uploads.is_empty());

        gui.begin_frame().unwrap();
        gui.fill_rect(rect(0, 0, 2, 2), Color::WHITE).unwrap();
        assert!(gui.end_frame(&mut rec).unwrap());
        assert_eq!(rec.uploads.len(), 1);
        assert_eq!((rec.uploads[0].0, rec.uploads[0].1, rec.uploads[0].2), (32, 32, true));
        assert_eq!(&rec.uploads[0].3[..4], &[255, 255, 255, 255]);
        assert!(!gui.surface().is_dirty());

        // same pixels again: a draw call happened, but nothing changed
        gui.begin_frame().unwrap();
        gui.fill_rect(rect(0, 0, 2, 2), Color::WHITE).unwrap();
        gui.end_frame(&mut rec).unwrap();
        assert!(!rec.uploads[1].2);
        assert_eq!(gui.frame_count(), 3);
    }

    #[test]
    fn clip_changes_alone_do_not_upload() {
        let mut gui = gui();
        let mut rec = Recorder::default();
        gui.begin_frame().unwrap();
        gui.push_clip_rect(rect(0, 0, 8, 8)).unwrap();
        gui.draw_box(rect(0, 0, 8, 8), Color::WHITE, 0).unwrap();
        gui.pop_clip_rect().unwrap();
        assert!(!gui.end_frame(&mut rec).unwrap());
        assert!(rec.uploads.is_empty());
        assert!(matches!(gui.push_clip_rect(rect(0, 0, 8, 8)), Err(GuiError::InvalidOperation(_))));
    }

    #[test]
    fn closures_are_uploaders() {
        let mut gui = gui();
        let mut seen = 0;
        gui.begin_frame().unwrap();
        gui.clear(Color::BLACK).unwrap();
        gui.end_frame(&mut |frame: &SurfaceFrame<'_>| seen = frame.pixels.len()).unwrap();
        assert_eq!(seen, 32 * 32 * 4);
    }

    #[test]
    fn clip_stack_nests() {
        let mut gui = gui();
        gui.begin_frame().unwrap();
        gui.push_clip_rect(rect(0, 0, 16, 16)).unwrap();
        gui.push_clip_rect(rect(8, 8, 16, 16)).unwrap();
        gui.fill_rect(rect(0, 0, 32, 32), Color::WHITE).unwrap();
        gui.pop_clip_rect().unwrap();
        gui.pop_clip_rect().unwrap();
        assert_eq!(gui.surface().pixel(8, 8), Some(Color::WHITE));
        assert_eq!(gui.surface().pixel(15, 15), Some(Color::WHITE));
        assert_eq!(gui.surface().pixel(16, 16), Some(Color::TRANSPARENT));
        assert_eq!(gui.surface().pixel(7, 7), Some(Color::TRANSPARENT));
        let b = gui.current_clip();
        assert_eq!((b.width, b.height), (32, 32));
    }

    #[test]
    fn draw_box_outlines_inside_the_rect() {
        let mut gui = gui();
        gui.begin_frame().unwrap();
        gui.draw_box(rect(4, 4, 10, 10), Color::WHITE, 2).unwrap();
        assert_eq!(gui.surface().pixel(4, 4), Some(Color::WHITE));
        assert_eq!(gui.surface().pixel(5, 9), Some(Color::WHITE));
        assert_eq!(gui.surface().pixel(12, 13), Some(Color::WHITE));
        assert_eq!(gui.surface().pixel(6, 6), Some(Color::TRANSPARENT));
        assert_eq!(gui.surface().pixel(14, 14), Some(Color::TRANSPARENT));
    }

    #[test]
    fn draw_box_with_huge_extent_saturates() {
        let mut gui = gui();
        gui.begin_frame().unwrap();
        gui.draw_box(rect(4, 4, i32::MAX, i32::MAX), Color::WHITE, 1).unwrap();
        assert_eq!(gui.surface().pixel(4, 20), Some(Color::WHITE));
        assert_eq!(gui.surface().pixel(20, 4), Some(Color::WHITE));
        assert_eq!(gui.surface().pixel(20, 20), Some(Color::TRANSPARENT));
        assert_eq!(gui.surface().pixel(3, 3), Some(Color::TRANSPARENT));
    }

    #[test]
    fn run_frame_dispatches_queued_input() {
        let mut gui = GuiService::with_size(200, 100, GuiConfig::default()).unwrap();
        let mut tree = WidgetTree::new(Element::default().with_anchors(HorizontalAnchor::Stretch, VerticalAnchor::Stretch), Panel::new());
        let root = tree.root();
        let tb = tree.add_to(root, Element::sized(80, 20).with_offset(10, 10).with_padding(Thickness::uniform(4)), TextBox::new(shared_font())).unwrap();
        let button = tree.add_to(root, Element::sized(40, 20).with_offset(10, 50), Button::new(shared_font(), "Go")).unwrap();

        let queue = gui.event_queue();
        queue.enqueue(GuiEvent::MouseDown { x: 20, y: 20, button: MouseButton::LEFT });
        for ch in "Hi".chars() {
            queue.enqueue(GuiEvent::TextInput(ch));
        }
        queue.enqueue(GuiEvent::KeyDown(Key::Enter));
        queue.enqueue(GuiEvent::MouseDown { x: 20, y: 55, button: MouseButton::LEFT });
        queue.enqueue(GuiEvent::MouseUp { x: 20, y: 55, button: MouseButton::LEFT });

        let mut rec = Recorder::default();
        let layout = gui.run_frame(&mut tree, 1.0 / 60.0, &mut rec).unwrap();
        assert!(queue.is_empty());
        assert_eq!(rec.uploads.len(), 1);
        assert_eq!(tree.global_position(&layout, button).map(|p| (p.x, p.y)), Some((10, 50)));

        let events: Vec<_> = tree.drain_notifications().into_iter().map(|n| (n.widget, n.event)).collect();
        assert_eq!(
            events,
            vec![
                (tb, WidgetEvent::FocusGained),
                (tb, WidgetEvent::TextChanged),
                (tb, WidgetEvent::TextChanged),
                (tb, WidgetEvent::EnterPressed),
                (tb, WidgetEvent::FocusLost),
                (button, WidgetEvent::Clicked),
            ]
        );
        assert_eq!(tree.widget(tb).unwrap().as_text_box().unwrap().text(), "Hi");
        assert!(!gui.in_frame());
    }
}
