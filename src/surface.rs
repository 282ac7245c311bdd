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

/// CPU-side RGBA8 render target.
///
/// The buffer always holds exactly `width * height * 4` bytes. Every write that changes at least
/// one byte raises the dirty flag, which the uploader clears after pushing the pixels to the GPU.
/// A surface created with [`PixelSurface::new`] has no storage until it is resized; drawing into
/// it fails with [`GuiError::SurfaceNotInitialized`].
#[derive(Clone, Debug, Default)]
pub struct PixelSurface {
    width: i32,
    height: i32,
    pixels: Vec<u8>,
    dirty: bool,
}

impl PixelSurface {
    /// Creates an empty surface that must be resized before use.
    pub fn new() -> Self { Self::default() }

    /// Creates a surface with the given dimensions, cleared to transparent black.
    pub fn with_size(width: i32, height: i32) -> GuiResult<Self> {
        let mut surface = Self::new();
        surface.resize(width, height)?;
        Ok(surface)
    }

    /// Reallocates the pixel buffer for a new size.
    ///
    /// Resizing to the current size is a no-op; any other size discards the previous content and
    /// marks the surface dirty.
    pub fn resize(&mut self, width: i32, height: i32) -> GuiResult<()> {
        if width <= 0 || height <= 0 {
            return Err(GuiError::InvalidSurfaceSize { width, height });
        }
        if self.is_initialized() && self.width == width && self.height == height {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize * 4];
        self.dirty = true;
        log::debug!("pixel surface resized to {}x{}", width, height);
        Ok(())
    }

    /// Returns `true` once the surface owns a pixel buffer.
    pub fn is_initialized(&self) -> bool { !self.pixels.is_empty() }

    /// Surface width in pixels.
    pub fn width(&self) -> i32 { self.width }

    /// Surface height in pixels.
    pub fn height(&self) -> i32 { self.height }

    /// Surface dimensions.
    pub fn dimension(&self) -> Dimensioni { Dimensioni::new(self.width, self.height) }

    /// Bounds of the surface as a rectangle anchored at the origin.
    pub fn bounds(&self) -> Recti { rect(0, 0, self.width, self.height) }

    /// Raw RGBA8 bytes in row-major order.
    pub fn pixels(&self) -> &[u8] { &self.pixels }

    /// Returns `true` when the content changed since the last upload.
    pub fn is_dirty(&self) -> bool { self.dirty }

    /// Clears the dirty flag and returns its previous value.
    pub fn take_dirty(&mut self) -> bool { std::mem::replace(&mut self.dirty, false) }

    /// Reads back a pixel, or `None` when out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let index = self.index_of(x, y)?;
        let p = &self.pixels[index..index + 4];
        Some(color(p[0], p[1], p[2], p[3]))
    }

    /// Writes `clr` to every pixel.
    pub fn clear(&mut self, clr: Color) -> GuiResult<()> {
        self.ensure_initialized()?;
        let bytes = clr.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.dirty = true;
        Ok(())
    }

    /// Overwrites a single pixel. Out-of-bounds coordinates are ignored.
    pub fn draw_pixel(&mut self, x: i32, y: i32, clr: Color) -> GuiResult<()> {
        self.ensure_initialized()?;
        if let Some(index) = self.index_of(x, y) {
            self.write(index, clr.to_bytes());
        }
        Ok(())
    }

    /// Fills a rectangle clipped to the surface bounds, overwriting existing pixels.
    pub fn fill_rect(&mut self, r: Recti, clr: Color) -> GuiResult<()> {
        self.ensure_initialized()?;
        if r.width <= 0 || r.height <= 0 {
            return Ok(());
        }
        let clipped = intersect_rect(&r, &self.bounds());
        if clipped.width <= 0 || clipped.height <= 0 {
            return Ok(());
        }
        let bytes = clr.to_bytes();
        let stride = self.width as usize * 4;
        let mut changed = false;
        for y in clipped.y..clipped.y + clipped.height {
            let row = y as usize * stride;
            let start = row + clipped.x as usize * 4;
            let end = start + clipped.width as usize * 4;
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                if px[..] != bytes[..] {
                    px.copy_from_slice(&bytes);
                    changed = true;
                }
            }
        }
        self.dirty |= changed;
        Ok(())
    }

    /// Draws a horizontal line `length` pixels long and `thickness` pixels tall.
    pub fn draw_horizontal_line(&mut self, x: i32, y: i32, length: i32, thickness: i32, clr: Color) -> GuiResult<()> {
        self.ensure_initialized()?;
        if length <= 0 || thickness <= 0 {
            return Ok(());
        }
        self.fill_rect(rect(x, y, length, thickness), clr)
    }

    /// Draws a vertical line `length` pixels tall and `thickness` pixels wide.
    pub fn draw_vertical_line(&mut self, x: i32, y: i32, length: i32, thickness: i32, clr: Color) -> GuiResult<()> {
        self.ensure_initialized()?;
        if length <= 0 || thickness <= 0 {
            return Ok(());
        }
        self.fill_rect(rect(x, y, thickness, length), clr)
    }

    /// Moves the pixel at `(x, y)` toward `clr` by `alpha` (clamped to `[0, 1]`).
    ///
    /// Every channel, alpha included, is linearly interpolated; this is what glyph coverage uses
    /// so anti-aliased edges compose over whatever is already on the surface.
    pub fn blend_pixel(&mut self, x: i32, y: i32, clr: Color, alpha: f32) -> GuiResult<()> {
        self.ensure_initialized()?;
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return Ok(());
        }
        let index = match self.index_of(x, y) {
            Some(index) => index,
            None => return Ok(()),
        };
        let src = clr.to_bytes();
        let mut out = [0u8; 4];
        for (i, dst) in self.pixels[index..index + 4].iter().enumerate() {
            let d = *dst as f32;
            out[i] = (d + (src[i] as f32 - d) * alpha).round().clamp(0.0, 255.0) as u8;
        }
        self.write(index, out);
        Ok(())
    }

    #[cfg(feature = "png_export")]
    /// Encodes the surface as an RGBA PNG image.
    pub fn to_png_bytes(&self) -> GuiResult<Vec<u8>> {
        self.ensure_initialized()?;
        encode_png(self.width as u32, self.height as u32, png::ColorType::Rgba, &self.pixels)
    }

    fn ensure_initialized(&self) -> GuiResult<()> {
        if self.is_initialized() { Ok(()) } else { Err(GuiError::SurfaceNotInitialized) }
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height || !self.is_initialized() {
            return None;
        }
        Some((x as usize + y as usize * self.width as usize) * 4)
    }

    fn write(&mut self, index: usize, bytes: [u8; 4]) {
        let px = &mut self.pixels[index..index + 4];
        if px[..] != bytes[..] {
            px.copy_from_slice(&bytes);
            self.dirty = true;
        }
    }
}

#[cfg(feature = "png_export")]
pub(crate) fn encode_png(width: u32, height: u32, color_type: png::ColorType, data: &[u8]) -> GuiResult<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(|e| GuiError::Encode(e.to_string()))?;
        writer.write_image_data(data).map_err(|e| GuiError::Encode(e.to_string()))?;
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };

    #[test]
    fn drawing_before_resize_fails() {
        let mut surface = PixelSurface::new();
        assert!(matches!(surface.draw_pixel(0, 0, RED), Err(GuiError::SurfaceNotInitialized)));
        assert!(matches!(surface.fill_rect(rect(0, 0, 4, 4), RED), Err(GuiError::SurfaceNotInitialized)));
        assert!(matches!(surface.blend_pixel(0, 0, RED, 0.5), Err(GuiError::SurfaceNotInitialized)));
        assert!(matches!(surface.clear(RED), Err(GuiError::SurfaceNotInitialized)));
    }

    #[test]
    fn resize_rejects_non_positive_sizes() {
        let mut surface = PixelSurface::new();
        assert!(matches!(surface.resize(0, 10), Err(GuiError::InvalidSurfaceSize { width: 0, height: 10 })));
        assert!(surface.resize(10, -1).is_err());
        assert!(!surface.is_initialized());
    }

    #[test]
    fn resize_allocates_and_marks_dirty_once() {
        let mut surface = PixelSurface::with_size(8, 4).unwrap();
        assert_eq!(surface.pixels().len(), 8 * 4 * 4);
        assert!(surface.take_dirty());
        surface.resize(8, 4).unwrap();
        assert!(!surface.is_dirty());
        surface.resize(3, 2).unwrap();
        assert_eq!(surface.pixels().len(), 3 * 2 * 4);
        assert!(surface.is_dirty());
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut surface = PixelSurface::with_size(4, 4).unwrap();
        surface.fill_rect(rect(-2, -2, 4, 4), RED).unwrap();
        assert_eq!(surface.pixel(0, 0), Some(RED));
        assert_eq!(surface.pixel(1, 1), Some(RED));
        assert_eq!(surface.pixel(2, 2), Some(Color::TRANSPARENT));
        surface.take_dirty();
        surface.fill_rect(rect(10, 10, 4, 4), RED).unwrap();
        assert!(!surface.is_dirty());
    }

    #[test]
    fn fill_rect_with_huge_extent_saturates() {
        let mut surface = PixelSurface::with_size(4, 4).unwrap();
        surface.fill_rect(rect(1, 1, i32::MAX, i32::MAX), RED).unwrap();
        assert_eq!(surface.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(1, 1), Some(RED));
        assert_eq!(surface.pixel(3, 3), Some(RED));
    }

    #[test]
    fn identical_writes_keep_surface_clean() {
        let mut surface = PixelSurface::with_size(2, 2).unwrap();
        surface.fill_rect(rect(0, 0, 2, 2), RED).unwrap();
        surface.take_dirty();
        surface.fill_rect(rect(0, 0, 2, 2), RED).unwrap();
        surface.draw_pixel(1, 1, RED).unwrap();
        assert!(!surface.is_dirty());
        surface.draw_pixel(1, 1, Color::WHITE).unwrap();
        assert!(surface.is_dirty());
    }

    #[test]
    fn lines_degenerate_to_rectangles() {
        let mut surface = PixelSurface::with_size(6, 6).unwrap();
        surface.draw_horizontal_line(1, 2, 3, 2, RED).unwrap();
        assert_eq!(surface.pixel(1, 2), Some(RED));
        assert_eq!(surface.pixel(3, 3), Some(RED));
        assert_eq!(surface.pixel(4, 2), Some(Color::TRANSPARENT));
        surface.draw_vertical_line(5, 0, 6, 0, RED).unwrap();
        assert_eq!(surface.pixel(5, 0), Some(Color::TRANSPARENT));
        surface.draw_vertical_line(5, 0, 6, 1, RED).unwrap();
        assert_eq!(surface.pixel(5, 5), Some(RED));
    }

    #[test]
    fn blend_half_red_over_white() {
        let mut surface = PixelSurface::with_size(1, 1).unwrap();
        surface.clear(Color::WHITE).unwrap();
        surface.blend_pixel(0, 0, RED, 0.5).unwrap();
        let expected = (255.0f32 + (0.0 - 255.0) * 0.5).round() as u8;
        assert_eq!(surface.pixel(0, 0), Some(color(255, expected, expected, 255)));
    }

    #[test]
    fn blend_out_of_bounds_is_noop() {
        let mut surface = PixelSurface::with_size(1, 1).unwrap();
        surface.take_dirty();
        surface.blend_pixel(5, 5, RED, 1.0).unwrap();
        surface.blend_pixel(0, 0, RED, 0.0).unwrap();
        assert!(!surface.is_dirty());
    }
}
