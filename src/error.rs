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
use thiserror::Error;

/// Result type used throughout the crate.
pub type GuiResult<T> = Result<T, GuiError>;

/// Failures reported by the GUI core.
///
/// Configuration and frame-ordering mistakes surface here; out-of-range user input is clamped
/// and glyphs missing from the atlas are skipped instead.
#[derive(Debug, Error)]
pub enum GuiError {
    /// A surface was sized with a non-positive dimension.
    #[error("invalid surface size {width}x{height}")]
    InvalidSurfaceSize {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// A draw call reached a surface that was never sized.
    #[error("surface not initialized")]
    SurfaceNotInitialized,

    /// The glyph baker could not produce an atlas.
    #[error("font baking failed: {0}")]
    FontBake(String),

    /// Pre-baked font data is inconsistent.
    #[error("invalid font data: {0}")]
    InvalidFont(String),

    /// An argument was rejected by a constructor or setter.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Exporting an image failed.
    #[error("image encoding failed: {0}")]
    Encode(String),

    /// A call was made in the wrong frame state or would corrupt the widget tree.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
}
