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
use std::{env, error::Error, fs, path::PathBuf};

use surface_ui::BitmapFont;

struct Args {
    font: PathBuf,
    size: f32,
    atlas: (usize, usize),
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;
    let bytes = fs::read(&args.font)?;
    let font = BitmapFont::bake(&bytes, args.size, args.atlas.0, args.atlas.1)?;
    fs::write(&args.output, font.atlas_png_bytes()?)?;
    println!(
        "baked {} glyphs from {} at {}px into {} ({}x{}, line height {})",
        font.glyph_count(),
        args.font.display(),
        args.size,
        args.output.display(),
        args.atlas.0,
        args.atlas.1,
        font.line_height()
    );
    Ok(())
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut font = None;
    let mut size = 16.0;
    let mut atlas = (512, 512);
    let mut output = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{arg} requires a value"));
        match arg.as_str() {
            "--font" => font = Some(PathBuf::from(value()?)),
            "--size" => size = value()?.parse()?,
            "--atlas" => atlas = parse_dimension(&value()?)?,
            "--output" => output = Some(PathBuf::from(value()?)),
            _ => return Err(format!("unknown argument {arg}").into()),
        }
    }
    Ok(Args {
        font: font.ok_or("missing --font <path>")?,
        size,
        atlas,
        output: output.ok_or("missing --output <path>")?,
    })
}

fn parse_dimension(s: &str) -> Result<(usize, usize), Box<dyn Error>> {
    let (w, h) = s.split_once('x').ok_or("--atlas expects WIDTHxHEIGHT")?;
    Ok((w.parse()?, h.parse()?))
}
