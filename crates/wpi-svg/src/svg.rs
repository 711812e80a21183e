//! SVG output.
//!
//! Each layer and stroke becomes a `<g>` with an `id`, and each segment a
//! `<line>` styled with round joins and caps, no fill, and its own stroke
//! width and gray level. The document declares a pixel size only.

use std::io::{self, Write};

use wpi::Canvas;

use crate::render::{Segment, StrokeRenderer, render};

const LINE_STYLE: &str = "stroke-linejoin:round;stroke-linecap:round;fill:none";

/// A [`StrokeRenderer`] writing SVG markup to `W`.
#[derive(Debug)]
pub struct SvgWriter<W: Write> {
    out: W,
    segments: usize,
}

impl<W: Write> SvgWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, segments: 0 }
    }

    /// Number of `<line>` elements written so far.
    pub fn segments_written(&self) -> usize {
        self.segments
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StrokeRenderer for SvgWriter<W> {
    fn begin_document(&mut self, width: u32, height: u32) -> io::Result<()> {
        writeln!(self.out, r#"<?xml version="1.0"?>"#)?;
        writeln!(self.out, r#"<svg width="{width}" height="{height}""#)?;
        writeln!(self.out, r#"     xmlns="http://www.w3.org/2000/svg""#)?;
        writeln!(self.out, r#"     xmlns:xlink="http://www.w3.org/1999/xlink">"#)
    }

    fn end_document(&mut self) -> io::Result<()> {
        writeln!(self.out, "</svg>")?;
        self.out.flush()
    }

    fn begin_layer(&mut self, name: &str) -> io::Result<()> {
        self.open_group(name)
    }

    fn end_layer(&mut self) -> io::Result<()> {
        writeln!(self.out, "</g>")
    }

    fn begin_stroke(&mut self, name: &str) -> io::Result<()> {
        self.open_group(name)
    }

    fn end_stroke(&mut self) -> io::Result<()> {
        writeln!(self.out, "</g>")
    }

    fn segment(&mut self, s: &Segment) -> io::Result<()> {
        self.segments += 1;
        writeln!(
            self.out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" style="{LINE_STYLE};stroke:{};stroke-width:{:.2}" />"#,
            s.from.0, s.from.1, s.to.0, s.to.1, s.color, s.width
        )
    }
}

impl<W: Write> SvgWriter<W> {
    fn open_group(&mut self, id: &str) -> io::Result<()> {
        writeln!(self.out, r#"<g id="{}">"#, escape_attr(id))
    }
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Render a canvas to an in-memory SVG document.
pub fn to_svg_string(canvas: &Canvas) -> String {
    let mut writer = SvgWriter::new(Vec::new());
    render(canvas, &mut writer).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}
