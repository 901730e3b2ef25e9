// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Diagonal text watermark pipeline.
//
// Four stages: measure the page raster, draw the text three times at -45°
// on a transparent canvas, convert that canvas to a one-page PDF, and stamp
// it over every page of the document with pdftk.

use std::path::{Path, PathBuf};

use satzwerk_core::error::Result;
use satzwerk_core::{ToolPaths, WatermarkLayout};
use tracing::{info, instrument};

use crate::image::ImageTool;

/// File names of the pipeline artefacts, created next to the input document.
const WATERMARK_PNG: &str = "watermark.png";
const WATERMARK_PDF: &str = "watermark.pdf";
const WATERMARKED_PDF: &str = "watermarked.pdf";

/// Stamps a repeated diagonal text watermark over a document.
#[derive(Debug, Clone, Default)]
pub struct Watermarker {
    tools: ToolPaths,
}

impl Watermarker {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }

    /// Run the full pipeline over `doc`, watermarking every page with
    /// `text`.
    ///
    /// Intermediate artefacts (`watermark.png`, `watermark.pdf`) and the
    /// result (`watermarked.pdf`) are placed in the document's directory.
    /// Returns the watermarked path.
    #[instrument(skip(self), fields(doc = %doc.as_ref().display(), text))]
    pub async fn apply(&self, doc: impl AsRef<Path>, text: &str) -> Result<PathBuf> {
        let doc = doc.as_ref();
        let dir = doc.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        let png = dir.join(WATERMARK_PNG);
        let pdf = dir.join(WATERMARK_PDF);
        let result = dir.join(WATERMARKED_PDF);

        let size = ImageTool::new(self.tools.clone()).size(doc).await?;
        let layout = WatermarkLayout::for_page(size);
        self.render(&layout, &png, text).await?;
        self.to_pdf(&png, &pdf).await?;
        self.stamp(doc, &pdf, &result).await?;

        info!(result = %result.display(), "document watermarked");
        Ok(result)
    }

    /// Draw the watermark text on a transparent canvas of the given layout.
    /// Returns `out_png`.
    #[instrument(skip(self, layout, out_png), fields(out = %out_png.as_ref().display(), text))]
    pub async fn render(
        &self,
        layout: &WatermarkLayout,
        out_png: impl AsRef<Path>,
        text: &str,
    ) -> Result<PathBuf> {
        let out_png = out_png.as_ref();
        satzwerk_exec::run(&self.render_command(layout, out_png, text)).await?;
        Ok(out_png.to_path_buf())
    }

    /// Convert the watermark canvas into a one-page PDF. Returns `out_pdf`.
    #[instrument(skip(self, out_pdf), fields(png = %png.as_ref().display()))]
    pub async fn to_pdf(
        &self,
        png: impl AsRef<Path>,
        out_pdf: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let out_pdf = out_pdf.as_ref();
        satzwerk_exec::run(&self.to_pdf_command(png.as_ref(), out_pdf)).await?;
        Ok(out_pdf.to_path_buf())
    }

    /// Stamp the watermark PDF over every page of `doc` with `pdftk stamp`.
    /// Returns `out`.
    #[instrument(skip(self, watermark_pdf, out), fields(doc = %doc.as_ref().display()))]
    pub async fn stamp(
        &self,
        doc: impl AsRef<Path>,
        watermark_pdf: impl AsRef<Path>,
        out: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let out = out.as_ref();
        satzwerk_exec::run(&self.stamp_command(doc.as_ref(), watermark_pdf.as_ref(), out)).await?;
        Ok(out.to_path_buf())
    }

    /// Command line for [`render`](Self::render): three `-draw` imprints at
    /// the layout anchors, Helvetica-bold 25 pt, half-transparent grey.
    pub fn render_command(&self, layout: &WatermarkLayout, out_png: &Path, text: &str) -> String {
        format!(
            "{} -size {}x{} xc:transparent -font Helvetica-bold -pointsize 25 \
             -fill \"graya(65%,0.5)\" \
             -draw \"translate {},{} rotate -45 text 0,0 '{}'\" \
             -draw \"translate {},{} rotate -45 text 0,0 '{}'\" \
             -draw \"translate {},{} rotate -45 text 0,0 '{}'\" {}",
            self.tools.convert,
            layout.canvas.width,
            layout.canvas.height,
            layout.upper_left.x,
            layout.upper_left.y,
            text,
            layout.center.x,
            layout.center.y,
            text,
            layout.lower_right.x,
            layout.lower_right.y,
            text,
            out_png.display()
        )
    }

    /// Command line for [`to_pdf`](Self::to_pdf).
    pub fn to_pdf_command(&self, png: &Path, pdf: &Path) -> String {
        format!("{} {} {}", self.tools.convert, png.display(), pdf.display())
    }

    /// Command line for [`stamp`](Self::stamp).
    pub fn stamp_command(&self, doc: &Path, watermark_pdf: &Path, out: &Path) -> String {
        format!(
            "{} {} stamp {} output {}",
            self.tools.pdftk,
            doc.display(),
            watermark_pdf.display(),
            out.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satzwerk_core::{ImageSize, Point};

    fn marker() -> Watermarker {
        Watermarker::default()
    }

    fn letter_layout() -> WatermarkLayout {
        WatermarkLayout::for_page(ImageSize {
            width: 612,
            height: 792,
        })
    }

    #[test]
    fn render_command_line() {
        let cmd = marker().render_command(&letter_layout(), Path::new("/w/watermark.png"), "DRAFT");
        assert_eq!(
            cmd,
            "convert -size 612x792 xc:transparent -font Helvetica-bold -pointsize 25 \
             -fill \"graya(65%,0.5)\" \
             -draw \"translate 20,197 rotate -45 text 0,0 'DRAFT'\" \
             -draw \"translate 218,573 rotate -45 text 0,0 'DRAFT'\" \
             -draw \"translate 415,772 rotate -45 text 0,0 'DRAFT'\" /w/watermark.png"
        );
    }

    #[test]
    fn render_places_text_at_layout_anchors() {
        let mut layout = letter_layout();
        layout.center = Point { x: 1, y: 2 };
        let cmd = marker().render_command(&layout, Path::new("wm.png"), "X");
        assert!(cmd.contains("translate 1,2 rotate -45"));
    }

    #[test]
    fn to_pdf_command_line() {
        let cmd = marker().to_pdf_command(Path::new("/w/wm.png"), Path::new("/w/wm.pdf"));
        assert_eq!(cmd, "convert /w/wm.png /w/wm.pdf");
    }

    #[test]
    fn stamp_command_line() {
        let cmd = marker().stamp_command(
            Path::new("/w/doc.pdf"),
            Path::new("/w/wm.pdf"),
            Path::new("/w/out.pdf"),
        );
        assert_eq!(cmd, "pdftk /w/doc.pdf stamp /w/wm.pdf output /w/out.pdf");
    }
}
