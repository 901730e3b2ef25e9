// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR pipeline: Ghostscript rasterisation followed by tesseract.
//
// Recognition quality depends on the exact Ghostscript flag set (png16m
// device, interpolation, 300 dpi, raised VM threshold), so the flags are a
// fixed template and must not be "tidied".

use std::path::{Path, PathBuf};

use satzwerk_core::error::Result;
use satzwerk_core::{TextFilter, ToolPaths};
use tracing::{info, instrument};

use crate::pdf::text::append_text_filters;

/// Extension stripped from image names when deriving tesseract's output
/// base, unless the caller supplies another.
pub const DEFAULT_IMAGE_EXTENSION: &str = ".jpg";

/// Rasterise-then-recognise OCR over the external toolchain.
#[derive(Debug, Clone, Default)]
pub struct OcrEngine {
    tools: ToolPaths,
}

impl OcrEngine {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }

    /// Rasterise page 1 of a PDF to a PNG suitable for OCR (300 dpi,
    /// 24-bit colour, interpolated).
    ///
    /// When `image_out` is `None` the image lands next to the PDF with
    /// `.png` appended to the full file name (`doc.pdf` → `doc.pdf.png`).
    /// Returns the image path.
    #[instrument(skip(self), fields(pdf = %pdf.as_ref().display()))]
    pub async fn prepare(
        &self,
        pdf: impl AsRef<Path>,
        image_out: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let pdf = pdf.as_ref();
        let image = image_out.unwrap_or_else(|| default_raster_path(pdf));
        satzwerk_exec::run(&self.prepare_command(pdf, &image)).await?;
        info!(image = %image.display(), "page rasterised for OCR");
        Ok(image)
    }

    /// Recognise text in an image with tesseract, applying the optional
    /// egrep/tr post-filters. Returns the recognised text.
    #[instrument(skip(self, filter), fields(image = %image.as_ref().display()))]
    pub async fn recognise_image(
        &self,
        image: impl AsRef<Path>,
        filter: &TextFilter,
    ) -> Result<String> {
        let out =
            satzwerk_exec::run(&self.recognise_image_command(image.as_ref(), filter)).await?;
        info!(bytes = out.stdout.len(), "image recognised");
        Ok(out.stdout)
    }

    /// Recognise text in a PDF: rasterise page 1, then run tesseract over
    /// the raster. Returns the recognised text.
    #[instrument(skip(self, filter), fields(pdf = %pdf.as_ref().display()))]
    pub async fn recognise_pdf(
        &self,
        pdf: impl AsRef<Path>,
        filter: &TextFilter,
    ) -> Result<String> {
        let image = self.prepare(pdf, None).await?;
        self.recognise_image(&image, filter).await
    }

    /// Re-typeset an image as a searchable PDF with tesseract's `pdf`
    /// output mode.
    ///
    /// tesseract is given an output base (the image path with `extension`
    /// stripped) and appends `.pdf` itself; the returned path includes it.
    #[instrument(skip(self), fields(image = %image.as_ref().display()))]
    pub async fn image_to_pdf(
        &self,
        image: impl AsRef<Path>,
        extension: Option<&str>,
    ) -> Result<PathBuf> {
        let image = image.as_ref();
        let base = output_base(image, extension.unwrap_or(DEFAULT_IMAGE_EXTENSION));
        satzwerk_exec::run(&self.image_to_pdf_command(image, &base)).await?;
        let pdf = PathBuf::from(format!("{}.pdf", base.display()));
        info!(pdf = %pdf.display(), "image re-typeset as PDF");
        Ok(pdf)
    }

    /// Command line for [`prepare`](Self::prepare). The flag set is fixed;
    /// see the module header.
    pub fn prepare_command(&self, pdf: &Path, image: &Path) -> String {
        format!(
            "{} -dSAFER -sDEVICE=png16m -dINTERPOLATE -dNumRenderingThreads=2 \
             -dFirstPage=1 -dLastPage=1 -r300 -o {} -c 30000000 setvmthreshold -f {}",
            self.tools.gs,
            image.display(),
            pdf.display()
        )
    }

    /// Command line for [`recognise_image`](Self::recognise_image).
    pub fn recognise_image_command(&self, image: &Path, filter: &TextFilter) -> String {
        let mut cmd = format!("{} {} stdout", self.tools.tesseract, image.display());
        append_text_filters(&mut cmd, filter);
        cmd
    }

    /// Command line for [`image_to_pdf`](Self::image_to_pdf).
    pub fn image_to_pdf_command(&self, image: &Path, base: &Path) -> String {
        format!(
            "{} {} {} pdf",
            self.tools.tesseract,
            image.display(),
            base.display()
        )
    }
}

/// Default rasterisation target: the PDF's directory and full file name with
/// `.png` appended.
fn default_raster_path(pdf: &Path) -> PathBuf {
    let name = pdf
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    pdf.parent()
        .unwrap_or_else(|| Path::new(""))
        .join(format!("{name}.png"))
}

/// tesseract output base: the image path with `extension` stripped from the
/// file name (left untouched when the extension does not match).
fn output_base(image: &Path, extension: &str) -> PathBuf {
    let name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(extension).unwrap_or(&name);
    image
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(stem)
}
