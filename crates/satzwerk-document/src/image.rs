// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster-image operations via ImageMagick's identify and convert.

use std::path::{Path, PathBuf};

use satzwerk_core::error::{Result, SatzwerkError};
use satzwerk_core::{ImageSize, ToolPaths};
use satzwerk_exec::quoted;
use tracing::{info, instrument};

/// Modulation applied when the caller does not specify one: +15% brightness,
/// unchanged saturation and hue.
pub const DEFAULT_MODULATION: &str = "115";

/// ImageMagick-backed raster operations.
#[derive(Debug, Clone, Default)]
pub struct ImageTool {
    tools: ToolPaths,
}

impl ImageTool {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }

    /// Measure an image (or the first page of a PDF, through ImageMagick's
    /// Ghostscript delegate) with `identify`.
    ///
    /// `identify` prints `name geometry WxH ...`; `cut` picks the third
    /// field and the `WxH` pair is parsed out of it.
    #[instrument(skip(self), fields(image = %image.as_ref().display()))]
    pub async fn size(&self, image: impl AsRef<Path>) -> Result<ImageSize> {
        let out = satzwerk_exec::run(&self.size_command(image.as_ref())).await?;
        let size = parse_geometry(&out.stdout)?;
        info!(%size, "image measured");
        Ok(size)
    }

    /// Adjust brightness/saturation/hue with `convert -modulate`.
    ///
    /// `value` is ImageMagick's modulation triple (`"115"` or `"100,50,100"`);
    /// `None` applies [`DEFAULT_MODULATION`]. Returns `dir/out`.
    #[instrument(skip(self), fields(dir = %dir.as_ref().display(), image, out))]
    pub async fn modulate(
        &self,
        dir: impl AsRef<Path>,
        image: &str,
        out: &str,
        value: Option<&str>,
    ) -> Result<PathBuf> {
        let dir = dir.as_ref();
        satzwerk_exec::run(&self.modulate_command(dir, image, out, value)).await?;
        info!("image modulated");
        Ok(dir.join(out))
    }

    /// Invert the colours of an image with `convert -negate`. Returns
    /// `dir/out`.
    #[instrument(skip(self), fields(dir = %dir.as_ref().display(), image, out))]
    pub async fn negate(
        &self,
        dir: impl AsRef<Path>,
        image: &str,
        out: &str,
    ) -> Result<PathBuf> {
        let dir = dir.as_ref();
        satzwerk_exec::run(&self.negate_command(dir, image, out)).await?;
        info!("image negated");
        Ok(dir.join(out))
    }

    /// Convert the first page of a document to an image.
    ///
    /// `options` is passed to `convert` verbatim (e.g. `-density 150`); the
    /// `[0]` suffix selects the first page of multi-page input. Returns
    /// `dir/out_file`.
    #[instrument(skip(self), fields(dir = %dir.as_ref().display(), in_file, out_file))]
    pub async fn pdf_to_image(
        &self,
        dir: impl AsRef<Path>,
        options: &str,
        in_file: &str,
        out_file: &str,
    ) -> Result<PathBuf> {
        let dir = dir.as_ref();
        satzwerk_exec::run(&self.pdf_to_image_command(dir, options, in_file, out_file)).await?;
        info!("first page converted to image");
        Ok(dir.join(out_file))
    }

    /// Command line for [`size`](Self::size).
    pub fn size_command(&self, image: &Path) -> String {
        format!("{} {} | cut -d ' ' -f 3", self.tools.identify, quoted(image))
    }

    /// Command line for [`modulate`](Self::modulate).
    pub fn modulate_command(
        &self,
        dir: &Path,
        image: &str,
        out: &str,
        value: Option<&str>,
    ) -> String {
        format!(
            "(cd {}; {} {} -modulate {} {})",
            dir.display(),
            self.tools.convert,
            image,
            value.unwrap_or(DEFAULT_MODULATION),
            out
        )
    }

    /// Command line for [`negate`](Self::negate).
    pub fn negate_command(&self, dir: &Path, image: &str, out: &str) -> String {
        format!(
            "(cd {}; {} {} -negate {})",
            dir.display(),
            self.tools.convert,
            image,
            out
        )
    }

    /// Command line for [`pdf_to_image`](Self::pdf_to_image).
    pub fn pdf_to_image_command(
        &self,
        dir: &Path,
        options: &str,
        in_file: &str,
        out_file: &str,
    ) -> String {
        format!(
            "(cd {}; {} {} {}[0] {})",
            dir.display(),
            self.tools.convert,
            options,
            in_file,
            out_file
        )
    }
}

/// Parse the `WxH` geometry field out of `identify` output.
///
/// Multi-page input yields one line per page; the first line wins.
fn parse_geometry(stdout: &str) -> Result<ImageSize> {
    let line = stdout.lines().next().unwrap_or("").trim();
    let (w, h) = line
        .split_once('x')
        .ok_or_else(|| SatzwerkError::OutputParse(format!("identify geometry `{line}`")))?;
    let width = w
        .parse()
        .map_err(|_| SatzwerkError::OutputParse(format!("identify width `{w}`")))?;
    let height = h
        .parse()
        .map_err(|_| SatzwerkError::OutputParse(format!("identify height `{h}`")))?;
    Ok(ImageSize { width, height })
}
