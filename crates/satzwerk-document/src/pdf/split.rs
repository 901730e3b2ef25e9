// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page splitting and embedded-image extraction.

use std::path::{Path, PathBuf};

use satzwerk_core::ToolPaths;
use satzwerk_core::error::Result;
use satzwerk_exec::quoted;
use tracing::{info, instrument};

/// File-name pattern the page files are written under. Both pdftk and
/// pdfseparate substitute the page number into `%04d`.
const PAGE_PATTERN: &str = "page_%04d.pdf";

/// Splits PDF documents into per-page files, or pulls out their embedded
/// images.
#[derive(Debug, Clone, Default)]
pub struct PdfSplitter {
    tools: ToolPaths,
}

impl PdfSplitter {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }

    /// Split a PDF into its component pages with `pdftk burst`.
    ///
    /// Page files land in `page_dir` as `page_0001.pdf`, `page_0002.pdf`, …
    /// Returns `page_dir`.
    #[instrument(skip(self, page_dir), fields(doc = %doc.as_ref().display()))]
    pub async fn burst(
        &self,
        doc: impl AsRef<Path>,
        page_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let page_dir = page_dir.as_ref();
        satzwerk_exec::run(&self.burst_command(doc.as_ref(), page_dir)).await?;
        info!("document burst into pages");
        Ok(page_dir.to_path_buf())
    }

    /// Split a PDF into its component pages with `pdfseparate`.
    ///
    /// Same output layout as [`burst`](Self::burst); poppler's splitter is
    /// the fallback for documents pdftk refuses. Returns `page_dir`.
    #[instrument(skip(self, page_dir), fields(doc = %doc.as_ref().display()))]
    pub async fn separate(
        &self,
        doc: impl AsRef<Path>,
        page_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let page_dir = page_dir.as_ref();
        satzwerk_exec::run(&self.separate_command(doc.as_ref(), page_dir)).await?;
        info!("document separated into pages");
        Ok(page_dir.to_path_buf())
    }

    /// Extract the images embedded in a PDF with `pdfimages -j -p`.
    ///
    /// JPEG streams are written as-is (`-j`); file names carry the page
    /// number (`-p`), prefixed `page`. Returns `image_dir`.
    #[instrument(skip(self, image_dir), fields(doc = %doc.as_ref().display()))]
    pub async fn extract_images(
        &self,
        doc: impl AsRef<Path>,
        image_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let image_dir = image_dir.as_ref();
        satzwerk_exec::run(&self.extract_images_command(doc.as_ref(), image_dir)).await?;
        info!("embedded images extracted");
        Ok(image_dir.to_path_buf())
    }

    /// Command line for [`burst`](Self::burst).
    pub fn burst_command(&self, doc: &Path, page_dir: &Path) -> String {
        format!(
            "{} {} burst output {}",
            self.tools.pdftk,
            quoted(doc),
            page_dir.join(PAGE_PATTERN).display()
        )
    }

    /// Command line for [`separate`](Self::separate).
    pub fn separate_command(&self, doc: &Path, page_dir: &Path) -> String {
        format!(
            "{} {} {}",
            self.tools.pdfseparate,
            quoted(doc),
            page_dir.join(PAGE_PATTERN).display()
        )
    }

    /// Command line for [`extract_images`](Self::extract_images).
    pub fn extract_images_command(&self, doc: &Path, image_dir: &Path) -> String {
        format!(
            "{} -j -p {} {}",
            self.tools.pdfimages,
            quoted(doc),
            image_dir.join("page").display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter() -> PdfSplitter {
        PdfSplitter::default()
    }

    #[test]
    fn burst_command_line() {
        let cmd = splitter().burst_command(Path::new("/in/doc.pdf"), Path::new("/out/pages"));
        assert_eq!(cmd, "pdftk \"/in/doc.pdf\" burst output /out/pages/page_%04d.pdf");
    }

    #[test]
    fn separate_command_line() {
        let cmd = splitter().separate_command(Path::new("/in/doc.pdf"), Path::new("/out/pages"));
        assert_eq!(cmd, "pdfseparate \"/in/doc.pdf\" /out/pages/page_%04d.pdf");
    }

    #[test]
    fn extract_images_command_line() {
        let cmd =
            splitter().extract_images_command(Path::new("/in/doc.pdf"), Path::new("/out/imgs"));
        assert_eq!(cmd, "pdfimages -j -p \"/in/doc.pdf\" /out/imgs/page");
    }

    #[test]
    fn burst_quotes_paths_with_spaces() {
        let cmd = splitter().burst_command(Path::new("/in/my doc.pdf"), Path::new("/out"));
        assert!(cmd.contains("\"/in/my doc.pdf\""));
    }

    #[test]
    fn configured_binary_name_is_used() {
        let splitter = PdfSplitter::new(ToolPaths {
            pdftk: "/opt/pdftk/bin/pdftk".into(),
            ..Default::default()
        });
        let cmd = splitter.burst_command(Path::new("a.pdf"), Path::new("/p"));
        assert!(cmd.starts_with("/opt/pdftk/bin/pdftk "));
    }

    // Needs ghostscript and pdftk on PATH: `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn burst_splits_a_generated_document() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("two_pages.pdf");
        satzwerk_exec::run(&format!(
            "gs -o {} -sDEVICE=pdfwrite -c 'showpage showpage'",
            doc.display()
        ))
        .await
        .unwrap();

        let pages = tempfile::tempdir().unwrap();
        splitter().burst(&doc, pages.path()).await.unwrap();
        assert!(pages.path().join("page_0001.pdf").exists());
        assert!(pages.path().join("page_0002.pdf").exists());
    }
}
