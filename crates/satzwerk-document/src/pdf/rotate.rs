// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Whole-document page rotation.

use std::path::{Path, PathBuf};

use satzwerk_core::error::Result;
use satzwerk_core::{Direction, ToolPaths};
use tracing::{info, instrument};

/// Rotates every page of a document.
#[derive(Debug, Clone, Default)]
pub struct PdfRotator {
    tools: ToolPaths,
}

impl PdfRotator {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }

    /// Rotate all pages with pdftk.
    ///
    /// The direction keyword is appended to the `1-end` page range, which is
    /// pdftk's syntax for "rotate this range as it is copied". `in_file` and
    /// `out_file` are names relative to `dir`. Returns `dir/out_file`.
    #[instrument(skip(self), fields(dir = %dir.as_ref().display(), in_file, out_file))]
    pub async fn rotate(
        &self,
        dir: impl AsRef<Path>,
        in_file: &str,
        out_file: &str,
        direction: Direction,
    ) -> Result<PathBuf> {
        let dir = dir.as_ref();
        satzwerk_exec::run(&self.rotate_command(dir, in_file, out_file, direction)).await?;
        info!(direction = direction.pdftk_keyword(), "document rotated");
        Ok(dir.join(out_file))
    }

    /// Rotate all pages via the companion `pdfrw_rotate.py` helper script,
    /// which takes the rotation in degrees. Returns `dir/out_file`.
    #[instrument(skip(self), fields(dir = %dir.as_ref().display(), in_file, out_file))]
    pub async fn rotate_with_pdfrw(
        &self,
        dir: impl AsRef<Path>,
        in_file: &str,
        out_file: &str,
        direction: Direction,
    ) -> Result<PathBuf> {
        let dir = dir.as_ref();
        satzwerk_exec::run(&self.rotate_with_pdfrw_command(dir, in_file, out_file, direction))
            .await?;
        info!(degrees = direction.degrees(), "document rotated via pdfrw");
        Ok(dir.join(out_file))
    }

    /// Command line for [`rotate`](Self::rotate).
    pub fn rotate_command(
        &self,
        dir: &Path,
        in_file: &str,
        out_file: &str,
        direction: Direction,
    ) -> String {
        format!(
            "(cd {}; {} {} cat 1-end{} output {})",
            dir.display(),
            self.tools.pdftk,
            in_file,
            direction.pdftk_keyword(),
            out_file
        )
    }

    /// Command line for [`rotate_with_pdfrw`](Self::rotate_with_pdfrw).
    pub fn rotate_with_pdfrw_command(
        &self,
        dir: &Path,
        in_file: &str,
        out_file: &str,
        direction: Direction,
    ) -> String {
        format!(
            "(cd {}; {} {} {} {})",
            dir.display(),
            self.tools.pdfrw_rotate,
            in_file,
            direction.degrees(),
            out_file
        )
    }
}
