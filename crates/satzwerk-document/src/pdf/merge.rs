// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document concatenation.
//
// Three back-ends with the same shape: the command runs in a working
// directory (`(cd dir; ...)`) and the input file names are given relative to
// it, so long page lists stay within the shell's argument limits.

use std::path::{Path, PathBuf};

use satzwerk_core::ToolPaths;
use satzwerk_core::error::Result;
use satzwerk_exec::quoted;
use tracing::{info, instrument};

/// Concatenates PDF documents into one.
#[derive(Debug, Clone, Default)]
pub struct PdfMerger {
    tools: ToolPaths,
}

impl PdfMerger {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }

    /// Concatenate with `pdftk ... cat`. Preserves bookmarks and form
    /// fields where pdftk can. Returns `out`.
    #[instrument(skip(self, inputs, out), fields(dir = %dir.as_ref().display(), inputs = inputs.len()))]
    pub async fn concat(
        &self,
        dir: impl AsRef<Path>,
        inputs: &[impl AsRef<str>],
        out: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let out = out.as_ref();
        satzwerk_exec::run(&self.concat_command(dir.as_ref(), inputs, out)).await?;
        info!("documents concatenated with pdftk");
        Ok(out.to_path_buf())
    }

    /// Concatenate with poppler's `pdfunite`. Returns `out`.
    #[instrument(skip(self, inputs, out), fields(dir = %dir.as_ref().display(), inputs = inputs.len()))]
    pub async fn unite(
        &self,
        dir: impl AsRef<Path>,
        inputs: &[impl AsRef<str>],
        out: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let out = out.as_ref();
        satzwerk_exec::run(&self.unite_command(dir.as_ref(), inputs, out)).await?;
        info!("documents united with pdfunite");
        Ok(out.to_path_buf())
    }

    /// Concatenate with `qpdf --empty --pages`. Rewrites the document
    /// structure, which also normalises mildly damaged inputs. Returns `out`.
    #[instrument(skip(self, inputs, out), fields(dir = %dir.as_ref().display(), inputs = inputs.len()))]
    pub async fn unite_with_qpdf(
        &self,
        dir: impl AsRef<Path>,
        inputs: &[impl AsRef<str>],
        out: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let out = out.as_ref();
        satzwerk_exec::run(&self.unite_with_qpdf_command(dir.as_ref(), inputs, out)).await?;
        info!("documents united with qpdf");
        Ok(out.to_path_buf())
    }

    /// Command line for [`concat`](Self::concat).
    pub fn concat_command(&self, dir: &Path, inputs: &[impl AsRef<str>], out: &Path) -> String {
        format!(
            "(cd {}; {} {} cat output {})",
            dir.display(),
            self.tools.pdftk,
            quote_list(inputs),
            quoted(out)
        )
    }

    /// Command line for [`unite`](Self::unite).
    pub fn unite_command(&self, dir: &Path, inputs: &[impl AsRef<str>], out: &Path) -> String {
        format!(
            "(cd {}; {} {} {})",
            dir.display(),
            self.tools.pdfunite,
            quote_list(inputs),
            quoted(out)
        )
    }

    /// Command line for [`unite_with_qpdf`](Self::unite_with_qpdf).
    pub fn unite_with_qpdf_command(
        &self,
        dir: &Path,
        inputs: &[impl AsRef<str>],
        out: &Path,
    ) -> String {
        format!(
            "(cd {}; {} --empty --pages {} -- {})",
            dir.display(),
            self.tools.qpdf,
            quote_list(inputs),
            quoted(out)
        )
    }
}

/// Quote each input file name and join with single spaces.
fn quote_list(inputs: &[impl AsRef<str>]) -> String {
    inputs
        .iter()
        .map(|f| quoted(f.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merger() -> PdfMerger {
        PdfMerger::default()
    }

    #[test]
    fn concat_command_line() {
        let cmd = merger().concat_command(
            Path::new("/work"),
            &["a.pdf", "b.pdf"],
            Path::new("/work/out.pdf"),
        );
        assert_eq!(
            cmd,
            "(cd /work; pdftk \"a.pdf\" \"b.pdf\" cat output \"/work/out.pdf\")"
        );
    }

    #[test]
    fn unite_command_line() {
        let cmd = merger().unite_command(
            Path::new("/work"),
            &["a.pdf", "b.pdf"],
            Path::new("/work/out.pdf"),
        );
        assert_eq!(cmd, "(cd /work; pdfunite \"a.pdf\" \"b.pdf\" \"/work/out.pdf\")");
    }

    #[test]
    fn qpdf_command_line() {
        let cmd = merger().unite_with_qpdf_command(
            Path::new("/work"),
            &["a.pdf", "b.pdf"],
            Path::new("/work/out.pdf"),
        );
        assert_eq!(
            cmd,
            "(cd /work; qpdf --empty --pages \"a.pdf\" \"b.pdf\" -- \"/work/out.pdf\")"
        );
    }

    #[test]
    fn single_input_has_no_trailing_space() {
        let cmd = merger().unite_command(Path::new("/w"), &["only.pdf"], Path::new("o.pdf"));
        assert_eq!(cmd, "(cd /w; pdfunite \"only.pdf\" \"o.pdf\")");
    }

    #[test]
    fn inputs_with_spaces_stay_single_arguments() {
        let cmd = merger().concat_command(
            Path::new("/w"),
            &["page one.pdf"],
            Path::new("out.pdf"),
        );
        assert!(cmd.contains("\"page one.pdf\""));
    }
}
