// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text-layer extraction via pdftotext.
//
// pdftotext writes to stdout (`-` output argument); the shell pipeline
// optionally narrows the text through egrep and flattens newlines with tr,
// then redirects into a temp file which is read back and returned. The temp
// file is removed when its handle drops.

use std::path::Path;

use satzwerk_core::error::Result;
use satzwerk_core::{PageRange, TextFilter, ToolPaths};
use tracing::{debug, info, instrument};

/// Extracts the text layer of a PDF document.
#[derive(Debug, Clone, Default)]
pub struct TextExtractor {
    tools: ToolPaths,
}

impl TextExtractor {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }

    /// Extract text from `pdf`, optionally restricted to a page range and
    /// post-filtered. Returns the extracted text.
    #[instrument(skip(self, filter), fields(pdf = %pdf.as_ref().display()))]
    pub async fn words(
        &self,
        pdf: impl AsRef<Path>,
        filter: &TextFilter,
        pages: Option<PageRange>,
    ) -> Result<String> {
        let tmp = tempfile::NamedTempFile::new()?;
        let cmd = format!(
            "{} > {}",
            self.words_command(pdf.as_ref(), filter, pages),
            tmp.path().display()
        );
        satzwerk_exec::run(&cmd).await?;

        let words = tokio::fs::read_to_string(tmp.path()).await?;
        debug!(bytes = words.len(), "text extracted");
        info!("pdftotext extraction complete");
        Ok(words)
    }

    /// Command line for [`words`](Self::words), without the trailing
    /// redirection into the temp file.
    pub fn words_command(
        &self,
        pdf: &Path,
        filter: &TextFilter,
        pages: Option<PageRange>,
    ) -> String {
        let mut cmd = match pages {
            Some(range) => format!(
                "{} -f {} -l {} {} -",
                self.tools.pdftotext,
                range.first,
                range.last,
                pdf.display()
            ),
            None => format!("{} {} -", self.tools.pdftotext, pdf.display()),
        };
        append_text_filters(&mut cmd, filter);
        cmd
    }
}

/// Append the shared egrep/tr pipeline suffixes for a [`TextFilter`].
///
/// Also used by the OCR module; both tools emit plain text on stdout and the
/// filters compose identically.
pub(crate) fn append_text_filters(cmd: &mut String, filter: &TextFilter) {
    if let Some(pattern) = &filter.pattern {
        cmd.push_str(&format!(" | egrep -o '{pattern}'"));
    }
    if filter.strip_newlines {
        cmd.push_str(" | tr '\\n' ' '");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> TextExtractor {
        TextExtractor::default()
    }

    #[test]
    fn plain_extraction_command() {
        let cmd = extractor().words_command(Path::new("/in/doc.pdf"), &TextFilter::none(), None);
        assert_eq!(cmd, "pdftotext /in/doc.pdf -");
    }

    #[test]
    fn page_range_adds_first_last_flags() {
        let cmd = extractor().words_command(
            Path::new("/in/doc.pdf"),
            &TextFilter::none(),
            Some(PageRange { first: 2, last: 5 }),
        );
        assert_eq!(cmd, "pdftotext -f 2 -l 5 /in/doc.pdf -");
    }

    #[test]
    fn pattern_appends_egrep() {
        let filter = TextFilter {
            pattern: Some("[0-9]{4}".into()),
            strip_newlines: false,
        };
        let cmd = extractor().words_command(Path::new("doc.pdf"), &filter, None);
        assert_eq!(cmd, "pdftotext doc.pdf - | egrep -o '[0-9]{4}'");
    }

    #[test]
    fn strip_newlines_appends_tr() {
        let filter = TextFilter {
            pattern: None,
            strip_newlines: true,
        };
        let cmd = extractor().words_command(Path::new("doc.pdf"), &filter, None);
        assert_eq!(cmd, "pdftotext doc.pdf - | tr '\\n' ' '");
    }

    #[test]
    fn filters_compose_in_order() {
        let filter = TextFilter {
            pattern: Some("needle".into()),
            strip_newlines: true,
        };
        let cmd = extractor().words_command(
            Path::new("doc.pdf"),
            &filter,
            Some(PageRange { first: 1, last: 1 }),
        );
        assert_eq!(
            cmd,
            "pdftotext -f 1 -l 1 doc.pdf - | egrep -o 'needle' | tr '\\n' ' '"
        );
    }

    #[tokio::test]
    async fn words_reads_back_redirected_output() {
        // `echo` stands in for pdftotext: the temp-file round trip is what's
        // under test, not poppler.
        let extractor = TextExtractor::new(ToolPaths {
            pdftotext: "echo".into(),
            ..Default::default()
        });
        let words = extractor
            .words(Path::new("doc.pdf"), &TextFilter::none(), None)
            .await
            .unwrap();
        assert_eq!(words, "doc.pdf -\n");
    }
}
