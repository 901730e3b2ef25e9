// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External tool configuration.

use serde::{Deserialize, Serialize};

/// Names (or full paths) of the external binaries the command templates
/// invoke.
///
/// The defaults are the canonical tool names, so a default-configured
/// toolchain produces the reference command lines exactly. Deployments with
/// renamed binaries (a `magick` shim for `convert`, a versioned `gs10`,
/// a relocated helper script) override individual entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolPaths {
    pub pdftk: String,
    pub pdfseparate: String,
    pub pdfunite: String,
    pub qpdf: String,
    pub convert: String,
    pub identify: String,
    pub gs: String,
    pub tesseract: String,
    pub pdftotext: String,
    pub pdfimages: String,
    /// Companion helper script for degree-based page rotation.
    pub pdfrw_rotate: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            pdftk: "pdftk".into(),
            pdfseparate: "pdfseparate".into(),
            pdfunite: "pdfunite".into(),
            qpdf: "qpdf".into(),
            convert: "convert".into(),
            identify: "identify".into(),
            gs: "gs".into(),
            tesseract: "tesseract".into(),
            pdftotext: "pdftotext".into(),
            pdfimages: "pdfimages".into(),
            pdfrw_rotate: "pdfrw_rotate.py".into(),
        }
    }
}

impl ToolPaths {
    /// The binaries a working installation requires, paired with the Debian
    /// package that provides each. Used by the toolchain doctor.
    pub fn required(&self) -> Vec<(&str, &'static str)> {
        vec![
            (self.pdftk.as_str(), "pdftk"),
            (self.pdfseparate.as_str(), "poppler-utils"),
            (self.pdfunite.as_str(), "poppler-utils"),
            (self.qpdf.as_str(), "qpdf"),
            (self.convert.as_str(), "imagemagick"),
            (self.identify.as_str(), "imagemagick"),
            (self.gs.as_str(), "ghostscript"),
            (self.tesseract.as_str(), "tesseract-ocr"),
            (self.pdftotext.as_str(), "poppler-utils"),
            (self.pdfimages.as_str(), "poppler-utils"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_canonical_names() {
        let tools = ToolPaths::default();
        assert_eq!(tools.pdftk, "pdftk");
        assert_eq!(tools.gs, "gs");
        assert_eq!(tools.pdfrw_rotate, "pdfrw_rotate.py");
    }

    #[test]
    fn round_trips_through_json() {
        let tools = ToolPaths {
            convert: "magick".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&tools).unwrap();
        let back: ToolPaths = serde_json::from_str(&json).unwrap();
        assert_eq!(back.convert, "magick");
        assert_eq!(back.pdftk, "pdftk");
    }
}
