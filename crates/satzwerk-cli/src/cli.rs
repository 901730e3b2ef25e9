// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use satzwerk_core::Direction;

/// Split, merge, rotate, rasterise, OCR, and watermark PDF documents by
/// orchestrating the installed toolchain (pdftk, qpdf, poppler,
/// ImageMagick, Ghostscript, tesseract).
#[derive(Debug, Parser)]
#[command(name = "satzwerk", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Merge back-end selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MergeTool {
    Pdftk,
    Pdfunite,
    Qpdf,
}

/// Rotation direction argument (`right`/`left` accepted as aliases).
#[derive(Debug, Clone, Copy)]
pub struct DirectionArg(pub Direction);

pub fn parse_direction(s: &str) -> Result<DirectionArg, String> {
    Direction::parse(s)
        .map(DirectionArg)
        .ok_or_else(|| format!("unknown direction `{s}` (expected east/west/south)"))
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split a PDF into per-page files with pdftk burst
    Split {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory to write page files into
        #[arg(value_name = "PAGE_DIR")]
        page_dir: PathBuf,
    },

    /// Split a PDF into per-page files with pdfseparate
    Separate {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory to write page files into
        #[arg(value_name = "PAGE_DIR")]
        page_dir: PathBuf,
    },

    /// Extract the images embedded in a PDF with pdfimages
    Images {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory to write image files into
        #[arg(value_name = "IMAGE_DIR")]
        image_dir: PathBuf,
    },

    /// Concatenate PDF documents into one
    Merge {
        /// Working directory the input names are relative to
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Input file names, in order
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<String>,

        /// Output file path
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Merge back-end
        #[arg(long, value_enum, default_value_t = MergeTool::Pdftk)]
        tool: MergeTool,
    },

    /// Rotate every page of a document
    Rotate {
        /// Working directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Input file name, relative to DIR
        #[arg(value_name = "IN_FILE")]
        in_file: String,

        /// Output file name, relative to DIR
        #[arg(value_name = "OUT_FILE")]
        out_file: String,

        /// east (90° CW), west (90° CCW), or south (180°)
        #[arg(value_name = "DIRECTION", value_parser = parse_direction)]
        direction: DirectionArg,

        /// Use the pdfrw helper script instead of pdftk
        #[arg(long)]
        with_pdfrw: bool,
    },

    /// Extract the text layer of a PDF
    Words {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Keep only substrings matching this extended regex
        #[arg(long, value_name = "REGEX")]
        filter: Option<String>,

        /// Collapse the output onto a single line
        #[arg(long)]
        strip_newlines: bool,

        /// First page to extract (requires --last)
        #[arg(long, requires = "last")]
        first: Option<u32>,

        /// Last page to extract (requires --first)
        #[arg(long, requires = "first")]
        last: Option<u32>,
    },

    /// Rasterise page 1 of a PDF for OCR (Ghostscript, 300 dpi)
    Rasterize {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output image path (default: the PDF path with .png appended)
        #[arg(long, value_name = "IMAGE")]
        out: Option<PathBuf>,
    },

    /// Recognise text in a PDF (or, with --image, an image) via tesseract
    Ocr {
        /// Path to the PDF or image file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Treat FILE as an image and skip rasterisation
        #[arg(long)]
        image: bool,

        /// Keep only substrings matching this extended regex
        #[arg(long, value_name = "REGEX")]
        filter: Option<String>,

        /// Collapse the output onto a single line
        #[arg(long)]
        strip_newlines: bool,
    },

    /// Convert the first page of a document to an image
    ToImage {
        /// Working directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Input file name, relative to DIR
        #[arg(value_name = "IN_FILE")]
        in_file: String,

        /// Output file name, relative to DIR
        #[arg(value_name = "OUT_FILE")]
        out_file: String,

        /// Extra convert options, passed through verbatim
        #[arg(long, value_name = "OPTS", default_value = "")]
        options: String,
    },

    /// Re-typeset an image as a searchable PDF via tesseract
    ImageToPdf {
        /// Path to the image file
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Extension to strip when deriving the output name
        #[arg(long, value_name = "EXT")]
        extension: Option<String>,
    },

    /// Adjust image brightness/saturation/hue with convert -modulate
    Modulate {
        /// Working directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Input image name, relative to DIR
        #[arg(value_name = "IMAGE")]
        image: String,

        /// Output image name, relative to DIR
        #[arg(value_name = "OUT")]
        out: String,

        /// Modulation value or triple (default 115)
        #[arg(long, value_name = "VALUE")]
        value: Option<String>,
    },

    /// Invert image colours with convert -negate
    Negate {
        /// Working directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Input image name, relative to DIR
        #[arg(value_name = "IMAGE")]
        image: String,

        /// Output image name, relative to DIR
        #[arg(value_name = "OUT")]
        out: String,
    },

    /// Print the pixel size of an image
    Identify {
        /// Path to the image file
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Emit JSON instead of WxH
        #[arg(long)]
        json: bool,
    },

    /// Stamp a diagonal text watermark over every page of a PDF
    Watermark {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Watermark text
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Check that the external toolchain is installed
    Doctor {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn direction_argument_accepts_aliases() {
        assert!(matches!(parse_direction("right"), Ok(DirectionArg(Direction::East))));
        assert!(parse_direction("up").is_err());
    }

    #[test]
    fn merge_defaults_to_pdftk() {
        let cli = Cli::try_parse_from([
            "satzwerk", "merge", "/work", "a.pdf", "b.pdf", "--out", "/work/out.pdf",
        ])
        .unwrap();
        match cli.command {
            Commands::Merge { tool, inputs, .. } => {
                assert_eq!(tool, MergeTool::Pdftk);
                assert_eq!(inputs, vec!["a.pdf", "b.pdf"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn words_page_range_flags_require_each_other() {
        assert!(
            Cli::try_parse_from(["satzwerk", "words", "doc.pdf", "--first", "1"]).is_err()
        );
        assert!(
            Cli::try_parse_from(["satzwerk", "words", "doc.pdf", "--first", "1", "--last", "3"])
                .is_ok()
        );
    }
}
