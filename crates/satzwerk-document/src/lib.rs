// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// satzwerk-document — Document operations for the Satzwerk toolchain.
//
// Provides PDF operations (split, merge, rotate, text extraction), raster
// image operations (identify, modulate, negate, first-page conversion), an
// OCR pipeline (Ghostscript rasterisation + tesseract), and a diagonal text
// watermark pipeline. Every operation builds one shell command line from a
// fixed template and hands it to `satzwerk_exec::run`; the external binaries
// do all the real work.

pub mod doctor;
pub mod image;
pub mod ocr;
pub mod pdf;
pub mod watermark;

// Re-export the primary structs so callers can use `satzwerk_document::PdfSplitter` etc.
pub use image::ImageTool;
pub use ocr::OcrEngine;
pub use pdf::merge::PdfMerger;
pub use pdf::rotate::PdfRotator;
pub use pdf::split::PdfSplitter;
pub use pdf::text::TextExtractor;
pub use watermark::Watermarker;
