// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Satzwerk — command-line front-end.
//
// Entry point. Initialises logging, parses the command line, and dispatches
// to the document operations. Output paths and extracted text go to stdout;
// diagnostics go to the log.

mod cli;

use clap::Parser;

use satzwerk_core::error::Result;
use satzwerk_core::{PageRange, TextFilter, ToolPaths};
use satzwerk_document::{
    ImageTool, OcrEngine, PdfMerger, PdfRotator, PdfSplitter, TextExtractor, Watermarker, doctor,
};

use cli::{Cli, Commands, MergeTool};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match dispatch(cli).await {
        Ok(code) if code != 0 => std::process::exit(code),
        Ok(_) => {}
        Err(err) => {
            eprintln!("satzwerk: {err}");
            std::process::exit(1);
        }
    }
}

/// Run one subcommand. Returns the process exit code.
async fn dispatch(cli: Cli) -> Result<i32> {
    let tools = ToolPaths::default();

    match cli.command {
        Commands::Split { file, page_dir } => {
            let dir = PdfSplitter::new(tools).burst(file, page_dir).await?;
            println!("{}", dir.display());
        }

        Commands::Separate { file, page_dir } => {
            let dir = PdfSplitter::new(tools).separate(file, page_dir).await?;
            println!("{}", dir.display());
        }

        Commands::Images { file, image_dir } => {
            let dir = PdfSplitter::new(tools).extract_images(file, image_dir).await?;
            println!("{}", dir.display());
        }

        Commands::Merge {
            dir,
            inputs,
            out,
            tool,
        } => {
            let merger = PdfMerger::new(tools);
            let merged = match tool {
                MergeTool::Pdftk => merger.concat(dir, &inputs, out).await?,
                MergeTool::Pdfunite => merger.unite(dir, &inputs, out).await?,
                MergeTool::Qpdf => merger.unite_with_qpdf(dir, &inputs, out).await?,
            };
            println!("{}", merged.display());
        }

        Commands::Rotate {
            dir,
            in_file,
            out_file,
            direction,
            with_pdfrw,
        } => {
            let rotator = PdfRotator::new(tools);
            let rotated = if with_pdfrw {
                rotator
                    .rotate_with_pdfrw(dir, &in_file, &out_file, direction.0)
                    .await?
            } else {
                rotator.rotate(dir, &in_file, &out_file, direction.0).await?
            };
            println!("{}", rotated.display());
        }

        Commands::Words {
            file,
            filter,
            strip_newlines,
            first,
            last,
        } => {
            let filter = TextFilter {
                pattern: filter,
                strip_newlines,
            };
            let pages = first.zip(last).map(|(first, last)| PageRange { first, last });
            let words = TextExtractor::new(tools).words(file, &filter, pages).await?;
            print!("{words}");
        }

        Commands::Rasterize { file, out } => {
            let image = OcrEngine::new(tools).prepare(file, out).await?;
            println!("{}", image.display());
        }

        Commands::Ocr {
            file,
            image,
            filter,
            strip_newlines,
        } => {
            let filter = TextFilter {
                pattern: filter,
                strip_newlines,
            };
            let engine = OcrEngine::new(tools);
            let text = if image {
                engine.recognise_image(file, &filter).await?
            } else {
                engine.recognise_pdf(file, &filter).await?
            };
            print!("{text}");
        }

        Commands::ToImage {
            dir,
            in_file,
            out_file,
            options,
        } => {
            let image = ImageTool::new(tools)
                .pdf_to_image(dir, &options, &in_file, &out_file)
                .await?;
            println!("{}", image.display());
        }

        Commands::ImageToPdf { image, extension } => {
            let pdf = OcrEngine::new(tools)
                .image_to_pdf(image, extension.as_deref())
                .await?;
            println!("{}", pdf.display());
        }

        Commands::Modulate {
            dir,
            image,
            out,
            value,
        } => {
            let modulated = ImageTool::new(tools)
                .modulate(dir, &image, &out, value.as_deref())
                .await?;
            println!("{}", modulated.display());
        }

        Commands::Negate { dir, image, out } => {
            let negated = ImageTool::new(tools).negate(dir, &image, &out).await?;
            println!("{}", negated.display());
        }

        Commands::Identify { image, json } => {
            let size = ImageTool::new(tools).size(image).await?;
            if json {
                println!("{}", serde_json::to_string(&size)?);
            } else {
                println!("{size}");
            }
        }

        Commands::Watermark { file, text } => {
            let result = Watermarker::new(tools).apply(file, &text).await?;
            println!("{}", result.display());
        }

        Commands::Doctor { json } => {
            let report = doctor::check(&tools).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for tool in &report.tools {
                    let mark = if tool.available { "ok " } else { "MISSING" };
                    println!("{mark:7} {}", tool.detail);
                    if let Some(fix) = &tool.fix {
                        println!("        {fix}");
                    }
                }
                println!("{}", report.summary);
            }
            if !report.all_available() {
                return Ok(1);
            }
        }
    }

    Ok(0)
}
