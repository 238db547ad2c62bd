//! Render barcodes from markup to PDF
//!
//! Reads every `<barCode>` element of an XML document and draws it on a
//! single page. The element's text content is the encoded value.
//!
//! Usage:
//!   cargo run --release --bin render_barcodes -- labels.xml
//!   cargo run --release --bin render_barcodes -- labels.xml --output labels.pdf --page-size letter
//!   cargo run --release --bin render_barcodes -- labels.xml --json

use pdf_barcode::drawing::Drawing;
use pdf_barcode::elements::XmlElement;
use pdf_barcode::flowable::{BarcodeFlowable, Flowable};
use pdf_barcode::writer::{boundary_flag, Canvas, PageSize, PdfWriter, PdfWriterConfig};
use pdf_barcode::{RenderContext, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

struct RenderConfig {
    input: PathBuf,
    output: PathBuf,
    page_size: PageSize,
    json: bool,
    verbose: bool,
}

impl RenderConfig {
    fn from_args() -> std::result::Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut output = None;
        let mut page_size = PageSize::A4;
        let mut json = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    i += 1;
                    let path = args.get(i).ok_or("--output needs a path")?;
                    output = Some(PathBuf::from(path));
                },
                "--page-size" => {
                    i += 1;
                    let size = args.get(i).ok_or("--page-size needs a value")?;
                    page_size = size.parse().map_err(|e| format!("{}", e))?;
                },
                "--json" => json = true,
                "--verbose" | "-v" => verbose = true,
                arg if arg.starts_with('-') => return Err(format!("unknown option {}", arg)),
                arg => input = Some(PathBuf::from(arg)),
            }
            i += 1;
        }

        let input = input.ok_or("missing input file")?;
        let output = output.unwrap_or_else(|| input.with_extension("pdf"));
        Ok(Self {
            input,
            output,
            page_size,
            json,
            verbose,
        })
    }
}

/// A drawing as placed on the page.
#[derive(Serialize)]
struct Placed {
    x: f32,
    y: f32,
    show_boundary: bool,
    drawing: Drawing,
}

/// Canvas that keeps drawings for JSON output.
#[derive(Default)]
struct JsonCanvas {
    placed: Vec<Placed>,
}

impl Canvas for JsonCanvas {
    fn draw(&mut self, drawing: &Drawing, x: f32, y: f32, show_boundary: &str) -> Result<()> {
        self.placed.push(Placed {
            x,
            y,
            show_boundary: boundary_flag(show_boundary),
            drawing: drawing.clone(),
        });
        Ok(())
    }
}

/// Draw every element, returning the number that failed.
fn draw_all(elements: Vec<XmlElement>, canvas: &mut dyn Canvas, ctx: &RenderContext, verbose: bool) -> usize {
    let mut failed = 0;

    for (index, node) in elements.into_iter().enumerate() {
        let value = node.text().to_string();
        let result = BarcodeFlowable::new(node, value, ctx).and_then(|barcode| {
            if verbose {
                let (width, height) = barcode.wrap(0.0, 0.0);
                println!(
                    "  [{}] {} '{}' at ({:.1}, {:.1}) {:.1}x{:.1}",
                    index,
                    barcode.code_name(),
                    barcode.value(),
                    barcode.position().x,
                    barcode.position().y,
                    width,
                    height
                );
            }
            barcode.draw(canvas, ctx)
        });

        if let Err(e) = result {
            log::warn!("Skipping barcode #{}: {}", index, e);
            eprintln!("barcode #{}: {}", index, e);
            failed += 1;
        }
    }

    failed
}

fn main() -> ExitCode {
    env_logger::init();

    let config = match RenderConfig::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!(
                "Usage: render_barcodes <input.xml> [--output out.pdf] [--page-size a4|letter] [--json] [--verbose]"
            );
            return ExitCode::from(2);
        },
    };

    let xml = match std::fs::read_to_string(&config.input) {
        Ok(xml) => xml,
        Err(e) => {
            eprintln!("Error reading {}: {}", config.input.display(), e);
            return ExitCode::FAILURE;
        },
    };
    let elements = match XmlElement::find_all(&xml, "barCode") {
        Ok(elements) => elements,
        Err(e) => {
            eprintln!("Error parsing {}: {}", config.input.display(), e);
            return ExitCode::FAILURE;
        },
    };
    let total = elements.len();
    if config.verbose {
        println!("Found {} barcodes in {}", total, config.input.display());
    }

    let ctx = RenderContext::new();

    let failed = if config.json {
        let mut canvas = JsonCanvas::default();
        let failed = draw_all(elements, &mut canvas, &ctx, config.verbose);
        match serde_json::to_string_pretty(&canvas.placed) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing drawings: {}", e);
                return ExitCode::FAILURE;
            },
        }
        failed
    } else {
        let title = config
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let mut writer = PdfWriter::with_config(PdfWriterConfig::default().with_title(title));
        let mut page = writer.add_sized_page(config.page_size);
        let failed = draw_all(elements, &mut page, &ctx, config.verbose);
        page.finish();

        if let Err(e) = writer.save(&config.output) {
            eprintln!("Error writing {}: {}", config.output.display(), e);
            return ExitCode::FAILURE;
        }
        if config.verbose {
            println!("Wrote {}", config.output.display());
        }
        failed
    };

    if failed > 0 {
        eprintln!("{} of {} barcodes failed", failed, total);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
