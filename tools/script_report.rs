/// Script Report — prints the psychology and mythology analyses of a script.
///
/// Usage: script_report <script.fountain|.txt> [--json] [--export <txt|fountain>]

use screenplay_studio::core::file_io::{self, ExportArtifact, FileIo, ImportError, PdfSettings};
use screenplay_studio::core::presenter;
use screenplay_studio::schema::format::{ExportFormat, ImportFormat};
use std::io;
use std::process;

/// Reads scripts straight from disk. PDF extraction is not available here.
struct DiskIo;

impl FileIo for DiskIo {
    fn read_as_text(&self, file_name: &str) -> Result<String, ImportError> {
        std::fs::read_to_string(file_name).map_err(|e| ImportError::Read(e.to_string()))
    }

    fn read_as_pdf_pages(&self, _file_name: &str) -> Result<Vec<Vec<String>>, ImportError> {
        Err(ImportError::Read(
            "PDF text extraction needs the browser editor".to_string(),
        ))
    }

    fn download(&self, content: &str, file_name: &str, _mime_type: &str) {
        if let Err(e) = write_export(file_name, content) {
            eprintln!("Error writing '{}': {}", file_name, e);
        }
    }
}

fn write_export(file_name: &str, content: &str) -> io::Result<()> {
    std::fs::write(file_name, content)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: script_report <script.fountain|.txt> [--json] [--export <txt|fountain>]");
        process::exit(0);
    }

    let path = &args[1];
    let mut json = false;
    let mut export = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => json = true,
            "--export" if i + 1 < args.len() => {
                i += 1;
                export = match args[i].as_str() {
                    "txt" => Some(ExportFormat::Text),
                    "fountain" => Some(ExportFormat::Fountain),
                    other => {
                        eprintln!("Error: cannot export as '{}' (expected txt or fountain)", other);
                        process::exit(1);
                    }
                };
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    if let Ok(ImportFormat::Pdf) = file_io::detect_import_format(path) {
        eprintln!("Warning: PDF scripts can only be imported through the browser editor");
    }

    let text = file_io::import_text(path, &DiskIo).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if let Some(format) = export {
        if let ExportArtifact::Text {
            file_name, content, ..
        } = file_io::export(&text, format, &PdfSettings::default())
        {
            if let Err(e) = write_export(&file_name, &content) {
                eprintln!("Error writing '{}': {}", file_name, e);
                process::exit(1);
            }
            println!("Wrote {}", file_name);
        }
    }

    let psychology = presenter::analyze_psychology(&text);
    let mythology = presenter::analyze_mythology(&text);

    if json {
        let report = serde_json::json!({
            "psychology": psychology,
            "mythology": mythology,
        });
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("=== {} ===\n", path);
    println!("{}", psychology);
    println!("{}", mythology);
    println!(
        "Summary: {} character(s), {} structural beat(s)",
        psychology.profiles().len(),
        if mythology.beats_detected {
            mythology.structure_summary.split(", ").count()
        } else {
            0
        }
    );
}
