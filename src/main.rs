use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use wordml_from_html::{docx, HtmlConverter, Numbering};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input HTML fragment file.
    #[arg(long)]
    html_file: PathBuf,

    /// Output .docx path.
    #[arg(long)]
    out: PathBuf,
}

fn write_docx(out_path: &PathBuf, document_xml: &str, numbering_xml: &str) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(out_path).with_context(|| format!("create {}", out_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", opt)?;
    zip.write_all(docx::content_types_xml().as_bytes())?;

    zip.start_file("_rels/.rels", opt)?;
    zip.write_all(docx::rels_xml().as_bytes())?;

    zip.start_file("word/document.xml", opt)?;
    zip.write_all(document_xml.as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", opt)?;
    zip.write_all(docx::document_rels_xml().as_bytes())?;

    zip.start_file("word/styles.xml", opt)?;
    zip.write_all(docx::styles_xml().as_bytes())?;

    zip.start_file("word/numbering.xml", opt)?;
    zip.write_all(numbering_xml.as_bytes())?;

    zip.finish()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut html = String::new();
    File::open(&args.html_file)
        .with_context(|| format!("open {}", args.html_file.display()))?
        .read_to_string(&mut html)
        .context("read html")?;

    let mut converter = HtmlConverter::new(Numbering::new());
    let body = converter
        .process(&html)
        .context("convert html fragment")?;

    let document_xml = docx::document_xml(&body);
    let numbering_xml = docx::numbering_xml(converter.registry().definitions());
    write_docx(&args.out, &document_xml, &numbering_xml)?;
    Ok(())
}
