//! PDF extraction tests against small documents generated with lopdf

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use rex_parser::{extract_text, DocumentParser, ParserError, PdfParser};

/// Write a PDF with one page per entry; each page holds the given lines
fn write_pdf(path: &Path, pages: &[&[&str]]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 780 - (i as i64) * 20;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![50.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).unwrap();
}

fn temp_pdf(dir: &tempfile::TempDir, name: &str, pages: &[&[&str]]) -> PathBuf {
    let path = dir.path().join(name);
    write_pdf(&path, pages);
    path
}

#[test]
fn test_single_page_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_pdf(
        &dir,
        "jane.pdf",
        &[&["Name: Jane Doe", "Address: 12 Elm St"]],
    );

    let text = extract_text(&path).unwrap();
    assert!(text.contains("Name: Jane Doe"));
    assert!(text.contains("Address: 12 Elm St"));
}

#[test]
fn test_pages_concatenated_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_pdf(
        &dir,
        "two_pages.pdf",
        &[&["FIRSTPAGE summary"], &["SECONDPAGE experience"]],
    );
    let first_only = temp_pdf(&dir, "first.pdf", &[&["FIRSTPAGE summary"]]);

    let text = extract_text(&path).unwrap();
    let first = text.find("FIRSTPAGE").expect("first page text");
    let second = text.find("SECONDPAGE").expect("second page text");
    assert!(first < second);

    let single = extract_text(&first_only).unwrap();
    assert!(text.len() >= single.len());
}

#[test]
fn test_page_count_from_document() {
    let dir = tempfile::tempdir().unwrap();
    let two = temp_pdf(
        &dir,
        "two.pdf",
        &[&["Name: Jane Doe", "Address: 12 Elm St"], &["SECOND"]],
    );
    let one = temp_pdf(&dir, "one.pdf", &[&["Name: Jane Doe"]]);

    let doc = PdfParser::new().parse(&two).unwrap();
    assert_eq!(doc.page_count, Some(2));
    assert!(doc.content.contains("Name: Jane Doe"));
    assert!(doc.content.contains("SECOND"));

    let doc = PdfParser::new().parse(&one).unwrap();
    assert_eq!(doc.page_count, Some(1));
}

#[test]
fn test_document_without_text_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_pdf(&dir, "blank.pdf", &[&[]]);

    let text = extract_text(&path).unwrap();
    assert_eq!(text, "");

    let doc = PdfParser::new().parse(&path).unwrap();
    assert_eq!(doc.page_count, Some(1));
}

#[test]
fn test_parse_reports_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_pdf(&dir, "jane.pdf", &[&["Name: Jane Doe"]]);

    let doc = PdfParser::new().parse(&path).unwrap();
    assert_eq!(doc.file_path, path);
    assert!(doc.word_count() >= 3);
}

#[test]
fn test_damaged_pdf_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("damaged.pdf");
    std::fs::write(&path, b"%PDF-1.5\n%garbage with no objects and no trailer\n").unwrap();

    let err = extract_text(&path).unwrap_err();
    assert!(matches!(err, ParserError::InvalidPdf { .. }));
    assert_eq!(err.path(), path.as_path());
}
