use crate::errors::MatchError;

/// Extracts the text of every page in document order, trimmed.
/// Pages without extractable text contribute nothing; a document that yields
/// no text at all (scanned or image-only) is reported as `NoText`.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, MatchError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| MatchError::Pdf(e.to_string()))?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MatchError::NoText);
    }
    Ok(trimmed.to_string())
}

/// Builds a minimal one-page PDF per entry of `pages` for tests.
#[cfg(test)]
pub(crate) fn sample_pdf(pages: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let mut operations = vec![Operation::new("BT", vec![])];
        if !text.is_empty() {
            operations.extend([
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
            ]);
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
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
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_pages_in_order() {
        let pdf = sample_pdf(&["Senior Rust engineer", "Kubernetes operator"]);
        let text = extract_pdf_text(&pdf).unwrap();

        let first = text.find("Rust").unwrap();
        let second = text.find("Kubernetes").unwrap();
        assert!(first < second);
        assert_eq!(text, text.trim());
    }

    #[test]
    fn test_non_pdf_bytes_are_rejected() {
        let err = extract_pdf_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, MatchError::Pdf(_)));
    }

    #[test]
    fn test_blank_document_reports_no_text() {
        let err = extract_pdf_text(&sample_pdf(&[""])).unwrap_err();
        assert!(matches!(err, MatchError::NoText));
    }
}
