#![allow(dead_code)]

use std::path::Path;

use lopdf::{dictionary, Document, Object};

/// 两页文档：
///
/// ```text
/// PART ONE (open, /Dest [p0 /Fit])
///   the beginning (/Dest [p1 /FitV 72])
/// Contents (/A GoTo [p0 /XYZ null null 2])
/// ```
pub fn outline_document() -> Document {
    let mut doc = base_document(2);
    let pages: Vec<_> = doc.get_pages().into_values().collect();

    let root = doc.new_object_id();
    let part = doc.new_object_id();
    let child = doc.new_object_id();
    let contents = doc.new_object_id();

    doc.objects.insert(
        root,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => part,
            "Last" => contents,
            "Count" => 3,
        }),
    );
    doc.objects.insert(
        part,
        Object::Dictionary(dictionary! {
            "Title" => Object::string_literal("PART ONE"),
            "Parent" => root,
            "First" => child,
            "Last" => child,
            "Next" => contents,
            "Count" => 1,
            "Dest" => vec![pages[0].into(), "Fit".into()],
        }),
    );
    doc.objects.insert(
        child,
        Object::Dictionary(dictionary! {
            "Title" => Object::string_literal("the beginning"),
            "Parent" => part,
            "Dest" => vec![pages[1].into(), "FitV".into(), 72.into()],
        }),
    );
    doc.objects.insert(
        contents,
        Object::Dictionary(dictionary! {
            "Title" => Object::string_literal("Contents"),
            "Parent" => root,
            "Prev" => part,
            "A" => dictionary! {
                "S" => "GoTo",
                "D" => vec![pages[0].into(), "XYZ".into(), Object::Null, Object::Null, 2.into()],
            },
        }),
    );

    let catalog_id = doc.trailer.get(b"Root").and_then(Object::as_reference).unwrap();
    doc.get_dictionary_mut(catalog_id).unwrap().set("Outlines", root);
    doc
}

/// 没有大纲的文档
pub fn base_document(page_count: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..page_count)
        .map(|_| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            })
            .into()
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

pub fn write(mut doc: Document, path: &Path) {
    doc.save(path).expect("failed to write test PDF");
}
