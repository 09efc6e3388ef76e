//! 测试用文档：三页，带大纲、命名目标和 FreeText 注释
//!
//! ```text
//! Outlines
//!  ├── CHAPTER ONE (open, /Dest [p0 /Fit])
//!  │    └── the first section (/A GoTo [p1 /XYZ 0 700 1.5])
//!  ├── Contents (/Dest (toc) -> [p2 /FitH 500])
//!  └── web link (/A URI)
//! ```

use lopdf::{dictionary, Document, Object, ObjectId};

#[allow(dead_code)]
pub(crate) struct SampleIds {
    pub root: ObjectId,
    pub pages: Vec<ObjectId>,
    pub chapter: ObjectId,
    pub section: ObjectId,
    pub contents: ObjectId,
    pub link: ObjectId,
    /// FreeText "Inhalt"，未加粗
    pub toc_note: ObjectId,
    /// FreeText "Note"
    pub plain_note: ObjectId,
    /// FreeText "CONTENTS"，已加粗
    pub bold_note: ObjectId,
}

pub(crate) fn sample_document() -> (Document, SampleIds) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let toc_note = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "FreeText",
        "Rect" => vec![50.into(), 700.into(), 300.into(), 750.into()],
        "Contents" => Object::string_literal("Inhalt"),
        "DS" => Object::string_literal("font: 12pt Helvetica"),
    });
    let plain_note = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "FreeText",
        "Rect" => vec![50.into(), 600.into(), 300.into(), 650.into()],
        "Contents" => Object::string_literal("Note"),
    });
    let link_annot = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        "Contents" => Object::string_literal("Contents"),
    });
    let bold_note = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "FreeText",
        "Rect" => vec![50.into(), 700.into(), 300.into(), 750.into()],
        "Contents" => Object::string_literal("CONTENTS"),
        "DS" => Object::string_literal("font-weight:bold"),
    });

    let mut pages = Vec::new();
    for i in 0..3 {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        let annots: Vec<Object> = match i {
            0 => vec![toc_note.into(), plain_note.into(), link_annot.into()],
            1 => vec![bold_note.into()],
            _ => Vec::new(),
        };
        if !annots.is_empty() {
            page.set("Annots", annots);
        }
        pages.push(doc.add_object(page));
    }
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => pages.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => 3,
        }),
    );

    let root = doc.new_object_id();
    let chapter = doc.new_object_id();
    let section = doc.new_object_id();
    let contents = doc.new_object_id();
    let link = doc.new_object_id();

    doc.objects.insert(
        root,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => chapter,
            "Last" => link,
            "Count" => 4,
        }),
    );
    doc.objects.insert(
        chapter,
        Object::Dictionary(dictionary! {
            "Title" => Object::string_literal("CHAPTER ONE"),
            "Parent" => root,
            "First" => section,
            "Last" => section,
            "Next" => contents,
            "Count" => 1,
            "Dest" => vec![pages[0].into(), "Fit".into()],
        }),
    );
    doc.objects.insert(
        section,
        Object::Dictionary(dictionary! {
            "Title" => Object::string_literal("the first section"),
            "Parent" => chapter,
            "A" => dictionary! {
                "S" => "GoTo",
                "D" => vec![pages[1].into(), "XYZ".into(), 0.into(), 700.into(), Object::Real(1.5)],
            },
        }),
    );
    doc.objects.insert(
        contents,
        Object::Dictionary(dictionary! {
            "Title" => Object::string_literal("Contents"),
            "Parent" => root,
            "Prev" => chapter,
            "Next" => link,
            "Dest" => Object::string_literal("toc"),
        }),
    );
    doc.objects.insert(
        link,
        Object::Dictionary(dictionary! {
            "Title" => Object::string_literal("web link"),
            "Parent" => root,
            "Prev" => contents,
            "A" => dictionary! {
                "S" => "URI",
                "URI" => Object::string_literal("https://example.com"),
            },
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "Outlines" => root,
        "Names" => dictionary! {
            "Dests" => dictionary! {
                "Names" => vec![
                    Object::string_literal("toc"),
                    Object::Array(vec![pages[2].into(), "FitH".into(), 500.into()]),
                ],
            },
        },
    });
    doc.trailer.set("Root", catalog_id);

    let ids = SampleIds {
        root,
        pages,
        chapter,
        section,
        contents,
        link,
        toc_note,
        plain_note,
        bold_note,
    };
    (doc, ids)
}
