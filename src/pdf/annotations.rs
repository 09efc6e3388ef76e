//! FreeText 注释的粗体状态
//!
//! 粗体由默认样式字符串 `/DS` 中的 `font-weight` 决定。

use lazy_static::lazy_static;
use lopdf::{Object, ObjectId};
use regex::Regex;

use crate::error::{Error, Result};
use crate::outline::AnnotationHost;
use crate::pdf::utils::{decode_text_string, encode_text_string};
use crate::pdf::PdfDocument;

lazy_static! {
    static ref FONT_WEIGHT: Regex = Regex::new(r"(?i)font-weight\s*:\s*([a-z0-9]+)").unwrap();
}

fn style_is_bold(style: &str) -> bool {
    FONT_WEIGHT
        .captures(style)
        .map(|c| {
            let weight = c[1].to_ascii_lowercase();
            weight == "bold" || weight == "bolder" || weight.parse::<u32>().is_ok_and(|w| w >= 600)
        })
        .unwrap_or(false)
}

fn style_with_weight(style: &str, bold: bool) -> String {
    let weight = if bold { "font-weight:bold" } else { "font-weight:normal" };
    if FONT_WEIGHT.is_match(style) {
        return FONT_WEIGHT.replace(style, weight).into_owned();
    }
    let trimmed = style.trim().trim_end_matches(';');
    if trimmed.is_empty() {
        weight.to_string()
    } else {
        format!("{}; {}", trimmed, weight)
    }
}

impl PdfDocument {
    fn annotation_text(&self, annot: ObjectId, key: &[u8]) -> String {
        self.dict(annot)
            .and_then(|d| d.get(key).ok())
            .and_then(|v| decode_text_string(self.resolve(v)))
            .unwrap_or_default()
    }
}

impl AnnotationHost for PdfDocument {
    type Annotation = ObjectId;

    /// 按页序收集所有间接引用的 FreeText 注释
    fn text_annotations(&self) -> Vec<ObjectId> {
        let mut result = Vec::new();
        for page_id in self.page_ids() {
            let Some(annots) = self
                .dict(*page_id)
                .and_then(|page| page.get(b"Annots").ok())
                .and_then(|a| self.resolve(a).as_array().ok())
            else {
                continue;
            };
            for annot in annots {
                let Object::Reference(id) = annot else {
                    continue;
                };
                let is_free_text = self
                    .dict(*id)
                    .and_then(|d| d.get(b"Subtype").ok())
                    .and_then(|s| s.as_name().ok())
                    .is_some_and(|s| s == b"FreeText");
                if is_free_text && !result.contains(id) {
                    result.push(*id);
                }
            }
        }
        result
    }

    fn annotation_contents(&self, annot: ObjectId) -> String {
        self.annotation_text(annot, b"Contents")
    }

    fn is_annotation_bold(&self, annot: ObjectId) -> bool {
        style_is_bold(&self.annotation_text(annot, b"DS"))
    }

    fn set_annotation_bold(&mut self, annot: ObjectId, bold: bool) -> Result<()> {
        let style = style_with_weight(&self.annotation_text(annot, b"DS"), bold);
        let dict = self
            .document
            .get_dictionary_mut(annot)
            .map_err(|_| Error::InvalidNode(format!("{:?}", annot)))?;
        dict.set("DS", encode_text_string(&style));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::fix_annotations;
    use crate::pdf::fixtures::sample_document;
    use crate::text::TocMatcher;

    #[test]
    fn test_text_annotations_in_page_order() {
        let (doc, ids) = sample_document();
        let pdf = PdfDocument::from_document(doc);
        assert_eq!(pdf.text_annotations(), vec![ids.toc_note, ids.plain_note, ids.bold_note]);
        assert_eq!(pdf.annotation_contents(ids.toc_note), "Inhalt");
        assert!(!pdf.is_annotation_bold(ids.toc_note));
        assert!(pdf.is_annotation_bold(ids.bold_note));
    }

    #[test]
    fn test_fix_annotations_on_pdf() {
        let (doc, ids) = sample_document();
        let mut pdf = PdfDocument::from_document(doc);
        let toc = TocMatcher::default();

        assert_eq!(fix_annotations(&mut pdf, &toc), 1);
        assert!(pdf.is_annotation_bold(ids.toc_note));
        assert!(!pdf.is_annotation_bold(ids.plain_note));
        assert_eq!(pdf.annotation_text(ids.toc_note, b"DS"), "font: 12pt Helvetica; font-weight:bold");
        assert_eq!(fix_annotations(&mut pdf, &toc), 0);
    }

    #[test]
    fn test_set_annotation_bold_off() {
        let (doc, ids) = sample_document();
        let mut pdf = PdfDocument::from_document(doc);
        pdf.set_annotation_bold(ids.bold_note, false).unwrap();
        assert!(!pdf.is_annotation_bold(ids.bold_note));
        assert!(pdf.set_annotation_bold((9999, 0), true).is_err());
    }

    #[test]
    fn test_style_is_bold() {
        assert!(style_is_bold("font: 12pt Helvetica; font-weight:bold"));
        assert!(style_is_bold("FONT-WEIGHT : 700"));
        assert!(!style_is_bold("font-weight:normal"));
        assert!(!style_is_bold("font: 12pt Helvetica"));
        assert!(!style_is_bold(""));
    }

    #[test]
    fn test_style_with_weight() {
        assert_eq!(style_with_weight("", true), "font-weight:bold");
        assert_eq!(style_with_weight("font: 12pt Helvetica;", true), "font: 12pt Helvetica; font-weight:bold");
        assert_eq!(style_with_weight("font-weight:normal; color:#000", true), "font-weight:bold; color:#000");
        assert_eq!(style_with_weight("font-weight:bold", false), "font-weight:normal");
    }
}
