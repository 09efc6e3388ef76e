use log::debug;
use lopdf::{Document, Object, ObjectId, StringFormat};

/// PDFDocEncoding 中与 Latin-1 不同的码位 0x18..=0x1F
const PDF_DOC_LOW: [char; 8] = ['\u{02D8}', '\u{02C7}', '\u{02C6}', '\u{02D9}', '\u{02DD}', '\u{02DB}', '\u{02DA}', '\u{02DC}'];

/// PDFDocEncoding 0x80..=0xA0
const PDF_DOC_HIGH: [char; 33] = [
    '\u{2022}', '\u{2020}', '\u{2021}', '\u{2026}', '\u{2014}', '\u{2013}', '\u{0192}', '\u{2044}',
    '\u{2039}', '\u{203A}', '\u{2212}', '\u{2030}', '\u{201E}', '\u{201C}', '\u{201D}', '\u{2018}',
    '\u{2019}', '\u{201A}', '\u{2122}', '\u{FB01}', '\u{FB02}', '\u{0141}', '\u{0152}', '\u{0160}',
    '\u{0178}', '\u{017D}', '\u{0131}', '\u{0142}', '\u{0153}', '\u{0161}', '\u{017E}', '\u{FFFD}',
    '\u{20AC}',
];

/// 解码 PDF 文本字符串（UTF-16BE 带 BOM、UTF-8 带 BOM 或 PDFDocEncoding）
pub fn decode_text_string(object: &Object) -> Option<String> {
    let Object::String(bytes, _) = object else {
        return None;
    };

    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let pairs = utf16.chunks_exact(2);
        let odd = !pairs.remainder().is_empty();
        let units: Vec<u16> = pairs.map(|pair| u16::from_be_bytes([pair[0], pair[1]])).collect();
        let mut text = String::from_utf16_lossy(&units);
        // 奇数长度：残留字节保留为替换字符
        if odd {
            text.push(char::REPLACEMENT_CHARACTER);
        }
        return Some(text);
    }
    if let Some(utf8) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return Some(String::from_utf8_lossy(utf8).into_owned());
    }

    Some(
        bytes
            .iter()
            .map(|&b| match b {
                0x18..=0x1F => PDF_DOC_LOW[(b - 0x18) as usize],
                0x80..=0xA0 => PDF_DOC_HIGH[(b - 0x80) as usize],
                _ => b as char,
            })
            .collect(),
    )
}

/// 编码为 PDF 文本字符串：纯 ASCII 用字面量，否则 UTF-16BE
pub fn encode_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// 数值对象转 f32，null 或缺失返回 None
pub fn object_to_f32(object: Option<&Object>) -> Option<f32> {
    match object? {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

pub fn f32_or_null(value: Option<f32>) -> Object {
    match value {
        Some(v) => Object::Real(v.into()),
        None => Object::Null,
    }
}

/// 新建对象的作用域守卫
///
/// 通过 `add` 加入文档的对象在守卫被丢弃时全部移除，除非调用了 `commit`。
/// 构造替换动作的任何一步失败，文档都不会留下半成品。
pub struct PendingObjects<'a> {
    document: &'a mut Document,
    ids: Vec<ObjectId>,
    committed: bool,
}

impl<'a> PendingObjects<'a> {
    pub fn new(document: &'a mut Document) -> Self {
        Self {
            document,
            ids: Vec::new(),
            committed: false,
        }
    }

    pub fn add(&mut self, object: Object) -> ObjectId {
        let id = self.document.add_object(object);
        self.ids.push(id);
        id
    }

    pub fn document(&mut self) -> &mut Document {
        &mut *self.document
    }

    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PendingObjects<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for id in &self.ids {
            self.document.objects.remove(id);
        }
        if !self.ids.is_empty() {
            debug!("[PDF] released {} uncommitted objects", self.ids.len());
        }
    }
}
