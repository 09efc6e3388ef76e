use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;

use log::{debug, info, warn};
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::entity::{DestRect, Destination, FitType};
use crate::error::Result;
use crate::pdf::utils::{decode_text_string, f32_or_null, object_to_f32};

/// 命名目标解析的最大嵌套层数
const MAX_DEST_DEPTH: usize = 8;

/// lopdf 文档的大纲宿主
///
/// 节点句柄是大纲条目字典的 `ObjectId`，根节点是目录中 `/Outlines` 指向的对象。
pub struct PdfDocument {
    pub(crate) document: Document,
    page_ids: Vec<ObjectId>,
    page_index: HashMap<ObjectId, usize>,
    outline_root: Option<ObjectId>,
    /// 被替换掉的旧动作数，保存前据此清理无引用对象
    pub(crate) replaced: usize,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("[PDF] Opening document: {:?}", path.as_ref());
        let document = Document::load(path.as_ref())?;
        Ok(Self::from_document(document))
    }

    pub fn load_mem(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_document(Document::load_mem(bytes)?))
    }

    pub fn from_document(document: Document) -> Self {
        // get_pages 的键从 1 开始
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        let page_index = page_ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let outline_root = find_outline_root(&document);
        info!(
            "[PDF] Document opened with {} pages, outline root {:?}",
            page_ids.len(),
            outline_root
        );

        Self {
            document,
            page_ids,
            page_index,
            outline_root,
            replaced: 0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn outline_root(&self) -> Option<ObjectId> {
        self.outline_root
    }

    pub fn inner(&self) -> &Document {
        &self.document
    }

    pub(crate) fn page_id(&self, index: usize) -> Option<ObjectId> {
        self.page_ids.get(index).copied()
    }

    pub(crate) fn page_ids(&self) -> &[ObjectId] {
        &self.page_ids
    }

    pub(crate) fn dict(&self, id: ObjectId) -> Option<&Dictionary> {
        self.document.get_dictionary(id).ok()
    }

    /// 解引用：间接对象取实际对象，失败时原样返回
    pub(crate) fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self.document.get_object(*id).unwrap_or(object),
            _ => object,
        }
    }

    pub(crate) fn reference(dict: &Dictionary, key: &[u8]) -> Option<ObjectId> {
        dict.get(key).ok()?.as_reference().ok()
    }

    /// 把 `/Dest` 或 GoTo 动作的 `/D` 解析为目标，支持命名目标
    pub(crate) fn resolve_destination(&self, object: &Object) -> Option<Destination> {
        self.resolve_destination_at(object, 0)
    }

    fn resolve_destination_at(&self, object: &Object, depth: usize) -> Option<Destination> {
        if depth > MAX_DEST_DEPTH {
            return None;
        }
        match self.resolve(object) {
            Object::Array(items) => self.parse_dest_array(items),
            Object::Dictionary(dict) => self.resolve_destination_at(dict.get(b"D").ok()?, depth + 1),
            Object::Name(name) => {
                let target = self.lookup_named_dest(name)?;
                self.resolve_destination_at(&target, depth + 1)
            }
            Object::String(name, _) => {
                let target = self.lookup_named_dest(name)?;
                self.resolve_destination_at(&target, depth + 1)
            }
            _ => None,
        }
    }

    /// 显式目标数组：`[page /XYZ left top zoom]` 等
    fn parse_dest_array(&self, items: &[Object]) -> Option<Destination> {
        let page = match items.first()? {
            Object::Reference(id) => *self.page_index.get(id)?,
            Object::Integer(n) if *n >= 0 => *n as usize,
            _ => return None,
        };
        let fit = FitType::from_name(items.get(1)?.as_name().ok()?)?;
        let num = |i: usize| object_to_f32(items.get(i));

        let mut dest = Destination::new(page, fit);
        match fit {
            FitType::Xyz => {
                dest.rect = DestRect::new(num(2), num(3), None, None);
                // 0 与 null 同义
                dest.zoom = num(4).filter(|z| *z != 0.0);
            }
            FitType::FitH | FitType::FitBH => dest.rect.top = num(2),
            FitType::FitV | FitType::FitBV => dest.rect.left = num(2),
            FitType::FitR => dest.rect = DestRect::new(num(2), num(5), num(4), num(3)),
            FitType::Fit | FitType::FitB => {}
        }
        Some(dest)
    }

    /// 构造显式目标数组，页码不存在时返回 None
    pub(crate) fn build_dest_array(&self, dest: &Destination) -> Option<Vec<Object>> {
        let page_id = self.page_id(dest.page)?;
        let mut items = vec![Object::Reference(page_id), Object::Name(dest.fit.name().as_bytes().to_vec())];
        let rect = dest.rect;
        match dest.fit {
            FitType::Xyz => {
                items.push(f32_or_null(rect.left));
                items.push(f32_or_null(rect.top));
                items.push(f32_or_null(dest.zoom));
            }
            FitType::FitH | FitType::FitBH => items.push(f32_or_null(rect.top)),
            FitType::FitV | FitType::FitBV => items.push(f32_or_null(rect.left)),
            FitType::FitR => {
                items.push(f32_or_null(rect.left));
                items.push(f32_or_null(rect.bottom));
                items.push(f32_or_null(rect.right));
                items.push(f32_or_null(rect.top));
            }
            FitType::Fit | FitType::FitB => {}
        }
        Some(items)
    }

    /// 在目录 `/Dests` 字典和 `/Names /Dests` 名称树中查找
    fn lookup_named_dest(&self, name: &[u8]) -> Option<Object> {
        let catalog = self.catalog()?;

        if let Some(dests) = catalog.get(b"Dests").ok().and_then(|d| self.resolve(d).as_dict().ok()) {
            if let Ok(target) = dests.get(name) {
                return Some(target.clone());
            }
        }

        let names = self.resolve(catalog.get(b"Names").ok()?).as_dict().ok()?;
        let tree = self.resolve(names.get(b"Dests").ok()?).as_dict().ok()?;
        let mut seen = HashSet::new();
        self.search_name_tree(tree, name, &mut seen)
    }

    fn search_name_tree(&self, node: &Dictionary, name: &[u8], seen: &mut HashSet<ObjectId>) -> Option<Object> {
        if let Ok(names) = node.get(b"Names").and_then(|n| self.resolve(n).as_array()) {
            for pair in names.chunks(2) {
                if let [Object::String(key, _), value] = pair {
                    if key.as_slice() == name {
                        return Some(value.clone());
                    }
                }
            }
        }

        let kids = self.resolve(node.get(b"Kids").ok()?).as_array().ok()?;
        for kid in kids {
            if let Object::Reference(id) = kid {
                if !seen.insert(*id) {
                    continue;
                }
            }
            if let Ok(dict) = self.resolve(kid).as_dict() {
                if let Some(found) = self.search_name_tree(dict, name, seen) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn catalog(&self) -> Option<&Dictionary> {
        let root = self.document.trailer.get(b"Root").ok()?;
        self.resolve(root).as_dict().ok()
    }

    pub(crate) fn title_of(&self, dict: &Dictionary) -> String {
        dict.get(b"Title")
            .ok()
            .and_then(|t| decode_text_string(self.resolve(t)))
            .unwrap_or_default()
    }

    /// 按各条目的展开状态重算 `/Count`
    ///
    /// 展开的条目为正（可见后代数），折叠的为负，没有子节点的删除 `/Count`，
    /// 根节点为可见条目总数。
    pub fn refresh_counts(&mut self) {
        let Some(root) = self.outline_root else {
            return;
        };
        let (visible, counts) = self.visible_counts(root);

        for (id, count) in counts {
            if let Ok(dict) = self.document.get_dictionary_mut(id) {
                match count {
                    0 => {
                        dict.remove(b"Count");
                    }
                    n => dict.set("Count", n),
                }
            }
        }
        if let Ok(dict) = self.document.get_dictionary_mut(root) {
            dict.set("Count", visible);
        }
    }

    /// 返回根下可见条目总数，以及每个条目应有的 `/Count`
    fn visible_counts(&self, root: ObjectId) -> (i64, Vec<(ObjectId, i64)>) {
        // 先序展开成扁平列表（父条目总在子条目之前），再倒序累加
        struct Entry {
            id: ObjectId,
            parent: Option<usize>,
            open: bool,
        }

        let mut seen = HashSet::new();
        let mut entries: Vec<Entry> = Vec::new();
        let mut stack: Vec<(ObjectId, Option<usize>)> =
            self.outline_children(root, &mut seen).into_iter().rev().map(|id| (id, None)).collect();

        while let Some((id, parent)) = stack.pop() {
            let open = self
                .dict(id)
                .and_then(|d| d.get(b"Count").ok())
                .and_then(|c| c.as_i64().ok())
                .is_some_and(|c| c > 0);
            let index = entries.len();
            entries.push(Entry { id, parent, open });
            let children = self.outline_children(id, &mut seen);
            stack.extend(children.into_iter().rev().map(|child| (child, Some(index))));
        }

        let mut descendants = vec![0i64; entries.len()];
        let mut visible = 0;
        for (index, entry) in entries.iter().enumerate().rev() {
            let shown = 1 + if entry.open { descendants[index] } else { 0 };
            match entry.parent {
                Some(parent) => descendants[parent] += shown,
                None => visible += shown,
            }
        }

        let counts = entries
            .iter()
            .zip(descendants)
            .map(|(entry, n)| (entry.id, if entry.open { n } else { -n }))
            .collect();
        (visible, counts)
    }

    /// `/First` 起沿 `/Next` 的子条目，跳过已见过的对象
    fn outline_children(&self, node: ObjectId, seen: &mut HashSet<ObjectId>) -> Vec<ObjectId> {
        let mut children = Vec::new();
        let mut child = self.dict(node).and_then(|d| Self::reference(d, b"First"));
        while let Some(id) = child {
            if self.dict(id).is_none() || !seen.insert(id) {
                break;
            }
            children.push(id);
            child = self.dict(id).and_then(|d| Self::reference(d, b"Next"));
        }
        children
    }

    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.prepare_for_save();
        self.document.save(path.as_ref())?;
        info!("[PDF] Saved document: {:?}", path.as_ref());
        Ok(())
    }

    pub fn save_to<W: Write>(&mut self, target: &mut W) -> Result<()> {
        self.prepare_for_save();
        self.document.save_to(target)?;
        Ok(())
    }

    fn prepare_for_save(&mut self) {
        self.refresh_counts();
        if self.replaced > 0 {
            let pruned = self.document.prune_objects();
            debug!("[PDF] pruned {} unreferenced objects", pruned.len());
            self.replaced = 0;
        }
    }
}

fn find_outline_root(document: &Document) -> Option<ObjectId> {
    let catalog = document.catalog().ok()?;
    match catalog.get(b"Outlines").ok()? {
        Object::Reference(id) => Some(*id),
        _ => {
            warn!("[PDF] /Outlines is not an indirect object, ignoring outline");
            None
        }
    }
}
