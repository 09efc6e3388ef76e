use log::debug;
use lopdf::{Dictionary, Object, ObjectId};

use crate::entity::Action;
use crate::error::{Error, Result};
use crate::outline::OutlineHost;
use crate::pdf::utils::{encode_text_string, PendingObjects};
use crate::pdf::PdfDocument;

impl PdfDocument {
    fn node_dict_mut(&mut self, node: ObjectId) -> Result<&mut Dictionary> {
        self.document
            .get_dictionary_mut(node)
            .map_err(|_| Error::InvalidNode(format!("{:?}", node)))
    }

    fn is_root(&self, node: ObjectId) -> bool {
        self.outline_root() == Some(node)
    }

    fn action_kind(action: &Dictionary) -> String {
        action
            .get(b"S")
            .and_then(Object::as_name)
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .unwrap_or_default()
    }
}

impl OutlineHost for PdfDocument {
    type Node = ObjectId;

    fn is_valid(&self, node: ObjectId) -> bool {
        self.dict(node).is_some()
    }

    fn is_open(&self, node: ObjectId) -> bool {
        if self.is_root(node) {
            return false;
        }
        self.dict(node)
            .and_then(|d| d.get(b"Count").ok())
            .and_then(|c| c.as_i64().ok())
            .is_some_and(|c| c > 0)
    }

    /// 只改 `/Count` 的符号，保存前由 `refresh_counts` 重算准确值
    fn set_open(&mut self, node: ObjectId, open: bool) -> Result<()> {
        if self.is_root(node) {
            return Ok(());
        }
        let dict = self.node_dict_mut(node)?;
        let count = dict.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
        let magnitude = count.abs().max(1);
        dict.set("Count", if open { magnitude } else { -magnitude });
        Ok(())
    }

    fn first_child(&self, node: ObjectId) -> Option<ObjectId> {
        Self::reference(self.dict(node)?, b"First")
    }

    fn next_sibling(&self, node: ObjectId) -> Option<ObjectId> {
        Self::reference(self.dict(node)?, b"Next")
    }

    fn title(&self, node: ObjectId) -> String {
        self.dict(node).map(|d| self.title_of(d)).unwrap_or_default()
    }

    fn set_title(&mut self, node: ObjectId, title: &str) -> Result<()> {
        let dict = self.node_dict_mut(node)?;
        dict.set("Title", encode_text_string(title));
        Ok(())
    }

    fn action(&self, node: ObjectId) -> Option<Action> {
        let dict = self.dict(node)?;

        if let Ok(dest) = dict.get(b"Dest") {
            return Some(match self.resolve_destination(dest) {
                Some(dest) => Action::GoTo(dest),
                None => Action::Other("Dest".to_string()),
            });
        }

        let action = self.resolve(dict.get(b"A").ok()?).as_dict().ok()?;
        let kind = Self::action_kind(action);
        if kind != "GoTo" {
            return Some(Action::Other(kind));
        }
        match action.get(b"D").ok().and_then(|d| self.resolve_destination(d)) {
            Some(dest) => Some(Action::GoTo(dest)),
            None => Some(Action::Other(kind)),
        }
    }

    /// 新建 GoTo 动作对象并挂到条目上，移除旧的 `/Dest`。
    /// 任一步失败时新对象随守卫释放，条目不变。
    fn set_action(&mut self, node: ObjectId, action: Action) -> Result<()> {
        let Action::GoTo(dest) = action else {
            return Err(Error::Construction("only GoTo actions can be built".to_string()));
        };
        let items = self.build_dest_array(&dest).ok_or_else(|| {
            Error::Construction(format!(
                "page index {} out of range (document has {} pages)",
                dest.page,
                self.page_count()
            ))
        })?;

        let mut goto = Dictionary::new();
        goto.set("Type", Object::Name(b"Action".to_vec()));
        goto.set("S", Object::Name(b"GoTo".to_vec()));
        goto.set("D", Object::Array(items));

        let mut pending = PendingObjects::new(&mut self.document);
        let action_id = pending.add(Object::Dictionary(goto));
        let dict = pending
            .document()
            .get_dictionary_mut(node)
            .map_err(|_| Error::InvalidNode(format!("{:?}", node)))?;
        dict.remove(b"Dest");
        dict.set("A", Object::Reference(action_id));
        pending.commit();

        self.replaced += 1;
        debug!("[PDF] node {:?} now points to action {:?}", node, action_id);
        Ok(())
    }

    fn flags(&self, node: ObjectId) -> u32 {
        self.dict(node)
            .and_then(|d| d.get(b"F").ok())
            .and_then(|f| f.as_i64().ok())
            .and_then(|f| u32::try_from(f).ok())
            .unwrap_or(0)
    }

    fn set_flags(&mut self, node: ObjectId, flags: u32) -> Result<()> {
        let dict = self.node_dict_mut(node)?;
        dict.set("F", flags as i64);
        Ok(())
    }
}
