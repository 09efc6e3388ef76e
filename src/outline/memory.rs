//! 内存中的大纲树，实现宿主接口，用于测试和演示
//!
//! 节点存放在 Vec 中，句柄为下标。被 `detach` 的节点句柄失效，
//! 但其兄弟链接保留，用来模拟宿主中途释放节点的情况。

use crate::entity::Action;
use crate::error::{Error, Result};

use super::host::{AnnotationHost, OutlineHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct MemoryNode {
    title: String,
    open: bool,
    action: Option<Action>,
    flags: u32,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next: Option<NodeId>,
    detached: bool,
}

#[derive(Debug, Clone)]
struct MemoryAnnotation {
    contents: String,
    bold: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryOutline {
    nodes: Vec<MemoryNode>,
    annotations: Vec<MemoryAnnotation>,
    page_count: usize,
    /// set_action 成功替换的次数
    replaced_actions: usize,
}

impl MemoryOutline {
    /// 新建只有根节点的大纲
    pub fn new(page_count: usize) -> Self {
        Self {
            nodes: vec![MemoryNode::default()],
            annotations: Vec::new(),
            page_count,
            replaced_actions: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// 在 parent 的子节点末尾追加
    pub fn add_child(&mut self, parent: NodeId, title: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode {
            title: title.to_string(),
            ..Default::default()
        });

        match self.nodes[parent.0].last_child {
            Some(last) => self.nodes[last.0].next = Some(id),
            None => self.nodes[parent.0].first_child = Some(id),
        }
        self.nodes[parent.0].last_child = Some(id);
        id
    }

    pub fn with_open(&mut self, node: NodeId, open: bool) -> &mut Self {
        self.nodes[node.0].open = open;
        self
    }

    /// 直接挂上动作，不做页码校验（用于构造坏数据）
    pub fn with_action(&mut self, node: NodeId, action: Action) -> &mut Self {
        self.nodes[node.0].action = Some(action);
        self
    }

    pub fn with_flags(&mut self, node: NodeId, flags: u32) -> &mut Self {
        self.nodes[node.0].flags = flags;
        self
    }

    /// 使句柄失效
    pub fn detach(&mut self, node: NodeId) {
        self.nodes[node.0].detached = true;
    }

    /// 强行改写兄弟链接，用于构造带环的坏树
    pub fn link_next(&mut self, node: NodeId, next: Option<NodeId>) {
        self.nodes[node.0].next = next;
    }

    pub fn add_annotation(&mut self, contents: &str, bold: bool) -> usize {
        self.annotations.push(MemoryAnnotation {
            contents: contents.to_string(),
            bold,
        });
        self.annotations.len() - 1
    }

    /// 所有有效节点（不含根）
    pub fn nodes(&self) -> Vec<NodeId> {
        (1..self.nodes.len())
            .map(NodeId)
            .filter(|id| !self.nodes[id.0].detached)
            .collect()
    }

    pub fn replaced_actions(&self) -> usize {
        self.replaced_actions
    }
}

impl OutlineHost for MemoryOutline {
    type Node = NodeId;

    fn is_valid(&self, node: NodeId) -> bool {
        self.nodes.get(node.0).is_some_and(|n| !n.detached)
    }

    fn is_open(&self, node: NodeId) -> bool {
        self.nodes[node.0].open
    }

    fn set_open(&mut self, node: NodeId, open: bool) -> Result<()> {
        self.nodes[node.0].open = open;
        Ok(())
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.first_child
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.next
    }

    fn title(&self, node: NodeId) -> String {
        self.nodes[node.0].title.clone()
    }

    fn set_title(&mut self, node: NodeId, title: &str) -> Result<()> {
        self.nodes[node.0].title = title.to_string();
        Ok(())
    }

    fn action(&self, node: NodeId) -> Option<Action> {
        self.nodes[node.0].action.clone()
    }

    fn set_action(&mut self, node: NodeId, action: Action) -> Result<()> {
        if let Action::GoTo(dest) = &action {
            if dest.page >= self.page_count {
                return Err(Error::Construction(format!(
                    "page index {} out of range (document has {} pages)",
                    dest.page, self.page_count
                )));
            }
        }
        self.nodes[node.0].action = Some(action);
        self.replaced_actions += 1;
        Ok(())
    }

    fn flags(&self, node: NodeId) -> u32 {
        self.nodes[node.0].flags
    }

    fn set_flags(&mut self, node: NodeId, flags: u32) -> Result<()> {
        self.nodes[node.0].flags = flags;
        Ok(())
    }
}

impl AnnotationHost for MemoryOutline {
    type Annotation = usize;

    fn text_annotations(&self) -> Vec<usize> {
        (0..self.annotations.len()).collect()
    }

    fn annotation_contents(&self, annot: usize) -> String {
        self.annotations[annot].contents.clone()
    }

    fn is_annotation_bold(&self, annot: usize) -> bool {
        self.annotations[annot].bold
    }

    fn set_annotation_bold(&mut self, annot: usize, bold: bool) -> Result<()> {
        self.annotations[annot].bold = bold;
        Ok(())
    }
}
