//! 大纲树遍历
//!
//! 先序深度优先：先处理当前节点，再按兄弟顺序递归子节点。
//! 每种模式只是不同的节点访问函数，计数器在递归中累加，
//! 最终值是实际被修改的节点数，而不是访问过的节点数。

use std::collections::HashSet;

use log::{debug, warn};

use crate::entity::{Action, OutlineItem, FLAG_BOLD};
use crate::error::Result;
use crate::text::{TitleCaser, TocMatcher};

use super::host::{AnnotationHost, OutlineHost};

/// 遍历模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    Collapse,
    FixDestinations,
    Capitalize,
}

/// Walk the subtree under `root`, calling `visit` on every valid node.
///
/// `visit` receives the node depth (root = 0) and returns whether it mutated
/// the node. A failed visit leaves that node as it was and the walk goes on.
/// Invalid nodes and nodes already seen in this walk end their branch.
pub fn walk<H, F>(host: &mut H, root: H::Node, mut visit: F) -> usize
where
    H: OutlineHost,
    F: FnMut(&mut H, H::Node, usize) -> Result<bool>,
{
    let mut seen = HashSet::new();
    // 显式栈，嵌套深度不受线程栈限制
    let mut stack = vec![(root, 0)];
    let mut acc = 0;

    while let Some((node, depth)) = stack.pop() {
        if !host.is_valid(node) || !seen.insert(node) {
            continue;
        }

        match visit(host, node, depth) {
            Ok(true) => acc += 1,
            Ok(false) => {}
            Err(e) => warn!("[Walker] node {:?} left unchanged: {}", node, e),
        }

        if host.has_children(node) {
            let children = children_of(host, node, &seen);
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }
    }

    acc
}

/// 按兄弟顺序收集子节点，遇到已访问或重复的节点即停止
fn children_of<H: OutlineHost>(host: &H, node: H::Node, seen: &HashSet<H::Node>) -> Vec<H::Node> {
    let mut children = Vec::new();
    let mut listed = HashSet::new();
    let mut child = host.first_child(node);
    while let Some(current) = child {
        if seen.contains(&current) || !listed.insert(current) {
            warn!("[Walker] outline cycle at {:?}, stopping this branch", current);
            break;
        }
        children.push(current);
        child = host.next_sibling(current);
    }
    children
}

/// 按模式遍历，返回修改的节点数
pub fn run<H: OutlineHost>(
    host: &mut H,
    root: H::Node,
    mode: WalkMode,
    caser: &TitleCaser,
    toc: Option<&TocMatcher>,
) -> usize {
    let changed = match mode {
        WalkMode::Collapse => collapse_all(host, root),
        WalkMode::FixDestinations => fix_destinations(host, root, toc),
        WalkMode::Capitalize => capitalize_all(host, root, caser),
    };
    debug!("[Walker] {:?} changed {} nodes", mode, changed);
    changed
}

/// 折叠所有节点
pub fn collapse_all<H: OutlineHost>(host: &mut H, root: H::Node) -> usize {
    walk(host, root, |host, node, _| collapse_node(host, node))
}

/// 把所有跳转目标改为 XYZ + 未指定缩放；`toc` 不为空时顺便把目录条目设为粗体
pub fn fix_destinations<H: OutlineHost>(
    host: &mut H,
    root: H::Node,
    toc: Option<&TocMatcher>,
) -> usize {
    walk(host, root, |host, node, _| fix_node(host, node, toc))
}

/// 标题改为标题格式大小写
pub fn capitalize_all<H: OutlineHost>(host: &mut H, root: H::Node, caser: &TitleCaser) -> usize {
    walk(host, root, |host, node, _| capitalize_node(host, node, caser))
}

/// 收集 root 之下所有条目（不含 root 本身），只读
pub fn outline_items<H: OutlineHost>(host: &mut H, root: H::Node) -> Vec<OutlineItem> {
    let mut items = Vec::new();
    walk(host, root, |host, node, depth| {
        if depth > 0 {
            items.push(snapshot(host, node, depth));
        }
        Ok(false)
    });
    items
}

/// 文档级注释修正：内容含目录关键字但不是粗体的文本注释改为粗体
pub fn fix_annotations<A: AnnotationHost>(host: &mut A, toc: &TocMatcher) -> usize {
    let mut acc = 0;
    for annot in host.text_annotations() {
        if host.is_annotation_bold(annot) {
            continue;
        }
        let contents = host.annotation_contents(annot);
        if contents.is_empty() || !toc.is_match(&contents) {
            continue;
        }
        match host.set_annotation_bold(annot, true) {
            Ok(()) => acc += 1,
            Err(e) => warn!("[Walker] annotation {:?} left unchanged: {}", annot, e),
        }
    }
    debug!("[Walker] fixed {} annotations", acc);
    acc
}

fn collapse_node<H: OutlineHost>(host: &mut H, node: H::Node) -> Result<bool> {
    if !host.is_open(node) {
        return Ok(false);
    }
    host.set_open(node, false)?;
    Ok(true)
}

fn fix_node<H: OutlineHost>(host: &mut H, node: H::Node, toc: Option<&TocMatcher>) -> Result<bool> {
    let mut changed = false;
    let mut failure = None;

    if let Some(action) = host.action(node).filter(Action::needs_fix) {
        if let Some(dest) = action.destination() {
            match host.set_action(node, Action::GoTo(dest.to_canonical())) {
                Ok(()) => changed = true,
                Err(e) => failure = Some(e),
            }
        }
    }

    if let Some(toc) = toc {
        let flags = host.flags(node);
        if flags & FLAG_BOLD == 0 && toc.is_match(&host.title(node)) {
            match host.set_flags(node, flags | FLAG_BOLD) {
                Ok(()) => changed = true,
                Err(e) => failure = failure.or(Some(e)),
            }
        }
    }

    match failure {
        Some(e) if !changed => Err(e),
        Some(e) => {
            warn!("[Walker] {:?} only partly fixed: {}", node, e);
            Ok(true)
        }
        None => Ok(changed),
    }
}

fn capitalize_node<H: OutlineHost>(host: &mut H, node: H::Node, caser: &TitleCaser) -> Result<bool> {
    let title = host.title(node);
    if title.is_empty() {
        return Ok(false);
    }
    let normalized = caser.normalize(&title);
    if normalized.is_empty() || normalized == title {
        return Ok(false);
    }
    host.set_title(node, &normalized)?;
    Ok(true)
}

fn snapshot<H: OutlineHost>(host: &H, node: H::Node, depth: usize) -> OutlineItem {
    let action = host.action(node);
    let dest = action.as_ref().and_then(Action::destination);
    let mut item = OutlineItem::new(host.title(node), dest.map(|d| d.page), depth);
    item.open = host.is_open(node);
    item.fit = dest.map(|d| d.fit);
    item.flags = host.flags(node);
    item
}
