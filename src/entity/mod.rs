pub mod action;
pub mod destination;
pub mod outline_item;

pub use action::Action;
pub use destination::{Destination, DestRect, FitType};
pub use outline_item::OutlineItem;

/// 大纲条目 /F 标志位：斜体
pub const FLAG_ITALIC: u32 = 0x1;
/// 大纲条目 /F 标志位：粗体
pub const FLAG_BOLD: u32 = 0x2;
