use std::fmt;

/// 目标视图的适配方式（PDF 32000 §12.3.2.2）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitType {
    Xyz,
    Fit,
    FitH,
    FitV,
    FitR,
    FitB,
    FitBH,
    FitBV,
}

impl FitType {
    pub fn from_name(name: &[u8]) -> Option<FitType> {
        match name {
            b"XYZ" => Some(FitType::Xyz),
            b"Fit" => Some(FitType::Fit),
            b"FitH" => Some(FitType::FitH),
            b"FitV" => Some(FitType::FitV),
            b"FitR" => Some(FitType::FitR),
            b"FitB" => Some(FitType::FitB),
            b"FitBH" => Some(FitType::FitBH),
            b"FitBV" => Some(FitType::FitBV),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FitType::Xyz => "XYZ",
            FitType::Fit => "Fit",
            FitType::FitH => "FitH",
            FitType::FitV => "FitV",
            FitType::FitR => "FitR",
            FitType::FitB => "FitB",
            FitType::FitBH => "FitBH",
            FitType::FitBV => "FitBV",
        }
    }
}

impl fmt::Display for FitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 目标矩形，None 表示 PDF 中的 null（保持当前值）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DestRect {
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
}

impl DestRect {
    pub fn new(left: Option<f32>, top: Option<f32>, right: Option<f32>, bottom: Option<f32>) -> Self {
        Self { left, top, right, bottom }
    }
}

/// 跳转目标：页码（从0开始）、适配方式、矩形、缩放
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub page: usize,
    pub fit: FitType,
    pub rect: DestRect,
    /// None 即“未指定”缩放
    pub zoom: Option<f32>,
}

impl Destination {
    pub fn new(page: usize, fit: FitType) -> Self {
        Self {
            page,
            fit,
            rect: DestRect::default(),
            zoom: None,
        }
    }

    pub fn with_rect(mut self, rect: DestRect) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// XYZ + 未指定缩放
    pub fn is_canonical(&self) -> bool {
        self.fit == FitType::Xyz && self.zoom.is_none()
    }

    /// Same page and rectangle, XYZ, zoom unspecified.
    pub fn to_canonical(&self) -> Destination {
        Destination {
            page: self.page,
            fit: FitType::Xyz,
            rect: self.rect,
            zoom: None,
        }
    }
}
