use serde::{Deserialize, Serialize};

/// The closed set of PPE categories checked on every inspection.
///
/// Serde names match the wire values the vision model is instructed to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PpeItem {
    Hairnet,
    Mask,
    #[serde(rename = "Protective suit")]
    ProtectiveSuit,
    Gloves,
    #[serde(rename = "Safety shoes")]
    SafetyShoes,
}

impl PpeItem {
    /// All categories in the fixed inspection order.
    pub const ALL: [PpeItem; 5] = [
        PpeItem::Hairnet,
        PpeItem::Mask,
        PpeItem::ProtectiveSuit,
        PpeItem::Gloves,
        PpeItem::SafetyShoes,
    ];

    /// The wire name the model schema constrains `ppeItem` to.
    pub fn wire_name(&self) -> &'static str {
        match self {
            PpeItem::Hairnet => "Hairnet",
            PpeItem::Mask => "Mask",
            PpeItem::ProtectiveSuit => "Protective suit",
            PpeItem::Gloves => "Gloves",
            PpeItem::SafetyShoes => "Safety shoes",
        }
    }

    /// Arabic display label used by the web client and fallback results.
    pub fn label_ar(&self) -> &'static str {
        match self {
            PpeItem::Hairnet => "غطاء الشعر (شارلوت)",
            PpeItem::Mask => "كمامة الوجه",
            PpeItem::ProtectiveSuit => "البذلة الواقية",
            PpeItem::Gloves => "قفازات اليدين",
            PpeItem::SafetyShoes => "حذاء السلامة",
        }
    }
}

/// A rectangle located within the image, all components normalized to [0,1]
/// relative to the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// The whole image frame.
    pub fn full_frame() -> Self {
        Self { x: 0.0, y: 0.0, width: 1.0, height: 1.0 }
    }

    /// Clamp every component to [0,1] and keep the box inside the frame.
    ///
    /// The model is only instructed to emit normalized coordinates, so
    /// out-of-range and non-finite values are corrected here rather than
    /// trusted.
    pub fn clamped(self) -> Self {
        let x = unit(self.x);
        let y = unit(self.y);
        Self {
            x,
            y,
            width: unit(self.width).min(1.0 - x),
            height: unit(self.height).min(1.0 - y),
        }
    }
}

fn unit(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// One per-category verdict from the vision model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpeFinding {
    pub ppe_item: PpeItem,
    pub compliant: bool,
    #[serde(default)]
    pub reason: String,
    #[serde(default = "BoundingBox::full_frame")]
    pub bounding_box: BoundingBox,
}

/// The normalized outcome of one analysis request.
///
/// The findings list is always present and list-typed; callers never see a
/// partially parsed or absent shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub findings: Vec<PpeFinding>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub overall_compliant: bool,
}

/// Per-item reason used when the model output could not be parsed.
pub const FALLBACK_REASON: &str = "تعذر تحليل هذا العنصر تلقائيًا، يلزم فحص يدوي";

/// Summary used when the model output could not be parsed.
pub const FALLBACK_SUMMARY: &str =
    "فشل التحليل الآلي. لا يمكن تأكيد الامتثال، يرجى إعادة المحاولة أو إجراء فحص يدوي قبل دخول خط الإنتاج.";

impl AnalysisResult {
    /// The fixed result substituted when the model output is unusable:
    /// every category marked non-compliant with a full-frame box.
    pub fn fallback() -> Self {
        Self {
            findings: PpeItem::ALL
                .iter()
                .map(|item| PpeFinding {
                    ppe_item: *item,
                    compliant: false,
                    reason: format!("{}: {}", item.label_ar(), FALLBACK_REASON),
                    bounding_box: BoundingBox::full_frame(),
                })
                .collect(),
            summary: FALLBACK_SUMMARY.to_string(),
            overall_compliant: false,
        }
    }

    /// Recompute `overall_compliant` from the findings, ignoring whatever
    /// the model claimed. An empty findings list verifies nothing, so it
    /// is never overall-compliant.
    pub fn recompute_overall(&mut self) {
        self.overall_compliant =
            !self.findings.is_empty() && self.findings.iter().all(|f| f.compliant);
    }
}
