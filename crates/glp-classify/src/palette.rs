//! Colour buckets shared by every classification table.
//!
//! Tables never name colours directly; they pick a [`Tone`], and the tone
//! owns its background/border/text triple.

use serde::Serialize;

/// A semantic colour bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Success,
    Info,
    Caution,
    Warning,
    Error,
}

/// Background, border and text colours as hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

impl Tone {
    pub const fn palette(self) -> Palette {
        match self {
            Tone::Neutral => Palette { background: "#F3F4F6", border: "#D1D5DB", text: "#374151" },
            Tone::Success => Palette { background: "#ECFDF5", border: "#10B981", text: "#065F46" },
            Tone::Info => Palette { background: "#EFF6FF", border: "#3B82F6", text: "#1E40AF" },
            Tone::Caution => Palette { background: "#FEFCE8", border: "#EAB308", text: "#854D0E" },
            Tone::Warning => Palette { background: "#FFF7ED", border: "#F97316", text: "#9A3412" },
            Tone::Error => Palette { background: "#FEF2F2", border: "#EF4444", text: "#991B1B" },
        }
    }
}

/// The full display tuple a table returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DisplayStyle {
    pub tone: Tone,
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

impl DisplayStyle {
    pub const fn new(tone: Tone, icon: &'static str, label: &'static str) -> Self {
        let p = tone.palette();
        Self {
            tone,
            background: p.background,
            border: p.border,
            text: p.text,
            icon,
            label,
        }
    }

    /// The colour triple alone.
    pub const fn colors(&self) -> (&'static str, &'static str, &'static str) {
        (self.background, self.border, self.text)
    }
}
