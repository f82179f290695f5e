//! Order/payment status classification
//!
//! The backend reports status as free text. Pages never branch on the raw
//! string; they classify it once into a closed category with a display
//! label, icon key and badge color class. Classification is a pure total
//! function so list rows and detail views always render the same badge for
//! the same input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of lifecycle categories a backend status string can map to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Pending,
    Confirmed,
    Processing,
    ReadyToShip,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
    Refunded,
    Returned,
    Exchanged,
    Unknown,
}

impl StatusCategory {
    fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "processing" => Self::Processing,
            "ready_to_ship" => Self::ReadyToShip,
            "shipped" => Self::Shipped,
            "out_for_delivery" => Self::OutForDelivery,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            "refunded" => Self::Refunded,
            "returned" => Self::Returned,
            "exchanged" => Self::Exchanged,
            _ => return None,
        })
    }

    /// (label, icon key, badge color class)
    fn descriptor(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Pending => ("Pending", "clock", "bg-amber-100 text-amber-800"),
            Self::Confirmed => ("Confirmed", "check-circle", "bg-blue-100 text-blue-800"),
            Self::Processing => ("Processing", "package", "bg-indigo-100 text-indigo-800"),
            Self::ReadyToShip => ("Ready to Ship", "box", "bg-cyan-100 text-cyan-800"),
            Self::Shipped => ("Shipped", "truck", "bg-sky-100 text-sky-800"),
            Self::OutForDelivery => ("Out for Delivery", "map-pin", "bg-teal-100 text-teal-800"),
            Self::Delivered => ("Delivered", "check", "bg-green-100 text-green-800"),
            Self::Cancelled => ("Cancelled", "x-circle", "bg-red-100 text-red-800"),
            Self::Refunded => ("Refunded", "rotate-ccw", "bg-purple-100 text-purple-800"),
            Self::Returned => ("Returned", "corner-up-left", "bg-orange-100 text-orange-800"),
            Self::Exchanged => ("Exchanged", "repeat", "bg-violet-100 text-violet-800"),
            Self::Unknown => ("Unknown", "help-circle", "bg-gray-100 text-gray-800"),
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor().0)
    }
}

/// Display-ready badge for a classified status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub category: StatusCategory,
    pub label: String,
    pub icon: &'static str,
    pub color_class: &'static str,
}

/// Classify a backend status string. Case-insensitive exact match against
/// the known category keys; anything else falls back to [`StatusCategory::Unknown`]
/// with the original string capitalized as the label. Never fails, including
/// for the empty string.
pub fn classify(status: &str) -> StatusBadge {
    let key = status.trim().to_lowercase();
    match StatusCategory::from_key(&key) {
        Some(category) => {
            let (label, icon, color_class) = category.descriptor();
            StatusBadge { category, label: label.to_string(), icon, color_class }
        }
        None => {
            let (fallback_label, icon, color_class) = StatusCategory::Unknown.descriptor();
            let label = match capitalize(status.trim()) {
                s if s.is_empty() => fallback_label.to_string(),
                s => s,
            };
            StatusBadge { category: StatusCategory::Unknown, label, icon, color_class }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
