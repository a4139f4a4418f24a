//! Template category model
//!
//! WhatsApp classifies every message template into one of three categories,
//! each priced independently.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message template category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Marketing,
    Authentication,
    Utility,
}

impl TemplateCategory {
    /// All categories, in display order
    pub const ALL: [TemplateCategory; 3] = [
        TemplateCategory::Marketing,
        TemplateCategory::Authentication,
        TemplateCategory::Utility,
    ];

    /// Wire/display name
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Marketing => "marketing",
            TemplateCategory::Authentication => "authentication",
            TemplateCategory::Utility => "utility",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "marketing" => Some(TemplateCategory::Marketing),
            "authentication" => Some(TemplateCategory::Authentication),
            "utility" => Some(TemplateCategory::Utility),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
