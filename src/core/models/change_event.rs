use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::core::errors::AdtrailError;

/// Kind of change a log record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeCategory {
    Creation,
    Edit,
    Metrics,
    StatusChange,
    Archived,
}

impl ChangeCategory {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ChangeCategory::Creation => "Creation",
            ChangeCategory::Edit => "Edit",
            ChangeCategory::Metrics => "Metrics",
            ChangeCategory::StatusChange => "Status",
            ChangeCategory::Archived => "Archived",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ChangeCategory::Creation => "🆕",
            ChangeCategory::Edit => "✏️",
            ChangeCategory::Metrics => "📊",
            ChangeCategory::StatusChange => "🔄",
            ChangeCategory::Archived => "📁",
        }
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChangeCategory {
    type Err = AdtrailError;

    /// Accepts the English names plus the backend's `TipoCambio` codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "creation" | "create" | "creacion" | "creación" => Ok(ChangeCategory::Creation),
            "edit" | "edicion" | "edición" => Ok(ChangeCategory::Edit),
            "metrics" | "metric" | "metricas" | "métricas" => Ok(ChangeCategory::Metrics),
            "status" | "statuschange" | "state" | "estado" => Ok(ChangeCategory::StatusChange),
            "archived" | "archive" | "archivado" => Ok(ChangeCategory::Archived),
            _ => Err(AdtrailError::UnknownCategory {
                input: s.to_string(),
            }),
        }
    }
}

/// A typed change derived from one audit-log record.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub id: String,
    pub entity_id: String,
    pub entity: String,
    pub action: String,
    pub role: String,
    pub category: ChangeCategory,
    /// What changed: the detail payload's `campo`, else the action text.
    pub field_label: String,
    pub previous_value: Option<Value>,
    pub new_value: Option<Value>,
    pub user: String,
    pub timestamp: NaiveDateTime,
    pub comment: Option<String>,
}
