use serde_json::Value;

use crate::core::models::change_event::{ChangeCategory, ChangeEvent};
use crate::core::models::raw_log::RawLogRecord;

/// Keyword rules in precedence order. The first rule with a keyword
/// contained in the lowercased action wins. Creation matches verb forms
/// only, so the `Creativo` entity does not count as a creation.
const CATEGORY_RULES: &[(&[&str], ChangeCategory)] = &[
    (&["crear", "creaci", "cread"], ChangeCategory::Creation),
    (&["archiv"], ChangeCategory::Archived),
    (&["reactiv", "estado"], ChangeCategory::StatusChange),
    (&["métric", "metric"], ChangeCategory::Metrics),
];

/// Classify an action text. Total: anything unmatched is an `Edit`.
pub fn infer_category(action: &str) -> ChangeCategory {
    let lower = action.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(ChangeCategory::Edit)
}

/// Result of mapping a batch of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedEvents {
    pub events: Vec<ChangeEvent>,
    /// Records dropped for lacking a usable timestamp.
    pub skipped: usize,
}

/// Turns raw audit-log records into change events.
pub struct EventMapper;

impl EventMapper {
    /// Map one record. Returns `None` when the record has no usable
    /// timestamp; such records are unusable rather than erroneous.
    pub fn to_change_event(&self, record: &RawLogRecord) -> Option<ChangeEvent> {
        let timestamp = record.occurred_at()?;
        let details = record.detail_value();
        let (previous_value, new_value) = before_after(details.as_ref());

        let field_label = details
            .as_ref()
            .and_then(|d| d.get("campo"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| record.action.clone());

        Some(ChangeEvent {
            id: record.id.to_string(),
            entity_id: record.entity_id.clone(),
            entity: record.entity.clone(),
            action: record.action.clone(),
            role: record.role.clone(),
            category: infer_category(&record.action),
            field_label,
            previous_value,
            new_value,
            user: record.user.clone(),
            timestamp,
            comment: record.description_text(),
        })
    }

    /// Map a batch, preserving input order and counting dropped records.
    pub fn map_all(&self, records: &[RawLogRecord]) -> MappedEvents {
        let mut mapped = MappedEvents::default();
        for record in records {
            match self.to_change_event(record) {
                Some(event) => mapped.events.push(event),
                None => {
                    tracing::debug!(id = %record.id, "skipping log record without a usable timestamp");
                    mapped.skipped += 1;
                }
            }
        }
        mapped
    }
}

/// Pull `antes`/`despues` out of an object payload. JSON nulls count as
/// absent.
fn before_after(details: Option<&Value>) -> (Option<Value>, Option<Value>) {
    let Some(Value::Object(map)) = details else {
        return (None, None);
    };
    let pick = |key: &str| map.get(key).filter(|v| !v.is_null()).cloned();
    (pick("antes"), pick("despues"))
}
