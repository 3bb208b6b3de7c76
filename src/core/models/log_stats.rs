use std::collections::BTreeMap;

use serde::Deserialize;

use crate::core::models::raw_log::RawLogRecord;

/// Aggregate counters returned by the statistics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogStats {
    #[serde(rename = "totalLogs", default)]
    pub total_logs: u64,
    #[serde(rename = "logsPorUsuario", default)]
    pub by_user: BTreeMap<String, u64>,
    #[serde(rename = "logsPorAccion", default)]
    pub by_action: BTreeMap<String, u64>,
    #[serde(rename = "logsPorEntidad", default)]
    pub by_entity: BTreeMap<String, u64>,
    #[serde(rename = "actividadReciente", default)]
    pub recent_activity: Vec<RawLogRecord>,
}

impl LogStats {
    /// Counters sorted by count (highest first), ties broken by name.
    pub fn ranked(counts: &BTreeMap<String, u64>) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}
