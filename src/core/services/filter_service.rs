use chrono::NaiveDateTime;

use crate::core::models::change_event::{ChangeCategory, ChangeEvent};
use crate::core::models::filter::FilterState;
use crate::core::models::raw_log::RawLogRecord;
use crate::core::services::event_mapper::infer_category;
use crate::core::traits::auditable::Auditable;

impl Auditable for RawLogRecord {
    fn category(&self) -> ChangeCategory {
        infer_category(&self.action)
    }

    fn user(&self) -> &str {
        &self.user
    }

    fn action(&self) -> &str {
        &self.action
    }

    fn entity(&self) -> &str {
        &self.entity
    }

    fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn role(&self) -> &str {
        &self.role
    }

    fn occurred_at(&self) -> Option<NaiveDateTime> {
        RawLogRecord::occurred_at(self)
    }
}

impl Auditable for ChangeEvent {
    fn category(&self) -> ChangeCategory {
        self.category
    }

    fn user(&self) -> &str {
        &self.user
    }

    fn action(&self) -> &str {
        &self.action
    }

    fn entity(&self) -> &str {
        &self.entity
    }

    fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn role(&self) -> &str {
        &self.role
    }

    fn occurred_at(&self) -> Option<NaiveDateTime> {
        Some(self.timestamp)
    }
}

/// Client-side filter evaluation over records or events.
pub struct FilterService;

impl FilterService {
    /// Keep the items matching every active field of `filter`, in input
    /// order. Pure: the same inputs always give the same output, and
    /// applying a filter to its own output changes nothing.
    pub fn apply_filters<T>(&self, items: &[T], filter: &FilterState) -> Vec<T>
    where
        T: Auditable + Clone,
    {
        if filter.is_empty() {
            return items.to_vec();
        }
        items
            .iter()
            .filter(|item| self.matches(*item, filter))
            .cloned()
            .collect()
    }

    /// Whether one item passes every active field of `filter`.
    pub fn matches<T: Auditable + ?Sized>(&self, item: &T, filter: &FilterState) -> bool {
        if let Some(category) = filter.category
            && item.category() != category
        {
            return false;
        }

        if let Some(user) = filter.user()
            && !contains_ignore_case(item.user(), user)
        {
            return false;
        }

        if let Some(action) = filter.action()
            && !contains_ignore_case(item.action(), action)
        {
            return false;
        }

        if let Some(entity) = filter.entity()
            && item.entity().trim().to_lowercase() != entity.to_lowercase()
        {
            return false;
        }

        if let Some(id) = filter.entity_id()
            && item.entity_id().trim() != id
        {
            return false;
        }

        if let Some(role) = filter.role()
            && item.role().trim().to_lowercase() != role.to_lowercase()
        {
            return false;
        }

        if filter.date_from.is_some() || filter.date_to.is_some() {
            // A date bound cannot be satisfied by an item without a time.
            let Some(at) = item.occurred_at() else {
                return false;
            };
            if filter.date_from.is_some_and(|from| at < from) {
                return false;
            }
            if filter.date_to.is_some_and(|to| at > to) {
                return false;
            }
        }

        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::filter::{DateBound, parse_date_bound};
    use crate::core::models::raw_log::parse_timestamp;
    use crate::core::services::event_mapper::EventMapper;
    use serde_json::json;

    fn record(id: i64, user: &str, action: &str, entity: &str, ts: Option<&str>) -> RawLogRecord {
        serde_json::from_value(json!({
            "id": id,
            "timestamp": ts,
            "usuario": user,
            "rol": if user.starts_with("ana") { "Admin" } else { "Trafficker" },
            "accion": action,
            "entidad": entity,
            "entidadId": "17"
        }))
        .unwrap()
    }

    fn sample() -> Vec<RawLogRecord> {
        vec![
            record(1, "ana.c", "Crear Campaña", "Campaña", Some("2024-01-15T10:30:00")),
            record(2, "diego.v", "Actualizar Métricas", "Métricas", Some("2024-01-15T14:30:00")),
            record(3, "ana.c", "Cambiar Estado", "Campaña", Some("2024-01-16T16:45:00")),
            record(4, "diego.v", "Archivar Campaña", "Campaña", Some("2024-01-20T09:00:00")),
            record(5, "marta", "Login", "Sistema", None),
        ]
    }

    fn ids(records: &[RawLogRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let records = sample();
        let out = FilterService.apply_filters(&records, &FilterState::default());
        assert_eq!(out, records);
    }

    #[test]
    fn user_is_case_insensitive_substring() {
        let filter = FilterState {
            user: Some("ANA".into()),
            ..FilterState::default()
        };
        assert_eq!(ids(&FilterService.apply_filters(&sample(), &filter)), ["1", "3"]);
    }

    #[test]
    fn category_filter_uses_inferred_category_on_records() {
        let filter = FilterState {
            category: Some(ChangeCategory::Archived),
            ..FilterState::default()
        };
        assert_eq!(ids(&FilterService.apply_filters(&sample(), &filter)), ["4"]);
    }

    #[test]
    fn action_entity_and_role_filters() {
        let by_action = FilterState {
            action: Some("campaña".into()),
            ..FilterState::default()
        };
        assert_eq!(ids(&FilterService.apply_filters(&sample(), &by_action)), ["1", "4"]);

        let by_entity = FilterState {
            entity: Some("métricas".into()),
            ..FilterState::default()
        };
        assert_eq!(ids(&FilterService.apply_filters(&sample(), &by_entity)), ["2"]);

        let by_role = FilterState {
            role: Some("admin".into()),
            ..FilterState::default()
        };
        assert_eq!(ids(&FilterService.apply_filters(&sample(), &by_role)), ["1", "3"]);
    }

    #[test]
    fn entity_id_is_exact() {
        let mut records = sample();
        records[1].entity_id = "170".into();
        let filter = FilterState {
            entity_id: Some("17".into()),
            ..FilterState::default()
        };
        assert_eq!(ids(&FilterService.apply_filters(&records, &filter)), ["1", "3", "4", "5"]);
    }

    #[test]
    fn fields_are_and_combined() {
        let filter = FilterState {
            user: Some("diego".into()),
            category: Some(ChangeCategory::Metrics),
            ..FilterState::default()
        };
        assert_eq!(ids(&FilterService.apply_filters(&sample(), &filter)), ["2"]);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let filter = FilterState::default().with_date_range(
            Some(ts("2024-01-15T14:30:00")),
            Some(ts("2024-01-16T16:45:00")),
        );
        assert_eq!(ids(&FilterService.apply_filters(&sample(), &filter)), ["2", "3"]);
    }

    #[test]
    fn date_only_upper_bound_includes_that_day() {
        let filter = FilterState::default().with_date_range(
            None,
            Some(parse_date_bound("2024-01-15", DateBound::End).unwrap()),
        );
        assert_eq!(ids(&FilterService.apply_filters(&sample(), &filter)), ["1", "2"]);
    }

    #[test]
    fn undated_items_fail_any_date_bound() {
        let filter = FilterState::default()
            .with_date_range(Some(ts("2000-01-01T00:00:00")), None);
        let out = FilterService.apply_filters(&sample(), &filter);
        assert!(!ids(&out).contains(&"5".to_string()));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn applying_twice_equals_applying_once() {
        let filter = FilterState {
            user: Some("a".into()),
            date_from: Some(ts("2024-01-15T12:00:00")),
            ..FilterState::default()
        };
        let once = FilterService.apply_filters(&sample(), &filter);
        let twice = FilterService.apply_filters(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn filters_change_events_the_same_way() {
        let events = EventMapper.map_all(&sample()).events;
        let filter = FilterState {
            category: Some(ChangeCategory::StatusChange),
            user: Some("ana".into()),
            ..FilterState::default()
        };
        let out = FilterService.apply_filters(&events, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "3");
    }
}
