use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::errors::{AdtrailError, Result};
use crate::core::models::change_event::ChangeCategory;
use crate::core::models::raw_log::parse_timestamp;

/// Active filters of a log or history view.
///
/// Every field that is set narrows the result; the fields are AND-ed.
/// A `None` or blank field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub category: Option<ChangeCategory>,
    /// Case-insensitive substring of the user name.
    pub user: Option<String>,
    /// Inclusive lower bound.
    pub date_from: Option<NaiveDateTime>,
    /// Inclusive upper bound.
    pub date_to: Option<NaiveDateTime>,
    /// Entity type, compared case-insensitively.
    pub entity: Option<String>,
    /// Exact entity id.
    pub entity_id: Option<String>,
    /// Case-insensitive substring of the action text.
    pub action: Option<String>,
    /// Role, compared case-insensitively.
    pub role: Option<String>,
}

impl FilterState {
    /// Set both date bounds, swapping them when given in reverse order.
    pub fn with_date_range(
        mut self,
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
    ) -> Self {
        let (from, to) = match (from, to) {
            (Some(f), Some(t)) if t < f => (Some(t), Some(f)),
            other => other,
        };
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// True when no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && active(&self.user).is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && active(&self.entity).is_none()
            && active(&self.entity_id).is_none()
            && active(&self.action).is_none()
            && active(&self.role).is_none()
    }

    pub fn user(&self) -> Option<&str> {
        active(&self.user)
    }

    pub fn entity(&self) -> Option<&str> {
        active(&self.entity)
    }

    pub fn entity_id(&self) -> Option<&str> {
        active(&self.entity_id)
    }

    /// The entity id when it is the only constraint the server would see.
    /// Category is never sent, so it does not count.
    pub fn entity_id_only(&self) -> Option<&str> {
        let rest = FilterState {
            entity_id: None,
            category: None,
            ..self.clone()
        };
        self.entity_id().filter(|_| rest.is_empty())
    }

    pub fn action(&self) -> Option<&str> {
        active(&self.action)
    }

    pub fn role(&self) -> Option<&str> {
        active(&self.role)
    }
}

fn active(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Which end of a date range a user-supplied date stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Start,
    End,
}

/// Parse a `--from`/`--to` argument.
///
/// A bare date widens to the first instant of the day for `Start` and the
/// last for `End`, so both bounds include the whole day.
pub fn parse_date_bound(input: &str, bound: DateBound) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let time = match bound {
            DateBound::Start => NaiveTime::MIN,
            DateBound::End => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
                .unwrap_or(NaiveTime::MIN),
        };
        return Ok(date.and_time(time));
    }
    parse_timestamp(trimmed).ok_or_else(|| AdtrailError::InvalidDate {
        input: input.to_string(),
    })
}
