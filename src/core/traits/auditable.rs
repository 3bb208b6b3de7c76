use chrono::NaiveDateTime;

use crate::core::models::change_event::ChangeCategory;

/// Fields the filter evaluator reads from a log record or change event.
pub trait Auditable {
    fn category(&self) -> ChangeCategory;
    fn user(&self) -> &str;
    fn action(&self) -> &str;
    fn entity(&self) -> &str;
    fn entity_id(&self) -> &str;
    fn role(&self) -> &str;
    /// `None` when the timestamp is missing or unparseable.
    fn occurred_at(&self) -> Option<NaiveDateTime>;
}
