//! Expense records and their table.

use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::entity::prelude::*;

use crate::Category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub date: DateTimeUtc,
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A stored expense.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub date: DateTime<Utc>,
    pub notes: String,
}

impl Expense {
    /// `date` as an ISO-8601 string with millisecond precision, e.g.
    /// `2024-03-01T00:00:00.000Z`.
    pub fn date_iso(&self) -> String {
        self.date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        let category = Category::try_from(model.category.as_str()).unwrap_or_else(|_| {
            tracing::warn!(
                "expense {} has unknown category {:?}, reading it as Other",
                model.id,
                model.category
            );
            Category::Other
        });
        Self {
            id: model.id,
            title: model.title,
            amount: model.amount,
            category,
            date: model.date,
            notes: model.notes,
        }
    }
}
