//! Client-submitted expense fields before validation.

use chrono::{DateTime, Utc};

use crate::{
    Category, ResultEngine,
    util::{collect_errors, parse_category, parse_date, validate_amount, validate_title},
};

/// Raw fields of a create or update request.
///
/// Every field is optional: [`ExpenseDraft::into_new`] requires the mandatory
/// ones, [`ExpenseDraft::into_changes`] validates only what is present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseDraft {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

/// A validated expense ready to be inserted.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NewExpense {
    pub(crate) title: String,
    pub(crate) amount: f64,
    pub(crate) category: Category,
    pub(crate) date: DateTime<Utc>,
    pub(crate) notes: String,
}

/// Validated replacements for an existing expense.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpenseChanges {
    pub(crate) title: Option<String>,
    pub(crate) amount: Option<f64>,
    pub(crate) category: Option<Category>,
    pub(crate) date: Option<DateTime<Utc>>,
    pub(crate) notes: Option<String>,
}

impl ExpenseDraft {
    pub(crate) fn into_new(self) -> ResultEngine<NewExpense> {
        let mut errors = Vec::new();

        if self.title.is_none() {
            errors.push("Title is required".to_string());
        }
        if self.amount.is_none() {
            errors.push("Amount is required".to_string());
        }
        if self.category.as_deref().is_none_or(str::is_empty) {
            errors.push("Category is required".to_string());
        }
        if self.date.is_none() {
            errors.push("Date is required".to_string());
        }

        let changes = match self.into_changes() {
            Ok(changes) => Some(changes),
            Err(crate::EngineError::Validation(message)) => {
                errors.push(message);
                None
            }
            Err(err) => return Err(err),
        };
        collect_errors(errors)?;

        match changes {
            Some(ExpenseChanges {
                title: Some(title),
                amount: Some(amount),
                category: Some(category),
                date: Some(date),
                notes,
            }) => Ok(NewExpense {
                title,
                amount,
                category,
                date,
                notes: notes.unwrap_or_default(),
            }),
            _ => Err(crate::EngineError::Validation(
                "Title, amount, category and date are required".to_string(),
            )),
        }
    }

    pub(crate) fn into_changes(self) -> ResultEngine<ExpenseChanges> {
        let mut errors = Vec::new();
        let mut changes = ExpenseChanges {
            notes: self.notes,
            ..ExpenseChanges::default()
        };

        if let Some(title) = self.title {
            match validate_title(&title) {
                Ok(()) => changes.title = Some(title),
                Err(err) => errors.push(err),
            }
        }
        if let Some(amount) = self.amount {
            match validate_amount(amount) {
                Ok(()) => changes.amount = Some(amount),
                Err(err) => errors.push(err),
            }
        }
        if let Some(category) = self.category.filter(|c| !c.is_empty()) {
            match parse_category(&category) {
                Ok(category) => changes.category = Some(category),
                Err(err) => errors.push(err),
            }
        }
        if let Some(date) = self.date {
            match parse_date(&date) {
                Ok(date) => changes.date = Some(date),
                Err(err) => errors.push(err),
            }
        }

        collect_errors(errors)?;
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;

    fn lunch() -> ExpenseDraft {
        ExpenseDraft {
            title: Some("Lunch".to_string()),
            amount: Some(12.5),
            category: Some("Food & Dining".to_string()),
            date: Some("2024-01-01".to_string()),
            notes: None,
        }
    }

    #[test]
    fn complete_draft_validates_and_defaults_notes() {
        let new = lunch().into_new().unwrap();
        assert_eq!(new.title, "Lunch");
        assert_eq!(new.category, Category::FoodAndDining);
        assert_eq!(new.notes, "");
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let err = ExpenseDraft::default().into_new().unwrap_err();
        let EngineError::Validation(message) = err else {
            panic!("expected a validation error");
        };
        assert!(message.contains("Title is required"));
        assert!(message.contains("Amount is required"));
        assert!(message.contains("Category is required"));
        assert!(message.contains("Date is required"));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        for amount in [0.0, -1.0] {
            let draft = ExpenseDraft {
                amount: Some(amount),
                ..lunch()
            };
            assert!(matches!(draft.into_new(), Err(EngineError::Validation(_))));
        }
    }

    #[test]
    fn changes_only_validate_present_fields() {
        let changes = ExpenseDraft {
            notes: Some("split with Sam".to_string()),
            ..ExpenseDraft::default()
        }
        .into_changes()
        .unwrap();
        assert_eq!(changes.notes.as_deref(), Some("split with Sam"));
        assert!(changes.title.is_none());

        let err = ExpenseDraft {
            category: Some("Pets".to_string()),
            ..ExpenseDraft::default()
        }
        .into_changes();
        assert!(matches!(err, Err(EngineError::Validation(_))));
    }
}
