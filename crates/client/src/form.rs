//! Draft values of the create/edit form and their validation.

use std::collections::BTreeMap;

use api_types::{
    Category,
    expense::{Expense, ExpenseInput},
};

const TITLE_MAX_CHARS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Title,
    Amount,
    Category,
    Date,
}

pub type FormErrors = BTreeMap<Field, String>;

/// Raw text of the form inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseForm {
    pub title: String,
    pub amount: String,
    pub category: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub notes: String,
    pub errors: FormErrors,
}

impl ExpenseForm {
    /// Form pre-filled with an existing record, date cut to `YYYY-MM-DD`.
    pub fn from_expense(expense: &Expense) -> Self {
        let date = expense
            .date
            .split('T')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            title: expense.title.clone(),
            amount: expense.amount.to_string(),
            category: expense.category.as_str().to_string(),
            date,
            notes: expense.notes.clone(),
            errors: FormErrors::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validates the inputs, recording per-field errors in `self.errors`.
    ///
    /// On success returns the record to submit, with title and notes trimmed.
    pub fn validate(&mut self) -> Result<ExpenseInput, FormErrors> {
        let mut errors = FormErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.insert(Field::Title, "Title is required".to_string());
        } else if self.title.chars().count() > TITLE_MAX_CHARS {
            errors.insert(
                Field::Title,
                "Title must be less than 100 characters".to_string(),
            );
        }

        let amount = self.amount.trim();
        let parsed_amount = if amount.is_empty() {
            errors.insert(Field::Amount, "Amount is required".to_string());
            None
        } else {
            match amount.parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => Some(value),
                _ => {
                    errors.insert(
                        Field::Amount,
                        "Amount must be a positive number".to_string(),
                    );
                    None
                }
            }
        };

        let category = if self.category.trim().is_empty() {
            errors.insert(Field::Category, "Category is required".to_string());
            None
        } else {
            match Category::try_from(self.category.trim()) {
                Ok(category) => Some(category),
                Err(_) => {
                    errors.insert(Field::Category, "Select a valid category".to_string());
                    None
                }
            }
        };

        if self.date.trim().is_empty() {
            errors.insert(Field::Date, "Date is required".to_string());
        }

        self.errors = errors.clone();
        match (parsed_amount, category) {
            (Some(amount), Some(category)) if errors.is_empty() => Ok(ExpenseInput {
                title: title.to_string(),
                amount,
                category,
                date: self.date.trim().to_string(),
                notes: self.notes.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ExpenseForm {
        ExpenseForm {
            title: "  Groceries ".to_string(),
            amount: "42.10".to_string(),
            category: "Shopping".to_string(),
            date: "2024-06-01".to_string(),
            notes: " weekly run ".to_string(),
            errors: FormErrors::new(),
        }
    }

    #[test]
    fn valid_form_yields_trimmed_input() {
        let input = filled().validate().unwrap();
        assert_eq!(input.title, "Groceries");
        assert_eq!(input.amount, 42.1);
        assert_eq!(input.category, Category::Shopping);
        assert_eq!(input.notes, "weekly run");
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let mut form = ExpenseForm::default();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.keys().copied().collect::<Vec<_>>(),
            vec![Field::Title, Field::Amount, Field::Category, Field::Date]
        );
        assert_eq!(form.errors, errors);
    }

    #[test]
    fn amount_must_be_a_positive_number() {
        for amount in ["0", "-3", "abc", "NaN", "inf"] {
            let mut form = ExpenseForm {
                amount: amount.to_string(),
                ..filled()
            };
            let errors = form.validate().unwrap_err();
            assert_eq!(
                errors.get(&Field::Amount).map(String::as_str),
                Some("Amount must be a positive number"),
                "amount {amount}"
            );
        }
    }

    #[test]
    fn long_titles_are_rejected() {
        let mut form = ExpenseForm {
            title: "x".repeat(101),
            ..filled()
        };
        assert!(form.validate().unwrap_err().contains_key(&Field::Title));
    }

    #[test]
    fn editing_prefills_with_a_plain_date() {
        let expense = Expense {
            id: "a".to_string(),
            title: "Flight".to_string(),
            amount: 199.99,
            category: Category::Travel,
            date: "2024-07-14T00:00:00.000Z".to_string(),
            notes: "window seat".to_string(),
        };
        let form = ExpenseForm::from_expense(&expense);
        assert_eq!(form.date, "2024-07-14");
        assert_eq!(form.amount, "199.99");
        assert_eq!(form.category, "Travel");
    }

    #[test]
    fn successful_validation_clears_previous_errors() {
        let mut form = ExpenseForm::default();
        let _ = form.validate();
        assert!(!form.errors.is_empty());
        form = ExpenseForm {
            errors: form.errors,
            ..filled()
        };
        form.validate().unwrap();
        assert!(form.errors.is_empty());
    }
}
