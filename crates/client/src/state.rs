//! Local state of an expense front end.
//!
//! [`ExpenseBook`] keeps the fetched records sorted newest first, the form
//! draft and the transient flags (saving, editing, deleting). Every mutation
//! goes through an [`ExpenseApi`] and only touches the local list once the
//! service confirmed it.

use std::cmp::Reverse;

use api_types::expense::{Expense, ExpenseFields};

use crate::{ExpenseApi, form::ExpenseForm, format::parse_iso};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Message for the user after an operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.to_string(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            kind: NoticeKind::Error,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Sorts newest first. Unparseable dates count as the epoch; ties keep their
/// relative order.
pub fn sort_by_date_desc(expenses: &mut [Expense]) {
    expenses.sort_by_key(|expense| {
        Reverse(
            parse_iso(&expense.date)
                .map(|date| date.timestamp_millis())
                .unwrap_or(0),
        )
    });
}

#[derive(Debug, Default)]
pub struct ExpenseBook {
    expenses: Vec<Expense>,
    pub form: ExpenseForm,
    loading: bool,
    error: Option<String>,
    saving: bool,
    editing: Option<String>,
    deleting: Option<String>,
}

impl ExpenseBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn find(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn total(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error of the last load, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn deleting(&self) -> Option<&str> {
        self.deleting.as_deref()
    }

    /// Replaces the local list with the service's, sorted newest first.
    ///
    /// On failure the previous list is kept and the error recorded.
    pub async fn load<A: ExpenseApi>(&mut self, api: &A) -> Option<Notice> {
        self.loading = true;
        self.error = None;

        let notice = match api.list().await {
            Ok(mut expenses) => {
                sort_by_date_desc(&mut expenses);
                self.expenses = expenses;
                None
            }
            Err(err) => {
                tracing::warn!("failed to load expenses: {err}");
                let message = err.user_message();
                self.error = Some(message.clone());
                Some(Notice::error(message))
            }
        };

        self.loading = false;
        notice
    }

    /// Puts the form in edit mode for `id`. Returns `false` if the record is
    /// not in the local list.
    pub fn start_edit(&mut self, id: &str) -> bool {
        let Some(expense) = self.find(id) else {
            return false;
        };
        self.form = ExpenseForm::from_expense(expense);
        self.editing = Some(id.to_string());
        true
    }

    pub fn cancel_edit(&mut self) {
        self.form.reset();
        self.editing = None;
    }

    /// Validates the form and creates or updates the record.
    ///
    /// Returns `None` when the form is invalid: nothing is sent and the field
    /// errors are left in `self.form.errors`. On failure the local list and
    /// the draft are left as they were.
    pub async fn submit<A: ExpenseApi>(&mut self, api: &A) -> Option<Notice> {
        let input = self.form.validate().ok()?;
        self.saving = true;

        let notice = match self.editing.clone() {
            Some(id) => match api.update(&id, &ExpenseFields::from(input)).await {
                Ok(updated) => {
                    if let Some(slot) = self.expenses.iter_mut().find(|e| e.id == updated.id) {
                        *slot = updated;
                    }
                    sort_by_date_desc(&mut self.expenses);
                    self.editing = None;
                    self.form.reset();
                    Notice::success("Expense updated successfully!")
                }
                Err(err) => {
                    tracing::warn!("failed to update expense {id}: {err}");
                    Notice::error(err.user_message())
                }
            },
            None => match api.create(&input).await {
                Ok(created) => {
                    self.expenses.push(created);
                    sort_by_date_desc(&mut self.expenses);
                    self.form.reset();
                    Notice::success("Expense added successfully!")
                }
                Err(err) => {
                    tracing::warn!("failed to create expense: {err}");
                    Notice::error(err.user_message())
                }
            },
        };

        self.saving = false;
        Some(notice)
    }

    /// Deletes `id` on the service, then locally.
    pub async fn delete<A: ExpenseApi>(&mut self, api: &A, id: &str) -> Notice {
        self.deleting = Some(id.to_string());

        let notice = match api.delete(id).await {
            Ok(()) => {
                self.expenses.retain(|expense| expense.id != id);
                if self.editing.as_deref() == Some(id) {
                    self.cancel_edit();
                }
                Notice::success("Expense deleted successfully.")
            }
            Err(err) => {
                tracing::warn!("failed to delete expense {id}: {err}");
                Notice::error(err.user_message())
            }
        };

        self.deleting = None;
        notice
    }
}
