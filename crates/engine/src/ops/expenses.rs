use sea_orm::{ActiveValue, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Expense, ExpenseDraft, ResultEngine,
    expenses::{self, ActiveModel, Column, Entity},
};

use super::Engine;

impl Engine {
    /// Returns every stored expense, newest first.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<Expense>> {
        let models = Entity::find()
            .order_by_desc(Column::Date)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Expense::from).collect())
    }

    pub async fn expense(&self, id: &str) -> ResultEngine<Expense> {
        Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(Expense::from)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))
    }

    /// Validates the draft, assigns a fresh id and stores the expense.
    pub async fn create_expense(&self, draft: ExpenseDraft) -> ResultEngine<Expense> {
        let new = draft.into_new()?;
        let id = Uuid::new_v4().to_string();

        let active = ActiveModel {
            id: ActiveValue::Set(id.clone()),
            title: ActiveValue::Set(new.title),
            amount: ActiveValue::Set(new.amount),
            category: ActiveValue::Set(new.category.as_str().to_string()),
            date: ActiveValue::Set(new.date),
            notes: ActiveValue::Set(new.notes),
        };
        let model = active.insert(&self.database).await?;
        tracing::debug!("created expense {id}");

        Ok(Expense::from(model))
    }

    /// Replaces the fields present in `draft`, leaving the others untouched.
    ///
    /// Last write wins: there is no version check between concurrent updates.
    pub async fn update_expense(&self, id: &str, draft: ExpenseDraft) -> ResultEngine<Expense> {
        let changes = draft.into_changes()?;

        let model = Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

        let mut active: ActiveModel = model.clone().into();
        if let Some(title) = changes.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(amount) = changes.amount {
            active.amount = ActiveValue::Set(amount);
        }
        if let Some(category) = changes.category {
            active.category = ActiveValue::Set(category.as_str().to_string());
        }
        if let Some(date) = changes.date {
            active.date = ActiveValue::Set(date);
        }
        if let Some(notes) = changes.notes {
            active.notes = ActiveValue::Set(notes);
        }

        if !active.is_changed() {
            return Ok(Expense::from(model));
        }

        let model: expenses::Model = active.update(&self.database).await?;
        tracing::debug!("updated expense {id}");

        Ok(Expense::from(model))
    }

    pub async fn delete_expense(&self, id: &str) -> ResultEngine<()> {
        let res = Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if res.rows_affected == 0 {
            return Err(EngineError::NotFound(id.to_string()));
        }
        tracing::debug!("deleted expense {id}");
        Ok(())
    }
}
