//! Expense API endpoints

use api_types::{
    Category as ApiCategory,
    envelope::{Empty, Success},
    expense::{Expense, ExpenseFields},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::ExpenseDraft;

use crate::{ServerError, extract::ApiJson, server::ServerState};

fn map_category(category: engine::Category) -> ApiCategory {
    match category {
        engine::Category::FoodAndDining => ApiCategory::FoodAndDining,
        engine::Category::Transportation => ApiCategory::Transportation,
        engine::Category::Shopping => ApiCategory::Shopping,
        engine::Category::Entertainment => ApiCategory::Entertainment,
        engine::Category::BillsAndUtilities => ApiCategory::BillsAndUtilities,
        engine::Category::Healthcare => ApiCategory::Healthcare,
        engine::Category::Education => ApiCategory::Education,
        engine::Category::Travel => ApiCategory::Travel,
        engine::Category::Other => ApiCategory::Other,
    }
}

fn map_expense(expense: engine::Expense) -> Expense {
    let date = expense.date_iso();
    Expense {
        id: expense.id,
        title: expense.title,
        amount: expense.amount,
        category: map_category(expense.category),
        date,
        notes: expense.notes,
    }
}

fn map_fields(fields: ExpenseFields) -> ExpenseDraft {
    ExpenseDraft {
        title: fields.title,
        amount: fields.amount,
        category: fields.category,
        date: fields.date,
        notes: fields.notes,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Success<Vec<Expense>>>, ServerError> {
    let expenses = state
        .engine
        .list_expenses()
        .await?
        .into_iter()
        .map(map_expense)
        .collect();

    Ok(Json(Success::counted(expenses)))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Success<Expense>>, ServerError> {
    let expense = state.engine.expense(&id).await?;
    Ok(Json(Success::new(map_expense(expense))))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<ExpenseFields>,
) -> Result<(StatusCode, Json<Success<Expense>>), ServerError> {
    let expense = state.engine.create_expense(map_fields(payload)).await?;
    tracing::info!("expense {} created", expense.id);
    Ok((StatusCode::CREATED, Json(Success::new(map_expense(expense)))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<ExpenseFields>,
) -> Result<Json<Success<Expense>>, ServerError> {
    let expense = state.engine.update_expense(&id, map_fields(payload)).await?;
    tracing::info!("expense {id} updated");
    Ok(Json(Success::new(map_expense(expense))))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Success<Empty>>, ServerError> {
    state.engine.delete_expense(&id).await?;
    tracing::info!("expense {id} deleted");
    Ok(Json(Success::new(Empty {})))
}
