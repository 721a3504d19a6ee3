//! HTTP client for the expense service and the local state a front end keeps
//! on top of it.

pub use api::{ApiClient, ApiClientBuilder, ExpenseApi};
pub use envelope::normalize_list;
pub use error::ClientError;
pub use form::{ExpenseForm, Field, FormErrors};
pub use format::{format_amount, format_date};
pub use state::{ExpenseBook, Notice, NoticeKind, sort_by_date_desc};

pub use api_types::{
    Category,
    expense::{Expense, ExpenseFields, ExpenseInput},
};

mod api;
mod envelope;
mod error;
mod form;
mod format;
mod state;
