//! Storage and validation of expense records.
//!
//! [`Engine`] is the only entry point: it validates client-submitted
//! [`ExpenseDraft`]s and persists [`Expense`]s through sea-orm.

pub use category::Category;
pub use draft::ExpenseDraft;
pub use error::EngineError;
pub use expenses::Expense;
pub use ops::{Engine, EngineBuilder};

mod category;
mod draft;
mod error;
mod expenses;
mod ops;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
