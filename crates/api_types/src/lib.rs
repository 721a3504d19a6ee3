use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of expense categories.
///
/// Serialized with the human readable label (`"Food & Dining"`), which is also
/// what the store keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Self::FoodAndDining,
        Self::Transportation,
        Self::Shopping,
        Self::Entertainment,
        Self::BillsAndUtilities,
        Self::Healthcare,
        Self::Education,
        Self::Travel,
        Self::Other,
    ];

    /// Returns the label used on the wire and in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsAndUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| format!("unknown category \"{value}\""))
    }
}

pub mod expense {
    use super::*;

    /// A stored expense as returned by the service.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: String,
        pub title: String,
        pub amount: f64,
        pub category: Category,
        /// ISO-8601 timestamp (`2024-03-01T00:00:00.000Z`).
        pub date: String,
        #[serde(default)]
        pub notes: String,
    }

    /// Request body for create and update.
    ///
    /// Every field is optional on the wire: create requires `title`, `amount`,
    /// `category` and `date`, update replaces only the fields that are present.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseFields {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub amount: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub notes: Option<String>,
    }

    /// Fully populated record a client submits (no `id`).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseInput {
        pub title: String,
        pub amount: f64,
        pub category: Category,
        /// `YYYY-MM-DD` or a full RFC 3339 timestamp.
        pub date: String,
        #[serde(default)]
        pub notes: String,
    }

    impl From<ExpenseInput> for ExpenseFields {
        fn from(input: ExpenseInput) -> Self {
            Self {
                title: Some(input.title),
                amount: Some(input.amount),
                category: Some(input.category.as_str().to_string()),
                date: Some(input.date),
                notes: Some(input.notes),
            }
        }
    }
}

pub mod envelope {
    use super::*;

    /// `{ "success": true, "count"?: n, "data": ... }`
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Success<T> {
        pub success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub count: Option<usize>,
        pub data: T,
    }

    impl<T> Success<T> {
        pub fn new(data: T) -> Self {
            Self {
                success: true,
                count: None,
                data,
            }
        }
    }

    impl<T> Success<Vec<T>> {
        pub fn counted(data: Vec<T>) -> Self {
            Self {
                success: true,
                count: Some(data.len()),
                data,
            }
        }
    }

    /// `{ "success": false, "message": "..." }`
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Failure {
        pub success: bool,
        pub message: String,
    }

    impl Failure {
        pub fn new(message: impl Into<String>) -> Self {
            Self {
                success: false,
                message: message.into(),
            }
        }
    }

    /// Payload of a successful delete, serialized as `{}`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct Empty {}
}

#[cfg(test)]
mod tests {
    use super::{Category, envelope, expense::ExpenseInput};

    #[test]
    fn category_labels_round_trip_through_try_from() {
        for category in Category::ALL {
            assert_eq!(Category::try_from(category.as_str()), Ok(category));
        }
        assert!(Category::try_from("Groceries").is_err());
        assert!(Category::try_from("food & dining").is_err());
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&Category::BillsAndUtilities).unwrap();
        assert_eq!(json, "\"Bills & Utilities\"");
    }

    #[test]
    fn list_envelope_carries_count() {
        let body = envelope::Success::counted(vec![1, 2, 3]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "count": 3, "data": [1, 2, 3] })
        );
    }

    #[test]
    fn single_envelope_omits_count() {
        let json = serde_json::to_value(envelope::Success::new(envelope::Empty {})).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": {} }));
    }

    #[test]
    fn input_notes_default_to_empty() {
        let input: ExpenseInput = serde_json::from_value(serde_json::json!({
            "title": "Lunch",
            "amount": 12.5,
            "category": "Food & Dining",
            "date": "2024-01-01",
        }))
        .unwrap();
        assert_eq!(input.notes, "");
    }
}
