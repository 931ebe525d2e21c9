use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Display-ready invoice content. Every field is already formatted text;
/// the document builder does no arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    pub name: String,
    pub date: String,
    pub bill_to: Vec<String>,
    pub salary_description: String,
    pub details: Vec<DetailLine>,
    pub total: String,
    pub total_words: String,
}

/// A line in the DESCRIPTION / AMOUNT table.
///
/// Accepts the structured `{"description", "amount"}` form and the older
/// `"Label: value"` string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailLine {
    Item {
        #[serde(default, deserialize_with = "scalar_text")]
        description: String,
        #[serde(default, deserialize_with = "scalar_text")]
        amount: String,
    },
    Text(String),
    Other(serde_json::Value),
}

/// Numbers and booleans become their text, `null` an empty cell.
fn scalar_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!("expected text, found {other}"))),
    }
}

impl DetailLine {
    pub fn item(description: impl Into<String>, amount: impl Into<String>) -> Self {
        DetailLine::Item {
            description: description.into(),
            amount: amount.into(),
        }
    }

    /// Split into (description, amount) cells.
    pub fn cells(&self) -> (String, String) {
        match self {
            DetailLine::Item {
                description,
                amount,
            } => (description.clone(), amount.clone()),
            DetailLine::Text(text) => match text.split_once(':') {
                Some((label, value)) => (label.trim().to_string(), value.trim().to_string()),
                None => (text.clone(), String::new()),
            },
            DetailLine::Other(value) => (value.to_string(), String::new()),
        }
    }
}
