//! The fixed loan application flow — prompt sequence, field coercion, and
//! payload construction.
//!
//! The flow is an ordered list of `(prompt, field-name, kind)` triples
//! consumed by position. Adding or removing a question is a one-line change
//! to [`LOAN_FIELDS`]; prompting, validation, and payload construction all
//! derive from the same table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Opening bot message. Asks the first field so the very first user turn is
/// already an answer.
pub const OPENING_MESSAGE: &str =
    "Welcome! Let's check your loan eligibility. Please enter your number of dependents.";

/// Terminal message when the prediction comes back "Approved".
pub const APPROVED_MESSAGE: &str = "🎉 Congratulations! You are eligible for the loan.";

/// Terminal message for any other prediction status.
pub const REJECTED_MESSAGE: &str =
    "❌ Sorry, based on your information, you are not eligible for the loan.";

/// Follow-up sent shortly after the result.
pub const RESTART_INVITATION: &str =
    "Would you like to check eligibility for another loan? Type 'restart' to begin again.";

/// Literal that resets the session, compared case-insensitively.
pub const RESTART_KEYWORD: &str = "restart";

/// Declared numeric kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
}

impl FieldKind {
    /// Coerce a raw answer to a JSON number of this kind.
    ///
    /// Strict parse of the trimmed input; non-finite floats are rejected
    /// (the wire format has no representation for them).
    pub fn coerce(&self, raw: &str) -> Option<Value> {
        let raw = raw.trim();
        match self {
            Self::Int => raw.parse::<i64>().ok().map(Value::from),
            Self::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Value::from),
        }
    }
}

/// One entry in the flow table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Prompt asking for this field. The first field's prompt is folded into
    /// [`OPENING_MESSAGE`] and never issued separately.
    pub prompt: &'static str,
    /// Payload field name.
    pub name: &'static str,
    pub kind: FieldKind,
}

/// The seven loan application fields, in prompt order.
pub const LOAN_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        prompt: "Please enter your number of dependents.",
        name: "dependents",
        kind: FieldKind::Int,
    },
    FieldSpec {
        prompt: "Enter your annual income:",
        name: "annual_income",
        kind: FieldKind::Float,
    },
    FieldSpec {
        prompt: "Enter the loan amount you need:",
        name: "loan_amount",
        kind: FieldKind::Float,
    },
    FieldSpec {
        prompt: "Enter the loan term (in months):",
        name: "loan_term",
        kind: FieldKind::Int,
    },
    FieldSpec {
        prompt: "Enter your credit score (300-900):",
        name: "credit_score",
        kind: FieldKind::Int,
    },
    FieldSpec {
        prompt: "Enter your residential assets value:",
        name: "residential_assets",
        kind: FieldKind::Float,
    },
    FieldSpec {
        prompt: "Enter your commercial assets value:",
        name: "commercial_assets",
        kind: FieldKind::Float,
    },
];

/// Number of prompts issued after the opening message.
pub fn prompt_count() -> usize {
    LOAN_FIELDS.len() - 1
}

/// Prompt for step `k` in `[0, prompt_count())`.
pub fn prompt(k: usize) -> &'static str {
    LOAN_FIELDS[k + 1].prompt
}

/// Fully coerced loan application, sent as-is to the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub dependents: i64,
    pub annual_income: f64,
    pub loan_amount: f64,
    pub loan_term: i64,
    pub credit_score: i64,
    pub residential_assets: f64,
    pub commercial_assets: f64,
}

impl LoanApplication {
    /// Coerce one raw answer per field, in table order.
    ///
    /// `answers` must supply at least `LOAN_FIELDS.len()` entries; extras are
    /// ignored (the answer buffer keeps growing across final-step retries).
    /// Fails with the first field whose answer does not parse as its kind.
    pub fn from_answers<S: AsRef<str>>(answers: &[S]) -> Result<Self, ValidationError> {
        let mut map = serde_json::Map::new();
        for (spec, raw) in LOAN_FIELDS.iter().zip(answers) {
            let value = spec
                .kind
                .coerce(raw.as_ref())
                .ok_or_else(|| ValidationError::new(spec.name))?;
            map.insert(spec.name.to_string(), value);
        }
        serde_json::from_value(Value::Object(map))
            .map_err(|_| ValidationError::new("application"))
    }
}
