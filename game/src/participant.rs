use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registration details collected before a challenge starts. The phone number
/// is an optional passthrough with no behavioral contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub department: String,
    pub student_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// One combined message for every missing required field, surfaced as a
/// single blocking alert rather than field-by-field feedback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("please fill in every field before starting (missing: {})", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl Participant {
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        student_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            student_id: student_id.into(),
            phone_number: None,
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.department.is_empty() {
            missing.push("department");
        }
        if self.student_id.is_empty() {
            missing.push("student id");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}
