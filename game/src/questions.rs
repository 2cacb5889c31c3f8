use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Ordered reference solutions, addressed by 1-based question number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    questions: Vec<String>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self {
            questions: [
                "let x = 1;",
                "const sum = (a, b) => a + b;",
                "console.log('Hello, World!');",
                "for (let i = 0; i < 5; i++) { console.log(i); }",
                "const doubled = [1, 2, 3].map((n) => n * 2);",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl QuestionBank {
    pub fn new(questions: Vec<String>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Reference code for question `number`, counted from 1.
    pub fn get(&self, number: u8) -> Option<&str> {
        if number == 0 {
            return None;
        }
        self.questions.get(usize::from(number) - 1).map(String::as_str)
    }

    /// Highest valid question number; the session wraps back to question 1
    /// after this one.
    pub fn last_number(&self) -> u8 {
        self.questions.len().clamp(1, usize::from(u8::MAX)) as u8
    }
}

/// Loads the bank from a JSON file, falling back to the built-in set when the
/// file is absent or malformed.
#[derive(Debug, Clone)]
pub struct QuestionBankStore {
    path: PathBuf,
}

impl QuestionBankStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("SPRINT_QUESTIONS_PATH") {
            return Self {
                path: PathBuf::from(explicit),
            };
        }
        Self {
            path: crate::leaderboard::config_dir().join("questions.json"),
        }
    }

    pub fn load(&self) -> QuestionBank {
        let Ok(bytes) = fs::read(&self.path) else {
            return QuestionBank::default();
        };
        serde_json::from_slice(&bytes).unwrap_or_default()
    }
}
