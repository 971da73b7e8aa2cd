use serde::{Deserialize, Serialize};

/// A compilation error. One kind for the whole pipeline: any detected
/// malformation aborts processing of the input immediately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompileError {
    pub file: String,
    /// 1-based source line, when the failure is attributable to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub message: String,
}

impl CompileError {
    pub fn at(file: &str, line: u32, message: impl Into<String>) -> Self {
        CompileError {
            file: file.to_owned(),
            line: Some(line),
            message: message.into(),
        }
    }

    pub fn whole_file(file: &str, message: impl Into<String>) -> Self {
        CompileError {
            file: file.to_owned(),
            line: None,
            message: message.into(),
        }
    }

    /// Serialize to the JSON shape the CLI prints on stderr.
    /// Always includes all fields (null line when absent).
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "file":    self.file,
            "line":    self.line,
            "message": self.message,
        })
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.file, line, self.message),
            None => write!(f, "{}: {}", self.file, self.message),
        }
    }
}
