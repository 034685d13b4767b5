use serde::Serialize;

/// Status reported by every mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Error,
    Queued,
    Success,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Error => "error",
            Status::Queued => "queued",
            Status::Success => "success",
        }
    }
}
