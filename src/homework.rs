use serde_json::Value;

use crate::error::PollError;

/// Review status of a submission, as reported by the Practicum API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Human-readable verdict sent to the recipient.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Validate the shape of an API response and return its latest submission.
pub fn check_response(response: &Value) -> Result<&Value, PollError> {
    let map = response
        .as_object()
        .ok_or_else(|| PollError::malformed("not a mapping"))?;
    if !map.contains_key("current_date") {
        return Err(PollError::malformed("missing current_date"));
    }
    let homeworks = map
        .get("homeworks")
        .ok_or_else(|| PollError::malformed("missing homeworks"))?
        .as_array()
        .ok_or_else(|| PollError::malformed("homeworks not a list"))?;

    homeworks
        .first()
        .ok_or_else(|| PollError::malformed("empty homeworks"))
}

/// Render the status-change notification for one submission.
pub fn parse_status(homework: &Value) -> Result<String, PollError> {
    let map = homework
        .as_object()
        .ok_or_else(|| PollError::malformed("homework not a mapping"))?;

    let name = match map.get("homework_name") {
        None | Some(Value::Null) => return Err(PollError::malformed("missing homework_name")),
        Some(value) => value
            .as_str()
            .ok_or_else(|| PollError::malformed("homework_name not a string"))?,
    };
    let code = match map.get("status") {
        None | Some(Value::Null) => return Err(PollError::malformed("missing status")),
        Some(value) => value
            .as_str()
            .ok_or_else(|| PollError::malformed("status not a string"))?,
    };

    let status = HomeworkStatus::from_code(code)
        .ok_or_else(|| PollError::UnknownStatus(code.to_string()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}
