//! Call row

use cadence_client::resources::Call;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRow {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub priority: String,
    pub status: String,
    pub assignee: String,
    pub due: String,
}

impl CallRow {
    pub fn new(call: &Call) -> Self {
        let title = if call.title.trim().is_empty() {
            "(untitled)".to_string()
        } else {
            call.title.clone()
        };
        Self {
            id: call.id.clone(),
            title,
            kind: call.call_type.clone(),
            priority: call.priority.clone(),
            status: call.status.clone(),
            assignee: call.assignee.clone(),
            due: call.due_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untitled_call() {
        let call = Call {
            id: "c1".into(),
            call_type: "phone".into(),
            ..Call::default()
        };
        let row = CallRow::new(&call);
        assert_eq!(row.title, "(untitled)");
        assert_eq!(row.kind, "phone");
    }
}
