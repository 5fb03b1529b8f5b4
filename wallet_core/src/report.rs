//! Structured results handed back to the presentation layer.

use serde::Serialize;

/// A key/value row inside a report section.
#[derive(Clone, Debug, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// One collapsible section of a rendered result.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub title: String,
    pub open_by_default: bool,
    pub content: Vec<KeyValue>,
    pub sub_items: Vec<ReportSection>,
}

impl ReportSection {
    pub fn new(title: impl Into<String>, open_by_default: bool) -> Self {
        Self {
            title: title.into(),
            open_by_default,
            content: Vec::new(),
            sub_items: Vec::new(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.content.push(KeyValue {
            key: key.into(),
            value: value.into(),
        });
    }
}

/// The full structured result of an action.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Report {
    pub sections: Vec<ReportSection>,
}

/// Terminal status of an action.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionStatus {
    pub result: String,
    pub is_error: bool,
    pub is_success: bool,
}

impl ActionStatus {
    pub fn success(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            is_error: false,
            is_success: true,
        }
    }

    pub fn error(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            is_error: true,
            is_success: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outward_json_shape() {
        let mut section = ReportSection::new("Result", true);
        section.push("Type", "TrustSet");
        let report = Report {
            sections: vec![section],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sections"][0]["title"], "Result");
        assert_eq!(json["sections"][0]["openByDefault"], true);
        assert_eq!(json["sections"][0]["content"][0]["key"], "Type");
        assert_eq!(json["sections"][0]["subItems"], serde_json::json!([]));
    }

    #[test]
    fn status_triple() {
        let ok = ActionStatus::success("done");
        assert!(ok.is_success && !ok.is_error);
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["isSuccess"], true);
        assert_eq!(json["isError"], false);

        let bad = ActionStatus::error("nope");
        assert!(bad.is_error && !bad.is_success);
    }
}
