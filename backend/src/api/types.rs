//! REST API types.
//!
//! Request options arrive as multipart text fields next to the uploaded
//! file; responses are camelCase JSON.

use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::parse_bool;
use crate::error::{QueryError, ServerError, ServerResult};
use crate::models::OutputRows;
use crate::query::pipeline::{AnalysisReport, AnalyzeOptions};
use crate::query::{MenuFilter, Mode};

/// Option fields collected from a multipart upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzeForm {
    pub menu: Option<String>,
    pub mode: Option<String>,
    pub invalid_only: Option<String>,
    pub hide_empty: Option<String>,
}

impl AnalyzeForm {
    /// Record a text field by its multipart name; unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        match name {
            "menu" => self.menu = Some(value),
            "mode" => self.mode = Some(value),
            "invalidOnly" => self.invalid_only = Some(value),
            "hideEmpty" => self.hide_empty = Some(value),
            _ => {}
        }
    }

    /// Turn the form into analysis options. `hide_empty_default` applies
    /// when the form does not carry `hideEmpty`.
    pub fn into_options(self, hide_empty_default: bool) -> ServerResult<AnalyzeOptions> {
        let flag = |value: Option<String>, default: bool| -> ServerResult<bool> {
            match value {
                None => Ok(default),
                Some(v) => parse_bool(&v)
                    .ok_or_else(|| ServerError::BadRequest(format!("Invalid boolean '{}'", v))),
            }
        };

        let mode = match self.mode.as_deref() {
            None | Some("") => Mode::default(),
            Some(name) => name.parse::<Mode>().map_err(|e: QueryError| {
                ServerError::BadRequest(e.to_string())
            })?,
        };
        let mode = match mode {
            Mode::NameListing { .. } => Mode::NameListing {
                invalid_only: flag(self.invalid_only, false)?,
            },
            Mode::ComboSummary { .. } => Mode::ComboSummary {
                suppress_empty: flag(self.hide_empty, hide_empty_default)?,
            },
        };

        let menu = match self.menu.as_deref() {
            None | Some("") => MenuFilter::All,
            Some(menu) => MenuFilter::from(menu),
        };

        Ok(AnalyzeOptions {
            menu,
            mode,
            strict_columns: false,
        })
    }
}

/// Message attached to the response for an upload with no content.
pub const EMPTY_INPUT_MESSAGE: &str = "The uploaded CSV file is empty";

/// Response sent after a CSV upload is analyzed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// Unique analysis identifier
    pub analysis_id: String,

    /// "ready", "warning" (required columns missing) or "empty"
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub encoding: String,
    pub columns: Vec<String>,
    pub missing_columns: Vec<String>,
    pub row_count: usize,

    /// Selectable root menus
    pub menus: Vec<String>,

    /// Output rows, serialized as top-level `mode` and `rows`
    #[serde(flatten)]
    pub result: OutputRows,
}

impl From<AnalysisReport> for AnalyzeResponse {
    fn from(report: AnalysisReport) -> Self {
        let (status, message) = if report.is_empty_input() {
            ("empty", Some(EMPTY_INPUT_MESSAGE.to_string()))
        } else if report.missing_columns.is_empty() {
            ("ready", None)
        } else {
            let message = format!("Missing columns: {}", report.missing_columns.join(", "));
            ("warning", Some(message))
        };

        AnalyzeResponse {
            analysis_id: Uuid::new_v4().to_string(),
            status: status.to_string(),
            message,
            encoding: report.encoding,
            columns: report.columns,
            missing_columns: report.missing_columns,
            row_count: report.row_count,
            menus: report.menus,
            result: report.output,
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "analysisId": Uuid::new_v4().to_string(),
        "status": "error",
        "message": error,
        "menus": [],
        "missingColumns": [],
        "rowCount": 0,
        "mode": null,
        "rows": []
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::pipeline::analyze_text;

    #[test]
    fn test_form_defaults() {
        let options = AnalyzeForm::default().into_options(false).unwrap();
        assert_eq!(options.menu, MenuFilter::All);
        assert_eq!(options.mode, Mode::ComboSummary { suppress_empty: false });
    }

    #[test]
    fn test_form_hide_empty_default_from_config() {
        let options = AnalyzeForm::default().into_options(true).unwrap();
        assert_eq!(options.mode, Mode::ComboSummary { suppress_empty: true });
    }

    #[test]
    fn test_form_names_mode() {
        let mut form = AnalyzeForm::default();
        form.set("mode", "names".into());
        form.set("invalidOnly", "true".into());
        form.set("menu", "Lunch".into());
        form.set("theme", "dark".into());

        let options = form.into_options(true).unwrap();
        assert_eq!(options.menu, MenuFilter::Root("Lunch".into()));
        assert_eq!(options.mode, Mode::NameListing { invalid_only: true });
    }

    #[test]
    fn test_form_rejects_bad_values() {
        let mut form = AnalyzeForm::default();
        form.set("mode", "grid".into());
        assert!(matches!(form.into_options(false), Err(ServerError::BadRequest(_))));

        let mut form = AnalyzeForm::default();
        form.set("hideEmpty", "sometimes".into());
        assert!(matches!(form.into_options(false), Err(ServerError::BadRequest(_))));
    }

    #[test]
    fn test_response_status() {
        let report = analyze_text("SKU,Name\nA1,Burger", &AnalyzeOptions::default()).unwrap();
        let response = AnalyzeResponse::from(report);
        assert_eq!(response.status, "warning");
        assert_eq!(response.missing_columns.len(), 3);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["mode"], "combo-summary");
        assert_eq!(value["rowCount"], 1);
        assert_eq!(value["missingColumns"][0], "Parent SKU");
        assert!(value["rows"].is_array());
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_empty_input_response() {
        let report = AnalysisReport::empty(Mode::NameListing { invalid_only: false });
        let value = serde_json::to_value(AnalyzeResponse::from(report)).unwrap();
        assert_eq!(value["status"], "empty");
        assert_eq!(value["message"], EMPTY_INPUT_MESSAGE);
        assert_eq!(value["mode"], "name-listing");
        assert_eq!(value["rows"], serde_json::json!([]));
    }

    #[test]
    fn test_error_response_shape() {
        let value = error_response("No file provided");
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "No file provided");
        assert_eq!(value["rows"], serde_json::json!([]));
    }
}
