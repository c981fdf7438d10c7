//! Anonymous Apex result type.

use serde::{Deserialize, Serialize};

/// Result of `executeAnonymous`.
///
/// Compile failures and uncaught exceptions are reported here with
/// `compiled`/`success` set to false; they are not errors of the call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecuteAnonymousResult {
    pub line: i64,
    pub column: i64,
    pub compiled: bool,
    pub success: bool,
    pub compile_problem: Option<String>,
    pub exception_message: Option<String>,
    pub exception_stack_trace: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_failure_shape() {
        let result: ExecuteAnonymousResult = serde_json::from_value(serde_json::json!({
            "line": 1,
            "column": 13,
            "compiled": false,
            "success": false,
            "compileProblem": "Unexpected token '('.",
            "exceptionMessage": null,
            "exceptionStackTrace": null
        }))
        .unwrap();

        assert!(!result.compiled);
        assert_eq!(result.column, 13);
        assert_eq!(result.compile_problem.as_deref(), Some("Unexpected token '('."));
        assert!(result.exception_message.is_none());
    }
}
