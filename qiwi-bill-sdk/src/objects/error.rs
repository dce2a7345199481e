//! The error body returned by the API on any non-200 status.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::datetime;

/// Error details reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub service_name: String,
    /// Machine-readable error code, e.g. `api.invoice.not.found`.
    pub error_code: String,
    pub description: String,
    /// Message suitable for showing to the customer.
    pub user_message: String,
    #[serde(with = "datetime")]
    pub date_time: OffsetDateTime,
    pub trace_id: String,
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let date_time =
            datetime::format(&self.date_time).unwrap_or_else(|_| self.date_time.to_string());
        write!(
            f,
            "ServiceName: {}, ErrorCode: {}, Description: {}, UserMessage: {}, DateTime: {}, TraceId: {}",
            self.service_name,
            self.error_code,
            self.description,
            self.user_message,
            date_time,
            self.trace_id
        )
    }
}

impl std::error::Error for ErrorResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        let error: ErrorResponse = serde_json::from_value(json!({
            "serviceName": "invoicing-api",
            "errorCode": "auth.unauthorized",
            "description": "Invalid token",
            "userMessage": "Invalid token",
            "dateTime": "2018-11-13T16:49:59.166+03:00",
            "traceId": "fd0e2a08c63ace83"
        }))
        .unwrap();

        assert_eq!(
            error.to_string(),
            "ServiceName: invoicing-api, ErrorCode: auth.unauthorized, \
             Description: Invalid token, UserMessage: Invalid token, \
             DateTime: 2018-11-13T16:49:59.166000+03:00, TraceId: fd0e2a08c63ace83"
        );
    }
}
