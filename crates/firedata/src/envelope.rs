use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::record::FireRecord;

/// JSON envelope used by every API route.
///
/// Contract: `success == true` implies `data` is present (possibly empty);
/// `success == false` implies `error` is present and `data` is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<FireRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl FireApiResponse {
    pub fn ok(data: Vec<FireRecord>) -> Self {
        let count = data.len();
        FireApiResponse {
            success: true,
            error: None,
            data: Some(data),
            count: Some(count),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        FireApiResponse {
            success: false,
            error: Some(error.into()),
            data: None,
            count: None,
        }
    }
}

/// Decode an active-fires response body, failing closed.
///
/// The body is parsed into the envelope shape explicitly; anything that does
/// not match is a `Decode` error, never a silently-empty result.
pub fn decode_active_fires(body: &str) -> Result<Vec<FireRecord>, DataError> {
    let envelope: FireApiResponse =
        serde_json::from_str(body).map_err(|e| DataError::Decode(e.to_string()))?;

    if !envelope.success {
        let message = envelope
            .error
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(DataError::Application(message));
    }

    envelope
        .data
        .ok_or_else(|| DataError::Decode("success response missing data field".to_string()))
}

#[cfg(test)]
mod tests {
    use super::decode_active_fires;
    use crate::error::DataError;

    #[test]
    fn decodes_records_in_response_order() {
        let body = r#"{"success":true,"count":2,"data":[
            {"latitude":34.1,"longitude":-118.3,"brightness":310,"confidence":85,
             "acq_date":"2024-01-01","acq_time":"1200","satellite":"Terra",
             "daynight":"D","frp":12.5},
            {"latitude":45.5,"longitude":-122.7,"brightness":301.2,"confidence":"low",
             "acq_date":"2024-01-01","acq_time":"1310","satellite":"Aqua",
             "daynight":"N","frp":7.0}]}"#;
        let fires = decode_active_fires(body).unwrap();
        assert_eq!(fires.len(), 2);
        assert_eq!(fires[0].latitude, 34.1);
        assert_eq!(fires[1].satellite, "Aqua");
    }

    #[test]
    fn empty_data_is_ok_and_empty() {
        let fires = decode_active_fires(r#"{"success":true,"data":[]}"#).unwrap();
        assert!(fires.is_empty());
    }

    #[test]
    fn failure_flag_carries_server_message() {
        let err = decode_active_fires(r#"{"success":false,"error":"x"}"#).unwrap_err();
        assert_eq!(err, DataError::Application("x".to_string()));
    }

    #[test]
    fn failure_without_message_reads_unknown() {
        let err = decode_active_fires(r#"{"success":false}"#).unwrap_err();
        assert_eq!(err, DataError::Application("Unknown error".to_string()));
    }

    #[test]
    fn failure_envelope_serializes_without_data() {
        let json = serde_json::to_value(crate::FireApiResponse::failure("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn malformed_json_fails_closed() {
        assert!(matches!(
            decode_active_fires("not json"),
            Err(DataError::Decode(_))
        ));
    }

    #[test]
    fn shape_mismatch_fails_closed() {
        // success:true but data rows missing required fields
        let err =
            decode_active_fires(r#"{"success":true,"data":[{"latitude":1.0}]}"#).unwrap_err();
        assert!(matches!(err, DataError::Decode(_)));

        let err = decode_active_fires(r#"{"success":true}"#).unwrap_err();
        assert!(matches!(err, DataError::Decode(_)));
    }
}
