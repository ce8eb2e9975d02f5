//! Text to haptic pattern translation endpoint

use axum::body::Bytes;
use axum::extract::State;
use axum::{Extension, Json};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use tracing::{error, info, warn};

use super::AppState;
use crate::api::ApiError;
use crate::types::{TraceId, TranslationRequest, TranslationResult};

// ============================================================================
// Request Body
// ============================================================================

/// JSON body of `POST /haptic_translate/`
///
/// ```json
/// {
///   "text": "Hello World",
///   "preferences": { "speed": 1.0, "intensity": 0.8 },
///   "use_cache": true
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct TranslateRequestBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
    #[serde(default)]
    pub use_cache: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Preferences {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub intensity: Option<f64>,
}

/// Accept a JSON number or a numeric string (`"1.5"`); `null` is absent.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(v)) => Ok(Some(v)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("could not convert string to float: '{s}'"))),
    }
}

impl TranslateRequestBody {
    /// Parse a raw body. Anything that is not a non-empty JSON object is
    /// `MissingBody`; a well-formed object with badly typed fields is
    /// `InvalidInput`.
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|_| ApiError::MissingBody)?;

        match value.as_object() {
            Some(map) if !map.is_empty() => {}
            _ => return Err(ApiError::MissingBody),
        }

        serde_json::from_value(value).map_err(|e| ApiError::InvalidInput(e.to_string()))
    }

    /// Convert to a core request, rejecting missing or blank text.
    pub fn into_request(self) -> Result<TranslationRequest, ApiError> {
        let text = self
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or(ApiError::MissingText)?;
        let prefs = self.preferences.unwrap_or_default();

        Ok(TranslationRequest {
            text,
            speed_factor: prefs.speed,
            intensity: prefs.intensity,
            use_cache: self.use_cache.unwrap_or(true),
        })
    }
}

// ============================================================================
// Handler
// ============================================================================

/// POST /haptic_translate/ - convert text into a haptic pattern
pub async fn haptic_translate(
    State(state): State<AppState>,
    trace: Option<Extension<TraceId>>,
    body: Bytes,
) -> Result<Json<TranslationResult>, ApiError> {
    let trace = trace.map_or_else(TraceId::generate, |Extension(t)| t);
    info!(trace_id = %trace, "Received haptic translation request");

    let request = TranslateRequestBody::parse(&body)
        .and_then(TranslateRequestBody::into_request)
        .map_err(|e| {
            warn!(trace_id = %trace, error = %e, "Rejected translation request");
            e
        })?;

    state
        .translator
        .translate(&request, &trace)
        .map(Json)
        .map_err(|e| {
            let api_error = ApiError::from(e);
            if let ApiError::Internal(detail) = &api_error {
                error!(trace_id = %trace, detail = %detail, "Unexpected translation failure");
            }
            api_error
        })
}
