//! 통합 API 에러 응답 타입.
//!
//! 모든 파이프라인/제공자 실패는 핸들러 경계에서 단일
//! `{"error": "<message>"}` 페이로드로 변환됩니다.
//! 어떤 요청 에러도 서빙 프로세스를 중단시키지 않습니다.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use forecast_core::ForecastError;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {"error": "Symbol not found: XYZ"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// 사람이 읽을 수 있는 에러 메시지
    pub error: String,
}

impl ErrorResponse {
    /// 새 에러 응답 생성.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

/// ForecastError를 상태 코드 + 에러 페이로드로 변환.
///
/// - 404: 심볼 없음 / 데이터 없음
/// - 422: 히스토리 부족
/// - 502: 업스트림(데이터/모델) 실패
/// - 500: 내부 에러
pub fn forecast_error_response(err: ForecastError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        ForecastError::SymbolNotFound(_) | ForecastError::NoData(_) => StatusCode::NOT_FOUND,
        ForecastError::InsufficientHistory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ForecastError::ForecastUnavailable(_) | ForecastError::Data(_) => StatusCode::BAD_GATEWAY,
        ForecastError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ErrorResponse::new(err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_payload_shape() {
        let response = ErrorResponse::new("Not enough data");
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"error":"Not enough data"}"#);
    }

    #[test]
    fn test_status_mapping() {
        let (status, _) = forecast_error_response(ForecastError::SymbolNotFound("X".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = forecast_error_response(ForecastError::NoData("X".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = forecast_error_response(ForecastError::InsufficientHistory {
            required: 60,
            provided: 10,
        });
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = forecast_error_response(ForecastError::ForecastUnavailable("x".into()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, body) = forecast_error_response(ForecastError::Internal("bug".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal error: bug");
    }
}
