//! 시장 데이터 조회 에러 타입.

use forecast_core::ForecastError;
use thiserror::Error;

/// 시장 데이터 제공자 에러.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    NetworkError(String),

    /// API 에러
    #[error("API error: {0}")]
    ApiError(String),

    /// 파싱/역직렬화 에러
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 심볼을 찾을 수 없음
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// 조회 범위에 데이터 없음
    #[error("No data for {0}")]
    NoData(String),

    /// 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 알 수 없는 에러
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ExchangeError {
    /// 재시도 가능한 에러인지 확인.
    ///
    /// 재시도 정책은 호출 계층의 몫이며 이 크레이트는 재시도하지 않습니다.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ExchangeError::NetworkError(_) | ExchangeError::Timeout(_)
        )
    }
}

impl From<ExchangeError> for ForecastError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::SymbolNotFound(symbol) => ForecastError::SymbolNotFound(symbol),
            ExchangeError::NoData(symbol) => ForecastError::NoData(symbol),
            other => ForecastError::Data(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        assert!(ExchangeError::NetworkError("reset".into()).is_retryable());
        assert!(ExchangeError::Timeout("10s".into()).is_retryable());
        assert!(!ExchangeError::SymbolNotFound("XYZ".into()).is_retryable());
    }

    #[test]
    fn test_conversion_to_forecast_error() {
        let err: ForecastError = ExchangeError::SymbolNotFound("XYZ".into()).into();
        assert!(matches!(err, ForecastError::SymbolNotFound(_)));

        let err: ForecastError = ExchangeError::NoData("XYZ".into()).into();
        assert!(matches!(err, ForecastError::NoData(_)));

        let err: ForecastError = ExchangeError::ParseError("bad json".into()).into();
        assert!(matches!(err, ForecastError::Data(_)));
    }
}
