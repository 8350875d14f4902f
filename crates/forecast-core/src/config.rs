//! 애플리케이션 설정.
//!
//! 환경 변수에서 파이프라인 설정을 로드합니다.
//! `.env` 파일 로드는 바이너리 진입점(dotenvy)에서 처리합니다.

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::warn;

/// 히스토리 조회 시작일 기본값.
///
/// 데이터 제공자는 이 날짜부터 오늘까지의 일봉을 조회합니다.
const DEFAULT_HISTORY_START: &str = "2023-01-01";

/// ONNX 모델 파일 경로 기본값.
const DEFAULT_MODEL_PATH: &str = "models/price_model.onnx";

/// 파이프라인 설정.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 일봉 조회 시작일
    pub history_start: NaiveDate,
    /// ONNX 모델 파일 경로
    pub model_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            // 상수 파싱은 실패할 수 없음
            history_start: NaiveDate::parse_from_str(DEFAULT_HISTORY_START, "%Y-%m-%d")
                .unwrap_or(NaiveDate::MIN),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl AppConfig {
    /// 환경 변수에서 설정을 로드합니다.
    ///
    /// # 환경변수
    /// - `HISTORY_START_DATE`: 일봉 조회 시작일 (YYYY-MM-DD, 기본값: 2023-01-01)
    /// - `MODEL_PATH`: ONNX 모델 파일 경로 (기본값: models/price_model.onnx)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let history_start = match std::env::var("HISTORY_START_DATE") {
            Ok(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d").unwrap_or_else(|e| {
                warn!(value = %raw, error = %e, "Invalid HISTORY_START_DATE, using default");
                defaults.history_start
            }),
            Err(_) => defaults.history_start,
        };

        let model_path = std::env::var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        Self {
            history_start,
            model_path,
        }
    }

    /// 시작일을 지정합니다.
    pub fn with_history_start(mut self, start: NaiveDate) -> Self {
        self.history_start = start;
        self
    }

    /// 모델 경로를 지정합니다.
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }
}
