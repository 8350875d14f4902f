//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.
//!
//! 회귀 모델 인스턴스는 프로세스 전역에서 하나이며, 반복 추론이
//! 내부 버퍼를 변경하므로 `tokio::sync::Mutex`로 접근을 직렬화합니다.
//! 지표/정규화/분류 단계는 요청별로 독립적이라 병렬 실행됩니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use forecast_analytics::ml::{share_predictor, NextValuePredictor, SharedPredictor};
use forecast_core::AppConfig;
use forecast_exchange::HistoricalDataProvider;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 회귀 모델 - 직렬화된 접근 (프로세스당 1개 인스턴스)
    pub predictor: SharedPredictor,

    /// 과거 일봉 데이터 제공자
    pub provider: Arc<dyn HistoricalDataProvider>,

    /// 파이프라인 설정
    pub config: AppConfig,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    ///
    /// # 인자
    /// * `predictor` - 로드된 회귀 모델
    /// * `provider` - 시장 데이터 제공자
    /// * `config` - 파이프라인 설정
    pub fn new(
        predictor: Box<dyn NextValuePredictor>,
        provider: Arc<dyn HistoricalDataProvider>,
        config: AppConfig,
    ) -> Self {
        Self {
            predictor: share_predictor(predictor),
            provider,
            config,
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }

    /// 로드된 모델 이름 반환.
    pub async fn model_name(&self) -> String {
        self.predictor.lock().await.model_name().to_string()
    }
}
