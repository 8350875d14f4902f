//! 예측 endpoint.
//!
//! 심볼 하나에 대해 지표 계산, 7일 예측, 시그널 분류, 차트 데이터를
//! 한 번에 수행합니다.
//!
//! # 엔드포인트
//!
//! - `POST /predict` - 심볼 예측 및 시그널 조회

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::{NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use validator::Validate;

use forecast_analytics::{run_pipeline_shared, PredictionReport};
use forecast_core::{ChartData, SignalColor, TradingSignal};

use crate::error::{forecast_error_response, ApiResult, ErrorResponse};
use crate::state::AppState;

// ==================== 요청/응답 타입 ====================

/// 예측 요청.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct PredictRequest {
    /// 거래소 티커 (예: "AAPL", "BTC-USD")
    #[validate(length(min = 1, max = 32, message = "symbol must be 1-32 characters"))]
    pub symbol: String,
}

/// 예측 포인트 (표시용).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ForecastDay {
    /// 예측 대상 날짜 (YYYY-MM-DD)
    pub date: NaiveDate,
    /// 예측 가격 (2자리 반올림)
    pub price: f64,
}

/// 예측 응답.
///
/// 거래량을 제외한 모든 실수 값은 2자리로 반올림됩니다.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictResponse {
    /// 요청 심볼
    pub symbol: String,
    /// 가장 최근 실측 종가
    pub current_price: f64,
    /// 트레이딩 시그널
    #[schema(value_type = String, example = "BUY")]
    pub signal: TradingSignal,
    /// 시그널 표시 색상
    #[schema(value_type = String, example = "green")]
    pub signal_color: SignalColor,
    /// 최신 RSI
    pub rsi: f64,
    /// 수익률 변동성 (%)
    pub volatility: f64,
    /// 최근 거래일 거래량 (반올림 없음)
    pub volume: f64,
    /// 최근 거래일 고가
    pub day_high: f64,
    /// 최근 거래일 저가
    pub day_low: f64,
    /// 익일 예측가 - 현재가
    pub difference: f64,
    /// 차트 페이로드 (캔들 + SMA/EMA 오버레이)
    #[schema(value_type = Object)]
    pub chart_data: ChartData,
    /// 7일 예측
    pub forecast_7_days: Vec<ForecastDay>,
}

impl From<PredictionReport> for PredictResponse {
    fn from(report: PredictionReport) -> Self {
        Self {
            symbol: report.symbol,
            current_price: round2(report.current_price),
            signal: report.signal,
            signal_color: report.signal.color(),
            rsi: round2(report.rsi),
            volatility: round2(report.volatility),
            volume: report.volume.to_f64().unwrap_or_default(),
            day_high: round2(report.day_high),
            day_low: round2(report.day_low),
            difference: round2(report.difference),
            chart_data: report.chart,
            forecast_7_days: report
                .forecast
                .into_iter()
                .map(|p| ForecastDay {
                    date: p.date,
                    price: round2(p.price),
                })
                .collect(),
        }
    }
}

/// 표시용 2자리 반올림 f64 변환.
fn round2(value: Decimal) -> f64 {
    value.round_dp(2).to_f64().unwrap_or_default()
}

// ==================== Handler ====================

/// 심볼 예측 및 시그널 조회.
///
/// POST /predict
///
/// 설정된 시작일부터 오늘까지의 일봉을 조회한 뒤 파이프라인을
/// 실행합니다. 회귀 모델 접근은 요청 간 직렬화되며, 나머지 단계는
/// 요청별로 병렬 실행됩니다.
#[utoipa::path(
    post,
    path = "/predict",
    tag = "predict",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "예측 결과", body = PredictResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 404, description = "심볼/데이터 없음", body = ErrorResponse),
        (status = 422, description = "히스토리 부족", body = ErrorResponse),
        (status = 502, description = "업스트림 실패", body = ErrorResponse)
    )
)]
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> ApiResult<Json<PredictResponse>> {
    request.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!("Invalid request: {}", e))),
        )
    })?;

    info!(symbol = %request.symbol, "Prediction requested");

    let bars = state
        .provider
        .daily_bars(&request.symbol, state.config.history_start)
        .await
        .map_err(|e| {
            warn!(symbol = %request.symbol, error = %e, "Market data fetch failed");
            forecast_error_response(e.into())
        })?;

    let today = Utc::now().date_naive();

    // 예측 루프만 모델 잠금 아래에서 수행되고,
    // 지표/정규화/분류/차트 단계는 요청 간 병렬 실행된다.
    let report = run_pipeline_shared(&request.symbol, &bars, &state.predictor, today)
        .await
        .map_err(forecast_error_response)?;

    Ok(Json(report.into()))
}

/// 예측 라우터 생성.
pub fn predict_router() -> Router<Arc<AppState>> {
    Router::new().route("/", post(predict))
}
