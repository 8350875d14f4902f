//! 요청 단위 파이프라인 오케스트레이션.
//!
//! 일봉 시퀀스 하나에서 응답 객체에 필요한 모든 것을 도출합니다:
//! 지표 → 스케일러 적합 → 반복 예측 → 시그널 분류 → 차트.
//! 모든 파생물은 같은 불변 입력의 결정적 함수이며,
//! 요청 간 공유되는 가변 상태는 모델 인스턴스뿐입니다.
//!
//! 모델 접근만 직렬화하면 되므로 [`run_pipeline_shared`]는
//! 예측 루프 구간에서만 잠금을 보유하고, 지표/정규화/분류/차트
//! 단계는 요청별로 병렬 실행됩니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use forecast_core::{
    ChartData, ForecastError, ForecastPoint, ForecastResult, PriceBar, TradingSignal,
};

use crate::chart::assemble_chart;
use crate::forecast::project;
use crate::indicators::{IndicatorEngine, IndicatorError, IndicatorSeries};
use crate::ml::{NextValuePredictor, SharedPredictor};
use crate::scaling::MinMaxScaler;
use crate::signal::{classify, Trend};

/// 파이프라인 실행 결과.
///
/// 응답 직렬화 전의 도메인 값들입니다. 표시용 반올림은
/// 서빙 계층에서 수행합니다 (`difference`는 분류기가 반올림).
#[derive(Debug, Clone)]
pub struct PredictionReport {
    /// 요청 심볼
    pub symbol: String,
    /// 가장 최근 실측 종가
    pub current_price: Decimal,
    /// 트레이딩 시그널
    pub signal: TradingSignal,
    /// 예측 추세
    pub trend: Trend,
    /// 최신 RSI (미정의 시 중립값 50 대입)
    pub rsi: Decimal,
    /// 수익률 변동성 (%)
    pub volatility: Decimal,
    /// 최근 거래일 거래량
    pub volume: Decimal,
    /// 최근 거래일 고가
    pub day_high: Decimal,
    /// 최근 거래일 저가
    pub day_low: Decimal,
    /// 익일 예측가 - 현재가 (2자리 반올림)
    pub difference: Decimal,
    /// 차트 페이로드
    pub chart: ChartData,
    /// 7일 예측
    pub forecast: Vec<ForecastPoint>,
}

/// 예측 전 단계: 지표 계산과 스케일러 적합.
fn prepare(bars: &[PriceBar]) -> ForecastResult<(IndicatorSeries, Vec<Decimal>, MinMaxScaler)> {
    let indicators = IndicatorEngine::new().compute(bars).map_err(|e| match e {
        IndicatorError::InsufficientData { required, provided } => {
            ForecastError::InsufficientHistory { required, provided }
        }
        IndicatorError::InvalidParameter(msg) => ForecastError::Internal(msg),
    })?;

    let closes: Vec<Decimal> = bars.iter().map(|b| b.close).collect();

    // 스케일러는 전체 범위에 적합하고 인코딩/디코딩에 재사용
    let scaler = MinMaxScaler::fit(&closes);
    if scaler.is_degenerate() {
        debug!("Flat close series, using degenerate scaling");
    }

    Ok((indicators, closes, scaler))
}

/// 예측 후 단계: 시그널 분류와 차트 조립.
fn finish(
    symbol: &str,
    bars: &[PriceBar],
    indicators: &IndicatorSeries,
    forecast: Vec<ForecastPoint>,
) -> ForecastResult<PredictionReport> {
    let last_bar = bars
        .last()
        .ok_or_else(|| ForecastError::Internal("Empty bar sequence".to_string()))?;

    let current_rsi = indicators.latest_rsi_or_neutral();
    let next_day_price = forecast
        .first()
        .map(|p| p.price)
        .ok_or_else(|| ForecastError::Internal("Empty forecast".to_string()))?;

    let decision = classify(last_bar.close, next_day_price, current_rsi);

    let chart = assemble_chart(bars, &indicators.sma50, &indicators.ema20);

    info!(
        %symbol,
        signal = %decision.signal,
        difference = %decision.difference,
        "Pipeline completed"
    );

    Ok(PredictionReport {
        symbol: symbol.to_string(),
        current_price: last_bar.close,
        signal: decision.signal,
        trend: decision.trend,
        rsi: current_rsi,
        volatility: indicators.volatility_pct,
        volume: last_bar.volume,
        day_high: last_bar.high,
        day_low: last_bar.low,
        difference: decision.difference,
        chart,
        forecast,
    })
}

/// 파이프라인 실행 (단독 모델).
///
/// 호출자가 이미 모델에 대한 배타적 접근을 보장하는 경우
/// (테스트, 단일 스레드 배치) 사용합니다.
///
/// # 에러
/// 60봉 미만이면 `InsufficientHistory`, 모델 실패 시
/// `ForecastUnavailable`. 부분 결과는 반환되지 않습니다.
pub fn run_pipeline(
    symbol: &str,
    bars: &[PriceBar],
    predictor: &mut dyn NextValuePredictor,
    today: NaiveDate,
) -> ForecastResult<PredictionReport> {
    let (indicators, closes, scaler) = prepare(bars)?;
    let forecast = project(&closes, &scaler, predictor, today)?;
    finish(symbol, bars, &indicators, forecast)
}

/// 파이프라인 실행 (공유 모델).
///
/// 예측 루프 전체가 하나의 잠금 아래에서 수행되어 동시 요청 간
/// 윈도우가 섞이지 않습니다. 지표/정규화/분류/차트 단계는 잠금
/// 밖에서 실행되므로 요청 간 병렬화됩니다.
pub async fn run_pipeline_shared(
    symbol: &str,
    bars: &[PriceBar],
    predictor: &SharedPredictor,
    today: NaiveDate,
) -> ForecastResult<PredictionReport> {
    let (indicators, closes, scaler) = prepare(bars)?;

    let forecast = {
        let mut guard = predictor.lock().await;
        project(&closes, &scaler, guard.as_mut(), today)?
    };

    finish(symbol, bars, &indicators, forecast)
}
