//! 기술적 지표 모듈.
//!
//! 일봉 시퀀스에서 예측 파이프라인이 소비하는 지표들을 계산합니다.
//!
//! # 지원 지표
//!
//! - **SMA(50)**: 단순 이동평균 — 윈도우가 차기 전 구간은 미정의(None)
//! - **EMA(20)**: 지수 이동평균 — 첫 종가로 시드되어 전 구간 정의
//! - **일일 수익률**: `close[i]/close[i-1] - 1`
//! - **RSI(14)**: 수익률 롤링 평균 기반 상대강도지수
//! - **변동성**: 일일 수익률 표본 표준편차 (% 단위)
//!
//! 모든 계산은 입력의 순수 함수이며 호출 간 상태를 공유하지 않습니다.

pub mod momentum;
pub mod trend;
pub mod volatility;

use rust_decimal::Decimal;
use thiserror::Error;

use forecast_core::PriceBar;

pub use momentum::{MomentumCalculator, RsiParams};
pub use trend::{EmaParams, SmaParams, TrendIndicators};
pub use volatility::VolatilityIndicators;

/// 파이프라인이 요구하는 최소 일봉 수.
///
/// 예측 윈도우(60)와 같습니다. 이보다 짧은 히스토리는
/// 지표 계산 단계에서 거부됩니다.
pub const MIN_BARS: usize = 60;

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("Insufficient data: need {required} bars, got {provided}")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// 일봉 시퀀스와 인덱스로 정렬된 지표 시리즈.
///
/// 미정의 구간은 `None`으로 표시되며 0과 구분됩니다.
#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    /// SMA(50) — i < 49 구간은 None
    pub sma50: Vec<Option<Decimal>>,
    /// EMA(20) — `ema[0] = close[0]`으로 시드되어 전 구간 정의
    pub ema20: Vec<Decimal>,
    /// 일일 수익률 — i = 0은 None
    pub daily_returns: Vec<Option<Decimal>>,
    /// RSI(14) — 윈도우가 차기 전 구간과 무손실 윈도우는 None
    pub rsi14: Vec<Option<Decimal>>,
    /// 수익률 표본 표준편차 × 100
    pub volatility_pct: Decimal,
}

impl IndicatorSeries {
    /// 최신 RSI 값을 반환하되, 미정의면 중립값 50을 대입합니다.
    ///
    /// 저장된 시리즈(`rsi14`)는 미정의 마커를 유지하며
    /// 대입은 다운스트림 소비자에게만 적용됩니다.
    pub fn latest_rsi_or_neutral(&self) -> Decimal {
        self.rsi14
            .last()
            .copied()
            .flatten()
            .unwrap_or(Decimal::from(50))
    }
}

/// 통합 지표 엔진.
///
/// 예측 파이프라인이 소비하는 모든 지표를 한 번에 계산합니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 일봉 시퀀스에서 지표 시리즈 계산.
    ///
    /// # 인자
    /// * `bars` - 날짜 오름차순 일봉 시퀀스
    ///
    /// # 에러
    /// 일봉이 [`MIN_BARS`]개 미만이면 `InsufficientData`.
    pub fn compute(&self, bars: &[PriceBar]) -> IndicatorResult<IndicatorSeries> {
        if bars.len() < MIN_BARS {
            return Err(IndicatorError::InsufficientData {
                required: MIN_BARS,
                provided: bars.len(),
            });
        }

        let closes: Vec<Decimal> = bars.iter().map(|b| b.close).collect();

        let sma50 = self.trend.sma(&closes, SmaParams::default())?;
        let ema20 = self.trend.ema_seeded(&closes, EmaParams::default())?;
        let daily_returns = self.momentum.daily_returns(&closes);
        let rsi14 = self.momentum.rsi(&closes, RsiParams::default())?;
        let volatility_pct = self.volatility.return_volatility_pct(&daily_returns);

        Ok(IndicatorSeries {
            sma50,
            ema20,
            daily_returns,
            rsi14,
            volatility_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bars(closes: &[Decimal]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| PriceBar {
                date: start + chrono::Duration::days(i as i64),
                open: *close,
                high: *close,
                low: *close,
                close: *close,
                volume: dec!(1000),
            })
            .collect()
    }

    #[test]
    fn test_compute_rejects_short_history() {
        let engine = IndicatorEngine::new();
        let closes: Vec<Decimal> = (0..59).map(|i| Decimal::from(100 + i)).collect();

        let result = engine.compute(&bars(&closes));
        assert!(matches!(
            result,
            Err(IndicatorError::InsufficientData {
                required: 60,
                provided: 59
            })
        ));
    }

    #[test]
    fn test_compute_alignment() {
        let engine = IndicatorEngine::new();
        let closes: Vec<Decimal> = (0..80).map(|i| Decimal::from(100 + i % 7)).collect();
        let series = engine.compute(&bars(&closes)).unwrap();

        assert_eq!(series.sma50.len(), 80);
        assert_eq!(series.ema20.len(), 80);
        assert_eq!(series.daily_returns.len(), 80);
        assert_eq!(series.rsi14.len(), 80);

        // 정의 경계: SMA는 49부터, 수익률은 1부터, RSI는 14부터
        assert!(series.sma50[48].is_none());
        assert!(series.sma50[49].is_some());
        assert!(series.daily_returns[0].is_none());
        assert!(series.daily_returns[1].is_some());
        assert!(series.rsi14[13].is_none());
        assert!(series.rsi14[14].is_some());
    }

    #[test]
    fn test_latest_rsi_neutral_substitution() {
        let engine = IndicatorEngine::new();
        // 상승만 있는 시리즈: 무손실 윈도우라 RSI는 저장상 None
        let closes: Vec<Decimal> = (0..70).map(|i| Decimal::from(100 + i)).collect();
        let series = engine.compute(&bars(&closes)).unwrap();

        assert!(series.rsi14.last().unwrap().is_none());
        assert_eq!(series.latest_rsi_or_neutral(), dec!(50));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let engine = IndicatorEngine::new();
        let closes: Vec<Decimal> = (0..65).map(|i| Decimal::from(200 - i % 5)).collect();
        let input = bars(&closes);

        let first = engine.compute(&input).unwrap();
        let second = engine.compute(&input).unwrap();

        assert_eq!(first.sma50, second.sma50);
        assert_eq!(first.rsi14, second.rsi14);
        assert_eq!(first.volatility_pct, second.volatility_pct);
    }
}
