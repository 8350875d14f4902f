//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average, 첫 종가 시드)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 50 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n
    ///
    /// # 반환
    /// 각 시점의 SMA 값 (처음 period-1개는 None)
    pub fn sma(
        &self,
        prices: &[Decimal],
        params: SmaParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "period must be greater than zero".to_string(),
            ));
        }

        if prices.len() < period {
            return Err(IndicatorError::InsufficientData {
                required: period,
                provided: prices.len(),
            });
        }

        let mut result = Vec::with_capacity(prices.len());
        let period_decimal = Decimal::from(period);

        for i in 0..prices.len() {
            if i < period - 1 {
                result.push(None);
            } else {
                let sum: Decimal = prices[i + 1 - period..=i].iter().sum();
                result.push(Some(sum / period_decimal));
            }
        }

        Ok(result)
    }

    /// 첫 종가로 시드되는 지수 이동평균 (EMA) 계산.
    ///
    /// `ema[0] = price[0]`, 이후 `ema[i] = α·price[i] + (1-α)·ema[i-1]`,
    /// α = 2 / (period + 1).
    ///
    /// 시드 덕분에 전 구간에서 값이 정의됩니다. 초기 구간은 시드의
    /// 영향이 커서 기간-평균 EMA와 다르지만, 수렴 후에는 동일합니다.
    pub fn ema_seeded(
        &self,
        prices: &[Decimal],
        params: EmaParams,
    ) -> IndicatorResult<Vec<Decimal>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "period must be greater than zero".to_string(),
            ));
        }

        if prices.is_empty() {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }

        let alpha = dec!(2) / Decimal::from(period + 1);
        let one_minus_alpha = Decimal::ONE - alpha;

        let mut result = Vec::with_capacity(prices.len());
        let mut prev = prices[0];
        result.push(prev);

        for price in prices.iter().skip(1) {
            let ema = (*price * alpha) + (prev * one_minus_alpha);
            result.push(ema);
            prev = ema;
        }

        Ok(result)
    }
}
