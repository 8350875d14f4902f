//! 모멘텀 지표 (Momentum Indicators).
//!
//! 일일 수익률과 RSI를 제공합니다.
//!
//! RSI는 수익률의 롤링 산술 평균 방식을 사용합니다
//! (pandas `rolling(window).mean()`과 동일). Wilder 평활이나
//! EWM 방식과는 값이 다릅니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 일일 수익률 계산.
    ///
    /// `return[i] = price[i] / price[i-1] - 1`
    ///
    /// # 반환
    /// 각 시점의 수익률 (첫 번째와 직전 가격이 0인 시점은 None)
    pub fn daily_returns(&self, prices: &[Decimal]) -> Vec<Option<Decimal>> {
        if prices.is_empty() {
            return Vec::new();
        }

        let mut result = Vec::with_capacity(prices.len());
        result.push(None);

        for i in 1..prices.len() {
            if prices[i - 1].is_zero() {
                result.push(None);
            } else {
                result.push(Some(prices[i] / prices[i - 1] - Decimal::ONE));
            }
        }

        result
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// 직전 `period`개 수익률 윈도우에서
    /// 평균 상승폭과 평균 하락폭(절대값)을 구해
    /// RSI = 100 - 100 / (1 + 상승폭/하락폭)로 계산합니다.
    ///
    /// 평균 하락폭이 0인 윈도우(무손실)는 비율이 정의되지 않으므로
    /// None으로 저장됩니다. 다운스트림의 중립값 대입은
    /// `IndicatorSeries::latest_rsi_or_neutral`이 담당합니다.
    ///
    /// # 반환
    /// 0-100 사이의 RSI 값들 (윈도우가 차기 전 구간은 None)
    pub fn rsi(
        &self,
        prices: &[Decimal],
        params: RsiParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "period must be greater than zero".to_string(),
            ));
        }

        if prices.len() < period + 1 {
            return Err(IndicatorError::InsufficientData {
                required: period + 1,
                provided: prices.len(),
            });
        }

        let returns = self.daily_returns(prices);
        let period_decimal = Decimal::from(period);

        let mut result = Vec::with_capacity(prices.len());

        for i in 0..prices.len() {
            // 윈도우: returns[i-period+1..=i], 모두 정의되어야 함 (i >= period)
            if i < period {
                result.push(None);
                continue;
            }

            let window = &returns[i + 1 - period..=i];
            if window.iter().any(|r| r.is_none()) {
                result.push(None);
                continue;
            }

            let mut gain_sum = Decimal::ZERO;
            let mut loss_sum = Decimal::ZERO;
            for r in window.iter().flatten() {
                if *r > Decimal::ZERO {
                    gain_sum += *r;
                } else {
                    loss_sum += r.abs();
                }
            }

            let avg_gain = gain_sum / period_decimal;
            let avg_loss = loss_sum / period_decimal;

            if avg_loss.is_zero() {
                result.push(None);
            } else {
                let rs = avg_gain / avg_loss;
                let rsi = dec!(100) - (dec!(100) / (Decimal::ONE + rs));
                result.push(Some(rsi));
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_daily_returns() {
        let momentum = MomentumCalculator::new();
        let prices = vec![dec!(100), dec!(110), dec!(99)];

        let returns = momentum.daily_returns(&prices);

        assert!(returns[0].is_none());
        assert_eq!(returns[1], Some(dec!(0.1)));
        assert_eq!(returns[2], Some(dec!(-0.1)));
    }

    #[test]
    fn test_daily_returns_zero_prev_price() {
        let momentum = MomentumCalculator::new();
        let prices = vec![dec!(0), dec!(10)];

        let returns = momentum.daily_returns(&prices);
        assert!(returns[1].is_none());
    }

    #[test]
    fn test_rsi_warmup_boundary() {
        let momentum = MomentumCalculator::new();
        // 교대로 상승/하락하는 시리즈 (상승과 하락이 모두 존재)
        let prices: Vec<Decimal> = (0..30)
            .map(|i| if i % 2 == 0 { dec!(100) } else { dec!(102) })
            .collect();

        let rsi = momentum.rsi(&prices, RsiParams::default()).unwrap();

        assert!(rsi[13].is_none());
        assert!(rsi[14].is_some());
    }

    #[test]
    fn test_rsi_bounded() {
        let momentum = MomentumCalculator::new();
        let prices: Vec<Decimal> = (0..40)
            .map(|i| Decimal::from(100 + (i * 7 % 13) - 6))
            .collect();

        let rsi = momentum.rsi(&prices, RsiParams::default()).unwrap();

        for value in rsi.iter().flatten() {
            assert!(*value >= Decimal::ZERO);
            assert!(*value <= dec!(100));
        }
    }

    #[test]
    fn test_rsi_zero_loss_window_is_undefined() {
        let momentum = MomentumCalculator::new();
        // 단조 상승: 모든 윈도우가 무손실
        let prices: Vec<Decimal> = (0..20).map(|i| Decimal::from(100 + i)).collect();

        let rsi = momentum.rsi(&prices, RsiParams::default()).unwrap();

        for value in rsi.iter().skip(14) {
            assert!(value.is_none());
        }
    }

    #[test]
    fn test_rsi_known_value() {
        let momentum = MomentumCalculator::new();
        // 기간 2: 윈도우 [+10%, -5%] → avg_gain=0.05, avg_loss=0.025
        // rs=2, rsi = 100 - 100/3 ≈ 66.67
        let prices = vec![dec!(100), dec!(110), dec!(104.5)];

        let rsi = momentum.rsi(&prices, RsiParams { period: 2 }).unwrap();

        let value = rsi[2].unwrap();
        assert!((value - dec!(66.6666666666667)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let momentum = MomentumCalculator::new();
        let prices = vec![dec!(100); 14];

        assert!(momentum.rsi(&prices, RsiParams::default()).is_err());
    }
}
