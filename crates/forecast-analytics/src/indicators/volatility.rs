//! 변동성 지표 (Volatility Indicators).
//!
//! 일일 수익률의 표본 표준편차 기반 변동성을 제공합니다.

use rust_decimal::Decimal;

/// 변동성 지표 계산기.
#[derive(Debug, Default)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 수익률 변동성 계산 (% 단위).
    ///
    /// 정의된 일일 수익률의 표본 표준편차(분모 n-1)에 100을 곱합니다.
    /// 미정의 수익률은 계산에서 제외되며, 정의된 값이 2개 미만이면
    /// 0을 반환합니다.
    pub fn return_volatility_pct(&self, returns: &[Option<Decimal>]) -> Decimal {
        let defined: Vec<Decimal> = returns.iter().flatten().copied().collect();
        let n = defined.len();

        if n < 2 {
            return Decimal::ZERO;
        }

        let n_decimal = Decimal::from(n);
        let mean: Decimal = defined.iter().sum::<Decimal>() / n_decimal;

        let variance: Decimal = defined
            .iter()
            .map(|r| {
                let diff = *r - mean;
                diff * diff
            })
            .sum::<Decimal>()
            / Decimal::from(n - 1);

        Self::sqrt_decimal(variance) * Decimal::from(100)
    }

    /// Decimal 제곱근 계산 (Newton-Raphson 방법).
    ///
    /// Decimal 타입은 기본 제곱근 함수가 없으므로 직접 구현합니다.
    fn sqrt_decimal(value: Decimal) -> Decimal {
        if value <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let two = Decimal::from(2);
        let epsilon = Decimal::new(1, 12); // 1e-12

        let mut x = value;
        for _ in 0..64 {
            let next = (x + value / x) / two;
            if (next - x).abs() < epsilon {
                return next;
            }
            x = next;
        }

        x
    }
}
