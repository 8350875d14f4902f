//! 종가 min-max 정규화.
//!
//! 조회된 전체 범위의 종가 열에 스케일을 적합(fit)하고,
//! 같은 스케일로 예측 윈도우 인코딩과 모델 출력 디코딩을 수행합니다.
//! 스케일러는 요청 단위로 생성되고 응답 생성 후 폐기됩니다.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// [0, 1] 구간 min-max 스케일러.
///
/// `encode(x) = (x - min) / (max - min)`
/// `decode(y) = y * (max - min) + min`
///
/// 평탄한 시리즈(`max == min`)에서는 나눗셈 대신
/// `encode → 0`, `decode → min`으로 처리합니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// 종가 열 전체에 스케일을 적합합니다.
    ///
    /// 인코딩과 디코딩 모두 같은 적합 결과를 재사용해야
    /// 왕복 정확도가 유지됩니다.
    pub fn fit(closes: &[Decimal]) -> Self {
        if closes.is_empty() {
            return Self { min: 0.0, max: 0.0 };
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for close in closes {
            let value = close.to_f64().unwrap_or_default();
            min = min.min(value);
            max = max.max(value);
        }

        Self { min, max }
    }

    /// 적합된 최솟값.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// 적합된 최댓값.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// 평탄한 시리즈(`max == min`)인지 확인합니다.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// 원시 가격을 [0, 1]로 인코딩.
    pub fn encode(&self, x: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (x - self.min) / (self.max - self.min)
    }

    /// 정규화된 값을 가격 단위로 디코딩.
    pub fn decode(&self, y: f64) -> f64 {
        if self.is_degenerate() {
            return self.min;
        }
        y * (self.max - self.min) + self.min
    }

    /// 종가 슬라이스를 한 번에 인코딩.
    pub fn encode_series(&self, closes: &[Decimal]) -> Vec<f64> {
        closes
            .iter()
            .map(|c| self.encode(c.to_f64().unwrap_or_default()))
            .collect()
    }
}
