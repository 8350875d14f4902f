//! 예측 포인트 타입.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 단일 예측 포인트.
///
/// 예측 루프가 만들어내는 (달력일, 가격) 쌍입니다.
/// 날짜는 오늘 다음 날부터 간격 없이 증가합니다 (주말 포함).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 예측 대상 날짜
    pub date: NaiveDate,
    /// 역정규화된 예측 가격
    pub price: Decimal,
}

impl ForecastPoint {
    /// 새 예측 포인트를 생성합니다.
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        Self { date, price }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_forecast_point_serialization() {
        let point = ForecastPoint::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            dec!(123.45),
        );
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["date"], "2024-05-01");
    }
}
