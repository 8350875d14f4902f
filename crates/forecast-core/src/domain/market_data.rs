//! 시장 데이터 타입 및 구조체.
//!
//! 일봉 OHLCV 데이터를 정의합니다. 조회 후에는 불변이며,
//! 파생 계산(지표, 정규화, 차트)은 모두 이 시퀀스의 순수 함수입니다.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 일봉 OHLCV 데이터.
///
/// 거래일당 하나의 봉이며 시퀀스는 날짜 오름차순이어야 합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: Decimal,
}

impl PriceBar {
    /// 새 일봉을 생성합니다.
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 거래일 자정(UTC)의 epoch 밀리초를 반환합니다.
    ///
    /// 차트 포인트의 타임스탬프 축으로 사용됩니다.
    pub fn timestamp_ms(&self) -> i64 {
        self.date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis()
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }
}
