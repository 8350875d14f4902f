//! 제공자 중립적 과거 데이터 trait.
//!
//! 예측 파이프라인은 이 trait를 통해서만 시장 데이터에 접근하므로
//! 제공자 구현을 교체하거나 테스트에서 고정 데이터로 대체할 수 있습니다.

use async_trait::async_trait;
use chrono::NaiveDate;

use forecast_core::PriceBar;

use crate::ExchangeError;

/// 과거 일봉 데이터 제공자 trait.
#[async_trait]
pub trait HistoricalDataProvider: Send + Sync {
    /// 일봉 데이터 조회.
    ///
    /// 시작일부터 오늘까지의 일봉을 날짜 오름차순으로 반환합니다.
    ///
    /// # 인자
    /// * `symbol` - 거래소 티커 (예: "AAPL", "BTC-USD")
    /// * `start` - 조회 시작일
    ///
    /// # 에러
    /// 심볼이 없으면 `SymbolNotFound`, 범위에 봉이 하나도 없으면 `NoData`.
    async fn daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
    ) -> Result<Vec<PriceBar>, ExchangeError>;
}
