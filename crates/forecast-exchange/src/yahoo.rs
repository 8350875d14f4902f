//! Yahoo Finance 과거 데이터 제공자.
//!
//! Yahoo Finance API를 사용하여 과거 일봉(OHLCV) 데이터를 조회합니다.
//!
//! # 심볼 형식
//!
//! 모든 심볼은 Yahoo Finance 형식으로 전달되어야 합니다:
//! - 미국 주식: "AAPL", "GOOGL"
//! - 암호화폐: "BTC-USD", "ETH-USD"
//! - ETF: "SPY", "QQQ"
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use forecast_exchange::{HistoricalDataProvider, YahooFinanceProvider};
//!
//! let provider = YahooFinanceProvider::new()?;
//! let bars = provider.daily_bars("AAPL", start_date).await?;
//! ```

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use yahoo_finance_api as yahoo;

use forecast_core::PriceBar;

use crate::historical::HistoricalDataProvider;
use crate::ExchangeError;

/// Yahoo Finance 과거 데이터 제공자.
pub struct YahooFinanceProvider {
    connector: yahoo::YahooConnector,
}

impl YahooFinanceProvider {
    /// 새로운 Yahoo Finance 제공자 생성.
    pub fn new() -> Result<Self, ExchangeError> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| ExchangeError::NetworkError(format!("Yahoo Finance init failed: {}", e)))?;

        Ok(Self { connector })
    }

    /// Yahoo Quote를 PriceBar로 변환.
    fn quote_to_bar(quote: &yahoo::Quote) -> PriceBar {
        // Unix timestamp를 거래일로 변환
        let date = Utc
            .timestamp_opt(quote.timestamp, 0)
            .single()
            .unwrap_or_else(Utc::now)
            .date_naive();

        PriceBar {
            date,
            open: Decimal::from_f64_retain(quote.open).unwrap_or_default(),
            high: Decimal::from_f64_retain(quote.high).unwrap_or_default(),
            low: Decimal::from_f64_retain(quote.low).unwrap_or_default(),
            close: Decimal::from_f64_retain(quote.close).unwrap_or_default(),
            volume: Decimal::from(quote.volume),
        }
    }

    /// NaiveDate를 Yahoo API가 요구하는 OffsetDateTime으로 변환.
    fn start_of_day(date: NaiveDate) -> OffsetDateTime {
        let unix = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        OffsetDateTime::from_unix_timestamp(unix).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    /// Yahoo 에러를 ExchangeError로 매핑.
    ///
    /// Yahoo는 없는 심볼을 별도 타입 없이 fetch 실패로 보고하므로
    /// 메시지 내용으로 구분합니다.
    fn map_yahoo_error(symbol: &str, err: yahoo::YahooError) -> ExchangeError {
        let message = err.to_string();
        if message.contains("Not Found") || message.contains("not found") {
            ExchangeError::SymbolNotFound(symbol.to_string())
        } else {
            ExchangeError::ApiError(format!("Yahoo Finance error ({}): {}", symbol, message))
        }
    }
}

#[async_trait]
impl HistoricalDataProvider for YahooFinanceProvider {
    async fn daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
    ) -> Result<Vec<PriceBar>, ExchangeError> {
        let start_dt = Self::start_of_day(start);
        let end_dt = OffsetDateTime::now_utc();

        info!(%symbol, %start, "Fetching daily bars from Yahoo Finance");

        let response = self
            .connector
            .get_quote_history(symbol, start_dt, end_dt)
            .await
            .map_err(|e| Self::map_yahoo_error(symbol, e))?;

        let quotes = response
            .quotes()
            .map_err(|e| ExchangeError::ParseError(format!("Quote parse error: {}", e)))?;

        if quotes.is_empty() {
            warn!(%symbol, "Yahoo Finance returned no data");
            return Err(ExchangeError::NoData(symbol.to_string()));
        }

        debug!(%symbol, count = quotes.len(), "Received daily quotes");

        let mut bars: Vec<PriceBar> = quotes.iter().map(Self::quote_to_bar).collect();

        // 시간순 정렬 (오래된 것부터)
        bars.sort_by_key(|b| b.date);

        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(timestamp: i64, close: f64) -> yahoo::Quote {
        yahoo::Quote {
            timestamp,
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            volume: 1_000,
            close,
            adjclose: close,
        }
    }

    #[test]
    fn test_quote_to_bar() {
        // 2024-03-15 00:00:00 UTC
        let bar = YahooFinanceProvider::quote_to_bar(&quote(1_710_460_800, 103.0));

        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(bar.close, dec!(103));
        assert_eq!(bar.open, dec!(102));
        assert_eq!(bar.volume, dec!(1000));
    }

    #[test]
    fn test_start_of_day_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let odt = YahooFinanceProvider::start_of_day(date);
        assert_eq!(odt.unix_timestamp(), 1_672_531_200);
    }

    #[test]
    fn test_intraday_timestamp_maps_to_trading_day() {
        // 장중 타임스탬프(2024-03-15 14:30 UTC)도 같은 거래일로 변환되어야 함
        let bar = YahooFinanceProvider::quote_to_bar(&quote(1_710_513_000, 50.0));
        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }
}
