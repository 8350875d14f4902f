//! 차트 데이터 조립.
//!
//! 시리즈의 마지막 90개 봉을 캔들스틱과 이동평균 오버레이로
//! 변환합니다. 오버레이는 지표가 정의된 봉만 포함하므로
//! 캔들보다 짧을 수 있으며, 소비자는 인덱스가 아닌 타임스탬프로
//! 정렬합니다.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use forecast_core::{CandlePoint, ChartData, OverlayPoint, PriceBar};

/// 차트에 포함할 후행 봉 수.
pub const CHART_TAIL_BARS: usize = 90;

/// 차트 페이로드 조립.
///
/// # 인자
/// * `bars` - 전체 일봉 시퀀스 (마지막 [`CHART_TAIL_BARS`]개 사용)
/// * `sma50` - 봉과 인덱스 정렬된 SMA(50) 시리즈
/// * `ema20` - 봉과 인덱스 정렬된 EMA(20) 시리즈
pub fn assemble_chart(
    bars: &[PriceBar],
    sma50: &[Option<Decimal>],
    ema20: &[Decimal],
) -> ChartData {
    let start = bars.len().saturating_sub(CHART_TAIL_BARS);

    let mut candles = Vec::with_capacity(bars.len() - start);
    let mut sma = Vec::new();
    let mut ema = Vec::new();

    for (i, bar) in bars.iter().enumerate().skip(start) {
        let timestamp_ms = bar.timestamp_ms();

        candles.push(CandlePoint {
            timestamp_ms,
            open: rounded_f64(bar.open),
            high: rounded_f64(bar.high),
            low: rounded_f64(bar.low),
            close: rounded_f64(bar.close),
        });

        if let Some(value) = sma50.get(i).copied().flatten() {
            sma.push(OverlayPoint {
                timestamp_ms,
                value: rounded_f64(value),
            });
        }

        if let Some(value) = ema20.get(i) {
            ema.push(OverlayPoint {
                timestamp_ms,
                value: rounded_f64(*value),
            });
        }
    }

    ChartData { candles, sma, ema }
}

/// 표시용 2자리 반올림 f64 변환.
fn rounded_f64(value: Decimal) -> f64 {
    value.round_dp(2).to_f64().unwrap_or_default()
}
