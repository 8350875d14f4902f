//! 트레이딩 시그널 분류기.
//!
//! 익일 예측 가격의 추세와 현재 RSI를 조합해 5단계 시그널을
//! 결정합니다. 분기는 순서대로 평가되며 첫 일치가 우선합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use forecast_core::TradingSignal;

/// 과매도 RSI 임계값 (이 미만에서 상승 추세면 강한 매수).
const RSI_OVERSOLD: u32 = 40;

/// 과매수 RSI 임계값 (이 초과에서 하락 추세면 강한 매도).
const RSI_OVERBOUGHT: u32 = 60;

/// 예측 추세.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Up,
    Down,
}

/// 분류 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalDecision {
    /// 결정된 시그널
    pub signal: TradingSignal,
    /// 예측 추세
    pub trend: Trend,
    /// 익일 예측가 - 현재가 (표시용 2자리 반올림)
    pub difference: Decimal,
}

/// 시그널 분류.
///
/// 추세는 엄격한 부등호로 판정합니다: 예측가가 현재가보다
/// 커야 상승이며, 같으면 하락으로 분류됩니다.
///
/// # 인자
/// * `last_real_price` - 가장 최근 실측 종가
/// * `next_day_price` - 익일 예측 가격
/// * `current_rsi` - 최신 RSI (미정의면 중립값 50이 대입된 값)
pub fn classify(
    last_real_price: Decimal,
    next_day_price: Decimal,
    current_rsi: Decimal,
) -> SignalDecision {
    let trend = if next_day_price > last_real_price {
        Trend::Up
    } else {
        Trend::Down
    };

    let oversold = Decimal::from(RSI_OVERSOLD);
    let overbought = Decimal::from(RSI_OVERBOUGHT);

    // Hold는 분류기의 중립 기본값. 현재 임계값에서는 아래 분기가
    // 모든 경우를 덮지만, 임계값이 바뀌어도 안전하도록 유지한다.
    let mut signal = TradingSignal::Hold;

    if trend == Trend::Up && current_rsi < oversold {
        signal = TradingSignal::StrongBuy;
    } else if trend == Trend::Up {
        signal = TradingSignal::Buy;
    } else if trend == Trend::Down && current_rsi > overbought {
        signal = TradingSignal::StrongSell;
    } else if trend == Trend::Down {
        signal = TradingSignal::Sell;
    }

    SignalDecision {
        signal,
        trend,
        difference: (next_day_price - last_real_price).round_dp(2),
    }
}
