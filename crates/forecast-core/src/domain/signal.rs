//! 트레이딩 시그널 타입.
//!
//! 예측 추세와 RSI를 조합해 도출되는 5단계 시그널과
//! 표시용 색상을 정의합니다.

use serde::{Deserialize, Serialize};

/// 트레이딩 시그널.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradingSignal {
    /// 강한 매수 (상승 추세 + 과매도)
    StrongBuy,
    /// 매수 (상승 추세)
    Buy,
    /// 중립 (분류기의 안전 기본값)
    Hold,
    /// 매도 (하락 추세)
    Sell,
    /// 강한 매도 (하락 추세 + 과매수)
    StrongSell,
}

/// 시그널 표시 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalColor {
    Green,
    Red,
    Gray,
}

impl TradingSignal {
    /// 시그널의 표시 색상을 반환합니다.
    pub fn color(&self) -> SignalColor {
        match self {
            TradingSignal::StrongBuy | TradingSignal::Buy => SignalColor::Green,
            TradingSignal::Sell | TradingSignal::StrongSell => SignalColor::Red,
            TradingSignal::Hold => SignalColor::Gray,
        }
    }

    /// 매수 계열 시그널인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        matches!(self, TradingSignal::StrongBuy | TradingSignal::Buy)
    }
}

impl SignalColor {
    /// 색상 문자열을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalColor::Green => "green",
            SignalColor::Red => "red",
            SignalColor::Gray => "gray",
        }
    }
}

impl std::fmt::Display for TradingSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TradingSignal::StrongBuy => "STRONG_BUY",
            TradingSignal::Buy => "BUY",
            TradingSignal::Hold => "HOLD",
            TradingSignal::Sell => "SELL",
            TradingSignal::StrongSell => "STRONG_SELL",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_serialization() {
        let json = serde_json::to_string(&TradingSignal::StrongBuy).unwrap();
        assert_eq!(json, r#""STRONG_BUY""#);

        let json = serde_json::to_string(&TradingSignal::Sell).unwrap();
        assert_eq!(json, r#""SELL""#);

        let color = serde_json::to_string(&SignalColor::Gray).unwrap();
        assert_eq!(color, r#""gray""#);
    }

    #[test]
    fn test_signal_colors() {
        assert_eq!(TradingSignal::StrongBuy.color(), SignalColor::Green);
        assert_eq!(TradingSignal::Buy.color(), SignalColor::Green);
        assert_eq!(TradingSignal::Hold.color(), SignalColor::Gray);
        assert_eq!(TradingSignal::Sell.color(), SignalColor::Red);
        assert_eq!(TradingSignal::StrongSell.color(), SignalColor::Red);
    }

    #[test]
    fn test_display_matches_serde() {
        assert_eq!(TradingSignal::StrongSell.to_string(), "STRONG_SELL");
        assert_eq!(TradingSignal::Hold.to_string(), "HOLD");
    }
}
