//! 차트 데이터 구조체.
//!
//! 프론트엔드 차트 라이브러리가 소비하는 표현 타입입니다.
//! 캔들 시퀀스와 이동평균 오버레이는 타임스탬프로 정렬되며,
//! 오버레이는 지표가 정의된 구간만 포함하므로 캔들보다 짧을 수 있습니다.

use serde::{Deserialize, Serialize};

/// 캔들스틱 포인트.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandlePoint {
    /// 거래일 자정(UTC)의 epoch 밀리초
    pub timestamp_ms: i64,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
}

/// 이동평균 오버레이 포인트.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPoint {
    /// 거래일 자정(UTC)의 epoch 밀리초
    pub timestamp_ms: i64,
    /// 지표 값
    pub value: f64,
}

/// 차트 페이로드.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// 캔들스틱 시퀀스 (봉당 하나)
    pub candles: Vec<CandlePoint>,
    /// SMA(50) 오버레이 (정의된 구간만)
    pub sma: Vec<OverlayPoint>,
    /// EMA(20) 오버레이 (정의된 구간만)
    pub ema: Vec<OverlayPoint>,
}
