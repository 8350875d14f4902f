//! 파이프라인 통합 테스트.
//!
//! 평탄 시리즈 엔드투엔드 시나리오, 짧은 히스토리 거부,
//! 공유 모델에 대한 동시 요청 무결성을 검증합니다.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use forecast_analytics::ml::{share_predictor, MlError, MlResult, MockPredictor, NextValuePredictor};
use forecast_analytics::{run_pipeline, run_pipeline_shared, FORECAST_HORIZON, FORECAST_WINDOW};
use forecast_core::{ForecastError, PriceBar, SignalColor, TradingSignal};

fn flat_bars(n: usize, price: Decimal) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..n)
        .map(|i| PriceBar {
            date: start + Duration::days(i as i64),
            open: price,
            high: price,
            low: price,
            close: price,
            volume: dec!(5000),
        })
        .collect()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[test]
fn flat_series_yields_sell_with_zero_difference() {
    // 90일 평탄 시리즈 + last-value 스텁:
    // 예측가 == 현재가 → 엄격한 부등호로 하락 → SELL
    let bars = flat_bars(90, dec!(100.00));
    let mut predictor = MockPredictor::new(FORECAST_WINDOW);

    let report = run_pipeline("FLAT", &bars, &mut predictor, today()).unwrap();

    assert_eq!(report.difference, dec!(0.00));
    assert_eq!(report.signal, TradingSignal::Sell);
    assert_eq!(report.signal.color(), SignalColor::Red);
    assert_eq!(report.current_price, dec!(100.00));

    // 평탄 시리즈: 변동성 0, RSI는 중립값 대입
    assert_eq!(report.volatility, dec!(0));
    assert_eq!(report.rsi, dec!(50));

    // 예측은 정확히 7일, 가격은 모두 100
    assert_eq!(report.forecast.len(), FORECAST_HORIZON);
    for point in &report.forecast {
        assert_eq!(point.price, dec!(100.00));
    }

    // 차트: 90봉 전부, EMA는 전 구간, SMA는 50번째 봉부터
    assert_eq!(report.chart.candles.len(), 90);
    assert_eq!(report.chart.ema.len(), 90);
    assert_eq!(report.chart.sma.len(), 90 - 49);
}

#[test]
fn forecast_dates_are_consecutive_calendar_days() {
    let bars = flat_bars(70, dec!(250));
    let mut predictor = MockPredictor::new(FORECAST_WINDOW);

    let report = run_pipeline("DATES", &bars, &mut predictor, today()).unwrap();

    for (i, point) in report.forecast.iter().enumerate() {
        assert_eq!(point.date, today() + Duration::days(i as i64 + 1));
    }
}

#[test]
fn short_history_is_rejected_without_partial_output() {
    let bars = flat_bars(59, dec!(100));
    let mut predictor = MockPredictor::new(FORECAST_WINDOW);

    let result = run_pipeline("SHORT", &bars, &mut predictor, today());

    assert!(matches!(
        result,
        Err(ForecastError::InsufficientHistory {
            required: 60,
            provided: 59
        })
    ));
}

#[test]
fn predictor_failure_propagates_as_forecast_unavailable() {
    struct BrokenPredictor;

    impl NextValuePredictor for BrokenPredictor {
        fn predict_next(&mut self, _window: &[f64]) -> MlResult<f64> {
            Err(MlError::Inference("runtime gone".to_string()))
        }

        fn model_name(&self) -> &str {
            "broken"
        }
    }

    let bars = flat_bars(70, dec!(100));
    let result = run_pipeline("BROKEN", &bars, &mut BrokenPredictor, today());

    assert!(matches!(
        result,
        Err(ForecastError::ForecastUnavailable(_))
    ));
}

/// 윈도우 무결성을 검사하는 스텁.
///
/// 모든 호출에서 윈도우 길이와 값 범위([0,1])를 검증하고
/// 호출 횟수를 기록합니다. 값 자체는 last-value로 동작합니다.
struct AuditingPredictor {
    calls: Arc<AtomicUsize>,
}

impl NextValuePredictor for AuditingPredictor {
    fn predict_next(&mut self, window: &[f64]) -> MlResult<f64> {
        if window.len() != FORECAST_WINDOW {
            return Err(MlError::InvalidInput(format!(
                "corrupted window length: {}",
                window.len()
            )));
        }

        if window.iter().any(|v| !v.is_finite() || *v < 0.0 || *v > 1.0) {
            return Err(MlError::InvalidInput(
                "window value out of normalized range".to_string(),
            ));
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(*window.last().unwrap())
    }

    fn model_name(&self) -> &str {
        "auditing"
    }
}

#[tokio::test]
async fn concurrent_requests_share_one_predictor_without_contamination() {
    let calls = Arc::new(AtomicUsize::new(0));
    let predictor = share_predictor(Box::new(AuditingPredictor {
        calls: calls.clone(),
    }));

    let tasks = 8_usize;
    let mut handles = Vec::with_capacity(tasks);

    for task in 0..tasks {
        let predictor = predictor.clone();
        handles.push(tokio::spawn(async move {
            // 태스크별로 다른 평탄 가격 수준: 섞이면 결과 가격이 달라짐
            let level = Decimal::from(100 * (task as i64 + 1));
            let bars = flat_bars(90, level);

            let report = run_pipeline_shared(&format!("SYM{}", task), &bars, &predictor, today())
                .await
                .unwrap();

            assert_eq!(report.forecast.len(), FORECAST_HORIZON);
            for point in &report.forecast {
                // 각 요청의 예측은 자신의 가격 수준만 반영해야 함
                assert_eq!(point.price, level);
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    // 8개 요청 × 7회 추론
    assert_eq!(calls.load(Ordering::SeqCst), tasks * FORECAST_HORIZON);
}
