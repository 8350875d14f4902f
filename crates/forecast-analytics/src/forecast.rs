//! 반복 예측 루프.
//!
//! 최근 종가 윈도우를 정규화해 회귀 모델에 넣고, 예측값을
//! 윈도우 뒤에 덧붙이며 앞에서 하나씩 밀어내는 방식으로
//! H일치 예측을 만들어냅니다. 두 번째 예측부터는 실측이 아닌
//! 직전 예측값에 조건부로 수행됩니다.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use forecast_core::{ForecastError, ForecastPoint, ForecastResult};

use crate::ml::NextValuePredictor;
use crate::scaling::MinMaxScaler;

/// 회귀 모델 입력 윈도우 길이.
pub const FORECAST_WINDOW: usize = 60;

/// 예측 기간 (달력일).
pub const FORECAST_HORIZON: usize = 7;

/// 다음 [`FORECAST_HORIZON`]일의 가격을 예측합니다.
///
/// # 인자
/// * `closes` - 전체 종가 시리즈 (마지막 [`FORECAST_WINDOW`]개 사용)
/// * `scaler` - 전체 종가 열에 적합된 스케일러
/// * `predictor` - 회귀 모델
/// * `today` - 기준일 (예측은 다음 날부터 시작)
///
/// # 반환
/// 정확히 [`FORECAST_HORIZON`]개의 포인트. 날짜는 `today+1 ..= today+H`이며
/// 주말/휴일을 건너뛰지 않는 달력일입니다.
///
/// # 에러
/// 모델 호출이 한 번이라도 실패하면 `ForecastUnavailable`이며,
/// 부분 예측은 반환되지 않습니다.
pub fn project(
    closes: &[Decimal],
    scaler: &MinMaxScaler,
    predictor: &mut dyn NextValuePredictor,
    today: NaiveDate,
) -> ForecastResult<Vec<ForecastPoint>> {
    if closes.len() < FORECAST_WINDOW {
        return Err(ForecastError::InsufficientHistory {
            required: FORECAST_WINDOW,
            provided: closes.len(),
        });
    }

    let mut window = scaler.encode_series(&closes[closes.len() - FORECAST_WINDOW..]);
    let mut normalized = Vec::with_capacity(FORECAST_HORIZON);

    for _ in 0..FORECAST_HORIZON {
        let next = predictor
            .predict_next(&window)
            .map_err(|e| ForecastError::ForecastUnavailable(e.to_string()))?;

        normalized.push(next);

        // 윈도우 슬라이드: 가장 오래된 값을 버리고 예측값을 덧붙임
        window.remove(0);
        window.push(next);
    }

    debug!(
        model = predictor.model_name(),
        horizon = FORECAST_HORIZON,
        "Forecast loop completed"
    );

    let points = normalized
        .iter()
        .enumerate()
        .map(|(i, y)| {
            let price = scaler.decode(*y);
            ForecastPoint::new(
                today + Duration::days(i as i64 + 1),
                Decimal::from_f64_retain(price).unwrap_or_default(),
            )
        })
        .collect();

    Ok(points)
}
