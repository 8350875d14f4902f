//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! # 외부 타입 처리
//!
//! 외부 크레이트의 타입(차트 데이터 등)은
//! `#[schema(value_type = Object)]`로 JSON 객체로 처리합니다.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorResponse;
use crate::routes::{ComponentStatus, ForecastDay, HealthResponse, PredictRequest, PredictResponse};

/// Forecast API 문서.
///
/// 모든 엔드포인트와 스키마를 포함하는 OpenAPI 3.0 스펙입니다.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Forecast API",
        version = "0.1.0",
        description = r#"
# 가격 예측 REST API

일봉 히스토리에서 기술적 지표를 계산하고, 사전 학습된 회귀 모델로
7일 가격 예측을 생성한 뒤 트레이딩 시그널로 분류합니다.

## 주요 기능

- **예측**: 7일 가격 예측 및 시그널 분류
- **차트 데이터**: 캔들스틱 + SMA/EMA 오버레이
- **헬스 체크**: liveness / readiness 프로브
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "predict", description = "예측 - 가격 예측 및 시그널")
    ),
    components(
        schemas(
            HealthResponse,
            ComponentStatus,
            ErrorResponse,
            PredictRequest,
            PredictResponse,
            ForecastDay,
        )
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::health::health_ready,
        crate::routes::predict::predict,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
