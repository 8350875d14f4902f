//! 가격 예측 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 회귀 모델은 프로세스 시작 시 한 번 로드되며, 로드 실패 시
//! 서버는 기동하지 않습니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use forecast_api::openapi::swagger_ui_router;
use forecast_api::routes::create_api_router;
use forecast_api::state::AppState;
use forecast_analytics::{OnnxPredictor, PredictorConfig};
use forecast_core::{init_logging_from_env, AppConfig};
use forecast_exchange::YahooFinanceProvider;

/// 서버 설정 구조체.
struct ServerConfig {
    /// 바인딩할 호스트 주소
    host: String,
    /// 바인딩할 포트
    port: u16,
    /// 전체 요청 타임아웃(초)
    request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// 환경 변수에서 설정 로드.
    ///
    /// # 환경변수
    /// - `API_HOST`: 바인딩 주소 (기본값: 127.0.0.1)
    /// - `API_PORT`: 포트 (기본값: 8000)
    /// - `REQUEST_TIMEOUT_SECS`: 요청 타임아웃 (기본값: 30)
    fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("API_HOST").unwrap_or(defaults.host);
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);

        Self {
            host,
            port,
            request_timeout_secs,
        }
    }

    /// 소켓 주소 반환.
    fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// CORS 미들웨어 구성.
///
/// CORS_ORIGINS 환경변수가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
///
/// # 환경변수
///
/// - `CORS_ORIGINS`: 쉼표로 구분된 허용 origin 목록
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>, server_config: &ServerConfig) -> Router {
    create_api_router()
        .with_state(state)
        // OpenAPI 문서 및 Swagger UI
        .merge(swagger_ui_router())
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server_config.request_timeout_secs),
        ))
        .layer(cors_layer())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // tracing 초기화
    init_logging_from_env().map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))?;

    info!("Starting Forecast API server...");

    // 설정 로드
    let server_config = ServerConfig::from_env();
    let app_config = AppConfig::from_env();

    let addr = server_config.socket_addr().map_err(|e| {
        error!(
            host = %server_config.host,
            port = server_config.port,
            error = %e,
            "Invalid socket address. Check API_HOST and API_PORT."
        );
        e
    })?;

    // 회귀 모델 로드 (프로세스당 한 번)
    let predictor_config = PredictorConfig::new(app_config.model_path.clone());
    let predictor = OnnxPredictor::load(predictor_config).map_err(|e| {
        error!(
            path = %app_config.model_path.display(),
            error = %e,
            "Failed to load regression model. Set MODEL_PATH to a valid ONNX file."
        );
        anyhow::anyhow!(e)
    })?;

    // 시장 데이터 제공자 생성
    let provider = YahooFinanceProvider::new().map_err(|e| anyhow::anyhow!(e))?;

    // AppState 생성
    let state = Arc::new(AppState::new(
        Box::new(predictor),
        Arc::new(provider),
        app_config,
    ));

    info!(
        version = %state.version,
        model = %state.model_name().await,
        history_start = %state.config.history_start,
        "Application state initialized"
    );

    // 라우터 생성
    let app = create_router(state, &server_config);

    // 서버 시작
    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 종료합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
