//! ONNX 모델을 사용한 다음 값 예측.
//!
//! 정규화된 종가 윈도우를 입력으로 받아 다음 정규화 값 하나를
//! 반환하는 회귀 모델을 래핑합니다. 모델은 별도로 학습되어
//! ONNX 형식으로 내보내져야 합니다.
//!
//! 모델 인스턴스는 프로세스 전역에서 하나만 로드되며, 반복 추론이
//! 내부 버퍼를 변경하므로 동시 호출자는 직렬화되어야 합니다
//! (서빙 계층이 Mutex로 보장).

use ort::session::Session;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::forecast::FORECAST_WINDOW;
use crate::ml::{MlError, MlResult};

/// 프로세스 전역에서 공유되는 회귀 모델 핸들.
///
/// 반복 추론이 내부 버퍼를 변경하므로 동시 호출자는
/// 이 Mutex를 통해 직렬화됩니다.
pub type SharedPredictor = Arc<Mutex<Box<dyn NextValuePredictor>>>;

/// predictor를 공유 핸들로 래핑합니다.
pub fn share_predictor(predictor: Box<dyn NextValuePredictor>) -> SharedPredictor {
    Arc::new(Mutex::new(predictor))
}

/// ONNX predictor 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// ONNX 모델 파일 경로
    pub model_path: PathBuf,
    /// 입력 윈도우 길이
    pub window_size: usize,
    /// 로깅/식별을 위한 모델 이름
    pub model_name: String,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/price_model.onnx"),
            window_size: FORECAST_WINDOW,
            model_name: "price_model".to_string(),
        }
    }
}

impl PredictorConfig {
    /// 주어진 모델 경로로 새 predictor 설정 생성.
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            ..Default::default()
        }
    }

    /// 입력 윈도우 길이 설정.
    pub fn with_window_size(mut self, size: usize) -> Self {
        self.window_size = size;
        self
    }

    /// 모델 이름 설정.
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }
}

/// 다음 값 예측 trait.
///
/// 반복 예측 루프는 이 trait를 통해서만 모델을 호출하므로
/// 테스트에서 모델 파일 없이 스텁으로 대체할 수 있습니다.
pub trait NextValuePredictor: Send + Sync {
    /// 정규화된 윈도우에서 다음 정규화 값을 예측.
    ///
    /// 반복 추론이 내부 상태를 변경할 수 있으므로 `&mut self`를 받습니다.
    fn predict_next(&mut self, window: &[f64]) -> MlResult<f64>;

    /// 모델 이름 반환.
    fn model_name(&self) -> &str;
}

/// ONNX 기반 다음 값 predictor.
///
/// 모델은 다음을 가져야 합니다:
/// - 입력: `[batch, window, 1]` 형태의 float32 텐서
/// - 출력: `[batch, 1]` 형태의 float32 텐서 (정규화된 다음 값)
pub struct OnnxPredictor {
    session: Session,
    config: PredictorConfig,
}

impl OnnxPredictor {
    /// 지정된 경로에서 ONNX 모델 로드.
    pub fn load(config: PredictorConfig) -> MlResult<Self> {
        let path = &config.model_path;

        if !path.exists() {
            return Err(MlError::ModelLoad(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        info!("Loading ONNX model from: {}", path.display());

        let session = Session::builder()
            .map_err(|e| MlError::ModelLoad(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)
            .map_err(|e| MlError::ModelLoad(format!("Failed to set optimization level: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| MlError::ModelLoad(format!("Failed to load model: {}", e)))?;

        info!("ONNX model loaded successfully: {}", config.model_name);

        Ok(Self { session, config })
    }

    /// 기본 설정으로 파일 경로에서 모델 로드.
    pub fn from_file(path: impl AsRef<Path>) -> MlResult<Self> {
        let config = PredictorConfig::new(path.as_ref());
        Self::load(config)
    }

    /// predictor 설정 반환.
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    fn run_inference(&mut self, window: &[f64]) -> MlResult<f64> {
        // 입력 텐서 생성 [1, window, 1]
        let input_data: Vec<f32> = window.iter().map(|v| *v as f32).collect();
        let input_shape = [1i64, self.config.window_size as i64, 1i64];

        let input_tensor =
            ort::value::Tensor::from_array((input_shape, input_data.into_boxed_slice()))
                .map_err(|e| MlError::Inference(format!("Failed to create input tensor: {}", e)))?;

        let outputs = self
            .session
            .run(ort::inputs!["input" => input_tensor])
            .map_err(|e| MlError::Inference(format!("Inference failed: {}", e)))?;

        // 첫 번째 출력 가져오기 ("output" 이름 또는 첫 번째 사용 가능한 것)
        let output_name = outputs
            .iter()
            .next()
            .map(|(name, _)| name.to_string())
            .ok_or_else(|| MlError::Inference("No output tensor found".to_string()))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| MlError::Inference("Failed to get output by name".to_string()))?;

        // 텐서 데이터 추출 - (&Shape, &[f32]) 반환
        let (_, output_slice) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| MlError::Inference(format!("Failed to extract output tensor: {}", e)))?;

        let predicted = output_slice
            .first()
            .copied()
            .ok_or_else(|| MlError::Inference("Empty output tensor".to_string()))?;

        debug!(
            model = %self.config.model_name,
            predicted,
            "Next value predicted"
        );

        Ok(predicted as f64)
    }
}

impl NextValuePredictor for OnnxPredictor {
    fn predict_next(&mut self, window: &[f64]) -> MlResult<f64> {
        if window.len() != self.config.window_size {
            return Err(MlError::InvalidInput(format!(
                "Expected window of {} values, got {}",
                self.config.window_size,
                window.len()
            )));
        }

        self.run_inference(window)
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}

/// 실제 모델 파일 없이 테스트하기 위한 mock predictor.
///
/// 고정값이 설정되어 있으면 그 값을, 아니면 윈도우의 마지막 값을
/// 그대로 반환합니다 (last-value 스텁).
pub struct MockPredictor {
    window_size: usize,
    /// 반환할 고정값
    pub fixed_output: Option<f64>,
}

impl MockPredictor {
    /// 새 mock predictor 생성.
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            fixed_output: None,
        }
    }

    /// 항상 반환할 고정값 설정.
    pub fn with_fixed_output(mut self, value: f64) -> Self {
        self.fixed_output = Some(value);
        self
    }
}

impl NextValuePredictor for MockPredictor {
    fn predict_next(&mut self, window: &[f64]) -> MlResult<f64> {
        if window.len() != self.window_size {
            return Err(MlError::InvalidInput(format!(
                "Expected window of {} values, got {}",
                self.window_size,
                window.len()
            )));
        }

        if let Some(value) = self.fixed_output {
            return Ok(value);
        }

        window
            .last()
            .copied()
            .ok_or_else(|| MlError::InvalidInput("Empty window".to_string()))
    }

    fn model_name(&self) -> &str {
        "mock_predictor"
    }
}
