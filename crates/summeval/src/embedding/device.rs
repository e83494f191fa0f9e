use candle_core::Device;
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::error::EmbeddingError;

/// Which compute device the sentence encoder should run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceRequest {
    /// First compiled-in GPU backend that initialises, else CPU.
    #[default]
    Auto,
    Cpu,
    Metal,
    Cuda,
}

impl DeviceRequest {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceRequest::Auto => "auto",
            DeviceRequest::Cpu => "cpu",
            DeviceRequest::Metal => "metal",
            DeviceRequest::Cuda => "cuda",
        }
    }
}

impl FromStr for DeviceRequest {
    type Err = EmbeddingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(DeviceRequest::Auto),
            "cpu" => Ok(DeviceRequest::Cpu),
            "metal" => Ok(DeviceRequest::Metal),
            "cuda" => Ok(DeviceRequest::Cuda),
            _ => Err(EmbeddingError::InvalidConfig {
                reason: format!("unknown device '{}': expected auto, cpu, metal or cuda", s),
            }),
        }
    }
}

impl std::fmt::Display for DeviceRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the compute device for the sentence encoder.
///
/// `Auto` never fails: GPU errors fall back to CPU. An explicit GPU request
/// fails with [`EmbeddingError::DeviceUnavailable`] when the backend is not
/// compiled in or cannot be initialised.
pub fn select_device(request: DeviceRequest) -> Result<Device, EmbeddingError> {
    match request {
        DeviceRequest::Cpu => Ok(Device::Cpu),
        DeviceRequest::Metal => metal_device(),
        DeviceRequest::Cuda => cuda_device(),
        DeviceRequest::Auto => Ok(auto_device()),
    }
}

fn auto_device() -> Device {
    let mut failures: Vec<String> = Vec::new();

    if cfg!(feature = "metal") {
        match metal_device() {
            Ok(device) => return device,
            Err(e) => failures.push(e.to_string()),
        }
    }

    if cfg!(feature = "cuda") {
        match cuda_device() {
            Ok(device) => return device,
            Err(e) => failures.push(e.to_string()),
        }
    }

    if failures.is_empty() {
        debug!("No GPU backend compiled, using CPU");
    } else {
        warn!(reason = %failures.join("; "), "Falling back to CPU device");
    }

    Device::Cpu
}

fn metal_device() -> Result<Device, EmbeddingError> {
    #[cfg(feature = "metal")]
    let result = Device::new_metal(0)
        .map_err(|e| EmbeddingError::DeviceUnavailable {
            device: DeviceRequest::Metal.to_string(),
            reason: e.to_string(),
        })
        .inspect(|_| info!("Sentence encoder using Metal"));

    #[cfg(not(feature = "metal"))]
    let result = Err(not_compiled(DeviceRequest::Metal));

    result
}

fn cuda_device() -> Result<Device, EmbeddingError> {
    #[cfg(feature = "cuda")]
    let result = Device::new_cuda(0)
        .map_err(|e| EmbeddingError::DeviceUnavailable {
            device: DeviceRequest::Cuda.to_string(),
            reason: e.to_string(),
        })
        .inspect(|_| info!("Sentence encoder using CUDA"));

    #[cfg(not(feature = "cuda"))]
    let result = Err(not_compiled(DeviceRequest::Cuda));

    result
}

#[allow(dead_code)]
fn not_compiled(request: DeviceRequest) -> EmbeddingError {
    info!(device = %request, "GPU backend not compiled in");
    EmbeddingError::DeviceUnavailable {
        device: request.to_string(),
        reason: format!("built without the `{}` feature", request),
    }
}
