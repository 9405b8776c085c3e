//! Error types.
//!
//! GPU initialization and the windowed run loop are the only fallible
//! surfaces; everything else is pure per-frame math.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running an animation.
#[derive(Debug)]
pub enum RunError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// No scene provided.
    NoScene,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            RunError::Window(e) => write!(f, "Failed to create window: {}", e),
            RunError::Gpu(e) => write!(f, "GPU error: {}", e),
            RunError::NoScene => {
                write!(f, "No scene provided. Use .with_scene() to set one.")
            }
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::EventLoop(e) => Some(e),
            RunError::Window(e) => Some(e),
            RunError::Gpu(e) => Some(e),
            RunError::NoScene => None,
        }
    }
}

impl From<winit::error::EventLoopError> for RunError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RunError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for RunError {
    fn from(e: winit::error::OsError) -> Self {
        RunError::Window(e)
    }
}

impl From<GpuError> for RunError {
    fn from(e: GpuError) -> Self {
        RunError::Gpu(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_no_adapter_display_and_source() {
        let err = GpuError::NoAdapter;
        assert!(err.to_string().contains("No compatible GPU adapter"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_run_error_wraps_gpu_error() {
        let err = RunError::from(GpuError::NoAdapter);
        assert!(matches!(err, RunError::Gpu(GpuError::NoAdapter)));
        assert!(err.to_string().contains("GPU error"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_no_scene_display() {
        let err = RunError::NoScene;
        assert!(err.to_string().contains("with_scene"));
        assert!(err.source().is_none());
    }
}
