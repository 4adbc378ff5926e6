//! GPU framework backends
//!
//! One backend is selected at compile time:
//! - macOS: Metal, through the system default `MTLDevice`
//! - other platforms with the `nvml` feature: NVML, device index 0
//! - anything else: [`UnsupportedGpu`], which reports nothing

#[cfg(target_os = "macos")]
mod metal;
#[cfg(feature = "nvml")]
mod nvml;
mod unsupported;

#[cfg(target_os = "macos")]
pub use self::metal::MetalGpu;
#[cfg(feature = "nvml")]
pub use self::nvml::NvmlGpu;
pub use self::unsupported::UnsupportedGpu;

use crate::GpuLibrary;
use crate::QueryError;

/// Budget and allocation of the default device, read together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VramUsage {
    pub recommended: u64,
    pub allocated: u64,
}

/// Read access to the device-memory accounting of a GPU framework.
pub trait GpuMemorySource: Send + Sync {
    /// Framework behind this source, `None` when there is none.
    fn library(&self) -> Option<GpuLibrary> {
        None
    }

    /// Soft ceiling for the GPU working set on the default device, in bytes.
    fn recommended_max_vram(&self) -> Result<u64, QueryError>;

    /// Bytes currently allocated on the default device.
    fn current_allocated_vram(&self) -> Result<u64, QueryError>;

    /// Both figures from one read of the device where the backend allows it.
    ///
    /// An allocation the backend cannot report counts as `0`.
    fn vram_usage(&self) -> Result<VramUsage, QueryError> {
        let recommended = self.recommended_max_vram()?;
        let allocated = self.current_allocated_vram().unwrap_or_else(|err| {
            tracing::debug!(error = %err, "allocated VRAM unavailable, counting 0");
            0
        });
        Ok(VramUsage {
            recommended,
            allocated,
        })
    }
}

impl<T: GpuMemorySource + ?Sized> GpuMemorySource for &T {
    fn library(&self) -> Option<GpuLibrary> {
        (**self).library()
    }

    fn recommended_max_vram(&self) -> Result<u64, QueryError> {
        (**self).recommended_max_vram()
    }

    fn current_allocated_vram(&self) -> Result<u64, QueryError> {
        (**self).current_allocated_vram()
    }

    fn vram_usage(&self) -> Result<VramUsage, QueryError> {
        (**self).vram_usage()
    }
}

#[cfg(target_os = "macos")]
pub type PlatformGpu = MetalGpu;

#[cfg(all(not(target_os = "macos"), feature = "nvml"))]
pub type PlatformGpu = NvmlGpu;

#[cfg(all(not(target_os = "macos"), not(feature = "nvml")))]
pub type PlatformGpu = UnsupportedGpu;

/// The GPU backend compiled in for this target.
pub fn platform_gpu() -> PlatformGpu {
    PlatformGpu::default()
}
