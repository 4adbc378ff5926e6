use ::metal::Device;

use super::GpuMemorySource;
use super::VramUsage;
use crate::GpuLibrary;
use crate::QueryError;

/// Metal backend.
///
/// A device is obtained per call and released when the call returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetalGpu;

impl MetalGpu {
    fn with_default_device<T, F>(f: F) -> Result<T, QueryError>
    where
        F: FnOnce(&Device) -> T,
    {
        let device = Device::system_default().ok_or(QueryError::NoDevice)?;
        Ok(f(&device))
    }
}

impl GpuMemorySource for MetalGpu {
    fn library(&self) -> Option<GpuLibrary> {
        Some(GpuLibrary::Metal)
    }

    fn recommended_max_vram(&self) -> Result<u64, QueryError> {
        Self::with_default_device(|device| device.recommended_max_working_set_size())
    }

    fn current_allocated_vram(&self) -> Result<u64, QueryError> {
        Self::with_default_device(|device| device.current_allocated_size())
    }

    fn vram_usage(&self) -> Result<VramUsage, QueryError> {
        Self::with_default_device(|device| VramUsage {
            recommended: device.recommended_max_working_set_size(),
            allocated: device.current_allocated_size(),
        })
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn allocated_stays_within_recommended_budget_when_idle() {
        let gpu = MetalGpu;
        let (Ok(recommended), Ok(allocated)) =
            (gpu.recommended_max_vram(), gpu.current_allocated_vram())
        else {
            // headless CI runners have no Metal device
            return;
        };
        assert!(recommended > 0);
        assert!(allocated <= recommended);
    }
}
