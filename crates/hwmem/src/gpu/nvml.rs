use std::ffi::OsStr;

use nvml_wrapper::error::NvmlError;
use nvml_wrapper::struct_wrappers::device::MemoryInfo;
use nvml_wrapper::Nvml;

use super::GpuMemorySource;
use super::VramUsage;
use crate::GpuLibrary;
use crate::QueryError;

const NVML_LIB_PATH: &str = "libnvidia-ml.so.1";

/// NVML backend reporting on device index 0.
///
/// The recommended maximum is the device's total memory, since NVML has no
/// working-set recommendation of its own. Every call opens and shuts down its
/// own NVML session.
#[derive(Debug, Default, Clone, Copy)]
pub struct NvmlGpu;

impl NvmlGpu {
    fn default_device_memory() -> Result<MemoryInfo, QueryError> {
        let nvml = init_nvml()?;
        if nvml.device_count()? == 0 {
            return Err(QueryError::NoDevice);
        }
        let device = nvml.device_by_index(0)?;
        Ok(device.memory_info()?)
    }
}

impl GpuMemorySource for NvmlGpu {
    fn library(&self) -> Option<GpuLibrary> {
        Some(GpuLibrary::Nvml)
    }

    fn recommended_max_vram(&self) -> Result<u64, QueryError> {
        Ok(Self::default_device_memory()?.total)
    }

    fn current_allocated_vram(&self) -> Result<u64, QueryError> {
        Ok(Self::default_device_memory()?.used)
    }

    fn vram_usage(&self) -> Result<VramUsage, QueryError> {
        let memory = Self::default_device_memory()?;
        Ok(VramUsage {
            recommended: memory.total,
            allocated: memory.used,
        })
    }
}

fn init_nvml() -> Result<Nvml, NvmlError> {
    match Nvml::init() {
        Ok(nvml) => Ok(nvml),
        Err(err) => {
            tracing::debug!(
                error = %err,
                "standard NVML init failed, trying {NVML_LIB_PATH}"
            );
            Nvml::builder().lib_path(OsStr::new(NVML_LIB_PATH)).init()
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn used_memory_never_exceeds_total() {
        let gpu = NvmlGpu;
        let Ok(usage) = gpu.vram_usage() else {
            // no NVIDIA driver on this host
            return;
        };
        assert!(usage.recommended > 0);
        assert!(usage.allocated <= usage.recommended);
    }
}
