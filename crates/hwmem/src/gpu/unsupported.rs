use super::GpuMemorySource;
use crate::QueryError;

/// Backend for targets without a supported GPU framework.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedGpu;

impl GpuMemorySource for UnsupportedGpu {
    fn recommended_max_vram(&self) -> Result<u64, QueryError> {
        Err(QueryError::Unsupported("recommended_max_vram"))
    }

    fn current_allocated_vram(&self) -> Result<u64, QueryError> {
        Err(QueryError::Unsupported("current_allocated_vram"))
    }
}
