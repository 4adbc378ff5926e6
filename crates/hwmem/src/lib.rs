//! Point-in-time queries of system memory and GPU device memory.
//!
//! Every query returns a byte count and never fails: anything the platform
//! cannot report comes back as `0`. Callers that need to tell "unsupported"
//! apart from a real zero have to decide that from context.
//!
//! ```no_run
//! let total = hwmem::physical_memory();
//! let vram = hwmem::recommended_max_vram();
//! println!("{total} bytes of RAM, {vram} bytes of VRAM budget");
//! ```

mod error;
pub mod gpu;
pub mod snapshot;
pub mod system;
pub mod units;

pub use error::QueryError;
pub use gpu::GpuMemorySource;
pub use gpu::VramUsage;
pub use snapshot::GpuInfo;
pub use snapshot::GpuLibrary;
pub use snapshot::MemoryInfo;
pub use snapshot::MemorySnapshot;
pub use system::SystemMemorySource;

use gpu::PlatformGpu;
use system::SysinfoMemory;

/// The four memory queries over a pair of backends.
///
/// The free functions of this crate run the same queries over the platform
/// backends; this type exists so other sources can be plugged in.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryQuery<G, S> {
    gpu: G,
    system: S,
}

impl MemoryQuery<PlatformGpu, SysinfoMemory> {
    /// Queries backed by the GPU framework and OS accounting of this target.
    pub fn platform() -> Self {
        Self::new(gpu::platform_gpu(), SysinfoMemory)
    }
}

impl<G: GpuMemorySource, S: SystemMemorySource> MemoryQuery<G, S> {
    pub fn new(gpu: G, system: S) -> Self {
        Self { gpu, system }
    }

    /// Framework behind the GPU source.
    pub fn gpu_library(&self) -> Option<GpuLibrary> {
        self.gpu.library()
    }

    /// See [`recommended_max_vram`].
    pub fn recommended_max_vram(&self) -> u64 {
        or_unknown("recommended_max_vram", self.gpu.recommended_max_vram())
    }

    /// See [`physical_memory`].
    pub fn physical_memory(&self) -> u64 {
        or_unknown("physical_memory", self.system.physical_memory())
    }

    /// See [`free_memory`].
    pub fn free_memory(&self) -> u64 {
        or_unknown("free_memory", self.system.free_memory())
    }

    /// See [`current_allocated_vram`].
    pub fn current_allocated_vram(&self) -> u64 {
        or_unknown("current_allocated_vram", self.gpu.current_allocated_vram())
    }

    /// Budget and allocation from one device read, `None` without a budget.
    pub fn vram_usage(&self) -> Option<VramUsage> {
        match self.gpu.vram_usage() {
            Ok(usage) if usage.recommended > 0 => Some(usage),
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(error = %err, "VRAM usage unavailable");
                None
            }
        }
    }
}

fn or_unknown(query: &'static str, result: Result<u64, QueryError>) -> u64 {
    result.unwrap_or_else(|err| {
        tracing::debug!(query, error = %err, "memory query unavailable, reporting 0");
        0
    })
}

/// Bytes the GPU framework recommends as the working-set ceiling of the
/// default device.
///
/// This is a soft budget, not a hard limit. Returns `0` when there is no
/// device or the framework cannot supply a recommendation.
pub fn recommended_max_vram() -> u64 {
    MemoryQuery::platform().recommended_max_vram()
}

/// Total installed system memory in bytes, `0` if unknown.
pub fn physical_memory() -> u64 {
    MemoryQuery::platform().physical_memory()
}

/// The system's free-memory estimate in bytes at the time of the call.
///
/// Stale as soon as it returns; treat it as a hint. Never larger than the
/// physical memory seen by the same read. `0` if unknown.
pub fn free_memory() -> u64 {
    MemoryQuery::platform().free_memory()
}

/// Bytes of GPU memory currently allocated on the default device.
///
/// Returns `0` on platforms or devices that cannot report this value.
pub fn current_allocated_vram() -> u64 {
    MemoryQuery::platform().current_allocated_vram()
}
