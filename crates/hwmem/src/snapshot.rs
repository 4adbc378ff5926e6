//! Point-in-time view combining system and GPU memory

use std::fmt;

use serde::Serialize;

use crate::gpu::GpuMemorySource;
use crate::system::SystemMemorySource;
use crate::units::human_bytes;
use crate::units::MEBIBYTE;
use crate::MemoryQuery;

/// GPU framework that produced a [`GpuInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuLibrary {
    Metal,
    Nvml,
}

impl GpuLibrary {
    /// Free VRAM a workload needs on this library before the GPU is usable.
    pub const fn minimum_memory(self) -> u64 {
        match self {
            GpuLibrary::Metal => 512 * MEBIBYTE,
            GpuLibrary::Nvml => 457 * MEBIBYTE,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GpuLibrary::Metal => "metal",
            GpuLibrary::Nvml => "nvml",
        }
    }
}

impl fmt::Display for GpuLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// System RAM, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemoryInfo {
    pub total_memory: u64,
    pub free_memory: u64,
}

/// Default GPU device memory, in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GpuInfo {
    pub library: GpuLibrary,
    pub id: String,
    /// Recommended working-set ceiling
    pub total_memory: u64,
    /// Ceiling minus what is currently allocated
    pub free_memory: u64,
    pub minimum_memory: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemorySnapshot {
    pub system: MemoryInfo,
    pub gpu: Option<GpuInfo>,
}

impl MemorySnapshot {
    /// Captures a snapshot from the platform backends.
    pub fn capture() -> Self {
        Self::capture_with(&MemoryQuery::platform())
    }

    /// Captures a snapshot from `query`.
    ///
    /// No GPU is reported when the source has no library, recommends no VRAM
    /// at all, or recommends less than the library minimum. Budget and
    /// allocation come from a single device read.
    pub fn capture_with<G, S>(query: &MemoryQuery<G, S>) -> Self
    where
        G: GpuMemorySource,
        S: SystemMemorySource,
    {
        let system = MemoryInfo {
            total_memory: query.physical_memory(),
            free_memory: query.free_memory(),
        };

        let gpu = query.gpu_library().and_then(|library| {
            let usage = query.vram_usage()?;
            let minimum_memory = library.minimum_memory();
            if usage.recommended < minimum_memory {
                tracing::info!(
                    library = %library,
                    "GPU memory below minimum: {} < {}",
                    human_bytes(usage.recommended),
                    human_bytes(minimum_memory)
                );
                return None;
            }
            Some(GpuInfo {
                library,
                id: "0".to_string(),
                total_memory: usage.recommended,
                free_memory: usage.recommended.saturating_sub(usage.allocated),
                minimum_memory,
            })
        });

        tracing::debug!(
            total = system.total_memory,
            free = system.free_memory,
            gpu = ?gpu,
            "captured memory snapshot"
        );

        Self { system, gpu }
    }

    /// Whether `bytes` plus the library minimum fit into free GPU memory.
    pub fn gpu_fits(&self, bytes: u64) -> bool {
        self.gpu.as_ref().is_some_and(|gpu| {
            gpu.free_memory >= bytes.saturating_add(gpu.minimum_memory)
        })
    }
}

impl fmt::Display for MemorySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "system total: {}", human_bytes(self.system.total_memory))?;
        write!(f, "system free:  {}", human_bytes(self.system.free_memory))?;
        match &self.gpu {
            Some(gpu) => {
                writeln!(f)?;
                writeln!(f, "gpu {} ({}):", gpu.id, gpu.library)?;
                writeln!(f, "  recommended max: {}", human_bytes(gpu.total_memory))?;
                writeln!(f, "  free:            {}", human_bytes(gpu.free_memory))?;
                write!(f, "  minimum:         {}", human_bytes(gpu.minimum_memory))
            }
            None => write!(f, "\ngpu: none"),
        }
    }
}
