//! Operating system memory accounting

use sysinfo::System;

use crate::QueryError;

/// Read access to the operating system's memory accounting.
pub trait SystemMemorySource: Send + Sync {
    /// Total installed memory in bytes.
    fn physical_memory(&self) -> Result<u64, QueryError>;

    /// Current free-memory estimate in bytes.
    fn free_memory(&self) -> Result<u64, QueryError>;
}

impl<T: SystemMemorySource + ?Sized> SystemMemorySource for &T {
    fn physical_memory(&self) -> Result<u64, QueryError> {
        (**self).physical_memory()
    }

    fn free_memory(&self) -> Result<u64, QueryError> {
        (**self).free_memory()
    }
}

/// `sysinfo` backed system memory.
///
/// Builds a fresh [`System`] and refreshes only its memory figures on every
/// call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoMemory;

impl SysinfoMemory {
    fn refreshed() -> System {
        let mut system = System::new();
        system.refresh_memory();
        system
    }
}

impl SystemMemorySource for SysinfoMemory {
    fn physical_memory(&self) -> Result<u64, QueryError> {
        match Self::refreshed().total_memory() {
            0 => Err(QueryError::SystemUnavailable),
            total => Ok(total),
        }
    }

    fn free_memory(&self) -> Result<u64, QueryError> {
        let system = Self::refreshed();
        let total = system.total_memory();
        if total == 0 {
            return Err(QueryError::SystemUnavailable);
        }
        // some platforms leave the availability figure unset
        let free = match system.available_memory() {
            0 => system.free_memory(),
            available => available,
        };
        Ok(free.min(total))
    }
}
