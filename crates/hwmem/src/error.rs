use thiserror::Error;

/// Failure of a single backend read.
///
/// Never crosses the public query functions: those map every variant to the
/// `0` sentinel.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("no default GPU device")]
    NoDevice,

    #[error("`{0}` cannot be queried on this platform")]
    Unsupported(&'static str),

    #[cfg(feature = "nvml")]
    #[error("NVML failed with `{0}`")]
    Nvml(#[from] nvml_wrapper::error::NvmlError),

    #[error("system memory accounting is unavailable")]
    SystemUnavailable,
}
