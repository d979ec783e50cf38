//! Error types for the viewer

use thiserror::Error;

/// Main error type for the viewer
#[derive(Debug, Error)]
pub enum Error {
    #[error("not attached to a running emulator")]
    NotAttached,

    #[error("unknown game revision fingerprint {0:#04x}")]
    UnknownRevision(u8),

    #[error("target process is not running the expected game")]
    WrongGame,

    #[error("memory read failed at {0:#010x}")]
    Read(u32),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
