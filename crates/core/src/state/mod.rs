//! State management for computation instances.
//!
//! This module provides:
//! - Status transitions with timestamp stamping and event emission
//! - Stage sequencing rules (which stage may start, which runs next)

pub mod instance;
