//! Device Capability
//!
//! The hardware probe's answer to "is there a CUDA accelerator here?".
//! Produced fresh on every probe call; the orchestrator never caches one
//! across invocations.

use serde::{Deserialize, Serialize};

/// Result of a single accelerator capability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCapability {
    /// Whether an accelerator was detected.
    pub present: bool,
    /// Device descriptor as reported by the query utility, when available.
    pub descriptor: Option<String>,
}

impl DeviceCapability {
    /// No accelerator detected (also the answer when the query utility
    /// itself is missing or errors).
    pub fn absent() -> Self {
        Self {
            present: false,
            descriptor: None,
        }
    }

    /// An accelerator was detected with the given descriptor line.
    pub fn detected(descriptor: impl Into<String>) -> Self {
        Self {
            present: true,
            descriptor: Some(descriptor.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_has_no_descriptor() {
        let cap = DeviceCapability::absent();
        assert!(!cap.present);
        assert!(cap.descriptor.is_none());
    }

    #[test]
    fn detected_carries_descriptor() {
        let cap = DeviceCapability::detected("NVIDIA RTX 4090");
        assert!(cap.present);
        assert_eq!(cap.descriptor.as_deref(), Some("NVIDIA RTX 4090"));
    }
}
