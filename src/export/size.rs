//! Output size constraints shared by every export format.

use serde::{Deserialize, Serialize};

use crate::error::{QrError, Result};

/// Smallest accepted side in pixels.
pub const MIN_EXPORT_SIZE: u32 = 50;

/// Largest accepted side in pixels.
pub const MAX_EXPORT_SIZE: u32 = 5000;

/// Requested output dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSize {
    pub width: u32,
    pub height: u32,
}

impl ExportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// Accept the size or explain why it is rejected. Out-of-range sizes
    /// are never clamped.
    pub fn validate(self) -> Result<Self> {
        if self.width != self.height {
            return Err(QrError::InvalidSize {
                message: format!(
                    "width and height must be equal (got {}x{})",
                    self.width, self.height
                ),
            });
        }
        if self.width < MIN_EXPORT_SIZE {
            return Err(QrError::InvalidSize {
                message: format!("{} below minimum {}", self.width, MIN_EXPORT_SIZE),
            });
        }
        if self.width > MAX_EXPORT_SIZE {
            return Err(QrError::InvalidSize {
                message: format!("{} exceeds maximum {}", self.width, MAX_EXPORT_SIZE),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(size: ExportSize) -> String {
        match size.validate() {
            Err(QrError::InvalidSize { message }) => message,
            other => panic!("expected InvalidSize, got {other:?}"),
        }
    }

    #[test]
    fn test_unequal_rejected() {
        assert!(reason(ExportSize::new(4999, 5000)).contains("width and height must be equal"));
        assert!(reason(ExportSize::new(100, 99)).contains("must be equal"));
    }

    #[test]
    fn test_bounds() {
        assert!(ExportSize::square(5000).validate().is_ok());
        assert!(ExportSize::square(50).validate().is_ok());
        assert!(reason(ExportSize::square(5001)).contains("exceeds maximum 5000"));
        assert!(reason(ExportSize::square(49)).contains("below minimum 50"));
        assert!(reason(ExportSize::square(0)).contains("below minimum"));
    }

    #[test]
    fn test_full_range() {
        for side in 0..=5100 {
            let ok = ExportSize::square(side).validate().is_ok();
            assert_eq!(ok, (MIN_EXPORT_SIZE..=MAX_EXPORT_SIZE).contains(&side), "side {side}");
        }
    }
}
