//! Utility modules for floating footnotes

pub mod css;
pub mod performance;

pub use css::parse_px;
pub use performance::{OperationStats, PerformanceMonitor};
