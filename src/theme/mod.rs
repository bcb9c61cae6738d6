//! Visual theme for Keepsake.

mod styles;

pub use styles::GLOBAL_STYLES;
