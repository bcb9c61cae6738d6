//! UI Components for Keepsake.
//!
//! Dark, soft-glow romantic aesthetic components.

mod nav_header;
mod node_view;

pub use nav_header::SiteLayout;
pub use node_view::NodeView;
