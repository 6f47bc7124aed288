//! Boundary with the render adapter
//!
//! No painting happens in this crate. The adapter receives a `RenderView`
//! and feeds user edits back as session operations.

mod overrides;
mod view;

pub use overrides::RenderOverrides;
pub use view::{Labels, RenderAdapter, RenderView};
