//! Resolve module: Position resolution and type rendering
//!
//! Finds the innermost node at an offset, renders its type with a pinned
//! flag set, and retries on the parent when the node's type is `any`.

mod cache;
mod node;
mod render;

pub use cache::{DEFAULT_TOLERANCE, HoverCache};
pub use node::find_node_at;
pub use render::{
    RenderFlags, RenderPreset, RenderedType, UNINFORMATIVE_TYPE, is_informative, render_node,
    resolve_type,
};

#[cfg(test)]
mod tests;
