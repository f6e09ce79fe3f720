//! folio-core: the rich-text document tree.
//!
//! This crate provides the core types shared by every folio crate: the node
//! tree, the property bag, the typed media attribute record together with its
//! markup codec, and the error and fidelity types used by readers and writers.

mod document;
mod fidelity;
pub mod media;
mod node;
mod properties;
mod resource;
pub mod schema;
mod traits;

pub use document::*;
pub use fidelity::*;
pub use media::{Alignment, Length, MediaAttrs, WrapStyle};
pub use node::*;
pub use properties::*;
pub use resource::*;
pub use traits::*;
