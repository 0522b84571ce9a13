//! Kubernetes manifest generation.
//!
//! A [`GenerateRequest`] names exactly one resource kind. [`generate`] turns
//! it into YAML text: the request is narrowed to a [`Resource`], the matching
//! generator builds one or more [`Node`] trees, and [`render`] serializes
//! them. Nothing here touches the network or the filesystem.

pub mod dispatch;
pub mod error;
pub mod generate;
pub mod parse;
pub mod render;
pub mod tree;
pub mod types;

pub use dispatch::{generate, generate_exclusive, generate_resource};
pub use error::{GenerateError, Result};
pub use generate::Generate;
pub use render::{render, render_all, DOCUMENT_SEPARATOR};
pub use tree::{Mapping, Node};
pub use types::{GenerateRequest, Resource, ResourceKind};
