//! Arena element tree for the folio builder.
//!
//! The synchronization engine renders every component instance into a
//! [`Document`]: an ordered tree of [`Element`]s addressed by stable
//! [`NodeId`]s, queried with small [`Selector`]s and serialized with
//! [`html::outer_html`] / [`html::inner_html`]. It plays the role of the
//! DOM-like rendering surface: create, clone, move, remove and query nodes.

mod element;
pub mod html;
mod tree;

pub use element::{Element, NodeId, Selector};
pub use tree::Document;

/// Result type for tree operations.
pub type DomResult<T> = Result<T, DomError>;

/// Errors raised by structural tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("node {0} has no parent")]
    Detached(NodeId),

    #[error("cannot insert {node} under its own descendant {parent}")]
    Cycle { node: NodeId, parent: NodeId },

    #[error("the root node cannot be moved or removed")]
    RootMutation,
}
