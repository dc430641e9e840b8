use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node in the transfer network.
///
/// A node is any location that can hold, send or receive the resource:
/// a depot, a warehouse, an account, a port.
///
/// # Examples
///
/// ```
/// use transfer_planner::core::node::NodeId;
///
/// let hub = NodeId::new("HUB-NORTH");
/// let dock = NodeId::new("DOCK-7");
/// assert_ne!(hub, dock);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this node ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_display() {
        assert_eq!(format!("{}", NodeId::new("DOCK-7")), "DOCK-7");
    }

    #[test]
    fn test_node_ordering() {
        assert!(NodeId::from("A") < NodeId::from("B"));
    }

    #[test]
    fn test_node_serializes_as_plain_string() {
        let json = serde_json::to_string(&NodeId::new("A")).unwrap();
        assert_eq!(json, "\"A\"");
    }
}
