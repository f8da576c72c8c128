//! Limits and constraints for schema document processing
//!
//! This module defines limits that bound the resources a single parse may
//! consume, protecting against hostile or runaway schema documents.

use crate::error::{Error, Result};

/// Resource limits applied by the driving parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element nesting depth
    pub max_depth: usize,

    /// Maximum source size in bytes
    pub max_source_size: usize,

    /// Maximum number of attributes per element
    pub max_attributes: usize,

    /// Maximum number of namespace declarations per element
    pub max_namespaces: usize,

    /// Maximum number of XML nodes the underlying tree may hold
    pub max_nodes: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            max_source_size: 100 * 1024 * 1024, // 100 MB
            max_attributes: 1000,
            max_namespaces: 1000,
            max_nodes: u32::MAX,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_depth: 100,
            max_source_size: 10 * 1024 * 1024, // 10 MB
            max_attributes: 100,
            max_namespaces: 100,
            max_nodes: 1_000_000,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_depth: 10000,
            max_source_size: 1024 * 1024 * 1024, // 1 GB
            max_attributes: 10000,
            max_namespaces: 10000,
            max_nodes: u32::MAX,
        }
    }

    /// Check if element depth is within limits
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            Err(exceeded(format!(
                "element depth {} exceeds maximum {}",
                depth, self.max_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if source size is within limits
    pub fn check_source_size(&self, size: usize) -> Result<()> {
        if size > self.max_source_size {
            Err(exceeded(format!(
                "source size {} bytes exceeds maximum {} bytes",
                size, self.max_source_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of attributes is within limits
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            Err(exceeded(format!(
                "attribute count {} exceeds maximum {}",
                count, self.max_attributes
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of namespace declarations is within limits
    pub fn check_namespaces(&self, count: usize) -> Result<()> {
        if count > self.max_namespaces {
            Err(exceeded(format!(
                "namespace declaration count {} exceeds maximum {}",
                count, self.max_namespaces
            )))
        } else {
            Ok(())
        }
    }
}

fn exceeded(message: String) -> Error {
    Error::LimitExceeded {
        message,
        position: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_depth, 1000);
        assert!(limits.check_depth(500).is_ok());
        assert!(limits.check_depth(1500).is_err());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_depth < Limits::default().max_depth);
        assert!(limits.check_depth(150).is_err());
    }

    #[test]
    fn test_permissive_limits() {
        let limits = Limits::permissive();
        assert!(limits.max_depth > Limits::default().max_depth);
        assert!(limits.check_depth(5000).is_ok());
    }

    #[test]
    fn test_check_source_size() {
        let limits = Limits::default();
        assert!(limits.check_source_size(1024).is_ok());
        assert!(matches!(
            limits.check_source_size(200 * 1024 * 1024),
            Err(Error::LimitExceeded { position: None, .. })
        ));
    }

    #[test]
    fn test_check_attributes_and_namespaces() {
        let limits = Limits::strict();
        assert!(limits.check_attributes(100).is_ok());
        assert!(limits.check_attributes(101).is_err());
        assert!(limits.check_namespaces(3).is_ok());
        assert!(limits.check_namespaces(1000).is_err());
    }
}
