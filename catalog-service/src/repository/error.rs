//! Catalog operation names used in fault diagnostics

use std::fmt;

/// Catalog operation being performed when a storage error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogOperation {
    /// Inserting a new product
    Create,
    /// Listing a page of available products
    FindAll,
    /// Fetching one available product
    FindOne,
    /// Merging attributes into a product
    Update,
    /// Soft deleting a product
    Remove,
}

impl fmt::Display for CatalogOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::FindAll => write!(f, "find_all"),
            Self::FindOne => write!(f, "find_one"),
            Self::Update => write!(f, "update"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(CatalogOperation::FindAll.to_string(), "find_all");
        assert_eq!(CatalogOperation::Remove.to_string(), "remove");
    }
}
