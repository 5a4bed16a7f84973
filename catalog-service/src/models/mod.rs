//! Domain types

mod product;

pub use product::{
    attributes_from_value, strip_reserved, Attributes, Product, ProductId, RESERVED_KEYS,
};
