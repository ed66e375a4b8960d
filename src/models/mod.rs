//! Data models for Bookshelf

pub mod item;

pub use item::{CreateItem, Item, ItemIdRequest, QuantityChange};
