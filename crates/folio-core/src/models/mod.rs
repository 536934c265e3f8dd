//! Data models for gallery entities.
//!
//! This module contains the data structures exchanged with the backend:
//!
//! - `Work`: a portfolio item (image, title, category)
//! - `Category`: read-only reference data used to classify works
//! - `NewWork`: the multipart payload for creating a work

pub mod category;
pub mod work;

pub use category::Category;
pub use work::{NewWork, Work, MAX_IMAGE_BYTES};
