//! Image decode and encode — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Decode (JPEG, PNG, BMP)** | `image` crate (pure Rust decoders) |
//! | **Encode → JPEG** | `JpegEncoder`, alpha flattened to RGB |
//! | **Encode → PNG / BMP** | `DynamicImage::write_to` |
//!
//! The module is split into:
//! - **Backend**: [`ImageBackend`] trait + shared types
//! - **RustBackend**: the production implementation

pub mod backend;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, OutputFormat};
pub use rust_backend::RustBackend;
