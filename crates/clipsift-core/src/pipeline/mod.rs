//! Candidate enumeration and image decoding.

pub mod decode;
pub mod discovery;

pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::FileDiscovery;
