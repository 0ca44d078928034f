//! Source acquisition and symbol extraction

/// Symbol alphabet extraction in pixel and tile modes
pub mod alphabet;
/// Source image loading and wrapped pixel access
pub mod patterns;
