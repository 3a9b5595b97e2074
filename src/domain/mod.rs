//! Domain logic - pure version rules independent of the filesystem

pub mod version;

pub use version::{ReleaseLevel, Version};
