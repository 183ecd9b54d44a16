//! Device enumeration and selection.
//!
//! This module describes physical capture devices and abstracts the
//! platform device registry behind a trait, allowing both real hardware
//! and mock implementations for testing.

mod descriptor;
mod registry;

#[cfg(feature = "camera")]
mod native;

pub use descriptor::{DeviceDescriptor, Facing, MediaKind};
pub use registry::{DeviceRegistry, MockRegistry, OpenError};

#[cfg(feature = "camera")]
pub use native::NativeRegistry;
