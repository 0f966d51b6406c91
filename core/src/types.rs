//! Shared primitive types used across the portal core.

/// A caller-supplied complaint token, e.g. "RWY-2024-001234".
pub type TokenId = String;

/// Milliseconds on the portal clock.
pub type Millis = u64;

/// Monotonic lookup-request generation. Only the latest generation's
/// result may be applied to the view.
pub type Generation = u64;
