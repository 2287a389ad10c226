//! Centralized constants for the starfield
//!
//! This module contains the shared motion, limit, and timing values
//! to ensure consistency across the codebase.

/// Star kinematics. All rates are in world units (or radians) per second.
pub mod motion {
    /// Fallback horizontal velocity when the sampled component is exactly zero.
    pub const VELOCITY_X_FALLBACK: f32 = 6.0;
    /// Fallback vertical velocity when the sampled component is exactly zero.
    pub const VELOCITY_Y_FALLBACK: f32 = -6.0;

    /// Magnitude of the circular perturbation superimposed on linear drift.
    pub const WOBBLE_DRIFT: f32 = 3.0;

    /// Twinkle amplitude around the base opacity.
    pub const TWINKLE_DEPTH: f32 = 0.2;
    /// Twinkle frequency as a multiple of the phase accumulator.
    pub const TWINKLE_RATE: f32 = 1.5;
    /// Opacity floor; stars never fully vanish.
    pub const ALPHA_MIN: f32 = 0.4;
    /// Opacity ceiling; stars never fully saturate.
    pub const ALPHA_MAX: f32 = 1.0;

    /// Random spawn region extends this far beyond the visible viewport.
    pub const SPAWN_PAD: f32 = 100.0;
    /// Wrap boundary beyond the viewport; re-entry happens off-screen.
    pub const WRAP_PAD: f32 = 120.0;
}

/// Upload and storage limits.
pub mod limits {
    /// Largest accepted upload, in bytes.
    pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
    /// Longest edge of an encoded image, in pixels.
    pub const MAX_IMAGE_DIMENSION: u32 = 1200;
    /// JPEG re-encode quality (out of 100).
    pub const JPEG_QUALITY: u8 = 85;

    /// Size cap for the local post blob, in bytes.
    pub const LOCAL_BLOB_CAP: usize = 5 * 1024 * 1024;
    /// How many of the newest posts survive a blob-cap trim.
    pub const LOCAL_RETAIN: usize = 100;
}

/// UI timing.
pub mod timing {
    /// Delay before a resize actually redraws the background decoration.
    pub const RESIZE_DEBOUNCE_SECS: f32 = 0.2;
    /// Toast lifetime for success and warning messages.
    pub const TOAST_SECS: f32 = 1.8;
    /// Toast lifetime for errors.
    pub const TOAST_ERROR_SECS: f32 = 3.0;
}
