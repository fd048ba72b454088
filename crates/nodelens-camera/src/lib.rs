#![forbid(unsafe_code)]

//! Pan/zoom camera for graph views.
//!
//! The camera keeps one live [`CameraTransform`](nodelens_core::CameraTransform) and persists the
//! cachable part of it to a [`ZoomCache`] keyed by
//! [`LayoutIdentity`](nodelens_core::LayoutIdentity), after a quiet period. Switching identity
//! cancels any pending write before the new identity's state is restored.

pub mod cache;
pub mod clock;
pub mod debounce;
pub mod engine;

pub use cache::{CachableState, InMemoryZoomCache, ZoomCache};
pub use clock::{ViewClock, ViewClockMock};
pub use debounce::Debouncer;
pub use engine::{CameraEngine, CameraOptions, CameraPhase};
