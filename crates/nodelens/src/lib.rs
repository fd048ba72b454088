#![forbid(unsafe_code)]

//! `nodelens` is a headless focus re-layout and camera engine for node-link graph views.
//!
//! The geometry lives in `nodelens-core`, the pan/zoom camera in `nodelens-camera` and the layout
//! pipeline in `nodelens-layout`. This crate re-exports all three and adds [`NodesChart`], the
//! adapter that turns view events into render frames.

pub use nodelens_core::*;

pub mod camera {
    pub use nodelens_camera::*;
}

pub mod layout {
    pub use nodelens_layout::*;
}

mod chart;

pub use chart::{ChartError, ChartFrame, ChartResult, NodesChart};
