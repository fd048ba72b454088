//! Keyed store of last-known camera state and zoom limits, one entry per layout identity.

use nodelens_core::{CameraTransform, LayoutIdentity, ZoomLimits};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// The persisted subset of a [`CameraTransform`].
///
/// Axes fixed by configuration are left out (`None`) so a restore never overrides them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachableState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
}

impl CachableState {
    pub fn from_transform(t: &CameraTransform, fix_horizontal: bool, fix_vertical: bool) -> Self {
        let (scale_x, translate_x) = if fix_horizontal {
            (None, None)
        } else {
            (Some(t.scale_x), Some(t.translate_x))
        };
        let (scale_y, translate_y) = if fix_vertical {
            (None, None)
        } else {
            (Some(t.scale_y), Some(t.translate_y))
        };
        Self {
            scale_x,
            translate_x,
            scale_y,
            translate_y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scale_x.is_none()
            && self.translate_x.is_none()
            && self.scale_y.is_none()
            && self.translate_y.is_none()
    }

    /// Overlays the fields present in `other`.
    pub fn merge(&mut self, other: &CachableState) {
        self.scale_x = other.scale_x.or(self.scale_x);
        self.translate_x = other.translate_x.or(self.translate_x);
        self.scale_y = other.scale_y.or(self.scale_y);
        self.translate_y = other.translate_y.or(self.translate_y);
    }

    pub fn apply_to(&self, t: &mut CameraTransform) {
        if let Some(v) = self.scale_x {
            t.scale_x = v;
        }
        if let Some(v) = self.translate_x {
            t.translate_x = v;
        }
        if let Some(v) = self.scale_y {
            t.scale_y = v;
        }
        if let Some(v) = self.translate_y {
            t.translate_y = v;
        }
    }
}

/// Storage contract for camera state.
///
/// Reads return owned snapshots; a reader never observes a half-written entry.
pub trait ZoomCache {
    fn get(&self, identity: &LayoutIdentity) -> Option<CachableState>;

    /// Merges `state` onto the entry for `identity`.
    fn set(&mut self, identity: &LayoutIdentity, state: CachableState);

    fn get_limits(&self, _identity: &LayoutIdentity) -> Option<ZoomLimits> {
        None
    }

    fn set_limits(&mut self, _identity: &LayoutIdentity, _limits: Option<ZoomLimits>) {}
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryZoomCache {
    states: FxHashMap<LayoutIdentity, CachableState>,
    limits: FxHashMap<LayoutIdentity, ZoomLimits>,
}

impl InMemoryZoomCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn remove(&mut self, identity: &LayoutIdentity) -> Option<CachableState> {
        self.limits.remove(identity);
        self.states.remove(identity)
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.limits.clear();
    }
}

impl ZoomCache for InMemoryZoomCache {
    fn get(&self, identity: &LayoutIdentity) -> Option<CachableState> {
        self.states.get(identity).copied()
    }

    fn set(&mut self, identity: &LayoutIdentity, state: CachableState) {
        self.states
            .entry(identity.clone())
            .or_default()
            .merge(&state);
    }

    fn get_limits(&self, identity: &LayoutIdentity) -> Option<ZoomLimits> {
        self.limits.get(identity).copied()
    }

    fn set_limits(&mut self, identity: &LayoutIdentity, limits: Option<ZoomLimits>) {
        match limits {
            Some(limits) => {
                self.limits.insert(identity.clone(), limits);
            }
            None => {
                self.limits.remove(identity);
            }
        }
    }
}

/// Lets several views share one store on the UI thread.
impl<C: ZoomCache> ZoomCache for Rc<RefCell<C>> {
    fn get(&self, identity: &LayoutIdentity) -> Option<CachableState> {
        self.borrow().get(identity)
    }

    fn set(&mut self, identity: &LayoutIdentity, state: CachableState) {
        self.borrow_mut().set(identity, state);
    }

    fn get_limits(&self, identity: &LayoutIdentity) -> Option<ZoomLimits> {
        self.borrow().get_limits(identity)
    }

    fn set_limits(&mut self, identity: &LayoutIdentity, limits: Option<ZoomLimits>) {
        self.borrow_mut().set_limits(identity, limits);
    }
}
