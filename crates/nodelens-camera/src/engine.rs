use crate::cache::{CachableState, ZoomCache};
use crate::clock::ViewClock;
use crate::debounce::Debouncer;
use nodelens_core::{CameraTransform, ChartConfig, LayoutIdentity, Point, ZoomLimits};
use std::time::Duration;

/// Where the camera stands relative to the zoom cache for the current layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPhase {
    /// Nothing restored for the current identity yet.
    Uninitialized,
    /// Live state was loaded from the cache.
    Restored,
    /// Live state changed; a cache write is pending.
    Interacting,
    /// The pending write landed.
    Persisted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraOptions {
    /// Clamp panning to the translate limits.
    pub bounded: bool,
    pub fix_horizontal: bool,
    pub fix_vertical: bool,
    /// Zooming explicitly turned off by the caller.
    pub disabled: bool,
    pub debounce_interval: Duration,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl CameraOptions {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            bounded: config.zoom.bounded,
            fix_horizontal: config.zoom.fix_horizontal,
            fix_vertical: config.zoom.fix_vertical,
            disabled: false,
            debounce_interval: config.zoom_cache_debounce(),
        }
    }
}

#[derive(Debug, Clone)]
struct PendingWrite {
    identity: LayoutIdentity,
    state: CachableState,
}

/// Pan/zoom state of one chart, restored from and persisted to a [`ZoomCache`] per layout
/// identity.
///
/// Mutations apply to the live transform immediately; only the cache write is deferred until the
/// debounce interval passes without further mutations. The owner drives time by calling
/// [`poll`](Self::poll).
#[derive(Debug)]
pub struct CameraEngine<C> {
    cache: C,
    clock: ViewClock,
    options: CameraOptions,
    transform: CameraTransform,
    defaults: CameraTransform,
    limits: Option<ZoomLimits>,
    identity: Option<LayoutIdentity>,
    restored: bool,
    phase: CameraPhase,
    debouncer: Debouncer<PendingWrite>,
}

impl<C: ZoomCache> CameraEngine<C> {
    pub fn new(cache: C, clock: ViewClock, options: CameraOptions) -> Self {
        Self {
            cache,
            clock,
            options,
            transform: CameraTransform::IDENTITY,
            defaults: CameraTransform::IDENTITY,
            limits: None,
            identity: None,
            restored: false,
            phase: CameraPhase::Uninitialized,
            debouncer: Debouncer::new(options.debounce_interval),
        }
    }

    pub fn transform(&self) -> &CameraTransform {
        &self.transform
    }

    pub fn limits(&self) -> Option<&ZoomLimits> {
        self.limits.as_ref()
    }

    pub fn identity(&self) -> Option<&LayoutIdentity> {
        self.identity.as_ref()
    }

    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    pub fn is_restored(&self) -> bool {
        self.restored
    }

    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    pub fn clock(&self) -> &ViewClock {
        &self.clock
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
    }

    /// Transform used when an identity has nothing cached.
    ///
    /// Only takes effect on the next identity change or forced relayout.
    pub fn set_default_transform(&mut self, defaults: CameraTransform) {
        self.defaults = defaults;
    }

    pub fn default_transform(&self) -> &CameraTransform {
        &self.defaults
    }

    /// Stores `limits` and pulls the live transform back inside them.
    pub fn update_zoom_limits(&mut self, limits: Option<ZoomLimits>) {
        if let Some(l) = &limits {
            if l.is_degenerate_scale() {
                tracing::warn!(
                    min_scale = ?l.min_scale,
                    max_scale = ?l.max_scale,
                    "degenerate scale limits; scale clamping skipped"
                );
            }
            if l.is_degenerate_translate_x() || l.is_degenerate_translate_y() {
                tracing::warn!(limits = ?l, "degenerate translate limits; clamping skipped");
            }
        }
        self.limits = limits;
        self.enforce_limits();
    }

    /// Clamps the live scale, and the translation when bounded, to the current limits.
    fn enforce_limits(&mut self) {
        let Some(limits) = self.limits else {
            return;
        };
        let t = &mut self.transform;
        t.scale_x = limits.clamp_scale(t.scale_x);
        t.scale_y = limits.clamp_scale(t.scale_y);
        if self.options.bounded {
            t.translate_x = limits.clamp_translate_x(t.translate_x);
            t.translate_y = limits.clamp_translate_y(t.translate_y);
        }
    }

    /// Loads the cached state for `identity`, if any. Returns whether something was restored.
    pub fn restore(&mut self, identity: &LayoutIdentity) -> bool {
        match self.cache.get(identity) {
            Some(state) if !state.is_empty() => {
                state.apply_to(&mut self.transform);
                self.enforce_limits();
                self.restored = true;
                self.phase = CameraPhase::Restored;
                tracing::debug!(%identity, transform = %self.transform, "camera restored");
                true
            }
            _ => {
                tracing::debug!(%identity, "no cached camera state");
                false
            }
        }
    }

    /// Switches to `identity`, picking up its cached limits (current limits stay when none are
    /// cached) and then its cached transform.
    pub fn on_identity_changed(&mut self, identity: LayoutIdentity) {
        self.reset(identity.clone());
        if let Some(limits) = self.cache.get_limits(&identity) {
            self.update_zoom_limits(Some(limits));
        }
        self.restore(&identity);
    }

    pub fn on_force_relayout(&mut self) {
        let Some(identity) = self.identity.clone() else {
            self.cancel_pending();
            self.transform = self.defaults;
            self.enforce_limits();
            return;
        };
        self.on_identity_changed(identity);
    }

    /// Per-update entry point: handles an identity change or forced relayout, applies the new
    /// limits, then retries the restore while nothing has been restored yet.
    pub fn sync(
        &mut self,
        identity: LayoutIdentity,
        limits: Option<ZoomLimits>,
        force_relayout: bool,
    ) {
        if force_relayout || self.identity.as_ref() != Some(&identity) {
            self.reset(identity);
        }
        self.update_zoom_limits(limits);
        if !self.restored {
            if let Some(identity) = self.identity.clone() {
                self.restore(&identity);
            }
        }
    }

    fn reset(&mut self, identity: LayoutIdentity) {
        self.cancel_pending();
        self.restored = false;
        self.phase = CameraPhase::Uninitialized;
        self.transform = self.defaults;
        self.enforce_limits();
        self.identity = Some(identity);
    }

    pub fn can_change_zoom(&self) -> bool {
        !self.options.disabled && self.limits.is_some()
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        let mut tx = self.transform.translate_x + dx;
        let mut ty = self.transform.translate_y + dy;
        if self.options.bounded {
            if let Some(limits) = &self.limits {
                tx = limits.clamp_translate_x(tx);
                ty = limits.clamp_translate_y(ty);
            }
        }
        self.transform.translate_x = tx;
        self.transform.translate_y = ty;
        self.schedule_persist();
    }

    /// Zooms by `1 / factor` keeping the content under `pointer` fixed on screen.
    ///
    /// Returns `false` (and changes nothing) while zooming is unavailable.
    pub fn zoom_at_pointer(&mut self, pointer: Point, factor: f64) -> bool {
        if !self.can_change_zoom() {
            return false;
        }
        if !(factor.is_finite() && factor > 0.0) {
            tracing::warn!(factor, "ignoring invalid zoom factor");
            return false;
        }

        let before = self.transform.invert(pointer);
        let scale_x = self.clamp_scale(self.transform.scale_x / factor);
        let scale_y = self.clamp_scale(self.transform.scale_y / factor);
        self.transform = CameraTransform::new(
            pointer.x - before.x * scale_x,
            pointer.y - before.y * scale_y,
            scale_x,
            scale_y,
        );
        self.schedule_persist();
        true
    }

    /// Sets both scales, leaving the translation untouched.
    ///
    /// Returns `false` (and changes nothing) while zooming is unavailable.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !self.can_change_zoom() {
            return false;
        }
        if !(scale.is_finite() && scale > 0.0) {
            tracing::warn!(scale, "ignoring invalid scale");
            return false;
        }
        let scale = self.clamp_scale(scale);
        self.transform.scale_x = scale;
        self.transform.scale_y = scale;
        self.schedule_persist();
        true
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        match &self.limits {
            Some(limits) => limits.clamp_scale(scale),
            None => scale,
        }
    }

    /// The part of the live transform that gets persisted.
    pub fn cachable_state(&self) -> CachableState {
        CachableState::from_transform(
            &self.transform,
            self.options.fix_horizontal,
            self.options.fix_vertical,
        )
    }

    fn schedule_persist(&mut self) {
        self.phase = CameraPhase::Interacting;
        let Some(identity) = self.identity.clone() else {
            return;
        };
        let state = self.cachable_state();
        let now = self.clock.now();
        self.debouncer.schedule(PendingWrite { identity, state }, now);
    }

    pub fn has_pending_write(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// When the pending write becomes due, measured on the engine clock.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.debouncer.deadline()
    }

    /// Writes the pending state if its quiet period has elapsed. Returns whether a write landed.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        match self.debouncer.poll(now) {
            Some(write) => {
                self.write(write);
                true
            }
            None => false,
        }
    }

    /// Writes the pending state immediately.
    pub fn flush(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(write) => {
                self.write(write);
                true
            }
            None => false,
        }
    }

    /// Drops the pending write, e.g. when the view goes away.
    pub fn cancel_pending(&mut self) -> bool {
        let canceled = self.debouncer.cancel();
        if let Some(write) = &canceled {
            tracing::debug!(identity = %write.identity, "pending camera write canceled");
        }
        canceled.is_some()
    }

    fn write(&mut self, write: PendingWrite) {
        tracing::debug!(identity = %write.identity, state = ?write.state, "camera state cached");
        self.cache.set(&write.identity, write.state);
        self.phase = CameraPhase::Persisted;
    }
}
