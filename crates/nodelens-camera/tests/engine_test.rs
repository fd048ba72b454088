use nodelens_camera::{
    CachableState, CameraEngine, CameraOptions, CameraPhase, InMemoryZoomCache, ViewClock,
    ViewClockMock, ZoomCache,
};
use nodelens_core::{CameraTransform, LayoutIdentity, Point, ZoomLimits};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

fn options() -> CameraOptions {
    CameraOptions {
        bounded: false,
        fix_horizontal: false,
        fix_vertical: false,
        disabled: false,
        debounce_interval: ms(100),
    }
}

fn wide_limits() -> ZoomLimits {
    ZoomLimits {
        min_scale: Some(0.01),
        max_scale: Some(100.0),
        ..Default::default()
    }
}

fn engine_with(
    cache: InMemoryZoomCache,
    options: CameraOptions,
) -> (CameraEngine<InMemoryZoomCache>, ViewClockMock) {
    let (clock, mock) = ViewClock::mock();
    (CameraEngine::new(cache, clock, options), mock)
}

fn id(key: &str) -> LayoutIdentity {
    LayoutIdentity::new(key)
}

#[test]
fn first_sync_without_cache_keeps_defaults() {
    let (mut cam, _mock) = engine_with(InMemoryZoomCache::new(), options());
    let defaults = CameraTransform::uniform(15.0, 25.0, 0.5);
    cam.set_default_transform(defaults);
    cam.sync(id("x"), Some(wide_limits()), false);
    assert_eq!(cam.phase(), CameraPhase::Uninitialized);
    assert!(!cam.is_restored());
    assert_eq!(*cam.transform(), defaults);
}

#[test]
fn sync_restores_cached_state_for_the_identity() {
    let mut cache = InMemoryZoomCache::new();
    cache.set(
        &id("x"),
        CachableState::from_transform(&CameraTransform::new(1.0, 2.0, 3.0, 4.0), false, false),
    );
    let (mut cam, _mock) = engine_with(cache, options());
    cam.sync(id("x"), None, false);
    assert_eq!(cam.phase(), CameraPhase::Restored);
    assert_eq!(*cam.transform(), CameraTransform::new(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn restore_never_reads_another_identity() {
    let mut cache = InMemoryZoomCache::new();
    cache.set(
        &id("other"),
        CachableState::from_transform(&CameraTransform::uniform(9.0, 9.0, 9.0), false, false),
    );
    let (mut cam, _mock) = engine_with(cache, options());
    assert!(!cam.restore(&id("mine")));
    assert_eq!(*cam.transform(), CameraTransform::IDENTITY);
}

#[test]
fn debounced_writes_coalesce_into_the_last_state() {
    let (mut cam, mock) = engine_with(InMemoryZoomCache::new(), options());
    cam.sync(id("x"), Some(wide_limits()), false);

    cam.pan(10.0, 0.0);
    mock.advance_to(ms(50));
    cam.pan(10.0, 0.0);
    assert!(!cam.poll());
    mock.advance_to(ms(90));
    cam.pan(5.0, 7.0);
    let last = cam.cachable_state();
    assert_eq!(cam.next_deadline(), Some(ms(190)));

    mock.advance_to(ms(150));
    assert!(!cam.poll());
    assert!(cam.cache().is_empty());
    mock.advance_to(ms(189));
    assert!(!cam.poll());
    mock.advance_to(ms(190));
    assert!(cam.poll());
    assert_eq!(cam.phase(), CameraPhase::Persisted);
    assert_eq!(cam.cache().get(&id("x")), Some(last));
    assert_eq!(last.translate_x, Some(25.0));
    assert_eq!(last.translate_y, Some(7.0));

    // nothing else is pending afterwards
    mock.advance_to(ms(1000));
    assert!(!cam.poll());
    assert_eq!(cam.cache().len(), 1);
}

#[test]
fn identity_change_cancels_the_pending_write() {
    let mut cache = InMemoryZoomCache::new();
    let y_state = CameraTransform::uniform(-50.0, 60.0, 2.0);
    cache.set(&id("y"), CachableState::from_transform(&y_state, false, false));
    let (mut cam, mock) = engine_with(cache, options());

    cam.sync(id("x"), Some(wide_limits()), false);
    cam.pan(33.0, 44.0);
    assert!(cam.has_pending_write());

    mock.advance_to(ms(40));
    cam.sync(id("y"), Some(wide_limits()), false);
    assert!(!cam.has_pending_write());
    assert_eq!(*cam.transform(), y_state);
    assert_eq!(cam.phase(), CameraPhase::Restored);

    mock.advance_to(ms(5000));
    assert!(!cam.poll());
    assert_eq!(cam.cache().get(&id("x")), None);
}

#[test]
fn identity_change_without_cache_resets_to_defaults() {
    let (mut cam, _mock) = engine_with(InMemoryZoomCache::new(), options());
    cam.sync(id("x"), Some(wide_limits()), false);
    cam.pan(100.0, 100.0);
    cam.set_default_transform(CameraTransform::uniform(1.0, 1.0, 1.0));
    cam.on_identity_changed(id("z"));
    assert_eq!(*cam.transform(), CameraTransform::uniform(1.0, 1.0, 1.0));
    assert_eq!(cam.phase(), CameraPhase::Uninitialized);
    assert_eq!(cam.identity(), Some(&id("z")));
}

#[test]
fn forced_relayout_cancels_and_restores_again() {
    let (mut cam, mock) = engine_with(InMemoryZoomCache::new(), options());
    cam.sync(id("x"), Some(wide_limits()), false);
    cam.set_scale(2.0);
    mock.advance_to(ms(100));
    assert!(cam.poll());

    cam.pan(500.0, 0.0);
    cam.sync(id("x"), Some(wide_limits()), true);
    assert!(!cam.has_pending_write());
    // back to the last persisted state, not the unpersisted pan
    assert_eq!(cam.phase(), CameraPhase::Restored);
    assert_eq!(cam.transform().translate_x, 0.0);
    assert_eq!(cam.transform().scale_x, 2.0);
}

#[test]
fn sync_picks_up_a_cache_entry_written_later() {
    let shared = Rc::new(RefCell::new(InMemoryZoomCache::new()));
    let (clock, _mock) = ViewClock::mock();
    let mut cam = CameraEngine::new(Rc::clone(&shared), clock, options());
    cam.sync(id("x"), Some(wide_limits()), false);
    assert!(!cam.is_restored());

    shared.borrow_mut().set(
        &id("x"),
        CachableState {
            scale_x: Some(1.5),
            scale_y: Some(1.5),
            ..Default::default()
        },
    );
    cam.sync(id("x"), Some(wide_limits()), false);
    assert!(cam.is_restored());
    assert_eq!(cam.transform().scale_x, 1.5);
    assert_eq!(cam.transform().translate_x, 0.0);
}

#[test]
fn zoom_keeps_the_point_under_the_pointer() {
    let transforms = [
        CameraTransform::IDENTITY,
        CameraTransform::new(-120.0, 45.0, 0.35, 0.35),
        CameraTransform::new(300.5, -80.25, 2.5, 1.25),
    ];
    let pointers = [
        Point::new(0.0, 0.0),
        Point::new(640.0, 360.0),
        Point::new(-15.0, 999.0),
    ];
    let factors = [0.5, 0.9, 1.0, 1.1, 3.0];

    for t in transforms {
        for p in pointers {
            for f in factors {
                let mut cache = InMemoryZoomCache::new();
                cache.set(&id("x"), CachableState::from_transform(&t, false, false));
                let (mut cam, _mock) = engine_with(cache, options());
                cam.sync(id("x"), Some(wide_limits()), false);
                let before = cam.transform().invert(p);

                assert!(cam.zoom_at_pointer(p, f));
                let after = cam.transform().invert(p);
                assert!(
                    approx_eq(before.x, after.x) && approx_eq(before.y, after.y),
                    "t={t:?} p={p:?} f={f}: {before:?} vs {after:?}"
                );
                assert!(approx_eq(cam.transform().scale_x, t.scale_x / f));
                assert!(approx_eq(cam.transform().scale_y, t.scale_y / f));
            }
        }
    }
}

#[test]
fn zoom_clamps_scale_and_stays_pointer_invariant() {
    let (mut cam, _mock) = engine_with(InMemoryZoomCache::new(), options());
    let limits = ZoomLimits {
        min_scale: Some(0.5),
        max_scale: Some(2.0),
        ..Default::default()
    };
    cam.sync(id("x"), Some(limits), false);
    let p = Point::new(200.0, 100.0);
    let before = cam.transform().invert(p);
    assert!(cam.zoom_at_pointer(p, 0.1));
    assert_eq!(cam.transform().scale_x, 2.0);
    let after = cam.transform().invert(p);
    assert!(approx_eq(before.x, after.x) && approx_eq(before.y, after.y));

    assert!(cam.zoom_at_pointer(p, 100.0));
    assert_eq!(cam.transform().scale_y, 0.5);
}

#[test]
fn zoom_is_ignored_without_content_or_when_disabled() {
    let (mut cam, _mock) = engine_with(InMemoryZoomCache::new(), options());
    cam.sync(id("x"), None, false);
    assert!(!cam.can_change_zoom());
    assert!(!cam.zoom_at_pointer(Point::new(10.0, 10.0), 0.5));
    assert_eq!(*cam.transform(), CameraTransform::IDENTITY);
    assert!(!cam.has_pending_write());

    cam.update_zoom_limits(Some(wide_limits()));
    cam.set_disabled(true);
    assert!(!cam.zoom_at_pointer(Point::new(10.0, 10.0), 0.5));
    cam.set_disabled(false);
    assert!(cam.zoom_at_pointer(Point::new(10.0, 10.0), 0.5));
}

#[test]
fn bounded_pan_clamps_after_adding_the_delta() {
    let (mut cam, _mock) = engine_with(
        InMemoryZoomCache::new(),
        CameraOptions {
            bounded: true,
            ..options()
        },
    );
    cam.sync(
        id("x"),
        Some(ZoomLimits {
            min_translate_x: Some(-100.0),
            max_translate_x: Some(100.0),
            min_translate_y: Some(-50.0),
            max_translate_y: Some(50.0),
            ..Default::default()
        }),
        false,
    );
    cam.pan(80.0, -30.0);
    assert_eq!(cam.transform().translate(), Point::new(80.0, -30.0));
    cam.pan(80.0, -30.0);
    assert_eq!(cam.transform().translate(), Point::new(100.0, -50.0));
    cam.pan(-150.0, 0.0);
    assert_eq!(cam.transform().translate(), Point::new(-50.0, -50.0));
}

#[test]
fn unbounded_pan_ignores_translate_limits() {
    let (mut cam, _mock) = engine_with(InMemoryZoomCache::new(), options());
    cam.sync(
        id("x"),
        Some(ZoomLimits {
            max_translate_x: Some(10.0),
            ..Default::default()
        }),
        false,
    );
    cam.pan(500.0, 0.0);
    assert_eq!(cam.transform().translate_x, 500.0);
}

#[test]
fn degenerate_limits_do_not_clamp() {
    let (mut cam, _mock) = engine_with(
        InMemoryZoomCache::new(),
        CameraOptions {
            bounded: true,
            ..options()
        },
    );
    cam.sync(
        id("x"),
        Some(ZoomLimits {
            min_scale: Some(5.0),
            max_scale: Some(1.0),
            min_translate_x: Some(10.0),
            max_translate_x: Some(-10.0),
            ..Default::default()
        }),
        false,
    );
    cam.set_scale(3.0);
    assert_eq!(cam.transform().scale_x, 3.0);
    cam.pan(42.0, 0.0);
    assert_eq!(cam.transform().translate_x, 42.0);
}

#[test]
fn set_scale_keeps_translation() {
    let (mut cam, _mock) = engine_with(InMemoryZoomCache::new(), options());
    cam.sync(id("x"), Some(wide_limits()), false);
    cam.pan(12.0, 34.0);
    assert!(cam.set_scale(1.75));
    assert_eq!(*cam.transform(), CameraTransform::new(12.0, 34.0, 1.75, 1.75));
    assert!(!cam.set_scale(f64::NAN));
    assert_eq!(cam.transform().scale_x, 1.75);
}

#[test]
fn set_scale_is_ignored_without_content_or_when_disabled() {
    let (mut cam, _mock) = engine_with(InMemoryZoomCache::new(), options());
    cam.sync(id("x"), None, false);
    assert!(!cam.set_scale(2.0));
    assert_eq!(*cam.transform(), CameraTransform::IDENTITY);
    assert!(!cam.has_pending_write());

    cam.update_zoom_limits(Some(wide_limits()));
    cam.set_disabled(true);
    assert!(!cam.set_scale(2.0));
    assert_eq!(cam.transform().scale_x, 1.0);
    assert!(!cam.has_pending_write());
}

#[test]
fn restored_state_is_clamped_to_the_limits() {
    let mut cache = InMemoryZoomCache::new();
    cache.set(
        &id("x"),
        CachableState::from_transform(&CameraTransform::uniform(0.0, 0.0, 10.0), false, false),
    );
    let (mut cam, _mock) = engine_with(cache, options());
    cam.sync(
        id("x"),
        Some(ZoomLimits {
            min_scale: Some(0.5),
            max_scale: Some(3.0),
            ..Default::default()
        }),
        false,
    );
    assert!(cam.is_restored());
    assert_eq!(cam.transform().scale_x, 3.0);
    assert_eq!(cam.transform().scale_y, 3.0);
}

#[test]
fn tighter_limits_pull_the_live_scale_back_in() {
    let scale_limits = |max: f64| ZoomLimits {
        min_scale: Some(0.5),
        max_scale: Some(max),
        ..Default::default()
    };
    let (mut cam, _mock) = engine_with(InMemoryZoomCache::new(), options());
    cam.sync(id("x"), Some(scale_limits(5.0)), false);
    assert!(cam.set_scale(4.0));
    cam.sync(id("x"), Some(scale_limits(2.0)), false);
    assert_eq!(cam.transform().scale_x, 2.0);
    assert_eq!(cam.transform().scale_y, 2.0);
}

#[test]
fn bounded_restore_clamps_the_translation() {
    let mut cache = InMemoryZoomCache::new();
    cache.set(
        &id("x"),
        CachableState::from_transform(&CameraTransform::uniform(500.0, -500.0, 1.0), false, false),
    );
    let limits = ZoomLimits {
        min_translate_x: Some(-100.0),
        max_translate_x: Some(100.0),
        min_translate_y: Some(-50.0),
        max_translate_y: Some(50.0),
        ..Default::default()
    };

    let (mut bounded, _mock) = engine_with(
        cache.clone(),
        CameraOptions {
            bounded: true,
            ..options()
        },
    );
    bounded.sync(id("x"), Some(limits), false);
    assert_eq!(bounded.transform().translate(), Point::new(100.0, -50.0));

    let (mut free, _mock) = engine_with(cache, options());
    free.sync(id("x"), Some(limits), false);
    assert_eq!(free.transform().translate(), Point::new(500.0, -500.0));
}

#[test]
fn identity_change_picks_up_cached_limits() {
    let mut cache = InMemoryZoomCache::new();
    let tight = ZoomLimits {
        min_scale: Some(0.5),
        max_scale: Some(2.0),
        ..Default::default()
    };
    cache.set_limits(&id("z"), Some(tight));
    cache.set(
        &id("z"),
        CachableState::from_transform(&CameraTransform::uniform(0.0, 0.0, 10.0), false, false),
    );
    let (mut cam, _mock) = engine_with(cache, options());
    cam.sync(id("x"), Some(wide_limits()), false);

    cam.on_identity_changed(id("z"));
    assert_eq!(cam.limits(), Some(&tight));
    assert_eq!(cam.transform().scale_x, 2.0);
    assert_eq!(cam.phase(), CameraPhase::Restored);
}

#[test]
fn forced_relayout_reads_limits_back_from_the_cache() {
    let shared = Rc::new(RefCell::new(InMemoryZoomCache::new()));
    let (clock, _mock) = ViewClock::mock();
    let mut cam = CameraEngine::new(Rc::clone(&shared), clock, options());
    cam.sync(id("x"), Some(wide_limits()), false);
    assert!(cam.set_scale(50.0));

    let tight = ZoomLimits {
        min_scale: Some(0.5),
        max_scale: Some(4.0),
        ..Default::default()
    };
    shared.borrow_mut().set_limits(&id("x"), Some(tight));
    cam.on_force_relayout();
    assert!(!cam.has_pending_write());
    assert_eq!(cam.limits(), Some(&tight));
    assert_eq!(*cam.transform(), CameraTransform::IDENTITY);
}

#[test]
fn fixed_axes_are_left_out_of_the_cache() {
    let (mut cam, mock) = engine_with(
        InMemoryZoomCache::new(),
        CameraOptions {
            fix_vertical: true,
            ..options()
        },
    );
    cam.sync(id("x"), Some(wide_limits()), false);
    cam.pan(5.0, 6.0);
    let state = cam.cachable_state();
    assert_eq!(state.translate_x, Some(5.0));
    assert_eq!(state.scale_y, None);
    assert_eq!(state.translate_y, None);
    // still live in memory
    assert_eq!(cam.transform().translate_y, 6.0);

    mock.advance_to(ms(100));
    assert!(cam.poll());
    let stored = cam.cache().get(&id("x")).expect("stored");
    assert_eq!(stored.translate_y, None);
}

#[test]
fn flush_and_cancel_pending() {
    let (mut cam, _mock) = engine_with(InMemoryZoomCache::new(), options());
    cam.sync(id("x"), Some(wide_limits()), false);
    cam.pan(1.0, 1.0);
    assert!(cam.flush());
    assert_eq!(cam.cache().len(), 1);

    cam.pan(1.0, 1.0);
    assert!(cam.cancel_pending());
    assert!(!cam.flush());
    assert_eq!(
        cam.cache().get(&id("x")).and_then(|s| s.translate_x),
        Some(1.0)
    );
}
