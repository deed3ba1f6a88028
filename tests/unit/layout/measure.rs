use super::*;

fn style(size: f32) -> TextStyle {
    TextStyle {
        font_size_px: size,
        max_width_px: None,
    }
}

#[test]
fn fixed_advance_scales_with_chars_and_size() {
    let mut m = FixedAdvanceMeasurer { advance_em: 0.5 };
    assert_eq!(m.measure_width("abcd", &style(100.0)).unwrap(), 200.0);
    assert_eq!(m.measure_width("", &style(100.0)).unwrap(), 0.0);
}

#[test]
fn fixed_advance_respects_wrap_width() {
    let mut m = FixedAdvanceMeasurer::default();
    let s = TextStyle {
        font_size_px: 100.0,
        max_width_px: Some(120.0),
    };
    assert_eq!(m.measure_width("abcdef", &s).unwrap(), 120.0);
}

#[test]
fn parley_rejects_non_font_bytes() {
    let err = ParleyMeasurer::new(b"definitely not a font").unwrap_err();
    assert!(matches!(err, CuecastError::Measurement(_)));
}

#[test]
fn slot_two_phase_roundtrip() {
    let mut slot = MeasurementSlot::new();
    assert_eq!(slot.current(), None);
    assert!(!slot.is_pending());

    let t = slot.request("hello");
    assert!(slot.is_pending());
    assert_eq!(slot.current(), None);
    assert!(slot.resolve(t, 320.0));
    assert!(!slot.is_pending());
    assert_eq!(slot.current(), Some(320.0));
}

#[test]
fn stale_ticket_is_rejected() {
    let mut slot = MeasurementSlot::new();
    let old = slot.request("first");
    let new = slot.request("second");
    assert!(!slot.resolve(old, 999.0));
    assert_eq!(slot.current(), None);
    assert!(slot.resolve(new, 100.0));
    assert_eq!(slot.current(), Some(100.0));
}

#[test]
fn same_text_keeps_width_while_remeasuring() {
    let mut slot = MeasurementSlot::new();
    let t = slot.request("x");
    slot.resolve(t, 50.0);

    let t2 = slot.request("x");
    assert_eq!(slot.current(), Some(50.0));
    assert!(slot.resolve(t2, 50.0));
    assert_eq!(slot.current(), Some(50.0));

    slot.request("y");
    assert_eq!(slot.current(), None);
}

#[test]
fn zero_or_invalid_width_reads_as_unmeasured() {
    let mut slot = MeasurementSlot::new();
    let t = slot.request("x");
    assert!(slot.resolve(t, 0.0));
    assert_eq!(slot.current(), None);
    let t = slot.request("x");
    assert!(slot.resolve(t, f64::NAN));
    assert_eq!(slot.current(), None);
}

#[test]
fn invalidate_before_request_is_noop() {
    let mut slot = MeasurementSlot::new();
    assert!(slot.invalidate().is_none());
    assert!(!slot.is_pending());
}

#[test]
fn measure_pending_resolves_synchronously() {
    let slot: SharedSlot = Arc::new(Mutex::new(MeasurementSlot::new()));
    let mut m = FixedAdvanceMeasurer { advance_em: 1.0 };

    assert_eq!(measure_pending(&slot, &mut m, &style(10.0)).unwrap(), None);

    lock_slot(&slot).request("abc");
    assert_eq!(
        measure_pending(&slot, &mut m, &style(10.0)).unwrap(),
        Some(30.0)
    );
    assert!(!lock_slot(&slot).is_pending());

    // Idempotent: nothing pending, same answer.
    assert_eq!(
        measure_pending(&slot, &mut m, &style(10.0)).unwrap(),
        Some(30.0)
    );
}

#[test]
fn resize_invalidates_only_live_subscriptions() {
    let observer = ResizeObserver::new();
    let a: SharedSlot = Arc::new(Mutex::new(MeasurementSlot::new()));
    let b: SharedSlot = Arc::new(Mutex::new(MeasurementSlot::new()));
    for slot in [&a, &b] {
        let t = lock_slot(slot).request("text");
        lock_slot(slot).resolve(t, 10.0);
    }

    let sub_a = observer.observe(a.clone());
    {
        let _sub_b = observer.observe(b.clone());
        assert_eq!(observer.observed_count(), 2);
    }
    assert_eq!(observer.observed_count(), 1);

    assert_eq!(observer.notify_resize(), 1);
    assert!(lock_slot(&a).is_pending());
    assert!(!lock_slot(&b).is_pending());
    // Width survives a resize until re-measured.
    assert_eq!(lock_slot(&a).current(), Some(10.0));

    drop(sub_a);
    assert_eq!(observer.observed_count(), 0);
    assert_eq!(observer.notify_resize(), 0);
}

#[test]
fn subscription_outliving_observer_drops_cleanly() {
    let slot: SharedSlot = Arc::new(Mutex::new(MeasurementSlot::new()));
    let sub = {
        let observer = ResizeObserver::new();
        observer.observe(slot)
    };
    drop(sub);
}

#[test]
fn resize_ticket_supersedes_in_flight_measurement() {
    let observer = ResizeObserver::new();
    let slot: SharedSlot = Arc::new(Mutex::new(MeasurementSlot::new()));
    let _sub = observer.observe(slot.clone());

    let in_flight = lock_slot(&slot).request("abc");
    observer.notify_resize();
    assert!(!lock_slot(&slot).resolve(in_flight, 77.0));

    let mut m = FixedAdvanceMeasurer { advance_em: 1.0 };
    assert_eq!(
        measure_pending(&slot, &mut m, &style(2.0)).unwrap(),
        Some(6.0)
    );
}
