//! Multiple instances sharing one coordinator: group routing, synthesized
//! show/hide signals, rebuild, and resize.

mod common;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use common::{FakeGeometry, TIP_NODE, standard_scene, tip_trigger};
use hovertip::registry::POINTER_ENTER;
use hovertip::{
    GlobalCoordinator, InputEvent, Point, Rect, Signal, Tooltip, TooltipProps, Trigger,
    TriggerAttrs,
};

const TIP_NODE_B: u64 = 200;

fn scene_with_two_triggers() -> FakeGeometry {
    standard_scene()
        .with_box(2, Rect::new(300.0, 300.0, 20.0, 20.0))
        .with_box(TIP_NODE_B, Rect::new(0.0, 0.0, 60.0, 30.0))
}

fn grouped(node: u64, group: &str) -> Tooltip {
    Tooltip::new(
        node,
        TooltipProps {
            group: Some(group.to_string()),
            ..Default::default()
        },
    )
}

#[test]
fn show_signal_routes_by_trigger_membership() {
    common::init_logging();
    let mut coordinator = GlobalCoordinator::new();
    let geo = scene_with_two_triggers();
    let now = Instant::now();

    let mut nav = grouped(TIP_NODE, "nav");
    let mut side = grouped(TIP_NODE_B, "side");
    nav.mount(&mut coordinator, &[tip_trigger(1, Some("nav"))]);
    side.mount(&mut coordinator, &[tip_trigger(2, Some("side"))]);
    assert_eq!(coordinator.subscriber_count(), 2);

    coordinator.broadcast(Signal::Show { target: 1 });
    nav.process_signals(&geo, now);
    side.process_signals(&geo, now);

    assert!(nav.is_visible());
    assert!(!side.is_visible(), "foreign target must not show");
}

#[test]
fn hide_signal_requires_membership_and_visibility() {
    let mut coordinator = GlobalCoordinator::new();
    let geo = scene_with_two_triggers();
    let now = Instant::now();

    let mut nav = grouped(TIP_NODE, "nav");
    let mut side = grouped(TIP_NODE_B, "side");
    nav.mount(&mut coordinator, &[tip_trigger(1, Some("nav"))]);
    side.mount(&mut coordinator, &[tip_trigger(2, Some("side"))]);

    nav.handle_event(&InputEvent::new(POINTER_ENTER, 1), &geo, now);
    side.handle_event(&InputEvent::new(POINTER_ENTER, 2), &geo, now);
    assert!(nav.is_visible() && side.is_visible());

    // Hide aimed at trigger 1 reaches both mailboxes but only nav acts.
    coordinator.broadcast(Signal::Hide { target: 1 });
    nav.process_signals(&geo, now);
    side.process_signals(&geo, now);
    assert!(!nav.is_visible());
    assert!(side.is_visible());

    // A second hide for an already-hidden instance is dropped.
    coordinator.broadcast(Signal::Hide { target: 1 });
    nav.process_signals(&geo, now);
    assert!(!nav.is_visible());
}

#[test]
fn show_signal_is_dropped_when_already_visible() {
    let shows = Rc::new(Cell::new(0u32));
    let s = Rc::clone(&shows);
    let mut coordinator = GlobalCoordinator::new();
    let geo = scene_with_two_triggers();
    let now = Instant::now();

    let mut tip = Tooltip::new(TIP_NODE, TooltipProps::default())
        .after_show(move || s.set(s.get() + 1));
    tip.mount(&mut coordinator, &[tip_trigger(1, None), tip_trigger(2, None)]);

    tip.handle_event(&InputEvent::new(POINTER_ENTER, 1), &geo, now);
    let anchored_at = tip.position();

    coordinator.broadcast(Signal::Show { target: 2 });
    tip.process_signals(&geo, now);

    assert_eq!(tip.position(), anchored_at, "visible instance keeps its anchor");
    assert_eq!(tip.current_target(), Some(1));
    assert_eq!(shows.get(), 1);
}

#[test]
fn pointer_moving_between_shared_triggers_reanchors_silently() {
    let shows = Rc::new(Cell::new(0u32));
    let s = Rc::clone(&shows);
    let geo = scene_with_two_triggers();
    let now = Instant::now();

    let mut tip = Tooltip::new(TIP_NODE, TooltipProps::default())
        .after_show(move || s.set(s.get() + 1));
    tip.bind(&[tip_trigger(1, None), tip_trigger(2, None)]);

    tip.handle_event(&InputEvent::new(POINTER_ENTER, 1), &geo, now);
    assert_eq!(tip.position(), Some(Point::new(80.0, 70.0)));

    tip.handle_event(&InputEvent::new(POINTER_ENTER, 2), &geo, now);
    assert!(tip.is_visible());
    assert_eq!(tip.current_target(), Some(2));
    assert_eq!(tip.position(), Some(Point::new(280.0, 270.0)));
    assert_eq!(shows.get(), 1, "re-anchoring must not refire after_show");
}

#[test]
fn bind_filters_triggers_by_group_key() {
    let geo = scene_with_two_triggers();
    let now = Instant::now();

    let mut nav = grouped(TIP_NODE, "nav");
    nav.bind(&[tip_trigger(1, Some("nav")), tip_trigger(2, Some("side"))]);

    nav.handle_event(&InputEvent::new(POINTER_ENTER, 2), &geo, now);
    assert!(!nav.is_visible(), "trigger from another group is not bound");
    nav.handle_event(&InputEvent::new(POINTER_ENTER, 1), &geo, now);
    assert!(nav.is_visible());
}

#[test]
fn ungrouped_instance_ignores_grouped_triggers() {
    let geo = scene_with_two_triggers();
    let now = Instant::now();

    let mut tip = Tooltip::new(TIP_NODE, TooltipProps::default());
    tip.bind(&[tip_trigger(1, None), tip_trigger(2, Some("nav"))]);

    tip.handle_event(&InputEvent::new(POINTER_ENTER, 2), &geo, now);
    assert!(!tip.is_visible());
    tip.handle_event(&InputEvent::new(POINTER_ENTER, 1), &geo, now);
    assert!(tip.is_visible());
}

#[test]
fn rebuild_signal_rebinds_the_current_snapshot() {
    let mut coordinator = GlobalCoordinator::new();
    let geo = scene_with_two_triggers();
    let now = Instant::now();

    let mut tip = Tooltip::new(TIP_NODE, TooltipProps::default());
    tip.mount(&mut coordinator, &[tip_trigger(1, None)]);

    // The host surface gained a trigger; a new scan lands via bind and the
    // rebuild broadcast re-applies it.
    tip.bind(&[tip_trigger(1, None), tip_trigger(2, None)]);
    coordinator.broadcast(Signal::Rebuild);
    tip.process_signals(&geo, now);

    tip.handle_event(&InputEvent::new(POINTER_ENTER, 2), &geo, now);
    assert!(tip.is_visible());
    assert_eq!(tip.current_target(), Some(2));
}

#[test]
fn resize_rebinds_only_when_configured() {
    let geo = scene_with_two_triggers();
    let now = Instant::now();

    let mut rebuilding = Tooltip::new(TIP_NODE, TooltipProps::default());
    rebuilding.bind(&[tip_trigger(1, None)]);
    rebuilding.handle_resize(&[tip_trigger(1, None), tip_trigger(2, None)]);
    rebuilding.handle_event(&InputEvent::new(POINTER_ENTER, 2), &geo, now);
    assert!(rebuilding.is_visible());

    let mut frozen = Tooltip::new(
        TIP_NODE_B,
        TooltipProps {
            resize_rebuild: false,
            ..Default::default()
        },
    );
    frozen.bind(&[tip_trigger(1, None)]);
    frozen.handle_resize(&[tip_trigger(1, None), tip_trigger(2, None)]);
    frozen.handle_event(&InputEvent::new(POINTER_ENTER, 2), &geo, now);
    assert!(!frozen.is_visible(), "resize is inert with rebuild disabled");
}

#[test]
fn dispose_unsubscribes_from_the_coordinator() {
    let mut coordinator = GlobalCoordinator::new();
    let geo = scene_with_two_triggers();
    let now = Instant::now();

    let mut tip = Tooltip::new(TIP_NODE, TooltipProps::default());
    tip.mount(&mut coordinator, &[tip_trigger(1, None)]);
    assert_eq!(coordinator.subscriber_count(), 1);

    tip.dispose(&mut coordinator);
    assert_eq!(coordinator.subscriber_count(), 0);

    coordinator.broadcast(Signal::Show { target: 1 });
    tip.process_signals(&geo, now);
    assert!(!tip.is_visible());
}

#[test]
fn distinct_events_drive_distinct_instances_independently() {
    // Two ungrouped instances over disjoint trigger sets, one custom-event,
    // one hover. Input routing never crosses.
    let geo = scene_with_two_triggers();
    let now = Instant::now();

    let mut hover = Tooltip::new(TIP_NODE, TooltipProps::default());
    hover.bind(&[tip_trigger(1, None)]);

    let mut click = Tooltip::new(TIP_NODE_B, TooltipProps::default());
    click.bind(&[Trigger::new(
        2,
        TriggerAttrs {
            tip: Some("click tip".to_string()),
            event: Some("click".to_string()),
            event_off: Some("dblclick".to_string()),
            ..Default::default()
        },
    )]);

    let click_event = InputEvent::new("click", 2);
    hover.handle_event(&click_event, &geo, now);
    click.handle_event(&click_event, &geo, now);
    assert!(!hover.is_visible());
    assert!(click.is_visible());

    click.handle_event(&InputEvent::new("dblclick", 2), &geo, now);
    assert!(!click.is_visible());
}
