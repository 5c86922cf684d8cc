//! Update-ordering scenarios across the wrapper and the host engine.
//!
//! A change event fired by the wrapped control must produce the
//! stale-state render and the fresh-state render, in that order, for
//! any render-count observer - whether the new value flows through the
//! parent's props/callback path or through imperative access to the
//! mounted instance.

use std::cell::RefCell;
use std::rc::Rc;

use uncontrollable::engine::{
    get_ref, instance_handler, mount, mounted_count, reset_engine, set_state, Component, RenderCtx,
};
use uncontrollable::{
    reset_warning_sink, set_warning_sink, tap, wrap, CollectingSink, Props, PropValue, TapMap,
    WrapperHandle,
};

type RenderLog = Rc<RefCell<Vec<Option<PropValue>>>>;

/// Base control recording the effective `value` prop on each render.
fn observed_base(log: RenderLog) -> Rc<Component> {
    Component::new("Base", move |ctx: &RenderCtx| {
        log.borrow_mut().push(ctx.props().value("value").cloned());
    })
}

/// Fire the change handler currently installed on the mounted control.
///
/// Equivalent to the control itself firing the event: the handler is
/// fetched from the instance's current props at call time.
fn fire_change(wrapper_index: usize, value: i64) {
    let inner = get_ref(wrapper_index, "inner").expect("inner ref");
    let handler = instance_handler(inner, "onChange").expect("onChange prop");
    handler(&[PropValue::Int(value)]);
}

fn ints(values: &[i64]) -> Vec<Option<PropValue>> {
    values.iter().map(|&v| Some(PropValue::Int(v))).collect()
}

#[test]
fn updates_in_order_when_controlled() {
    reset_engine();

    let log: RenderLog = Rc::new(RefCell::new(Vec::new()));
    let control = wrap(&observed_base(log.clone()), &[("value", "onChange")], None).unwrap();

    // Parent owns the value: feeds it down explicitly and adopts
    // changes into its own state.
    let control_for_parent = control.clone();
    let parent = Component::new("Parent", move |ctx: &RenderCtx| {
        let value = ctx.state("value").unwrap_or(PropValue::Int(5));
        let parent_index = ctx.index();
        let child = ctx.render_child(
            &control_for_parent,
            Props::new()
                .with_value("value", value)
                .with_handler("onChange", move |args: &[PropValue]| {
                    let next = args.first().cloned().unwrap_or(PropValue::Null);
                    set_state(parent_index, "value", next);
                }),
        );
        ctx.set_ref("ctrl", child);
    });

    let handle = mount(&parent, Props::new());
    let wrapper_index = get_ref(handle.index(), "ctrl").unwrap();

    fire_change(wrapper_index, 42);

    // Exactly two renders: the mount render with the stale value, then
    // the parent-driven render with the fresh one. Nothing coalesced.
    assert_eq!(*log.borrow(), ints(&[5, 42]));
}

#[test]
fn updates_in_order_when_uncontrolled() {
    reset_engine();

    let log: RenderLog = Rc::new(RefCell::new(Vec::new()));
    let control = wrap(&observed_base(log.clone()), &[("value", "onChange")], None).unwrap();

    // Parent supplies only the seed; the wrapper tracks internally.
    let control_for_parent = control.clone();
    let parent = Component::new("Parent", move |ctx: &RenderCtx| {
        let child = ctx.render_child(
            &control_for_parent,
            Props::new().with_value("defaultValue", 5),
        );
        ctx.set_ref("ctrl", child);
    });

    let handle = mount(&parent, Props::new());
    let wrapper_index = get_ref(handle.index(), "ctrl").unwrap();

    fire_change(wrapper_index, 42);

    assert_eq!(*log.borrow(), ints(&[5, 42]));

    // Imperative path: fetch the mounted control's current handler and
    // invoke it directly. Same observable sequence, one more render.
    log.borrow_mut().clear();
    fire_change(wrapper_index, 84);

    assert_eq!(*log.borrow(), ints(&[84]));
    assert_eq!(
        WrapperHandle::new(wrapper_index).value("value"),
        Some(PropValue::Int(84))
    );
}

#[test]
fn imperative_change_reaches_caller_handler() {
    reset_engine();

    let log: RenderLog = Rc::new(RefCell::new(Vec::new()));
    let control = wrap(&observed_base(log.clone()), &[("value", "onChange")], None).unwrap();

    let seen: Rc<RefCell<Vec<PropValue>>> = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = seen.clone();
    let handle = mount(
        &control,
        Props::new()
            .with_value("defaultValue", 10)
            .with_handler("onChange", move |args: &[PropValue]| {
                seen_clone.borrow_mut().push(args[0].clone());
            }),
    );

    fire_change(handle.index(), 42);

    assert_eq!(*seen.borrow(), vec![PropValue::Int(42)]);
    assert_eq!(
        WrapperHandle::new(handle.index()).value("value"),
        Some(PropValue::Int(42))
    );
    assert_eq!(*log.borrow(), ints(&[10, 42]));
}

#[test]
fn caller_handler_runs_after_the_synchronous_rerender() {
    reset_engine();

    let order: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let order_for_render = order.clone();
    let base = Component::new("Base", move |ctx: &RenderCtx| {
        let value = ctx.props().value("value").cloned();
        order_for_render.borrow_mut().push(format!(
            "render:{}",
            value.and_then(|v| v.as_int()).unwrap_or(-1)
        ));
    });

    let order_for_tap = order.clone();
    let mut taps = TapMap::new();
    taps.insert(
        "onChange".to_string(),
        tap(move |_handle, _args| {
            order_for_tap.borrow_mut().push("tap".to_string());
        }),
    );

    let control = wrap(&base, &[("value", "onChange")], Some(taps)).unwrap();

    let order_for_caller = order.clone();
    let handle = mount(
        &control,
        Props::new()
            .with_value("defaultValue", 5)
            .with_handler("onChange", move |_args| {
                order_for_caller.borrow_mut().push("caller".to_string());
            }),
    );

    fire_change(handle.index(), 42);

    // The store update re-rendered the wrapper mid-invocation; the
    // caller's handler still ran last.
    assert_eq!(
        *order.borrow(),
        vec!["render:5", "tap", "render:42", "caller"]
    );
}

#[test]
fn warning_cadence_is_per_render() {
    reset_engine();

    let sink = CollectingSink::new();
    set_warning_sink(Rc::new(sink.clone()));

    let log: RenderLog = Rc::new(RefCell::new(Vec::new()));
    let control = wrap(&observed_base(log.clone()), &[("value", "onChange")], None).unwrap();

    let control_for_parent = control.clone();
    let parent = Component::new("Parent", move |ctx: &RenderCtx| {
        let value = ctx.state("value").unwrap_or(PropValue::Int(3));
        ctx.render_child(
            &control_for_parent,
            Props::new().with_value("value", value),
        );
    });

    let handle = mount(&parent, Props::new());
    assert_eq!(sink.len(), 1);

    // A new render with the handler still missing warns again
    set_state(handle.index(), "value", 4);
    assert_eq!(sink.len(), 2);
    assert_eq!(*log.borrow(), ints(&[3, 4]));

    reset_warning_sink();
}

#[test]
fn default_sink_logs_without_panicking() {
    reset_engine();
    reset_warning_sink();
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let log: RenderLog = Rc::new(RefCell::new(Vec::new()));
    let control = wrap(&observed_base(log), &[("value", "onChange")], None).unwrap();
    let _handle = mount(&control, Props::new().with_value("value", 3));
}

#[test]
fn unmount_tears_down_wrapper_and_control() {
    reset_engine();

    let log: RenderLog = Rc::new(RefCell::new(Vec::new()));
    let control = wrap(&observed_base(log), &[("value", "onChange")], None).unwrap();

    let handle = mount(&control, Props::new().with_value("defaultValue", 5));
    assert_eq!(mounted_count(), 2);

    handle.unmount();
    assert_eq!(mounted_count(), 0);
}
