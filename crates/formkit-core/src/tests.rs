#[cfg(test)]
mod tests {
    use crate::animation::*;
    use crate::effects::*;
    use crate::locals::*;
    use crate::runtime::*;
    use crate::scope::*;
    use crate::signal::*;
    use crate::{Color, Length, Rect, StyleError, Transform, Vec2};
    use crate::{Column, Modifier, Text, TextStyle, ViewExt};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        let id = sig.subscribe(move |v| seen_clone.borrow_mut().push(*v));

        sig.set(42);
        assert!(sig.unsubscribe(id));
        assert!(!sig.unsubscribe(id));
        sig.set(7);
        assert_eq!(*seen.borrow(), vec![42]);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_signal_listener_can_read_signal() {
        let sig = signal(String::from("a"));
        let observed = Rc::new(RefCell::new(String::new()));
        {
            let sig2 = sig.clone();
            let observed = observed.clone();
            sig.subscribe(move |_| *observed.borrow_mut() = sig2.get());
        }
        sig.set("b".into());
        assert_eq!(*observed.borrow(), "b");
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(Cell::new(false));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || cleaned_up_clone.set(true));

        assert!(!cleaned_up.get());
        scope.dispose();
        assert!(cleaned_up.get());
    }

    #[test]
    fn test_scope_children_dispose_first() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let parent = Scope::new();
        let child = parent.child();
        {
            let order = order.clone();
            parent.add_disposer(move || order.borrow_mut().push("parent"));
        }
        {
            let order = order.clone();
            child.add_disposer(move || order.borrow_mut().push("child"));
        }
        parent.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn test_effect_registers_in_current_scope() {
        let ran = Rc::new(Cell::new(0));
        let scope = Scope::new();
        let d = scope.run(|| {
            let ran = ran.clone();
            effect(move || on_unmount(move || ran.set(ran.get() + 1)))
        });
        assert_eq!(scope.pending_disposers(), 1);
        scope.dispose();
        d.run();
        assert_eq!(ran.get(), 1);
        assert!(d.is_disposed());
    }

    #[test]
    fn test_provide_is_scoped_and_shadowed() {
        assert_eq!(local::<u32>(), None);
        provide(1u32, || {
            assert_eq!(local::<u32>(), Some(1));
            provide(2u32, || assert_eq!(local::<u32>(), Some(2)));
            assert_eq!(local::<u32>(), Some(1));
        });
        assert_eq!(local::<u32>(), None);
    }

    #[test]
    fn test_theme_local() {
        let t = Theme {
            error: Color::from_hex("#FF0000"),
            ..Theme::default()
        };
        with_theme(t.clone(), || assert_eq!(theme(), t));
        assert_eq!(theme(), Theme::default());
    }

    #[test]
    fn test_theme_from_json_uses_defaults_for_missing_fields() {
        let t: Theme = serde_json::from_str(r##"{"highlight":"#112233"}"##).unwrap();
        assert_eq!(t.highlight, Color(0x11, 0x22, 0x33, 255));
        assert_eq!(t.subtle, Theme::default().subtle);
        let back = serde_json::to_value(&t).unwrap();
        assert_eq!(back["highlight"], "#112233");
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));

        assert_eq!(Color::from_hex("nope"), Color::BLACK);
        assert_eq!(
            "#12".parse::<Color>(),
            Err(StyleError::InvalidHex("#12".into()))
        );
        assert_eq!(Color(1, 2, 3, 255).to_string(), "#010203");
    }

    #[test]
    fn test_length_parse() {
        assert_eq!("100%".parse::<Length>(), Ok(Length::Percent(100.0)));
        assert_eq!("0.3em".parse::<Length>(), Ok(Length::Em(0.3)));
        assert_eq!("12px".parse::<Length>(), Ok(Length::Px(12.0)));
        assert_eq!("12".parse::<Length>(), Ok(Length::Px(12.0)));
        assert!("wide".parse::<Length>().is_err());
        assert_eq!(Length::Em(1.5).to_px(16.0, 0.0), 24.0);
        assert_eq!(Length::Percent(10.0).to_px(16.0, 300.0), 30.0);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
    }

    #[test]
    fn test_transform_scales_around_center() {
        let r = Transform::scale(0.5).apply_to_rect(Rect {
            x: 0.0,
            y: 0.0,
            w: 100.0,
            h: 40.0,
        });
        assert_eq!(
            r,
            Rect {
                x: 25.0,
                y: 10.0,
                w: 50.0,
                h: 20.0
            }
        );
    }

    #[test]
    fn test_spring_without_target_is_static() {
        let mut a = AnimationController::new(3.0f32, SpringSpec::default());
        assert!(!a.tick(Duration::from_millis(100)));
        assert_eq!(*a.get(), 3.0);
        assert!(!a.is_animating());
    }

    #[test]
    fn test_spring_converges_without_overshoot() {
        let mut a = AnimationController::new(1.0f32, SpringSpec::default());
        a.set_target(0.9);
        let mut prev = *a.get();
        let mut frames = 0;
        while a.tick(Duration::from_millis(16)) {
            let v = *a.get();
            assert!(v <= prev + 1e-6, "moved away from target: {prev} -> {v}");
            assert!(v >= 0.9 - 1e-4, "overshot target: {v}");
            prev = v;
            frames += 1;
            assert!(frames < 600, "spring never settled");
        }
        assert_eq!(*a.get(), 0.9);
        assert!(a.velocity().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_spring_retarget_preempts_previous_target() {
        let mut a = AnimationController::new(0.0f32, SpringSpec::default());
        a.set_target(10.0);
        a.tick(Duration::from_millis(50));
        let mid = *a.get();
        assert!(mid > 0.0 && mid < 10.0);

        a.set_target(-5.0);
        assert_eq!(*a.target(), -5.0);
        // velocity carries over: no jump at the instant of retargeting
        assert_eq!(*a.get(), mid);
        for _ in 0..300 {
            a.tick(Duration::from_millis(16));
        }
        assert_eq!(*a.get(), -5.0);
    }

    #[test]
    fn test_spring_drives_colors() {
        let mut a = AnimationController::new(Color::WHITE, SpringSpec::default());
        a.set_target(Color::BLACK);
        a.tick(Duration::from_millis(60));
        let c = *a.get();
        assert!(c.0 < 255 && c.0 > 0);
        assert_eq!(c.3, 255);
        while a.tick(Duration::from_millis(16)) {}
        assert_eq!(*a.get(), Color::BLACK);
    }

    #[test]
    fn test_spring_settles_between_theme_colors() {
        let theme = Theme::default();
        let mut a = AnimationController::new(theme.subtle, SpringSpec::default());
        a.set_target(theme.highlight);
        let mut frames = 0;
        while a.tick(Duration::from_millis(16)) {
            frames += 1;
            assert!(frames < 600, "color spring never settled");
        }
        assert_eq!(*a.get(), theme.highlight);
        assert!(!a.is_animating());

        a.set_target(theme.error);
        for _ in 0..600 {
            if !a.tick(Duration::from_millis(16)) {
                break;
            }
        }
        assert_eq!(*a.get(), theme.error);
        assert!(!a.is_animating());
    }

    #[test]
    fn test_long_stall_advances_one_frame_cap() {
        let mut stalled = AnimationController::new(0.0f32, SpringSpec::default());
        let mut capped = AnimationController::new(0.0f32, SpringSpec::default());
        stalled.set_target(10.0);
        capped.set_target(10.0);

        assert!(stalled.tick(Duration::from_secs(3600)));
        capped.tick(MAX_FRAME);
        assert_eq!(*stalled.get(), *capped.get());
        assert!(*stalled.get() < 10.0);
    }

    #[test]
    fn test_critically_damped_ratio() {
        let spec = SpringSpec::critically_damped(200.0);
        assert!((spec.damping_ratio() - 1.0).abs() < 1e-5);
        assert!((SpringSpec::default().damping_ratio() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_animated_value_follows_clock() {
        let clock = TestClock::install();

        let mut a = AnimatedValue::new(0.0f32, SpringSpec::default());
        a.set_target(10.0);
        assert!(a.update());
        assert_eq!(*a.get(), 0.0);

        clock.advance(Duration::from_millis(100));
        assert!(a.update());
        let v = *a.get();
        assert!(v > 0.0 && v < 10.0);

        let mut frames = 0;
        loop {
            clock.advance(Duration::from_millis(16));
            if !a.update() {
                break;
            }
            frames += 1;
            assert!(frames < 600, "value never settled");
        }
        assert_eq!(*a.get(), 10.0);
        reset_clock();
    }

    #[test]
    fn test_now_falls_back_to_system_clock() {
        reset_clock();
        let before = SystemClock.now();
        assert!(now() >= before);

        let clock = TestClock::install();
        let pinned = now();
        clock.advance(Duration::from_millis(5));
        assert_eq!(now(), pinned + Duration::from_millis(5));
        reset_clock();
    }

    #[test]
    fn test_scheduler_measures_dt_and_stamps_ids() {
        let clock = TestClock::install();
        let mut sched = Scheduler::new();

        let first = sched.frame(|dt| {
            assert_eq!(dt, Duration::ZERO);
            (
                Column(Modifier::new()).child((
                    Text("a", TextStyle::default()),
                    Text("b", TextStyle::default()),
                )),
                false,
            )
        });
        assert_eq!(first.number, 1);
        let ids: Vec<_> = first.view.walk().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(first.view.text_content(), "ab");

        clock.advance(Duration::from_millis(16));
        let second = sched.frame(|dt| (Text(format!("{dt:?}"), TextStyle::default()), true));
        assert_eq!(second.dt, Duration::from_millis(16));
        assert!(second.animating);
        reset_clock();
    }

    #[test]
    fn test_scheduler_unmount_disposes_root_scope() {
        let torn_down = Rc::new(Cell::new(false));
        let sched = Scheduler::new();
        sched.mount(|| {
            let torn_down = torn_down.clone();
            scoped_effect(move || Box::new(move || torn_down.set(true)));
        });
        sched.unmount();
        assert!(torn_down.get());
    }
}
