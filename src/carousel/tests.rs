use super::*;

fn abc() -> Carousel<&'static str> {
    Carousel::new(vec!["A", "B", "C"], CarouselConfig::default()).unwrap()
}

/// Advance and wait for the completion, like a user who lets each move land.
fn step<T>(carousel: &mut Carousel<T>, direction: Direction) -> Completion {
    assert_eq!(carousel.advance(direction, 0), AdvanceOutcome::Started);
    carousel.poll(u64::MAX).expect("transition should complete")
}

#[test]
fn test_new_starts_at_middle_repetition() {
    let carousel = abc();
    assert_eq!(carousel.middle_start_index(), 150);
    assert_eq!(carousel.offset(), 150 * DEFAULT_ITEM_WIDTH);
    assert_eq!(carousel.position(), 0);
    assert_eq!(carousel.current(), &"A");
    assert_eq!(carousel.phase(), Phase::Idle);
    assert_eq!(carousel.sequence().len(), 300);
    assert_eq!(carousel.len(), 3);
    assert!(!carousel.is_empty());
}

#[test]
fn test_new_rejects_empty_items() {
    let result = Carousel::<&str>::new(Vec::new(), CarouselConfig::default());
    assert_eq!(result.unwrap_err(), CarouselError::Empty);
}

#[test]
fn test_new_rejects_zero_item_width() {
    let config = CarouselConfig {
        item_width: 0,
        ..CarouselConfig::default()
    };
    assert!(matches!(
        Carousel::new(vec![1], config),
        Err(CarouselError::InvalidConfig(_))
    ));
}

#[test]
fn test_new_rejects_band_wider_than_sequence() {
    let config = CarouselConfig {
        repeat_factor: 20,
        tolerance: 10,
        ..CarouselConfig::default()
    };
    assert!(matches!(
        Carousel::new(vec![1, 2], config),
        Err(CarouselError::InvalidConfig(_))
    ));
}

#[test]
fn test_new_rejects_strip_wider_than_u64() {
    let config = CarouselConfig {
        item_width: u64::MAX / 100,
        ..CarouselConfig::default()
    };
    assert!(config.validate().is_ok(), "one item still fits");
    assert!(matches!(
        Carousel::new(vec![1, 2, 3], config),
        Err(CarouselError::InvalidConfig(_))
    ));
}

#[test]
fn test_validate_rejects_huge_repeat_factor() {
    let config = CarouselConfig {
        repeat_factor: usize::MAX,
        ..CarouselConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(CarouselError::InvalidConfig(_))
    ));
}

#[test]
fn test_new_rejects_too_many_slots() {
    let config = CarouselConfig {
        repeat_factor: MAX_REPEAT_FACTOR,
        ..CarouselConfig::default()
    };
    config.validate().unwrap();
    let items = vec![0_u8; MAX_SLOTS / MAX_REPEAT_FACTOR + 1];
    assert!(matches!(
        Carousel::new(items, config),
        Err(CarouselError::InvalidConfig(_))
    ));
}

#[test]
fn test_wide_items_near_the_limit_stay_in_band() {
    let config = CarouselConfig {
        item_width: u64::MAX / 400,
        repeat_factor: 100,
        tolerance: 10,
        transition: Duration::ZERO,
    };
    let mut carousel = Carousel::new(vec!["A", "B", "C"], config).unwrap();
    for _ in 0..40 {
        carousel.advance(Direction::Next, 0);
        carousel.poll(0);
    }
    assert!(carousel.safety_band().contains(&carousel.offset()));
}

#[test]
fn test_next_three_times_wraps_to_first_item() {
    let mut carousel = abc();
    step(&mut carousel, Direction::Next);
    assert_eq!(carousel.current(), &"B");
    step(&mut carousel, Direction::Next);
    assert_eq!(carousel.current(), &"C");
    step(&mut carousel, Direction::Next);
    assert_eq!(carousel.position(), 0);
    assert_eq!(carousel.current(), &"A");
}

#[test]
fn test_previous_from_start_shows_last_item() {
    let mut carousel = abc();
    step(&mut carousel, Direction::Previous);
    assert_eq!(carousel.current(), &"C");
}

#[test]
fn test_advance_while_locked_is_dropped() {
    let mut carousel = abc();
    let start = carousel.offset();
    assert_eq!(carousel.advance(Direction::Next, 0), AdvanceOutcome::Started);
    assert!(carousel.is_locked());

    assert_eq!(carousel.advance(Direction::Next, 100), AdvanceOutcome::Ignored);
    assert_eq!(carousel.advance(Direction::Previous, 200), AdvanceOutcome::Ignored);
    assert_eq!(carousel.offset(), start, "offset moves only on completion");
    assert_eq!(carousel.pending_offset(), Some(start + DEFAULT_ITEM_WIDTH));

    carousel.poll(400).unwrap();
    assert_eq!(carousel.offset(), start + DEFAULT_ITEM_WIDTH);
    assert!(carousel.poll(10_000).is_none(), "dropped requests were not queued");
    assert_eq!(carousel.phase(), Phase::Idle);
}

#[test]
fn test_poll_before_duration_keeps_transition_running() {
    let mut carousel = abc();
    carousel.advance(Direction::Next, 1_000);
    assert!(carousel.poll(1_399).is_none());
    assert!(carousel.is_locked());
    let done = carousel.poll(1_400).unwrap();
    assert!(!done.rebased);
    assert!(!carousel.is_locked());
}

#[test]
fn test_completion_fires_once() {
    let mut carousel = abc();
    carousel.advance(Direction::Next, 0);
    assert!(carousel.poll(500).is_some());
    assert!(carousel.poll(600).is_none());
    assert!(carousel.finish().is_none());
}

#[test]
fn test_zero_duration_completes_on_next_poll() {
    let config = CarouselConfig {
        transition: Duration::ZERO,
        ..CarouselConfig::default()
    };
    let mut carousel = Carousel::new(vec!['x', 'y'], config).unwrap();
    carousel.advance(Direction::Next, 50);
    assert_eq!(carousel.render_offset(50), carousel.pending_offset().unwrap());
    assert!(carousel.poll(50).is_some());
    assert_eq!(carousel.current(), &'y');
}

#[test]
fn test_render_offset_eases_between_endpoints() {
    let mut carousel = abc();
    let start = carousel.offset();
    carousel.advance(Direction::Next, 0);
    assert_eq!(carousel.render_offset(0), start);
    assert_eq!(carousel.render_offset(200), start + DEFAULT_ITEM_WIDTH / 2);
    assert_eq!(carousel.render_offset(400), start + DEFAULT_ITEM_WIDTH);

    let quarter = carousel.render_offset(100);
    assert!(quarter > start && quarter < start + DEFAULT_ITEM_WIDTH / 2);
}

#[test]
fn test_render_offset_moves_backwards_for_previous() {
    let mut carousel = abc();
    let start = carousel.offset();
    carousel.advance(Direction::Previous, 0);
    let mid = carousel.render_offset(200);
    assert_eq!(mid, start - DEFAULT_ITEM_WIDTH / 2);
}

#[test]
fn test_rebase_is_noop_inside_band() {
    let mut carousel = abc();
    assert!(!carousel.rebase());
    assert!(!carousel.rebase());
    assert_eq!(carousel.offset(), 150 * DEFAULT_ITEM_WIDTH);
    assert_eq!(carousel.rebase_count(), 0);
}

#[test]
fn test_band_edge_after_k_times_n_previous_steps() {
    let mut carousel = abc();
    let steps = DEFAULT_TOLERANCE * 3;

    for _ in 0..steps - 1 {
        assert!(!step(&mut carousel, Direction::Previous).rebased);
    }
    assert_eq!(carousel.rebase_count(), 0);

    // Exactly on the lower edge is still inside the band.
    assert!(!step(&mut carousel, Direction::Previous).rebased);
    assert_eq!(carousel.offset(), *carousel.safety_band().start());

    let done = step(&mut carousel, Direction::Previous);
    assert!(done.rebased);
    assert_eq!(carousel.rebase_count(), 1);
    assert!(carousel.safety_band().contains(&carousel.offset()));
    assert_eq!(carousel.current(), &"C");
}

#[test]
fn test_forward_drift_rebases_once_past_upper_edge() {
    let mut carousel = abc();
    let steps = DEFAULT_TOLERANCE * 3;
    for _ in 0..steps {
        step(&mut carousel, Direction::Next);
    }
    assert_eq!(carousel.rebase_count(), 0);
    assert_eq!(carousel.offset(), *carousel.safety_band().end());

    assert!(step(&mut carousel, Direction::Next).rebased);
    assert_eq!(
        carousel.offset(),
        (carousel.middle_start_index() as u64 + 1) * DEFAULT_ITEM_WIDTH
    );
    assert_eq!(carousel.current(), &"B");
}

#[test]
fn test_rebase_preserves_visible_item() {
    let mut carousel = abc();
    for _ in 0..=DEFAULT_TOLERANCE * 3 {
        step(&mut carousel, Direction::Next);
    }
    let visible = *carousel.current();
    assert!(!carousel.rebase(), "second rebase must be a no-op");
    assert_eq!(*carousel.current(), visible);
}

#[test]
fn test_jump_to_targets_same_repetition() {
    let mut carousel = abc();
    step(&mut carousel, Direction::Next);
    let base = carousel.current_slot() - carousel.position();

    assert_eq!(carousel.jump_to(2, 0), AdvanceOutcome::Started);
    assert_eq!(
        carousel.pending_offset(),
        Some((base as u64 + 2) * DEFAULT_ITEM_WIDTH)
    );
    carousel.finish();
    assert_eq!(carousel.current(), &"C");
}

#[test]
fn test_jump_to_ignores_current_and_out_of_range() {
    let mut carousel = abc();
    assert_eq!(carousel.jump_to(0, 0), AdvanceOutcome::Ignored);
    assert_eq!(carousel.jump_to(3, 0), AdvanceOutcome::Ignored);
    assert!(!carousel.is_locked());
}

#[test]
fn test_jump_to_respects_lock() {
    let mut carousel = abc();
    carousel.advance(Direction::Next, 0);
    assert_eq!(carousel.jump_to(2, 10), AdvanceOutcome::Ignored);
}

#[test]
fn test_visible_slots_cover_viewport() {
    let config = CarouselConfig {
        item_width: 30,
        ..CarouselConfig::default()
    };
    let carousel = Carousel::new(vec!["A", "B", "C"], config).unwrap();
    let views = carousel.visible_slots(100, 0);
    let xs: Vec<_> = views.iter().map(|v| v.x).collect();
    assert_eq!(xs, vec![0, 30, 60, 90]);
    let names: Vec<_> = views.iter().map(|v| *v.item).collect();
    assert_eq!(names, vec!["A", "B", "C", "A"]);
    assert_eq!(views[0].slot, carousel.middle_start_index());
}

#[test]
fn test_visible_slots_shift_mid_transition() {
    let config = CarouselConfig {
        item_width: 30,
        ..CarouselConfig::default()
    };
    let mut carousel = Carousel::new(vec!["A", "B", "C"], config).unwrap();
    carousel.advance(Direction::Next, 0);
    let views = carousel.visible_slots(60, 200);
    assert_eq!(views[0].x, -15);
    assert_eq!(*views[0].item, "A");
    assert_eq!(views.len(), 3);
}

#[test]
fn test_single_item_carousel_always_shows_it() {
    let mut carousel = Carousel::new(vec!["only"], CarouselConfig::default()).unwrap();
    for _ in 0..50 {
        step(&mut carousel, Direction::Next);
        assert_eq!(carousel.current(), &"only");
    }
    assert!(carousel.safety_band().contains(&carousel.offset()));
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn visible_item_tracks_net_steps(
            len in 1..9usize,
            moves in prop::collection::vec(any::<bool>(), 0..400),
        ) {
            let items: Vec<usize> = (0..len).collect();
            let mut carousel = Carousel::new(items, CarouselConfig::default()).unwrap();
            let mut net: i64 = 0;
            for forward in moves {
                let direction = if forward { Direction::Next } else { Direction::Previous };
                step(&mut carousel, direction);
                net += if forward { 1 } else { -1 };
                let expected = usize::try_from(net.rem_euclid(len as i64)).unwrap();
                prop_assert_eq!(*carousel.current(), expected);
            }
        }

        #[test]
        fn resting_offset_stays_in_band(
            len in 1..7usize,
            tolerance in 1..5usize,
            moves in prop::collection::vec(any::<bool>(), 0..300),
        ) {
            let config = CarouselConfig {
                repeat_factor: 20,
                tolerance,
                ..CarouselConfig::default()
            };
            let mut carousel = Carousel::new(vec![(); len], config).unwrap();
            for forward in moves {
                let direction = if forward { Direction::Next } else { Direction::Previous };
                step(&mut carousel, direction);
                prop_assert!(carousel.safety_band().contains(&carousel.offset()));
                prop_assert!(carousel.current_slot() < carousel.sequence().len());
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(4))]

        #[test]
        fn ten_thousand_random_moves_never_drift(
            moves in prop::collection::vec(any::<bool>(), 10_000),
        ) {
            let mut carousel = abc();
            for forward in moves {
                let direction = if forward { Direction::Next } else { Direction::Previous };
                step(&mut carousel, direction);
                prop_assert!(carousel.safety_band().contains(&carousel.offset()));
            }
        }
    }
}
