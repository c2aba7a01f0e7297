use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tempfile::tempdir;

use crate::carousel::CarouselConfig;
use crate::content::Deck;
use crate::ui::CARD_PITCH;

use super::event_loop::ResizeDebouncer;
use super::{App, Message, Model, ToastLevel, update};

fn config(transition_ms: u64) -> CarouselConfig {
    CarouselConfig {
        item_width: CARD_PITCH,
        transition: Duration::from_millis(transition_ms),
        ..CarouselConfig::default()
    }
}

fn create_test_model() -> Model {
    Model::new(Deck::builtin(), config(400), (100, 24)).unwrap()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn mouse(kind: MouseEventKind) -> MouseEvent {
    MouseEvent {
        kind,
        column: 10,
        row: 10,
        modifiers: KeyModifiers::NONE,
    }
}

fn title(model: &Model) -> &str {
    &model.carousel.current().title
}

#[test]
fn test_new_model_shows_first_feature_and_first_section_open() {
    let model = create_test_model();
    assert_eq!(title(&model), "Unified Architecture");
    assert_eq!(model.expanded, vec![true, false, false]);
    assert!(model.viewport.total_rows() > model.viewport.height() as usize);
}

#[test]
fn test_empty_deck_is_rejected() {
    let mut deck = Deck::builtin();
    deck.features.clear();
    assert!(Model::new(deck, config(400), (80, 24)).is_err());
}

#[test]
fn test_next_completes_after_tick() {
    let model = update(create_test_model(), Message::Tick(1_000));
    let model = update(model, Message::CarouselNext);
    assert!(model.carousel.is_locked());
    assert_eq!(title(&model), "Unified Architecture");

    let model = update(model, Message::Tick(1_200));
    assert!(model.carousel.is_locked(), "halfway through the slide");

    let model = update(model, Message::Tick(1_400));
    assert!(!model.carousel.is_locked());
    assert_eq!(title(&model), "Interleaved Training");
}

#[test]
fn test_requests_during_slide_are_dropped() {
    let model = update(create_test_model(), Message::CarouselNext);
    let model = update(model, Message::CarouselNext);
    let model = update(model, Message::CarouselPrev);
    let model = update(model, Message::CarouselJump(4));
    let model = update(model, Message::Tick(400));
    assert_eq!(title(&model), "Interleaved Training");
}

#[test]
fn test_previous_wraps_to_last_feature() {
    let model = update(create_test_model(), Message::CarouselPrev);
    let model = update(model, Message::Tick(400));
    assert_eq!(title(&model), "Practical Reproducibility");
}

#[test]
fn test_zero_transition_moves_immediately() {
    let model = Model::new(Deck::builtin(), config(0), (100, 24)).unwrap();
    let model = update(model, Message::CarouselNext);
    assert!(!model.carousel.is_locked());
    let model = update(model, Message::CarouselNext);
    assert_eq!(title(&model), "Hybrid Action Decoding");
}

#[test]
fn test_jump_selects_feature() {
    let model = update(create_test_model(), Message::CarouselJump(3));
    let model = update(model, Message::Tick(400));
    assert_eq!(model.carousel.position(), 3);
    assert_eq!(title(&model), "16-Step Action Chunks");
}

#[test]
fn test_scroll_messages_move_viewport() {
    let model = update(create_test_model(), Message::ScrollDown(5));
    assert_eq!(model.viewport.offset(), 5);
    let model = update(model, Message::ScrollUp(2));
    assert_eq!(model.viewport.offset(), 3);
    let model = update(model, Message::GoToBottom);
    assert!(!model.viewport.can_scroll_down());
    let model = update(model, Message::GoToTop);
    assert_eq!(model.viewport.offset(), 0);
}

#[test]
fn test_section_focus_cycles_and_reveals() {
    let model = update(create_test_model(), Message::FocusNextSection);
    assert_eq!(model.focused_section, Some(0));
    let row = model.section_row(0).unwrap();
    assert!(model.viewport.visible_range().contains(&row));

    let model = update(model, Message::FocusPrevSection);
    assert_eq!(model.focused_section, Some(2));
    let model = update(model, Message::FocusNextSection);
    assert_eq!(model.focused_section, Some(0));
}

#[test]
fn test_toggle_section_changes_layout() {
    let model = update(create_test_model(), Message::FocusNextSection);
    let before = model.viewport.total_rows();
    let model = update(model, Message::ToggleSection);
    assert!(!model.expanded[0]);
    assert!(model.viewport.total_rows() < before);

    let model = update(model, Message::FocusNextSection);
    let model = update(model, Message::ToggleSection);
    assert!(model.expanded[1]);
}

#[test]
fn test_toggle_section_without_focus_is_noop() {
    let model = update(create_test_model(), Message::ToggleSection);
    assert_eq!(model.expanded, vec![true, false, false]);
}

#[test]
fn test_help_toggles() {
    let model = update(create_test_model(), Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_resize_updates_viewport() {
    let model = update(create_test_model(), Message::Resize(60, 30));
    assert_eq!(model.viewport.width(), 60);
    assert_eq!(model.viewport.height(), 29);
}

#[test]
fn test_toast_expires_on_tick() {
    let mut model = create_test_model();
    model.show_toast(ToastLevel::Info, "hello");
    let model = update(model, Message::Tick(1_000));
    assert_eq!(model.active_toast(), Some(("hello", ToastLevel::Info)));
    let model = update(model, Message::Tick(4_000));
    assert!(model.active_toast().is_none());
}

#[test]
fn test_quit_sets_flag() {
    let model = update(create_test_model(), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_key_mapping() {
    let model = create_test_model();
    assert_eq!(
        App::handle_key(key(KeyCode::Char('l')), &model),
        Some(Message::CarouselNext)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Left), &model),
        Some(Message::CarouselPrev)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('3')), &model),
        Some(Message::CarouselJump(2))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('j')), &model),
        Some(Message::ScrollDown(1))
    );
    assert_eq!(App::handle_key(key(KeyCode::Char('k')), &model), None);
    assert_eq!(
        App::handle_key(key(KeyCode::Tab), &model),
        Some(Message::FocusNextSection)
    );
    assert_eq!(App::handle_key(key(KeyCode::Char('q')), &model), Some(Message::Quit));

    let ctrl_c = KeyEvent {
        modifiers: KeyModifiers::CONTROL,
        ..key(KeyCode::Char('c'))
    };
    assert_eq!(App::handle_key(ctrl_c, &model), Some(Message::Quit));
}

#[test]
fn test_any_key_closes_help() {
    let model = update(create_test_model(), Message::ToggleHelp);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('l')), &model),
        Some(Message::HideHelp)
    );
}

#[test]
fn test_mouse_wheel_scrolls_page_and_strip() {
    let model = create_test_model();
    assert_eq!(
        App::handle_mouse(mouse(MouseEventKind::ScrollDown), &model),
        Some(Message::ScrollDown(3))
    );
    assert_eq!(App::handle_mouse(mouse(MouseEventKind::ScrollUp), &model), None);
    assert_eq!(
        App::handle_mouse(mouse(MouseEventKind::ScrollRight), &model),
        Some(Message::CarouselNext)
    );
}

#[test]
fn test_resize_events_are_debounced() {
    let model = create_test_model();
    let mut debouncer = ResizeDebouncer::new(100);
    let msg = App::handle_event(&Event::Resize(90, 30), &model, 0, &mut debouncer);
    assert!(msg.is_none());
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.take_ready(50), None);
    assert_eq!(debouncer.take_ready(100), Some((90, 30)));
    assert!(!debouncer.is_pending());
}

#[test]
fn test_key_release_is_ignored() {
    let model = create_test_model();
    let mut debouncer = ResizeDebouncer::new(100);
    let release = KeyEvent {
        kind: KeyEventKind::Release,
        ..key(KeyCode::Char('l'))
    };
    assert!(App::handle_event(&Event::Key(release), &model, 0, &mut debouncer).is_none());
}

#[test]
fn test_force_reload_reads_deck_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deck.json");
    let mut deck = Deck::builtin();
    std::fs::write(&path, serde_json::to_string(&deck).unwrap()).unwrap();

    let model = Model::new(deck.clone(), config(400), (100, 24))
        .unwrap()
        .with_deck_path(Some(path.clone()));
    let model = update(model, Message::CarouselNext);

    deck.hero.title = "Edited".to_string();
    deck.features.truncate(2);
    std::fs::write(&path, serde_json::to_string(&deck).unwrap()).unwrap();

    let mut model = update(model, Message::ForceReload);
    let mut watcher = None;
    App::handle_message_side_effects(&mut model, &mut watcher, &Message::ForceReload);
    assert_eq!(model.deck.hero.title, "Edited");
    assert_eq!(model.carousel.len(), 2);
    assert!(!model.carousel.is_locked(), "reload starts a fresh carousel");
    assert_eq!(model.active_toast(), Some(("Reloaded", ToastLevel::Info)));
}

#[test]
fn test_failed_reload_keeps_deck_and_reports() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deck.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut model = create_test_model().with_deck_path(Some(path));
    let mut watcher = None;
    App::handle_message_side_effects(&mut model, &mut watcher, &Message::FileChanged);
    assert_eq!(model.deck.hero.title, Deck::builtin().hero.title);
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Error);
    assert!(message.starts_with("Reload failed"));
}

#[test]
fn test_watch_on_builtin_deck_is_refused() {
    let mut model = update(create_test_model(), Message::ToggleWatch);
    let mut watcher = None;
    App::handle_message_side_effects(&mut model, &mut watcher, &Message::ToggleWatch);
    assert!(!model.watch_enabled);
    assert!(watcher.is_none());
    assert_eq!(model.active_toast().map(|(_, level)| level), Some(ToastLevel::Warning));
}

#[test]
fn test_render_full_frame() {
    let model = create_test_model();
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    terminal.draw(|frame| crate::ui::render(&model, frame)).unwrap();
    let content: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(content.contains("SOTA Model Selection"));
    assert!(content.contains("‹1/6›"));
}

#[test]
fn test_slide_requested_after_idle_wait_starts_at_request_time() {
    let model = update(create_test_model(), Message::Tick(1_000));
    let resting = model.carousel.offset();

    let mut watcher = None;
    let model = App::dispatch(model, Message::CarouselNext, 1_240, &mut watcher);
    assert_eq!(model.now_ms, 1_240);
    assert!(model.carousel.is_locked());
    assert_eq!(model.carousel.render_offset(1_240), resting);

    let model = update(model, Message::Tick(1_639));
    assert!(model.carousel.is_locked(), "full duration from the request");
    let model = update(model, Message::Tick(1_640));
    assert!(!model.carousel.is_locked());
    assert_eq!(model.carousel.offset(), resting + CARD_PITCH);
}

#[test]
fn test_dispatch_runs_side_effects() {
    let mut watcher = None;
    let model = App::dispatch(create_test_model(), Message::ToggleWatch, 50, &mut watcher);
    assert!(!model.watch_enabled);
    assert_eq!(
        model.active_toast().map(|(_, level)| level),
        Some(ToastLevel::Warning)
    );
}
