use std::sync::{LazyLock, Mutex, MutexGuard};

use crate::icon::toggle_icon_name;
use crate::theme::ColorScheme;

use super::field_state::{FieldState, FieldStateInput};
use super::{control, editor_state, field_state};

static STATE_TEST_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

struct StateTestGuard {
    _lock: MutexGuard<'static, ()>,
}

fn guard() -> StateTestGuard {
    let lock = match STATE_TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    control::clear_all();
    StateTestGuard { _lock: lock }
}

impl Drop for StateTestGuard {
    fn drop(&mut self) {
        control::clear_all();
    }
}

fn resolve(id: &str, value: &str, focus_signal: Option<bool>) -> FieldState {
    FieldState::resolve(FieldStateInput {
        id,
        value,
        focus_signal,
    })
}

#[test]
fn mounts_focused_iff_initial_value_is_non_empty() {
    let _guard = guard();

    assert!(!resolve("field-empty", "", None).focused);
    assert!(resolve("field-prefilled", "hello", None).focused);
}

#[test]
fn blur_with_non_empty_value_is_an_idempotent_no_op() {
    let _guard = guard();

    let before = resolve("field-keep", "abc", None);
    assert!(before.focused);

    assert!(!field_state::on_blur_event("field-keep", "abc"));
    let after = resolve("field-keep", "abc", None);
    assert!(after.focused);
    assert_eq!(after.motion_epoch, before.motion_epoch);
}

#[test]
fn blur_with_empty_value_transitions_exactly_once_per_event() {
    let _guard = guard();

    field_state::on_focus_event("field-drop");
    let focused = resolve("field-drop", "", None);
    assert!(focused.focused);

    assert!(field_state::on_blur_event("field-drop", ""));
    let blurred = resolve("field-drop", "", None);
    assert!(!blurred.focused);
    assert_eq!(blurred.motion_epoch, focused.motion_epoch + 1);
}

#[test]
fn first_signal_observation_records_a_baseline_without_applying() {
    let _guard = guard();

    // A prefilled field stays floated even when the signal starts false.
    assert!(resolve("field-baseline", "abc", Some(false)).focused);
    // Re-rendering with the unchanged signal stays a no-op.
    assert!(resolve("field-baseline", "abc", Some(false)).focused);
}

#[test]
fn signal_change_overrides_internal_state_regardless_of_content() {
    let _guard = guard();

    let mounted = resolve("field-signal", "", Some(false));
    assert!(!mounted.focused);

    let raised = resolve("field-signal", "", Some(true));
    assert!(raised.focused);
    assert_eq!(raised.motion_epoch, mounted.motion_epoch + 1);

    // Internal blur rules would keep the label up for a non-empty value;
    // the signal still forces it down.
    let forced_down = resolve("field-signal", "abc", Some(false));
    assert!(!forced_down.focused);
}

#[test]
fn unchanged_signal_leaves_internal_events_standing() {
    let _guard = guard();

    resolve("field-race", "", Some(false));
    field_state::on_focus_event("field-race");
    // Re-rendering with the same signal value is not a change; the
    // internally raised focus stands.
    assert!(resolve("field-race", "", Some(false)).focused);

    // Walking the signal through an actual change forces the state over.
    assert!(resolve("field-race", "", Some(true)).focused);
    assert!(!resolve("field-race", "", Some(false)).focused);
}

#[test]
fn toggling_visibility_twice_returns_to_hidden() {
    let _guard = guard();

    let initial = resolve("field-secure", "", None);
    assert!(initial.secure_hidden);

    assert!(!field_state::toggle_visibility("field-secure"));
    assert!(field_state::toggle_visibility("field-secure"));
    assert!(resolve("field-secure", "", None).secure_hidden);
}

#[test]
fn focus_transitions_never_touch_the_secure_text_state() {
    let _guard = guard();

    field_state::toggle_visibility("field-mixed");
    field_state::on_focus_event("field-mixed");
    field_state::on_blur_event("field-mixed", "");
    assert!(!resolve("field-mixed", "", None).secure_hidden);
}

#[test]
fn password_field_walks_the_mount_focus_blur_scenario() {
    let _guard = guard();

    // Mount empty, password mode, light scheme.
    let mounted = resolve("field-password", "", None);
    assert!(!mounted.focused);
    assert!(mounted.secure_hidden);
    assert_eq!(
        toggle_icon_name(ColorScheme::Light, mounted.secure_hidden),
        "make-visible-white"
    );

    field_state::on_focus_event("field-password");
    assert!(resolve("field-password", "", None).focused);

    field_state::on_blur_event("field-password", "");
    assert!(!resolve("field-password", "", None).focused);
}

#[test]
fn prefilled_field_keeps_its_label_floated_through_blur() {
    let _guard = guard();

    assert!(resolve("field-filled", "abc", None).focused);
    field_state::on_focus_event("field-filled");
    field_state::on_blur_event("field-filled", "abc");
    assert!(resolve("field-filled", "abc", None).focused);
}

#[test]
fn editor_state_handles_unicode_and_caret_edits() {
    let _guard = guard();

    let mut editor = editor_state::EditorState::new("ab中d", 10);
    assert_eq!(editor.len(), 4);
    assert_eq!(editor.caret, 4);

    editor.move_left();
    assert!(editor.delete_backward());
    assert_eq!(editor.value, "abd");
    assert_eq!(editor.caret, 2);

    assert!(editor.insert_text("XY"));
    assert_eq!(editor.value, "abXYd");
    assert_eq!(editor.caret, 4);

    assert_eq!(
        editor_state::EditorState::byte_index_at_char("a中b", 2),
        "a中".len()
    );

    assert!(editor.clamp_to_max_length(Some(3)));
    assert_eq!(editor.value, "abX");
    assert_eq!(editor.caret, 3);
}

#[test]
fn editor_deletes_are_bounded_at_the_ends() {
    let _guard = guard();

    let mut editor = editor_state::EditorState::new("a", 0);
    assert!(!editor.delete_backward());
    editor.move_to(1);
    assert!(!editor.delete_forward());
    assert_eq!(editor.value, "a");
}
