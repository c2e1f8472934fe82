use super::control;

pub const SECURE_SLOT: &str = "secure-hidden";
const FOCUS_SIGNAL_SLOT: &str = "focus-signal-seen";
const MOTION_EPOCH_SLOT: &str = "motion-epoch";

/// Per-render inputs to the focus/visibility state machine.
#[derive(Clone, Copy, Debug)]
pub struct FieldStateInput<'a> {
    pub id: &'a str,
    pub value: &'a str,
    /// Externally owned focus truth. Watched for changes; the first
    /// observation only records a baseline.
    pub focus_signal: Option<bool>,
}

/// Resolved state for one mounted field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldState {
    pub focused: bool,
    pub secure_hidden: bool,
    /// Bumped whenever a transition should animate; keys the label
    /// animation so gpui restarts it.
    pub motion_epoch: usize,
}

impl FieldState {
    pub fn resolve(input: FieldStateInput) -> Self {
        // A field mounted with content starts with the label floated up.
        let mut focused = control::focused_state(input.id, None, !input.value.is_empty());

        if let Some(signal) = input.focus_signal {
            match recorded_signal(input.id) {
                None => record_signal(input.id, signal),
                Some(seen) if seen != signal => {
                    // Any change to the external signal wins over the
                    // internally tracked state, whatever the value holds.
                    record_signal(input.id, signal);
                    bump_motion_epoch(input.id);
                    control::set_focused_state(input.id, signal);
                    focused = signal;
                }
                Some(_) => {}
            }
        }

        Self {
            focused,
            secure_hidden: control::bool_state(input.id, SECURE_SLOT, None, true),
            motion_epoch: motion_epoch(input.id),
        }
    }
}

/// The underlying input gained focus: animate, then float the label up.
pub fn on_focus_event(id: &str) {
    bump_motion_epoch(id);
    control::set_focused_state(id, true);
}

/// The underlying input lost focus. The label only drops back down when the
/// field is empty; with content present the event is ignored.
pub fn on_blur_event(id: &str, value: &str) -> bool {
    if !value.is_empty() {
        return false;
    }
    bump_motion_epoch(id);
    control::set_focused_state(id, false);
    true
}

/// Flip the secure-text state. Returns the new hidden flag. Focus changes
/// never touch this cell.
pub fn toggle_visibility(id: &str) -> bool {
    let hidden = control::bool_state(id, SECURE_SLOT, None, true);
    control::set_bool_state(id, SECURE_SLOT, !hidden);
    !hidden
}

pub fn motion_epoch(id: &str) -> usize {
    control::usize_state(id, MOTION_EPOCH_SLOT, None, 0)
}

fn bump_motion_epoch(id: &str) {
    let epoch = control::usize_state(id, MOTION_EPOCH_SLOT, None, 0);
    control::set_usize_state(id, MOTION_EPOCH_SLOT, epoch.wrapping_add(1));
}

fn recorded_signal(id: &str) -> Option<bool> {
    match control::text_state(id, FOCUS_SIGNAL_SLOT, None, String::new()).as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn record_signal(id: &str, signal: bool) {
    control::set_text_state(id, FOCUS_SIGNAL_SLOT, signal.to_string());
}
