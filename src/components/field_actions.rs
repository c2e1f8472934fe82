use std::sync::Once;

use gpui::{App, KeyBinding, actions};

pub const FIELD_KEY_CONTEXT: &str = "floatlabel_field";

actions!(
    floatlabel_field,
    [
        MoveLeft,
        MoveRight,
        MoveHome,
        MoveEnd,
        DeleteBackward,
        DeleteForward,
        PasteClipboard,
        Submit,
    ]
);

static BINDINGS_INIT: Once = Once::new();

/// Registers the field key bindings exactly once per process, before any
/// instance handles input.
pub fn ensure_field_keybindings(cx: &mut App) {
    BINDINGS_INIT.call_once(|| {
        cx.bind_keys(field_bindings());
    });
}

fn field_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("left", MoveLeft, Some(FIELD_KEY_CONTEXT)),
        KeyBinding::new("right", MoveRight, Some(FIELD_KEY_CONTEXT)),
        KeyBinding::new("home", MoveHome, Some(FIELD_KEY_CONTEXT)),
        KeyBinding::new("end", MoveEnd, Some(FIELD_KEY_CONTEXT)),
        KeyBinding::new("backspace", DeleteBackward, Some(FIELD_KEY_CONTEXT)),
        KeyBinding::new("delete", DeleteForward, Some(FIELD_KEY_CONTEXT)),
        KeyBinding::new("cmd-v", PasteClipboard, Some(FIELD_KEY_CONTEXT)),
        KeyBinding::new("ctrl-v", PasteClipboard, Some(FIELD_KEY_CONTEXT)),
        KeyBinding::new("enter", Submit, Some(FIELD_KEY_CONTEXT)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_context_constant_is_stable() {
        assert_eq!(FIELD_KEY_CONTEXT, "floatlabel_field");
    }

    #[test]
    fn bindings_cover_navigation_editing_paste_and_submit() {
        assert_eq!(field_bindings().len(), 9);
    }
}
