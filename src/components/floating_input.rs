use std::{
    collections::HashMap,
    ops::Range,
    path::PathBuf,
    rc::Rc,
    sync::{LazyLock, Mutex},
    time::Duration,
};

use gpui::{
    Animation, AnimationExt, AnyElement, Bounds, FocusHandle, InputHandler, InteractiveElement,
    IntoElement, MouseButton, ParentElement, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, UTF16Selection, Window, canvas, div, point, px, svg,
};

use crate::contracts::{Disableable, MotionAware};
use crate::icon::resolve_toggle_icon;
use crate::id::ComponentId;
use crate::motion::{MotionConfig, lerp, spring_easing};
use crate::style::{
    FieldMetrics, LabelPresets, LabelPresetsPatch, RegionOverrides, refine_region, resolve_label,
    resolve_wrapper,
};

use super::control;
use super::editor_state::EditorState;
use super::field_actions::{
    DeleteBackward, DeleteForward, FIELD_KEY_CONTEXT, MoveEnd, MoveHome, MoveLeft, MoveRight,
    PasteClipboard, Submit, ensure_field_keybindings,
};
use super::field_state::{self, FieldState, FieldStateInput};
use super::utils::{quantized_stroke_px, resolve_hsla};

type ChangeHandler = Rc<dyn Fn(SharedString, &mut Window, &mut gpui::App)>;
type SubmitHandler = Rc<dyn Fn(&mut Window, &mut gpui::App)>;

const INPUT_FONT_PX: f32 = 14.0;
const CARET_HEIGHT_PX: f32 = 15.0;
const CARET_BLINK_TOGGLE_MS: u64 = 680;
const CARET_BLINK_CYCLE_MS: u64 = CARET_BLINK_TOGGLE_MS * 2;

/// Logical input focus as tracked by this field's own events.
const NATIVE_FOCUS_SLOT: &str = "native-focused";
/// Last observed state of the gpui focus handle, for the watch/diff step
/// that turns handle transitions into focus/blur events.
const HANDLE_SEEN_SLOT: &str = "handle-focused-seen";

static FIELD_FOCUS_HANDLES: LazyLock<Mutex<HashMap<String, FocusHandle>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Narrow imperative surface handed to parents: a single focus operation.
/// Focusing an unmounted field is a no-op.
#[derive(Clone)]
pub struct InputHandle {
    focus_handle: Option<FocusHandle>,
}

impl InputHandle {
    pub fn focus(&self, window: &mut Window, cx: &mut gpui::App) {
        if let Some(handle) = self.focus_handle.as_ref() {
            window.focus(handle, cx);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.focus_handle.is_some()
    }
}

/// Handle for the field with the given id. Disconnected (and harmless)
/// until that field has rendered at least once.
pub fn input_handle(id: &str) -> InputHandle {
    let focus_handle = FIELD_FOCUS_HANDLES
        .lock()
        .ok()
        .and_then(|handles| handles.get(id).cloned());
    InputHandle { focus_handle }
}

#[derive(Clone)]
struct FieldImeHandler {
    id: String,
    value_controlled: bool,
    rendered_value: String,
    max_length: Option<usize>,
    disabled: bool,
    read_only: bool,
    masked: bool,
    font_size: f32,
    on_change: Option<ChangeHandler>,
}

impl FieldImeHandler {
    fn current_value(&self) -> String {
        control::text_state(
            &self.id,
            "value",
            self.value_controlled.then_some(self.rendered_value.clone()),
            self.rendered_value.clone(),
        )
    }

    fn current_caret(&self, value: &str) -> usize {
        let len = value.chars().count();
        control::text_state(&self.id, "caret-index", None, len.to_string())
            .parse::<usize>()
            .ok()
            .unwrap_or(len)
            .min(len)
    }

    fn char_index_from_utf16(value: &str, utf16_index: usize) -> usize {
        let mut utf16_count = 0usize;
        let mut char_index = 0usize;
        for ch in value.chars() {
            if utf16_count >= utf16_index {
                break;
            }
            utf16_count += ch.len_utf16();
            char_index += 1;
        }
        char_index
    }

    fn utf16_from_char(value: &str, char_index: usize) -> usize {
        value
            .chars()
            .take(char_index)
            .map(|ch| ch.len_utf16())
            .sum::<usize>()
    }

    fn char_range_from_utf16(value: &str, range_utf16: Range<usize>) -> Range<usize> {
        let start = Self::char_index_from_utf16(value, range_utf16.start);
        let end = Self::char_index_from_utf16(value, range_utf16.end);
        if start <= end { start..end } else { end..start }
    }

    fn apply_edit(
        &self,
        previous: &str,
        editor: &EditorState,
        window: &mut Window,
        cx: &mut gpui::App,
    ) {
        FloatingLabelInput::apply_editor_state(
            &self.id,
            previous,
            editor,
            self.value_controlled,
            self.on_change.as_ref(),
            window,
            cx,
        );
    }
}

impl InputHandler for FieldImeHandler {
    fn selected_text_range(
        &mut self,
        _ignore_disabled_input: bool,
        _window: &mut Window,
        _cx: &mut gpui::App,
    ) -> Option<UTF16Selection> {
        let value = self.current_value();
        let caret = self.current_caret(&value);
        let utf16_caret = Self::utf16_from_char(&value, caret);
        Some(UTF16Selection {
            range: utf16_caret..utf16_caret,
            reversed: false,
        })
    }

    fn marked_text_range(
        &mut self,
        _window: &mut Window,
        _cx: &mut gpui::App,
    ) -> Option<Range<usize>> {
        None
    }

    fn text_for_range(
        &mut self,
        range_utf16: Range<usize>,
        adjusted_range: &mut Option<Range<usize>>,
        _window: &mut Window,
        _cx: &mut gpui::App,
    ) -> Option<String> {
        let value = self.current_value();
        let len = value.chars().count();
        let range = Self::char_range_from_utf16(&value, range_utf16);
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        adjusted_range.replace(
            Self::utf16_from_char(&value, start)..Self::utf16_from_char(&value, end),
        );
        Some(value.chars().skip(start).take(end - start).collect())
    }

    fn replace_text_in_range(
        &mut self,
        replacement_range: Option<Range<usize>>,
        text: &str,
        window: &mut Window,
        cx: &mut gpui::App,
    ) {
        if self.disabled || self.read_only {
            return;
        }
        let value = self.current_value();
        let caret = self.current_caret(&value);
        let (start, end) = match replacement_range {
            Some(range_utf16) => {
                let range = Self::char_range_from_utf16(&value, range_utf16);
                (range.start, range.end)
            }
            None => (caret, caret),
        };
        let sanitized = text.replace(['\r', '\n'], "");
        let mut editor = EditorState::new(value.clone(), caret);
        editor.replace_char_range(start, end, &sanitized);
        editor.clamp_to_max_length(self.max_length);
        self.apply_edit(&value, &editor, window, cx);
    }

    fn replace_and_mark_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        _new_selected_range_utf16: Option<Range<usize>>,
        window: &mut Window,
        cx: &mut gpui::App,
    ) {
        // No composition-range tracking; preedit text is committed directly.
        self.replace_text_in_range(range_utf16, new_text, window, cx);
    }

    fn unmark_text(&mut self, _window: &mut Window, _cx: &mut gpui::App) {}

    fn bounds_for_range(
        &mut self,
        range_utf16: Range<usize>,
        window: &mut Window,
        _cx: &mut gpui::App,
    ) -> Option<Bounds<gpui::Pixels>> {
        let value = self.current_value();
        let range = Self::char_range_from_utf16(&value, range_utf16);
        let (origin_x, origin_y, _width, height) = FloatingLabelInput::content_geometry(&self.id);
        let scroll_x = FloatingLabelInput::scroll_x(&self.id);
        let metric_text = if self.masked {
            "*".repeat(value.chars().count())
        } else {
            value.clone()
        };
        let start_x = origin_x
            + FloatingLabelInput::x_for_char(window, self.font_size, &metric_text, range.start)
            - scroll_x;
        let end_x = origin_x
            + FloatingLabelInput::x_for_char(window, self.font_size, &metric_text, range.end)
            - scroll_x;
        let top = origin_y;
        let bottom = origin_y + height.max(1.0);
        let right = if end_x > start_x {
            end_x
        } else {
            start_x + 1.0
        };
        Some(Bounds::from_corners(
            point(px(start_x), px(top)),
            point(px(right), px(bottom)),
        ))
    }

    fn character_index_for_point(
        &mut self,
        point: gpui::Point<gpui::Pixels>,
        window: &mut Window,
        _cx: &mut gpui::App,
    ) -> Option<usize> {
        let value = self.current_value();
        let (origin_x, _origin_y, _width, _height) = FloatingLabelInput::content_geometry(&self.id);
        let scroll_x = FloatingLabelInput::scroll_x(&self.id);
        let local_x = (f32::from(point.x) - origin_x + scroll_x).max(0.0);
        let metric_text = if self.masked {
            "*".repeat(value.chars().count())
        } else {
            value.clone()
        };
        let char_index =
            FloatingLabelInput::char_from_x(window, self.font_size, &metric_text, local_x)
                .min(value.chars().count());
        Some(Self::utf16_from_char(&value, char_index))
    }

    fn accepts_text_input(&mut self, _window: &mut Window, _cx: &mut gpui::App) -> bool {
        !self.disabled && !self.read_only
    }
}

/// Text field whose label floats between a placeholder position inside the
/// input and a compact position above it, following focus and content.
#[derive(IntoElement)]
pub struct FloatingLabelInput {
    id: ComponentId,
    label: SharedString,
    value: Option<SharedString>,
    value_controlled: bool,
    default_value: SharedString,
    focus_signal: Option<bool>,
    password: bool,
    no_border: bool,
    custom_toggle_icon: Option<PathBuf>,
    label_presets_patch: LabelPresetsPatch,
    regions: RegionOverrides,
    metrics: FieldMetrics,
    disabled: bool,
    read_only: bool,
    max_length: Option<usize>,
    theme: crate::theme::LocalTheme,
    motion: MotionConfig,
    focus_handle: Option<FocusHandle>,
    on_change: Option<ChangeHandler>,
    on_submit: Option<SubmitHandler>,
}

impl FloatingLabelInput {
    #[track_caller]
    pub fn new(label: impl Into<SharedString>) -> Self {
        Self {
            id: ComponentId::auto("floating-input"),
            label: label.into(),
            value: None,
            value_controlled: false,
            default_value: SharedString::default(),
            focus_signal: None,
            password: false,
            no_border: false,
            custom_toggle_icon: None,
            label_presets_patch: LabelPresetsPatch::default(),
            regions: RegionOverrides::default(),
            metrics: FieldMetrics::default(),
            disabled: false,
            read_only: false,
            max_length: None,
            theme: crate::theme::LocalTheme::default(),
            motion: MotionConfig::default(),
            focus_handle: None,
            on_change: None,
            on_submit: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = Some(value.into());
        self.value_controlled = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<SharedString>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Externally owned focus truth. Changes to this signal always win over
    /// the field's own focus/blur events.
    pub fn focused(mut self, value: bool) -> Self {
        self.focus_signal = Some(value);
        self
    }

    /// Secure entry plus the visibility toggle control.
    pub fn password(mut self, value: bool) -> Self {
        self.password = value;
        self
    }

    /// Suppress the wrapper border and mute the label in both focus states.
    pub fn no_border(mut self, value: bool) -> Self {
        self.no_border = value;
        self
    }

    /// Replaces the stock toggle icon for both secure-text states.
    pub fn custom_toggle_icon(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom_toggle_icon = Some(path.into());
        self
    }

    pub fn label_presets(mut self, patch: LabelPresetsPatch) -> Self {
        self.label_presets_patch = patch;
        self
    }

    pub fn metrics(mut self, metrics: FieldMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn container_style(mut self, refinement: gpui::StyleRefinement) -> Self {
        self.regions.container = Some(refinement);
        self
    }

    pub fn label_style(mut self, refinement: gpui::StyleRefinement) -> Self {
        self.regions.label = Some(refinement);
        self
    }

    pub fn input_style(mut self, refinement: gpui::StyleRefinement) -> Self {
        self.regions.input = Some(refinement);
        self
    }

    pub fn toggle_button_style(mut self, refinement: gpui::StyleRefinement) -> Self {
        self.regions.toggle_button = Some(refinement);
        self
    }

    pub fn toggle_icon_style(mut self, refinement: gpui::StyleRefinement) -> Self {
        self.regions.toggle_icon = Some(refinement);
        self
    }

    pub fn read_only(mut self, value: bool) -> Self {
        self.read_only = value;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length.max(1));
        self
    }

    pub fn focus_handle(mut self, focus_handle: FocusHandle) -> Self {
        self.focus_handle = Some(focus_handle);
        self
    }

    pub fn on_change(
        mut self,
        handler: impl Fn(SharedString, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(handler));
        self
    }

    /// Zero-argument callback fired by the submit action (enter).
    pub fn on_submit(mut self, handler: impl Fn(&mut Window, &mut gpui::App) + 'static) -> Self {
        self.on_submit = Some(Rc::new(handler));
        self
    }

    fn resolved_focus_handle(&self, cx: &gpui::App) -> FocusHandle {
        if let Some(focus_handle) = self.focus_handle.as_ref() {
            return focus_handle.clone();
        }
        if let Ok(mut handles) = FIELD_FOCUS_HANDLES.lock() {
            return handles
                .entry(self.id.to_string())
                .or_insert_with(|| cx.focus_handle())
                .clone();
        }
        cx.focus_handle()
    }

    fn resolved_value(&self) -> SharedString {
        let controlled = self
            .value_controlled
            .then_some(self.value.clone().unwrap_or_default().to_string());
        control::text_state(
            &self.id.to_string(),
            "value",
            controlled,
            self.default_value.to_string(),
        )
        .into()
    }

    fn display_value(&self, value: &SharedString, secure_hidden: bool) -> String {
        if self.password && secure_hidden {
            "*".repeat(value.as_ref().chars().count())
        } else {
            value.to_string()
        }
    }

    fn editor_state_for(id: &str, current_value: &str) -> EditorState {
        let len = current_value.chars().count();
        let caret = control::text_state(id, "caret-index", None, len.to_string())
            .parse::<usize>()
            .ok()
            .unwrap_or(len)
            .min(len);
        EditorState::new(current_value, caret)
    }

    fn apply_editor_state(
        id: &str,
        previous: &str,
        editor: &EditorState,
        value_controlled: bool,
        on_change: Option<&ChangeHandler>,
        window: &mut Window,
        cx: &mut gpui::App,
    ) {
        let changed = editor.value != previous;
        if changed && !value_controlled {
            control::set_text_state(id, "value", editor.value.clone());
        }
        control::set_text_state(id, "caret-index", editor.caret.to_string());
        window.refresh();

        if changed && let Some(handler) = on_change {
            (handler)(editor.value.clone().into(), window, cx);
        }
    }

    fn line_layout(window: &Window, font_size: f32, text: &str) -> std::sync::Arc<gpui::LineLayout> {
        let font_size = px(font_size);
        let mut text_style = window.text_style();
        text_style.font_size = font_size.into();
        let run = text_style.to_run(text.len());
        window
            .text_system()
            .layout_line(text, font_size, &[run], None)
    }

    fn x_for_char(window: &Window, font_size: f32, text: &str, char_index: usize) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let char_index = char_index.min(text.chars().count());
        let byte_index = EditorState::byte_index_at_char(text, char_index);
        let layout = Self::line_layout(window, font_size, text);
        f32::from(layout.x_for_index(byte_index))
    }

    fn char_from_x(window: &Window, font_size: f32, text: &str, x: f32) -> usize {
        if text.is_empty() {
            return 0;
        }
        let layout = Self::line_layout(window, font_size, text);
        let byte_index = layout.closest_index_for_x(px(x.max(0.0))).min(text.len());
        EditorState::char_index_at_byte(text, byte_index).min(text.chars().count())
    }

    fn content_geometry(id: &str) -> (f32, f32, f32, f32) {
        let read = |slot: &str| {
            control::text_state(id, slot, None, "0".to_string())
                .parse::<f32>()
                .ok()
                .unwrap_or(0.0)
        };
        (
            read("content-origin-x"),
            read("content-origin-y"),
            read("content-width"),
            read("content-height"),
        )
    }

    fn scroll_x(id: &str) -> f32 {
        control::text_state(id, "scroll-x", None, "0".to_string())
            .parse::<f32>()
            .ok()
            .unwrap_or(0.0)
    }

    fn caret_from_click(
        id: &str,
        position: gpui::Point<gpui::Pixels>,
        value: &str,
        window: &Window,
        font_size: f32,
    ) -> usize {
        let (origin_x, _origin_y, _width, _height) = Self::content_geometry(id);
        let local_x = (f32::from(position.x) - origin_x + Self::scroll_x(id)).max(0.0);
        Self::char_from_x(window, font_size, value, local_x).min(value.chars().count())
    }

    /// Turn gpui focus-handle transitions into focus/blur events. Parent
    /// code focusing through an [`InputHandle`] lands here on the next
    /// render.
    fn reconcile_native_focus(id: &str, handle_focused: bool, current_value: &str) -> bool {
        let handle_seen = control::bool_state(id, HANDLE_SEEN_SLOT, None, false);
        if handle_focused == handle_seen {
            return false;
        }
        control::set_bool_state(id, HANDLE_SEEN_SLOT, handle_focused);

        let tracked = control::bool_state(id, NATIVE_FOCUS_SLOT, None, false);
        if handle_focused && !tracked {
            control::set_bool_state(id, NATIVE_FOCUS_SLOT, true);
            field_state::on_focus_event(id);
            true
        } else if !handle_focused && tracked {
            control::set_bool_state(id, NATIVE_FOCUS_SLOT, false);
            field_state::on_blur_event(id, current_value);
            true
        } else {
            false
        }
    }

    fn render_label(&mut self, state: FieldState, focus_handle: &FocusHandle) -> AnyElement {
        let tokens = &self.theme.components.field;
        let presets = LabelPresets::from_tokens(tokens).merged(&self.label_presets_patch);
        let target = resolve_label(&presets, tokens, state.focused, self.no_border);
        let origin = resolve_label(&presets, tokens, !state.focused, self.no_border);
        let label_color = resolve_hsla(&self.theme, &target.color);
        let label_refinement = self.regions.label.clone();

        let id_for_press = self.id.to_string();
        let handle_for_press = focus_handle.clone();

        let label = div()
            .id(self.id.slot("label"))
            .absolute()
            .left(px(target.left))
            .top(px(target.top))
            .text_size(px(target.font_size))
            .text_color(label_color)
            .whitespace_nowrap()
            .on_mouse_down(MouseButton::Left, move |_, window, cx| {
                window.focus(&handle_for_press, cx);
                control::set_bool_state(&id_for_press, HANDLE_SEEN_SLOT, true);
                control::set_bool_state(&id_for_press, NATIVE_FOCUS_SLOT, true);
                field_state::on_focus_event(&id_for_press);
                window.refresh();
            })
            .child(self.label.clone());

        let from = (origin.left, origin.top, origin.font_size);
        let to = (target.left, target.top, target.font_size);
        label
            .with_animation(
                self.id.slot(&format!("label-float-{}", state.motion_epoch)),
                Animation::new(Duration::from_millis(self.motion.effective_duration_ms()))
                    .with_easing(spring_easing(self.motion.spring)),
                move |this, delta| {
                    let this = this
                        .left(px(lerp(from.0, to.0, delta)))
                        .top(px(lerp(from.1, to.1, delta)))
                        .text_size(px(lerp(from.2, to.2, delta)));
                    refine_region(this, label_refinement.as_ref())
                },
            )
            .into_any_element()
    }

    fn render_input_box(
        &mut self,
        state: FieldState,
        focus_handle: &FocusHandle,
        window: &mut Window,
        cx: &mut gpui::App,
    ) -> AnyElement {
        let tokens = &self.theme.components.field;
        let id = self.id.to_string();
        let resolved_value = self.resolved_value();
        let current_value = resolved_value.to_string();
        let masked = self.password && state.secure_hidden;
        let font_size = INPUT_FONT_PX;
        let native_focused = control::bool_state(&id, NATIVE_FOCUS_SLOT, None, false);
        let current_len = current_value.chars().count();
        let current_caret =
            control::text_state(&id, "caret-index", None, current_len.to_string())
                .parse::<usize>()
                .ok()
                .map(|value| value.min(current_len))
                .unwrap_or(current_len);

        let mut input = div()
            .id(self.id.slot("box"))
            .relative()
            .focusable()
            .key_context(FIELD_KEY_CONTEXT)
            .flex_1()
            .min_w_0()
            .flex()
            .items_center()
            .overflow_hidden()
            .whitespace_nowrap()
            .ml(px(self.metrics.input_left_nudge))
            .text_size(px(font_size))
            .text_color(resolve_hsla(&self.theme, &tokens.input_fg));

        if self.disabled {
            input = input.cursor_default().opacity(0.55);
        } else {
            input = input.cursor_text();
        }
        input = input.track_focus(focus_handle);

        {
            let id_for_blur = id.clone();
            let value_for_blur = current_value.clone();
            input = input.on_mouse_down_out(move |_, window, _cx| {
                if control::bool_state(&id_for_blur, NATIVE_FOCUS_SLOT, None, false) {
                    control::set_bool_state(&id_for_blur, NATIVE_FOCUS_SLOT, false);
                    field_state::on_blur_event(&id_for_blur, &value_for_blur);
                    window.refresh();
                }
            });
        }

        if !self.disabled && !self.read_only {
            let value_controlled = self.value_controlled;
            let id_for_mouse = id.clone();
            let value_for_mouse = current_value.clone();
            let handle_for_mouse = focus_handle.clone();
            input = input.on_mouse_down(MouseButton::Left, move |event, window, cx| {
                window.focus(&handle_for_mouse, cx);
                control::set_bool_state(&id_for_mouse, HANDLE_SEEN_SLOT, true);
                control::set_bool_state(&id_for_mouse, NATIVE_FOCUS_SLOT, true);
                field_state::on_focus_event(&id_for_mouse);

                let current_value = control::text_state(
                    &id_for_mouse,
                    "value",
                    value_controlled.then_some(value_for_mouse.clone()),
                    value_for_mouse.clone(),
                );
                let click_caret = Self::caret_from_click(
                    &id_for_mouse,
                    event.position,
                    &current_value,
                    window,
                    font_size,
                );
                control::set_text_state(&id_for_mouse, "caret-index", click_caret.to_string());
                window.refresh();
            });
        }

        if !self.disabled {
            let value_controlled = self.value_controlled;
            input = input
                .on_action({
                    let id = id.clone();
                    let rendered_value = current_value.clone();
                    let on_change = self.on_change.clone();
                    move |_: &MoveLeft, window, cx| {
                        let current_value = control::text_state(
                            &id,
                            "value",
                            value_controlled.then_some(rendered_value.clone()),
                            rendered_value.clone(),
                        );
                        let mut editor = Self::editor_state_for(&id, &current_value);
                        editor.move_left();
                        Self::apply_editor_state(
                            &id,
                            &current_value,
                            &editor,
                            value_controlled,
                            on_change.as_ref(),
                            window,
                            cx,
                        );
                    }
                })
                .on_action({
                    let id = id.clone();
                    let rendered_value = current_value.clone();
                    let on_change = self.on_change.clone();
                    move |_: &MoveRight, window, cx| {
                        let current_value = control::text_state(
                            &id,
                            "value",
                            value_controlled.then_some(rendered_value.clone()),
                            rendered_value.clone(),
                        );
                        let mut editor = Self::editor_state_for(&id, &current_value);
                        editor.move_right();
                        Self::apply_editor_state(
                            &id,
                            &current_value,
                            &editor,
                            value_controlled,
                            on_change.as_ref(),
                            window,
                            cx,
                        );
                    }
                })
                .on_action({
                    let id = id.clone();
                    let rendered_value = current_value.clone();
                    let on_change = self.on_change.clone();
                    move |_: &MoveHome, window, cx| {
                        let current_value = control::text_state(
                            &id,
                            "value",
                            value_controlled.then_some(rendered_value.clone()),
                            rendered_value.clone(),
                        );
                        let mut editor = Self::editor_state_for(&id, &current_value);
                        editor.move_to(0);
                        Self::apply_editor_state(
                            &id,
                            &current_value,
                            &editor,
                            value_controlled,
                            on_change.as_ref(),
                            window,
                            cx,
                        );
                    }
                })
                .on_action({
                    let id = id.clone();
                    let rendered_value = current_value.clone();
                    let on_change = self.on_change.clone();
                    move |_: &MoveEnd, window, cx| {
                        let current_value = control::text_state(
                            &id,
                            "value",
                            value_controlled.then_some(rendered_value.clone()),
                            rendered_value.clone(),
                        );
                        let mut editor = Self::editor_state_for(&id, &current_value);
                        let len = editor.len();
                        editor.move_to(len);
                        Self::apply_editor_state(
                            &id,
                            &current_value,
                            &editor,
                            value_controlled,
                            on_change.as_ref(),
                            window,
                            cx,
                        );
                    }
                });

            if !self.read_only {
                let max_length = self.max_length;
                input = input
                    .on_action({
                        let id = id.clone();
                        let rendered_value = current_value.clone();
                        let on_change = self.on_change.clone();
                        move |_: &DeleteBackward, window, cx| {
                            let current_value = control::text_state(
                                &id,
                                "value",
                                value_controlled.then_some(rendered_value.clone()),
                                rendered_value.clone(),
                            );
                            let mut editor = Self::editor_state_for(&id, &current_value);
                            if editor.delete_backward() {
                                editor.clamp_to_max_length(max_length);
                            }
                            Self::apply_editor_state(
                                &id,
                                &current_value,
                                &editor,
                                value_controlled,
                                on_change.as_ref(),
                                window,
                                cx,
                            );
                        }
                    })
                    .on_action({
                        let id = id.clone();
                        let rendered_value = current_value.clone();
                        let on_change = self.on_change.clone();
                        move |_: &DeleteForward, window, cx| {
                            let current_value = control::text_state(
                                &id,
                                "value",
                                value_controlled.then_some(rendered_value.clone()),
                                rendered_value.clone(),
                            );
                            let mut editor = Self::editor_state_for(&id, &current_value);
                            if editor.delete_forward() {
                                editor.clamp_to_max_length(max_length);
                            }
                            Self::apply_editor_state(
                                &id,
                                &current_value,
                                &editor,
                                value_controlled,
                                on_change.as_ref(),
                                window,
                                cx,
                            );
                        }
                    })
                    .on_action({
                        let id = id.clone();
                        let rendered_value = current_value.clone();
                        let on_change = self.on_change.clone();
                        move |_: &PasteClipboard, window, cx| {
                            let Some(item) = cx.read_from_clipboard() else {
                                return;
                            };
                            let Some(text) = item.text() else {
                                return;
                            };
                            let sanitized = text.replace('\r', " ").replace('\n', " ");
                            if sanitized.is_empty() {
                                return;
                            }
                            let current_value = control::text_state(
                                &id,
                                "value",
                                value_controlled.then_some(rendered_value.clone()),
                                rendered_value.clone(),
                            );
                            let mut editor = Self::editor_state_for(&id, &current_value);
                            if editor.insert_text(&sanitized) {
                                editor.clamp_to_max_length(max_length);
                            }
                            Self::apply_editor_state(
                                &id,
                                &current_value,
                                &editor,
                                value_controlled,
                                on_change.as_ref(),
                                window,
                                cx,
                            );
                        }
                    })
                    .on_action({
                        let on_submit = self.on_submit.clone();
                        move |_: &Submit, window, cx| {
                            if let Some(handler) = on_submit.as_ref() {
                                (handler)(window, cx);
                            }
                        }
                    });
            }
        }

        window.handle_input(
            focus_handle,
            FieldImeHandler {
                id: id.clone(),
                value_controlled: self.value_controlled,
                rendered_value: current_value.clone(),
                max_length: self.max_length,
                disabled: self.disabled,
                read_only: self.read_only,
                masked,
                font_size,
                on_change: self.on_change.clone(),
            },
            cx,
        );

        let value = self.display_value(&resolved_value, state.secure_hidden);
        let (_, _, content_width, _) = Self::content_geometry(&id);
        let value_width = Self::x_for_char(window, font_size, &value, value.chars().count());
        let max_scroll = (value_width - content_width.max(0.0)).max(0.0);
        let mut scroll_x = Self::scroll_x(&id).clamp(0.0, max_scroll);
        if content_width <= 0.0 {
            scroll_x = 0.0;
        } else if !self.disabled && !self.read_only && native_focused {
            let caret_x = Self::x_for_char(window, font_size, &value, current_caret);
            let viewport_width = content_width.max(1.0);
            let right_guard = (viewport_width - 4.0).max(1.0);
            if caret_x < scroll_x {
                scroll_x = caret_x;
            } else if caret_x > scroll_x + right_guard {
                scroll_x = caret_x - right_guard;
            }
            scroll_x = scroll_x.clamp(0.0, max_scroll);
        } else if !native_focused {
            scroll_x = 0.0;
        }
        control::set_text_state(&id, "scroll-x", format!("{scroll_x:.3}"));

        let mut value_container = div()
            .id(self.id.slot("content"))
            .relative()
            .flex_1()
            .min_w_0()
            .flex()
            .items_center()
            .overflow_hidden()
            .whitespace_nowrap();
        value_container = value_container.child({
            let id_for_metrics = id.clone();
            canvas(
                move |bounds, _, _cx| {
                    control::set_text_state(
                        &id_for_metrics,
                        "content-origin-x",
                        f32::from(bounds.origin.x).to_string(),
                    );
                    control::set_text_state(
                        &id_for_metrics,
                        "content-origin-y",
                        f32::from(bounds.origin.y).to_string(),
                    );
                    control::set_text_state(
                        &id_for_metrics,
                        "content-width",
                        f32::from(bounds.size.width).to_string(),
                    );
                    control::set_text_state(
                        &id_for_metrics,
                        "content-height",
                        f32::from(bounds.size.height).to_string(),
                    );
                },
                |_, _, _, _| {},
            )
            .absolute()
            .size_full()
        });

        // No placeholder: the floating label fills that role.
        value_container = value_container.child(
            div()
                .relative()
                .left(px(-scroll_x))
                .flex()
                .items_center()
                .whitespace_nowrap()
                .child(value.clone()),
        );

        if !self.disabled && !self.read_only && native_focused {
            let caret_left = (Self::x_for_char(window, font_size, &value, current_caret)
                - scroll_x)
                .clamp(0.0, content_width.max(0.0));
            let caret = div()
                .id(self.id.slot("caret"))
                .flex_none()
                .w(quantized_stroke_px(window, 1.5))
                .h(px(CARET_HEIGHT_PX))
                .bg(resolve_hsla(&self.theme, &tokens.input_fg))
                .rounded_sm()
                .with_animation(
                    self.id.slot("caret-blink"),
                    Animation::new(Duration::from_millis(CARET_BLINK_CYCLE_MS))
                        .repeat()
                        .with_easing(gpui::linear),
                    |this, delta| {
                        let visible = ((delta * 2.0).fract()) < 0.5;
                        this.opacity(if visible { 1.0 } else { 0.0 })
                    },
                );
            value_container = value_container.child(
                div()
                    .absolute()
                    .left(px(caret_left))
                    .top_0()
                    .bottom_0()
                    .flex()
                    .items_center()
                    .child(caret),
            );
        }
        input = input.child(value_container);

        refine_region(input, self.regions.input.as_ref()).into_any_element()
    }

    fn render_toggle(&mut self, state: FieldState) -> AnyElement {
        let id = self.id.to_string();
        let icon_size = self.metrics.toggle_icon_size;
        let icon_path = resolve_toggle_icon(
            self.theme.color_scheme,
            state.secure_hidden,
            self.custom_toggle_icon.as_deref(),
        );

        let icon: AnyElement = match icon_path {
            Some(path) => {
                let icon = svg()
                    .external_path(path.to_string_lossy().to_string())
                    .w(px(icon_size))
                    .h(px(icon_size));
                refine_region(icon, self.regions.toggle_icon.as_ref()).into_any_element()
            }
            None => div()
                .w(px(icon_size))
                .h(px(icon_size))
                .child("?")
                .into_any_element(),
        };

        let button = div()
            .id(self.id.slot("toggle"))
            .flex_none()
            .flex()
            .items_center()
            .justify_center()
            .mr(px(self.metrics.toggle_margin_right))
            .cursor_pointer()
            .on_click(move |_, window, _cx| {
                field_state::toggle_visibility(&id);
                window.refresh();
            });

        refine_region(button, self.regions.toggle_button.as_ref())
            .child(icon)
            .into_any_element()
    }
}

impl Disableable for FloatingLabelInput {
    fn disabled(mut self, value: bool) -> Self {
        self.disabled = value;
        self
    }
}

impl MotionAware for FloatingLabelInput {
    fn motion(mut self, value: MotionConfig) -> Self {
        self.motion = value;
        self
    }
}

impl crate::contracts::ComponentThemeOverridable for FloatingLabelInput {
    fn local_theme_mut(&mut self) -> &mut crate::theme::LocalTheme {
        &mut self.theme
    }
}

impl gpui::Styled for FloatingLabelInput {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        self.regions
            .container
            .get_or_insert_with(gpui::StyleRefinement::default)
    }
}

impl RenderOnce for FloatingLabelInput {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        ensure_field_keybindings(cx);

        let id = self.id.to_string();
        let current_value = self.resolved_value().to_string();
        let focus_handle = self.resolved_focus_handle(cx);

        let mut state = FieldState::resolve(FieldStateInput {
            id: &id,
            value: &current_value,
            focus_signal: self.focus_signal,
        });
        let handle_focused = focus_handle.is_focused(window);
        if Self::reconcile_native_focus(&id, handle_focused, &current_value) {
            state = FieldState::resolve(FieldStateInput {
                id: &id,
                value: &current_value,
                focus_signal: self.focus_signal,
            });
        }

        let tokens = self.theme.components.field.clone();
        let wrapper_style =
            resolve_wrapper(&tokens, &self.metrics, state.focused, self.no_border);

        let mut wrapper = div()
            .flex()
            .flex_row()
            .items_center()
            .pt(px(self.metrics.wrapper_padding_y))
            .pb(px(self.metrics.wrapper_padding_y))
            .border_b(quantized_stroke_px(window, wrapper_style.border_width))
            .border_color(resolve_hsla(&self.theme, &wrapper_style.border_color));

        wrapper = wrapper.child(self.render_input_box(state, &focus_handle, window, cx));
        if self.password {
            wrapper = wrapper.child(self.render_toggle(state));
        }

        let label = self.render_label(state, &focus_handle);

        let container = div()
            .id(self.id.clone())
            .relative()
            .flex()
            .flex_col()
            .justify_center()
            .h(px(self.metrics.container_height))
            .bg(resolve_hsla(&self.theme, &tokens.bg))
            .child(wrapper)
            .child(label);

        refine_region(container, self.regions.container.as_ref())
    }
}
