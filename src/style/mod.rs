use crate::theme::{ColorValue, FieldTokens};

/// Fixed geometry of the field, matching the stock style sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldMetrics {
    pub container_height: f32,
    pub wrapper_padding_y: f32,
    pub border_width: f32,
    pub input_left_nudge: f32,
    pub toggle_icon_size: f32,
    pub toggle_margin_right: f32,
}

impl Default for FieldMetrics {
    fn default() -> Self {
        Self {
            container_height: 45.0,
            wrapper_padding_y: 5.0,
            border_width: 1.0,
            input_left_nudge: -3.0,
            toggle_icon_size: 20.0,
            toggle_margin_right: 15.0,
        }
    }
}

/// Position, size and color of the floating label in one focus state.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPreset {
    pub left: f32,
    pub top: f32,
    pub font_size: f32,
    pub color: ColorValue,
}

/// The preset pair the label animates between.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPresets {
    pub focused: LabelPreset,
    pub blurred: LabelPreset,
}

impl LabelPresets {
    pub fn from_tokens(tokens: &FieldTokens) -> Self {
        Self {
            focused: LabelPreset {
                left: 0.0,
                top: -3.0,
                font_size: 10.0,
                color: tokens.label_focused.clone(),
            },
            blurred: LabelPreset {
                left: 0.0,
                top: 12.5,
                font_size: 14.0,
                color: tokens.label_blurred.clone(),
            },
        }
    }

    pub fn merged(&self, patch: &LabelPresetsPatch) -> Self {
        Self {
            focused: patch.focused.apply(self.focused.clone()),
            blurred: patch.blurred.apply(self.blurred.clone()),
        }
    }

    pub fn select(&self, focused: bool) -> &LabelPreset {
        if focused { &self.focused } else { &self.blurred }
    }
}

/// Per-field override of one label preset. Unset fields keep the computed
/// default, so overriding the focused color touches nothing else.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelPresetPatch {
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub font_size: Option<f32>,
    pub color: Option<ColorValue>,
}

impl LabelPresetPatch {
    pub fn apply(&self, mut base: LabelPreset) -> LabelPreset {
        if let Some(left) = self.left {
            base.left = left;
        }
        if let Some(top) = self.top {
            base.top = top;
        }
        if let Some(font_size) = self.font_size {
            base.font_size = font_size;
        }
        if let Some(color) = &self.color {
            base.color = color.clone();
        }
        base
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelPresetsPatch {
    pub focused: LabelPresetPatch,
    pub blurred: LabelPresetPatch,
}

impl LabelPresetsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left_focused(mut self, value: f32) -> Self {
        self.focused.left = Some(value);
        self
    }

    pub fn left_blurred(mut self, value: f32) -> Self {
        self.blurred.left = Some(value);
        self
    }

    pub fn top_focused(mut self, value: f32) -> Self {
        self.focused.top = Some(value);
        self
    }

    pub fn top_blurred(mut self, value: f32) -> Self {
        self.blurred.top = Some(value);
        self
    }

    pub fn font_size_focused(mut self, value: f32) -> Self {
        self.focused.font_size = Some(value);
        self
    }

    pub fn font_size_blurred(mut self, value: f32) -> Self {
        self.blurred.font_size = Some(value);
        self
    }

    pub fn color_focused(mut self, value: ColorValue) -> Self {
        self.focused.color = Some(value);
        self
    }

    pub fn color_blurred(mut self, value: ColorValue) -> Self {
        self.blurred.color = Some(value);
        self
    }
}

/// Resolved wrapper chrome: bottom border width and color.
#[derive(Clone, Debug, PartialEq)]
pub struct WrapperStyle {
    pub border_width: f32,
    pub border_color: ColorValue,
}

/// Border layer: the no-border flag wins over the focus-state pair.
pub fn resolve_wrapper(
    tokens: &FieldTokens,
    metrics: &FieldMetrics,
    focused: bool,
    no_border: bool,
) -> WrapperStyle {
    let border_color = if focused {
        tokens.border_focus.clone()
    } else {
        tokens.border.clone()
    };
    WrapperStyle {
        border_width: if no_border { 0.0 } else { metrics.border_width },
        border_color,
    }
}

/// Label layer: preset pair, patched per field, selected by focus state.
/// Suppressing the border also forces the muted label color in both states.
pub fn resolve_label(
    presets: &LabelPresets,
    tokens: &FieldTokens,
    focused: bool,
    no_border: bool,
) -> LabelPreset {
    let mut resolved = presets.select(focused).clone();
    if no_border {
        resolved.color = tokens.label_muted.clone();
    }
    resolved
}

/// Final merge step for one visual region: the caller refinement always wins
/// over computed values.
pub fn refine_region<T: gpui::Styled>(
    mut element: T,
    refinement: Option<&gpui::StyleRefinement>,
) -> T {
    if let Some(refinement) = refinement {
        gpui::Refineable::refine(gpui::Styled::style(&mut element), refinement);
    }
    element
}

/// Caller-supplied raw refinements, one per visual region, applied as the
/// last merge step each.
#[derive(Clone, Default)]
pub struct RegionOverrides {
    pub container: Option<gpui::StyleRefinement>,
    pub label: Option<gpui::StyleRefinement>,
    pub input: Option<gpui::StyleRefinement>,
    pub toggle_button: Option<gpui::StyleRefinement>,
    pub toggle_icon: Option<gpui::StyleRefinement>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    fn stock_presets() -> (LabelPresets, FieldTokens) {
        let theme = Theme::default();
        let tokens = theme.components.field.clone();
        (LabelPresets::from_tokens(&tokens), tokens)
    }

    #[test]
    fn stock_presets_match_the_fixed_style_sheet() {
        let (presets, _) = stock_presets();
        assert_eq!(presets.focused.top, -3.0);
        assert_eq!(presets.focused.font_size, 10.0);
        assert_eq!(presets.blurred.top, 12.5);
        assert_eq!(presets.blurred.font_size, 14.0);
    }

    #[test]
    fn preset_patch_changes_only_the_patched_field() {
        let (presets, _) = stock_presets();
        let patched = presets.merged(&LabelPresetsPatch::new().top_blurred(10.0));
        assert_eq!(patched.blurred.top, 10.0);
        assert_eq!(patched.blurred.font_size, presets.blurred.font_size);
        assert_eq!(patched.blurred.color, presets.blurred.color);
        assert_eq!(patched.focused, presets.focused);
    }

    #[test]
    fn color_patch_does_not_leak_across_focus_states() {
        let (presets, _) = stock_presets();
        let custom = ColorValue::custom("#112233");
        let patched = presets.merged(&LabelPresetsPatch::new().color_focused(custom.clone()));
        assert_eq!(patched.focused.color, custom);
        assert_eq!(patched.blurred.color, presets.blurred.color);
    }

    #[test]
    fn wrapper_border_follows_focus_state() {
        let (_, tokens) = stock_presets();
        let metrics = FieldMetrics::default();
        let focused = resolve_wrapper(&tokens, &metrics, true, false);
        let blurred = resolve_wrapper(&tokens, &metrics, false, false);
        assert_eq!(focused.border_width, 1.0);
        assert_eq!(focused.border_color, tokens.border_focus);
        assert_eq!(blurred.border_color, tokens.border);
    }

    #[test]
    fn no_border_zeroes_the_border_and_mutes_the_label_in_both_states() {
        let (presets, tokens) = stock_presets();
        let metrics = FieldMetrics::default();
        for focused in [true, false] {
            let wrapper = resolve_wrapper(&tokens, &metrics, focused, true);
            assert_eq!(wrapper.border_width, 0.0);
            let label = resolve_label(&presets, &tokens, focused, true);
            assert_eq!(label.color, tokens.label_muted);
        }
    }

    #[test]
    fn label_resolution_selects_by_focus_state() {
        let (presets, tokens) = stock_presets();
        let focused = resolve_label(&presets, &tokens, true, false);
        let blurred = resolve_label(&presets, &tokens, false, false);
        assert_eq!(focused, presets.focused);
        assert_eq!(blurred, presets.blurred);
    }
}
