use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::tokens::{ColorScale, PaletteCatalog, PaletteKey};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColorScheme {
    Light,
    Dark,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ColorValue {
    Palette { key: PaletteKey, shade: u8 },
    White,
    Black,
    Custom(String),
}

impl ColorValue {
    pub const fn palette(key: PaletteKey, shade: u8) -> Self {
        Self::Palette { key, shade }
    }

    pub fn custom(value: impl Into<String>) -> Self {
        Self::Custom(value.into())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SemanticColors {
    pub text_primary: ColorValue,
    pub text_muted: ColorValue,
    pub bg_canvas: ColorValue,
    pub border_subtle: ColorValue,
    pub focus_ring: ColorValue,
}

impl SemanticColors {
    pub fn defaults_for(primary: PaletteKey, scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self {
                text_primary: ColorValue::palette(PaletteKey::Dark, 9),
                text_muted: ColorValue::palette(PaletteKey::Gray, 6),
                bg_canvas: ColorValue::White,
                border_subtle: ColorValue::palette(PaletteKey::Gray, 3),
                focus_ring: ColorValue::palette(primary, 6),
            },
            ColorScheme::Dark => Self {
                text_primary: ColorValue::palette(PaletteKey::Gray, 0),
                text_muted: ColorValue::palette(PaletteKey::Gray, 5),
                bg_canvas: ColorValue::palette(PaletteKey::Dark, 9),
                border_subtle: ColorValue::palette(PaletteKey::Dark, 5),
                focus_ring: ColorValue::palette(primary, 5),
            },
        }
    }
}

/// Tokens for the floating-label field: label colors for both focus states,
/// the muted label used when the border is suppressed, and the wrapper
/// border pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldTokens {
    pub bg: ColorValue,
    pub input_fg: ColorValue,
    pub label_focused: ColorValue,
    pub label_blurred: ColorValue,
    pub label_muted: ColorValue,
    pub border: ColorValue,
    pub border_focus: ColorValue,
}

impl FieldTokens {
    pub fn defaults_for(_primary: PaletteKey, scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self {
                bg: ColorValue::custom("#00000000"),
                input_fg: ColorValue::custom("#000000"),
                label_focused: ColorValue::custom("#00B6E8"),
                label_blurred: ColorValue::custom("#7F7F7F"),
                label_muted: ColorValue::custom("#7F7F7F"),
                border: ColorValue::custom("#F2F2F2"),
                border_focus: ColorValue::custom("#00B6E8"),
            },
            ColorScheme::Dark => Self {
                bg: ColorValue::custom("#00000000"),
                input_fg: ColorValue::palette(PaletteKey::Gray, 0),
                label_focused: ColorValue::custom("#00B6E8"),
                label_blurred: ColorValue::palette(PaletteKey::Gray, 5),
                label_muted: ColorValue::palette(PaletteKey::Gray, 5),
                border: ColorValue::palette(PaletteKey::Dark, 5),
                border_focus: ColorValue::custom("#00B6E8"),
            },
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComponentTokens {
    pub field: FieldTokens,
}

impl ComponentTokens {
    pub fn defaults_for(primary: PaletteKey, scheme: ColorScheme) -> Self {
        Self {
            field: FieldTokens::defaults_for(primary, scheme),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Theme {
    pub white: &'static str,
    pub black: &'static str,
    pub primary_color: PaletteKey,
    pub color_scheme: ColorScheme,
    pub palette: BTreeMap<PaletteKey, ColorScale>,
    pub semantic: SemanticColors,
    pub components: ComponentTokens,
}

impl Default for Theme {
    fn default() -> Self {
        let primary = PaletteKey::Cyan;
        Self {
            white: "#fff",
            black: "#000",
            primary_color: primary,
            color_scheme: ColorScheme::Light,
            palette: PaletteCatalog::store(),
            semantic: SemanticColors::defaults_for(primary, ColorScheme::Light),
            components: ComponentTokens::defaults_for(primary, ColorScheme::Light),
        }
    }
}

impl Theme {
    pub fn with_primary_color(mut self, primary: PaletteKey) -> Self {
        self.primary_color = primary;
        self.semantic = SemanticColors::defaults_for(primary, self.color_scheme);
        self.components = ComponentTokens::defaults_for(primary, self.color_scheme);
        self
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self.semantic = SemanticColors::defaults_for(self.primary_color, scheme);
        self.components = ComponentTokens::defaults_for(self.primary_color, scheme);
        self
    }

    pub fn with_palette_override(mut self, key: PaletteKey, scale: ColorScale) -> Self {
        self.palette.insert(key, scale);
        self
    }

    pub fn resolve_color(&self, token: &ColorValue) -> String {
        match token {
            ColorValue::Palette { key, shade } => self
                .palette
                .get(key)
                .and_then(|scale| scale.get(*shade as usize))
                .unwrap_or(&self.black)
                .to_string(),
            ColorValue::White => self.white.to_string(),
            ColorValue::Black => self.black.to_string(),
            ColorValue::Custom(value) => value.clone(),
        }
    }

    pub fn resolve_hsla(&self, token: &ColorValue) -> gpui::Hsla {
        let raw = self.resolve_color(token);
        gpui::Rgba::try_from(raw.as_str())
            .map(Into::into)
            .unwrap_or_else(|_| gpui::black())
    }

    pub fn merged(&self, patch: &ThemePatch) -> Self {
        let mut next = self.clone();
        if let Some(primary) = patch.primary_color {
            next = next.with_primary_color(primary);
        }
        if let Some(color_scheme) = patch.color_scheme {
            next = next.with_color_scheme(color_scheme);
        }
        for (key, value) in &patch.palette_overrides {
            next.palette.insert(*key, *value);
        }
        next.semantic = patch.semantic.apply(next.semantic);
        next.components = patch.components.apply(next.components);
        next
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SemanticPatch {
    pub text_primary: Option<ColorValue>,
    pub text_muted: Option<ColorValue>,
    pub bg_canvas: Option<ColorValue>,
    pub border_subtle: Option<ColorValue>,
    pub focus_ring: Option<ColorValue>,
}

impl SemanticPatch {
    pub fn apply(&self, mut base: SemanticColors) -> SemanticColors {
        if let Some(value) = &self.text_primary {
            base.text_primary = value.clone();
        }
        if let Some(value) = &self.text_muted {
            base.text_muted = value.clone();
        }
        if let Some(value) = &self.bg_canvas {
            base.bg_canvas = value.clone();
        }
        if let Some(value) = &self.border_subtle {
            base.border_subtle = value.clone();
        }
        if let Some(value) = &self.focus_ring {
            base.focus_ring = value.clone();
        }
        base
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldPatch {
    pub bg: Option<ColorValue>,
    pub input_fg: Option<ColorValue>,
    pub label_focused: Option<ColorValue>,
    pub label_blurred: Option<ColorValue>,
    pub label_muted: Option<ColorValue>,
    pub border: Option<ColorValue>,
    pub border_focus: Option<ColorValue>,
}

impl FieldPatch {
    pub fn apply(&self, mut base: FieldTokens) -> FieldTokens {
        if let Some(value) = &self.bg {
            base.bg = value.clone();
        }
        if let Some(value) = &self.input_fg {
            base.input_fg = value.clone();
        }
        if let Some(value) = &self.label_focused {
            base.label_focused = value.clone();
        }
        if let Some(value) = &self.label_blurred {
            base.label_blurred = value.clone();
        }
        if let Some(value) = &self.label_muted {
            base.label_muted = value.clone();
        }
        if let Some(value) = &self.border {
            base.border = value.clone();
        }
        if let Some(value) = &self.border_focus {
            base.border_focus = value.clone();
        }
        base
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ComponentPatch {
    pub field: FieldPatch,
}

impl ComponentPatch {
    pub fn apply(&self, mut base: ComponentTokens) -> ComponentTokens {
        base.field = self.field.apply(base.field);
        base
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ThemePatch {
    pub primary_color: Option<PaletteKey>,
    pub color_scheme: Option<ColorScheme>,
    pub palette_overrides: BTreeMap<PaletteKey, ColorScale>,
    pub semantic: SemanticPatch,
    pub components: ComponentPatch,
}

/// Per-component view of the theme. Resolves against the provider at render
/// time; an optional component patch is merged on top of the shared theme.
#[derive(Clone, Default)]
pub struct LocalTheme {
    resolved: Option<Arc<Theme>>,
    component_patch: Option<ComponentPatch>,
}

impl LocalTheme {
    pub fn with_component_patch(mut self, patch: ComponentPatch) -> Self {
        self.component_patch = Some(patch);
        self
    }

    pub fn set_component_patch(&mut self, patch: Option<ComponentPatch>) {
        self.component_patch = patch;
        self.resolved = None;
    }

    pub fn sync_from_provider(&mut self, cx: &gpui::App) {
        let base = crate::provider::FloatProvider::theme_arc_or_default(cx);
        if let Some(component_patch) = &self.component_patch {
            let mut merged = base.as_ref().clone();
            merged.components = component_patch.apply(merged.components);
            self.resolved = Some(Arc::new(merged));
        } else {
            self.resolved = Some(base);
        }
    }

    fn fallback_theme() -> &'static Theme {
        static FALLBACK: OnceLock<Theme> = OnceLock::new();
        FALLBACK.get_or_init(Theme::default)
    }
}

impl std::ops::Deref for LocalTheme {
    type Target = Theme;

    fn deref(&self) -> &Self::Target {
        if let Some(resolved) = self.resolved.as_deref() {
            resolved
        } else {
            Self::fallback_theme()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::COLOR_STOPS;

    #[test]
    fn default_theme_uses_cyan_as_primary_color() {
        let theme = Theme::default();
        assert_eq!(theme.primary_color, PaletteKey::Cyan);
        assert_eq!(theme.color_scheme, ColorScheme::Light);
    }

    #[test]
    fn default_palette_is_complete() {
        let theme = Theme::default();
        assert_eq!(theme.palette.len(), 4);
        assert_eq!(theme.palette[&PaletteKey::Cyan].len(), COLOR_STOPS);
    }

    #[test]
    fn light_field_tokens_carry_the_stock_accent_and_border_colors() {
        let theme = Theme::default();
        let field = &theme.components.field;
        assert_eq!(theme.resolve_color(&field.label_focused), "#00B6E8");
        assert_eq!(theme.resolve_color(&field.label_blurred), "#7F7F7F");
        assert_eq!(theme.resolve_color(&field.border), "#F2F2F2");
        assert_eq!(theme.resolve_color(&field.border_focus), "#00B6E8");
    }

    #[test]
    fn nested_theme_patch_overrides_only_target_fields() {
        let base = Theme::default();
        let patch = ThemePatch {
            components: ComponentPatch {
                field: FieldPatch {
                    label_focused: Some(ColorValue::palette(PaletteKey::Blue, 8)),
                    ..FieldPatch::default()
                },
            },
            ..ThemePatch::default()
        };
        let next = base.merged(&patch);
        assert_eq!(
            next.resolve_color(&next.components.field.label_focused),
            base.palette[&PaletteKey::Blue][8]
        );
        assert_eq!(
            next.resolve_color(&next.components.field.label_blurred),
            base.resolve_color(&base.components.field.label_blurred)
        );
    }

    #[test]
    fn color_scheme_switch_recomputes_semantic_and_field_tokens() {
        let light = Theme::default().with_color_scheme(ColorScheme::Light);
        let dark = Theme::default().with_color_scheme(ColorScheme::Dark);

        assert_ne!(light.semantic.bg_canvas, dark.semantic.bg_canvas);
        assert_ne!(light.components.field.input_fg, dark.components.field.input_fg);
        assert_ne!(light.components.field.border, dark.components.field.border);
    }

    #[test]
    fn local_theme_falls_back_to_defaults_before_provider_sync() {
        let local = LocalTheme::default();
        assert_eq!(local.primary_color, PaletteKey::Cyan);
    }
}
