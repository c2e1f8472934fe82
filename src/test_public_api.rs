use crate::components::{FloatingLabelInput, input_handle};
use crate::contracts::{ComponentThemeOverridable, Disableable, MotionAware};
use crate::motion::{MotionConfig, MotionLevel, SpringConfig};
use crate::style::{FieldMetrics, LabelPresetsPatch};
use crate::theme::{ColorValue, ComponentPatch, FieldPatch};

#[test]
fn builder_accepts_the_full_configuration_surface() {
    let _field = FloatingLabelInput::new("Email")
        .with_id("signup-email")
        .value("user@example.com")
        .focused(true)
        .password(false)
        .no_border(false)
        .label_presets(
            LabelPresetsPatch::new()
                .top_blurred(10.0)
                .font_size_focused(9.0)
                .color_focused(ColorValue::custom("#112233")),
        )
        .metrics(FieldMetrics::default())
        .container_style(gpui::StyleRefinement::default())
        .label_style(gpui::StyleRefinement::default())
        .input_style(gpui::StyleRefinement::default())
        .toggle_button_style(gpui::StyleRefinement::default())
        .toggle_icon_style(gpui::StyleRefinement::default())
        .max_length(64)
        .read_only(false)
        .disabled(false)
        .motion(
            MotionConfig::new()
                .level(MotionLevel::Full)
                .duration_ms(200)
                .spring(SpringConfig::default()),
        )
        .on_change(|_value, _window, _cx| {})
        .on_submit(|_window, _cx| {});
}

#[test]
fn password_builder_carries_the_toggle_configuration() {
    let _field = FloatingLabelInput::new("Password")
        .with_id("signup-password")
        .password(true)
        .custom_toggle_icon("/tmp/brand-eye.svg")
        .default_value("hunter2");
}

#[test]
fn theme_patch_surface_is_reachable_from_the_builder() {
    let _field = FloatingLabelInput::new("Nickname").with_theme_patch(ComponentPatch {
        field: FieldPatch {
            label_focused: Some(ColorValue::custom("#FF8800")),
            ..FieldPatch::default()
        },
    });
}

#[test]
fn handles_for_unmounted_fields_are_disconnected_no_ops() {
    let handle = input_handle("never-mounted-field");
    assert!(!handle.is_connected());
}
