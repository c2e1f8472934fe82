pub use crate::application::FloatApplication;
pub use crate::components::{FloatingLabelInput, InputHandle, input_handle};
pub use crate::contracts::{ComponentThemeOverridable, Disableable, MotionAware};
pub use crate::motion::{MotionConfig, MotionLevel, SpringConfig};
pub use crate::provider::FloatProvider;
pub use crate::style::{FieldMetrics, LabelPresetsPatch};
pub use crate::theme::{ColorScheme, ColorValue, ComponentPatch, FieldPatch, Theme, ThemePatch};
