use std::sync::{Arc, OnceLock};

use crate::theme::Theme;

/// Process-wide shared state: the theme every mounted field resolves
/// against. Installed once by [`crate::application::FloatApplication`].
#[derive(Clone, Default)]
pub struct FloatProvider {
    theme: Arc<Theme>,
}

impl gpui::Global for FloatProvider {}

impl FloatProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_theme(mut self, configure: impl FnOnce(Arc<Theme>) -> Theme) -> Self {
        self.theme = configure(self.theme).into();
        self
    }

    pub fn install(self, cx: &mut gpui::App) {
        cx.set_global(self);
    }

    pub fn theme(cx: &gpui::App) -> Arc<Theme> {
        cx.global::<FloatProvider>().theme.clone()
    }

    /// Theme lookup that tolerates a missing provider, so components render
    /// with stock defaults outside a `FloatApplication`.
    pub fn theme_arc_or_default(cx: &gpui::App) -> Arc<Theme> {
        cx.try_global::<FloatProvider>()
            .map(|provider| provider.theme.clone())
            .unwrap_or_else(default_theme_arc)
    }
}

fn default_theme_arc() -> Arc<Theme> {
    static DEFAULT: OnceLock<Arc<Theme>> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(Theme::default())).clone()
}
