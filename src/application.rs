use crate::components::field_actions::ensure_field_keybindings;
use crate::provider::FloatProvider;
use crate::theme::Theme;

/// Thin wrapper over `gpui::Application` that performs the one-time
/// process-wide setup (provider install, key bindings) before any field
/// instance is constructed.
pub struct FloatApplication {
    application: gpui::Application,
    provider: FloatProvider,
}

impl Default for FloatApplication {
    fn default() -> Self {
        Self::new()
    }
}

impl FloatApplication {
    pub fn new() -> Self {
        Self {
            application: gpui::Application::new(),
            provider: FloatProvider::new(),
        }
    }

    pub fn headless() -> Self {
        Self {
            application: gpui::Application::headless(),
            provider: FloatProvider::new(),
        }
    }

    pub fn from_application(application: gpui::Application) -> Self {
        Self {
            application,
            provider: FloatProvider::new(),
        }
    }

    pub fn application(&self) -> &gpui::Application {
        &self.application
    }

    pub fn with_provider(mut self, provider: FloatProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn set_theme(mut self, configure: impl FnOnce(std::sync::Arc<Theme>) -> Theme) -> Self {
        self.provider = self.provider.set_theme(configure);
        self
    }

    pub fn run<F>(self, on_finish_launching: F)
    where
        F: 'static + FnOnce(&mut gpui::App),
    {
        let provider = self.provider;
        self.application.run(move |cx| {
            provider.install(cx);
            ensure_field_keybindings(cx);

            on_finish_launching(cx);
        });
    }
}
