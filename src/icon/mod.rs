use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use rust_embed::RustEmbed;

use crate::theme::ColorScheme;

/// Stock asset stem for one {scheme, secure-text} combination. The icon
/// names the action the toggle performs, so a hidden value shows the
/// "make visible" glyph.
pub fn toggle_icon_name(scheme: ColorScheme, secure_hidden: bool) -> &'static str {
    match (scheme, secure_hidden) {
        (ColorScheme::Dark, true) => "make-visible-black",
        (ColorScheme::Dark, false) => "make-invisible-black",
        (ColorScheme::Light, true) => "make-visible-white",
        (ColorScheme::Light, false) => "make-invisible-white",
    }
}

/// Path of the toggle icon to render. A caller-supplied custom icon wins for
/// BOTH secure-text states; the stock table only applies without one.
pub fn resolve_toggle_icon(
    scheme: ColorScheme,
    secure_hidden: bool,
    custom: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(custom) = custom {
        return Some(custom.to_path_buf());
    }
    let name = toggle_icon_name(scheme, secure_hidden);
    assets_root().map(|root| root.join(format!("{name}.svg")))
}

fn assets_root() -> Option<PathBuf> {
    static ROOT: OnceLock<Option<PathBuf>> = OnceLock::new();
    ROOT.get_or_init(extract_embedded_assets).clone()
}

fn extract_embedded_assets() -> Option<PathBuf> {
    let root = std::env::temp_dir()
        .join("floatlabel-icons")
        .join(env!("CARGO_PKG_VERSION"))
        .join("visibility");
    let marker = root.join(".extract-ready");

    if marker.exists() && embedded_assets_are_complete(&root) {
        return Some(root);
    }

    let _ = fs::remove_dir_all(&root);
    if fs::create_dir_all(&root).is_err() {
        return None;
    }

    for relative in EmbeddedVisibilityIcons::iter() {
        let relative = relative.as_ref();
        let Some(safe_relative) = sanitize_relative_path(relative) else {
            continue;
        };
        let Some(content) = EmbeddedVisibilityIcons::get(relative) else {
            continue;
        };

        let destination = root.join(safe_relative);
        if let Some(parent) = destination.parent() {
            if fs::create_dir_all(parent).is_err() {
                return None;
            }
        }
        if fs::write(destination, content.data.as_ref()).is_err() {
            return None;
        }
    }

    if fs::write(marker, b"ok").is_err() {
        return None;
    }
    Some(root)
}

fn embedded_assets_are_complete(root: &Path) -> bool {
    EmbeddedVisibilityIcons::iter().all(|relative| {
        let relative = relative.as_ref();
        let Some(safe_relative) = sanitize_relative_path(relative) else {
            return false;
        };
        root.join(safe_relative).is_file()
    })
}

fn sanitize_relative_path(input: &str) -> Option<PathBuf> {
    let mut output = PathBuf::new();
    for component in Path::new(input).components() {
        match component {
            Component::Normal(value) => output.push(value),
            _ => return None,
        }
    }
    Some(output)
}

#[derive(RustEmbed)]
#[folder = "assets/icons/visibility"]
struct EmbeddedVisibilityIcons;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_table_covers_all_four_combinations() {
        assert_eq!(
            toggle_icon_name(ColorScheme::Dark, true),
            "make-visible-black"
        );
        assert_eq!(
            toggle_icon_name(ColorScheme::Dark, false),
            "make-invisible-black"
        );
        assert_eq!(
            toggle_icon_name(ColorScheme::Light, true),
            "make-visible-white"
        );
        assert_eq!(
            toggle_icon_name(ColorScheme::Light, false),
            "make-invisible-white"
        );
    }

    #[test]
    fn stock_assets_extract_and_resolve() {
        for (scheme, hidden) in [
            (ColorScheme::Dark, true),
            (ColorScheme::Dark, false),
            (ColorScheme::Light, true),
            (ColorScheme::Light, false),
        ] {
            let path = resolve_toggle_icon(scheme, hidden, None)
                .expect("stock icon should be resolvable");
            assert!(path.is_file(), "missing {}", path.display());
        }
    }

    #[test]
    fn custom_icon_wins_for_both_secure_text_states() {
        let custom = PathBuf::from("/tmp/brand-eye.svg");
        for hidden in [true, false] {
            let resolved = resolve_toggle_icon(ColorScheme::Light, hidden, Some(&custom));
            assert_eq!(resolved.as_deref(), Some(custom.as_path()));
        }
    }
}
