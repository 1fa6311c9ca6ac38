//! Page integration for the theme controller on WASM targets.
//!
//! The toggle button is expected in the markup; it is never created here.
//! Call [`install`] once the document has loaded.

use super::{LocalStorageThemeStore, Theme, ThemeController, ThemeError, ToggleAppearance};
use crate::config::ThemeConfig;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, MediaQueryList, MediaQueryListEvent};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Shared handle to the page's theme controller.
pub type SharedThemeController = Rc<RefCell<ThemeController<LocalStorageThemeStore>>>;

/// Applies the preferred theme and wires the toggle button and the system
/// color-scheme listener.
pub fn install(config: ThemeConfig) -> Result<SharedThemeController, ThemeError> {
    let window = web_sys::window().ok_or_else(|| ThemeError::Dom("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| ThemeError::Dom("no document".to_string()))?;

    let media = match window.match_media(DARK_SCHEME_QUERY) {
        Ok(media) => media,
        Err(e) => {
            log::warn!("matchMedia failed: {:?}", e);
            None
        }
    };
    let prefers_dark = media.as_ref().map(MediaQueryList::matches).unwrap_or(false);

    let store = LocalStorageThemeStore::new(config.storage_key.clone());
    let controller = Rc::new(RefCell::new(ThemeController::new(store, prefers_dark)));

    {
        let document = document.clone();
        let config = config.clone();
        controller
            .borrow_mut()
            .subscribe(move |theme| reflect_theme(&document, &config, theme));
    }

    let initial = controller.borrow_mut().apply_preferred();
    log::info!("Initial theme: {}", initial);

    register_toggle(&document, &config, &controller)?;
    if let Some(media) = media {
        register_system_listener(&media, &controller)?;
    }

    Ok(controller)
}

/// Writes the theme attribute on `<html>` and refreshes the toggle button.
fn reflect_theme(document: &Document, config: &ThemeConfig, theme: Theme) {
    if let Some(root) = document.document_element() {
        if let Err(e) = root.set_attribute(&config.theme_attribute, theme.as_str()) {
            log::warn!("Failed to set {}: {:?}", config.theme_attribute, e);
        }
    }

    let Ok(Some(toggle)) = document.query_selector(&config.toggle_selector) else {
        return;
    };

    let appearance = ToggleAppearance::for_theme(theme);
    if let Err(e) = toggle.set_attribute("data-theme-current", appearance.current) {
        log::warn!("Failed to update theme toggle: {:?}", e);
    }
    if let Ok(Some(icon)) = toggle.query_selector("[data-theme-icon]") {
        icon.set_class_name(appearance.icon_class);
    }
    if let Ok(Some(label)) = toggle.query_selector("[data-theme-label]") {
        label.set_text_content(Some(appearance.label));
    }
}

fn register_toggle(
    document: &Document,
    config: &ThemeConfig,
    controller: &SharedThemeController,
) -> Result<(), ThemeError> {
    let Ok(Some(toggle)) = document.query_selector(&config.toggle_selector) else {
        log::debug!("No theme toggle matching {}", config.toggle_selector);
        return Ok(());
    };

    let controller = controller.clone();
    let onclick = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if let Err(e) = controller.borrow_mut().toggle() {
            log::warn!("Failed to persist theme: {}", e);
        }
    }) as Box<dyn FnMut(_)>);

    toggle
        .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())
        .map_err(|e| ThemeError::Dom(format!("{:?}", e)))?;
    // The listener lives for the rest of the page session
    onclick.forget();
    Ok(())
}

fn register_system_listener(
    media: &MediaQueryList,
    controller: &SharedThemeController,
) -> Result<(), ThemeError> {
    let controller = controller.clone();
    let onchange = Closure::wrap(Box::new(move |event: MediaQueryListEvent| {
        controller
            .borrow_mut()
            .on_system_theme_change(event.matches());
    }) as Box<dyn FnMut(_)>);

    media
        .add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())
        .map_err(|e| ThemeError::Dom(format!("{:?}", e)))?;
    onchange.forget();
    Ok(())
}
