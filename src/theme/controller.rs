//! Theme resolution and toggling.

use super::{Theme, ThemeError, ThemeStore};

/// Callback run whenever a theme is applied.
type ThemeListener = Box<dyn FnMut(Theme)>;

/// Single authority for the active theme.
///
/// Precedence: an explicitly stored theme wins; otherwise the system color
/// scheme decides. Applying a theme notifies every subscribed listener, which
/// is how the page gets updated.
pub struct ThemeController<S: ThemeStore> {
    store: S,
    system_prefers_dark: bool,
    current: Theme,
    listeners: Vec<ThemeListener>,
}

impl<S: ThemeStore> ThemeController<S> {
    /// Creates a controller whose current theme is the preferred one.
    ///
    /// Nothing is applied until [`apply_preferred`](Self::apply_preferred).
    pub fn new(store: S, system_prefers_dark: bool) -> Self {
        let mut controller = Self {
            store,
            system_prefers_dark,
            current: Theme::from_system(system_prefers_dark),
            listeners: Vec::new(),
        };
        controller.current = controller.preferred_theme();
        controller
    }

    /// Registers a listener called with each applied theme.
    pub fn subscribe(&mut self, listener: impl FnMut(Theme) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The raw stored value, whether or not it names a known theme.
    fn stored_value(&self) -> Option<String> {
        match self.store.load() {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read theme preference: {}", e);
                None
            }
        }
    }

    /// The stored theme, if one is stored and readable.
    pub fn stored_theme(&self) -> Option<Theme> {
        let raw = self.stored_value()?;

        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                log::warn!("Ignoring stored theme: {}", e);
                None
            }
        }
    }

    /// Stored theme, falling back to the system color scheme.
    pub fn preferred_theme(&self) -> Theme {
        self.stored_theme()
            .unwrap_or_else(|| Theme::from_system(self.system_prefers_dark))
    }

    pub fn get_theme(&self) -> Theme {
        self.current
    }

    /// Applies the preferred theme without persisting it.
    pub fn apply_preferred(&mut self) -> Theme {
        let theme = self.preferred_theme();
        self.apply(theme);
        theme
    }

    /// Applies and persists `theme`.
    ///
    /// The theme is applied even when persisting fails.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), ThemeError> {
        self.apply(theme);
        self.store.save(theme.as_str())?;
        log::info!("Theme set to {}", theme);
        Ok(())
    }

    /// Switches to the opposite of the stored (or preferred) theme and
    /// persists the result.
    ///
    /// An unrecognised stored value counts as "not light", so it toggles to
    /// [`Theme::Light`].
    pub fn toggle(&mut self) -> Result<Theme, ThemeError> {
        let next = match self.stored_value() {
            Some(raw) => raw.parse::<Theme>().map_or(Theme::Light, |t| t.toggled()),
            None => self.preferred_theme().toggled(),
        };
        self.set_theme(next)?;
        Ok(next)
    }

    /// Handles a change of the system color scheme.
    ///
    /// Follows the system only while nothing is stored; any stored value,
    /// even one that fails to parse, takes precedence. Returns the applied
    /// theme, or `None` when the stored value wins.
    pub fn on_system_theme_change(&mut self, prefers_dark: bool) -> Option<Theme> {
        self.system_prefers_dark = prefers_dark;
        if self.stored_value().is_some() {
            log::debug!("System theme changed; keeping stored preference");
            return None;
        }

        let theme = Theme::from_system(prefers_dark);
        self.apply(theme);
        Some(theme)
    }

    fn apply(&mut self, theme: Theme) {
        self.current = theme;
        for listener in &mut self.listeners {
            listener(theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::MemoryThemeStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store whose reads and writes always fail.
    struct BrokenStore;

    impl ThemeStore for BrokenStore {
        fn load(&self) -> Result<Option<String>, ThemeError> {
            Err(ThemeError::StorageUnavailable)
        }

        fn save(&self, _value: &str) -> Result<(), ThemeError> {
            Err(ThemeError::StorageUnavailable)
        }
    }

    fn recorded(controller: &mut ThemeController<MemoryThemeStore>) -> Rc<RefCell<Vec<Theme>>> {
        let applied = Rc::new(RefCell::new(Vec::new()));
        let sink = applied.clone();
        controller.subscribe(move |theme| sink.borrow_mut().push(theme));
        applied
    }

    #[test]
    fn test_system_preference_when_nothing_stored() {
        let controller = ThemeController::new(MemoryThemeStore::new(), true);
        assert_eq!(controller.preferred_theme(), Theme::Dark);
        assert_eq!(controller.get_theme(), Theme::Dark);

        let controller = ThemeController::new(MemoryThemeStore::new(), false);
        assert_eq!(controller.get_theme(), Theme::Light);
    }

    #[test]
    fn test_stored_preference_wins() {
        let controller = ThemeController::new(MemoryThemeStore::with_value("light"), true);
        assert_eq!(controller.preferred_theme(), Theme::Light);
    }

    #[test]
    fn test_corrupt_stored_value_is_ignored() {
        let controller = ThemeController::new(MemoryThemeStore::with_value("sepia"), true);
        assert_eq!(controller.stored_theme(), None);
        assert_eq!(controller.preferred_theme(), Theme::Dark);
    }

    #[test]
    fn test_apply_preferred_does_not_persist() {
        let store = MemoryThemeStore::new();
        let mut controller = ThemeController::new(store.clone(), true);
        let applied = recorded(&mut controller);

        assert_eq!(controller.apply_preferred(), Theme::Dark);
        assert_eq!(*applied.borrow(), vec![Theme::Dark]);
        assert_eq!(store.load(), Ok(None));
    }

    #[test]
    fn test_toggle_persists() {
        let store = MemoryThemeStore::new();
        let mut controller = ThemeController::new(store.clone(), false);
        let applied = recorded(&mut controller);

        assert_eq!(controller.toggle(), Ok(Theme::Dark));
        assert_eq!(store.load(), Ok(Some("dark".to_string())));
        assert_eq!(controller.toggle(), Ok(Theme::Light));
        assert_eq!(store.load(), Ok(Some("light".to_string())));
        assert_eq!(*applied.borrow(), vec![Theme::Dark, Theme::Light]);
        assert_eq!(controller.get_theme(), Theme::Light);
    }

    #[test]
    fn test_system_change_followed_without_stored_theme() {
        let mut controller = ThemeController::new(MemoryThemeStore::new(), false);
        let applied = recorded(&mut controller);

        assert_eq!(controller.on_system_theme_change(true), Some(Theme::Dark));
        assert_eq!(controller.get_theme(), Theme::Dark);
        assert_eq!(*applied.borrow(), vec![Theme::Dark]);
    }

    #[test]
    fn test_system_change_ignored_with_stored_theme() {
        let mut controller = ThemeController::new(MemoryThemeStore::with_value("light"), false);
        let applied = recorded(&mut controller);

        assert_eq!(controller.on_system_theme_change(true), None);
        assert_eq!(controller.get_theme(), Theme::Light);
        assert!(applied.borrow().is_empty());
    }

    #[test]
    fn test_unparseable_stored_value_blocks_system_change() {
        let mut controller = ThemeController::new(MemoryThemeStore::with_value("sepia"), false);
        let applied = recorded(&mut controller);

        assert_eq!(controller.on_system_theme_change(true), None);
        assert_eq!(controller.get_theme(), Theme::Light);
        assert!(applied.borrow().is_empty());
    }

    #[test]
    fn test_toggle_from_unparseable_stored_value() {
        let store = MemoryThemeStore::with_value("sepia");
        let mut controller = ThemeController::new(store.clone(), true);

        assert_eq!(controller.toggle(), Ok(Theme::Light));
        assert_eq!(store.load(), Ok(Some("light".to_string())));
    }

    #[test]
    fn test_set_theme_applies_even_if_save_fails() {
        let mut controller = ThemeController::new(BrokenStore, false);
        assert_eq!(
            controller.set_theme(Theme::Dark),
            Err(ThemeError::StorageUnavailable)
        );
        assert_eq!(controller.get_theme(), Theme::Dark);
    }
}
