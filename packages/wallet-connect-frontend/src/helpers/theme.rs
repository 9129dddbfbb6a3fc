use crate::{
    config::{PREFERS_DARK_QUERY, THEME_STORAGE_KEY},
    console::console_error,
};
use std::{cell::RefCell, rc::Rc};
use wallet_connect::{Theme, ThemeError, ThemePreference, ThemeStore};
use web_sys::{window, Storage};
use yew::prelude::*;

pub(crate) struct LocalStorageThemeStore {
    storage: Option<Storage>,
}

impl LocalStorageThemeStore {
    pub fn new() -> Self {
        let storage = window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }
}

impl ThemeStore for LocalStorageThemeStore {
    fn load(&self) -> Option<String> {
        self.storage.as_ref()?.get_item(THEME_STORAGE_KEY).ok().flatten()
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| ThemeError::Storage("localStorage unavailable".to_owned()))?;
        storage
            .set_item(THEME_STORAGE_KEY, theme.as_str())
            .map_err(|e| ThemeError::Storage(format!("{:?}", e)))
    }
}

fn prefers_dark() -> bool {
    window()
        .and_then(|w| w.match_media(PREFERS_DARK_QUERY).ok().flatten())
        .map_or(false, |query| query.matches())
}

/// Puts the theme name on `<html>` as a class, replacing the other one.
fn apply_theme(theme: Theme) {
    let Some(root) = window().and_then(|w| w.document()).and_then(|d| d.document_element()) else {
        return;
    };
    let classes = root.class_list();
    let res = classes.remove_2("light", "dark").and_then(|_| classes.add_1(theme.as_str()));
    if let Err(e) = res {
        console_error!("failed to apply theme: {:?}", e);
    }
}

pub(crate) struct ThemeState {
    pub theme: Theme,
    pub toggle: Callback<MouseEvent>,
}

#[hook]
pub(crate) fn use_theme() -> ThemeState {
    let preference: Rc<RefCell<ThemePreference<LocalStorageThemeStore>>> =
        use_mut_ref(|| ThemePreference::load(LocalStorageThemeStore::new(), prefers_dark()));
    let theme = {
        let preference = preference.clone();
        use_state(move || preference.borrow().theme())
    };

    use_effect_with_deps(
        |theme| {
            apply_theme(*theme);
            || ()
        },
        *theme,
    );

    let toggle = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            let mut preference = preference.borrow_mut();
            if let Err(e) = preference.toggle() {
                console_error!("failed to save theme: {}", e);
            }
            theme.set(preference.theme());
        })
    };

    ThemeState { theme: *theme, toggle }
}
