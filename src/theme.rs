use std::rc::Rc;

use crate::dom::ElementHandle;
use crate::schedule::{Scheduler, TransitionClock};
use crate::storage::PreferenceStore;

pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const TRANSITION_CLASS: &str = "theme-transition";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub type ThemeListener = Box<dyn Fn(Theme)>;

pub struct ThemeController<E: ElementHandle> {
    root: E,
    store: Box<dyn PreferenceStore>,
    storage_key: String,
    current: Theme,
    listeners: Vec<ThemeListener>,
}

impl<E: ElementHandle> ThemeController<E> {
    pub fn new(
        root: E,
        store: Box<dyn PreferenceStore>,
        storage_key: impl Into<String>,
        system_prefers_dark: bool,
    ) -> Self {
        let storage_key = storage_key.into();
        let current = stored_theme(store.as_ref(), &storage_key)
            .unwrap_or_else(|| Theme::from_system(system_prefers_dark));
        let controller = Self {
            root,
            store,
            storage_key,
            current,
            listeners: Vec::new(),
        };
        controller.apply();
        controller
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn subscribe(&mut self, listener: ThemeListener) {
        self.listeners.push(listener);
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.set(next);
        next
    }

    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        self.apply();
        if let Err(err) = self.store.set(&self.storage_key, theme.as_str()) {
            tracing::debug!("theme: {err}, preference kept for this page only");
        }
        self.notify();
    }

    pub fn on_system_change(&mut self, prefers_dark: bool) -> bool {
        if stored_theme(self.store.as_ref(), &self.storage_key).is_some() {
            return false;
        }
        let theme = Theme::from_system(prefers_dark);
        if theme == self.current {
            return false;
        }
        self.current = theme;
        self.apply();
        self.notify();
        true
    }

    fn apply(&self) {
        tracing::debug!("theme: applying {}", self.current.as_str());
        self.root.set_attribute(THEME_ATTRIBUTE, self.current.as_str());
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(self.current);
        }
    }
}

fn stored_theme(store: &dyn PreferenceStore, key: &str) -> Option<Theme> {
    store.get(key).as_deref().and_then(Theme::parse)
}

pub struct ThemeTransition<E: ElementHandle> {
    root: E,
    scheduler: Rc<dyn Scheduler>,
    clock: TransitionClock,
    duration_ms: u32,
}

impl<E: ElementHandle> ThemeTransition<E> {
    pub fn new(root: E, scheduler: Rc<dyn Scheduler>, duration_ms: u32) -> Self {
        Self {
            root,
            scheduler,
            clock: TransitionClock::default(),
            duration_ms,
        }
    }

    pub fn run(&self) {
        self.root.add_class(TRANSITION_CLASS);
        let token = self.clock.advance();
        let root = self.root.clone();
        self.scheduler.defer(
            self.duration_ms,
            Box::new(move || {
                if token.is_current() {
                    root.remove_class(TRANSITION_CLASS);
                }
            }),
        );
    }
}

pub fn is_toggle_shortcut(key: &str, ctrl: bool, meta: bool, shift: bool) -> bool {
    (ctrl || meta) && shift && key.eq_ignore_ascii_case("d")
}
