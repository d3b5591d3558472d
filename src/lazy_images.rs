use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::ElementHandle;

pub const LAZY_TARGETS: &str = ".family-image, .place-image, .trip-photo img";
pub const DEFERRED_SRC: &str = "data-src";
pub const DEFERRED_BG: &str = "data-bg";
pub const LOADED_CLASS: &str = "loaded";

static BACKGROUND_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url\(\s*['"]?(.*?)['"]?\s*\)"#).expect("valid background url pattern"));

pub fn background_url(value: &str) -> Option<&str> {
    BACKGROUND_URL
        .captures(value)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str())
        .filter(|url| !url.is_empty())
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LazyImageLoader;

impl LazyImageLoader {
    pub fn defer<E: ElementHandle>(&self, element: &E) -> bool {
        if element.is_tag("img") {
            let Some(src) = element.non_empty_attribute("src") else {
                return false;
            };
            element.set_attribute(DEFERRED_SRC, &src);
            element.remove_attribute("src");
            return true;
        }
        let Some(background) = element.style("background-image") else {
            return false;
        };
        let Some(url) = background_url(&background).map(str::to_string) else {
            return false;
        };
        element.set_attribute(DEFERRED_BG, &url);
        element.set_style("background-image", "none");
        true
    }

    pub fn load<E: ElementHandle>(&self, element: &E) {
        if element.is_tag("img") {
            if let Some(src) = element.non_empty_attribute(DEFERRED_SRC) {
                element.set_attribute("src", &src);
                element.remove_attribute(DEFERRED_SRC);
            }
        } else if let Some(url) = element.non_empty_attribute(DEFERRED_BG) {
            element.set_style("background-image", &format!("url('{url}')"));
            element.remove_attribute(DEFERRED_BG);
        }
        element.add_class(LOADED_CLASS);
    }
}

pub fn resolved_source<E: ElementHandle>(element: &E) -> Option<String> {
    element
        .non_empty_attribute("src")
        .or_else(|| element.non_empty_attribute(DEFERRED_SRC))
}
