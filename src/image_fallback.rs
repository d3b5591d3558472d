use crate::dom::ElementHandle;
use crate::lazy_images::DEFERRED_SRC;

pub const FALLBACK_TARGETS: &str = ".family-image, .place-image, .trip-photo img";
pub const ERROR_CLASS: &str = "error";
const ORIGINAL_ALT: &str = "data-original-alt";
const BACKGROUND_CARDS: [&str; 2] = ["family-image", "place-image"];

pub struct ImageFallback {
    placeholder: String,
}

impl ImageFallback {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    pub fn on_error<E: ElementHandle>(&self, element: &E) {
        // Deferred images have no live source yet; their error is not real.
        if element.attribute(DEFERRED_SRC).is_some() {
            return;
        }
        element.add_class(ERROR_CLASS);
        element.set_style("background-image", "none");

        let is_card = BACKGROUND_CARDS.iter().any(|class| element.has_class(class));
        if is_card {
            element.set_inner_html(&placeholder_markup(&self.placeholder));
        } else if element.is_tag("img") {
            if element.attribute(ORIGINAL_ALT).is_none() {
                let alt = element.attribute("alt").unwrap_or_default();
                element.set_attribute(ORIGINAL_ALT, &alt);
            }
            element.remove_attribute("src");
            element.set_attribute("alt", &self.placeholder);
        }
        tracing::debug!("images: load failed, placeholder shown");
    }

    pub fn on_load<E: ElementHandle>(&self, element: &E) {
        if !element.has_class(ERROR_CLASS) {
            return;
        }
        element.remove_class(ERROR_CLASS);
        if element.is_tag("img") {
            if let Some(alt) = element.attribute(ORIGINAL_ALT) {
                element.set_attribute("alt", &alt);
                element.remove_attribute(ORIGINAL_ALT);
            }
        }
    }
}

fn placeholder_markup(message: &str) -> String {
    let escaped = message
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!(
        "<div style=\"display: flex; align-items: center; justify-content: center; height: 100%; color: #999; font-size: 0.9em; text-align: center;\">{escaped}</div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::stub::StubElement;
    use pretty_assertions::assert_eq;

    const PLACEHOLDER: &str = "Zdjęcie niedostępne";

    #[test]
    fn failed_then_loaded_img_restores_alt() {
        let fallback = ImageFallback::new(PLACEHOLDER);
        let img = StubElement::new("img")
            .with_attribute("src", "trip/broken.jpg")
            .with_attribute("alt", "Plaża w Sopocie");

        fallback.on_error(&img);
        assert!(img.has_class(ERROR_CLASS));
        assert_eq!(img.attribute("src"), None);
        assert_eq!(img.attribute("alt").as_deref(), Some(PLACEHOLDER));

        img.set_attribute("src", "trip/fixed.jpg");
        fallback.on_load(&img);
        assert!(!img.has_class(ERROR_CLASS));
        assert_eq!(img.attribute("alt").as_deref(), Some("Plaża w Sopocie"));
    }

    #[test]
    fn repeated_errors_keep_first_alt() {
        let fallback = ImageFallback::new(PLACEHOLDER);
        let img = StubElement::new("img")
            .with_attribute("src", "x.jpg")
            .with_attribute("alt", "Original");
        fallback.on_error(&img);
        fallback.on_error(&img);
        fallback.on_load(&img);
        assert_eq!(img.attribute("alt").as_deref(), Some("Original"));
    }

    #[test]
    fn background_card_gets_placeholder_message() {
        let fallback = ImageFallback::new(PLACEHOLDER);
        let card = StubElement::new("div")
            .with_class("family-image")
            .with_style("background-image", "url('family/dziadek.jpg')");
        fallback.on_error(&card);
        assert!(card.has_class(ERROR_CLASS));
        assert_eq!(card.style("background-image").as_deref(), Some("none"));
        assert!(card.inner_html().contains(PLACEHOLDER));
    }

    #[test]
    fn pending_lazy_image_is_not_marked_broken() {
        let fallback = ImageFallback::new(PLACEHOLDER);
        let img = StubElement::new("img").with_attribute(DEFERRED_SRC, "later.jpg");
        fallback.on_error(&img);
        assert!(!img.has_class(ERROR_CLASS));
    }

    #[test]
    fn load_without_prior_error_is_untouched() {
        let fallback = ImageFallback::new(PLACEHOLDER);
        let img = StubElement::new("img").with_attribute("alt", "Fine");
        fallback.on_load(&img);
        assert_eq!(img.attribute("alt").as_deref(), Some("Fine"));
    }

    #[test]
    fn placeholder_markup_escapes_message() {
        assert!(placeholder_markup("<b>").contains("&lt;b&gt;"));
    }
}
