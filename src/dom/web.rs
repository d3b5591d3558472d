use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::{ElementHandle, MediaHandle};
use crate::error::DomError;

#[derive(Clone, Debug, PartialEq)]
pub struct WebElement(HtmlElement);

impl WebElement {
    pub fn new(element: HtmlElement) -> Self {
        Self(element)
    }

    pub fn from_element(element: web_sys::Element) -> Option<Self> {
        element.dyn_into::<HtmlElement>().ok().map(Self)
    }

    pub fn raw(&self) -> &HtmlElement {
        &self.0
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.0.offset_left() as f64, self.0.offset_top() as f64)
    }

    pub fn is_target(&self, target: &web_sys::EventTarget) -> bool {
        let own: &web_sys::EventTarget = self.0.as_ref();
        own == target
    }
}

impl ElementHandle for WebElement {
    fn tag_name(&self) -> String {
        self.0.tag_name()
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        self.0.class_list().toggle(class).unwrap_or(false)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn remove_attribute(&self, name: &str) {
        let _ = self.0.remove_attribute(name);
    }

    fn style(&self, property: &str) -> Option<String> {
        self.0
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.0.style().set_property(property, value);
    }

    fn clear_style(&self, property: &str) {
        let _ = self.0.style().remove_property(property);
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.0.dyn_ref::<web_sys::HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = self.0.set_attribute("disabled", "");
        } else {
            let _ = self.0.remove_attribute("disabled");
        }
    }

    fn child_attribute(&self, selector: &str, name: &str) -> Option<String> {
        self.0
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|child| child.get_attribute(name))
    }

    fn append_element(&self, tag: &str) -> Option<Self> {
        let document = self.0.owner_document()?;
        let element = document.create_element(tag).ok()?;
        self.0.append_child(&element).ok()?;
        WebElement::from_element(element)
    }

    fn detach(&self) {
        self.0.remove();
    }
}

impl MediaHandle for WebElement {
    fn current_src(&self) -> Option<String> {
        self.0
            .dyn_ref::<web_sys::HtmlMediaElement>()
            .map(|media| media.current_src())
            .filter(|src| !src.is_empty())
    }

    fn play(&self) {
        if let Some(media) = self.0.dyn_ref::<web_sys::HtmlMediaElement>() {
            // Autoplay may be refused; the returned promise is left to reject.
            let _ = media.play();
        }
    }

    fn pause(&self) {
        if let Some(media) = self.0.dyn_ref::<web_sys::HtmlMediaElement>() {
            let _ = media.pause();
        }
    }

    fn set_current_time(&self, seconds: f64) {
        if let Some(media) = self.0.dyn_ref::<web_sys::HtmlMediaElement>() {
            media.set_current_time(seconds);
        }
    }

    fn reload(&self) {
        if let Some(media) = self.0.dyn_ref::<web_sys::HtmlMediaElement>() {
            media.load();
        }
    }
}

pub fn document() -> Result<Document, DomError> {
    let window = web_sys::window().ok_or(DomError::NoWindow)?;
    window.document().ok_or(DomError::NoDocument)
}

pub fn by_id(document: &Document, id: &str) -> Option<WebElement> {
    document
        .get_element_by_id(id)
        .and_then(WebElement::from_element)
}

pub fn query(document: &Document, selector: &str) -> Result<Option<WebElement>, DomError> {
    let element = document
        .query_selector(selector)
        .map_err(|_| DomError::Selector {
            selector: selector.to_string(),
        })?;
    Ok(element.and_then(WebElement::from_element))
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<WebElement>, DomError> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|_| DomError::Selector {
            selector: selector.to_string(),
        })?;
    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        let Some(node) = nodes.get(index) else {
            continue;
        };
        if let Ok(element) = node.dyn_into::<HtmlElement>() {
            elements.push(WebElement(element));
        }
    }
    Ok(elements)
}
