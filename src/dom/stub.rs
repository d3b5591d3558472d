use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{ElementHandle, MediaHandle};

#[derive(Debug, Default)]
struct StubNode {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    inner_html: String,
    text: String,
    disabled: bool,
    children: Vec<StubElement>,
    detached: bool,
    playing: bool,
    current_time: f64,
    reloads: u32,
}

#[derive(Clone, Debug, Default)]
pub struct StubElement(Rc<RefCell<StubNode>>);

impl PartialEq for StubElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl StubElement {
    pub fn new(tag: &str) -> Self {
        let node = StubNode {
            tag: tag.to_ascii_uppercase(),
            ..StubNode::default()
        };
        Self(Rc::new(RefCell::new(node)))
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_style(self, property: &str, value: &str) -> Self {
        self.set_style(property, value);
        self
    }

    pub fn with_child(self, child: StubElement) -> Self {
        self.0.borrow_mut().children.push(child);
        self
    }

    pub fn inner_html(&self) -> String {
        self.0.borrow().inner_html.clone()
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    pub fn children(&self) -> Vec<StubElement> {
        self.0
            .borrow()
            .children
            .iter()
            .filter(|child| !child.is_detached())
            .cloned()
            .collect()
    }

    pub fn is_detached(&self) -> bool {
        self.0.borrow().detached
    }

    pub fn is_playing(&self) -> bool {
        self.0.borrow().playing
    }

    pub fn current_time(&self) -> f64 {
        self.0.borrow().current_time
    }

    pub fn reloads(&self) -> u32 {
        self.0.borrow().reloads
    }
}

impl ElementHandle for StubElement {
    fn tag_name(&self) -> String {
        self.0.borrow().tag.clone()
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|value| value == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|value| value != class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attributes.remove(name);
    }

    fn style(&self, property: &str) -> Option<String> {
        self.0
            .borrow()
            .styles
            .get(property)
            .filter(|value| !value.is_empty())
            .cloned()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn clear_style(&self, property: &str) {
        self.0.borrow_mut().styles.remove(property);
    }

    fn set_inner_html(&self, html: &str) {
        self.0.borrow_mut().inner_html = html.to_string();
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    // Only bare tag selectors are understood.
    fn child_attribute(&self, selector: &str, name: &str) -> Option<String> {
        self.children()
            .into_iter()
            .find(|child| child.is_tag(selector))
            .and_then(|child| child.attribute(name))
    }

    fn append_element(&self, tag: &str) -> Option<Self> {
        let child = StubElement::new(tag);
        self.0.borrow_mut().children.push(child.clone());
        Some(child)
    }

    fn detach(&self) {
        self.0.borrow_mut().detached = true;
    }
}

impl MediaHandle for StubElement {
    fn current_src(&self) -> Option<String> {
        self.attribute("currentSrc").filter(|src| !src.is_empty())
    }

    fn play(&self) {
        self.0.borrow_mut().playing = true;
    }

    fn pause(&self) {
        self.0.borrow_mut().playing = false;
    }

    fn set_current_time(&self, seconds: f64) {
        self.0.borrow_mut().current_time = seconds;
    }

    fn reload(&self) {
        self.0.borrow_mut().reloads += 1;
    }
}
