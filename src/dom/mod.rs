#[cfg(test)]
pub mod stub;
#[cfg(target_arch = "wasm32")]
pub mod web;

// Handles share the node they wrap: clones observe each other's changes.
pub trait ElementHandle: Clone + PartialEq + 'static {
    fn tag_name(&self) -> String;
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn toggle_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);
    fn style(&self, property: &str) -> Option<String>;
    fn set_style(&self, property: &str, value: &str);
    fn clear_style(&self, property: &str);
    fn set_inner_html(&self, html: &str);
    fn set_text(&self, text: &str);
    fn set_disabled(&self, disabled: bool);
    fn child_attribute(&self, selector: &str, name: &str) -> Option<String>;
    fn append_element(&self, tag: &str) -> Option<Self>;
    fn detach(&self);

    fn is_tag(&self, tag: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(tag)
    }

    fn show(&self, display: &str) {
        self.set_style("display", display);
    }

    fn hide(&self) {
        self.set_style("display", "none");
    }

    fn is_hidden(&self) -> bool {
        self.style("display").as_deref() == Some("none")
    }

    fn non_empty_attribute(&self, name: &str) -> Option<String> {
        self.attribute(name).filter(|value| !value.trim().is_empty())
    }
}

pub trait MediaHandle: ElementHandle {
    fn current_src(&self) -> Option<String>;
    fn play(&self);
    fn pause(&self);
    fn set_current_time(&self, seconds: f64);
    fn reload(&self);
}
