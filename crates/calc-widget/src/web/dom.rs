//! Mock DOM for the web front end
//!
//! Mirrors the element ids, attributes and classes the page would have in
//! a browser, so the web layer can be driven and checked without one.

use std::collections::HashMap;

/// A DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Attributes (`title`, `aria-label`, `role`, `style`, ...)
    pub attributes: HashMap<String, String>,
    /// CSS classes, in insertion order
    pub classes: Vec<String>,
    /// Child element ids
    pub children: Vec<String>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates an element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the id
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Sets an attribute
    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Adds a class unless already present
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Replaces every class with the whitespace-separated list in `classes`
    pub fn set_classes(&mut self, classes: &str) {
        self.classes.clear();
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
    }

    /// Checks for a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Events the page reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click on an element
    Click {
        /// The clicked element
        element_id: String,
    },
    /// Window keydown
    KeyDown {
        /// `KeyboardEvent.key`
        key: String,
        /// Whether Ctrl was held
        ctrl: bool,
    },
    /// Window resize
    Resize {
        /// New inner width in pixels
        width: u32,
        /// New inner height in pixels
        height: u32,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a keydown event without modifiers
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            ctrl: false,
        }
    }

    /// Creates a resize event
    #[must_use]
    pub fn resize(width: u32, height: u32) -> Self {
        Self::Resize { width, height }
    }
}

/// Number of events the log keeps before dropping the oldest
pub const MAX_EVENT_HISTORY: usize = 256;

/// Element registry plus a bounded event log
#[derive(Debug, Default)]
pub struct MockDom {
    elements: HashMap<String, DomElement>,
    event_history: Vec<DomEvent>,
}

impl MockDom {
    /// Creates an empty DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an element for id lookup; elements without an id are dropped
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Registers `child` and lists it under `parent_id`
    pub fn append_child(&mut self, parent_id: &str, child: DomElement) {
        if let Some(parent) = self.elements.get_mut(parent_id) {
            parent.children.push(child.id.clone());
        }
        self.register_element(child);
    }

    /// Removes every child of `id` from the registry
    pub fn clear_children(&mut self, id: &str) {
        let child_ids = self
            .elements
            .get_mut(id)
            .map(|parent| std::mem::take(&mut parent.children))
            .unwrap_or_default();
        for child_id in child_ids {
            self.elements.remove(&child_id);
        }
    }

    /// Gets an element by id
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by id
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Number of registered elements
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Updates element text by id
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by id
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Updates an attribute by element id
    pub fn set_element_attr(&mut self, id: &str, key: &str, value: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_attr(key, value);
        }
    }

    /// Gets an attribute by element id
    #[must_use]
    pub fn get_element_attr(&self, id: &str, key: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.get_attr(key))
    }

    /// Replaces the class list of an element
    pub fn set_element_classes(&mut self, id: &str, classes: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_classes(classes);
        }
    }

    /// Records an event, dropping the oldest past [`MAX_EVENT_HISTORY`]
    pub fn record_event(&mut self, event: DomEvent) {
        if self.event_history.len() >= MAX_EVENT_HISTORY {
            self.event_history.remove(0);
        }
        self.event_history.push(event);
    }

    /// Recorded events, oldest first
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears the event log
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== DomElement tests =====

    #[test]
    fn test_dom_element_new() {
        let elem = DomElement::new("span");
        assert_eq!(elem.tag, "span");
        assert!(elem.id.is_empty());
        assert!(elem.text_content.is_empty());
        assert_eq!(DomElement::default().tag, "div");
    }

    #[test]
    fn test_dom_element_builders() {
        let elem = DomElement::new("button")
            .with_id("btn-7")
            .with_text("7")
            .with_class("rounded-full")
            .with_attr("title", "Number 7");
        assert_eq!(elem.id, "btn-7");
        assert_eq!(elem.text_content, "7");
        assert!(elem.has_class("rounded-full"));
        assert_eq!(elem.get_attr("title"), Some("Number 7"));
        assert_eq!(elem.get_attr("missing"), None);
    }

    #[test]
    fn test_dom_element_add_class_dedups() {
        let mut elem = DomElement::new("div");
        elem.add_class("foo");
        elem.add_class("bar");
        elem.add_class("foo");
        assert_eq!(elem.classes, vec!["foo", "bar"]);
    }

    #[test]
    fn test_dom_element_set_classes_replaces() {
        let mut elem = DomElement::new("div").with_class("old");
        elem.set_classes("h-16  text-2xl h-16");
        assert_eq!(elem.classes, vec!["h-16", "text-2xl"]);
    }

    // ===== DomEvent tests =====

    #[test]
    fn test_dom_event_constructors() {
        assert_eq!(
            DomEvent::click("btn-equals"),
            DomEvent::Click {
                element_id: "btn-equals".into()
            }
        );
        assert_eq!(
            DomEvent::key_down("Enter"),
            DomEvent::KeyDown {
                key: "Enter".into(),
                ctrl: false
            }
        );
        assert_eq!(
            DomEvent::resize(800, 600),
            DomEvent::Resize {
                width: 800,
                height: 600
            }
        );
    }

    // ===== MockDom tests =====

    #[test]
    fn test_register_and_lookup() {
        let mut dom = MockDom::new();
        dom.register_element(DomElement::new("div").with_id("a"));
        dom.register_element(DomElement::new("div"));
        assert_eq!(dom.element_count(), 1);
        assert!(dom.get_element("a").is_some());
        assert!(dom.get_element("b").is_none());
    }

    #[test]
    fn test_text_and_attr_updates() {
        let mut dom = MockDom::new();
        dom.register_element(DomElement::new("div").with_id("display"));
        dom.set_element_text("display", "1,234");
        dom.set_element_attr("display", "title", "Calculator Display");
        dom.set_element_classes("display", "text-5xl font-light");
        assert_eq!(dom.get_element_text("display"), Some("1,234"));
        assert_eq!(
            dom.get_element_attr("display", "title"),
            Some("Calculator Display")
        );
        assert!(dom.get_element("display").unwrap().has_class("text-5xl"));

        dom.set_element_text("missing", "ignored");
        assert_eq!(dom.get_element_text("missing"), None);
    }

    #[test]
    fn test_append_and_clear_children() {
        let mut dom = MockDom::new();
        dom.register_element(DomElement::new("div").with_id("parent"));
        dom.append_child("parent", DomElement::new("span").with_id("c1"));
        dom.append_child("parent", DomElement::new("span").with_id("c2"));
        assert_eq!(dom.get_element("parent").unwrap().children, vec!["c1", "c2"]);
        assert!(dom.get_element("c1").is_some());

        dom.clear_children("parent");
        assert!(dom.get_element("parent").unwrap().children.is_empty());
        assert!(dom.get_element("c1").is_none());
        assert_eq!(dom.element_count(), 1);
    }

    #[test]
    fn test_event_history() {
        let mut dom = MockDom::new();
        dom.record_event(DomEvent::click("btn-1"));
        dom.record_event(DomEvent::key_down("2"));
        assert_eq!(dom.event_history().len(), 2);
        dom.clear_event_history();
        assert!(dom.event_history().is_empty());
    }

    #[test]
    fn test_event_history_is_bounded() {
        let mut dom = MockDom::new();
        for i in 0..=MAX_EVENT_HISTORY {
            dom.record_event(DomEvent::key_down(&i.to_string()));
        }
        assert_eq!(dom.event_history().len(), MAX_EVENT_HISTORY);
        assert_eq!(dom.event_history()[0], DomEvent::key_down("1"));
        assert_eq!(
            dom.event_history().last(),
            Some(&DomEvent::key_down(&MAX_EVENT_HISTORY.to_string()))
        );
    }
}
