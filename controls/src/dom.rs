//! Browser implementation of [`UiTree`] over `web-sys`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement};

use crate::error::TreeError;
use crate::tree::UiTree;

/// The live document.
#[derive(Debug, Clone)]
pub struct DomTree {
    document: Document,
    root: Element,
}

impl DomTree {
    /// Attach to `window.document`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Host`] outside a browser window.
    pub fn from_window() -> Result<Self, TreeError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| TreeError::Host("no window.document".to_owned()))?;
        let root = document
            .document_element()
            .ok_or_else(|| TreeError::Host("document has no root element".to_owned()))?;
        Ok(Self { document, root })
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn host_error(err: &JsValue) -> TreeError {
    TreeError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn as_input<'a>(node: &'a Element) -> Result<&'a HtmlInputElement, TreeError> {
    node.dyn_ref::<HtmlInputElement>()
        .ok_or_else(|| TreeError::Host(format!("<{}> is not an input", node.tag_name().to_lowercase())))
}

fn id_selector(id: &str) -> String {
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[id=\"{escaped}\"]")
}

impl UiTree for DomTree {
    type Node = Element;

    fn root(&self) -> Element {
        self.root.clone()
    }

    fn create_element(&mut self, tag: &str) -> Result<Element, TreeError> {
        self.document.create_element(tag).map_err(|e| host_error(&e))
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), TreeError> {
        parent.append_child(child).map(|_| ()).map_err(|e| host_error(&e))
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<(), TreeError> {
        node.set_attribute(name, value).map_err(|e| host_error(&e))
    }

    fn set_text(&mut self, node: &Element, text: &str) -> Result<(), TreeError> {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn set_inner_html(&mut self, node: &Element, html: &str) -> Result<(), TreeError> {
        node.set_inner_html(html);
        Ok(())
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn add_class(&mut self, node: &Element, class: &str) -> Result<(), TreeError> {
        node.class_list().add_1(class).map_err(|e| host_error(&e))
    }

    fn remove_class(&mut self, node: &Element, class: &str) -> Result<(), TreeError> {
        node.class_list().remove_1(class).map_err(|e| host_error(&e))
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_value(&mut self, node: &Element, value: &str) -> Result<(), TreeError> {
        as_input(node)?.set_value(value);
        Ok(())
    }

    fn value(&self, node: &Element) -> String {
        node.dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    fn set_checked(&mut self, node: &Element, checked: bool) -> Result<(), TreeError> {
        as_input(node)?.set_checked(checked);
        Ok(())
    }

    fn checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>()
            .is_some_and(HtmlInputElement::checked)
    }

    fn find_by_id(&self, root: &Element, id: &str) -> Option<Element> {
        match root.query_selector(&id_selector(id)) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("id lookup for `{id}` failed: {}", host_error(&err));
                None
            }
        }
    }
}
