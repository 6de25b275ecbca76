//! # Page Skeleton
//!
//! Builds the fixed regions every catalog page has and remembers where they
//! are, so the loader, renderer and search filter address nodes directly
//! instead of querying by selector.
//!
//! ```text
//! html
//! ├── head (title, stylesheet)
//! └── body
//!     ├── form.search-form         input#search-input[name=q]
//!     ├── div.loading-message-area  div.loading-message-wrapper
//!     ├── form[action=/activate]    ul.pokemon-list
//!     └── div#modal-container       #pokemon-title, ul.type-list, img.pokemon-img,
//!                                   .pokemon-height, .pokemon-weight, ul.ability-list
//! ```

use crate::dom::{Document, NodeId};

pub const ACTIVATE_ACTION: &str = "/activate";
pub const CLOSE_OVERLAY_ACTION: &str = "/overlay/close";
pub const STYLESHEET_PATH: &str = "/static/style.css";

/// Node ids of the fixed page regions
#[derive(Debug, Clone, Copy)]
pub struct PageLayout {
    pub search_input: NodeId,
    pub list: NodeId,
    pub loading_area: NodeId,
    pub loading_wrapper: NodeId,
    pub overlay: NodeId,
    pub title: NodeId,
    pub type_list: NodeId,
    pub image: NodeId,
    pub height: NodeId,
    pub weight: NodeId,
    pub ability_list: NodeId,
}

impl PageLayout {
    /// Build the skeleton into an empty `html` document
    pub fn build(doc: &mut Document, heading: &str) -> Self {
        let html = doc.root();
        doc.set_attribute(html, "lang", "en");

        let head = doc.append_new(html, "head", &[]);
        let charset = doc.append_new(head, "meta", &[]);
        doc.set_attribute(charset, "charset", "utf-8");
        let title = doc.append_new(head, "title", &[]);
        doc.set_text(title, heading);
        let stylesheet = doc.append_new(head, "link", &[]);
        doc.set_attribute(stylesheet, "rel", "stylesheet");
        doc.set_attribute(stylesheet, "href", STYLESHEET_PATH);

        let body = doc.append_new(html, "body", &[]);
        let header = doc.append_new(body, "header", &["page-header"]);
        let h1 = doc.append_new(header, "h1", &[]);
        doc.set_text(h1, heading);

        let search_form = doc.append_new(body, "form", &["search-form"]);
        doc.set_attribute(search_form, "method", "get");
        doc.set_attribute(search_form, "action", "/");
        let search_input = doc.append_new(search_form, "input", &["form-control"]);
        doc.set_attribute(search_input, "id", "search-input");
        doc.set_attribute(search_input, "type", "search");
        doc.set_attribute(search_input, "name", "q");
        doc.set_attribute(search_input, "placeholder", "Search by name");

        let loading_area = doc.append_new(body, "div", &["loading-message-area", "hide"]);
        let loading_wrapper = doc.append_new(loading_area, "div", &["loading-message-wrapper"]);

        let list_form = doc.append_new(body, "form", &["pokemon-list-form"]);
        doc.set_attribute(list_form, "method", "post");
        doc.set_attribute(list_form, "action", ACTIVATE_ACTION);
        let list = doc.append_new(list_form, "ul", &["pokemon-list", "list-group"]);

        let overlay = doc.append_new(body, "div", &["modal", "is-not-visible"]);
        doc.set_attribute(overlay, "id", "modal-container");
        let content = doc.append_new(overlay, "div", &["modal-content"]);

        let modal_header = doc.append_new(content, "div", &["modal-header"]);
        let title = doc.append_new(modal_header, "h2", &["modal-title"]);
        doc.set_attribute(title, "id", "pokemon-title");
        let close_form = doc.append_new(modal_header, "form", &[]);
        doc.set_attribute(close_form, "method", "post");
        doc.set_attribute(close_form, "action", CLOSE_OVERLAY_ACTION);
        let close = doc.append_new(close_form, "button", &["modal-close"]);
        doc.set_attribute(close, "type", "submit");
        doc.set_attribute(close, "aria-label", "Close");
        doc.set_text(close, "×");

        let modal_body = doc.append_new(content, "div", &["modal-body"]);
        let type_list = doc.append_new(modal_body, "ul", &["type-list"]);
        let image = doc.append_new(modal_body, "img", &["pokemon-img"]);

        let measurements = doc.append_new(modal_body, "dl", &["measurements"]);
        let height_label = doc.append_new(measurements, "dt", &[]);
        doc.set_text(height_label, "Height (m)");
        let height = doc.append_new(measurements, "dd", &["pokemon-height"]);
        let weight_label = doc.append_new(measurements, "dt", &[]);
        doc.set_text(weight_label, "Weight (kg)");
        let weight = doc.append_new(measurements, "dd", &["pokemon-weight"]);

        let abilities_heading = doc.append_new(modal_body, "h3", &[]);
        doc.set_text(abilities_heading, "Abilities");
        let ability_list = doc.append_new(modal_body, "ul", &["ability-list"]);

        Self {
            search_input,
            list,
            loading_area,
            loading_wrapper,
            overlay,
            title,
            type_list,
            image,
            height,
            weight,
            ability_list,
        }
    }
}
