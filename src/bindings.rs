//! Element bindings: which binding-API type a tag maps to, and how a generic
//! element handle is converted to it.
//!
//! The compiler only talks to the `ElementBindings` trait, so a different
//! target API can be plugged in through `Generator::with_bindings`.

use lazy_static::lazy_static;
use std::collections::HashMap;

pub trait ElementBindings {
    /// Concrete binding type for `tag_name`, if the table knows one.
    fn lookup(&self, tag_name: &str) -> Option<&str>;

    /// Type used for unmapped tags and for the roots collection.
    fn generic_element(&self) -> &str {
        "Element"
    }

    /// Expression converting the generic handle `var_name` to the tag's type.
    fn convert(&self, tag_name: &str, var_name: &str) -> String {
        match self.lookup(tag_name) {
            Some(type_name) => format!("{} as {}", var_name, type_name),
            None => var_name.to_string(),
        }
    }

    /// Declarations placed at the top of the generated namespace. Must bind
    /// `_document`, which every constructor uses to create elements.
    fn prelude(&self) -> &str {
        "const _document: Document = window.document;"
    }
}

lazy_static! {
    /// HTML tag name -> DOM interface name.
    static ref DOM_ELEMENT_TYPES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        // media
        m.insert("audio", "HTMLAudioElement");
        m.insert("video", "HTMLVideoElement");
        m.insert("track", "HTMLTrackElement");
        m.insert("canvas", "HTMLCanvasElement");

        m.insert("a", "HTMLAnchorElement");
        m.insert("area", "HTMLAreaElement");
        m.insert("br", "HTMLBRElement");
        m.insert("base", "HTMLBaseElement");
        m.insert("body", "HTMLBodyElement");
        m.insert("button", "HTMLButtonElement");
        m.insert("dl", "HTMLDListElement");
        m.insert("data", "HTMLDataElement");
        m.insert("datalist", "HTMLDataListElement");
        m.insert("details", "HTMLDetailsElement");
        m.insert("dialog", "HTMLDialogElement");
        m.insert("div", "HTMLDivElement");
        m.insert("embed", "HTMLEmbedElement");
        m.insert("fieldset", "HTMLFieldSetElement");
        m.insert("form", "HTMLFormElement");
        m.insert("hr", "HTMLHRElement");
        m.insert("head", "HTMLHeadElement");
        m.insert("h1", "HTMLHeadingElement");
        m.insert("h2", "HTMLHeadingElement");
        m.insert("h3", "HTMLHeadingElement");
        m.insert("h4", "HTMLHeadingElement");
        m.insert("h5", "HTMLHeadingElement");
        m.insert("h6", "HTMLHeadingElement");
        m.insert("html", "HTMLHtmlElement");
        m.insert("iframe", "HTMLIFrameElement");
        m.insert("img", "HTMLImageElement");
        m.insert("input", "HTMLInputElement");
        m.insert("li", "HTMLLIElement");
        m.insert("label", "HTMLLabelElement");
        m.insert("legend", "HTMLLegendElement");
        m.insert("link", "HTMLLinkElement");
        m.insert("map", "HTMLMapElement");
        m.insert("menu", "HTMLMenuElement");
        m.insert("meta", "HTMLMetaElement");
        m.insert("meter", "HTMLMeterElement");
        m.insert("del", "HTMLModElement");
        m.insert("ins", "HTMLModElement");
        m.insert("object", "HTMLObjectElement");
        m.insert("ol", "HTMLOListElement");
        m.insert("optgroup", "HTMLOptGroupElement");
        m.insert("option", "HTMLOptionElement");
        m.insert("output", "HTMLOutputElement");
        m.insert("p", "HTMLParagraphElement");
        m.insert("picture", "HTMLPictureElement");
        m.insert("pre", "HTMLPreElement");
        m.insert("progress", "HTMLProgressElement");
        m.insert("blockquote", "HTMLQuoteElement");
        m.insert("q", "HTMLQuoteElement");
        m.insert("script", "HTMLScriptElement");
        m.insert("select", "HTMLSelectElement");
        m.insert("slot", "HTMLSlotElement");
        m.insert("source", "HTMLSourceElement");
        m.insert("span", "HTMLSpanElement");
        m.insert("style", "HTMLStyleElement");
        m.insert("caption", "HTMLTableCaptionElement");
        m.insert("td", "HTMLTableCellElement");
        m.insert("th", "HTMLTableCellElement");
        m.insert("col", "HTMLTableColElement");
        m.insert("colgroup", "HTMLTableColElement");
        m.insert("table", "HTMLTableElement");
        m.insert("tr", "HTMLTableRowElement");
        m.insert("tbody", "HTMLTableSectionElement");
        m.insert("thead", "HTMLTableSectionElement");
        m.insert("tfoot", "HTMLTableSectionElement");
        m.insert("template", "HTMLTemplateElement");
        m.insert("textarea", "HTMLTextAreaElement");
        m.insert("time", "HTMLTimeElement");
        m.insert("title", "HTMLTitleElement");
        m.insert("ul", "HTMLUListElement");
        m
    };
}

/// Browser DOM bindings; the default table.
#[derive(Debug, Default, Clone, Copy)]
pub struct DomBindings;

impl ElementBindings for DomBindings {
    fn lookup(&self, tag_name: &str) -> Option<&str> {
        DOM_ELEMENT_TYPES.get(tag_name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let b = DomBindings;
        assert_eq!(b.lookup("div"), Some("HTMLDivElement"));
        assert_eq!(b.lookup("h3"), Some("HTMLHeadingElement"));
        assert_eq!(b.lookup("x-widget"), None);
    }

    #[test]
    fn test_convert() {
        let b = DomBindings;
        assert_eq!(b.convert("a", "a0"), "a0 as HTMLAnchorElement");
        assert_eq!(b.convert("section", "section0"), "section0");
    }

    struct Custom;

    impl ElementBindings for Custom {
        fn lookup(&self, tag_name: &str) -> Option<&str> {
            (tag_name == "button").then_some("UiButton")
        }

        fn generic_element(&self) -> &str {
            "UiNode"
        }
    }

    #[test]
    fn test_swappable_table() {
        let b = Custom;
        assert_eq!(b.generic_element(), "UiNode");
        assert_eq!(b.convert("button", "button0"), "button0 as UiButton");
        assert!(b.prelude().contains("_document"));
    }
}
