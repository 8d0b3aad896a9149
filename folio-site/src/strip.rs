//! Removal of editor-only markup from a page copy.

use folio_dom::{Document, DomResult, NodeId, Selector};
use folio_engine::markup::{
    ATTR_COMPONENT_ID, ATTR_CONTENTEDITABLE, ATTR_FIELD, CLASS_COMPONENT, CLASS_CONTROLS,
    CLASS_EDITABLE, CLASS_FADE_IN, CLASS_PANEL, CLASS_VISIBLE,
};
use tracing::debug;

/// Strips controls, edit markers and live-editing attributes below `scope`.
///
/// Field text, element structure, section markers (`data-component`) and
/// all other classes are left alone. Fails if `scope` is not in `doc`.
pub fn strip_editor_markup(doc: &mut Document, scope: NodeId) -> DomResult<()> {
    doc.element(scope)?;
    let mut removed = 0;
    for class in [CLASS_CONTROLS, CLASS_PANEL] {
        for node in doc.find_all(scope, &Selector::class(class)) {
            // Already gone if nested inside an earlier match.
            if doc.contains(node) {
                removed += doc.remove(node)?;
            }
        }
    }

    for node in doc.find_all(scope, &Selector::class(CLASS_EDITABLE)) {
        let element = doc.element_mut(node)?;
        element.remove_attr(ATTR_FIELD);
        element.remove_attr(ATTR_CONTENTEDITABLE);
        element.remove_class(CLASS_EDITABLE);
    }

    for node in doc.find_all(scope, &Selector::class(CLASS_COMPONENT)) {
        let element = doc.element_mut(node)?;
        element.remove_attr(ATTR_COMPONENT_ID);
        for class in [CLASS_COMPONENT, CLASS_FADE_IN, CLASS_VISIBLE] {
            element.remove_class(class);
        }
    }
    debug!("Stripped {} editor nodes", removed);
    Ok(())
}
