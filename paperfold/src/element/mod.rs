mod content;
mod node;

pub use content::Content;
pub use node::Element;
pub(crate) use node::generate_id;

/// Find an element by ID in the tree.
///
/// A leading `#` is accepted so selector-style targets can be passed through.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    let id = id.strip_prefix('#').unwrap_or(id);
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Mutable variant of [`find_element`].
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    let id = id.strip_prefix('#').unwrap_or(id);
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}
