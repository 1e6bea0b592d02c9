#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<super::Element>),
}

impl Content {
    /// Deep copy with every descendant id rewritten under `prefix`.
    ///
    /// Classes, offsets, transitions and data are copied as-is, so the clone
    /// renders identically to the source while never duplicating an id.
    pub fn clone_scoped(&self, prefix: &str) -> Content {
        match self {
            Content::None => Content::None,
            Content::Text(text) => Content::Text(text.clone()),
            Content::Children(children) => Content::Children(
                children
                    .iter()
                    .map(|child| child.clone_scoped(prefix))
                    .collect(),
            ),
        }
    }

    /// Number of text rows this content occupies when laid out in a column.
    pub fn intrinsic_height(&self) -> f32 {
        match self {
            Content::None => 0.0,
            // An empty string still takes one row.
            Content::Text(text) => text.lines().count().max(1) as f32,
            Content::Children(children) => children.iter().map(|c| c.measured_height()).sum(),
        }
    }
}
