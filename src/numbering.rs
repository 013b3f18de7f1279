/// A numbering definition handed out by the registry. One definition is
/// shared by every nesting level of a single outermost list tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListDefinition {
    pub style: String,
    pub num_id: u32,
}

/// Allocates numbering definitions. Injected into the converter so list
/// numbering state lives with the caller, not in a hidden global.
pub trait NumberingRegistry {
    fn register(&mut self, style: &str) -> ListDefinition;
}

/// In-process registry: sequential ids starting at 1, every allocation
/// recorded so a `numbering.xml` part can be generated from it afterwards.
#[derive(Debug, Default)]
pub struct Numbering {
    definitions: Vec<ListDefinition>,
}

impl Numbering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn definitions(&self) -> &[ListDefinition] {
        &self.definitions
    }
}

impl NumberingRegistry for Numbering {
    fn register(&mut self, style: &str) -> ListDefinition {
        let definition = ListDefinition {
            style: style.to_string(),
            num_id: self.definitions.len() as u32 + 1,
        };
        self.definitions.push(definition.clone());
        definition
    }
}
