//! Label directives written as checkbox lists in issue descriptions, and the logic that turns
//! them into label modifications.
use std::hash::{Hash, Hasher};

mod extract;
pub mod pattern;
mod reconcile;

pub use extract::extract_directives;
pub use pattern::{DirectivePattern, LabelPattern};
pub use reconcile::{reconcile, LabelDiff};

/// A single checkbox line naming a label, e.g. ``- [x] `bug` ``.
///
/// Directives are identified by their label name only, the checkbox state does not take part in
/// equality.
#[derive(Clone, Debug)]
pub struct Directive {
    name: String,
    checked: bool,
}

impl Directive {
    pub(crate) fn new(name: String, checked: bool) -> Self {
        Self { name, checked }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Is the checkbox ticked, i.e. should the label be applied?
    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

impl PartialEq for Directive {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Directive {}

impl Hash for Directive {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
