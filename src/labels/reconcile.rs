use std::collections::{HashMap, HashSet};

use crate::labels::Directive;

/// Label modifications that make the labels of an issue match its directives.
///
/// All lists are ordered by the first appearance of the label in the description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelDiff {
    /// Labels that should be added to the issue.
    pub add: Vec<String>,
    /// Labels that should be removed from the issue.
    pub remove: Vec<String>,
    /// Registered labels that are checked in the description.
    pub checked: Vec<String>,
    /// Registered labels that are unchecked in the description.
    pub unchecked: Vec<String>,
}

impl LabelDiff {
    /// Did the description contain any directive for a registered label?
    pub fn has_directives(&self) -> bool {
        !self.checked.is_empty() || !self.unchecked.is_empty()
    }

    /// Would applying the diff leave the labels untouched?
    pub fn is_noop(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Computes which labels have to be added to or removed from an issue so that its labels match
/// the `directives` found in its description.
///
/// Directives for labels that are not `registered` in the repository are ignored. If a label is
/// named several times, the last directive wins. Labels are only removed if they were explicitly
/// unchecked, a label that is not mentioned in the description is left alone.
pub fn reconcile(
    directives: &[Directive],
    current: &HashSet<String>,
    registered: &HashSet<String>,
) -> LabelDiff {
    // Label name -> checked, in order of first appearance.
    let mut desired: Vec<(&str, bool)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for directive in directives
        .iter()
        .filter(|directive| registered.contains(directive.name()))
    {
        match positions.get(directive.name()) {
            Some(&index) => desired[index].1 = directive.is_checked(),
            None => {
                positions.insert(directive.name(), desired.len());
                desired.push((directive.name(), directive.is_checked()));
            }
        }
    }

    let mut diff = LabelDiff::default();
    for (name, checked) in desired {
        let applied = current.contains(name);
        if checked {
            diff.checked.push(name.to_string());
            if !applied {
                diff.add.push(name.to_string());
            }
        } else {
            diff.unchecked.push(name.to_string());
            if applied {
                diff.remove.push(name.to_string());
            }
        }
    }
    diff
}
