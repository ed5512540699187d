//! Argument tree traversal
//!
//! Every shape that can be handed to resource creation implements
//! [`ArgumentTree`]. The visitor hands out mutable references to each string
//! leaf in depth-first field order, which is all the reference resolver
//! needs to rewrite values in place.

use std::collections::BTreeMap;

/// Typed visitor over the string leaves of an argument tree.
pub trait ArgumentTree {
    /// Push a mutable reference to every string leaf, depth first.
    fn visit_strings<'a>(&'a mut self, leaves: &mut Vec<&'a mut String>);

    /// Collect all string leaves.
    fn string_leaves(&mut self) -> Vec<&mut String>
    where
        Self: Sized,
    {
        let mut leaves = Vec::new();
        self.visit_strings(&mut leaves);
        leaves
    }
}

impl ArgumentTree for String {
    fn visit_strings<'a>(&'a mut self, leaves: &mut Vec<&'a mut String>) {
        leaves.push(self);
    }
}

// Non-string scalars never carry a reference expression.
impl ArgumentTree for bool {
    fn visit_strings<'a>(&'a mut self, _leaves: &mut Vec<&'a mut String>) {}
}

impl<T: ArgumentTree> ArgumentTree for Option<T> {
    fn visit_strings<'a>(&'a mut self, leaves: &mut Vec<&'a mut String>) {
        if let Some(value) = self {
            value.visit_strings(leaves);
        }
    }
}

impl<T: ArgumentTree> ArgumentTree for Vec<T> {
    fn visit_strings<'a>(&'a mut self, leaves: &mut Vec<&'a mut String>) {
        for item in self.iter_mut() {
            item.visit_strings(leaves);
        }
    }
}

/// Map keys are identifiers, only the values are visited.
impl<T: ArgumentTree> ArgumentTree for BTreeMap<String, T> {
    fn visit_strings<'a>(&'a mut self, leaves: &mut Vec<&'a mut String>) {
        for value in self.values_mut() {
            value.visit_strings(leaves);
        }
    }
}
