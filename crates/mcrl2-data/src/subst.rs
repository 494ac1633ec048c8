//! Substitutions and free-variable queries.

use crate::expr::{DataExpression, DataNode, Variable};
use std::collections::{BTreeMap, BTreeSet};

/// A finite mapping from variables to expressions.
///
/// Data expressions in this crate have no binders, so applying a substitution
/// is plain replacement of variable leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: BTreeMap<Variable, DataExpression>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, var: Variable, value: DataExpression) {
        self.map.insert(var, value);
    }

    pub fn get(&self, var: &Variable) -> Option<&DataExpression> {
        self.map.get(var)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Replace every variable in the domain by its image.
    pub fn apply(&self, e: &DataExpression) -> DataExpression {
        if self.map.is_empty() {
            return e.clone();
        }
        match e.node() {
            DataNode::Variable(v) => self.map.get(v).cloned().unwrap_or_else(|| e.clone()),
            DataNode::Function(_) => e.clone(),
            DataNode::Application { head, arguments } => {
                let head = self.apply(head);
                let arguments = arguments.iter().map(|a| self.apply(a)).collect();
                DataExpression::application(head, arguments)
            }
        }
    }
}

impl FromIterator<(Variable, DataExpression)> for Substitution {
    fn from_iter<T: IntoIterator<Item = (Variable, DataExpression)>>(iter: T) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl DataExpression {
    /// Check whether `var` occurs in this expression.
    pub fn occurs_in(&self, var: &Variable) -> bool {
        match self.node() {
            DataNode::Variable(v) => v == var,
            DataNode::Function(_) => false,
            DataNode::Application { head, arguments } => {
                head.occurs_in(var) || arguments.iter().any(|a| a.occurs_in(var))
            }
        }
    }

    /// All variables occurring in this expression.
    pub fn free_variables(&self) -> BTreeSet<Variable> {
        let mut result = BTreeSet::new();
        self.collect_variables(&mut result);
        result
    }

    fn collect_variables(&self, acc: &mut BTreeSet<Variable>) {
        match self.node() {
            DataNode::Variable(v) => {
                acc.insert(v.clone());
            }
            DataNode::Function(_) => {}
            DataNode::Application { head, arguments } => {
                head.collect_variables(acc);
                for a in arguments {
                    a.collect_variables(acc);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sort;

    fn n(name: &str) -> Variable {
        Variable::new(name, Sort::Nat)
    }

    #[test]
    fn test_apply_replaces_leaves() {
        let e = DataExpression::equal_to(n("x").into(), n("y").into());
        let sigma: Substitution = [(n("x"), DataExpression::number(Sort::Nat, 3))]
            .into_iter()
            .collect();
        let r = sigma.apply(&e);
        assert_eq!(r.to_string(), "3 == y");
        assert!(!r.occurs_in(&n("x")));
        assert!(r.occurs_in(&n("y")));
    }

    #[test]
    fn test_free_variables() {
        let e = DataExpression::and_(
            DataExpression::equal_to(n("x").into(), n("y").into()),
            DataExpression::equal_to(n("x").into(), DataExpression::number(Sort::Nat, 0)),
        );
        let fv: Vec<_> = e.free_variables().into_iter().collect();
        assert_eq!(fv, vec![n("x"), n("y")]);
    }
}
