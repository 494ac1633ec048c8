//! The communication operator `comm({a1|...|an -> b, ...}, P)`.
//!
//! Actions carry open data, so whether a group of actions synchronises can
//! depend on the values of their arguments. For a single multi-action the
//! operator therefore produces a list of alternatives, each a multi-action
//! paired with the data condition under which it is the outcome. The
//! conditions of one list exclude each other and together cover every case.
//!
//! The computation is a branch-and-bound over the actions of the multi-action
//! (`phi`), with `psi` and `xi` producing the condition under which no further
//! communication is possible among the actions that were kept apart.

use crate::allow_block::Restriction;
use crate::error::{LinResult, LinearisationError};
use crate::multi_action::{Deadlock, MultiAction};
use crate::options::LinearisationOptions;
use crate::summand::{DeadlockSummand, StochasticActionSummand};
use crate::sumelm::sumelm;
use crate::utility::insert_timed_delta_summand;
use ahash::AHashMap;
use mcrl2_data::{lazy, DataExpression, Rewriter};
use mcrl2_process::{
    get_actions, sort_communications, Action, ActionLabel, ActionList, ActionNameMultiset,
    CommunicationExpression, Identifier,
};
use tracing::{debug, trace};

/// Multi-actions paired with the condition under which each one happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TupleList {
    pub actions: Vec<ActionList>,
    pub conditions: Vec<DataExpression>,
}

impl TupleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.actions.len(), self.conditions.len());
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, actions: ActionList, condition: DataExpression) {
        self.actions.push(actions);
        self.conditions.push(condition);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActionList, &DataExpression)> {
        self.actions.iter().zip(self.conditions.iter())
    }
}

impl IntoIterator for TupleList {
    type Item = (ActionList, DataExpression);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<ActionList>, std::vec::IntoIter<DataExpression>>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter().zip(self.conditions)
    }
}

/// Append `{ (a ⊕ m, c' && c) | (m, c') in l }` to `s`.
///
/// With `a == None` the multi-actions of `l` are appended unchanged and only
/// the conditions are strengthened.
pub fn add_action_condition(a: Option<&Action>, c: &DataExpression, l: TupleList, s: &mut TupleList) {
    debug_assert!(!c.is_false());

    match a {
        None => s.actions.extend(l.actions),
        Some(a) => s
            .actions
            .extend(l.actions.into_iter().map(|m| m.insert(a.clone()))),
    }

    if c.is_true() {
        s.conditions.extend(l.conditions);
    } else {
        s.conditions
            .extend(l.conditions.into_iter().map(|x| lazy::and_(x, c.clone())));
    }
}

/// Communication rules in a form suited to prefix matching against sorted
/// multi-actions, with memoised lookups.
pub struct CommEntry {
    lhs: Vec<Vec<Identifier>>,
    rhs: Vec<Identifier>,
    can_cache: AHashMap<ActionList, Option<ActionLabel>>,
    might_cache: AHashMap<(ActionList, ActionList), bool>,
}

impl CommEntry {
    /// Build the table. The left-hand sides must already be sorted; see
    /// [`sort_communications`].
    pub fn new(communications: &[CommunicationExpression]) -> Self {
        let lhs: Vec<Vec<Identifier>> = communications.iter().map(|c| c.lhs.names.clone()).collect();
        debug_assert!(lhs.iter().all(|l| l.windows(2).all(|w| w[0] <= w[1])));
        Self {
            lhs,
            rhs: communications.iter().map(|c| c.rhs.clone()).collect(),
            can_cache: AHashMap::new(),
            might_cache: AHashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.lhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lhs.is_empty()
    }

    /// For every rule, how far the names of `m` match a prefix of its
    /// left-hand side; `None` for rules that do not match. Returns `None`
    /// when no rule matches at all.
    fn match_multi_action(&self, m: &ActionList) -> Option<Vec<Option<usize>>> {
        debug_assert!(m.is_sorted());
        let mut positions: Vec<Option<usize>> = vec![Some(0); self.len()];

        for action in m {
            let mut comm_ok = false;
            for (i, pos) in positions.iter_mut().enumerate() {
                let Some(p) = *pos else { continue };
                if self.lhs[i].get(p) == Some(action.name()) {
                    *pos = Some(p + 1);
                    comm_ok = true;
                } else {
                    *pos = None;
                }
            }
            if !comm_ok {
                return None;
            }
        }
        Some(positions)
    }

    /// The label `b` of a rule `a1|...|an -> b` whose left-hand side is
    /// exactly the names of `m`, with the sorts of the first action of `m`.
    ///
    /// Fails when the matching rule communicates to `tau`.
    pub fn can_communicate(&mut self, m: &ActionList) -> LinResult<Option<ActionLabel>> {
        if let Some(cached) = self.can_cache.get(m) {
            return Ok(cached.clone());
        }

        let mut result = None;
        if let Some(positions) = self.match_multi_action(m) {
            let complete = positions
                .iter()
                .enumerate()
                .find(|(i, pos)| **pos == Some(self.lhs[*i].len()));
            if let Some((i, _)) = complete {
                if self.rhs[i].is_tau() {
                    return Err(LinearisationError::CommunicationToTau {
                        lhs: ActionNameMultiset::new(self.lhs[i].clone()),
                    });
                }
                let sorts = m.front().map(|a| a.label.sorts.clone()).unwrap_or_default();
                result = Some(ActionLabel::new(self.rhs[i].clone(), sorts));
            }
        }

        self.can_cache.insert(m.clone(), result.clone());
        Ok(result)
    }

    /// Whether the names of `m` are a prefix of some left-hand side whose
    /// remaining names can all be found, in order, in `n`.
    pub fn might_communicate(&mut self, m: &ActionList, n: &ActionList) -> bool {
        debug_assert!(n.is_sorted());
        let key = (m.clone(), n.clone());
        if let Some(&cached) = self.might_cache.get(&key) {
            return cached;
        }

        let result = match self.match_multi_action(m) {
            None => false,
            Some(positions) => positions.iter().enumerate().any(|(i, pos)| {
                let Some(start) = *pos else { return false };
                let mut rest = n.iter();
                self.lhs[i][start..]
                    .iter()
                    .all(|name| rest.by_ref().any(|a| a.name() == name))
            }),
        };

        self.might_cache.insert(key, result);
        result
    }
}

/// The communication operator for one rule set, optionally combined with an
/// allow or block set that prunes results as early as possible.
pub struct CommunicationAlgorithm<'a, R: Rewriter> {
    termination_action: &'a Action,
    rewriter: &'a R,
    restriction: Option<Restriction>,
    allowed_actions: Vec<Identifier>,
    blocked_actions: Vec<Identifier>,
    comm_table: CommEntry,
}

impl<'a, R: Rewriter> CommunicationAlgorithm<'a, R> {
    pub fn new(
        termination_action: &'a Action,
        rewriter: &'a R,
        communications: &[CommunicationExpression],
        restriction: Option<&Restriction>,
    ) -> Self {
        let communications = sort_communications(communications);
        let restriction = restriction.map(Restriction::sorted);
        let mut allowed_actions = Vec::new();
        let mut blocked_actions = Vec::new();
        match &restriction {
            Some(Restriction::Allow(l)) => {
                allowed_actions = get_actions(l);
                let name = termination_action.name();
                if let Err(pos) = allowed_actions.binary_search(name) {
                    allowed_actions.insert(pos, name.clone());
                }
            }
            Some(Restriction::Block(b)) => blocked_actions = get_actions(std::slice::from_ref(b)),
            None => {}
        }
        Self {
            termination_action,
            rewriter,
            restriction,
            allowed_actions,
            blocked_actions,
            comm_table: CommEntry::new(&communications),
        }
    }

    /// Whether a multi-action containing `name` could still pass the inline
    /// restriction.
    fn maybe_allowed(&self, name: &Identifier) -> bool {
        match &self.restriction {
            None => true,
            Some(Restriction::Allow(_)) => self.allowed_actions.binary_search(name).is_ok(),
            Some(Restriction::Block(_)) => self.blocked_actions.binary_search(name).is_err(),
        }
    }

    /// `l1[0] == l2[0] && ... && l1[n] == l2[n]`, or `false` when the lists
    /// differ in length or in the sort of some position.
    fn pairwise_equal_to(&self, l1: &[DataExpression], l2: &[DataExpression]) -> DataExpression {
        if l1.len() != l2.len() {
            return DataExpression::false_();
        }
        let mut result = DataExpression::true_();
        for (x, y) in l1.iter().zip(l2) {
            if x.sort() != y.sort() {
                return DataExpression::false_();
            }
            result = lazy::and_(
                result,
                self.rewriter
                    .rewrite(&DataExpression::equal_to(x.clone(), y.clone())),
            );
            if result.is_false() {
                break;
            }
        }
        result
    }

    /// All ways in which the actions of `m` can communicate.
    pub fn make_multi_action_condition_list(&mut self, m: &ActionList) -> LinResult<TupleList> {
        self.make_multi_action_condition_list_aux(m, &ActionList::new())
    }

    /// Alternatives for `m`, where `r` holds the actions already kept apart.
    fn make_multi_action_condition_list_aux(
        &mut self,
        m: &ActionList,
        r: &ActionList,
    ) -> LinResult<TupleList> {
        let Some(a) = m.front() else {
            let condition = if r.is_empty() {
                DataExpression::true_()
            } else {
                self.psi(r)?
            };
            let mut s = TupleList::new();
            s.push(ActionList::new(), condition);
            return Ok(s);
        };

        let m_tail = m.tail();
        let mut s = self.phi(
            &ActionList::singleton(a.clone()),
            &a.arguments,
            &ActionList::new(),
            &m_tail,
            r,
        )?;

        // `a` on its own can never be allowed, so keeping it apart is pointless.
        if self.maybe_allowed(a.name()) {
            let t = self.make_multi_action_condition_list_aux(&m_tail, &r.insert(a.clone()))?;
            add_action_condition(Some(a), &DataExpression::true_(), t, &mut s);
        }
        Ok(s)
    }

    /// Alternatives in which every action of `m` communicates, none of `w`
    /// does, and a subset of `n` joins in. `d` are the arguments shared by
    /// the communicating actions.
    fn phi(
        &mut self,
        m: &ActionList,
        d: &[DataExpression],
        w: &ActionList,
        n: &ActionList,
        r: &ActionList,
    ) -> LinResult<TupleList> {
        let mut s = TupleList::new();
        if !self.comm_table.might_communicate(m, n) {
            return Ok(s);
        }

        match n.front() {
            None => {
                if let Some(c) = self.comm_table.can_communicate(m)? {
                    if self.maybe_allowed(&c.name) {
                        let t = self.make_multi_action_condition_list_aux(w, r)?;
                        let result = Action::new(c, d.to_vec());
                        add_action_condition(Some(&result), &DataExpression::true_(), t, &mut s);
                    }
                }
            }
            Some(a) => {
                let n_tail = n.tail();
                let condition = self.pairwise_equal_to(d, &a.arguments);
                if condition.is_false() {
                    s = self.phi(m, d, &w.insert(a.clone()), &n_tail, r)?;
                } else {
                    let t = self.phi(&m.insert(a.clone()), d, w, &n_tail, r)?;
                    s = self.phi(m, d, &w.insert(a.clone()), &n_tail, r)?;
                    add_action_condition(None, &condition, t, &mut s);
                }
            }
        }
        Ok(s)
    }

    /// Whether `alpha`, extended with some sub-multiset of `beta`, can
    /// communicate.
    fn xi(&mut self, alpha: &ActionList, beta: &ActionList) -> LinResult<bool> {
        let Some(b) = beta.front() else {
            return Ok(self.comm_table.can_communicate(alpha)?.is_some());
        };

        let alpha_ = alpha.insert(b.clone());
        if self.comm_table.can_communicate(&alpha_)?.is_some() {
            return Ok(true);
        }
        let beta_tail = beta.tail();
        if self.comm_table.might_communicate(&alpha_, &beta_tail) && self.xi(&alpha_, &beta_tail)? {
            return Ok(true);
        }
        self.xi(alpha, &beta_tail)
    }

    /// The condition under which no two actions of `alpha` can take part in
    /// a communication together.
    fn psi(&mut self, alpha: &ActionList) -> LinResult<DataExpression> {
        debug_assert!(alpha.is_sorted());
        let mut cond = DataExpression::false_();

        let actions = alpha.as_slice();
        for (i, first) in actions.iter().enumerate() {
            for (j, second) in actions.iter().enumerate().skip(i + 1) {
                let pair = ActionList::singleton(first.clone()).insert(second.clone());
                let beta_tail: ActionList = actions[j + 1..].iter().cloned().collect();
                if self.comm_table.might_communicate(&pair, &beta_tail) && self.xi(&pair, &beta_tail)? {
                    cond = lazy::or_(cond, self.pairwise_equal_to(&first.arguments, &second.arguments));
                }
            }
        }
        Ok(lazy::not_(cond))
    }

    /// Replace every action summand by one summand per communication
    /// alternative, and bring the deadlock summands up to date.
    pub fn apply(
        &mut self,
        action_summands: &mut Vec<StochasticActionSummand>,
        deadlock_summands: &mut Vec<DeadlockSummand>,
        options: &LinearisationOptions,
    ) -> LinResult<()> {
        let inline_restriction = self.restriction.is_some();
        debug!(
            restriction = match &self.restriction {
                Some(Restriction::Allow(_)) => "allow",
                Some(Restriction::Block(_)) => "block",
                None => "none",
            },
            rules = self.comm_table.len(),
            summands = action_summands.len(),
            "calculating communication operator"
        );

        if inline_restriction && (!options.ignore_time || options.no_delta_elimination) {
            return Err(LinearisationError::InlineRestrictionRequiresIgnoreTime {
                ignore_time: options.ignore_time,
                no_delta_elimination: options.no_delta_elimination,
            });
        }

        // The caller's vectors are only replaced once every summand succeeded.
        let mut resulting_deadlock_summands = if inline_restriction {
            Vec::new()
        } else {
            deadlock_summands.clone()
        };

        let mut resulting_action_summands = Vec::new();
        for smmnd in action_summands.iter() {
            let time = &smmnd.multi_action.time;
            let condition = &smmnd.condition;

            if !inline_restriction {
                // Communication splits the summand into summands with
                // narrower conditions; a deadlock covering the original
                // condition keeps later delta elimination simple.
                let sum_vars = smmnd
                    .summation_variables
                    .iter()
                    .filter(|v| condition.occurs_in(v) || time.occurs_in(v))
                    .cloned()
                    .collect();
                resulting_deadlock_summands.push(DeadlockSummand::new(
                    sum_vars,
                    condition.clone(),
                    Deadlock::timed(time.clone()),
                ));
            }

            let alternatives = self.make_multi_action_condition_list(&smmnd.multi_action.actions)?;
            trace!(
                multi_action = %smmnd.multi_action.actions,
                alternatives = alternatives.len(),
                "communication on multi-action"
            );

            for (multi_action, communication_condition) in alternatives {
                if let Some(restriction) = &self.restriction {
                    if !restriction.permits(&multi_action, self.termination_action) {
                        continue;
                    }
                }

                let communication_condition = self.rewriter.rewrite(&communication_condition);
                let new_condition = self
                    .rewriter
                    .rewrite(&lazy::and_(condition.clone(), communication_condition));
                let mut new_summand = StochasticActionSummand::new(
                    smmnd.summation_variables.clone(),
                    new_condition,
                    MultiAction::timed(multi_action, time.clone()),
                    smmnd.assignments.clone(),
                    smmnd.distribution.clone(),
                );
                if !options.no_sumelm && sumelm(&mut new_summand) {
                    new_summand.condition = self.rewriter.rewrite(&new_summand.condition);
                }
                if !new_summand.condition.is_false() {
                    resulting_action_summands.push(new_summand);
                }
            }
        }

        *action_summands = resulting_action_summands;

        if inline_restriction {
            *deadlock_summands = vec![DeadlockSummand::universal()];
        } else if options.no_delta_elimination {
            *deadlock_summands = resulting_deadlock_summands;
        } else {
            deadlock_summands.clear();
            for summand in resulting_deadlock_summands {
                insert_timed_delta_summand(action_summands, deadlock_summands, summand, options.ignore_time);
            }
        }

        debug!(
            action_summands = action_summands.len(),
            deadlock_summands = deadlock_summands.len(),
            "communication done"
        );
        Ok(())
    }
}

/// Apply the communication operator to a pair of summand vectors, in place.
///
/// With `is_allow` or `is_block` set, `allow_list` is applied as an allow
/// set, or its names as a block set, during the computation instead of
/// afterwards. This requires `ignore_time` and delta elimination; the deadlock
/// summands then become a single `true -> delta`.
#[allow(clippy::too_many_arguments)]
pub fn communication_composition(
    communications: &[CommunicationExpression],
    allow_list: &[ActionNameMultiset],
    is_allow: bool,
    is_block: bool,
    action_summands: &mut Vec<StochasticActionSummand>,
    deadlock_summands: &mut Vec<DeadlockSummand>,
    termination_action: &Action,
    options: &LinearisationOptions,
    rewriter: &impl Rewriter,
) -> LinResult<()> {
    let restriction = match (is_allow, is_block) {
        (true, true) => return Err(LinearisationError::ConflictingRestriction),
        (true, false) => Some(Restriction::Allow(allow_list.to_vec())),
        (false, true) => Some(Restriction::Block(ActionNameMultiset::new(get_actions(allow_list)))),
        (false, false) => None,
    };
    CommunicationAlgorithm::new(termination_action, rewriter, communications, restriction.as_ref())
        .apply(action_summands, deadlock_summands, options)
}
