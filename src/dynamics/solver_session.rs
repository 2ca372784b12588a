use super::Extension;
use crate::{
    aa::LabelType,
    encodings::{Atom, Batch, BodyLiteral, Element, Rule},
    sat::{self, Assignment, Literal, SatSolver, SolvingResult, Variable},
    Error, Result,
};
use log::{debug, trace};
use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
    time::{Duration, Instant},
};

/// The identifier given by a [`SolverSession`] to an applied batch.
///
/// Identifiers are strictly increasing and never reused inside a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatchId(usize);

impl BatchId {
    /// Returns the index of the batch, starting at `0` for the first one applied to the session.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Default)]
struct Completion {
    bodies: Vec<Literal>,
    selector: Option<Variable>,
}

/// A persistent solving context accumulating rule batches.
///
/// Batches are grounded into the clauses of a single incremental SAT solver.
/// Each derived atom is bound to the disjunction of its rule bodies (Clark completion);
/// since the rules of an atom may come from several batches, the clause stating that the atom implies one of its bodies
/// is guarded by a selector passed as an assumption.
/// When a new rule arrives for an atom, its current selector is disabled for good and a new guarded clause is added.
///
/// The structural atoms (`arg` and `att`) are external: their truth values are given by flags,
/// turned into assumptions at each solver call.
///
/// The programs handled by the session must be tight (no positive loop), so that the models of the completion are the stable models.
pub struct SolverSession<T>
where
    T: LabelType,
{
    solver: Box<dyn SatSolver>,
    n_vars: usize,
    atom_vars: HashMap<Atom<T>, Variable>,
    completions: HashMap<Atom<T>, Completion>,
    assumptions: Vec<Literal>,
    assumption_positions: HashMap<Variable, usize>,
    flags: Vec<(Variable, bool)>,
    element_flags: HashMap<Element<T>, usize>,
    batches: HashMap<Element<T>, (BatchId, Batch<T>)>,
    shown: Vec<(T, Variable)>,
    shown_vars: HashSet<Variable>,
    next_batch_id: usize,
}

impl<T> SolverSession<T>
where
    T: LabelType,
{
    /// Builds a new, empty session.
    ///
    /// The underlying SAT solver is one returned by [default_solver](crate::sat::default_solver).
    pub fn new() -> Self {
        Self::new_with_sat_solver(sat::default_solver())
    }

    /// Builds a new, empty session on top of the given SAT solver.
    ///
    /// The solver must not contain any clause.
    pub fn new_with_sat_solver(solver: Box<dyn SatSolver>) -> Self {
        Self {
            solver,
            n_vars: 0,
            atom_vars: HashMap::new(),
            completions: HashMap::new(),
            assumptions: Vec::new(),
            assumption_positions: HashMap::new(),
            flags: Vec::new(),
            element_flags: HashMap::new(),
            batches: HashMap::new(),
            shown: Vec::new(),
            shown_vars: HashSet::new(),
            next_batch_id: 0,
        }
    }

    /// Merges a batch into the session.
    ///
    /// Applying a batch equal to one already applied for the same element does nothing and returns the original identifier.
    ///
    /// The batch is checked before anything is added to the solver; in case of error, the session is left unchanged.
    /// Errors are raised when:
    /// * another batch was applied for the same element ([`BatchConflict`](Error::BatchConflict)),
    /// * an attack batch comes before the batch of one of its arguments ([`UnknownElement`](Error::UnknownElement)),
    /// * a rule cannot be handled by the session ([`MalformedBatch`](Error::MalformedBatch)).
    pub fn apply(&mut self, batch: Batch<T>) -> Result<BatchId> {
        if let Some((id, applied)) = self.batches.get(batch.element()) {
            if applied == &batch {
                debug!("batch for {} is already applied as {}", batch.element(), id);
                return Ok(*id);
            }
            return Err(Error::BatchConflict(batch.element().to_string()));
        }
        self.check_batch(&batch)?;
        let id = BatchId(self.next_batch_id);
        self.next_batch_id += 1;
        debug!("applying batch {} for {}", id, batch.element());
        trace!("batch {} is {}", id, batch);
        self.ground_batch(&batch);
        self.batches.insert(batch.element().clone(), (id, batch));
        Ok(id)
    }

    fn check_batch(&self, batch: &Batch<T>) -> Result<()> {
        let element = batch.element();
        let malformed = |reason: String| Error::MalformedBatch {
            element: element.to_string(),
            reason,
        };
        if let Element::Attack(from, to) = element {
            for label in [from, to] {
                let arg = Element::Argument(label.clone());
                if !self.batches.contains_key(&arg) {
                    return Err(Error::UnknownElement(arg.to_string()));
                }
            }
        }
        let flag_atom = element.flag_atom();
        let mut has_external = false;
        for rule in batch.rules() {
            match rule {
                Rule::External(a) if *a == flag_atom => has_external = true,
                Rule::External(a) => {
                    return Err(malformed(format!("unexpected external atom {}", a)))
                }
                Rule::Derive { head, .. } | Rule::Open(head) if head.is_structural() => {
                    return Err(malformed(format!("rule derives external atom {}", head)))
                }
                Rule::Show(a) if !matches!(a, Atom::In(_)) => {
                    return Err(malformed(format!("cannot show atom {}", a)))
                }
                _ => {}
            }
            if let Some(l) = rule_body(rule).iter().find(|l| {
                l.atom().is_structural()
                    && *l.atom() != flag_atom
                    && !self.atom_vars.contains_key(l.atom())
            }) {
                return Err(malformed(format!("unknown external atom {}", l.atom())));
            }
        }
        if !has_external {
            return Err(malformed(format!("no external declaration for {}", flag_atom)));
        }
        Ok(())
    }

    fn ground_batch(&mut self, batch: &Batch<T>) {
        let mut dirty = Vec::new();
        for rule in batch.rules() {
            if let Rule::External(a) = rule {
                let v = self.new_var();
                self.atom_vars.insert(a.clone(), v);
                self.element_flags
                    .insert(batch.element().clone(), self.flags.len());
                self.flags.push((v, false));
            }
        }
        for rule in batch.rules() {
            match rule {
                Rule::External(_) => {}
                Rule::Open(a) => {
                    self.atom_var(a, &mut dirty);
                }
                Rule::Show(a) => {
                    let v = self.atom_var(a, &mut dirty);
                    if let Atom::In(label) = a {
                        if self.shown_vars.insert(v) {
                            self.shown.push((label.clone(), v));
                        }
                    }
                }
                Rule::Derive { head, body } => {
                    let h = self.atom_var(head, &mut dirty);
                    let b = self.encode_body(body, &mut dirty);
                    self.solver.add_clause(vec![b.neg(), h.pos()]);
                    if let Some(c) = self.completions.get_mut(head) {
                        c.bodies.push(b.pos());
                    }
                    if !dirty.contains(head) {
                        dirty.push(head.clone());
                    }
                }
                Rule::Constraint { body } => {
                    let mut cl = Vec::with_capacity(body.len());
                    for l in body {
                        cl.push(self.body_lit(l, &mut dirty).negate());
                    }
                    self.solver.add_clause(cl);
                }
            }
        }
        dirty.iter().for_each(|a| self.refresh_completion(a));
    }

    fn new_var(&mut self) -> Variable {
        self.n_vars += 1;
        Variable::from(self.n_vars)
    }

    fn atom_var(&mut self, atom: &Atom<T>, dirty: &mut Vec<Atom<T>>) -> Variable {
        if let Some(v) = self.atom_vars.get(atom) {
            return *v;
        }
        let v = self.new_var();
        self.atom_vars.insert(atom.clone(), v);
        self.completions.insert(atom.clone(), Completion::default());
        dirty.push(atom.clone());
        v
    }

    fn body_lit(&mut self, l: &BodyLiteral<T>, dirty: &mut Vec<Atom<T>>) -> Literal {
        match l {
            BodyLiteral::Pos(a) => self.atom_var(a, dirty).pos(),
            BodyLiteral::Neg(a) => self.atom_var(a, dirty).neg(),
        }
    }

    fn encode_body(&mut self, body: &[BodyLiteral<T>], dirty: &mut Vec<Atom<T>>) -> Variable {
        let mut lits = Vec::with_capacity(body.len());
        for l in body {
            lits.push(self.body_lit(l, dirty));
        }
        let b = self.new_var();
        lits.iter()
            .for_each(|l| self.solver.add_clause(vec![b.neg(), *l]));
        let mut full_cl = lits.iter().map(|l| l.negate()).collect::<Vec<_>>();
        full_cl.push(b.pos());
        self.solver.add_clause(full_cl);
        b
    }

    fn refresh_completion(&mut self, atom: &Atom<T>) {
        let head = match self.atom_vars.get(atom) {
            Some(v) => *v,
            None => return,
        };
        let selector = self.new_var();
        let (old_selector, full_cl) = match self.completions.get_mut(atom) {
            Some(c) => {
                let mut full_cl = Vec::with_capacity(c.bodies.len() + 2);
                full_cl.push(selector.neg());
                full_cl.push(head.neg());
                full_cl.extend_from_slice(&c.bodies);
                (c.selector.replace(selector), full_cl)
            }
            None => return,
        };
        if let Some(s) = old_selector {
            self.remove_selector(s);
        }
        self.solver.add_clause(full_cl);
        self.assumption_positions
            .insert(selector, self.assumptions.len());
        self.assumptions.push(selector.pos());
    }

    fn remove_selector(&mut self, selector: Variable) {
        self.solver.add_clause(vec![selector.neg()]);
        if let Some(p) = self.assumption_positions.remove(&selector) {
            self.assumptions.swap_remove(p);
            if let Some(moved) = self.assumptions.get(p) {
                self.assumption_positions.insert(moved.var(), p);
            }
        }
    }

    /// Sets the truth value of the structural atom of an element.
    ///
    /// The value is taken into account by the next solver calls.
    /// If no batch was applied for this element, an [`UnknownElement`](Error::UnknownElement) error is returned.
    pub fn set_flag(&mut self, element: &Element<T>, value: bool) -> Result<()> {
        let index = self.flag_index(element)?;
        if self.flags[index].1 != value {
            debug!("setting {} to {}", element, value);
        }
        self.flags[index].1 = value;
        Ok(())
    }

    /// Returns the truth value of the structural atom of an element.
    pub fn flag(&self, element: &Element<T>) -> Result<bool> {
        self.flag_index(element).map(|i| self.flags[i].1)
    }

    fn flag_index(&self, element: &Element<T>) -> Result<usize> {
        self.element_flags
            .get(element)
            .copied()
            .ok_or_else(|| Error::UnknownElement(element.to_string()))
    }

    /// Returns the identifier of the batch applied for an element, if any.
    pub fn batch_id(&self, element: &Element<T>) -> Option<BatchId> {
        self.batches.get(element).map(|(id, _)| *id)
    }

    /// Returns the number of batches applied so far.
    pub fn n_batches(&self) -> usize {
        self.batches.len()
    }

    /// Computes all the models of the program, projected on the shown atoms.
    pub fn solve(&mut self) -> Result<Vec<Extension<T>>> {
        self.solve_with_deadline(None)
    }

    /// Computes all the models of the program, projected on the shown atoms, before a deadline.
    ///
    /// The deadline is checked before each solver call.
    /// If it has passed, a [`SolveTimeout`](Error::SolveTimeout) error is returned.
    /// In every case, the session remains usable.
    pub fn solve_with_deadline(&mut self, deadline: Option<Instant>) -> Result<Vec<Extension<T>>> {
        let start = Instant::now();
        let selector = self.new_var();
        let mut assumptions = self.current_assumptions();
        assumptions.push(selector.pos());
        let mut extensions = Vec::new();
        let status = loop {
            if deadline.map(|d| Instant::now() >= d).unwrap_or(false) {
                break Err(Error::SolveTimeout(extensions.len()));
            }
            match self.solver.solve_under_assumptions(&assumptions) {
                SolvingResult::Satisfiable(model) => {
                    let mut blocking_cl = Vec::with_capacity(1 + self.shown.len());
                    blocking_cl.push(selector.neg());
                    for (_, v) in self.shown.iter() {
                        if model.value_of(*v) == Some(true) {
                            blocking_cl.push(v.neg());
                        } else {
                            blocking_cl.push(v.pos());
                        }
                    }
                    let extension = self.model_to_extension(&model);
                    trace!("found model {}", extension);
                    self.solver.add_clause(blocking_cl);
                    extensions.push(extension);
                }
                SolvingResult::Unsatisfiable => break Ok(()),
                SolvingResult::Unknown => break Err(Error::EngineFailure),
            }
        };
        self.solver.add_clause(vec![selector.neg()]);
        status?;
        debug!(
            "found {} model(s) in {}",
            extensions.len(),
            format_duration(start.elapsed())
        );
        Ok(extensions)
    }

    /// Searches for a single model in which the given atoms hold.
    ///
    /// If an atom is unknown to the session, an [`UnknownElement`](Error::UnknownElement) error is returned.
    pub fn find_model(&mut self, assumed: &[Atom<T>]) -> Result<Option<Extension<T>>> {
        let mut assumptions = self.current_assumptions();
        for atom in assumed {
            let v = self
                .atom_vars
                .get(atom)
                .ok_or_else(|| Error::UnknownElement(atom.to_string()))?;
            assumptions.push(v.pos());
        }
        match self.solver.solve_under_assumptions(&assumptions) {
            SolvingResult::Satisfiable(model) => Ok(Some(self.model_to_extension(&model))),
            SolvingResult::Unsatisfiable => Ok(None),
            SolvingResult::Unknown => Err(Error::EngineFailure),
        }
    }

    fn current_assumptions(&self) -> Vec<Literal> {
        let mut assumptions = Vec::with_capacity(self.assumptions.len() + self.flags.len() + 1);
        assumptions.extend_from_slice(&self.assumptions);
        assumptions.extend(
            self.flags
                .iter()
                .map(|(v, value)| if *value { v.pos() } else { v.neg() }),
        );
        assumptions
    }

    fn model_to_extension(&self, model: &Assignment) -> Extension<T> {
        Extension::new(
            self.shown
                .iter()
                .filter(|(_, v)| model.value_of(*v) == Some(true))
                .map(|(label, _)| label.clone())
                .collect(),
        )
    }
}

impl<T> Default for SolverSession<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self::new()
    }
}

fn rule_body<T>(rule: &Rule<T>) -> &[BodyLiteral<T>]
where
    T: LabelType,
{
    match rule {
        Rule::Derive { body, .. } | Rule::Constraint { body } => body,
        _ => &[],
    }
}

fn format_duration(d: Duration) -> String {
    format!("{}.{:03}s", d.as_secs(), d.subsec_millis())
}
