use super::{DynamicSolver, Extension, SolverSession};
use crate::{
    aa::{AAFramework, ArgumentSet, LabelType},
    encodings::{AdmissibleBatchCompiler, Atom, BatchCompiler, Element},
    solvers::{
        CredulousAcceptanceComputer, ExtensionEnumerator, SingleExtensionComputer, SolverConfig,
    },
    Error, Result,
};
use log::info;

/// A dynamic solver dedicated to the admissible semantics.
///
/// Each new argument or attack is compiled into a batch of rules merged into a single solver session,
/// and the active framework is controlled by the flags of the session.
/// The extensions computed after any sequence of modifications are the ones of the active framework.
///
/// # Example
///
/// ```
/// # use dynaf::dynamics::{DynamicAdmissibleSemanticsSolver, DynamicSolver};
/// # use dynaf::solvers::ExtensionEnumerator;
/// let mut solver = DynamicAdmissibleSemanticsSolver::new();
/// solver.new_argument("a").unwrap();
/// solver.new_argument("b").unwrap();
/// solver.new_attack(&"a", &"b").unwrap();
/// assert_eq!(2, solver.count_extensions().unwrap());
/// ```
pub struct DynamicAdmissibleSemanticsSolver<T>
where
    T: LabelType,
{
    af: AAFramework<T>,
    compiler: AdmissibleBatchCompiler,
    session: SolverSession<T>,
    config: SolverConfig,
}

impl<T> DynamicAdmissibleSemanticsSolver<T>
where
    T: LabelType,
{
    /// Builds a new SAT based dynamic solver for the admissible semantics.
    ///
    /// The underlying SAT solver is one returned by [default_solver](crate::sat::default_solver).
    pub fn new() -> Self {
        Self::new_with_config(SolverConfig::default())
    }

    /// Builds a new SAT based dynamic solver for the admissible semantics, using the given settings.
    pub fn new_with_config(config: SolverConfig) -> Self {
        Self {
            af: AAFramework::default(),
            compiler: AdmissibleBatchCompiler,
            session: SolverSession::new_with_sat_solver(config.new_sat_solver()),
            config,
        }
    }

    /// Returns the framework made of all the elements ever added, active or not.
    pub fn af(&self) -> &AAFramework<T> {
        &self.af
    }

    /// Returns `true` iff the argument is currently active.
    pub fn is_active_argument(&self, label: &T) -> Result<bool> {
        self.af.argument_set().get_argument(label)?;
        self.session.flag(&Element::Argument(label.clone()))
    }

    /// Returns `true` iff the attack is currently active.
    pub fn is_active_attack(&self, from: &T, to: &T) -> Result<bool> {
        self.check_known_attack(from, to)?;
        self.session
            .flag(&Element::Attack(from.clone(), to.clone()))
    }

    /// Builds a new framework containing only the active arguments and attacks.
    pub fn active_framework(&self) -> Result<AAFramework<T>> {
        let mut af = AAFramework::new_with_argument_set(ArgumentSet::default());
        for arg in self.af.argument_set().iter() {
            if self.is_active_argument(arg.label())? {
                af.new_argument(arg.label().clone())?;
            }
        }
        for att in self.af.iter_attacks() {
            if self.is_active_attack(att.attacker().label(), att.attacked().label())? {
                af.new_attack(att.attacker().label(), att.attacked().label())?;
            }
        }
        Ok(af)
    }

    fn check_known_attack(&self, from: &T, to: &T) -> Result<()> {
        self.af.argument_set().get_argument(from)?;
        self.af.argument_set().get_argument(to)?;
        if !self.af.has_attack(from, to) {
            return Err(Error::UnknownElement(
                Element::Attack(from.clone(), to.clone()).to_string(),
            ));
        }
        Ok(())
    }

    fn check_active_endpoints(&self, from: &T, to: &T) -> Result<()> {
        for label in [from, to] {
            if !self.session.flag(&Element::Argument(label.clone()))? {
                return Err(Error::InactiveArgument(label.to_string()));
            }
        }
        Ok(())
    }
}

impl<T> Default for DynamicAdmissibleSemanticsSolver<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynamicSolver<T> for DynamicAdmissibleSemanticsSolver<T>
where
    T: LabelType,
{
    fn new_argument(&mut self, label: T) -> Result<()> {
        let batch = self.compiler.compile_argument(&label)?;
        self.af.new_argument(label.clone())?;
        self.session.apply(batch)?;
        self.session.set_flag(&Element::Argument(label), true)
    }

    fn enable_argument(&mut self, label: &T) -> Result<()> {
        self.af.argument_set().get_argument(label)?;
        self.session
            .set_flag(&Element::Argument(label.clone()), true)
    }

    fn disable_argument(&mut self, label: &T) -> Result<()> {
        let arg = self.af.argument_set().get_argument(label)?;
        let incident_attacks = self
            .af
            .iter_attacks_from(arg)
            .chain(self.af.iter_attacks_to(arg))
            .map(|att| {
                Element::Attack(
                    att.attacker().label().clone(),
                    att.attacked().label().clone(),
                )
            })
            .collect::<Vec<_>>();
        for attack in incident_attacks.iter() {
            self.session.set_flag(attack, false)?;
        }
        self.session
            .set_flag(&Element::Argument(label.clone()), false)
    }

    fn new_attack(&mut self, from: &T, to: &T) -> Result<()> {
        self.af.argument_set().get_argument(from)?;
        self.af.argument_set().get_argument(to)?;
        if self.af.has_attack(from, to) {
            return Err(Error::DuplicateAttack(from.to_string(), to.to_string()));
        }
        self.check_active_endpoints(from, to)?;
        let batch = self.compiler.compile_attack(from, to)?;
        self.af.new_attack(from, to)?;
        self.session.apply(batch)?;
        self.session
            .set_flag(&Element::Attack(from.clone(), to.clone()), true)
    }

    fn enable_attack(&mut self, from: &T, to: &T) -> Result<()> {
        self.check_known_attack(from, to)?;
        self.check_active_endpoints(from, to)?;
        self.session
            .set_flag(&Element::Attack(from.clone(), to.clone()), true)
    }

    fn disable_attack(&mut self, from: &T, to: &T) -> Result<()> {
        self.check_known_attack(from, to)?;
        self.session
            .set_flag(&Element::Attack(from.clone(), to.clone()), false)
    }

    fn has_argument(&self, label: &T) -> bool {
        self.af.argument_set().contains(label)
    }

    fn has_attack(&self, from: &T, to: &T) -> bool {
        self.af.has_attack(from, to)
    }
}

impl<T> ExtensionEnumerator<T> for DynamicAdmissibleSemanticsSolver<T>
where
    T: LabelType,
{
    fn enumerate_extensions(&mut self) -> Result<Vec<Extension<T>>> {
        info!(
            "enumerating admissible extensions ({} arguments and {} attacks known)",
            self.af.n_arguments(),
            self.af.n_attacks()
        );
        self.session.solve_with_deadline(self.config.deadline())
    }
}

impl<T> SingleExtensionComputer<T> for DynamicAdmissibleSemanticsSolver<T>
where
    T: LabelType,
{
    fn compute_one_extension(&mut self) -> Result<Option<Extension<T>>> {
        self.session.find_model(&[])
    }
}

impl<T> CredulousAcceptanceComputer<T> for DynamicAdmissibleSemanticsSolver<T>
where
    T: LabelType,
{
    fn is_credulously_accepted(&mut self, arg: &T) -> Result<bool> {
        if !self.is_active_argument(arg)? {
            return Ok(false);
        }
        Ok(self
            .session
            .find_model(&[Atom::In(arg.clone())])?
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dynamics::Patch, solvers::AdmissibleSemanticsSolver};
    use std::{collections::HashSet, time::Duration};

    type ExtensionSet = HashSet<Vec<String>>;

    fn to_extension_set(extensions: Vec<Extension<String>>) -> ExtensionSet {
        extensions
            .into_iter()
            .map(|e| e.labels().to_vec())
            .collect()
    }

    fn expected(sets: &[&[&str]]) -> ExtensionSet {
        sets.iter()
            .map(|s| s.iter().map(|l| l.to_string()).collect())
            .collect()
    }

    enum Step {
        Arg(&'static str),
        Att(&'static str, &'static str),
        Solve(&'static [&'static [&'static str]]),
    }

    fn apply_step(solver: &mut DynamicAdmissibleSemanticsSolver<String>, step: &Step) {
        match step {
            Step::Arg(a) => solver.new_argument(a.to_string()).unwrap(),
            Step::Att(from, to) => solver
                .new_attack(&from.to_string(), &to.to_string())
                .unwrap(),
            Step::Solve(_) => {}
        }
    }

    fn incremental_results(steps: &[Step]) -> Vec<ExtensionSet> {
        let mut solver = DynamicAdmissibleSemanticsSolver::new();
        let mut results = vec![];
        for step in steps {
            apply_step(&mut solver, step);
            if let Step::Solve(_) = step {
                results.push(to_extension_set(solver.enumerate_extensions().unwrap()));
            }
        }
        results
    }

    fn from_scratch_results(steps: &[Step]) -> Vec<ExtensionSet> {
        let mut results = vec![];
        for (i, step) in steps.iter().enumerate() {
            if let Step::Solve(_) = step {
                let mut solver = DynamicAdmissibleSemanticsSolver::new();
                steps[..i].iter().for_each(|s| apply_step(&mut solver, s));
                results.push(to_extension_set(solver.enumerate_extensions().unwrap()));
            }
        }
        results
    }

    fn expected_results(steps: &[Step]) -> Vec<ExtensionSet> {
        steps
            .iter()
            .filter_map(|s| match s {
                Step::Solve(sets) => Some(expected(sets)),
                _ => None,
            })
            .collect()
    }

    const DEMO_SCENARIO: &[Step] = &[
        Step::Solve(&[&[]]),
        Step::Arg("a"),
        Step::Arg("b"),
        Step::Solve(&[&[], &["a"], &["b"], &["a", "b"]]),
        Step::Att("a", "b"),
        Step::Solve(&[&[], &["a"]]),
        Step::Arg("c"),
        Step::Solve(&[&[], &["a"], &["c"], &["a", "c"]]),
        Step::Att("c", "a"),
        Step::Solve(&[&[], &["c"], &["b", "c"]]),
    ];

    const SELF_ATTACK_SCENARIO: &[Step] = &[
        Step::Arg("a"),
        Step::Att("a", "a"),
        Step::Solve(&[&[]]),
        Step::Arg("b"),
        Step::Att("b", "a"),
        Step::Solve(&[&[], &["b"]]),
    ];

    const ODD_CYCLE_SCENARIO: &[Step] = &[
        Step::Arg("a"),
        Step::Arg("b"),
        Step::Arg("c"),
        Step::Att("a", "b"),
        Step::Att("b", "c"),
        Step::Att("c", "a"),
        Step::Solve(&[&[]]),
        Step::Arg("d"),
        Step::Att("d", "a"),
        Step::Solve(&[&[], &["d"], &["b", "d"]]),
    ];

    const MUTUAL_ATTACK_SCENARIO: &[Step] = &[
        Step::Arg("a"),
        Step::Arg("b"),
        Step::Att("a", "b"),
        Step::Att("b", "a"),
        Step::Solve(&[&[], &["a"], &["b"]]),
        Step::Arg("c"),
        Step::Att("c", "b"),
        Step::Solve(&[&[], &["a"], &["c"], &["a", "c"]]),
    ];

    macro_rules! scenario_tests {
        ($scenario:ident, $steps:expr) => {
            paste::item! {
                #[test]
                fn [<test_ $scenario _incremental>]() {
                    assert_eq!(expected_results($steps), incremental_results($steps));
                }

                #[test]
                fn [<test_ $scenario _from_scratch>]() {
                    assert_eq!(expected_results($steps), from_scratch_results($steps));
                }
            }
        };
    }

    scenario_tests!(demo, DEMO_SCENARIO);
    scenario_tests!(self_attack, SELF_ATTACK_SCENARIO);
    scenario_tests!(odd_cycle, ODD_CYCLE_SCENARIO);
    scenario_tests!(mutual_attack, MUTUAL_ATTACK_SCENARIO);

    fn s(label: &str) -> String {
        label.to_string()
    }

    fn abc_solver() -> DynamicAdmissibleSemanticsSolver<String> {
        let mut solver = DynamicAdmissibleSemanticsSolver::new();
        for label in ["a", "b", "c"] {
            solver.new_argument(s(label)).unwrap();
        }
        solver.new_attack(&s("a"), &s("b")).unwrap();
        solver
    }

    #[test]
    fn test_duplicate_argument() {
        let mut solver = abc_solver();
        let before = to_extension_set(solver.enumerate_extensions().unwrap());
        assert_eq!(
            Error::DuplicateArgument(s("a")),
            solver.new_argument(s("a")).unwrap_err()
        );
        assert_eq!(3, solver.af().n_arguments());
        assert_eq!(before, to_extension_set(solver.enumerate_extensions().unwrap()));
    }

    #[test]
    fn test_attack_on_unknown_argument() {
        let mut solver = abc_solver();
        assert_eq!(
            Error::UnknownArgument(s("d")),
            solver.new_attack(&s("a"), &s("d")).unwrap_err()
        );
        assert_eq!(
            Error::UnknownArgument(s("d")),
            solver.new_attack(&s("d"), &s("a")).unwrap_err()
        );
        assert_eq!(1, solver.af().n_attacks());
    }

    #[test]
    fn test_duplicate_attack() {
        let mut solver = abc_solver();
        assert_eq!(
            Error::DuplicateAttack(s("a"), s("b")),
            solver.new_attack(&s("a"), &s("b")).unwrap_err()
        );
        assert_eq!(1, solver.af().n_attacks());
    }

    #[test]
    fn test_invalid_label() {
        let mut solver = abc_solver();
        assert_eq!(
            Error::InvalidLabel(s("d e")),
            solver.new_argument(s("d e")).unwrap_err()
        );
        assert_eq!(3, solver.af().n_arguments());
    }

    #[test]
    fn test_disable_argument() {
        let mut solver = abc_solver();
        solver.disable_argument(&s("a")).unwrap();
        assert!(!solver.is_active_argument(&s("a")).unwrap());
        assert!(!solver.is_active_attack(&s("a"), &s("b")).unwrap());
        assert_eq!(
            expected(&[&[], &["b"], &["c"], &["b", "c"]]),
            to_extension_set(solver.enumerate_extensions().unwrap())
        );
        assert_eq!(
            Error::InactiveArgument(s("a")),
            solver.new_attack(&s("c"), &s("a")).unwrap_err()
        );
        assert_eq!(
            Error::InactiveArgument(s("a")),
            solver.enable_attack(&s("a"), &s("b")).unwrap_err()
        );
        solver.enable_argument(&s("a")).unwrap();
        assert!(!solver.is_active_attack(&s("a"), &s("b")).unwrap());
        assert_eq!(
            8,
            solver.count_extensions().unwrap()
        );
        solver.enable_attack(&s("a"), &s("b")).unwrap();
        assert_eq!(
            expected(&[&[], &["a"], &["c"], &["a", "c"]]),
            to_extension_set(solver.enumerate_extensions().unwrap())
        );
    }

    #[test]
    fn test_disable_unknown_elements() {
        let mut solver = abc_solver();
        assert_eq!(
            Error::UnknownArgument(s("d")),
            solver.disable_argument(&s("d")).unwrap_err()
        );
        assert_eq!(
            Error::UnknownElement(s("att(b,a)")),
            solver.disable_attack(&s("b"), &s("a")).unwrap_err()
        );
    }

    #[test]
    fn test_patches() {
        let mut solver = abc_solver();
        solver.apply_patch(&Patch::EnableArgument(s("d"))).unwrap();
        solver
            .apply_patch(&Patch::EnableAttack(s("d"), s("a")))
            .unwrap();
        assert_eq!(
            expected(&[&[], &["c"], &["d"], &["b", "d"], &["c", "d"], &["b", "c", "d"]]),
            to_extension_set(solver.enumerate_extensions().unwrap())
        );
        solver
            .apply_patch(&Patch::DisableAttack(s("d"), s("a")))
            .unwrap();
        solver.apply_patch(&Patch::DisableArgument(s("c"))).unwrap();
        assert_eq!(
            expected(&[&[], &["a"], &["d"], &["a", "d"]]),
            to_extension_set(solver.enumerate_extensions().unwrap())
        );
        solver.apply_patch(&Patch::EnableArgument(s("c"))).unwrap();
        solver
            .apply_patch(&Patch::EnableAttack(s("d"), s("a")))
            .unwrap();
        assert_eq!(4, solver.af().n_arguments());
        assert_eq!(2, solver.af().n_attacks());
        assert_eq!(6, solver.count_extensions().unwrap());
    }

    #[test]
    fn test_single_extension_and_acceptance() {
        let mut solver = abc_solver();
        assert!(solver.compute_one_extension().unwrap().is_some());
        assert!(solver.is_credulously_accepted(&s("a")).unwrap());
        assert!(!solver.is_credulously_accepted(&s("b")).unwrap());
        solver.disable_argument(&s("a")).unwrap();
        assert!(!solver.is_credulously_accepted(&s("a")).unwrap());
        assert!(solver.is_credulously_accepted(&s("b")).unwrap());
        assert_eq!(
            Error::UnknownArgument(s("d")),
            solver.is_credulously_accepted(&s("d")).unwrap_err()
        );
    }

    #[test]
    fn test_timeout() {
        let config = SolverConfig::default().with_timeout(Duration::from_secs(0));
        let mut solver = DynamicAdmissibleSemanticsSolver::new_with_config(config);
        solver.new_argument(s("a")).unwrap();
        assert!(matches!(
            solver.enumerate_extensions(),
            Err(Error::SolveTimeout(_))
        ));
    }

    fn brute_force_extensions(af: &AAFramework<String>) -> ExtensionSet {
        let n = af.n_arguments();
        let attacks = af
            .iter_attacks()
            .map(|att| (att.attacker().id(), att.attacked().id()))
            .collect::<Vec<_>>();
        (0..1usize << n)
            .filter(|set| {
                let is_in = |i: usize| set & (1 << i) != 0;
                let conflict_free = attacks.iter().all(|(f, t)| !is_in(*f) || !is_in(*t));
                let defended = attacks.iter().filter(|(_, t)| is_in(*t)).all(|(f, _)| {
                    attacks
                        .iter()
                        .any(|(g, target)| target == f && is_in(*g))
                });
                conflict_free && defended
            })
            .map(|set| {
                af.argument_set()
                    .iter()
                    .filter(|a| set & (1 << a.id()) != 0)
                    .map(|a| a.label().clone())
                    .collect()
            })
            .collect()
    }

    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self, bound: usize) -> usize {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((self.0 >> 33) as usize) % bound
        }
    }

    fn random_patch(
        rng: &mut Lcg,
        solver: &DynamicAdmissibleSemanticsSolver<String>,
    ) -> Option<Patch<String>> {
        let n_args = solver.af().n_arguments();
        let label = |i: usize| solver.af().argument_set().get_argument_by_id(i).label().clone();
        match rng.next(6) {
            0 if n_args < 7 => Some(Patch::EnableArgument(format!("a{}", n_args))),
            1 | 2 if n_args > 0 => {
                let (from, to) = (label(rng.next(n_args)), label(rng.next(n_args)));
                let active = solver.is_active_argument(&from).unwrap()
                    && solver.is_active_argument(&to).unwrap();
                if active {
                    Some(Patch::EnableAttack(from, to))
                } else {
                    None
                }
            }
            3 if n_args > 0 => Some(Patch::DisableArgument(label(rng.next(n_args)))),
            4 if n_args > 0 => Some(Patch::EnableArgument(label(rng.next(n_args)))),
            5 if solver.af().n_attacks() > 0 => {
                let att = solver
                    .af()
                    .iter_attacks()
                    .nth(rng.next(solver.af().n_attacks()))
                    .unwrap();
                Some(Patch::DisableAttack(
                    att.attacker().label().clone(),
                    att.attacked().label().clone(),
                ))
            }
            _ => None,
        }
    }

    #[test]
    fn test_random_sequences_match_from_scratch_and_brute_force() {
        for seed in 0..20 {
            let mut rng = Lcg(seed);
            let mut solver = DynamicAdmissibleSemanticsSolver::new();
            for _ in 0..30 {
                if let Some(patch) = random_patch(&mut rng, &solver) {
                    solver.apply_patch(&patch).unwrap();
                }
                let incremental = to_extension_set(solver.enumerate_extensions().unwrap());
                let active_af = solver.active_framework().unwrap();
                let from_scratch = to_extension_set(
                    AdmissibleSemanticsSolver::new(&active_af)
                        .enumerate_extensions()
                        .unwrap(),
                );
                assert_eq!(brute_force_extensions(&active_af), incremental);
                assert_eq!(from_scratch, incremental);
            }
        }
    }
}
