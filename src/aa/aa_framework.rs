use super::{Argument, ArgumentSet, LabelType};
use crate::{Error, Result};
use std::collections::HashSet;

/// An Abstract Argumentation framework as defined in Dung semantics.
///
/// Frameworks only grow: arguments and attacks may be added, but never removed.
/// Whether an element takes part in the current reasoning is handled by the solvers, not by the framework.
pub struct AAFramework<T>
where
    T: LabelType,
{
    arguments: ArgumentSet<T>,
    attacks: Vec<(usize, usize)>,
    attack_set: HashSet<(usize, usize)>,
    attacks_from: Vec<Vec<usize>>,
    attacks_to: Vec<Vec<usize>>,
}

/// An attack, represented as a couple of two arguments.
///
/// Attacks are built by [`AAFramework`] objects.
pub struct Attack<'a, T>(&'a Argument<T>, &'a Argument<T>)
where
    T: LabelType;

impl<'a, T> Attack<'a, T>
where
    T: LabelType,
{
    /// Returns the attacker.
    ///
    /// Example
    ///
    /// ```
    /// # use dynaf::aa::{Attack, LabelType};
    /// fn describe_attack<T: LabelType>(attack: &Attack<T>) {
    ///     println!("{} attacks {}", attack.attacker(), attack.attacked());
    /// }
    /// ```
    pub fn attacker(&self) -> &'a Argument<T> {
        self.0
    }

    /// Returns the attacked argument.
    pub fn attacked(&self) -> &'a Argument<T> {
        self.1
    }
}

impl<T> AAFramework<T>
where
    T: LabelType,
{
    /// Builds an AA framework.
    ///
    /// The set of arguments used in the framework is provided.
    ///
    /// # Example
    ///
    /// ```
    /// # use dynaf::aa::{ArgumentSet, AAFramework};
    /// let arguments = ArgumentSet::new_with_labels(&["a", "b", "c"]).unwrap();
    /// let framework = AAFramework::new_with_argument_set(arguments);
    /// assert_eq!(3, framework.argument_set().len());
    /// assert_eq!(0, framework.iter_attacks().count());
    /// ```
    pub fn new_with_argument_set(arguments: ArgumentSet<T>) -> Self {
        let attacks_from = (0..arguments.len()).map(|_| vec![]).collect();
        let attacks_to = (0..arguments.len()).map(|_| vec![]).collect();
        AAFramework {
            arguments,
            attacks: vec![],
            attack_set: HashSet::new(),
            attacks_from,
            attacks_to,
        }
    }

    /// Adds a new argument to this argumentation framework.
    ///
    /// If the argument is already defined, a [`DuplicateArgument`](Error::DuplicateArgument) error is returned
    /// and the framework is left unchanged.
    pub fn new_argument(&mut self, label: T) -> Result<()> {
        self.arguments.new_argument(label)?;
        self.attacks_from.push(Vec::new());
        self.attacks_to.push(Vec::new());
        Ok(())
    }

    /// Adds a new attack given the labels of the source and destination arguments.
    ///
    /// If one of the provided arguments is undefined, an [`UnknownArgument`](Error::UnknownArgument) error is returned.
    /// If the attack already exists, a [`DuplicateAttack`](Error::DuplicateAttack) error is returned.
    /// In both cases, the framework is left unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// # use dynaf::aa::{ArgumentSet, AAFramework};
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels).unwrap();
    /// let mut framework = AAFramework::new_with_argument_set(arguments);
    /// assert_eq!(0, framework.iter_attacks().count());
    /// framework.new_attack(&labels[0], &labels[1]).unwrap();
    /// assert_eq!(1, framework.iter_attacks().count());
    /// assert!(framework.new_attack(&labels[0], &labels[1]).is_err());
    /// ```
    pub fn new_attack(&mut self, from: &T, to: &T) -> Result<()> {
        let attacker_id = self.arguments.get_argument(from)?.id();
        let attacked_id = self.arguments.get_argument(to)?.id();
        if !self.attack_set.insert((attacker_id, attacked_id)) {
            return Err(Error::DuplicateAttack(from.to_string(), to.to_string()));
        }
        self.attacks.push((attacker_id, attacked_id));
        self.attacks_from[attacker_id].push(self.attacks.len() - 1);
        self.attacks_to[attacked_id].push(self.attacks.len() - 1);
        Ok(())
    }

    /// Returns `true` iff the attack is defined in this framework.
    ///
    /// Undefined arguments just lead to a `false` result.
    pub fn has_attack(&self, from: &T, to: &T) -> bool {
        match (
            self.arguments.get_argument(from),
            self.arguments.get_argument(to),
        ) {
            (Ok(a), Ok(b)) => self.attack_set.contains(&(a.id(), b.id())),
            _ => false,
        }
    }

    /// Returns the argument set of the framework.
    pub fn argument_set(&self) -> &ArgumentSet<T> {
        &self.arguments
    }

    /// Provides an iterator to the attacks, in insertion order.
    pub fn iter_attacks(&self) -> impl Iterator<Item = Attack<'_, T>> + '_ {
        self.attacks.iter().map(|i| self.make_attack(i))
    }

    /// Provides an iterator to the attacks that have the given argument as attacker.
    pub fn iter_attacks_from(&self, arg: &Argument<T>) -> impl Iterator<Item = Attack<'_, T>> + '_ {
        self.attacks_from[arg.id()]
            .iter()
            .map(|i| self.make_attack(&self.attacks[*i]))
    }

    /// Provides an iterator to the attacks that have the given argument as attacked.
    pub fn iter_attacks_to(&self, arg: &Argument<T>) -> impl Iterator<Item = Attack<'_, T>> + '_ {
        self.attacks_to[arg.id()]
            .iter()
            .map(|i| self.make_attack(&self.attacks[*i]))
    }

    fn make_attack(&self, (from, to): &(usize, usize)) -> Attack<'_, T> {
        Attack(
            self.arguments.get_argument_by_id(*from),
            self.arguments.get_argument_by_id(*to),
        )
    }

    /// Returns the number of arguments in this framework.
    pub fn n_arguments(&self) -> usize {
        self.argument_set().len()
    }

    /// Returns the number of attacks in this framework.
    ///
    /// # Example
    ///
    /// ```
    /// # use dynaf::aa::{ArgumentSet, AAFramework};
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels).unwrap();
    /// let mut framework = AAFramework::new_with_argument_set(arguments);
    /// assert_eq!(0, framework.n_attacks());
    /// framework.new_attack(&"a", &"b").unwrap();
    /// assert_eq!(1, framework.n_attacks());
    /// ```
    pub fn n_attacks(&self) -> usize {
        self.attacks.len()
    }
}

impl<T> Default for AAFramework<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self::new_with_argument_set(ArgumentSet::default())
    }
}
