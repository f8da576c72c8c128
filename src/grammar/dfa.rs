//! Deterministic finite automaton
//!
//! A small generic automaton over `(state, symbol)` pairs. Content models of
//! schema elements are encoded as one of these per open element.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{Error, Result};

/// Deterministic finite automaton with an explicit transition table
#[derive(Debug, Clone)]
pub struct Dfa<S, Y> {
    /// State the automaton starts in
    initial: S,
    /// State reached by the symbols accepted so far
    current: S,
    /// (state, symbol) -> next state
    transitions: HashMap<(S, Y), S>,
    /// Accepting states
    finals: HashSet<S>,
}

impl<S, Y> Dfa<S, Y>
where
    S: Copy + Eq + Hash + Debug,
    Y: Copy + Eq + Hash + Debug,
{
    /// Create an automaton positioned at `initial`, with no transitions
    pub fn new(initial: S) -> Self {
        Self {
            initial,
            current: initial,
            transitions: HashMap::new(),
            finals: HashSet::new(),
        }
    }

    /// Register a transition.
    ///
    /// A later registration for the same `(state, symbol)` replaces the
    /// earlier one; the replaced target is returned.
    pub fn add_transition(&mut self, state: S, symbol: Y, next: S) -> Option<S> {
        self.transitions.insert((state, symbol), next)
    }

    /// Mark a state as accepting
    pub fn add_final_state(&mut self, state: S) {
        self.finals.insert(state);
    }

    /// Check if `symbol` can be consumed in the current state
    pub fn accepts(&self, symbol: Y) -> bool {
        self.transitions.contains_key(&(self.current, symbol))
    }

    /// Consume a symbol, moving to the next state
    pub fn add_symbol(&mut self, symbol: Y) -> Result<S> {
        match self.transitions.get(&(self.current, symbol)) {
            Some(&next) => {
                self.current = next;
                Ok(next)
            }
            None => Err(Error::UnsupportedTransition {
                state: format!("{:?}", self.current),
                symbol: format!("{:?}", symbol),
            }),
        }
    }

    /// Symbols with a transition out of `state`
    pub fn symbols_from(&self, state: S) -> impl Iterator<Item = Y> + '_ {
        self.transitions
            .keys()
            .filter(move |(from, _)| *from == state)
            .map(|(_, symbol)| *symbol)
    }

    /// Current state
    pub fn current_state(&self) -> S {
        self.current
    }

    /// Initial state
    pub fn initial_state(&self) -> S {
        self.initial
    }

    /// Check if the symbols accepted so far form a complete word
    pub fn is_valid(&self) -> bool {
        self.finals.contains(&self.current)
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `a b* c`
    fn abc() -> Dfa<u8, char> {
        let mut dfa = Dfa::new(0);
        dfa.add_transition(0, 'a', 1);
        dfa.add_transition(1, 'b', 1);
        dfa.add_transition(1, 'c', 2);
        dfa.add_final_state(2);
        dfa
    }

    #[test]
    fn test_accepts_word() {
        let mut dfa = abc();
        assert!(!dfa.is_valid());
        assert_eq!(dfa.add_symbol('a').unwrap(), 1);
        assert_eq!(dfa.add_symbol('b').unwrap(), 1);
        assert_eq!(dfa.add_symbol('c').unwrap(), 2);
        assert!(dfa.is_valid());
        assert_eq!(dfa.current_state(), 2);
    }

    #[test]
    fn test_rejects_unknown_transition() {
        let mut dfa = abc();
        assert!(!dfa.accepts('b'));
        let err = dfa.add_symbol('b').unwrap_err();
        assert!(matches!(err, Error::UnsupportedTransition { .. }));
        // a failed symbol leaves the state untouched
        assert_eq!(dfa.current_state(), 0);
    }

    #[test]
    fn test_final_state_is_idempotent() {
        let mut dfa = abc();
        dfa.add_final_state(2);
        dfa.add_final_state(2);
        dfa.add_symbol('a').unwrap();
        dfa.add_symbol('c').unwrap();
        assert!(dfa.is_valid());
    }

    #[test]
    fn test_overwrite_returns_previous_target() {
        let mut dfa = abc();
        assert_eq!(dfa.add_transition(1, 'c', 3), Some(2));
        dfa.add_symbol('a').unwrap();
        dfa.add_symbol('c').unwrap();
        assert_eq!(dfa.current_state(), 3);
        assert!(!dfa.is_valid());
    }

    #[test]
    fn test_symbols_from_and_reset() {
        let mut dfa = abc();
        dfa.add_symbol('a').unwrap();
        let mut symbols: Vec<char> = dfa.symbols_from(dfa.current_state()).collect();
        symbols.sort();
        assert_eq!(symbols, vec!['b', 'c']);

        dfa.reset();
        assert_eq!(dfa.current_state(), dfa.initial_state());
    }
}
