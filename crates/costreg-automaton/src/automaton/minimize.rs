//! Trimming and partition-refinement minimization.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use costreg_core::{StateId, Symbol};

use super::Automaton;

/// Block signature: own block plus, per symbol, the set of destination blocks.
type Signature = (usize, Vec<(Symbol, Vec<usize>)>);

impl Automaton {
    /// Removes states unreachable from the initial state or unable to reach
    /// a final state, renumbering the survivors in increasing order.
    ///
    /// An empty language leaves a single non-final initial state. Without an
    /// initial state this is a no-op.
    pub fn trim(&mut self) {
        let Some(initial) = self.initial else {
            return;
        };
        let reachable = self.forward_closure(initial);
        let productive = self.backward_closure();
        let useful: Vec<bool> = (0..self.nb_states())
            .map(|s| reachable[s] && productive[s])
            .collect();

        if !useful[initial] {
            let alphabet = std::mem::take(&mut self.alphabet);
            *self = Automaton::with_states(1);
            self.initial = Some(0);
            self.alphabet = alphabet;
            return;
        }
        if useful.iter().all(|&u| u) {
            return;
        }

        let mut renumber = vec![usize::MAX; self.nb_states()];
        let mut next = 0;
        for state in 0..self.nb_states() {
            if useful[state] {
                renumber[state] = next;
                next += 1;
            }
        }
        self.quotient(&renumber, next, |state| useful[state]);
    }

    /// Collapses language-equivalent states in place.
    ///
    /// Trims first, then refines `{final, non-final}` by transition
    /// signatures until stable. Distinct symbols are distinct letters, so
    /// states told apart only by different symbols are never merged. The
    /// result is renumbered breadth-first from the initial state, which gets
    /// id 0.
    pub fn minimize(&mut self) {
        self.trim();
        let Some(initial) = self.initial else {
            return;
        };

        let n = self.nb_states();
        let mut block: Vec<usize> = self.finals.iter().map(|&f| usize::from(f)).collect();
        let mut nb_blocks = block.iter().copied().collect::<BTreeSet<_>>().len();
        loop {
            let mut ids: HashMap<Signature, usize> = HashMap::new();
            let mut refined = Vec::with_capacity(n);
            for state in 0..n {
                let signature = self.signature(state, &block);
                let fresh = ids.len();
                refined.push(*ids.entry(signature).or_insert(fresh));
            }
            let refined_count = ids.len();
            block = refined;
            if refined_count == nb_blocks {
                break;
            }
            nb_blocks = refined_count;
        }

        // breadth-first numbering of the blocks from the initial one
        let mut order = vec![usize::MAX; nb_blocks];
        let mut representative = vec![usize::MAX; nb_blocks];
        for state in (0..n).rev() {
            representative[block[state]] = state;
        }
        let mut queue = VecDeque::from([block[initial]]);
        order[block[initial]] = 0;
        let mut next = 1;
        while let Some(b) = queue.pop_front() {
            for destinations in self.out[representative[b]].values() {
                for &destination in destinations {
                    let target = block[destination];
                    if order[target] == usize::MAX {
                        order[target] = next;
                        next += 1;
                        queue.push_back(target);
                    }
                }
            }
        }

        let renumber: Vec<usize> = (0..n).map(|state| order[block[state]]).collect();
        self.quotient(&renumber, next, |state| representative[block[state]] == state);
    }

    /// Rebuilds the automaton over `nb_states` new states; `renumber` maps
    /// old ids to new ones and only states passing `keep` contribute arcs.
    fn quotient<F>(&mut self, renumber: &[usize], nb_states: usize, keep: F)
    where
        F: Fn(StateId) -> bool,
    {
        let mut finals = vec![false; nb_states];
        let mut out: Vec<BTreeMap<Symbol, BTreeSet<StateId>>> = vec![BTreeMap::new(); nb_states];
        for state in 0..self.nb_states() {
            if !keep(state) || renumber[state] >= nb_states {
                continue;
            }
            let origin = renumber[state];
            finals[origin] |= self.finals[state];
            for (&symbol, destinations) in &self.out[state] {
                for &destination in destinations {
                    let target = renumber[destination];
                    if target < nb_states {
                        out[origin].entry(symbol).or_default().insert(target);
                    }
                }
            }
        }
        self.initial = self.initial.map(|s| renumber[s]);
        self.finals = finals;
        self.out = out;
    }

    fn signature(&self, state: StateId, block: &[usize]) -> Signature {
        let arcs = self.out[state]
            .iter()
            .map(|(&symbol, destinations)| {
                let blocks: BTreeSet<usize> = destinations.iter().map(|&d| block[d]).collect();
                (symbol, blocks.into_iter().collect())
            })
            .collect();
        (block[state], arcs)
    }

    fn forward_closure(&self, from: StateId) -> Vec<bool> {
        let mut seen = vec![false; self.nb_states()];
        let mut stack = vec![from];
        seen[from] = true;
        while let Some(state) = stack.pop() {
            for destinations in self.out[state].values() {
                for &destination in destinations {
                    if !seen[destination] {
                        seen[destination] = true;
                        stack.push(destination);
                    }
                }
            }
        }
        seen
    }

    fn backward_closure(&self) -> Vec<bool> {
        let n = self.nb_states();
        let mut predecessors: Vec<Vec<StateId>> = vec![Vec::new(); n];
        for (origin, arcs) in self.out.iter().enumerate() {
            for destinations in arcs.values() {
                for &destination in destinations {
                    predecessors[destination].push(origin);
                }
            }
        }
        let mut seen = self.finals.clone();
        let mut stack: Vec<StateId> = self.final_states().collect();
        while let Some(state) = stack.pop() {
            for &origin in &predecessors[state] {
                if !seen[origin] {
                    seen[origin] = true;
                    stack.push(origin);
                }
            }
        }
        seen
    }
}
