//! Circular cup sequence with O(1) relinking
//!
//! Cup labels are dense (`1..=N`), so the ring is stored as a successor table
//! indexed by label: `next[label]` is the label of the cup clockwise of
//! `label`. The table doubles as the label index, and moving a run of cups is
//! three writes regardless of ring size.

use std::fmt;

use tracing::debug;

use crate::error::SimError;

/// Number of cups picked up after the current cup each round
pub const PICK_UP: usize = 3;

/// Smallest ring that always has a destination outside the picked-up cups
const MIN_CUPS: usize = PICK_UP + 1;

/// A ring of labeled cups played by the crab's cup game
///
/// # Example
///
/// ```
/// use aoc_sim::CupRing;
///
/// let mut ring = CupRing::new(&[3, 8, 9, 1, 2, 5, 4, 6, 7], None).unwrap();
/// ring.run_rounds(100).unwrap();
/// let order: String = ring.labels_after(1).unwrap().iter().map(u32::to_string).collect();
/// assert_eq!(order, "67384529");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CupRing {
    /// Successor table; slot 0 is unused
    next: Vec<u32>,
    current: u32,
    rounds_played: u64,
}

impl CupRing {
    /// Build a ring from cup labels in clockwise order
    ///
    /// With `extend_to`, cups labeled `N+1..=extend_to` are appended after the
    /// last given cup before the ring closes back onto the first one. An
    /// `extend_to` not larger than the input length adds nothing.
    ///
    /// # Errors
    /// `SimError::Configuration` if `labels` is empty or the labels are not
    /// exactly `1..=labels.len()` in some order (zero, duplicate or gapped).
    pub fn new(labels: &[u32], extend_to: Option<u32>) -> Result<Self, SimError> {
        let (&first, &last_given) = labels
            .first()
            .zip(labels.last())
            .ok_or_else(|| SimError::Configuration("a ring needs at least one cup".into()))?;

        let count = labels.len();
        let mut seen = vec![false; count + 1];
        for &label in labels {
            let slot = label as usize;
            if label == 0 {
                return Err(SimError::Configuration("cup labels must be positive, found 0".into()));
            }
            if slot > count {
                return Err(SimError::Configuration(format!(
                    "cup labels must be dense 1..={count}, found {label}"
                )));
            }
            if seen[slot] {
                return Err(SimError::Configuration(format!("duplicate cup label {label}")));
            }
            seen[slot] = true;
        }

        let total = extend_to.map_or(count, |n| (n as usize).max(count));
        let mut next = vec![0u32; total + 1];
        for pair in labels.windows(2) {
            next[pair[0] as usize] = pair[1];
        }

        let mut last = last_given;
        for label in (count as u32 + 1)..=(total as u32) {
            next[last as usize] = label;
            last = label;
        }
        next[last as usize] = first;

        Ok(Self {
            next,
            current: first,
            rounds_played: 0,
        })
    }

    /// Number of cups in the ring
    pub fn len(&self) -> usize {
        self.next.len() - 1
    }

    /// Always false: construction rejects empty rings
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label of the cup the next round starts from
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Total rounds executed over the ring's lifetime
    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    /// Play `rounds` rounds of the game
    ///
    /// # Errors
    /// - `SimError::Configuration` if rounds are requested on fewer than four cups
    /// - `SimError::InvariantViolation` if a destination cup cannot be found
    pub fn run_rounds(&mut self, rounds: usize) -> Result<(), SimError> {
        if rounds == 0 {
            return Ok(());
        }
        if self.len() < MIN_CUPS {
            return Err(SimError::Configuration(format!(
                "the cup game needs at least {MIN_CUPS} cups, ring has {}",
                self.len()
            )));
        }

        debug!(cups = self.len(), rounds, current = self.current, "playing cup game");
        for _ in 0..rounds {
            self.round()?;
        }
        self.rounds_played += rounds as u64;
        debug!(current = self.current, total_rounds = self.rounds_played, "cup game paused");
        Ok(())
    }

    fn round(&mut self) -> Result<(), SimError> {
        let current = self.current;
        let first = self.next[current as usize];
        let second = self.next[first as usize];
        let third = self.next[second as usize];

        // excise
        self.next[current as usize] = self.next[third as usize];

        let destination = self.destination(current, [first, second, third])?;

        // splice after destination, keeping first..third linked
        self.next[third as usize] = self.next[destination as usize];
        self.next[destination as usize] = first;

        self.current = self.next[current as usize];
        Ok(())
    }

    /// Label search downward from `current - 1`, wrapping to the highest label
    fn destination(&self, current: u32, picked: [u32; PICK_UP]) -> Result<u32, SimError> {
        let max_label = self.len() as u32;
        let mut label = current;
        for _ in 0..max_label {
            label = if label <= 1 { max_label } else { label - 1 };
            if !picked.contains(&label) {
                return Ok(label);
            }
        }
        Err(SimError::InvariantViolation(format!(
            "no destination cup for current cup {current}"
        )))
    }

    /// Labels clockwise from just after `label` until `label` comes around again
    ///
    /// # Errors
    /// `SimError::Configuration` if no cup carries `label`.
    pub fn labels_after(&self, label: u32) -> Result<Vec<u32>, SimError> {
        self.check_label(label)?;

        let mut labels = Vec::with_capacity(self.len() - 1);
        let mut cup = self.next[label as usize];
        while cup != label {
            if labels.len() >= self.len() {
                return Err(SimError::InvariantViolation(format!(
                    "walk from cup {label} never returned to it"
                )));
            }
            labels.push(cup);
            cup = self.next[cup as usize];
        }
        Ok(labels)
    }

    /// Product of the labels of the two cups clockwise of `label`
    ///
    /// # Errors
    /// `SimError::Configuration` if no cup carries `label`.
    pub fn product_of_two_after(&self, label: u32) -> Result<u64, SimError> {
        self.check_label(label)?;
        let first = self.next[label as usize];
        let second = self.next[first as usize];
        Ok(u64::from(first) * u64::from(second))
    }

    /// Check that the successor table forms one cycle through every cup
    ///
    /// # Errors
    /// `SimError::InvariantViolation` describing where the walk went wrong.
    pub fn verify_cycle(&self) -> Result<(), SimError> {
        let mut visited = 1;
        let mut cup = self.next[self.current as usize];
        while cup != self.current {
            if cup == 0 || visited > self.len() {
                return Err(SimError::InvariantViolation(format!(
                    "ring walk from cup {} broke after {visited} cups",
                    self.current
                )));
            }
            visited += 1;
            cup = self.next[cup as usize];
        }

        if visited == self.len() {
            Ok(())
        } else {
            Err(SimError::InvariantViolation(format!(
                "ring cycle visits {visited} of {} cups",
                self.len()
            )))
        }
    }

    fn check_label(&self, label: u32) -> Result<(), SimError> {
        if label == 0 || label as usize > self.len() {
            return Err(SimError::Configuration(format!(
                "no cup labeled {label} in a ring of {}",
                self.len()
            )));
        }
        Ok(())
    }
}

/// Renders as `(3) 8 9 1 2 5 4 6 7`, starting at the current cup
impl fmt::Display for CupRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.current)?;
        let mut cup = self.next[self.current as usize];
        while cup != self.current {
            write!(f, " {cup}")?;
            cup = self.next[cup as usize];
        }
        Ok(())
    }
}
