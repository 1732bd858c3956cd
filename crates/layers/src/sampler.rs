//! Rejection sampling of overlay sections as an explicit state machine.
//!
//! ```text
//!            ┌───────────────── reject ────────────────┐
//!            ▼                                         │
//!  ┌──────────────┐     ┌──────────────┐     ┌─────────┴────┐
//!  │     Draw     │────▶│   Validate   │────▶│   Accepted   │
//!  └──────────────┘     └──────┬───────┘     └──────────────┘
//!                              │ budget spent
//!                              ▼
//!                       ┌──────────────┐
//!                       │  Exhausted   │
//!                       └──────────────┘
//! ```

use lithos_prior::PriorConfig;
use rand::Rng;
use tracing::trace;

use crate::constraint::{self, Violations};
use crate::draw::{self, LayerSequence};
use crate::error::LayerError;

/// Try limits of the rejection loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectionBudget {
    max_tries: usize,
    escalate_after: usize,
}

impl RejectionBudget {
    /// Creates a budget.
    ///
    /// `max_tries` is clamped to at least 1.
    pub fn new(max_tries: usize, escalate_after: usize) -> Self {
        Self {
            max_tries: max_tries.max(1),
            escalate_after,
        }
    }

    /// Returns the total number of draws allowed.
    pub fn max_tries(&self) -> usize {
        self.max_tries
    }

    /// Returns the number of failed draws after which layer counts are
    /// redrawn on every retry.
    pub fn escalate_after(&self) -> usize {
        self.escalate_after
    }
}

impl Default for RejectionBudget {
    /// 1000 tries, escalating after 100 failures.
    fn default() -> Self {
        Self::new(1000, 100)
    }
}

/// State of a [`RejectionSampler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    /// Next step draws all overlay sections.
    Draw,
    /// Next step checks the current draw.
    Validate,
    /// The current draw satisfies every constraint. Terminal.
    Accepted,
    /// The budget is spent; the current draw is kept as is. Terminal.
    Exhausted,
}

impl SamplerState {
    /// Returns `true` for [`Accepted`](Self::Accepted) and
    /// [`Exhausted`](Self::Exhausted).
    pub fn is_terminal(self) -> bool {
        matches!(self, SamplerState::Accepted | SamplerState::Exhausted)
    }
}

/// Final draw of a [`RejectionSampler`].
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerOutcome {
    sections: Vec<Option<LayerSequence>>,
    tries: usize,
    exhausted: bool,
    violations: Violations,
}

impl SamplerOutcome {
    /// Returns one entry per overlay section; `None` for inactive sections.
    pub fn sections(&self) -> &[Option<LayerSequence>] {
        &self.sections
    }

    /// Consumes the outcome, returning the per-section sequences.
    pub fn into_sections(self) -> Vec<Option<LayerSequence>> {
        self.sections
    }

    /// Returns the number of draws made.
    pub fn tries(&self) -> usize {
        self.tries
    }

    /// Returns `true` if the budget ran out before a valid draw was found.
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    /// Returns the violations of the final draw (empty unless exhausted).
    pub fn violations(&self) -> Violations {
        self.violations
    }
}

/// Draw/validate/redraw loop over the overlay sections of a prior.
///
/// Each draw decides activity for every overlay section and draws a full
/// layer sequence for each active one. Layer counts are kept from earlier
/// draws until `escalate_after` draws have failed, after which they are
/// redrawn every time.
///
/// # Example
///
/// ```
/// use lithos_layers::{RejectionBudget, RejectionSampler};
/// use lithos_prior::{Class, PriorConfig, ResistivityPrior, Section};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let prior = PriorConfig::new(
///     vec![Class::new(1, "Sand", 1.0, 5.0, ResistivityPrior::new(100.0, 0.1))],
///     vec![
///         Section::new(vec![1], vec![1.0]).with_thickness(2.0, 8.0).with_layers(1, 3),
///         Section::new(vec![1], vec![1.0]),
///     ],
///     None,
/// )
/// .unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let outcome = RejectionSampler::new(&prior, RejectionBudget::default())
///     .run(&mut rng)
///     .unwrap();
/// assert!(!outcome.exhausted());
/// ```
#[derive(Debug, Clone)]
pub struct RejectionSampler<'a> {
    prior: &'a PriorConfig,
    budget: RejectionBudget,
    state: SamplerState,
    tries: usize,
    failed: usize,
    counts: Vec<Option<usize>>,
    current: Vec<Option<LayerSequence>>,
    violations: Violations,
}

impl<'a> RejectionSampler<'a> {
    /// Creates a sampler in the [`Draw`](SamplerState::Draw) state.
    pub fn new(prior: &'a PriorConfig, budget: RejectionBudget) -> Self {
        let n = prior.overlays().len();
        Self {
            prior,
            budget,
            state: SamplerState::Draw,
            tries: 0,
            failed: 0,
            counts: vec![None; n],
            current: vec![None; n],
            violations: Violations::default(),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// Returns the number of draws made so far.
    pub fn tries(&self) -> usize {
        self.tries
    }

    /// Returns the current draw.
    pub fn current(&self) -> &[Option<LayerSequence>] {
        &self.current
    }

    /// Advances the machine by one transition and returns the new state.
    ///
    /// Terminal states are absorbing.
    ///
    /// # Errors
    ///
    /// Propagates [`LayerError`] from the section draws.
    pub fn step(&mut self, rng: &mut impl Rng) -> Result<SamplerState, LayerError> {
        self.state = match self.state {
            SamplerState::Draw => {
                self.draw_all(rng)?;
                self.tries += 1;
                SamplerState::Validate
            }
            SamplerState::Validate => {
                self.violations = constraint::check(self.prior, &self.current);
                if self.violations.is_empty() {
                    SamplerState::Accepted
                } else {
                    self.failed += 1;
                    trace!(
                        tries = self.tries,
                        bad_layers = self.violations.layers,
                        ordering = ?self.violations.ordering,
                        "draw rejected"
                    );
                    if self.tries >= self.budget.max_tries() {
                        SamplerState::Exhausted
                    } else {
                        SamplerState::Draw
                    }
                }
            }
            terminal => terminal,
        };
        Ok(self.state)
    }

    /// Runs the machine to a terminal state.
    ///
    /// # Errors
    ///
    /// Propagates [`LayerError`] from the section draws.
    pub fn run(mut self, rng: &mut impl Rng) -> Result<SamplerOutcome, LayerError> {
        while !self.state.is_terminal() {
            self.step(rng)?;
        }
        Ok(SamplerOutcome {
            sections: self.current,
            tries: self.tries,
            exhausted: self.state == SamplerState::Exhausted,
            violations: self.violations,
        })
    }

    fn draw_all(&mut self, rng: &mut impl Rng) -> Result<(), LayerError> {
        let overlays = self.prior.overlays();
        let active: Vec<bool> = overlays
            .iter()
            .map(|section| draw::draw_active(section, rng))
            .collect();
        let escalate = self.failed >= self.budget.escalate_after();

        for (i, section) in overlays.iter().enumerate() {
            if !active[i] {
                self.current[i] = None;
                continue;
            }
            let count = match self.counts[i] {
                Some(n) if !escalate => n,
                _ => draw::draw_layer_count(section, rng),
            };
            self.counts[i] = Some(count);

            let seq = draw::draw_sequence(self.prior, i + 1, count, rng)?;
            // A zero total contributes nothing; treat it like an absent section.
            self.current[i] = if seq.total() > 0.0 { Some(seq) } else { None };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lithos_prior::{Class, ResistivityPrior, Section};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn classes() -> Vec<Class> {
        vec![
            Class::new(1, "a", 1.0, 3.0, ResistivityPrior::new(10.0, 0.1)),
            Class::new(2, "b", 2.0, 6.0, ResistivityPrior::new(50.0, 0.1)),
        ]
    }

    fn easy_prior() -> PriorConfig {
        PriorConfig::new(
            classes(),
            vec![
                Section::new(vec![1, 2], vec![1.0])
                    .with_thickness(3.0, 6.0)
                    .with_layers(1, 2),
                Section::new(vec![2], vec![1.0]),
            ],
            None,
        )
        .unwrap()
    }

    fn impossible_prior() -> PriorConfig {
        PriorConfig::new(
            classes(),
            vec![
                Section::new(vec![1], vec![1.0])
                    .with_thickness(1.0, 3.0)
                    .with_layers(1, 1),
                Section::new(vec![2], vec![1.0]).with_min_depth(50.0),
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn default_budget() {
        let b = RejectionBudget::default();
        assert_eq!(b.max_tries(), 1000);
        assert_eq!(b.escalate_after(), 100);
        assert_eq!(RejectionBudget::new(0, 0).max_tries(), 1);
    }

    #[test]
    fn states_alternate_draw_validate() {
        let prior = impossible_prior();
        let mut s = RejectionSampler::new(&prior, RejectionBudget::new(3, 1));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(s.state(), SamplerState::Draw);
        assert_eq!(s.step(&mut rng).unwrap(), SamplerState::Validate);
        assert_eq!(s.step(&mut rng).unwrap(), SamplerState::Draw);
        assert_eq!(s.tries(), 1);
        assert_eq!(s.step(&mut rng).unwrap(), SamplerState::Validate);
        assert_eq!(s.step(&mut rng).unwrap(), SamplerState::Draw);
        assert_eq!(s.step(&mut rng).unwrap(), SamplerState::Validate);
        assert_eq!(s.step(&mut rng).unwrap(), SamplerState::Exhausted);
        assert_eq!(s.tries(), 3);
        // Terminal states absorb.
        assert_eq!(s.step(&mut rng).unwrap(), SamplerState::Exhausted);
        assert_eq!(s.tries(), 3);
    }

    #[test]
    fn impossible_prior_exhausts_budget() {
        let prior = impossible_prior();
        let mut rng = StdRng::seed_from_u64(2);
        let out = RejectionSampler::new(&prior, RejectionBudget::default())
            .run(&mut rng)
            .unwrap();
        assert!(out.exhausted());
        assert_eq!(out.tries(), 1000);
        assert_eq!(out.violations().ordering, Some(2));
    }

    #[test]
    fn easy_prior_accepts() {
        let prior = easy_prior();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let out = RejectionSampler::new(&prior, RejectionBudget::default())
                .run(&mut rng)
                .unwrap();
            assert!(!out.exhausted());
            assert!(out.violations().is_empty());
            assert!(out.tries() >= 1);
            assert_eq!(out.sections().len(), 1);
        }
    }

    #[test]
    fn same_seed_same_outcome() {
        let prior = easy_prior();
        let a = RejectionSampler::new(&prior, RejectionBudget::default())
            .run(&mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = RejectionSampler::new(&prior, RejectionBudget::default())
            .run(&mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn layer_count_kept_until_escalation() {
        // Always active, ordering never satisfiable: every draw is rejected.
        let prior = PriorConfig::new(
            classes(),
            vec![
                Section::new(vec![1], vec![1.0])
                    .with_thickness(1.0, 3.0)
                    .with_layers(1, 6),
                Section::new(vec![2], vec![1.0]).with_min_depth(50.0),
            ],
            None,
        )
        .unwrap();
        let mut s = RejectionSampler::new(&prior, RejectionBudget::new(1000, 20));
        let mut rng = StdRng::seed_from_u64(4);

        let mut counts = Vec::new();
        for _ in 0..40 {
            s.step(&mut rng).unwrap();
            counts.push(s.current()[0].as_ref().unwrap().len());
            s.step(&mut rng).unwrap();
        }
        assert!(
            counts[..20].iter().all(|&c| c == counts[0]),
            "counts fixed before escalation: {counts:?}"
        );
        let distinct: std::collections::BTreeSet<_> = counts[20..].iter().collect();
        assert!(distinct.len() > 1, "counts vary after escalation: {counts:?}");
    }
}
