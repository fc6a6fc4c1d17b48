//! # Grants
//!
//! A grant is one fully-resolved reward handed to the host. Materializing the
//! item, placing it into a container, and falling back to dropping or
//! discarding it on overflow all belong to the host's [`GrantSink`].

/// A concrete reward produced by one successful draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardGrant {
    /// Item type to create.
    pub item_key: String,
    /// Custom name, if any.
    pub display_name: Option<String>,
    /// Cosmetic variant, 0 for none.
    pub variant_id: u64,
    /// Amount to create. Always > 0.
    pub quantity: u32,
}

/// Where a granted item ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrantOutcome {
    /// Moved into the destination container.
    Placed,
    /// Container was full; dropped into the world next to its owner.
    Dropped,
    /// Container was full and had no owner to drop near; item destroyed.
    Discarded,
}

/// Host capability that materializes and places granted items.
pub trait GrantSink {
    /// Materializes `grant` and reports where it went.
    fn grant(&mut self, grant: &RewardGrant) -> GrantOutcome;
}

/// Collects grants in emission order.
impl GrantSink for Vec<RewardGrant> {
    fn grant(&mut self, grant: &RewardGrant) -> GrantOutcome {
        self.push(grant.clone());
        GrantOutcome::Placed
    }
}

/// Host capability that plays the completion cue of an unwrap.
pub trait CompletionEffect {
    /// Plays the cue for an unwrap of `trigger_key`.
    fn play(&mut self, trigger_key: &str);
}

/// No cue.
impl CompletionEffect for () {
    fn play(&mut self, _trigger_key: &str) {}
}

/// Counts from one resolution run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrantSummary {
    /// Number of draws performed.
    pub draws: u32,
    /// Draws that produced a grant.
    pub granted: u32,
    /// Grants placed into the container.
    pub placed: u32,
    /// Grants dropped into the world.
    pub dropped: u32,
    /// Grants destroyed.
    pub discarded: u32,
}

impl GrantSummary {
    /// Records where one grant ended up.
    pub fn record(&mut self, outcome: GrantOutcome) {
        self.granted += 1;
        match outcome {
            GrantOutcome::Placed => self.placed += 1,
            GrantOutcome::Dropped => self.dropped += 1,
            GrantOutcome::Discarded => self.discarded += 1,
        }
    }

    /// Draws that produced nothing.
    #[inline]
    #[must_use]
    pub const fn empty_draws(&self) -> u32 {
        self.draws.saturating_sub(self.granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<RewardGrant> = Vec::new();
        for quantity in 1..=3 {
            let outcome = sink.grant(&RewardGrant {
                item_key: "scrap".to_string(),
                display_name: None,
                variant_id: 0,
                quantity,
            });
            assert_eq!(outcome, GrantOutcome::Placed);
        }
        let quantities: Vec<u32> = sink.iter().map(|g| g.quantity).collect();
        assert_eq!(quantities, [1, 2, 3]);
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = GrantSummary {
            draws: 5,
            ..GrantSummary::default()
        };
        summary.record(GrantOutcome::Placed);
        summary.record(GrantOutcome::Dropped);
        summary.record(GrantOutcome::Discarded);
        summary.record(GrantOutcome::Placed);

        assert_eq!(summary.granted, 4);
        assert_eq!(summary.placed, 2);
        assert_eq!(summary.dropped, 1);
        assert_eq!(summary.discarded, 1);
        assert_eq!(summary.empty_draws(), 1);
    }
}
