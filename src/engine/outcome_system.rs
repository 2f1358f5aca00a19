use super::*;

impl TurnEngine {
    /// Read-only: the latched terminal outcome, else `Continue`. Pickup and
    /// capture are resolved only at the end of a chaser pass.
    pub fn check_outcome(&self) -> Outcome {
        self.state.outcome().unwrap_or(Outcome::Continue)
    }

    // Capture wins over pickup when both hold.
    pub(super) fn resolve_outcome(&mut self) -> Outcome {
        if let Some(outcome) = self.state.outcome() {
            return outcome;
        }

        let seeker = self.state.seeker();
        if let Some(index) = self.state.chasers().iter().position(|c| *c == seeker) {
            info!(%seeker, chaser = index, "seeker was caught by a chaser");
            self.state.finish(Outcome::Captured);
            return Outcome::Captured;
        }

        if self.state.grid().tile(seeker) != Some(Tile::Item) {
            return Outcome::Continue;
        }

        self.state.grid_mut().set_tile(seeker, Tile::Empty);
        let remaining = self.state.consume_item();
        info!(%seeker, remaining, "seeker collected an item");
        if remaining == 0 {
            info!(turn = self.state.turn(), "seeker collected every item and won");
            self.state.finish(Outcome::Won);
            return Outcome::Won;
        }
        Outcome::Continue
    }
}
