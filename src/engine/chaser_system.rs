use super::*;

impl TurnEngine {
    // Index order; every chaser targets the seeker's cell as of this pass.
    pub(super) fn move_chasers(&mut self, strategy: Strategy) {
        let target = self.state.seeker();
        for index in 0..self.state.chasers().len() {
            let origin = self.state.chasers()[index];
            let step = self.choose_chaser_step(strategy, origin, target);
            if step == origin {
                if origin != target {
                    debug!(index, %origin, "chaser stalled: no path to seeker");
                }
                continue;
            }
            self.state.move_chaser(index, step);
        }
    }

    fn choose_chaser_step(&self, strategy: Strategy, origin: Vec2, target: Vec2) -> Vec2 {
        next_step(
            strategy,
            origin,
            target,
            self.state.grid(),
            self.options.search,
        )
    }
}
