//! Per-frame simulation step
//!
//! Pure state update; drawing happens separately in the renderer.

use super::state::AppState;
use crate::consts::MOVE_SPEED;

/// Advance the state by `dt` frames: the selected circle steps toward the
/// cursor, then every moon advances along its orbit.
pub fn tick(state: &mut AppState, dt: f32) {
    let cursor = state.cursor;
    state.circles.move_selected(cursor, MOVE_SPEED * dt);
    state.circles.update(dt);
    state.frame += 1;
}
