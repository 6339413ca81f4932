//! Fixed timestep simulation tick
//!
//! One call advances the session by one host frame: deferred tasks first,
//! then input, then kinematics and contact routing.

use super::collision::classify;
use super::entity::EntityKind;
use super::state::{Session, SessionEvent, SessionPhase};

/// Edge-triggered input signals for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump button went down this tick
    pub jump_pressed: bool,
    /// Start button went down this tick
    pub start_pressed: bool,
    /// Demo mode - the autopilot plays the game
    pub autopilot: bool,
}

/// Turns a held button level into a press edge, so holding never repeat-fires
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    was_down: bool,
}

impl EdgeTrigger {
    /// Feed the current level; true only on the not-pressed -> pressed transition
    pub fn update(&mut self, down: bool) -> bool {
        let fired = down && !self.was_down;
        self.was_down = down;
        fired
    }
}

/// Advance the session by one tick of `dt` seconds
pub fn advance(session: &mut Session, input: &TickInput, dt: f32) -> Vec<SessionEvent> {
    let mut events = Vec::new();

    // A bad host delta must not stall the clock or fire every task at once
    let dt = if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Ignoring invalid tick delta {}", dt);
        0.0
    };

    session.time_ticks += 1;
    session.now_ms += f64::from(dt) * 1000.0;
    session.run_due_tasks(&mut events);

    let mut input = input.clone();
    if input.autopilot {
        autopilot(session, &mut input);
    }

    match session.phase {
        SessionPhase::Menu => {
            if input.start_pressed {
                // The start tick only resets; motion begins next tick
                session.start_run(&mut events);
            }
        }

        SessionPhase::Playing => {
            let config = &session.config;
            if input.jump_pressed && session.player.jump(config.jump_impulse, config.jump_tilt) {
                events.push(SessionEvent::Jumped);
            }

            session
                .player
                .update(dt, config.gravity, config.tilt_rate, config.max_tilt);
            for obstacle in &mut session.obstacles {
                obstacle.integrate(dt, 0.0);
            }
            session.obstacles.retain(|o| !o.is_past_left_edge());

            let contacts = classify(
                &session.player.body,
                &session.obstacles,
                config.ground_y,
                config.field_height,
            );
            // Death wins over scoring within the same tick
            if let Some(cause) = contacts.blocking {
                session.end_run(cause, &mut events);
            } else {
                for gate in contacts.gates {
                    session.gap_passed(gate, &mut events);
                }
            }
        }

        SessionPhase::GameOver => {
            // Frozen obstacles stay put; the body falls onto the ground
            let config = &session.config;
            session
                .player
                .update(dt, config.gravity, config.tilt_rate, config.max_tilt);
            session.player.rest_on(config.ground_y);
        }
    }

    events
}

/// Demo AI: starts runs from the menu and flaps toward the next gap
fn autopilot(session: &Session, input: &mut TickInput) {
    match session.phase {
        SessionPhase::Menu => input.start_pressed = true,
        SessionPhase::Playing => {
            let body = &session.player.body;
            let reach = body.pos.x - body.shape.half_extents().x;

            // Nearest row whose gates are not yet fully behind the player
            let next_row_x = session
                .obstacles
                .iter()
                .filter(|o| matches!(o.kind, EntityKind::Gate { .. }))
                .filter(|o| o.pos.x + o.shape.half_extents().x >= reach)
                .map(|o| o.pos.x)
                .min_by(|a, b| a.total_cmp(b));

            let target_y = match next_row_x {
                Some(x) => {
                    let (sum, count) = session
                        .obstacles
                        .iter()
                        .filter(|o| matches!(o.kind, EntityKind::Gate { .. }) && o.pos.x == x)
                        .fold((0.0, 0u32), |(sum, n), o| (sum + o.pos.y, n + 1));
                    sum / count.max(1) as f32
                }
                None => session.config.ground_y / 2.0,
            };

            // Flap once a full radius below the gap centre; the rise then
            // peaks near the centre instead of reaching the upper pipe
            let margin = body.shape.half_extents().y;
            input.jump_pressed = body.vel.y > 0.0 && body.pos.y > target_y + margin;
        }
        SessionPhase::GameOver => {}
    }
}
