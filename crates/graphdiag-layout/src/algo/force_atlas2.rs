//! ForceAtlas2 (Jacomy et al., 2014), following graphology's iteration scheme.
//!
//! Only the linear, non-size-adjusting variant is implemented: repulsion is the exact pairwise
//! sum, attraction is linear in distance and scaled by edge weight, and per-node speed comes
//! from the swinging/traction ratio of consecutive force vectors.

use super::IterativeLayout;
use crate::graph::{Body, Spring};

/// Order above which graphology would switch on the Barnes-Hut approximation.
pub const BARNES_HUT_THRESHOLD: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceAtlas2Settings {
    pub gravity: f64,
    pub scaling_ratio: f64,
    pub slow_down: f64,
    pub strong_gravity_mode: bool,
    pub edge_weight_influence: f64,
    /// Recorded for parity with graphology's inferred settings; repulsion is always exact.
    pub barnes_hut_optimize: bool,
}

impl Default for ForceAtlas2Settings {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            scaling_ratio: 1.0,
            slow_down: 1.0,
            strong_gravity_mode: false,
            edge_weight_influence: 1.0,
            barnes_hut_optimize: false,
        }
    }
}

impl ForceAtlas2Settings {
    /// graphology's `inferSettings` for a graph with `order` nodes.
    pub fn infer(order: usize) -> Self {
        Self {
            gravity: 0.05,
            scaling_ratio: 10.0,
            slow_down: 1.0 + (order.max(1) as f64).ln(),
            strong_gravity_mode: true,
            barnes_hut_optimize: order > BARNES_HUT_THRESHOLD,
            ..Self::default()
        }
    }
}

/// The default delegated collaborator.
///
/// With `settings: None` the settings are inferred from the body count at every run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceAtlas2 {
    pub settings: Option<ForceAtlas2Settings>,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    mass: f64,
    dx: f64,
    dy: f64,
    old_dx: f64,
    old_dy: f64,
}

impl ForceAtlas2 {
    pub fn with_settings(settings: ForceAtlas2Settings) -> Self {
        Self {
            settings: Some(settings),
        }
    }

    fn iterate(s: &ForceAtlas2Settings, bodies: &mut [Body], springs: &[Spring], st: &mut [NodeState]) {
        for n in st.iter_mut() {
            n.old_dx = n.dx;
            n.old_dy = n.dy;
            n.dx = 0.0;
            n.dy = 0.0;
        }

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let x_dist = bodies[i].x - bodies[j].x;
                let y_dist = bodies[i].y - bodies[j].y;
                let d2 = x_dist * x_dist + y_dist * y_dist;
                if d2 > 0.0 {
                    let factor = s.scaling_ratio * st[i].mass * st[j].mass / d2;
                    st[i].dx += x_dist * factor;
                    st[i].dy += y_dist * factor;
                    st[j].dx -= x_dist * factor;
                    st[j].dy -= y_dist * factor;
                }
            }
        }

        for (body, n) in bodies.iter().zip(st.iter_mut()) {
            let factor = if s.strong_gravity_mode {
                n.mass * s.gravity
            } else {
                let d = body.x.hypot(body.y);
                if d > 0.0 {
                    n.mass * s.gravity / d
                } else {
                    0.0
                }
            };
            n.dx -= body.x * factor;
            n.dy -= body.y * factor;
        }

        for sp in springs {
            let ewc = if s.edge_weight_influence == 0.0 {
                1.0
            } else {
                sp.weight.powf(s.edge_weight_influence)
            };
            let x_dist = bodies[sp.a].x - bodies[sp.b].x;
            let y_dist = bodies[sp.a].y - bodies[sp.b].y;
            let factor = -ewc;
            st[sp.a].dx += x_dist * factor;
            st[sp.a].dy += y_dist * factor;
            st[sp.b].dx -= x_dist * factor;
            st[sp.b].dy -= y_dist * factor;
        }

        for (body, n) in bodies.iter_mut().zip(st.iter()) {
            if body.fixed {
                continue;
            }
            let swinging = n.mass * (n.old_dx - n.dx).hypot(n.old_dy - n.dy);
            let traction = (n.old_dx + n.dx).hypot(n.old_dy + n.dy) / 2.0;
            let speed = 0.1 * (1.0 + traction).ln() / (1.0 + swinging.sqrt());
            body.x += n.dx * (speed / s.slow_down);
            body.y += n.dy * (speed / s.slow_down);
        }
    }
}

impl IterativeLayout for ForceAtlas2 {
    fn name(&self) -> &str {
        "forceatlas2"
    }

    fn run(&self, bodies: &mut [Body], springs: &[Spring], iterations: usize) {
        if bodies.is_empty() {
            return;
        }
        let settings = self
            .settings
            .unwrap_or_else(|| ForceAtlas2Settings::infer(bodies.len()));

        let mut st = vec![NodeState::default(); bodies.len()];
        for sp in springs {
            st[sp.a].mass += 1.0;
            st[sp.b].mass += 1.0;
        }
        for n in &mut st {
            n.mass += 1.0;
        }

        tracing::debug!(
            bodies = bodies.len(),
            springs = springs.len(),
            slow_down = settings.slow_down,
            "forceatlas2"
        );
        for iteration in 0..iterations {
            Self::iterate(&settings, bodies, springs, &mut st);
            tracing::trace!(iteration, "forceatlas2 step");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(x: f64, y: f64) -> Body {
        Body { x, y, fixed: false }
    }

    #[test]
    fn inferred_settings_follow_graph_order() {
        let s = ForceAtlas2Settings::infer(1);
        assert_eq!(s.slow_down, 1.0);
        assert!(s.strong_gravity_mode);
        assert_eq!(s.gravity, 0.05);
        assert_eq!(s.scaling_ratio, 10.0);
        assert!(!s.barnes_hut_optimize);

        let s = ForceAtlas2Settings::infer(2001);
        assert!(s.barnes_hut_optimize);
        assert!((s.slow_down - (1.0 + 2001f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn connected_bodies_end_closer_than_they_started() {
        let mut bodies = [body(-300.0, 0.0), body(300.0, 10.0)];
        let springs = [Spring {
            a: 0,
            b: 1,
            weight: 1.0,
        }];
        ForceAtlas2::default().run(&mut bodies, &springs, 50);
        let d = (bodies[0].x - bodies[1].x).hypot(bodies[0].y - bodies[1].y);
        assert!(d < 600.0, "{bodies:?}");
        assert!(bodies.iter().all(|b| b.x.is_finite() && b.y.is_finite()));
    }

    #[test]
    fn single_body_is_pulled_towards_origin() {
        let mut bodies = [body(50.0, -50.0)];
        ForceAtlas2::default().run(&mut bodies, &[], 10);
        assert!(bodies[0].x.hypot(bodies[0].y) < 50.0f64.hypot(50.0));
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let mut bodies: [Body; 0] = [];
        ForceAtlas2::default().run(&mut bodies, &[], 50);
    }
}
