use super::IterativeLayout;
use crate::graph::{Body, Spring};

/// Quadratic-time spring embedder.
///
/// Every iteration sums, per body, an inverse-square repulsion from every other body and a
/// linear attraction along each spring, then moves the body by the damped net force. Fine for
/// tens to low hundreds of nodes; dense graphs want ForceAtlas2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleForce {
    pub repulsion: f64,
    pub attraction: f64,
    pub damping: f64,
    /// Lower bound for pair distances so coincident bodies do not divide by zero.
    pub min_distance: f64,
}

impl Default for SimpleForce {
    fn default() -> Self {
        Self {
            repulsion: 1000.0,
            attraction: 0.01,
            damping: 0.85,
            min_distance: 1.0,
        }
    }
}

impl SimpleForce {
    fn step(&self, bodies: &mut [Body], springs: &[Spring], forces: &mut [(f64, f64)]) {
        forces.fill((0.0, 0.0));

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let dx = bodies[j].x - bodies[i].x;
                let dy = bodies[j].y - bodies[i].y;
                let d = dx.hypot(dy).max(self.min_distance);
                let f = self.repulsion / (d * d);
                let (fx, fy) = (dx / d * f, dy / d * f);
                forces[i].0 -= fx;
                forces[i].1 -= fy;
                forces[j].0 += fx;
                forces[j].1 += fy;
            }
        }

        for s in springs {
            let dx = bodies[s.b].x - bodies[s.a].x;
            let dy = bodies[s.b].y - bodies[s.a].y;
            let d = dx.hypot(dy).max(self.min_distance);
            let f = d * self.attraction;
            let (fx, fy) = (dx / d * f, dy / d * f);
            forces[s.a].0 += fx;
            forces[s.a].1 += fy;
            forces[s.b].0 -= fx;
            forces[s.b].1 -= fy;
        }

        for (body, (fx, fy)) in bodies.iter_mut().zip(forces.iter()) {
            if body.fixed {
                continue;
            }
            body.x += fx * self.damping;
            body.y += fy * self.damping;
        }
    }
}

impl IterativeLayout for SimpleForce {
    fn name(&self) -> &str {
        "simple-force"
    }

    fn run(&self, bodies: &mut [Body], springs: &[Spring], iterations: usize) {
        let mut forces = vec![(0.0, 0.0); bodies.len()];
        for iteration in 0..iterations {
            self.step(bodies, springs, &mut forces);
            tracing::trace!(iteration, "simple-force step");
        }
    }
}
