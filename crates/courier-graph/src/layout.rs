//! Force-directed canvas layout.
//!
//! Purely cosmetic: the pass nudges node positions so a freshly spread
//! circle settles into something readable, and it never touches weights,
//! blocked flags, or adjacency.  Three forces per iteration:
//!
//! - inverse-square repulsion between every node pair,
//! - a spring per link toward a target length scaled by route distance,
//! - gravity toward the canvas center so components don't drift offscreen.
//!
//! The pass runs a fixed iteration count and is deterministic: coincident
//! nodes are separated with a seeded RNG, and every applied step is clamped
//! and checked finite.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use courier_core::LayoutPoint;

use crate::graph::{RouteGraph, CANVAS_CENTER};

/// Iterations used by callers that don't have an opinion.
pub const DEFAULT_LAYOUT_ITERATIONS: usize = 60;

/// Seed for the coincident-node jitter, fixed so layouts are reproducible.
const LAYOUT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

const REPULSION: f32 = 24_000.0;
const SPRING: f32 = 0.06;
const GRAVITY: f32 = 0.02;
const SPRING_BASE_LEN: f32 = 60.0;
const SPRING_LEN_PER_DISTANCE: f32 = 0.4;
const MAX_SPRING_LEN: f32 = 280.0;
const MAX_STEP: f32 = 30.0;

/// Resting length for a link of the given route distance.
fn spring_target(weight: u32) -> f32 {
    (SPRING_BASE_LEN + weight as f32 * SPRING_LEN_PER_DISTANCE).min(MAX_SPRING_LEN)
}

impl RouteGraph {
    /// Run `iterations` force-directed steps over the node positions.
    ///
    /// Safe to call any time after a rebuild; a graph with fewer than two
    /// nodes is left untouched.
    pub fn relax_layout(&mut self, iterations: usize) {
        let n = self.node_count();
        if n < 2 {
            return;
        }

        let links: Vec<_> = self.links().collect();
        let mut pos: Vec<LayoutPoint> = self.nodes().iter().map(|node| node.pos).collect();
        let mut rng = SmallRng::seed_from_u64(LAYOUT_SEED);

        for _ in 0..iterations {
            let mut disp = vec![[0.0f32; 2]; n];

            // Pairwise repulsion.
            for i in 0..n {
                for j in (i + 1)..n {
                    let mut dx = pos[i].x - pos[j].x;
                    let mut dy = pos[i].y - pos[j].y;
                    if dx * dx + dy * dy < 1.0 {
                        // Coincident nodes have no direction to push along;
                        // pick one from the seeded stream.
                        dx = rng.gen_range(-1.0..=1.0);
                        dy = rng.gen_range(-1.0..=1.0);
                        if dx == 0.0 && dy == 0.0 {
                            dx = 1.0;
                        }
                    }
                    let d2 = (dx * dx + dy * dy).max(1.0);
                    let d = d2.sqrt();
                    let push = REPULSION / d2;
                    disp[i][0] += dx / d * push;
                    disp[i][1] += dy / d * push;
                    disp[j][0] -= dx / d * push;
                    disp[j][1] -= dy / d * push;
                }
            }

            // Springs along links. Longer routes rest at longer lengths.
            for link in &links {
                let (a, b) = (link.a.index(), link.b.index());
                let dx = pos[b].x - pos[a].x;
                let dy = pos[b].y - pos[a].y;
                let d = (dx * dx + dy * dy).sqrt().max(1.0);
                let pull = SPRING * (d - spring_target(link.weight));
                disp[a][0] += dx / d * pull;
                disp[a][1] += dy / d * pull;
                disp[b][0] -= dx / d * pull;
                disp[b][1] -= dy / d * pull;
            }

            // Gravity toward the canvas center.
            for (i, p) in pos.iter().enumerate() {
                disp[i][0] += (CANVAS_CENTER.x - p.x) * GRAVITY;
                disp[i][1] += (CANVAS_CENTER.y - p.y) * GRAVITY;
            }

            // Apply, clamped per step and guarded against non-finite values.
            for (i, p) in pos.iter_mut().enumerate() {
                let [mut sx, mut sy] = disp[i];
                let len = (sx * sx + sy * sy).sqrt();
                if len > MAX_STEP {
                    sx *= MAX_STEP / len;
                    sy *= MAX_STEP / len;
                }
                let next = LayoutPoint::new(p.x + sx, p.y + sy);
                if next.is_finite() {
                    *p = next;
                }
            }
        }

        for (node, p) in self.nodes_mut().iter_mut().zip(pos) {
            node.pos = p;
        }
    }
}
