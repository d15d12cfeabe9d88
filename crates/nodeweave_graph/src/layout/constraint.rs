// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pairwise positional constraints.
//!
//! Each constraint is a scalar function `C` of one coordinate of two bodies
//! with unit gradient components. A correction is a single Lagrange step
//! `Δ = -C / |∇C|² · ∇C`, scaled by a relaxation rate and applied in place so
//! later constraints in the same sweep see the updated positions.

/// Horizontal axis
const X: usize = 0;
/// Vertical axis
const Y: usize = 1;

/// Layout state of one node during relaxation
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Body {
    /// Top-left corner
    pub position: [f64; 2],
    pub width: f64,
    /// Resolved through the height fallback chain
    pub height: f64,
}

impl Body {
    fn center(&self) -> [f64; 2] {
        [
            self.position[X] + 0.5 * self.width,
            self.position[Y] - 0.5 * self.height,
        ]
    }

    fn half_extents(&self, margin: f64) -> [f64; 2] {
        [0.5 * self.width + margin, 0.5 * self.height + margin]
    }
}

/// A link resolved to body indices and socket stacking indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LinkConstraint {
    pub from: usize,
    pub to: usize,
    pub from_socket: usize,
    pub to_socket: usize,
}

/// Apply one scaled Lagrange step and return the squared size of the applied deltas
fn project(
    bodies: &mut [Body],
    (a, b): (usize, usize),
    axis: usize,
    c: f64,
    (grad_a, grad_b): (f64, f64),
    k: f64,
) -> f64 {
    let lagrange = c / (grad_a * grad_a + grad_b * grad_b);
    let delta_a = -lagrange * grad_a;
    let delta_b = -lagrange * grad_b;

    bodies[a].position[axis] += k * delta_a;
    bodies[b].position[axis] += k * delta_b;

    k * k * (delta_a * delta_a + delta_b * delta_b)
}

/// Pull or push a linked pair toward `target` horizontal spacing.
///
/// One-sided beyond `target × threshold_factor`: pairs that are already far
/// enough apart are never pulled back together.
pub(crate) fn solve_spacing(
    bodies: &mut [Body],
    link: &LinkConstraint,
    target: f64,
    threshold_factor: f64,
    k: f64,
) -> f64 {
    let from = bodies[link.from];
    let to = bodies[link.to];
    let gap = to.position[X] - from.position[X] - from.width;
    let c = gap - target;

    if c >= target * threshold_factor {
        return 0.0;
    }

    project(bodies, (link.from, link.to), X, c, (-1.0, 1.0), k)
}

/// Bring the linked sockets of a pair to the same height
pub(crate) fn solve_alignment(
    bodies: &mut [Body],
    link: &LinkConstraint,
    socket_offset: f64,
    k: f64,
) -> f64 {
    let y_from = bodies[link.from].position[Y] - socket_offset * link.from_socket as f64;
    let y_to = bodies[link.to].position[Y] - socket_offset * link.to_socket as f64;
    let c = y_from - y_to;

    project(bodies, (link.from, link.to), Y, c, (1.0, -1.0), k)
}

/// Push two margin-inflated boxes apart along the cheaper axis
pub(crate) fn separate(bodies: &mut [Body], a: usize, b: usize, margin: f64, k: f64) -> f64 {
    let center_a = bodies[a].center();
    let center_b = bodies[b].center();
    let extent_a = bodies[a].half_extents(margin);
    let extent_b = bodies[b].half_extents(margin);

    let slack = [
        (center_a[X] - center_b[X]).abs() - (extent_a[X] + extent_b[X]),
        (center_a[Y] - center_b[Y]).abs() - (extent_a[Y] + extent_b[Y]),
    ];

    // Separated on either axis
    if slack[X] >= 0.0 || slack[Y] >= 0.0 {
        return 0.0;
    }

    let axis = if slack[X] > slack[Y] { X } else { Y };
    let grad = if center_a[axis] - center_b[axis] >= 0.0 { 1.0 } else { -1.0 };
    project(bodies, (a, b), axis, slack[axis], (grad, -grad), k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(x: f64, y: f64, width: f64, height: f64) -> Body {
        Body {
            position: [x, y],
            width,
            height,
        }
    }

    const LINK: LinkConstraint = LinkConstraint {
        from: 0,
        to: 1,
        from_socket: 0,
        to_socket: 0,
    };

    #[test]
    fn test_spacing_full_step_reaches_target() {
        let mut bodies = [body(0.0, 0.0, 140.0, 200.0), body(100.0, 0.0, 140.0, 200.0)];
        // gap = -40, C = -90, each side moves 45
        let squared = solve_spacing(&mut bodies, &LINK, 50.0, 2.0, 1.0);

        assert_eq!(bodies[0].position[X], -45.0);
        assert_eq!(bodies[1].position[X], 145.0);
        assert_eq!(squared, 2.0 * 45.0 * 45.0);
    }

    #[test]
    fn test_spacing_skips_distant_pairs() {
        let mut bodies = [body(0.0, 0.0, 100.0, 200.0), body(260.0, 0.0, 100.0, 200.0)];
        // gap = 160, C = 110 >= 100
        assert_eq!(solve_spacing(&mut bodies, &LINK, 50.0, 2.0, 0.5), 0.0);
        assert_eq!(bodies[1].position[X], 260.0);

        // Just inside the threshold the pair is pulled together
        bodies[1].position[X] = 249.0;
        assert!(solve_spacing(&mut bodies, &LINK, 50.0, 2.0, 0.5) > 0.0);
        assert!(bodies[1].position[X] < 249.0);
    }

    #[test]
    fn test_alignment_uses_socket_index() {
        let link = LinkConstraint {
            to_socket: 2,
            ..LINK
        };
        let mut bodies = [body(0.0, 0.0, 140.0, 200.0), body(200.0, 0.0, 140.0, 200.0)];
        solve_alignment(&mut bodies, &link, 20.0, 1.0);

        // Source socket ends level with the destination's third socket
        let y_to_socket = bodies[1].position[Y] - 40.0;
        assert_eq!(bodies[0].position[Y], y_to_socket);
        assert_eq!(bodies[0].position[Y], -20.0);
        assert_eq!(bodies[1].position[Y], 20.0);
    }

    #[test]
    fn test_separate_picks_cheaper_axis() {
        // Wide boxes stacked almost on top of each other: vertical is cheaper
        let mut bodies = [body(0.0, 0.0, 300.0, 50.0), body(10.0, -10.0, 300.0, 50.0)];
        separate(&mut bodies, 0, 1, 0.0, 1.0);
        assert_eq!(bodies[0].position[X], 0.0);
        assert_eq!(bodies[1].position[X], 10.0);
        let gap = bodies[0].position[Y] - bodies[0].height - bodies[1].position[Y];
        assert!(gap.abs() < 1e-9);
        assert!(bodies[0].position[Y] > bodies[1].position[Y]);
    }

    #[test]
    fn test_separate_ignores_disjoint_boxes() {
        let mut bodies = [body(0.0, 0.0, 100.0, 100.0), body(0.0, -500.0, 100.0, 100.0)];
        assert_eq!(separate(&mut bodies, 0, 1, 25.0, 0.9), 0.0);
        assert_eq!(bodies[1].position, [0.0, -500.0]);
    }

    #[test]
    fn test_separate_coincident_boxes_is_deterministic() {
        let mut bodies = [body(0.0, 0.0, 100.0, 200.0), body(0.0, 0.0, 100.0, 200.0)];
        separate(&mut bodies, 0, 1, 25.0, 1.0);
        // Ties push the first body in the positive direction
        assert_eq!(bodies[0].position[X], 75.0);
        assert_eq!(bodies[1].position[X], -75.0);
    }
}
