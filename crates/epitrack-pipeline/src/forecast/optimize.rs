//! Parameter search on the unit box `[0, 1]^k`.
//!
//! A coarse grid picks a starting point, then Nelder–Mead refines it. Points
//! leaving the box are clamped back onto it, so every evaluated candidate is
//! a valid set of smoothing weights.

/// Grid values tried per dimension before refinement.
const GRID: [f64; 10] = [0.05, 0.15, 0.25, 0.35, 0.45, 0.55, 0.65, 0.75, 0.85, 0.95];

const MAX_ITERATIONS: usize = 400;
const TOLERANCE: f64 = 1e-10;

/// Best point found and its objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    pub point: Vec<f64>,
    pub value: f64,
}

/// Minimise `objective` over `[0, 1]^dims`.
///
/// Non-finite objective values are treated as worse than any finite one.
/// Returns `None` when no finite value was ever observed.
pub fn minimize_unit_box<F>(dims: usize, objective: F) -> Option<Minimum>
where
    F: Fn(&[f64]) -> f64,
{
    let start = grid_search(dims, &objective)?;
    let refined = nelder_mead(start.point.clone(), &objective);
    if refined.value.is_finite() && refined.value <= start.value {
        Some(refined)
    } else {
        Some(start)
    }
}

fn score<F: Fn(&[f64]) -> f64>(objective: &F, point: &[f64]) -> f64 {
    let v = objective(point);
    if v.is_finite() {
        v
    } else {
        f64::INFINITY
    }
}

fn grid_search<F: Fn(&[f64]) -> f64>(dims: usize, objective: &F) -> Option<Minimum> {
    let mut best: Option<Minimum> = None;
    let mut idx = vec![0usize; dims];
    let mut point = vec![GRID[0]; dims];

    loop {
        for (p, &i) in point.iter_mut().zip(&idx) {
            *p = GRID[i];
        }
        let value = score(objective, &point);
        if value.is_finite() && best.as_ref().map_or(true, |b| value < b.value) {
            best = Some(Minimum {
                point: point.clone(),
                value,
            });
        }

        // Odometer increment over the grid indices.
        let mut d = 0;
        loop {
            if d == dims {
                return best;
            }
            idx[d] += 1;
            if idx[d] < GRID.len() {
                break;
            }
            idx[d] = 0;
            d += 1;
        }
    }
}

fn clamp_unit(point: &mut [f64]) {
    for p in point {
        *p = p.clamp(0.0, 1.0);
    }
}

fn nelder_mead<F: Fn(&[f64]) -> f64>(start: Vec<f64>, objective: &F) -> Minimum {
    let dims = start.len();
    if dims == 0 {
        let value = score(objective, &start);
        return Minimum {
            point: start,
            value,
        };
    }

    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dims + 1);
    simplex.push((start.clone(), score(objective, &start)));
    for d in 0..dims {
        let mut vertex = start.clone();
        vertex[d] = if vertex[d] + 0.1 <= 1.0 {
            vertex[d] + 0.1
        } else {
            vertex[d] - 0.1
        };
        let value = score(objective, &vertex);
        simplex.push((vertex, value));
    }

    for _ in 0..MAX_ITERATIONS {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
        let best = simplex[0].1;
        let worst = simplex[dims].1;
        if worst.is_finite() && (worst - best).abs() <= TOLERANCE * (1.0 + best.abs()) {
            break;
        }

        #[allow(clippy::cast_precision_loss)]
        let n = dims as f64;
        let mut centroid = vec![0.0; dims];
        for (vertex, _) in &simplex[..dims] {
            for (c, v) in centroid.iter_mut().zip(vertex) {
                *c += v / n;
            }
        }

        let toward = |coef: f64| -> Vec<f64> {
            let mut p: Vec<f64> = centroid
                .iter()
                .zip(&simplex[dims].0)
                .map(|(c, w)| c + coef * (c - w))
                .collect();
            clamp_unit(&mut p);
            p
        };

        let reflected = toward(1.0);
        let reflected_value = score(objective, &reflected);

        if reflected_value < simplex[0].1 {
            let expanded = toward(2.0);
            let expanded_value = score(objective, &expanded);
            simplex[dims] = if expanded_value < reflected_value {
                (expanded, expanded_value)
            } else {
                (reflected, reflected_value)
            };
            continue;
        }

        if reflected_value < simplex[dims - 1].1 {
            simplex[dims] = (reflected, reflected_value);
            continue;
        }

        let contracted = toward(-0.5);
        let contracted_value = score(objective, &contracted);
        if contracted_value < simplex[dims].1 {
            simplex[dims] = (contracted, contracted_value);
            continue;
        }

        let best_vertex = simplex[0].0.clone();
        for (vertex, value) in simplex.iter_mut().skip(1) {
            for (v, b) in vertex.iter_mut().zip(&best_vertex) {
                *v = b + 0.5 * (*v - b);
            }
            *value = score(objective, vertex);
        }
    }

    simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
    let (point, value) = simplex.swap_remove(0);
    Minimum { point, value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_interior_minimum_of_a_bowl() {
        let min = minimize_unit_box(2, |p| (p[0] - 0.3).powi(2) + (p[1] - 0.62).powi(2)).unwrap();
        assert!((min.point[0] - 0.3).abs() < 1e-3, "{:?}", min.point);
        assert!((min.point[1] - 0.62).abs() < 1e-3, "{:?}", min.point);
    }

    #[test]
    fn respects_box_when_minimum_is_outside() {
        let min = minimize_unit_box(1, |p| (p[0] - 3.0).powi(2)).unwrap();
        assert!(min.point[0] <= 1.0);
        assert!((min.point[0] - 1.0).abs() < 1e-6, "{:?}", min.point);
    }

    #[test]
    fn all_non_finite_objective_yields_none() {
        assert!(minimize_unit_box(2, |_| f64::NAN).is_none());
    }

    #[test]
    fn grid_visits_every_combination() {
        use std::cell::Cell;
        let calls = Cell::new(0usize);
        let _ = grid_search(3, &|_p: &[f64]| {
            calls.set(calls.get() + 1);
            1.0
        });
        assert_eq!(calls.get(), 1000);
    }
}
