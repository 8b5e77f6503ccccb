//! Nelder-Mead simplex minimization for smoothing-parameter estimation.

/// Configuration for the Nelder-Mead search.
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance on the objective spread across the simplex.
    pub tolerance: f64,
    /// Relative step used to build the initial simplex.
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            initial_step: 0.1,
        }
    }
}

// Standard simplex coefficients: reflection, expansion, contraction, shrink.
const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Minimize `objective` over a box, starting from `initial`.
///
/// Every candidate point is clamped into `bounds` (one `(min, max)` pair
/// per dimension), which is how the smoothing parameters stay inside their
/// open unit interval. Returns the best point found.
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: &[(f64, f64)],
    config: NelderMeadConfig,
) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    debug_assert_eq!(n, bounds.len());
    if n == 0 {
        return Vec::new();
    }

    let clamp = |point: Vec<f64>| -> Vec<f64> {
        point
            .into_iter()
            .zip(bounds)
            .map(|(x, &(lo, hi))| x.clamp(lo, hi))
            .collect()
    };

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(clamp(initial.to_vec()));
    for i in 0..n {
        let mut vertex = initial.to_vec();
        let step = if vertex[i].abs() > 1e-10 {
            config.initial_step * vertex[i].abs()
        } else {
            config.initial_step
        };
        vertex[i] += step;
        simplex.push(clamp(vertex));
    }

    let mut values: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

    for _ in 0..config.max_iter {
        // Order vertices best to worst
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| {
            values[a]
                .partial_cmp(&values[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let best = order[0];
        let second_worst = order[n - 1];
        let worst = order[n];

        if values[worst] - values[best] < config.tolerance {
            break;
        }

        // Centroid of all vertices but the worst
        let mut centroid = vec![0.0; n];
        for (i, vertex) in simplex.iter().enumerate() {
            if i != worst {
                for (c, x) in centroid.iter_mut().zip(vertex) {
                    *c += x;
                }
            }
        }
        for c in &mut centroid {
            *c /= n as f64;
        }

        let toward = |from: &[f64], coefficient: f64| -> Vec<f64> {
            clamp(
                centroid
                    .iter()
                    .zip(from)
                    .map(|(c, x)| c + coefficient * (c - x))
                    .collect(),
            )
        };

        let reflected = toward(&simplex[worst], REFLECT);
        let reflected_value = objective(&reflected);

        if reflected_value < values[best] {
            let expanded = toward(&simplex[worst], EXPAND);
            let expanded_value = objective(&expanded);
            if expanded_value < reflected_value {
                simplex[worst] = expanded;
                values[worst] = expanded_value;
            } else {
                simplex[worst] = reflected;
                values[worst] = reflected_value;
            }
            continue;
        }

        if reflected_value < values[second_worst] {
            simplex[worst] = reflected;
            values[worst] = reflected_value;
            continue;
        }

        let contracted = toward(&simplex[worst], -CONTRACT);
        let contracted_value = objective(&contracted);
        if contracted_value < values[worst] {
            simplex[worst] = contracted;
            values[worst] = contracted_value;
            continue;
        }

        // Shrink toward the best vertex
        let anchor = simplex[best].clone();
        for i in 0..=n {
            if i != best {
                let shrunk: Vec<f64> = anchor
                    .iter()
                    .zip(&simplex[i])
                    .map(|(a, x)| a + SHRINK * (x - a))
                    .collect();
                simplex[i] = clamp(shrunk);
                values[i] = objective(&simplex[i]);
            }
        }
    }

    let best = values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);
    simplex.swap_remove(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn minimizes_quadratic() {
        let point = nelder_mead(
            |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
            &[0.5, 0.5],
            &[(-10.0, 10.0), (-10.0, 10.0)],
            NelderMeadConfig::default(),
        );
        assert_approx_eq!(point[0], 2.0, 1e-3);
        assert_approx_eq!(point[1], 3.0, 1e-3);
    }

    #[test]
    fn respects_bounds() {
        // Unconstrained optimum at 5, box caps it at 1
        let point = nelder_mead(
            |x| (x[0] - 5.0).powi(2),
            &[0.5],
            &[(0.0, 1.0)],
            NelderMeadConfig::default(),
        );
        assert_approx_eq!(point[0], 1.0, 1e-3);
    }

    #[test]
    fn empty_initial_point() {
        let point = nelder_mead(|_| 0.0, &[], &[], NelderMeadConfig::default());
        assert!(point.is_empty());
    }

    #[test]
    fn starts_at_optimum() {
        let point = nelder_mead(
            |x| (x[0] - 0.25).powi(2),
            &[0.25],
            &[(0.0, 1.0)],
            NelderMeadConfig::default(),
        );
        assert_approx_eq!(point[0], 0.25, 1e-3);
    }
}
