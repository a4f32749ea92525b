//! Bounded Nelder-Mead simplex search used to estimate smoothing parameters.

use std::cmp::Ordering;

/// Result of Nelder-Mead optimization.
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// The best point found.
    pub optimal_point: Vec<f64>,
    /// The objective function value at the best point.
    pub optimal_value: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the simplex met the tolerance before `max_iter`.
    pub converged: bool,
}

/// Configuration for Nelder-Mead optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance on both objective spread and simplex size.
    pub tolerance: f64,
    /// Reflection coefficient.
    pub alpha: f64,
    /// Expansion coefficient.
    pub gamma: f64,
    /// Contraction coefficient.
    pub rho: f64,
    /// Shrink coefficient.
    pub sigma: f64,
    /// Initial simplex step, relative to the starting coordinate when nonzero.
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.05,
        }
    }
}

/// A simplex vertex and its objective value.
#[derive(Debug, Clone)]
struct Vertex {
    point: Vec<f64>,
    value: f64,
}

/// Simplex state, kept sorted best-first after every step.
struct Simplex<'a, F> {
    vertices: Vec<Vertex>,
    objective: F,
    bounds: Option<&'a [(f64, f64)]>,
}

impl<'a, F> Simplex<'a, F>
where
    F: Fn(&[f64]) -> f64,
{
    fn new(objective: F, initial: &[f64], bounds: Option<&'a [(f64, f64)]>, step: f64) -> Self {
        let mut simplex = Self {
            vertices: Vec::with_capacity(initial.len() + 1),
            objective,
            bounds,
        };

        let origin = simplex.evaluate(initial.to_vec());
        simplex.vertices.push(origin);
        for (i, &x0) in initial.iter().enumerate() {
            let mut point = initial.to_vec();
            point[i] += if x0.abs() > 1e-10 { step * x0.abs() } else { step };
            let vertex = simplex.evaluate(point);
            simplex.vertices.push(vertex);
        }
        simplex.sort();
        simplex
    }

    /// Clamp into bounds and evaluate. NaN objectives rank as worst.
    fn evaluate(&self, mut point: Vec<f64>) -> Vertex {
        if let Some(bounds) = self.bounds {
            for (x, &(lo, hi)) in point.iter_mut().zip(bounds) {
                *x = x.clamp(lo, hi);
            }
        }
        let value = (self.objective)(&point);
        Vertex {
            point,
            value: if value.is_nan() { f64::INFINITY } else { value },
        }
    }

    fn sort(&mut self) {
        self.vertices
            .sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
    }

    fn best(&self) -> &Vertex {
        &self.vertices[0]
    }

    fn worst(&self) -> &Vertex {
        &self.vertices[self.vertices.len() - 1]
    }

    fn second_worst(&self) -> &Vertex {
        &self.vertices[self.vertices.len() - 2]
    }

    /// Centroid of every vertex but the worst.
    fn centroid(&self) -> Vec<f64> {
        let dims = self.best().point.len();
        let kept = &self.vertices[..self.vertices.len() - 1];
        let mut centroid = vec![0.0; dims];
        for vertex in kept {
            for (c, x) in centroid.iter_mut().zip(&vertex.point) {
                *c += x;
            }
        }
        for c in centroid.iter_mut() {
            *c /= kept.len() as f64;
        }
        centroid
    }

    fn has_converged(&self, centroid: &[f64], tolerance: f64) -> bool {
        if self.worst().value - self.best().value < tolerance {
            return true;
        }
        let radius = self
            .vertices
            .iter()
            .map(|v| distance(&v.point, centroid))
            .fold(0.0, f64::max);
        radius < tolerance
    }

    fn replace_worst(&mut self, vertex: Vertex) {
        let last = self.vertices.len() - 1;
        self.vertices[last] = vertex;
    }

    fn shrink(&mut self, sigma: f64) {
        let best = self.best().point.clone();
        for i in 1..self.vertices.len() {
            let point = along(&best, &self.vertices[i].point, sigma);
            self.vertices[i] = self.evaluate(point);
        }
    }

    /// One Nelder-Mead step: reflect, then expand, contract or shrink.
    fn step(&mut self, centroid: &[f64], config: &NelderMeadConfig) {
        let reflected = self.evaluate(along(centroid, &self.worst().point, -config.alpha));

        if reflected.value < self.best().value {
            let expanded = self.evaluate(along(centroid, &reflected.point, config.gamma));
            if expanded.value < reflected.value {
                self.replace_worst(expanded);
            } else {
                self.replace_worst(reflected);
            }
        } else if reflected.value < self.second_worst().value {
            self.replace_worst(reflected);
        } else if reflected.value < self.worst().value {
            let contracted = self.evaluate(along(centroid, &reflected.point, config.rho));
            if contracted.value <= reflected.value {
                self.replace_worst(contracted);
            } else {
                self.shrink(config.sigma);
            }
        } else {
            let contracted = self.evaluate(along(centroid, &self.worst().point, config.rho));
            if contracted.value < self.worst().value {
                self.replace_worst(contracted);
            } else {
                self.shrink(config.sigma);
            }
        }
        self.sort();
    }
}

/// Point at `origin + t * (target - origin)`.
fn along(origin: &[f64], target: &[f64], t: f64) -> Vec<f64> {
    origin
        .iter()
        .zip(target)
        .map(|(o, p)| o + t * (p - o))
        .collect()
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Minimize `objective` starting from `initial`, optionally clamping every
/// candidate into per-dimension `(min, max)` bounds.
///
/// # Example
/// ```
/// use invoice_forecast::utils::optimization::{nelder_mead, NelderMeadConfig};
///
/// let result = nelder_mead(
///     |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
///     &[0.0, 0.0],
///     None,
///     &NelderMeadConfig::default(),
/// );
///
/// assert!(result.converged);
/// assert!((result.optimal_point[0] - 2.0).abs() < 0.01);
/// assert!((result.optimal_point[1] - 3.0).abs() < 0.01);
/// ```
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: &NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    if initial.is_empty() {
        return NelderMeadResult {
            optimal_point: vec![],
            optimal_value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let mut simplex = Simplex::new(objective, initial, bounds, config.initial_step);
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;
        let centroid = simplex.centroid();
        if simplex.has_converged(&centroid, config.tolerance) {
            converged = true;
            break;
        }
        simplex.step(&centroid, config);
    }

    let best = simplex.best();
    NelderMeadResult {
        optimal_point: best.point.clone(),
        optimal_value: best.value,
        iterations,
        converged,
    }
}
