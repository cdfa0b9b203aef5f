//! Binary logistic regression fitted by Newton's method.
//!
//! Minimizes the log-loss summed over samples plus `|w|² / (2C)`. The
//! intercept is not penalized.

/// Stop once every gradient component is below this.
const TOLERANCE: f64 = 1e-8;

/// Step halvings tried before giving up on an iteration.
const MAX_HALVINGS: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Logistic {
    pub(super) intercept: f64,
    pub(super) weights: Vec<f64>,
    /// Newton iterations run before convergence or the cap
    pub(super) iterations: usize,
}

impl Logistic {
    /// Fits on rows `x` with 0/1 labels `y`.
    pub(super) fn train(x: &[Vec<f64>], y: &[f64], c: f64, max_iterations: usize) -> Logistic {
        assert_eq!(x.len(), y.len());
        let width = x.first().map_or(0, Vec::len);

        // theta[0] is the intercept, theta[1..] the weights.
        let mut theta = vec![0.0; width + 1];
        let mut loss = objective(x, y, c, &theta);
        let mut iterations = 0;

        while iterations < max_iterations {
            let (gradient, hessian) = derivatives(x, y, c, &theta);
            if gradient.iter().all(|g| g.abs() < TOLERANCE) {
                break;
            }
            iterations += 1;

            let Some(step) = solve(hessian, gradient.clone()) else {
                log::debug!("hessian is singular; stopping after {iterations} iterations");
                break;
            };

            // Armijo backtracking along the Newton direction.
            let slope: f64 = gradient.iter().zip(&step).map(|(g, s)| g * s).sum();
            let mut t = 1.0;
            let mut accepted = None;
            for _ in 0..MAX_HALVINGS {
                let candidate: Vec<f64> = theta.iter().zip(&step).map(|(a, s)| a - t * s).collect();
                let candidate_loss = objective(x, y, c, &candidate);
                if candidate_loss <= loss - 1e-4 * t * slope {
                    accepted = Some((candidate, candidate_loss));
                    break;
                }
                t /= 2.0;
            }

            match accepted {
                Some((next, next_loss)) => {
                    let improvement = loss - next_loss;
                    theta = next;
                    loss = next_loss;
                    if improvement.abs() < 1e-12 {
                        break;
                    }
                }
                None => break,
            }
        }

        if iterations == max_iterations {
            log::warn!("logistic regression did not converge in {max_iterations} iterations");
        }

        Logistic {
            intercept: theta[0],
            weights: theta.split_off(1),
            iterations,
        }
    }

    pub(super) fn probability(&self, x: &[f64]) -> f64 {
        sigmoid(self.intercept + dot(&self.weights, x))
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `ln(1 + e^z)` without overflow.
fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(a, b)| a * b).sum()
}

fn linear(theta: &[f64], row: &[f64]) -> f64 {
    theta[0] + dot(&theta[1..], row)
}

fn objective(x: &[Vec<f64>], y: &[f64], c: f64, theta: &[f64]) -> f64 {
    let loss: f64 = x
        .iter()
        .zip(y)
        .map(|(row, &label)| {
            let z = linear(theta, row);
            softplus(z) - label * z
        })
        .sum();
    let penalty: f64 = theta[1..].iter().map(|w| w * w).sum();
    loss + penalty / (2.0 * c)
}

fn derivatives(x: &[Vec<f64>], y: &[f64], c: f64, theta: &[f64]) -> (Vec<f64>, Vec<Vec<f64>>) {
    let n = theta.len();
    let mut gradient = vec![0.0; n];
    let mut hessian = vec![vec![0.0; n]; n];

    for (row, &label) in x.iter().zip(y) {
        let p = sigmoid(linear(theta, row));
        let residual = p - label;
        let curvature = p * (1.0 - p);

        let feature = |j: usize| if j == 0 { 1.0 } else { row[j - 1] };
        for j in 0..n {
            let fj = feature(j);
            gradient[j] += residual * fj;
            if fj == 0.0 {
                continue;
            }
            for k in j..n {
                hessian[j][k] += curvature * fj * feature(k);
            }
        }
    }

    for j in 1..n {
        gradient[j] += theta[j] / c;
        hessian[j][j] += 1.0 / c;
    }
    // Keeps the system solvable when every probability saturates.
    hessian[0][0] += 1e-10;

    for j in 0..n {
        for k in 0..j {
            hessian[j][k] = hessian[k][j];
        }
    }

    (gradient, hessian)
}

/// Solves `a · x = b` by Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() < 1e-14 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!((softplus(800.0) - 800.0).abs() < 1e-9);
    }

    #[test]
    fn solves_small_system() {
        let x = solve(vec![vec![2.0, 1.0], vec![1.0, 3.0]], vec![3.0, 5.0]).unwrap();
        assert!((x[0] - 0.8).abs() < 1e-12);
        assert!((x[1] - 1.4).abs() < 1e-12);
        assert!(solve(vec![vec![1.0, 2.0], vec![2.0, 4.0]], vec![1.0, 2.0]).is_none());
    }

    #[test]
    fn separates_a_threshold() {
        let x: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..20).map(|i| if i >= 10 { 1.0 } else { 0.0 }).collect();

        let model = Logistic::train(&x, &y, 1.0, 200);
        assert!(model.weights[0] > 0.0);
        assert!(model.probability(&[2.0]) < 0.1);
        assert!(model.probability(&[17.0]) > 0.9);
        assert!(model.iterations < 200);
    }

    #[test]
    fn penalty_shrinks_weights() {
        let x: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..20).map(|i| if i >= 10 { 1.0 } else { 0.0 }).collect();

        let loose = Logistic::train(&x, &y, 100.0, 200);
        let tight = Logistic::train(&x, &y, 0.01, 200);
        assert!(tight.weights[0].abs() < loose.weights[0].abs());
    }
}
