//! A-contrario validation of edge chains.
//!
//! A chain of `len` pixels whose weakest magnitude is `mu` is kept when
//!
//! ```text
//! NFA = (W * H)^2 * H(mu)^len <= epsilon
//! ```
//!
//! where `H` is the magnitude survival table of the frame
//! ([`EmpiricalDistribution::survival`]). `(W * H)^2` counts the possible
//! chain endpoints. The test runs in log10 so long chains do not underflow.
use super::chain::{EdgeChain, EdgeChains};
use crate::edges::EmpiricalDistribution;
use log::debug;

/// `log10` of the number of false alarms for `chain`.
///
/// Returns `-inf` when the chain's weakest magnitude is rarer than anything
/// in the table (survival 0).
pub fn chain_log_nfa(chain: &EdgeChain, distribution: &EmpiricalDistribution) -> f64 {
    let tests = distribution.total_pixel_count() as f64;
    let survival = distribution.survival(chain.min_strength()) as f64;
    if survival <= 0.0 {
        return f64::NEG_INFINITY;
    }
    2.0 * tests.log10() + chain.len() as f64 * survival.log10()
}

/// True when `chain` is meaningful at level `epsilon`.
pub fn is_meaningful(chain: &EdgeChain, distribution: &EmpiricalDistribution, epsilon: f64) -> bool {
    chain_log_nfa(chain, distribution) <= epsilon.log10()
}

/// Drop chains whose NFA exceeds `epsilon`.
pub fn validate_chains(
    mut chains: EdgeChains,
    distribution: &EmpiricalDistribution,
    epsilon: f64,
) -> EdgeChains {
    let before = chains.len();
    chains.retain(|chain| is_meaningful(chain, distribution, epsilon));
    debug!(
        "validate_chains epsilon={epsilon} kept={} dropped={}",
        chains.len(),
        before - chains.len()
    );
    chains
}
