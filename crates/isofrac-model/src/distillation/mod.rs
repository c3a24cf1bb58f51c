//! Rayleigh distillation along the transport path
//!
//! An air parcel cools monotonically from the moisture source to the
//! deposition site. At every profile point the vapour in excess of the new
//! humidity condenses, taking heavy isotopes with it:
//!
//! $$\delta_{n+1} = \frac{\alpha - 1}{q_n}(q_{n+1} - q_n) + \delta_n$$
//!
//! with fractional deltas and the effective fractionation factor evaluated at
//! the temperature of point $n+1$.

mod profile;
mod rayleigh;

pub use profile::TransportProfile;
pub use rayleigh::{rayleigh_step, DistillationTrajectory, RayleighDistillation};
