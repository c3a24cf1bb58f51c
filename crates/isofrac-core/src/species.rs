//! Isotopologues and phase transitions
//!
//! Every fractionation factor in the model is keyed by one isotopologue and,
//! for equilibrium factors, one phase transition. Both are closed sets so the
//! coefficient tables that hang off them can be matched exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Heavy water isotopologue being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IsotopeSpecies {
    /// H2 18O, reported as δ18O
    #[serde(rename = "H218O", alias = "H2_18O")]
    H2O18,
    /// HDO, reported as δD
    #[serde(rename = "HDO")]
    HDO,
}

impl IsotopeSpecies {
    pub const ALL: [IsotopeSpecies; 2] = [IsotopeSpecies::H2O18, IsotopeSpecies::HDO];

    /// Isotope ratio of Vienna Standard Mean Ocean Water.
    pub fn vsmow_ratio(&self) -> f64 {
        match self {
            IsotopeSpecies::H2O18 => 2005.20e-6,
            IsotopeSpecies::HDO => 155.76e-6,
        }
    }

    /// Conventional name of the delta value for this species.
    pub fn delta_label(&self) -> &'static str {
        match self {
            IsotopeSpecies::H2O18 => "δ18O",
            IsotopeSpecies::HDO => "δD",
        }
    }
}

impl fmt::Display for IsotopeSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsotopeSpecies::H2O18 => write!(f, "H218O"),
            IsotopeSpecies::HDO => write!(f, "HDO"),
        }
    }
}

/// Phase transition selecting the equilibrium coefficient set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseTransition {
    /// Condensation of vapour to liquid water
    #[serde(alias = "vl")]
    VaporLiquid,
    /// Deposition of vapour to ice
    #[serde(alias = "vi")]
    VaporIce,
}

impl fmt::Display for PhaseTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseTransition::VaporLiquid => write!(f, "vapor->liquid"),
            PhaseTransition::VaporIce => write!(f, "vapor->ice"),
        }
    }
}

/// One value per tracked isotopologue.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BySpecies<T> {
    #[serde(rename = "H218O")]
    pub h2o18: T,
    #[serde(rename = "HDO")]
    pub hdo: T,
}

impl<T> BySpecies<T> {
    pub fn new(h2o18: T, hdo: T) -> Self {
        Self { h2o18, hdo }
    }

    /// Build a value for each species from a closure.
    pub fn from_fn(mut f: impl FnMut(IsotopeSpecies) -> T) -> Self {
        Self {
            h2o18: f(IsotopeSpecies::H2O18),
            hdo: f(IsotopeSpecies::HDO),
        }
    }

    /// Build a value for each species from a fallible closure, stopping at the first error.
    pub fn try_from_fn<E>(
        mut f: impl FnMut(IsotopeSpecies) -> Result<T, E>,
    ) -> Result<Self, E> {
        Ok(Self {
            h2o18: f(IsotopeSpecies::H2O18)?,
            hdo: f(IsotopeSpecies::HDO)?,
        })
    }

    pub fn get(&self, species: IsotopeSpecies) -> &T {
        match species {
            IsotopeSpecies::H2O18 => &self.h2o18,
            IsotopeSpecies::HDO => &self.hdo,
        }
    }

    pub fn get_mut(&mut self, species: IsotopeSpecies) -> &mut T {
        match species {
            IsotopeSpecies::H2O18 => &mut self.h2o18,
            IsotopeSpecies::HDO => &mut self.hdo,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(IsotopeSpecies, &T) -> U) -> BySpecies<U> {
        BySpecies {
            h2o18: f(IsotopeSpecies::H2O18, &self.h2o18),
            hdo: f(IsotopeSpecies::HDO, &self.hdo),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (IsotopeSpecies, &T)> {
        [
            (IsotopeSpecies::H2O18, &self.h2o18),
            (IsotopeSpecies::HDO, &self.hdo),
        ]
        .into_iter()
    }
}

impl<T> Index<IsotopeSpecies> for BySpecies<T> {
    type Output = T;

    fn index(&self, species: IsotopeSpecies) -> &T {
        self.get(species)
    }
}

impl<T> IndexMut<IsotopeSpecies> for BySpecies<T> {
    fn index_mut(&mut self, species: IsotopeSpecies) -> &mut T {
        self.get_mut(species)
    }
}
