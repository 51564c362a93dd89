//! Plane selection strategies for BSP tree construction.
//!
//! The choice of splitting plane affects tree balance and how many brushes
//! end up referenced from both sides of a split. It never affects trace
//! results: leaves are tested against the brushes' own planes.

use crate::{Brush, Classification, Plane3D};

use super::node::BrushId;

/// How a set of brushes falls relative to a candidate plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
    /// Brushes entirely in front.
    pub front: usize,
    /// Brushes entirely behind.
    pub back: usize,
    /// Brushes on both sides (or flat on the plane).
    pub straddling: usize,
}

impl SplitStats {
    /// Counts how `set` distributes over `plane`.
    pub fn measure(arena: &[Brush], set: &[BrushId], plane: &Plane3D) -> Self {
        let mut stats = Self::default();
        for &id in set {
            match arena[id].classify(plane) {
                Classification::Front => stats.front += 1,
                Classification::Back => stats.back += 1,
                Classification::Spanning | Classification::Coplanar => stats.straddling += 1,
            }
        }
        stats
    }

    /// Size of the brush set handed to the front child.
    #[inline]
    pub fn front_set(&self) -> usize {
        self.front + self.straddling
    }

    /// Size of the brush set handed to the back child.
    #[inline]
    pub fn back_set(&self) -> usize {
        self.back + self.straddling
    }

    /// A plane distinguishes a set when both children get strictly fewer
    /// brushes than the parent, which is what makes the build terminate.
    #[inline]
    pub fn distinguishes(&self) -> bool {
        let total = self.front + self.back + self.straddling;
        self.front_set() < total && self.back_set() < total
    }
}

/// Strategy for selecting which brush face's plane to split on.
///
/// Implementations must only return planes for which
/// [`SplitStats::distinguishes`] holds, or `None` when no such plane exists.
pub trait PlaneSelector {
    /// Select a splitting plane for the brushes `set` (indices into `arena`).
    fn select(&self, arena: &[Brush], set: &[BrushId]) -> Option<Plane3D>;
}

/// Iterates over every face plane of the brushes in `set`, in brush then face order.
fn candidate_planes<'a>(
    arena: &'a [Brush],
    set: &'a [BrushId],
) -> impl Iterator<Item = &'a Plane3D> + 'a {
    set.iter().flat_map(move |&id| arena[id].planes())
}

/// Selects the first face plane that distinguishes the set.
///
/// This is the cheapest selector, but tree shape depends heavily on input
/// order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPlane;

impl PlaneSelector for FirstPlane {
    fn select(&self, arena: &[Brush], set: &[BrushId]) -> Option<Plane3D> {
        candidate_planes(arena, set)
            .find(|plane| SplitStats::measure(arena, set, plane).distinguishes())
            .copied()
    }
}

/// Selects the face plane that straddles the fewest brushes, using the
/// front/back imbalance as a secondary cost.
///
/// Cost is `straddling * straddle_weight + |front_set - back_set|`; ties go
/// to the earliest candidate so the result is deterministic.
#[derive(Debug, Clone, Copy)]
pub struct LeastStraddling {
    pub straddle_weight: f32,
}

impl LeastStraddling {
    pub const DEFAULT_STRADDLE_WEIGHT: f32 = 8.0;

    fn cost(&self, stats: &SplitStats) -> f32 {
        let imbalance = stats.front_set().abs_diff(stats.back_set());
        stats.straddling as f32 * self.straddle_weight + imbalance as f32
    }
}

impl Default for LeastStraddling {
    fn default() -> Self {
        Self {
            straddle_weight: Self::DEFAULT_STRADDLE_WEIGHT,
        }
    }
}

impl PlaneSelector for LeastStraddling {
    fn select(&self, arena: &[Brush], set: &[BrushId]) -> Option<Plane3D> {
        let mut best: Option<(f32, &Plane3D)> = None;

        for plane in candidate_planes(arena, set) {
            let stats = SplitStats::measure(arena, set, plane);
            if !stats.distinguishes() {
                continue;
            }
            let cost = self.cost(&stats);
            if best.is_none_or(|(best_cost, _)| cost < best_cost) {
                best = Some((cost, plane));
            }
        }

        best.map(|(_, plane)| *plane)
    }
}
