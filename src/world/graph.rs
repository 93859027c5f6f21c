//! Location graph - the five-node world and its randomized portals
//!
//! The hub's north/south/east portals lead to the three special locations in
//! a random order; every portal has a reciprocal exit back to the hub. The
//! treasure exit from the hub to the vault always exists and is gated by the
//! command interpreter, not by the graph.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::error::{ChronosError, Result};
use crate::core::types::{Direction, KeyItem, LocationId};

use super::location::{Location, TimeEffect};

/// One hub portal and what lies behind it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortalAssignment {
    pub direction: Direction,
    pub location: LocationId,
    pub effect: TimeEffect,
}

/// The randomized and mutable parts of a graph
///
/// Enough to rebuild an identical graph from the fixed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    pub portals: Vec<PortalAssignment>,
    #[serde(default)]
    pub answered: Vec<LocationId>,
}

/// The world graph, indexed by `LocationId::index`
#[derive(Debug, Clone)]
pub struct LocationGraph {
    locations: Vec<Location>,
}

impl LocationGraph {
    /// Build the template and randomize portal assignment
    pub fn generate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let mut specials = LocationId::SPECIAL;
        specials.shuffle(rng);

        let mut effects: Vec<TimeEffect> = LocationId::SPECIAL
            .iter()
            .map(|id| default_effect(*id, config))
            .collect();
        if config.randomize_time_effects {
            effects.shuffle(rng);
        }

        // Effects stay keyed by template order, independent of the portal shuffle
        let effect_for = |location: LocationId| {
            LocationId::SPECIAL
                .iter()
                .zip(effects.iter())
                .find(|(id, _)| **id == location)
                .map(|(_, effect)| *effect)
                .unwrap_or_default()
        };

        let portals: Vec<PortalAssignment> = Direction::PORTALS
            .iter()
            .zip(specials.iter())
            .map(|(direction, location)| PortalAssignment {
                direction: *direction,
                location: *location,
                effect: effect_for(*location),
            })
            .collect();

        let graph = Self::assemble(config, &portals);
        tracing::debug!(
            "Generated world: {}",
            portals
                .iter()
                .map(|p| format!("{} -> {} ({})", p.direction, p.location, p.effect.label()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        graph
    }

    /// Rebuild a graph from a saved layout
    pub fn from_layout(config: &GameConfig, layout: &WorldLayout) -> Result<Self> {
        let mut directions: Vec<Direction> = layout.portals.iter().map(|p| p.direction).collect();
        let mut targets: Vec<LocationId> = layout.portals.iter().map(|p| p.location).collect();
        directions.sort_by_key(|d| d.name());
        targets.sort();
        let mut expected_dirs = Direction::PORTALS.to_vec();
        expected_dirs.sort_by_key(|d| d.name());

        if directions != expected_dirs || targets != LocationId::SPECIAL.to_vec() {
            return Err(ChronosError::CorruptedSave(
                "world layout does not map each portal to one special location".into(),
            ));
        }

        for portal in &layout.portals {
            let valid = match portal.effect {
                TimeEffect::Accelerated { factor } => factor > 1.0,
                TimeEffect::Decelerated { factor } => factor > 0.0 && factor < 1.0,
                TimeEffect::Normal | TimeEffect::Reverse => true,
            };
            if !valid {
                return Err(ChronosError::CorruptedSave(format!(
                    "{} has an out-of-range time factor",
                    portal.location
                )));
            }
        }

        let mut graph = Self::assemble(config, &layout.portals);
        for id in &layout.answered {
            if graph.get(*id).riddle.is_none() {
                return Err(ChronosError::CorruptedSave(format!(
                    "{} has no riddle to mark answered",
                    id
                )));
            }
            graph.mark_answered(*id);
        }
        Ok(graph)
    }

    fn assemble(config: &GameConfig, portals: &[PortalAssignment]) -> Self {
        let mut locations = template(config);

        for portal in portals {
            let idx = portal.location.index();
            locations[idx].time_effect = portal.effect;
            locations[LocationId::CentralHub.index()]
                .exits
                .insert(portal.direction, portal.location);
            if let Some(back) = portal.direction.inverse() {
                locations[idx].exits.insert(back, LocationId::CentralHub);
            }
        }
        locations[LocationId::CentralHub.index()]
            .exits
            .insert(Direction::Treasure, LocationId::TreasureVault);

        Self { locations }
    }

    pub fn get(&self, id: LocationId) -> &Location {
        &self.locations[id.index()]
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Flip a riddle to answered without touching anything else
    pub fn mark_answered(&mut self, id: LocationId) {
        if let Some(riddle) = self.locations[id.index()].riddle.as_mut() {
            riddle.answered = true;
        }
    }

    /// Number of riddles answered so far
    pub fn riddles_answered(&self) -> usize {
        self.locations
            .iter()
            .filter(|loc| loc.riddle.as_ref().map_or(false, |r| r.answered))
            .count()
    }

    /// Capture portals, effects and answered riddles for saving
    pub fn layout(&self) -> WorldLayout {
        let hub = self.get(LocationId::CentralHub);
        let portals = Direction::PORTALS
            .iter()
            .filter_map(|direction| {
                hub.exit(*direction).map(|location| PortalAssignment {
                    direction: *direction,
                    location,
                    effect: self.get(location).time_effect,
                })
            })
            .collect();
        let answered = self
            .locations
            .iter()
            .filter(|loc| loc.riddle.as_ref().map_or(false, |r| r.answered))
            .map(|loc| loc.id)
            .collect();
        WorldLayout { portals, answered }
    }
}

fn default_effect(id: LocationId, config: &GameConfig) -> TimeEffect {
    match id {
        LocationId::BermudaTriangle => TimeEffect::Accelerated {
            factor: config.accelerated_factor,
        },
        LocationId::Stonehenge => TimeEffect::Decelerated {
            factor: config.decelerated_factor,
        },
        LocationId::CrookedForest => TimeEffect::Reverse,
        LocationId::CentralHub | LocationId::TreasureVault => TimeEffect::Normal,
    }
}

/// The five fixed locations, ordered as `LocationId::ALL`, with no exits yet
fn template(config: &GameConfig) -> Vec<Location> {
    vec![
        Location::new(
            LocationId::CentralHub,
            "A mystical nexus where time flows normally. Portals shimmer in all directions.",
            "Welcome to the Central Hub! Choose your time adventure wisely.",
        ),
        Location::new(
            LocationId::BermudaTriangle,
            "A mysterious triangular vortex where time accelerates dramatically. Reality bends around you.",
            "Entering Bermuda Triangle! Time is speeding up - move quickly!",
        )
        .with_key(KeyItem::Triangle)
        .with_effect(default_effect(LocationId::BermudaTriangle, config))
        .with_riddle(
            "What phenomenon is the Bermuda Triangle famous for?",
            "disappearances",
        ),
        Location::new(
            LocationId::Stonehenge,
            "Ancient stone circles where time moves sluggishly, as if weighted by millennia.",
            "Welcome to Stonehenge! Time drags heavily here - use it wisely.",
        )
        .with_key(KeyItem::Stone)
        .with_effect(default_effect(LocationId::Stonehenge, config))
        .with_riddle("How many stones form the main circle of Stonehenge?", "30"),
        Location::new(
            LocationId::CrookedForest,
            "A twisted woodland where time flows in reverse, undoing moments as they pass.",
            "Entering Crooked Forest! Time flows backward - reality unravels!",
        )
        .with_key(KeyItem::Forest)
        .with_effect(default_effect(LocationId::CrookedForest, config))
        .with_riddle(
            "In which country is the famous Crooked Forest located?",
            "poland",
        ),
        Location::new(
            LocationId::TreasureVault,
            "The legendary treasure vault, accessible only to those who have mastered time itself!",
            "TREASURE VAULT UNLOCKED! Congratulations, Time Master!",
        ),
    ]
}
