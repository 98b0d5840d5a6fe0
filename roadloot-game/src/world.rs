//! World-object collections: houses, treasures, and the visited-chunk ledger.
//!
//! Spawning and eviction both run every step. Spawning is idempotent per
//! chunk (the visited sets only grow); eviction releases anything far
//! enough behind the camera except the house the car currently occupies
//! or is transitioning through.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashSet;

use crate::chunkgen::{GenConfig, plan_chunk, world_to_chunk};
use crate::constants::{CAR_WIDTH, HOUSE_WIDTH, TREASURE_WIDTH};
use crate::fx::{Directive, SpriteId, SpriteKind};

/// Stable identifier for a spawned house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HouseId(pub u32);

/// Stable identifier for a spawned treasure chest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreasureId(pub u32);

/// Viewport and road geometry. The road is a horizontal band; houses sit
/// above its top edge and the car rides its center line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneGeom {
    pub view_w: f32,
    pub view_h: f32,
    pub road_h: f32,
}

impl Default for SceneGeom {
    fn default() -> Self {
        Self {
            view_w: 800.0,
            view_h: 450.0,
            road_h: 80.0,
        }
    }
}

impl SceneGeom {
    /// Vertical center of the road band.
    #[must_use]
    pub fn road_y(&self) -> f32 {
        self.view_h / 2.0
    }

    /// Top edge of the road band.
    #[must_use]
    pub fn road_top(&self) -> f32 {
        self.road_y() - self.road_h / 2.0
    }

    /// Resting y for the car sprite anchor.
    #[must_use]
    pub fn car_y(&self) -> f32 {
        self.road_y() - self.road_h / 4.0 - 2.0
    }

    /// Default car start so the camera begins at scroll zero.
    #[must_use]
    pub fn car_start_x(&self) -> f32 {
        self.view_w / 3.0
    }
}

/// A roadside house the car may enter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: HouseId,
    pub chunk: i64,
    pub x: f32,
    pub y: f32,
    pub color: usize,
    /// Set while the car is inside (and until the exit completes); gates
    /// the eviction exemption.
    pub occupied: bool,
}

impl House {
    /// Horizontal footprint as (left, right) edges.
    #[must_use]
    pub fn footprint(&self) -> (f32, f32) {
        (self.x - HOUSE_WIDTH / 2.0, self.x + HOUSE_WIDTH / 2.0)
    }

    /// Whether the car footprint overlaps this house.
    #[must_use]
    pub fn overlaps_car(&self, car_x: f32) -> bool {
        (self.x - car_x).abs() < (HOUSE_WIDTH + CAR_WIDTH) / 2.0
    }
}

/// A collectible chest sitting on the road.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treasure {
    pub id: TreasureId,
    pub chunk: i64,
    pub x: f32,
    pub y: f32,
    pub bob_phase: f32,
}

impl Treasure {
    /// Whether the car footprint overlaps this chest.
    #[must_use]
    pub fn overlaps_car(&self, car_x: f32) -> bool {
        (self.x - car_x).abs() < (TREASURE_WIDTH + CAR_WIDTH) / 2.0
    }
}

/// A world object materialized during chunk visitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnEvent {
    House(HouseId),
    Treasure(TreasureId),
}

/// All live world objects plus the grow-only visited-chunk ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldState {
    pub houses: Vec<House>,
    pub treasures: Vec<Treasure>,
    visited_house_chunks: HashSet<i64>,
    visited_treasure_chunks: HashSet<i64>,
    next_house_id: u32,
    next_treasure_id: u32,
    /// Monotonic count of chests collected this session.
    pub treasures_collected: u32,
}

impl WorldState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize every unvisited chunk overlapping the camera view plus
    /// the lookahead margin. Re-visiting a chunk is a no-op; negative
    /// chunks are never visited. Emits spawn directives for new objects.
    pub fn visit_chunks(
        &mut self,
        camera_x: f32,
        geom: &SceneGeom,
        cfg: &GenConfig,
        fx: &mut Vec<Directive>,
    ) -> SmallVec<[SpawnEvent; 4]> {
        let mut spawned = SmallVec::new();
        let first = world_to_chunk(camera_x, cfg.chunk_width);
        let last = world_to_chunk(camera_x + geom.view_w, cfg.chunk_width) + cfg.lookahead_chunks;
        for index in first..=last {
            if index < 0 {
                continue;
            }
            let house_unseen = self.visited_house_chunks.insert(index);
            let treasure_unseen = self.visited_treasure_chunks.insert(index);
            if !house_unseen && !treasure_unseen {
                continue;
            }
            let plan = plan_chunk(index, cfg);
            if house_unseen && let Some(house_plan) = plan.house {
                let id = HouseId(self.next_house_id);
                self.next_house_id += 1;
                let house = House {
                    id,
                    chunk: index,
                    x: house_plan.x,
                    y: geom.road_top() - house_plan.y_drop,
                    color: house_plan.color,
                    occupied: false,
                };
                fx.push(Directive::SpawnSprite {
                    id: SpriteId::House(id),
                    kind: SpriteKind::House {
                        color: house.color,
                    },
                    x: house.x,
                    y: house.y,
                });
                self.houses.push(house);
                spawned.push(SpawnEvent::House(id));
            }
            if treasure_unseen && let Some(chest_plan) = plan.treasure {
                let id = TreasureId(self.next_treasure_id);
                self.next_treasure_id += 1;
                let chest = Treasure {
                    id,
                    chunk: index,
                    x: chest_plan.x,
                    y: geom.road_y(),
                    bob_phase: chest_plan.bob_phase,
                };
                fx.push(Directive::SpawnSprite {
                    id: SpriteId::Treasure(id),
                    kind: SpriteKind::Treasure {
                        bob_phase: chest.bob_phase,
                    },
                    x: chest.x,
                    y: chest.y,
                });
                self.treasures.push(chest);
                spawned.push(SpawnEvent::Treasure(id));
            }
        }
        spawned
    }

    /// Sweep objects that scrolled far enough behind the camera. Houses
    /// flagged occupied, or named by `exempt`, survive regardless of
    /// distance. Returns the number of objects released.
    pub fn evict(
        &mut self,
        camera_x: f32,
        cfg: &GenConfig,
        exempt: Option<HouseId>,
        fx: &mut Vec<Directive>,
    ) -> usize {
        let cutoff = camera_x - cfg.evict_behind;
        let before = self.houses.len() + self.treasures.len();
        self.houses.retain(|house| {
            let keep = house.occupied || Some(house.id) == exempt || house.x >= cutoff;
            if !keep {
                fx.push(Directive::DespawnSprite {
                    id: SpriteId::House(house.id),
                });
            }
            keep
        });
        self.treasures.retain(|chest| {
            let keep = chest.x >= cutoff;
            if !keep {
                fx.push(Directive::DespawnSprite {
                    id: SpriteId::Treasure(chest.id),
                });
            }
            keep
        });
        before - (self.houses.len() + self.treasures.len())
    }

    #[must_use]
    pub fn house(&self, id: HouseId) -> Option<&House> {
        self.houses.iter().find(|house| house.id == id)
    }

    pub fn house_mut(&mut self, id: HouseId) -> Option<&mut House> {
        self.houses.iter_mut().find(|house| house.id == id)
    }

    /// The single occupied house, if any.
    #[must_use]
    pub fn occupied_house(&self) -> Option<&House> {
        self.houses.iter().find(|house| house.occupied)
    }

    /// The house whose footprint overlaps the car, nearest first.
    #[must_use]
    pub fn nearest_overlapping_house(&self, car_x: f32) -> Option<HouseId> {
        self.houses
            .iter()
            .filter(|house| house.overlaps_car(car_x))
            .min_by(|a, b| {
                let da = (a.x - car_x).abs();
                let db = (b.x - car_x).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|house| house.id)
    }

    /// Ids of every uncollected chest overlapping the car.
    #[must_use]
    pub fn treasures_overlapping(&self, car_x: f32) -> SmallVec<[TreasureId; 2]> {
        self.treasures
            .iter()
            .filter(|chest| chest.overlaps_car(car_x))
            .map(|chest| chest.id)
            .collect()
    }

    /// Remove a chest and bump the counter. Collecting an id that is no
    /// longer live is a no-op returning `None`.
    pub fn collect(&mut self, id: TreasureId) -> Option<Treasure> {
        let at = self.treasures.iter().position(|chest| chest.id == id)?;
        let chest = self.treasures.remove(at);
        self.treasures_collected += 1;
        Some(chest)
    }

    /// Visited-chunk counts per feature type (houses, treasures).
    #[must_use]
    pub fn visited_counts(&self) -> (usize, usize) {
        (
            self.visited_house_chunks.len(),
            self.visited_treasure_chunks.len(),
        )
    }
}
