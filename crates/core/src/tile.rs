use crate::{
    error::Result,
    hex::{
        disk_vectors, AsCoords, Coercible, Fields, FieldsMut, HexCoords,
        HexMap, Scalar,
    },
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single tile of a grid: a position, the cost of moving onto it, and any
/// number of extra named attributes. This is the ready-made implementation of
/// the object capabilities ([Fields], [FieldsMut], [AsCoords]), but any type
/// that implements those can be used wherever a tile is accepted.
///
/// Movement cost is the cost charged for moving _onto_ the tile. Any negative
/// value (by convention `-1`) makes it impassable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Every tile in a group should have a unique position
    #[serde(flatten)]
    position: HexCoords,

    pub movement_cost: Scalar,

    /// Anything else the caller wants to hang on the tile. These are all
    /// readable as fields, so e.g. a flood fill can be told to read its costs
    /// from one of these instead of `movement_cost`.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Tile {
    /// Movement cost of the tiles generated by [Tile::disk]
    pub const DEFAULT_MOVEMENT_COST: Scalar = Scalar::Int(1);

    pub fn new(position: HexCoords, movement_cost: impl Into<Scalar>) -> Self {
        Self {
            position,
            movement_cost: movement_cost.into(),
            attributes: Map::new(),
        }
    }

    /// Add an extra attribute to this tile
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn position(&self) -> HexCoords {
        self.position
    }

    /// Generate a hexagonal disk of tiles around `center`, all with
    /// [Tile::DEFAULT_MOVEMENT_COST]. Tiles are ordered by `q`, then `r`.
    pub fn disk(center: HexCoords, radius: u16) -> Result<Vec<Self>> {
        Self::disk_with(center, radius, &HexMap::default())
    }

    /// Generate a hexagonal disk of tiles around `center`. Any tile whose
    /// position is in `overrides` gets that movement cost instead of the
    /// default.
    pub fn disk_with(
        center: HexCoords,
        radius: u16,
        overrides: &HexMap<Scalar>,
    ) -> Result<Vec<Self>> {
        disk_vectors(radius.into())
            .map(|vector| {
                let position = center.translate(vector)?;
                let cost = overrides
                    .get(&position)
                    .copied()
                    .unwrap_or(Self::DEFAULT_MOVEMENT_COST);
                Ok(Self::new(position, cost))
            })
            .collect()
    }
}

impl Fields for Tile {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "q" => Some(self.position.q().into()),
            "r" => Some(self.position.r().into()),
            "s" => Some(self.position.s().into()),
            "movement_cost" => Some(self.movement_cost.into()),
            _ => self.attributes.get(name).cloned(),
        }
    }
}

impl FieldsMut for Tile {
    /// Position components are validated together, so moving a tile requires
    /// setting all three at once (or at least leaving it on the plane).
    fn set_fields(&mut self, values: &[(&'static str, Scalar)]) -> Result<()> {
        let [mut q, mut r, mut s] = self.position.components();
        let mut movement_cost = self.movement_cost;
        let mut attributes = Vec::new();
        for &(name, value) in values {
            match name {
                "q" => q = value,
                "r" => r = value,
                "s" => s = value,
                "movement_cost" => movement_cost = value,
                _ => attributes.push((name, value)),
            }
        }

        // Validate before writing anything
        self.position = HexCoords::new(q, r, s)?;
        self.movement_cost = movement_cost;
        for (name, value) in attributes {
            self.attributes.insert(name.to_owned(), value.into());
        }
        Ok(())
    }
}

impl AsCoords for Tile {
    fn as_coords(&self) -> Coercible<'_> {
        Coercible::Object(self)
    }
}
