/// Value held by a tile. Empty slots hold zero.
pub type Card = u32;

/// Idx addresses a slot on the grid as (x, y), with (0, 0) in the top left corner.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Idx(pub usize, pub usize);

impl std::fmt::Display for Idx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "idx({0},{1})", self.0, self.1)
    }
}

/// A tile as it is created, before any move relocates or merges it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tile {
    position: Idx,
    value: Card,
}

impl Tile {
    pub fn new(position: Idx, value: Card) -> Self {
        Self { position, value }
    }

    pub fn position(&self) -> &Idx {
        &self.position
    }

    pub fn value(&self) -> Card {
        self.value
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({0} at {1})", self.value, self.position)
    }
}
