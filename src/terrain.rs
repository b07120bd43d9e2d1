use core::fmt;

/// The kinds of ground a cell can have. Every kind is resolved when the grid is built,
/// so the search only ever reads [Terrain::cost].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Terrain {
    Grass,
    Sand,
    Forest,
    Mountain,
    Water,
    /// Walkable dungeon ground.
    Floor,
    /// Impassable.
    Wall,
}

impl Terrain {
    pub const ALL: [Terrain; 7] = [
        Terrain::Grass,
        Terrain::Sand,
        Terrain::Forest,
        Terrain::Mountain,
        Terrain::Water,
        Terrain::Floor,
        Terrain::Wall,
    ];

    /// Cost of stepping onto a cell of this terrain, or [None] if it cannot be entered.
    pub fn cost(self) -> Option<u32> {
        match self {
            Terrain::Grass | Terrain::Floor => Some(10),
            Terrain::Sand => Some(20),
            Terrain::Forest => Some(100),
            Terrain::Mountain => Some(150),
            Terrain::Water => Some(180),
            Terrain::Wall => None,
        }
    }

    pub fn is_passable(self) -> bool {
        self.cost().is_some()
    }

    pub fn glyph(self) -> char {
        match self {
            Terrain::Grass => 'G',
            Terrain::Sand => 'S',
            Terrain::Forest => 'F',
            Terrain::Mountain => 'M',
            Terrain::Water => 'W',
            Terrain::Floor => '.',
            Terrain::Wall => '#',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Terrain> {
        Terrain::ALL.into_iter().find(|t| t.glyph() == glyph)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
