use bytemuck::NoUninit;

/// State of a single grid position.
///
/// Cells are stored one byte each, so a buffer of cells can be handed to a foreign reader as raw
/// bytes without decoding. A reader should compare against [`Cell::DEAD_BYTE`]; any other value
/// is alive.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, NoUninit)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub const DEAD_BYTE: u8 = Cell::Dead as u8;
    pub const ALIVE_BYTE: u8 = Cell::Alive as u8;

    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Decode an exposed byte. Zero is dead, everything else is alive.
    pub fn from_byte(byte: u8) -> Self {
        if byte == Self::DEAD_BYTE {
            Cell::Dead
        } else {
            Cell::Alive
        }
    }

    /// The glyph used by the text rendering of a universe
    pub fn symbol(self) -> char {
        match self {
            Cell::Dead => '◻',
            Cell::Alive => '◼',
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}
