use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Value shown on top of a die, always `1..=6`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieFace(u8);

impl DieFace {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub const fn new(value: u8) -> Result<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(GameError::InvalidFace)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Unicode die glyph, ⚀ to ⚅.
    pub const fn glyph(self) -> char {
        match self.0 {
            1 => '\u{2680}',
            2 => '\u{2681}',
            3 => '\u{2682}',
            4 => '\u{2683}',
            5 => '\u{2684}',
            _ => '\u{2685}',
        }
    }
}

impl TryFrom<u8> for DieFace {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DieFace> for u8 {
    fn from(face: DieFace) -> Self {
        face.0
    }
}

impl fmt::Display for DieFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of uniformly distributed die faces.
pub trait FaceRoller {
    fn roll_face(&mut self) -> DieFace;
}

/// Seeded pseudo random roller used by the app.
#[derive(Clone, Debug)]
pub struct RandomFaceRoller {
    rng: rand::rngs::SmallRng,
}

impl RandomFaceRoller {
    pub fn new(seed: u64) -> Self {
        use rand::prelude::*;
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl FaceRoller for RandomFaceRoller {
    fn roll_face(&mut self) -> DieFace {
        use rand::prelude::*;
        DieFace(self.rng.random_range(DieFace::MIN..=DieFace::MAX))
    }
}

/// Replays a fixed list of faces, cycling when it runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceRoller<'a> {
    faces: &'a [DieFace],
    next: usize,
}

impl<'a> SequenceRoller<'a> {
    /// Returns `None` for an empty sequence.
    pub fn new(faces: &'a [DieFace]) -> Option<Self> {
        (!faces.is_empty()).then_some(Self { faces, next: 0 })
    }

    /// Number of faces handed out so far.
    pub const fn rolled(&self) -> usize {
        self.next
    }
}

impl FaceRoller for SequenceRoller<'_> {
    fn roll_face(&mut self) -> DieFace {
        let face = self.faces[self.next % self.faces.len()];
        self.next += 1;
        face
    }
}

/// Faces of all six dice.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DiceRecord", into = "DiceRecord")]
pub struct DiceState {
    faces: [DieFace; 6],
}

#[derive(Serialize, Deserialize)]
struct DiceRecord {
    white1: DieFace,
    white2: DieFace,
    red: DieFace,
    yellow: DieFace,
    green: DieFace,
    blue: DieFace,
}

impl From<DiceRecord> for DiceState {
    fn from(record: DiceRecord) -> Self {
        Self {
            faces: [
                record.white1,
                record.white2,
                record.red,
                record.yellow,
                record.green,
                record.blue,
            ],
        }
    }
}

impl From<DiceState> for DiceRecord {
    fn from(dice: DiceState) -> Self {
        use DieColor::*;
        Self {
            white1: dice.face(White1),
            white2: dice.face(White2),
            red: dice.face(Red),
            yellow: dice.face(Yellow),
            green: dice.face(Green),
            blue: dice.face(Blue),
        }
    }
}

impl Default for DiceState {
    /// One through six in tray order.
    fn default() -> Self {
        Self {
            faces: core::array::from_fn(|i| DieFace(i as u8 + 1)),
        }
    }
}

impl DiceState {
    pub fn from_faces(faces: [DieFace; 6]) -> Self {
        Self { faces }
    }

    pub fn face(&self, color: DieColor) -> DieFace {
        self.faces[color.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (DieColor, DieFace)> {
        DieColor::ALL.into_iter().map(|color| (color, self.face(color)))
    }

    /// Draws a new face for every die in `colors`, the rest keep theirs.
    pub fn roll_subset(&mut self, colors: DiceSet, roller: &mut impl FaceRoller) {
        for color in colors.colors() {
            self.faces[color.index()] = roller.roll_face();
        }
        log::debug!("rolled {:?}: {:?}", colors, self.faces);
    }

    pub fn roll_all(&mut self, roller: &mut impl FaceRoller) {
        self.roll_subset(DiceSet::all(), roller);
    }

    /// Rolls every die whose row is not locked. White dice are always rolled.
    pub fn reroll_unlocked(&mut self, locked: RowColorSet, roller: &mut impl FaceRoller) -> DiceSet {
        let eligible = eligible_dice(locked);
        self.roll_subset(eligible, roller);
        eligible
    }
}

pub fn eligible_dice(locked: RowColorSet) -> DiceSet {
    DiceSet::all().difference(locked.dice())
}
