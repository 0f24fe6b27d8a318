//! Body-part categories used to group the exercise catalogue.
//!
//! The labels are exactly the ones stored by the seed catalogue, so a
//! category filter compares against `target_body_part` verbatim.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum BodyPart {
    Chest,
    Back,
    Legs,
    Shoulders,
    Biceps,
    Triceps,
    Core,
}

impl BodyPart {
    pub const ALL: [BodyPart; 7] = [
        BodyPart::Chest,
        BodyPart::Back,
        BodyPart::Legs,
        BodyPart::Shoulders,
        BodyPart::Biceps,
        BodyPart::Triceps,
        BodyPart::Core,
    ];

    /// The label as stored in `exercises.target_body_part`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Chest => "Chest",
            BodyPart::Back => "Back",
            BodyPart::Legs => "Legs",
            BodyPart::Shoulders => "Shoulders",
            BodyPart::Biceps => "Biceps",
            BodyPart::Triceps => "Triceps",
            BodyPart::Core => "Core",
        }
    }
}

impl Display for BodyPart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyPart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyPart::ALL
            .into_iter()
            .find(|part| part.as_str() == s)
            .ok_or_else(|| format!("unknown body part '{}'", s))
    }
}
