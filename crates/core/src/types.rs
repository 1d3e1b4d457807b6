use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomCategory {
    Monster,
    EliteMonster,
    Treasure,
    Rest,
    Shop,
    Event,
    Boss,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 7] = [
        RoomCategory::Monster,
        RoomCategory::EliteMonster,
        RoomCategory::Treasure,
        RoomCategory::Rest,
        RoomCategory::Shop,
        RoomCategory::Event,
        RoomCategory::Boss,
    ];

    /// Rooms that may not repeat directly below themselves.
    pub fn is_special(self) -> bool {
        matches!(
            self,
            RoomCategory::EliteMonster
                | RoomCategory::Rest
                | RoomCategory::Shop
                | RoomCategory::Treasure
        )
    }

    /// Rooms capped at one occurrence per drawn layer.
    pub fn is_sibling_capped(self) -> bool {
        self.is_special() || matches!(self, RoomCategory::Monster | RoomCategory::Event)
    }

    pub fn code(self) -> u8 {
        match self {
            RoomCategory::Monster => 0,
            RoomCategory::EliteMonster => 1,
            RoomCategory::Treasure => 2,
            RoomCategory::Rest => 3,
            RoomCategory::Shop => 4,
            RoomCategory::Event => 5,
            RoomCategory::Boss => 6,
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoomCategory::Monster => "Monster",
            RoomCategory::EliteMonster => "Elite",
            RoomCategory::Treasure => "Treasure",
            RoomCategory::Rest => "Rest",
            RoomCategory::Shop => "Shop",
            RoomCategory::Event => "Event",
            RoomCategory::Boss => "Boss",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::RoomCategory;

    #[test]
    fn boss_is_neither_special_nor_sibling_capped() {
        assert!(!RoomCategory::Boss.is_special());
        assert!(!RoomCategory::Boss.is_sibling_capped());
    }

    #[test]
    fn monster_and_event_are_capped_but_not_special() {
        for category in [RoomCategory::Monster, RoomCategory::Event] {
            assert!(!category.is_special());
            assert!(category.is_sibling_capped());
        }
    }

    #[test]
    fn category_codes_are_unique() {
        let mut codes: Vec<u8> = RoomCategory::ALL.iter().map(|c| c.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), RoomCategory::ALL.len());
    }
}
