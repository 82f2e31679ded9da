use std::fmt;

use crate::domain::TeamId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Attack,
    Defense,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Attack => Side::Defense,
            Side::Defense => Side::Attack,
        }
    }
}

/// Live-player counts seen from one side: `own` v `opponent`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XvX {
    pub own: u8,
    pub opponent: u8,
}

impl XvX {
    pub fn new(own: u8, opponent: u8) -> Self {
        Self { own, opponent }
    }

    /// Lookup key used by the win probability tables, e.g. "5v4"
    pub fn key(&self) -> String {
        self.to_string()
    }

    pub fn inverse(self) -> XvX {
        XvX::new(self.opponent, self.own)
    }

    pub fn has_zero(&self) -> bool {
        self.own == 0 || self.opponent == 0
    }
}

impl fmt::Display for XvX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.own, self.opponent)
    }
}

/// Alive counts for both sides during one round.
/// Counts only ever go down and never below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliveState {
    attackers: u8,
    defenders: u8,
}

impl AliveState {
    pub fn new(team_size: u8) -> Self {
        Self {
            attackers: team_size,
            defenders: team_size,
        }
    }

    pub fn count(&self, side: Side) -> u8 {
        match side {
            Side::Attack => self.attackers,
            Side::Defense => self.defenders,
        }
    }

    /// Remove one player from `side`. Returns false when the side was already empty.
    pub fn eliminate(&mut self, side: Side) -> bool {
        let count = match side {
            Side::Attack => &mut self.attackers,
            Side::Defense => &mut self.defenders,
        };
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    pub fn xvx(&self, perspective: Side) -> XvX {
        XvX::new(self.count(perspective), self.count(perspective.opponent()))
    }

    pub fn total(&self) -> u32 {
        self.attackers as u32 + self.defenders as u32
    }
}

/// Which team label plays which side in a round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sides {
    pub attacking: Option<TeamId>,
    pub defending: Option<TeamId>,
}

impl Sides {
    pub fn new(attacking: Option<&str>, defending: Option<&str>) -> Self {
        Self {
            attacking: attacking.map(str::to_string),
            defending: defending.map(str::to_string),
        }
    }

    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.attacking.as_deref() == Some(team) {
            Some(Side::Attack)
        } else if self.defending.as_deref() == Some(team) {
            Some(Side::Defense)
        } else {
            None
        }
    }
}
