#[derive(Debug, Copy, Clone, Default)]
pub struct PlayerSkills {
    pub technical: Technical,
    pub mental: Mental,
    pub physical: Physical,
    pub goalkeeping: Goalkeeping,
}

impl PlayerSkills {
    /// Flat-profile skill set, useful for neutral opposition and tests.
    pub fn uniform(level: f32) -> Self {
        PlayerSkills {
            technical: Technical {
                shooting: level,
                dribbling: level,
                passing: level,
                tackling: level,
                technique: level,
                set_pieces: level,
            },
            mental: Mental {
                composure: level,
                positioning: level,
                vision: level,
                aggression: level,
                leadership: level,
            },
            physical: Physical {
                pace: level,
                stamina: level,
                strength: level,
            },
            goalkeeping: Goalkeeping {
                reflexes: level,
                handling: level,
                distribution: level,
            },
        }
    }
}

/// All skills use the 1..20 scale.
#[derive(Debug, Copy, Clone, Default)]
pub struct Technical {
    pub shooting: f32,
    pub dribbling: f32,
    pub passing: f32,
    pub tackling: f32,
    pub technique: f32,
    pub set_pieces: f32,
}

impl Technical {
    pub fn average(&self) -> f32 {
        (self.shooting
            + self.dribbling
            + self.passing
            + self.tackling
            + self.technique
            + self.set_pieces)
            / 6.0
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Mental {
    pub composure: f32,
    pub positioning: f32,
    pub vision: f32,
    pub aggression: f32,
    pub leadership: f32,
}

impl Mental {
    pub fn average(&self) -> f32 {
        (self.composure + self.positioning + self.vision + self.aggression + self.leadership) / 5.0
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Physical {
    pub pace: f32,
    pub stamina: f32,
    pub strength: f32,
}

impl Physical {
    pub fn average(&self) -> f32 {
        (self.pace + self.stamina + self.strength) / 3.0
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Goalkeeping {
    pub reflexes: f32,
    pub handling: f32,
    pub distribution: f32,
}

impl Goalkeeping {
    pub fn average(&self) -> f32 {
        (self.reflexes + self.handling + self.distribution) / 3.0
    }
}
