use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    Plains,
    Mountains,
    Desert,
    Forest,
    Ocean,
    River,
    Beach,
    Taiga,
    Swamp,
    Jungle,
    Savanna,
}

const BEACH_BAND: f32 = 3.0;
const COLD: f32 = -0.4;
const HOT: f32 = 0.6;
const ARID: f32 = -0.3;
const TROPICAL: f32 = 0.5;
const WET: f32 = 0.6;
const MOUNTAIN_HEIGHT: f32 = 140.0;
const FOREST_NOISE: f32 = 0.4;
const FOREST_HUMIDITY: f32 = 0.2;

/// Ordered biome decision. The first matching rule wins; later rules never
/// override it. Climate inputs are noise values in `[-1, 1]`.
pub fn classify(height: f32, temperature: f32, humidity: f32, forest: f32, sea_level: i32) -> Biome {
    let sea = sea_level as f32;
    if height < sea {
        return Biome::Ocean;
    }
    if height < sea + BEACH_BAND {
        return Biome::Beach;
    }
    if temperature < COLD {
        return Biome::Taiga;
    }
    if temperature > HOT {
        if humidity < ARID {
            return Biome::Desert;
        }
        if humidity > TROPICAL {
            return Biome::Jungle;
        }
        return Biome::Savanna;
    }
    if humidity > WET {
        return Biome::Swamp;
    }
    if height > MOUNTAIN_HEIGHT {
        return Biome::Mountains;
    }
    if forest > FOREST_NOISE && humidity > FOREST_HUMIDITY {
        return Biome::Forest;
    }
    Biome::Plains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_rules_precede_climate() {
        // Freezing, soaked, forested: still ocean below sea level.
        assert_eq!(classify(10.0, -1.0, 1.0, 1.0, 62), Biome::Ocean);
        assert_eq!(classify(61.9, 0.9, -0.9, 0.0, 62), Biome::Ocean);
        assert_eq!(classify(62.0, 0.9, -0.9, 0.0, 62), Biome::Beach);
        assert_eq!(classify(64.9, -0.9, 0.0, 0.0, 62), Biome::Beach);
    }

    #[test]
    fn climate_rules_precede_elevation() {
        assert_eq!(classify(200.0, -0.5, 0.0, 0.0, 62), Biome::Taiga);
        assert_eq!(classify(200.0, 0.7, -0.5, 0.0, 62), Biome::Desert);
        assert_eq!(classify(200.0, 0.7, 0.6, 0.0, 62), Biome::Jungle);
        assert_eq!(classify(200.0, 0.7, 0.0, 0.0, 62), Biome::Savanna);
        assert_eq!(classify(200.0, 0.0, 0.7, 0.0, 62), Biome::Swamp);
        assert_eq!(classify(200.0, 0.0, 0.3, 0.9, 62), Biome::Mountains);
    }

    #[test]
    fn forest_needs_noise_and_humidity() {
        assert_eq!(classify(90.0, 0.0, 0.3, 0.5, 62), Biome::Forest);
        assert_eq!(classify(90.0, 0.0, 0.1, 0.5, 62), Biome::Plains);
        assert_eq!(classify(90.0, 0.0, 0.3, 0.3, 62), Biome::Plains);
    }
}
