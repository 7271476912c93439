use std::f64::consts::FRAC_PI_2;
use std::fmt;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use quarry_blocks::BlockType;
use serde::{Deserialize, Serialize};

use crate::CHUNK_SIZE_Y;

/// Height-map parameters. Every field has a default so a partial `[terrain]`
/// table is valid.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TerrainParams {
    #[serde(default = "default_base_height")]
    pub base_height: f64,
    #[serde(default = "default_min_height")]
    pub min_height: i32,
    /// Soil cells directly under the surface cell.
    #[serde(default = "default_soil_depth")]
    pub soil_depth: i32,
    #[serde(default = "default_waves")]
    pub waves: Vec<HeightWave>,
    #[serde(default)]
    pub noise: Option<NoiseLayer>,
    #[serde(default)]
    pub layers: TerrainLayers,
}

/// One periodic term: `amplitude * sin((x_weight*x + z_weight*z) / period + phase)`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct HeightWave {
    #[serde(default)]
    pub x_weight: f64,
    #[serde(default)]
    pub z_weight: f64,
    pub period: f64,
    pub amplitude: f64,
    #[serde(default)]
    pub phase: f64,
}

/// Optional OpenSimplex2 detail added on top of the waves.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct NoiseLayer {
    #[serde(default)]
    pub seed: i32,
    #[serde(default = "default_noise_frequency")]
    pub frequency: f32,
    #[serde(default = "default_noise_amplitude")]
    pub amplitude: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TerrainLayers {
    #[serde(default = "default_stone")]
    pub stone: BlockType,
    #[serde(default = "default_soil")]
    pub soil: BlockType,
    #[serde(default = "default_surface")]
    pub surface: BlockType,
}

fn default_base_height() -> f64 {
    40.0
}
fn default_min_height() -> i32 {
    1
}
fn default_soil_depth() -> i32 {
    3
}
fn default_waves() -> Vec<HeightWave> {
    vec![
        HeightWave {
            x_weight: 1.0,
            z_weight: 0.0,
            period: 50.0,
            amplitude: 15.0,
            phase: 0.0,
        },
        // cos(z / 100)
        HeightWave {
            x_weight: 0.0,
            z_weight: 1.0,
            period: 100.0,
            amplitude: 15.0,
            phase: FRAC_PI_2,
        },
        HeightWave {
            x_weight: 1.0,
            z_weight: 1.0,
            period: 75.0,
            amplitude: 10.0,
            phase: 0.0,
        },
    ]
}
fn default_noise_frequency() -> f32 {
    0.01
}
fn default_noise_amplitude() -> f64 {
    8.0
}
fn default_stone() -> BlockType {
    BlockType::STONE
}
fn default_soil() -> BlockType {
    BlockType::DIRT
}
fn default_surface() -> BlockType {
    BlockType::GRASS_BLOCK
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            base_height: default_base_height(),
            min_height: default_min_height(),
            soil_depth: default_soil_depth(),
            waves: default_waves(),
            noise: None,
            layers: TerrainLayers::default(),
        }
    }
}

impl Default for TerrainLayers {
    fn default() -> Self {
        Self {
            stone: default_stone(),
            soil: default_soil(),
            surface: default_surface(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TerrainError {
    NonFinite(&'static str),
    MinHeightOutOfRange(i32),
    BaseHeightOutOfRange(f64),
    SoilDepthOutOfRange(i32),
    InvalidWave { index: usize, reason: &'static str },
    InvalidNoiseFrequency(f32),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::NonFinite(field) => write!(f, "terrain.{} must be finite", field),
            TerrainError::MinHeightOutOfRange(h) => {
                write!(f, "terrain.min_height {} outside [0, {})", h, CHUNK_SIZE_Y)
            }
            TerrainError::BaseHeightOutOfRange(h) => {
                write!(f, "terrain.base_height {} outside [min_height, {})", h, CHUNK_SIZE_Y)
            }
            TerrainError::SoilDepthOutOfRange(d) => {
                write!(f, "terrain.soil_depth {} outside [0, {})", d, CHUNK_SIZE_Y)
            }
            TerrainError::InvalidWave { index, reason } => {
                write!(f, "terrain.waves[{}]: {}", index, reason)
            }
            TerrainError::InvalidNoiseFrequency(v) => {
                write!(f, "terrain.noise.frequency {} must be positive", v)
            }
        }
    }
}

impl std::error::Error for TerrainError {}

impl TerrainParams {
    pub fn validate(&self) -> Result<(), TerrainError> {
        let top = CHUNK_SIZE_Y as i32;
        if !(0..top).contains(&self.min_height) {
            return Err(TerrainError::MinHeightOutOfRange(self.min_height));
        }
        if !self.base_height.is_finite() {
            return Err(TerrainError::NonFinite("base_height"));
        }
        if self.base_height < f64::from(self.min_height) || self.base_height >= f64::from(top) {
            return Err(TerrainError::BaseHeightOutOfRange(self.base_height));
        }
        if !(0..top).contains(&self.soil_depth) {
            return Err(TerrainError::SoilDepthOutOfRange(self.soil_depth));
        }
        for (index, w) in self.waves.iter().enumerate() {
            let finite = [w.x_weight, w.z_weight, w.period, w.amplitude, w.phase]
                .iter()
                .all(|v| v.is_finite());
            if !finite {
                return Err(TerrainError::InvalidWave {
                    index,
                    reason: "non-finite value",
                });
            }
            if w.period <= 0.0 {
                return Err(TerrainError::InvalidWave {
                    index,
                    reason: "period must be positive",
                });
            }
        }
        if let Some(n) = &self.noise {
            if !n.frequency.is_finite() || n.frequency <= 0.0 {
                return Err(TerrainError::InvalidNoiseFrequency(n.frequency));
            }
            if !n.amplitude.is_finite() {
                return Err(TerrainError::NonFinite("noise.amplitude"));
            }
        }
        Ok(())
    }
}

/// Deterministic column height function plus the layer rules that turn a
/// height into blocks. Output depends only on world `(x, z)`.
pub struct TerrainGenerator {
    params: TerrainParams,
    noise: Option<(FastNoiseLite, f64)>,
}

impl TerrainGenerator {
    pub fn new(params: TerrainParams) -> Result<Self, TerrainError> {
        params.validate()?;
        let noise = params.noise.map(|n| {
            let mut fnl = FastNoiseLite::with_seed(n.seed);
            fnl.set_noise_type(Some(NoiseType::OpenSimplex2));
            fnl.set_frequency(Some(n.frequency));
            (fnl, n.amplitude)
        });
        Ok(Self { params, noise })
    }

    #[inline]
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Surface height of world column `(wx, wz)`, clamped to `[min_height, CHUNK_SIZE_Y - 1]`.
    pub fn height_at(&self, wx: i64, wz: i64) -> i32 {
        let x = wx as f64;
        let z = wz as f64;
        let mut h = self.params.base_height;
        for w in &self.params.waves {
            h += w.amplitude * ((w.x_weight * x + w.z_weight * z) / w.period + w.phase).sin();
        }
        if let Some((fnl, amplitude)) = &self.noise {
            h += amplitude * f64::from(fnl.get_noise_2d(x as f32, z as f32));
        }
        let max = CHUNK_SIZE_Y as f64 - 1.0;
        h.floor().clamp(f64::from(self.params.min_height), max) as i32
    }

    /// Block for cell `y` of a column whose surface is at `surface`.
    #[inline]
    pub fn layer_at(&self, y: i32, surface: i32) -> BlockType {
        let layers = &self.params.layers;
        if y < surface - self.params.soil_depth {
            layers.stone
        } else if y < surface {
            layers.soil
        } else if y == surface {
            layers.surface
        } else {
            BlockType::AIR
        }
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self {
            params: TerrainParams::default(),
            noise: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(TerrainParams::default().validate().is_ok());
    }

    #[test]
    fn default_height_matches_wave_sum() {
        let t = TerrainGenerator::default();
        let expected = |x: f64, z: f64| {
            let h = 40.0
                + 15.0 * (x / 50.0).sin()
                + 15.0 * (z / 100.0 + FRAC_PI_2).sin()
                + 10.0 * ((x + z) / 75.0).sin();
            h.floor().clamp(1.0, 255.0) as i32
        };
        for &(x, z) in &[(0i64, 0i64), (17, -40), (-123, 999), (5000, -5000)] {
            assert_eq!(t.height_at(x, z), expected(x as f64, z as f64));
        }
        // cos(0) = 1 contributes the full 15 at the origin.
        assert_eq!(t.height_at(0, 0), 55);
    }

    #[test]
    fn layers_follow_surface() {
        let t = TerrainGenerator::default();
        let s = 40;
        assert_eq!(t.layer_at(s - 4, s), BlockType::STONE);
        assert_eq!(t.layer_at(s - 3, s), BlockType::DIRT);
        assert_eq!(t.layer_at(s - 1, s), BlockType::DIRT);
        assert_eq!(t.layer_at(s, s), BlockType::GRASS_BLOCK);
        assert_eq!(t.layer_at(s + 1, s), BlockType::AIR);
    }

    #[test]
    fn heights_stay_in_range_with_large_amplitude() {
        let params = TerrainParams {
            waves: vec![HeightWave {
                x_weight: 1.0,
                z_weight: 0.0,
                period: 3.0,
                amplitude: 1000.0,
                phase: 0.0,
            }],
            ..TerrainParams::default()
        };
        let t = TerrainGenerator::new(params).unwrap();
        for x in -50..50 {
            let h = t.height_at(x, 0);
            assert!((1..CHUNK_SIZE_Y as i32).contains(&h));
        }
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut p = TerrainParams::default();
        p.waves[1].period = 0.0;
        assert_eq!(
            TerrainGenerator::new(p).err(),
            Some(TerrainError::InvalidWave {
                index: 1,
                reason: "period must be positive"
            })
        );
        let p = TerrainParams {
            min_height: -1,
            ..TerrainParams::default()
        };
        assert!(matches!(p.validate(), Err(TerrainError::MinHeightOutOfRange(-1))));
        let p = TerrainParams {
            base_height: 300.0,
            ..TerrainParams::default()
        };
        assert!(p.validate().is_err());
        let p = TerrainParams {
            noise: Some(NoiseLayer {
                seed: 1,
                frequency: 0.0,
                amplitude: 1.0,
            }),
            ..TerrainParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn noise_layer_is_deterministic() {
        let params = TerrainParams {
            noise: Some(NoiseLayer {
                seed: 1337,
                frequency: 0.02,
                amplitude: 6.0,
            }),
            ..TerrainParams::default()
        };
        let a = TerrainGenerator::new(params.clone()).unwrap();
        let b = TerrainGenerator::new(params).unwrap();
        for x in -20..20 {
            assert_eq!(a.height_at(x * 7, -x * 3), b.height_at(x * 7, -x * 3));
        }
    }
}
