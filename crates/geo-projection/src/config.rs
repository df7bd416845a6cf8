//! Declarative projection configuration.
//!
//! A [`ProjectionConfig`] can be read from YAML or JSON, overridden from
//! `GEOPROJ_*` environment variables and turned into a [`Projection`] with
//! [`ProjectionConfig::build`].

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use geo_common::{Angle, AngleExt, Extent};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clip::PreClip;
use crate::error::{ProjectionError, Result};
use crate::projection::{equirectangular, mercator, transverse_mercator, Projection, DEFAULT_DELTA2, DEFAULT_TRANSLATE};

/// Base projector to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectorKind {
    #[default]
    Equirectangular,
    Mercator,
    TransverseMercator,
}

impl ProjectorKind {
    /// Get the projector name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equirectangular => "equirectangular",
            Self::Mercator => "mercator",
            Self::TransverseMercator => "transverse_mercator",
        }
    }

    /// A projection of this kind with its default settings.
    pub fn projection(&self) -> Projection {
        match self {
            Self::Equirectangular => equirectangular(),
            Self::Mercator => mercator(),
            Self::TransverseMercator => transverse_mercator(),
        }
    }
}

impl FromStr for ProjectorKind {
    type Err = ProjectionError;

    /// Parse from string (case-insensitive, `-` and `_` interchangeable).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "equirectangular" | "plate_carree" => Ok(Self::Equirectangular),
            "mercator" => Ok(Self::Mercator),
            "transverse_mercator" => Ok(Self::TransverseMercator),
            _ => Err(ProjectionError::UnknownProjector(s.to_string())),
        }
    }
}

impl fmt::Display for ProjectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for a [`Projection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Base projector.
    pub projector: ProjectorKind,

    /// Scale; the projector's default when unset.
    pub scale: Option<f64>,

    /// Device point the center maps onto.
    pub translate: [f64; 2],

    /// Geographic center `[lon, lat]` in degrees.
    pub center: [f64; 2],

    /// Rotation `[λ, φ, γ]` in degrees; the projector's default when unset.
    pub rotate: Option<[f64; 3]>,

    /// Resampling precision in pixels. Zero disables resampling.
    pub precision: f64,

    /// Cut geometry along the antimeridian before projecting.
    pub antimeridian_clip: bool,

    /// Device-space clip rectangle.
    pub clip_extent: Option<Extent>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            projector: ProjectorKind::default(),
            scale: None,
            translate: [DEFAULT_TRANSLATE.0, DEFAULT_TRANSLATE.1],
            center: [0.0, 0.0],
            rotate: None,
            precision: DEFAULT_DELTA2.sqrt(),
            antimeridian_clip: true,
            clip_extent: None,
        }
    }
}

fn parse_floats<const N: usize>(value: &str) -> Option<[f64; N]> {
    let parts: Vec<f64> = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    parts.try_into().ok()
}

fn parse_bool(value: &str) -> bool {
    value.to_lowercase() == "true" || value == "1"
}

impl ProjectionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Override fields from `GEOPROJ_*` environment variables.
    ///
    /// Values that cannot be parsed are logged and ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup("GEOPROJ_PROJECTOR") {
            match val.parse() {
                Ok(kind) => self.projector = kind,
                Err(e) => warn!(value = %val, error = %e, "Ignoring GEOPROJ_PROJECTOR"),
            }
        }

        if let Some(val) = lookup("GEOPROJ_SCALE") {
            match val.trim().parse() {
                Ok(scale) => self.scale = Some(scale),
                Err(_) => warn!(value = %val, "Ignoring unparseable GEOPROJ_SCALE"),
            }
        }

        if let Some(val) = lookup("GEOPROJ_TRANSLATE") {
            match parse_floats::<2>(&val) {
                Some(translate) => self.translate = translate,
                None => warn!(value = %val, "Ignoring GEOPROJ_TRANSLATE, expected 'x,y'"),
            }
        }

        if let Some(val) = lookup("GEOPROJ_CENTER") {
            match parse_floats::<2>(&val) {
                Some(center) => self.center = center,
                None => warn!(value = %val, "Ignoring GEOPROJ_CENTER, expected 'lon,lat'"),
            }
        }

        if let Some(val) = lookup("GEOPROJ_ROTATE") {
            // Two values leave gamma at zero.
            match parse_floats::<3>(&val).or_else(|| parse_floats::<2>(&val).map(|[l, p]| [l, p, 0.0])) {
                Some(rotate) => self.rotate = Some(rotate),
                None => warn!(value = %val, "Ignoring GEOPROJ_ROTATE, expected 'lambda,phi[,gamma]'"),
            }
        }

        if let Some(val) = lookup("GEOPROJ_PRECISION") {
            match val.trim().parse() {
                Ok(precision) => self.precision = precision,
                Err(_) => warn!(value = %val, "Ignoring unparseable GEOPROJ_PRECISION"),
            }
        }

        if let Some(val) = lookup("GEOPROJ_ANTIMERIDIAN_CLIP") {
            self.antimeridian_clip = parse_bool(&val);
        }

        if let Some(val) = lookup("GEOPROJ_CLIP_EXTENT") {
            if val.trim().is_empty() || val.eq_ignore_ascii_case("none") {
                self.clip_extent = None;
            } else {
                match val.parse::<Extent>() {
                    Ok(extent) => self.clip_extent = Some(extent),
                    Err(e) => warn!(value = %val, error = %e, "Ignoring GEOPROJ_CLIP_EXTENT"),
                }
            }
        }

        self
    }

    /// Parse YAML configuration.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Parse JSON configuration.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a configuration file. `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(scale) = self.scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ProjectionError::invalid_scale(format!(
                    "scale must be finite and positive, got {}",
                    scale
                )));
            }
        }

        if self.translate.iter().any(|v| !v.is_finite()) {
            return Err(ProjectionError::invalid_translate("translate must be finite"));
        }

        self.center[0].deg().validate_finite("center longitude")?;
        self.center[1].deg().validate_latitude("center latitude")?;

        if let Some(rotate) = self.rotate {
            for (angle, name) in rotate.iter().zip(["rotate lambda", "rotate phi", "rotate gamma"]) {
                Angle::from_degrees(*angle).validate_finite(name)?;
            }
        }

        if !self.precision.is_finite() || self.precision < 0.0 {
            return Err(ProjectionError::invalid_precision(format!(
                "precision must be finite and non-negative, got {}",
                self.precision
            )));
        }

        if let Some(extent) = self.clip_extent {
            extent
                .validate()
                .map_err(|e| ProjectionError::InvalidExtent(e.to_string()))?;
        }

        Ok(())
    }

    /// Validate and build the projection.
    pub fn build(&self) -> Result<Projection> {
        self.validate()?;

        let mut projection = self.projector.projection();
        if let Some(scale) = self.scale {
            projection.set_scale(scale)?;
        }
        if let Some([lambda, phi, gamma]) = self.rotate {
            projection.set_rotate(lambda, phi, gamma)?;
        }
        projection
            .set_translate(self.translate[0], self.translate[1])?
            .set_center(self.center[0], self.center[1])?
            .set_precision(self.precision)?
            .set_pre_clip(if self.antimeridian_clip {
                PreClip::Antimeridian
            } else {
                PreClip::NoClip
            })?
            .set_clip_extent(self.clip_extent)?;

        Ok(projection)
    }
}
