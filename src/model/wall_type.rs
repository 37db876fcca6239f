use slotmap::SlotMap;

use crate::error::ModelError;

slotmap::new_key_type! {
    /// Unique identifier for a wall-type configuration.
    pub struct WallTypeId;
}

/// Structural class of a wall assembly.
///
/// Drives junction resolution: exterior walls keep their siding face
/// unbroken, interior walls are symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallClass {
    Interior,
    Exterior,
}

/// Role of a layer within the assembly stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFunction {
    Siding,
    Sheathing,
    StudCavity,
    Drywall,
    Other,
}

/// Hatch pattern hint for a layer, consumed by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerPattern {
    Diagonal,
    CrossHatch,
    Insulation,
    Solid,
}

/// Stud layout for a framing layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudSpec {
    /// Stud width along the wall direction.
    pub width: f64,
    /// Center-to-center spacing.
    pub spacing: f64,
}

/// One layer of a wall assembly.
///
/// `thickness` is a relative weight; absolute thickness is the wall's total
/// thickness times `thickness / sum-of-weights`.
#[derive(Debug, Clone)]
pub struct WallLayer {
    pub name: String,
    pub thickness: f64,
    pub color: String,
    pub pattern: Option<LayerPattern>,
    pub function: LayerFunction,
    pub stud: Option<StudSpec>,
}

impl WallLayer {
    /// Creates a plain layer with the given function and relative thickness.
    #[must_use]
    pub fn new(name: &str, function: LayerFunction, thickness: f64) -> Self {
        Self {
            name: name.to_owned(),
            thickness,
            color: String::new(),
            pattern: None,
            function,
            stud: None,
        }
    }
}

/// Static configuration for one wall type.
///
/// Layer order convention: `layers[0]` is the face on the wall's *right*
/// side (−perp) when the wall is unflipped. Exterior stacks list siding
/// first, so an unflipped exterior wall carries siding on its right side
/// and drywall on its left.
#[derive(Debug, Clone)]
pub struct WallTypeConfig {
    pub name: String,
    pub class: WallClass,
    /// Total assembly thickness in drawing units.
    pub thickness: f64,
    pub layers: Vec<WallLayer>,
}

impl WallTypeConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer stack is empty or the thickness is
    /// not positive.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::EmptyLayerStack {
                name: self.name.clone(),
            });
        }
        if self.thickness <= 0.0 {
            return Err(ModelError::NonPositiveThickness {
                name: self.name.clone(),
                thickness: self.thickness,
            });
        }
        Ok(())
    }

    /// Absolute thickness of each layer, scaled to `total` units.
    ///
    /// Relative weights are normalized over the stack, so they need not
    /// sum to 1.
    #[must_use]
    pub fn layer_thicknesses(&self, total: f64) -> Vec<f64> {
        let weight_sum: f64 = self.layers.iter().map(|l| l.thickness.max(0.0)).sum();
        if weight_sum <= 0.0 {
            return vec![0.0; self.layers.len()];
        }
        self.layers
            .iter()
            .map(|l| total * l.thickness.max(0.0) / weight_sum)
            .collect()
    }
}

/// Lookup table of wall-type configurations.
#[derive(Debug, Default)]
pub struct WallTypeRegistry {
    types: SlotMap<WallTypeId, WallTypeConfig>,
}

impl WallTypeRegistry {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and inserts a wall type, returning its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn add(&mut self, config: WallTypeConfig) -> Result<WallTypeId, ModelError> {
        config.validate()?;
        Ok(self.types.insert(config))
    }

    /// Returns the configuration for the given ID, if present.
    #[must_use]
    pub fn get(&self, id: WallTypeId) -> Option<&WallTypeConfig> {
        self.types.get(id)
    }
}
