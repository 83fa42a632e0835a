//! Field schema definitions
//!
//! Declares which extracted field is compared with which ground-truth field
//! and the matching policy used for the comparison. The built-in
//! [`ValidationSchema::claims`] mapping covers the vehicle-claim records;
//! other mappings can be loaded from JSON.

use serde::{Deserialize, Serialize};

/// Field names used by the built-in claims schema
pub mod fields {
    pub const FECHA: &str = "fecha";
    pub const UBICACION: &str = "ubicacion";
    pub const LUGAR: &str = "lugar";
    pub const VEHICULO_ASEGURADO: &str = "vehiculo_asegurado";
    pub const VEHICULO_TERCERO: &str = "vehiculo_tercero";
    pub const RESPONSABILIDAD_APARENTE: &str = "responsabilidad_aparente";
    pub const RESPONSABILIDAD: &str = "responsabilidad";
    pub const DESCRIPCION_BREVE: &str = "descripcion_breve";
    pub const TIPO_INCIDENTE: &str = "tipo_incidente";
}

/// Validation schema version 1
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationSchema {
    /// Schema version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Field specs in report order
    pub fields: Vec<FieldSpec>,
}

fn default_version() -> u32 {
    1
}

impl ValidationSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { version: 1, fields }
    }

    /// The vehicle-claim mapping (extracted key -> ground-truth key)
    pub fn claims() -> Self {
        Self::new(vec![
            FieldSpec::literal(fields::FECHA, fields::FECHA),
            FieldSpec::literal(fields::UBICACION, fields::LUGAR),
            FieldSpec::vehicle(fields::VEHICULO_ASEGURADO),
            FieldSpec::vehicle(fields::VEHICULO_TERCERO),
            FieldSpec::literal(fields::RESPONSABILIDAD_APARENTE, fields::RESPONSABILIDAD),
            FieldSpec::description(fields::DESCRIPCION_BREVE, fields::TIPO_INCIDENTE),
        ])
    }

    /// Parse a schema from JSON and validate it
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let schema: Self =
            serde_json::from_str(text).map_err(|e| SchemaError::Parse(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Validate the schema
    /// - At least one field
    /// - Extracted keys are unique
    /// - Either no vehicle fields or exactly one swap-eligible pair
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::EmptySchema);
        }

        for (i, spec) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|s| s.extracted == spec.extracted) {
                return Err(SchemaError::DuplicateField(spec.extracted.clone()));
            }
        }

        let vehicles = self
            .fields
            .iter()
            .filter(|s| s.policy == MatchPolicy::Vehicle)
            .count();
        if vehicles != 0 && vehicles != 2 {
            return Err(SchemaError::VehiclePair(vehicles));
        }

        Ok(())
    }

    /// Get a field spec by extracted key
    pub fn get_field(&self, extracted: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|s| s.extracted == extracted)
    }

    /// The other half of a vehicle pair.
    ///
    /// `None` for non-vehicle fields or when the schema does not hold
    /// exactly two vehicle fields.
    pub fn swap_partner(&self, spec: &FieldSpec) -> Option<&FieldSpec> {
        if spec.policy != MatchPolicy::Vehicle {
            return None;
        }
        let mut vehicles = self.fields.iter().filter(|s| s.policy == MatchPolicy::Vehicle);
        match (vehicles.next(), vehicles.next(), vehicles.next()) {
            (Some(a), Some(b), None) if a.extracted == spec.extracted => Some(b),
            (Some(a), Some(b), None) if b.extracted == spec.extracted => Some(a),
            _ => None,
        }
    }
}

impl Default for ValidationSchema {
    fn default() -> Self {
        Self::claims()
    }
}

/// How one extracted field is compared with its ground truth
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key in `extracted_data`; also the name used in reports
    pub extracted: String,

    /// Key in `ground_truth`
    pub ground_truth: String,

    #[serde(default)]
    pub policy: MatchPolicy,

    /// Only compared when both sides are non-empty
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FieldSpec {
    pub fn literal(extracted: &str, ground_truth: &str) -> Self {
        Self {
            extracted: extracted.to_string(),
            ground_truth: ground_truth.to_string(),
            policy: MatchPolicy::Literal,
            optional: false,
        }
    }

    /// Vehicle fields use the same key on both sides
    pub fn vehicle(key: &str) -> Self {
        Self {
            extracted: key.to_string(),
            ground_truth: key.to_string(),
            policy: MatchPolicy::Vehicle,
            optional: false,
        }
    }

    /// Description fields only count when a reference text exists
    pub fn description(extracted: &str, ground_truth: &str) -> Self {
        Self {
            extracted: extracted.to_string(),
            ground_truth: ground_truth.to_string(),
            policy: MatchPolicy::Description,
            optional: true,
        }
    }
}

/// Matching policy for a field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Order-invariant canonical form, then token overlap, then sequence ratio.
    /// Swap-eligible.
    Vehicle,
    /// Token overlap, then sequence ratio on normalized text
    Description,
    /// Normalized equality or substring containment
    #[default]
    Literal,
}

/// Errors that can occur during schema validation
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema cannot be empty")]
    EmptySchema,

    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("Vehicle fields must come as one pair, found {0}")]
    VehiclePair(usize),

    #[error("Invalid schema JSON: {0}")]
    Parse(String),
}
