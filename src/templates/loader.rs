use serde::{Deserialize, Serialize};

use super::{Template, TemplateError, TemplateLibrary};
use crate::bond::BondOrder;
use crate::element;
use crate::mol::Mol;
use crate::options::LayoutOptions;
use crate::{Atom, Bond};

const DEFAULT_TEMPLATES: &str = include_str!("default_templates.json");

/// One template as stored in a JSON resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    #[serde(default)]
    pub name: Option<String>,
    pub atoms: Vec<AtomRecord>,
    #[serde(default)]
    pub bonds: Vec<BondRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomRecord {
    #[serde(default = "default_element")]
    pub element: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[serde(default)]
    pub charge: i8,
    #[serde(default)]
    pub hydrogens: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondRecord {
    pub begin: usize,
    pub end: usize,
    #[serde(default = "default_order")]
    pub order: u8,
}

fn default_element() -> String {
    "C".to_string()
}

fn default_order() -> u8 {
    1
}

fn bond_order(order: u8) -> Option<BondOrder> {
    match order {
        0 => Some(BondOrder::Unset),
        1 => Some(BondOrder::Single),
        2 => Some(BondOrder::Double),
        3 => Some(BondOrder::Triple),
        4 => Some(BondOrder::Quadruple),
        _ => None,
    }
}

impl TemplateRecord {
    /// Build the fragment described by this record.
    pub fn to_template(&self) -> Result<Template, TemplateError> {
        let mut mol = Mol::new();
        let mut atoms = Vec::with_capacity(self.atoms.len());
        for (i, record) in self.atoms.iter().enumerate() {
            let atomic_num = element::atomic_num_from_symbol(&record.element).ok_or_else(|| {
                TemplateError::UnknownElement {
                    symbol: record.element.clone(),
                }
            })?;
            let (x, y) = match (record.x, record.y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => (x, y),
                _ => {
                    return Err(TemplateError::MissingCoordinates {
                        template: self.name.clone(),
                        atom: i,
                    })
                }
            };
            let mut atom = Atom::new(atomic_num).with_hydrogens(record.hydrogens).at(x, y);
            atom.formal_charge = record.charge;
            atoms.push(mol.add_atom(atom));
        }
        for (i, record) in self.bonds.iter().enumerate() {
            let begin = *atoms
                .get(record.begin)
                .ok_or(TemplateError::BondOutOfRange { bond: i, atom: record.begin })?;
            let end = *atoms
                .get(record.end)
                .ok_or(TemplateError::BondOutOfRange { bond: i, atom: record.end })?;
            let order = bond_order(record.order).ok_or(TemplateError::InvalidBondOrder {
                bond: i,
                order: record.order,
            })?;
            mol.add_bond(begin, end, Bond::new(order));
        }
        Ok(Template {
            name: self.name.clone(),
            mol,
        })
    }
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

impl TemplateLibrary {
    /// Register every record that converts cleanly; the rest are logged and
    /// skipped.
    pub fn load_records<I>(&mut self, records: I) -> LoadReport
    where
        I: IntoIterator<Item = TemplateRecord>,
    {
        let mut report = LoadReport::default();
        for (i, record) in records.into_iter().enumerate() {
            match record.to_template().and_then(|t| self.register(t)) {
                Ok(()) => report.loaded += 1,
                Err(e) => {
                    log::warn!("skipping template record {}: {}", i, e);
                    report.skipped += 1;
                }
            }
        }
        report
    }

    /// Load a JSON array of template records.
    ///
    /// Only a document that is not a JSON array fails as a whole; a record
    /// that does not deserialise is skipped like any other bad record.
    pub fn load_json(&mut self, json: &str) -> Result<LoadReport, TemplateError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let mut records = Vec::with_capacity(values.len());
        let mut malformed = 0;
        for (i, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<TemplateRecord>(value) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("skipping malformed template record {}: {}", i, e);
                    malformed += 1;
                }
            }
        }
        let mut report = self.load_records(records);
        report.skipped += malformed;
        Ok(report)
    }

    /// A library holding the bundled ring and cage templates.
    pub fn with_default_templates(options: LayoutOptions) -> Self {
        let mut library = Self::new(options);
        match library.load_json(DEFAULT_TEMPLATES) {
            Ok(report) => log::debug!(
                "loaded {} default templates ({} skipped)",
                report.loaded,
                report.skipped
            ),
            Err(e) => log::warn!("default templates unavailable: {}", e),
        }
        library
    }
}
