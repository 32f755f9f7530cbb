//! Computational molecules: sparse linear-equation rows.
//!
//! A molecule maps computational variables (unknowns) to scalar weights
//! and accumulates one constant source term. Assembled per entity and per
//! quantity name, molecules are the raw material from which one row of the
//! global sparse matrix and one entry of the right-hand side are built.
//!
//! Face molecules are [`FluxMolecule`]s: they additionally record which
//! cell performed the first flux evaluation, so the neighboring cell can
//! account for the sign flip when it reads the shared face flux.

use std::collections::HashMap;
use std::ops::AddAssign;

use crate::types::CellIndex;

/// Write-accumulate-only constant term of a molecule.
///
/// Starts at zero and only ever grows via `+=`; there is no way to reset
/// or overwrite an accumulated value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SourceTerm(f64);

impl SourceTerm {
    /// The accumulated value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl AddAssign<f64> for SourceTerm {
    fn add_assign(&mut self, rhs: f64) {
        self.0 += rhs;
    }
}

/// The unknown for one quantity at one cell.
///
/// Equality is by identity: quantity name plus owning cell. Variables are
/// created once per (active quantity, cell) pair and used as molecule keys,
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComputationalVariable {
    name: String,
    cell: CellIndex,
}

impl ComputationalVariable {
    /// Create the variable for quantity `name` at `cell`.
    pub fn new(name: impl Into<String>, cell: CellIndex) -> Self {
        Self {
            name: name.into(),
            cell,
        }
    }

    /// The quantity name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owning cell.
    pub fn cell(&self) -> CellIndex {
        self.cell
    }
}

/// Sparse linear-equation row: variable → weight, plus a source term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    weights: HashMap<ComputationalVariable, f64>,
    source: SourceTerm,
}

impl Molecule {
    /// Create an empty molecule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` against `variable`.
    ///
    /// If the variable already contributes to this molecule, the weights
    /// are summed; otherwise a new entry is inserted.
    pub fn add(&mut self, variable: &ComputationalVariable, weight: f64) {
        *self.weights.entry(variable.clone()).or_insert(0.0) += weight;
    }

    /// The weight recorded against `variable`, if any.
    pub fn weight(&self, variable: &ComputationalVariable) -> Option<f64> {
        self.weights.get(variable).copied()
    }

    /// Read access to the source term.
    pub fn source_term(&self) -> &SourceTerm {
        &self.source
    }

    /// Mutable access to the source term (accumulate-only).
    pub fn source_term_mut(&mut self) -> &mut SourceTerm {
        &mut self.source
    }

    /// Number of distinct variables contributing to this molecule.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check whether any variable has contributed yet.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterate over `(variable, weight)` entries.
    ///
    /// Iteration order is unspecified; consumers assembling matrix rows
    /// must place entries by the variable's cell index, not by iteration
    /// position.
    pub fn iter(&self) -> impl Iterator<Item = (&ComputationalVariable, f64)> {
        self.weights.iter().map(|(v, &w)| (v, w))
    }
}

/// Face-scoped molecule recording which cell evaluated it first.
///
/// A flux molecule is created empty when a face's quantity is registered
/// and populated by whichever adjacent cell's flux-pass visit comes first.
/// The second adjacent cell of an interior face finds the molecule
/// non-empty, treats the face as already evaluated and negates the
/// recorded weights on its side of the equation. Checking [`is_empty`]
/// before populating is an evaluator obligation; the molecule itself does
/// not reject repeat contributions.
///
/// [`is_empty`]: FluxMolecule::is_empty
#[derive(Debug, Clone, Default)]
pub struct FluxMolecule {
    molecule: Molecule,
    cell: Option<CellIndex>,
}

impl FluxMolecule {
    /// Create an empty flux molecule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the cell performing the first evaluation.
    pub fn set_cell(&mut self, cell: CellIndex) {
        self.cell = Some(cell);
    }

    /// The cell that performed the first evaluation, if any.
    pub fn cell(&self) -> Option<CellIndex> {
        self.cell
    }

    /// Add `weight` against `variable` (see [`Molecule::add`]).
    pub fn add(&mut self, variable: &ComputationalVariable, weight: f64) {
        self.molecule.add(variable, weight);
    }

    /// The weight recorded against `variable`, if any.
    pub fn weight(&self, variable: &ComputationalVariable) -> Option<f64> {
        self.molecule.weight(variable)
    }

    /// Read access to the source term.
    pub fn source_term(&self) -> &SourceTerm {
        self.molecule.source_term()
    }

    /// Mutable access to the source term (accumulate-only).
    pub fn source_term_mut(&mut self) -> &mut SourceTerm {
        self.molecule.source_term_mut()
    }

    /// Number of distinct variables contributing.
    pub fn len(&self) -> usize {
        self.molecule.len()
    }

    /// Check whether the flux through this face has been evaluated yet.
    pub fn is_empty(&self) -> bool {
        self.molecule.is_empty()
    }

    /// The underlying molecule.
    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn var(name: &str, cell: usize) -> ComputationalVariable {
        ComputationalVariable::new(name, CellIndex::new(cell))
    }

    #[test]
    fn test_source_term_accumulates() {
        let mut source = SourceTerm::default();
        assert_eq!(source.value(), 0.0);
        source += 1.5;
        source += 2.0;
        assert_relative_eq!(source.value(), 3.5);
    }

    #[test]
    fn test_variable_identity() {
        assert_eq!(var("T", 0), var("T", 0));
        assert_ne!(var("T", 0), var("T", 1));
        assert_ne!(var("T", 0), var("p", 0));
    }

    #[test]
    fn test_add_inserts_and_sums() {
        let mut molecule = Molecule::new();
        assert!(molecule.is_empty());
        assert_eq!(molecule.len(), 0);

        molecule.add(&var("T", 0), 2.0);
        molecule.add(&var("T", 1), -2.0);
        assert_eq!(molecule.len(), 2);
        assert!(!molecule.is_empty());

        // Repeated contributions to the same unknown sum up.
        molecule.add(&var("T", 0), 0.5);
        assert_eq!(molecule.len(), 2);
        assert_relative_eq!(molecule.weight(&var("T", 0)).unwrap(), 2.5);
        assert_relative_eq!(molecule.weight(&var("T", 1)).unwrap(), -2.0);
    }

    #[test]
    fn test_weight_of_absent_variable_is_none() {
        let mut molecule = Molecule::new();
        molecule.add(&var("T", 0), 1.0);
        assert!(molecule.weight(&var("T", 3)).is_none());
    }

    #[test]
    fn test_molecule_source_term_access() {
        let mut molecule = Molecule::new();
        *molecule.source_term_mut() += 4.0;
        *molecule.source_term_mut() += 0.25;
        assert_relative_eq!(molecule.source_term().value(), 4.25);
        // Source contributions do not count as weight entries.
        assert!(molecule.is_empty());
    }

    #[test]
    fn test_flux_molecule_records_first_cell() {
        let mut flux = FluxMolecule::new();
        assert!(flux.cell().is_none());
        assert!(flux.is_empty());

        flux.set_cell(CellIndex::new(2));
        flux.add(&var("T", 2), -1.5);
        assert_eq!(flux.cell(), Some(CellIndex::new(2)));
        assert_eq!(flux.len(), 1);
        assert!(!flux.is_empty());
    }

    #[test]
    fn test_molecule_iter_entries() {
        let mut molecule = Molecule::new();
        molecule.add(&var("T", 0), 1.0);
        molecule.add(&var("T", 1), -1.0);

        let mut weights: Vec<_> = molecule.iter().map(|(v, w)| (v.cell().get(), w)).collect();
        weights.sort_by_key(|&(c, _)| c);
        assert_eq!(weights, vec![(0, 1.0), (1, -1.0)]);
    }
}
