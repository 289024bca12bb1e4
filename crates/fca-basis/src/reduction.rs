//! Lattice reductions and the reduced table.
//!
//! Every finite lattice is determined by its irreducible elements: each
//! concept is the join of the join-irreducibles below it and the meet of
//! the meet-irreducibles above it.

use crate::error::Result;
use fca_core::{ComparableSet, Context};
use fca_graph::NodeId;
use fca_lattice::ConceptLattice;
use std::collections::BTreeSet;

/// Suborder of the join-irreducible concepts.
pub fn join_reduction(lattice: &ConceptLattice) -> Result<ConceptLattice> {
    let keep = lattice.join_irreducibles()?;
    Ok(lattice.restrict(&keep)?)
}

/// Suborder of the meet-irreducible concepts.
pub fn meet_reduction(lattice: &ConceptLattice) -> Result<ConceptLattice> {
    let keep = lattice.meet_irreducibles()?;
    Ok(lattice.restrict(&keep)?)
}

/// Suborder of the join- and meet-irreducibles together with the top and
/// the bottom.
pub fn irreducibles_reduction(lattice: &ConceptLattice) -> Result<ConceptLattice> {
    let mut keep: BTreeSet<NodeId> = lattice.join_irreducibles()?;
    keep.extend(lattice.meet_irreducibles()?);
    keep.extend(lattice.top());
    keep.extend(lattice.bottom());
    Ok(lattice.restrict(&keep)?)
}

/// Reduced context of the lattice.
///
/// Objects are the meet-irreducibles, attributes the join-irreducibles,
/// both labelled by node id; `m` has attribute `j` iff `j ≤ m`. A concept
/// `x` corresponds to the closed attribute set `{j : j ≤ x}`.
pub fn table(lattice: &ConceptLattice) -> Result<Context> {
    let joins: Vec<NodeId> = lattice.join_irreducibles()?.into_iter().collect();
    let meets: Vec<NodeId> = lattice.meet_irreducibles()?.into_iter().collect();

    let mut context = Context::with_labels(
        meets.iter().map(NodeId::to_string),
        joins.iter().map(NodeId::to_string),
    )?;
    for (object, &meet) in meets.iter().enumerate() {
        for (attribute, &join) in joins.iter().enumerate() {
            if lattice.leq(join, meet) {
                context.add_relation(object, attribute)?;
            }
        }
    }

    tracing::debug!(
        objects = meets.len(),
        attributes = joins.len(),
        relations = context.relation_count(),
        "reduced table built"
    );
    Ok(context)
}

/// Attribute set of the reduced table standing for concept `id`.
pub fn table_intent(lattice: &ConceptLattice, id: NodeId) -> Result<ComparableSet> {
    Ok(lattice
        .join_irreducibles()?
        .into_iter()
        .enumerate()
        .filter(|(_, join)| lattice.leq(*join, id))
        .map(|(attribute, _)| attribute)
        .collect())
}
