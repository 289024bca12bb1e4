//! Formal contexts.
//!
//! A context is a binary relation between objects and attributes. The
//! derivation operators map a set of attributes to the objects having all
//! of them (its *extent*) and a set of objects to the attributes they all
//! share (its *intent*); applying both gives the closure of an attribute
//! set.

use crate::closure::ClosureSystem;
use crate::concept::Concept;
use crate::error::{ClosureError, Result};
use crate::ground::GroundSet;
use crate::set::ComparableSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Arrow relation between a non-incident object and attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arrow {
    /// `g ↙ m`: every object with a strictly larger row has `m`.
    Down,
    /// `g ↗ m`: every attribute with a strictly larger column holds for `g`.
    Up,
    /// Both arrows hold.
    Both,
}

/// Objects × attributes incidence table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    objects: GroundSet,
    attributes: GroundSet,

    /// Attributes of each object.
    rows: Vec<ComparableSet>,

    /// Objects of each attribute.
    columns: Vec<ComparableSet>,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// Context with the given objects and attributes and an empty relation.
    pub fn with_labels<O, A, S, T>(objects: O, attributes: A) -> Result<Self>
    where
        O: IntoIterator<Item = S>,
        A: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut context = Context::new();
        for object in objects {
            context.add_object(object)?;
        }
        for attribute in attributes {
            context.add_attribute(attribute)?;
        }
        Ok(context)
    }

    pub fn add_object(&mut self, label: impl Into<String>) -> Result<usize> {
        let object = self.objects.insert(label)?;
        self.rows.push(ComparableSet::new());
        Ok(object)
    }

    pub fn add_attribute(&mut self, label: impl Into<String>) -> Result<usize> {
        let attribute = self.attributes.insert(label)?;
        self.columns.push(ComparableSet::new());
        Ok(attribute)
    }

    /// Relate an object to an attribute. Returns `Ok(false)` if they were
    /// already related.
    pub fn add_relation(&mut self, object: usize, attribute: usize) -> Result<bool> {
        self.check_pair(object, attribute)?;
        self.columns[attribute].insert(object);
        Ok(self.rows[object].insert(attribute))
    }

    pub fn add_relation_by_label(&mut self, object: &str, attribute: &str) -> Result<bool> {
        let o = self
            .objects
            .index_of(object)
            .ok_or_else(|| ClosureError::UnknownLabel(object.to_string()))?;
        let a = self
            .attributes
            .index_of(attribute)
            .ok_or_else(|| ClosureError::UnknownLabel(attribute.to_string()))?;
        self.add_relation(o, a)
    }

    pub fn remove_relation(&mut self, object: usize, attribute: usize) -> bool {
        if self.check_pair(object, attribute).is_err() {
            return false;
        }
        self.columns[attribute].remove(object);
        self.rows[object].remove(attribute)
    }

    fn check_pair(&self, object: usize, attribute: usize) -> Result<()> {
        if !self.objects.contains(object) {
            return Err(ClosureError::UnknownElement {
                index: object,
                size: self.objects.len(),
            });
        }
        if !self.attributes.contains(attribute) {
            return Err(ClosureError::UnknownElement {
                index: attribute,
                size: self.attributes.len(),
            });
        }
        Ok(())
    }

    pub fn has_relation(&self, object: usize, attribute: usize) -> bool {
        self.rows
            .get(object)
            .map(|row| row.contains(attribute))
            .unwrap_or(false)
    }

    pub fn objects(&self) -> &GroundSet {
        &self.objects
    }

    pub fn attributes(&self) -> &GroundSet {
        &self.attributes
    }

    /// Attributes of one object.
    pub fn row(&self, object: usize) -> Option<&ComparableSet> {
        self.rows.get(object)
    }

    /// Objects of one attribute.
    pub fn column(&self, attribute: usize) -> Option<&ComparableSet> {
        self.columns.get(attribute)
    }

    pub fn relation_count(&self) -> usize {
        self.rows.iter().map(ComparableSet::len).sum()
    }

    /// Objects having every attribute of `attributes`.
    pub fn extent(&self, attributes: &ComparableSet) -> ComparableSet {
        let mut extent = self.objects.full();
        for attribute in attributes.iter() {
            match self.columns.get(attribute) {
                Some(column) => extent = extent.intersection(column),
                None => return ComparableSet::new(),
            }
        }
        extent
    }

    /// Attributes shared by every object of `objects`.
    pub fn intent(&self, objects: &ComparableSet) -> ComparableSet {
        let mut intent = self.attributes.full();
        for object in objects.iter() {
            match self.rows.get(object) {
                Some(row) => intent = intent.intersection(row),
                None => return ComparableSet::new(),
            }
        }
        intent
    }

    /// Closure on the object side: extent of the intent.
    pub fn object_closure(&self, objects: &ComparableSet) -> ComparableSet {
        self.extent(&self.intent(objects))
    }

    /// The dual context: objects and attributes swap roles.
    pub fn transpose(&self) -> Context {
        Context {
            objects: self.attributes.clone(),
            attributes: self.objects.clone(),
            rows: self.columns.clone(),
            columns: self.rows.clone(),
        }
    }

    /// Merge objects with identical rows and attributes with identical
    /// columns. Merged labels are joined with `/`; a label that is already
    /// taken gets the first free `#2`, `#3`, ... suffix.
    pub fn clarify(&self) -> Result<Context> {
        let objects = group_identical(&self.rows, &self.objects);
        let attributes = group_identical(&self.columns, &self.attributes);

        let mut clarified = Context::new();
        for (label, _) in &objects {
            let label = unused_label(&clarified.objects, label);
            clarified.add_object(label)?;
        }
        for (label, _) in &attributes {
            let label = unused_label(&clarified.attributes, label);
            clarified.add_attribute(label)?;
        }
        for (o, (_, object)) in objects.iter().enumerate() {
            for (a, (_, attribute)) in attributes.iter().enumerate() {
                if self.has_relation(*object, *attribute) {
                    clarified.add_relation(o, a)?;
                }
            }
        }

        tracing::debug!(
            objects = clarified.objects.len(),
            attributes = clarified.attributes.len(),
            "context clarified"
        );
        Ok(clarified)
    }

    /// Down and up arrows of every non-incident pair.
    pub fn arrow_relations(&self) -> BTreeMap<(usize, usize), Arrow> {
        let mut arrows = BTreeMap::new();

        for (g, row) in self.rows.iter().enumerate() {
            for (m, column) in self.columns.iter().enumerate() {
                if row.contains(m) {
                    continue;
                }
                let down = self
                    .rows
                    .iter()
                    .filter(|other| row.is_proper_subset(other))
                    .all(|other| other.contains(m));
                let up = self
                    .columns
                    .iter()
                    .filter(|other| column.is_proper_subset(other))
                    .all(|other| other.contains(g));

                let arrow = match (down, up) {
                    (true, true) => Some(Arrow::Both),
                    (true, false) => Some(Arrow::Down),
                    (false, true) => Some(Arrow::Up),
                    (false, false) => None,
                };
                if let Some(arrow) = arrow {
                    arrows.insert((g, m), arrow);
                }
            }
        }

        arrows
    }
}

fn unused_label(ground: &GroundSet, label: &str) -> String {
    if ground.index_of(label).is_none() {
        return label.to_string();
    }
    (2..)
        .map(|n| format!("{}#{}", label, n))
        .find(|candidate| ground.index_of(candidate).is_none())
        .unwrap_or_else(|| label.to_string())
}

/// Group identical lines, keeping first-occurrence order. Returns the
/// merged label and a representative index per group.
fn group_identical(lines: &[ComparableSet], ground: &GroundSet) -> Vec<(String, usize)> {
    let mut groups: Vec<(Vec<&str>, usize)> = Vec::new();
    let mut seen: BTreeMap<&ComparableSet, usize> = BTreeMap::new();

    for (i, line) in lines.iter().enumerate() {
        let label = ground.label(i).unwrap_or("?");
        match seen.get(line) {
            Some(&group) => groups[group].0.push(label),
            None => {
                seen.insert(line, groups.len());
                groups.push((vec![label], i));
            }
        }
    }

    groups
        .into_iter()
        .map(|(labels, representative)| (labels.join("/"), representative))
        .collect()
}

impl ClosureSystem for Context {
    fn ground_set(&self) -> &GroundSet {
        &self.attributes
    }

    fn closure(&self, set: &ComparableSet) -> ComparableSet {
        self.intent(&self.extent(set))
    }

    fn concept(&self, closed: ComparableSet) -> Concept {
        Concept::new(self.extent(&closed), closed)
    }
}
