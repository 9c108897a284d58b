//! Mock attachments and slice assignments for integration tests.
#![allow(dead_code)]

use std::collections::HashSet;

use archcycles::domain::convertible::Convertible;
use archcycles::domain::model::CodeUnit;

/// Attachment that converts to itself and to [`ConversionTarget`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attachment(pub String);

impl Attachment {
    pub fn new(message: &str) -> Self {
        Self(message.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversionTarget(pub String);

/// Type no attachment converts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unrelated;

impl Convertible<Attachment> for Attachment {
    fn convert_to(&self) -> HashSet<Attachment> {
        HashSet::from([self.clone()])
    }
}

impl Convertible<ConversionTarget> for Attachment {
    fn convert_to(&self) -> HashSet<ConversionTarget> {
        HashSet::from([ConversionTarget(self.0.clone())])
    }
}

impl Convertible<Unrelated> for Attachment {
    fn convert_to(&self) -> HashSet<Unrelated> {
        HashSet::new()
    }
}

/// Slice function mapping every unit to its package.
pub fn package_slices(unit: &CodeUnit) -> Option<String> {
    Some(unit.package_name().to_string())
}

/// Slice function mapping every unit to its first package segment.
pub fn top_level_slices(unit: &CodeUnit) -> Option<String> {
    unit.package_name()
        .split('.')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
