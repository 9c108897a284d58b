//! Imported code model: code units, their members and the access facts recorded
//! for them by an importer.
//!
//! The model is read-only once a [`ClassSet`] has been assembled. Code units are
//! shared through `Arc` so that dependencies can reference them without owning them.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::dependency::Dependency;
use crate::domain::error::ConfigurationError;

/// An analyzed type (class or interface).
///
/// Identity is the fully qualified name: two code units with the same name are
/// the same unit, regardless of how much detail the importer resolved for each.
#[derive(Debug, Clone)]
pub struct CodeUnit {
    name: String,
    is_interface: bool,
    supertypes: Vec<String>,
    source_file: Option<String>,
}

impl CodeUnit {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_interface: false,
            supertypes: Vec::new(),
            source_file: None,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            is_interface: true,
            ..Self::class(name)
        }
    }

    pub fn with_supertypes<I, S>(mut self, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supertypes = supertypes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    /// Fully qualified name, e.g. `com.example.shop.Cart`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without the package, e.g. `Cart`. Nested units keep their `$` suffix.
    pub fn simple_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(_, simple)| simple)
    }

    /// Package part of the name; empty for units in the default package.
    pub fn package_name(&self) -> &str {
        self.name.rsplit_once('.').map_or("", |(package, _)| package)
    }

    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    /// Qualified names of the direct supertypes (superclass and interfaces).
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    /// Source file the unit was compiled from. Falls back to the outermost
    /// simple name when the importer recorded none.
    pub fn source_file_name(&self) -> String {
        match &self.source_file {
            Some(file) => file.clone(),
            None => {
                let simple = self.simple_name();
                let outer = simple.split('$').next().unwrap_or(simple);
                format!("{outer}.java")
            }
        }
    }
}

impl PartialEq for CodeUnit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CodeUnit {}

impl Hash for CodeUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for CodeUnit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CodeUnit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for CodeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Formats a source location the way violation messages reference it,
/// e.g. `(Cart.java:12)`.
pub fn format_location(unit: &CodeUnit, line: u32) -> String {
    format!("({}:{})", unit.source_file_name(), line)
}

pub(crate) fn bracket(name: &str) -> String {
    format!("<{name}>")
}

// ============================================================================
// Members
// ============================================================================

/// Attributes shared by all members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberCore {
    pub owner: Arc<CodeUnit>,
    pub name: String,
}

impl MemberCore {
    pub fn new(owner: Arc<CodeUnit>, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub core: MemberCore,
    pub field_type: Arc<CodeUnit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    pub core: MemberCore,
    pub parameter_types: Vec<Arc<CodeUnit>>,
    /// `None` for methods without a return value.
    pub return_type: Option<Arc<CodeUnit>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constructor {
    pub core: MemberCore,
    pub parameter_types: Vec<Arc<CodeUnit>>,
}

pub const CONSTRUCTOR_NAME: &str = "<init>";

impl Constructor {
    pub fn new(owner: Arc<CodeUnit>, parameter_types: Vec<Arc<CodeUnit>>) -> Self {
        Self {
            core: MemberCore::new(owner, CONSTRUCTOR_NAME),
            parameter_types,
        }
    }
}

/// Polymorphic member type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Field(Field),
    Method(Method),
    Constructor(Constructor),
}

impl Member {
    pub fn core(&self) -> &MemberCore {
        match self {
            Member::Field(f) => &f.core,
            Member::Method(m) => &m.core,
            Member::Constructor(c) => &c.core,
        }
    }

    pub fn owner(&self) -> &Arc<CodeUnit> {
        &self.core().owner
    }

    /// Word used to introduce the member in descriptions.
    pub fn kind_word(&self) -> &'static str {
        match self {
            Member::Field(_) => "Field",
            Member::Method(_) => "Method",
            Member::Constructor(_) => "Constructor",
        }
    }

    /// Owner-qualified signature, e.g. `com.example.Cart.add(com.example.Item)`.
    pub fn full_name(&self) -> String {
        let core = self.core();
        match self {
            Member::Field(_) => format!("{}.{}", core.owner.name(), core.name),
            Member::Method(Method {
                parameter_types, ..
            })
            | Member::Constructor(Constructor {
                parameter_types, ..
            }) => format!(
                "{}.{}({})",
                core.owner.name(),
                core.name,
                join_names(parameter_types)
            ),
        }
    }
}

fn join_names(units: &[Arc<CodeUnit>]) -> String {
    units
        .iter()
        .map(|u| u.name())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Accesses
// ============================================================================

/// Importer-assigned identifier; unique within one [`ClassSet`].
///
/// Two accesses with identical text at the same line (e.g. two calls on one
/// line) stay distinct through their ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccessId(pub u32);

/// Kind of code unit member an access originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerKind {
    Method,
    Constructor,
    StaticInitializer,
}

impl CallerKind {
    fn word(self) -> &'static str {
        match self {
            CallerKind::Method => "Method",
            CallerKind::Constructor => "Constructor",
            CallerKind::StaticInitializer => "Static Initializer",
        }
    }
}

/// Shared core attributes for all access facts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessCore {
    pub id: AccessId,
    pub origin_owner: Arc<CodeUnit>,
    /// Signature of the accessing member, e.g. `com.example.Cart.checkout()`.
    pub origin_member: String,
    pub caller_kind: CallerKind,
    pub target_owner: Arc<CodeUnit>,
    /// Signature of the accessed member, e.g. `com.example.Payment.charge(long)`.
    pub target_member: String,
    pub line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldAccessType {
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldAccess {
    pub core: AccessCore,
    pub access_type: FieldAccessType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodCall {
    pub core: AccessCore,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstructorCall {
    pub core: AccessCore,
}

/// A method or constructor reference (e.g. `Cart::new`). Recorded by the
/// importer but not a structural relation of its own, so dependency
/// derivation skips it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberReference {
    pub core: AccessCore,
}

/// A discrete access fact, tagged by category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Access {
    FieldAccess(FieldAccess),
    MethodCall(MethodCall),
    ConstructorCall(ConstructorCall),
    MemberReference(MemberReference),
}

impl Access {
    pub fn core(&self) -> &AccessCore {
        match self {
            Access::FieldAccess(a) => &a.core,
            Access::MethodCall(a) => &a.core,
            Access::ConstructorCall(a) => &a.core,
            Access::MemberReference(a) => &a.core,
        }
    }

    pub fn id(&self) -> AccessId {
        self.core().id
    }

    pub fn origin_owner(&self) -> &Arc<CodeUnit> {
        &self.core().origin_owner
    }

    pub fn target_owner(&self) -> &Arc<CodeUnit> {
        &self.core().target_owner
    }

    pub fn line(&self) -> u32 {
        self.core().line
    }

    fn verb(&self) -> &'static str {
        match self {
            Access::FieldAccess(FieldAccess {
                access_type: FieldAccessType::Get,
                ..
            }) => "gets field",
            Access::FieldAccess(FieldAccess {
                access_type: FieldAccessType::Set,
                ..
            }) => "sets field",
            Access::MethodCall(_) => "calls method",
            Access::ConstructorCall(_) => "calls constructor",
            Access::MemberReference(_) => "references",
        }
    }

    /// e.g. `Method <a.Cart.checkout()> calls method <b.Payment.charge()> in (Cart.java:12)`
    pub fn description(&self) -> String {
        let core = self.core();
        format!(
            "{} {} {} {} in {}",
            core.caller_kind.word(),
            bracket(&core.origin_member),
            self.verb(),
            bracket(&core.target_member),
            format_location(&core.origin_owner, core.line)
        )
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

// ============================================================================
// ClassSet
// ============================================================================

/// An imported set of code units together with their members and accesses.
#[derive(Debug, Clone, Default)]
pub struct ClassSet {
    units: BTreeMap<String, Arc<CodeUnit>>,
    members: Vec<Member>,
    accesses: Vec<Access>,
}

impl ClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a code unit, replacing any stub of the same name.
    pub fn add_unit(&mut self, unit: CodeUnit) -> Arc<CodeUnit> {
        let unit = Arc::new(unit);
        self.units.insert(unit.name().to_string(), Arc::clone(&unit));
        unit
    }

    pub fn get(&self, name: &str) -> Option<&Arc<CodeUnit>> {
        self.units.get(name)
    }

    /// Look up a unit, registering a plain class stub for names the importer
    /// only saw referenced.
    pub fn unit_or_stub(&mut self, name: &str) -> Arc<CodeUnit> {
        Arc::clone(
            self.units
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(CodeUnit::class(name))),
        )
    }

    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    pub fn add_access(&mut self, access: Access) {
        self.accesses.push(access);
    }

    /// Units in name order.
    pub fn units(&self) -> impl Iterator<Item = &Arc<CodeUnit>> {
        self.units.values()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn accesses(&self) -> &[Access] {
        &self.accesses
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Derive every structural dependency between distinct code units.
    ///
    /// Discovery order: inheritance (units in name order), then member
    /// signatures, then accesses, each in import order. Dependencies of a unit
    /// on itself are omitted, as are member references.
    pub fn direct_dependencies(&self) -> Result<Vec<Dependency>, ConfigurationError> {
        let mut dependencies = Vec::new();

        for unit in self.units.values() {
            for supertype in unit.supertypes() {
                let target = self
                    .units
                    .get(supertype)
                    .cloned()
                    .unwrap_or_else(|| Arc::new(CodeUnit::class(supertype.as_str())));
                dependencies.push(Dependency::from_inheritance(unit, &target));
            }
        }

        for member in &self.members {
            match member {
                Member::Field(field) => dependencies.push(Dependency::from_field(field)),
                Member::Method(method) => {
                    for parameter in &method.parameter_types {
                        dependencies.push(Dependency::from_parameter(member, parameter)?);
                    }
                    dependencies.extend(Dependency::from_return_type(method));
                }
                Member::Constructor(constructor) => {
                    for parameter in &constructor.parameter_types {
                        dependencies.push(Dependency::from_parameter(member, parameter)?);
                    }
                }
            }
        }

        for access in &self.accesses {
            if matches!(access, Access::MemberReference(_)) {
                continue;
            }
            dependencies.push(Dependency::from_access(access)?);
        }

        dependencies.retain(|d| d.origin() != d.target());
        Ok(dependencies)
    }
}
