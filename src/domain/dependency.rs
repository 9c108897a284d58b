use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::convertible::Convertible;
use crate::domain::error::ConfigurationError;
use crate::domain::model::{
    Access, CodeUnit, ConstructorCall, Field, FieldAccess, Member, Method, MethodCall, bracket,
    format_location,
};

/// Relation kind - the closed set of structural relationships between code units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    /// Code in the origin calls a constructor of the target.
    ConstructorCall,
    /// The origin declares a constructor with a parameter of the target type.
    ConstructorParameterType,
    /// Code in the origin accesses a field of the target.
    FieldAccess,
    /// The origin declares a field of the target type.
    FieldType,
    /// The origin extends or implements the target.
    Inheritance,
    /// Code in the origin calls a method of the target.
    MethodCall,
    /// The origin declares a method with a parameter of the target type.
    MethodParameterType,
    /// The origin declares a method returning the target type.
    MethodReturnType,
}

impl RelationKind {
    /// Closed mapping from access category to relation kind. `None` for
    /// categories that do not constitute a structural dependency.
    fn of_access(access: &Access) -> Option<Self> {
        match access {
            Access::FieldAccess(_) => Some(RelationKind::FieldAccess),
            Access::MethodCall(_) => Some(RelationKind::MethodCall),
            Access::ConstructorCall(_) => Some(RelationKind::ConstructorCall),
            Access::MemberReference(_) => None,
        }
    }
}

/// A dependency of one code unit on another, with a human readable
/// description of its cause.
///
/// Dependencies derived from an access keep that access as evidence, which can
/// be recovered through [`Convertible`]. Such dependencies are identified by
/// their evidence: two textually identical accesses never collapse into one
/// dependency. All other dependencies are identified by origin, target, line
/// and description.
#[derive(Debug, Clone)]
pub struct Dependency {
    kind: RelationKind,
    origin: Arc<CodeUnit>,
    target: Arc<CodeUnit>,
    source_line: u32,
    description: String,
    evidence: Option<Access>,
}

impl Dependency {
    pub fn from_access(access: &Access) -> Result<Self, ConfigurationError> {
        let kind = RelationKind::of_access(access).ok_or_else(|| {
            ConfigurationError::UnmappedAccess {
                access: access.description(),
            }
        })?;
        Ok(Self {
            kind,
            origin: Arc::clone(access.origin_owner()),
            target: Arc::clone(access.target_owner()),
            source_line: access.line(),
            description: access.description(),
            evidence: Some(access.clone()),
        })
    }

    pub fn from_inheritance(origin: &Arc<CodeUnit>, supertype: &Arc<CodeUnit>) -> Self {
        let origin_word = if origin.is_interface() {
            "Interface"
        } else {
            "Class"
        };
        let relation = if !origin.is_interface() && supertype.is_interface() {
            "implements"
        } else {
            "extends"
        };
        let target_word = if supertype.is_interface() {
            "interface"
        } else {
            "class"
        };

        let description = format!(
            "{} {} {} {} {} in {}",
            origin_word,
            bracket(origin.name()),
            relation,
            target_word,
            bracket(supertype.name()),
            format_location(origin, 0)
        );
        Self::declared(RelationKind::Inheritance, origin, supertype, description)
    }

    pub fn from_field(field: &Field) -> Self {
        Self::from_member(
            RelationKind::FieldType,
            &Member::Field(field.clone()),
            "has type",
            &field.field_type,
        )
    }

    /// `None` for methods without a return value.
    pub fn from_return_type(method: &Method) -> Option<Self> {
        let return_type = method.return_type.as_ref()?;
        Some(Self::from_member(
            RelationKind::MethodReturnType,
            &Member::Method(method.clone()),
            "has return type",
            return_type,
        ))
    }

    /// The relation kind follows the member: methods yield
    /// [`RelationKind::MethodParameterType`], constructors
    /// [`RelationKind::ConstructorParameterType`].
    pub fn from_parameter(
        member: &Member,
        parameter: &Arc<CodeUnit>,
    ) -> Result<Self, ConfigurationError> {
        let kind = match member {
            Member::Method(_) => RelationKind::MethodParameterType,
            Member::Constructor(_) => RelationKind::ConstructorParameterType,
            Member::Field(_) => {
                return Err(ConfigurationError::NotInvocable {
                    member: member.full_name(),
                });
            }
        };
        Ok(Self::from_member(
            kind,
            member,
            "has parameter of type",
            parameter,
        ))
    }

    fn from_member(
        kind: RelationKind,
        member: &Member,
        relation: &str,
        related: &Arc<CodeUnit>,
    ) -> Self {
        let owner = member.owner();
        let description = format!(
            "{} {} {} {} in {}",
            member.kind_word(),
            bracket(&member.full_name()),
            relation,
            bracket(related.name()),
            format_location(owner, 0)
        );
        Self::declared(kind, owner, related, description)
    }

    fn declared(
        kind: RelationKind,
        origin: &Arc<CodeUnit>,
        target: &Arc<CodeUnit>,
        description: String,
    ) -> Self {
        Self {
            kind,
            origin: Arc::clone(origin),
            target: Arc::clone(target),
            source_line: 0,
            description,
            evidence: None,
        }
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn origin(&self) -> &Arc<CodeUnit> {
        &self.origin
    }

    pub fn target(&self) -> &Arc<CodeUnit> {
        &self.target
    }

    /// Line of the originating statement; 0 for declaration-level dependencies.
    pub fn source_line(&self) -> u32 {
        self.source_line
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn evidence(&self) -> Option<&Access> {
        self.evidence.as_ref()
    }
}

/// Distinct targets of the given dependencies.
pub fn to_target_classes<'a, I>(dependencies: I) -> BTreeSet<Arc<CodeUnit>>
where
    I: IntoIterator<Item = &'a Dependency>,
{
    dependencies
        .into_iter()
        .map(|d| Arc::clone(&d.target))
        .collect()
}

impl PartialEq for Dependency {
    fn eq(&self, other: &Self) -> bool {
        match (&self.evidence, &other.evidence) {
            (Some(a), Some(b)) => a == b,
            (None, None) => {
                self.origin == other.origin
                    && self.target == other.target
                    && self.source_line == other.source_line
                    && self.description == other.description
            }
            _ => false,
        }
    }
}

impl Eq for Dependency {}

impl Hash for Dependency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.evidence {
            Some(access) => access.hash(state),
            None => {
                self.origin.hash(state);
                self.target.hash(state);
                self.source_line.hash(state);
                self.description.hash(state);
            }
        }
    }
}

impl PartialOrd for Dependency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Line first, then description. The remaining keys only separate
/// dependencies that render identically.
impl Ord for Dependency {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source_line
            .cmp(&other.source_line)
            .then_with(|| self.description.cmp(&other.description))
            .then_with(|| self.origin.cmp(&other.origin))
            .then_with(|| self.target.cmp(&other.target))
            .then_with(|| {
                self.evidence
                    .as_ref()
                    .map(Access::id)
                    .cmp(&other.evidence.as_ref().map(Access::id))
            })
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

// Evidence recovery. Only access-derived dependencies carry evidence; the
// code units themselves are never handed out as evidence.

impl Convertible<Access> for Dependency {
    fn convert_to(&self) -> HashSet<Access> {
        self.evidence.iter().cloned().collect()
    }
}

impl Convertible<FieldAccess> for Dependency {
    fn convert_to(&self) -> HashSet<FieldAccess> {
        match &self.evidence {
            Some(Access::FieldAccess(access)) => HashSet::from([access.clone()]),
            _ => HashSet::new(),
        }
    }
}

impl Convertible<MethodCall> for Dependency {
    fn convert_to(&self) -> HashSet<MethodCall> {
        match &self.evidence {
            Some(Access::MethodCall(call)) => HashSet::from([call.clone()]),
            _ => HashSet::new(),
        }
    }
}

impl Convertible<ConstructorCall> for Dependency {
    fn convert_to(&self) -> HashSet<ConstructorCall> {
        match &self.evidence {
            Some(Access::ConstructorCall(call)) => HashSet::from([call.clone()]),
            _ => HashSet::new(),
        }
    }
}

impl Convertible<CodeUnit> for Dependency {
    fn convert_to(&self) -> HashSet<CodeUnit> {
        HashSet::new()
    }
}
