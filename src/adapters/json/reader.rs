use crate::adapters::json::document::{AccessDocument, AccessKind, ClassDocument, ModelDocument};
use crate::domain::model::{
    Access, AccessCore, AccessId, ClassSet, CodeUnit, Constructor, ConstructorCall, Field,
    FieldAccess, FieldAccessType, Member, MemberCore, MemberReference, Method, MethodCall,
};
use crate::domain::ports::ModelSource;
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// JSON class model adapter
pub struct JsonModelReader {
    pub model_path: PathBuf,
}

impl JsonModelReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            model_path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse a model document from a JSON string.
    pub fn parse(json: &str) -> Result<ClassSet> {
        let document: ModelDocument =
            serde_json::from_str(json).context("Failed to parse class model JSON")?;
        build_class_set(document)
    }
}

impl ModelSource for JsonModelReader {
    fn load(&self) -> Result<ClassSet> {
        let json = std::fs::read_to_string(&self.model_path).with_context(|| {
            format!("Failed to read model file: {}", self.model_path.display())
        })?;
        let classes = Self::parse(&json)
            .with_context(|| format!("Invalid model file: {}", self.model_path.display()))?;
        debug!(
            units = classes.len(),
            members = classes.members().len(),
            accesses = classes.accesses().len(),
            "loaded class model"
        );
        Ok(classes)
    }
}

/// Two-pass conversion: register every declared unit first so that member and
/// access references resolve to the declared unit; names only ever referenced
/// become class stubs.
fn build_class_set(document: ModelDocument) -> Result<ClassSet> {
    let mut classes = ClassSet::new();

    // Pass 1: Declared units
    for class in &document.classes {
        let mut unit = if class.interface {
            CodeUnit::interface(class.name.as_str())
        } else {
            CodeUnit::class(class.name.as_str())
        };
        unit = unit.with_supertypes(class.supertypes.iter().cloned());
        if let Some(file) = &class.source_file {
            unit = unit.with_source_file(file.as_str());
        }
        classes.add_unit(unit);
    }

    // Pass 2: Members and accesses
    for class in &document.classes {
        add_members(&mut classes, class);
    }
    for (index, access) in document.accesses.iter().enumerate() {
        let access = convert_access(&mut classes, access_id(index)?, access);
        classes.add_access(access);
    }

    Ok(classes)
}

fn access_id(index: usize) -> Result<AccessId> {
    let id = u32::try_from(index)
        .with_context(|| format!("Too many accesses in class model: {}", index + 1))?;
    Ok(AccessId(id))
}

fn add_members(classes: &mut ClassSet, class: &ClassDocument) {
    let owner = classes.unit_or_stub(&class.name);

    for field in &class.fields {
        let field_type = classes.unit_or_stub(&field.field_type);
        classes.add_member(Member::Field(Field {
            core: MemberCore::new(Arc::clone(&owner), field.name.as_str()),
            field_type,
        }));
    }

    for method in &class.methods {
        let parameter_types = resolve_all(classes, &method.parameters);
        let return_type = method
            .return_type
            .as_deref()
            .map(|name| classes.unit_or_stub(name));
        classes.add_member(Member::Method(Method {
            core: MemberCore::new(Arc::clone(&owner), method.name.as_str()),
            parameter_types,
            return_type,
        }));
    }

    for constructor in &class.constructors {
        let parameter_types = resolve_all(classes, &constructor.parameters);
        classes.add_member(Member::Constructor(Constructor::new(
            Arc::clone(&owner),
            parameter_types,
        )));
    }
}

fn resolve_all(classes: &mut ClassSet, names: &[String]) -> Vec<Arc<CodeUnit>> {
    names.iter().map(|name| classes.unit_or_stub(name)).collect()
}

fn convert_access(classes: &mut ClassSet, id: AccessId, access: &AccessDocument) -> Access {
    let core = AccessCore {
        id,
        origin_owner: classes.unit_or_stub(&access.origin),
        origin_member: format!("{}.{}", access.origin, access.origin_member),
        caller_kind: access.caller,
        target_owner: classes.unit_or_stub(&access.target),
        target_member: format!("{}.{}", access.target, access.target_member),
        line: access.line,
    };

    match access.kind {
        AccessKind::GetField => Access::FieldAccess(FieldAccess {
            core,
            access_type: FieldAccessType::Get,
        }),
        AccessKind::SetField => Access::FieldAccess(FieldAccess {
            core,
            access_type: FieldAccessType::Set,
        }),
        AccessKind::MethodCall => Access::MethodCall(MethodCall { core }),
        AccessKind::ConstructorCall => Access::ConstructorCall(ConstructorCall { core }),
        AccessKind::MemberReference => Access::MemberReference(MemberReference { core }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dependency::RelationKind;

    const MODEL: &str = r#"{
        "classes": [
            {
                "name": "a.Cart",
                "supertypes": ["a.Base"],
                "fields": [{ "name": "payment", "type": "b.Payment" }],
                "constructors": [{ "parameters": ["b.Payment"] }]
            },
            { "name": "b.Payment", "interface": true }
        ],
        "accesses": [
            {
                "kind": "method_call",
                "origin": "a.Cart",
                "origin_member": "checkout()",
                "target": "b.Payment",
                "target_member": "charge()",
                "line": 12
            }
        ]
    }"#;

    #[test]
    fn test_parse_declared_and_stub_units() {
        let classes = JsonModelReader::parse(MODEL).unwrap();

        assert!(classes.get("b.Payment").unwrap().is_interface());
        assert_eq!(classes.get("a.Cart").unwrap().supertypes(), ["a.Base"]);
        // a.Base is only referenced as a supertype and is not registered
        assert!(classes.get("a.Base").is_none());
        assert_eq!(classes.members().len(), 2);
        assert_eq!(classes.accesses().len(), 1);
    }

    #[test]
    fn test_access_members_are_owner_qualified() {
        let classes = JsonModelReader::parse(MODEL).unwrap();
        assert_eq!(
            classes.accesses()[0].description(),
            "Method <a.Cart.checkout()> calls method <b.Payment.charge()> in (Cart.java:12)"
        );
    }

    #[test]
    fn test_direct_dependencies_of_parsed_model() {
        let classes = JsonModelReader::parse(MODEL).unwrap();
        let kinds: Vec<RelationKind> = classes
            .direct_dependencies()
            .unwrap()
            .iter()
            .map(|d| d.kind())
            .collect();

        assert_eq!(
            kinds,
            vec![
                RelationKind::Inheritance,
                RelationKind::FieldType,
                RelationKind::ConstructorParameterType,
                RelationKind::MethodCall,
            ]
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_access_ids_must_fit_u32() {
        assert_eq!(access_id(7).unwrap(), AccessId(7));
        assert_eq!(access_id(u32::MAX as usize).unwrap(), AccessId(u32::MAX));

        let err = access_id(u32::MAX as usize + 1).unwrap_err();
        assert!(err.to_string().contains("Too many accesses"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(JsonModelReader::parse("{ \"classes\": [ { } ] }").is_err());
    }
}
