//! Test fixture generators for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use archcycles::domain::dependency::Dependency;
use archcycles::domain::model::{
    Access, AccessCore, AccessId, CallerKind, ClassSet, CodeUnit, ConstructorCall, Field,
    FieldAccess, FieldAccessType, MemberCore, MethodCall,
};

pub fn unit(name: &str) -> Arc<CodeUnit> {
    Arc::new(CodeUnit::class(name))
}

fn core(
    id: u32,
    origin: &str,
    origin_member: &str,
    target: &str,
    target_member: &str,
    line: u32,
) -> AccessCore {
    AccessCore {
        id: AccessId(id),
        origin_owner: unit(origin),
        origin_member: format!("{origin}.{origin_member}"),
        caller_kind: CallerKind::Method,
        target_owner: unit(target),
        target_member: format!("{target}.{target_member}"),
        line,
    }
}

pub fn method_call(id: u32, origin: &str, target: &str, line: u32) -> Access {
    Access::MethodCall(MethodCall {
        core: core(id, origin, "run()", target, "call()", line),
    })
}

pub fn field_get(id: u32, origin: &str, target: &str, line: u32) -> Access {
    Access::FieldAccess(FieldAccess {
        core: core(id, origin, "run()", target, "value", line),
        access_type: FieldAccessType::Get,
    })
}

pub fn constructor_call(id: u32, origin: &str, target: &str, line: u32) -> Access {
    Access::ConstructorCall(ConstructorCall {
        core: core(id, origin, "run()", target, "<init>()", line),
    })
}

/// Dependency derived from a method call `origin.run()` -> `target.call()`.
pub fn call_dependency(id: u32, origin: &str, target: &str, line: u32) -> Dependency {
    Dependency::from_access(&method_call(id, origin, target, line))
        .expect("method calls always map to a dependency")
}

pub fn field_dependency(owner: &str, name: &str, field_type: &str) -> Dependency {
    Dependency::from_field(&Field {
        core: MemberCore::new(unit(owner), name),
        field_type: unit(field_type),
    })
}

/// Three packages: `shop` and `billing` depend on each other, both depend on
/// `common`.
pub fn shop_model() -> ClassSet {
    let mut classes = ClassSet::new();
    classes.add_unit(CodeUnit::class("com.example.shop.Cart"));
    classes.add_unit(CodeUnit::class("com.example.billing.Invoice"));
    classes.add_unit(CodeUnit::class("com.example.common.Money"));

    classes.add_access(method_call(
        1,
        "com.example.shop.Cart",
        "com.example.billing.Invoice",
        10,
    ));
    classes.add_access(field_get(
        2,
        "com.example.billing.Invoice",
        "com.example.shop.Cart",
        20,
    ));
    classes.add_access(constructor_call(
        3,
        "com.example.billing.Invoice",
        "com.example.common.Money",
        21,
    ));
    classes
}

/// JSON form of [`shop_model`], plus an unrelated class outside `com.example`.
pub const SHOP_MODEL_JSON: &str = r#"{
    "classes": [
        { "name": "com.example.shop.Cart" },
        { "name": "com.example.billing.Invoice" },
        { "name": "com.example.common.Money" },
        { "name": "org.vendor.Lib" }
    ],
    "accesses": [
        {
            "kind": "method_call",
            "origin": "com.example.shop.Cart",
            "origin_member": "run()",
            "target": "com.example.billing.Invoice",
            "target_member": "call()",
            "line": 10
        },
        {
            "kind": "get_field",
            "origin": "com.example.billing.Invoice",
            "origin_member": "run()",
            "target": "com.example.shop.Cart",
            "target_member": "value",
            "line": 20
        },
        {
            "kind": "constructor_call",
            "origin": "com.example.billing.Invoice",
            "origin_member": "run()",
            "target": "com.example.common.Money",
            "target_member": "<init>()",
            "line": 21
        },
        {
            "kind": "method_call",
            "origin": "org.vendor.Lib",
            "origin_member": "init()",
            "target": "com.example.shop.Cart",
            "target_member": "call()",
            "line": 3
        }
    ]
}"#;

/// A model whose packages form no cycle.
pub const ACYCLIC_MODEL_JSON: &str = r#"{
    "classes": [
        { "name": "com.example.shop.Cart", "supertypes": ["com.example.common.Base"] },
        { "name": "com.example.common.Base" }
    ]
}"#;
