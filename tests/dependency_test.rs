//! Dependency factories, predicates and evidence conversion.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use archcycles::domain::convertible::Convertible;
use archcycles::domain::dependency::{Dependency, RelationKind};
use archcycles::domain::model::{
    Access, CodeUnit, Constructor, ConstructorCall, FieldAccess, Member, MemberCore, Method,
    MethodCall,
};
use archcycles::domain::predicate::{
    DescribedPredicate, dependency, dependency_matching, dependency_origin,
    dependency_origin_matching, dependency_target, dependency_target_matching,
};
use common::fixtures::{
    call_dependency, constructor_call, field_dependency, field_get, method_call, unit,
};

#[test]
fn test_dependency_from_access() {
    let call = method_call(1, "a.Origin", "b.Target", 7);
    let dependency = Dependency::from_access(&call).unwrap();

    assert_eq!(dependency.target(), call.target_owner());
    assert_eq!(dependency.description(), call.description());
    assert_eq!(dependency.source_line(), 7);
}

#[test]
fn test_inheritance_descriptions() {
    let class = unit("a.Origin");
    let superclass = unit("b.Base");
    let interface = Arc::new(CodeUnit::interface("b.Port"));
    let sub_interface = Arc::new(CodeUnit::interface("a.SubPort"));

    assert!(
        Dependency::from_inheritance(&class, &superclass)
            .description()
            .contains("Class <a.Origin> extends class <b.Base>")
    );
    assert!(
        Dependency::from_inheritance(&class, &interface)
            .description()
            .contains("Class <a.Origin> implements interface <b.Port>")
    );
    assert!(
        Dependency::from_inheritance(&sub_interface, &interface)
            .description()
            .contains("Interface <a.SubPort> extends interface <b.Port>")
    );
}

#[test]
fn test_every_factory_yields_its_kind() {
    let owner = unit("a.Members");
    let text = unit("c.Text");
    let method = Method {
        core: MemberCore::new(Arc::clone(&owner), "method"),
        parameter_types: vec![Arc::clone(&text)],
        return_type: Some(Arc::clone(&text)),
    };
    let constructor = Member::Constructor(Constructor::new(
        Arc::clone(&owner),
        vec![Arc::clone(&text)],
    ));

    let cases = vec![
        (
            Dependency::from_access(&constructor_call(1, "a.Members", "b.Dep", 3)).unwrap(),
            RelationKind::ConstructorCall,
        ),
        (
            Dependency::from_parameter(&constructor, &text).unwrap(),
            RelationKind::ConstructorParameterType,
        ),
        (
            Dependency::from_access(&field_get(2, "a.Members", "b.Dep", 4)).unwrap(),
            RelationKind::FieldAccess,
        ),
        (
            field_dependency("a.Members", "someField", "c.Text"),
            RelationKind::FieldType,
        ),
        (
            Dependency::from_inheritance(&text, &unit("c.Object")),
            RelationKind::Inheritance,
        ),
        (
            call_dependency(3, "a.Members", "b.Dep", 5),
            RelationKind::MethodCall,
        ),
        (
            Dependency::from_parameter(&Member::Method(method.clone()), &text).unwrap(),
            RelationKind::MethodParameterType,
        ),
        (
            Dependency::from_return_type(&method).unwrap(),
            RelationKind::MethodReturnType,
        ),
    ];

    for (dependency, expected) in cases {
        assert_eq!(dependency.kind(), expected, "{dependency}");
    }
}

#[test]
fn test_return_type_description() {
    let method = Method {
        core: MemberCore::new(unit("a.Repo"), "find"),
        parameter_types: vec![unit("a.Id")],
        return_type: Some(unit("b.Entity")),
    };
    assert_eq!(
        Dependency::from_return_type(&method).unwrap().description(),
        "Method <a.Repo.find(a.Id)> has return type <b.Entity> in (Repo.java:0)"
    );
}

#[test]
fn test_origin_predicates() {
    let dependency = call_dependency(1, "a.Origin", "b.Target", 1);

    assert!(dependency_origin("a.Origin").test(&dependency));
    assert!(!dependency_origin("b.Target").test(&dependency));
    assert_eq!(dependency_origin("a.Origin").description(), "origin a.Origin");

    let foo = DescribedPredicate::new("foo", |_: &CodeUnit| true);
    assert_eq!(dependency_origin_matching(foo).description(), "origin foo");
}

#[test]
fn test_target_predicates() {
    let dependency = call_dependency(1, "a.Origin", "b.Target", 1);

    assert!(dependency_target("b.Target").test(&dependency));
    assert!(!dependency_target("a.Origin").test(&dependency));
    assert_eq!(dependency_target("b.Target").description(), "target b.Target");

    let foo = DescribedPredicate::new("foo", |_: &CodeUnit| true);
    assert_eq!(dependency_target_matching(foo).description(), "target foo");
}

#[test]
fn test_dependency_predicates() {
    let subject = call_dependency(1, "a.Origin", "b.Target", 1);

    assert!(dependency("a.Origin", "b.Target").test(&subject));
    assert!(!dependency("a.Origin", "a.Origin").test(&subject));
    assert!(!dependency("b.Target", "b.Target").test(&subject));
    assert_eq!(
        dependency("a.Origin", "b.Target").description(),
        "dependency a.Origin -> b.Target"
    );

    let first = DescribedPredicate::new("first", |_: &CodeUnit| true);
    let second = DescribedPredicate::new("second", |_: &CodeUnit| false);
    let matching = dependency_matching(first, second);
    assert_eq!(matching.description(), "dependency first -> second");
    assert!(!matching.test(&subject));
}

#[test]
fn test_convert_access_dependency_to_its_evidence() {
    let call = method_call(1, "a.Origin", "b.Target", 9);
    let dependency = Dependency::from_access(&call).unwrap();

    let accesses: HashSet<Access> = dependency.convert_to();
    assert_eq!(accesses, HashSet::from([call.clone()]));

    let Access::MethodCall(expected) = call else {
        unreachable!()
    };
    let calls: HashSet<MethodCall> = dependency.convert_to();
    assert_eq!(calls, HashSet::from([expected]));

    let field_accesses: HashSet<FieldAccess> = dependency.convert_to();
    assert!(field_accesses.is_empty());
    let constructor_calls: HashSet<ConstructorCall> = dependency.convert_to();
    assert!(constructor_calls.is_empty());
}

#[test]
fn test_declared_dependency_converts_to_nothing() {
    let dependency = Dependency::from_inheritance(&unit("a.A"), &unit("b.B"));

    let accesses: HashSet<Access> = dependency.convert_to();
    assert!(accesses.is_empty());
    let units: HashSet<CodeUnit> = dependency.convert_to();
    assert!(units.is_empty());
}

#[test]
fn test_dependencies_sort_by_line_then_description() {
    let mut dependencies = vec![
        call_dependency(1, "a.A", "b.B", 30),
        field_dependency("a.A", "z", "b.B"),
        call_dependency(2, "a.A", "b.C", 12),
        field_dependency("a.A", "b", "b.B"),
    ];
    dependencies.sort();

    let lines: Vec<(u32, &str)> = dependencies
        .iter()
        .map(|d| (d.source_line(), d.description()))
        .collect();
    assert_eq!(
        lines,
        vec![
            (0, "Field <a.A.b> has type <b.B> in (A.java:0)"),
            (0, "Field <a.A.z> has type <b.B> in (A.java:0)"),
            (
                12,
                "Method <a.A.run()> calls method <b.C.call()> in (A.java:12)"
            ),
            (
                30,
                "Method <a.A.run()> calls method <b.B.call()> in (A.java:30)"
            ),
        ]
    );
}
