//! Composable predicates that carry a description for failure messages.

use std::fmt;
use std::sync::Arc;

use crate::domain::dependency::Dependency;
use crate::domain::model::CodeUnit;

pub struct DescribedPredicate<T: ?Sized> {
    description: String,
    test: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: ?Sized + 'static> DescribedPredicate<T> {
    pub fn new(
        description: impl Into<String>,
        test: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            test: Arc::new(test),
        }
    }

    pub fn always_true() -> Self {
        Self::new("always true", |_| true)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn test(&self, value: &T) -> bool {
        (self.test)(value)
    }

    /// Same predicate, different description.
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            test: self.test,
        }
    }

    pub fn and(self, other: DescribedPredicate<T>) -> Self {
        let description = format!("{} and {}", self.description, other.description);
        let (a, b) = (self.test, other.test);
        Self {
            description,
            test: Arc::new(move |value: &T| a(value) && b(value)),
        }
    }

    pub fn or(self, other: DescribedPredicate<T>) -> Self {
        let description = format!("{} or {}", self.description, other.description);
        let (a, b) = (self.test, other.test);
        Self {
            description,
            test: Arc::new(move |value: &T| a(value) || b(value)),
        }
    }

    pub fn negate(self) -> Self {
        let description = format!("not {}", self.description);
        let test = self.test;
        Self {
            description,
            test: Arc::new(move |value: &T| !test(value)),
        }
    }

    /// Lift this predicate onto `U` by applying it to the value `f` extracts.
    pub fn on<U: ?Sized + 'static>(
        self,
        f: impl Fn(&U) -> &T + Send + Sync + 'static,
    ) -> DescribedPredicate<U> {
        let test = self.test;
        DescribedPredicate {
            description: self.description,
            test: Arc::new(move |value: &U| test(f(value))),
        }
    }
}

impl<T: ?Sized> Clone for DescribedPredicate<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            test: Arc::clone(&self.test),
        }
    }
}

impl<T: ?Sized> fmt::Debug for DescribedPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescribedPredicate")
            .field("description", &self.description)
            .finish()
    }
}

/// Matches code units by fully qualified name.
pub fn has_name(name: impl Into<String>) -> DescribedPredicate<CodeUnit> {
    let name = name.into();
    DescribedPredicate::new(format!("name '{name}'"), move |unit: &CodeUnit| {
        unit.name() == name
    })
}

pub fn dependency(origin: &str, target: &str) -> DescribedPredicate<Dependency> {
    dependency_origin(origin)
        .and(dependency_target(target))
        .with_description(format!("dependency {origin} -> {target}"))
}

pub fn dependency_matching(
    origin: DescribedPredicate<CodeUnit>,
    target: DescribedPredicate<CodeUnit>,
) -> DescribedPredicate<Dependency> {
    let description = format!(
        "dependency {} -> {}",
        origin.description(),
        target.description()
    );
    dependency_origin_matching(origin)
        .and(dependency_target_matching(target))
        .with_description(description)
}

pub fn dependency_origin(name: &str) -> DescribedPredicate<Dependency> {
    dependency_origin_matching(has_name(name).with_description(name))
}

pub fn dependency_origin_matching(
    predicate: DescribedPredicate<CodeUnit>,
) -> DescribedPredicate<Dependency> {
    let description = format!("origin {}", predicate.description());
    predicate
        .on(|d: &Dependency| d.origin().as_ref())
        .with_description(description)
}

pub fn dependency_target(name: &str) -> DescribedPredicate<Dependency> {
    dependency_target_matching(has_name(name).with_description(name))
}

pub fn dependency_target_matching(
    predicate: DescribedPredicate<CodeUnit>,
) -> DescribedPredicate<Dependency> {
    let description = format!("target {}", predicate.description());
    predicate
        .on(|d: &Dependency| d.target().as_ref())
        .with_description(description)
}
