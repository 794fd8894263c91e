//! Rendering of criteria as in-memory predicates.

use qof_query::{CollectionRef, Criterion, Operator, QueryError, QueryResult, RenderCapability};
use tracing::debug;

use crate::condition::{Binding, Condition, display_value};
use crate::eval::compare;
use crate::predicate::Predicate;

const BACKEND: &str = "predicate";

/// Compiles criteria trees into [`Predicate`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredicateRenderer;

impl RenderCapability for PredicateRenderer {
    type Output = Condition;
    type Param = Binding;
    type Compiled<S: 'static> = Predicate<S>;

    fn identity(&self) -> Condition {
        Condition::Always
    }

    fn is_identity(&self, condition: &Condition) -> bool {
        condition.is_always()
    }

    fn and(&self, left: Condition, right: Condition) -> Condition {
        left.and(right)
    }

    fn or(&self, left: Condition, right: Condition) -> Condition {
        left.or(right)
    }

    fn comparison(&self, criterion: &Criterion, param: &Binding) -> QueryResult<Condition> {
        let operator = criterion.operator();
        let property = criterion.property().clone();
        let expected = criterion.value().clone();

        let shape_ok = match operator {
            Operator::In => expected.is_list(),
            Operator::Contains | Operator::StartsWith => expected.as_str().is_some(),
            Operator::Equal
            | Operator::LessThan
            | Operator::GreaterThan
            | Operator::LessThanOrEqual
            | Operator::GreaterThanOrEqual => !expected.is_list(),
        };
        if !shape_ok {
            return Err(QueryError::unsupported_operator(
                BACKEND,
                operator,
                property.name(),
            ));
        }

        let label = format!(
            "{}.{} {} {}",
            param,
            property.name(),
            operator,
            display_value(&expected)
        );

        Ok(Condition::test(label, move |record| {
            compare(operator, &property.get(record), &expected)
        }))
    }

    fn parameter<S: 'static>(&self, name: &str) -> Binding {
        Binding::new(name, std::any::type_name::<S>())
    }

    fn element_parameter(&self, collection: &CollectionRef) -> Binding {
        Binding::new(collection.name().to_lowercase(), collection.element_name())
    }

    fn exists(
        &self,
        outer: &Binding,
        collection: &CollectionRef,
        inner: Condition,
        inner_param: Binding,
    ) -> Condition {
        let label = format!(
            "{}.{}.any({} => {})",
            outer,
            collection.name(),
            inner_param,
            inner.label()
        );
        let collection = collection.clone();

        Condition::test(label, move |record| {
            collection
                .items(record)
                .into_iter()
                .any(|element| inner.evaluate(element))
        })
    }

    fn finish<S: 'static>(&self, condition: Condition, param: Binding) -> Predicate<S> {
        debug!(
            parameter = %param,
            always = condition.is_always(),
            "predicate built"
        );
        Predicate::new(condition, param)
    }
}
