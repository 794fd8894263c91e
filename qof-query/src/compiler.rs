//! Compilation of criteria trees into a backend representation.
//!
//! Each group is compiled after its children: own criteria are folded left
//! to right with the group operator, then each child group, then one
//! existential condition per collection. Identity values drop out of every
//! fold, so absent criteria leave no trace in the output.

use tracing::debug;

use crate::capability::{GroupScope, RenderCapability};
use crate::criteria::FilterCriteria;
use crate::error::{QueryError, QueryResult};
use crate::group::{CriteriaGroup, GroupId};
use crate::operator::GroupOperator;

/// Compiles criteria trees with one rendering backend.
#[derive(Debug, Clone, Default)]
pub struct FilterCompiler<R> {
    renderer: R,
}

impl<R: RenderCapability> FilterCompiler<R> {
    /// Create a compiler for `renderer`.
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// The backend.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Compile `criteria`, naming the record under test `parameter_name`.
    pub fn compile<S: 'static, F>(
        &self,
        criteria: &FilterCriteria<'_, S, F>,
        parameter_name: &str,
    ) -> QueryResult<R::Compiled<S>> {
        debug!(
            source = std::any::type_name::<S>(),
            groups = criteria.groups().len(),
            criteria = criteria.criterion_count(),
            parameter = parameter_name,
            "compiling criteria"
        );

        let param = self.renderer.parameter::<S>(parameter_name);
        let condition = self.compile_group(criteria, GroupId::ROOT, &param)?;

        crate::qof_debug!(
            identity = self.renderer.is_identity(&condition),
            "criteria compiled"
        );
        Ok(self.renderer.finish::<S>(condition, param))
    }

    fn compile_group<S, F>(
        &self,
        criteria: &FilterCriteria<'_, S, F>,
        id: GroupId,
        param: &R::Param,
    ) -> QueryResult<R::Output> {
        let group = criteria
            .get(id)
            .ok_or_else(|| QueryError::internal(format!("group {} is not in the tree", id)))?;

        if group.is_empty() {
            return Ok(self.renderer.identity());
        }

        let operator = group.operator();
        let mut fold = Fold::new(&self.renderer, operator);

        for criterion in group.criteria() {
            fold.push(self.renderer.comparison(criterion, param)?, 1);
        }

        for &child in group.children() {
            fold.push(self.compile_group(criteria, child, param)?, 1);
        }

        for entry in group.collections() {
            let collection = entry.collection();
            let inner_param = self.renderer.element_parameter(collection);

            let mut inner = Fold::new(&self.renderer, operator);
            for criterion in entry.criteria() {
                inner.push(self.renderer.comparison(criterion, &inner_param)?, 1);
            }
            let (inner, inner_terms) = inner.finish();

            let existential = self.renderer.exists(param, collection, inner, inner_param);
            fold.push(existential, inner_terms);
        }

        Ok(self.format(group, fold))
    }

    fn format(&self, group: &CriteriaGroup, fold: Fold<'_, R>) -> R::Output {
        let (condition, terms) = fold.finish();
        if self.renderer.is_identity(&condition) {
            return condition;
        }
        self.renderer
            .format_group(&GroupScope::new(group, terms), condition)
    }
}

/// Compile `criteria` with `renderer` in one call.
pub fn compile<R, S, F>(
    renderer: R,
    criteria: &FilterCriteria<'_, S, F>,
    parameter_name: &str,
) -> QueryResult<R::Compiled<S>>
where
    R: RenderCapability,
    S: 'static,
{
    FilterCompiler::new(renderer).compile(criteria, parameter_name)
}

/// Left fold of conditions under one operator, skipping identities.
struct Fold<'r, R: RenderCapability> {
    renderer: &'r R,
    operator: GroupOperator,
    acc: R::Output,
    terms: usize,
}

impl<'r, R: RenderCapability> Fold<'r, R> {
    fn new(renderer: &'r R, operator: GroupOperator) -> Self {
        Self {
            renderer,
            operator,
            acc: renderer.identity(),
            terms: 0,
        }
    }

    fn push(&mut self, condition: R::Output, weight: usize) {
        if self.renderer.is_identity(&condition) {
            return;
        }
        self.terms += weight.max(1);

        let acc = std::mem::replace(&mut self.acc, self.renderer.identity());
        self.acc = if self.renderer.is_identity(&acc) {
            condition
        } else {
            match self.operator {
                GroupOperator::And => self.renderer.and(acc, condition),
                GroupOperator::Or => self.renderer.or(acc, condition),
            }
        };
    }

    fn finish(self) -> (R::Output, usize) {
        (self.acc, self.terms)
    }
}
