use indexmap::IndexMap;

use crate::core::diagnostic::{Diagnostic, DiagnosticSink};
use crate::core::employee::Employee;
use crate::error::{OrgchartError, Result};
use crate::graph::DirectedSparseGraph;

/// Reporting structure: an edge `manager -> report` for every accepted
/// reporting line, plus an id lookup in input order.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    pub(crate) graph: DirectedSparseGraph<Employee>,
    pub(crate) employees: IndexMap<String, Employee>,
    pub(crate) root: Option<String>,
}

impl Hierarchy {
    pub fn graph(&self) -> &DirectedSparseGraph<Employee> {
        &self.graph
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.get(id)
    }

    pub fn employees(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.employees.values()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// The single employee accepted without a manager, if any.
    pub fn root(&self) -> Option<&Employee> {
        self.root.as_deref().and_then(|id| self.employees.get(id))
    }

    /// Employees nobody manages in the final graph: the root plus anyone whose
    /// reporting line was rejected.
    pub fn top_level(&self) -> Vec<&Employee> {
        self.employees
            .values()
            .filter(|employee| {
                self.graph
                    .incoming_edges(employee)
                    .map(|mut edges| edges.next().is_none())
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Total salary of `manager` and everyone who transitively reports to them.
    ///
    /// Never fails: an unknown manager or a traversal error is reported to
    /// `sink` and the budget is 0.
    pub fn salary_budget(&self, manager: &str, sink: &mut dyn DiagnosticSink) -> u64 {
        match self.try_salary_budget(manager) {
            Ok(total) => total,
            Err(err) => {
                sink.report(Diagnostic::BudgetUnavailable {
                    manager: manager.to_string(),
                    reason: err.to_string(),
                });
                0
            }
        }
    }

    fn try_salary_budget(&self, manager: &str) -> Result<u64> {
        let employee = self.lookup(manager)?;
        let total = self
            .graph
            .depth_first_walk_from(employee)?
            .fold(0u64, |acc, e| acc.saturating_add(e.salary()));
        Ok(total)
    }

    /// Depth-first order from `from`, or from the first accepted employee.
    pub fn walk(&self, from: Option<&str>) -> Result<Vec<&Employee>> {
        let walk = match from {
            Some(id) => self.graph.depth_first_walk_from(self.lookup(id)?)?,
            None => self.graph.depth_first_walk()?,
        };
        Ok(walk.collect())
    }

    pub fn reports_of(&self, id: &str) -> Result<Vec<&Employee>> {
        let employee = self.lookup(id)?;
        Ok(self
            .graph
            .outgoing_edges(employee)?
            .map(|edge| *edge.destination())
            .collect())
    }

    pub fn manager_of(&self, id: &str) -> Result<Option<&Employee>> {
        let employee = self.lookup(id)?;
        Ok(self
            .graph
            .incoming_edges(employee)?
            .next()
            .map(|edge| *edge.source()))
    }

    /// `id` followed by its manager, their manager, and so on up to the top.
    pub fn chain_of_command(&self, id: &str) -> Result<Vec<&Employee>> {
        let mut chain = vec![self.lookup(id)?];
        while let Some(current) = chain.last() {
            match self.manager_of(current.id())? {
                Some(manager) if !chain.contains(&manager) => chain.push(manager),
                _ => break,
            }
        }
        Ok(chain)
    }

    fn lookup(&self, id: &str) -> Result<&Employee> {
        self.employees
            .get(id)
            .ok_or_else(|| OrgchartError::UnknownEmployee(id.to_string()))
    }
}
