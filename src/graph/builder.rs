use std::collections::HashMap;

use crate::core::diagnostic::{Diagnostic, DiagnosticSink};
use crate::core::employee::{parse_salary, Employee};
use crate::core::hierarchy::Hierarchy;
use crate::core::record::{split_records, RawRecord, RecordOptions};

/// Builds a [`Hierarchy`] from raw input lines on a best-effort basis.
///
/// Bad records and reporting lines that would break the hierarchy are left
/// out and reported to the sink; the build itself never fails.
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    options: RecordOptions,
}

impl HierarchyBuilder {
    pub fn new(options: RecordOptions) -> Self {
        Self { options }
    }

    pub fn build<I, S>(&self, lines: I, sink: &mut dyn DiagnosticSink) -> Hierarchy
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hierarchy = Hierarchy::default();
        let mut claimed_root: Option<String> = None;
        let mut record_lines: HashMap<String, usize> = HashMap::new();

        for record in split_records(lines, &self.options) {
            if let Some(employee) = accept_record(&hierarchy, &mut claimed_root, &record, sink) {
                if employee.is_root() {
                    hierarchy.root = Some(employee.id().to_string());
                }
                record_lines.insert(employee.id().to_string(), record.line);
                hierarchy.graph.add_vertex(employee.clone());
                hierarchy
                    .employees
                    .insert(employee.id().to_string(), employee);
            }
        }

        link_managers(&mut hierarchy, &record_lines, sink);
        hierarchy
    }
}

/// Validates one record against what has been accepted so far.
///
/// The first record with an empty manager claims the root slot as soon as its
/// fields are present, even if its salary later fails to parse.
fn accept_record(
    hierarchy: &Hierarchy,
    claimed_root: &mut Option<String>,
    record: &RawRecord,
    sink: &mut dyn DiagnosticSink,
) -> Option<Employee> {
    let id = record.id();
    if id.is_empty() {
        sink.report(Diagnostic::EmptyId { line: record.line });
        return None;
    }

    let (Some(manager_id), Some(salary_text)) = (record.manager_id(), record.salary_text()) else {
        sink.report(Diagnostic::MissingFields {
            line: record.line,
            id: id.to_string(),
            found: record.fields.len(),
        });
        return None;
    };

    if manager_id.is_empty() {
        match claimed_root.as_deref() {
            Some(root) if root != id => {
                sink.report(Diagnostic::MultipleRoots {
                    line: record.line,
                    id: id.to_string(),
                    root: root.to_string(),
                });
                return None;
            }
            Some(_) => {}
            None => *claimed_root = Some(id.to_string()),
        }
    }

    let Some(salary) = parse_salary(salary_text) else {
        sink.report(Diagnostic::InvalidSalary {
            line: record.line,
            id: id.to_string(),
            value: salary_text.to_string(),
        });
        return None;
    };

    if let Some(existing) = hierarchy.employees.get(id) {
        if existing.manager_id() != manager_id && !existing.is_root() && !manager_id.is_empty() {
            sink.report(Diagnostic::AlreadyManaged {
                line: record.line,
                id: id.to_string(),
                manager: manager_id.to_string(),
                current: existing.manager_id().to_string(),
            });
        } else {
            sink.report(Diagnostic::DuplicateId {
                line: record.line,
                id: id.to_string(),
            });
        }
        return None;
    }

    Some(Employee::new(id, manager_id, salary))
}

/// Adds `manager -> report` for every employee that names a manager, in input
/// order, unless the edge would give the report a second manager, close a
/// cycle, or point at an unknown manager.
///
/// `record_lines` maps each accepted id to the input line it came from so the
/// diagnostics can point back at the record.
fn link_managers(
    hierarchy: &mut Hierarchy,
    record_lines: &HashMap<String, usize>,
    sink: &mut dyn DiagnosticSink,
) {
    let reports: Vec<Employee> = hierarchy
        .employees
        .values()
        .filter(|employee| !employee.is_root())
        .cloned()
        .collect();

    for report in reports {
        let manager_id = report.manager_id();
        let line = record_lines.get(report.id()).copied().unwrap_or_default();
        let graph = &hierarchy.graph;

        // Pass 1 keeps one record per id, so this only fires when the graph
        // already carries an edge into the report before linking starts.
        let current_manager = graph
            .incoming_edges(&report)
            .ok()
            .and_then(|mut edges| edges.next())
            .map(|edge| edge.source().id().to_string());
        if let Some(current) = current_manager {
            sink.report(Diagnostic::AlreadyManaged {
                line,
                id: report.id().to_string(),
                manager: manager_id.to_string(),
                current,
            });
            continue;
        }

        let closes_cycle = graph
            .depth_first_walk_from(&report)
            .map(|mut walk| walk.any(|descendant| descendant.id() == manager_id))
            .unwrap_or(false);
        if closes_cycle {
            sink.report(Diagnostic::CycleDetected {
                line,
                id: report.id().to_string(),
                manager: manager_id.to_string(),
            });
            continue;
        }

        let Some(manager) = hierarchy.employees.get(manager_id) else {
            sink.report(Diagnostic::UnknownManager {
                line,
                id: report.id().to_string(),
                manager: manager_id.to_string(),
            });
            continue;
        };
        hierarchy.graph.add_edge(manager, &report);
    }
}
