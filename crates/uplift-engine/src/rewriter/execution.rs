//! Execution records and the per-file execution log.

use serde::{Deserialize, Serialize};

use uplift_core::types::FxHashMap;

use crate::rules::{Action, ActionValidation, Category};

/// Outcome of applying one action within one file. Repeated applications of
/// the same action in a file fold into one record with summed counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericActionExecution {
    pub category: Category,
    pub name: String,
    pub key: String,
    pub value: String,
    pub description: String,
    pub times_run: u32,
    pub invalid_executions: u32,
    pub executions_with_error: u32,
    /// Message of the first failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub validation: Option<ActionValidation>,
}

impl GenericActionExecution {
    pub fn ran(action: &Action) -> Self {
        Self {
            category: action.category,
            name: action.name.clone(),
            key: action.key.clone(),
            value: action.value.clone(),
            description: action.description.clone(),
            times_run: 1,
            invalid_executions: 0,
            executions_with_error: 0,
            error: None,
            validation: action.validation.clone(),
        }
    }

    pub fn failed(action: &Action, message: impl Into<String>) -> Self {
        Self {
            executions_with_error: 1,
            error: Some(message.into()),
            ..Self::ran(action)
        }
    }

    pub fn succeeded(&self) -> bool {
        self.executions_with_error == 0 && self.invalid_executions == 0
    }

    fn fold_key(&self) -> (Category, String, String, String) {
        (
            self.category,
            self.name.clone(),
            self.key.clone(),
            self.value.clone(),
        )
    }

    fn absorb(&mut self, other: GenericActionExecution) {
        self.times_run += other.times_run;
        self.invalid_executions += other.invalid_executions;
        self.executions_with_error += other.executions_with_error;
        if self.error.is_none() {
            self.error = other.error;
        }
    }
}

/// Ordered log of executions for one file, folded by
/// `(category, name, key, value)`. First occurrence fixes the position.
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog {
    records: Vec<GenericActionExecution>,
    positions: FxHashMap<(Category, String, String, String), usize>,
}

impl ExecutionLog {
    pub fn record(&mut self, execution: GenericActionExecution) {
        let key = execution.fold_key();
        match self.positions.get(&key) {
            Some(&at) => self.records[at].absorb(execution),
            None => {
                self.positions.insert(key, self.records.len());
                self.records.push(execution);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenericActionExecution> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GenericActionExecution> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_vec(self) -> Vec<GenericActionExecution> {
        self.records
    }
}
