//! # Project Accumulator
//!
//! [`ProjectsMap`] collects the fragments produced while scanning a
//! content tree: one spec per project and an ordered list of guided
//! steps. It is owned by a single run, filled file by file, and turned
//! into the JSON instance handed to the schema validator.
//!
//! ## Merge Rules
//!
//! - A spec fragment replaces the project's spec wholesale. Steps already
//!   collected for the project are kept.
//! - A step fragment for an unseen `stepId` is appended, so steps keep
//!   first-encountered order.
//! - A step fragment for a known `stepId` overlays its fields key by key,
//!   with the incoming value winning.
//! - Text from an instructions document always wins over an
//!   `instructions` key found in step metadata.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::identity::{ProjectName, StepId};
use crate::spec::{GuidedStep, ProjectSpec};

/// JSON key holding the step identifier.
pub const STEP_ID_KEY: &str = "stepId";
/// JSON key holding the step instructions.
pub const INSTRUCTIONS_KEY: &str = "instructions";

/// Content contributed to a step by a single file.
#[derive(Debug, Clone, PartialEq)]
pub enum StepFragment {
    /// Fields from a step metadata document.
    Metadata(Map<String, Value>),
    /// Full text of an instructions document.
    Instructions(String),
}

/// One guided step of a project.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    step_id: StepId,
    fields: Map<String, Value>,
    document_instructions: Option<String>,
}

impl StepRecord {
    fn new(step_id: StepId) -> Self {
        Self {
            step_id,
            fields: Map::new(),
            document_instructions: None,
        }
    }

    /// The step's identifier.
    pub fn step_id(&self) -> &StepId {
        &self.step_id
    }

    /// Fields collected from metadata documents, excluding `stepId`.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The effective instructions value, if any file supplied one.
    pub fn instructions(&self) -> Option<Value> {
        match &self.document_instructions {
            Some(text) => Some(Value::String(text.clone())),
            None => self.fields.get(INSTRUCTIONS_KEY).cloned(),
        }
    }

    fn apply(&mut self, fragment: StepFragment) {
        match fragment {
            StepFragment::Metadata(fields) => {
                for (key, value) in fields {
                    if key == STEP_ID_KEY {
                        if value.as_str() != Some(self.step_id.as_str()) {
                            tracing::warn!(
                                step = %self.step_id,
                                declared = %value,
                                "step metadata declares a different stepId; using directory name"
                            );
                        }
                        continue;
                    }
                    self.fields.insert(key, value);
                }
            }
            StepFragment::Instructions(text) => {
                self.document_instructions = Some(text);
            }
        }
    }

    /// Materialize the step as the JSON object that gets validated.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(
            STEP_ID_KEY.to_string(),
            Value::String(self.step_id.as_str().to_string()),
        );
        for (key, value) in &self.fields {
            obj.insert(key.clone(), value.clone());
        }
        if let Some(text) = &self.document_instructions {
            obj.insert(INSTRUCTIONS_KEY.to_string(), Value::String(text.clone()));
        }
        Value::Object(obj)
    }

    /// Decode the step into its typed view. Only meaningful after the
    /// map has passed schema validation.
    pub fn typed(&self) -> Result<GuidedStep, serde_json::Error> {
        serde_json::from_value(self.to_value())
    }
}

/// Everything collected for one project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectRecord {
    spec: Option<Value>,
    steps: Vec<StepRecord>,
}

impl ProjectRecord {
    /// The parsed spec document, if one was found.
    pub fn spec(&self) -> Option<&Value> {
        self.spec.as_ref()
    }

    /// Steps in first-encountered order.
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Look up a step by id.
    pub fn step(&self, step_id: &StepId) -> Option<&StepRecord> {
        self.steps.iter().find(|s| &s.step_id == step_id)
    }

    /// Decode the spec into its typed view. Returns `None` when the
    /// project has no spec yet.
    pub fn typed_spec(&self) -> Option<Result<ProjectSpec, serde_json::Error>> {
        self.spec
            .as_ref()
            .map(|spec| serde_json::from_value(spec.clone()))
    }

    /// Materialize the record. `steps` is omitted when empty.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if let Some(spec) = &self.spec {
            obj.insert("spec".to_string(), spec.clone());
        }
        if !self.steps.is_empty() {
            obj.insert(
                "steps".to_string(),
                Value::Array(self.steps.iter().map(StepRecord::to_value).collect()),
            );
        }
        Value::Object(obj)
    }
}

/// The per-run mapping from project name to its aggregated record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectsMap {
    projects: BTreeMap<ProjectName, ProjectRecord>,
}

impl ProjectsMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the spec of `project`.
    pub fn merge_spec(&mut self, project: ProjectName, spec: Value) {
        match self.projects.get_mut(&project) {
            Some(record) => {
                if record.spec.is_some() {
                    tracing::debug!(project = %project, "replacing previously collected spec");
                }
                record.spec = Some(spec);
            }
            None => {
                self.projects.insert(
                    project,
                    ProjectRecord {
                        spec: Some(spec),
                        steps: Vec::new(),
                    },
                );
            }
        }
    }

    /// Merge a step fragment into `project`, creating the project and the
    /// step as needed.
    pub fn merge_step(&mut self, project: ProjectName, step_id: StepId, fragment: StepFragment) {
        let record = self.projects.entry(project).or_default();
        match record.steps.iter().position(|s| s.step_id == step_id) {
            Some(index) => record.steps[index].apply(fragment),
            None => {
                let mut step = StepRecord::new(step_id);
                step.apply(fragment);
                record.steps.push(step);
            }
        }
    }

    /// Look up a project by name.
    pub fn get(&self, project: &ProjectName) -> Option<&ProjectRecord> {
        self.projects.get(project)
    }

    /// Iterate projects in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProjectName, &ProjectRecord)> {
        self.projects.iter()
    }

    /// Returns the number of projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Returns true if no project was collected.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Total number of steps across all projects.
    pub fn step_count(&self) -> usize {
        self.projects.values().map(|p| p.steps.len()).sum()
    }

    /// Materialize the whole map as the JSON instance to validate.
    pub fn to_value(&self) -> Value {
        let obj: Map<String, Value> = self
            .projects
            .iter()
            .map(|(name, record)| (name.as_str().to_string(), record.to_value()))
            .collect();
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn project(name: &str) -> ProjectName {
        ProjectName::new(name).unwrap()
    }

    fn step(id: &str) -> StepId {
        StepId::new(id).unwrap()
    }

    fn metadata(value: Value) -> StepFragment {
        match value {
            Value::Object(map) => StepFragment::Metadata(map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn spec_and_step_scenario() {
        let mut map = ProjectsMap::new();
        map.merge_spec(project("proj1"), json!({"name": "Project One"}));
        map.merge_step(
            project("proj1"),
            step("step1"),
            metadata(json!({"stepId": "step1", "instructions": "x", "name": "Step 1"})),
        );
        map.merge_step(
            project("proj1"),
            step("step1"),
            StepFragment::Instructions("Do the thing".to_string()),
        );

        assert_eq!(
            map.to_value(),
            json!({
                "proj1": {
                    "spec": {"name": "Project One"},
                    "steps": [
                        {"stepId": "step1", "instructions": "Do the thing", "name": "Step 1"}
                    ]
                }
            })
        );
    }

    #[test]
    fn instructions_document_wins_when_read_first() {
        let mut map = ProjectsMap::new();
        map.merge_step(
            project("p"),
            step("s"),
            StepFragment::Instructions("from document".to_string()),
        );
        map.merge_step(
            project("p"),
            step("s"),
            metadata(json!({"instructions": "from metadata", "name": "S"})),
        );
        let record = map.get(&project("p")).unwrap();
        let s = record.step(&step("s")).unwrap();
        assert_eq!(s.instructions(), Some(json!("from document")));
        assert_eq!(s.fields()["name"], "S");
    }

    #[test]
    fn spec_replaces_previous_spec_but_keeps_steps() {
        let mut map = ProjectsMap::new();
        map.merge_step(
            project("p"),
            step("s"),
            StepFragment::Instructions("text".to_string()),
        );
        map.merge_spec(project("p"), json!({"name": "first", "level": "easy"}));
        map.merge_spec(project("p"), json!({"name": "second"}));

        let record = map.get(&project("p")).unwrap();
        assert_eq!(record.spec(), Some(&json!({"name": "second"})));
        assert_eq!(record.steps().len(), 1);
    }

    #[test]
    fn steps_keep_first_encountered_order() {
        let mut map = ProjectsMap::new();
        for id in ["zeta", "alpha", "mid"] {
            map.merge_step(
                project("p"),
                step(id),
                StepFragment::Instructions(id.to_string()),
            );
        }
        map.merge_step(
            project("p"),
            step("alpha"),
            metadata(json!({"name": "Alpha"})),
        );

        let ids: Vec<&str> = map
            .get(&project("p"))
            .unwrap()
            .steps()
            .iter()
            .map(|s| s.step_id().as_str())
            .collect();
        assert_eq!(ids, ["zeta", "alpha", "mid"]);
        assert_eq!(map.step_count(), 3);
    }

    #[test]
    fn metadata_overlay_is_shallow_last_write_wins() {
        let mut map = ProjectsMap::new();
        map.merge_step(
            project("p"),
            step("s"),
            metadata(json!({"name": "Old", "stepBreakDown": [{"text": "a"}]})),
        );
        map.merge_step(project("p"), step("s"), metadata(json!({"name": "New"})));

        let value = map.get(&project("p")).unwrap().steps()[0].to_value();
        assert_eq!(value["name"], "New");
        assert_eq!(value["stepBreakDown"], json!([{"text": "a"}]));
    }

    #[test]
    fn derived_step_id_overrides_declared_one() {
        let mut map = ProjectsMap::new();
        map.merge_step(
            project("p"),
            step("from-dir"),
            metadata(json!({"stepId": "declared", "name": "N"})),
        );
        let value = map.get(&project("p")).unwrap().steps()[0].to_value();
        assert_eq!(value["stepId"], "from-dir");
    }

    #[test]
    fn projects_without_steps_omit_steps_key() {
        let mut map = ProjectsMap::new();
        map.merge_spec(project("a"), json!({}));
        map.merge_spec(project("b"), json!({}));
        assert_eq!(map.len(), 2);
        assert_eq!(map.to_value(), json!({"a": {"spec": {}}, "b": {"spec": {}}}));
    }

    #[test]
    fn step_without_spec_has_no_spec_key() {
        let mut map = ProjectsMap::new();
        map.merge_step(
            project("p"),
            step("s"),
            StepFragment::Instructions("t".to_string()),
        );
        let value = map.to_value();
        assert!(value["p"].get("spec").is_none());
        assert!(map.get(&project("p")).unwrap().typed_spec().is_none());
    }

    proptest! {
        #[test]
        fn merge_is_order_independent_across_document_kinds(
            name in "[A-Za-z ]{1,12}",
            meta_text in "[a-z]{0,8}",
            doc_text in "[a-z]{1,8}",
            instructions_first in any::<bool>(),
        ) {
            let meta = metadata(json!({"name": name, "instructions": meta_text}));
            let doc = StepFragment::Instructions(doc_text.clone());
            let (first, second) = if instructions_first { (doc, meta) } else { (meta, doc) };

            let mut map = ProjectsMap::new();
            map.merge_step(project("p"), step("s"), first);
            map.merge_step(project("p"), step("s"), second);

            let value = map.get(&project("p")).unwrap().steps()[0].to_value();
            prop_assert_eq!(&value["instructions"], &json!(doc_text));
            prop_assert_eq!(&value["name"], &json!(name));
            prop_assert_eq!(&value["stepId"], &json!("s"));
        }
    }
}
