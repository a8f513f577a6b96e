use crate::decode::{FieldSchema, RowView};
use crate::error::{Diagnostic, ErrorKind};
use crate::records::{
    Calendar, Decode, GenericRecord, Project, Record, Resource, ResourceCategory, ResourceCurve,
    TableSchema, Task, TaskActivityCodeAssignment, TaskPredecessor, TaskResourceAssignment, Wbs,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Records of one table in arrival order, with a primary-key index and one
/// index per foreign-key column.
#[derive(Debug, Clone)]
pub struct Table<R> {
    name: String,
    schema: Option<Arc<FieldSchema>>,
    primary_key: Option<String>,
    records: Vec<R>,
    by_id: HashMap<i64, usize>,
    by_key: HashMap<String, HashMap<i64, Vec<usize>>>,
}

/// Outcome of declaring a table's field schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaDeclaration {
    Set,
    /// Same fields as the schema already set.
    Repeated,
    Conflict,
}

impl<R: Record> Table<R> {
    pub fn new<S: AsRef<str>>(
        name: impl Into<String>,
        primary_key: Option<&str>,
        foreign_keys: &[S],
    ) -> Self {
        Self {
            name: name.into(),
            schema: None,
            primary_key: primary_key.map(str::to_string),
            records: Vec::new(),
            by_id: HashMap::new(),
            by_key: foreign_keys
                .iter()
                .map(|field| (field.as_ref().to_string(), HashMap::new()))
                .collect(),
        }
    }

    pub fn typed() -> Self
    where
        R: TableSchema,
    {
        Self::new(R::TABLE, R::PRIMARY_KEY, R::FOREIGN_KEYS)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&Arc<FieldSchema>> {
        self.schema.as_ref()
    }

    pub fn primary_key_field(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    pub fn declare_schema(&mut self, schema: Arc<FieldSchema>) -> SchemaDeclaration {
        match &self.schema {
            None => {
                self.schema = Some(schema);
                SchemaDeclaration::Set
            }
            Some(current) if current.names() == schema.names() => SchemaDeclaration::Repeated,
            Some(_) => SchemaDeclaration::Conflict,
        }
    }

    /// Appends a record and updates every index. Returns the position of the
    /// record previously indexed under the same primary key, which stays in
    /// the table but is no longer found by id.
    pub fn add(&mut self, record: R) -> Option<usize> {
        let position = self.records.len();
        for (field, index) in self.by_key.iter_mut() {
            if let Some(id) = record.foreign_key(field) {
                index.entry(id).or_default().push(position);
            }
        }
        let displaced = record
            .primary_key()
            .and_then(|id| self.by_id.insert(id, position));
        self.records.push(record);
        displaced
    }

    pub fn find_by_id(&self, id: i64) -> Option<&R> {
        self.by_id.get(&id).map(|&position| &self.records[position])
    }

    /// Records whose `field` equals `id`, in insertion order. Empty when
    /// `field` is not indexed.
    pub fn find_all_by_foreign_key(&self, field: &str, id: i64) -> Vec<&R> {
        self.by_key
            .get(field)
            .and_then(|index| index.get(&id))
            .map(|positions| positions.iter().map(|&p| &self.records[p]).collect())
            .unwrap_or_default()
    }

    /// Starts indexing another foreign-key column, covering existing records.
    pub fn index_key(&mut self, field: &str) {
        if self.by_key.contains_key(field) {
            return;
        }
        let mut index: HashMap<i64, Vec<usize>> = HashMap::new();
        for (position, record) in self.records.iter().enumerate() {
            if let Some(id) = record.foreign_key(field) {
                index.entry(id).or_default().push(position);
            }
        }
        self.by_key.insert(field.to_string(), index);
    }

    pub fn indexed_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.by_key.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn is_indexed(&self, field: &str) -> bool {
        self.by_key.contains_key(field)
    }

    /// Number of distinct key values in a foreign-key index.
    pub fn foreign_key_index_len(&self, field: &str) -> usize {
        self.by_key.get(field).map_or(0, HashMap::len)
    }

    pub fn get(&self, position: usize) -> Option<&R> {
        self.records.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: Decode> Table<R> {
    /// Decodes one row into this table. Row problems become diagnostics; a
    /// row that fails to decode is dropped.
    pub(crate) fn ingest(&mut self, row: &RowView<'_>, diagnostics: &mut Vec<Diagnostic>) {
        match R::decode(row) {
            Ok(record) => {
                let id = record.primary_key();
                if let (Some(id), Some(_)) = (id, self.add(record)) {
                    row.note(Diagnostic::warning(
                        ErrorKind::DuplicatePrimaryKey,
                        row.table(),
                        row.line(),
                        format!("primary key {id} repeats; the later row wins"),
                    ));
                }
            }
            Err(err) => row.note(Diagnostic::error(
                err.kind(),
                row.table(),
                row.line(),
                format!("{err}; row dropped"),
            )),
        }
        for note in row.take_notes() {
            note.log();
            diagnostics.push(note);
        }
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Name-based, type-erased access to a table.
pub trait TableView: Send + Sync {
    fn name(&self) -> &str;

    fn schema(&self) -> Option<&FieldSchema>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record_at(&self, position: usize) -> Option<&dyn Record>;

    fn record_by_id(&self, id: i64) -> Option<&dyn Record>;

    fn records_by_foreign_key(&self, field: &str, id: i64) -> Vec<&dyn Record>;

    fn iter_records(&self) -> Box<dyn Iterator<Item = &dyn Record> + '_>;

    fn indexed_keys(&self) -> Vec<&str>;
}

impl<R: Record> TableView for Table<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> Option<&FieldSchema> {
        self.schema.as_deref()
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn record_at(&self, position: usize) -> Option<&dyn Record> {
        self.records.get(position).map(|record| record as &dyn Record)
    }

    fn record_by_id(&self, id: i64) -> Option<&dyn Record> {
        self.find_by_id(id).map(|record| record as &dyn Record)
    }

    fn records_by_foreign_key(&self, field: &str, id: i64) -> Vec<&dyn Record> {
        self.find_all_by_foreign_key(field, id)
            .into_iter()
            .map(|record| record as &dyn Record)
            .collect()
    }

    fn iter_records(&self) -> Box<dyn Iterator<Item = &dyn Record> + '_> {
        Box::new(self.records.iter().map(|record| record as &dyn Record))
    }

    fn indexed_keys(&self) -> Vec<&str> {
        Table::indexed_keys(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableKind {
    Project,
    Calendar,
    Wbs,
    Resource,
    Task,
    TaskPredecessor,
    TaskResource,
    TaskActivityCode,
    ResourceCurve,
    ResourceCategory,
    Other,
}

impl TableKind {
    fn of(name: &str) -> Self {
        match name {
            "PROJECT" => TableKind::Project,
            "CALENDAR" => TableKind::Calendar,
            "PROJWBS" => TableKind::Wbs,
            "RSRC" => TableKind::Resource,
            "TASK" => TableKind::Task,
            "TASKPRED" => TableKind::TaskPredecessor,
            "TASKRSRC" => TableKind::TaskResource,
            "TASKACTV" => TableKind::TaskActivityCode,
            "RSRCCURVDATA" => TableKind::ResourceCurve,
            "RSRCRCAT" => TableKind::ResourceCategory,
            _ => TableKind::Other,
        }
    }
}

/// One table per table name: typed for the known tables, generic for the
/// rest.
#[derive(Debug, Clone)]
pub struct TableRegistry {
    pub projects: Table<Project>,
    pub calendars: Table<Calendar>,
    pub wbs: Table<Wbs>,
    pub resources: Table<Resource>,
    pub tasks: Table<Task>,
    pub task_predecessors: Table<TaskPredecessor>,
    pub task_resources: Table<TaskResourceAssignment>,
    pub task_activity_codes: Table<TaskActivityCodeAssignment>,
    pub resource_curves: Table<ResourceCurve>,
    pub resource_categories: Table<ResourceCategory>,
    other: BTreeMap<String, Table<GenericRecord>>,
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self {
            projects: Table::typed(),
            calendars: Table::typed(),
            wbs: Table::typed(),
            resources: Table::typed(),
            tasks: Table::typed(),
            task_predecessors: Table::typed(),
            task_resources: Table::typed(),
            task_activity_codes: Table::typed(),
            resource_curves: Table::typed(),
            resource_categories: Table::typed(),
            other: BTreeMap::new(),
        }
    }
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table whose field schema has been declared.
    pub fn view(&self, name: &str) -> Option<&dyn TableView> {
        let table: &dyn TableView = match TableKind::of(name) {
            TableKind::Project => &self.projects,
            TableKind::Calendar => &self.calendars,
            TableKind::Wbs => &self.wbs,
            TableKind::Resource => &self.resources,
            TableKind::Task => &self.tasks,
            TableKind::TaskPredecessor => &self.task_predecessors,
            TableKind::TaskResource => &self.task_resources,
            TableKind::TaskActivityCode => &self.task_activity_codes,
            TableKind::ResourceCurve => &self.resource_curves,
            TableKind::ResourceCategory => &self.resource_categories,
            TableKind::Other => self.other.get(name)?,
        };
        table.schema().is_some().then_some(table)
    }

    pub fn generic(&self, name: &str) -> Option<&Table<GenericRecord>> {
        self.other.get(name)
    }

    pub fn generic_tables(&self) -> impl Iterator<Item = &Table<GenericRecord>> {
        self.other.values()
    }

    pub fn has_schema(&self, name: &str) -> bool {
        self.view(name).is_some()
    }

    pub(crate) fn declare_schema(&mut self, name: &str, schema: Arc<FieldSchema>) -> SchemaDeclaration {
        match TableKind::of(name) {
            TableKind::Project => self.projects.declare_schema(schema),
            TableKind::Calendar => self.calendars.declare_schema(schema),
            TableKind::Wbs => self.wbs.declare_schema(schema),
            TableKind::Resource => self.resources.declare_schema(schema),
            TableKind::Task => self.tasks.declare_schema(schema),
            TableKind::TaskPredecessor => self.task_predecessors.declare_schema(schema),
            TableKind::TaskResource => self.task_resources.declare_schema(schema),
            TableKind::TaskActivityCode => self.task_activity_codes.declare_schema(schema),
            TableKind::ResourceCurve => self.resource_curves.declare_schema(schema),
            TableKind::ResourceCategory => self.resource_categories.declare_schema(schema),
            TableKind::Other => {
                let names = schema.names();
                let table = self.other.entry(name.to_string()).or_insert_with(|| {
                    Table::new(
                        name,
                        GenericRecord::key_field(name, names),
                        GenericRecord::foreign_key_fields(name, names).as_slice(),
                    )
                });
                table.declare_schema(Arc::clone(&schema))
            }
        }
    }

    pub(crate) fn ingest(&mut self, row: &RowView<'_>, diagnostics: &mut Vec<Diagnostic>) {
        match TableKind::of(row.table()) {
            TableKind::Project => self.projects.ingest(row, diagnostics),
            TableKind::Calendar => self.calendars.ingest(row, diagnostics),
            TableKind::Wbs => self.wbs.ingest(row, diagnostics),
            TableKind::Resource => self.resources.ingest(row, diagnostics),
            TableKind::Task => self.tasks.ingest(row, diagnostics),
            TableKind::TaskPredecessor => self.task_predecessors.ingest(row, diagnostics),
            TableKind::TaskResource => self.task_resources.ingest(row, diagnostics),
            TableKind::TaskActivityCode => self.task_activity_codes.ingest(row, diagnostics),
            TableKind::ResourceCurve => self.resource_curves.ingest(row, diagnostics),
            TableKind::ResourceCategory => self.resource_categories.ingest(row, diagnostics),
            TableKind::Other => {
                if let Some(table) = self.other.get_mut(row.table()) {
                    table.ingest(row, diagnostics);
                }
            }
        }
    }
}
