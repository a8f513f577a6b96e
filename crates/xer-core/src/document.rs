use crate::config::ParseOptions;
use crate::decode::{FieldSchema, RowView};
use crate::error::{Diagnostic, XerError, XerResult};
use crate::records::{
    Calendar, GenericRecord, Project, Record, Resource, ResourceCategory, ResourceCurve, Task,
    TaskActivityCodeAssignment, TaskPredecessor, TaskResourceAssignment, Wbs,
};
use crate::table::{SchemaDeclaration, Table, TableRegistry, TableView};
use crate::tokenizer::{Line, LineKind, Tokenizer, classify_line};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// The `ERMHDR` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportHeader {
    fields: Vec<String>,
}

impl ExportHeader {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    fn field(&self, position: usize) -> Option<&str> {
        self.fields
            .get(position)
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
    }

    pub fn version(&self) -> Option<&str> {
        self.field(0)
    }

    pub fn export_date(&self) -> Option<NaiveDate> {
        self.field(1)
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
    }

    pub fn exported_by(&self) -> Option<&str> {
        self.field(3)
    }

    pub fn currency(&self) -> Option<&str> {
        self.field(7)
    }
}

/// A parsed export. Immutable once built.
#[derive(Debug, Clone)]
pub struct Document {
    registry: TableRegistry,
    header: Option<ExportHeader>,
    table_order: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    options: ParseOptions,
    complete: bool,
}

impl Document {
    /// Parses with [`ParseOptions::default`].
    pub fn parse(text: &str) -> XerResult<Self> {
        Self::parse_with(text, ParseOptions::default())
    }

    pub fn parse_with(text: &str, options: ParseOptions) -> XerResult<Self> {
        let mut builder = DocumentBuilder::new(options);
        for line in Tokenizer::new(text) {
            builder.ingest(line)?;
        }
        Ok(builder.finish())
    }

    pub fn from_lines<I, S>(lines: I, options: ParseOptions) -> XerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = DocumentBuilder::new(options);
        for (index, line) in lines.into_iter().enumerate() {
            builder.push_line(line.as_ref(), index + 1)?;
        }
        Ok(builder.finish())
    }

    pub fn header(&self) -> Option<&ExportHeader> {
        self.header.as_ref()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Whether the `%E` terminator was seen.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    /// Declared tables in the order they first appeared.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.table_order.iter().map(String::as_str)
    }

    pub fn table(&self, name: &str) -> Option<&dyn TableView> {
        self.registry.view(name)
    }

    pub fn find_by_id(&self, table: &str, id: i64) -> Option<&dyn Record> {
        self.table(table)?.record_by_id(id)
    }

    pub fn find_all_by_foreign_key(&self, table: &str, field: &str, id: i64) -> Vec<&dyn Record> {
        self.table(table)
            .map(|table| table.records_by_foreign_key(field, id))
            .unwrap_or_default()
    }

    pub fn projects(&self) -> &Table<Project> {
        &self.registry.projects
    }

    pub fn calendars(&self) -> &Table<Calendar> {
        &self.registry.calendars
    }

    pub fn wbs(&self) -> &Table<Wbs> {
        &self.registry.wbs
    }

    pub fn resources(&self) -> &Table<Resource> {
        &self.registry.resources
    }

    pub fn tasks(&self) -> &Table<Task> {
        &self.registry.tasks
    }

    pub fn task_predecessors(&self) -> &Table<TaskPredecessor> {
        &self.registry.task_predecessors
    }

    pub fn task_resources(&self) -> &Table<TaskResourceAssignment> {
        &self.registry.task_resources
    }

    pub fn task_activity_codes(&self) -> &Table<TaskActivityCodeAssignment> {
        &self.registry.task_activity_codes
    }

    pub fn resource_curves(&self) -> &Table<ResourceCurve> {
        &self.registry.resource_curves
    }

    pub fn resource_categories(&self) -> &Table<ResourceCategory> {
        &self.registry.resource_categories
    }

    pub fn generic(&self, name: &str) -> Option<&Table<GenericRecord>> {
        self.registry.generic(name)
    }

    pub fn project(&self, proj_id: i64) -> Option<&Project> {
        self.registry.projects.find_by_id(proj_id)
    }

    pub fn calendar(&self, clndr_id: i64) -> Option<&Calendar> {
        self.registry.calendars.find_by_id(clndr_id)
    }

    pub fn task(&self, task_id: i64) -> Option<&Task> {
        self.registry.tasks.find_by_id(task_id)
    }

    pub fn wbs_node(&self, wbs_id: i64) -> Option<&Wbs> {
        self.registry.wbs.find_by_id(wbs_id)
    }

    pub fn resource(&self, rsrc_id: i64) -> Option<&Resource> {
        self.registry.resources.find_by_id(rsrc_id)
    }

    /// The calendar flagged as the global default, if any.
    pub fn default_calendar(&self) -> Option<&Calendar> {
        self.registry.calendars.iter().find(|calendar| calendar.is_default())
    }
}

/// Feeds lines into a new [`Document`] one at a time.
///
/// A fatal error leaves the builder in an unspecified state; drop it.
#[derive(Debug)]
pub struct DocumentBuilder {
    registry: TableRegistry,
    header: Option<ExportHeader>,
    table_order: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    options: ParseOptions,
    schemas: HashMap<String, Arc<FieldSchema>>,
    current_table: Option<String>,
    complete: bool,
}

impl DocumentBuilder {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            registry: TableRegistry::new(),
            header: None,
            table_order: Vec::new(),
            diagnostics: Vec::new(),
            options,
            schemas: HashMap::new(),
            current_table: None,
            complete: false,
        }
    }

    /// Classifies and ingests one line. `number` is 1-based.
    pub fn push_line(&mut self, line: &str, number: usize) -> XerResult<()> {
        self.ingest(Line {
            number,
            kind: classify_line(line),
        })
    }

    pub fn ingest(&mut self, line: Line<'_>) -> XerResult<()> {
        match line.kind {
            LineKind::ExportHeader(fields) => {
                if self.header.is_none() {
                    self.header = Some(ExportHeader::new(
                        fields.into_iter().map(str::to_string).collect(),
                    ));
                }
            }
            LineKind::TableHeader(name) => {
                debug!(table = name, line = line.number, "table start");
                self.current_table = Some(name.to_string());
            }
            LineKind::FieldHeader(names) => {
                let table = self
                    .current_table
                    .clone()
                    .ok_or(XerError::MissingTableHeader { line: line.number })?;
                self.declare(table, names, line.number)?;
            }
            LineKind::DataRow(row) => {
                let table = self.current_table.as_deref().unwrap_or_default();
                let schema = self
                    .schemas
                    .get(table)
                    .ok_or_else(|| XerError::SchemaMissing {
                        table: table.to_string(),
                        line: line.number,
                    })?;
                let view = RowView::new(table, line.number, schema, &row, &self.options);
                self.registry.ingest(&view, &mut self.diagnostics);
            }
            LineKind::End => self.complete = true,
            LineKind::Other => {}
        }
        Ok(())
    }

    fn declare(&mut self, table: String, names: Vec<&str>, line: usize) -> XerResult<()> {
        let schema = Arc::new(FieldSchema::new(names));
        match self.registry.declare_schema(&table, Arc::clone(&schema)) {
            SchemaDeclaration::Set => {
                debug!(table = %table, fields = schema.len(), "schema declared");
                self.schemas.insert(table.clone(), schema);
                self.table_order.push(table);
                Ok(())
            }
            SchemaDeclaration::Repeated => Ok(()),
            SchemaDeclaration::Conflict => Err(XerError::SchemaConflict { table, line }),
        }
    }

    pub fn finish(self) -> Document {
        debug!(
            tables = self.table_order.len(),
            diagnostics = self.diagnostics.len(),
            complete = self.complete,
            "document parsed"
        );
        Document {
            registry: self.registry,
            header: self.header,
            table_order: self.table_order,
            diagnostics: self.diagnostics,
            options: self.options,
            complete: self.complete,
        }
    }
}
