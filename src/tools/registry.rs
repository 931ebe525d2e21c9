//! Named tools with JSON argument schemas, dispatched by name.

use super::ToolContext;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::{debug, info};

/// A callable task. Failures are reported in the returned text.
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn parameters_schema(&self) -> Value;
    fn execute(&self, ctx: &ToolContext, args: &Value) -> String;
}

/// What an agent layer needs to advertise a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the five timesheet/invoice/notification tools.
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        reg.register(Box::new(ReadTimesheet));
        reg.register(Box::new(SaveTimesheet));
        reg.register(Box::new(CreateInvoice));
        reg.register(Box::new(GenerateMonthlyInvoice));
        reg.register(Box::new(SendAttachments));
        info!(count = reg.tools.len(), "registered builtin tools");
        reg
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        debug!(%name, "registering tool");
        self.tools.insert(name, tool);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Tool names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.list()
            .into_iter()
            .filter_map(|n| self.get(n))
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters_schema(),
            })
            .collect()
    }

    /// Run `name` with `args`; an unknown name is reported as text too.
    pub fn execute(&self, ctx: &ToolContext, name: &str, args: &Value) -> String {
        match self.get(name) {
            Some(tool) => {
                info!(tool = name, "executing tool");
                tool.execute(ctx, args)
            }
            None => format!(
                "Unknown tool: {name}. Available tools: {}",
                self.list().join(", ")
            ),
        }
    }
}

/// Missing `args` behave like `{}`.
fn parse_args<T: DeserializeOwned>(tool: &str, args: &Value) -> Result<T, String> {
    let args = if args.is_null() { json!({}) } else { args.clone() };
    serde_json::from_value(args).map_err(|e| format!("Invalid arguments for {tool}: {e}"))
}

struct ReadTimesheet;

#[derive(Deserialize)]
struct ReadArgs {
    filename: Option<String>,
    period: Option<String>,
}

impl Tool for ReadTimesheet {
    fn name(&self) -> &'static str {
        "read_timesheet_data"
    }

    fn description(&self) -> &'static str {
        "Read the rows of a timesheet, optionally restricted to a period \
         (today, week, month, YYYY-MM-DD, YYYY-MM, YYYY or START:END)."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filename": { "type": "string", "description": "Timesheet file, defaults to the current month" },
                "period": { "type": "string", "description": "Period filter, defaults to all rows" }
            }
        })
    }

    fn execute(&self, ctx: &ToolContext, args: &Value) -> String {
        match parse_args::<ReadArgs>(self.name(), args) {
            Ok(a) => super::read_timesheet_data(ctx, a.filename.as_deref(), a.period.as_deref()),
            Err(msg) => msg,
        }
    }
}

struct SaveTimesheet;

#[derive(Deserialize)]
struct SaveArgs {
    filename: Option<String>,
    date: String,
    status: String,
    #[serde(default)]
    remarks: String,
}

impl Tool for SaveTimesheet {
    fn name(&self) -> &'static str {
        "save_or_update_timesheet"
    }

    fn description(&self) -> &'static str {
        "Add or update the attendance row for a date. Status is one of P, HL, L, WO, H; \
         remarks should stay within five words."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filename": { "type": "string", "description": "Timesheet file, defaults to the month of the date" },
                "date": { "type": "string", "description": "YYYY-MM-DD" },
                "status": { "type": "string", "enum": ["P", "HL", "L", "WO", "H"] },
                "remarks": { "type": "string" }
            },
            "required": ["date", "status"]
        })
    }

    fn execute(&self, ctx: &ToolContext, args: &Value) -> String {
        match parse_args::<SaveArgs>(self.name(), args) {
            Ok(a) => super::save_or_update_timesheet(
                ctx,
                a.filename.as_deref(),
                &a.date,
                &a.status,
                &a.remarks,
            ),
            Err(msg) => msg,
        }
    }
}

struct CreateInvoice;

#[derive(Deserialize)]
struct CreateArgs {
    #[serde(default)]
    filename: String,
    data: Option<Value>,
}

impl Tool for CreateInvoice {
    fn name(&self) -> &'static str {
        "create_invoice_document"
    }

    fn description(&self) -> &'static str {
        "Write an invoice DOCX from display-ready values (name, date, bill_to, \
         salary_description, details, total, total_words)."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filename": { "type": "string", "description": "Output name, .docx is appended when missing" },
                "data": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "date": { "type": "string" },
                        "bill_to": { "type": "array", "items": { "type": "string" } },
                        "salary_description": { "type": "string" },
                        "details": { "type": "array" },
                        "total": { "type": "string" },
                        "total_words": { "type": "string" }
                    }
                }
            },
            "required": ["filename", "data"]
        })
    }

    fn execute(&self, ctx: &ToolContext, args: &Value) -> String {
        match parse_args::<CreateArgs>(self.name(), args) {
            Ok(a) => super::create_invoice_document(ctx, &a.filename, a.data.as_ref()),
            Err(msg) => msg,
        }
    }
}

struct GenerateMonthlyInvoice;

#[derive(Deserialize)]
struct MonthArgs {
    month: Option<String>,
}

impl Tool for GenerateMonthlyInvoice {
    fn name(&self) -> &'static str {
        "generate_monthly_invoice"
    }

    fn description(&self) -> &'static str {
        "Compute working days, leaves and total for a month from its timesheet \
         and the stored profile, then write invoice_<month>.docx."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "month": { "type": "string", "description": "YYYY-MM, month name or number; defaults to the current month" }
            }
        })
    }

    fn execute(&self, ctx: &ToolContext, args: &Value) -> String {
        match parse_args::<MonthArgs>(self.name(), args) {
            Ok(a) => super::generate_monthly_invoice(ctx, a.month.as_deref()),
            Err(msg) => msg,
        }
    }
}

struct SendAttachments;

#[derive(Deserialize)]
struct SendArgs {
    xlsx_filename: Option<String>,
    docx_filename: Option<String>,
}

impl Tool for SendAttachments {
    fn name(&self) -> &'static str {
        "send_message_with_attachments"
    }

    fn description(&self) -> &'static str {
        "Send a greeting to the configured Telegram chat followed by the timesheet and invoice files."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "xlsx_filename": { "type": "string" },
                "docx_filename": { "type": "string" }
            }
        })
    }

    fn execute(&self, ctx: &ToolContext, args: &Value) -> String {
        match parse_args::<SendArgs>(self.name(), args) {
            Ok(a) => super::send_message_with_attachments(
                ctx,
                a.xlsx_filename.as_deref(),
                a.docx_filename.as_deref(),
            ),
            Err(msg) => msg,
        }
    }
}
