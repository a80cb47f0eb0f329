/// Compiled-in schemas for the built-in business entities
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::schema::{FieldType, ImportSchema, SchemaField};
use crate::shared::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedEntityKind {
    Client,
    Project,
    Invoice,
    Meeting,
    Task,
}

impl FixedEntityKind {
    pub const ALL: [FixedEntityKind; 5] = [
        FixedEntityKind::Client,
        FixedEntityKind::Project,
        FixedEntityKind::Invoice,
        FixedEntityKind::Meeting,
        FixedEntityKind::Task,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FixedEntityKind::Client => "client",
            FixedEntityKind::Project => "project",
            FixedEntityKind::Invoice => "invoice",
            FixedEntityKind::Meeting => "meeting",
            FixedEntityKind::Task => "task",
        }
    }

    pub fn schema(&self) -> ImportSchema {
        let fields = match self {
            FixedEntityKind::Client => client_fields(),
            FixedEntityKind::Project => project_fields(),
            FixedEntityKind::Invoice => invoice_fields(),
            FixedEntityKind::Meeting => meeting_fields(),
            FixedEntityKind::Task => task_fields(),
        };
        ImportSchema::fixed(*self, fields)
    }
}

impl fmt::Display for FixedEntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FixedEntityKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FixedEntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown entity '{}'", s)))
    }
}

fn client_fields() -> Vec<SchemaField> {
    vec![
        SchemaField::new(
            "name",
            "Name",
            true,
            FieldType::Text,
            &["client name", "client", "customer", "customer name", "full name", "contact name"],
        ),
        SchemaField::new(
            "email",
            "Email",
            false,
            FieldType::Email,
            &["e-mail", "email address", "mail"],
        ),
        SchemaField::new(
            "phone",
            "Phone",
            false,
            FieldType::Phone,
            &["telephone", "phone number", "mobile", "cell"],
        ),
        SchemaField::new(
            "company",
            "Company",
            false,
            FieldType::Text,
            &["organization", "organisation", "business", "firm"],
        ),
        SchemaField::new(
            "address",
            "Address",
            false,
            FieldType::Textarea,
            &["street", "billing address", "location"],
        ),
        SchemaField::new(
            "website",
            "Website",
            false,
            FieldType::Url,
            &["url", "site", "homepage"],
        ),
        SchemaField::new("status", "Status", false, FieldType::Select, &["state", "stage"]),
        SchemaField::new(
            "notes",
            "Notes",
            false,
            FieldType::Textarea,
            &["note", "comments", "remarks"],
        ),
    ]
}

fn project_fields() -> Vec<SchemaField> {
    vec![
        SchemaField::new(
            "name",
            "Project Name",
            true,
            FieldType::Text,
            &["project", "title", "name"],
        ),
        SchemaField::new(
            "client",
            "Client",
            false,
            FieldType::Text,
            &["customer", "client name", "account"],
        ),
        SchemaField::new(
            "description",
            "Description",
            false,
            FieldType::Textarea,
            &["summary", "details", "scope"],
        ),
        SchemaField::new("status", "Status", false, FieldType::Select, &["state", "phase"]),
        SchemaField::new("budget", "Budget", false, FieldType::Text, &["cost", "estimate"]),
        SchemaField::new(
            "start_date",
            "Start Date",
            false,
            FieldType::Text,
            &["start", "begins", "kickoff"],
        ),
        SchemaField::new(
            "end_date",
            "End Date",
            false,
            FieldType::Text,
            &["deadline", "due date", "finish"],
        ),
    ]
}

fn invoice_fields() -> Vec<SchemaField> {
    vec![
        SchemaField::new(
            "invoice_number",
            "Invoice Number",
            true,
            FieldType::Text,
            &["invoice no", "invoice #", "invoice", "number"],
        ),
        SchemaField::new(
            "client",
            "Client",
            true,
            FieldType::Text,
            &["customer", "bill to", "client name"],
        ),
        SchemaField::new("amount", "Amount", true, FieldType::Text, &["total", "price", "amount due"]),
        SchemaField::new("status", "Status", false, FieldType::Select, &["state", "paid"]),
        SchemaField::new(
            "issue_date",
            "Issue Date",
            false,
            FieldType::Text,
            &["date", "issued", "invoice date"],
        ),
        SchemaField::new("due_date", "Due Date", false, FieldType::Text, &["due", "payable by"]),
        SchemaField::new("notes", "Notes", false, FieldType::Textarea, &["note", "memo"]),
    ]
}

fn meeting_fields() -> Vec<SchemaField> {
    vec![
        SchemaField::new(
            "title",
            "Title",
            true,
            FieldType::Text,
            &["meeting", "subject", "topic", "name"],
        ),
        SchemaField::new(
            "date",
            "Date",
            true,
            FieldType::Text,
            &["meeting date", "when"],
        ),
        SchemaField::new("time", "Time", false, FieldType::Text, &["start time", "hour"]),
        SchemaField::new(
            "location",
            "Location",
            false,
            FieldType::Text,
            &["place", "room", "venue"],
        ),
        SchemaField::new(
            "meeting_url",
            "Meeting Link",
            false,
            FieldType::Url,
            &["link", "url", "video link"],
        ),
        SchemaField::new(
            "attendees",
            "Attendees",
            false,
            FieldType::Textarea,
            &["participants", "guests", "invitees"],
        ),
        SchemaField::new("notes", "Notes", false, FieldType::Textarea, &["agenda", "minutes"]),
    ]
}

fn task_fields() -> Vec<SchemaField> {
    vec![
        SchemaField::new(
            "title",
            "Title",
            true,
            FieldType::Text,
            &["task", "task name", "name", "todo"],
        ),
        SchemaField::new(
            "description",
            "Description",
            false,
            FieldType::Textarea,
            &["details", "summary"],
        ),
        SchemaField::new("status", "Status", false, FieldType::Select, &["state", "done"]),
        SchemaField::new(
            "priority",
            "Priority",
            false,
            FieldType::Select,
            &["importance", "urgency"],
        ),
        SchemaField::new(
            "due_date",
            "Due Date",
            false,
            FieldType::Text,
            &["due", "deadline"],
        ),
        SchemaField::new(
            "assignee",
            "Assignee",
            false,
            FieldType::Text,
            &["assigned to", "owner", "responsible"],
        ),
    ]
}
