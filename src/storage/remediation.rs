//! Operator guidance for upsert failures with a known fix.
//!
//! Recognition is by substring of the error text, which is all the REST
//! layer reliably gives us across PostgREST versions.

use crate::config::StorageConfig;
use crate::storage::error::StorageError;

const MISSING_CONSTRAINT: &str =
    "there is no unique or exclusion constraint matching the ON CONFLICT specification";

const RLS_VIOLATION: &str = "new row violates row-level security policy";

const RULE: &str = "============================================================";

/// A storage failure the operator can fix with one SQL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    /// The conflict column has no UNIQUE constraint.
    MissingUniqueConstraint,
    /// Row-level security rejected the write for this key.
    RowLevelSecurity,
}

impl Remediation {
    /// Matches an error against the known failure signatures.
    pub fn classify(error: &StorageError) -> Option<Self> {
        let text = error.to_string();

        if text.contains(MISSING_CONSTRAINT) {
            Some(Remediation::MissingUniqueConstraint)
        } else if text.contains(RLS_VIOLATION) {
            Some(Remediation::RowLevelSecurity)
        } else {
            None
        }
    }

    /// SQL statement that fixes the problem.
    pub fn sql(&self, storage: &StorageConfig) -> String {
        match self {
            Remediation::MissingUniqueConstraint => format!(
                "ALTER TABLE {table} ADD CONSTRAINT {table}_{column}_key UNIQUE ({column});",
                table = storage.table,
                column = storage.conflict_column
            ),
            Remediation::RowLevelSecurity => format!(
                "CREATE POLICY \"Allow public access\" ON {} FOR ALL TO anon USING (true) WITH CHECK (true);",
                storage.table
            ),
        }
    }

    /// Full operator-facing message block.
    pub fn render(&self, storage: &StorageConfig) -> String {
        let mut lines = vec![String::new(), RULE.to_string()];

        match self {
            Remediation::MissingUniqueConstraint => {
                lines.push("ERROR: Missing Database Constraint".to_string());
                lines.push(format!(
                    "The '{}' table needs a UNIQUE constraint on the '{}' column",
                    storage.table, storage.conflict_column
                ));
                lines.push("for the upsert operation to work.".to_string());
                lines.push(String::new());
                lines.push("Please run the following SQL in your Supabase Dashboard:".to_string());
            }
            Remediation::RowLevelSecurity => {
                lines.push("ERROR: RLS Policy Violation".to_string());
                lines.push(
                    "The database rejected the write operation due to Row-Level Security."
                        .to_string(),
                );
                lines.push(
                    "Your script is using the ANON key, which is restricted by default."
                        .to_string(),
                );
                lines.push(String::new());
                lines.push(
                    "Please run the following SQL in your Supabase Dashboard to allow access:"
                        .to_string(),
                );
            }
        }

        lines.push(self.sql(storage));
        lines.push(RULE.to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}
