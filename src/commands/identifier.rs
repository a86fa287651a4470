// Generated identifier insertion

use uuid::Uuid;

use crate::editor::EditorHost;
use crate::error::Result;

/// Random lower-case hyphenated UUID v4
pub fn generate_identifier() -> String {
    Uuid::new_v4().to_string()
}

/// Insert a fresh identifier at the cursor and return it
pub fn execute_insert_identifier_command(host: &mut dyn EditorHost) -> Result<String> {
    let identifier = generate_identifier();
    host.insert_text(&identifier)?;
    tracing::debug!(identifier = %identifier, "Inserted generated identifier");
    Ok(identifier)
}
