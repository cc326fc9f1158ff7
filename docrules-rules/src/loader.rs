use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::command::RuleCommand;
use crate::condition::FieldCatalog;
use crate::error::RuleError;

/// Recorded interaction: optional field catalog plus the commands to replay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub fields: Option<FieldCatalog>,
    #[serde(default)]
    pub commands: Vec<RuleCommand>,
}

/// Loads a replay script from a YAML or JSON file.
pub fn load_script(path: impl AsRef<Path>) -> Result<ReplayScript, RuleError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RuleError::MissingPath(path.display().to_string()));
    }
    if path.is_dir() {
        return Err(RuleError::parse_error(path, "expected a file, found a directory"));
    }

    let raw = fs::read_to_string(path).map_err(|err| RuleError::from_io(path, err))?;
    parse_script(&raw, path)
}

/// Accepts a `{fields, commands}` document, a bare command list, or a
/// single command.
pub fn parse_script(raw: &str, origin: &Path) -> Result<ReplayScript, RuleError> {
    let mut attempts = Vec::new();

    if let Ok(script) = serde_yaml::from_str::<ReplayScript>(raw) {
        if script.fields.is_some() || !script.commands.is_empty() {
            return Ok(script);
        }
    }

    attempts.push("script document".to_string());

    if let Ok(commands) = serde_yaml::from_str::<Vec<RuleCommand>>(raw) {
        return Ok(ReplayScript {
            fields: None,
            commands,
        });
    }

    attempts.push("command list".to_string());

    if let Ok(command) = serde_yaml::from_str::<RuleCommand>(raw) {
        return Ok(ReplayScript {
            fields: None,
            commands: vec![command],
        });
    }

    attempts.push("single command".to_string());

    let message = format!("unable to parse script using {:?} formats", attempts);
    Err(RuleError::parse_error(origin.to_path_buf(), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::TypeTag;

    #[test]
    fn parses_document_form() {
        let raw = r#"
fields: [amount, issued_at]
commands:
  - type: select_field
    field: issued_at
  - type: toggle_type
    tag: Date
    "on": true
"#;
        let script = parse_script(raw, Path::new("inline.yaml")).expect("parse");
        assert_eq!(script.fields.as_ref().map(FieldCatalog::len), Some(2));
        assert_eq!(
            script.commands[1],
            RuleCommand::ToggleType {
                tag: TypeTag::Date,
                on: true
            }
        );
    }

    #[test]
    fn parses_list_and_single_forms() {
        let list = parse_script(
            r#"[{"type": "add_condition"}, {"type": "remove_condition", "index": 0}]"#,
            Path::new("inline.json"),
        )
        .expect("parse");
        assert_eq!(list.commands.len(), 2);
        assert!(list.fields.is_none());

        let single = parse_script("type: delete_current_field", Path::new("inline.yaml"))
            .expect("parse");
        assert_eq!(single.commands, vec![RuleCommand::DeleteCurrentField]);
    }

    #[test]
    fn reports_unparseable_scripts() {
        let err = parse_script("type: launch_rockets", Path::new("bad.yaml")).unwrap_err();
        assert!(matches!(err, RuleError::Parse { .. }));
    }

    #[test]
    fn missing_files_are_reported() {
        let err = load_script("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, RuleError::MissingPath(_)));
    }
}
