use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    log::debug!("loaded loan inputs from {}", canonical.display());
    Ok(value)
}

fn resolve_path(path: &str) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_calc_core::{FieldInput, RawLoanInputs};
    use rust_decimal_macros::dec;

    #[test]
    fn test_read_form_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loan.json");
        fs::write(
            &path,
            r#"{"loanAmount": "300000", "downPayment": "60000",
                "interestRate": "6.5", "loanTerm": "30"}"#,
        )
        .unwrap();
        let raw: RawLoanInputs = read_json(path.to_str().unwrap()).unwrap();
        assert_eq!(raw.interest_rate, FieldInput::Value(dec!(6.5)));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = read_json::<RawLoanInputs>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }
}
