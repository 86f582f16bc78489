use std::collections::BTreeMap;

pub const TITLE_MAX_CHARS: usize = 255;
pub const URL_MAX_CHARS: usize = 2048;
pub const TAG_NAME_MAX_CHARS: usize = 64;

/// Field name -> messages. Keys use dotted paths for list entries (`groups.1`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, Vec<String>> {
        self.fields
    }

    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for m in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {m}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("invalid input: {0}")]
    Validation(ValidationErrors),
    #[error("storage failure")]
    Storage(#[source] anyhow::Error),
}

impl From<ValidationErrors> for CommandError {
    fn from(errors: ValidationErrors) -> Self {
        CommandError::Validation(errors)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LinkInput {
    pub title: Option<String>,
    pub link: Option<String>,
    pub tags: Vec<i64>,
    pub groups: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLinkInput {
    /// Trimmed, possibly empty.
    pub title: String,
    pub url: String,
    pub tags: Vec<i64>,
    pub groups: Vec<i64>,
}

pub fn validate_link_input(input: &LinkInput) -> Result<ValidLinkInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let url = input.link.as_deref().map(str::trim).unwrap_or_default();
    if url.is_empty() {
        errors.add("link", "The link field is required.");
    } else if url.chars().count() > URL_MAX_CHARS {
        errors.add(
            "link",
            format!("The link may not be greater than {URL_MAX_CHARS} characters."),
        );
    } else if !is_web_url(url) {
        errors.add("link", "The link must be a valid http or https URL.");
    }

    let title = input.title.as_deref().map(str::trim).unwrap_or_default();
    if title.chars().count() > TITLE_MAX_CHARS {
        errors.add(
            "title",
            format!("The title may not be greater than {TITLE_MAX_CHARS} characters."),
        );
    }

    errors.into_result(ValidLinkInput {
        title: title.to_string(),
        url: url.to_string(),
        tags: input.tags.clone(),
        groups: input.groups.clone(),
    })
}

/// Trimmed, non-blank name of bounded length for catalog entries.
pub fn validate_name(field: &str, value: &str, max_chars: usize) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, format!("The {field} field is required."));
    } else if trimmed.chars().count() > max_chars {
        errors.add(
            field,
            format!("The {field} may not be greater than {max_chars} characters."),
        );
    }
    errors.into_result(trimmed.to_string())
}

pub fn truncate_title(title: &str) -> String {
    title.trim().chars().take(TITLE_MAX_CHARS).collect()
}

fn is_web_url(raw: &str) -> bool {
    match reqwest::Url::parse(raw) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().map(|h| !h.is_empty()).unwrap_or(false)
        }
        Err(_) => false,
    }
}
