//! Named text templates with `$`-placeholders.
//!
//! Placeholders are `${name}` or `$name`; `$$` yields a literal dollar sign.
//! Substitution is strict: an unbound placeholder or a stray `$` is an error,
//! never an empty string, because the output is compiled downstream.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const COMPONENTS_HEADER_TEMPLATE: &str = "components.hxx";
pub const COMPONENTS_SOURCE_TEMPLATE: &str = "components.cxx";
pub const FACTORIES_TEMPLATE: &str = "factories";
pub const FUNCTION_INSTANTIATION_TEMPLATE: &str = "function_instantiation";

const TEMPLATE_EXTENSION: &str = "tpl";

const BUILTIN_TEMPLATES: [(&str, &str); 4] = [
    (
        COMPONENTS_HEADER_TEMPLATE,
        include_str!("../templates/components.hxx.tpl"),
    ),
    (
        COMPONENTS_SOURCE_TEMPLATE,
        include_str!("../templates/components.cxx.tpl"),
    ),
    (FACTORIES_TEMPLATE, include_str!("../templates/factories.tpl")),
    (
        FUNCTION_INSTANTIATION_TEMPLATE,
        include_str!("../templates/function_instantiation.tpl"),
    ),
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template `{name}` not found")]
    Missing { name: String },
    #[error("template `{template}` has no binding for `{binding}`")]
    Unbound { template: String, binding: String },
    #[error("template `{template}` has an invalid placeholder at byte {offset}")]
    InvalidPlaceholder { template: String, offset: usize },
    #[error("failed to read template `{name}` from {}: {source}", path.display())]
    Read {
        name: String,
        path: PathBuf,
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    text: String,
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

fn is_ident_char(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

impl Template {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn substitute(&self, bindings: &[(&str, &str)]) -> Result<String, TemplateError> {
        let text = self.text.as_str();
        let mut out = String::with_capacity(text.len());
        let mut i = 0;

        while let Some(rel) = text[i..].find('$') {
            let start = i + rel;
            out.push_str(&text[i..start]);
            let rest = &text[start + 1..];

            let (key, consumed) = if rest.starts_with('$') {
                out.push('$');
                i = start + 2;
                continue;
            } else if let Some(braced) = rest.strip_prefix('{') {
                match braced.find('}') {
                    Some(end) if is_valid_ident(&braced[..end]) => (&braced[..end], end + 2),
                    _ => return Err(self.invalid_at(start)),
                }
            } else {
                let end = rest
                    .char_indices()
                    .find(|&(_, ch)| !is_ident_char(ch))
                    .map_or(rest.len(), |(idx, _)| idx);
                if !is_valid_ident(&rest[..end]) {
                    return Err(self.invalid_at(start));
                }
                (&rest[..end], end)
            };

            let value = bindings
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| *value)
                .ok_or_else(|| TemplateError::Unbound {
                    template: self.name.clone(),
                    binding: key.to_string(),
                })?;
            out.push_str(value);
            i = start + 1 + consumed;
        }

        out.push_str(&text[i..]);
        Ok(out)
    }

    fn invalid_at(&self, offset: usize) -> TemplateError {
        TemplateError::InvalidPlaceholder {
            template: self.name.clone(),
            offset,
        }
    }
}

fn is_valid_ident(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(is_ident_start) && chars.all(is_ident_char)
}

/// Where templates come from.
pub trait TemplateSource {
    fn get(&self, name: &str) -> Result<Template, TemplateError>;

    fn render(&self, name: &str, bindings: &[(&str, &str)]) -> Result<String, TemplateError> {
        self.get(name)?.substitute(bindings)
    }
}

/// Built-in templates, optionally shadowed by `<dir>/<name>.tpl` files.
///
/// Override files are read on lookup, so a broken override directory only
/// affects code generation.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: BTreeMap<String, String>,
    overrides_dir: Option<PathBuf>,
}

impl TemplateSet {
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            templates: BUILTIN_TEMPLATES
                .iter()
                .map(|(name, text)| ((*name).to_string(), (*text).to_string()))
                .collect(),
            overrides_dir: None,
        }
    }

    #[must_use]
    pub fn with_overrides_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.overrides_dir = Some(dir.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.templates.insert(name.into(), text.into());
    }

    fn read_override(&self, dir: &Path, name: &str) -> Result<Option<String>, TemplateError> {
        let path = dir.join(format!("{name}.{TEMPLATE_EXTENSION}"));
        match fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!(template = name, path = %path.display(), "Using template override");
                Ok(Some(text))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(TemplateError::Read {
                name: name.to_string(),
                path,
                source: err,
            }),
        }
    }
}

impl TemplateSource for TemplateSet {
    fn get(&self, name: &str) -> Result<Template, TemplateError> {
        if let Some(dir) = &self.overrides_dir
            && let Some(text) = self.read_override(dir, name)?
        {
            return Ok(Template::new(name, text));
        }

        self.templates
            .get(name)
            .map(|text| Template::new(name, text.clone()))
            .ok_or_else(|| TemplateError::Missing {
                name: name.to_string(),
            })
    }
}
