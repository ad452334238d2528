use std::{borrow::Cow, collections::BTreeMap};

use serde::Deserialize;
use url::{Host, Url};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{BlogPost, PostFields};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_URL_MESSAGE: &str = "Invalid URL.";

/// A raw new/edit post submission. Missing fields deserialize as empty
/// strings so they are reported by validation instead of rejected.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PostForm {
    #[validate(custom(function = "required"))]
    pub title: String,

    #[validate(custom(function = "required"))]
    pub subtitle: String,

    #[validate(custom(function = "required"))]
    pub author: String,

    #[validate(custom(function = "required_url"))]
    pub img_url: String,

    #[validate(custom(function = "required"))]
    pub body: String,

    pub csrf_token: String,
}

impl PostForm {
    pub fn from_post(post: &BlogPost, csrf_token: String) -> Self {
        Self {
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author: post.author.clone(),
            img_url: post.img_url.clone(),
            body: post.body.clone(),
            csrf_token,
        }
    }

    pub fn blank(csrf_token: String) -> Self {
        Self {
            csrf_token,
            ..Self::default()
        }
    }

    /// Runs every field rule once, yielding the accepted values or the
    /// messages for each failing field.
    pub fn validated(&self) -> Result<PostFields, FieldErrors> {
        Validate::validate(self)?;

        Ok(PostFields {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            author: self.author.clone(),
            img_url: self.img_url.clone(),
            body: self.body.clone(),
        })
    }
}

/// Validation messages grouped by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors = FieldErrors::default();
        for (field, errors) in errors.field_errors() {
            for e in errors.iter() {
                let message = e
                    .message
                    .as_ref()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "Invalid value.".to_string());
                field_errors.add(&field, message);
            }
        }
        field_errors
    }
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("required", REQUIRED_MESSAGE));
    }
    Ok(())
}

/// Requires a scheme and a host; domain hosts must have a dot in them.
fn required_url(value: &str) -> Result<(), ValidationError> {
    required(value)?;

    let invalid = || new_validation_error("url", INVALID_URL_MESSAGE);
    let url = Url::parse(value.trim()).map_err(|_| invalid())?;

    match url.host() {
        Some(Host::Domain(domain))
            if domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') =>
        {
            Ok(())
        }
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(()),
        _ => Err(invalid()),
    }
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}
