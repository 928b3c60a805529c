//! Contact and create-post forms.
//!
//! Both forms are validated like the site's client-side schema and then only
//! simulated: a submission is logged, delayed and acknowledged, never stored
//! or sent anywhere.

use chrono::Local;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::content::{FrontMatter, Post};

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$").unwrap();
}

/// Reading speed used for the estimated read time of a draft
const WORDS_PER_MINUTE: usize = 200;

/// Contact form fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Per-field validation messages of the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactErrors {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl ContactForm {
    /// Check every field, collecting all messages at once
    pub fn validate(&self) -> Result<(), ContactErrors> {
        let errors = ContactErrors {
            name: min_chars(&self.name, 2, "Name must be at least 2 characters."),
            email: (!is_valid_email(&self.email))
                .then(|| "Please enter a valid email address.".to_string()),
            subject: min_chars(&self.subject, 5, "Subject must be at least 5 characters."),
            message: min_chars(&self.message, 10, "Message must be at least 10 characters."),
        };

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Create-post form fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePostForm {
    pub title: String,
    pub category: String,
    pub content: String,
    /// Optional cover image URL
    pub image: String,
}

/// Per-field validation messages of the create-post form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreatePostErrors {
    pub title: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
}

impl CreatePostErrors {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl CreatePostForm {
    /// Check every field, collecting all messages at once
    pub fn validate(&self) -> Result<(), CreatePostErrors> {
        let errors = CreatePostErrors {
            title: min_chars(&self.title, 5, "Title must be at least 5 characters."),
            category: min_chars(&self.category, 2, "Category is required."),
            content: min_chars(&self.content, 20, "Content must be at least 20 characters."),
        };

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The post this submission would have produced, for preview only
    pub fn to_draft(&self, author: &str) -> Post {
        let fm = FrontMatter {
            title: Some(self.title.clone()),
            date: Some(Local::now().format("%Y-%m-%d").to_string()),
            author: Some(author.to_string()),
            excerpt: Some(first_paragraph(&self.content)),
            image: Some(self.image.trim().to_string()).filter(|s| !s.is_empty()),
            category: Some(self.category.clone()),
            read_time: Some(read_time(&self.content)),
        };
        Post::from_parts(slug::slugify(&self.title), fm, self.content.clone())
    }
}

/// Wait out the artificial submission delay and log the payload.
///
/// Nothing is persisted.
pub async fn simulate_submission<T: std::fmt::Debug>(kind: &str, payload: &T, delay: Duration) {
    tokio::time::sleep(delay).await;
    tracing::info!("Simulated {} submission: {:?}", kind, payload);
}

/// Email address check matching the client-side schema
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL.is_match(email)
}

fn min_chars(value: &str, min: usize, message: &str) -> Option<String> {
    (value.chars().count() < min).then(|| message.to_string())
}

/// Estimated read time label such as "3 min read"
fn read_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

fn first_paragraph(content: &str) -> String {
    content
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty())
        .unwrap_or_default()
        .to_string()
}
