//! Ticket form state and submit-time validation.
//!
//! A form holds raw text exactly as typed. Validation runs on submit and
//! either produces a typed [`TicketInput`] or a per-field error map; nothing
//! reaches the network while errors remain.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::ticket::{Category, Priority, Ticket, TicketInput};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Description,
    Category,
    Priority,
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    Response,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Category => "category",
            FormField::Priority => "priority",
            FormField::CustomerName => "customer_name",
            FormField::CustomerEmail => "customer_email",
            FormField::CustomerPhone => "customer_phone",
            FormField::Response => "response",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.as_str())?;
            first = false;
        }
        Ok(())
    }
}

/// Which rule set the form enforces. The public submission form and the
/// extended dashboard modal also require customer contact details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVariant {
    Basic,
    Extended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketForm {
    pub variant: FormVariant,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    errors: FieldErrors,
}

impl TicketForm {
    pub fn new(variant: FormVariant) -> Self {
        Self {
            variant,
            title: String::new(),
            description: String::new(),
            category: String::new(),
            priority: Priority::default().as_str().to_string(),
            customer_name: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            errors: FieldErrors::default(),
        }
    }

    /// Prefills the form for editing an existing ticket.
    pub fn from_ticket(variant: FormVariant, ticket: &Ticket) -> Self {
        Self {
            variant,
            title: ticket.title.clone(),
            description: ticket.description.clone().unwrap_or_default(),
            category: ticket.category.as_str().to_string(),
            priority: ticket.priority.as_str().to_string(),
            customer_name: ticket.customer_name.clone().unwrap_or_default(),
            customer_email: ticket.customer_email.clone().unwrap_or_default(),
            customer_phone: ticket.customer_phone.clone().unwrap_or_default(),
            errors: FieldErrors::default(),
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Updates one field and clears only that field's error.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Description => self.description = value,
            FormField::Category => self.category = value,
            FormField::Priority => self.priority = value,
            FormField::CustomerName => self.customer_name = value,
            FormField::CustomerEmail => self.customer_email = value,
            FormField::CustomerPhone => self.customer_phone = value,
            FormField::Response => return,
        }
        self.errors.clear(field);
    }

    /// Resets every field to its initial value after a successful create.
    pub fn clear(&mut self) {
        *self = Self::new(self.variant);
    }

    /// Runs every rule, records the errors on the form and returns the typed
    /// input when the form is clean.
    pub fn validate(&mut self) -> Result<TicketInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.title.trim().is_empty() {
            errors.insert(FormField::Title, "Title is required");
        }

        let category = if self.category.trim().is_empty() {
            errors.insert(FormField::Category, "Category is required");
            None
        } else {
            let parsed = Category::from_str(&self.category);
            if parsed.is_none() {
                errors.insert(FormField::Category, "Unknown category");
            }
            parsed
        };

        let priority = if self.priority.trim().is_empty() {
            Some(Priority::default())
        } else {
            let parsed = Priority::from_str(&self.priority);
            if parsed.is_none() {
                errors.insert(FormField::Priority, "Unknown priority");
            }
            parsed
        };

        if self.variant == FormVariant::Extended {
            if self.customer_name.trim().is_empty() {
                errors.insert(FormField::CustomerName, "Customer name is required");
            }
            if self.customer_email.trim().is_empty() {
                errors.insert(FormField::CustomerEmail, "Customer email is required");
            } else if !is_valid_email(&self.customer_email) {
                errors.insert(FormField::CustomerEmail, "Invalid email format");
            }
        } else if !self.customer_email.trim().is_empty() && !is_valid_email(&self.customer_email)
        {
            errors.insert(FormField::CustomerEmail, "Invalid email format");
        }

        self.errors = errors.clone();

        match (category, priority) {
            (Some(category), Some(priority)) if errors.is_empty() => Ok(TicketInput {
                title: self.title.trim().to_string(),
                description: non_blank(&self.description),
                category,
                priority,
                customer_name: non_blank(&self.customer_name),
                customer_email: non_blank(&self.customer_email),
                customer_phone: non_blank(&self.customer_phone),
            }),
            _ => Err(errors),
        }
    }
}

/// Response text must carry something to send.
pub fn validate_response_text(text: &str) -> Result<(), FieldErrors> {
    if text.trim().is_empty() {
        let mut errors = FieldErrors::default();
        errors.insert(FormField::Response, "Please enter a response");
        return Err(errors);
    }
    Ok(())
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TicketForm {
        let mut form = TicketForm::new(FormVariant::Extended);
        form.set(FormField::Title, "Late VAT filing");
        form.set(FormField::Category, "vat");
        form.set(FormField::CustomerName, "Ola Nordmann");
        form.set(FormField::CustomerEmail, "ola@example.no");
        form
    }

    #[test]
    fn accepts_complete_form() {
        let mut form = filled();
        form.set(FormField::Description, "  Need an extension  ");
        let input = form.validate().unwrap();
        assert_eq!(input.title, "Late VAT filing");
        assert_eq!(input.category, Category::Vat);
        assert_eq!(input.priority, Priority::Medium);
        assert_eq!(input.description.as_deref(), Some("Need an extension"));
        assert_eq!(input.customer_phone, None);
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut form = filled();
        form.set(FormField::Title, "   ");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Title), Some("Title is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn bad_email_flags_only_that_field() {
        let mut form = filled();
        form.set(FormField::CustomerEmail, "not-an-email");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::CustomerEmail), Some("Invalid email format"));
    }

    #[test]
    fn extended_variant_requires_contact() {
        let mut form = TicketForm::new(FormVariant::Extended);
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Title), Some("Title is required"));
        assert_eq!(errors.get(FormField::Category), Some("Category is required"));
        assert_eq!(
            errors.get(FormField::CustomerName),
            Some("Customer name is required")
        );
        assert_eq!(
            errors.get(FormField::CustomerEmail),
            Some("Customer email is required")
        );
    }

    #[test]
    fn basic_variant_skips_contact_rules() {
        let mut form = TicketForm::new(FormVariant::Basic);
        form.set(FormField::Title, "Question");
        form.set(FormField::Category, "other");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = TicketForm::new(FormVariant::Extended);
        let _ = form.validate();
        assert_eq!(form.errors().len(), 4);

        form.set(FormField::Title, "Now titled");
        assert_eq!(form.errors().get(FormField::Title), None);
        assert_eq!(form.errors().len(), 3);
    }

    #[test]
    fn email_pattern_requires_dot_after_at() {
        assert!(is_valid_email("a@b.no"));
        assert!(!is_valid_email("a@localhost"));
        assert!(!is_valid_email("a b@c.no"));
        assert!(!is_valid_email("a@@c.no"));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut form = filled();
        form.set(FormField::Category, "payroll");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Category), Some("Unknown category"));
    }

    #[test]
    fn clear_resets_fields() {
        let mut form = filled();
        form.clear();
        assert!(form.title.is_empty());
        assert_eq!(form.priority, "medium");
        assert_eq!(form.variant, FormVariant::Extended);
    }

    #[test]
    fn blank_response_is_rejected() {
        let errors = validate_response_text("  \n").unwrap_err();
        assert_eq!(errors.get(FormField::Response), Some("Please enter a response"));
        assert!(validate_response_text("Thanks").is_ok());
    }
}
