use super::domain::{LoginRequest, RegisterRequest, Role};
use crate::locale::Locale;

pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const NAME_MIN_LENGTH: usize = 2;

/// Per-field validation failure shown next to a form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("this field is required")]
    Required,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("passwords do not match")]
    PasswordsDontMatch,
}

impl FieldError {
    pub fn message(self, locale: Locale) -> String {
        match (self, locale) {
            (Self::Required, Locale::English) => "This field is required".to_string(),
            (Self::Required, Locale::Spanish) => "Este campo es requerido".to_string(),
            (Self::InvalidEmail, Locale::English) => "Invalid email address".to_string(),
            (Self::InvalidEmail, Locale::Spanish) => "Email inválido".to_string(),
            (Self::PasswordTooShort { min }, Locale::English) => {
                format!("Password must be at least {min} characters")
            }
            (Self::PasswordTooShort { min }, Locale::Spanish) => {
                format!("La contraseña debe tener al menos {min} caracteres")
            }
            (Self::NameTooShort { min }, Locale::English) => {
                format!("Name must be at least {min} characters")
            }
            (Self::NameTooShort { min }, Locale::Spanish) => {
                format!("El nombre debe tener al menos {min} caracteres")
            }
            (Self::PasswordsDontMatch, Locale::English) => "Passwords do not match".to_string(),
            (Self::PasswordsDontMatch, Locale::Spanish) => {
                "Las contraseñas no coinciden".to_string()
            }
        }
    }
}

/// Failing fields in the order the form lays them out. Each field appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    entries: Vec<(&'static str, FieldError)>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`, replacing any earlier one for the same field.
    pub fn insert(&mut self, field: &'static str, error: FieldError) {
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = error,
            None => self.entries.push((field, error)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, error)| error)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn errors(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.entries.iter().map(|(_, error)| *error)
    }
}

pub fn validate_email(email: &str) -> Result<(), FieldError> {
    if email.is_empty() {
        return Err(FieldError::Required);
    }
    if !is_plausible_email(email) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        return Err(FieldError::Required);
    }
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(FieldError::PasswordTooShort {
            min: PASSWORD_MIN_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), FieldError> {
    if name.is_empty() {
        return Err(FieldError::Required);
    }
    if name.chars().count() < NAME_MIN_LENGTH {
        return Err(FieldError::NameTooShort {
            min: NAME_MIN_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_password_match(password: &str, confirmation: &str) -> Result<(), FieldError> {
    if password != confirmation {
        return Err(FieldError::PasswordsDontMatch);
    }
    Ok(())
}

// local@domain.tld: no whitespace, exactly one '@', and a dot inside the domain with
// something on both sides of it.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if let Err(err) = validate_email(self.email.trim()) {
            errors.insert("email", err);
        }
        if self.password.is_empty() {
            errors.insert("password", FieldError::Required);
        }
        errors
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl SignUpForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if let Err(err) = validate_name(self.name.trim()) {
            errors.insert("name", err);
        }
        if let Err(err) = validate_email(self.email.trim()) {
            errors.insert("email", err);
        }
        if let Err(err) = validate_password(&self.password) {
            errors.insert("password", err);
        }
        if let Err(err) = validate_password_match(&self.password, &self.confirm_password) {
            errors.insert("confirm_password", err);
        }
        errors
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
        }
    }
}
