use crate::error::ValidationError;

const MAX_NAME_CHARS: usize = 7;

/// Which screen to open on launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Welcome,
    Home,
}

impl Landing {
    pub fn for_user(name: Option<&str>) -> Self {
        match name {
            Some(n) if !n.trim().is_empty() => Self::Home,
            _ => Self::Welcome,
        }
    }
}

/// Accept a display name for onboarding: non-blank, at most 7 characters.
pub fn validate_user_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::InvalidUserName);
    }
    Ok(name.to_string())
}

pub fn header_title(name: Option<&str>) -> String {
    match name {
        Some(n) if !n.trim().is_empty() => format!("Tasks for {}", n.trim()),
        _ => "Tasks for User".to_string(),
    }
}
