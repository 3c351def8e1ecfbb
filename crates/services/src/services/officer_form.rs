//! Field state and validation for creating an officer.

use db::models::officer::{CreateOfficer, Department, Officer, Rank};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Name is required")]
    NameRequired,
    #[error("Badge number is required")]
    BadgeRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceKind {
    Vacation,
    Holiday,
    Sick,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OfficerForm {
    pub name: String,
    pub badge: String,
    pub email: String,
    pub phone: String,
    pub avatar: String,
    pub rank: Rank,
    pub department: Department,
    pub is_supervisor: bool,
    pub vacation_balance: u32,
    pub holiday_balance: u32,
    pub sick_balance: u32,
}

impl Default for OfficerForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            badge: String::new(),
            email: String::new(),
            phone: String::new(),
            avatar: String::new(),
            rank: Rank::default(),
            department: Department::default(),
            is_supervisor: false,
            vacation_balance: Officer::DEFAULT_VACATION_BALANCE as u32,
            holiday_balance: Officer::DEFAULT_HOLIDAY_BALANCE as u32,
            sick_balance: Officer::DEFAULT_SICK_BALANCE as u32,
        }
    }
}

impl OfficerForm {
    pub fn toggle_supervisor(&mut self) {
        self.is_supervisor = !self.is_supervisor;
    }

    pub fn balance(&self, kind: BalanceKind) -> u32 {
        match kind {
            BalanceKind::Vacation => self.vacation_balance,
            BalanceKind::Holiday => self.holiday_balance,
            BalanceKind::Sick => self.sick_balance,
        }
    }

    /// Update a balance from raw text input.
    pub fn set_balance_text(&mut self, kind: BalanceKind, text: &str) {
        let hours = parse_hours(text);
        match kind {
            BalanceKind::Vacation => self.vacation_balance = hours,
            BalanceKind::Holiday => self.holiday_balance = hours,
            BalanceKind::Sick => self.sick_balance = hours,
        }
    }

    /// Checks run in field order; the first failure wins.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::NameRequired);
        }
        if self.badge.trim().is_empty() {
            return Err(FormError::BadgeRequired);
        }
        if self.email.trim().is_empty() {
            return Err(FormError::EmailRequired);
        }
        if !self.email.contains('@') {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }

    pub fn to_insert(&self) -> CreateOfficer {
        CreateOfficer {
            name: self.name.trim().to_string(),
            badge: self.badge.trim().to_string(),
            rank: self.rank,
            department: self.department,
            email: self.email.trim().to_string(),
            phone: non_empty(&self.phone),
            avatar: non_empty(&self.avatar),
            is_supervisor: self.is_supervisor,
            vacation_balance: f64::from(self.vacation_balance),
            holiday_balance: f64::from(self.holiday_balance),
            sick_balance: f64::from(self.sick_balance),
        }
    }

    pub fn submission(&self) -> Result<CreateOfficer, FormError> {
        self.validate()?;
        Ok(self.to_insert())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Leading whole hours of `text`; anything unparseable or negative is 0.
fn parse_hours(text: &str) -> u32 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if negative || digits_len == 0 {
        return 0;
    }
    rest[..digits_len].parse::<u32>().unwrap_or(u32::MAX)
}
