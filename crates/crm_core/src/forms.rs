//! Raw dialog input and the checks it must pass before a request is sent.

use shared::{
    domain::{Segment, Stage},
    error::ValidationError,
    protocol::{CreateBroadcastRequest, CreateLeadRequest, MESSAGE_SOFT_LIMIT},
};

use crate::aggregate::SegmentCounts;

/// Lead dialog fields exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadDraft {
    pub name: String,
    pub username: String,
    pub telegram_id: String,
    pub stage: Stage,
    pub value: String,
    pub notes: String,
}

impl LeadDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingLeadName);
        }
        Ok(())
    }

    pub fn to_request(&self) -> Result<CreateLeadRequest, ValidationError> {
        self.validate()?;
        let username = self.username.trim();
        Ok(CreateLeadRequest {
            name: self.name.clone(),
            username: (!username.is_empty()).then(|| username.to_string()),
            telegram_id: parse_telegram_id(&self.telegram_id),
            stage: self.stage,
            value: parse_value(&self.value),
            notes: self.notes.clone(),
        })
    }
}

/// Leading integer of the input, ignoring anything after it ("12.7" and
/// "12abc" give 12). Input without a leading integer maps to `None`, never 0.
pub fn parse_telegram_id(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let digits_from = usize::from(raw.starts_with(['+', '-']));
    let end = digits_from + leading_digits(&raw[digits_from..]);
    if end == digits_from {
        return None;
    }
    raw[..end].parse::<i64>().ok()
}

/// Deal value from the leading decimal number of the input ("1500 rub" gives
/// 1500). No leading number, non-finite or negative values become 0.
pub fn parse_value(raw: &str) -> f64 {
    let raw = raw.trim_start();
    let mut end = usize::from(raw.starts_with(['+', '-']));

    let int_digits = leading_digits(&raw[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if raw[end..].starts_with('.') {
        frac_digits = leading_digits(&raw[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if raw[end..].starts_with(['e', 'E']) {
        let exp_from = end + 1 + usize::from(raw[end + 1..].starts_with(['+', '-']));
        let exp_digits = leading_digits(&raw[exp_from..]);
        if exp_digits > 0 {
            end = exp_from + exp_digits;
        }
    }

    match raw[..end].parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Broadcast dialog fields exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastDraft {
    pub name: String,
    pub message: String,
    pub target_segment: Segment,
}

impl BroadcastDraft {
    /// Characters typed so far, for the "n / 4096" counter.
    pub fn message_len(&self) -> usize {
        self.message.chars().count()
    }

    /// Display hint only; long messages are still sent.
    pub fn exceeds_soft_limit(&self) -> bool {
        self.message_len() > MESSAGE_SOFT_LIMIT
    }

    pub fn validate(&self, counts: &SegmentCounts) -> Result<usize, ValidationError> {
        if self.name.trim().is_empty() || self.message.trim().is_empty() {
            return Err(ValidationError::MissingBroadcastFields);
        }
        let recipients = counts.get(self.target_segment);
        if recipients == 0 {
            return Err(ValidationError::NoRecipients {
                segment: self.target_segment,
            });
        }
        Ok(recipients)
    }

    pub fn to_request(
        &self,
        counts: &SegmentCounts,
    ) -> Result<(CreateBroadcastRequest, usize), ValidationError> {
        let recipients = self.validate(counts)?;
        Ok((
            CreateBroadcastRequest {
                name: self.name.clone(),
                message: self.message.clone(),
                target_segment: self.target_segment,
            },
            recipients,
        ))
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
