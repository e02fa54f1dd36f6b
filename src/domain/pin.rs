use crate::error::{BankError, Result};

pub const PIN_LENGTH: usize = 4;

/// Checks that a PIN is exactly four ASCII digits.
pub fn validate_pin(pin: &str) -> Result<()> {
    if pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(BankError::InvalidPinFormat(format!(
            "PIN must be exactly {PIN_LENGTH} digits"
        )))
    }
}

/// Checks the PIN format and that the confirmation entry matches it.
pub fn confirm_pin(pin: &str, confirmation: &str) -> Result<()> {
    validate_pin(pin)?;
    if pin != confirmation {
        return Err(BankError::InvalidPinFormat("PINs don't match".to_string()));
    }
    Ok(())
}
