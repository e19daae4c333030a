// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Input checks applied before credentials leave the device.

use crate::models::{Credentials, SignUpRequest};

/// Special characters a password must draw at least one of.
const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub const MIN_PASSWORD_LEN: usize = 8;

/// Reject sign-in attempts with a blank email or password.
pub fn check_credentials(credentials: &Credentials) -> Result<(), String> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err("Email and password are required".to_string());
    }
    Ok(())
}

/// Validate a sign-up payload and return it with the document normalized.
pub fn check_sign_up(request: &SignUpRequest) -> Result<SignUpRequest, String> {
    if request.name.trim().is_empty()
        || request.document.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err("Please fill in all fields".to_string());
    }

    if !is_valid_email(&request.email) {
        return Err("Please enter a valid email address".to_string());
    }

    check_password_strength(&request.password)?;

    let document = digits_only(&request.document);
    if document.is_empty() {
        return Err("Document number must contain digits".to_string());
    }

    Ok(SignUpRequest {
        name: request.name.trim().to_string(),
        document,
        email: request.email.clone(),
        password: request.password.clone(),
    })
}

/// `local@host.tld` with no whitespace anywhere and a single `@`.
///
/// The domain only needs a dot with something on both sides, so a trailing
/// dot (`a@b.com.`) or a doubled one (`a@b..com`) still passes.
pub fn is_valid_email(email: &str) -> bool {
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
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn check_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain an uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain a lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain a digit".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err(format!(
            "Password must contain one of {PASSWORD_SPECIALS}"
        ));
    }
    Ok(())
}

/// Strip formatting (dots, dashes) from a masked document number.
pub fn digits_only(document: &str) -> String {
    document.chars().filter(char::is_ascii_digit).collect()
}
