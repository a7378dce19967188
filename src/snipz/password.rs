//! Random password generation.
//!
//! Lowercase letters are always in the pool; uppercase letters, digits and symbols are
//! opt-out. Each character is drawn uniformly from the whole pool, so with
//! `require_each_class` off a short password may happen to miss an enabled class.

use crate::error::{Result, SnipzError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::RangeInclusive;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SPECIAL: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?/";

pub const DEFAULT_PASSWORD_LENGTH: usize = 16;
pub const PASSWORD_LENGTHS: RangeInclusive<usize> = 8..=64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordOptions {
    pub length: usize,
    pub uppercase: bool,
    pub digits: bool,
    pub special: bool,
    /// Guarantee at least one character from every enabled class.
    pub require_each_class: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
            uppercase: true,
            digits: true,
            special: true,
            require_each_class: false,
        }
    }
}

impl PasswordOptions {
    fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec![LOWERCASE];
        if self.uppercase {
            classes.push(UPPERCASE);
        }
        if self.digits {
            classes.push(DIGITS);
        }
        if self.special {
            classes.push(SPECIAL);
        }
        classes
    }
}

pub fn generate(options: &PasswordOptions) -> Result<String> {
    generate_with_rng(options, &mut rand::thread_rng())
}

pub fn generate_with_rng<R: Rng>(options: &PasswordOptions, rng: &mut R) -> Result<String> {
    if !PASSWORD_LENGTHS.contains(&options.length) {
        return Err(SnipzError::Validation(format!(
            "Password length must be between {} and {}, got {}",
            PASSWORD_LENGTHS.start(),
            PASSWORD_LENGTHS.end(),
            options.length
        )));
    }

    let classes = options.classes();
    let pool: Vec<char> = classes.iter().flat_map(|c| c.chars()).collect();

    let mut password: Vec<char> = Vec::with_capacity(options.length);
    if options.require_each_class {
        for class in &classes {
            let chars: Vec<char> = class.chars().collect();
            password.push(chars[rng.gen_range(0..chars.len())]);
        }
    }
    while password.len() < options.length {
        password.push(pool[rng.gen_range(0..pool.len())]);
    }
    if options.require_each_class {
        password.shuffle(rng);
    }

    Ok(password.into_iter().collect())
}
