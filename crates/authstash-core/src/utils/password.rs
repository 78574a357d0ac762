/// Special characters counted toward password strength.
const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Criteria met before a password counts as strong.
/// 4 of 5 tolerates one missing character class.
const STRONG_THRESHOLD: u8 = 4;

/// Password strength feedback for signup forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStrength {
    /// Number of criteria met, 0-5.
    pub score: u8,
    /// Human-readable hints for the criteria still missing.
    pub missing: Vec<&'static str>,
}

impl PasswordStrength {
    pub fn is_strong(&self) -> bool {
        self.score >= STRONG_THRESHOLD
    }
}

/// Score a password against five criteria: length of at least 8, an
/// uppercase letter, a lowercase letter, a digit, and a special
/// character.
///
/// This is a UI hint only; the credential store never enforces it.
pub fn password_strength(password: &str) -> PasswordStrength {
    let checks: [(bool, &'static str); 5] = [
        (password.len() >= 8, "at least 8 characters"),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "an uppercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "a lowercase letter",
        ),
        (password.chars().any(|c| c.is_ascii_digit()), "a number"),
        (
            password.chars().any(|c| SPECIAL_CHARS.contains(c)),
            "a special character",
        ),
    ];

    let mut score = 0;
    let mut missing = Vec::new();
    for (met, hint) in checks {
        if met {
            score += 1;
        } else {
            missing.push(hint);
        }
    }

    PasswordStrength { score, missing }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_meets_nothing() {
        let strength = password_strength("");
        assert_eq!(strength.score, 0);
        assert_eq!(strength.missing.len(), 5);
        assert!(!strength.is_strong());
    }

    #[test]
    fn test_all_criteria_met() {
        let strength = password_strength("Str0ng!pass");
        assert_eq!(strength.score, 5);
        assert!(strength.missing.is_empty());
        assert!(strength.is_strong());
    }

    #[test]
    fn test_four_of_five_is_strong() {
        // Long, mixed case, digit - no special character
        let strength = password_strength("Passw0rdLong");
        assert_eq!(strength.score, 4);
        assert_eq!(strength.missing, vec!["a special character"]);
        assert!(strength.is_strong());
    }

    #[test]
    fn test_demo_password_is_weak() {
        let strength = password_strength("admin123");
        assert_eq!(strength.score, 3);
        assert!(!strength.is_strong());
    }
}
