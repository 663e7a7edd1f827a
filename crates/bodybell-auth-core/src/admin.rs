//! Admin allow-list

use std::collections::HashSet;

/// Split a comma-separated allow-list, trimming entries and dropping blanks
pub fn parse_admin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(String::from)
        .collect()
}

/// Static set of admin email addresses.
///
/// Membership is exact and case-sensitive. The list is fixed for the life of
/// the process; changing it means redeploying configuration.
#[derive(Debug, Clone, Default)]
pub struct AdminPolicy {
    emails: HashSet<String>,
}

impl AdminPolicy {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(Into::into)
                .filter(|e: &String| !e.is_empty())
                .collect(),
        }
    }

    pub fn is_admin(&self, email: &str) -> bool {
        self.emails.contains(email)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_membership() {
        let policy = AdminPolicy::new(["ben@bodybell.example"]);
        assert!(policy.is_admin("ben@bodybell.example"));
        assert!(!policy.is_admin("Ben@bodybell.example"));
        assert!(!policy.is_admin("ben@bodybell.example "));
        assert!(!policy.is_admin(""));
    }

    #[test]
    fn test_parse_admin_list() {
        assert_eq!(parse_admin_list(" a@x.io, b@x.io ,,"), vec!["a@x.io", "b@x.io"]);

        let policy = AdminPolicy::new(parse_admin_list(" a@x.io, b@x.io ,,"));
        assert_eq!(policy.len(), 2);
        assert!(policy.is_admin("a@x.io"));
        assert!(policy.is_admin("b@x.io"));
    }

    #[test]
    fn test_empty_policy_denies_everyone() {
        let policy = AdminPolicy::new(parse_admin_list(""));
        assert!(policy.is_empty());
        assert!(!policy.is_admin("anyone@x.io"));
    }
}
