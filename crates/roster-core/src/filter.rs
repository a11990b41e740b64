//! Multi-field substring filter.
//!
//! A record passes when every non-empty criterion is contained in the
//! matching field. Text fields compare lower-cased; phone compares as typed.

use crate::users::{Field, User};

/// One search string per filterable field. Empty means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
}

impl FilterCriteria {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Username => &mut self.username,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        };
        *slot = value.into();
    }

    /// Builder-style setter, handy for one-shot criteria.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns true when no field constrains the result.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    /// Returns true if `user` satisfies every non-empty criterion.
    pub fn matches(&self, user: &User) -> bool {
        Field::ALL.iter().all(|&field| {
            let needle = self.get(field);
            needle.is_empty() || field_contains(field, user.field(field), needle)
        })
    }
}

fn field_contains(field: Field, haystack: &str, needle: &str) -> bool {
    if field.is_case_sensitive() {
        haystack.contains(needle)
    } else {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Returns the records matching `criteria`, in their original order.
pub fn apply_filters(records: &[User], criteria: &FilterCriteria) -> Vec<User> {
    if criteria.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|user| criteria.matches(user))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str, username: &str, email: &str, phone: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    fn leanne() -> User {
        user(
            1,
            "Leanne Graham",
            "Bret",
            "Sincere@april.biz",
            "1-770-736-8031",
        )
    }

    fn sample() -> Vec<User> {
        vec![
            leanne(),
            user(
                2,
                "Ervin Howell",
                "Antonette",
                "Shanna@melissa.tv",
                "010-692-6593 x09125",
            ),
            user(
                3,
                "Clementine Bauch",
                "Samantha",
                "Nathan@yesenia.net",
                "1-463-123-4447",
            ),
            user(
                4,
                "Patricia Lebsack",
                "Karianne",
                "Julianne.OConner@kory.org",
                "493-170-9623 x156",
            ),
        ]
    }

    #[test]
    fn test_name_matches_case_insensitively() {
        let criteria = FilterCriteria::default().with(Field::Name, "leanne");
        assert_eq!(apply_filters(&[leanne()], &criteria), vec![leanne()]);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let criteria = FilterCriteria::default().with(Field::Name, "zzz");
        assert!(apply_filters(&[leanne()], &criteria).is_empty());
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let records = sample();
        assert_eq!(apply_filters(&records, &FilterCriteria::default()), records);
    }

    #[test]
    fn test_empty_records_yield_empty() {
        let criteria = FilterCriteria::default().with(Field::Email, "april");
        assert!(apply_filters(&[], &criteria).is_empty());
    }

    #[test]
    fn test_upper_case_criterion_matches_lower_case_value() {
        let criteria = FilterCriteria::default().with(Field::Email, "SINCERE@APRIL");
        assert_eq!(apply_filters(&sample(), &criteria), vec![leanne()]);
    }

    #[test]
    fn test_phone_match_is_case_sensitive() {
        let records = sample();

        let lower = FilterCriteria::default().with(Field::Phone, "x156");
        let upper = FilterCriteria::default().with(Field::Phone, "X156");

        assert_eq!(apply_filters(&records, &lower).len(), 1);
        assert!(apply_filters(&records, &upper).is_empty());
    }

    #[test]
    fn test_fields_combine_with_and() {
        let records = sample();

        // "an" appears in several usernames, "melissa" only in Ervin's email.
        let criteria = FilterCriteria::default()
            .with(Field::Username, "an")
            .with(Field::Email, "melissa");

        let result = apply_filters(&records, &criteria);
        let ids: Vec<u64> = result.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_result_preserves_input_order() {
        let records = sample();
        let criteria = FilterCriteria::default().with(Field::Phone, "-");

        let ids: Vec<u64> = apply_filters(&records, &criteria)
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let criteria = FilterCriteria::default().with(Field::Name, "e");
        let ids: Vec<u64> = apply_filters(&records, &criteria)
            .iter()
            .map(|u| u.id)
            .collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_result_is_subset_of_input() {
        let records = sample();
        let criteria = FilterCriteria::default().with(Field::Username, "a");

        for user in apply_filters(&records, &criteria) {
            assert!(records.contains(&user));
        }
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let records = sample();
        let criteria = FilterCriteria::default().with(Field::Name, "an");

        let once = apply_filters(&records, &criteria);
        let twice = apply_filters(&once, &criteria);
        assert_eq!(once, twice);
        assert_eq!(once, apply_filters(&records, &criteria));
    }

    #[test]
    fn test_criteria_get_set_roundtrip_per_field() {
        let mut criteria = FilterCriteria::default();
        assert!(criteria.is_empty());

        criteria.set(Field::Phone, "770");
        assert_eq!(criteria.get(Field::Phone), "770");
        assert_eq!(criteria.get(Field::Name), "");
        assert!(!criteria.is_empty());

        criteria.set(Field::Phone, "");
        assert!(criteria.is_empty());
    }
}
