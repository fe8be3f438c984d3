pub mod prelude;

pub mod novels;
pub mod users;
pub mod volumes;

use sea_orm::entity::prelude::DateTime;
use sea_orm::{ActiveValue, Set};

/// Stamps `created_at` on insert (unless the caller set it) and `updated_at` on every save.
fn touch(created_at: &mut ActiveValue<DateTime>, updated_at: &mut ActiveValue<DateTime>, insert: bool) {
    let now = chrono::Utc::now().naive_utc();

    if insert && created_at.is_not_set() {
        *created_at = Set(now);
    }

    *updated_at = Set(now);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_on_insert_sets_both() {
        let mut created = ActiveValue::NotSet;
        let mut updated = ActiveValue::NotSet;
        touch(&mut created, &mut updated, true);
        assert!(created.is_set());
        assert_eq!(created, updated);
    }

    #[test]
    fn touch_on_update_keeps_created_at() {
        let original = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        let mut created = ActiveValue::Unchanged(original);
        let mut updated = ActiveValue::Unchanged(original);
        touch(&mut created, &mut updated, false);
        assert_eq!(created, ActiveValue::Unchanged(original));
        assert!(matches!(updated, ActiveValue::Set(t) if t > original));
    }

    #[test]
    fn touch_respects_explicit_created_at() {
        let original = chrono::NaiveDate::from_ymd_opt(2020, 6, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        let mut created = Set(original);
        let mut updated = ActiveValue::NotSet;
        touch(&mut created, &mut updated, true);
        assert_eq!(created, Set(original));
    }
}
